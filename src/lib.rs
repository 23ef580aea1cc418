//! densemat: a small dense matrix value type.
//!
//! This crate provides a row-major `f64` [`Matrix`] with checked construction,
//! checked element access and the three elementary algebraic operations
//! (addition, subtraction, multiplication). Every operation validates shapes
//! up front and reports violations through [`MatrixError`].
//!
//! The binary operators on `&Matrix` are the primitive operations; the
//! `add`/`subtract`/`multiply` methods and the [`math::ops`] free functions
//! are alternative access paths with identical behavior.
pub mod config;
pub mod error;
pub mod math;

pub use config::Tolerance;
pub use error::{MatrixError, Operand, Operation, Result};
pub use math::Matrix;
