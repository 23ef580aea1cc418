//! Dense matrix type and its arithmetic.
//!
//! `Matrix` stores `f64` values in a single row-major buffer. Arithmetic
//! lives in [`ops`]; the optional `ndarray` feature adds conversions to and
//! from `ndarray::Array2<f64>`.
pub mod matrix;
pub mod ops;

#[cfg(feature = "ndarray")]
pub mod interop;

pub use matrix::Matrix;
