use std::fmt;

use thiserror::Error;

/// Result type alias for matrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Which side of a binary operation an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Left,
    Right,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Left => write!(f, "left"),
            Operand::Right => write!(f, "right"),
        }
    }
}

/// Binary matrix operation, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Subtract => write!(f, "subtract"),
            Operation::Multiply => write!(f, "multiply"),
        }
    }
}

/// Matrix error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Negative (or overflowing) row/column count at construction
    #[error("invalid dimension: rows={rows}, cols={cols}")]
    InvalidDimension { rows: isize, cols: isize },

    /// Source buffer absent
    #[error("matrix buffer is absent")]
    NullInput,

    /// Operand absent
    #[error("{operand} operand is absent")]
    NullOperand { operand: Operand },

    /// Index negative or outside `[0, extent)`
    #[error("index ({row}, {col}) out of range for {rows}×{cols} matrix")]
    InvalidIndex {
        row: isize,
        col: isize,
        rows: usize,
        cols: usize,
    },

    /// Operand shapes incompatible for the operation
    #[error(
        "cannot {operation} {}×{} and {}×{} matrices",
        .lhs.0, .lhs.1, .rhs.0, .rhs.1
    )]
    DimensionMismatch {
        operation: Operation,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Flat buffer length disagrees with the requested shape
    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    InvalidShape { rows: usize, cols: usize, len: usize },

    /// Nested buffer is not rectangular
    #[error("row {row} has {len} elements, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}
