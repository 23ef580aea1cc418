//! Checked arithmetic on [`Matrix`].
//!
//! The free functions accept possibly-absent operands and report
//! [`MatrixError::NullOperand`] for a missing side. The `+`, `-` and `*`
//! operators on `&Matrix` forward to them with both operands present, so every
//! access path shares one implementation and one set of errors.
use std::ops::{Add, Mul, Sub};

use crate::error::{MatrixError, Operand, Operation, Result};
use crate::math::Matrix;

fn operands<'a>(
    lhs: Option<&'a Matrix>,
    rhs: Option<&'a Matrix>,
) -> Result<(&'a Matrix, &'a Matrix)> {
    let lhs = lhs.ok_or(MatrixError::NullOperand {
        operand: Operand::Left,
    })?;
    let rhs = rhs.ok_or(MatrixError::NullOperand {
        operand: Operand::Right,
    })?;
    Ok((lhs, rhs))
}

fn mismatch(operation: Operation, lhs: &Matrix, rhs: &Matrix) -> MatrixError {
    log::debug!(
        "rejecting {}: {}x{} and {}x{}",
        operation,
        lhs.nrows(),
        lhs.ncols(),
        rhs.nrows(),
        rhs.ncols()
    );
    MatrixError::DimensionMismatch {
        operation,
        lhs: lhs.shape(),
        rhs: rhs.shape(),
    }
}

fn elementwise<F>(operation: Operation, lhs: &Matrix, rhs: &Matrix, f: F) -> Result<Matrix>
where
    F: Fn(f64, f64) -> f64,
{
    if lhs.shape() != rhs.shape() {
        return Err(mismatch(operation, lhs, rhs));
    }
    log::trace!("{} {}x{}", operation, lhs.nrows(), lhs.ncols());

    let data = lhs
        .as_slice()
        .iter()
        .zip(rhs.as_slice())
        .map(|(&a, &b)| f(a, b))
        .collect();
    Matrix::from_shape_vec(lhs.shape(), data)
}

/// Elementwise `lhs + rhs`.
pub fn add<'a, L, R>(lhs: L, rhs: R) -> Result<Matrix>
where
    L: Into<Option<&'a Matrix>>,
    R: Into<Option<&'a Matrix>>,
{
    let (lhs, rhs) = operands(lhs.into(), rhs.into())?;
    elementwise(Operation::Add, lhs, rhs, |a, b| a + b)
}

/// Elementwise `lhs - rhs`.
pub fn subtract<'a, L, R>(lhs: L, rhs: R) -> Result<Matrix>
where
    L: Into<Option<&'a Matrix>>,
    R: Into<Option<&'a Matrix>>,
{
    let (lhs, rhs) = operands(lhs.into(), rhs.into())?;
    elementwise(Operation::Subtract, lhs, rhs, |a, b| a - b)
}

/// Matrix product `lhs × rhs`.
///
/// Requires `lhs.ncols() == rhs.nrows()` and yields a
/// `lhs.nrows() × rhs.ncols()` matrix, computed with the plain triple loop.
pub fn multiply<'a, L, R>(lhs: L, rhs: R) -> Result<Matrix>
where
    L: Into<Option<&'a Matrix>>,
    R: Into<Option<&'a Matrix>>,
{
    let (lhs, rhs) = operands(lhs.into(), rhs.into())?;
    if lhs.ncols() != rhs.nrows() {
        return Err(mismatch(Operation::Multiply, lhs, rhs));
    }

    let (n, inner, m) = (lhs.nrows(), lhs.ncols(), rhs.ncols());
    log::trace!("multiply {}x{} by {}x{}", n, inner, inner, m);

    let mut out = Matrix::checked_zeros(n, m).ok_or(MatrixError::InvalidDimension {
        rows: isize::try_from(n).unwrap_or(isize::MAX),
        cols: isize::try_from(m).unwrap_or(isize::MAX),
    })?;
    let (a, b) = (lhs.as_slice(), rhs.as_slice());
    let c = out.as_mut_slice();
    for i in 0..n {
        for j in 0..m {
            for k in 0..inner {
                c[i * m + j] += a[i * inner + k] * b[k * m + j];
            }
        }
    }
    Ok(out)
}

impl Add<&Matrix> for &Matrix {
    type Output = Result<Matrix>;

    fn add(self, rhs: &Matrix) -> Self::Output {
        add(self, rhs)
    }
}

impl Sub<&Matrix> for &Matrix {
    type Output = Result<Matrix>;

    fn sub(self, rhs: &Matrix) -> Self::Output {
        subtract(self, rhs)
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix>;

    fn mul(self, rhs: &Matrix) -> Self::Output {
        multiply(self, rhs)
    }
}
