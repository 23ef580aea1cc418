use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::config::Tolerance;
use crate::error::{MatrixError, Result};

const MAX_LEN: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// Dense row-major matrix of `f64`.
///
/// The shape is fixed at construction; only element values can change.
/// Buffers handed to [`Matrix::from_shape_vec`] are adopted by move, so the
/// matrix always exclusively owns its storage.
///
/// A `Matrix` has no interior mutability. Sharing one for mutation across
/// threads requires external synchronization such as a `Mutex`.
///
/// The serde form is `{ "rows", "cols", "data" }`. Formats without NaN or
/// infinity, such as JSON via `serde_json`, write those elements as `null`
/// and cannot read them back; use a format that keeps IEEE special values
/// when they may appear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

#[derive(Serialize, Deserialize)]
struct MatrixRepr {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<MatrixRepr> for Matrix {
    type Error = MatrixError;

    fn try_from(repr: MatrixRepr) -> Result<Self> {
        Matrix::from_shape_vec((repr.rows, repr.cols), repr.data)
    }
}

impl From<Matrix> for MatrixRepr {
    fn from(m: Matrix) -> Self {
        MatrixRepr {
            rows: m.rows,
            cols: m.cols,
            data: m.data,
        }
    }
}

impl Matrix {
    /// Creates a zero-filled `rows × cols` matrix.
    ///
    /// Fails with [`MatrixError::InvalidDimension`] when either count is
    /// negative or the element count cannot be allocated. Zero-sized
    /// dimensions are allowed.
    pub fn new(rows: isize, cols: isize) -> Result<Self> {
        let invalid = || MatrixError::InvalidDimension { rows, cols };
        let (Ok(r), Ok(c)) = (usize::try_from(rows), usize::try_from(cols)) else {
            return Err(invalid());
        };
        Self::checked_zeros(r, c).ok_or_else(invalid)
    }

    /// Zero-filled matrix from unsigned counts.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_elem(rows, cols, 0.0)
    }

    /// # Panics
    ///
    /// Panics if `rows * cols` overflows.
    pub fn from_elem(rows: usize, cols: usize, value: f64) -> Self {
        let len = checked_len(rows, cols)
            .unwrap_or_else(|| panic!("matrix dimensions {}x{} overflow", rows, cols));
        Self {
            data: vec![value; len],
            rows,
            cols,
        }
    }

    pub(crate) fn checked_zeros(rows: usize, cols: usize) -> Option<Self> {
        let len = checked_len(rows, cols)?;
        Some(Self {
            data: vec![0.0; len],
            rows,
            cols,
        })
    }

    /// `n × n` identity matrix.
    ///
    /// # Panics
    ///
    /// Panics if `n * n` overflows.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Adopts a row-major buffer without copying it.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if checked_len(rows, cols) != Some(data.len()) {
            return Err(MatrixError::InvalidShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Builds a matrix from nested rows, inferring the shape from the buffer.
    ///
    /// Passing `None` fails with [`MatrixError::NullInput`]. The column count
    /// is taken from the first row and every other row must match it.
    pub fn from_rows<B>(buffer: B) -> Result<Self>
    where
        B: Into<Option<Vec<Vec<f64>>>>,
    {
        let buffer = buffer.into().ok_or(MatrixError::NullInput)?;
        let rows = buffer.len();
        let cols = buffer.first().map_or(0, Vec::len);

        if let Some((row, values)) = buffer.iter().enumerate().find(|(_, v)| v.len() != cols) {
            return Err(MatrixError::RaggedRow {
                row,
                len: values.len(),
                expected: cols,
            });
        }
        let data = buffer.into_iter().flatten().collect();
        Ok(Self { data, rows, cols })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True when the matrix holds no elements (zero rows or zero columns).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn checked_offset(&self, row: isize, col: isize) -> Result<usize> {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) if r < self.rows && c < self.cols => Ok(self.offset(r, c)),
            _ => Err(MatrixError::InvalidIndex {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            }),
        }
    }

    /// Reads the element at `(row, col)`.
    ///
    /// Indices must lie in `[0, rows)` and `[0, cols)`; anything else fails
    /// with [`MatrixError::InvalidIndex`].
    pub fn get(&self, row: isize, col: isize) -> Result<f64> {
        let offset = self.checked_offset(row, col)?;
        Ok(self.data[offset])
    }

    /// Writes the element at `(row, col)`, same bounds as [`Matrix::get`].
    pub fn set(&mut self, row: isize, col: isize, value: f64) -> Result<()> {
        let offset = self.checked_offset(row, col)?;
        self.data[offset] = value;
        Ok(())
    }

    pub fn row_slice(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row index out of bounds");
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |row| self.row_slice(row))
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                out[(col, row)] = self[(row, col)];
            }
        }
        out
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Shape-aware comparison under a floating-point tolerance.
    pub fn approx_eq(&self, other: &Matrix, tolerance: Tolerance) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| tolerance.within(a, b))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Same as `self + rhs`.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        self + rhs
    }

    /// Same as `self - rhs`.
    pub fn subtract(&self, rhs: &Matrix) -> Result<Matrix> {
        self - rhs
    }

    /// Same as `self * rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        self * rhs
    }
}

fn checked_len(rows: usize, cols: usize) -> Option<usize> {
    rows.checked_mul(cols).filter(|&len| len <= MAX_LEN)
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            index.0,
            index.1,
            self.rows,
            self.cols
        );
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        assert!(
            index.0 < self.rows && index.1 < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            index.0,
            index.1,
            self.rows,
            self.cols
        );
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, row) in self.rows_iter().enumerate() {
            write!(f, "[")?;
            for (col, value) in row.iter().enumerate() {
                write!(f, "{}", value)?;
                if col + 1 != row.len() {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if idx + 1 != self.rows {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
