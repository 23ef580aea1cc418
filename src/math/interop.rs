use ndarray::{Array2, ShapeError};

use crate::math::Matrix;

impl From<Array2<f64>> for Matrix {
    fn from(array: Array2<f64>) -> Self {
        let (rows, cols) = array.dim();
        let data: Vec<f64> = array.iter().copied().collect();
        match Matrix::from_shape_vec((rows, cols), data) {
            Ok(m) => m,
            Err(e) => unreachable!("ndarray produced an inconsistent buffer: {}", e),
        }
    }
}

impl TryFrom<Matrix> for Array2<f64> {
    type Error = ShapeError;

    fn try_from(m: Matrix) -> Result<Self, Self::Error> {
        let shape = m.shape();
        Array2::from_shape_vec(shape, m.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_ndarray_keeps_logical_order() {
        // transposed view is not in standard layout
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].reversed_axes();
        let m = Matrix::from(a.to_owned());
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.row_slice(0), &[1.0, 4.0]);
        assert_eq!(m.row_slice(2), &[3.0, 6.0]);
    }

    #[test]
    fn test_into_ndarray() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let a = Array2::try_from(m).unwrap();
        assert_eq!(a, array![[1.0, 2.0], [3.0, 4.0]]);
    }
}
