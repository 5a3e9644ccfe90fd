//! Matrix products backed by faer GEMM.

use faer::linalg::matmul::matmul as gemm;
use faer::{Accum, MatMut, MatRef, Par};

use crate::backend::FaerView;
use crate::error::{DmrgError, Result};
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;

/// Matrix product `a * b`.
///
/// # Errors
///
/// Returns `DmrgError::RankMismatch` for non-matrix arguments and
/// `DmrgError::ShapeMismatch` if the inner dimensions differ.
///
/// # Examples
///
/// ```
/// use heisdmrg::DenseTensor;
/// use heisdmrg::operations::matmul;
///
/// let a = DenseTensor::from_vec(vec![1.0, 3.0, 2.0, 4.0], &[2, 2]).unwrap();
/// let c = matmul(&a, &DenseTensor::identity(2)).unwrap();
/// assert_eq!(c, a);
/// ```
pub fn matmul<T: Scalar>(a: &DenseTensor<T>, b: &DenseTensor<T>) -> Result<DenseTensor<T>> {
    let (m, k) = a.require_matrix()?;
    let (kb, n) = b.require_matrix()?;
    if k != kb {
        return Err(DmrgError::ShapeMismatch {
            expected: k,
            actual: kb,
        });
    }
    let mut c = DenseTensor::<T>::zeros(&[m, n]);
    gemm(
        c.faer_view_mut(m, n),
        Accum::Replace,
        a.faer_view(m, k),
        b.faer_view(kb, n),
        T::one(),
        Par::Seq,
    );
    Ok(c)
}

/// Rotate an operator into a new basis: `uᵀ · op · u`.
///
/// `op` is `d x d` and the columns of `u` (`d x m`) span the new basis, so the
/// result is `m x m`.
///
/// # Errors
///
/// Returns `DmrgError::NotSquareMatrix` if `op` is rectangular and
/// `DmrgError::ShapeMismatch` if `u` has the wrong number of rows.
pub fn change_of_basis<T: Scalar>(op: &DenseTensor<T>, u: &DenseTensor<T>) -> Result<DenseTensor<T>> {
    let d = op.square_dim()?;
    let (rows, m) = u.require_matrix()?;
    if rows != d {
        return Err(DmrgError::ShapeMismatch {
            expected: d,
            actual: rows,
        });
    }
    let op_u = matmul(op, u)?;
    let mut out = DenseTensor::<T>::zeros(&[m, m]);
    gemm(
        out.faer_view_mut(m, m),
        Accum::Replace,
        u.faer_view(d, m).transpose(),
        op_u.faer_view(d, m),
        T::one(),
        Par::Seq,
    );
    Ok(out)
}

/// `y = a * x` for a square matrix and column-major vectors.
///
/// # Panics
///
/// Panics if `x` or `y` do not match the matrix dimension.
pub fn matvec<T: Scalar>(a: MatRef<'_, T>, x: &[T], y: &mut [T]) {
    let n = a.ncols();
    gemm(
        MatMut::from_column_major_slice_mut(y, a.nrows(), 1),
        Accum::Replace,
        a,
        MatRef::from_column_major_slice(x, n, 1),
        T::one(),
        Par::Seq,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::transpose;
    use crate::tensor::Matrix;
    use approx::assert_relative_eq;

    #[test]
    fn test_matmul_values() {
        // [[1, 2], [3, 4]] * [[5, 6], [7, 8]] = [[19, 22], [43, 50]]
        let a = Matrix::from_vec(vec![1.0, 3.0, 2.0, 4.0], &[2, 2]).unwrap();
        let b = Matrix::from_vec(vec![5.0, 7.0, 6.0, 8.0], &[2, 2]).unwrap();
        let c = matmul(&a, &b).unwrap();
        assert_relative_eq!(*c.get(&[0, 0]).unwrap(), 19.0);
        assert_relative_eq!(*c.get(&[0, 1]).unwrap(), 22.0);
        assert_relative_eq!(*c.get(&[1, 0]).unwrap(), 43.0);
        assert_relative_eq!(*c.get(&[1, 1]).unwrap(), 50.0);
    }

    #[test]
    fn test_matmul_inner_mismatch() {
        let a: Matrix = DenseTensor::zeros(&[2, 3]);
        let b: Matrix = DenseTensor::zeros(&[2, 3]);
        assert!(matches!(
            matmul(&a, &b),
            Err(DmrgError::ShapeMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_change_of_basis_matches_explicit_product() {
        let op = Matrix::from_fn(&[3, 3], |idx| (idx[0] + idx[1]) as f64 + 0.5);
        let u = Matrix::from_fn(&[3, 2], |idx| (idx[0] as f64) - 0.25 * idx[1] as f64);
        let rotated = change_of_basis(&op, &u).unwrap();
        let explicit = matmul(&transpose(&u).unwrap(), &matmul(&op, &u).unwrap()).unwrap();
        assert_eq!(rotated.shape(), &[2, 2]);
        for (x, y) in rotated.data().iter().zip(explicit.data()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_change_of_basis_identity_columns() {
        let op = Matrix::from_fn(&[3, 3], |idx| (3 * idx[0] + idx[1]) as f64);
        let u = Matrix::from_fn(&[3, 2], |idx| if idx[0] == idx[1] { 1.0 } else { 0.0 });
        let rotated = change_of_basis(&op, &u).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(*rotated.get(&[i, j]).unwrap(), *op.get(&[i, j]).unwrap());
            }
        }
    }

    #[test]
    fn test_change_of_basis_row_mismatch() {
        let op = Matrix::identity(3);
        let u: Matrix = DenseTensor::zeros(&[2, 2]);
        assert!(change_of_basis(&op, &u).is_err());
    }

    #[test]
    fn test_matvec() {
        let a = Matrix::from_vec(vec![1.0, 3.0, 2.0, 4.0], &[2, 2]).unwrap();
        let mut y = vec![0.0; 2];
        matvec(a.faer_view(2, 2), &[1.0, -1.0], &mut y);
        assert_eq!(y, vec![-1.0, -1.0]);
    }
}
