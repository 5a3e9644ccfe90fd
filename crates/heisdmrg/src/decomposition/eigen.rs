//! Symmetric eigendecomposition backed by faer.
//!
//! Every dense diagonalization in the engine goes through here: reduced
//! density matrices, exact superblock solves, and the small tridiagonal
//! matrices produced by Lanczos.

use faer::linalg::solvers::EvdError;

use crate::backend::FaerView;
use crate::error::{DmrgError, Result};
use crate::tensor::Matrix;

/// Eigendecomposition of a real symmetric matrix.
///
/// Returns `(eigenvalues, eigenvectors)` with eigenvalues in nondecreasing
/// order and the matching orthonormal eigenvectors as the columns of an
/// `n x n` matrix. Only the lower triangle of `matrix` is read.
///
/// # Errors
///
/// Returns `DmrgError::RankMismatch` or `DmrgError::NotSquareMatrix` for
/// malformed input and `DmrgError::EigenError` if faer fails to converge.
///
/// # Examples
///
/// ```
/// use heisdmrg::DenseTensor;
/// use heisdmrg::decomposition::eigen_hermitian;
///
/// // [[2, 1], [1, 2]] has eigenvalues 1 and 3
/// let m = DenseTensor::from_vec(vec![2.0, 1.0, 1.0, 2.0], &[2, 2]).unwrap();
/// let (values, vectors) = eigen_hermitian(&m).unwrap();
/// assert!((values[0] - 1.0).abs() < 1e-12);
/// assert!((values[1] - 3.0).abs() < 1e-12);
/// assert_eq!(vectors.shape(), &[2, 2]);
/// ```
pub fn eigen_hermitian(matrix: &Matrix) -> Result<(Vec<f64>, Matrix)> {
    let n = matrix.square_dim()?;
    let mat = matrix.faer_view(n, n);

    let evd = mat
        .self_adjoint_eigen(faer::Side::Lower)
        .map_err(|e: EvdError| DmrgError::EigenError {
            message: format!("symmetric eigendecomposition failed: {:?}", e),
        })?;

    let eigenvalues_diag = evd.S();
    let eigenvalues: Vec<f64> = (0..n).map(|i| eigenvalues_diag[i]).collect();

    let u_mat = evd.U();
    let eigenvectors = Matrix::from_fn(&[n, n], |idx| u_mat[(idx[0], idx[1])]);

    Ok((eigenvalues, eigenvectors))
}
