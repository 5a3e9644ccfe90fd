//! Kronecker products built from paired tensor indices.
//!
//! Operators on a composite space (block ⊗ site, system ⊗ environment) are
//! assembled in two steps: [`pair_product`] forms the rank-4 tensor
//! `T[i, j, k, l] = a[i, k] * b[j, l]`, and [`merge_pairs`] fuses `(i, j)`
//! into the row index `i + dim_i * j` and `(k, l)` into the column index
//! `k + dim_k * l`. The index of the first factor always runs fastest.

use crate::error::{DmrgError, Result};
use crate::operations::outer;
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;

/// Rank-4 paired product `T[i, j, k, l] = a[i, k] * b[j, l]`.
///
/// # Errors
///
/// Returns `DmrgError::RankMismatch` if either argument is not a matrix.
pub fn pair_product<T: Scalar>(a: &DenseTensor<T>, b: &DenseTensor<T>) -> Result<DenseTensor<T>> {
    a.require_matrix()?;
    b.require_matrix()?;
    // outer gives [i, k, j, l]
    outer(a, b)?.permutedims(&[0, 2, 1, 3])
}

/// Fuse a rank-4 tensor `[d0, d1, d2, d3]` into a `[d0*d1, d2*d3]` matrix.
///
/// In column-major order the fused layout coincides with the rank-4 layout,
/// so this is a pure reshape.
///
/// # Errors
///
/// Returns `DmrgError::RankMismatch` if the tensor is not rank 4.
pub fn merge_pairs<T: Scalar>(tensor: &DenseTensor<T>) -> Result<DenseTensor<T>> {
    tensor.require_rank(4)?;
    let s = tensor.shape();
    tensor.reshape(&[s[0] * s[1], s[2] * s[3]])
}

/// Kronecker product of two matrices with the index of `a` running fastest.
///
/// `kron(a, b)[i + ra*j, k + ca*l] = a[i, k] * b[j, l]`.
///
/// # Examples
///
/// ```
/// use heisdmrg::DenseTensor;
/// use heisdmrg::operations::kron;
///
/// let a = DenseTensor::from_vec(vec![1.0, 0.0, 0.0, -1.0], &[2, 2]).unwrap();
/// let eye = DenseTensor::identity(3);
/// let k = kron(&a, &eye).unwrap();
/// assert_eq!(k.shape(), &[6, 6]);
/// assert_eq!(k.get(&[1, 1]), Some(&-1.0));
/// assert_eq!(k.get(&[2, 2]), Some(&1.0));
/// ```
pub fn kron<T: Scalar>(a: &DenseTensor<T>, b: &DenseTensor<T>) -> Result<DenseTensor<T>> {
    merge_pairs(&pair_product(a, b)?)
}

/// Accumulate `alpha * other` into `target`.
///
/// # Errors
///
/// Returns `DmrgError::ShapeMismatch` if the two tensors differ in size or
/// shape.
pub fn add_scaled<T: Scalar>(
    target: &mut DenseTensor<T>,
    alpha: T,
    other: &DenseTensor<T>,
) -> Result<()> {
    if target.shape() != other.shape() {
        return Err(DmrgError::ShapeMismatch {
            expected: target.len(),
            actual: other.len(),
        });
    }
    for (t, &o) in target.data_mut().iter_mut().zip(other.data()) {
        *t = *t + alpha * o;
    }
    Ok(())
}
