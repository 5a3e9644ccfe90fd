//! Dimension permutation and matrix transpose.

use crate::error::{DmrgError, Result};
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;

/// Permute the dimensions of a tensor, returning a new tensor.
///
/// `perm[i]` gives the source dimension for the i-th dimension of the result.
///
/// # Errors
///
/// Returns `DmrgError::InvalidPermutation` if `perm` is not a permutation of
/// `0..ndim`.
///
/// # Examples
///
/// ```
/// use heisdmrg::DenseTensor;
/// use heisdmrg::operations::permutedims;
///
/// let t = DenseTensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let t2 = permutedims(&t, &[1, 0]).unwrap();
/// assert_eq!(t2.shape(), &[3, 2]);
/// assert_eq!(t.get(&[1, 2]), t2.get(&[2, 1]));
/// ```
pub fn permutedims<T: Scalar>(tensor: &DenseTensor<T>, perm: &[usize]) -> Result<DenseTensor<T>> {
    validate_permutation(perm, tensor.ndim())?;

    let new_shape: Vec<usize> = perm.iter().map(|&p| tensor.shape()[p]).collect();
    let src_strides = tensor.strides();
    let src = tensor.data();

    // dest[idx] = src[idx'] with idx'[perm[i]] = idx[i]
    Ok(DenseTensor::from_fn(&new_shape, |idx| {
        let offset: usize = idx
            .iter()
            .zip(perm)
            .map(|(&i, &p)| i * src_strides[p])
            .sum();
        src[offset]
    }))
}

/// Transpose a matrix.
///
/// # Errors
///
/// Returns `DmrgError::RankMismatch` if `matrix` is not rank 2.
pub fn transpose<T: Scalar>(matrix: &DenseTensor<T>) -> Result<DenseTensor<T>> {
    matrix.require_matrix()?;
    permutedims(matrix, &[1, 0])
}

fn validate_permutation(perm: &[usize], ndim: usize) -> Result<()> {
    let invalid = || DmrgError::InvalidPermutation {
        perm: perm.to_vec(),
        ndim,
    };
    if perm.len() != ndim {
        return Err(invalid());
    }
    let mut seen = vec![false; ndim];
    for &p in perm {
        if p >= ndim || seen[p] {
            return Err(invalid());
        }
        seen[p] = true;
    }
    Ok(())
}
