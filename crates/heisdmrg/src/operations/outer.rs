//! Outer product of two tensors.

use crate::error::Result;
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;

/// Tensor product with the indices of `a` followed by those of `b`:
/// `C[a_idx..., b_idx...] = a[a_idx...] * b[b_idx...]`.
///
/// # Errors
///
/// Returns `DmrgError::ShapeMismatch` if the product data does not fill the
/// combined shape.
///
/// # Example
///
/// ```
/// use heisdmrg::DenseTensor;
/// use heisdmrg::operations::outer;
///
/// let a = DenseTensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
/// let b = DenseTensor::from_vec(vec![3.0, 4.0, 5.0], &[3]).unwrap();
/// let c = outer(&a, &b).unwrap();
///
/// assert_eq!(c.shape(), &[2, 3]);
/// assert_eq!(c.get(&[1, 0]), Some(&6.0));
/// assert_eq!(c.get(&[1, 2]), Some(&10.0));
/// ```
pub fn outer<ElT: Scalar>(
    a: &DenseTensor<ElT>,
    b: &DenseTensor<ElT>,
) -> Result<DenseTensor<ElT>> {
    let mut shape = a.shape().to_vec();
    shape.extend_from_slice(b.shape());

    // Column-major: the `a` index runs fastest, so each `b` element scales a
    // contiguous copy of `a`.
    let mut data = Vec::with_capacity(a.len() * b.len());
    for &bv in b.data() {
        data.extend(a.data().iter().map(|&av| av * bv));
    }
    DenseTensor::from_vec(data, &shape)
}
