//! Dense n-dimensional tensor in column-major order.
//!
//! Block operators are rank-2 tensors; the superblock Hamiltonian passes
//! through a rank-4 tensor before its index pairs are merged. Storage is
//! column-major so that a rank-2 tensor is directly a faer matrix.

use crate::error::{DmrgError, Result};
use crate::scalar::Scalar;

/// A dense tensor owning its elements.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTensor<ElT: Scalar> {
    data: Vec<ElT>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

/// Real matrices are the currency of the renormalization engine.
pub type Matrix = DenseTensor<f64>;

/// Column-major strides: `[1, d0, d0*d1, ...]`.
fn column_major_strides(shape: &[usize]) -> Vec<usize> {
    shape
        .iter()
        .scan(1usize, |acc, &dim| {
            let stride = *acc;
            *acc *= dim;
            Some(stride)
        })
        .collect()
}

/// Product of the dimensions. A rank-0 shape holds one element; any
/// zero-length dimension leaves the tensor empty.
fn element_count(shape: &[usize]) -> usize {
    shape.iter().product()
}

impl<ElT: Scalar> DenseTensor<ElT> {
    /// Create a zero-initialized tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use heisdmrg::DenseTensor;
    ///
    /// let t: DenseTensor<f64> = DenseTensor::zeros(&[2, 3, 4]);
    /// assert_eq!(t.shape(), &[2, 3, 4]);
    /// assert_eq!(t.len(), 24);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: vec![ElT::zero(); element_count(shape)],
            shape: shape.to_vec(),
            strides: column_major_strides(shape),
        }
    }

    /// Create a tensor from column-major data.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::ShapeMismatch` if the data length does not match
    /// the shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use heisdmrg::DenseTensor;
    ///
    /// let t = DenseTensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.get(&[1, 0]), Some(&2.0)); // column-major
    /// assert_eq!(t.get(&[0, 1]), Some(&3.0));
    /// ```
    pub fn from_vec(data: Vec<ElT>, shape: &[usize]) -> Result<Self> {
        let expected = element_count(shape);
        if data.len() != expected {
            return Err(DmrgError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: column_major_strides(shape),
        })
    }

    /// Create a tensor by evaluating `f` at every multi-index.
    pub fn from_fn(shape: &[usize], mut f: impl FnMut(&[usize]) -> ElT) -> Self {
        let mut tensor = Self::zeros(shape);
        if tensor.is_empty() {
            return tensor;
        }
        let mut index = vec![0usize; shape.len()];
        for linear in 0..tensor.data.len() {
            let mut rest = linear;
            for (slot, &dim) in index.iter_mut().zip(shape) {
                *slot = rest % dim;
                rest /= dim;
            }
            tensor.data[linear] = f(&index);
        }
        tensor
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut eye = Self::zeros(&[n, n]);
        for i in 0..n {
            eye.data[i * (n + 1)] = ElT::one();
        }
        eye
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of stored elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn data(&self) -> &[ElT] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [ElT] {
        &mut self.data
    }

    /// Consume the tensor, returning its column-major data.
    pub fn into_data(self) -> Vec<ElT> {
        self.data
    }

    fn linear_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.ndim() {
            return None;
        }
        let mut linear = 0;
        for ((&idx, &dim), &stride) in indices.iter().zip(&self.shape).zip(&self.strides) {
            if idx >= dim {
                return None;
            }
            linear += idx * stride;
        }
        Some(linear)
    }

    /// Get an element by cartesian indices.
    ///
    /// Returns `None` if the indices are out of bounds or of the wrong count.
    pub fn get(&self, indices: &[usize]) -> Option<&ElT> {
        self.linear_index(indices).map(|i| &self.data[i])
    }

    /// Set an element by cartesian indices.
    ///
    /// # Errors
    ///
    /// Returns an error if the indices are out of bounds or of the wrong count.
    pub fn set(&mut self, indices: &[usize], value: ElT) -> Result<()> {
        if indices.len() != self.ndim() {
            return Err(DmrgError::WrongNumberOfIndices {
                expected: self.ndim(),
                actual: indices.len(),
            });
        }
        if let Some((&index, &dim_size)) = indices
            .iter()
            .zip(&self.shape)
            .find(|(idx, dim)| **idx >= **dim)
        {
            return Err(DmrgError::IndexOutOfBounds { index, dim_size });
        }
        let linear = self.linear_index(indices).unwrap_or_default();
        self.data[linear] = value;
        Ok(())
    }

    /// Reinterpret the column-major data under a new shape.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::ShapeMismatch` if the element counts differ.
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Self> {
        Self::from_vec(self.data.clone(), new_shape)
    }

    /// Permute the dimensions of the tensor.
    ///
    /// `perm[i]` gives the source dimension of the i-th result dimension.
    pub fn permutedims(&self, perm: &[usize]) -> Result<Self> {
        crate::operations::permutedims(self, perm)
    }

    /// Number of rows of a matrix.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::RankMismatch` if the tensor is not rank 2.
    pub fn nrows(&self) -> Result<usize> {
        self.require_matrix().map(|(rows, _)| rows)
    }

    /// Number of columns of a matrix.
    pub fn ncols(&self) -> Result<usize> {
        self.require_matrix().map(|(_, cols)| cols)
    }

    /// Side length of a square matrix.
    ///
    /// # Errors
    ///
    /// Returns `RankMismatch` for non-matrices and `NotSquareMatrix` for
    /// rectangular ones.
    pub fn square_dim(&self) -> Result<usize> {
        let (rows, cols) = self.require_matrix()?;
        if rows != cols {
            return Err(DmrgError::NotSquareMatrix { rows, cols });
        }
        Ok(rows)
    }

    pub(crate) fn require_matrix(&self) -> Result<(usize, usize)> {
        match self.shape.as_slice() {
            &[rows, cols] => Ok((rows, cols)),
            _ => Err(DmrgError::RankMismatch {
                expected: 2,
                actual: self.ndim(),
            }),
        }
    }

    pub(crate) fn require_rank(&self, rank: usize) -> Result<()> {
        if self.ndim() != rank {
            return Err(DmrgError::RankMismatch {
                expected: rank,
                actual: self.ndim(),
            });
        }
        Ok(())
    }
}
