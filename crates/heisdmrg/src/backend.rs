//! Borrowed faer views of dense tensors.
//!
//! Tensors and faer matrices share the column-major layout, so a view is a
//! reinterpretation of the same buffer. Kernels either view a matrix with
//! its own shape ([`FaerView::matrix_view`]) or fuse tensor indices into an
//! explicit `rows x cols` shape ([`FaerView::faer_view`]).

use faer::{MatMut, MatRef};

use crate::error::Result;
use crate::scalar::Scalar;
use crate::tensor::DenseTensor;

/// Zero-copy access to tensor data as a faer matrix.
pub trait FaerView<T: Scalar> {
    /// View the data as a `rows x cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics unless `rows * cols` equals the number of stored elements.
    fn faer_view(&self, rows: usize, cols: usize) -> MatRef<'_, T>;

    /// Mutable counterpart of [`FaerView::faer_view`].
    ///
    /// # Panics
    ///
    /// Panics unless `rows * cols` equals the number of stored elements.
    fn faer_view_mut(&mut self, rows: usize, cols: usize) -> MatMut<'_, T>;

    /// View a rank-2 tensor with its own shape.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::RankMismatch` for tensors of other rank.
    ///
    /// # Example
    ///
    /// ```
    /// use heisdmrg::Matrix;
    /// use heisdmrg::backend::FaerView;
    ///
    /// let m = Matrix::identity(3);
    /// let view = m.matrix_view().unwrap();
    /// assert_eq!((view.nrows(), view.ncols()), (3, 3));
    /// assert_eq!(view[(2, 2)], 1.0);
    /// ```
    fn matrix_view(&self) -> Result<MatRef<'_, T>>;
}

fn check_size(rows: usize, cols: usize, len: usize) {
    assert!(
        rows * cols == len,
        "cannot view {len} elements as a {rows}x{cols} matrix"
    );
}

impl<T: Scalar> FaerView<T> for DenseTensor<T> {
    fn faer_view(&self, rows: usize, cols: usize) -> MatRef<'_, T> {
        check_size(rows, cols, self.len());
        MatRef::from_column_major_slice(self.data(), rows, cols)
    }

    fn faer_view_mut(&mut self, rows: usize, cols: usize) -> MatMut<'_, T> {
        check_size(rows, cols, self.len());
        MatMut::from_column_major_slice_mut(self.data_mut(), rows, cols)
    }

    fn matrix_view(&self) -> Result<MatRef<'_, T>> {
        let (rows, cols) = self.require_matrix()?;
        Ok(self.faer_view(rows, cols))
    }
}
