//! Renormalized blocks of the chain.
//!
//! A block of `n` sites carries its Hamiltonian and the spin operators of the
//! site on the open edge, the one the next site or the opposite block couples
//! to. All four matrices share the block's basis.

use crate::density::TruncationMatrix;
use crate::error::{DmrgError, Result};
use crate::operations::{add_scaled, change_of_basis, kron};
use crate::spin::{self, BondOperators, SITE_DIM};
use crate::tensor::Matrix;

/// Effective Hamiltonian and edge operators of a contiguous sub-chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    sites: usize,
    hamiltonian: Matrix,
    sz: Matrix,
    splus: Matrix,
    sminus: Matrix,
}

impl Block {
    /// Assemble a block from its parts.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::OperatorDimension` unless all four operators are
    /// square matrices of the same dimension.
    pub fn from_parts(
        sites: usize,
        hamiltonian: Matrix,
        sz: Matrix,
        splus: Matrix,
        sminus: Matrix,
    ) -> Result<Self> {
        let block = Self {
            sites,
            hamiltonian,
            sz,
            splus,
            sminus,
        };
        block.check_invariant()?;
        Ok(block)
    }

    /// A lone spin: zero Hamiltonian, Pauli spin operators on its only site.
    pub fn single_site() -> Self {
        Self {
            sites: 1,
            hamiltonian: Matrix::zeros(&[SITE_DIM, SITE_DIM]),
            sz: spin::sz(),
            splus: spin::splus(),
            sminus: spin::sminus(),
        }
    }

    /// The two-site block the infinite-system phase starts from.
    ///
    /// # Errors
    ///
    /// Propagates tensor errors from [`Block::enlarge`].
    pub fn initial_pair() -> Result<Self> {
        Self::single_site().enlarge()
    }

    #[inline]
    pub fn sites(&self) -> usize {
        self.sites
    }

    /// Number of basis states the block currently retains.
    #[inline]
    pub fn dim(&self) -> usize {
        self.hamiltonian.shape()[0]
    }

    pub fn hamiltonian(&self) -> &Matrix {
        &self.hamiltonian
    }

    pub fn sz(&self) -> &Matrix {
        &self.sz
    }

    pub fn splus(&self) -> &Matrix {
        &self.splus
    }

    pub fn sminus(&self) -> &Matrix {
        &self.sminus
    }

    /// Edge operators in the form [`spin::bond`] takes.
    pub fn edge(&self) -> BondOperators<'_> {
        BondOperators {
            sz: &self.sz,
            splus: &self.splus,
            sminus: &self.sminus,
        }
    }

    /// Add one site on the open edge.
    ///
    /// The new basis is `block ⊗ site` with the block index fastest:
    /// `H' = H ⊗ 1 + bond(edge, site)`, and the new edge operators act on the
    /// added site, `1 ⊗ S`.
    ///
    /// # Errors
    ///
    /// Propagates shape errors from the Kronecker products.
    ///
    /// # Examples
    ///
    /// ```
    /// use heisdmrg::Block;
    ///
    /// let pair = Block::single_site().enlarge().unwrap();
    /// assert_eq!(pair.sites(), 2);
    /// assert_eq!(pair.dim(), 4);
    /// ```
    pub fn enlarge(&self) -> Result<Self> {
        let site = Self::single_site();
        let block_eye = Matrix::identity(self.dim());
        let site_eye = Matrix::identity(SITE_DIM);

        let mut hamiltonian = kron(&self.hamiltonian, &site_eye)?;
        add_scaled(&mut hamiltonian, 1.0, &spin::bond(self.edge(), site.edge())?)?;

        Self::from_parts(
            self.sites + 1,
            hamiltonian,
            kron(&block_eye, &site.sz)?,
            kron(&block_eye, &site.splus)?,
            kron(&block_eye, &site.sminus)?,
        )
    }

    /// Project every operator onto the retained density-matrix eigenvectors.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::ShapeMismatch` if the truncation matrix was built
    /// for a basis of another dimension.
    pub fn rotate(&self, truncation: &TruncationMatrix) -> Result<Self> {
        let u = truncation.basis();
        Self::from_parts(
            self.sites,
            change_of_basis(&self.hamiltonian, u)?,
            change_of_basis(&self.sz, u)?,
            change_of_basis(&self.splus, u)?,
            change_of_basis(&self.sminus, u)?,
        )
    }

    fn check_invariant(&self) -> Result<()> {
        let expected = self.hamiltonian.square_dim()?;
        for (operator, matrix) in [
            ("sz", &self.sz),
            ("splus", &self.splus),
            ("sminus", &self.sminus),
        ] {
            let actual = matrix.square_dim()?;
            if actual != expected {
                return Err(DmrgError::OperatorDimension {
                    operator,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}
