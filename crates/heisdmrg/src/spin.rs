//! Spin-1/2 operators and the Heisenberg bond.
//!
//! Single-site matrices are in the `{|↑⟩, |↓⟩}` basis. The bond between two
//! sites `a` and `b` is `Sz_a Sz_b + ½ (S+_a S-_b + S-_a S+_b)`, which is
//! `S_a · S_b` for the isotropic antiferromagnet with unit coupling.

use crate::block::Block;
use crate::error::Result;
use crate::operations::{add_scaled, kron};
use crate::tensor::Matrix;

/// Local dimension of a spin-1/2 site.
pub const SITE_DIM: usize = 2;

/// `Sz = diag(½, -½)`.
pub fn sz() -> Matrix {
    Matrix::from_fn(&[SITE_DIM, SITE_DIM], |idx| match (idx[0], idx[1]) {
        (0, 0) => 0.5,
        (1, 1) => -0.5,
        _ => 0.0,
    })
}

/// Raising operator, `S+ |↓⟩ = |↑⟩`.
pub fn splus() -> Matrix {
    Matrix::from_fn(&[SITE_DIM, SITE_DIM], |idx| {
        if idx[0] == 0 && idx[1] == 1 { 1.0 } else { 0.0 }
    })
}

/// Lowering operator, the transpose of [`splus`].
pub fn sminus() -> Matrix {
    Matrix::from_fn(&[SITE_DIM, SITE_DIM], |idx| {
        if idx[0] == 1 && idx[1] == 0 { 1.0 } else { 0.0 }
    })
}

/// The three operators acting on one end of a bond.
#[derive(Debug, Clone, Copy)]
pub struct BondOperators<'a> {
    pub sz: &'a Matrix,
    pub splus: &'a Matrix,
    pub sminus: &'a Matrix,
}

/// Heisenberg coupling between two subsystems, on the space `a ⊗ b` (index
/// of `a` fastest).
///
/// # Errors
///
/// Returns `DmrgError::RankMismatch` if an operator is not a matrix and
/// `DmrgError::ShapeMismatch` if the operators on one side differ in shape.
pub fn bond(a: BondOperators<'_>, b: BondOperators<'_>) -> Result<Matrix> {
    let mut h = kron(a.sz, b.sz)?;
    add_scaled(&mut h, 0.5, &kron(a.splus, b.sminus)?)?;
    add_scaled(&mut h, 0.5, &kron(a.sminus, b.splus)?)?;
    Ok(h)
}

/// Exact Hamiltonian of an open Heisenberg chain of `num_sites` sites,
/// `2^n x 2^n`.
///
/// Built by enlarging a single site without truncation, so it uses the same
/// basis ordering as the renormalization engine.
///
/// # Examples
///
/// ```
/// use heisdmrg::spin::chain_hamiltonian;
///
/// let h = chain_hamiltonian(3).unwrap();
/// assert_eq!(h.shape(), &[8, 8]);
/// ```
pub fn chain_hamiltonian(num_sites: usize) -> Result<Matrix> {
    let mut block = Block::single_site();
    for _ in 1..num_sites {
        block = block.enlarge()?;
    }
    Ok(block.hamiltonian().clone())
}
