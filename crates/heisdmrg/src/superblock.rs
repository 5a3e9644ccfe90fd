//! Superblock Hamiltonian assembly.
//!
//! The system block occupies the first (fast) index and the environment the
//! second, so a superblock vector reshapes directly into a
//! `[system, environment]` wavefunction matrix.

use crate::block::Block;
use crate::error::{DmrgError, Result};
use crate::operations::{add_scaled, merge_pairs, pair_product};
use crate::spin;
use crate::tensor::Matrix;

/// `H = H_s ⊗ 1 + 1 ⊗ H_e + bond(edge_s, edge_e)` on `system ⊗ environment`.
///
/// Each term is formed as a rank-4 paired tensor
/// `T[i, j, k, l] = A[i, k] B[j, l]` and then merged into a
/// `(d_s d_e) x (d_s d_e)` matrix.
///
/// # Errors
///
/// Returns `DmrgError::ShapeMismatch` if the assembled matrix does not have
/// the expected dimension, and propagates tensor errors otherwise.
pub fn superblock_hamiltonian(system: &Block, environment: &Block) -> Result<Matrix> {
    let ds = system.dim();
    let de = environment.dim();
    let system_eye = Matrix::identity(ds);
    let environment_eye = Matrix::identity(de);

    let paired = pair_product(system.hamiltonian(), &environment_eye)?;
    debug_assert_eq!(paired.shape(), &[ds, de, ds, de]);
    let mut h = merge_pairs(&paired)?;
    add_scaled(
        &mut h,
        1.0,
        &merge_pairs(&pair_product(&system_eye, environment.hamiltonian())?)?,
    )?;
    add_scaled(&mut h, 1.0, &spin::bond(system.edge(), environment.edge())?)?;

    let dim = ds * de;
    if h.shape() != &[dim, dim] {
        return Err(DmrgError::ShapeMismatch {
            expected: dim * dim,
            actual: h.len(),
        });
    }
    Ok(h)
}

/// Reshape a superblock vector into a `[system_dim, environment_dim]` matrix.
///
/// # Errors
///
/// Returns `DmrgError::ShapeMismatch` if the vector length is not
/// `system_dim * environment_dim`.
pub fn wavefunction_matrix(
    vector: &[f64],
    system_dim: usize,
    environment_dim: usize,
) -> Result<Matrix> {
    Matrix::from_vec(vector.to_vec(), &[system_dim, environment_dim])
}
