//! Ground-state eigensolvers for superblock Hamiltonians.

mod exact;
mod lanczos;

pub use exact::ExactSolver;
pub use lanczos::{LanczosOptions, LanczosSolver};

use crate::error::Result;
use crate::tensor::Matrix;

/// Lowest eigenpair of a symmetric matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundState {
    /// Lowest eigenvalue.
    pub energy: f64,
    /// Normalized eigenvector, column-major over the superblock basis.
    pub vector: Vec<f64>,
    /// Iterations spent (1 for dense solvers).
    pub iterations: usize,
}

/// Finds the lowest eigenpair of a real symmetric matrix.
pub trait GroundStateSolver {
    /// # Errors
    ///
    /// Returns an error if `hamiltonian` is not square or the underlying
    /// diagonalization fails.
    fn ground_state(&self, hamiltonian: &Matrix) -> Result<GroundState>;
}

impl<T: GroundStateSolver + ?Sized> GroundStateSolver for &T {
    fn ground_state(&self, hamiltonian: &Matrix) -> Result<GroundState> {
        (**self).ground_state(hamiltonian)
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

pub(crate) fn normalize(v: &mut [f64]) -> f64 {
    let norm = dot(v, v).sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    norm
}
