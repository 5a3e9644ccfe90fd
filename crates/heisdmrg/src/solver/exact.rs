use crate::decomposition::eigen_hermitian;
use crate::error::{DmrgError, Result};
use crate::solver::{GroundState, GroundStateSolver};
use crate::tensor::Matrix;

/// Full dense diagonalization.
///
/// Exact, but cubic in the superblock dimension. Used as the reference in
/// tests and for the tiny matrices where Krylov methods make no sense.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSolver;

impl GroundStateSolver for ExactSolver {
    fn ground_state(&self, hamiltonian: &Matrix) -> Result<GroundState> {
        let n = hamiltonian.square_dim()?;
        let (values, vectors) = eigen_hermitian(hamiltonian)?;
        let energy = *values.first().ok_or_else(|| DmrgError::EigenError {
            message: "empty matrix has no ground state".to_string(),
        })?;
        let vector = vectors.data()[..n].to_vec();
        Ok(GroundState {
            energy,
            vector,
            iterations: 1,
        })
    }
}
