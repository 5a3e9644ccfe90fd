//! Reduced density matrices and the truncation they induce.

use log::debug;

use crate::decomposition::eigen_hermitian;
use crate::error::{DmrgError, Result};
use crate::operations::{matmul, transpose};
use crate::tensor::Matrix;

/// Trace out the environment from a `[system, environment]` wavefunction:
/// `ρ = Ψ Ψᵀ`.
///
/// # Errors
///
/// Returns `DmrgError::RankMismatch` if `psi` is not a matrix.
pub fn reduced_density_matrix(psi: &Matrix) -> Result<Matrix> {
    matmul(psi, &transpose(psi)?)
}

/// Projector onto the leading eigenvectors of a reduced density matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncationMatrix {
    basis: Matrix,
    weights: Vec<f64>,
    discarded_weight: f64,
}

impl TruncationMatrix {
    /// `dim x kept` matrix whose columns are the retained eigenvectors.
    pub fn basis(&self) -> &Matrix {
        &self.basis
    }

    /// Retained eigenvalues, largest first.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Total weight of the dropped eigenvalues.
    pub fn discarded_weight(&self) -> f64 {
        self.discarded_weight
    }

    pub fn kept(&self) -> usize {
        self.weights.len()
    }

    /// Dimension of the basis being truncated.
    pub fn full_dim(&self) -> usize {
        self.basis.shape()[0]
    }
}

/// Keep the `keep` eigenvectors of `rho` with the largest eigenvalues.
///
/// Eigenpairs are ordered by descending eigenvalue; equal eigenvalues keep
/// the reverse of the solver's ascending order, so the choice among
/// degenerate states is deterministic.
///
/// # Errors
///
/// Returns `DmrgError::TruncationExceedsBasis` if `keep` is larger than the
/// dimension of `rho`, `DmrgError::EmptyTruncation` if `keep` is zero, and
/// eigensolver errors otherwise.
///
/// # Examples
///
/// ```
/// use heisdmrg::DenseTensor;
/// use heisdmrg::density::truncate;
///
/// let rho = DenseTensor::from_vec(vec![0.7, 0.0, 0.0, 0.3], &[2, 2]).unwrap();
/// let t = truncate(&rho, 1).unwrap();
/// assert_eq!(t.basis().shape(), &[2, 1]);
/// assert!((t.discarded_weight() - 0.3).abs() < 1e-12);
/// ```
pub fn truncate(rho: &Matrix, keep: usize) -> Result<TruncationMatrix> {
    let dim = rho.square_dim()?;
    if keep == 0 {
        return Err(DmrgError::EmptyTruncation { available: dim });
    }
    if keep > dim {
        return Err(DmrgError::TruncationExceedsBasis {
            requested: keep,
            available: dim,
        });
    }

    let (values, vectors) = eigen_hermitian(rho)?;
    let mut order: Vec<usize> = (0..dim).rev().collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    let (kept, dropped) = order.split_at(keep);

    let basis = Matrix::from_fn(&[dim, keep], |idx| {
        *vectors.get(&[idx[0], kept[idx[1]]]).unwrap_or(&0.0)
    });
    let weights: Vec<f64> = kept.iter().map(|&i| values[i]).collect();
    let discarded_weight = dropped.iter().map(|&i| values[i]).sum::<f64>().max(0.0);

    debug!("truncated {} -> {} states, discarded weight {:e}", dim, keep, discarded_weight);
    Ok(TruncationMatrix {
        basis,
        weights,
        discarded_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::change_of_basis;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_state(rows: usize, cols: usize, seed: u64) -> Matrix {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut psi = Matrix::from_fn(&[rows, cols], |_| rng.random::<f64>() - 0.5);
        let norm = psi.data().iter().map(|x| x * x).sum::<f64>().sqrt();
        psi.data_mut().iter_mut().for_each(|x| *x /= norm);
        psi
    }

    #[test]
    fn test_density_matrix_unit_trace() {
        let rho = reduced_density_matrix(&random_state(4, 3, 7)).unwrap();
        assert_eq!(rho.shape(), &[4, 4]);
        let trace: f64 = (0..4).map(|i| rho.get(&[i, i]).unwrap()).sum();
        assert_relative_eq!(trace, 1.0, epsilon = 1e-12);
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(rho.get(&[i, j]).unwrap(), rho.get(&[j, i]).unwrap());
            }
        }
    }

    #[test]
    fn test_truncate_weights_descending() {
        let rho = reduced_density_matrix(&random_state(6, 6, 11)).unwrap();
        let t = truncate(&rho, 4).unwrap();
        assert_eq!(t.kept(), 4);
        assert_eq!(t.full_dim(), 6);
        for pair in t.weights().windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        let kept: f64 = t.weights().iter().sum();
        assert_relative_eq!(kept + t.discarded_weight(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_truncation_basis_is_isometry() {
        let rho = reduced_density_matrix(&random_state(5, 5, 3)).unwrap();
        let t = truncate(&rho, 3).unwrap();
        let gram = change_of_basis(&Matrix::identity(5), t.basis()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(*gram.get(&[i, j]).unwrap(), expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_full_rank_truncation_is_lossless() {
        let rho = reduced_density_matrix(&random_state(4, 4, 5)).unwrap();
        let t = truncate(&rho, 4).unwrap();
        assert_relative_eq!(t.discarded_weight(), 0.0);
        let rotated = change_of_basis(&rho, t.basis()).unwrap();
        for (i, w) in t.weights().iter().enumerate() {
            assert_relative_eq!(*rotated.get(&[i, i]).unwrap(), *w, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_truncate_rejects_oversized_keep() {
        let rho = Matrix::identity(2);
        assert!(matches!(
            truncate(&rho, 3),
            Err(DmrgError::TruncationExceedsBasis {
                requested: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn test_truncate_rejects_zero_keep() {
        assert!(matches!(
            truncate(&Matrix::identity(2), 0),
            Err(DmrgError::EmptyTruncation { available: 2 })
        ));
    }

    #[test]
    fn test_degenerate_selection_is_deterministic() {
        let rho = Matrix::from_fn(&[4, 4], |idx| if idx[0] == idx[1] { 0.25 } else { 0.0 });
        let a = truncate(&rho, 2).unwrap();
        let b = truncate(&rho, 2).unwrap();
        assert_eq!(a, b);
    }
}
