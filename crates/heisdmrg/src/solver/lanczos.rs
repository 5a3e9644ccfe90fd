//! Lanczos iteration with full reorthogonalization.
//!
//! The Krylov basis is kept in memory and every new vector is orthogonalized
//! against all previous ones (twice), which keeps the Ritz values free of
//! ghost copies at the superblock sizes DMRG produces.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::backend::FaerView;
use crate::decomposition::eigen_hermitian;
use crate::error::Result;
use crate::operations::matvec;
use crate::solver::{ExactSolver, GroundState, GroundStateSolver, dot, normalize};
use crate::tensor::Matrix;

/// Below this norm the Krylov space is invariant and the iteration stops.
const BREAKDOWN: f64 = 1e-12;

/// Tuning knobs for [`LanczosSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanczosOptions {
    /// Upper bound on the Krylov dimension.
    pub max_iterations: usize,
    /// Convergence threshold on the Ritz residual `β_j |y_j|`.
    pub tolerance: f64,
    /// Seed for the random start vector.
    pub seed: u64,
}

impl Default for LanczosOptions {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            tolerance: 1e-10,
            seed: 0x5eed,
        }
    }
}

/// Krylov ground-state solver.
///
/// # Examples
///
/// ```
/// use heisdmrg::solver::{ExactSolver, GroundStateSolver, LanczosSolver};
/// use heisdmrg::spin::chain_hamiltonian;
///
/// let h = chain_hamiltonian(6).unwrap();
/// let gs = LanczosSolver::default().ground_state(&h).unwrap();
/// let exact = ExactSolver.ground_state(&h).unwrap();
/// assert!((gs.energy - exact.energy).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosSolver {
    options: LanczosOptions,
}

impl LanczosSolver {
    pub fn new(options: LanczosOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LanczosOptions {
        &self.options
    }
}

impl GroundStateSolver for LanczosSolver {
    fn ground_state(&self, hamiltonian: &Matrix) -> Result<GroundState> {
        let n = hamiltonian.square_dim()?;
        if n <= 2 {
            return ExactSolver.ground_state(hamiltonian);
        }
        let mat = hamiltonian.faer_view(n, n);
        let max_steps = self.options.max_iterations.clamp(1, n);

        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let mut v: Vec<f64> = (0..n).map(|_| rng.sample(StandardNormal)).collect();
        normalize(&mut v);

        let mut basis: Vec<Vec<f64>> = vec![v];
        let mut alpha: Vec<f64> = Vec::with_capacity(max_steps);
        let mut beta: Vec<f64> = Vec::with_capacity(max_steps);
        let mut w = vec![0.0; n];

        loop {
            let j = basis.len() - 1;
            matvec(mat, &basis[j], &mut w);
            alpha.push(dot(&w, &basis[j]));

            for _ in 0..2 {
                for q in &basis {
                    let proj = dot(&w, q);
                    w.iter_mut().zip(q).for_each(|(x, y)| *x -= proj * y);
                }
            }
            let b_next = dot(&w, &w).sqrt();

            let (theta, y) = tridiagonal_ground_state(&alpha, &beta)?;
            let residual = b_next * y.last().copied().unwrap_or_default().abs();
            let converged = residual < self.options.tolerance || b_next < BREAKDOWN;

            if converged || basis.len() == max_steps {
                if !converged && max_steps < n {
                    warn!(
                        "Lanczos stopped after {} iterations with residual {:e}",
                        basis.len(),
                        residual
                    );
                }
                debug!(
                    "Lanczos: dim {}, {} iterations, E0 = {}",
                    n,
                    basis.len(),
                    theta
                );
                let mut vector = vec![0.0; n];
                for (coeff, q) in y.iter().zip(&basis) {
                    vector.iter_mut().zip(q).for_each(|(x, v)| *x += coeff * v);
                }
                normalize(&mut vector);
                return Ok(GroundState {
                    energy: theta,
                    vector,
                    iterations: basis.len(),
                });
            }

            beta.push(b_next);
            basis.push(w.iter().map(|x| x / b_next).collect());
        }
    }
}

/// Lowest eigenpair of the tridiagonal matrix with diagonal `alpha` and
/// off-diagonal `beta` (`beta.len() == alpha.len() - 1`).
fn tridiagonal_ground_state(alpha: &[f64], beta: &[f64]) -> Result<(f64, Vec<f64>)> {
    let m = alpha.len();
    let t = Matrix::from_fn(&[m, m], |idx| {
        let (i, j) = (idx[0], idx[1]);
        if i == j {
            alpha[i]
        } else if i.abs_diff(j) == 1 {
            beta[i.min(j)]
        } else {
            0.0
        }
    });
    let (values, vectors) = eigen_hermitian(&t)?;
    Ok((values[0], vectors.data()[..m].to_vec()))
}
