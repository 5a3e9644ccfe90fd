//! The renormalization engine.
//!
//! [`Dmrg`] grows a pair of blocks to half the chain (infinite-system phase)
//! and then sweeps a system block against stored environment blocks
//! (finite-system phase). Blocks move between steps and phases only through
//! the [`BlockStore`].

mod finite;
mod growth;
mod infinite;

pub use growth::{GrowthSchedule, GrowthStep, TruncationPhase};

use log::debug;

use crate::block::Block;
use crate::config::DmrgConfig;
use crate::density::{TruncationMatrix, reduced_density_matrix, truncate};
use crate::error::Result;
use crate::measurement::Measurement;
use crate::solver::{GroundState, GroundStateSolver};
use crate::store::BlockStore;
use crate::superblock::{superblock_hamiltonian, wavefunction_matrix};

/// DMRG driver for the open spin-1/2 Heisenberg chain.
///
/// # Examples
///
/// ```
/// use heisdmrg::{Dmrg, DmrgConfig};
/// use heisdmrg::solver::LanczosSolver;
/// use heisdmrg::store::MemoryStore;
///
/// let config = DmrgConfig::new(2, 4, 0);
/// let mut dmrg = Dmrg::new(config, MemoryStore::new(), LanczosSolver::default()).unwrap();
/// let measurements = dmrg.run().unwrap();
/// assert_eq!(measurements.len(), 1);
/// assert_eq!(measurements[0].to_string().split(' ').take(2).collect::<Vec<_>>(), ["2", "2"]);
/// ```
#[derive(Debug)]
pub struct Dmrg<S, G> {
    config: DmrgConfig,
    store: S,
    solver: G,
}

/// Result of diagonalizing one superblock and truncating its system half.
struct Step {
    ground: GroundState,
    truncation: TruncationMatrix,
}

impl<S: BlockStore, G: GroundStateSolver> Dmrg<S, G> {
    /// # Errors
    ///
    /// Returns `DmrgError::InvalidConfig` if `config` fails validation.
    pub fn new(config: DmrgConfig, store: S, solver: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            solver,
        })
    }

    pub fn config(&self) -> &DmrgConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn solver(&self) -> &G {
        &self.solver
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run both phases, handing each measurement to `on_step` as soon as it
    /// is taken.
    ///
    /// # Errors
    ///
    /// Any tensor, solver or store failure aborts the run.
    pub fn run_with<F>(&mut self, mut on_step: F) -> Result<Vec<Measurement>>
    where
        F: FnMut(&Measurement),
    {
        let mut measurements = self.infinite_system(&mut on_step)?;
        measurements.extend(self.finite_system(&mut on_step)?);
        Ok(measurements)
    }

    /// Run both phases and collect the measurements.
    pub fn run(&mut self) -> Result<Vec<Measurement>> {
        self.run_with(|_| {})
    }

    /// Diagonalize `system ⊗ environment` and truncate the system side to
    /// `keep` states.
    fn diagonalize(&self, system: &Block, environment: &Block, keep: usize) -> Result<Step> {
        let hamiltonian = superblock_hamiltonian(system, environment)?;
        let ground = self.solver.ground_state(&hamiltonian)?;
        let psi = wavefunction_matrix(&ground.vector, system.dim(), environment.dim())?;
        let truncation = truncate(&reduced_density_matrix(&psi)?, keep)?;
        debug!(
            "superblock {}x{} sites, dims {}x{}: E = {}, kept {} of {}",
            system.sites(),
            environment.sites(),
            system.dim(),
            environment.dim(),
            ground.energy,
            keep,
            system.dim()
        );
        Ok(Step { ground, truncation })
    }
}

fn emit(
    measurement: Measurement,
    measurements: &mut Vec<Measurement>,
    on_step: &mut dyn FnMut(&Measurement),
) {
    on_step(&measurement);
    measurements.push(measurement);
}
