//! Infinite-system growth of mirrored blocks up to half the chain.

use log::info;

use crate::block::Block;
use crate::engine::{Dmrg, GrowthSchedule, emit};
use crate::error::{DmrgError, Result};
use crate::measurement::{Measurement, Stage};
use crate::solver::GroundStateSolver;
use crate::store::{BlockKey, BlockStore, Side, Sweep};

impl<S: BlockStore, G: GroundStateSolver> Dmrg<S, G> {
    /// Grow two mirrored blocks from two sites each up to half the chain.
    ///
    /// Performs `L/2 - 1` steps. Every enlarged block is stored for both
    /// sides under [`Sweep::Infinite`].
    ///
    /// # Errors
    ///
    /// Any tensor, solver or store failure aborts the phase.
    pub fn infinite_system(
        &mut self,
        on_step: &mut dyn FnMut(&Measurement),
    ) -> Result<Vec<Measurement>> {
        let half = self.config.half_chain();
        let mut schedule = GrowthSchedule::new(self.config.states_to_keep);
        let mut measurements = Vec::with_capacity(half.saturating_sub(1));

        let mut block = Block::initial_pair()?;
        self.store_mirrored(&block)?;

        while block.sites() <= half {
            let plan = schedule.advance()?;
            let step = self.diagonalize(&block, &block, plan.states_to_keep)?;
            emit(
                Measurement {
                    stage: Stage::Infinite,
                    sites_left: block.sites(),
                    sites_right: block.sites(),
                    energy: step.ground.energy,
                    states_kept: plan.states_to_keep,
                    discarded_weight: step.truncation.discarded_weight(),
                },
                &mut measurements,
                on_step,
            );

            block = block.rotate(&step.truncation)?.enlarge()?;
            if block.dim() != plan.enlarged_dim {
                return Err(DmrgError::OperatorDimension {
                    operator: "hamiltonian",
                    expected: plan.enlarged_dim,
                    actual: block.dim(),
                });
            }
            self.store_mirrored(&block)?;
        }

        info!(
            "end of the infinite system algorithm: {} steps, truncation phase {:?}",
            measurements.len(),
            schedule.phase()
        );
        Ok(measurements)
    }

    fn store_mirrored(&mut self, block: &Block) -> Result<()> {
        for side in [Side::Left, Side::Right] {
            self.store
                .store(BlockKey::new(block.sites(), side), Sweep::Infinite, block)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DmrgConfig;
    use crate::engine::Dmrg;
    use crate::measurement::Stage;
    use crate::solver::ExactSolver;
    use crate::store::{BlockKey, BlockStore, MemoryStore, Side, Sweep};

    #[test]
    fn test_step_count_and_sizes() {
        let mut dmrg = Dmrg::new(DmrgConfig::new(4, 10, 0), MemoryStore::new(), ExactSolver).unwrap();
        let measurements = dmrg.infinite_system(&mut |_| {}).unwrap();
        assert_eq!(measurements.len(), 4);
        for (i, m) in measurements.iter().enumerate() {
            assert_eq!(m.stage, Stage::Infinite);
            assert_eq!(m.sites_left, i + 2);
            assert_eq!(m.sites_right, i + 2);
        }
    }

    #[test]
    fn test_blocks_stored_on_both_sides() {
        let mut dmrg = Dmrg::new(DmrgConfig::new(4, 8, 0), MemoryStore::new(), ExactSolver).unwrap();
        dmrg.infinite_system(&mut |_| {}).unwrap();
        let store = dmrg.store();
        for size in 2..=5 {
            let left = store.load(BlockKey::new(size, Side::Left)).unwrap();
            let right = store.load(BlockKey::new(size, Side::Right)).unwrap();
            assert_eq!(left, right);
            assert_eq!(left.sites(), size);
            assert_eq!(left.dim(), (1usize << size).min(8));
            assert_eq!(store.sweep_of(BlockKey::new(size, Side::Left)).unwrap(), Some(Sweep::Infinite));
        }
        assert!(store.load(BlockKey::new(6, Side::Left)).is_err());
    }

    #[test]
    fn test_states_kept_ramp() {
        let mut dmrg = Dmrg::new(DmrgConfig::new(6, 12, 0), MemoryStore::new(), ExactSolver).unwrap();
        let kept: Vec<usize> = dmrg
            .infinite_system(&mut |_| {})
            .unwrap()
            .iter()
            .map(|m| m.states_kept)
            .collect();
        assert_eq!(kept, vec![4, 6, 6, 6, 6]);
    }
}
