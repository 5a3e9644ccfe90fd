//! Finite-system sweeps over blocks stored by the growth phase.

use log::{info, warn};

use crate::engine::{Dmrg, emit};
use crate::error::Result;
use crate::measurement::{Measurement, Stage};
use crate::solver::GroundStateSolver;
use crate::store::{BlockKey, BlockStore, Side, Sweep};

impl<S: BlockStore, G: GroundStateSolver> Dmrg<S, G> {
    /// Sweep the system block back and forth across the chain.
    ///
    /// Half-sweep `h` grows the system from the left for even `h` and from
    /// the right for odd `h`. The first half-sweep starts at half the chain,
    /// later ones at the minimum environment size `r`, and each runs while
    /// the environment keeps at least `r` sites. Expects the blocks written
    /// by [`Dmrg::infinite_system`].
    ///
    /// If `r` does not exist or exceeds half the chain, no finite-system
    /// step is possible and the phase does nothing.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::BlockNotFound` if a needed block was never stored,
    /// and propagates tensor and solver failures.
    pub fn finite_system(
        &mut self,
        on_step: &mut dyn FnMut(&Measurement),
    ) -> Result<Vec<Measurement>> {
        let num_sites = self.config.num_sites;
        let half = self.config.half_chain();
        let keep = self.config.states_to_keep;
        let mut measurements = Vec::new();
        if self.config.half_sweeps == 0 {
            return Ok(measurements);
        }

        let Some(min_env) = self.config.min_environment_size().filter(|&r| r <= half) else {
            warn!(
                "no room to sweep: {} states need more than {} sites per side",
                keep, half
            );
            return Ok(measurements);
        };

        let mut side = Side::Left;
        let mut size = half;
        let mut system = self.store.load(BlockKey::new(size, side))?;

        for half_sweep in 0..self.config.half_sweeps {
            while size <= num_sites - min_env {
                let env_size = num_sites - size;
                let environment = self.store.load(BlockKey::new(env_size, side.opposite()))?;
                let step = self.diagonalize(&system, &environment, keep)?;

                let (sites_left, sites_right) = match side {
                    Side::Left => (size, env_size),
                    Side::Right => (env_size, size),
                };
                emit(
                    Measurement {
                        stage: Stage::Finite { half_sweep },
                        sites_left,
                        sites_right,
                        energy: step.ground.energy,
                        states_kept: keep,
                        discarded_weight: step.truncation.discarded_weight(),
                    },
                    &mut measurements,
                    on_step,
                );

                system = system.rotate(&step.truncation)?.enlarge()?;
                size += 1;
                self.store
                    .store(BlockKey::new(size, side), Sweep::Half(half_sweep), &system)?;
            }

            info!("half-sweep {} done growing from the {}", half_sweep, side);
            side = side.opposite();
            size = min_env;
            system = self.store.load(BlockKey::new(size, side))?;
        }
        Ok(measurements)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DmrgConfig;
    use crate::engine::Dmrg;
    use crate::measurement::Stage;
    use crate::solver::ExactSolver;
    use crate::store::{BlockKey, BlockStore, MemoryStore, Side, Sweep};

    fn sites(m: usize, num_sites: usize, sweeps: usize) -> Vec<(usize, usize, Stage)> {
        let mut dmrg = Dmrg::new(
            DmrgConfig::new(m, num_sites, sweeps),
            MemoryStore::new(),
            ExactSolver,
        )
        .unwrap();
        dmrg.run()
            .unwrap()
            .into_iter()
            .map(|x| (x.sites_left, x.sites_right, x.stage))
            .collect()
    }

    #[test]
    fn test_sweep_layout() {
        let finite: Vec<(usize, usize, Stage)> = sites(4, 8, 3)
            .into_iter()
            .filter(|(_, _, stage)| *stage != Stage::Infinite)
            .collect();
        // r = 3 for m = 4
        let expected = vec![
            (4, 4, Stage::Finite { half_sweep: 0 }),
            (5, 3, Stage::Finite { half_sweep: 0 }),
            (5, 3, Stage::Finite { half_sweep: 1 }),
            (4, 4, Stage::Finite { half_sweep: 1 }),
            (3, 5, Stage::Finite { half_sweep: 1 }),
            (3, 5, Stage::Finite { half_sweep: 2 }),
            (4, 4, Stage::Finite { half_sweep: 2 }),
            (5, 3, Stage::Finite { half_sweep: 2 }),
        ];
        assert_eq!(finite, expected);
    }

    #[test]
    fn test_no_room_to_sweep() {
        // m = 16 needs r = 5 > L/2 = 4
        let all = sites(16, 8, 2);
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|(_, _, stage)| *stage == Stage::Infinite));
    }

    #[test]
    fn test_sweep_tags_in_store() {
        let mut dmrg = Dmrg::new(DmrgConfig::new(4, 8, 2), MemoryStore::new(), ExactSolver).unwrap();
        dmrg.run().unwrap();
        let store = dmrg.store();
        assert_eq!(store.sweep_of(BlockKey::new(6, Side::Left)).unwrap(), Some(Sweep::Half(0)));
        assert_eq!(store.sweep_of(BlockKey::new(5, Side::Right)).unwrap(), Some(Sweep::Half(1)));
        assert_eq!(store.sweep_of(BlockKey::new(3, Side::Right)).unwrap(), Some(Sweep::Infinite));
    }
}
