//! Truncation schedule of the infinite-system phase.
//!
//! The block basis grows exactly while doubling stays within `m` states.
//! The step that would overshoot starts truncating ([`TruncationPhase::Onset`]).
//! Its untruncated count is then pinned to `m` ([`TruncationPhase::Pinned`]),
//! and from there on every enlarged block has `2m` states
//! ([`TruncationPhase::Steady`]).

use log::debug;

use crate::error::{DmrgError, Result};
use crate::spin::SITE_DIM;

/// Where the block growth stands relative to the state ceiling `m`.
///
/// `Onset` and `Pinned` are transient: both are entered and left within the
/// single [`GrowthSchedule::advance`] call that first truncates, so a
/// [`GrowthStep`] only ever reports `Exact` or `Steady`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TruncationPhase {
    /// `2 * state_count <= m`: no information is lost yet.
    Exact,
    /// First step whose doubling would exceed `m`.
    Onset,
    /// Untruncated count pinned to `m`.
    Pinned,
    /// Enlarged blocks are fixed at `2m` states.
    Steady,
}

/// Decisions for one growth step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthStep {
    /// States retained by this step's truncation.
    pub states_to_keep: usize,
    /// Dimension of the block after the next site is added.
    pub enlarged_dim: usize,
    /// Phase the schedule is in once the step is complete: `Exact` or
    /// `Steady`.
    pub phase: TruncationPhase,
}

/// State machine producing the `states_to_keep` ramp `2, 4, 8, ...` capped
/// at `m`.
#[derive(Debug, Clone)]
pub struct GrowthSchedule {
    max_states: usize,
    phase: TruncationPhase,
    state_count: usize,
    states_to_keep: usize,
}

impl GrowthSchedule {
    pub fn new(max_states: usize) -> Self {
        Self {
            max_states,
            phase: TruncationPhase::Exact,
            state_count: SITE_DIM,
            states_to_keep: SITE_DIM,
        }
    }

    pub fn phase(&self) -> TruncationPhase {
        self.phase
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Advance by one growth step.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::OperatorDimension` if the untruncated count and
    /// the retained count drift apart. The enlarged identity would then no
    /// longer match the rotated block.
    pub fn advance(&mut self) -> Result<GrowthStep> {
        let m = self.max_states;
        match self.phase {
            TruncationPhase::Exact if 2 * self.state_count <= m => self.state_count *= 2,
            TruncationPhase::Exact => self.phase = TruncationPhase::Onset,
            _ => {}
        }
        self.states_to_keep = (2 * self.states_to_keep).min(m);

        if self.phase == TruncationPhase::Onset {
            self.phase = TruncationPhase::Pinned;
            self.state_count = m;
            debug!("truncation starts at {} states", m);
        }
        if self.phase == TruncationPhase::Pinned {
            self.phase = TruncationPhase::Steady;
        }

        if self.state_count != self.states_to_keep {
            return Err(DmrgError::OperatorDimension {
                operator: "identity",
                expected: self.states_to_keep,
                actual: self.state_count,
            });
        }

        let enlarged_dim = match self.phase {
            TruncationPhase::Steady => SITE_DIM * m,
            _ => SITE_DIM * self.state_count,
        };
        Ok(GrowthStep {
            states_to_keep: self.states_to_keep,
            enlarged_dim,
            phase: self.phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(m: usize, steps: usize) -> Vec<GrowthStep> {
        let mut schedule = GrowthSchedule::new(m);
        (0..steps).map(|_| schedule.advance().unwrap()).collect()
    }

    #[test]
    fn test_power_of_two_ramp() {
        let keep: Vec<usize> = ramp(16, 6).iter().map(|s| s.states_to_keep).collect();
        assert_eq!(keep, vec![4, 8, 16, 16, 16, 16]);
    }

    #[test]
    fn test_phases_for_power_of_two() {
        let phases: Vec<TruncationPhase> = ramp(8, 4).iter().map(|s| s.phase).collect();
        assert_eq!(
            phases,
            vec![
                TruncationPhase::Exact,
                TruncationPhase::Exact,
                TruncationPhase::Steady,
                TruncationPhase::Steady
            ]
        );
    }

    #[test]
    fn test_transient_phases_never_reported() {
        for m in 1..40 {
            let mut schedule = GrowthSchedule::new(m);
            for _ in 0..8 {
                let step = schedule.advance().unwrap();
                assert!(matches!(
                    step.phase,
                    TruncationPhase::Exact | TruncationPhase::Steady
                ));
                assert_eq!(schedule.phase(), step.phase);
            }
        }
    }

    #[test]
    fn test_non_power_of_two() {
        let steps = ramp(5, 4);
        let keep: Vec<usize> = steps.iter().map(|s| s.states_to_keep).collect();
        let dims: Vec<usize> = steps.iter().map(|s| s.enlarged_dim).collect();
        assert_eq!(keep, vec![4, 5, 5, 5]);
        assert_eq!(dims, vec![8, 10, 10, 10]);
    }

    #[test]
    fn test_small_m_truncates_immediately() {
        for m in 1..4 {
            let step = ramp(m, 1)[0];
            assert_eq!(step.states_to_keep, m);
            assert_eq!(step.enlarged_dim, 2 * m);
            assert_eq!(step.phase, TruncationPhase::Steady);
        }
    }

    #[test]
    fn test_ramp_properties() {
        for m in 1..100 {
            let steps = ramp(m, 12);
            let mut previous = SITE_DIM;
            for step in &steps {
                assert!(step.states_to_keep <= m);
                assert!(step.states_to_keep >= previous.min(m));
                assert!(step.states_to_keep <= 2 * previous);
                assert_eq!(step.enlarged_dim, 2 * step.states_to_keep);
                previous = step.states_to_keep;
            }
            assert_eq!(steps.last().unwrap().states_to_keep, m);
        }
    }
}
