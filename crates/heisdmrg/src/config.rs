//! Run parameters.

use crate::error::{DmrgError, Result};

/// Parameters of a DMRG run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmrgConfig {
    /// Maximum number of block states retained after truncation (`m`).
    pub states_to_keep: usize,
    /// Total number of sites in the open chain.
    pub num_sites: usize,
    /// Number of finite-system half-sweeps after the chain is grown.
    pub half_sweeps: usize,
}

impl DmrgConfig {
    pub fn new(states_to_keep: usize, num_sites: usize, half_sweeps: usize) -> Self {
        Self {
            states_to_keep,
            num_sites,
            half_sweeps,
        }
    }

    /// Check the preconditions of a run.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::InvalidConfig` if no states are kept or the chain
    /// is shorter than four sites or has odd length.
    ///
    /// # Examples
    ///
    /// ```
    /// use heisdmrg::DmrgConfig;
    ///
    /// assert!(DmrgConfig::new(8, 10, 2).validate().is_ok());
    /// assert!(DmrgConfig::new(8, 9, 2).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.states_to_keep == 0 {
            return Err(DmrgError::InvalidConfig {
                message: "at least one state must be kept".to_string(),
            });
        }
        if self.num_sites < 4 || self.num_sites % 2 != 0 {
            return Err(DmrgError::InvalidConfig {
                message: format!(
                    "chain length must be even and at least 4, got {}",
                    self.num_sites
                ),
            });
        }
        Ok(())
    }

    /// Block size grown to by the infinite-system phase.
    pub fn half_chain(&self) -> usize {
        self.num_sites / 2
    }

    /// See [`min_environment_size`].
    pub fn min_environment_size(&self) -> Option<usize> {
        min_environment_size(self.states_to_keep, self.num_sites)
    }
}

/// Smallest environment that is still represented exactly when `m` states
/// are kept: the least `r ≥ 3` with `2^r ≥ 2m`, or `None` if no such
/// `r < num_sites` exists.
///
/// Finite-system sweeps turn around once the environment shrinks to this
/// size.
///
/// # Examples
///
/// ```
/// use heisdmrg::config::min_environment_size;
///
/// assert_eq!(min_environment_size(8, 10), Some(4));
/// assert_eq!(min_environment_size(2, 4), Some(3));
/// assert_eq!(min_environment_size(64, 6), None);
/// ```
pub fn min_environment_size(states_to_keep: usize, num_sites: usize) -> Option<usize> {
    let target = states_to_keep.saturating_mul(2);
    (3..num_sites).find(|&r| {
        1usize
            .checked_shl(r as u32)
            .is_none_or(|states| states >= target)
    })
}
