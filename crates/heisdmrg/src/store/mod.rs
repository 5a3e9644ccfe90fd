//! Block persistence between growth steps and sweeps.
//!
//! Blocks are keyed by their size and by the end of the chain they grow
//! from. Each entry also remembers which phase wrote it, so a half-sweep can
//! tell whether it is reading a block from the infinite-system phase or from
//! an earlier sweep.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::Result;
use crate::tensor::Matrix;

/// End of the chain a block is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Phase that produced a stored block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sweep {
    /// Written while growing the chain symmetrically.
    Infinite,
    /// Written during the given finite-system half-sweep (0-based).
    Half(usize),
}

/// Lookup key of a stored block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockKey {
    pub size: usize,
    pub side: Side,
}

impl BlockKey {
    pub fn new(size: usize, side: Side) -> Self {
        Self { size, side }
    }
}

/// Key-value storage of renormalized blocks.
///
/// Storing under an existing key replaces the previous entry.
pub trait BlockStore {
    /// Persist `block` under `key`, tagged with the phase that produced it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn store(&mut self, key: BlockKey, sweep: Sweep, block: &Block) -> Result<()>;

    /// Retrieve the block stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::BlockNotFound` if nothing was stored under `key`.
    fn load(&self, key: BlockKey) -> Result<Block>;

    /// Phase tag of the entry under `key`, `None` if the key is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn sweep_of(&self, key: BlockKey) -> Result<Option<Sweep>>;
}

/// Column-major matrix as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MatrixRecord {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl MatrixRecord {
    fn new(matrix: &Matrix) -> Self {
        Self {
            shape: matrix.shape().to_vec(),
            data: matrix.data().to_vec(),
        }
    }

    fn into_matrix(self) -> Result<Matrix> {
        Matrix::from_vec(self.data, &self.shape)
    }
}

/// A block together with its phase tag, in serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BlockRecord {
    sweep: Sweep,
    sites: usize,
    hamiltonian: MatrixRecord,
    sz: MatrixRecord,
    splus: MatrixRecord,
    sminus: MatrixRecord,
}

impl BlockRecord {
    pub(crate) fn new(sweep: Sweep, block: &Block) -> Self {
        Self {
            sweep,
            sites: block.sites(),
            hamiltonian: MatrixRecord::new(block.hamiltonian()),
            sz: MatrixRecord::new(block.sz()),
            splus: MatrixRecord::new(block.splus()),
            sminus: MatrixRecord::new(block.sminus()),
        }
    }

    pub(crate) fn sweep(&self) -> Sweep {
        self.sweep
    }

    pub(crate) fn into_block(self) -> Result<Block> {
        Block::from_parts(
            self.sites,
            self.hamiltonian.into_matrix()?,
            self.sz.into_matrix()?,
            self.splus.into_matrix()?,
            self.sminus.into_matrix()?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite_and_display() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Side::Right.to_string(), "right");
    }

    #[test]
    fn test_block_record_round_trip() {
        let block = Block::initial_pair().unwrap().enlarge().unwrap();
        let record = BlockRecord::new(Sweep::Half(3), &block);
        assert_eq!(record.sweep(), Sweep::Half(3));
        assert_eq!(record.into_block().unwrap(), block);
    }

    #[test]
    fn test_sweep_json_tags() {
        assert_eq!(serde_json::to_string(&Sweep::Infinite).unwrap(), "\"infinite\"");
        assert_eq!(serde_json::to_string(&Sweep::Half(2)).unwrap(), "{\"half\":2}");
    }
}
