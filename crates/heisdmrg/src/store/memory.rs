use std::collections::HashMap;

use crate::block::Block;
use crate::error::{DmrgError, Result};
use crate::store::{BlockKey, BlockStore, Sweep};

/// In-memory block store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    blocks: HashMap<BlockKey, (Sweep, Block)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All keys currently stored, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &BlockKey> {
        self.blocks.keys()
    }
}

impl BlockStore for MemoryStore {
    fn store(&mut self, key: BlockKey, sweep: Sweep, block: &Block) -> Result<()> {
        self.blocks.insert(key, (sweep, block.clone()));
        Ok(())
    }

    fn load(&self, key: BlockKey) -> Result<Block> {
        self.blocks
            .get(&key)
            .map(|(_, block)| block.clone())
            .ok_or(DmrgError::BlockNotFound {
                size: key.size,
                side: key.side,
            })
    }

    fn sweep_of(&self, key: BlockKey) -> Result<Option<Sweep>> {
        Ok(self.blocks.get(&key).map(|(sweep, _)| *sweep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Side;

    #[test]
    fn test_store_and_load() {
        let mut store = MemoryStore::new();
        let block = Block::initial_pair().unwrap();
        let key = BlockKey::new(2, Side::Left);
        store.store(key, Sweep::Infinite, &block).unwrap();
        assert_eq!(store.load(key).unwrap(), block);
        assert_eq!(store.sweep_of(key).unwrap(), Some(Sweep::Infinite));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overwrite_replaces_sweep_tag() {
        let mut store = MemoryStore::new();
        let key = BlockKey::new(1, Side::Right);
        store.store(key, Sweep::Infinite, &Block::single_site()).unwrap();
        store.store(key, Sweep::Half(1), &Block::single_site()).unwrap();
        assert_eq!(store.sweep_of(key).unwrap(), Some(Sweep::Half(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_key() {
        let store = MemoryStore::new();
        let key = BlockKey::new(4, Side::Right);
        assert!(matches!(
            store.load(key),
            Err(DmrgError::BlockNotFound {
                size: 4,
                side: Side::Right
            })
        ));
        assert_eq!(store.sweep_of(key).unwrap(), None);
    }
}
