use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::block::Block;
use crate::error::{DmrgError, Result};
use crate::store::{BlockKey, BlockRecord, BlockStore, Sweep};

/// Block store writing one JSON document per key into a directory.
///
/// # Examples
///
/// ```
/// use heisdmrg::Block;
/// use heisdmrg::store::{BlockKey, BlockStore, FileStore, Side, Sweep};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut store = FileStore::new(dir.path()).unwrap();
/// let key = BlockKey::new(1, Side::Left);
/// store.store(key, Sweep::Infinite, &Block::single_site()).unwrap();
/// assert_eq!(store.load(key).unwrap(), Block::single_site());
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `DmrgError::Io` if the directory cannot be created.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the entry for `key`.
    pub fn path_for(&self, key: BlockKey) -> PathBuf {
        self.root.join(format!("block-{}-{}.json", key.side, key.size))
    }

    fn read_record(&self, key: BlockKey) -> Result<Option<BlockRecord>> {
        let file = match File::open(self.path_for(key)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_reader(BufReader::new(file))?))
    }
}

impl BlockStore for FileStore {
    fn store(&mut self, key: BlockKey, sweep: Sweep, block: &Block) -> Result<()> {
        let path = self.path_for(key);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, &BlockRecord::new(sweep, block))?;
        writer.flush()?;
        debug!("stored {} block of {} sites at {}", key.side, key.size, path.display());
        Ok(())
    }

    fn load(&self, key: BlockKey) -> Result<Block> {
        self.read_record(key)?
            .ok_or(DmrgError::BlockNotFound {
                size: key.size,
                side: key.side,
            })?
            .into_block()
    }

    fn sweep_of(&self, key: BlockKey) -> Result<Option<Sweep>> {
        Ok(self.read_record(key)?.map(|record| record.sweep()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Side;
    use tempfile::TempDir;

    #[test]
    fn test_file_round_trip_is_exact() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path()).unwrap();
        let block = Block::initial_pair().unwrap().enlarge().unwrap();
        let key = BlockKey::new(3, Side::Right);
        store.store(key, Sweep::Half(0), &block).unwrap();
        assert!(store.path_for(key).ends_with("block-right-3.json"));
        assert_eq!(store.load(key).unwrap(), block);
        assert_eq!(store.sweep_of(key).unwrap(), Some(Sweep::Half(0)));
    }

    #[test]
    fn test_file_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested")).unwrap();
        let key = BlockKey::new(5, Side::Left);
        assert!(matches!(
            store.load(key),
            Err(DmrgError::BlockNotFound { size: 5, .. })
        ));
        assert_eq!(store.sweep_of(key).unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_encoding_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let key = BlockKey::new(2, Side::Left);
        fs::write(store.path_for(key), b"not json").unwrap();
        assert!(matches!(store.load(key), Err(DmrgError::Encoding(_))));
    }
}
