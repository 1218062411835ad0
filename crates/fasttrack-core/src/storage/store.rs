//! Durable store seam.
//!
//! The persistence substrate is opaque to the core: one serialized blob per
//! key, get/set/delete. The tracker treats every call as best-effort -- the
//! in-memory state is authoritative for the process lifetime.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::storage::data_dir;

/// Durable key-value store of serialized blobs.
pub trait SnapshotStore {
    /// Fetch the blob under `key`; `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Durably write `blob` under `key`, replacing any prior value.
    fn set(&mut self, key: &str, blob: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile in-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// One JSON file per key under a root directory.
///
/// Writes go to a temp file first and land via rename, so a crash mid-write
/// leaves the previous snapshot intact rather than a truncated one.
///
/// Keys are used as file stems and must be bare names (no separators); the
/// tracker only ever passes internal constants.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at the default data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let root = data_dir().map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        let write = || -> std::io::Result<()> {
            std::fs::create_dir_all(&self.root)?;
            let tmp = self.root.join(format!(".{key}.json.tmp"));
            std::fs::write(&tmp, blob)?;
            std::fs::rename(&tmp, self.path(key))
        };
        write().map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            source: e,
        })
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::DeleteFailed {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}
