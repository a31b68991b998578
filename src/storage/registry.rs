//! Registry of directories currently owned by a live [`crate::Storage`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

use super::error::{StorageError, StorageResult};

static GLOBAL: LazyLock<StorageRegistry> = LazyLock::new(StorageRegistry::new);

/// Shared set of claimed storage paths. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct StorageRegistry {
    paths: Arc<Mutex<HashSet<PathBuf>>>,
}

impl StorageRegistry {
    /// Creates an empty registry, independent of [`StorageRegistry::global`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry used by [`crate::Storage::new`].
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Claims `path`, failing with [`StorageError::DuplicateStorage`] if already claimed.
    pub fn claim(&self, path: &Path) -> StorageResult<()> {
        let mut paths = self.paths.lock();
        if !paths.insert(path.to_path_buf()) {
            return Err(StorageError::DuplicateStorage {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Drops the claim on `path`. Returns `false` if it was not claimed.
    pub fn release(&self, path: &Path) -> bool {
        self.paths.lock().remove(path)
    }

    /// Returns `true` if `path` is currently claimed.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.lock().contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.lock().is_empty()
    }
}
