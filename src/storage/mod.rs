//! Directory-backed storage that hands out [`Blob`] handles.
//!
//! A [`Storage`] claims its directory in a [`StorageRegistry`], creates it if needed, and
//! clears any stale files. Blobs are written as flat files named by their UUID. The
//! storage keeps no index of the blobs it created.

/// Storage error types.
pub mod error;
pub mod registry;

#[cfg(test)]
mod tests;

pub use error::{StorageError, StorageResult};
pub use registry::StorageRegistry;

use std::fs;
use std::io::ErrorKind;
use std::path::{self, Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::blob::Blob;
use crate::config::Config;
use crate::constants::{DEFAULT_RELEASE_AFTER_READ, DEFAULT_STORAGE_PATH};

/// Owns one directory of transient blob files.
///
/// Dropping the storage deletes its directory on a best-effort basis. Use
/// [`Storage::delete`] to observe teardown errors.
#[derive(Debug)]
pub struct Storage {
    storage_path: PathBuf,
    registry: StorageRegistry,
    release_after_read: bool,
    deleted: bool,
}

impl Storage {
    /// Opens a storage at `storage_path`, claimed in the process-wide registry.
    pub fn new(storage_path: impl Into<PathBuf>) -> StorageResult<Self> {
        Self::with_registry(storage_path, StorageRegistry::global())
    }

    /// Opens a storage at [`DEFAULT_STORAGE_PATH`] relative to the working directory.
    pub fn open_default() -> StorageResult<Self> {
        Self::new(DEFAULT_STORAGE_PATH)
    }

    /// Opens a storage using the path and release flag from `config`.
    pub fn from_config(config: &Config) -> StorageResult<Self> {
        Self::open(
            config.storage_path.clone(),
            StorageRegistry::global(),
            config.release_after_read,
        )
    }

    /// Opens a storage claimed in `registry` instead of the global one.
    pub fn with_registry(
        storage_path: impl Into<PathBuf>,
        registry: StorageRegistry,
    ) -> StorageResult<Self> {
        Self::open(storage_path.into(), registry, DEFAULT_RELEASE_AFTER_READ)
    }

    #[instrument(skip(registry))]
    fn open(
        storage_path: PathBuf,
        registry: StorageRegistry,
        release_after_read: bool,
    ) -> StorageResult<Self> {
        let storage_path = path::absolute(&storage_path)?;

        registry.claim(&storage_path)?;

        if let Err(source) = fs::create_dir_all(&storage_path) {
            registry.release(&storage_path);
            return Err(StorageError::DirectoryCreation {
                path: storage_path,
                source,
            });
        }

        let storage = Self {
            storage_path,
            registry,
            release_after_read,
            deleted: false,
        };

        let stale = storage.clear()?;
        info!(
            path = %storage.storage_path.display(),
            stale,
            "Storage initialized"
        );

        Ok(storage)
    }

    /// Returns the (absolute) storage directory.
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Returns the release flag applied by [`Storage::put`].
    pub fn release_after_read(&self) -> bool {
        self.release_after_read
    }

    /// Writes `content` to a new blob using the storage's default release flag.
    pub fn put(&self, content: &[u8]) -> StorageResult<Blob> {
        self.put_with(content, self.release_after_read)
    }

    /// Writes `content` to a new blob that survives reads until released.
    pub fn put_persistent(&self, content: &[u8]) -> StorageResult<Blob> {
        self.put_with(content, false)
    }

    /// Writes `content` to a new blob with an explicit release flag.
    #[instrument(skip(self, content), fields(size = content.len()))]
    pub fn put_with(&self, content: &[u8], release_after_read: bool) -> StorageResult<Blob> {
        let id = Self::generate_id();
        let blob = Blob::new(content, id, self.blob_path(id), release_after_read)?;
        Ok(blob)
    }

    /// Removes every file directly inside the storage directory; returns the count removed.
    ///
    /// Subdirectories are left alone. A file that cannot be removed is logged and skipped.
    pub fn clear(&self) -> StorageResult<usize> {
        let mut removed = 0;

        for entry in fs::read_dir(&self.storage_path)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();

            match entry.file_type() {
                Ok(ft) if ft.is_dir() => continue,
                Ok(_) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping entry with unknown type");
                    continue;
                }
            }

            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove blob file");
                }
            }
        }

        debug!(removed, "Cleared storage");
        Ok(removed)
    }

    /// Clears and removes the directory, and drops the registry claim.
    ///
    /// An already-missing directory is not an error.
    pub fn delete(mut self) -> StorageResult<()> {
        self.teardown()
    }

    /// Returns blob stats by scanning the directory.
    pub fn stats(&self) -> StorageResult<StorageStats> {
        let mut blob_count = 0;
        let mut total_bytes = 0;

        for entry in fs::read_dir(&self.storage_path)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if metadata.is_file() {
                blob_count += 1;
                total_bytes += metadata.len();
            }
        }

        Ok(StorageStats {
            blob_count,
            total_bytes,
        })
    }

    fn generate_id() -> Uuid {
        Uuid::new_v4()
    }

    fn blob_path(&self, id: Uuid) -> PathBuf {
        self.storage_path.join(id.to_string())
    }

    fn teardown(&mut self) -> StorageResult<()> {
        if self.deleted {
            return Ok(());
        }
        self.deleted = true;

        self.registry.release(&self.storage_path);

        if self.storage_path.exists() {
            self.clear()?;
            fs::remove_dir(&self.storage_path)?;
        }

        info!(path = %self.storage_path.display(), "Storage deleted");
        Ok(())
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            warn!(
                path = %self.storage_path.display(),
                error = %e,
                "Failed to delete storage on drop"
            );
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Aggregate stats for a storage directory.
pub struct StorageStats {
    /// Number of blob files present.
    pub blob_count: usize,
    /// Total bytes across all blob files.
    pub total_bytes: u64,
}
