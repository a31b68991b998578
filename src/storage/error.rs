use std::path::PathBuf;
use thiserror::Error;

use crate::blob::BlobError;

#[derive(Error, Debug)]
/// Errors returned by [`crate::Storage`].
pub enum StorageError {
    /// Another live storage already owns this directory.
    #[error("storage already exists for {path}")]
    DuplicateStorage {
        /// Claimed directory.
        path: PathBuf,
    },

    /// Failed to create the storage directory.
    #[error("failed to create storage directory {path}: {source}")]
    DirectoryCreation {
        /// Directory path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Blob write failed.
    #[error("blob error: {0}")]
    Blob(#[from] BlobError),

    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
