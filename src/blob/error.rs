use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
/// Errors returned by blob reads and releases.
pub enum BlobError {
    /// The backing file is gone; the blob can no longer be read or released.
    #[error("blob {id} already released")]
    AlreadyReleased {
        /// Blob identifier.
        id: Uuid,
    },

    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for blob operations.
pub type BlobResult<T> = Result<T, BlobError>;
