//! Ephemeral, directory-backed byte-blob store.
//!
//! A [`Storage`] owns one directory. Each [`Storage::put`] writes the bytes to a fresh
//! file named by a random UUID and returns a [`Blob`] handle. By default a blob is
//! released (its file deleted) right after its first successful read.
//!
//! # Public API Surface
//!
//! - [`Storage`], [`StorageRegistry`], [`StorageStats`] - directory ownership and blob creation
//! - [`Blob`], [`ByteSource`] - read, release, concatenation
//! - [`Config`] - `BYTES_STORAGE_*` environment overrides
//! - [`StorageError`], [`BlobError`], [`ConfigError`]
//!
//! # Cleanup
//!
//! Dropping a [`Storage`] deletes its directory and dropping a live [`Blob`] releases
//! it. Both are best-effort and never panic. Call [`Storage::delete`] or
//! [`Blob::release`] to see the errors.
//!
//! ```rust,no_run
//! use bytes_storage::Storage;
//!
//! let storage = Storage::open_default()?;
//! let blob = storage.put(b"This is an example payload.")?;
//! println!("{blob}");
//!
//! assert_eq!(blob.read()?, b"This is an example payload.");
//! assert!(blob.is_released());
//!
//! storage.delete()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod blob;
pub mod config;
pub mod constants;
pub mod storage;

pub use blob::{Blob, BlobError, BlobResult, ByteSource};
pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_RELEASE_AFTER_READ, DEFAULT_STORAGE_PATH};
pub use storage::{Storage, StorageError, StorageRegistry, StorageResult, StorageStats};
