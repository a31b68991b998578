//! Test fixtures for integration tests.

use bytes_storage::{Storage, StorageRegistry};
use std::path::PathBuf;
use tempfile::TempDir;

pub const PAYLOAD_SIZES: [usize; 6] = [0, 1, 100, 1024, 10_000, 100_000];

/// A storage rooted in its own temp dir; the dir outlives the storage.
pub struct StorageFixture {
    pub storage: Storage,
    pub root: TempDir,
}

impl StorageFixture {
    /// Opens a storage claimed in the global registry.
    pub fn global() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let storage = Storage::new(root.path().join("blobs")).expect("Failed to open storage");
        Self { storage, root }
    }

    /// Opens a storage claimed in a fresh, private registry.
    pub fn isolated() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let storage = Storage::with_registry(root.path().join("blobs"), StorageRegistry::new())
            .expect("Failed to open storage");
        Self { storage, root }
    }

    pub fn path(&self) -> PathBuf {
        self.storage.storage_path().to_path_buf()
    }
}

pub fn deterministic_payload(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 31 % 251) as u8).collect()
}

pub fn list_files(path: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(path)
        .expect("Failed to list dir")
        .map(|e| e.expect("bad entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
