use super::*;
use crate::blob::BlobError;
use std::collections::HashSet;
use tempfile::TempDir;

fn create_test_storage() -> (Storage, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let storage = Storage::with_registry(dir.path().join("blobs"), StorageRegistry::new())
        .expect("Failed to open storage");
    (storage, dir)
}

fn file_count(path: &Path) -> usize {
    fs::read_dir(path).expect("Failed to list dir").count()
}

#[test]
fn test_new_creates_directory() {
    let (storage, _dir) = create_test_storage();

    assert!(storage.storage_path().is_dir());
    assert!(storage.storage_path().is_absolute());
    assert!(storage.release_after_read());
}

#[test]
fn test_new_clears_stale_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("blobs");
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join("stale-1"), b"old").unwrap();
    fs::write(path.join("stale-2"), b"older").unwrap();

    let storage = Storage::with_registry(&path, StorageRegistry::new()).unwrap();

    assert_eq!(file_count(storage.storage_path()), 0);
}

#[test]
fn test_put_and_read_round_trip() {
    let (storage, _dir) = create_test_storage();

    let blob = storage.put(b"This is an example payload.").unwrap();

    assert_eq!(blob.path().parent(), Some(storage.storage_path()));
    assert_eq!(blob.read().unwrap(), b"This is an example payload.");
    assert!(blob.is_released());
    assert_eq!(file_count(storage.storage_path()), 0);
}

#[test]
fn test_put_persistent_survives_reads() {
    let (storage, _dir) = create_test_storage();

    let blob = storage.put_persistent(b"sticky").unwrap();

    assert_eq!(blob.read().unwrap(), b"sticky");
    assert_eq!(blob.read().unwrap(), b"sticky");
    assert!(!blob.is_released());
}

#[test]
fn test_put_writes_raw_bytes_without_header() {
    let (storage, _dir) = create_test_storage();
    let payload: Vec<u8> = (0..=255).collect();

    let blob = storage.put_with(&payload, false).unwrap();

    assert_eq!(fs::read(blob.path()).unwrap(), payload);
    assert_eq!(
        blob.path().file_name().unwrap().to_str().unwrap(),
        blob.id().to_string()
    );
}

#[test]
fn test_blob_ids_are_unique() {
    let (storage, _dir) = create_test_storage();

    let blobs: Vec<_> = (0..500)
        .map(|_| storage.put_persistent(b"x").unwrap())
        .collect();
    let ids: HashSet<_> = blobs.iter().map(|b| b.id()).collect();

    assert_eq!(ids.len(), blobs.len());
    assert_eq!(file_count(storage.storage_path()), blobs.len());
}

#[test]
fn test_clear_removes_files_and_releases_blobs() {
    let (storage, _dir) = create_test_storage();
    let a = storage.put_persistent(b"a").unwrap();
    let b = storage.put_persistent(b"b").unwrap();

    let removed = storage.clear().unwrap();

    assert_eq!(removed, 2);
    assert_eq!(file_count(storage.storage_path()), 0);
    assert!(a.is_released());
    assert!(matches!(b.read(), Err(BlobError::AlreadyReleased { .. })));
}

#[test]
fn test_clear_empty_is_noop() {
    let (storage, _dir) = create_test_storage();

    assert_eq!(storage.clear().unwrap(), 0);
    assert_eq!(storage.clear().unwrap(), 0);
}

#[test]
fn test_clear_skips_subdirectories() {
    let (storage, _dir) = create_test_storage();
    fs::create_dir(storage.storage_path().join("nested")).unwrap();
    let _blob = storage.put_persistent(b"file").unwrap();

    assert_eq!(storage.clear().unwrap(), 1);

    assert!(storage.storage_path().join("nested").is_dir());
}

#[test]
fn test_delete_removes_directory() {
    let (storage, _dir) = create_test_storage();
    let path = storage.storage_path().to_path_buf();
    let _blob = storage.put_persistent(b"left behind").unwrap();

    storage.delete().expect("delete should succeed");

    assert!(!path.exists());
}

#[test]
fn test_delete_tolerates_missing_directory() {
    let (storage, _dir) = create_test_storage();
    fs::remove_dir_all(storage.storage_path()).unwrap();

    assert!(storage.delete().is_ok());
}

#[test]
fn test_delete_fails_with_subdirectory_present() {
    let (storage, _dir) = create_test_storage();
    fs::create_dir(storage.storage_path().join("nested")).unwrap();

    assert!(matches!(storage.delete(), Err(StorageError::Io(_))));
}

#[test]
fn test_drop_removes_directory() {
    let (storage, _dir) = create_test_storage();
    let path = storage.storage_path().to_path_buf();

    drop(storage);

    assert!(!path.exists());
}

#[test]
fn test_duplicate_path_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = StorageRegistry::new();
    let path = dir.path().join("shared");

    let first = Storage::with_registry(&path, registry.clone()).unwrap();
    let err = Storage::with_registry(&path, registry.clone()).unwrap_err();

    assert!(matches!(err, StorageError::DuplicateStorage { .. }));
    assert!(first.storage_path().is_dir());
}

#[test]
fn test_path_reusable_after_delete() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = StorageRegistry::new();
    let path = dir.path().join("reused");

    let first = Storage::with_registry(&path, registry.clone()).unwrap();
    first.delete().unwrap();
    assert!(registry.is_empty());

    let second = Storage::with_registry(&path, registry.clone()).unwrap();
    assert!(second.storage_path().is_dir());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_path_reusable_after_drop() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = StorageRegistry::new();
    let path = dir.path().join("dropped");

    drop(Storage::with_registry(&path, registry.clone()).unwrap());

    assert!(Storage::with_registry(&path, registry).is_ok());
}

#[test]
fn test_directory_creation_failure() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let registry = StorageRegistry::new();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"file in the way").unwrap();

    let err = Storage::with_registry(&blocker, registry.clone()).unwrap_err();

    assert!(matches!(err, StorageError::DirectoryCreation { .. }));
    assert!(std::error::Error::source(&err).is_some());
    assert!(registry.is_empty(), "failed open must release its claim");
}

#[test]
fn test_from_config_applies_release_flag() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        storage_path: dir.path().join("configured"),
        release_after_read: false,
    };

    let storage = Storage::from_config(&config).unwrap();
    let blob = storage.put(b"kept").unwrap();

    assert!(!storage.release_after_read());
    assert!(!blob.release_after_read());
    blob.read().unwrap();
    assert!(!blob.is_released());
}

#[test]
fn test_stats() {
    let (storage, _dir) = create_test_storage();
    let _a = storage.put_persistent(b"12345").unwrap();
    let _b = storage.put_persistent(b"678").unwrap();

    let stats = storage.stats().unwrap();

    assert_eq!(
        stats,
        StorageStats {
            blob_count: 2,
            total_bytes: 8,
        }
    );
}
