//! Cross-cutting, shared constants.

/// Directory used when no storage path is supplied (relative to the working directory).
pub const DEFAULT_STORAGE_PATH: &str = "__bytes_storage__";

/// Blobs are released after their first read unless configured otherwise.
pub const DEFAULT_RELEASE_AFTER_READ: bool = true;
