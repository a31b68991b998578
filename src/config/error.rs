//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Boolean environment variable held something other than true/false/1/0/yes/no.
    #[error("invalid boolean for {name}: '{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
