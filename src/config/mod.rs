//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `BYTES_STORAGE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_RELEASE_AFTER_READ, DEFAULT_STORAGE_PATH};

/// Storage configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `BYTES_STORAGE_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory owned by the storage. Default: `__bytes_storage__`.
    pub storage_path: PathBuf,

    /// Release flag applied by [`crate::Storage::put`]. Default: `true`.
    pub release_after_read: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            release_after_read: DEFAULT_RELEASE_AFTER_READ,
        }
    }
}

impl Config {
    const ENV_STORAGE_PATH: &'static str = "BYTES_STORAGE_PATH";
    const ENV_RELEASE_AFTER_READ: &'static str = "BYTES_STORAGE_RELEASE_AFTER_READ";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_path = Self::parse_path_from_env(Self::ENV_STORAGE_PATH, defaults.storage_path);
        let release_after_read =
            Self::parse_bool_from_env(Self::ENV_RELEASE_AFTER_READ, defaults.release_after_read)?;

        Ok(Self {
            storage_path,
            release_after_read,
        })
    }

    /// Validates the storage path (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_path.exists() && !self.storage_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.storage_path.clone(),
            });
        }

        Ok(())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }
}
