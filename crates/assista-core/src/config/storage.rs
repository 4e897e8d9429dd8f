//! Session persistence configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which key-value backend holds the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; the session ends with the process.
    Memory,
    /// A JSON file on disk; the session survives restarts.
    #[default]
    File,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Session persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// File path for the `file` backend.
    #[serde(default = "default_path")]
    pub path: String,
    /// Key holding the bearer token.
    #[serde(default = "default_token_key")]
    pub token_key: String,
    /// Key holding the serialized user.
    #[serde(default = "default_user_key")]
    pub user_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_path(),
            token_key: default_token_key(),
            user_key: default_user_key(),
        }
    }
}

impl StorageConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.token_key.is_empty() || self.user_key.is_empty() {
            return Err(AppError::configuration("storage keys must not be empty"));
        }
        if self.token_key == self.user_key {
            return Err(AppError::configuration(
                "storage.token_key and storage.user_key must differ",
            ));
        }
        if self.backend == StorageBackend::File && self.path.trim().is_empty() {
            return Err(AppError::configuration(
                "storage.path is required for the file backend",
            ));
        }
        Ok(())
    }
}

fn default_path() -> String {
    "data/session.json".to_string()
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_user_key() -> String {
    "user".to_string()
}
