//! Storage backend selection from configuration.

use std::sync::Arc;

use tracing::info;

use assista_core::config::{StorageBackend, StorageConfig};
use assista_core::result::AppResult;
use assista_core::traits::storage::KeyValueStorage;

/// Builds the configured [`KeyValueStorage`] backend.
#[derive(Debug, Clone)]
pub struct StorageManager {
    backend: Arc<dyn KeyValueStorage>,
}

impl StorageManager {
    /// Create the backend named by `config.backend`.
    pub fn new(config: &StorageConfig) -> AppResult<Self> {
        let backend: Arc<dyn KeyValueStorage> = match config.backend {
            StorageBackend::Memory => {
                #[cfg(feature = "memory")]
                {
                    Arc::new(crate::memory::MemoryStorage::new())
                }
                #[cfg(not(feature = "memory"))]
                {
                    return Err(assista_core::AppError::configuration(
                        "Memory storage backend requires the 'memory' feature",
                    ));
                }
            }
            StorageBackend::File => {
                #[cfg(feature = "file")]
                {
                    Arc::new(crate::file::FileStorage::open(&config.path)?)
                }
                #[cfg(not(feature = "file"))]
                {
                    return Err(assista_core::AppError::configuration(
                        "File storage backend requires the 'file' feature",
                    ));
                }
            }
        };

        info!(backend = backend.backend(), "Session storage initialized");
        Ok(Self { backend })
    }

    /// Shared handle to the backend.
    pub fn backend(&self) -> Arc<dyn KeyValueStorage> {
        Arc::clone(&self.backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let manager = StorageManager::new(&config).unwrap();
        assert_eq!(manager.backend().backend(), "memory");
    }

    #[test]
    fn test_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            path: dir.path().join("s.json").to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };
        let manager = StorageManager::new(&config).unwrap();
        assert_eq!(manager.backend().backend(), "file");
    }
}
