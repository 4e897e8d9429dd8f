//! In-memory key-value storage using dashmap.

use std::sync::Arc;

use dashmap::DashMap;

use assista_core::result::AppResult;
use assista_core::traits::storage::KeyValueStorage;

/// Process-local storage. Clones share the same map, which lets tests keep
/// a handle on what the session store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn backend(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
