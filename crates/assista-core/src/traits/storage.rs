//! Key-value persistence trait backing the session store.

use crate::result::AppResult;

/// Scoped key-value storage (browser `localStorage`, a file, memory).
///
/// Only the session store writes through this trait; everything else reads
/// the session via the store. Operations are synchronous.
pub trait KeyValueStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g. `"memory"`, `"file"`).
    fn backend(&self) -> &str;

    /// Get a value by key. Returns `None` if the key is not set.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a single key.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> AppResult<()>;

    /// Read several keys from one snapshot, in the order given.
    ///
    /// The default reads them one by one; backends that can read a batch
    /// from a single snapshot override it.
    fn get_many(&self, keys: &[&str]) -> AppResult<Vec<Option<String>>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Write several keys as one unit.
    ///
    /// The default writes them one by one; backends that can commit a batch
    /// in a single step override it.
    fn set_many(&self, entries: &[(&str, &str)]) -> AppResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Remove several keys as one unit.
    fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }
}
