//! Key-value storage persisted as one JSON object in a file.
//!
//! Every write rewrites the whole document into a sibling temp file and
//! renames it over the original, so a batch either lands completely or not
//! at all.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use assista_core::error::{AppError, ErrorKind};
use assista_core::result::AppResult;
use assista_core::traits::storage::KeyValueStorage;

type Document = BTreeMap<String, String>;

/// File-backed key-value storage.
#[derive(Debug)]
pub struct FileStorage {
    /// The JSON document path.
    path: PathBuf,
    /// Serializes read-modify-write cycles within the process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Open (or prepare) storage at `path`. The parent directory is created
    /// if needed; the file itself appears on first write.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create storage directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> AppResult<Document> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read storage file: {}", self.path.display()),
                    e,
                ));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Document::new());
        }

        match serde_json::from_str(&raw) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                // An unreadable document only ever holds a session, which a
                // new login recreates.
                warn!(path = %self.path.display(), error = %e, "Discarding unreadable storage file");
                Ok(Document::new())
            }
        }
    }

    fn write_document(&self, doc: &Document) -> AppResult<()> {
        let json = serde_json::to_string_pretty(doc)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write storage file: {}", tmp.display()),
                e,
            )
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace storage file: {}", self.path.display()),
                e,
            )
        })?;
        debug!(path = %self.path.display(), keys = doc.len(), "Wrote storage file");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Document)) -> AppResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.read_document()?;
        apply(&mut doc);
        self.write_document(&doc)
    }
}

impl KeyValueStorage for FileStorage {
    fn backend(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_document()?.remove(key))
    }

    fn get_many(&self, keys: &[&str]) -> AppResult<Vec<Option<String>>> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let doc = self.read_document()?;
        Ok(keys.iter().map(|key| doc.get(*key).cloned()).collect())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.set_many(&[(key, value)])
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.remove_many(&[key])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> AppResult<()> {
        self.update(|doc| {
            for (key, value) in entries {
                doc.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        self.update(|doc| {
            for key in keys {
                doc.remove(*key);
            }
        })
    }
}
