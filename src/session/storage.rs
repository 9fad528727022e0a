//! Local key-value storage
//!
//! Durable per-profile entries, the desktop stand-in for browser local storage.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// File name of the storage document inside the data directory
pub const STORAGE_FILE_NAME: &str = "local_storage.json";

const STORAGE_VERSION: u32 = 1;

/// A string-keyed, string-valued durable store
pub trait KeyValueStore: Send + Sync {
    /// Read an entry, `None` if it does not exist
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Create or overwrite an entry
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete an entry; missing entries are not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Serializable layout of the storage file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Format version (for future migration support)
    version: u32,
    entries: HashMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// JSON-file backed store
///
/// Every operation reads the file fresh, so entries written by another
/// instance of the app are observed. A missing file reads as empty.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Store backed by an explicit file path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store backed by `local_storage.json` inside `data_dir`
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self::new(data_dir.as_ref().join(STORAGE_FILE_NAME))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StorageData, StorageError> {
        if !self.path.exists() {
            return Ok(StorageData::default());
        }

        let json = fs::read_to_string(&self.path)?;
        let data: StorageData = serde_json::from_str(&json)?;

        if data.version != STORAGE_VERSION {
            return Err(StorageError::InvalidData(format!(
                "Unsupported storage version: {}",
                data.version
            )));
        }

        Ok(data)
    }

    fn save(&self, data: &StorageData) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded value is (), so a poisoned lock carries no broken state.
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard();
        Ok(self.load()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.guard();
        let mut data = self.load()?;
        data.entries.insert(key.to_string(), value.to_string());
        tracing::debug!(path = %self.path.display(), key = %key, "Writing storage entry");
        self.save(&data)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.guard();
        let mut data = self.load()?;
        if data.entries.remove(key).is_some() {
            self.save(&data)?;
        }
        Ok(())
    }
}

/// In-process store that counts writes
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry; the seed does not count as a write
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Number of `set` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}
