//! Small persisted key/value stores.

use crate::atomic::write_atomic;
use crate::error::{ArchiveError, Result};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// A generic store of opaque string blobs.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Settings kept in a single JSON object on disk.
///
/// Every `set` rewrites the whole file atomically.
#[derive(Debug)]
pub struct JsonFileSettings {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                ArchiveError::Settings(format!("{} is corrupt: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ArchiveError::Settings(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        // A corrupt file is replaced rather than blocking every future save.
        let mut all = self.read_all().unwrap_or_default();
        all.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&all)?;
        write_atomic(&self.path, json.as_bytes()).map_err(|e| {
            ArchiveError::Settings(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

/// In-process settings, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
