use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{Budget, RecurringTemplate, Transaction};

/// Fixed key the whole application state lives under.
pub const STORAGE_KEY: &str = "homeledger-state";

/// String key/value storage, the shape of the storage the original web
/// client wrote through. One JSON blob per key, full overwrite on every
/// write.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-per-key storage rooted in the platform data directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(text))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// In-memory storage for tests, playing the role the in-memory database
/// plays for a SQL-backed app.
#[derive(Default)]
pub struct MemoryStorage {
    items: std::collections::HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The persisted slice of application state.
///
/// Key names match the blob the original client persisted; unknown or
/// missing keys fall back to defaults so older blobs still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub dark_mode: bool,
    pub notifications_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_hidden: Option<bool>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recurring_templates: Vec<RecurringTemplate>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            dark_mode: true,
            notifications_enabled: true,
            amount_hidden: None,
            transactions: Vec::new(),
            budgets: Vec::new(),
            recurring_templates: Vec::new(),
        }
    }
}

/// Load the snapshot from storage. Missing or corrupt data is logged and
/// treated as empty state; it never surfaces to the user.
pub fn load_snapshot(storage: &dyn StorageBackend) -> Snapshot {
    match storage.get_item(STORAGE_KEY) {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("discarding corrupt state blob: {e}");
                Snapshot::default()
            }
        },
        Ok(None) => Snapshot::default(),
        Err(e) => {
            tracing::warn!("could not read persisted state: {e:#}");
            Snapshot::default()
        }
    }
}

/// Serialize and write the snapshot. Failures are logged and swallowed so a
/// full disk never blocks an in-memory mutation.
pub fn save_snapshot(storage: &mut dyn StorageBackend, snapshot: &Snapshot) {
    let text = match serde_json::to_string(snapshot) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("could not serialize state: {e}");
            return;
        }
    };
    if let Err(e) = storage.set_item(STORAGE_KEY, &text) {
        tracing::warn!("could not persist state: {e:#}");
    }
}

#[cfg(test)]
mod tests;
