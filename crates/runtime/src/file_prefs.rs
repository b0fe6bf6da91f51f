//! File-backed preferences store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::core::{PreferencesStore, StoreError};

/// Preferences kept as a flat JSON object on disk
///
/// Every `set` rewrites the whole file through a temp file and an atomic
/// rename, so a crash never leaves a half-written store behind.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFilePreferences {
    /// Open the store at `path`
    ///
    /// A missing or unreadable file is an empty store. Values that are not
    /// strings are dropped one by one; the rest of the file is kept.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            decode(&fs::read_to_string(&path)?)
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened preferences at {}", path.display());

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current values to disk
    pub fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(&self.values)?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

fn decode(raw: &str) -> BTreeMap<String, String> {
    if raw.trim().is_empty() {
        return BTreeMap::new();
    }

    let object: Map<String, Value> = match serde_json::from_str(raw) {
        Ok(object) => object,
        Err(err) => {
            tracing::warn!(%err, "discarding unreadable preferences file");
            return BTreeMap::new();
        }
    };

    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(value) => Some((key, value)),
            other => {
                tracing::warn!(key = %key, value = %other, "dropping non-string preference");
                None
            }
        })
        .collect()
}

impl PreferencesStore for JsonFilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}
