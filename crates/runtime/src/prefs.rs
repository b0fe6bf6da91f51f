//! Preferences store chosen at runtime.

use crate::core::{MemoryPreferences, PreferencesStore, StoreError};
use crate::file_prefs::JsonFilePreferences;

#[derive(Debug, Clone)]
pub enum RuntimePreferences {
    Memory(MemoryPreferences),
    File(JsonFilePreferences),
}

impl PreferencesStore for RuntimePreferences {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::File(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.set(key, value),
            Self::File(store) => store.set(key, value),
        }
    }
}
