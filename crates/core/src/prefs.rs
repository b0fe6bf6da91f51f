//! Preferences store - injected key/value capability
//!
//! The game reads `difficulty` and `player_name` at session start and writes
//! `high_scores` at game over. Values are plain strings; missing or
//! unparseable values fall back to defaults instead of failing.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::types::{Tier, PREF_DIFFICULTY, PREF_PLAYER_NAME};

/// String-valued key/value store
pub trait PreferencesStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: PreferencesStore + ?Sized> PreferencesStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory preferences, lost when dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for seeding a store
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferencesStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stored difficulty, defaulting to Easy when missing or unparseable
pub fn load_tier(store: &impl PreferencesStore) -> Tier {
    match store.get(PREF_DIFFICULTY) {
        None => Tier::Easy,
        Some(raw) => Tier::from_str(&raw).unwrap_or_else(|| {
            tracing::warn!(value = %raw, "unrecognized difficulty preference, using easy");
            Tier::Easy
        }),
    }
}

/// Stored player name, `None` when missing or blank
pub fn load_player_name(store: &impl PreferencesStore) -> Option<String> {
    store
        .get(PREF_PLAYER_NAME)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}
