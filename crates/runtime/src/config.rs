//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::core::{MemoryPreferences, StoreError};
use crate::engine::SessionSettings;
use crate::file_prefs::JsonFilePreferences;
use crate::prefs::RuntimePreferences;
use crate::types::GRID_SIZE;

pub const DEFAULT_PUMP_MS: u64 = 50;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Preferences file; `None` keeps preferences in memory only.
    pub prefs_path: Option<PathBuf>,
    pub board_size: usize,
    pub seed: u32,
    /// How often the driver feeds elapsed time into the session.
    pub pump_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            prefs_path: None,
            board_size: GRID_SIZE,
            seed: wall_clock_seed(),
            pump_ms: DEFAULT_PUMP_MS,
        }
    }
}

impl RuntimeConfig {
    /// Load from environment variables
    ///
    /// - `TILE_RECALL_PREFS_PATH`: preferences file (default: in-memory)
    /// - `TILE_RECALL_BOARD_SIZE`: tile count (default: 36)
    /// - `TILE_RECALL_SEED`: RNG seed (default: wall-clock millis)
    /// - `TILE_RECALL_PUMP_MS`: driver pump interval (default: 50)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let prefs_path = lookup("TILE_RECALL_PREFS_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) })
            .map(PathBuf::from);

        let board_size = lookup("TILE_RECALL_BOARD_SIZE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(GRID_SIZE);

        let seed = lookup("TILE_RECALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(wall_clock_seed);

        let pump_ms = lookup("TILE_RECALL_PUMP_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_PUMP_MS);

        Self {
            prefs_path,
            board_size,
            seed,
            pump_ms,
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            board_size: self.board_size,
            seed: self.seed,
            ..SessionSettings::default()
        }
    }

    pub fn pump_interval(&self) -> Duration {
        Duration::from_millis(self.pump_ms.max(1))
    }

    /// Open the configured preferences store
    pub fn open_preferences(&self) -> Result<RuntimePreferences, StoreError> {
        match &self.prefs_path {
            Some(path) => Ok(RuntimePreferences::File(JsonFilePreferences::open(path)?)),
            None => Ok(RuntimePreferences::Memory(MemoryPreferences::new())),
        }
    }
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{load_player_name, load_tier};
    use crate::types::Tier;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RuntimeConfig::from_lookup(lookup(&[]));
        assert_eq!(config.prefs_path, None);
        assert_eq!(config.board_size, 36);
        assert_eq!(config.pump_ms, DEFAULT_PUMP_MS);
    }

    #[test]
    fn test_reads_values() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("TILE_RECALL_PREFS_PATH", " /tmp/prefs.json "),
            ("TILE_RECALL_BOARD_SIZE", "25"),
            ("TILE_RECALL_SEED", "42"),
            ("TILE_RECALL_PUMP_MS", "10"),
        ]));
        assert_eq!(config.prefs_path, Some(PathBuf::from("/tmp/prefs.json")));
        assert_eq!(config.board_size, 25);
        assert_eq!(config.seed, 42);
        assert_eq!(config.pump_interval(), Duration::from_millis(10));

        let settings = config.session_settings();
        assert_eq!(settings.board_size, 25);
        assert_eq!(settings.seed, 42);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("TILE_RECALL_PREFS_PATH", "   "),
            ("TILE_RECALL_BOARD_SIZE", "lots"),
            ("TILE_RECALL_PUMP_MS", "0"),
        ]));
        assert_eq!(config.prefs_path, None);
        assert_eq!(config.board_size, 36);
        assert_eq!(config.pump_ms, DEFAULT_PUMP_MS);
    }

    #[test]
    fn test_open_preferences_survives_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"difficulty":"hard","player_name":"Ada","volume":7}"#).unwrap();

        let config = RuntimeConfig {
            prefs_path: Some(path),
            ..RuntimeConfig::default()
        };
        let prefs = config.open_preferences().unwrap();
        assert_eq!(load_tier(&prefs), Tier::Hard);
        assert_eq!(load_player_name(&prefs).as_deref(), Some("Ada"));
    }

    #[test]
    fn test_from_env_does_not_panic() {
        let _config = RuntimeConfig::from_env();
    }
}
