//! Session settings

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::types::{
    RoundConfig, Tier, CLOCK_TICK_MS, GRID_SIZE, MAX_GRID_SIZE, MEMORIZE_MS, ROUNDS_PER_TIER,
    ROUND_DELAY_MS, SELECTION_MS,
};

/// Everything a session needs that is not player input
///
/// Defaults match the classic game: 36 tiles, 3 s to memorize, 5 s to
/// select, 1 s between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSettings {
    pub board_size: usize,
    pub memorize_ms: u32,
    pub selection_ms: u32,
    pub tick_interval_ms: u32,
    pub round_delay_ms: u32,
    pub rounds_per_tier: u32,
    pub seed: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            board_size: GRID_SIZE,
            memorize_ms: MEMORIZE_MS,
            selection_ms: SELECTION_MS,
            tick_interval_ms: CLOCK_TICK_MS,
            round_delay_ms: ROUND_DELAY_MS,
            rounds_per_tier: ROUNDS_PER_TIER,
            seed: 1,
        }
    }
}

impl SessionSettings {
    /// Round parameters for `tier` under these settings
    pub fn round_config(&self, tier: Tier) -> RoundConfig {
        RoundConfig {
            tiles_to_remember: tier.tiles_to_remember(),
            memorize_ms: self.memorize_ms,
            selection_ms: self.selection_ms,
            tick_interval_ms: self.tick_interval_ms,
            rounds_per_tier: self.rounds_per_tier,
        }
    }

    /// Check that the board can host a round of every tier
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.board_size > MAX_GRID_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size: self.board_size,
                max: MAX_GRID_SIZE,
            });
        }
        for tier in [Tier::Easy, Tier::Hard] {
            let tiles = tier.tiles_to_remember();
            if tiles >= self.board_size {
                return Err(ConfigError::TooManyTargets {
                    tiles,
                    board_size: self.board_size,
                });
            }
        }
        Ok(())
    }
}
