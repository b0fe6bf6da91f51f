//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! Everything here is plain data, usable from the round engine, the session
//! controller, and any presentation layer that renders the board.
//!
//! # Board Dimensions
//!
//! - **Grid size**: 36 tiles (a 6x6 grid in the usual layout)
//! - **Maximum grid size**: 64 tiles (fixed-capacity storage bound)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MEMORIZE_MS` | 3000 | Time the target tiles stay highlighted |
//! | `SELECTION_MS` | 5000 | Time the player has to reselect them |
//! | `CLOCK_TICK_MS` | 1000 | Countdown tick granularity |
//! | `ROUND_DELAY_MS` | 1000 | Pause between a successful round and the next |
//!
//! # Tiers
//!
//! | Tier | Tiles | Score per round |
//! |------|-------|-----------------|
//! | Easy | 4 | 10 |
//! | Hard | 5 | 20 |
//!
//! After `ROUNDS_PER_TIER` successful Easy rounds the session escalates to Hard.
//!
//! # Examples
//!
//! ```
//! use tile_recall_types::{RoundConfig, Tier, GRID_SIZE};
//!
//! let tier = Tier::from_str("HARD").unwrap();
//! assert_eq!(tier, Tier::Hard);
//!
//! let config = RoundConfig::for_tier(tier);
//! assert_eq!(config.tiles_to_remember, 5);
//! assert!(config.tiles_to_remember < GRID_SIZE);
//! ```

use serde::{Deserialize, Serialize};

/// Number of tiles on the default board
pub const GRID_SIZE: usize = 36;

/// Upper bound on board size (fixed-capacity storage)
pub const MAX_GRID_SIZE: usize = 64;

/// Tiles to remember per round on Easy
pub const EASY_TILES: usize = 4;

/// Tiles to remember per round on Hard
pub const HARD_TILES: usize = 5;

/// Points awarded for a completed Easy round
pub const EASY_SCORE_INCREMENT: u32 = 10;

/// Points awarded for a completed Hard round
pub const HARD_SCORE_INCREMENT: u32 = 20;

/// How long the target tiles stay highlighted
pub const MEMORIZE_MS: u32 = 3000;

/// How long the player has to reselect the targets
pub const SELECTION_MS: u32 = 5000;

/// Countdown tick granularity for both phases
pub const CLOCK_TICK_MS: u32 = 1000;

/// Pause between a successful round and the next one
pub const ROUND_DELAY_MS: u32 = 1000;

/// Successful Easy rounds before escalating to Hard
pub const ROUNDS_PER_TIER: u32 = 3;

/// Number of entries kept in the high-score ledger
pub const LEDGER_CAPACITY: usize = 3;

/// Preference key holding `"easy"` or `"hard"`
pub const PREF_DIFFICULTY: &str = "difficulty";

/// Preference key holding the player's display name
pub const PREF_PLAYER_NAME: &str = "player_name";

/// Preference key holding the serialized high-score set
pub const PREF_HIGH_SCORES: &str = "high_scores";

/// Difficulty tier
///
/// Determines how many tiles are shown per round and how much a completed
/// round is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Easy,
    Hard,
}

impl Tier {
    /// Parse tier from string (case-insensitive, surrounding whitespace ignored)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_recall_types::Tier;
    ///
    /// assert_eq!(Tier::from_str("easy"), Some(Tier::Easy));
    /// assert_eq!(Tier::from_str("HARD"), Some(Tier::Hard));
    /// assert_eq!(Tier::from_str("medium"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Tier::Easy),
            "hard" => Some(Tier::Hard),
            _ => None,
        }
    }

    /// Lowercase string stored under the `difficulty` preference
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Hard => "hard",
        }
    }

    pub fn tiles_to_remember(&self) -> usize {
        match self {
            Tier::Easy => EASY_TILES,
            Tier::Hard => HARD_TILES,
        }
    }

    pub fn score_increment(&self) -> u32 {
        match self {
            Tier::Easy => EASY_SCORE_INCREMENT,
            Tier::Hard => HARD_SCORE_INCREMENT,
        }
    }
}

/// Selection state of a single tile slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileState {
    #[default]
    Unselected,
    Correct,
    Wrong,
}

/// What a tile should look like on screen
///
/// `Shown` is purely presentational: it marks a target tile during the
/// memorize phase and the targets the player missed once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileVisual {
    #[default]
    Hidden,
    Shown,
    Correct,
    Wrong,
}

/// Round state machine
///
/// ```text
/// Idle -> Memorizing -> AwaitingSelection -> (Evaluating) -> RoundComplete -> Memorizing ...
///                                          \-> GameOver
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundState {
    #[default]
    Idle,
    Memorizing,
    AwaitingSelection,
    Evaluating,
    RoundComplete,
    GameOver,
}

impl RoundState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundState::Idle => "idle",
            RoundState::Memorizing => "memorizing",
            RoundState::AwaitingSelection => "awaitingSelection",
            RoundState::Evaluating => "evaluating",
            RoundState::RoundComplete => "roundComplete",
            RoundState::GameOver => "gameOver",
        }
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundOutcome {
    /// Every target was reselected before the deadline
    Success,
    /// A non-target tile was selected
    WrongTile,
    /// The selection clock ran out
    Timeout,
}

impl RoundOutcome {
    /// Whether this outcome ends the session
    pub fn ends_session(&self) -> bool {
        !matches!(self, RoundOutcome::Success)
    }
}

/// Result of selecting a tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionOutcome {
    /// The tile was already marked correct; nothing changes
    AlreadySelected,
    MarkedCorrect,
    MarkedWrong,
}

/// Per-round parameters
///
/// Immutable for a given tier. Build one with [`RoundConfig::for_tier`] or
/// construct it directly for custom timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundConfig {
    pub tiles_to_remember: usize,
    pub memorize_ms: u32,
    pub selection_ms: u32,
    pub tick_interval_ms: u32,
    pub rounds_per_tier: u32,
}

impl RoundConfig {
    /// Default round parameters for a tier
    pub fn for_tier(tier: Tier) -> Self {
        Self {
            tiles_to_remember: tier.tiles_to_remember(),
            memorize_ms: MEMORIZE_MS,
            selection_ms: SELECTION_MS,
            tick_interval_ms: CLOCK_TICK_MS,
            rounds_per_tier: ROUNDS_PER_TIER,
        }
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::for_tier(Tier::Easy)
    }
}
