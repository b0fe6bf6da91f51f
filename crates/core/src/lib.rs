//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the tile memory game: the board, the
//! countdown clock, target selection, the round state machine, scoring and
//! the high-score ledger. It has no dependency on rendering, input devices or
//! real time, which makes it:
//!
//! - **Deterministic**: the same seed draws the same target tiles
//! - **Testable**: time is fed in explicitly through `tick(elapsed_ms)`
//! - **Portable**: drive it from a terminal, a GUI, or a tokio task
//!
//! # Module Structure
//!
//! - [`board`]: tile slots with selection state and enabled flags
//! - [`clock`]: cancellable countdown with tick and finish callbacks
//! - [`rng`]: seeded LCG and uniform target-set draws
//! - [`round`]: the per-round state machine
//! - [`scoring`]: score increments and tier progression
//! - [`ledger`]: ranked top-3 high scores
//! - [`prefs`]: the injected key/value preferences store
//!
//! # Game Rules
//!
//! - A round highlights `tiles_to_remember` random tiles for 3 seconds
//! - The player then has 5 seconds to reselect them, in any order
//! - A wrong tile or the deadline ends the game
//! - A completed round scores 10 (Easy) or 20 (Hard)
//! - Three successful Easy rounds escalate the session to Hard
//!
//! # Example
//!
//! ```
//! use tile_recall_core::RoundEngine;
//! use tile_recall_types::{RoundConfig, RoundOutcome, RoundState, Tier};
//!
//! let mut engine = RoundEngine::new(36, 12345).unwrap();
//! engine.begin_round(RoundConfig::for_tier(Tier::Easy)).unwrap();
//! assert_eq!(engine.state(), RoundState::Memorizing);
//!
//! // Memorize phase runs out, selection opens.
//! engine.tick(3000);
//! assert_eq!(engine.state(), RoundState::AwaitingSelection);
//!
//! let targets: Vec<usize> = engine.targets().iter().collect();
//! for index in targets {
//!     engine.on_tile_selected(index);
//! }
//! assert_eq!(engine.outcome(), Some(RoundOutcome::Success));
//! ```

pub mod board;
pub mod clock;
pub mod error;
pub mod event;
pub mod ledger;
pub mod prefs;
pub mod rng;
pub mod round;
pub mod scoring;
pub mod snapshot;

pub use tile_recall_types as types;

// Re-export commonly used types for convenience
pub use board::{TileBoard, TileSlot};
pub use clock::{CancelHandle, Clock, ClockStatus};
pub use error::{ConfigError, GameError, Result, StoreError};
pub use event::RoundEvent;
pub use ledger::{HighScoreLedger, ScoreEntry};
pub use prefs::{load_player_name, load_tier, MemoryPreferences, PreferencesStore};
pub use rng::{SimpleRng, TargetSet};
pub use round::RoundEngine;
pub use scoring::{next_round, score_increment, ScoreTracker};
pub use snapshot::RoundSnapshot;
