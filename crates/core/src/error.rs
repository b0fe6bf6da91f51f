//! Error types raised by the game core.

use thiserror::Error;

/// Invalid board or round configuration.
///
/// Fatal for session start: nothing can be played with a board that cannot
/// hold the requested target set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one tile")]
    EmptyBoard,

    #[error("board size {size} exceeds the maximum of {max} tiles")]
    BoardTooLarge { size: usize, max: usize },

    #[error("a round needs at least one tile to remember")]
    NoTargets,

    #[error("cannot remember {tiles} tiles on a board of {board_size}")]
    TooManyTargets { tiles: usize, board_size: usize },
}

/// Errors surfaced by preferences store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by the round engine and session controller.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Selection on a disabled or out-of-range tile. Recovered locally.
    #[error("tile {index} cannot be selected")]
    InvalidSelection { index: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, GameError>;
