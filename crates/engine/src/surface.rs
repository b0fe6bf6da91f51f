//! Presentation-facing interfaces
//!
//! The session controller never draws anything itself. It reports board and
//! session changes through these two traits; anything implementing both is a
//! [`Presentation`].

use serde::{Deserialize, Serialize};

use crate::types::{RoundOutcome, RoundState, TileVisual};

/// Tile grid rendering callbacks
pub trait TileSurface {
    /// Every tile is unselected, hidden and disabled
    fn on_board_reset(&mut self, size: usize);

    fn on_tile_visual_changed(&mut self, index: usize, visual: TileVisual);

    fn on_tiles_enabled_changed(&mut self, enabled: bool);
}

/// Session progress callbacks
pub trait SessionEvents {
    /// A new phase started, or the countdown of the current one ticked
    fn on_phase_changed(&mut self, phase: RoundState, remaining_ms: Option<u32>);

    fn on_score_changed(&mut self, score: u32);

    /// `final_score` is set only when the round ended the session
    fn on_round_ended(&mut self, outcome: RoundOutcome, final_score: Option<u32>);
}

pub trait Presentation: TileSurface + SessionEvents {}

impl<T: TileSurface + SessionEvents> Presentation for T {}

/// One presentation callback, as data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionUpdate {
    #[serde(rename_all = "camelCase")]
    BoardReset { size: usize },
    #[serde(rename_all = "camelCase")]
    TileVisual { index: usize, visual: TileVisual },
    #[serde(rename_all = "camelCase")]
    TilesEnabled { enabled: bool },
    #[serde(rename_all = "camelCase")]
    Phase {
        phase: RoundState,
        remaining_ms: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    Score { score: u32 },
    #[serde(rename_all = "camelCase")]
    RoundEnded {
        outcome: RoundOutcome,
        final_score: Option<u32>,
    },
}

/// Forward every callback as a [`SessionUpdate`] to a sink closure
///
/// Blanket adapter so a channel sender (or a `Vec`) can act as the
/// presentation layer.
pub struct UpdateSink<F>(pub F);

impl<F: FnMut(SessionUpdate)> TileSurface for UpdateSink<F> {
    fn on_board_reset(&mut self, size: usize) {
        (self.0)(SessionUpdate::BoardReset { size });
    }

    fn on_tile_visual_changed(&mut self, index: usize, visual: TileVisual) {
        (self.0)(SessionUpdate::TileVisual { index, visual });
    }

    fn on_tiles_enabled_changed(&mut self, enabled: bool) {
        (self.0)(SessionUpdate::TilesEnabled { enabled });
    }
}

impl<F: FnMut(SessionUpdate)> SessionEvents for UpdateSink<F> {
    fn on_phase_changed(&mut self, phase: RoundState, remaining_ms: Option<u32>) {
        (self.0)(SessionUpdate::Phase {
            phase,
            remaining_ms,
        });
    }

    fn on_score_changed(&mut self, score: u32) {
        (self.0)(SessionUpdate::Score { score });
    }

    fn on_round_ended(&mut self, outcome: RoundOutcome, final_score: Option<u32>) {
        (self.0)(SessionUpdate::RoundEnded {
            outcome,
            final_score,
        });
    }
}

/// Presentation that keeps every update (headless runs and tests)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingPresentation {
    pub updates: Vec<SessionUpdate>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything recorded so far
    pub fn take(&mut self) -> Vec<SessionUpdate> {
        std::mem::take(&mut self.updates)
    }
}

impl TileSurface for RecordingPresentation {
    fn on_board_reset(&mut self, size: usize) {
        self.updates.push(SessionUpdate::BoardReset { size });
    }

    fn on_tile_visual_changed(&mut self, index: usize, visual: TileVisual) {
        self.updates.push(SessionUpdate::TileVisual { index, visual });
    }

    fn on_tiles_enabled_changed(&mut self, enabled: bool) {
        self.updates.push(SessionUpdate::TilesEnabled { enabled });
    }
}

impl SessionEvents for RecordingPresentation {
    fn on_phase_changed(&mut self, phase: RoundState, remaining_ms: Option<u32>) {
        self.updates.push(SessionUpdate::Phase {
            phase,
            remaining_ms,
        });
    }

    fn on_score_changed(&mut self, score: u32) {
        self.updates.push(SessionUpdate::Score { score });
    }

    fn on_round_ended(&mut self, outcome: RoundOutcome, final_score: Option<u32>) {
        self.updates.push(SessionUpdate::RoundEnded {
            outcome,
            final_score,
        });
    }
}
