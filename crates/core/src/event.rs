//! Events queued by the round engine for the presentation layer.

use serde::Serialize;

use crate::types::{RoundOutcome, RoundState, TileVisual};

/// A state change the presentation layer should render
///
/// The engine queues these while it processes a tick or a selection; the
/// owner drains them afterwards with
/// [`RoundEngine::drain_events`](crate::round::RoundEngine::drain_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RoundEvent {
    /// Every slot is unselected, hidden and disabled again
    #[serde(rename_all = "camelCase")]
    BoardReset { size: usize },
    #[serde(rename_all = "camelCase")]
    TileVisualChanged { index: usize, visual: TileVisual },
    #[serde(rename_all = "camelCase")]
    TilesEnabledChanged { enabled: bool },
    /// Entered a new state, or a countdown ticked (`remaining_ms` is set for timed phases)
    #[serde(rename_all = "camelCase")]
    PhaseChanged {
        phase: RoundState,
        remaining_ms: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    RoundEnded { outcome: RoundOutcome },
}
