//! Serializable view of the round for presentation and observers.

use serde::Serialize;

use crate::types::{RoundOutcome, RoundState, TileVisual};

/// Point-in-time copy of the round engine's visible state
///
/// Target indices are deliberately absent: the tile visuals already show
/// them while they are supposed to be visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub round_id: u32,
    pub state: RoundState,
    pub enabled: bool,
    pub tiles: Vec<TileVisual>,
    pub tiles_to_remember: usize,
    pub correct_selections: usize,
    pub remaining_ms: Option<u32>,
    pub outcome: Option<RoundOutcome>,
}
