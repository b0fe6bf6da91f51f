//! Scoring module - session score and tier progression
//!
//! A completed round is worth a fixed, tier-dependent amount. After
//! `rounds_per_tier` successful Easy rounds the session escalates to Hard and
//! the round counter starts over; Hard is final.

use crate::types::{Tier, ROUNDS_PER_TIER};

/// Points for a completed round in `tier`
pub fn score_increment(tier: Tier) -> u32 {
    tier.score_increment()
}

/// Round counter and tier after a successful round
///
/// Pure and deterministic:
/// - Easy at round `rounds_per_tier` (or beyond) → `(1, Hard)`
/// - otherwise → `(current_round + 1, tier)`
pub fn next_round(current_round: u32, tier: Tier, rounds_per_tier: u32) -> (u32, Tier) {
    match tier {
        Tier::Easy if current_round >= rounds_per_tier => (1, Tier::Hard),
        _ => (current_round.saturating_add(1), tier),
    }
}

/// Session score and progression state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    round: u32,
    tier: Tier,
    rounds_per_tier: u32,
}

impl ScoreTracker {
    pub fn new(tier: Tier) -> Self {
        Self::with_rounds_per_tier(tier, ROUNDS_PER_TIER)
    }

    pub fn with_rounds_per_tier(tier: Tier, rounds_per_tier: u32) -> Self {
        Self {
            score: 0,
            round: 1,
            tier,
            rounds_per_tier,
        }
    }

    /// Back to round 1 with no score, starting in `tier`
    pub fn reset(&mut self, tier: Tier) {
        self.score = 0;
        self.round = 1;
        self.tier = tier;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn rounds_per_tier(&self) -> u32 {
        self.rounds_per_tier
    }

    /// Add the increment for `tier` and return the new score
    pub fn record_success(&mut self, tier: Tier) -> u32 {
        self.score = self.score.saturating_add(score_increment(tier));
        self.score
    }

    /// Move to the next round, escalating the tier when due
    pub fn advance(&mut self) -> (u32, Tier) {
        let (round, tier) = next_round(self.round, self.tier, self.rounds_per_tier);
        self.round = round;
        self.tier = tier;
        (round, tier)
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new(Tier::Easy)
    }
}
