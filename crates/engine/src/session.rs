//! Session controller - composition root
//!
//! Wires the round engine, score tracker and high-score ledger together and
//! is the only thing the presentation layer talks to. It owns:
//!
//! - the injected preferences store (difficulty, player name, high scores)
//! - the presentation callbacks
//! - the inter-round delay, a cancellable deferred clock
//!
//! All mutation happens from [`SessionController::tick`] and
//! [`SessionController::on_tile_selected`] on the caller's context.

use serde::Serialize;

use crate::core::{
    load_player_name, load_tier, Clock, GameError, HighScoreLedger, PreferencesStore,
    RoundEngine, RoundEvent, RoundSnapshot, ScoreEntry, ScoreTracker,
};
use crate::settings::SessionSettings;
use crate::surface::Presentation;
use crate::types::{RoundOutcome, RoundState, SelectionOutcome, Tier, PREF_DIFFICULTY};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    NotStarted,
    /// A round is memorizing or awaiting selection
    Playing,
    /// A round succeeded; the next one starts after the delay
    BetweenRounds,
    /// The game ended; a summary is available
    Finished,
    /// The player left the session
    Exited,
}

/// Live per-session counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_round: u32,
    pub score: u32,
    pub tier: Tier,
    pub correct_selections: usize,
    pub round_state: RoundState,
}

/// Terminal report shown when the game ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub final_score: u32,
    pub outcome: RoundOutcome,
    pub tier: Tier,
    pub player_name: Option<String>,
    /// Whether the score made it into the ledger store
    pub recorded: bool,
    pub high_scores: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub session: SessionState,
    pub round: RoundSnapshot,
    pub summary: Option<SessionSummary>,
}

pub struct SessionController<P, V> {
    prefs: P,
    view: V,
    settings: SessionSettings,
    engine: RoundEngine,
    tracker: ScoreTracker,
    ledger: HighScoreLedger,
    status: SessionStatus,
    /// Deferred start of the next round (cancelled if the session ends first).
    next_round: Option<Clock>,
    summary: Option<SessionSummary>,
}

impl<P: PreferencesStore, V: Presentation> SessionController<P, V> {
    /// Build a controller; fails if the settings cannot host a round
    pub fn new(prefs: P, view: V, settings: SessionSettings) -> Result<Self, GameError> {
        settings.validate()?;
        let engine = RoundEngine::new(settings.board_size, settings.seed)?;
        let ledger = HighScoreLedger::load(&prefs);

        Ok(Self {
            prefs,
            view,
            settings,
            engine,
            tracker: ScoreTracker::with_rounds_per_tier(Tier::Easy, settings.rounds_per_tier),
            ledger,
            status: SessionStatus::NotStarted,
            next_round: None,
            summary: None,
        })
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            current_round: self.tracker.round(),
            score: self.tracker.score(),
            tier: self.tracker.tier(),
            correct_selections: self.engine.correct_selections(),
            round_state: self.engine.state(),
        }
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    pub fn high_scores(&self) -> &[ScoreEntry] {
        self.ledger.entries()
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut P {
        &mut self.prefs
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Whether the inter-round delay is pending
    pub fn next_round_pending(&self) -> bool {
        self.next_round.as_ref().is_some_and(Clock::is_running)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            session: self.state(),
            round: self.engine.snapshot(),
            summary: self.summary.clone(),
        }
    }

    /// Start a brand-new session
    ///
    /// `difficulty` is stored as the new preference when given; otherwise the
    /// stored preference is used (Easy when missing).
    pub fn start_session(&mut self, difficulty: Option<Tier>) -> Result<(), GameError> {
        let tier = match difficulty {
            Some(tier) => {
                if let Err(err) = self.prefs.set(PREF_DIFFICULTY, tier.as_str()) {
                    tracing::warn!(%err, "could not store difficulty preference");
                }
                tier
            }
            None => load_tier(&self.prefs),
        };
        self.ledger = HighScoreLedger::load(&self.prefs);

        tracing::info!(tier = tier.as_str(), "session started");
        self.begin_game(tier)
    }

    /// Play again: score and round reset, difficulty re-read from preferences
    pub fn restart(&mut self) -> Result<(), GameError> {
        let tier = load_tier(&self.prefs);
        tracing::info!(tier = tier.as_str(), "session restarted");
        self.begin_game(tier)
    }

    /// Leave the session. Pending clocks are cancelled; the ledger is untouched.
    pub fn exit(&mut self) {
        self.cancel_next_round();
        self.engine.halt();
        self.pump();
        self.status = SessionStatus::Exited;
        tracing::info!(score = self.tracker.score(), "session exited");
    }

    /// Inbound tile selection from the presentation layer
    ///
    /// Ignored (returns `None`) unless a round is awaiting selection.
    pub fn on_tile_selected(&mut self, index: usize) -> Option<SelectionOutcome> {
        if self.status != SessionStatus::Playing {
            return None;
        }
        let outcome = self.engine.on_tile_selected(index);
        self.pump();
        outcome
    }

    /// Advance time: the active phase clock, or the inter-round delay
    pub fn tick(&mut self, elapsed_ms: u32) {
        match self.status {
            SessionStatus::Playing => {
                self.engine.tick(elapsed_ms);
                self.pump();
            }
            SessionStatus::BetweenRounds => {
                let due = self
                    .next_round
                    .as_mut()
                    .is_some_and(|delay| delay.advance(elapsed_ms, |_| {}, || {}));
                if due {
                    self.next_round = None;
                    if let Err(err) = self.begin_round() {
                        tracing::error!(%err, "could not start next round");
                        self.exit();
                    }
                }
            }
            SessionStatus::NotStarted | SessionStatus::Finished | SessionStatus::Exited => {}
        }
    }

    fn begin_game(&mut self, tier: Tier) -> Result<(), GameError> {
        self.cancel_next_round();
        self.summary = None;
        self.tracker.reset(tier);
        self.engine.reset();
        self.pump();
        self.view.on_score_changed(self.tracker.score());
        self.begin_round()
    }

    fn begin_round(&mut self) -> Result<(), GameError> {
        let config = self.settings.round_config(self.tracker.tier());
        self.engine.begin_round(config)?;
        self.status = SessionStatus::Playing;
        self.pump();
        Ok(())
    }

    /// Forward queued engine events to the presentation layer
    fn pump(&mut self) {
        while let Some(event) = self.engine.take_event() {
            match event {
                RoundEvent::BoardReset { size } => self.view.on_board_reset(size),
                RoundEvent::TileVisualChanged { index, visual } => {
                    self.view.on_tile_visual_changed(index, visual)
                }
                RoundEvent::TilesEnabledChanged { enabled } => {
                    self.view.on_tiles_enabled_changed(enabled)
                }
                RoundEvent::PhaseChanged {
                    phase,
                    remaining_ms,
                } => self.view.on_phase_changed(phase, remaining_ms),
                RoundEvent::RoundEnded { outcome } => self.on_round_ended(outcome),
            }
        }
    }

    fn on_round_ended(&mut self, outcome: RoundOutcome) {
        if outcome.ends_session() {
            self.finish_session(outcome);
            return;
        }

        let score = self.tracker.record_success(self.tracker.tier());
        self.view.on_score_changed(score);
        self.view.on_round_ended(outcome, None);

        let (round, tier) = self.tracker.advance();
        tracing::debug!(round, tier = tier.as_str(), score, "next round scheduled");
        self.next_round = Some(Clock::start(self.settings.round_delay_ms, 0));
        self.status = SessionStatus::BetweenRounds;
    }

    fn finish_session(&mut self, outcome: RoundOutcome) {
        let final_score = self.tracker.score();
        let player_name = load_player_name(&self.prefs);
        self.ledger = HighScoreLedger::load(&self.prefs);

        let recorded = match player_name.as_deref() {
            Some(name) => match self.ledger.record(name, final_score, &mut self.prefs) {
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!(%err, "could not persist high score");
                    false
                }
            },
            None => {
                tracing::debug!("no player name set, score not recorded");
                false
            }
        };

        self.summary = Some(SessionSummary {
            final_score,
            outcome,
            tier: self.tracker.tier(),
            player_name,
            recorded,
            high_scores: self.ledger.entries().to_vec(),
        });
        self.status = SessionStatus::Finished;

        tracing::info!(final_score, ?outcome, "game over");
        self.view.on_round_ended(outcome, Some(final_score));
    }

    fn cancel_next_round(&mut self) {
        if let Some(mut delay) = self.next_round.take() {
            delay.cancel();
        }
    }
}
