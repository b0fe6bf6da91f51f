//! Round engine - the per-round state machine
//!
//! ```text
//! begin_round ──> Memorizing ──(clock)──> AwaitingSelection ──(all targets)──> RoundComplete
//!                                              │
//!                                              ├──(wrong tile)──> GameOver(WrongTile)
//!                                              └──(clock)───────> GameOver(Timeout)
//! ```
//!
//! The engine owns the board, the RNG and the phase clock. Exactly one clock
//! exists at a time and it is always cancelled before the engine leaves the
//! phase it belongs to, so a stale deadline can never fire into a later state.
//!
//! Time only moves through [`RoundEngine::tick`]. Selections only count while
//! the state is `AwaitingSelection`; everything else is ignored.

use std::collections::VecDeque;

use crate::board::TileBoard;
use crate::clock::Clock;
use crate::error::{ConfigError, GameError};
use crate::event::RoundEvent;
use crate::rng::{SimpleRng, TargetSet};
use crate::snapshot::RoundSnapshot;
use crate::types::{RoundConfig, RoundOutcome, RoundState, SelectionOutcome, TileVisual};

#[derive(Debug)]
pub struct RoundEngine {
    board: TileBoard,
    rng: SimpleRng,
    state: RoundState,
    config: RoundConfig,
    targets: TargetSet,
    correct_selections: usize,
    /// Clock of the active timed phase (`Memorizing` or `AwaitingSelection`).
    clock: Option<Clock>,
    outcome: Option<RoundOutcome>,
    /// Monotonic id of the current round (increments on every `begin_round`).
    round_id: u32,
    events: VecDeque<RoundEvent>,
}

impl RoundEngine {
    /// Create an idle engine over a fresh board of `board_size` tiles
    pub fn new(board_size: usize, seed: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            board: TileBoard::new(board_size)?,
            rng: SimpleRng::new(seed),
            state: RoundState::Idle,
            config: RoundConfig::default(),
            targets: TargetSet::default(),
            correct_selections: 0,
            clock: None,
            outcome: None,
            round_id: 0,
            events: VecDeque::new(),
        })
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn board(&self) -> &TileBoard {
        &self.board
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn correct_selections(&self) -> usize {
        self.correct_selections
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    /// Time left in the active phase, if one is running
    pub fn remaining_ms(&self) -> Option<u32> {
        self.clock
            .as_ref()
            .filter(|clock| clock.is_running())
            .map(Clock::remaining_ms)
    }

    /// Take the oldest queued presentation event
    pub fn take_event(&mut self) -> Option<RoundEvent> {
        self.events.pop_front()
    }

    /// Drain queued presentation events, oldest first
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, RoundEvent> {
        self.events.drain(..)
    }

    fn announce_board(&mut self) {
        self.events.push_back(RoundEvent::BoardReset {
            size: self.board.len(),
        });
    }

    /// Back to `Idle`: cancel the clock, clear every mark, forget the targets
    pub fn reset(&mut self) {
        self.cancel_clock();
        self.board.clear_marks();
        self.targets = TargetSet::default();
        self.correct_selections = 0;
        self.outcome = None;
        self.state = RoundState::Idle;
        self.announce_board();
    }

    /// Stop the round where it stands: cancel the clock and lock the board
    ///
    /// State, targets and marks are left as they are.
    pub fn halt(&mut self) {
        self.cancel_clock();
        self.set_enabled(false);
    }

    fn cancel_clock(&mut self) {
        if let Some(mut clock) = self.clock.take() {
            clock.cancel();
        }
    }

    /// Start a round: draw targets, show them, start the memorize clock
    ///
    /// On `ConfigError` nothing changes.
    pub fn begin_round(&mut self, config: RoundConfig) -> Result<(), ConfigError> {
        let targets = TargetSet::draw(&mut self.rng, config.tiles_to_remember, self.board.len())?;

        self.cancel_clock();
        self.clear_display();

        self.config = config;
        self.targets = targets;
        self.correct_selections = 0;
        self.outcome = None;
        self.round_id = self.round_id.wrapping_add(1);

        self.board.highlight(self.targets.as_slice());
        for index in self.targets.iter() {
            self.events.push_back(RoundEvent::TileVisualChanged {
                index,
                visual: TileVisual::Shown,
            });
        }

        tracing::debug!(
            round_id = self.round_id,
            tiles = config.tiles_to_remember,
            "round started"
        );
        self.enter_phase(RoundState::Memorizing, config.memorize_ms);
        Ok(())
    }

    /// Handle a tile selection from the player
    ///
    /// Returns `None` when the selection was ignored (wrong phase, disabled or
    /// out-of-range tile).
    pub fn on_tile_selected(&mut self, index: usize) -> Option<SelectionOutcome> {
        if self.state != RoundState::AwaitingSelection {
            tracing::trace!(index, state = self.state.as_str(), "selection ignored");
            return None;
        }

        self.state = RoundState::Evaluating;
        let outcome = match self.board.select(index, &self.targets) {
            Ok(outcome) => outcome,
            Err(err @ GameError::InvalidSelection { .. }) => {
                tracing::trace!(%err, "selection ignored");
                self.state = RoundState::AwaitingSelection;
                return None;
            }
            Err(err) => {
                tracing::warn!(%err, "unexpected selection failure");
                self.state = RoundState::AwaitingSelection;
                return None;
            }
        };

        match outcome {
            SelectionOutcome::AlreadySelected => {
                self.state = RoundState::AwaitingSelection;
            }
            SelectionOutcome::MarkedCorrect => {
                self.correct_selections += 1;
                self.push_visual(index, TileVisual::Correct);

                if self.correct_selections == self.config.tiles_to_remember {
                    self.complete_round();
                } else {
                    self.state = RoundState::AwaitingSelection;
                }
            }
            SelectionOutcome::MarkedWrong => {
                self.push_visual(index, TileVisual::Wrong);
                self.finish_game(RoundOutcome::WrongTile);
            }
        }

        Some(outcome)
    }

    /// Advance the active phase clock by `elapsed_ms`
    pub fn tick(&mut self, elapsed_ms: u32) {
        let phase = self.state;
        let Some(clock) = self.clock.as_mut() else {
            return;
        };

        let events = &mut self.events;
        let finished = clock.advance(
            elapsed_ms,
            |remaining_ms| {
                events.push_back(RoundEvent::PhaseChanged {
                    phase,
                    remaining_ms: Some(remaining_ms),
                })
            },
            || {},
        );

        if !finished {
            return;
        }
        self.clock = None;

        match phase {
            RoundState::Memorizing => self.enter_selection(),
            RoundState::AwaitingSelection => self.finish_game(RoundOutcome::Timeout),
            _ => {}
        }
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.round_id = self.round_id;
        out.state = self.state;
        out.enabled = self.board.is_enabled();
        out.tiles.clear();
        out.tiles.extend(self.board.slots().iter().map(|slot| slot.visual()));
        out.tiles_to_remember = self.config.tiles_to_remember;
        out.correct_selections = self.correct_selections;
        out.remaining_ms = self.remaining_ms();
        out.outcome = self.outcome;
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn enter_selection(&mut self) {
        self.board.hide(self.targets.as_slice());
        for index in self.targets.iter() {
            self.events.push_back(RoundEvent::TileVisualChanged {
                index,
                visual: TileVisual::Hidden,
            });
        }
        self.set_enabled(true);
        self.enter_phase(RoundState::AwaitingSelection, self.config.selection_ms);
    }

    fn enter_phase(&mut self, phase: RoundState, duration_ms: u32) {
        self.state = phase;
        self.clock = Some(Clock::start(duration_ms, self.config.tick_interval_ms));
        self.events.push_back(RoundEvent::PhaseChanged {
            phase,
            remaining_ms: Some(duration_ms),
        });
        tracing::debug!(
            round_id = self.round_id,
            phase = phase.as_str(),
            duration_ms,
            "phase entered"
        );
    }

    fn complete_round(&mut self) {
        self.cancel_clock();
        self.set_enabled(false);
        self.end_with(RoundState::RoundComplete, RoundOutcome::Success);
    }

    fn finish_game(&mut self, outcome: RoundOutcome) {
        self.cancel_clock();
        self.set_enabled(false);

        // Reveal every target the player did not find.
        for index in self.targets.iter() {
            let missed = self
                .board
                .slot(index)
                .is_some_and(|slot| slot.visual() == TileVisual::Hidden);
            if missed {
                self.board.highlight(&[index]);
                self.events.push_back(RoundEvent::TileVisualChanged {
                    index,
                    visual: TileVisual::Shown,
                });
            }
        }

        self.end_with(RoundState::GameOver, outcome);
    }

    fn end_with(&mut self, state: RoundState, outcome: RoundOutcome) {
        self.state = state;
        self.outcome = Some(outcome);
        self.events.push_back(RoundEvent::PhaseChanged {
            phase: state,
            remaining_ms: None,
        });
        self.events.push_back(RoundEvent::RoundEnded { outcome });
        tracing::debug!(
            round_id = self.round_id,
            ?outcome,
            correct = self.correct_selections,
            "round ended"
        );
    }

    /// Return the display to all-hidden and disabled, reporting only what changed
    fn clear_display(&mut self) {
        self.set_enabled(false);
        let changed: Vec<usize> = self
            .board
            .slots()
            .iter()
            .filter(|slot| slot.visual() != TileVisual::Hidden)
            .map(|slot| slot.index)
            .collect();
        self.board.clear_marks();
        for index in changed {
            self.push_visual(index, TileVisual::Hidden);
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        if self.board.is_enabled() != enabled {
            self.board.set_enabled(enabled);
            self.events.push_back(RoundEvent::TilesEnabledChanged { enabled });
        }
    }

    fn push_visual(&mut self, index: usize, visual: TileVisual) {
        self.events.push_back(RoundEvent::TileVisualChanged { index, visual });
    }
}
