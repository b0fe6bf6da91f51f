//! Board module - the tile grid
//!
//! The board is a flat collection of tile slots (36 by default). Each slot
//! carries its selection state, whether it is selectable, and a purely
//! presentational "shown" flag used while the targets are being memorized
//! and when missed targets are revealed at game over.
//!
//! Storage is a fixed-capacity array so resets never allocate.

use arrayvec::ArrayVec;

use crate::error::{ConfigError, GameError};
use crate::rng::TargetSet;
use crate::types::{SelectionOutcome, TileState, TileVisual, MAX_GRID_SIZE};

/// A single tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSlot {
    pub index: usize,
    pub state: TileState,
    pub enabled: bool,
    pub shown: bool,
}

impl TileSlot {
    fn new(index: usize) -> Self {
        Self {
            index,
            state: TileState::Unselected,
            enabled: false,
            shown: false,
        }
    }

    /// How the slot should be drawn
    pub fn visual(&self) -> TileVisual {
        match self.state {
            TileState::Correct => TileVisual::Correct,
            TileState::Wrong => TileVisual::Wrong,
            TileState::Unselected if self.shown => TileVisual::Shown,
            TileState::Unselected => TileVisual::Hidden,
        }
    }
}

/// The tile grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileBoard {
    slots: ArrayVec<TileSlot, MAX_GRID_SIZE>,
}

impl TileBoard {
    /// Create a board of `size` slots, all unselected and disabled
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        let mut board = Self {
            slots: ArrayVec::new(),
        };
        board.reset(size)?;
        Ok(board)
    }

    /// Reallocate `size` slots, all unselected, hidden and disabled
    pub fn reset(&mut self, size: usize) -> Result<(), ConfigError> {
        if size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if size > MAX_GRID_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size,
                max: MAX_GRID_SIZE,
            });
        }

        self.slots.clear();
        self.slots.extend((0..size).map(TileSlot::new));
        Ok(())
    }

    /// Return every slot to unselected, hidden and disabled (size unchanged)
    pub fn clear_marks(&mut self) {
        for slot in &mut self.slots {
            *slot = TileSlot::new(slot.index);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&TileSlot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[TileSlot] {
        &self.slots
    }

    /// Mark the given slots as shown. Out-of-range indices are skipped.
    pub fn highlight(&mut self, indices: &[usize]) {
        for &index in indices {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.shown = true;
            }
        }
    }

    /// Clear the shown flag on the given slots. Out-of-range indices are skipped.
    pub fn hide(&mut self, indices: &[usize]) {
        for &index in indices {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.shown = false;
            }
        }
    }

    /// Toggle selectability of every slot
    pub fn set_enabled(&mut self, enabled: bool) {
        for slot in &mut self.slots {
            slot.enabled = enabled;
        }
    }

    /// Whether the board currently accepts selections
    pub fn is_enabled(&self) -> bool {
        self.slots.first().is_some_and(|slot| slot.enabled)
    }

    /// Select a tile and mark it against the round's targets
    ///
    /// - already `Correct` → `AlreadySelected`, nothing changes
    /// - a target not yet correct → `MarkedCorrect`
    /// - anything else → `MarkedWrong`
    ///
    /// Disabled or out-of-range tiles fail with `InvalidSelection`.
    pub fn select(
        &mut self,
        index: usize,
        targets: &TargetSet,
    ) -> Result<SelectionOutcome, GameError> {
        let slot = self
            .slots
            .get_mut(index)
            .filter(|slot| slot.enabled)
            .ok_or(GameError::InvalidSelection { index })?;

        if slot.state == TileState::Correct {
            return Ok(SelectionOutcome::AlreadySelected);
        }

        if targets.contains(index) {
            slot.state = TileState::Correct;
            Ok(SelectionOutcome::MarkedCorrect)
        } else {
            slot.state = TileState::Wrong;
            Ok(SelectionOutcome::MarkedWrong)
        }
    }

    /// Number of slots currently marked correct
    pub fn correct_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.state == TileState::Correct)
            .count()
    }
}
