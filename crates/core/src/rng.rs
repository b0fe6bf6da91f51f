//! RNG module - target tile selection
//!
//! Draws the set of tiles the player has to remember each round: unique
//! indices taken uniformly without replacement from `[0, board_size)`.
//!
//! Uses a simple LCG so that a session is fully reproducible from its seed.

use arrayvec::ArrayVec;

use crate::error::ConfigError;
use crate::types::MAX_GRID_SIZE;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// The tiles the player has to reselect this round
///
/// Indices are unique and kept in draw order. Capacity is bounded by
/// [`MAX_GRID_SIZE`] so drawing never allocates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    indices: ArrayVec<usize, MAX_GRID_SIZE>,
}

impl TargetSet {
    /// Draw `count` unique indices from `[0, board_size)`
    ///
    /// Partial Fisher-Yates over the full index range: every subset of size
    /// `count` is equally likely.
    ///
    /// Fails when `count` is zero or not strictly smaller than the board.
    pub fn draw(
        rng: &mut SimpleRng,
        count: usize,
        board_size: usize,
    ) -> Result<Self, ConfigError> {
        if board_size == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if board_size > MAX_GRID_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size: board_size,
                max: MAX_GRID_SIZE,
            });
        }
        if count == 0 {
            return Err(ConfigError::NoTargets);
        }
        if count >= board_size {
            return Err(ConfigError::TooManyTargets {
                tiles: count,
                board_size,
            });
        }

        let mut pool: ArrayVec<usize, MAX_GRID_SIZE> = (0..board_size).collect();
        for i in 0..count {
            let remaining = (board_size - i) as u32;
            let j = i + rng.next_range(remaining) as usize;
            pool.swap(i, j);
        }
        pool.truncate(count);

        Ok(Self { indices: pool })
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}
