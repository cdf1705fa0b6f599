//! Seeded randomness for dice, turn orders, bill piles and bots.
//!
//! One `GameRng` belongs to each environment and is the only source of
//! chance in a game. Its stream is a pure function of the seed, so a record
//! holding the seed and the decisions replays the dice exactly.
//!
//! Decision functions get their own stream through [`GameRng::for_context`]
//! and never shift the dice:
//!
//! ```
//! use lasvegas::core::GameRng;
//!
//! let mut dice = GameRng::new(42);
//! assert!(dice.roll_die(6) < 6);
//!
//! let mut bots = GameRng::new(42).for_context("policies");
//! let mut bots_again = GameRng::new(42).for_context("policies");
//! assert_eq!(bots.roll_die(6), bots_again.roll_die(6));
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream plus the seed it started from.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed of this stream.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream derived from the seed and `context`.
    ///
    /// FxHash keeps the derived seed identical across builds and platforms.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// One die with `faces` faces; the result is in `0..faces`.
    pub fn roll_die(&mut self, faces: usize) -> usize {
        self.inner.gen_range(0..faces)
    }

    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle in place (bill piles, unplaced order slots).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Uniform pick; `None` on an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Index drawn with probability proportional to `weights`.
    ///
    /// Zero and negative weights are never drawn. Returns `None` when no
    /// weight is positive.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        let total: f32 = weights.iter().filter(|&&w| w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f32>() * total;
        for (index, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            threshold -= weight;
            if threshold <= 0.0 {
                return Some(index);
            }
        }
        // Rounding left a sliver past the last weight
        weights.iter().rposition(|&w| w > 0.0)
    }

    /// Position of the stream, for checkpoints.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream saved with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut rng = Self::new(state.seed);
        rng.inner.set_word_pos(state.word_pos);
        rng
    }
}

/// Serialisable position of a [`GameRng`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
}
