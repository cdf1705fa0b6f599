//! Turn order and the first-player chip.
//!
//! The cycle is resolved once per game and never changes afterwards:
//!
//! 1. Hint slots holding a player are kept where they are, so their
//!    relative offsets survive.
//! 2. Players not named by the hint are shuffled, then poured into the open
//!    slots and appended after the hint.
//!
//! Only the chip moves between rounds: it passes to the player after the
//! previous starter.
//!
//! ```
//! use lasvegas::core::{GameRng, PlayerId, Starter};
//! use lasvegas::env::RoundOrder;
//!
//! let hint = [Some(PlayerId::new(3)), None, Some(PlayerId::new(1))];
//! let order = RoundOrder::resolve(&hint, Starter::FirstInOrder, 5, &mut GameRng::new(7));
//!
//! assert_eq!(order.starter(), PlayerId::new(3));
//! assert_eq!(order.offset(PlayerId::new(3), PlayerId::new(1)), Some(2));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PlayerId, Starter};

/// Resolved cycle of regular players plus the chip position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOrder {
    cycle: Vec<PlayerId>,
    chip: usize,
}

impl RoundOrder {
    /// Resolve a normalised hint for `player_count` players.
    ///
    /// The hint is assumed valid (no duplicates, no out-of-range players),
    /// as `RuleBook` guarantees.
    #[must_use]
    pub fn resolve(hint: &[Option<PlayerId>], starter: Starter, player_count: usize, rng: &mut GameRng) -> Self {
        let mut missing: Vec<PlayerId> = PlayerId::all(player_count)
            .filter(|player| !hint.contains(&Some(*player)))
            .collect();
        rng.shuffle(&mut missing);
        // Popped from the back
        missing.reverse();

        let mut cycle: Vec<PlayerId> = hint
            .iter()
            .filter_map(|slot| slot.or_else(|| missing.pop()))
            .collect();
        cycle.extend(missing.into_iter().rev());
        debug_assert_eq!(cycle.len(), player_count);

        let chip = match starter {
            Starter::FirstInOrder => 0,
            Starter::Player(index) => {
                let chip = cycle.iter().position(|p| p.index() == index);
                debug_assert!(chip.is_some(), "starter {index} is not seated");
                chip.unwrap_or(0)
            }
            Starter::Random => rng.gen_range_usize(0..cycle.len().max(1)),
        };

        Self { cycle, chip }
    }

    /// Players in cycle order, independent of the chip.
    #[must_use]
    pub fn cycle(&self) -> &[PlayerId] {
        &self.cycle
    }

    /// Holder of the first-player chip.
    #[must_use]
    pub fn starter(&self) -> PlayerId {
        self.cycle[self.chip]
    }

    /// Pass the chip to the next player in the cycle.
    pub fn pass_chip(&mut self) {
        self.chip = (self.chip + 1) % self.cycle.len();
    }

    /// Every player once, starting from the chip holder.
    pub fn turn_sequence(&self) -> impl Iterator<Item = PlayerId> + '_ {
        let n = self.cycle.len();
        (0..n).map(move |i| self.cycle[(self.chip + i) % n])
    }

    /// Position of `player` in the cycle.
    #[must_use]
    pub fn position(&self, player: PlayerId) -> Option<usize> {
        self.cycle.iter().position(|&p| p == player)
    }

    /// Cycle positions from `from` forward to `to`.
    #[must_use]
    pub fn offset(&self, from: PlayerId, to: PlayerId) -> Option<usize> {
        let n = self.cycle.len();
        Some((self.position(to)? + n - self.position(from)?) % n)
    }
}
