//! Dice colour identification.
//!
//! Every die in the game belongs to a colour, and every colour belongs to
//! a dice-owning entity: a regular player or an extra (neutral) pool.
//!
//! ## ID Layout
//!
//! Colours are allocated as follows:
//! - `0..player_count`: one colour per regular player
//! - `player_count..player_count + extra_pools`: one colour per extra pool
//!
//! The split point is the player count of the game, so most queries take
//! `player_count` as context.
//!
//! ## Usage
//!
//! ```
//! use lasvegas::core::{EntityId, PlayerId};
//!
//! let player_count = 3;
//!
//! let red = EntityId::player(PlayerId::new(0));
//! let neutral = EntityId::extra(0, player_count);
//!
//! assert!(red.is_player(player_count));
//! assert!(!neutral.is_player(player_count));
//! assert_eq!(neutral.extra_pool(player_count), Some(0));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Identifier of a dice colour (and of the entity owning that colour).
///
/// Scores, board columns and roll partitions are all indexed by `EntityId`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u8);

impl EntityId {
    /// Colour of a regular player.
    ///
    /// ```
    /// use lasvegas::core::{EntityId, PlayerId};
    ///
    /// let entity = EntityId::player(PlayerId::new(2));
    /// assert_eq!(entity.index(), 2);
    /// ```
    #[must_use]
    pub const fn player(id: PlayerId) -> Self {
        Self(id.0)
    }

    /// Colour of the extra pool with index `pool`.
    #[must_use]
    pub const fn extra(pool: usize, player_count: usize) -> Self {
        Self((player_count + pool) as u8)
    }

    /// Raw colour index (column in the board matrices).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this colour belongs to a regular player.
    ///
    /// ```
    /// use lasvegas::core::EntityId;
    ///
    /// assert!(EntityId(1).is_player(2));
    /// assert!(!EntityId(2).is_player(2));
    /// ```
    #[must_use]
    pub const fn is_player(self, player_count: usize) -> bool {
        (self.0 as usize) < player_count
    }

    /// Convert to `PlayerId` if this is a regular player's colour.
    #[must_use]
    pub const fn as_player(self, player_count: usize) -> Option<PlayerId> {
        if self.is_player(player_count) {
            Some(PlayerId(self.0))
        } else {
            None
        }
    }

    /// Index of the extra pool owning this colour, if any.
    #[must_use]
    pub const fn extra_pool(self, player_count: usize) -> Option<usize> {
        if self.is_player(player_count) {
            None
        } else {
            Some(self.0 as usize - player_count)
        }
    }

    /// Iterate over all colours of a game with `colour_count` colours.
    pub fn all(colour_count: usize) -> impl Iterator<Item = EntityId> {
        (0..colour_count as u8).map(EntityId)
    }

    /// Human-readable label: `Player n` or `Extra n`.
    #[must_use]
    pub fn label(self, player_count: usize) -> String {
        match self.extra_pool(player_count) {
            None => format!("Player {}", self.0),
            Some(pool) => format!("Extra {pool}"),
        }
    }
}

impl From<PlayerId> for EntityId {
    fn from(id: PlayerId) -> Self {
        Self::player(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Colour({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_colours() {
        assert_eq!(EntityId::player(PlayerId::new(0)), EntityId(0));
        assert_eq!(EntityId::player(PlayerId::new(3)), EntityId(3));
        assert_eq!(EntityId::from(PlayerId::new(1)), EntityId(1));
    }

    #[test]
    fn test_extra_colours_follow_players() {
        assert_eq!(EntityId::extra(0, 2), EntityId(2));
        assert_eq!(EntityId::extra(1, 2), EntityId(3));
        assert_eq!(EntityId::extra(0, 5), EntityId(5));
    }

    #[test]
    fn test_is_player() {
        assert!(EntityId(0).is_player(1));
        assert!(!EntityId(1).is_player(1));
        assert!(EntityId(3).is_player(4));
        assert!(!EntityId(4).is_player(4));
    }

    #[test]
    fn test_as_player() {
        assert_eq!(EntityId(0).as_player(4), Some(PlayerId::new(0)));
        assert_eq!(EntityId(3).as_player(4), Some(PlayerId::new(3)));
        assert_eq!(EntityId(4).as_player(4), None);
    }

    #[test]
    fn test_extra_pool() {
        assert_eq!(EntityId(1).extra_pool(2), None);
        assert_eq!(EntityId(2).extra_pool(2), Some(0));
        assert_eq!(EntityId(4).extra_pool(2), Some(2));
    }

    #[test]
    fn test_all() {
        let colours: Vec<_> = EntityId::all(3).collect();
        assert_eq!(colours, vec![EntityId(0), EntityId(1), EntityId(2)]);
    }

    #[test]
    fn test_label() {
        assert_eq!(EntityId(1).label(2), "Player 1");
        assert_eq!(EntityId(2).label(2), "Extra 0");
        assert_eq!(EntityId(3).label(2), "Extra 1");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(4)), "Colour(4)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(7);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
