//! Regular players and per-player tables.
//!
//! A `PlayerId` names a turn-taking player. Extra pools never take turns
//! and are not players; they only own a dice colour (see `EntityId`).

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// 0-based index of a regular player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Players of a `player_count`-player game, in index order.
    ///
    /// ```
    /// use lasvegas::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).map(PlayerId::index).collect();
    /// assert_eq!(seats, vec![0, 1, 2]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One entry per regular player, indexed by `PlayerId`.
///
/// The starting hands of a game live in a `PlayerMap<Vec<u32>>`: one row per
/// player, one column per colour.
///
/// ```
/// use lasvegas::core::{PlayerId, PlayerMap};
///
/// let hands = PlayerMap::from_vec(vec![vec![8, 0, 4], vec![0, 8, 4]]);
/// assert_eq!(hands[PlayerId::new(1)], vec![0, 8, 4]);
/// assert_eq!(hands.player_count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Rows in player order. Callers validate the player count first.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        debug_assert!(data.len() <= usize::from(u8::MAX), "player ids are u8");
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Entry of `player`, `None` if the player does not exist.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// `(player, entry)` pairs in player order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display() {
        assert_eq!(PlayerId::new(3).to_string(), "Player 3");
        assert_eq!(PlayerId::new(3).index(), 3);
        assert_eq!(PlayerId::all(0).count(), 0);
    }

    #[test]
    fn test_player_map_lookup() {
        let hands = PlayerMap::from_vec(vec![vec![8, 2], vec![0, 2]]);
        assert_eq!(hands.get(PlayerId::new(0)), Some(&vec![8, 2]));
        assert_eq!(hands.get(PlayerId::new(2)), None);

        let totals: Vec<(PlayerId, u32)> = hands.iter().map(|(p, row)| (p, row.iter().sum())).collect();
        assert_eq!(totals, vec![(PlayerId::new(0), 10), (PlayerId::new(1), 2)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let hands = PlayerMap::from_vec(vec![vec![8, 0, 4], vec![0, 8, 4]]);
        let json = serde_json::to_string(&hands).unwrap();
        assert_eq!(serde_json::from_str::<PlayerMap<Vec<u32>>>(&json).unwrap(), hands);
    }
}
