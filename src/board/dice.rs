//! Dice locations.
//!
//! The `DiceBoard` tracks every die of the round in two dense matrices:
//! - hands: one row per regular player, one column per colour
//! - casinos: one row per casino, one column per colour
//!
//! A colour's column sum over hands plus casinos is its budget for the
//! round. Dice only ever move from a hand to a casino; `refill` resets the
//! board at round start.
//!
//! ## Usage
//!
//! ```
//! use lasvegas::board::DiceBoard;
//! use lasvegas::core::{CasinoId, PlayerId, PlayerMap};
//!
//! let starting = PlayerMap::from_vec(vec![vec![2, 0, 1], vec![0, 3, 1]]);
//! let mut board = DiceBoard::new(&starting, 6);
//!
//! let p0 = PlayerId::new(0);
//! board.move_group(p0, CasinoId(4), &[2, 0, 1]);
//!
//! assert!(!board.has_dice(p0));
//! assert_eq!(board.placed(CasinoId(4)), &[2, 0, 1]);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{CasinoId, EntityId, PlayerId, PlayerMap};

/// Hand and casino dice of the current round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceBoard {
    players: usize,
    colours: usize,
    casinos: usize,
    /// Row-major `players x colours`.
    hands: Vec<u32>,
    /// Row-major `casinos x colours`.
    placed: Vec<u32>,
}

impl DiceBoard {
    /// A board with every hand full and every casino empty.
    #[must_use]
    pub fn new(starting: &PlayerMap<Vec<u32>>, casino_count: usize) -> Self {
        let players = starting.player_count();
        let colours = starting.as_slice().first().map_or(0, Vec::len);
        let mut board = Self {
            players,
            colours,
            casinos: casino_count,
            hands: vec![0; players * colours],
            placed: vec![0; casino_count * colours],
        };
        board.refill(starting);
        board
    }

    /// Refill hands from `starting` and clear every casino.
    pub fn refill(&mut self, starting: &PlayerMap<Vec<u32>>) {
        for (player, row) in starting.iter() {
            let start = player.index() * self.colours;
            self.hands[start..start + self.colours].copy_from_slice(row);
        }
        self.placed.iter_mut().for_each(|dice| *dice = 0);
    }

    /// Regular players.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players
    }

    /// Colours (players then extra pools).
    #[must_use]
    pub fn num_colours(&self) -> usize {
        self.colours
    }

    /// Casinos.
    #[must_use]
    pub fn num_casinos(&self) -> usize {
        self.casinos
    }

    // =========================================================================
    // Hands
    // =========================================================================

    /// Dice of each colour still in `player`'s hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[u32] {
        let start = player.index() * self.colours;
        &self.hands[start..start + self.colours]
    }

    /// Dice still in `player`'s hand, all colours.
    #[must_use]
    pub fn hand_total(&self, player: PlayerId) -> u32 {
        self.hand(player).iter().sum()
    }

    /// Check if `player` still has dice to roll.
    #[must_use]
    pub fn has_dice(&self, player: PlayerId) -> bool {
        self.hand(player).iter().any(|&dice| dice > 0)
    }

    /// Check if any hand still holds dice.
    #[must_use]
    pub fn any_in_hand(&self) -> bool {
        self.hands.iter().any(|&dice| dice > 0)
    }

    /// Dice of `colour` in all hands.
    #[must_use]
    pub fn colour_in_hands(&self, colour: EntityId) -> u32 {
        (0..self.players)
            .map(|p| self.hands[p * self.colours + colour.index()])
            .sum()
    }

    /// Row-major `players x colours` hand matrix.
    #[must_use]
    pub fn hands_matrix(&self) -> &[u32] {
        &self.hands
    }

    // =========================================================================
    // Casinos
    // =========================================================================

    /// Dice of each colour on `casino`.
    #[must_use]
    pub fn placed(&self, casino: CasinoId) -> &[u32] {
        let start = casino.index() * self.colours;
        &self.placed[start..start + self.colours]
    }

    /// Dice of `colour` on all casinos.
    #[must_use]
    pub fn colour_on_casinos(&self, colour: EntityId) -> u32 {
        (0..self.casinos)
            .map(|c| self.placed[c * self.colours + colour.index()])
            .sum()
    }

    /// Dice on all casinos.
    #[must_use]
    pub fn total_placed(&self) -> u32 {
        self.placed.iter().sum()
    }

    /// Row-major `casinos x colours` placement matrix.
    #[must_use]
    pub fn placed_matrix(&self) -> &[u32] {
        &self.placed
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Move a per-colour group of dice from `player`'s hand to `casino`.
    ///
    /// Returns the number of dice moved. The group must fit in the hand.
    pub fn move_group(&mut self, player: PlayerId, casino: CasinoId, group: &[u32]) -> u32 {
        debug_assert_eq!(group.len(), self.colours);
        let hand = player.index() * self.colours;
        let slot = casino.index() * self.colours;
        let mut moved = 0;
        for (colour, &dice) in group.iter().enumerate() {
            debug_assert!(self.hands[hand + colour] >= dice, "group larger than hand");
            let dice = dice.min(self.hands[hand + colour]);
            self.hands[hand + colour] -= dice;
            self.placed[slot + colour] += dice;
            moved += dice;
        }
        moved
    }

    /// Move a single die of `colour` from `player`'s hand to `casino`.
    ///
    /// Returns `false` if the hand holds no die of that colour.
    pub fn drop_die(&mut self, player: PlayerId, colour: EntityId, casino: CasinoId) -> bool {
        let hand = player.index() * self.colours + colour.index();
        if self.hands[hand] == 0 {
            return false;
        }
        self.hands[hand] -= 1;
        self.placed[casino.index() * self.colours + colour.index()] += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> DiceBoard {
        let starting = PlayerMap::from_vec(vec![vec![8, 0, 4], vec![0, 8, 4]]);
        DiceBoard::new(&starting, 6)
    }

    #[test]
    fn test_new_board() {
        let board = board();
        assert_eq!(board.num_players(), 2);
        assert_eq!(board.num_colours(), 3);
        assert_eq!(board.num_casinos(), 6);
        assert_eq!(board.hand(PlayerId::new(1)), &[0, 8, 4]);
        assert_eq!(board.hand_total(PlayerId::new(0)), 12);
        assert_eq!(board.total_placed(), 0);
        assert_eq!(board.colour_in_hands(EntityId(2)), 8);
    }

    #[test]
    fn test_move_group() {
        let mut board = board();
        let moved = board.move_group(PlayerId::new(0), CasinoId(2), &[3, 0, 1]);

        assert_eq!(moved, 4);
        assert_eq!(board.hand(PlayerId::new(0)), &[5, 0, 3]);
        assert_eq!(board.placed(CasinoId(2)), &[3, 0, 1]);
        assert_eq!(board.colour_on_casinos(EntityId(0)), 3);
        assert_eq!(board.colour_in_hands(EntityId(2)), 7);
    }

    #[test]
    fn test_conservation_across_moves() {
        let mut board = board();
        board.move_group(PlayerId::new(0), CasinoId(0), &[2, 0, 2]);
        board.move_group(PlayerId::new(1), CasinoId(5), &[0, 6, 0]);
        board.move_group(PlayerId::new(0), CasinoId(5), &[6, 0, 0]);

        for colour in EntityId::all(3) {
            let total = board.colour_in_hands(colour) + board.colour_on_casinos(colour);
            assert_eq!(total, 8);
        }
        assert_eq!(board.hand(PlayerId::new(0)), &[0, 0, 2]);
    }

    #[test]
    fn test_drop_die() {
        let mut board = board();
        assert!(board.drop_die(PlayerId::new(0), EntityId(2), CasinoId(3)));
        assert_eq!(board.placed(CasinoId(3)), &[0, 0, 1]);
        assert!(!board.drop_die(PlayerId::new(0), EntityId(1), CasinoId(3)));
    }

    #[test]
    fn test_refill_clears_casinos() {
        let starting = PlayerMap::from_vec(vec![vec![2, 1]]);
        let mut board = DiceBoard::new(&starting, 2);
        board.move_group(PlayerId::new(0), CasinoId(1), &[2, 1]);
        assert!(!board.any_in_hand());

        board.refill(&starting);
        assert!(board.any_in_hand());
        assert_eq!(board.total_placed(), 0);
        assert_eq!(board.hand(PlayerId::new(0)), &[2, 1]);
    }

    #[test]
    fn test_matrices_layout() {
        let mut board = board();
        board.move_group(PlayerId::new(1), CasinoId(1), &[0, 2, 0]);
        assert_eq!(board.hands_matrix().len(), 6);
        assert_eq!(board.placed_matrix().len(), 18);
        assert_eq!(board.placed_matrix()[4], 2);
    }

    #[test]
    fn test_board_serialization() {
        let board = board();
        let json = serde_json::to_string(&board).unwrap();
        let deserialized: DiceBoard = serde_json::from_str(&json).unwrap();
        assert_eq!(board, deserialized);
    }
}
