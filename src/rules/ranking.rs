//! Scores and live ranking.
//!
//! Scores order by money first, then by the number of bills won. Ranks use
//! competition numbering: equal scores share the best rank and the next
//! distinct score skips the tied positions.
//!
//! ```
//! use lasvegas::rules::competition_ranks;
//!
//! assert_eq!(competition_ranks(&[10, 10, 7, 5]), vec![1, 1, 3, 4]);
//! assert_eq!(competition_ranks(&[100_000, 100_000, 50_000]), vec![1, 1, 3]);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::EntityId;

/// Cumulative winnings of one colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    /// Total value of bills won.
    pub money: u64,
    /// Number of bills won.
    pub bills: u32,
}

impl Score {
    /// Create a score.
    #[must_use]
    pub const fn new(money: u64, bills: u32) -> Self {
        Self { money, bills }
    }

    /// Add one bill.
    pub fn award(&mut self, bill: u64) {
        self.money += bill;
        self.bills += 1;
    }
}

impl std::ops::Add for Score {
    type Output = Score;

    fn add(self, other: Score) -> Score {
        Score::new(self.money + other.money, self.bills + other.bills)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.money, self.bills)
    }
}

/// One row of the ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Colour ranked.
    pub entity: EntityId,
    /// Its cumulative score.
    pub score: Score,
    /// 1-based competition rank.
    pub rank: usize,
}

/// 1-based competition ranks of `scores`, best (largest) first.
///
/// The output is aligned with the input.
#[must_use]
pub fn competition_ranks<T: Ord>(scores: &[T]) -> Vec<usize> {
    scores
        .iter()
        .map(|score| 1 + scores.iter().filter(|other| *other > score).count())
        .collect()
}

/// Scores of every bill-collecting colour.
///
/// Non-collecting colours are never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    entries: Vec<(EntityId, Score)>,
}

impl Scoreboard {
    /// Zero scores for the given collectors.
    #[must_use]
    pub fn new(collectors: &[EntityId]) -> Self {
        Self {
            entries: collectors.iter().map(|&entity| (entity, Score::default())).collect(),
        }
    }

    /// Score of `entity`, `None` if it does not collect.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<Score> {
        self.entries
            .iter()
            .find(|(e, _)| *e == entity)
            .map(|(_, score)| *score)
    }

    /// Credit a bill to `entity`. Returns `false` if it does not collect.
    pub fn award(&mut self, entity: EntityId, bill: u64) -> bool {
        match self.entries.iter_mut().find(|(e, _)| *e == entity) {
            Some((_, score)) => {
                score.award(bill);
                true
            }
            None => false,
        }
    }

    /// (colour, score) pairs in colour order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, Score)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of collecting colours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nobody collects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Money handed out so far.
    #[must_use]
    pub fn total_money(&self) -> u64 {
        self.entries.iter().map(|(_, score)| score.money).sum()
    }

    /// Ranks aligned with `iter()`.
    #[must_use]
    pub fn ranks(&self) -> Vec<usize> {
        let scores: Vec<Score> = self.entries.iter().map(|(_, score)| *score).collect();
        competition_ranks(&scores)
    }

    /// Standings sorted best first; ties keep colour order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .entries
            .iter()
            .zip(self.ranks())
            .map(|(&(entity, score), rank)| Standing { entity, score, rank })
            .collect();
        standings.sort_by_key(|s| (s.rank, s.entity));
        standings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_ranks() {
        assert_eq!(competition_ranks(&[10, 10, 7, 5]), vec![1, 1, 3, 4]);
        assert_eq!(competition_ranks(&[5, 7, 10, 10]), vec![4, 3, 1, 1]);
        assert_eq!(competition_ranks(&[3, 3, 3]), vec![1, 1, 1]);
        assert_eq!(competition_ranks::<u64>(&[]), Vec::<usize>::new());
    }

    #[test]
    fn test_score_order_money_then_bills() {
        assert!(Score::new(100, 1) > Score::new(90, 5));
        assert!(Score::new(100, 3) > Score::new(100, 2));
        assert_eq!(
            competition_ranks(&[Score::new(100_000, 2), Score::new(100_000, 2), Score::new(50_000, 1)]),
            vec![1, 1, 3]
        );
    }

    #[test]
    fn test_score_arithmetic() {
        let mut score = Score::default();
        score.award(60_000);
        score.award(20_000);
        assert_eq!(score, Score::new(80_000, 2));
        assert_eq!(score + Score::new(10_000, 1), Score::new(90_000, 3));
        assert_eq!(score.to_string(), "80000 (2)");
    }

    #[test]
    fn test_scoreboard_award() {
        let mut board = Scoreboard::new(&[EntityId(0), EntityId(1), EntityId(3)]);

        assert!(board.award(EntityId(1), 50_000));
        assert!(!board.award(EntityId(2), 90_000));

        assert_eq!(board.get(EntityId(1)), Some(Score::new(50_000, 1)));
        assert_eq!(board.get(EntityId(2)), None);
        assert_eq!(board.total_money(), 50_000);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_standings() {
        let mut board = Scoreboard::new(&[EntityId(0), EntityId(1), EntityId(2)]);
        board.award(EntityId(2), 70_000);
        board.award(EntityId(0), 30_000);
        board.award(EntityId(1), 30_000);

        let standings = board.standings();
        assert_eq!(standings[0].entity, EntityId(2));
        assert_eq!(standings[0].rank, 1);
        assert_eq!(standings[1].entity, EntityId(0));
        assert_eq!(standings[1].rank, 2);
        assert_eq!(standings[2].entity, EntityId(1));
        assert_eq!(standings[2].rank, 2);
        assert_eq!(board.ranks(), vec![2, 2, 1]);
    }

    #[test]
    fn test_scoreboard_serialization() {
        let mut board = Scoreboard::new(&[EntityId(0), EntityId(1)]);
        board.award(EntityId(0), 10_000);
        let json = serde_json::to_string(&board).unwrap();
        let deserialized: Scoreboard = serde_json::from_str(&json).unwrap();
        assert_eq!(board, deserialized);
    }
}
