//! Game configuration options.
//!
//! `GameConfig` is the raw, independently overridable option set a game is
//! created from. Every field has a documented default; `RuleBook` validates
//! the combination and resolves the defaults into a canonical parameter set.
//!
//! ```
//! use lasvegas::core::{GameConfig, OrderHint, Starter};
//!
//! let config = GameConfig::for_players(5)
//!     .with_rounds(2)
//!     .with_order(OrderHint::Partial(vec![Some(3), None, Some(1)]))
//!     .with_starter(Starter::FirstInOrder);
//!
//! assert_eq!(config.num_players, Some(5));
//! assert_eq!(config.num_casinos, 6);
//! ```

use serde::{Deserialize, Serialize};

/// Dice owned by each regular player.
pub const DEFAULT_OWN_DICE: u32 = 8;

/// Casinos on the board (faces of every die).
pub const DEFAULT_NUM_CASINOS: usize = 6;

/// Rounds in a game.
pub const DEFAULT_NUM_ROUNDS: usize = 4;

/// Minimum total of bills placed under each casino every round.
pub const DEFAULT_CASINO_MINIMUM: u64 = 50_000;

/// Extra dice placed on casinos before each solo round.
pub const DEFAULT_SOLO_DISTRIBUTION: usize = 4;

/// Player counts covered by the printed rulebook.
pub const RULEBOOK_PLAYERS: std::ops::RangeInclusive<usize> = 2..=5;

/// Bill denominations of the printed game, with their quantities.
pub const DEFAULT_BILLS: [(u64, usize); 9] = [
    (10_000, 5),
    (20_000, 7),
    (30_000, 7),
    (40_000, 5),
    (50_000, 6),
    (60_000, 5),
    (70_000, 5),
    (80_000, 4),
    (90_000, 4),
];

/// Extra (neutral) dice each player carries for a given player count.
///
/// Solo games are handled separately, see `default_solo_pools`.
#[must_use]
pub const fn default_extra_dice_per_player(num_players: usize) -> u32 {
    match num_players {
        2 => 4,
        3 | 4 => 2,
        _ => 0,
    }
}

/// Extra pools used when a single player plays: two pools of four dice.
#[must_use]
pub fn default_solo_pools() -> Vec<u32> {
    vec![4, 4]
}

/// Where the bills come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillSupply {
    /// One bank, shuffled at game start, feeding every casino.
    Shared(Vec<u64>),
    /// One bank per casino (one list per casino).
    PerCasino(Vec<Vec<u64>>),
}

impl BillSupply {
    /// A shared bank from `(denomination, quantity)` pairs.
    ///
    /// ```
    /// use lasvegas::core::BillSupply;
    ///
    /// let supply = BillSupply::from_counts(&[(10_000, 2), (50_000, 1)]);
    /// assert_eq!(supply, BillSupply::Shared(vec![10_000, 10_000, 50_000]));
    /// ```
    #[must_use]
    pub fn from_counts(counts: &[(u64, usize)]) -> Self {
        Self::Shared(
            counts
                .iter()
                .flat_map(|&(value, quantity)| std::iter::repeat(value).take(quantity))
                .collect(),
        )
    }
}

impl Default for BillSupply {
    fn default() -> Self {
        Self::from_counts(&DEFAULT_BILLS)
    }
}

/// Minimum money placed under casinos every round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasinoMinimum {
    /// Same minimum for every casino.
    Global(u64),
    /// One minimum per casino.
    PerCasino(Vec<u64>),
}

impl Default for CasinoMinimum {
    fn default() -> Self {
        Self::Global(DEFAULT_CASINO_MINIMUM)
    }
}

/// Which extra pools win bills (and therefore hold a score).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraCollection {
    /// Every pool behaves the same.
    All(bool),
    /// One flag per pool.
    PerPool(Vec<bool>),
}

/// Relative turn order hint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderHint {
    /// Whole cycle randomized at game start.
    #[default]
    Random,
    /// Cycle is `0, 1, ..., num_players - 1`.
    Identity,
    /// Prefix of the cycle; `None` slots are filled at random.
    ///
    /// `[Some(3), None, Some(1)]` places player 1 two positions after
    /// player 3.
    Partial(Vec<Option<usize>>),
}

/// Who holds the first player chip in round one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Starter {
    /// Uniformly random player.
    #[default]
    Random,
    /// First player of the resolved cycle.
    FirstInOrder,
    /// Explicit player index.
    Player(usize),
}

/// Raw configuration consumed by `RuleBook::from_config`.
///
/// `None` means "derive the default". See the module docs for the rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Regular (turn-taking) players. Required unless `starting_dice` is set.
    pub num_players: Option<usize>,

    /// Extra (neutral) dice pools.
    pub num_extra_pools: Option<usize>,

    /// Total dice of each extra pool, split evenly among the players.
    pub extra_dice_counts: Option<Vec<u32>>,

    /// Whether extra pools collect bills. Defaults to collecting only in solo games.
    pub extra_collects_bills: Option<ExtraCollection>,

    /// Own dice per player. Defaults to 8.
    pub own_dice_count: Option<u32>,

    /// Full starting hands: rows = players, columns = players then extra pools.
    pub starting_dice: Option<Vec<Vec<u32>>>,

    /// Turn order hint.
    pub order: OrderHint,

    /// First player of round one.
    pub starter: Starter,

    /// Casinos on the board, i.e. faces of every die.
    pub num_casinos: usize,

    /// Bills of the game.
    pub bills: BillSupply,

    /// Minimum money under each casino every round.
    pub casino_minimum: CasinoMinimum,

    /// Rounds in a game.
    pub num_rounds: usize,

    /// Extra dice redistributed before every solo round.
    pub solo_distribution_count: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: None,
            num_extra_pools: None,
            extra_dice_counts: None,
            extra_collects_bills: None,
            own_dice_count: None,
            starting_dice: None,
            order: OrderHint::default(),
            starter: Starter::default(),
            num_casinos: DEFAULT_NUM_CASINOS,
            bills: BillSupply::default(),
            casino_minimum: CasinoMinimum::default(),
            num_rounds: DEFAULT_NUM_ROUNDS,
            solo_distribution_count: None,
        }
    }
}

impl GameConfig {
    /// Default rules for `num_players` players.
    #[must_use]
    pub fn for_players(num_players: usize) -> Self {
        Self {
            num_players: Some(num_players),
            ..Self::default()
        }
    }

    /// Set the number of extra pools.
    #[must_use]
    pub fn with_extra_pools(mut self, pools: usize) -> Self {
        self.num_extra_pools = Some(pools);
        self
    }

    /// Set the total dice of each extra pool.
    #[must_use]
    pub fn with_extra_dice(mut self, counts: Vec<u32>) -> Self {
        self.extra_dice_counts = Some(counts);
        self
    }

    /// Set whether extra pools collect bills.
    #[must_use]
    pub fn with_extra_collection(mut self, collection: ExtraCollection) -> Self {
        self.extra_collects_bills = Some(collection);
        self
    }

    /// Set the own dice per player.
    #[must_use]
    pub fn with_own_dice(mut self, count: u32) -> Self {
        self.own_dice_count = Some(count);
        self
    }

    /// Set the full starting hands.
    #[must_use]
    pub fn with_starting_dice(mut self, matrix: Vec<Vec<u32>>) -> Self {
        self.starting_dice = Some(matrix);
        self
    }

    /// Set the turn order hint.
    #[must_use]
    pub fn with_order(mut self, order: OrderHint) -> Self {
        self.order = order;
        self
    }

    /// Set the first player of round one.
    #[must_use]
    pub fn with_starter(mut self, starter: Starter) -> Self {
        self.starter = starter;
        self
    }

    /// Set the number of casinos.
    #[must_use]
    pub fn with_casinos(mut self, count: usize) -> Self {
        self.num_casinos = count;
        self
    }

    /// Set the bills.
    #[must_use]
    pub fn with_bills(mut self, bills: BillSupply) -> Self {
        self.bills = bills;
        self
    }

    /// Set the casino minimum.
    #[must_use]
    pub fn with_casino_minimum(mut self, minimum: CasinoMinimum) -> Self {
        self.casino_minimum = minimum;
        self
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.num_rounds = rounds;
        self
    }

    /// Set the solo redistribution count.
    #[must_use]
    pub fn with_solo_distribution(mut self, count: usize) -> Self {
        self.solo_distribution_count = Some(count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.num_players, None);
        assert_eq!(config.num_casinos, 6);
        assert_eq!(config.num_rounds, 4);
        assert_eq!(config.order, OrderHint::Random);
        assert_eq!(config.starter, Starter::Random);
        assert_eq!(config.casino_minimum, CasinoMinimum::Global(50_000));
    }

    #[test]
    fn test_default_bills() {
        let BillSupply::Shared(bills) = BillSupply::default() else {
            panic!("default bank must be shared");
        };
        assert_eq!(bills.len(), 48);
        assert_eq!(bills.iter().sum::<u64>(), 2_230_000);
        assert_eq!(bills.iter().filter(|&&b| b == 20_000).count(), 7);
    }

    #[test]
    fn test_default_extra_dice() {
        assert_eq!(default_extra_dice_per_player(2), 4);
        assert_eq!(default_extra_dice_per_player(3), 2);
        assert_eq!(default_extra_dice_per_player(4), 2);
        assert_eq!(default_extra_dice_per_player(5), 0);
        assert_eq!(default_extra_dice_per_player(8), 0);
        assert_eq!(default_solo_pools(), vec![4, 4]);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::for_players(3)
            .with_own_dice(6)
            .with_extra_pools(1)
            .with_extra_dice(vec![3])
            .with_extra_collection(ExtraCollection::All(true))
            .with_casinos(4)
            .with_rounds(2)
            .with_casino_minimum(CasinoMinimum::PerCasino(vec![1, 2, 3, 4]))
            .with_starter(Starter::Player(2));

        assert_eq!(config.num_players, Some(3));
        assert_eq!(config.own_dice_count, Some(6));
        assert_eq!(config.extra_dice_counts, Some(vec![3]));
        assert_eq!(config.num_casinos, 4);
        assert_eq!(config.starter, Starter::Player(2));
    }

    #[test]
    fn test_serde_partial_document() {
        let config: GameConfig =
            serde_json::from_str(r#"{"num_players": 2, "num_rounds": 3}"#).unwrap();
        assert_eq!(config.num_players, Some(2));
        assert_eq!(config.num_rounds, 3);
        assert_eq!(config.num_casinos, DEFAULT_NUM_CASINOS);
        assert_eq!(config.bills, BillSupply::default());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = GameConfig::for_players(5)
            .with_order(OrderHint::Partial(vec![Some(3), None, Some(1)]))
            .with_bills(BillSupply::PerCasino(vec![vec![10], vec![20]]));
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
