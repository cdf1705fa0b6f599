//! Validated, canonical game parameters.
//!
//! A [`RuleBook`] is derived once from a [`GameConfig`] and never changes.
//! It resolves every default (dice budgets, extra pools, minimums, order
//! hints) and rejects inconsistent combinations with a
//! [`ConfigurationError`] naming the offending option.
//!
//! ## Example
//!
//! ```
//! use lasvegas::core::{EntityId, GameConfig, PlayerId};
//! use lasvegas::rules::RuleBook;
//!
//! let rules = RuleBook::from_config(&GameConfig::for_players(2)).unwrap();
//!
//! // Two players, one neutral pool of 8 dice split 4/4.
//! assert_eq!(rules.num_colours(), 3);
//! assert_eq!(rules.starting_hand(PlayerId::new(0)), &[8, 0, 4]);
//! assert!(!rules.collects(EntityId(2)));
//! ```

use serde::Serialize;
use tracing::warn;

use crate::core::config::{
    default_extra_dice_per_player, default_solo_pools, BillSupply, CasinoMinimum, ExtraCollection,
    GameConfig, OrderHint, Starter, DEFAULT_OWN_DICE, DEFAULT_SOLO_DISTRIBUTION, RULEBOOK_PLAYERS,
};
use crate::core::{CasinoId, EntityId, PlayerId, PlayerMap};
use crate::error::ConfigurationError;

/// Largest number of dice colours (players plus extra pools).
const MAX_COLOURS: usize = u8::MAX as usize;

/// Canonical, internally consistent game parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RuleBook {
    num_players: usize,
    num_extra_pools: usize,
    num_casinos: usize,
    num_rounds: usize,
    starting_dice: PlayerMap<Vec<u32>>,
    extra_collects: Vec<bool>,
    bills: BillSupply,
    casino_minimums: Vec<u64>,
    order: Vec<Option<PlayerId>>,
    starter: Starter,
    solo_distribution_count: usize,
}

type Check<T> = Result<T, ConfigurationError>;

impl RuleBook {
    /// Validate `config` and resolve its defaults.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigurationError> {
        if config.num_casinos == 0 || config.num_casinos > u8::MAX as usize {
            return Err(ConfigurationError::new(
                "num_casinos",
                format!("must be in 1..={}, got {}", u8::MAX, config.num_casinos),
            ));
        }
        if config.num_rounds == 0 {
            return Err(ConfigurationError::new("num_rounds", "must be positive"));
        }

        let matrix = match &config.starting_dice {
            Some(matrix) => check_starting_dice(config, matrix)?,
            None => derive_starting_dice(config)?,
        };
        let num_players = matrix.len();
        let num_colours = matrix[0].len();
        let num_extra_pools = num_colours - num_players;
        if num_colours > MAX_COLOURS {
            return Err(ConfigurationError::new(
                "num_players",
                format!("at most {MAX_COLOURS} players and extra pools together, got {num_colours}"),
            ));
        }
        if num_players != 1 && !RULEBOOK_PLAYERS.contains(&num_players) {
            warn!(num_players, "player count outside the printed rulebook range");
        }

        let extra_collects = match &config.extra_collects_bills {
            None => vec![num_players == 1; num_extra_pools],
            Some(ExtraCollection::All(flag)) => vec![*flag; num_extra_pools],
            Some(ExtraCollection::PerPool(flags)) => {
                if flags.len() != num_extra_pools {
                    return Err(ConfigurationError::new(
                        "extra_collects_bills",
                        format!("expected {num_extra_pools} flags, got {}", flags.len()),
                    ));
                }
                flags.clone()
            }
        };

        let casino_minimums = match &config.casino_minimum {
            CasinoMinimum::Global(minimum) => vec![*minimum; config.num_casinos],
            CasinoMinimum::PerCasino(minimums) => {
                if minimums.len() != config.num_casinos {
                    return Err(ConfigurationError::new(
                        "casino_minimum",
                        format!("expected {} minimums, got {}", config.num_casinos, minimums.len()),
                    ));
                }
                minimums.clone()
            }
        };

        check_bills(&config.bills, &casino_minimums)?;
        let order = check_order(&config.order, num_players)?;

        if let Starter::Player(index) = config.starter {
            if index >= num_players {
                return Err(ConfigurationError::new(
                    "starter",
                    format!("player {index} does not exist in a {num_players}-player game"),
                ));
            }
        }

        let solo_distribution_count = check_solo(config.solo_distribution_count, &matrix)?;

        Ok(Self {
            num_players,
            num_extra_pools,
            num_casinos: config.num_casinos,
            num_rounds: config.num_rounds,
            starting_dice: PlayerMap::from_vec(matrix),
            extra_collects,
            bills: config.bills.clone(),
            casino_minimums,
            order,
            starter: config.starter,
            solo_distribution_count,
        })
    }

    /// Export the canonical configuration.
    ///
    /// `RuleBook::from_config(&rules.to_config())` rebuilds an equal rule book.
    #[must_use]
    pub fn to_config(&self) -> GameConfig {
        GameConfig {
            num_players: Some(self.num_players),
            num_extra_pools: Some(self.num_extra_pools),
            extra_dice_counts: None,
            extra_collects_bills: Some(ExtraCollection::PerPool(self.extra_collects.clone())),
            own_dice_count: None,
            starting_dice: Some(self.starting_dice.as_slice().to_vec()),
            order: if self.order.is_empty() {
                OrderHint::Random
            } else {
                OrderHint::Partial(self.order.iter().map(|p| p.map(PlayerId::index)).collect())
            },
            starter: self.starter,
            num_casinos: self.num_casinos,
            bills: self.bills.clone(),
            casino_minimum: CasinoMinimum::PerCasino(self.casino_minimums.clone()),
            num_rounds: self.num_rounds,
            solo_distribution_count: self.is_solo().then_some(self.solo_distribution_count),
        }
    }

    // =========================================================================
    // Shape
    // =========================================================================

    /// Regular (turn-taking) players.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.num_players
    }

    /// Extra (neutral) dice pools.
    #[must_use]
    pub fn num_extra_pools(&self) -> usize {
        self.num_extra_pools
    }

    /// Dice colours: players then extra pools.
    #[must_use]
    pub fn num_colours(&self) -> usize {
        self.num_players + self.num_extra_pools
    }

    /// Casinos (faces of every die).
    #[must_use]
    pub fn num_casinos(&self) -> usize {
        self.num_casinos
    }

    /// Rounds in a game.
    #[must_use]
    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    /// Single player against extra pools.
    #[must_use]
    pub fn is_solo(&self) -> bool {
        self.num_players == 1
    }

    // =========================================================================
    // Dice
    // =========================================================================

    /// Starting hands, one row per player, one column per colour.
    #[must_use]
    pub fn starting_dice(&self) -> &PlayerMap<Vec<u32>> {
        &self.starting_dice
    }

    /// Dice of each colour `player` starts every round with.
    #[must_use]
    pub fn starting_hand(&self, player: PlayerId) -> &[u32] {
        &self.starting_dice[player]
    }

    /// Dice `player` carries every round, all colours together.
    #[must_use]
    pub fn dice_budget(&self, player: PlayerId) -> u32 {
        self.starting_dice[player].iter().sum()
    }

    /// Dice of `player` that are not of its own colour.
    #[must_use]
    pub fn extra_dice_in_hand(&self, player: PlayerId) -> u32 {
        self.dice_budget(player) - self.starting_dice[player][player.index()]
    }

    /// Dice of `colour` in play every round, all hands together.
    #[must_use]
    pub fn colour_budget(&self, colour: EntityId) -> u32 {
        self.starting_dice
            .iter()
            .map(|(_, row)| row.get(colour.index()).copied().unwrap_or(0))
            .sum()
    }

    // =========================================================================
    // Scoring
    // =========================================================================

    /// Whether bills won by `colour` are scored.
    #[must_use]
    pub fn collects(&self, colour: EntityId) -> bool {
        match colour.extra_pool(self.num_players) {
            None => true,
            Some(pool) => self.extra_collects.get(pool).copied().unwrap_or(false),
        }
    }

    /// Colours that hold a score: every player, then collecting pools.
    #[must_use]
    pub fn collectors(&self) -> Vec<EntityId> {
        EntityId::all(self.num_colours())
            .filter(|&colour| self.collects(colour))
            .collect()
    }

    /// Bill supply of the game.
    #[must_use]
    pub fn bills(&self) -> &BillSupply {
        &self.bills
    }

    /// Money placed under `casino` every round, at least.
    #[must_use]
    pub fn casino_minimum(&self, casino: CasinoId) -> u64 {
        self.casino_minimums[casino.index()]
    }

    /// Minimum for every casino.
    #[must_use]
    pub fn casino_minimums(&self) -> &[u64] {
        &self.casino_minimums
    }

    // =========================================================================
    // Order
    // =========================================================================

    /// Normalised order hint: a cycle prefix with open slots.
    #[must_use]
    pub fn order_hint(&self) -> &[Option<PlayerId>] {
        &self.order
    }

    /// First player rule of round one.
    #[must_use]
    pub fn starter(&self) -> Starter {
        self.starter
    }

    /// Extra dice placed by the environment before each solo round.
    #[must_use]
    pub fn solo_distribution_count(&self) -> usize {
        self.solo_distribution_count
    }

    /// `Player n` or `Extra n`.
    #[must_use]
    pub fn label(&self, colour: EntityId) -> String {
        colour.label(self.num_players)
    }
}

// =============================================================================
// Validation helpers
// =============================================================================

fn check_starting_dice(config: &GameConfig, matrix: &[Vec<u32>]) -> Check<Vec<Vec<u32>>> {
    let num_players = matrix.len();
    if num_players == 0 {
        return Err(ConfigurationError::new("starting_dice", "needs at least one player row"));
    }
    if let Some(declared) = config.num_players {
        if declared != num_players {
            return Err(ConfigurationError::new(
                "num_players",
                format!("{declared} conflicts with the {num_players} rows of starting_dice"),
            ));
        }
    }

    let num_colours = matrix[0].len();
    if num_colours < num_players || matrix.iter().any(|row| row.len() != num_colours) {
        return Err(ConfigurationError::new(
            "starting_dice",
            format!("expected shape ({num_players}, players + extra pools) with equal rows"),
        ));
    }
    let num_extra_pools = num_colours - num_players;
    if let Some(declared) = config.num_extra_pools {
        if declared != num_extra_pools {
            return Err(ConfigurationError::new(
                "num_extra_pools",
                format!("{declared} conflicts with the {num_extra_pools} extra columns of starting_dice"),
            ));
        }
    }
    if let Some(own) = config.own_dice_count {
        if matrix.iter().enumerate().any(|(i, row)| row[i] != own) {
            return Err(ConfigurationError::new(
                "own_dice_count",
                format!("{own} conflicts with the diagonal of starting_dice"),
            ));
        }
    }
    if let Some(counts) = &config.extra_dice_counts {
        let columns: Vec<u32> = (num_players..num_colours)
            .map(|col| matrix.iter().map(|row| row[col]).sum())
            .collect();
        if *counts != columns {
            return Err(ConfigurationError::new(
                "extra_dice_counts",
                format!("{counts:?} conflicts with the extra columns of starting_dice {columns:?}"),
            ));
        }
    }
    if let Some(player) = matrix.iter().position(|row| row.iter().sum::<u32>() == 0) {
        return Err(ConfigurationError::new(
            "starting_dice",
            format!("player {player} starts with no dice"),
        ));
    }
    Ok(matrix.to_vec())
}

fn derive_starting_dice(config: &GameConfig) -> Check<Vec<Vec<u32>>> {
    let num_players = config.num_players.ok_or_else(|| {
        ConfigurationError::new("num_players", "required unless starting_dice is given")
    })?;
    if num_players == 0 {
        return Err(ConfigurationError::new("num_players", "must be positive"));
    }
    if num_players > MAX_COLOURS {
        return Err(ConfigurationError::new(
            "num_players",
            format!("at most {MAX_COLOURS} players, got {num_players}"),
        ));
    }

    let own = config.own_dice_count.unwrap_or(DEFAULT_OWN_DICE);
    if own == 0 {
        return Err(ConfigurationError::new("own_dice_count", "must be positive"));
    }

    let pool_default = if num_players == 1 {
        DEFAULT_SOLO_DISTRIBUTION as u32
    } else {
        default_extra_dice_per_player(num_players) * num_players as u32
    };
    let pools = match (config.num_extra_pools, &config.extra_dice_counts) {
        (Some(declared), Some(counts)) if declared != counts.len() => {
            return Err(ConfigurationError::new(
                "num_extra_pools",
                format!("{declared} conflicts with {} extra_dice_counts", counts.len()),
            ));
        }
        (_, Some(counts)) => counts.clone(),
        (Some(declared), None) => vec![pool_default; declared],
        (None, None) if num_players == 1 => default_solo_pools(),
        (None, None) if pool_default > 0 => vec![pool_default],
        (None, None) => Vec::new(),
    };
    if let Some(pool) = pools.iter().position(|&dice| dice == 0) {
        return Err(ConfigurationError::new(
            "extra_dice_counts",
            format!("extra pool {pool} has no dice"),
        ));
    }

    let players = num_players as u32;
    let matrix = (0..num_players)
        .map(|i| {
            let mut row = vec![0; num_players + pools.len()];
            row[i] = own;
            for (j, &total) in pools.iter().enumerate() {
                row[num_players + j] = total / players + u32::from((i as u32) < total % players);
            }
            row
        })
        .collect();
    Ok(matrix)
}

fn check_bills(bills: &BillSupply, minimums: &[u64]) -> Check<()> {
    let has_zero = match bills {
        BillSupply::Shared(pile) => pile.contains(&0),
        BillSupply::PerCasino(piles) => piles.iter().any(|pile| pile.contains(&0)),
    };
    if has_zero {
        return Err(ConfigurationError::new("bills", "every bill must be positive"));
    }

    match bills {
        BillSupply::Shared(pile) => {
            let total: u64 = pile.iter().sum();
            let needed: u64 = minimums.iter().sum();
            if total < needed {
                return Err(ConfigurationError::new(
                    "bills",
                    format!("total {total} cannot reach the casino minimums ({needed})"),
                ));
            }
        }
        BillSupply::PerCasino(piles) => {
            if piles.len() != minimums.len() {
                return Err(ConfigurationError::new(
                    "bills",
                    format!("expected {} piles, got {}", minimums.len(), piles.len()),
                ));
            }
            for (casino, (pile, &minimum)) in piles.iter().zip(minimums).enumerate() {
                let total: u64 = pile.iter().sum();
                if total < minimum {
                    return Err(ConfigurationError::new(
                        "bills",
                        format!("casino {casino} pile totals {total}, below its minimum {minimum}"),
                    ));
                }
            }
        }
    }
    Ok(())
}

fn check_order(hint: &OrderHint, num_players: usize) -> Check<Vec<Option<PlayerId>>> {
    let raw: Vec<Option<usize>> = match hint {
        OrderHint::Random => return Ok(Vec::new()),
        OrderHint::Identity => (0..num_players).map(Some).collect(),
        OrderHint::Partial(slots) => slots.clone(),
    };
    if raw.len() > num_players {
        return Err(ConfigurationError::new(
            "order",
            format!("{} slots for {num_players} players", raw.len()),
        ));
    }
    let mut seen = vec![false; num_players];
    for index in raw.iter().flatten().copied() {
        if index >= num_players {
            return Err(ConfigurationError::new(
                "order",
                format!("player {index} does not exist in a {num_players}-player game"),
            ));
        }
        if std::mem::replace(&mut seen[index], true) {
            return Err(ConfigurationError::new("order", format!("player {index} appears twice")));
        }
    }
    Ok(raw.into_iter().map(|slot| slot.map(|i| PlayerId(i as u8))).collect())
}

fn check_solo(requested: Option<usize>, matrix: &[Vec<u32>]) -> Check<usize> {
    if matrix.len() != 1 {
        return match requested {
            Some(count) if count > 0 => Err(ConfigurationError::new(
                "solo_distribution_count",
                "only meaningful when num_players == 1",
            )),
            _ => Ok(0),
        };
    }
    let hand = &matrix[0];
    let extra: u32 = hand[1..].iter().sum();
    let total = hand[0] + extra;
    match requested {
        // The player keeps at least one die to roll
        None => Ok(DEFAULT_SOLO_DISTRIBUTION
            .min(extra as usize)
            .min(total.saturating_sub(1) as usize)),
        Some(count) if count > extra as usize => Err(ConfigurationError::new(
            "solo_distribution_count",
            format!("{count} exceeds the {extra} extra dice in hand"),
        )),
        Some(count) if count >= total as usize => Err(ConfigurationError::new(
            "solo_distribution_count",
            "the player must keep at least one die to roll",
        )),
        Some(count) => Ok(count),
    }
}
