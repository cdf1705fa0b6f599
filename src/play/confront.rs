//! Confrontation: many games between fixed seats, aggregated per policy.
//!
//! Game `i` uses seed `seed_offset + i` for both the dice and the decision
//! functions, so a confrontation is reproducible and its report does not
//! depend on the number of worker threads.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use lasvegas::core::GameConfig;
//! use lasvegas::play::{ConfrontConfig, Confrontation};
//! use lasvegas::policy::Seat;
//! use lasvegas::rules::RuleBook;
//!
//! let rules = Arc::new(RuleBook::from_config(&GameConfig::for_players(2)).unwrap());
//! let seats = || vec![Seat::bundled("greedy_score").unwrap(), Seat::random("Bot")];
//! let config = ConfrontConfig::new().with_games(4).with_threads(2);
//!
//! let report = Confrontation::new(rules, seats, config).run().unwrap();
//! assert_eq!(report.games(), 4);
//! assert_eq!(report.rank_counts("random").unwrap().iter().sum::<usize>(), 4);
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{EntityId, PlayerId};
use crate::env::GameEnvironment;
use crate::error::{EnvError, Result};
use crate::policy::Seat;
use crate::rules::{RuleBook, Score};

use super::game::Game;
use super::record::GameRecord;

/// Configuration for a confrontation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfrontConfig {
    /// Number of games to play.
    pub games: usize,

    /// Seed of game 0; game `i` uses `seed_offset + i`.
    pub seed_offset: u64,

    /// Worker threads; 0 counts as 1.
    pub threads: usize,
}

impl Default for ConfrontConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed_offset: 0,
            threads: 1,
        }
    }
}

impl ConfrontConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    #[must_use]
    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Seed of game `index`.
    #[must_use]
    pub fn seed_of(&self, index: usize) -> u64 {
        self.seed_offset.wrapping_add(index as u64)
    }
}

/// Runs a series of games with seats built by `factory`.
pub struct Confrontation<F> {
    rules: Arc<RuleBook>,
    factory: F,
    config: ConfrontConfig,
}

impl<F> Confrontation<F>
where
    F: Fn() -> Vec<Seat> + Sync,
{
    #[must_use]
    pub fn new(rules: Arc<RuleBook>, factory: F, config: ConfrontConfig) -> Self {
        Self { rules, factory, config }
    }

    #[must_use]
    pub fn config(&self) -> &ConfrontConfig {
        &self.config
    }

    /// Play game `index` to completion.
    pub fn play_one(&self, index: usize) -> Result<GameRecord> {
        let seed = self.config.seed_of(index);
        let env = GameEnvironment::new(Arc::clone(&self.rules), seed);
        let record = Game::new(env, (self.factory)(), seed).run()?;
        debug!(game = index, seed, turns = record.len(), "confrontation game finished");
        Ok(record)
    }

    /// Play every game and aggregate the records.
    ///
    /// Games run on a dedicated pool of `threads` workers; records are
    /// folded in game order.
    pub fn run(&self) -> Result<ConfrontReport> {
        let games = self.config.games;
        let threads = self.config.threads.clamp(1, games.max(1));
        info!(games, threads, players = self.rules.num_players(), "confrontation started");

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| EnvError::WorkerPool(err.to_string()))?;
        let records = pool.install(|| {
            (0..games)
                .into_par_iter()
                .map(|index| self.play_one(index))
                .collect::<Result<Vec<_>>>()
        })?;

        let mut report = ConfrontReport::default();
        for record in &records {
            report.record(record);
        }
        info!(games = report.games(), "confrontation finished");
        Ok(report)
    }
}

/// Aggregated results of one policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyStats {
    /// Seats played (a policy seated twice counts twice per game).
    pub games: usize,

    /// `rank_counts[r]`: times the policy finished with rank `r + 1`.
    pub rank_counts: Vec<usize>,

    /// Summed final scores per rank.
    pub score_sums: Vec<Score>,
}

impl PolicyStats {
    fn add(&mut self, rank: usize, score: Score) {
        let slot = rank.saturating_sub(1);
        if self.rank_counts.len() <= slot {
            self.rank_counts.resize(slot + 1, 0);
            self.score_sums.resize(slot + 1, Score::default());
        }
        self.games += 1;
        self.rank_counts[slot] += 1;
        self.score_sums[slot] = self.score_sums[slot] + score;
    }
}

/// Per-policy results of a confrontation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfrontReport {
    games: usize,
    stats: FxHashMap<String, PolicyStats>,
}

impl ConfrontReport {
    /// Add one finished game.
    pub fn record(&mut self, record: &GameRecord) {
        self.games += 1;
        for (seat, policy) in record.policy_names.iter().enumerate() {
            let me = EntityId::player(PlayerId::new(seat as u8));
            let Some(standing) = record.standings.iter().find(|standing| standing.entity == me) else {
                continue;
            };
            self.stats
                .entry(policy.clone())
                .or_default()
                .add(standing.rank, standing.score);
        }
    }

    /// Number of games recorded.
    #[must_use]
    pub fn games(&self) -> usize {
        self.games
    }

    /// Policy names, sorted.
    #[must_use]
    pub fn policy_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stats.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn stats(&self, policy: &str) -> Option<&PolicyStats> {
        self.stats.get(policy)
    }

    /// Rank counts of `policy`, index 0 being first place.
    #[must_use]
    pub fn rank_counts(&self, policy: &str) -> Option<&[usize]> {
        self.stats.get(policy).map(|stats| stats.rank_counts.as_slice())
    }

    /// Average (money, bills) of `policy` when it finished with `rank`.
    ///
    /// `None` if the policy never finished there.
    #[must_use]
    pub fn average(&self, policy: &str, rank: usize) -> Option<(f64, f64)> {
        let stats = self.stats.get(policy)?;
        let slot = rank.checked_sub(1)?;
        let count = *stats.rank_counts.get(slot)?;
        if count == 0 {
            return None;
        }
        let sum = stats.score_sums[slot];
        Some((sum.money as f64 / count as f64, f64::from(sum.bills) / count as f64))
    }

    /// Share of seats of `policy` that finished first (ties included).
    #[must_use]
    pub fn win_rate(&self, policy: &str) -> Option<f64> {
        let stats = self.stats.get(policy)?;
        if stats.games == 0 {
            return None;
        }
        let wins = stats.rank_counts.first().copied().unwrap_or(0);
        Some(wins as f64 / stats.games as f64)
    }
}
