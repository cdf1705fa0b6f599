//! Decision functions: who picks the casino, and who throws the dice.
//!
//! Both capabilities are traits with a uniform-random default, so the null
//! decision function is simply a type that overrides nothing:
//!
//! - `Policy::decide_play`: a legal casino for the pending roll
//! - `Rollicy::decide_roll`: `Fair` (the environment rolls) or a manual roll
//!
//! Decision functions see the environment read-only and draw randomness
//! from the orchestrator's RNG, never from the environment's dice stream.
//!
//! ## Example
//!
//! ```
//! use lasvegas::core::{GameConfig, GameRng};
//! use lasvegas::env::GameEnvironment;
//! use lasvegas::policy::{by_name, Policy};
//!
//! let mut env = GameEnvironment::from_config(&GameConfig::for_players(2), 1).unwrap();
//! let player = env.current_player().unwrap();
//! env.roll(player).unwrap();
//!
//! let mut bot = by_name("greedy_score").unwrap();
//! let play = bot.decide_play(&env, &mut GameRng::new(0));
//! assert!(env.is_legal(play));
//! ```

pub mod bots;
pub mod rollicy;
pub mod seat;

pub use bots::{GreedyFirst, GreedyScore, GreedyShy, RandomPolicy};
pub use rollicy::{FairDice, LoadedDice, ScriptedRollicy};
pub use seat::Seat;

use crate::core::{CasinoId, GameRng, PlayerId, Roll};
use crate::env::GameEnvironment;

// =============================================================================
// Traits
// =============================================================================

/// Chooses the casino for the pending roll.
pub trait Policy: Send {
    /// Name used in reports and by [`by_name`].
    fn name(&self) -> &str;

    /// Pick a play. Defaults to a uniformly random legal play.
    fn decide_play(&mut self, env: &GameEnvironment, rng: &mut GameRng) -> CasinoId {
        random_legal_play(env, rng)
    }
}

/// Outcome of a rollicy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RollDecision {
    /// Let the environment throw the dice.
    Fair,
    /// Use this roll instead.
    Manual(Roll),
}

/// Decides how a player's dice are thrown.
pub trait Rollicy: Send {
    /// Defaults to a fair environment roll.
    fn decide_roll(&mut self, _env: &GameEnvironment, _player: PlayerId, _rng: &mut GameRng) -> RollDecision {
        RollDecision::Fair
    }
}

/// Uniformly random legal play; `CasinoId(0)` if none is legal.
#[must_use]
pub fn random_legal_play(env: &GameEnvironment, rng: &mut GameRng) -> CasinoId {
    rng.choose(&env.legal_plays()).copied().unwrap_or_default()
}

// =============================================================================
// Lookup
// =============================================================================

/// Names accepted by [`by_name`].
pub const POLICY_NAMES: [&str; 4] = ["random", "greedy_score", "greedy_first", "greedy_shy"];

/// Build a bundled policy from its name.
#[must_use]
pub fn by_name(name: &str) -> Option<Box<dyn Policy>> {
    let policy: Box<dyn Policy> = match name {
        "random" => Box::new(RandomPolicy),
        "greedy_score" => Box::new(GreedyScore),
        "greedy_first" => Box::new(GreedyFirst),
        "greedy_shy" => Box::new(GreedyShy),
        _ => return None,
    };
    Some(policy)
}
