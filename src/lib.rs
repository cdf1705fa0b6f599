//! # lasvegas
//!
//! A deterministic environment for the Las Vegas dice game, built for bots,
//! policy confrontations and RL.
//!
//! ## Design Principles
//!
//! 1. **Single Source of Truth**: `GameEnvironment` owns every piece of game
//!    state. Policies only see it through read-only accessors.
//!
//! 2. **Reproducible**: one seeded `GameRng` per environment drives every
//!    random draw (dice, turn order, bill piles, solo distribution). The same
//!    seed replays the same game bit for bit.
//!
//! 3. **Configuration Over Convention**: player count, extra dice, bills,
//!    minimums, casinos and rounds all come from `GameConfig`, validated
//!    once into a `RuleBook`.
//!
//! ## Architecture
//!
//! - **Pure Rules**: phase transitions, casino resolution and ranking are
//!   pure functions, tested apart from the state machine.
//!
//! - **Persistent Data Structures**: turn queue and history use `im-rs`, so
//!   look-ahead bots clone an environment cheaply.
//!
//! ## Modules
//!
//! - `core`: Identifiers, rolls, RNG, raw configuration
//! - `error`: Configuration, environment and record errors
//! - `board`: Dice matrices, casino bill stacks, bank piles
//! - `rules`: RuleBook, phases, casino resolution, scores and ranks
//! - `env`: The game environment and its state
//! - `policy`: Policy and Rollicy traits, bundled bots, seats
//! - `play`: Orchestrator, game records, confrontations
//! - `python`: PyO3 bindings (feature `python`)
//!
//! ## Example
//!
//! ```
//! use lasvegas::{GameConfig, GameEnvironment};
//!
//! let mut env = GameEnvironment::from_config(&GameConfig::for_players(3), 7).unwrap();
//! while let Some(player) = env.current_player() {
//!     env.roll(player).unwrap();
//!     let play = env.legal_plays()[0];
//!     env.apply(play).unwrap();
//! }
//! assert_eq!(env.ranking().len(), 3);
//! ```

pub mod board;
pub mod core;
pub mod env;
pub mod error;
pub mod play;
pub mod policy;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    CasinoId, EntityId, PlayerId, PlayerMap,
    GameRng, GameRngState,
    Roll, RollSource, TurnRecord,
    BillSupply, CasinoMinimum, ExtraCollection, GameConfig, OrderHint, Starter,
};

pub use crate::error::{ConfigurationError, EnvError, RecordError, Result};

pub use crate::board::{Bank, BillLedger, CasinoBills, DiceBoard};

pub use crate::rules::{
    resolve_casino, transition, CasinoResolution, Phase, RuleBook,
    Score, Scoreboard, Standing, TierOutcome, Transition,
};

pub use crate::env::{GameEnvironment, GameState, RoundOrder, RoundSummary, StepOutcome};

pub use crate::policy::{Policy, RollDecision, Rollicy, Seat};

pub use crate::play::{ConfrontConfig, ConfrontReport, Confrontation, Game, GameRecord};
