//! Game rules as pure data and pure functions.
//!
//! - `RuleBook`: validated, canonical parameters
//! - `Phase` / `transition`: the turn state machine
//! - `resolve_casino`: end-of-round payout of one casino
//! - `Scoreboard` / `competition_ranks`: scores and live ranking
//!
//! Nothing here owns mutable game state; `GameEnvironment` drives it.

pub mod engine;
pub mod ranking;
pub mod resolution;
pub mod rulebook;

pub use engine::{transition, Operation, Phase, Transition};
pub use ranking::{competition_ranks, Score, Scoreboard, Standing};
pub use resolution::{dice_tiers, resolve_casino, CasinoResolution, TierOutcome};
pub use rulebook::RuleBook;
