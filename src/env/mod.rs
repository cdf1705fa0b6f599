//! The game environment and the state it owns.
//!
//! ## Key Types
//!
//! - `GameEnvironment`: the turn state machine (roll, legal plays, apply)
//! - `GameState`: everything that changes during a game
//! - `RoundOrder`: resolved cycle and first-player chip
//! - `StepOutcome` / `RoundSummary`: what an applied play led to

pub mod environment;
pub mod order;
pub mod state;

pub use environment::{GameEnvironment, StepOutcome};
pub use order::RoundOrder;
pub use state::{GameState, RoundSummary};
