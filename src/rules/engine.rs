//! Turn state machine.
//!
//! The environment is always in one [`Phase`]. Every mutating operation maps
//! to a [`Transition`], and [`transition`] is the single pure function
//! deciding whether that transition is allowed from the current phase:
//!
//! ```text
//! AwaitingRoll(p) --Rolled--> AwaitingPlay(p)
//! AwaitingPlay(p) --Played{next: Some(q)}--> AwaitingRoll(q)
//! AwaitingPlay(p) --Played{next: None}--> RoundResolution
//! RoundResolution --Resolved{starter: Some(s)}--> AwaitingRoll(s)
//! RoundResolution --Resolved{starter: None}--> GameOver
//! ```

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::error::EnvError;

/// Current state of the turn machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The player must throw the dice left in hand.
    AwaitingRoll(PlayerId),
    /// The player rolled and must choose a casino.
    AwaitingPlay(PlayerId),
    /// Every hand is empty; casinos pay out.
    RoundResolution,
    /// All rounds played.
    GameOver,
}

impl Phase {
    /// Player expected to act, if any.
    #[must_use]
    pub fn actor(self) -> Option<PlayerId> {
        match self {
            Phase::AwaitingRoll(p) | Phase::AwaitingPlay(p) => Some(p),
            Phase::RoundResolution | Phase::GameOver => None,
        }
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Phase::GameOver
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::AwaitingRoll(p) => write!(f, "awaiting a roll from {p}"),
            Phase::AwaitingPlay(p) => write!(f, "awaiting a play from {p}"),
            Phase::RoundResolution => write!(f, "resolving the round"),
            Phase::GameOver => write!(f, "the game is over"),
        }
    }
}

/// Operation requested by a caller, for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Roll,
    Play,
    Resolve,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Roll => "roll",
            Operation::Play => "play",
            Operation::Resolve => "resolve a round",
        };
        f.write_str(name)
    }
}

/// Event moving the machine forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The acting player's dice were thrown.
    Rolled,
    /// A play was applied; `next` is the next player with dice, if any.
    Played { next: Option<PlayerId> },
    /// Casinos paid out; `starter` opens the next round, if any.
    Resolved { starter: Option<PlayerId> },
}

impl Transition {
    /// Operation this transition stands for.
    #[must_use]
    pub fn operation(self) -> Operation {
        match self {
            Transition::Rolled => Operation::Roll,
            Transition::Played { .. } => Operation::Play,
            Transition::Resolved { .. } => Operation::Resolve,
        }
    }
}

/// Compute the phase reached by applying `event` in `phase`.
///
/// Returns `EnvError::InvalidState` for every pair not listed in the
/// module diagram.
pub fn transition(phase: Phase, event: Transition) -> Result<Phase, EnvError> {
    match (phase, event) {
        (Phase::AwaitingRoll(p), Transition::Rolled) => Ok(Phase::AwaitingPlay(p)),
        (Phase::AwaitingPlay(_), Transition::Played { next: Some(q) }) => Ok(Phase::AwaitingRoll(q)),
        (Phase::AwaitingPlay(_), Transition::Played { next: None }) => Ok(Phase::RoundResolution),
        (Phase::RoundResolution, Transition::Resolved { starter: Some(s) }) => Ok(Phase::AwaitingRoll(s)),
        (Phase::RoundResolution, Transition::Resolved { starter: None }) => Ok(Phase::GameOver),
        (phase, event) => Err(EnvError::InvalidState {
            operation: event.operation(),
            phase,
        }),
    }
}
