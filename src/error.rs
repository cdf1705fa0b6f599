//! Error taxonomy of the environment.
//!
//! - [`ConfigurationError`]: invalid `GameConfig`, raised before any game
//!   state exists.
//! - [`EnvError`]: failures of environment operations. Invalid-state kinds
//!   are caller bugs; illegal plays and rolls are recoverable by the driver.
//! - [`RecordError`]: encoding, decoding or replaying a game record.
//!
//! Every failing operation leaves the environment unchanged.

use thiserror::Error;

use crate::core::{CasinoId, PlayerId};
use crate::rules::{Operation, Phase};

/// Invalid configuration, naming the offending option.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid `{field}`: {reason}")]
pub struct ConfigurationError {
    /// Name of the `GameConfig` field at fault.
    pub field: &'static str,
    /// Human-readable description.
    pub reason: String,
}

impl ConfigurationError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors returned by `GameEnvironment` and its drivers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("cannot {operation} while {phase}")]
    InvalidState { operation: Operation, phase: Phase },

    #[error("{player} has no dice left in hand")]
    NoDiceInHand { player: PlayerId },

    #[error("{requested} cannot roll: it is {expected}'s turn")]
    WrongPlayer {
        expected: PlayerId,
        requested: PlayerId,
    },

    #[error("{play} is not a legal play (legal: {legal:?})")]
    IllegalPlay { play: CasinoId, legal: Vec<CasinoId> },

    #[error("illegal roll for {player}: {reason}")]
    IllegalRoll { player: PlayerId, reason: String },

    #[error("worker pool unavailable: {0}")]
    WorkerPool(String),
}

impl EnvError {
    /// Operation called against the wrong state machine state.
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            EnvError::InvalidState { .. } | EnvError::NoDiceInHand { .. } | EnvError::WrongPlayer { .. }
        )
    }

    /// A decision function produced something illegal; the driver may
    /// re-prompt or substitute the default decision.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EnvError::IllegalPlay { .. } | EnvError::IllegalRoll { .. })
    }
}

/// Errors of game records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("replay diverged at turn {turn}: {reason}")]
    Diverged { turn: usize, reason: String },
}

/// Result type for environment operations.
pub type Result<T> = std::result::Result<T, EnvError>;
