//! Complete record of a played game.
//!
//! A record holds the canonical configuration, the environment seed and
//! every turn. Fair rolls are re-thrown from the seed during replay and
//! compared with the recorded ones, so a replay also checks that the
//! dice stream is reproduced exactly.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, RollSource, TurnRecord};
use crate::env::{GameEnvironment, RoundSummary};
use crate::error::RecordError;
use crate::rules::Standing;

/// A finished (or interrupted) game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Seed of the environment's dice stream.
    pub seed: u64,

    /// Canonical configuration (`RuleBook::to_config`).
    pub config: GameConfig,

    /// Seat name per regular player.
    pub seat_names: Vec<String>,

    /// Policy name per regular player.
    pub policy_names: Vec<String>,

    /// Every applied turn.
    pub turns: Vec<TurnRecord>,

    /// Every resolved round.
    pub rounds: Vec<RoundSummary>,

    /// Final standings, best first.
    pub standings: Vec<Standing>,
}

impl GameRecord {
    /// Snapshot the history of `env`.
    #[must_use]
    pub fn capture(env: &GameEnvironment, seat_names: Vec<String>, policy_names: Vec<String>) -> Self {
        Self {
            seed: env.seed(),
            config: env.rules().to_config(),
            seat_names,
            policy_names,
            turns: env.history().iter().cloned().collect(),
            rounds: env.state().rounds.iter().cloned().collect(),
            standings: env.ranking(),
        }
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RecordError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a record produced by [`GameRecord::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Number of turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Re-drive a fresh environment through every recorded turn.
    ///
    /// Fails if a recorded turn is rejected, a fair roll comes out
    /// differently, or the final standings differ.
    pub fn replay(&self) -> Result<GameEnvironment, RecordError> {
        let mut env = GameEnvironment::from_config(&self.config, self.seed)?;

        for (index, turn) in self.turns.iter().enumerate() {
            let diverged = |reason: String| RecordError::Diverged { turn: index, reason };
            if env.current_player() != Some(turn.player) {
                return Err(diverged(format!(
                    "expected {}, environment awaits {:?}",
                    turn.player,
                    env.current_player()
                )));
            }
            match turn.source {
                RollSource::Fair => {
                    if *env.roll(turn.player)? != turn.roll {
                        return Err(diverged("fair roll differs from the record".into()));
                    }
                }
                RollSource::Manual => {
                    env.roll_with(turn.player, turn.roll.clone())?;
                }
            }
            env.apply(turn.play)?;
        }

        if env.ranking() != self.standings {
            return Err(RecordError::Diverged {
                turn: self.turns.len(),
                reason: "final standings differ".into(),
            });
        }
        Ok(env)
    }
}
