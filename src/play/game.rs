//! Orchestrator: drives one game with a seat per regular player.
//!
//! Each turn asks the acting seat's rollicy, then its policy, and applies
//! the result. Illegal decisions are replaced by the default (fair roll,
//! uniformly random play) and logged, unless the game is strict.

use tracing::{debug, warn};

use crate::core::{GameRng, PlayerId};
use crate::env::{GameEnvironment, StepOutcome};
use crate::error::Result;
use crate::policy::{random_legal_play, RollDecision, Seat};

use super::record::GameRecord;

/// One game in progress.
pub struct Game {
    env: GameEnvironment,
    seats: Vec<Seat>,
    rng: GameRng,
    strict: bool,
}

impl Game {
    /// Seat `seats` in player order; missing seats get random bots.
    ///
    /// `seed` drives the decision functions only. The dice follow the
    /// environment's own seed.
    #[must_use]
    pub fn new(env: GameEnvironment, mut seats: Vec<Seat>, seed: u64) -> Self {
        let players = env.rules().num_players();
        if seats.len() > players {
            warn!(seats = seats.len(), players, "more seats than players, extra seats ignored");
            seats.truncate(players);
        }
        while seats.len() < players {
            seats.push(Seat::random(format!("Bot {}", seats.len())));
        }
        Self {
            env,
            seats,
            rng: GameRng::new(seed).for_context("policies"),
            strict: false,
        }
    }

    /// Return illegal decisions as errors instead of substituting defaults.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn env(&self) -> &GameEnvironment {
        &self.env
    }

    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Seat of `player`.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> &Seat {
        &self.seats[player.index()]
    }

    #[must_use]
    pub fn into_env(self) -> GameEnvironment {
        self.env
    }

    /// Play one turn. Returns `None` once the game is over.
    pub fn step(&mut self) -> Result<Option<StepOutcome>> {
        let Some(player) = self.env.current_player() else {
            return Ok(None);
        };
        let seat = &mut self.seats[player.index()];

        match seat.rollicy.decide_roll(&self.env, player, &mut self.rng) {
            RollDecision::Fair => {
                self.env.roll(player)?;
            }
            RollDecision::Manual(roll) => match self.env.roll_with(player, roll).map(|_| ()) {
                Ok(_) => {}
                Err(err) if err.is_recoverable() && !self.strict => {
                    warn!(seat = %seat.name, %err, "illegal roll replaced by a fair roll");
                    self.env.roll(player)?;
                }
                Err(err) => return Err(err),
            },
        }

        let play = seat.policy.decide_play(&self.env, &mut self.rng);
        let outcome = match self.env.apply(play) {
            Ok(outcome) => outcome,
            Err(err) if err.is_recoverable() && !self.strict => {
                warn!(seat = %seat.name, %err, "illegal play replaced by a random play");
                let fallback = random_legal_play(&self.env, &mut self.rng);
                self.env.apply(fallback)?
            }
            Err(err) => return Err(err),
        };
        Ok(Some(outcome))
    }

    /// Play until the game is over and record it.
    pub fn run(mut self) -> Result<GameRecord> {
        while let Some(outcome) = self.step()? {
            if let StepOutcome::GameOver(_) = outcome {
                break;
            }
        }
        debug!(seed = self.env.seed(), turns = self.env.history().len(), "game recorded");
        Ok(self.record())
    }

    /// Record of the game so far.
    #[must_use]
    pub fn record(&self) -> GameRecord {
        GameRecord::capture(
            &self.env,
            self.seats.iter().map(|seat| seat.name.clone()).collect(),
            self.seats.iter().map(|seat| seat.policy_name().to_string()).collect(),
        )
    }
}
