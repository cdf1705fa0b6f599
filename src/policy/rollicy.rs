//! Bundled rollicies.
//!
//! A rollicy decides how the acting player's dice are thrown. Anything other
//! than `RollDecision::Fair` must throw exactly the dice in hand; the
//! environment rejects mismatching rolls with `EnvError::IllegalRoll`.

use std::collections::VecDeque;

use crate::core::{CasinoId, EntityId, GameRng, PlayerId, Roll};
use crate::env::GameEnvironment;

use super::{RollDecision, Rollicy};

/// Always lets the environment roll.
#[derive(Clone, Copy, Debug, Default)]
pub struct FairDice;

impl Rollicy for FairDice {}

/// Replays queued rolls, then falls back to fair rolls.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRollicy {
    rolls: VecDeque<Roll>,
}

impl ScriptedRollicy {
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = Roll>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Queue another roll.
    pub fn push(&mut self, roll: Roll) {
        self.rolls.push_back(roll);
    }

    /// Rolls not yet used.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Rollicy for ScriptedRollicy {
    fn decide_roll(&mut self, _env: &GameEnvironment, _player: PlayerId, _rng: &mut GameRng) -> RollDecision {
        match self.rolls.pop_front() {
            Some(roll) => RollDecision::Manual(roll),
            None => RollDecision::Fair,
        }
    }
}

/// Biased dice: every die lands on a face with probability proportional to
/// its weight.
///
/// Weights that do not match the number of casinos, or that are all zero,
/// fall back to fair rolls.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedDice {
    weights: Vec<f32>,
}

impl LoadedDice {
    #[must_use]
    pub fn new(weights: Vec<f32>) -> Self {
        Self { weights }
    }

    /// Weights per face.
    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

impl Rollicy for LoadedDice {
    fn decide_roll(&mut self, env: &GameEnvironment, player: PlayerId, rng: &mut GameRng) -> RollDecision {
        let faces = env.rules().num_casinos();
        if self.weights.len() != faces {
            return RollDecision::Fair;
        }
        let mut roll = Roll::empty(env.rules().num_colours(), faces);
        for (colour, &dice) in env.dice_to_roll(player).iter().enumerate() {
            for _ in 0..dice {
                let Some(face) = rng.choose_weighted(&self.weights) else {
                    return RollDecision::Fair;
                };
                roll.add(EntityId(colour as u8), CasinoId(face as u8), 1);
            }
        }
        RollDecision::Manual(roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn env() -> GameEnvironment {
        GameEnvironment::from_config(&GameConfig::for_players(2), 4).unwrap()
    }

    #[test]
    fn test_scripted_then_fair() {
        let env = env();
        let player = env.current_player().unwrap();
        let roll = Roll::empty(3, 6).with_dice(EntityId(0), CasinoId(2), 8);
        let mut rollicy = ScriptedRollicy::new([roll.clone()]);
        let mut rng = GameRng::new(0);

        assert_eq!(rollicy.remaining(), 1);
        assert_eq!(rollicy.decide_roll(&env, player, &mut rng), RollDecision::Manual(roll));
        assert_eq!(rollicy.decide_roll(&env, player, &mut rng), RollDecision::Fair);
    }

    #[test]
    fn test_loaded_dice_respect_hand() {
        let mut env = env();
        let player = env.current_player().unwrap();
        let mut rollicy = LoadedDice::new(vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);

        let RollDecision::Manual(roll) = rollicy.decide_roll(&env, player, &mut GameRng::new(0)) else {
            panic!("expected a manual roll");
        };
        assert_eq!(roll.face_total(CasinoId(5)), roll.total());
        assert_eq!(roll.total(), env.dice_to_roll(player).iter().sum::<u32>());
        assert!(env.roll_with(player, roll).is_ok());
    }

    #[test]
    fn test_loaded_dice_fallbacks() {
        let env = env();
        let player = env.current_player().unwrap();
        let mut rng = GameRng::new(0);

        let mut wrong_len = LoadedDice::new(vec![1.0; 4]);
        assert_eq!(wrong_len.decide_roll(&env, player, &mut rng), RollDecision::Fair);

        let mut all_zero = LoadedDice::new(vec![0.0; 6]);
        assert_eq!(all_zero.decide_roll(&env, player, &mut rng), RollDecision::Fair);
    }
}
