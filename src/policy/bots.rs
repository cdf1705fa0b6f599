//! Bundled policies.
//!
//! - `RandomPolicy`: uniform legal play
//! - `GreedyScore`: best net gain on the chosen casino
//! - `GreedyFirst`: smallest gap to the leaders once the round resolves
//! - `GreedyShy`: fights for rich casinos only when the fight is close
//!
//! The greedy bots evaluate casinos as if the round ended right now, using
//! the same pure resolution as the environment.

use crate::core::{CasinoId, EntityId, GameRng, PlayerId, Roll};
use crate::env::GameEnvironment;
use crate::rules::resolve_casino;

use super::{random_legal_play, Policy};

/// Uniformly random legal play.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }
}

// =============================================================================
// Shared evaluation
// =============================================================================

/// Signed (money, bills) pair, so differences can go negative.
type Gain = (i64, i64);

fn acting(env: &GameEnvironment) -> Option<(PlayerId, &Roll)> {
    Some((env.current_player()?, env.pending_roll()?))
}

/// Dice on `casino` after moving the group showing that face.
fn placed_after(env: &GameEnvironment, roll: &Roll, casino: CasinoId) -> Vec<u32> {
    env.board()
        .placed(casino)
        .iter()
        .zip(roll.group(casino))
        .map(|(placed, moved)| placed + moved)
        .collect()
}

/// Gains of every scoreboard entry if `casino` resolved with `placed`.
fn projected_gains(env: &GameEnvironment, casino: CasinoId, placed: &[u32]) -> Vec<Gain> {
    let result = resolve_casino(casino, placed, env.casino_bills(casino));
    env.scoreboard()
        .iter()
        .map(|(entity, _)| {
            let (money, bills) = result.gain_of(entity);
            (money as i64, i64::from(bills))
        })
        .collect()
}

/// Pick the play maximising `key`; ties keep the lowest casino.
fn best_by<K: Ord>(legal: &[CasinoId], mut key: impl FnMut(CasinoId) -> K) -> Option<CasinoId> {
    let mut best: Option<(CasinoId, K)> = None;
    for &play in legal {
        let value = key(play);
        if best.as_ref().map_or(true, |(_, current)| value > *current) {
            best = Some((play, value));
        }
    }
    best.map(|(play, _)| play)
}

// =============================================================================
// GreedyScore
// =============================================================================

/// Maximises the money (then bills) it would hold on the chosen casino.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyScore;

impl Policy for GreedyScore {
    fn name(&self) -> &str {
        "greedy_score"
    }

    fn decide_play(&mut self, env: &GameEnvironment, rng: &mut GameRng) -> CasinoId {
        let Some((player, roll)) = acting(env) else {
            return random_legal_play(env, rng);
        };
        let me = EntityId::player(player);
        let legal = env.legal_plays();

        let chosen = best_by(&legal, |casino| {
            let bills = env.casino_bills(casino);
            let before = resolve_casino(casino, env.board().placed(casino), bills).gain_of(me);
            let after = resolve_casino(casino, &placed_after(env, roll, casino), bills).gain_of(me);
            (
                after.0 as i64 - before.0 as i64,
                i64::from(after.1) - i64::from(before.1),
            )
        });
        chosen.unwrap_or_else(|| random_legal_play(env, rng))
    }
}

// =============================================================================
// GreedyFirst
// =============================================================================

/// Minimises the sorted gaps to every rival, leader first.
///
/// Happily finishes third rather than second if it ends closer to first.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyFirst;

impl Policy for GreedyFirst {
    fn name(&self) -> &str {
        "greedy_first"
    }

    fn decide_play(&mut self, env: &GameEnvironment, rng: &mut GameRng) -> CasinoId {
        let Some((player, roll)) = acting(env) else {
            return random_legal_play(env, rng);
        };
        let me = EntityId::player(player);
        let Some(me_slot) = env.scoreboard().iter().position(|(entity, _)| entity == me) else {
            return random_legal_play(env, rng);
        };

        let casinos = env.rules().num_casinos();
        let before: Vec<Vec<Gain>> = CasinoId::all(casinos)
            .map(|casino| projected_gains(env, casino, env.board().placed(casino)))
            .collect();
        let mut totals: Vec<Gain> = env
            .scoreboard()
            .iter()
            .map(|(_, score)| (score.money as i64, i64::from(score.bills)))
            .collect();
        for gains in &before {
            for (total, gain) in totals.iter_mut().zip(gains) {
                total.0 += gain.0;
                total.1 += gain.1;
            }
        }

        let legal = env.legal_plays();
        let chosen = best_by(&legal, |casino| {
            let after = projected_gains(env, casino, &placed_after(env, roll, casino));
            let scores: Vec<Gain> = totals
                .iter()
                .zip(&before[casino.index()])
                .zip(&after)
                .map(|((total, old), new)| (total.0 - old.0 + new.0, total.1 - old.1 + new.1))
                .collect();
            let own = scores[me_slot];
            let mut gaps: Vec<Gain> = scores
                .iter()
                .map(|score| (score.0 - own.0, score.1 - own.1))
                .collect();
            gaps.sort_unstable_by(|a, b| b.cmp(a));
            // Smaller gaps are better
            std::cmp::Reverse(gaps)
        });
        chosen.unwrap_or_else(|| random_legal_play(env, rng))
    }
}

// =============================================================================
// GreedyShy
// =============================================================================

/// Walks casinos from the richest top bill down and plays the first one
/// where its dice lead or trail every rival by at most one. Otherwise it
/// plays at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyShy;

impl Policy for GreedyShy {
    fn name(&self) -> &str {
        "greedy_shy"
    }

    fn decide_play(&mut self, env: &GameEnvironment, rng: &mut GameRng) -> CasinoId {
        let Some(player) = env.current_player() else {
            return random_legal_play(env, rng);
        };
        let me = player.index();

        let mut casinos: Vec<CasinoId> = CasinoId::all(env.rules().num_casinos()).collect();
        casinos.sort_by_key(|&casino| std::cmp::Reverse(env.casino_bills(casino).last().copied()));

        for casino in casinos {
            if !env.is_legal(casino) {
                continue;
            }
            let placed = env.board().placed(casino);
            let advantage = placed
                .iter()
                .enumerate()
                .filter(|&(colour, _)| colour != me)
                .map(|(_, &dice)| i64::from(placed[me]) - i64::from(dice))
                .min()
                .unwrap_or(0);
            if (-1..=1).contains(&advantage) {
                return casino;
            }
        }
        random_legal_play(env, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BillSupply, CasinoMinimum, GameConfig, OrderHint, Starter};

    /// Two players, two casinos with bills [10, 50] each.
    fn duel() -> GameEnvironment {
        let config = GameConfig::default()
            .with_starting_dice(vec![vec![3, 0], vec![0, 3]])
            .with_casinos(2)
            .with_bills(BillSupply::PerCasino(vec![vec![10, 50], vec![10, 50]]))
            .with_casino_minimum(CasinoMinimum::Global(60))
            .with_order(OrderHint::Identity)
            .with_starter(Starter::Player(0))
            .with_rounds(1);
        GameEnvironment::from_config(&config, 0).unwrap()
    }

    fn roll(env: &mut GameEnvironment, player: u8, faces: &[u32]) {
        let mut roll = Roll::empty(2, 2);
        for (face, &dice) in faces.iter().enumerate() {
            roll.add(EntityId(player), CasinoId(face as u8), dice);
        }
        env.roll_with(PlayerId::new(player), roll).unwrap();
    }

    #[test]
    fn test_random_policy_plays_legal() {
        let mut env = duel();
        roll(&mut env, 0, &[1, 2]);
        let mut rng = GameRng::new(3);
        for _ in 0..20 {
            assert!(env.is_legal(RandomPolicy.decide_play(&env, &mut rng)));
        }
    }

    #[test]
    fn test_greedy_score_takes_free_money() {
        let mut env = duel();
        roll(&mut env, 0, &[2, 1]);
        env.apply(CasinoId(0)).unwrap();

        // Player 1 cannot beat 2 dice with 1 at casino 0, casino 1 is free.
        roll(&mut env, 1, &[1, 2]);
        assert_eq!(GreedyScore.decide_play(&env, &mut GameRng::new(0)), CasinoId(1));
    }

    #[test]
    fn test_greedy_score_breaks_ties_low() {
        let mut env = duel();
        roll(&mut env, 0, &[1, 2]);
        // Both casinos are empty and pay 50 to a lone player.
        assert_eq!(GreedyScore.decide_play(&env, &mut GameRng::new(0)), CasinoId(0));
    }

    #[test]
    fn test_greedy_first_prefers_denying_the_leader() {
        let config = GameConfig::default()
            .with_starting_dice(vec![vec![3, 0], vec![0, 3]])
            .with_casinos(2)
            .with_bills(BillSupply::PerCasino(vec![vec![5, 10], vec![10, 50]]))
            .with_casino_minimum(CasinoMinimum::PerCasino(vec![15, 60]))
            .with_order(OrderHint::Identity)
            .with_starter(Starter::Player(0))
            .with_rounds(1);
        let mut env = GameEnvironment::from_config(&config, 0).unwrap();
        roll(&mut env, 0, &[2, 1]);
        env.apply(CasinoId(1)).unwrap();

        // Casino 0 earns player 1 a 10, tying casino 1 wipes player 0's 50.
        roll(&mut env, 1, &[2, 1]);
        assert_eq!(GreedyScore.decide_play(&env, &mut GameRng::new(0)), CasinoId(0));
        assert_eq!(GreedyFirst.decide_play(&env, &mut GameRng::new(0)), CasinoId(1));
    }

    #[test]
    fn test_greedy_shy_contests_close_fights() {
        let mut env = duel();
        roll(&mut env, 0, &[0, 3]);
        env.apply(CasinoId(1)).unwrap();

        // Casino 1 is 0 vs 3: too far. Casino 0 is 0 vs 0: close.
        roll(&mut env, 1, &[2, 1]);
        assert_eq!(GreedyShy.decide_play(&env, &mut GameRng::new(0)), CasinoId(0));
    }

    #[test]
    fn test_greedy_bots_finish_games() {
        for name in ["greedy_score", "greedy_first", "greedy_shy"] {
            let mut bot = crate::policy::by_name(name).unwrap();
            let mut env = GameEnvironment::from_config(&GameConfig::for_players(3), 11).unwrap();
            let mut rng = GameRng::new(0);
            while !env.is_over() {
                let player = env.current_player().unwrap();
                env.roll(player).unwrap();
                let play = bot.decide_play(&env, &mut rng);
                env.apply(play).unwrap();
            }
            assert_eq!(env.ranking().len(), 3);
        }
    }
}
