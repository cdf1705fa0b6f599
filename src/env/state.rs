//! Mutable game state.
//!
//! `GameState` aggregates everything that changes during a game. It is
//! owned by a `GameEnvironment`, which hands out shared references only;
//! every mutation goes through the environment's operations.
//!
//! Histories use `im` persistent vectors, so cloning a state (for
//! look-ahead bots) is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::order::RoundOrder;
use crate::board::{Bank, BillLedger, CasinoBills, DiceBoard};
use crate::core::{CasinoId, EntityId, PlayerId, Roll, RollSource, TurnRecord};
use crate::rules::{CasinoResolution, Phase, Scoreboard};

/// Everything that happened at the end of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Round resolved (1-based).
    pub round: usize,
    /// Payout of every casino, in casino order.
    pub casinos: Vec<CasinoResolution>,
    /// Extra dice the environment placed before the first roll (solo mode).
    pub solo_placements: Vec<(EntityId, CasinoId)>,
}

impl RoundSummary {
    /// Money `entity` won this round and the number of bills.
    #[must_use]
    pub fn gain_of(&self, entity: EntityId) -> (u64, u32) {
        self.casinos
            .iter()
            .map(|casino| casino.gain_of(entity))
            .fold((0, 0), |(money, bills), (m, b)| (money + m, bills + b))
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    // === Progression ===
    /// Current round (1-based once the game started).
    pub round: usize,

    /// Turn machine state.
    pub phase: Phase,

    /// Resolved cycle and chip.
    pub order: RoundOrder,

    /// Players still holding dice this round; the front one acts.
    pub turn_queue: Vector<PlayerId>,

    // === Material ===
    /// Dice in hands and on casinos.
    pub board: DiceBoard,

    /// Bills under the casinos.
    pub casino_bills: CasinoBills,

    /// Bills not on the board.
    pub bank: Bank,

    // === Scores ===
    pub scoreboard: Scoreboard,

    /// Money flow per casino.
    pub ledger: BillLedger,

    // === Turn ===
    /// Roll awaiting a play.
    pub pending_roll: Option<(Roll, RollSource)>,

    /// Solo placements of the current round.
    pub solo_placements: Vec<(EntityId, CasinoId)>,

    // === History ===
    /// Every applied turn.
    pub history: Vector<TurnRecord>,

    /// Every resolved round.
    pub rounds: Vector<RoundSummary>,
}

impl GameState {
    /// Player expected to act, if any.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.phase.actor()
    }

    /// Summary of the last resolved round.
    #[must_use]
    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.rounds.last()
    }

    /// Turns played in `round`.
    pub fn turns_of(&self, round: usize) -> impl Iterator<Item = &TurnRecord> {
        self.history.iter().filter(move |turn| turn.round == round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::resolve_casino;

    #[test]
    fn test_round_summary_gain() {
        let summary = RoundSummary {
            round: 1,
            casinos: vec![
                resolve_casino(CasinoId(0), &[2, 1], &[10, 50]),
                resolve_casino(CasinoId(1), &[0, 3], &[20, 40]),
            ],
            solo_placements: Vec::new(),
        };
        assert_eq!(summary.gain_of(EntityId(0)), (50, 1));
        assert_eq!(summary.gain_of(EntityId(1)), (50, 2));
    }

    #[test]
    fn test_round_summary_serialization() {
        let summary = RoundSummary {
            round: 2,
            casinos: vec![resolve_casino(CasinoId(0), &[1, 1, 2], &[10, 20])],
            solo_placements: vec![(EntityId(1), CasinoId(4))],
        };
        let json = serde_json::to_string(&summary).unwrap();
        let deserialized: RoundSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, deserialized);
    }
}
