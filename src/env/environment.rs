//! The game environment: single owner of all game state.
//!
//! ## Turn loop
//!
//! ```text
//! roll(p) / roll_with(p, roll)  ->  legal_plays()  ->  apply(play)
//! ```
//!
//! `apply` moves the whole group of dice showing the chosen face, then
//! hands the turn to the next player still holding dice. When every hand
//! is empty the round resolves on its own: casinos pay out, the chip
//! passes, and either the next round begins or the game ends.
//!
//! Every random draw (dice, open order slots, bill shuffle, solo
//! placements) comes from the environment's own [`GameRng`], so a seed
//! reproduces a whole game.
//!
//! ## Example
//!
//! ```
//! use lasvegas::core::GameConfig;
//! use lasvegas::env::{GameEnvironment, StepOutcome};
//!
//! let mut env = GameEnvironment::from_config(&GameConfig::for_players(3), 42).unwrap();
//!
//! while !env.is_over() {
//!     let player = env.current_player().unwrap();
//!     env.roll(player).unwrap();
//!     let play = env.legal_plays()[0];
//!     if let StepOutcome::GameOver(_) = env.apply(play).unwrap() {
//!         break;
//!     }
//! }
//!
//! let ranking = env.ranking();
//! assert_eq!(ranking[0].rank, 1);
//! ```

use std::sync::Arc;

use im::Vector;
use tracing::{debug, info, trace};

use super::order::RoundOrder;
use super::state::{GameState, RoundSummary};
use crate::board::{Bank, BillLedger, CasinoBills, DiceBoard};
use crate::core::{
    CasinoId, EntityId, GameConfig, GameRng, GameRngState, PlayerId, Roll, RollSource, TurnRecord,
};
use crate::error::{EnvError, Result};
use crate::rules::{
    resolve_casino, transition, Operation, Phase, RuleBook, Scoreboard, Standing, Transition,
};

/// What an applied play led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Another turn in the same round; this player rolls next.
    NextTurn(PlayerId),
    /// The round resolved and the next one has begun.
    RoundOver(RoundSummary),
    /// The last round resolved.
    GameOver(RoundSummary),
}

impl StepOutcome {
    /// Summary of the round that just resolved, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&RoundSummary> {
        match self {
            StepOutcome::NextTurn(_) => None,
            StepOutcome::RoundOver(summary) | StepOutcome::GameOver(summary) => Some(summary),
        }
    }
}

/// Deterministic, seedable Las Vegas game.
///
/// Cloning is cheap: the rule book is shared and histories are persistent.
#[derive(Clone, Debug)]
pub struct GameEnvironment {
    rules: Arc<RuleBook>,
    seed: u64,
    rng: GameRng,
    state: GameState,
}

impl GameEnvironment {
    /// Start a game from validated rules.
    #[must_use]
    pub fn new(rules: Arc<RuleBook>, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let state = fresh_state(&rules, &mut rng);
        let mut env = Self {
            rules,
            seed,
            rng,
            state,
        };
        env.begin_round();
        env
    }

    /// Validate `config` and start a game.
    pub fn from_config(config: &GameConfig, seed: u64) -> Result<Self> {
        let rules = RuleBook::from_config(config)?;
        Ok(Self::new(Arc::new(rules), seed))
    }

    /// Restart with the same rules and seed.
    pub fn reset(&mut self) {
        self.reseed(self.seed);
    }

    /// Restart with the same rules and a new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = GameRng::new(seed);
        self.state = fresh_state(&self.rules, &mut self.rng);
        self.begin_round();
    }

    // =========================================================================
    // Turn operations
    // =========================================================================

    /// Throw every die left in `player`'s hand.
    pub fn roll(&mut self, player: PlayerId) -> Result<&Roll> {
        let next = self.check_roller(player)?;

        let faces = self.rules.num_casinos();
        let mut roll = Roll::empty(self.rules.num_colours(), faces);
        for (colour, &dice) in self.state.board.hand(player).iter().enumerate() {
            for _ in 0..dice {
                let face = self.rng.roll_die(faces);
                roll.add(EntityId(colour as u8), CasinoId(face as u8), 1);
            }
        }
        trace!(round = self.state.round, %player, dice = roll.total(), "rolled");

        Ok(self.store_roll(next, roll, RollSource::Fair))
    }

    /// Accept a roll produced outside the environment.
    ///
    /// The roll must have the board's shape and throw exactly the dice of
    /// each colour in `player`'s hand.
    pub fn roll_with(&mut self, player: PlayerId, roll: Roll) -> Result<&Roll> {
        let next = self.check_roller(player)?;
        self.check_roll(player, &roll)?;
        trace!(round = self.state.round, %player, dice = roll.total(), "manual roll");

        Ok(self.store_roll(next, roll, RollSource::Manual))
    }

    /// Faces of the pending roll, ascending. Empty unless a play is awaited.
    #[must_use]
    pub fn legal_plays(&self) -> Vec<CasinoId> {
        match (&self.state.phase, &self.state.pending_roll) {
            (Phase::AwaitingPlay(_), Some((roll, _))) => roll.faces_present().collect(),
            _ => Vec::new(),
        }
    }

    /// Check if `play` is currently legal.
    #[must_use]
    pub fn is_legal(&self, play: CasinoId) -> bool {
        match (&self.state.phase, &self.state.pending_roll) {
            (Phase::AwaitingPlay(_), Some((roll, _))) => roll.face_total(play) > 0,
            _ => false,
        }
    }

    /// Move every die showing `play` to that casino.
    pub fn apply(&mut self, play: CasinoId) -> Result<StepOutcome> {
        let Phase::AwaitingPlay(player) = self.state.phase else {
            return Err(EnvError::InvalidState {
                operation: Operation::Play,
                phase: self.state.phase,
            });
        };
        if !self.is_legal(play) {
            return Err(EnvError::IllegalPlay {
                play,
                legal: self.legal_plays(),
            });
        }
        let Some((roll, source)) = self.state.pending_roll.take() else {
            return Err(EnvError::InvalidState {
                operation: Operation::Play,
                phase: self.state.phase,
            });
        };

        let group = roll.group(play);
        let moved = self.state.board.move_group(player, play, &group);
        debug!(round = self.state.round, %player, casino = %play, moved, "played");

        self.state.history.push_back(TurnRecord {
            round: self.state.round,
            player,
            roll,
            source,
            play,
            moved,
        });

        self.state.turn_queue.pop_front();
        if self.state.board.has_dice(player) {
            self.state.turn_queue.push_back(player);
        }
        let next = self.state.turn_queue.front().copied();
        self.state.phase = transition(self.state.phase, Transition::Played { next })?;

        if let Some(next) = next {
            return Ok(StepOutcome::NextTurn(next));
        }

        let summary = self.resolve_round();
        self.state.order.pass_chip();
        if self.state.round >= self.rules.num_rounds() {
            self.state.phase = transition(self.state.phase, Transition::Resolved { starter: None })?;
            let standings: Vec<(usize, usize, u64)> = self
                .ranking()
                .iter()
                .map(|s| (s.entity.index(), s.rank, s.score.money))
                .collect();
            info!(rounds = self.state.round, ?standings, "game over");
            Ok(StepOutcome::GameOver(summary))
        } else {
            self.begin_round();
            Ok(StepOutcome::RoundOver(summary))
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check if every round has been played.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    /// Standings of every collecting colour, best first.
    #[must_use]
    pub fn ranking(&self) -> Vec<Standing> {
        self.state.scoreboard.standings()
    }

    /// Ranks aligned with `scoreboard().iter()`.
    #[must_use]
    pub fn ranks(&self) -> Vec<usize> {
        self.state.scoreboard.ranks()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Shared rule book.
    #[must_use]
    pub fn rules(&self) -> &Arc<RuleBook> {
        &self.rules
    }

    /// Seed of the current game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Full state, read-only.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Current round (1-based).
    #[must_use]
    pub fn round(&self) -> usize {
        self.state.round
    }

    /// Player expected to roll or play.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.state.current_player()
    }

    /// Roll awaiting a play.
    #[must_use]
    pub fn pending_roll(&self) -> Option<&Roll> {
        self.state.pending_roll.as_ref().map(|(roll, _)| roll)
    }

    /// Dice of each colour `player` will throw next.
    #[must_use]
    pub fn dice_to_roll(&self, player: PlayerId) -> &[u32] {
        self.state.board.hand(player)
    }

    #[must_use]
    pub fn board(&self) -> &DiceBoard {
        &self.state.board
    }

    /// Bills under `casino`, ascending.
    #[must_use]
    pub fn casino_bills(&self, casino: CasinoId) -> &[u64] {
        self.state.casino_bills.stack(casino)
    }

    #[must_use]
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.state.scoreboard
    }

    /// Every applied turn of the game.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.state.history
    }

    #[must_use]
    pub fn ledger(&self) -> &BillLedger {
        &self.state.ledger
    }

    /// Summary of the last resolved round.
    #[must_use]
    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.state.last_round()
    }

    /// Players still holding dice, in the order they will act.
    pub fn upcoming(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.state.turn_queue.iter().copied()
    }

    /// Position of the dice stream.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn check_roller(&self, player: PlayerId) -> Result<Phase> {
        let next = transition(self.state.phase, Transition::Rolled)?;
        if let Phase::AwaitingRoll(expected) = self.state.phase {
            if expected != player {
                return Err(EnvError::WrongPlayer {
                    expected,
                    requested: player,
                });
            }
        }
        if !self.state.board.has_dice(player) {
            return Err(EnvError::NoDiceInHand { player });
        }
        Ok(next)
    }

    fn check_roll(&self, player: PlayerId, roll: &Roll) -> Result<()> {
        let illegal = |reason: String| EnvError::IllegalRoll { player, reason };
        if roll.colour_count() != self.rules.num_colours() || roll.face_count() != self.rules.num_casinos() {
            return Err(illegal(format!(
                "expected {} colours x {} faces, got {} x {}",
                self.rules.num_colours(),
                self.rules.num_casinos(),
                roll.colour_count(),
                roll.face_count()
            )));
        }
        for (colour, &dice) in self.state.board.hand(player).iter().enumerate() {
            let thrown = roll.colour_total(EntityId(colour as u8));
            if thrown != dice {
                return Err(illegal(format!(
                    "{} dice of {} thrown, {dice} in hand",
                    thrown,
                    self.rules.label(EntityId(colour as u8))
                )));
            }
        }
        Ok(())
    }

    fn store_roll(&mut self, next: Phase, roll: Roll, source: RollSource) -> &Roll {
        self.state.phase = next;
        &self.state.pending_roll.insert((roll, source)).0
    }

    fn begin_round(&mut self) {
        self.state.round += 1;
        self.state.board.refill(self.rules.starting_dice());
        self.state.solo_placements = self.distribute_solo();

        let drawn = self
            .state
            .casino_bills
            .replenish(&mut self.state.bank, self.rules.casino_minimums());
        for (total, amount) in self.state.ledger.drawn.iter_mut().zip(drawn) {
            *total += amount;
        }

        let board = &self.state.board;
        self.state.turn_queue = self
            .state
            .order
            .turn_sequence()
            .filter(|&player| board.has_dice(player))
            .collect();

        // RuleBook guarantees a die to roll after the solo placement
        let starter = self.state.turn_queue.front().copied();
        debug_assert!(starter.is_some(), "round {} starts with every hand empty", self.state.round);
        let next = transition(self.state.phase, Transition::Resolved { starter });
        debug_assert!(next.is_ok(), "round started while {}", self.state.phase);
        self.state.phase = next.unwrap_or(Phase::GameOver);
        debug!(
            round = self.state.round,
            starter = ?starter,
            solo_placed = self.state.solo_placements.len(),
            "round started"
        );
    }

    /// Place the solo extra dice, one at a time, on uniformly random casinos.
    fn distribute_solo(&mut self) -> Vec<(EntityId, CasinoId)> {
        let count = self.rules.solo_distribution_count();
        if !self.rules.is_solo() || count == 0 {
            return Vec::new();
        }
        let player = PlayerId::new(0);
        let mut placements = Vec::with_capacity(count);
        for _ in 0..count {
            let weights: Vec<f32> = self
                .state
                .board
                .hand(player)
                .iter()
                .enumerate()
                .map(|(colour, &dice)| if colour == player.index() { 0.0 } else { dice as f32 })
                .collect();
            let Some(colour) = self.rng.choose_weighted(&weights) else {
                break;
            };
            let colour = EntityId(colour as u8);
            let casino = CasinoId(self.rng.roll_die(self.rules.num_casinos()) as u8);
            if self.state.board.drop_die(player, colour, casino) {
                placements.push((colour, casino));
            }
        }
        placements
    }

    fn resolve_round(&mut self) -> RoundSummary {
        let mut casinos = Vec::with_capacity(self.rules.num_casinos());
        for casino in CasinoId::all(self.rules.num_casinos()) {
            let result = resolve_casino(
                casino,
                self.state.board.placed(casino),
                self.state.casino_bills.stack(casino),
            );
            let slot = casino.index();
            for tier in &result.tiers {
                let bill = tier.bill();
                match tier.winner() {
                    Some(entity) if self.rules.collects(entity) => {
                        self.state.scoreboard.award(entity, bill);
                        self.state.ledger.awarded[slot] += bill;
                    }
                    Some(_) => {
                        self.state.bank.give_back(casino, bill);
                        self.state.ledger.returned[slot] += bill;
                    }
                    None => {
                        self.state.bank.give_back(casino, bill);
                        self.state.ledger.forfeited[slot] += bill;
                    }
                }
            }
            self.state.casino_bills.set_stack(casino, result.leftover.clone());
            debug!(
                round = self.state.round,
                %casino,
                tiers = result.tiers.len(),
                forfeited = result.forfeited(),
                leftover = result.leftover.len(),
                "casino resolved"
            );
            casinos.push(result);
        }

        let summary = RoundSummary {
            round: self.state.round,
            casinos,
            solo_placements: std::mem::take(&mut self.state.solo_placements),
        };
        self.state.rounds.push_back(summary.clone());
        summary
    }
}

fn fresh_state(rules: &RuleBook, rng: &mut GameRng) -> GameState {
    let order = RoundOrder::resolve(rules.order_hint(), rules.starter(), rules.num_players(), rng);
    let bank = Bank::new(rules.bills(), rng);
    GameState {
        round: 0,
        phase: Phase::RoundResolution,
        order,
        turn_queue: Vector::new(),
        board: DiceBoard::new(rules.starting_dice(), rules.num_casinos()),
        casino_bills: CasinoBills::new(rules.num_casinos()),
        bank,
        scoreboard: Scoreboard::new(&rules.collectors()),
        ledger: BillLedger::new(rules.num_casinos()),
        pending_roll: None,
        solo_placements: Vec::new(),
        history: Vector::new(),
        rounds: Vector::new(),
    }
}
