//! Environment bindings for Python.

use std::sync::Arc;

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{CasinoId, EntityId, PlayerId, Roll};
use crate::env::{GameEnvironment, StepOutcome};
use crate::play::GameRecord;

use super::py_core::{build_config, env_err, record_err, PyGameConfig};

fn player_id(player: usize) -> PyResult<PlayerId> {
    u8::try_from(player)
        .map(PlayerId::new)
        .map_err(|_| PyValueError::new_err(format!("no player {player}")))
}

fn matrix<'py>(py: Python<'py>, data: Vec<u32>, rows: usize, cols: usize) -> PyResult<Bound<'py, PyArray2<u32>>> {
    PyArray1::from_vec_bound(py, data)
        .reshape([rows, cols])
        .map_err(|e| PyValueError::new_err(format!("{e}")))
}

/// Roll counts as a `colours x casinos` row-major vector.
fn roll_counts(roll: &Roll) -> Vec<u32> {
    let mut counts = Vec::with_capacity(roll.colour_count() * roll.face_count());
    for colour in 0..roll.colour_count() {
        for face in CasinoId::all(roll.face_count()) {
            counts.push(roll.count(EntityId(colour as u8), face));
        }
    }
    counts
}

/// Python wrapper for GameEnvironment.
///
/// Players, colours and casinos are plain 0-based indices.
#[pyclass(name = "GameEnvironment")]
#[derive(Clone)]
pub struct PyGameEnvironment {
    env: GameEnvironment,
}

#[pymethods]
impl PyGameEnvironment {
    /// Create an environment. Keyword options mirror `GameConfig`.
    ///
    /// # Arguments
    /// - num_players: Regular players
    /// - seed: RNG seed for deterministic games
    /// - config: A prebuilt GameConfig, used instead of the keyword options
    #[new]
    #[pyo3(signature = (
        num_players = None,
        *,
        seed = 0,
        config = None,
        num_extra_pools = None,
        extra_dice_counts = None,
        extra_collects_bills = None,
        own_dice_count = None,
        starting_dice = None,
        order = None,
        starter = None,
        num_casinos = None,
        bills = None,
        casino_minimum = None,
        num_rounds = None,
        solo_distribution_count = None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        num_players: Option<usize>,
        seed: u64,
        config: Option<PyRef<'_, PyGameConfig>>,
        num_extra_pools: Option<usize>,
        extra_dice_counts: Option<Vec<u32>>,
        extra_collects_bills: Option<Bound<'_, PyAny>>,
        own_dice_count: Option<u32>,
        starting_dice: Option<Vec<Vec<u32>>>,
        order: Option<Bound<'_, PyAny>>,
        starter: Option<Bound<'_, PyAny>>,
        num_casinos: Option<usize>,
        bills: Option<Bound<'_, PyAny>>,
        casino_minimum: Option<Bound<'_, PyAny>>,
        num_rounds: Option<usize>,
        solo_distribution_count: Option<usize>,
    ) -> PyResult<Self> {
        let rules = match config {
            Some(config) => config.rules.clone(),
            None => {
                let config = build_config(
                    num_players,
                    num_extra_pools,
                    extra_dice_counts,
                    extra_collects_bills.as_ref(),
                    own_dice_count,
                    starting_dice,
                    order.as_ref(),
                    starter.as_ref(),
                    num_casinos,
                    bills.as_ref(),
                    casino_minimum.as_ref(),
                    num_rounds,
                    solo_distribution_count,
                )?;
                PyGameConfig::validated(config)?.rules
            }
        };
        Ok(Self {
            env: GameEnvironment::new(Arc::new(rules), seed),
        })
    }

    /// Restart the game, optionally with a new seed.
    #[pyo3(signature = (seed = None))]
    fn reset(&mut self, seed: Option<u64>) {
        match seed {
            Some(seed) => self.env.reseed(seed),
            None => self.env.reset(),
        }
    }

    /// Roll the dice in `player`'s hand. Returns the roll as a
    /// `colours x casinos` count matrix.
    fn roll<'py>(&mut self, py: Python<'py>, player: usize) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let roll = self.env.roll(player_id(player)?).map_err(env_err)?;
        let (rows, cols) = (roll.colour_count(), roll.face_count());
        matrix(py, roll_counts(roll), rows, cols)
    }

    /// Provide the roll: one list of faces (casino indices) per colour.
    fn roll_with<'py>(
        &mut self,
        py: Python<'py>,
        player: usize,
        faces: Vec<Vec<usize>>,
    ) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let rules = self.env.rules();
        let roll = Roll::from_faces(rules.num_colours(), rules.num_casinos(), &faces)
            .ok_or_else(|| PyValueError::new_err("faces do not fit the board"))?;
        let roll = self.env.roll_with(player_id(player)?, roll).map_err(env_err)?;
        let (rows, cols) = (roll.colour_count(), roll.face_count());
        matrix(py, roll_counts(roll), rows, cols)
    }

    /// Casinos playable with the pending roll.
    fn legal_plays(&self) -> Vec<usize> {
        self.env.legal_plays().into_iter().map(CasinoId::index).collect()
    }

    /// Play the pending roll on `casino`.
    ///
    /// Returns `("next_turn", player)`, `("round_over", None)` or
    /// `("game_over", None)`.
    fn apply(&mut self, casino: usize) -> PyResult<(&'static str, Option<usize>)> {
        let play = u8::try_from(casino)
            .map(CasinoId)
            .map_err(|_| PyValueError::new_err(format!("no casino {casino}")))?;
        Ok(match self.env.apply(play).map_err(env_err)? {
            StepOutcome::NextTurn(player) => ("next_turn", Some(player.index())),
            StepOutcome::RoundOver(_) => ("round_over", None),
            StepOutcome::GameOver(_) => ("game_over", None),
        })
    }

    fn is_over(&self) -> bool {
        self.env.is_over()
    }

    /// Standings as `(colour, money, bills, rank)`, best first.
    fn ranking(&self) -> Vec<(usize, u64, u32, usize)> {
        self.env
            .ranking()
            .into_iter()
            .map(|standing| (standing.entity.index(), standing.score.money, standing.score.bills, standing.rank))
            .collect()
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.env.seed()
    }

    #[getter]
    fn round(&self) -> usize {
        self.env.round()
    }

    #[getter]
    fn current_player(&self) -> Option<usize> {
        self.env.current_player().map(PlayerId::index)
    }

    /// Dice on the casinos: `casinos x colours`.
    fn board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let rules = self.env.rules();
        let data = self.env.board().placed_matrix().to_vec();
        matrix(py, data, rules.num_casinos(), rules.num_colours())
    }

    /// Dice in hand: `players x colours`.
    fn hands<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let rules = self.env.rules();
        let data = self.env.board().hands_matrix().to_vec();
        matrix(py, data, rules.num_players(), rules.num_colours())
    }

    /// The pending roll (`colours x casinos`), if any.
    fn current_roll<'py>(&self, py: Python<'py>) -> PyResult<Option<Bound<'py, PyArray2<u32>>>> {
        self.env
            .pending_roll()
            .map(|roll| matrix(py, roll_counts(roll), roll.colour_count(), roll.face_count()))
            .transpose()
    }

    /// Bills under `casino`, ascending.
    fn casino_bills(&self, casino: usize) -> PyResult<Vec<u64>> {
        if casino >= self.env.rules().num_casinos() {
            return Err(PyValueError::new_err(format!("no casino {casino}")));
        }
        Ok(self.env.casino_bills(CasinoId(casino as u8)).to_vec())
    }

    /// Label of a colour (`Player n` or `Extra n`).
    fn label(&self, colour: usize) -> PyResult<String> {
        if colour >= self.env.rules().num_colours() {
            return Err(PyValueError::new_err(format!("no colour {colour}")));
        }
        Ok(self.env.rules().label(EntityId(colour as u8)))
    }

    /// Bincode-encoded record of the game so far.
    fn record<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<u8>>> {
        let players = self.env.rules().num_players();
        let names: Vec<String> = PlayerId::all(players).map(|player| player.to_string()).collect();
        let record = GameRecord::capture(&self.env, names, vec!["external".to_string(); players]);
        let bytes = record.to_bytes().map_err(record_err)?;
        Ok(PyArray1::from_vec_bound(py, bytes))
    }

    /// Rebuild an environment by replaying a record from `record()`.
    #[staticmethod]
    fn replay(bytes: Vec<u8>) -> PyResult<Self> {
        let record = GameRecord::from_bytes(&bytes).map_err(record_err)?;
        let env = record.replay().map_err(record_err)?;
        Ok(Self { env })
    }

    fn __repr__(&self) -> String {
        format!(
            "GameEnvironment(players={}, round={}, phase={:?})",
            self.env.rules().num_players(),
            self.env.round(),
            self.env.phase()
        )
    }
}
