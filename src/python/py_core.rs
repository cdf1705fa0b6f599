//! Configuration and error bindings for Python.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::{BillSupply, CasinoMinimum, ExtraCollection, GameConfig, OrderHint, Starter};
use crate::error::{ConfigurationError, EnvError, RecordError};
use crate::rules::RuleBook;

/// Map an environment error to a Python exception.
///
/// Configuration errors and illegal plays or rolls raise `ValueError`,
/// invalid-state and worker pool errors raise `RuntimeError`.
pub(crate) fn env_err(err: EnvError) -> PyErr {
    if err.is_invalid_state() || matches!(err, EnvError::WorkerPool(_)) {
        PyRuntimeError::new_err(err.to_string())
    } else {
        PyValueError::new_err(err.to_string())
    }
}

pub(crate) fn config_err(err: ConfigurationError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub(crate) fn record_err(err: RecordError) -> PyErr {
    match err {
        RecordError::Env(err) => env_err(err),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn bad_option(field: &str, expected: &str) -> PyErr {
    PyValueError::new_err(format!("invalid `{field}`: expected {expected}"))
}

/// `True`/`False` for every pool, or one flag per pool.
fn extract_collection(value: &Bound<'_, PyAny>) -> PyResult<ExtraCollection> {
    if let Ok(all) = value.extract::<bool>() {
        return Ok(ExtraCollection::All(all));
    }
    value
        .extract::<Vec<bool>>()
        .map(ExtraCollection::PerPool)
        .map_err(|_| bad_option("extra_collects_bills", "a bool or a list of bools"))
}

/// `"random"`, `"identity"`, or a list of player indices and `None`s.
fn extract_order(value: &Bound<'_, PyAny>) -> PyResult<OrderHint> {
    if let Ok(name) = value.extract::<String>() {
        return match name.as_str() {
            "random" => Ok(OrderHint::Random),
            "identity" => Ok(OrderHint::Identity),
            _ => Err(bad_option("order", "'random', 'identity' or a list")),
        };
    }
    value
        .extract::<Vec<Option<usize>>>()
        .map(OrderHint::Partial)
        .map_err(|_| bad_option("order", "'random', 'identity' or a list"))
}

/// `"random"`, `"first"`, or a player index.
fn extract_starter(value: &Bound<'_, PyAny>) -> PyResult<Starter> {
    if let Ok(player) = value.extract::<usize>() {
        return Ok(Starter::Player(player));
    }
    match value.extract::<String>().as_deref() {
        Ok("random") => Ok(Starter::Random),
        Ok("first") => Ok(Starter::FirstInOrder),
        _ => Err(bad_option("starter", "'random', 'first' or a player index")),
    }
}

/// A shared list of bills, or one list per casino.
fn extract_bills(value: &Bound<'_, PyAny>) -> PyResult<BillSupply> {
    if let Ok(shared) = value.extract::<Vec<u64>>() {
        return Ok(BillSupply::Shared(shared));
    }
    value
        .extract::<Vec<Vec<u64>>>()
        .map(BillSupply::PerCasino)
        .map_err(|_| bad_option("bills", "a list of bills or a list of lists"))
}

/// One minimum for every casino, or one per casino.
fn extract_minimum(value: &Bound<'_, PyAny>) -> PyResult<CasinoMinimum> {
    if let Ok(global) = value.extract::<u64>() {
        return Ok(CasinoMinimum::Global(global));
    }
    value
        .extract::<Vec<u64>>()
        .map(CasinoMinimum::PerCasino)
        .map_err(|_| bad_option("casino_minimum", "an int or a list of ints"))
}

/// Keyword options shared by `GameConfig(...)` and `GameEnvironment(...)`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_config(
    num_players: Option<usize>,
    num_extra_pools: Option<usize>,
    extra_dice_counts: Option<Vec<u32>>,
    extra_collects_bills: Option<&Bound<'_, PyAny>>,
    own_dice_count: Option<u32>,
    starting_dice: Option<Vec<Vec<u32>>>,
    order: Option<&Bound<'_, PyAny>>,
    starter: Option<&Bound<'_, PyAny>>,
    num_casinos: Option<usize>,
    bills: Option<&Bound<'_, PyAny>>,
    casino_minimum: Option<&Bound<'_, PyAny>>,
    num_rounds: Option<usize>,
    solo_distribution_count: Option<usize>,
) -> PyResult<GameConfig> {
    let mut config = GameConfig {
        num_players,
        num_extra_pools,
        extra_dice_counts,
        own_dice_count,
        starting_dice,
        solo_distribution_count,
        ..GameConfig::default()
    };
    if let Some(value) = extra_collects_bills {
        config.extra_collects_bills = Some(extract_collection(value)?);
    }
    if let Some(value) = order {
        config.order = extract_order(value)?;
    }
    if let Some(value) = starter {
        config.starter = extract_starter(value)?;
    }
    if let Some(count) = num_casinos {
        config.num_casinos = count;
    }
    if let Some(value) = bills {
        config.bills = extract_bills(value)?;
    }
    if let Some(value) = casino_minimum {
        config.casino_minimum = extract_minimum(value)?;
    }
    if let Some(rounds) = num_rounds {
        config.num_rounds = rounds;
    }
    Ok(config)
}

/// Python wrapper for GameConfig, validated on construction.
#[pyclass(name = "GameConfig")]
#[derive(Clone, Debug)]
pub struct PyGameConfig {
    pub config: GameConfig,
    pub rules: RuleBook,
}

impl PyGameConfig {
    pub(crate) fn validated(config: GameConfig) -> PyResult<Self> {
        let rules = RuleBook::from_config(&config).map_err(config_err)?;
        Ok(Self { config, rules })
    }
}

#[pymethods]
impl PyGameConfig {
    /// Create a configuration. Every option defaults to the rulebook.
    ///
    /// # Arguments
    /// - num_players: Regular players (required unless starting_dice is set)
    /// - extra_collects_bills: bool, or one bool per extra pool
    /// - order: 'random', 'identity', or a partial list with None slots
    /// - starter: 'random', 'first', or a player index
    /// - bills: shared list of bills, or one list per casino
    /// - casino_minimum: int, or one int per casino
    #[new]
    #[pyo3(signature = (
        num_players = None,
        *,
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
        Self::validated(config)
    }

    #[getter]
    fn num_players(&self) -> usize {
        self.rules.num_players()
    }

    #[getter]
    fn num_colours(&self) -> usize {
        self.rules.num_colours()
    }

    #[getter]
    fn num_casinos(&self) -> usize {
        self.rules.num_casinos()
    }

    #[getter]
    fn num_rounds(&self) -> usize {
        self.rules.num_rounds()
    }

    /// Starting hands: one row per player, one column per colour.
    #[getter]
    fn starting_dice(&self) -> Vec<Vec<u32>> {
        self.rules.starting_dice().as_slice().to_vec()
    }

    /// Minimum money of every casino.
    #[getter]
    fn casino_minimums(&self) -> Vec<u64> {
        self.rules.casino_minimums().to_vec()
    }

    fn __repr__(&self) -> String {
        format!("GameConfig({:?})", self.rules.to_config())
    }
}
