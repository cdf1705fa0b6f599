//! Confrontation bindings for Python.

use std::sync::Arc;

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::GameConfig;
use crate::play::{ConfrontConfig, ConfrontReport, Confrontation};
use crate::policy::{Seat, POLICY_NAMES};
use crate::rules::RuleBook;

use super::py_core::{config_err, env_err, PyGameConfig};

/// Python wrapper for Confrontation with bundled policies.
///
/// Seat `i` plays `policies[i]`.
#[pyclass(name = "Confrontation")]
pub struct PyConfrontation {
    rules: Arc<RuleBook>,
    policies: Vec<String>,
    config: ConfrontConfig,
    report: Option<ConfrontReport>,
}

#[pymethods]
impl PyConfrontation {
    /// Create a confrontation.
    ///
    /// # Arguments
    /// - policies: Bundled policy name per seat
    /// - games: Number of games (default: 100)
    /// - seed_offset: Seed of the first game (default: 0)
    /// - threads: Worker threads (default: 1)
    /// - config: Game rules; defaults to the rulebook for len(policies) players
    #[new]
    #[pyo3(signature = (policies, games = 100, seed_offset = 0, threads = 1, config = None))]
    fn new(
        policies: Vec<String>,
        games: usize,
        seed_offset: u64,
        threads: usize,
        config: Option<PyRef<'_, PyGameConfig>>,
    ) -> PyResult<Self> {
        if let Some(unknown) = policies.iter().find(|name| !POLICY_NAMES.contains(&name.as_str())) {
            return Err(PyValueError::new_err(format!(
                "unknown policy '{unknown}', expected one of {POLICY_NAMES:?}"
            )));
        }
        let rules = match config {
            Some(config) => config.rules.clone(),
            None => RuleBook::from_config(&GameConfig::for_players(policies.len())).map_err(config_err)?,
        };
        if policies.len() != rules.num_players() {
            return Err(PyValueError::new_err(format!(
                "{} policies for {} players",
                policies.len(),
                rules.num_players()
            )));
        }
        Ok(Self {
            rules: Arc::new(rules),
            policies,
            config: ConfrontConfig::new()
                .with_games(games)
                .with_seed_offset(seed_offset)
                .with_threads(threads),
            report: None,
        })
    }

    /// Play every game. Returns rank counts as a `seats x ranks` matrix.
    ///
    /// Seats sharing a policy share a row of the report, so their rows are
    /// equal.
    fn run<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<usize>>> {
        let rules = Arc::clone(&self.rules);
        let policies = self.policies.clone();
        let config = self.config.clone();
        let report = py
            .allow_threads(move || {
                let factory = || {
                    policies
                        .iter()
                        .filter_map(|name| Seat::bundled(name))
                        .collect::<Vec<_>>()
                };
                Confrontation::new(rules, factory, config).run()
            })
            .map_err(env_err)?;

        let ranks = self.rules.collectors().len();
        let mut counts = Vec::with_capacity(self.policies.len() * ranks);
        for name in &self.policies {
            let row = report.rank_counts(name).unwrap_or(&[]);
            counts.extend((0..ranks).map(|rank| row.get(rank).copied().unwrap_or(0)));
        }
        self.report = Some(report);

        PyArray1::from_vec_bound(py, counts)
            .reshape([self.policies.len(), ranks])
            .map_err(|e| PyValueError::new_err(format!("{e}")))
    }

    /// Average `(money, bills)` of `policy` at `rank` (1-based).
    fn average(&self, policy: &str, rank: usize) -> PyResult<Option<(f64, f64)>> {
        Ok(self.last_report()?.average(policy, rank))
    }

    /// Share of first places of `policy`.
    fn win_rate(&self, policy: &str) -> PyResult<Option<f64>> {
        Ok(self.last_report()?.win_rate(policy))
    }

    #[getter]
    fn policies(&self) -> Vec<String> {
        self.policies.clone()
    }

    #[getter]
    fn games(&self) -> usize {
        self.config.games
    }
}

impl PyConfrontation {
    fn last_report(&self) -> PyResult<&ConfrontReport> {
        self.report
            .as_ref()
            .ok_or_else(|| PyRuntimeError::new_err("confrontation has not been run"))
    }
}
