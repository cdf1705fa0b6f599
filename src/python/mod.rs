//! Python bindings for the lasvegas environment.
//!
//! # Quick Start
//!
//! ```python
//! import lasvegas
//!
//! env = lasvegas.GameEnvironment(3, seed=42)
//! while not env.is_over():
//!     player = env.current_player
//!     env.roll(player)
//!     env.apply(env.legal_plays()[0])
//! print(env.ranking())
//!
//! duel = lasvegas.Confrontation(["greedy_score", "random"], games=1000, threads=4)
//! counts = duel.run()  # seats x ranks
//! ```

use pyo3::prelude::*;

mod py_confront;
mod py_core;
mod py_env;

pub use py_confront::*;
pub use py_core::*;
pub use py_env::*;

/// lasvegas: the Las Vegas dice game for bots and RL.
///
/// This module provides:
/// - GameConfig with rulebook defaults and validation
/// - GameEnvironment with numpy views of the board
/// - Confrontation between bundled policies
#[pymodule]
fn lasvegas(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGameConfig>()?;
    m.add_class::<PyGameEnvironment>()?;
    m.add_class::<PyConfrontation>()?;
    m.add("POLICY_NAMES", crate::policy::POLICY_NAMES.to_vec())?;
    Ok(())
}
