//! Driving games with seated policies.
//!
//! - [`Game`]: one game, one seat per regular player
//! - [`GameRecord`]: serialisable history of a game, with replay
//! - [`Confrontation`]: many games between fixed seats, aggregated into a
//!   [`ConfrontReport`]

pub mod confront;
pub mod game;
pub mod record;

pub use confront::{ConfrontConfig, ConfrontReport, Confrontation, PolicyStats};
pub use game::Game;
pub use record::GameRecord;
