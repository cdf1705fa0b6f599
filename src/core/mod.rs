//! Core types: colours, players, casinos, rolls, RNG, configuration.
//!
//! These are the building blocks shared by the rules, the environment and
//! the decision functions. None of them know the game flow.

pub mod action;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;

pub use action::{CasinoId, Roll, RollSource, TurnRecord};
pub use config::{BillSupply, CasinoMinimum, ExtraCollection, GameConfig, OrderHint, Starter};
pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
