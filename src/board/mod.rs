//! Physical game material: dice and bills.
//!
//! ## Key Types
//!
//! - `DiceBoard`: dice in hands and on casinos
//! - `Bank`: shuffled bill pile(s)
//! - `CasinoBills`: bill stacks under casinos
//! - `BillLedger`: where each casino's money went

pub mod bills;
pub mod dice;

pub use bills::{Bank, BillLedger, CasinoBills};
pub use dice::DiceBoard;
