//! Casino payout at the end of a round.
//!
//! Resolution is a pure function of the dice placed on one casino and the
//! bills stacked under it:
//!
//! 1. Colours with dice on the casino are grouped by die count.
//! 2. Groups are walked from the highest count down, each tier consuming
//!    the largest remaining bill.
//! 3. A group of one wins that bill. A tied group forfeits it: nobody is
//!    paid, and the next tier plays for the next bill.
//! 4. Bills left once every group has been walked stay under the casino.
//!
//! ```
//! use lasvegas::core::{CasinoId, EntityId};
//! use lasvegas::rules::{resolve_casino, TierOutcome};
//!
//! // Colours 0 and 1 tie with 3 dice, colour 2 has 1 die.
//! let result = resolve_casino(CasinoId(0), &[3, 3, 1], &[10_000, 40_000, 60_000]);
//!
//! assert!(matches!(result.tiers[0], TierOutcome::Forfeited { bill: 60_000, .. }));
//! assert_eq!(result.tiers[1], TierOutcome::Won { entity: EntityId(2), dice: 1, bill: 40_000 });
//! assert_eq!(result.leftover, vec![10_000]);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CasinoId, EntityId};

/// Outcome of one die-count tier at a casino.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierOutcome {
    /// A unique count at this tier wins the bill.
    Won { entity: EntityId, dice: u32, bill: u64 },
    /// Several colours share the count; the bill is lost to everyone.
    Forfeited {
        entities: SmallVec<[EntityId; 4]>,
        dice: u32,
        bill: u64,
    },
}

impl TierOutcome {
    /// Bill consumed by this tier.
    #[must_use]
    pub fn bill(&self) -> u64 {
        match self {
            TierOutcome::Won { bill, .. } | TierOutcome::Forfeited { bill, .. } => *bill,
        }
    }

    /// Winner of this tier, if unique.
    #[must_use]
    pub fn winner(&self) -> Option<EntityId> {
        match self {
            TierOutcome::Won { entity, .. } => Some(*entity),
            TierOutcome::Forfeited { .. } => None,
        }
    }
}

/// Payout of a single casino.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasinoResolution {
    /// Casino resolved.
    pub casino: CasinoId,
    /// One outcome per tier that consumed a bill, highest count first.
    pub tiers: Vec<TierOutcome>,
    /// Bills still under the casino, ascending.
    pub leftover: Vec<u64>,
}

impl CasinoResolution {
    /// Money won by `entity` at this casino and the number of bills.
    #[must_use]
    pub fn gain_of(&self, entity: EntityId) -> (u64, u32) {
        self.tiers
            .iter()
            .filter(|tier| tier.winner() == Some(entity))
            .fold((0, 0), |(money, bills), tier| (money + tier.bill(), bills + 1))
    }

    /// Total money of forfeited tiers.
    #[must_use]
    pub fn forfeited(&self) -> u64 {
        self.tiers
            .iter()
            .filter(|tier| tier.winner().is_none())
            .map(TierOutcome::bill)
            .sum()
    }
}

/// Group colours by die count, highest first. Colours with no dice are skipped.
#[must_use]
pub fn dice_tiers(placed: &[u32]) -> Vec<(u32, SmallVec<[EntityId; 4]>)> {
    let mut present: Vec<(u32, EntityId)> = placed
        .iter()
        .enumerate()
        .filter(|(_, dice)| **dice > 0)
        .map(|(colour, &dice)| (dice, EntityId(colour as u8)))
        .collect();
    present.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut tiers: Vec<(u32, SmallVec<[EntityId; 4]>)> = Vec::new();
    for (dice, colour) in present {
        match tiers.last_mut() {
            Some((count, members)) if *count == dice => members.push(colour),
            _ => tiers.push((dice, SmallVec::from_elem(colour, 1))),
        }
    }
    tiers
}

/// Resolve one casino.
///
/// `placed[c]` is the number of dice of colour `c` on the casino and
/// `bills_ascending` the stack under it, largest last.
#[must_use]
pub fn resolve_casino(casino: CasinoId, placed: &[u32], bills_ascending: &[u64]) -> CasinoResolution {
    let mut remaining = bills_ascending.to_vec();
    let mut tiers = Vec::new();

    for (dice, members) in dice_tiers(placed) {
        let Some(bill) = remaining.pop() else {
            break;
        };
        let outcome = if members.len() == 1 {
            TierOutcome::Won {
                entity: members[0],
                dice,
                bill,
            }
        } else {
            TierOutcome::Forfeited {
                entities: members,
                dice,
                bill,
            }
        };
        tiers.push(outcome);
    }

    CasinoResolution {
        casino,
        tiers,
        leftover: remaining,
    }
}
