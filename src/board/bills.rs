//! Bills: the bank they are drawn from and the stacks under casinos.
//!
//! - `Bank`: one shuffled pile shared by all casinos, or one pile per casino.
//!   Bills are drawn from the front and returned to the back.
//! - `CasinoBills`: the stack under every casino, kept ascending so the
//!   largest bill is on top and resolved first.
//! - `BillLedger`: per-casino totals of what was drawn and where it went.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{BillSupply, CasinoId, GameRng};

/// Bills not currently under a casino.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    piles: Vec<VecDeque<u64>>,
    shared: bool,
}

impl Bank {
    /// Shuffle the supply into a fresh bank.
    #[must_use]
    pub fn new(supply: &BillSupply, rng: &mut GameRng) -> Self {
        let (piles, shared) = match supply {
            BillSupply::Shared(bills) => (vec![bills.clone()], true),
            BillSupply::PerCasino(piles) => (piles.clone(), false),
        };
        let piles = piles
            .into_iter()
            .map(|mut pile| {
                rng.shuffle(&mut pile);
                VecDeque::from(pile)
            })
            .collect();
        Self { piles, shared }
    }

    fn pile(&self, casino: CasinoId) -> usize {
        if self.shared {
            0
        } else {
            casino.index()
        }
    }

    /// Check if every casino draws from the same pile.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.shared
    }

    /// Draw the next bill for `casino`.
    pub fn draw(&mut self, casino: CasinoId) -> Option<u64> {
        let pile = self.pile(casino);
        self.piles.get_mut(pile)?.pop_front()
    }

    /// Return a bill that left `casino` without being scored.
    pub fn give_back(&mut self, casino: CasinoId, bill: u64) {
        let pile = self.pile(casino);
        if let Some(pile) = self.piles.get_mut(pile) {
            pile.push_back(bill);
        }
    }

    /// Bills left in the bank.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.piles.iter().map(VecDeque::len).sum()
    }

    /// Money left in the bank.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.piles.iter().flatten().sum()
    }
}

/// Bill stacks under the casinos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasinoBills {
    stacks: Vec<Vec<u64>>,
}

impl CasinoBills {
    /// Empty stacks for `casino_count` casinos.
    #[must_use]
    pub fn new(casino_count: usize) -> Self {
        Self {
            stacks: vec![Vec::new(); casino_count],
        }
    }

    /// Bills under `casino`, ascending (top of the stack last).
    #[must_use]
    pub fn stack(&self, casino: CasinoId) -> &[u64] {
        &self.stacks[casino.index()]
    }

    /// Largest bill under `casino`.
    #[must_use]
    pub fn top(&self, casino: CasinoId) -> Option<u64> {
        self.stacks[casino.index()].last().copied()
    }

    /// Money under `casino`.
    #[must_use]
    pub fn total(&self, casino: CasinoId) -> u64 {
        self.stacks[casino.index()].iter().sum()
    }

    /// Money under every casino.
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.stacks.iter().flatten().sum()
    }

    /// Top up every casino, in index order, to its minimum.
    ///
    /// Leftover bills count toward the minimum. Drawing stops early if the
    /// bank runs dry. Returns the money drawn per casino.
    pub fn replenish(&mut self, bank: &mut Bank, minimums: &[u64]) -> Vec<u64> {
        self.stacks
            .iter_mut()
            .zip(minimums)
            .enumerate()
            .map(|(index, (stack, &minimum))| {
                let casino = CasinoId(index as u8);
                let mut total: u64 = stack.iter().sum();
                let mut drawn = 0;
                while total < minimum {
                    let Some(bill) = bank.draw(casino) else {
                        break;
                    };
                    stack.push(bill);
                    total += bill;
                    drawn += bill;
                }
                stack.sort_unstable();
                drawn
            })
            .collect()
    }

    /// Replace the stack under `casino` after resolution.
    pub fn set_stack(&mut self, casino: CasinoId, mut bills: Vec<u64>) {
        bills.sort_unstable();
        self.stacks[casino.index()] = bills;
    }

    /// All stacks in casino order.
    #[must_use]
    pub fn stacks(&self) -> &[Vec<u64>] {
        &self.stacks
    }
}

/// Where the money of each casino went, over a whole game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLedger {
    /// Money drawn from the bank.
    pub drawn: Vec<u64>,
    /// Money scored by collectors.
    pub awarded: Vec<u64>,
    /// Money lost to ties, returned to the bank.
    pub forfeited: Vec<u64>,
    /// Money won by non-collecting pools, returned to the bank.
    pub returned: Vec<u64>,
}

impl BillLedger {
    /// Zeroed ledger for `casino_count` casinos.
    #[must_use]
    pub fn new(casino_count: usize) -> Self {
        Self {
            drawn: vec![0; casino_count],
            awarded: vec![0; casino_count],
            forfeited: vec![0; casino_count],
            returned: vec![0; casino_count],
        }
    }

    /// Money that left `casino` during resolutions.
    #[must_use]
    pub fn paid_out(&self, casino: CasinoId) -> u64 {
        let i = casino.index();
        self.awarded[i] + self.forfeited[i] + self.returned[i]
    }
}
