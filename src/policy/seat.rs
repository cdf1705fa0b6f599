//! A seat at the table: a display name plus its decision functions.

use super::bots::RandomPolicy;
use super::rollicy::FairDice;
use super::{by_name, Policy, Rollicy};

/// One regular player as seen by the orchestrator.
pub struct Seat {
    pub name: String,
    pub policy: Box<dyn Policy>,
    pub rollicy: Box<dyn Rollicy>,
}

impl Seat {
    /// Seat with fair dice.
    #[must_use]
    pub fn new(name: impl Into<String>, policy: Box<dyn Policy>) -> Self {
        Self {
            name: name.into(),
            policy,
            rollicy: Box::new(FairDice),
        }
    }

    /// Random bot with fair dice.
    #[must_use]
    pub fn random(name: impl Into<String>) -> Self {
        Self::new(name, Box::new(RandomPolicy))
    }

    /// Bundled policy by name, seated under that name.
    #[must_use]
    pub fn bundled(policy: &str) -> Option<Self> {
        Some(Self::new(policy, by_name(policy)?))
    }

    #[must_use]
    pub fn with_rollicy(mut self, rollicy: Box<dyn Rollicy>) -> Self {
        self.rollicy = rollicy;
        self
    }

    /// Name of the seated policy.
    #[must_use]
    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seat")
            .field("name", &self.name)
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_seat() {
        let seat = Seat::bundled("greedy_shy").unwrap();
        assert_eq!(seat.name, "greedy_shy");
        assert_eq!(seat.policy_name(), "greedy_shy");
        assert!(Seat::bundled("nope").is_none());
    }

    #[test]
    fn test_random_seat_debug() {
        let seat = Seat::random("Bot 1");
        assert_eq!(seat.policy_name(), "random");
        assert!(format!("{seat:?}").contains("Bot 1"));
    }
}
