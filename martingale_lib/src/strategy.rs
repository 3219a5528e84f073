//! Playing strategies. Both built-in strategies are pure threshold
//! comparisons against the best hand value, so a single parameterized type
//! covers them; no trait objects are needed.

use crate::hand::Hand;
use std::fmt::Display;

/// The two legal playing decisions. An out-of-contract decision is
/// unrepresentable by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Hit,
    Stand,
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Hit => write!(f, "hit"),
            Decision::Stand => write!(f, "stand"),
        }
    }
}

/// A stateless stand-threshold strategy: hit until the hand value reaches
/// the threshold, then stand. The caller must never ask for a decision on a
/// busted hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandThresholdStrategy {
    name: String,
    threshold: u32,
}

impl StandThresholdStrategy {
    /// Associated function to create a strategy standing at `threshold` or
    /// better.
    pub fn new(threshold: u32) -> Self {
        StandThresholdStrategy {
            name: format!("Always Stand at {}+", threshold),
            threshold,
        }
    }

    /// The "stand at 12" strategy.
    pub fn stand_at_12() -> Self {
        StandThresholdStrategy::new(12)
    }

    /// The "stand at 16" strategy.
    pub fn stand_at_16() -> Self {
        StandThresholdStrategy::new(16)
    }

    /// Pure decision function over the hand; never mutates it.
    pub fn decide(&self, hand: &Hand) -> Decision {
        debug_assert!(!hand.is_busted(), "asked to decide on a busted hand");
        if hand.value() >= self.threshold {
            Decision::Stand
        } else {
            Decision::Hit
        }
    }

    /// Human-readable name of the strategy.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stand threshold the strategy compares against.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Display for StandThresholdStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The built-in strategies under comparison, in menu order.
pub fn available_strategies() -> Vec<StandThresholdStrategy> {
    vec![
        StandThresholdStrategy::stand_at_12(),
        StandThresholdStrategy::stand_at_16(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Rank, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.add_card(Card::new(Suit::Clubs, rank));
        }
        hand
    }

    #[test]
    fn stand_at_12_threshold() {
        let strategy = StandThresholdStrategy::stand_at_12();
        assert_eq!(strategy.decide(&hand_of(&[Rank::Five, Rank::Six])), Decision::Hit);
        assert_eq!(strategy.decide(&hand_of(&[Rank::Five, Rank::Seven])), Decision::Stand);
        assert_eq!(strategy.decide(&hand_of(&[Rank::King, Rank::Nine])), Decision::Stand);
    }

    #[test]
    fn stand_at_16_threshold() {
        let strategy = StandThresholdStrategy::stand_at_16();
        assert_eq!(strategy.decide(&hand_of(&[Rank::Seven, Rank::Eight])), Decision::Hit);
        assert_eq!(strategy.decide(&hand_of(&[Rank::Seven, Rank::Nine])), Decision::Stand);
        assert_eq!(strategy.decide(&hand_of(&[Rank::King, Rank::Queen])), Decision::Stand);
    }

    #[test]
    fn soft_totals_use_best_value() {
        // A + 2 counts as 13, so stand-at-12 stands on it
        let strategy = StandThresholdStrategy::stand_at_12();
        assert_eq!(strategy.decide(&hand_of(&[Rank::Ace, Rank::Two])), Decision::Stand);
        // but stand-at-16 keeps hitting a soft 13
        let strategy = StandThresholdStrategy::stand_at_16();
        assert_eq!(strategy.decide(&hand_of(&[Rank::Ace, Rank::Two])), Decision::Hit);
    }

    #[test]
    fn registry_lists_both_strategies() {
        let strategies = available_strategies();
        assert_eq!(strategies.len(), 2);
        assert_eq!(strategies[0].threshold(), 12);
        assert_eq!(strategies[1].threshold(), 16);
        assert_eq!(strategies[0].name(), "Always Stand at 12+");
    }
}
