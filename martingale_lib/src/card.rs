//! The card model. Cards are fungible values; duplicates across the decks of
//! a multi-deck shoe are expected, so `Card` is `Copy` and carries no
//! identity beyond its rank and suit.

use serde::Serialize;
use std::fmt::Display;

/// The four suits of a standard deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        write!(f, "{}", s)
    }
}

/// The thirteen ranks of a standard deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        write!(f, "{}", s)
    }
}

/// A single playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Associated function to create a new `Card`.
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }

    /// The nominal blackjack value of the card. Face cards count 10 and an
    /// Ace counts 11 here; demotion of Aces to 1 is handled by the hand
    /// value calculation, not the card.
    pub fn value(&self) -> u32 {
        match self.rank {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    /// Returns true if the card is an Ace.
    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_values() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Two).value(), 2);
        assert_eq!(Card::new(Suit::Clubs, Rank::Ten).value(), 10);
        assert_eq!(Card::new(Suit::Spades, Rank::Jack).value(), 10);
        assert_eq!(Card::new(Suit::Diamonds, Rank::Queen).value(), 10);
        assert_eq!(Card::new(Suit::Hearts, Rank::King).value(), 10);
        assert_eq!(Card::new(Suit::Hearts, Rank::Ace).value(), 11);
    }

    #[test]
    fn card_display() {
        let card = Card::new(Suit::Spades, Rank::Ace);
        assert_eq!(card.to_string(), "A of Spades");
        let card = Card::new(Suit::Hearts, Rank::Ten);
        assert_eq!(card.to_string(), "10 of Hearts");
    }
}
