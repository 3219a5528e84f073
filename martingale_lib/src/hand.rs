//! Hand value calculation and the shared hand-holder used by both the
//! player and the dealer.

use crate::card::Card;
use std::fmt::Write as _;

/// Computes the best total for a set of cards. Every Ace starts at 11 and is
/// demoted to 1, one at a time, while the total is over 21. Returns the
/// maximum total not exceeding 21 when one exists, otherwise the minimum
/// (true bust) total.
pub fn calculate_hand_value(cards: &[Card]) -> u32 {
    let mut total = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value();
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// Returns true if the best achievable total is over 21.
pub fn is_bust(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > 21
}

/// Returns true for a natural blackjack: exactly two cards, one Ace and one
/// ten-value card. A three-card 21 is not a blackjack.
pub fn is_blackjack(cards: &[Card]) -> bool {
    if cards.len() != 2 {
        return false;
    }

    let mut has_ace = false;
    let mut has_ten = false;
    for card in cards {
        if card.is_ace() {
            has_ace = true;
        } else if card.value() == 10 {
            has_ten = true;
        }
    }

    has_ace && has_ten
}

/// Formats a hand with its value for display, e.g. `"A of Spades, K of
/// Hearts (Value: 21)"`.
pub fn format_hand(cards: &[Card]) -> String {
    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", card);
    }
    let _ = write!(out, " (Value: {})", calculate_hand_value(cards));
    out
}

/// An ordered hand of cards. Both the player and the dealer hold one of
/// these; the dealer's fixed drawing rule and the player's pluggable
/// strategy live in the round engine, not here.
#[derive(Debug, Default, Clone)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Associated function to create a new empty `Hand`.
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// The best current value of the hand.
    pub fn value(&self) -> u32 {
        calculate_hand_value(&self.cards)
    }

    /// Returns true if the hand is busted.
    pub fn is_busted(&self) -> bool {
        is_bust(&self.cards)
    }

    /// Returns true if the hand is a natural blackjack.
    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// The dealer's face-up card, i.e. the first card dealt to the hand.
    pub fn upcard(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// Borrow of the cards in dealt order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards in the hand.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if the hand holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards rendered as display strings, in dealt order. Used for hand
    /// records.
    pub fn card_strings(&self) -> Vec<String> {
        self.cards.iter().map(|c| c.to_string()).collect()
    }

    /// Formatted display of the full hand with its value.
    pub fn display(&self) -> String {
        format_hand(&self.cards)
    }

    /// Partial-information display with everything but the upcard hidden,
    /// the way a table shows the dealer's hand mid-round. Display only,
    /// irrelevant to adjudication.
    pub fn hidden_display(&self) -> String {
        match self.upcard() {
            Some(up) if self.cards.len() >= 2 => {
                format!("{}, [Hidden] (Visible: {})", up, up.value())
            }
            _ => self.display(),
        }
    }
}
