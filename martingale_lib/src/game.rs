//! The round engine: deals a hand, drives the player's strategy and the
//! dealer's mechanical rule, and adjudicates the outcome.

use crate::hand::Hand;
use crate::shoe::Shoe;
use crate::stats::{HandRecord, ScenarioStats};
use crate::strategy::{Decision, StandThresholdStrategy};

/// The adjudicated outcome of one round. The money delta is derived from
/// the outcome flags when the result is constructed and never changes
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameResult {
    pub player_wins: bool,
    pub dealer_wins: bool,
    pub is_draw: bool,
    pub dealer_busted: bool,
    pub player_busted: bool,
    pub bet_amount: f64,
    pub is_blackjack: bool,
    pub money_change: f64,
}

impl GameResult {
    /// Associated function to create a new `GameResult`, deriving the money
    /// delta: a blackjack win pays 3:2, a regular win 1:1, a loss forfeits
    /// the bet and a push moves nothing.
    pub fn new(
        player_wins: bool,
        dealer_wins: bool,
        is_draw: bool,
        dealer_busted: bool,
        player_busted: bool,
        bet_amount: f64,
        is_blackjack: bool,
    ) -> Self {
        let money_change = if player_wins {
            if is_blackjack {
                bet_amount * 1.5
            } else {
                bet_amount
            }
        } else if dealer_wins {
            -bet_amount
        } else {
            0.0
        };

        GameResult {
            player_wins,
            dealer_wins,
            is_draw,
            dealer_busted,
            player_busted,
            bet_amount,
            is_blackjack,
            money_change,
        }
    }

    /// The outcome label recorded per hand: `Blackjack`, `Win`, `Loss` or
    /// `Draw`.
    pub fn label(&self) -> &'static str {
        if self.player_wins {
            if self.is_blackjack {
                "Blackjack"
            } else {
                "Win"
            }
        } else if self.dealer_wins {
            "Loss"
        } else {
            "Draw"
        }
    }
}

/// A single blackjack table: one shoe, one player hand and one dealer hand.
/// The player's decisions come from the strategy passed to `play_round`; the
/// dealer's drawing rule is fixed and not pluggable.
pub struct Game {
    shoe: Shoe,
    player: Hand,
    dealer: Hand,
}

impl Game {
    /// Associated function to create a new game with a fresh entropy-seeded
    /// shoe of `num_decks` decks.
    pub fn new(num_decks: usize) -> Self {
        Game::from_shoe(Shoe::new(num_decks))
    }

    /// Associated function to create a new game with a seeded shoe, for
    /// reproducible runs.
    pub fn with_seed(num_decks: usize, seed: u64) -> Self {
        Game::from_shoe(Shoe::with_seed(num_decks, seed))
    }

    fn from_shoe(shoe: Shoe) -> Self {
        Game {
            shoe,
            player: Hand::new(),
            dealer: Hand::new(),
        }
    }

    /// Borrow of the shoe for reporting.
    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Clears both hands and deals two cards each, alternating player then
    /// dealer.
    fn deal_initial_cards(&mut self) {
        self.player.clear();
        self.dealer.clear();

        for _ in 0..2 {
            self.player.add_card(self.shoe.deal_card());
            self.dealer.add_card(self.shoe.deal_card());
        }
    }

    /// Dealer's mechanical turn: hit any total of 16 or less, stand at 17+,
    /// soft or hard.
    fn play_dealer_turn(&mut self) {
        while self.dealer.value() <= 16 && !self.dealer.is_busted() {
            self.dealer.add_card(self.shoe.deal_card());
        }
    }

    /// Between-hands reshuffle check. Returns true if the shoe was rebuilt.
    fn check_reshuffle_after_hand(&mut self) -> bool {
        if self.shoe.should_reshuffle() {
            self.shoe.reshuffle_after_hand();
            true
        } else {
            false
        }
    }

    /// Adjudicates the finished round. Priority: both naturals push, a lone
    /// player natural pays 3:2, a lone dealer natural wins, then busts, then
    /// total comparison at 1:1.
    fn determine_winner(&self, bet_amount: f64) -> GameResult {
        let player_value = self.player.value();
        let dealer_value = self.dealer.value();
        let player_busted = self.player.is_busted();
        let dealer_busted = self.dealer.is_busted();
        let player_blackjack = self.player.is_blackjack();
        let dealer_blackjack = self.dealer.is_blackjack();

        if player_blackjack && dealer_blackjack {
            // Both naturals push, no blackjack payout
            return GameResult::new(false, false, true, dealer_busted, player_busted, bet_amount, false);
        } else if player_blackjack {
            return GameResult::new(true, false, false, dealer_busted, player_busted, bet_amount, true);
        } else if dealer_blackjack {
            return GameResult::new(false, true, false, dealer_busted, player_busted, bet_amount, false);
        }

        if player_busted {
            return GameResult::new(false, true, false, dealer_busted, true, bet_amount, false);
        }
        if dealer_busted {
            return GameResult::new(true, false, false, true, false, bet_amount, false);
        }

        if player_value > dealer_value {
            GameResult::new(true, false, false, false, false, bet_amount, false)
        } else if dealer_value > player_value {
            GameResult::new(false, true, false, false, false, bet_amount, false)
        } else {
            GameResult::new(false, false, true, false, false, bet_amount, false)
        }
    }

    /// Plays one complete round and returns its result. When a stats sink is
    /// supplied, one `HandRecord` is appended covering the cards dealt, the
    /// chosen action, the outcome and the shoe state after the post-hand
    /// reshuffle check.
    pub fn play_round(
        &mut self,
        strategy: &StandThresholdStrategy,
        bet_amount: f64,
        hand_number: u32,
        scenario_number: u32,
        stats: Option<&mut ScenarioStats>,
    ) -> GameResult {
        self.deal_initial_cards();

        let mut player_cards = self.player.card_strings();
        let mut dealer_cards = self.dealer.card_strings();

        let player_blackjack = self.player.is_blackjack();
        let dealer_blackjack = self.dealer.is_blackjack();

        let mut player_action = "Stand";

        if player_blackjack {
            // A natural freezes the hand, no further cards are drawn
            player_action = "Blackjack";
        } else {
            while !self.player.is_busted() {
                match strategy.decide(&self.player) {
                    Decision::Hit => {
                        player_action = "Hit";
                        let card = self.shoe.deal_card();
                        self.player.add_card(card);
                        player_cards.push(card.to_string());
                    }
                    Decision::Stand => break,
                }
            }
        }

        // Dealer plays unless a lone player natural already settled the
        // round, and never against a busted player
        if (!player_blackjack || dealer_blackjack) && !self.player.is_busted() {
            self.play_dealer_turn();
        }

        if self.dealer.len() > 2 {
            dealer_cards = self.dealer.card_strings();
        }

        let result = self.determine_winner(bet_amount);
        let reshuffled = self.check_reshuffle_after_hand();

        if let Some(stats) = stats {
            let shoe_info = self.shoe.shoe_info();
            stats.hand_records.push(HandRecord {
                hand_number,
                scenario_number,
                player_cards,
                dealer_cards,
                player_total: self.player.value(),
                dealer_total: self.dealer.value(),
                player_action: player_action.to_string(),
                bet_amount,
                result: result.label().to_string(),
                money_change: result.money_change,
                player_busted: result.player_busted,
                dealer_busted: result.dealer_busted,
                bankroll_after: stats.current_bankroll + result.money_change,
                is_blackjack: result.is_blackjack,
                shoe_penetration: shoe_info.penetration,
                cards_remaining: shoe_info.cards_remaining,
                reshuffled_after: reshuffled,
            });
        }

        result
    }
}
