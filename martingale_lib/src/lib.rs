//! Monte-Carlo engine for a casino blackjack table played under a
//! progressive (Martingale-style) betting scheme.
//!
//! The crate contains only the simulation engine: the multi-deck shoe with
//! cut-card penetration tracking, the soft/hard hand value algorithm, the
//! stand-threshold playing strategies, the round engine with natural
//! blackjack adjudication and the bankroll/scenario driver. Rendering and
//! persistence live in the `martingale_sim` crate.

pub mod card;
pub mod game;
pub mod hand;
pub mod shoe;
pub mod simulator;
pub mod stats;
pub mod strategy;

pub mod prelude {
    pub use crate::card::{Card, Rank, Suit};
    pub use crate::game::{Game, GameResult};
    pub use crate::hand::{calculate_hand_value, format_hand, is_blackjack, is_bust, Hand};
    pub use crate::shoe::{Shoe, ShoeInfo};
    pub use crate::simulator::{next_bet, GameSimulator};
    pub use crate::stats::{HandRecord, ScenarioStats};
    pub use crate::strategy::{available_strategies, Decision, StandThresholdStrategy};
}

pub use prelude::*;
