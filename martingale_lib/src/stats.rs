//! Per-round records and per-scenario statistics.

use crate::game::GameResult;
use serde::Serialize;
use std::fmt::Write as _;

/// An append-only log entry for one completed round. Every field is a flat
/// scalar (or list of strings) suitable for row-oriented export; records are
/// never mutated after being appended to a scenario's statistics.
#[derive(Debug, Clone, Serialize)]
pub struct HandRecord {
    pub hand_number: u32,
    pub scenario_number: u32,
    pub player_cards: Vec<String>,
    pub dealer_cards: Vec<String>,
    pub player_total: u32,
    pub dealer_total: u32,
    pub player_action: String,
    pub bet_amount: f64,
    pub result: String,
    pub money_change: f64,
    pub player_busted: bool,
    pub dealer_busted: bool,
    pub bankroll_after: f64,
    pub is_blackjack: bool,
    pub shoe_penetration: f64,
    pub cards_remaining: usize,
    pub reshuffled_after: bool,
}

/// Running aggregate for one scenario: outcome tallies, bankroll tracking,
/// stop state and the ordered list of hand records. Mutated once per round
/// through `add_result`, read-only once the scenario's round loop ends.
#[derive(Debug, Clone)]
pub struct ScenarioStats {
    pub player_wins: u32,
    pub dealer_wins: u32,
    pub draws: u32,
    pub dealer_busts: u32,
    pub player_busts: u32,
    pub player_blackjacks: u32,
    pub total_rounds: u32,
    pub starting_bankroll: f64,
    pub current_bankroll: f64,
    pub total_bet: f64,
    pub total_winnings: f64,
    pub biggest_win: f64,
    pub biggest_loss: f64,
    pub stopped_early: bool,
    pub stop_reason: String,
    pub reached_target: bool,
    pub target_multiplier: f64,
    pub scenario_number: u32,
    pub hand_records: Vec<HandRecord>,
}

impl ScenarioStats {
    /// Associated function to create fresh statistics for one scenario.
    pub fn new(starting_bankroll: f64, target_multiplier: f64, scenario_number: u32) -> Self {
        ScenarioStats {
            player_wins: 0,
            dealer_wins: 0,
            draws: 0,
            dealer_busts: 0,
            player_busts: 0,
            player_blackjacks: 0,
            total_rounds: 0,
            starting_bankroll,
            current_bankroll: starting_bankroll,
            total_bet: 0.0,
            total_winnings: 0.0,
            biggest_win: 0.0,
            biggest_loss: 0.0,
            stopped_early: false,
            stop_reason: String::new(),
            reached_target: false,
            target_multiplier,
            scenario_number,
            hand_records: Vec::new(),
        }
    }

    /// Folds one round's result into the aggregate: outcome tallies, bust
    /// counts and bankroll movement.
    pub fn add_result(&mut self, result: &GameResult) {
        self.total_rounds += 1;

        if result.player_wins {
            self.player_wins += 1;
            if result.is_blackjack {
                self.player_blackjacks += 1;
            }
        } else if result.dealer_wins {
            self.dealer_wins += 1;
        } else {
            self.draws += 1;
        }

        if result.dealer_busted {
            self.dealer_busts += 1;
        }
        if result.player_busted {
            self.player_busts += 1;
        }

        self.current_bankroll += result.money_change;
        self.total_bet += result.bet_amount;

        if result.money_change > 0.0 {
            self.total_winnings += result.money_change;
            if result.money_change > self.biggest_win {
                self.biggest_win = result.money_change;
            }
        } else if result.money_change < 0.0 && -result.money_change > self.biggest_loss {
            self.biggest_loss = -result.money_change;
        }
    }

    /// Net profit (or loss, when negative) over the scenario so far.
    pub fn net_profit(&self) -> f64 {
        self.current_bankroll - self.starting_bankroll
    }

    /// Fraction of rounds won by the player, as a percentage.
    pub fn win_rate(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            (self.player_wins as f64 / self.total_rounds as f64) * 100.0
        }
    }

    /// Fraction of rounds that were player naturals, as a percentage.
    pub fn blackjack_rate(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            (self.player_blackjacks as f64 / self.total_rounds as f64) * 100.0
        }
    }

    /// The profit that triggers the target-reached stop.
    pub fn target_profit(&self) -> f64 {
        self.starting_bankroll * self.target_multiplier
    }

    /// Formatted report of the scenario for console output.
    pub fn summary(&self, strategy_name: &str) -> String {
        const WIDTH: usize = 60;
        const TEXT_WIDTH: usize = "return on investment:".len() + 12;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "results after {} rounds (strategy: {})",
            self.total_rounds, strategy_name
        );
        let _ = writeln!(
            out,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$} ({:.1}%)",
            "player wins:", self.player_wins, self.win_rate()
        );
        let _ = writeln!(
            out,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$} ({:.1}%)",
            "player blackjacks:",
            self.player_blackjacks,
            self.blackjack_rate()
        );
        let _ = writeln!(out, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "dealer wins:", self.dealer_wins);
        let _ = writeln!(out, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "draws:", self.draws);
        let _ = writeln!(out, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "dealer busts:", self.dealer_busts);
        let _ = writeln!(out, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "player busts:", self.player_busts);
        let _ = writeln!(
            out,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "starting bankroll:", self.starting_bankroll
        );
        let _ = writeln!(
            out,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "final bankroll:", self.current_bankroll
        );
        let _ = writeln!(
            out,
            "{:<TEXT_WIDTH$}{:>+NUM_WIDTH$.2}",
            "net profit/loss:",
            self.net_profit()
        );
        let _ = writeln!(out, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}", "total amount bet:", self.total_bet);
        if self.total_bet > 0.0 {
            let roi = (self.net_profit() / self.total_bet) * 100.0;
            let _ = writeln!(
                out,
                "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}%",
                "return on investment:", roi
            );
        }
        if self.stopped_early {
            let _ = writeln!(out, "stopped early: {}", self.stop_reason);
        }
        if self.reached_target {
            let _ = writeln!(
                out,
                "target reached: profit >= {:.2} ({}x bankroll)",
                self.target_profit(),
                self.target_multiplier
            );
        }
        out
    }
}
