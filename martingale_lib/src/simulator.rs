//! The bankroll/scenario driver: runs many rounds against a fresh shoe with
//! progressive bet sizing and early-stop conditions.

use crate::game::{Game, GameResult};
use crate::stats::ScenarioStats;
use crate::strategy::StandThresholdStrategy;

/// The progressive (Martingale-style) bet law: reset to the base bet after
/// any win or push, triple after a loss. Uncapped.
pub fn next_bet(base_bet: f64, current_bet: f64, result: &GameResult) -> f64 {
    if result.player_wins || result.is_draw {
        base_bet
    } else {
        current_bet * 3.0
    }
}

/// Runs independent scenarios for statistical comparison. Each scenario
/// plays against a brand-new shoe with its own shuffle, cut card position
/// and RNG stream, so no state leaks between scenarios.
pub struct GameSimulator {
    num_decks: usize,
    seed: Option<u64>,
}

impl GameSimulator {
    /// Associated function to create a new simulator dealing from
    /// `num_decks`-deck shoes.
    pub fn new(num_decks: usize) -> Self {
        GameSimulator {
            num_decks,
            seed: None,
        }
    }

    /// Sets a base seed; each scenario derives its own stream from the base
    /// seed and its scenario number, keeping parallel scenarios independent
    /// and runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn new_game(&self, scenario_number: u32) -> Game {
        match self.seed {
            Some(seed) => Game::with_seed(self.num_decks, seed.wrapping_add(scenario_number as u64)),
            None => Game::new(self.num_decks),
        }
    }

    /// Simulates one scenario: up to `num_rounds` rounds with progressive
    /// bet sizing, stopping early on insolvency or once the profit target
    /// (`starting_bankroll * target_multiplier`) is reached. Returns the
    /// finalized statistics including every hand record.
    pub fn simulate(
        &self,
        strategy: &StandThresholdStrategy,
        num_rounds: u32,
        starting_bankroll: f64,
        base_bet: f64,
        target_multiplier: f64,
        scenario_number: u32,
    ) -> ScenarioStats {
        let mut game = self.new_game(scenario_number);
        let mut stats = ScenarioStats::new(starting_bankroll, target_multiplier, scenario_number);
        let mut current_bet = base_bet;
        let target_profit = starting_bankroll * target_multiplier;

        for round_num in 0..num_rounds {
            // Insolvency check comes first: the player must cover the
            // escalated bet in full
            if stats.current_bankroll < current_bet {
                stats.stopped_early = true;
                stats.stop_reason = format!(
                    "insufficient funds after {} rounds (need {:.2}, have {:.2})",
                    stats.total_rounds, current_bet, stats.current_bankroll
                );
                break;
            }

            let current_profit = stats.current_bankroll - starting_bankroll;
            if current_profit >= target_profit {
                stats.reached_target = true;
                stats.stopped_early = true;
                stats.stop_reason = format!(
                    "target profit reached after {} rounds ({:.2} >= {:.2})",
                    stats.total_rounds, current_profit, target_profit
                );
                break;
            }

            let result = game.play_round(
                strategy,
                current_bet,
                round_num + 1,
                scenario_number,
                Some(&mut stats),
            );
            stats.add_result(&result);

            current_bet = next_bet(base_bet, current_bet, &result);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameResult;
    use crate::strategy::StandThresholdStrategy;

    fn win(bet: f64) -> GameResult {
        GameResult::new(true, false, false, false, false, bet, false)
    }

    fn loss(bet: f64) -> GameResult {
        GameResult::new(false, true, false, false, false, bet, false)
    }

    fn push(bet: f64) -> GameResult {
        GameResult::new(false, false, true, false, false, bet, false)
    }

    #[test]
    fn progressive_bets_triple_on_loss_and_reset_on_win() {
        let base = 10.0;
        let mut bet = base;
        let mut seen = vec![bet];

        // outcomes: loss, loss, win, win, loss
        for result in [loss(bet), loss(30.0), win(90.0), win(10.0), loss(10.0)] {
            bet = next_bet(base, bet, &result);
            seen.push(bet);
        }

        assert_eq!(seen, vec![10.0, 30.0, 90.0, 10.0, 10.0, 30.0]);
    }

    #[test]
    fn push_resets_the_bet_to_base() {
        assert_eq!(next_bet(10.0, 270.0, &push(270.0)), 10.0);
    }

    #[test]
    fn ample_bankroll_plays_every_round() {
        let strategy = StandThresholdStrategy::stand_at_16();
        let simulator = GameSimulator::new(6).with_seed(77);
        // Unreachable target, bankroll deep enough to cover a 29-loss streak
        let stats = simulator.simulate(&strategy, 100, 1.0e15, 10.0, 1000.0, 1);

        assert_eq!(stats.total_rounds, 100);
        assert_eq!(stats.hand_records.len(), 100);
        assert!(!stats.stopped_early);
        assert!(!stats.reached_target);
    }

    #[test]
    fn insolvent_bankroll_stops_before_the_first_round() {
        let strategy = StandThresholdStrategy::stand_at_12();
        let simulator = GameSimulator::new(2).with_seed(5);
        let stats = simulator.simulate(&strategy, 100, 5.0, 10.0, 0.5, 1);

        assert_eq!(stats.total_rounds, 0);
        assert!(stats.stopped_early);
        assert!(!stats.reached_target);
        assert!(stats.stop_reason.contains("insufficient funds"));
        assert!((stats.current_bankroll - 5.0).abs() < 1e-9);
    }

    #[test]
    fn scenarios_are_independent_given_distinct_seeds() {
        let strategy = StandThresholdStrategy::stand_at_16();
        let simulator = GameSimulator::new(6).with_seed(42);

        let a = simulator.simulate(&strategy, 50, 1_000_000.0, 10.0, 1000.0, 1);
        let b = simulator.simulate(&strategy, 50, 1_000_000.0, 10.0, 1000.0, 2);
        let a_again = simulator.simulate(&strategy, 50, 1_000_000.0, 10.0, 1000.0, 1);

        // Same scenario number replays identically; a different scenario
        // number gets a different shoe
        assert!((a.current_bankroll - a_again.current_bankroll).abs() < 1e-9);
        assert_eq!(a.hand_records.len(), a_again.hand_records.len());
        let identical = a.hand_records.len() == b.hand_records.len()
            && a
                .hand_records
                .iter()
                .zip(b.hand_records.iter())
                .all(|(x, y)| x.player_cards == y.player_cards);
        assert!(!identical);
    }

    #[test]
    fn bets_recorded_per_round_follow_the_progression() {
        let strategy = StandThresholdStrategy::stand_at_16();
        let simulator = GameSimulator::new(6).with_seed(11);
        let stats = simulator.simulate(&strategy, 200, 1.0e15, 10.0, 1000.0, 1);

        let mut expected = 10.0;
        for record in &stats.hand_records {
            assert!((record.bet_amount - expected).abs() < 1e-9);
            expected = if record.result == "Loss" {
                expected * 3.0
            } else {
                10.0
            };
        }
    }
}
