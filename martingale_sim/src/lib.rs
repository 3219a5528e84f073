//! Driver shell for the Martingale blackjack simulator: configuration with
//! boundary validation, the threaded strategy-comparison runner and report
//! aggregation. The engine itself lives in `martingale_lib`.

pub mod write;

use martingale_lib::{GameSimulator, ScenarioStats, StandThresholdStrategy};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::Display;
use std::io::Write as IoWrite;
use std::sync::mpsc;
use std::thread;

pub mod prelude {
    pub use super::{
        SimulationError, SimulatorConfig, SimulatorConfigBuilder, StrategyComparison,
        StrategyReport, StrategySummary,
    };
}

/// Errors surfaced by the shell. The engine has no recoverable runtime
/// errors of its own; everything here is either rejected configuration or a
/// thread/IO failure while running the comparison.
#[derive(Debug)]
pub enum SimulationError {
    Config(String),
    Send(String),
    Write(String),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::Config(s) | SimulationError::Send(s) | SimulationError::Write(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

impl Error for SimulationError {}

/// Configuration for a comparison run. Validated at the boundary; the
/// engine never sees an invalid configuration.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorConfig {
    pub num_decks: usize,
    pub num_rounds: u32,
    pub num_scenarios: u32,
    pub starting_bankroll: f64,
    pub base_bet: f64,
    pub target_multiplier: f64,
    pub seed: Option<u64>,
    pub silent: bool,
}

impl SimulatorConfig {
    /// Associated method returning a new `SimulatorConfigBuilder` with the
    /// standard table setup.
    pub fn new() -> SimulatorConfigBuilder {
        SimulatorConfigBuilder {
            num_decks: None,
            num_rounds: None,
            num_scenarios: None,
            starting_bankroll: None,
            base_bet: None,
            target_multiplier: None,
            seed: None,
            silent: None,
        }
    }

    /// Boundary validation: positive counts, positive money, a base bet the
    /// bankroll can cover, and a casino-realistic shoe size.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !matches!(self.num_decks, 2 | 4 | 6 | 8) {
            return Err(SimulationError::Config(format!(
                "number of decks must be 2, 4, 6 or 8, got {}",
                self.num_decks
            )));
        }
        if self.num_rounds == 0 {
            return Err(SimulationError::Config(
                "number of rounds must be positive".to_string(),
            ));
        }
        if self.num_scenarios == 0 {
            return Err(SimulationError::Config(
                "number of scenarios must be positive".to_string(),
            ));
        }
        if self.starting_bankroll <= 0.0 {
            return Err(SimulationError::Config(
                "starting bankroll must be positive".to_string(),
            ));
        }
        if self.base_bet <= 0.0 {
            return Err(SimulationError::Config(
                "base bet must be positive".to_string(),
            ));
        }
        if self.base_bet > self.starting_bankroll {
            return Err(SimulationError::Config(format!(
                "base bet {:.2} exceeds the starting bankroll {:.2}",
                self.base_bet, self.starting_bankroll
            )));
        }
        if self.target_multiplier <= 0.0 {
            return Err(SimulationError::Config(
                "target multiplier must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig::new().build()
    }
}

/// Builder for `SimulatorConfig`.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorConfigBuilder {
    num_decks: Option<usize>,
    num_rounds: Option<u32>,
    num_scenarios: Option<u32>,
    starting_bankroll: Option<f64>,
    base_bet: Option<f64>,
    target_multiplier: Option<f64>,
    seed: Option<u64>,
    silent: Option<bool>,
}

impl SimulatorConfigBuilder {
    /// Method for choosing the number of decks in the shoe.
    pub fn num_decks(&mut self, decks: usize) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Method for setting the maximum rounds played per scenario.
    pub fn num_rounds(&mut self, rounds: u32) -> &mut Self {
        self.num_rounds = Some(rounds);
        self
    }

    /// Method for setting the number of independent scenarios per strategy.
    pub fn num_scenarios(&mut self, scenarios: u32) -> &mut Self {
        self.num_scenarios = Some(scenarios);
        self
    }

    /// Method for setting the bankroll every scenario starts from.
    pub fn starting_bankroll(&mut self, bankroll: f64) -> &mut Self {
        self.starting_bankroll = Some(bankroll);
        self
    }

    /// Method for setting the base bet the progression resets to.
    pub fn base_bet(&mut self, bet: f64) -> &mut Self {
        self.base_bet = Some(bet);
        self
    }

    /// Method for setting the profit target as a multiple of the starting
    /// bankroll.
    pub fn target_multiplier(&mut self, multiplier: f64) -> &mut Self {
        self.target_multiplier = Some(multiplier);
        self
    }

    /// Method for fixing the base seed of a reproducible run.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Method for suppressing the per-scenario console output.
    pub fn silent(&mut self, silent: bool) -> &mut Self {
        self.silent = Some(silent);
        self
    }

    /// Method for building the `SimulatorConfig`.
    pub fn build(&mut self) -> SimulatorConfig {
        SimulatorConfig {
            num_decks: self.num_decks.unwrap_or(6),
            num_rounds: self.num_rounds.unwrap_or(100),
            num_scenarios: self.num_scenarios.unwrap_or(100),
            starting_bankroll: self.starting_bankroll.unwrap_or(1000.0),
            base_bet: self.base_bet.unwrap_or(10.0),
            target_multiplier: self.target_multiplier.unwrap_or(0.5),
            seed: self.seed,
            silent: self.silent.unwrap_or(true),
        }
    }
}

/// Aggregate over all scenarios run for one strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub scenarios: u32,
    pub rounds_played: u32,
    pub player_wins: u32,
    pub dealer_wins: u32,
    pub draws: u32,
    pub player_busts: u32,
    pub dealer_busts: u32,
    pub player_blackjacks: u32,
    pub total_profit: f64,
    pub total_wagered: f64,
    pub early_stops: u32,
    pub targets_reached: u32,
}

impl StrategySummary {
    fn new(strategy: String) -> Self {
        StrategySummary {
            strategy,
            scenarios: 0,
            rounds_played: 0,
            player_wins: 0,
            dealer_wins: 0,
            draws: 0,
            player_busts: 0,
            dealer_busts: 0,
            player_blackjacks: 0,
            total_profit: 0.0,
            total_wagered: 0.0,
            early_stops: 0,
            targets_reached: 0,
        }
    }

    /// Folds one finished scenario into the aggregate.
    fn absorb(&mut self, stats: &ScenarioStats) {
        self.scenarios += 1;
        self.rounds_played += stats.total_rounds;
        self.player_wins += stats.player_wins;
        self.dealer_wins += stats.dealer_wins;
        self.draws += stats.draws;
        self.player_busts += stats.player_busts;
        self.dealer_busts += stats.dealer_busts;
        self.player_blackjacks += stats.player_blackjacks;
        self.total_profit += stats.net_profit();
        self.total_wagered += stats.total_bet;
        if stats.stopped_early {
            self.early_stops += 1;
        }
        if stats.reached_target {
            self.targets_reached += 1;
        }
    }

    /// Mean profit per scenario.
    pub fn average_profit(&self) -> f64 {
        if self.scenarios == 0 {
            0.0
        } else {
            self.total_profit / self.scenarios as f64
        }
    }

    /// Fraction of rounds won by the player, as a percentage.
    pub fn win_rate(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            (self.player_wins as f64 / self.rounds_played as f64) * 100.0
        }
    }
}

impl Display for StrategySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 72;
        const TEXT_WIDTH: usize = "number of player blackjacks".len() + 16;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        writeln!(f, "{:-^WIDTH$}", format!(" {} ", self.strategy))?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "scenarios run", self.scenarios)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds played", self.rounds_played)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$} ({:.1}%)",
            "rounds won",
            self.player_wins,
            self.win_rate()
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds lost", self.dealer_wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds pushed", self.draws)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "player busts", self.player_busts)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "dealer busts", self.dealer_busts)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of player blackjacks", self.player_blackjacks
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "total profit/loss", self.total_profit
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "average profit per scenario",
            self.average_profit()
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}", "total wagered", self.total_wagered)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "early stops", self.early_stops)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "targets reached", self.targets_reached
        )
    }
}

/// Everything produced for one strategy: the aggregate summary and the
/// finalized per-scenario statistics (with their hand records) in scenario
/// order.
pub struct StrategyReport {
    pub summary: StrategySummary,
    pub scenarios: Vec<ScenarioStats>,
}

/// Runs the configured strategies against each other. Each strategy gets a
/// worker thread that plays its scenarios and streams the finished
/// `ScenarioStats` to the collector, which folds them into per-strategy
/// summaries and writes the comparison report once every worker is done.
pub struct StrategyComparison {
    strategies: Vec<StandThresholdStrategy>,
    pub config: SimulatorConfig,
}

impl StrategyComparison {
    /// Associated function to create a comparison of `strategies` under
    /// `config`. The configuration must already be validated.
    pub fn new(strategies: Vec<StandThresholdStrategy>, config: SimulatorConfig) -> Self {
        StrategyComparison { strategies, config }
    }

    /// Runs every strategy and writes the comparison report to `file_out`.
    /// Returns the per-strategy reports in the order the strategies were
    /// supplied.
    pub fn run(
        &mut self,
        file_out: Box<dyn IoWrite + Send + 'static>,
    ) -> Result<Vec<StrategyReport>, SimulationError> {
        let (sender, receiver) = mpsc::channel::<(Option<ScenarioStats>, usize)>();

        let ids: HashSet<usize> = (0..self.strategies.len()).collect();
        let labels: Vec<String> = self
            .strategies
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        let config = self.config;

        // Collector thread: fold incoming scenarios per strategy id, then
        // write the summaries once every worker has signalled completion
        let collector = thread::spawn(move || -> Result<Vec<StrategyReport>, SimulationError> {
            let mut reports: HashMap<usize, StrategyReport> = labels
                .iter()
                .enumerate()
                .map(|(id, label)| {
                    (
                        id,
                        StrategyReport {
                            summary: StrategySummary::new(label.clone()),
                            scenarios: Vec::new(),
                        },
                    )
                })
                .collect();

            let mut pending = ids;
            let mut out = file_out;
            while !pending.is_empty() {
                let (stats, id) = receiver
                    .recv()
                    .map_err(|e| SimulationError::Send(format!("{}", e)))?;
                match stats {
                    Some(stats) => {
                        let report = reports.get_mut(&id).expect("worker id is registered");
                        report.summary.absorb(&stats);
                        if !config.silent {
                            let _ = writeln!(
                                out,
                                "{}",
                                stats.summary(&report.summary.strategy)
                            );
                        }
                        report.scenarios.push(stats);
                    }
                    None => {
                        pending.remove(&id);
                    }
                }
            }

            let mut ordered: Vec<StrategyReport> = Vec::with_capacity(labels.len());
            for id in 0..labels.len() {
                ordered.push(reports.remove(&id).expect("every id has a report"));
            }
            write::write_summaries(ordered.iter().map(|r| &r.summary), &mut out)
                .map_err(|e| SimulationError::Write(format!("{}", e)))?;
            Ok(ordered)
        });

        // One worker per strategy; scenarios within a worker run
        // sequentially, each against a fresh shoe
        let mut handles = Vec::new();
        for (id, strategy) in self.strategies.iter().cloned().enumerate() {
            let sender = sender.clone();
            let handle = thread::spawn(move || -> Result<(), SimulationError> {
                let mut simulator = GameSimulator::new(config.num_decks);
                if let Some(seed) = config.seed {
                    // Offset per strategy so the two sides never replay the
                    // same shoes
                    simulator = simulator.with_seed(seed.wrapping_add(id as u64 * 1_000_003));
                }
                for scenario_number in 1..=config.num_scenarios {
                    let stats = simulator.simulate(
                        &strategy,
                        config.num_rounds,
                        config.starting_bankroll,
                        config.base_bet,
                        config.target_multiplier,
                        scenario_number,
                    );
                    sender
                        .send((Some(stats), id))
                        .map_err(|e| SimulationError::Send(format!("{}", e)))?;
                }
                sender
                    .send((None, id))
                    .map_err(|e| SimulationError::Send(format!("{}", e)))?;
                Ok(())
            });
            handles.push(handle);
        }
        drop(sender);

        for handle in handles {
            handle
                .join()
                .map_err(|_| SimulationError::Send("worker thread panicked".to_string()))??;
        }

        collector
            .join()
            .map_err(|_| SimulationError::Write("collector thread panicked".to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use martingale_lib::available_strategies;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulatorConfig::default().validate().is_ok());
    }

    #[test]
    fn config_builder_overrides_defaults() {
        let config = SimulatorConfig::new()
            .num_decks(8)
            .num_rounds(50)
            .num_scenarios(10)
            .starting_bankroll(2000.0)
            .base_bet(25.0)
            .target_multiplier(1.0)
            .seed(7)
            .build();
        assert_eq!(config.num_decks, 8);
        assert_eq!(config.num_rounds, 50);
        assert_eq!(config.num_scenarios, 10);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_configs_are_rejected_at_the_boundary() {
        assert!(SimulatorConfig::new().num_decks(5).build().validate().is_err());
        assert!(SimulatorConfig::new().num_rounds(0).build().validate().is_err());
        assert!(SimulatorConfig::new().num_scenarios(0).build().validate().is_err());
        assert!(SimulatorConfig::new()
            .starting_bankroll(0.0)
            .build()
            .validate()
            .is_err());
        assert!(SimulatorConfig::new().base_bet(0.0).build().validate().is_err());
        assert!(SimulatorConfig::new()
            .starting_bankroll(5.0)
            .base_bet(10.0)
            .build()
            .validate()
            .is_err());
        assert!(SimulatorConfig::new()
            .target_multiplier(0.0)
            .build()
            .validate()
            .is_err());
    }

    #[test]
    fn comparison_runs_both_strategies_to_completion() {
        let config = SimulatorConfig::new()
            .num_rounds(20)
            .num_scenarios(4)
            .seed(99)
            .build();
        let mut comparison = StrategyComparison::new(available_strategies(), config);

        let reports = comparison.run(Box::new(std::io::sink())).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].summary.strategy, "Always Stand at 12+");
        assert_eq!(reports[1].summary.strategy, "Always Stand at 16+");
        for report in &reports {
            assert_eq!(report.summary.scenarios, 4);
            assert_eq!(report.scenarios.len(), 4);
            for stats in &report.scenarios {
                assert!(stats.total_rounds <= 20);
                assert_eq!(stats.hand_records.len() as u32, stats.total_rounds);
            }
        }
    }

    #[test]
    fn seeded_comparisons_are_reproducible() {
        let config = SimulatorConfig::new()
            .num_rounds(15)
            .num_scenarios(3)
            .seed(1234)
            .build();

        let first = StrategyComparison::new(available_strategies(), config)
            .run(Box::new(std::io::sink()))
            .unwrap();
        let second = StrategyComparison::new(available_strategies(), config)
            .run(Box::new(std::io::sink()))
            .unwrap();

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.summary.rounds_played, b.summary.rounds_played);
            assert!((a.summary.total_profit - b.summary.total_profit).abs() < 1e-9);
        }
    }
}
