use clap::{Parser, ValueEnum};
use lazy_static::lazy_static;
use martingale_lib::StandThresholdStrategy;
use martingale_sim::{write, SimulationError, SimulatorConfig, StrategyComparison};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

lazy_static! {
    /// Registry mapping the CLI strategy names to their stand thresholds.
    static ref STRATEGY_REGISTRY: HashMap<&'static str, u32> = {
        let mut registry = HashMap::new();
        registry.insert("stand12", 12);
        registry.insert("stand16", 16);
        registry
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyChoice {
    Stand12,
    Stand16,
    Both,
}

impl StrategyChoice {
    fn resolve(self) -> Vec<StandThresholdStrategy> {
        let names: &[&str] = match self {
            StrategyChoice::Stand12 => &["stand12"],
            StrategyChoice::Stand16 => &["stand16"],
            StrategyChoice::Both => &["stand12", "stand16"],
        };
        names
            .iter()
            .map(|name| StandThresholdStrategy::new(STRATEGY_REGISTRY[name]))
            .collect()
    }
}

/// Monte-Carlo comparison of fixed blackjack playing strategies under a
/// progressive betting scheme.
#[derive(Parser, Debug)]
#[command(name = "martingale_sim", version, about)]
struct Cli {
    /// Strategy (or strategies) to simulate
    #[arg(long, value_enum, default_value_t = StrategyChoice::Both)]
    strategy: StrategyChoice,

    /// Maximum rounds per scenario
    #[arg(long, default_value_t = 100)]
    rounds: u32,

    /// Number of independent scenarios per strategy
    #[arg(long, default_value_t = 100)]
    scenarios: u32,

    /// Number of decks in the shoe (2, 4, 6 or 8)
    #[arg(long, default_value_t = 6)]
    decks: usize,

    /// Starting bankroll for every scenario
    #[arg(long, default_value_t = 1000.0)]
    bankroll: f64,

    /// Base bet the progression resets to
    #[arg(long, default_value_t = 10.0)]
    base_bet: f64,

    /// Profit target as a multiple of the starting bankroll
    #[arg(long, default_value_t = 0.5)]
    target_multiplier: f64,

    /// Base seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Print every scenario summary, not just the final comparison
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Write a per-hand detail CSV to this path
    #[arg(long)]
    hands_csv: Option<String>,

    /// Write a per-scenario detail CSV to this path
    #[arg(long)]
    scenarios_csv: Option<String>,

    /// Print the aggregate summaries as JSON instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn run(cli: Cli) -> Result<(), SimulationError> {
    let mut builder = SimulatorConfig::new();
    builder
        .num_decks(cli.decks)
        .num_rounds(cli.rounds)
        .num_scenarios(cli.scenarios)
        .starting_bankroll(cli.bankroll)
        .base_bet(cli.base_bet)
        .target_multiplier(cli.target_multiplier)
        .silent(!cli.verbose);
    if let Some(seed) = cli.seed {
        builder.seed(seed);
    }
    let config = builder.build();
    config.validate()?;

    let out: Box<dyn std::io::Write + Send> = if cli.json {
        Box::new(std::io::sink())
    } else {
        Box::new(std::io::stdout())
    };

    let mut comparison = StrategyComparison::new(cli.strategy.resolve(), config);
    let reports = comparison.run(out)?;

    if cli.json {
        let summaries: Vec<_> = reports.iter().map(|r| &r.summary).collect();
        let rendered = serde_json::to_string_pretty(&summaries)
            .map_err(|e| SimulationError::Write(format!("{}", e)))?;
        println!("{}", rendered);
    }

    let groups: Vec<(&str, &[_])> = reports
        .iter()
        .map(|r| (r.summary.strategy.as_str(), r.scenarios.as_slice()))
        .collect();

    if let Some(path) = &cli.hands_csv {
        let file = File::create(path).map_err(|e| SimulationError::Write(format!("{}", e)))?;
        let mut writer = BufWriter::new(file);
        write::write_hand_records_csv(groups.iter().copied(), &mut writer)
            .map_err(|e| SimulationError::Write(format!("{}", e)))?;
    }

    if let Some(path) = &cli.scenarios_csv {
        let file = File::create(path).map_err(|e| SimulationError::Write(format!("{}", e)))?;
        let mut writer = BufWriter::new(file);
        write::write_scenario_rows_csv(groups.iter().copied(), &mut writer)
            .map_err(|e| SimulationError::Write(format!("{}", e)))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
