//! Output formatting: the console comparison report and flat CSV export of
//! per-hand and per-scenario detail. Everything writes to a caller-supplied
//! writer; nothing here is ever read back in.

use crate::StrategySummary;
use martingale_lib::{HandRecord, ScenarioStats};
use std::io::{self, Write};

/// Writes the formatted summary block for every strategy, in order.
pub fn write_summaries<'a, I>(summaries: I, writer: &mut impl Write) -> io::Result<()>
where
    I: IntoIterator<Item = &'a StrategySummary>,
{
    for summary in summaries {
        write!(writer, "{}", summary)?;
    }
    writer.flush()
}

/// Quotes a CSV field, doubling any embedded quotes.
fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

const HAND_HEADER: &str = "hand_number,scenario_number,strategy,player_cards,dealer_cards,\
player_total,dealer_total,player_action,bet_amount,result,money_change,player_busted,\
dealer_busted,bankroll_after,is_blackjack,shoe_penetration,cards_remaining,reshuffled_after";

fn write_hand_row(record: &HandRecord, strategy: &str, writer: &mut impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "{},{},{},{},{},{},{},{},{:.2},{},{:.2},{},{},{:.2},{},{:.2},{},{}",
        record.hand_number,
        record.scenario_number,
        csv_quote(strategy),
        csv_quote(&record.player_cards.join("; ")),
        csv_quote(&record.dealer_cards.join("; ")),
        record.player_total,
        record.dealer_total,
        record.player_action,
        record.bet_amount,
        record.result,
        record.money_change,
        record.player_busted,
        record.dealer_busted,
        record.bankroll_after,
        record.is_blackjack,
        record.shoe_penetration,
        record.cards_remaining,
        record.reshuffled_after,
    )
}

/// Writes one CSV row per hand played, across every strategy's scenarios,
/// with a single header row.
pub fn write_hand_records_csv<'a, I>(groups: I, writer: &mut impl Write) -> io::Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a [ScenarioStats])>,
{
    writeln!(writer, "{}", HAND_HEADER)?;
    for (strategy, scenarios) in groups {
        for stats in scenarios {
            for record in &stats.hand_records {
                write_hand_row(record, strategy, writer)?;
            }
        }
    }
    writer.flush()
}

const SCENARIO_HEADER: &str = "scenario_number,strategy,rounds,player_wins,dealer_wins,draws,\
player_busts,dealer_busts,player_blackjacks,starting_bankroll,final_bankroll,net_profit,\
total_bet,biggest_win,biggest_loss,stopped_early,reached_target,stop_reason";

/// Writes one CSV row per scenario, across every strategy, with a single
/// header row.
pub fn write_scenario_rows_csv<'a, I>(groups: I, writer: &mut impl Write) -> io::Result<()>
where
    I: IntoIterator<Item = (&'a str, &'a [ScenarioStats])>,
{
    writeln!(writer, "{}", SCENARIO_HEADER)?;
    for (strategy, scenarios) in groups {
        for stats in scenarios {
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{},{},{}",
                stats.scenario_number,
                csv_quote(strategy),
                stats.total_rounds,
                stats.player_wins,
                stats.dealer_wins,
                stats.draws,
                stats.player_busts,
                stats.dealer_busts,
                stats.player_blackjacks,
                stats.starting_bankroll,
                stats.current_bankroll,
                stats.net_profit(),
                stats.total_bet,
                stats.biggest_win,
                stats.biggest_loss,
                stats.stopped_early,
                stats.reached_target,
                csv_quote(&stats.stop_reason),
            )?;
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use martingale_lib::{GameSimulator, StandThresholdStrategy};

    fn sample_scenarios() -> Vec<ScenarioStats> {
        let strategy = StandThresholdStrategy::stand_at_16();
        let simulator = GameSimulator::new(6).with_seed(8);
        (1..=2)
            .map(|n| simulator.simulate(&strategy, 10, 1000.0, 10.0, 100.0, n))
            .collect()
    }

    #[test]
    fn hand_csv_has_header_and_one_row_per_hand() {
        let scenarios = sample_scenarios();
        let expected_rows: usize = scenarios.iter().map(|s| s.hand_records.len()).sum();

        let mut buf = Vec::new();
        write_hand_records_csv([("Always Stand at 16+", scenarios.as_slice())], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HAND_HEADER));
        assert_eq!(lines.count(), expected_rows);
        assert!(text.contains("\"Always Stand at 16+\""));
    }

    #[test]
    fn scenario_csv_has_one_row_per_scenario() {
        let scenarios = sample_scenarios();

        let mut buf = Vec::new();
        write_scenario_rows_csv([("Always Stand at 16+", scenarios.as_slice())], &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1 + scenarios.len());
        assert!(text.starts_with(SCENARIO_HEADER));
    }

    #[test]
    fn quoting_doubles_embedded_quotes() {
        assert_eq!(csv_quote("plain"), "\"plain\"");
        assert_eq!(csv_quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
