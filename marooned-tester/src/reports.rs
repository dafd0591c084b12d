//! Report generation for simulation batches.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::simulation::{RunRecord, Summary};

pub fn print_console(summary: &Summary) {
    println!();
    println!("{}", "Marooned Simulation Summary".bright_cyan().bold());
    println!("{}", "===========================".cyan());
    println!("Policy: {}", summary.policy.bold());
    println!("Games: {}", summary.games);
    println!("Victories: {}", summary.victories.to_string().green());
    println!(
        "Defeats: {} exhausted, {} stranded",
        summary.exhausted.to_string().red(),
        summary.stranded.to_string().red()
    );
    println!("Timeouts: {}", summary.timeouts.to_string().yellow());
    println!("Items crafted: {}", summary.total_crafts);
    println!("Average turns: {:.1}", summary.avg_turns);

    if summary.games > 0 {
        #[allow(clippy::cast_precision_loss)]
        let win_rate = (summary.victories as f64 / summary.games as f64) * 100.0;
        println!("Win rate: {win_rate:.1}%");
    }
    println!();
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a Summary,
    runs: &'a [RunRecord],
}

/// Machine-readable report on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json(summary: &Summary, records: &[RunRecord]) -> Result<()> {
    let report = JsonReport {
        summary,
        runs: records,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
