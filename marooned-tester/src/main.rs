mod policy;
mod reports;
mod simulation;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use marooned_game::Catalog;
use policy::Strategy;
use simulation::{aggregate, run_session};

#[derive(Debug, Parser)]
#[command(name = "marooned-tester", version = "0.1.0")]
#[command(about = "Automated QA testing for the Marooned game engine - headless policy-driven runs")]
struct Args {
    /// Number of games to simulate
    #[arg(long, default_value_t = 25)]
    games: u64,

    /// First seed; each game uses the next consecutive seed
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Player policy driving the runs
    #[arg(long, value_enum, default_value_t = Strategy::Balanced)]
    policy: Strategy,

    /// Turn budget per game before a run counts as a timeout
    #[arg(long, default_value_t = 500)]
    max_turns: u32,

    /// Catalog JSON path (defaults to the bundled catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = load_catalog(args.catalog.as_deref())?;
    ensure!(
        !catalog.is_empty(),
        "refusing to simulate against an empty catalog"
    );

    let mut records = Vec::with_capacity(usize::try_from(args.games).unwrap_or_default());
    for offset in 0..args.games {
        let seed = args.seed.wrapping_add(offset);
        let mut player = args.policy.create_policy(seed);
        let record = run_session(seed, player.as_mut(), catalog.clone(), args.max_turns);
        log::debug!(
            "seed {seed}: {:?} after {} turns ({} crafts)",
            record.ending,
            record.turns,
            record.items_crafted
        );
        records.push(record);
    }

    let summary = aggregate(args.policy.label(), &records);
    match args.report.as_str() {
        "json" => reports::print_json(&summary, &records)?,
        _ => reports::print_console(&summary),
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let payload = fs::read_to_string(path)
                .with_context(|| format!("reading catalog from {}", path.display()))?;
            Catalog::from_json(&payload).context("validating catalog payload")
        }
        None => Ok(Catalog::load_from_static()),
    }
}
