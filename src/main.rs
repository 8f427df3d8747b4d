mod config;
mod database;
mod distance;
mod error;
mod monitor;
mod query;
mod records;
mod roads;
mod utils;

use anyhow::Result;
use clap::Parser;
use fs_err::File;
use log::info;
use std::io::{self, BufRead, BufReader};

use database::TrafficDatabase;

/// Tracks the distance cars travel on motorways and ordinary roads.
#[derive(Parser)]
#[clap(version)]
struct Args {
    /// Read records from this file instead of standard input
    #[clap(long)]
    input: Option<String>,
    /// TOML file overriding the road category letters
    #[clap(long)]
    config: Option<String>,
    /// Write the final totals as JSON to this file
    #[clap(long)]
    snapshot: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();
    let args = Args::parse();

    let config = config::load(args.config.as_deref())?;
    info!(
        "Motorway category {}, ordinary category {}",
        config.roads.motorway, config.roads.ordinary
    );

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };

    let mut db = TrafficDatabase::new(config.roads);
    let summary = monitor::run(&mut db, input, io::stdout().lock(), io::stderr().lock())?;
    info!(
        "Read {} lines: {} records, {} queries, {} errors, {} journeys still open",
        summary.lines,
        summary.records,
        summary.queries,
        summary.errors,
        db.open_journey_count()
    );

    if let Some(path) = &args.snapshot {
        utils::write_json_file(path, utils::Snapshot::of(&db))?;
    }

    Ok(())
}
