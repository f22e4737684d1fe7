use anyhow::Context;
use clap::Parser;

use cluster_sched_sim::loader::parser::load_simulation_config;
use cluster_sched_sim::{logger, run_simulation};

/// Discrete-time simulator of first-fit cluster scheduling.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON simulation config. The built-in ten node simulation is used if omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Overrides the end tick of the config.
    #[arg(long)]
    end_tick: Option<u64>,

    /// Overrides the seed of every random feed.
    #[arg(long)]
    seed: Option<u64>,

    /// Writes per-tick statistics as CSV to this file.
    #[arg(long)]
    stats: Option<String>,

    /// Prints the final report as JSON on stdout.
    #[arg(long)]
    report: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    let mut config = load_simulation_config(args.config.as_deref()).context("loading simulation config")?;
    if let Some(end_tick) = args.end_tick {
        config.end_tick = end_tick;
    }
    if let Some(seed) = args.seed {
        config.set_seed(seed);
    }
    if args.stats.is_some() {
        config.statistics_file = args.stats;
    }

    let report = run_simulation(config).context("running simulation")?;

    if args.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
