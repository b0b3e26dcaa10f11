mod models;

use anyhow::Context;
use clap::Parser;
use models::{BatchInstance, SolutionReport};
use solver::SolveOutcome;
use std::fs;
use std::path::PathBuf;

/// Match orders on a token pair at a uniform clearing price
#[derive(Parser)]
#[command(name = "solver-cli")]
struct Args {
    /// Path to the batch instance JSON
    instance: PathBuf,

    /// Write the solution to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let raw = fs::read_to_string(&args.instance)
        .with_context(|| format!("reading {}", args.instance.display()))?;
    let instance: BatchInstance =
        serde_json::from_str(&raw).context("malformed batch instance")?;
    let (pair, orders) = instance.to_domain()?;

    tracing::info!("Solving {} orders on {}", orders.len(), pair);

    let report = match solver::solve(&orders, &pair)? {
        SolveOutcome::Match(settlement) => {
            tracing::info!(
                "Matched {} orders at rate {}",
                settlement.executions.len(),
                settlement.rate
            );
            SolutionReport::Match { settlement }
        }
        SolveOutcome::NoMatch => {
            tracing::info!("No feasible match");
            SolutionReport::NoMatch
        }
    };

    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}
