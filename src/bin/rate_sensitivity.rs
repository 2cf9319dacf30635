//! Net-worth outcomes across a sweep of expected returns
//!
//! Usage: cargo run --bin rate_sensitivity -- --accounts accounts.csv --from 0.03 --to 0.10

use anyhow::{ensure, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use networth_projection::{snapshot::load_snapshot, Assumptions, ScenarioRunner};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Sweep expected returns and summarise each projection")]
struct Args {
    #[arg(long)]
    accounts: PathBuf,
    #[arg(long)]
    transactions: Option<PathBuf>,
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Lowest expected return in the sweep
    #[arg(long, default_value = "0.03")]
    from: Decimal,
    /// Highest expected return in the sweep
    #[arg(long, default_value = "0.10")]
    to: Decimal,
    #[arg(long, default_value = "0.005")]
    step: Decimal,
    #[arg(long, default_value_t = 30)]
    years: u32,
    #[arg(long)]
    as_of: Option<NaiveDate>,
    #[arg(long, default_value = "rate_sensitivity.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    ensure!(args.step > Decimal::ZERO, "step must be positive");
    ensure!(args.from <= args.to, "--from must not exceed --to");

    let as_of = args.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
    let assumptions = match &args.settings {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Assumptions::default(),
    };

    let (snapshot, _) = load_snapshot(&args.accounts, args.transactions.as_deref(), as_of)
        .context("failed to load ledger exports")?;

    let mut returns = Vec::new();
    let mut rate = args.from;
    while rate <= args.to {
        returns.push(rate);
        rate += args.step;
    }

    let start = Instant::now();
    let runner = ScenarioRunner::with_assumptions(assumptions);
    let outcomes = runner.return_sensitivity(&snapshot, &returns, args.years)?;
    println!("Ran {} scenarios in {:?}", outcomes.len(), start.elapsed());

    let mut file = File::create(&args.output)
        .with_context(|| format!("unable to create {}", args.output.display()))?;
    writeln!(file, "ExpectedReturn,YearsToFire,FireYear,FinalNetWorth,FinalInvestments,TargetReachedYear")?;

    for outcome in &outcomes {
        let summary = outcome.projection.summary();
        writeln!(
            file,
            "{},{},{},{:.2},{:.2},{}",
            outcome.assumptions.expected_return,
            outcome.fire.years_to_fire(),
            outcome.fire.fire_year(),
            summary.final_net_worth,
            summary.final_investments,
            summary.fire_reached_year.map(|y| y.to_string()).unwrap_or_default(),
        )?;
    }

    println!("Written {} rows to {}", outcomes.len(), args.output.display());

    if let Some(best) = outcomes.last() {
        println!(
            "At {}% return: final net worth ${:.2}",
            best.assumptions.expected_return * dec!(100),
            best.projection.summary().final_net_worth
        );
    }
    Ok(())
}
