//! Net-worth projection CLI
//!
//! Command-line interface for FIRE estimates, loan payoffs and net-worth projections

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use networth_projection::{
    amortize, estimate_fire,
    fire::{FireOutcome, FireResult, DEFAULT_MAX_YEARS},
    loan::{amortization_schedule, LoanReport},
    projection::ProjectionSeries,
    snapshot::load_snapshot,
    Assumptions, LoanPayoffResult, ScenarioRunner,
};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "networth", version, about = "Long-horizon personal-finance projections")]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Date the projections start from (defaults to today)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate years until financial independence
    Fire(FireArgs),
    /// Simulate paydown of a single loan
    Loan(LoanArgs),
    /// Project net worth from ledger exports
    Project(LedgerArgs),
    /// FIRE estimate, loan payoffs and projection from ledger exports
    Report(LedgerArgs),
}

#[derive(Args, Debug)]
struct FireArgs {
    #[arg(long)]
    investments: Decimal,
    /// Annual savings (may be negative)
    #[arg(long, allow_hyphen_values = true)]
    savings: Decimal,
    /// Annual expenses
    #[arg(long)]
    expenses: Decimal,
    #[arg(long = "return", default_value = "0.07")]
    expected_return: Decimal,
    #[arg(long, default_value = "0.04")]
    withdrawal_rate: Decimal,
    #[arg(long, default_value = "0.03")]
    inflation: Decimal,
    #[arg(long, default_value_t = DEFAULT_MAX_YEARS)]
    max_years: u32,
}

#[derive(Args, Debug)]
struct LoanArgs {
    #[arg(long)]
    balance: Decimal,
    /// Annual interest rate as a decimal (0.05 = 5%)
    #[arg(long)]
    rate: Decimal,
    #[arg(long)]
    payment: Decimal,
    #[arg(long, default_value = "0")]
    extra: Decimal,
    /// Write the month-by-month schedule to this CSV file
    #[arg(long)]
    schedule: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LedgerArgs {
    /// accounts.csv export (id,name,type,subtype,balance)
    #[arg(long)]
    accounts: PathBuf,
    /// transactions.csv export (id,date,amount,is_income)
    #[arg(long)]
    transactions: Option<PathBuf>,
    /// Settings JSON with rate assumptions and loan plans
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Projection horizon in years (defaults to the settings value)
    #[arg(long)]
    years: Option<u32>,
    /// Write the projection to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let as_of = cli
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Command::Fire(args) => run_fire(args, as_of, cli.json),
        Command::Loan(args) => run_loan(args, as_of, cli.json),
        Command::Project(args) => run_project(args, as_of, cli.json),
        Command::Report(args) => run_report(args, as_of, cli.json),
    }
}

fn run_fire(args: FireArgs, as_of: NaiveDate, json: bool) -> Result<()> {
    let result = estimate_fire(
        args.investments,
        args.savings,
        args.expenses,
        args.expected_return,
        args.withdrawal_rate,
        args.inflation,
        args.max_years,
        as_of,
    )
    .context("invalid FIRE inputs")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_fire(&result, args.max_years);
    }
    Ok(())
}

fn run_loan(args: LoanArgs, as_of: NaiveDate, json: bool) -> Result<()> {
    let result = amortize(args.balance, args.rate, args.payment, args.extra, as_of)
        .context("invalid loan inputs")?;

    if let Some(path) = &args.schedule {
        let rows = amortization_schedule(args.balance, args.rate, args.payment, args.extra)?;
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("Schedule ({} months) written to: {}", rows.len(), path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_loan("Loan", &result);
    }
    Ok(())
}

fn run_project(args: LedgerArgs, as_of: NaiveDate, json: bool) -> Result<()> {
    let assumptions = load_assumptions(args.settings.as_deref())?;
    let (snapshot, _) = load_snapshot(&args.accounts, args.transactions.as_deref(), as_of)
        .context("failed to load ledger exports")?;

    let years = args.years.unwrap_or(assumptions.projection_years);
    let series = networth_projection::project(&snapshot, &assumptions, years)
        .context("invalid projection inputs")?;

    write_projection_csv(args.csv.as_deref(), &series)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        print_projection(&series);
    }
    Ok(())
}

fn run_report(args: LedgerArgs, as_of: NaiveDate, json: bool) -> Result<()> {
    let mut assumptions = load_assumptions(args.settings.as_deref())?;
    if let Some(years) = args.years {
        assumptions.projection_years = years;
    }

    let (snapshot, accounts) = load_snapshot(&args.accounts, args.transactions.as_deref(), as_of)
        .context("failed to load ledger exports")?;

    let report = ScenarioRunner::with_assumptions(assumptions)
        .report(&snapshot, &accounts)
        .context("invalid report inputs")?;

    write_projection_csv(args.csv.as_deref(), &report.projection)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Snapshot as of {}", snapshot.as_of);
    println!("  Net worth:       ${:.2}", snapshot.net_worth);
    println!("  Investments:     ${:.2}", snapshot.investments);
    println!("  Monthly savings: ${:.2}", snapshot.monthly_savings);
    println!("  Savings rate:    {:.1}%", snapshot.savings_rate() * Decimal::from(100));
    println!();

    print_fire(&report.fire, DEFAULT_MAX_YEARS);
    println!();

    if report.loans.is_empty() {
        println!("No loan plans configured");
    }
    for LoanReport { name, payoff, .. } in &report.loans {
        print_loan(name, payoff);
    }
    println!();

    print_projection(&report.projection);
    Ok(())
}

fn load_assumptions(path: Option<&Path>) -> Result<Assumptions> {
    match path {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(Assumptions::default()),
    }
}

fn write_projection_csv(path: Option<&Path>, series: &ProjectionSeries) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
    series.write_csv(file)?;
    println!("Full projection written to: {}", path.display());
    Ok(())
}

fn print_fire(result: &FireResult, max_years: u32) {
    println!("FIRE estimate:");
    println!("  FIRE number:     ${:.2}", result.fire_number);
    println!("  Investments:     ${:.2}", result.current_investments);
    println!("  Progress:        {:.1}%", result.current_progress * 100.0);
    match result.outcome {
        FireOutcome::Achieved { years, target_year } => {
            println!("  Years to FIRE:   {} ({})", years, target_year);
            println!("  Monthly savings: ${:.2}", result.monthly_savings_needed);
        }
        FireOutcome::NotAchievable => {
            println!("  Years to FIRE:   {}+ years", max_years);
        }
    }
}

fn print_loan(name: &str, result: &LoanPayoffResult) {
    println!("{}:", name);
    println!("  Balance:         ${:.2}", result.starting_balance);
    if result.is_paid_off() {
        println!(
            "  Payoff:          {} years {} months ({})",
            result.years(),
            result.remaining_months(),
            result.payoff_date
        );
    } else {
        println!(
            "  Payoff:          not within {} months ({:?}), ${:.2} still owing",
            result.months, result.status, result.remaining_balance
        );
    }
    println!("  Total interest:  ${:.2}", result.total_interest);
}

fn print_projection(series: &ProjectionSeries) {
    println!("Projection ({} years, FIRE target ${:.2}):", series.len(), series.fire_target);
    println!("{:>6} {:>16} {:>16} {:>14} {:>8}", "Year", "Net worth", "Investments", "Loans", "FIRE %");
    println!("{}", "-".repeat(64));

    for point in series {
        println!(
            "{:>6} {:>16.2} {:>16.2} {:>14.2} {:>7.1}%",
            point.year,
            point.net_worth,
            point.investments,
            point.loan_balance,
            point.fire_progress * 100.0
        );
    }

    let summary = series.summary();
    println!("\nSummary:");
    println!("  Final net worth: ${:.2}", summary.final_net_worth);
    println!("  Peak net worth:  ${:.2}", summary.peak_net_worth);
    match summary.fire_reached_year {
        Some(year) => println!("  FIRE target reached in {}", year),
        None => println!("  FIRE target not reached"),
    }
}
