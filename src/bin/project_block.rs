//! Run payoff projections for every user in a finance CSV
//!
//! Writes one row per user with the payoff horizon, interest over the preview window and
//! the 50/30/20 check, plus block totals on stdout.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use fywise::finances::{load_finances, BudgetCheck, FinanceSummary};
use fywise::AppConfig;

#[derive(Debug, Parser)]
#[command(about = "Batch loan payoff projections from a finance CSV")]
struct Args {
    /// Finance CSV, same layout as the CSV store
    input: PathBuf,

    #[arg(long, default_value = "payoff_output.csv")]
    output: PathBuf,

    #[arg(long, env = "FYWISE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct PayoffRow {
    username: String,
    loan_balance: f64,
    monthly_payment: f64,
    interest_rate: Option<f64>,
    months_to_payoff: Option<f64>,
    years_to_payoff: Option<f64>,
    rate_applied: bool,
    preview_interest: f64,
    estimated_savings: f64,
    budget_on_track: Option<bool>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;
    let engine = config.engine();

    let start = Instant::now();
    println!("Loading finances from {}...", args.input.display());
    let users = load_finances(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    println!("Loaded {} users in {:?}", users.len(), start.elapsed());

    let proj_start = Instant::now();
    let rows: Vec<PayoffRow> = users
        .par_iter()
        .map(|user| {
            let loan = user.record.loan();
            let result = engine.project(&loan);
            PayoffRow {
                username: user.username.clone(),
                loan_balance: loan.balance,
                monthly_payment: loan.monthly_payment,
                interest_rate: loan.usable_rate(),
                months_to_payoff: result.months_to_payoff,
                years_to_payoff: result.years_to_payoff,
                rate_applied: result.rate_applied,
                preview_interest: result.summary().total_interest,
                estimated_savings: FinanceSummary::from_record(&user.record).estimated_savings,
                budget_on_track: BudgetCheck::evaluate(&user.record).map(|c| c.on_track()),
            }
        })
        .collect();
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Output written to {}", args.output.display());

    let total_balance: f64 = rows.iter().map(|r| r.loan_balance).sum();
    let total_interest: f64 = rows.iter().map(|r| r.preview_interest).sum();
    let no_estimate = rows.iter().filter(|r| r.months_to_payoff.is_none()).count();
    let linear = rows
        .iter()
        .filter(|r| r.months_to_payoff.is_some() && !r.rate_applied)
        .count();

    println!("\nBlock Summary:");
    println!("  Users:               {}", rows.len());
    println!("  Total loan balance:  ${:.0}", total_balance);
    println!("  Preview interest:    ${:.0}", total_interest);
    println!("  Linear estimates:    {}", linear);
    println!("  No estimate:         {}", no_estimate);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
