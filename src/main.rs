//! FYWISE CLI
//!
//! Command-line front end for loan projections, the dashboard summary,
//! editing a user's finances and chatting with the assistant.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::debug;

use fywise::finances::FinanceField;
use fywise::loan::narrative::{estimated_payoff_date, format_amount};
use fywise::{open_store, AppConfig, Assistant, Dashboard, LoanState, Session};

#[derive(Debug, Parser)]
#[command(name = "fywise", version, about = "Personal finance dashboard and loan payoff projections")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true, env = "FYWISE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a loan payoff from raw inputs
    Project {
        #[arg(long)]
        balance: f64,

        #[arg(long)]
        payment: f64,

        /// Annual rate in percent, e.g. "4.5" or "4.5%"
        #[arg(long)]
        rate: Option<String>,
    },

    /// Show a user's dashboard
    Dashboard {
        #[arg(long)]
        user: String,

        /// Print the full dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update one finance field for a user
    Set {
        #[arg(long)]
        user: String,

        /// Field name, e.g. rent or interest_rate
        field: FinanceField,

        value: f64,
    },

    /// Ask the assistant a question, or start an interactive chat
    Chat {
        #[arg(long)]
        user: String,

        message: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    debug!("configuration: {:?}", config);

    match cli.command {
        Command::Project { balance, payment, rate } => {
            run_project(&config, LoanState::with_raw_rate(balance, payment, rate.as_deref()));
        }
        Command::Dashboard { user, json } => {
            let store = open_store(&config.store)?;
            let session = Session::open(store.as_ref(), &user)?;
            let dashboard = Dashboard::build_as_of(session.finances(), &config, Local::now().date_naive());
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print_dashboard(session.username(), &dashboard);
            }
        }
        Command::Set { user, field, value } => {
            let store = open_store(&config.store)?;
            let mut session = Session::open(store.as_ref(), &user)?;
            session
                .update_field(store.as_ref(), field, value)
                .with_context(|| format!("failed to update {}", field))?;
            if let Some(status) = session.status() {
                println!("{}", status);
            }
        }
        Command::Chat { user, message } => {
            let store = open_store(&config.store)?;
            let mut session = Session::open(store.as_ref(), &user)?;
            let assistant = Assistant::new(config.engine());

            match message {
                Some(message) => {
                    if let Some(reply) = session.chat(&assistant, &message) {
                        println!("{}", reply);
                    }
                }
                None => chat_loop(&mut session, &assistant)?,
            }
            println!("{}", session.logout());
        }
    }

    Ok(())
}

fn run_project(config: &AppConfig, loan: LoanState) {
    let engine = config.engine();
    let result = engine.project(&loan);

    println!("Loan: ${:.2} at ${:.2}/month", loan.balance, loan.monthly_payment);
    match loan.usable_rate() {
        Some(rate) => println!("  Rate: {:.2}% APR", rate),
        None => println!("  Rate: not set (linear estimate)"),
    }

    match (result.months_to_payoff, result.years_to_payoff) {
        (Some(months), Some(years)) => {
            println!("  Payoff: {:.1} months ({:.1} years)", months, years);
            if let Some(date) = estimated_payoff_date(&result, Local::now().date_naive()) {
                println!("  Estimated payoff date: {}", date.format("%B %Y"));
            }
        }
        _ => println!("  Payoff: no estimate (balance and payment must both be positive)"),
    }

    if result.schedule.is_empty() {
        return;
    }

    println!();
    println!("{:>5} {:>14} {:>12} {:>12} {:>14}", "Month", "Start", "Interest", "Principal", "End");
    for row in &result.schedule {
        println!(
            "{:>5} {:>14.2} {:>12.2} {:>12.2} {:>14.2}",
            row.month, row.starting_balance, row.interest_portion, row.principal_portion, row.ending_balance
        );
    }

    let summary = result.summary();
    println!();
    println!(
        "First {} months: ${:.2} interest, ${:.2} principal",
        summary.months_shown, summary.total_interest, summary.total_principal
    );
}

fn print_dashboard(username: &str, dashboard: &Dashboard) {
    let summary = &dashboard.summary;

    println!("FYWISE dashboard for {}", username);
    println!("======================\n");
    println!("Monthly income:     ${}", format_amount(summary.total_income, 2));
    println!("Monthly expenses:   ${}", format_amount(summary.total_expenses, 2));
    println!(
        "Estimated savings:  ${} ({:.1}% of income)",
        format_amount(summary.estimated_savings, 2),
        summary.savings_rate_pct
    );

    println!("\nExpenses:");
    for share in &summary.expense_breakdown {
        println!("  {:<20} ${:>10} {:>6.1}%", share.label, format_amount(share.amount, 2), share.share_pct);
    }

    if let Some(budget) = &dashboard.budget {
        println!("\n{}", budget.describe());
    }

    println!("\nLoan");
    println!("  Balance:         ${}", format_amount(dashboard.loan.balance, 2));
    println!("  Monthly payment: ${}", format_amount(dashboard.loan.monthly_payment, 2));
    println!("  Interest rate:   {}", dashboard.narrative.interest_text);
    println!("  {}", dashboard.narrative.payoff_text);
    if let Some(date) = dashboard.payoff_date {
        println!("  Estimated payoff date: {}", date.format("%B %Y"));
    }
    println!("  {}", dashboard.narrative.interest_note);

    if !dashboard.trend.is_empty() {
        println!("\nBalance trend:");
        for point in &dashboard.trend {
            println!("  Month {:>3}: ${}", point.month, format_amount(point.balance, 2));
        }
    }
}

fn chat_loop(session: &mut Session, assistant: &Assistant) -> Result<()> {
    println!("Ask about your budget, loan, spending or savings. Type 'exit' to quit.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if let Some(reply) = session.chat(assistant, line) {
            println!("{}\n", reply);
        }
    }
    Ok(())
}
