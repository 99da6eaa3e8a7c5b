mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::lap::{LapEligibilityArgs, LapQuoteArgs};
use commands::loan::{LoanArgs, OutstandingArgs};
use commands::policy::{SurrenderArgs, TaxBenefitArgs};
use commands::repayment::RecordPaymentArgs;

/// Loan installment and loan-against-policy calculations
#[derive(Parser)]
#[command(
    name = "lend",
    version,
    about = "Loan installment, amortization and loan-against-policy calculations",
    long_about = "A CLI for the agency loans desk with decimal precision. Computes EMIs, \
                  amortization schedules, outstanding balances, loan-against-policy \
                  eligibility and quotes, surrender values and premium tax benefits, \
                  and records repayments."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Round amounts in the result to this many decimal places
    #[arg(long, global = true)]
    round: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Equated monthly installment, total payment and total interest
    Emi(LoanArgs),
    /// Month-by-month amortization schedule
    Schedule(LoanArgs),
    /// Principal outstanding after a number of installments
    Outstanding(OutstandingArgs),
    /// Check loan-against-policy eligibility and maximum loan
    LapEligibility(LapEligibilityArgs),
    /// Quote a loan against an eligible policy
    LapQuote(LapQuoteArgs),
    /// Record a repayment against a loan ledger
    RecordPayment(RecordPaymentArgs),
    /// Estimate what surrendering a policy returns
    SurrenderValue(SurrenderArgs),
    /// Tax deduction and savings on an insurance premium
    TaxBenefit(TaxBenefitArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    telemetry::init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Outstanding(args) => commands::loan::run_outstanding(args),
        Commands::LapEligibility(args) => commands::lap::run_lap_eligibility(args),
        Commands::LapQuote(args) => commands::lap::run_lap_quote(args),
        Commands::RecordPayment(args) => commands::repayment::run_record_payment(args),
        Commands::SurrenderValue(args) => commands::policy::run_surrender_value(args),
        Commands::TaxBenefit(args) => commands::policy::run_tax_benefit(args),
        Commands::Version => {
            println!("lend {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(mut value) => {
            if let Some(dp) = cli.round {
                output::round_result(&mut value, dp);
            }
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
