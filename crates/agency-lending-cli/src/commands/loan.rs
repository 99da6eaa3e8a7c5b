use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use agency_lending_core::lending::amortization::{self, LoanTerms};
use agency_lending_core::lending::schedule;

use super::load_or_build;

/// Loan terms shared by the EMI, schedule and outstanding commands
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 10.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub months: Option<u32>,
}

impl LoanArgs {
    fn terms(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        load_or_build(self.input.as_deref(), || {
            let principal = self
                .principal
                .ok_or("--principal is required (or provide --input)")?;
            let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
            let months = self.months.ok_or("--months is required (or provide --input)")?;
            Ok(LoanTerms::new(principal, rate, months))
        })
    }
}

pub fn run_emi(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = args.terms()?;
    let result = amortization::amortize(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = args.terms()?;
    let result = schedule::build_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the outstanding balance calculation
#[derive(Args)]
pub struct OutstandingArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Number of installments already paid
    #[arg(long)]
    pub paid: u32,
}

pub fn run_outstanding(args: OutstandingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = args.loan.terms()?;
    let balance = schedule::outstanding_balance(&terms, args.paid)?;
    Ok(serde_json::json!({
        "result": {
            "installments_paid": args.paid,
            "installments_remaining": terms.term_months - args.paid,
            "outstanding_principal": balance.to_string(),
        }
    }))
}
