use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use agency_lending_core::lending::repayment::{
    self, Payment, RecordPaymentInput, RepaymentLedger,
};

use super::load_or_build;
use crate::input;

/// Arguments for recording a payment against a loan
#[derive(Args)]
pub struct RecordPaymentArgs {
    /// Path to JSON/YAML file holding both ledger and payment
    #[arg(long)]
    pub input: Option<String>,

    /// Path to the current ledger (JSON/YAML)
    #[arg(long)]
    pub ledger: Option<String>,

    /// Amount paid
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// How the payment was made (cash, cheque, upi, bank_transfer, ...)
    #[arg(long, default_value = "cash")]
    pub method: String,

    /// Bank or gateway transaction reference
    #[arg(long)]
    pub transaction_id: Option<String>,

    /// Payment date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Free-text note stored with the payment
    #[arg(long)]
    pub notes: Option<String>,
}

pub fn run_record_payment(args: RecordPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: RecordPaymentInput = load_or_build(args.input.as_deref(), || {
        let ledger_path = args
            .ledger
            .as_deref()
            .ok_or("--ledger is required (or provide --input)")?;
        let ledger: RepaymentLedger = input::file::read_input(ledger_path)?;
        Ok(RecordPaymentInput {
            ledger,
            payment: Payment {
                amount: args
                    .amount
                    .ok_or("--amount is required (or provide --input)")?,
                payment_method: args.method.clone(),
                transaction_id: args.transaction_id.clone(),
                paid_on: args
                    .date
                    .ok_or("--date is required (or provide --input)")?,
                notes: args.notes.clone(),
            },
        })
    })?;
    let result = repayment::record_payment(&request)?;
    Ok(serde_json::to_value(result)?)
}
