use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use agency_lending_core::lending::lap::{
    self, LapEligibilityInput, LapQuoteInput, LapRules, PolicyStatus,
};

use super::load_or_build;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
    Lapsed,
    Surrendered,
}

impl From<StatusArg> for PolicyStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Active => PolicyStatus::Active,
            StatusArg::Inactive => PolicyStatus::Inactive,
            StatusArg::Lapsed => PolicyStatus::Lapsed,
            StatusArg::Surrendered => PolicyStatus::Surrendered,
        }
    }
}

/// Policy details for a loan-against-policy check
#[derive(Args)]
pub struct PolicyArgs {
    /// Policy term in years
    #[arg(long)]
    pub policy_term: Option<u32>,

    /// Years of premiums already paid
    #[arg(long)]
    pub years_completed: Option<u32>,

    /// Sum assured
    #[arg(long)]
    pub sum_assured: Option<Decimal>,

    /// Annual premium
    #[arg(long)]
    pub premium: Option<Decimal>,

    /// Policy status
    #[arg(long, value_enum, default_value = "active")]
    pub status: StatusArg,

    /// YAML/JSON file overriding the default LAP underwriting rules
    #[arg(long)]
    pub rules: Option<String>,
}

impl PolicyArgs {
    fn policy(&self) -> Result<LapEligibilityInput, Box<dyn std::error::Error>> {
        Ok(LapEligibilityInput {
            policy_term_years: self
                .policy_term
                .ok_or("--policy-term is required (or provide --input)")?,
            years_completed: self
                .years_completed
                .ok_or("--years-completed is required (or provide --input)")?,
            sum_assured: self
                .sum_assured
                .ok_or("--sum-assured is required (or provide --input)")?,
            annual_premium: self
                .premium
                .ok_or("--premium is required (or provide --input)")?,
            status: self.status.into(),
            rules: LapRules::default(),
        })
    }

    fn rules_override(&self) -> Result<Option<LapRules>, Box<dyn std::error::Error>> {
        self.rules
            .as_deref()
            .map(input::file::read_input::<LapRules>)
            .transpose()
    }
}

/// Arguments for LAP eligibility
#[derive(Args)]
pub struct LapEligibilityArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

pub fn run_lap_eligibility(args: LapEligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut policy: LapEligibilityInput =
        load_or_build(args.input.as_deref(), || args.policy.policy())?;
    if let Some(rules) = args.policy.rules_override()? {
        policy.rules = rules;
    }
    let result = lap::assess_eligibility(&policy)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for a LAP loan quote
#[derive(Args)]
pub struct LapQuoteArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Loan amount requested
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Repayment term in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Negotiated annual rate in percent (defaults to the offered rate)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

pub fn run_lap_quote(args: LapQuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut quote: LapQuoteInput = load_or_build(args.input.as_deref(), || {
        Ok(LapQuoteInput {
            policy: args.policy.policy()?,
            requested_amount: args
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            term_months: args.months.ok_or("--months is required (or provide --input)")?,
            interest_rate_percent: args.rate,
        })
    })?;
    if let Some(rules) = args.policy.rules_override()? {
        quote.policy.rules = rules;
    }
    let result = lap::quote_lap(&quote)?;
    Ok(serde_json::to_value(result)?)
}
