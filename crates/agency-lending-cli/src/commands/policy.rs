use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use agency_lending_core::lending::surrender::{
    self, PolicyType, SurrenderInput, SurrenderRules,
};
use agency_lending_core::lending::tax_benefit::{
    self, DeductionLimits, TaxBenefitInput, TaxPolicyType,
};

use super::load_or_build;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlanArg {
    Term,
    Endowment,
    WithProfit,
    Ulip,
}

impl From<PlanArg> for PolicyType {
    fn from(p: PlanArg) -> Self {
        match p {
            PlanArg::Term => PolicyType::Term,
            PlanArg::Endowment => PolicyType::Endowment,
            PlanArg::WithProfit => PolicyType::WithProfit,
            PlanArg::Ulip => PolicyType::Ulip,
        }
    }
}

/// Arguments for a surrender value estimate
#[derive(Args)]
pub struct SurrenderArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Plan type
    #[arg(long, value_enum, default_value = "endowment")]
    pub plan: PlanArg,

    /// Policy term in years
    #[arg(long, default_value_t = 20)]
    pub policy_term: u32,

    /// Years of premiums already paid
    #[arg(long)]
    pub years_completed: Option<u32>,

    /// Sum assured
    #[arg(long)]
    pub sum_assured: Option<Decimal>,

    /// Annual premium
    #[arg(long)]
    pub premium: Option<Decimal>,

    /// YAML/JSON file overriding the surrender tiers and bonus rate
    #[arg(long)]
    pub rules: Option<String>,
}

pub fn run_surrender_value(args: SurrenderArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request: SurrenderInput = load_or_build(args.input.as_deref(), || {
        Ok(SurrenderInput {
            policy_type: args.plan.into(),
            policy_term_years: args.policy_term,
            years_completed: args
                .years_completed
                .ok_or("--years-completed is required (or provide --input)")?,
            sum_assured: args
                .sum_assured
                .ok_or("--sum-assured is required (or provide --input)")?,
            annual_premium: args
                .premium
                .ok_or("--premium is required (or provide --input)")?,
            rules: SurrenderRules::default(),
        })
    })?;
    if let Some(path) = args.rules.as_deref() {
        request.rules = input::file::read_input(path)?;
    }
    let result = surrender::compute_surrender_value(&request)?;
    Ok(serde_json::to_value(result)?)
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CoverArg {
    Life,
    Health,
    Pension,
}

impl From<CoverArg> for TaxPolicyType {
    fn from(c: CoverArg) -> Self {
        match c {
            CoverArg::Life => TaxPolicyType::Life,
            CoverArg::Health => TaxPolicyType::Health,
            CoverArg::Pension => TaxPolicyType::Pension,
        }
    }
}

/// Arguments for a premium tax benefit estimate
#[derive(Args)]
pub struct TaxBenefitArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Annual premium
    #[arg(long)]
    pub premium: Option<Decimal>,

    /// Kind of cover the premium buys
    #[arg(long, value_enum, default_value = "life")]
    pub cover: CoverArg,

    /// Age of the insured
    #[arg(long)]
    pub age: Option<u32>,

    /// Marginal income tax bracket in percent
    #[arg(long, default_value = "20")]
    pub bracket: Decimal,

    /// Other 80C investments already claimed this year
    #[arg(long, default_value = "0")]
    pub claimed_80c: Decimal,

    /// YAML/JSON file overriding the deduction ceilings
    #[arg(long)]
    pub limits: Option<String>,
}

pub fn run_tax_benefit(args: TaxBenefitArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request: TaxBenefitInput = load_or_build(args.input.as_deref(), || {
        Ok(TaxBenefitInput {
            annual_premium: args
                .premium
                .ok_or("--premium is required (or provide --input)")?,
            policy_type: args.cover.into(),
            age: args.age.ok_or("--age is required (or provide --input)")?,
            tax_bracket_percent: args.bracket,
            claimed_80c: args.claimed_80c,
            limits: DeductionLimits::default(),
        })
    })?;
    if let Some(path) = args.limits.as_deref() {
        request.limits = input::file::read_input(path)?;
    }
    let result = tax_benefit::compute_tax_benefit(&request)?;
    Ok(serde_json::to_value(result)?)
}
