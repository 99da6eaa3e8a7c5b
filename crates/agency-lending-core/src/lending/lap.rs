//! Loan against policy (LAP): how much an agency can lend against the
//! surrender value of a life policy, and at what rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LendingError;
use crate::lending::amortization::{compute_amortization, AmortizationResult};
use crate::lending::surrender::{guaranteed_value, tier_percent, validate_tiers, SurrenderTier};
use crate::time_value::checked;
use crate::types::*;
use crate::LendingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Inactive,
    Lapsed,
    Surrendered,
}

/// Underwriting rules for LAP. Any field missing from a rules file falls
/// back to the agency defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LapRules {
    pub min_years_completed: u32,
    pub surrender_tiers: Vec<SurrenderTier>,
    /// Share of surrender value that may be lent (0.80 = 80%)
    pub loan_to_value: Rate,
    pub base_rate_percent: Percent,
    /// Policies younger than this pay the surcharge on top of the base rate
    pub early_tenure_years: u32,
    pub early_tenure_surcharge_percent: Percent,
}

impl Default for LapRules {
    fn default() -> Self {
        LapRules {
            min_years_completed: 3,
            surrender_tiers: vec![
                SurrenderTier {
                    min_years: 10,
                    surrender_percent: dec!(90),
                },
                SurrenderTier {
                    min_years: 5,
                    surrender_percent: dec!(75),
                },
                SurrenderTier {
                    min_years: 3,
                    surrender_percent: dec!(50),
                },
            ],
            loan_to_value: dec!(0.80),
            base_rate_percent: dec!(8.5),
            early_tenure_years: 5,
            early_tenure_surcharge_percent: dec!(0.5),
        }
    }
}

impl LapRules {
    pub fn validate(&self) -> LendingResult<()> {
        if self.loan_to_value <= Decimal::ZERO || self.loan_to_value > Decimal::ONE {
            return Err(LendingError::invalid(
                "loan_to_value",
                "Loan-to-value must be in (0, 1]",
            ));
        }
        for (field, rate) in [
            ("base_rate_percent", self.base_rate_percent),
            (
                "early_tenure_surcharge_percent",
                self.early_tenure_surcharge_percent,
            ),
        ] {
            if rate < Decimal::ZERO || rate > dec!(100) {
                return Err(LendingError::invalid(field, "Rate must be in [0, 100]"));
            }
        }
        validate_tiers(&self.surrender_tiers, "surrender_tiers")
    }

    pub fn surrender_percent(&self, years_completed: u32) -> Percent {
        tier_percent(&self.surrender_tiers, years_completed)
    }

    pub fn offered_rate_percent(&self, years_completed: u32) -> Percent {
        if years_completed < self.early_tenure_years {
            self.base_rate_percent + self.early_tenure_surcharge_percent
        } else {
            self.base_rate_percent
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapEligibilityInput {
    pub policy_term_years: u32,
    pub years_completed: u32,
    pub sum_assured: Money,
    pub annual_premium: Money,
    pub status: PolicyStatus,
    #[serde(default)]
    pub rules: LapRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapEligibility {
    pub is_eligible: bool,
    pub reasons: Vec<String>,
    pub total_premium_paid: Money,
    pub surrender_percent: Percent,
    pub surrender_value: Money,
    pub max_loan_amount: Money,
    pub interest_rate_percent: Percent,
    pub years_completed: u32,
    pub policy_term_years: u32,
    pub sum_assured: Money,
}

fn evaluate(input: &LapEligibilityInput) -> LendingResult<LapEligibility> {
    let rules = &input.rules;
    rules.validate()?;

    if input.policy_term_years == 0 {
        return Err(LendingError::invalid(
            "policy_term_years",
            "Policy term must be at least 1 year",
        ));
    }
    if input.years_completed > input.policy_term_years {
        return Err(LendingError::invalid(
            "years_completed",
            format!(
                "Cannot exceed the policy term of {} years",
                input.policy_term_years
            ),
        ));
    }
    if input.sum_assured < Decimal::ZERO {
        return Err(LendingError::invalid(
            "sum_assured",
            "Sum assured cannot be negative",
        ));
    }
    if input.annual_premium < Decimal::ZERO {
        return Err(LendingError::invalid(
            "annual_premium",
            "Premium cannot be negative",
        ));
    }

    let mut reasons = Vec::new();
    if input.years_completed < rules.min_years_completed {
        reasons.push(format!(
            "Policy must be active for at least {} years",
            rules.min_years_completed
        ));
    }
    if input.status != PolicyStatus::Active {
        reasons.push("Policy must be in active status".to_string());
    }
    if input.annual_premium.is_zero() {
        reasons.push("Premium must be greater than zero".to_string());
    }

    let surrender_percent = rules.surrender_percent(input.years_completed);
    let (total_premium_paid, surrender_value) = guaranteed_value(
        input.annual_premium,
        input.years_completed,
        surrender_percent,
    )?;
    let max_loan_amount = checked(
        surrender_value.checked_mul(rules.loan_to_value),
        "maximum loan amount",
    )?;

    Ok(LapEligibility {
        is_eligible: reasons.is_empty(),
        reasons,
        total_premium_paid,
        surrender_percent,
        surrender_value,
        max_loan_amount,
        interest_rate_percent: rules.offered_rate_percent(input.years_completed),
        years_completed: input.years_completed,
        policy_term_years: input.policy_term_years,
        sum_assured: input.sum_assured,
    })
}

/// Check a policy against the LAP rules and size the maximum loan.
///
/// An ineligible policy is a normal result carrying its reasons; only
/// malformed input is an error.
pub fn assess_eligibility(
    input: &LapEligibilityInput,
) -> LendingResult<ComputationOutput<LapEligibility>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let eligibility = evaluate(input)?;

    if eligibility.is_eligible && eligibility.max_loan_amount.is_zero() {
        warnings.push("Policy is eligible but has no surrender value to lend against".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan against policy eligibility (surrender value x LTV)",
        &serde_json::json!({
            "min_years_completed": input.rules.min_years_completed,
            "loan_to_value": input.rules.loan_to_value.to_string(),
            "base_rate_percent": input.rules.base_rate_percent.to_string(),
        }),
        warnings,
        elapsed,
        eligibility,
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapQuoteInput {
    pub policy: LapEligibilityInput,
    pub requested_amount: Money,
    pub term_months: u32,
    /// Negotiated rate; the rules' offered rate applies when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate_percent: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapQuote {
    pub requested_amount: Money,
    pub max_loan_amount: Money,
    pub term_months: u32,
    pub interest_rate_percent: Percent,
    pub repayment: AmortizationResult,
}

/// Price a LAP loan for an eligible policy.
pub fn quote_lap(input: &LapQuoteInput) -> LendingResult<ComputationOutput<LapQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let eligibility = evaluate(&input.policy)?;
    if !eligibility.is_eligible {
        return Err(LendingError::invalid(
            "policy",
            format!("Policy is not eligible: {}", eligibility.reasons.join("; ")),
        ));
    }
    if input.requested_amount <= Decimal::ZERO {
        return Err(LendingError::invalid(
            "requested_amount",
            "Requested amount must be positive",
        ));
    }
    if input.requested_amount > eligibility.max_loan_amount {
        return Err(LendingError::invalid(
            "requested_amount",
            format!(
                "Requested {} exceeds the maximum loan of {}",
                input.requested_amount,
                eligibility.max_loan_amount.round_dp(2)
            ),
        ));
    }

    let rate = match input.interest_rate_percent {
        Some(negotiated) => {
            if negotiated < eligibility.interest_rate_percent {
                warnings.push(format!(
                    "Negotiated rate {negotiated}% is below the offered rate {}%",
                    eligibility.interest_rate_percent
                ));
            }
            negotiated
        }
        None => eligibility.interest_rate_percent,
    };

    let repayment = compute_amortization(input.requested_amount, rate, input.term_months)?;

    let output = LapQuote {
        requested_amount: input.requested_amount,
        max_loan_amount: eligibility.max_loan_amount,
        term_months: input.term_months,
        interest_rate_percent: rate,
        repayment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan against policy quote (EMI at offered rate)",
        &serde_json::json!({
            "requested_amount": input.requested_amount.to_string(),
            "term_months": input.term_months,
            "interest_rate_percent": rate.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
