//! Income tax deductions available on insurance premiums (Indian Income Tax
//! Act sections 80C, 80D and 80CCC) and what they save at a given bracket.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LendingError;
use crate::time_value::checked;
use crate::types::*;
use crate::LendingResult;

/// Which section a premium is claimed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxPolicyType {
    /// Life cover, section 80C
    Life,
    /// Health cover, section 80D
    Health,
    /// Pension plan, section 80CCC
    Pension,
}

/// Annual deduction ceilings in rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionLimits {
    pub section_80c: Money,
    pub section_80d: Money,
    pub section_80d_senior: Money,
    /// Age from which the senior 80D ceiling applies
    pub senior_age: u32,
    pub section_80ccc: Money,
}

impl Default for DeductionLimits {
    fn default() -> Self {
        DeductionLimits {
            section_80c: dec!(150000),
            section_80d: dec!(25000),
            section_80d_senior: dec!(50000),
            senior_age: 60,
            section_80ccc: dec!(150000),
        }
    }
}

impl DeductionLimits {
    pub fn validate(&self) -> LendingResult<()> {
        for (field, limit) in [
            ("section_80c", self.section_80c),
            ("section_80d", self.section_80d),
            ("section_80d_senior", self.section_80d_senior),
            ("section_80ccc", self.section_80ccc),
        ] {
            if limit < Decimal::ZERO {
                return Err(LendingError::invalid(field, "Limit cannot be negative"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBenefitInput {
    pub annual_premium: Money,
    pub policy_type: TaxPolicyType,
    pub age: u32,
    pub tax_bracket_percent: Percent,
    /// Other 80C investments already claimed this year. 80C and 80CCC
    /// share one ceiling, so these reduce the room left for the premium.
    #[serde(default)]
    pub claimed_80c: Money,
    #[serde(default)]
    pub limits: DeductionLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBenefit {
    pub policy_type: TaxPolicyType,
    pub annual_premium: Money,
    pub section_80c_deduction: Money,
    pub section_80d_deduction: Money,
    pub section_80ccc_deduction: Money,
    pub total_deduction: Money,
    pub tax_bracket_percent: Percent,
    pub tax_savings: Money,
    /// Premium net of the tax it saves
    pub effective_premium: Money,
}

/// Deduction and tax saved on one year's premium.
pub fn compute_tax_benefit(
    input: &TaxBenefitInput,
) -> LendingResult<ComputationOutput<TaxBenefit>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let limits = &input.limits;
    limits.validate()?;

    if input.annual_premium <= Decimal::ZERO {
        return Err(LendingError::invalid(
            "annual_premium",
            "Premium must be positive",
        ));
    }
    if input.tax_bracket_percent < Decimal::ZERO || input.tax_bracket_percent > dec!(100) {
        return Err(LendingError::invalid(
            "tax_bracket_percent",
            "Tax bracket must be in [0, 100]",
        ));
    }
    if input.claimed_80c < Decimal::ZERO {
        return Err(LendingError::invalid(
            "claimed_80c",
            "Claimed amount cannot be negative",
        ));
    }

    // 80C and 80CCC together are capped at the 80C ceiling
    let shared_room = (limits.section_80c - input.claimed_80c).max(Decimal::ZERO);

    let (section, ceiling) = match input.policy_type {
        TaxPolicyType::Life => ("80C", shared_room),
        TaxPolicyType::Health if input.age >= limits.senior_age => {
            ("80D", limits.section_80d_senior)
        }
        TaxPolicyType::Health => ("80D", limits.section_80d),
        TaxPolicyType::Pension => ("80CCC", limits.section_80ccc.min(shared_room)),
    };
    let deduction = input.annual_premium.min(ceiling);

    if deduction < input.annual_premium {
        warnings.push(format!(
            "Only {deduction} of the premium is deductible under section {section}"
        ));
    }
    if input.tax_bracket_percent.is_zero() {
        warnings.push("No tax saved at a 0% bracket".into());
    }

    let tax_savings = checked(
        deduction
            .checked_mul(input.tax_bracket_percent)
            .map(|v| v / dec!(100)),
        "tax savings",
    )?;

    let (section_80c_deduction, section_80d_deduction, section_80ccc_deduction) =
        match input.policy_type {
            TaxPolicyType::Life => (deduction, Decimal::ZERO, Decimal::ZERO),
            TaxPolicyType::Health => (Decimal::ZERO, deduction, Decimal::ZERO),
            TaxPolicyType::Pension => (Decimal::ZERO, Decimal::ZERO, deduction),
        };

    let output = TaxBenefit {
        policy_type: input.policy_type,
        annual_premium: input.annual_premium,
        section_80c_deduction,
        section_80d_deduction,
        section_80ccc_deduction,
        total_deduction: deduction,
        tax_bracket_percent: input.tax_bracket_percent,
        tax_savings,
        effective_premium: input.annual_premium - tax_savings,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Premium tax deduction (80C / 80D / 80CCC) at marginal bracket",
        &serde_json::json!({
            "section": section,
            "ceiling": ceiling.to_string(),
            "age": input.age,
        }),
        warnings,
        elapsed,
        output,
    ))
}
