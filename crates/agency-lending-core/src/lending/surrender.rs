//! Surrender value of a life policy: the share of premiums returned when a
//! policyholder exits early, plus accrued bonus on with-profit plans.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LendingError;
use crate::time_value::checked;
use crate::types::*;
use crate::LendingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyType {
    Term,
    Endowment,
    WithProfit,
    Ulip,
}

/// Surrender value paid once a policy has run for at least `min_years`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurrenderTier {
    pub min_years: u32,
    pub surrender_percent: Percent,
}

/// Highest tier reached after `years_completed`, or zero below every tier.
pub fn tier_percent(tiers: &[SurrenderTier], years_completed: u32) -> Percent {
    tiers
        .iter()
        .filter(|t| years_completed >= t.min_years)
        .max_by_key(|t| t.min_years)
        .map(|t| t.surrender_percent)
        .unwrap_or(Decimal::ZERO)
}

pub(crate) fn validate_tiers(tiers: &[SurrenderTier], field: &str) -> LendingResult<()> {
    for tier in tiers {
        if tier.surrender_percent < Decimal::ZERO || tier.surrender_percent > dec!(100) {
            return Err(LendingError::invalid(
                field,
                format!(
                    "Tier at {} years has surrender percent {} outside [0, 100]",
                    tier.min_years, tier.surrender_percent
                ),
            ));
        }
    }
    Ok(())
}

/// Premiums paid to date and the guaranteed surrender value on them.
pub(crate) fn guaranteed_value(
    annual_premium: Money,
    years_completed: u32,
    percent: Percent,
) -> LendingResult<(Money, Money)> {
    let paid = checked(
        annual_premium.checked_mul(Decimal::from(years_completed)),
        "total premium paid",
    )?;
    let value = checked(
        paid.checked_mul(percent).map(|v| v / dec!(100)),
        "surrender value",
    )?;
    Ok((paid, value))
}

/// Any field missing from a rules file keeps the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurrenderRules {
    pub tiers: Vec<SurrenderTier>,
    /// Bonus per completed year as a share of sum assured (0.04 = 4%)
    pub with_profit_bonus_rate: Rate,
}

impl Default for SurrenderRules {
    fn default() -> Self {
        SurrenderRules {
            tiers: vec![
                SurrenderTier {
                    min_years: 1,
                    surrender_percent: dec!(30),
                },
                SurrenderTier {
                    min_years: 3,
                    surrender_percent: dec!(50),
                },
                SurrenderTier {
                    min_years: 5,
                    surrender_percent: dec!(75),
                },
                SurrenderTier {
                    min_years: 10,
                    surrender_percent: dec!(90),
                },
            ],
            with_profit_bonus_rate: dec!(0.04),
        }
    }
}

impl SurrenderRules {
    pub fn validate(&self) -> LendingResult<()> {
        validate_tiers(&self.tiers, "tiers")?;
        let rate = self.with_profit_bonus_rate;
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(LendingError::invalid(
                "with_profit_bonus_rate",
                "Bonus rate must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurrenderInput {
    pub policy_type: PolicyType,
    pub policy_term_years: u32,
    pub years_completed: u32,
    pub sum_assured: Money,
    pub annual_premium: Money,
    #[serde(default)]
    pub rules: SurrenderRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurrenderValue {
    pub policy_type: PolicyType,
    pub policy_term_years: u32,
    pub years_completed: u32,
    pub sum_assured: Money,
    pub total_premium_paid: Money,
    pub surrender_percent: Percent,
    pub surrender_value: Money,
    pub bonus_value: Money,
    pub total_surrender_value: Money,
    /// Premiums paid minus what surrender returns; negative when the bonus
    /// outgrows the premiums
    pub premium_loss: Money,
    /// `None` when nothing has been paid yet
    pub loss_percent: Option<Percent>,
}

/// Value of surrendering a policy today.
pub fn compute_surrender_value(
    input: &SurrenderInput,
) -> LendingResult<ComputationOutput<SurrenderValue>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

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

    let surrender_percent = tier_percent(&rules.tiers, input.years_completed);
    let (total_premium_paid, surrender_value) = guaranteed_value(
        input.annual_premium,
        input.years_completed,
        surrender_percent,
    )?;

    let bonus_value = if input.policy_type == PolicyType::WithProfit {
        checked(
            input
                .sum_assured
                .checked_mul(rules.with_profit_bonus_rate)
                .and_then(|b| b.checked_mul(Decimal::from(input.years_completed))),
            "with-profit bonus",
        )?
    } else {
        Decimal::ZERO
    };

    let total_surrender_value = checked(
        surrender_value.checked_add(bonus_value),
        "total surrender value",
    )?;
    let premium_loss = checked(
        total_premium_paid.checked_sub(total_surrender_value),
        "premium loss",
    )?;

    let loss_percent = if total_premium_paid.is_zero() {
        warnings.push("No premiums paid yet; loss percentage is undefined".into());
        None
    } else {
        Some(checked(
            premium_loss
                .checked_div(total_premium_paid)
                .and_then(|share| share.checked_mul(dec!(100))),
            "loss percent",
        )?)
    };

    if surrender_percent.is_zero() && input.years_completed > 0 {
        warnings.push(format!(
            "No guaranteed surrender value after {} years",
            input.years_completed
        ));
    } else if input.years_completed == 0 {
        warnings.push("No surrender value in the first policy year".into());
    }
    if premium_loss < Decimal::ZERO {
        warnings.push("Bonus exceeds the premiums paid; surrender returns a gain".into());
    }

    let output = SurrenderValue {
        policy_type: input.policy_type,
        policy_term_years: input.policy_term_years,
        years_completed: input.years_completed,
        sum_assured: input.sum_assured,
        total_premium_paid,
        surrender_percent,
        surrender_value,
        bonus_value,
        total_surrender_value,
        premium_loss,
        loss_percent,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Surrender value (premiums paid x tier percent + with-profit bonus)",
        &serde_json::json!({
            "policy_type": input.policy_type,
            "tiers": rules.tiers.len(),
            "with_profit_bonus_rate": rules.with_profit_bonus_rate.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endowment(years: u32) -> SurrenderInput {
        SurrenderInput {
            policy_type: PolicyType::Endowment,
            policy_term_years: 20,
            years_completed: years,
            sum_assured: dec!(500000),
            annual_premium: dec!(25000),
            rules: SurrenderRules::default(),
        }
    }

    #[test]
    fn test_default_tiers() {
        let tiers = SurrenderRules::default().tiers;
        assert_eq!(tier_percent(&tiers, 0), Decimal::ZERO);
        assert_eq!(tier_percent(&tiers, 1), dec!(30));
        assert_eq!(tier_percent(&tiers, 2), dec!(30));
        assert_eq!(tier_percent(&tiers, 3), dec!(50));
        assert_eq!(tier_percent(&tiers, 5), dec!(75));
        assert_eq!(tier_percent(&tiers, 9), dec!(75));
        assert_eq!(tier_percent(&tiers, 10), dec!(90));
    }

    #[test]
    fn test_first_year_has_no_value() {
        let out = compute_surrender_value(&endowment(0)).unwrap();
        assert_eq!(out.result.total_surrender_value, Decimal::ZERO);
        assert_eq!(out.result.loss_percent, None);
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_endowment_four_years() {
        let out = compute_surrender_value(&endowment(4)).unwrap();
        let s = &out.result;
        // 4 x 25,000 = 100,000 paid; 50% back
        assert_eq!(s.total_premium_paid, dec!(100000));
        assert_eq!(s.surrender_value, dec!(50000));
        assert_eq!(s.bonus_value, Decimal::ZERO);
        assert_eq!(s.premium_loss, dec!(50000));
        assert_eq!(s.loss_percent, Some(dec!(50)));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_with_profit_bonus() {
        let mut input = endowment(6);
        input.policy_type = PolicyType::WithProfit;
        let out = compute_surrender_value(&input).unwrap();
        let s = &out.result;
        // 150,000 paid, 75% = 112,500; bonus 4% x 500,000 x 6 = 120,000
        assert_eq!(s.surrender_value, dec!(112500));
        assert_eq!(s.bonus_value, dec!(120000));
        assert_eq!(s.total_surrender_value, dec!(232500));
        assert_eq!(s.premium_loss, dec!(-82500));
        assert_eq!(s.loss_percent, Some(dec!(-55)));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_policy_type_wire_names() {
        let t: PolicyType = serde_json::from_str("\"with-profit\"").unwrap();
        assert_eq!(t, PolicyType::WithProfit);
        assert_eq!(serde_json::to_string(&PolicyType::Ulip).unwrap(), "\"ulip\"");
    }

    #[test]
    fn test_bad_bonus_rate_rejected() {
        let mut input = endowment(4);
        input.rules.with_profit_bonus_rate = dec!(-0.01);
        assert!(compute_surrender_value(&input).is_err());
    }
}
