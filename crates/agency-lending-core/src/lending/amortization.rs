use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LendingError;
use crate::time_value::{self, checked};
use crate::types::*;
use crate::LendingResult;

/// Longest supported term: 100 years of monthly installments.
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Terms of a fully-amortizing, fixed-rate loan repaid monthly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Annual rate as quoted, e.g. 10.5 for 10.5% p.a.
    pub annual_rate_percent: Percent,
    pub term_months: u32,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_months: u32) -> Self {
        LoanTerms {
            principal,
            annual_rate_percent,
            term_months,
        }
    }

    pub fn validate(&self) -> LendingResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LendingError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(LendingError::invalid(
                "annual_rate_percent",
                "Interest rate cannot be negative",
            ));
        }
        if self.term_months == 0 {
            return Err(LendingError::invalid(
                "term_months",
                "Term must be at least 1 month",
            ));
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(LendingError::invalid(
                "term_months",
                format!("Term cannot exceed {MAX_TERM_MONTHS} months"),
            ));
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> Rate {
        time_value::monthly_rate(self.annual_rate_percent)
    }
}

/// Installment and totals for a loan. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_installment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

/// Equated monthly installment for a fully-amortizing loan.
///
/// Fails with [`LendingError::InvalidArgument`] when `principal <= 0`,
/// `term_months` is zero or above [`MAX_TERM_MONTHS`], or
/// `annual_rate_percent < 0`. Results beyond the decimal range are
/// [`LendingError::ArithmeticOverflow`].
pub fn compute_amortization(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> LendingResult<AmortizationResult> {
    let terms = LoanTerms::new(principal, annual_rate_percent, term_months);
    terms.validate()?;

    let installment =
        time_value::annuity_payment(terms.monthly_rate(), term_months, principal)?;
    let total_payment = checked(
        installment.checked_mul(Decimal::from(term_months)),
        "total payment",
    )?;
    let total_interest = checked(total_payment.checked_sub(principal), "total interest")?;

    Ok(AmortizationResult {
        monthly_installment: installment,
        total_payment,
        total_interest,
    })
}

/// [`compute_amortization`] wrapped in the standard output envelope.
pub fn amortize(terms: &LoanTerms) -> LendingResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute_amortization(
        terms.principal,
        terms.annual_rate_percent,
        terms.term_months,
    )?;

    if terms.annual_rate_percent.is_zero() {
        warnings.push("Zero-interest loan: installment is principal divided by term".into());
    }
    if result.total_interest > terms.principal {
        warnings.push(format!(
            "Total interest ({}) exceeds principal ({})",
            result.total_interest.round_dp(2),
            terms.principal
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-payment annuity (EMI)",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate_percent": terms.annual_rate_percent.to_string(),
            "monthly_rate": terms.monthly_rate().to_string(),
            "term_months": terms.term_months,
        }),
        warnings,
        elapsed,
        result,
    ))
}
