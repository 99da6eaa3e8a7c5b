use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LendingError;
use crate::lending::amortization::{compute_amortization, LoanTerms};
use crate::time_value::{self, checked};
use crate::types::*;
use crate::LendingResult;

/// A single month in the amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub month: u32,
    pub opening_balance: Money,
    pub installment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Month-by-month repayment schedule for a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_installment: Money,
    pub periods: Vec<SchedulePeriod>,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_payment: Money,
}

/// Split every installment into interest and principal.
///
/// The last month repays whatever balance is left, so the closing balance
/// is exactly zero and the final installment absorbs any residual.
pub fn build_schedule(
    terms: &LoanTerms,
) -> LendingResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let emi = compute_amortization(
        terms.principal,
        terms.annual_rate_percent,
        terms.term_months,
    )?
    .monthly_installment;
    let rate = terms.monthly_rate();

    let mut periods = Vec::with_capacity(terms.term_months as usize);
    let mut balance = terms.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut total_payment = Decimal::ZERO;

    for month in 1..=terms.term_months {
        let opening = balance;
        let interest = checked(opening.checked_mul(rate), "schedule interest")?;

        let (installment, principal) = if month == terms.term_months {
            let payoff = checked(opening.checked_add(interest), "schedule final installment")?;
            (payoff, opening)
        } else {
            let repaid = checked(emi.checked_sub(interest), "schedule principal")?;
            (emi, repaid)
        };

        balance = checked(balance.checked_sub(principal), "schedule balance")?;
        total_interest = checked(total_interest.checked_add(interest), "schedule total interest")?;
        total_principal = checked(
            total_principal.checked_add(principal),
            "schedule total principal",
        )?;
        total_payment = checked(total_payment.checked_add(installment), "schedule total payment")?;

        periods.push(SchedulePeriod {
            month,
            opening_balance: opening,
            installment,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    if let Some(last) = periods.last() {
        let residual = last.installment - emi;
        if residual.abs() >= dec!(0.01) {
            warnings.push(format!(
                "Final installment differs from EMI by {}",
                residual.round_dp(2)
            ));
        }
    }

    let output = AmortizationSchedule {
        monthly_installment: emi,
        periods,
        total_interest,
        total_principal,
        total_payment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortization schedule (reducing balance)",
        &serde_json::json!({
            "principal": terms.principal.to_string(),
            "annual_rate_percent": terms.annual_rate_percent.to_string(),
            "term_months": terms.term_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Principal outstanding after `installments_paid` on-time installments.
pub fn outstanding_balance(terms: &LoanTerms, installments_paid: u32) -> LendingResult<Money> {
    terms.validate()?;
    if installments_paid > terms.term_months {
        return Err(LendingError::invalid(
            "installments_paid",
            format!(
                "Cannot exceed the loan term of {} months",
                terms.term_months
            ),
        ));
    }
    if installments_paid == terms.term_months {
        return Ok(Decimal::ZERO);
    }

    let rate = terms.monthly_rate();
    let emi = time_value::annuity_payment(rate, terms.term_months, terms.principal)?;
    time_value::remaining_balance(rate, installments_paid, terms.principal, emi)
}
