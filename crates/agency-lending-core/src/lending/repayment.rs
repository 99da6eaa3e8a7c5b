use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LendingError;
use crate::lending::amortization::AmortizationResult;
use crate::time_value::checked;
use crate::types::*;
use crate::LendingResult;

/// Balances below half a minor currency unit count as settled.
const SETTLEMENT_TOLERANCE: Decimal = dec!(0.005);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepaymentStatus {
    Pending,
    Partial,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: Money,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub paid_on: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Running record of what has been repaid against a loan's total amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentLedger {
    pub total_amount: Money,
    #[serde(default)]
    pub paid_amount: Money,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl RepaymentLedger {
    pub fn new(total_amount: Money) -> LendingResult<Self> {
        let ledger = RepaymentLedger {
            total_amount,
            paid_amount: Decimal::ZERO,
            payments: Vec::new(),
        };
        ledger.validate()?;
        Ok(ledger)
    }

    /// Ledger for the full repayable amount (principal plus interest).
    pub fn for_loan(loan: &AmortizationResult) -> LendingResult<Self> {
        Self::new(loan.total_payment)
    }

    /// A ledger read from outside must agree with its own payment list:
    /// every payment positive and `paid_amount` equal to their sum.
    pub fn validate(&self) -> LendingResult<()> {
        if self.total_amount <= Decimal::ZERO {
            return Err(LendingError::invalid(
                "total_amount",
                "Total repayable amount must be positive",
            ));
        }
        if self.paid_amount < Decimal::ZERO {
            return Err(LendingError::invalid(
                "paid_amount",
                "Paid amount cannot be negative",
            ));
        }
        let mut recorded = Decimal::ZERO;
        for (i, payment) in self.payments.iter().enumerate() {
            if payment.amount <= Decimal::ZERO {
                return Err(LendingError::invalid(
                    "payments",
                    format!("Payment {} has a non-positive amount", i + 1),
                ));
            }
            recorded = checked(recorded.checked_add(payment.amount), "ledger payment sum")?;
        }
        if recorded != self.paid_amount {
            return Err(LendingError::invalid(
                "paid_amount",
                format!(
                    "Paid amount {} does not match the {} recorded in payments",
                    self.paid_amount, recorded
                ),
            ));
        }
        Ok(())
    }

    pub fn remaining_amount(&self) -> Money {
        self.total_amount - self.paid_amount
    }

    pub fn status(&self) -> RepaymentStatus {
        if self.remaining_amount() < SETTLEMENT_TOLERANCE {
            RepaymentStatus::Completed
        } else if self.paid_amount > Decimal::ZERO {
            RepaymentStatus::Partial
        } else {
            RepaymentStatus::Pending
        }
    }

    pub fn record_payment(&mut self, payment: Payment) -> LendingResult<RepaymentStatus> {
        if payment.amount <= Decimal::ZERO {
            return Err(LendingError::invalid(
                "amount",
                "Payment amount must be positive",
            ));
        }
        if let Some(ref txn) = payment.transaction_id {
            if self
                .payments
                .iter()
                .any(|p| p.transaction_id.as_deref() == Some(txn.as_str()))
            {
                return Err(LendingError::invalid(
                    "transaction_id",
                    format!("Transaction {txn} is already recorded"),
                ));
            }
        }

        self.paid_amount = checked(
            self.paid_amount.checked_add(payment.amount),
            "ledger paid amount",
        )?;
        self.payments.push(payment);

        let status = self.status();
        tracing::debug!(
            paid = %self.paid_amount,
            remaining = %self.remaining_amount(),
            ?status,
            "payment recorded"
        );
        Ok(status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPaymentInput {
    pub ledger: RepaymentLedger,
    pub payment: Payment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentSummary {
    pub status: RepaymentStatus,
    pub paid_amount: Money,
    pub remaining_amount: Money,
    pub payment_count: usize,
    pub ledger: RepaymentLedger,
}

/// Apply one payment to a ledger and return the updated ledger.
pub fn record_payment(
    input: &RecordPaymentInput,
) -> LendingResult<ComputationOutput<RepaymentSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.ledger.validate()?;
    let mut ledger = input.ledger.clone();
    let status = ledger.record_payment(input.payment.clone())?;

    let remaining = ledger.remaining_amount();
    if remaining < Decimal::ZERO {
        warnings.push(format!("Loan overpaid by {}", -remaining));
    }

    let output = RepaymentSummary {
        status,
        paid_amount: ledger.paid_amount,
        remaining_amount: remaining,
        payment_count: ledger.payments.len(),
        ledger,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Repayment ledger",
        &serde_json::json!({
            "total_amount": input.ledger.total_amount.to_string(),
            "payment_amount": input.payment.amount.to_string(),
            "paid_on": input.payment.paid_on,
        }),
        warnings,
        elapsed,
        output,
    ))
}
