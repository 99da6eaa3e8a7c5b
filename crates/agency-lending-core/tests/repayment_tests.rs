#![cfg(feature = "repayment")]
use agency_lending_core::{compute_amortization, LendingError};
use agency_lending_core::lending::repayment::{
    record_payment, Payment, RecordPaymentInput, RepaymentLedger, RepaymentStatus,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn installment(amount: Decimal, month: u32) -> Payment {
    Payment {
        amount,
        payment_method: "bank_transfer".into(),
        transaction_id: Some(format!("NEFT-{month:03}")),
        paid_on: NaiveDate::from_ymd_opt(2026, month, 10).unwrap(),
        notes: None,
    }
}

#[test]
fn test_ledger_for_loan_settles_after_all_installments() {
    let loan = compute_amortization(dec!(120000), dec!(12), 12).unwrap();
    let mut ledger = RepaymentLedger::for_loan(&loan).unwrap();
    assert_eq!(ledger.total_amount, loan.total_payment);

    for month in 1..=11 {
        let status = ledger
            .record_payment(installment(loan.monthly_installment, month))
            .unwrap();
        assert_eq!(status, RepaymentStatus::Partial);
    }
    let status = ledger
        .record_payment(installment(loan.monthly_installment, 12))
        .unwrap();
    assert_eq!(status, RepaymentStatus::Completed);
    assert!(ledger.remaining_amount().abs() < dec!(0.000001));
}

#[test]
fn test_record_payment_returns_updated_ledger() {
    let input = RecordPaymentInput {
        ledger: RepaymentLedger::new(dec!(10000)).unwrap(),
        payment: installment(dec!(2500), 1),
    };
    let out = record_payment(&input).unwrap();
    assert_eq!(out.result.status, RepaymentStatus::Partial);
    assert_eq!(out.result.paid_amount, dec!(2500));
    assert_eq!(out.result.remaining_amount, dec!(7500));
    assert_eq!(out.result.payment_count, 1);
    assert_eq!(out.result.ledger.payments[0], input.payment);
    // The caller's ledger is untouched
    assert_eq!(input.ledger.paid_amount, Decimal::ZERO);
}

#[test]
fn test_ledger_from_json_defaults() {
    let ledger: RepaymentLedger = serde_json::from_str(r#"{"total_amount": "5000"}"#).unwrap();
    assert_eq!(ledger.paid_amount, Decimal::ZERO);
    assert!(ledger.payments.is_empty());
    assert_eq!(ledger.status(), RepaymentStatus::Pending);
}

#[test]
fn test_invalid_ledger_rejected() {
    let input = RecordPaymentInput {
        ledger: RepaymentLedger {
            total_amount: dec!(1000),
            paid_amount: dec!(-1),
            payments: Vec::new(),
        },
        payment: installment(dec!(100), 1),
    };
    assert!(record_payment(&input).is_err());
}

// ===========================================================================
// Ledger consistency
// ===========================================================================

fn assert_rejected_on(ledger: RepaymentLedger, expected_field: &str) {
    let input = RecordPaymentInput {
        ledger,
        payment: installment(dec!(100), 2),
    };
    match record_payment(&input) {
        Err(LendingError::InvalidArgument { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("expected InvalidArgument on {expected_field}, got {other:?}"),
    }
}

#[test]
fn test_paid_amount_without_payments_rejected() {
    let ledger: RepaymentLedger =
        serde_json::from_str(r#"{"total_amount":"1000","paid_amount":"999","payments":[]}"#)
            .unwrap();
    assert_rejected_on(ledger, "paid_amount");
}

#[test]
fn test_negative_recorded_payment_rejected() {
    let mut refund = installment(dec!(-200), 1);
    refund.transaction_id = Some("REV-001".into());
    let ledger = RepaymentLedger {
        total_amount: dec!(1000),
        paid_amount: dec!(-200),
        payments: vec![refund],
    };
    assert_rejected_on(ledger, "paid_amount");

    let ledger = RepaymentLedger {
        total_amount: dec!(1000),
        paid_amount: dec!(300),
        payments: vec![installment(dec!(500), 1), installment(dec!(-200), 3)],
    };
    assert_rejected_on(ledger, "payments");
}

#[test]
fn test_consistent_ledger_from_json_accepted() {
    let ledger: RepaymentLedger = serde_json::from_str(
        r#"{
            "total_amount": "1000",
            "paid_amount": "400",
            "payments": [
                {"amount": "150", "payment_method": "upi", "paid_on": "2026-01-10"},
                {"amount": "250", "payment_method": "cash", "paid_on": "2026-02-10"}
            ]
        }"#,
    )
    .unwrap();
    let input = RecordPaymentInput {
        ledger,
        payment: installment(dec!(600), 3),
    };
    let out = record_payment(&input).unwrap();
    assert_eq!(out.result.status, RepaymentStatus::Completed);
    assert_eq!(out.result.payment_count, 3);
}
