use agency_lending_core::compute_amortization;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rust_decimal::Decimal;

// Map raw quickcheck integers onto realistic loan ranges.
fn principal(raw: u32) -> Decimal {
    Decimal::from(1_000 + raw % 50_000_000)
}

fn rate_percent(raw_bp: u16) -> Decimal {
    Decimal::new(i64::from(raw_bp % 3_600), 2)
}

fn term(raw: u16) -> u32 {
    1 + u32::from(raw % 480)
}

#[quickcheck]
fn totals_are_conserved(p: u32, bp: u16, n: u16) -> bool {
    let (p, rate, n) = (principal(p), rate_percent(bp), term(n));
    let r = compute_amortization(p, rate, n).unwrap();
    r.total_payment == r.monthly_installment * Decimal::from(n)
        && r.total_interest == r.total_payment - p
}

#[quickcheck]
fn installment_rises_with_rate(p: u32, bp: u16, n: u16) -> bool {
    let (p, rate, n) = (principal(p), rate_percent(bp), term(n));
    let lower = compute_amortization(p, rate, n).unwrap();
    let higher = compute_amortization(p, rate + Decimal::new(25, 2), n).unwrap();
    higher.monthly_installment > lower.monthly_installment
}

#[quickcheck]
fn longer_term_lowers_installment_but_costs_more(p: u32, bp: u16, n: u16) -> TestResult {
    let (p, rate, n) = (principal(p), rate_percent(bp), term(n));
    if rate.is_zero() {
        return TestResult::discard();
    }
    let shorter = compute_amortization(p, rate, n).unwrap();
    let longer = compute_amortization(p, rate, n + 1).unwrap();
    TestResult::from_bool(
        longer.monthly_installment < shorter.monthly_installment
            && longer.total_interest > shorter.total_interest,
    )
}

#[quickcheck]
fn zero_rate_charges_no_interest(p: u32, n: u16) -> bool {
    let (p, n) = (principal(p), term(n));
    let r = compute_amortization(p, Decimal::ZERO, n).unwrap();
    r.monthly_installment == p / Decimal::from(n) && r.total_interest.round_dp(12).is_zero()
}

#[quickcheck]
fn installment_covers_first_month_interest(p: u32, bp: u16, n: u16) -> bool {
    let (p, rate, n) = (principal(p), rate_percent(bp), term(n));
    let r = compute_amortization(p, rate, n).unwrap();
    r.monthly_installment > p * rate / Decimal::from(1200)
}
