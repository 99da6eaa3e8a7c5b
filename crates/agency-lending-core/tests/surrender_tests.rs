#![cfg(feature = "surrender")]
use agency_lending_core::lending::surrender::{
    compute_surrender_value, tier_percent, PolicyType, SurrenderInput, SurrenderRules,
    SurrenderTier,
};
use agency_lending_core::LendingError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn policy(policy_type: PolicyType, years_completed: u32) -> SurrenderInput {
    SurrenderInput {
        policy_type,
        policy_term_years: 25,
        years_completed,
        sum_assured: dec!(1000000),
        annual_premium: dec!(40000),
        rules: SurrenderRules::default(),
    }
}

// ===========================================================================
// Tier boundaries
// ===========================================================================

#[test]
fn test_tier_boundaries() {
    let expected = [
        (0, dec!(0)),
        (1, dec!(30)),
        (2, dec!(30)),
        (3, dec!(50)),
        (4, dec!(50)),
        (5, dec!(75)),
        (9, dec!(75)),
        (10, dec!(90)),
        (25, dec!(90)),
    ];
    for (years, percent) in expected {
        let out = compute_surrender_value(&policy(PolicyType::Endowment, years)).unwrap();
        assert_eq!(out.result.surrender_percent, percent, "years = {years}");
    }
}

#[test]
fn test_two_year_term_plan() {
    let out = compute_surrender_value(&policy(PolicyType::Term, 2)).unwrap();
    let s = &out.result;
    // 80,000 paid, 30% back
    assert_eq!(s.total_premium_paid, dec!(80000));
    assert_eq!(s.total_surrender_value, dec!(24000));
    assert_eq!(s.premium_loss, dec!(56000));
    assert_eq!(s.loss_percent, Some(dec!(70)));
}

// ===========================================================================
// With-profit bonus
// ===========================================================================

#[test]
fn test_bonus_only_on_with_profit() {
    let endowment = compute_surrender_value(&policy(PolicyType::Endowment, 12)).unwrap();
    let with_profit = compute_surrender_value(&policy(PolicyType::WithProfit, 12)).unwrap();

    assert_eq!(endowment.result.bonus_value, Decimal::ZERO);
    // 4% of 10 lakh for 12 years
    assert_eq!(with_profit.result.bonus_value, dec!(480000));
    assert_eq!(
        with_profit.result.total_surrender_value - endowment.result.total_surrender_value,
        dec!(480000)
    );
}

#[test]
fn test_custom_rules_from_json() {
    let input: SurrenderInput = serde_json::from_str(
        r#"{
            "policy_type": "with-profit",
            "policy_term_years": 15,
            "years_completed": 4,
            "sum_assured": "200000",
            "annual_premium": "10000",
            "rules": {"with_profit_bonus_rate": "0.025"}
        }"#,
    )
    .unwrap();
    assert_eq!(input.rules.tiers.len(), 4);

    let out = compute_surrender_value(&input).unwrap();
    // 40,000 x 50% + 200,000 x 2.5% x 4
    assert_eq!(out.result.surrender_value, dec!(20000));
    assert_eq!(out.result.bonus_value, dec!(20000));
    assert_eq!(out.result.premium_loss, Decimal::ZERO);
    assert_eq!(out.result.loss_percent, Some(Decimal::ZERO));
}

#[test]
fn test_unsorted_tiers() {
    let tiers = vec![
        SurrenderTier {
            min_years: 7,
            surrender_percent: dec!(60),
        },
        SurrenderTier {
            min_years: 2,
            surrender_percent: dec!(20),
        },
    ];
    assert_eq!(tier_percent(&tiers, 1), Decimal::ZERO);
    assert_eq!(tier_percent(&tiers, 6), dec!(20));
    assert_eq!(tier_percent(&tiers, 8), dec!(60));
}

// ===========================================================================
// Rejection
// ===========================================================================

fn assert_invalid(input: &SurrenderInput, expected_field: &str) {
    match compute_surrender_value(input) {
        Err(LendingError::InvalidArgument { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("expected InvalidArgument on {expected_field}, got {other:?}"),
    }
}

#[test]
fn test_invalid_inputs() {
    let mut input = policy(PolicyType::Endowment, 26);
    assert_invalid(&input, "years_completed");

    input = policy(PolicyType::Endowment, 5);
    input.annual_premium = dec!(-1);
    assert_invalid(&input, "annual_premium");

    input = policy(PolicyType::Endowment, 5);
    input.policy_term_years = 0;
    input.years_completed = 0;
    assert_invalid(&input, "policy_term_years");

    input = policy(PolicyType::Endowment, 5);
    input.rules.tiers[0].surrender_percent = dec!(120);
    assert_invalid(&input, "tiers");
}

#[test]
fn test_premium_beyond_decimal_range() {
    let mut input = policy(PolicyType::Endowment, 20);
    input.annual_premium = dec!(10000000000000000000000000000);
    assert!(matches!(
        compute_surrender_value(&input),
        Err(LendingError::ArithmeticOverflow { .. })
    ));
}
