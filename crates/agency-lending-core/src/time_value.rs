use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LendingError;
use crate::types::{Money, Percent, Rate};
use crate::LendingResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert a quoted annual percentage into a monthly fractional rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Turn a `checked_*` result into an [`LendingError::ArithmeticOverflow`].
pub(crate) fn checked(value: Option<Decimal>, context: &str) -> LendingResult<Decimal> {
    value.ok_or_else(|| LendingError::ArithmeticOverflow {
        context: context.into(),
    })
}

/// (1 + rate)^nper
pub fn compound_factor(rate: Rate, nper: u32) -> LendingResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powi(i64::from(nper))
        .ok_or_else(|| LendingError::ArithmeticOverflow {
            context: format!("compound factor (1 + {rate})^{nper}"),
        })
}

/// Level payment that fully repays `principal` over `nper` periods.
///
/// A zero rate repays the principal in equal slices; the annuity formula
/// would otherwise divide by `(1 + r)^n - 1 = 0`.
pub fn annuity_payment(rate: Rate, nper: u32, principal: Money) -> LendingResult<Money> {
    if nper == 0 {
        return Err(LendingError::invalid("nper", "Number of periods must be > 0"));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(LendingError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    checked(
        principal
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(factor))
            .and_then(|v| v.checked_div(denominator)),
        "annuity payment",
    )
}

/// Principal still owed after `periods_elapsed` level payments.
pub fn remaining_balance(
    rate: Rate,
    periods_elapsed: u32,
    principal: Money,
    payment: Money,
) -> LendingResult<Money> {
    if rate.is_zero() {
        return checked(
            payment
                .checked_mul(Decimal::from(periods_elapsed))
                .and_then(|paid| principal.checked_sub(paid)),
            "remaining balance",
        );
    }

    let factor = compound_factor(rate, periods_elapsed)?;
    let grown = checked(principal.checked_mul(factor), "remaining balance: grown principal")?;
    let repaid = checked(
        payment
            .checked_mul(factor - Decimal::ONE)
            .and_then(|v| v.checked_div(rate)),
        "remaining balance: repaid value",
    )?;
    checked(grown.checked_sub(repaid), "remaining balance")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(10.5)), dec!(0.00875));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_compound_factor_one_year() {
        let f = compound_factor(dec!(0.01), 12).unwrap();
        // 1.01^12 = 1.126825030131969720661201
        assert!((f - dec!(1.1268250301)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_annuity_payment_basic() {
        // 100,000 at 1% per month over 12 months => ~8884.88
        let p = annuity_payment(dec!(0.01), 12, dec!(100000)).unwrap();
        assert!((p - dec!(8884.88)).abs() < dec!(0.01));
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        let p = annuity_payment(Decimal::ZERO, 4, dec!(1000)).unwrap();
        assert_eq!(p, dec!(250));
    }

    #[test]
    fn test_annuity_payment_zero_periods() {
        assert!(annuity_payment(dec!(0.01), 0, dec!(1000)).is_err());
    }

    #[test]
    fn test_remaining_balance_at_maturity_is_zero() {
        let pmt = annuity_payment(dec!(0.01), 12, dec!(100000)).unwrap();
        let bal = remaining_balance(dec!(0.01), 12, dec!(100000), pmt).unwrap();
        assert!(bal.abs() < dec!(0.000001));
    }

    #[test]
    fn test_remaining_balance_overflow() {
        let pmt = annuity_payment(dec!(0.01), 360, dec!(10000000000000000000000000000)).unwrap();
        assert!(matches!(
            remaining_balance(dec!(0.01), 359, dec!(10000000000000000000000000000), pmt),
            Err(LendingError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_compound_factor_overflow() {
        assert!(matches!(
            compound_factor(dec!(1000), u32::MAX),
            Err(LendingError::ArithmeticOverflow { .. })
        ));
    }
}
