pub mod amortization;
pub mod schedule;

#[cfg(feature = "lap")]
pub mod lap;

#[cfg(feature = "repayment")]
pub mod repayment;

#[cfg(feature = "surrender")]
pub mod surrender;

#[cfg(feature = "tax-benefit")]
pub mod tax_benefit;
