use napi::Result as NapiResult;
use napi_derive::napi;

use agency_lending_core::lending::{amortization, lap, repayment, schedule, surrender, tax_benefit};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: amortization::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::amortize(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: amortization::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct OutstandingInput {
    #[serde(flatten)]
    terms: amortization::LoanTerms,
    installments_paid: u32,
}

#[napi]
pub fn outstanding_balance(input_json: String) -> NapiResult<String> {
    let input: OutstandingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let balance = schedule::outstanding_balance(&input.terms, input.installments_paid)
        .map_err(to_napi_error)?;
    serde_json::to_string(&balance).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan against policy
// ---------------------------------------------------------------------------

#[napi]
pub fn lap_eligibility(input_json: String) -> NapiResult<String> {
    let input: lap::LapEligibilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lap::assess_eligibility(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn lap_quote(input_json: String) -> NapiResult<String> {
    let input: lap::LapQuoteInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lap::quote_lap(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Repayment
// ---------------------------------------------------------------------------

#[napi]
pub fn record_payment(input_json: String) -> NapiResult<String> {
    let input: repayment::RecordPaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = repayment::record_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Policy valuation
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_surrender_value(input_json: String) -> NapiResult<String> {
    let input: surrender::SurrenderInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = surrender::compute_surrender_value(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_tax_benefit(input_json: String) -> NapiResult<String> {
    let input: tax_benefit::TaxBenefitInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = tax_benefit::compute_tax_benefit(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
