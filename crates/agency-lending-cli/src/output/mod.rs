pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::Decimal;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Round every decimal string under `result` to `dp` places for display.
///
/// Amounts are serialised as strings; anything without a decimal point
/// (counts, dates, identifiers) is left alone.
pub fn round_result(value: &mut Value, dp: u32) {
    if let Some(result) = value.as_object_mut().and_then(|m| m.get_mut("result")) {
        round_in_place(result, dp);
    }
}

fn round_in_place(value: &mut Value, dp: u32) {
    match value {
        Value::String(s) if s.contains('.') => {
            if let Ok(d) = s.parse::<Decimal>() {
                *s = d.round_dp(dp).to_string();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(|v| round_in_place(v, dp)),
        Value::Object(map) => map.values_mut().for_each(|v| round_in_place(v, dp)),
        _ => {}
    }
}
