use serde::de::DeserializeOwned;
use std::io::{self, Read};

use super::{parse_document, Syntax};

/// Read a request body piped on stdin, as JSON or YAML.
///
/// `None` when stdin is a terminal or the pipe is empty, so the caller
/// can fall back to flags.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut body = String::new();
    io::stdin().read_to_string(&mut body)?;
    parse_piped(&body)
}

fn parse_piped<T: DeserializeOwned>(body: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let syntax = Syntax::sniff(body);
    tracing::debug!(bytes = body.len(), ?syntax, "read piped request");
    parse_document(body, syntax, "piped input").map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_lending_core::lending::amortization::LoanTerms;
    use rust_decimal::Decimal;

    #[test]
    fn test_piped_json_terms() {
        let terms: LoanTerms = parse_piped(
            r#" {"principal": "250000", "annual_rate_percent": "9", "term_months": 60}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(terms.principal, Decimal::new(250000, 0));
        assert_eq!(terms.term_months, 60);
    }

    #[test]
    fn test_piped_yaml_terms() {
        let terms: LoanTerms =
            parse_piped("principal: \"250000\"\nannual_rate_percent: \"9\"\nterm_months: 60\n")
                .unwrap()
                .unwrap();
        assert_eq!(terms.annual_rate_percent, Decimal::new(9, 0));
    }

    #[test]
    fn test_blank_pipe_falls_back_to_flags() {
        assert!(parse_piped::<LoanTerms>("  \n").unwrap().is_none());
    }

    #[test]
    fn test_malformed_pipe_names_its_origin() {
        let err = parse_piped::<LoanTerms>("{\"principal\": ").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse piped input"));
    }
}
