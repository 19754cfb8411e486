use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace and drops the currency symbol, percent sign and
/// thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '%'))
        .collect()
}

/// Parses a string into a [`Decimal`].
///
/// Accepts `"$1,234.56"`, `"1234.56"` and `"7.5%"`. Empty or whitespace-only
/// input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}
