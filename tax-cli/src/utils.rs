use rust_decimal::Decimal;
use tax_core::calculations::common::round_whole;
use thiserror::Error;

/// Error returned when user input cannot be used as a money amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("no amount entered")]
    Empty,

    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("amount must be non-negative, got {0}")]
    Negative(Decimal),
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a non-negative money amount.
///
/// Handles comma separators in either grouping (`"7,50,000"`, `"750,000"`)
/// and scientific notation (`"7.5e5"`). Unlike a form field, empty input is
/// an error rather than zero.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let amount = normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|e| {
            tracing::warn!(input = %s, "invalid amount: {}", e);
            ParseAmountError::Invalid {
                input: s.to_string(),
                source: e,
            }
        })?;

    if amount < Decimal::ZERO {
        return Err(ParseAmountError::Negative(amount));
    }
    Ok(amount)
}

/// Formats money in whole units behind the currency prefix, e.g. `RS.52500`.
pub fn format_amount(
    currency: &str,
    amount: Decimal,
) -> String {
    format!("{currency}{}", round_whole(amount))
}

/// Formats a fractional rate as a percentage without trailing zeros.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
