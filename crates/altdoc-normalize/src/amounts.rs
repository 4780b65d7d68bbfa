//! Currency amount and integer parsing

use crate::error::ParseError;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// A parsed currency amount with its parse confidence
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAmount {
    /// Numeric value, decimal-exact
    pub value: Decimal,

    /// ISO 4217 currency code, detected or inferred
    pub currency: String,

    /// Parse confidence: 1.0 for an explicit code, 0.9 for a symbol,
    /// 0.6 when the currency had to be inferred from context
    pub confidence: f64,

    /// Set when no code or symbol was present and USD was assumed
    pub currency_inferred: bool,
}

static CURRENCY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(USD|EUR|GBP|CHF|JPY|CAD|AUD)\b").unwrap());

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d{1,3}(?:,\d{3})*(?:\.\d+)?|-?\d+(?:\.\d+)?").unwrap());

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+").unwrap());

/// Currency symbols mapped to ISO codes
const SYMBOLS: [(char, &str); 4] = [('$', "USD"), ('€', "EUR"), ('£', "GBP"), ('¥', "JPY")];

/// Parse a currency amount span
///
/// Strips symbols and thousands separators, reads the first numeric token,
/// and detects the currency from an explicit ISO code, a symbol, or falls
/// back to USD with reduced confidence and the inferred flag set.
pub fn parse_amount(raw: &str) -> Result<ParsedAmount, ParseError> {
    let span = raw.trim();
    if span.is_empty() {
        return Err(ParseError::Empty);
    }

    let number = NUMBER
        .find(span)
        .ok_or_else(|| ParseError::Amount(span.to_string()))?;
    let cleaned = number.as_str().replace(',', "");
    let value =
        Decimal::from_str(&cleaned).map_err(|_| ParseError::Amount(span.to_string()))?;

    if let Some(code) = CURRENCY_CODE.find(span) {
        return Ok(ParsedAmount {
            value,
            currency: code.as_str().to_uppercase(),
            confidence: 1.0,
            currency_inferred: false,
        });
    }

    for (symbol, code) in SYMBOLS {
        if span.contains(symbol) {
            return Ok(ParsedAmount {
                value,
                currency: code.to_string(),
                confidence: 0.9,
                currency_inferred: false,
            });
        }
    }

    Ok(ParsedAmount {
        value,
        currency: "USD".to_string(),
        confidence: 0.6,
        currency_inferred: true,
    })
}

/// Parse a whole number span (call numbers, counts)
pub fn parse_integer(raw: &str) -> Result<i64, ParseError> {
    let span = raw.trim();
    if span.is_empty() {
        return Err(ParseError::Empty);
    }
    INTEGER
        .find(span)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .ok_or_else(|| ParseError::Integer(span.to_string()))
}
