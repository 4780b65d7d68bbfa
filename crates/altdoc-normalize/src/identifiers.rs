//! Fund and LP identifier normalization

use crate::error::ParseError;
use regex::Regex;
use std::sync::LazyLock;

/// A normalized identifier with its parse confidence
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIdentifier {
    /// Uppercased, whitespace-collapsed identifier
    pub value: String,

    /// 1.0 when the identifier matches the known format, else 0.5
    pub confidence: f64,
}

/// Known identifier shape: short alpha prefix, optional separator, then
/// an alphanumeric suffix (covers ABC-III, FUND-001, LP 042)
static KNOWN_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,6}(?:[- ][A-Z0-9]{1,12}|[0-9]{1,12})$").unwrap());

/// Normalize an identifier span
///
/// Uppercases and collapses internal whitespace runs to a single space.
/// Identifiers matching the known format pattern score 1.0; anything else
/// non-empty scores 0.5 rather than failing, since upstream systems carry
/// free-form ids.
pub fn parse_identifier(raw: &str) -> Result<ParsedIdentifier, ParseError> {
    let collapsed = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    if collapsed.is_empty() {
        return Err(ParseError::Empty);
    }

    let confidence = if KNOWN_FORMAT.is_match(&collapsed) {
        1.0
    } else {
        0.5
    };

    Ok(ParsedIdentifier {
        value: collapsed,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_format() {
        let p = parse_identifier("ABC-III").unwrap();
        assert_eq!(p.value, "ABC-III");
        assert_eq!(p.confidence, 1.0);
    }

    #[test]
    fn test_uppercase_and_collapse() {
        let p = parse_identifier("  fund   001 ").unwrap();
        assert_eq!(p.value, "FUND 001");
        assert_eq!(p.confidence, 1.0);
    }

    #[test]
    fn test_unknown_format_low_confidence() {
        let p = parse_identifier("fund_xyz_3").unwrap();
        assert_eq!(p.value, "FUND_XYZ_3");
        assert_eq!(p.confidence, 0.5);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(parse_identifier("   "), Err(ParseError::Empty));
    }
}
