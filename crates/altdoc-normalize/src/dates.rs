//! Date parsing across locale formats

use crate::error::ParseError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// A parsed date with its parse confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedDate {
    /// The parsed calendar date
    pub date: NaiveDate,

    /// Parse confidence: 1.0 for ISO-like forms, 0.9 for named-month and
    /// numerically disambiguated forms, 0.7 for locale-ambiguous forms
    pub confidence: f64,

    /// Set when the numeric form was locale-ambiguous and month-first
    /// precedence was applied; validation surfaces this as a warning
    pub ambiguous: bool,
}

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[-/](\d{1,2})[-/](\d{1,2})$").unwrap());

static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[-/](\d{1,2})[-/](\d{2,4})$").unwrap());

/// Named-month formats, tried in order
const NAMED_FORMATS: [&str; 6] = [
    "%B %d, %Y", // March 15, 2023
    "%B %d %Y",  // March 15 2023
    "%d %B %Y",  // 15 March 2023
    "%b %d, %Y", // Mar 15, 2023
    "%b %d %Y",  // Mar 15 2023
    "%d %b %Y",  // 15 Mar 2023
];

/// Parse a date span in one of the accepted locale formats
///
/// Precedence for ambiguous numeric forms (both components <= 12, e.g.
/// `03/04/2023`) is month-first; day-first is NOT assumed. The result is
/// flagged ambiguous so validation can attach a warning. Numeric forms
/// where one component exceeds 12 are disambiguated by that component.
/// Two-digit years are widened into the 2000s.
pub fn parse_date(raw: &str) -> Result<ParsedDate, ParseError> {
    let span = raw.trim();
    if span.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Some(caps) = ISO_DATE.captures(span) {
        let year: i32 = caps[1].parse().unwrap();
        let month: u32 = caps[2].parse().unwrap();
        let day: u32 = caps[3].parse().unwrap();
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ParseError::InvalidDate(span.to_string()))?;
        return Ok(ParsedDate {
            date,
            confidence: 1.0,
            ambiguous: false,
        });
    }

    for format in NAMED_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(span, format) {
            return Ok(ParsedDate {
                date,
                confidence: 0.9,
                ambiguous: false,
            });
        }
    }

    if let Some(caps) = NUMERIC_DATE.captures(span) {
        let first: u32 = caps[1].parse().unwrap();
        let second: u32 = caps[2].parse().unwrap();
        let mut year: i32 = caps[3].parse().unwrap();
        if caps[3].len() == 2 {
            year += 2000;
        }

        let (month, day, confidence, ambiguous) = if first > 12 {
            // First component cannot be a month: day-first
            (second, first, 0.9, false)
        } else if second > 12 {
            // Second component cannot be a month: month-first
            (first, second, 0.9, false)
        } else {
            // Locale-ambiguous: default to month-first and flag it.
            // 03/03/2023 reads the same either way, so no flag.
            (first, second, 0.7, first != second)
        };

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ParseError::InvalidDate(span.to_string()))?;
        return Ok(ParsedDate {
            date,
            confidence,
            ambiguous,
        });
    }

    Err(ParseError::Date(span.to_string()))
}
