//! Altdoc Normalization Utilities
//!
//! Shared value parsers used by every field extractor. Each parser is a
//! pure function from a raw extracted span to a typed value plus a parse
//! confidence, or a `ParseError`. Callers (the extractors) absorb parse
//! errors into zero-confidence field results; nothing here is fatal.
//!
//! # Parsers
//!
//! - [`parse_date`]: multi-locale date parsing with a documented
//!   month-first precedence for ambiguous numeric forms
//! - [`parse_amount`]: currency amounts with symbol/code detection
//! - [`parse_identifier`]: fund/LP identifiers, uppercased and
//!   whitespace-collapsed
//! - [`parse_integer`]: plain whole numbers (call numbers)
//!
//! # Examples
//!
//! ```
//! use altdoc_normalize::parse_date;
//!
//! let parsed = parse_date("2023-03-15").unwrap();
//! assert_eq!(parsed.confidence, 1.0);
//! assert!(!parsed.ambiguous);
//! ```

#![warn(missing_docs)]

mod amounts;
mod dates;
mod error;
mod identifiers;

pub use amounts::{parse_amount, parse_integer, ParsedAmount};
pub use dates::{parse_date, ParsedDate};
pub use error::ParseError;
pub use identifiers::{parse_identifier, ParsedIdentifier};
