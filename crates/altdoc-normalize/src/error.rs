//! Parse errors for normalization utilities

use thiserror::Error;

/// Errors produced by the value parsers
///
/// These never escape an extractor: a failed parse becomes a
/// zero-confidence field result so one bad field cannot abort extraction
/// of the rest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input was empty or whitespace-only
    #[error("Empty input")]
    Empty,

    /// No recognized date format matched
    #[error("Unparseable date: {0}")]
    Date(String),

    /// Date components were out of calendar range
    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),

    /// No numeric amount could be read
    #[error("Unparseable amount: {0}")]
    Amount(String),

    /// No whole number could be read
    #[error("Unparseable integer: {0}")]
    Integer(String),
}
