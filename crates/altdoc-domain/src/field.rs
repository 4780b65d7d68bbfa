//! Field values and per-field extraction results

use crate::confidence::Confidence;
use crate::tier::SourceTier;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A typed field value
///
/// The sequence-shaped variants (`Pairs`, `List`) bind the valuation-report
/// inputs, quarterly KPIs, and narrative highlights; order is preserved as
/// found in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text (identifiers, methodology names)
    Text(String),

    /// Calendar date
    Date(NaiveDate),

    /// Decimal monetary amount with currency code
    Amount {
        /// Numeric value
        value: Decimal,
        /// ISO 4217 currency code
        currency: String,
    },

    /// Whole number (call numbers)
    Integer(i64),

    /// Closed-vocabulary value (distribution type ROC/CI)
    Enum(String),

    /// Ordered key-value pairs (valuation inputs, quarterly KPIs)
    Pairs(Vec<(String, String)>),

    /// Ordered text segments (narrative highlights)
    List(Vec<String>),
}

/// Result of extracting one field
///
/// Every required field of a document type always yields exactly one of
/// these. A field that could not be found carries `value: None` and
/// confidence 0.0, never an omitted map entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    /// Field name from the per-type required list
    pub name: String,

    /// Typed value, absent when the field was not found
    pub value: Option<FieldValue>,

    /// Extraction confidence (anchor proximity x parse confidence)
    pub confidence: Confidence,

    /// Which strategy produced the value
    pub tier: SourceTier,

    /// Raw span the value was parsed from
    pub raw_span: String,

    /// Set when the parse was locale-ambiguous (numeric dates); validation
    /// turns this into a warning
    pub ambiguous: bool,
}

impl FieldResult {
    /// A found field with a typed value
    pub fn found(
        name: impl Into<String>,
        value: FieldValue,
        confidence: Confidence,
        raw_span: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            confidence,
            tier: SourceTier::Rule,
            raw_span: raw_span.into(),
            ambiguous: false,
        }
    }

    /// A required field that could not be located or parsed
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            confidence: Confidence::ZERO,
            tier: SourceTier::None,
            raw_span: String::new(),
            ambiguous: false,
        }
    }

    /// A field whose span was located but failed normalization
    ///
    /// Keeps the raw span for diagnostics; confidence stays 0.0 so the
    /// presence rule still fires.
    pub fn unparsed(name: impl Into<String>, raw_span: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            confidence: Confidence::ZERO,
            tier: SourceTier::Rule,
            raw_span: raw_span.into(),
            ambiguous: false,
        }
    }

    /// Mark the parse as locale-ambiguous
    pub fn with_ambiguity(mut self, ambiguous: bool) -> Self {
        self.ambiguous = ambiguous;
        self
    }

    /// Whether the field was found at all
    pub fn is_found(&self) -> bool {
        self.value.is_some() && !self.confidence.is_zero()
    }
}
