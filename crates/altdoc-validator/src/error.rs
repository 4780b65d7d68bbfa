//! Validator errors

use altdoc_domain::DocumentType;
use thiserror::Error;

/// Errors raised when building a validator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidatorError {
    /// A document type has no rule set
    #[error("No rule set registered for document type: {0}")]
    MissingRuleSet(DocumentType),

    /// The configuration failed validation
    #[error("Invalid validator configuration: {0}")]
    InvalidConfig(String),
}
