//! Pipeline error taxonomy

use altdoc_domain::DocumentType;
use thiserror::Error;

/// Errors that terminate or interrupt a document's run
///
/// Every variant carries a stable `code()` string persisted on the failed
/// record, so stored failures stay diagnosable without parsing messages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// A model call failed or timed out; eligible for retry
    #[error("Transient model failure: {0}")]
    TransientModel(String),

    /// Transient failures persisted past the retry cap
    #[error("Retries exhausted after {attempts} attempts: {last_error}")]
    ExhaustedRetries {
        /// Attempts consumed, initial try included
        attempts: u32,
        /// The transient failure observed on the last attempt
        last_error: String,
    },

    /// No extractor registered for the classified type
    #[error("No extractor registered for document type: {0}")]
    UnsupportedType(DocumentType),

    /// Validation produced at least one blocking finding
    #[error("Validation blocked storage with {0} blocking finding(s)")]
    ValidationBlocking(usize),

    /// The document type could not be determined
    #[error("Document type could not be determined")]
    Unclassified,

    /// Processing was cancelled before completion
    #[error("Processing cancelled")]
    Cancelled,

    /// The storage collaborator rejected the terminal record
    #[error("Storage sink failure: {0}")]
    Storage(String),

    /// A state transition outside the legal graph was attempted
    #[error("Illegal state transition: {0}")]
    IllegalTransition(String),
}

impl PipelineError {
    /// Stable code string persisted on failed records
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::TransientModel(_) => "transient_model",
            PipelineError::ExhaustedRetries { .. } => "exhausted_retries",
            PipelineError::UnsupportedType(_) => "unsupported_type",
            PipelineError::ValidationBlocking(_) => "validation_blocking",
            PipelineError::Unclassified => "unclassified",
            PipelineError::Cancelled => "cancelled",
            PipelineError::Storage(_) => "storage",
            PipelineError::IllegalTransition(_) => "illegal_transition",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(PipelineError::Unclassified.code(), "unclassified");
        assert_eq!(
            PipelineError::ExhaustedRetries {
                attempts: 4,
                last_error: "timeout".to_string()
            }
            .code(),
            "exhausted_retries"
        );
        assert_eq!(PipelineError::ValidationBlocking(2).code(), "validation_blocking");
    }
}
