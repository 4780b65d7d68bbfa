//! Error types for the classifier

use thiserror::Error;

/// Errors that can escape classification
///
/// Data-level conditions never appear here: an unclassifiable document is
/// a successful classification with `DocumentType::Unclassified`. The only
/// failure mode is a transport-level model problem, which the orchestrator
/// treats as retryable.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Model call failed or timed out; retry with backoff
    #[error("Transient model failure: {0}")]
    TransientModel(String),
}
