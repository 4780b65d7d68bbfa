//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline core and its
//! collaborators. Infrastructure implementations live in other crates.

use crate::doctype::DocumentType;
use crate::record::{StatusEvent, StoredRecord};

/// A label produced by the classification model tier
#[derive(Debug, Clone, PartialEq)]
pub struct ModelLabel {
    /// Predicted document type
    pub doc_type: DocumentType,

    /// Model confidence, clamped into [0.0, 1.0] by the classifier
    pub confidence: f64,

    /// Raw model label or rationale, kept as evidence
    pub rationale: String,
}

/// Trait for the classification model backend
///
/// Implementations wrap whatever inference stack is available (a local
/// model, a remote service, or a deterministic mock for tests). The call
/// is synchronous; the classifier runs it on a blocking thread under a
/// per-call timeout. Returning `Ok(None)` means the model has no opinion
/// and the classifier degrades to the rule tier; returning `Err` is a
/// transport-level failure and maps to a retryable transient error.
pub trait ModelProvider: Send + Sync {
    /// Error type for model invocations
    type Error;

    /// Label a document's text
    fn label(&self, text: &str) -> Result<Option<ModelLabel>, Self::Error>;
}

/// Trait for the storage collaborator
///
/// Receives the terminal envelope once per document. Querying and
/// filtering stored records is owned entirely by the collaborator.
pub trait DocumentSink: Send + Sync {
    /// Error type for persistence operations
    type Error;

    /// Persist a terminal record
    fn persist(&self, record: &StoredRecord) -> Result<(), Self::Error>;
}

/// Trait for the observability collaborator
///
/// Emission must be total: every state transition produces exactly one
/// event, and implementations must not fail the pipeline.
pub trait EventSink: Send + Sync {
    /// Consume a status event
    fn emit(&self, event: StatusEvent);
}
