//! Boundary envelopes: stored records and status events

use crate::confidence::Confidence;
use crate::document::DocumentId;
use crate::doctype::DocumentType;
use crate::field::FieldResult;
use crate::state::PipelineState;
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Terminal envelope handed to the storage collaborator
///
/// Emitted exactly once per document, when it reaches `stored` or terminal
/// `failed`. Carries everything gathered so far, so even failures are
/// diagnosable: partial field results, the full validation error set, and
/// the error code when failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Document identity
    pub document_id: DocumentId,

    /// Final state (`stored` or `failed`)
    pub final_state: PipelineState,

    /// Classified type, None when classification never completed
    pub doc_type: Option<DocumentType>,

    /// Field results gathered before termination
    pub fields: BTreeMap<String, FieldResult>,

    /// Validation findings, warnings included
    pub validation_errors: Vec<ValidationError>,

    /// Stable error code, present only on failure
    pub error_code: Option<String>,

    /// Human-readable failure message, present only on failure
    pub error_message: Option<String>,
}

/// Status event emitted on every state transition
///
/// Exactly one event per transition; events for a single document are
/// strictly time-ordered. Consumed by the external observability
/// collaborator for progress reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEvent {
    /// Document identity
    pub document_id: DocumentId,

    /// State before the transition
    pub from: PipelineState,

    /// State after the transition
    pub to: PipelineState,

    /// When the transition happened
    pub timestamp: DateTime<Utc>,

    /// Classification confidence, attached once known
    pub confidence: Option<Confidence>,
}

impl StatusEvent {
    /// Create an event stamped with the current time
    pub fn now(
        document_id: DocumentId,
        from: PipelineState,
        to: PipelineState,
        confidence: Option<Confidence>,
    ) -> Self {
        Self {
            document_id,
            from,
            to,
            timestamp: Utc::now(),
            confidence,
        }
    }
}
