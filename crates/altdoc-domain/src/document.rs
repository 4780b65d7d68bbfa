//! Document - the unit of work moving through the pipeline

use crate::confidence::Confidence;
use crate::doctype::DocumentType;
use crate::field::FieldResult;
use crate::layout::Layout;
use crate::state::PipelineState;
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for a document, based on UUIDv7
///
/// UUIDv7 gives chronologically sortable identifiers with no coordination,
/// so ids double as ingestion-order keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(uuid::Uuid);

impl DocumentId {
    /// Generate a fresh UUIDv7-based id
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse an id from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid document id: {}", e))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document in flight through the pipeline
///
/// Owned exclusively by the orchestrator during processing and passed by
/// value between steps; every transition returns an updated record rather
/// than mutating shared memory. Field results live in a `BTreeMap` so
/// iteration order is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Identity
    pub id: DocumentId,

    /// Raw text from the upstream extraction collaborator
    pub text: String,

    /// Page/line/bounding-box metadata
    pub layout: Layout,

    /// Current pipeline state
    pub state: PipelineState,

    /// Document type, None until classified
    pub doc_type: Option<DocumentType>,

    /// Classification confidence, None until classified
    pub classification_confidence: Option<Confidence>,

    /// Field results keyed by field name
    pub fields: BTreeMap<String, FieldResult>,

    /// Validation findings gathered so far
    pub validation_errors: Vec<ValidationError>,

    /// Transient-failure retries consumed so far
    pub retry_count: u32,

    /// When the document was created
    pub created_at: DateTime<Utc>,

    /// When the document last changed state
    pub last_transition_at: DateTime<Utc>,
}

impl Document {
    /// Create a freshly ingested document
    pub fn new(id: DocumentId, text: impl Into<String>, layout: Layout) -> Self {
        let now = Utc::now();
        Self {
            id,
            text: text.into(),
            layout,
            state: PipelineState::Ingested,
            doc_type: None,
            classification_confidence: None,
            fields: BTreeMap::new(),
            validation_errors: Vec::new(),
            retry_count: 0,
            created_at: now,
            last_transition_at: now,
        }
    }

    /// Create a document from plain text, synthesizing a single-page layout
    pub fn from_text(id: DocumentId, text: impl Into<String>) -> Self {
        let text = text.into();
        let layout = Layout::from_text(&text);
        Self::new(id, text, layout)
    }

    /// Move to a new state, returning the updated record
    ///
    /// Fails when the transition is not in the legal graph; the document
    /// is handed back alongside the message so the caller can still
    /// terminate it properly. The orchestrator treats this as a
    /// programming defect, not a data condition.
    pub fn transition(mut self, next: PipelineState) -> Result<Self, (Self, String)> {
        if !self.state.can_transition_to(next) {
            let msg = format!("Illegal state transition: {} -> {}", self.state, next);
            return Err((self, msg));
        }
        self.state = next;
        self.last_transition_at = Utc::now();
        Ok(self)
    }

    /// Whether processing has ended
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_display_and_parse() {
        let id = DocumentId::new();
        let parsed = DocumentId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_document_id_chronological() {
        let a = DocumentId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = DocumentId::new();
        assert!(a < b, "Earlier UUIDv7 should sort before later UUIDv7");
    }

    #[test]
    fn test_invalid_id_string() {
        assert!(DocumentId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_new_document_is_ingested() {
        let doc = Document::from_text(DocumentId::new(), "Capital Call Notice");
        assert_eq!(doc.state, PipelineState::Ingested);
        assert!(doc.doc_type.is_none());
        assert_eq!(doc.retry_count, 0);
    }

    #[test]
    fn test_transition_updates_timestamp() {
        let doc = Document::from_text(DocumentId::new(), "x");
        let before = doc.last_transition_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        let doc = doc.transition(PipelineState::Classifying).unwrap();
        assert_eq!(doc.state, PipelineState::Classifying);
        assert!(doc.last_transition_at > before);
    }

    #[test]
    fn test_illegal_transition_rejected() {
        let doc = Document::from_text(DocumentId::new(), "x");
        assert!(doc.transition(PipelineState::Stored).is_err());
    }
}
