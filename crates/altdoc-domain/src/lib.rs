//! Altdoc Domain Layer
//!
//! This crate contains the core domain model for the altdoc classification
//! and extraction pipeline. It defines the fundamental value objects and
//! trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Document**: a unit of work moving through the pipeline state machine
//! - **DocumentType**: the closed enumeration of supported notice types
//! - **Confidence**: a [0.0, 1.0] score attached to every result
//! - **Scored**: the generic envelope (value, confidence, tier, evidence)
//!   shared by the classifier and the extractors
//! - **SourceTier**: which strategy produced a result (model, rule, none)
//!
//! ## Architecture
//!
//! - Value objects and pure state logic only
//! - Trait definitions for the model, storage, and observability boundaries
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod document;
pub mod doctype;
pub mod field;
pub mod layout;
pub mod record;
pub mod state;
pub mod tier;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use confidence::{Confidence, Scored};
pub use document::{Document, DocumentId};
pub use doctype::DocumentType;
pub use field::{FieldResult, FieldValue};
pub use layout::{BoundingBox, Layout, Line, Page};
pub use record::{StatusEvent, StoredRecord};
pub use state::PipelineState;
pub use tier::SourceTier;
pub use validation::{has_blocking, Severity, ValidationError};

/// A classification verdict: a document type scored with confidence,
/// tier attribution, and free-text evidence.
pub type ClassificationResult = Scored<DocumentType>;
