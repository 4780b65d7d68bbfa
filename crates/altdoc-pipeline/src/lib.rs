//! Altdoc Pipeline Orchestrator
//!
//! Drives documents through the full state machine (classify, extract,
//! validate, store) with retry policy for transient model failures, a
//! worker pool for concurrency, and exactly one status event per state
//! transition.
//!
//! # State machine
//!
//! ```text
//! ingested -> classifying -> classified -> extracting -> extracted -> validating -> stored
//!                                       \______________(unclassified)____________/
//! ```
//!
//! plus `-> failed` from any non-terminal state. Every run, success or
//! failure, ends with one `StoredRecord` handed to the `DocumentSink`.
//!
//! # Examples
//!
//! ```
//! use altdoc_classifier::{Classifier, ClassifierConfig};
//! use altdoc_domain::{Document, DocumentId};
//! use altdoc_extractor::{ExtractorConfig, ExtractorRegistry};
//! use altdoc_pipeline::{MemorySink, Orchestrator, PipelineConfig, TracingEventSink};
//! use altdoc_validator::{Validator, ValidatorConfig};
//!
//! # async fn example() {
//! let orchestrator = Orchestrator::new(
//!     Classifier::rule_only(ClassifierConfig::default()),
//!     ExtractorRegistry::with_defaults(ExtractorConfig::default()).unwrap(),
//!     Validator::new(ValidatorConfig::default()).unwrap(),
//!     MemorySink::new(),
//!     TracingEventSink,
//!     PipelineConfig::default(),
//! );
//!
//! let doc = Document::from_text(DocumentId::new(), "Capital Call Notice\nFund: ABC-III");
//! let record = orchestrator.process(doc).await.unwrap();
//! assert!(record.final_state.is_terminal());
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod orchestrator;
mod sinks;
mod workers;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use orchestrator::Orchestrator;
pub use sinks::{ChannelEventSink, CollectingEventSink, MemorySink, TracingEventSink};
pub use workers::{spawn_document_workers, SharedReceiver};
