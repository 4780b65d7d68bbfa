//! Altdoc Multi-Tier Classifier
//!
//! Determines a document's type with a confidence-scored multi-tier
//! strategy: a pluggable model tier first, a weighted keyword rule tier as
//! fallback. The first tier whose confidence clears its configured
//! threshold wins and the result carries tier attribution; when no tier
//! clears, the document is unclassified with `SourceTier::None`.
//!
//! # Architecture
//!
//! ```text
//! (text, layout) -> model tier -> rule tier -> ClassificationResult
//! ```
//!
//! Classification is total for data conditions: a model with no opinion or
//! an unusable label degrades silently to the rule tier. Only a
//! transport-level model failure (timeout, provider I/O) surfaces as
//! [`ClassifierError::TransientModel`], which the orchestrator retries
//! with backoff.
//!
//! # Examples
//!
//! ```
//! use altdoc_classifier::{Classifier, ClassifierConfig};
//! use altdoc_domain::{DocumentType, Layout, SourceTier};
//!
//! # async fn example() {
//! let classifier = Classifier::rule_only(ClassifierConfig::default());
//! let text = "Capital Call Notice\nFund: ABC-III";
//! let layout = Layout::from_text(text);
//!
//! let result = classifier.classify(text, &layout).await.unwrap();
//! assert_eq!(result.value, DocumentType::CapitalCall);
//! assert_eq!(result.tier, SourceTier::Rule);
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod model;
mod rules;

pub use classifier::Classifier;
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use model::{MockModel, NoModel};
