//! Altdoc Field Extractor Registry
//!
//! Maps each classified document type to its field extractor and hosts the
//! four extractor implementations. Extraction is anchor-proximity based:
//! locate the value nearest a recognized label, decay confidence with line
//! distance from the anchor, then normalize the raw span through
//! `altdoc-normalize`, multiplying in the parse confidence.
//!
//! # Invariants
//!
//! - Every non-unclassified document type has exactly one registered
//!   extractor, verified when the registry is built.
//! - Every required field of a type yields exactly one `FieldResult`;
//!   fields that cannot be found or parsed carry confidence 0.0, never an
//!   omitted entry.
//! - Extraction is deterministic and synchronous: identical (text, layout)
//!   inputs produce identical field maps.
//!
//! # Examples
//!
//! ```
//! use altdoc_extractor::{ExtractorConfig, ExtractorRegistry};
//! use altdoc_domain::{DocumentType, Layout};
//!
//! let registry = ExtractorRegistry::with_defaults(ExtractorConfig::default()).unwrap();
//! let extractor = registry.get(DocumentType::CapitalCall).unwrap();
//!
//! let text = "Capital Call Notice\nFund: ABC-III\nCall Amount: $1,000.00";
//! let fields = extractor.extract(text, &Layout::from_text(text));
//! assert!(fields.contains_key("fund_id"));
//! ```

#![warn(missing_docs)]

mod anchors;
mod capital_call;
mod config;
mod distribution;
mod error;
mod fields;
mod quarterly;
mod registry;
mod valuation;

pub use capital_call::CapitalCallExtractor;
pub use config::ExtractorConfig;
pub use distribution::DistributionExtractor;
pub use error::ExtractorError;
pub use quarterly::QuarterlyUpdateExtractor;
pub use registry::{ExtractorRegistry, FieldExtractor};
pub use valuation::ValuationExtractor;
