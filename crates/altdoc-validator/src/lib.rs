//! Altdoc Validation Layer
//!
//! Declarative per-type rule sets applied to extracted field results before
//! a document may reach storage. Rules evaluate in declaration order and
//! never short-circuit: a document's findings list every problem at once.
//! Blocking findings prevent storage; warnings travel with the stored
//! record.
//!
//! # Invariants
//!
//! - Every document type has a rule set, checked when the validator is
//!   built. A missing set is a configuration defect surfaced at startup.
//! - Validation is pure and idempotent: the same (type, fields) input
//!   yields the same findings in the same order.
//!
//! # Examples
//!
//! ```
//! use altdoc_validator::{Validator, ValidatorConfig};
//! use altdoc_domain::{has_blocking, DocumentType};
//! use std::collections::BTreeMap;
//!
//! let validator = Validator::new(ValidatorConfig::default()).unwrap();
//! let errors = validator.validate(DocumentType::Unclassified, &BTreeMap::new());
//! assert!(has_blocking(&errors));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod rules;
mod validator;

pub use config::ValidatorConfig;
pub use error::ValidatorError;
pub use validator::Validator;
