//! The document-type to extractor mapping

use crate::capital_call::CapitalCallExtractor;
use crate::config::ExtractorConfig;
use crate::distribution::DistributionExtractor;
use crate::error::ExtractorError;
use crate::quarterly::QuarterlyUpdateExtractor;
use crate::valuation::ValuationExtractor;
use altdoc_domain::{DocumentType, FieldResult, Layout};
use std::collections::BTreeMap;

/// A type-specific field extractor
///
/// `extract` is total: it returns a `FieldResult` for every required
/// field, with confidence 0.0 standing in for "not found". It is also
/// deterministic and synchronous; anchor search involves no model calls.
pub trait FieldExtractor: Send + Sync + std::fmt::Debug {
    /// The document type this extractor handles
    fn doc_type(&self) -> DocumentType;

    /// The closed list of required field names, in canonical order
    fn required_fields(&self) -> &'static [&'static str];

    /// Extract all required fields from a document
    fn extract(&self, text: &str, layout: &Layout) -> BTreeMap<String, FieldResult>;
}

/// Registry mapping document types to their extractors
///
/// Built once at process start and immutable thereafter. Construction
/// verifies the completeness invariant: every extractable type has
/// exactly one extractor.
pub struct ExtractorRegistry {
    extractors: BTreeMap<DocumentType, Box<dyn FieldExtractor>>,
}

impl ExtractorRegistry {
    /// Build a registry with the four standard extractors
    pub fn with_defaults(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        let mut registry = Self {
            extractors: BTreeMap::new(),
        };
        registry.register(Box::new(CapitalCallExtractor::new(config.clone())))?;
        registry.register(Box::new(DistributionExtractor::new(config.clone())))?;
        registry.register(Box::new(ValuationExtractor::new(config.clone())))?;
        registry.register(Box::new(QuarterlyUpdateExtractor::new(config)))?;
        registry.verify_complete()?;
        Ok(registry)
    }

    /// Register an extractor; rejects duplicates
    pub fn register(&mut self, extractor: Box<dyn FieldExtractor>) -> Result<(), ExtractorError> {
        let doc_type = extractor.doc_type();
        if self.extractors.contains_key(&doc_type) {
            return Err(ExtractorError::DuplicateExtractor(doc_type));
        }
        self.extractors.insert(doc_type, extractor);
        Ok(())
    }

    /// Check that every extractable type is covered
    pub fn verify_complete(&self) -> Result<(), ExtractorError> {
        for doc_type in DocumentType::EXTRACTABLE {
            if !self.extractors.contains_key(&doc_type) {
                return Err(ExtractorError::MissingExtractor(doc_type));
            }
        }
        Ok(())
    }

    /// Look up the extractor for a type
    ///
    /// Fails only for types with no registration, which is a configuration
    /// defect. Unclassified documents must be routed around extraction by
    /// the orchestrator, never looked up here.
    pub fn get(&self, doc_type: DocumentType) -> Result<&dyn FieldExtractor, ExtractorError> {
        self.extractors
            .get(&doc_type)
            .map(|b| b.as_ref())
            .ok_or(ExtractorError::UnsupportedType(doc_type))
    }
}
