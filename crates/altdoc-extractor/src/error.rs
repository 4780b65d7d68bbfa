//! Error types for the extractor registry

use altdoc_domain::DocumentType;
use thiserror::Error;

/// Errors for registry construction and lookup
///
/// These indicate configuration defects, not data quality: a document that
/// legitimately cannot be extracted still produces a full map of
/// zero-confidence field results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// No extractor registered for a classified type. Only legitimate for
    /// unclassified documents, which must never reach extraction.
    #[error("No extractor registered for document type: {0}")]
    UnsupportedType(DocumentType),

    /// Registry completeness check failed at startup
    #[error("Extractor registry incomplete: no extractor for {0}")]
    MissingExtractor(DocumentType),

    /// A second extractor was registered for the same type
    #[error("Duplicate extractor registered for {0}")]
    DuplicateExtractor(DocumentType),
}
