//! Document type enumeration

use serde::{Deserialize, Serialize};

/// The closed set of supported document types
///
/// Adding a type requires adding an extractor and validation rules; the
/// extractor registry and the validation rule table are both checked for
/// completeness at startup. `Unclassified` never has an extractor: it
/// routes straight to validation, which rejects it with a blocking error.
///
/// Variants are declared in lexical order of their string identifiers so
/// that derived `Ord` matches the documented rule-tier tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Capital call / drawdown notice
    CapitalCall,

    /// Distribution notice (return of capital or capital income)
    DistributionNotice,

    /// Quarterly fund update
    QuarterlyUpdate,

    /// No tier could determine the type
    Unclassified,

    /// Valuation report
    ValuationReport,
}

impl DocumentType {
    /// Every variant, in declaration order
    pub const ALL: [DocumentType; 5] = [
        DocumentType::CapitalCall,
        DocumentType::DistributionNotice,
        DocumentType::QuarterlyUpdate,
        DocumentType::Unclassified,
        DocumentType::ValuationReport,
    ];

    /// The variants that carry a registered extractor
    pub const EXTRACTABLE: [DocumentType; 4] = [
        DocumentType::CapitalCall,
        DocumentType::DistributionNotice,
        DocumentType::QuarterlyUpdate,
        DocumentType::ValuationReport,
    ];

    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::CapitalCall => "capital_call",
            DocumentType::DistributionNotice => "distribution_notice",
            DocumentType::ValuationReport => "valuation_report",
            DocumentType::QuarterlyUpdate => "quarterly_update",
            DocumentType::Unclassified => "unclassified",
        }
    }

    /// Parse a document type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "capital_call" => Some(DocumentType::CapitalCall),
            "distribution_notice" => Some(DocumentType::DistributionNotice),
            "valuation_report" => Some(DocumentType::ValuationReport),
            "quarterly_update" => Some(DocumentType::QuarterlyUpdate),
            "unclassified" => Some(DocumentType::Unclassified),
            _ => None,
        }
    }

    /// Whether this type has a registered extractor
    pub fn is_extractable(&self) -> bool {
        !matches!(self, DocumentType::Unclassified)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document type: {}", s))
    }
}
