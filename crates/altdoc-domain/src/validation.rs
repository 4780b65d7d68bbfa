//! Validation errors attached to documents before storage

use serde::{Deserialize, Serialize};

/// Severity of a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Attached to the stored record but does not block storage
    Warning,

    /// Prevents the document from reaching the stored state
    Blocking,
}

/// A single validation finding
///
/// `field` is the field name from the per-type required list, or
/// `"document"` for cross-field and document-level findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field the finding applies to, or "document"
    pub field: String,

    /// Stable rule identifier
    pub rule_id: String,

    /// Human-readable message
    pub message: String,

    /// Whether this finding blocks storage
    pub severity: Severity,
}

impl ValidationError {
    /// Create a blocking finding
    pub fn blocking(
        field: impl Into<String>,
        rule_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule_id: rule_id.into(),
            message: message.into(),
            severity: Severity::Blocking,
        }
    }

    /// Create a warning finding
    pub fn warning(
        field: impl Into<String>,
        rule_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule_id: rule_id.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    /// Whether this finding blocks storage
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}

/// Whether any finding in a set blocks storage
pub fn has_blocking(errors: &[ValidationError]) -> bool {
    errors.iter().any(ValidationError::is_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_detection() {
        let errors = vec![
            ValidationError::warning("call_amount", "confidence_floor", "low confidence"),
            ValidationError::blocking("fund_id", "required_field", "fund_id not found"),
        ];
        assert!(has_blocking(&errors));
        assert!(!has_blocking(&errors[..1]));
    }
}
