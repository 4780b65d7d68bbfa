//! The validation entry point

use crate::config::ValidatorConfig;
use crate::error::ValidatorError;
use crate::rules::rule_set;
use altdoc_domain::{DocumentType, FieldResult, ValidationError};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Applies the per-type rule tables to extracted field results
///
/// Construction verifies that every document type carries a non-empty
/// rule set, so a gap in the tables fails at startup rather than on the
/// first document of that type.
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Build a validator, checking config and rule-table coverage
    pub fn new(config: ValidatorConfig) -> Result<Self, ValidatorError> {
        config.validate().map_err(ValidatorError::InvalidConfig)?;
        for doc_type in DocumentType::ALL {
            if rule_set(doc_type).is_empty() {
                return Err(ValidatorError::MissingRuleSet(doc_type));
            }
        }
        Ok(Self { config })
    }

    /// Validate extracted fields against the type's rule set
    ///
    /// Evaluates every rule in declaration order and never short-circuits,
    /// so the findings list every problem at once. Pure apart from reading
    /// the current date for future-date checks.
    pub fn validate(
        &self,
        doc_type: DocumentType,
        fields: &BTreeMap<String, FieldResult>,
    ) -> Vec<ValidationError> {
        self.validate_at(doc_type, fields, Utc::now().date_naive())
    }

    /// Validate with an explicit "today" for the future-date rules
    pub fn validate_at(
        &self,
        doc_type: DocumentType,
        fields: &BTreeMap<String, FieldResult>,
        today: NaiveDate,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for rule in rule_set(doc_type) {
            rule.evaluate(fields, today, self.config.confidence_floor, &mut errors);
        }
        debug!(
            doc_type = %doc_type,
            findings = errors.len(),
            "Validation complete"
        );
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altdoc_domain::{has_blocking, Confidence, FieldValue, Severity};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn validator() -> Validator {
        Validator::new(ValidatorConfig::default()).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn found(name: &str, value: FieldValue, confidence: f64) -> (String, FieldResult) {
        (
            name.to_string(),
            FieldResult::found(name, value, Confidence::new(confidence), name),
        )
    }

    fn capital_call_fields() -> BTreeMap<String, FieldResult> {
        BTreeMap::from([
            found("fund_id", FieldValue::Text("ABC-III".into()), 1.0),
            found(
                "call_date",
                FieldValue::Date(NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()),
                0.9,
            ),
            found("lp_id", FieldValue::Text("LP-042".into()), 1.0),
            found(
                "call_amount",
                FieldValue::Amount {
                    value: Decimal::from_str("1250000").unwrap(),
                    currency: "USD".into(),
                },
                0.9,
            ),
            found("currency", FieldValue::Text("USD".into()), 0.9),
            found("call_number", FieldValue::Integer(7), 0.9),
        ])
    }

    #[test]
    fn test_clean_capital_call_passes() {
        let errors = validator().validate_at(
            DocumentType::CapitalCall,
            &capital_call_fields(),
            today(),
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_required_field_blocks() {
        let mut fields = capital_call_fields();
        fields.insert("fund_id".to_string(), FieldResult::missing("fund_id"));
        let errors =
            validator().validate_at(DocumentType::CapitalCall, &fields, today());
        assert!(has_blocking(&errors));
        assert_eq!(errors[0].field, "fund_id");
        assert_eq!(errors[0].rule_id, "required_field");
    }

    #[test]
    fn test_future_call_date_blocks() {
        let mut fields = capital_call_fields();
        fields.extend([found(
            "call_date",
            FieldValue::Date(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()),
            0.9,
        )]);
        let errors =
            validator().validate_at(DocumentType::CapitalCall, &fields, today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule_id, "date_not_future");
        assert!(errors[0].is_blocking());
    }

    #[test]
    fn test_nonpositive_amount_blocks() {
        let mut fields = capital_call_fields();
        fields.extend([found(
            "call_amount",
            FieldValue::Amount {
                value: Decimal::ZERO,
                currency: "USD".into(),
            },
            0.9,
        )]);
        let errors =
            validator().validate_at(DocumentType::CapitalCall, &fields, today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule_id, "amount_positive");
    }

    #[test]
    fn test_low_confidence_warns_without_blocking() {
        let mut fields = capital_call_fields();
        fields.extend([found("currency", FieldValue::Text("USD".into()), 0.3)]);
        let errors =
            validator().validate_at(DocumentType::CapitalCall, &fields, today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule_id, "confidence_floor");
        assert_eq!(errors[0].severity, Severity::Warning);
        assert!(!has_blocking(&errors));
    }

    #[test]
    fn test_ambiguous_date_warns() {
        let mut fields = capital_call_fields();
        let (name, result) = found(
            "call_date",
            FieldValue::Date(NaiveDate::from_ymd_opt(2023, 3, 4).unwrap()),
            0.7,
        );
        fields.insert(name, result.with_ambiguity(true));
        let errors =
            validator().validate_at(DocumentType::CapitalCall, &fields, today());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule_id, "ambiguous_date");
        assert_eq!(errors[0].severity, Severity::Warning);
    }

    #[test]
    fn test_unclassified_single_blocking_finding() {
        let errors = validator().validate_at(
            DocumentType::Unclassified,
            &BTreeMap::new(),
            today(),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "document");
        assert_eq!(errors[0].message, "document type could not be determined");
        assert!(errors[0].is_blocking());
    }

    #[test]
    fn test_reports_all_findings_at_once() {
        // Empty field map: every required rule fires
        let errors = validator().validate_at(
            DocumentType::CapitalCall,
            &BTreeMap::new(),
            today(),
        );
        assert_eq!(errors.len(), 6);
        assert!(errors.iter().all(|e| e.rule_id == "required_field"));
    }

    #[test]
    fn test_idempotent() {
        let fields = capital_call_fields();
        let first = validator().validate_at(DocumentType::CapitalCall, &fields, today());
        let second = validator().validate_at(DocumentType::CapitalCall, &fields, today());
        assert_eq!(first, second);
    }
}
