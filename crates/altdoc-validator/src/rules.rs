//! Per-type validation rule tables

use altdoc_domain::{DocumentType, FieldResult, FieldValue, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A single declarative rule
///
/// Rules are data, not code paths: each variant names the check and the
/// field it applies to, and `evaluate` interprets them in table order.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Rule {
    /// The named field must be present with nonzero confidence
    Required(&'static str),

    /// The named date field must not lie in the future
    DateNotFuture(&'static str),

    /// The named amount field must be strictly positive
    AmountPositive(&'static str),

    /// Warn on any field below the configured confidence floor
    ConfidenceFloor,

    /// Warn on any date field flagged as locale-ambiguous
    AmbiguousDates,

    /// The document type could not be determined
    Unclassifiable,
}

/// The rule set for a document type, in evaluation order
pub(crate) fn rule_set(doc_type: DocumentType) -> &'static [Rule] {
    use Rule::*;
    match doc_type {
        DocumentType::CapitalCall => &[
            Required("fund_id"),
            Required("call_date"),
            Required("lp_id"),
            Required("call_amount"),
            Required("currency"),
            Required("call_number"),
            DateNotFuture("call_date"),
            AmountPositive("call_amount"),
            ConfidenceFloor,
            AmbiguousDates,
        ],
        DocumentType::DistributionNotice => &[
            Required("fund_id"),
            Required("distribution_date"),
            Required("lp_id"),
            Required("amount"),
            Required("distribution_type"),
            DateNotFuture("distribution_date"),
            AmountPositive("amount"),
            ConfidenceFloor,
            AmbiguousDates,
        ],
        DocumentType::ValuationReport => &[
            Required("valuation_date"),
            Required("methodology"),
            Required("inputs"),
            Required("final_valuation"),
            AmountPositive("final_valuation"),
            ConfidenceFloor,
            AmbiguousDates,
        ],
        DocumentType::QuarterlyUpdate => &[
            Required("kpis"),
            Required("narrative_highlights"),
            ConfidenceFloor,
            AmbiguousDates,
        ],
        DocumentType::Unclassified => &[Unclassifiable],
    }
}

impl Rule {
    /// Evaluate one rule against the field map, appending findings
    pub(crate) fn evaluate(
        &self,
        fields: &BTreeMap<String, FieldResult>,
        today: NaiveDate,
        confidence_floor: f64,
        out: &mut Vec<ValidationError>,
    ) {
        match self {
            Rule::Required(name) => {
                if !fields.get(*name).is_some_and(FieldResult::is_found) {
                    out.push(ValidationError::blocking(
                        *name,
                        "required_field",
                        format!("{} not found", name),
                    ));
                }
            }
            Rule::DateNotFuture(name) => {
                if let Some(FieldValue::Date(date)) = field_value(fields, name) {
                    if *date > today {
                        out.push(ValidationError::blocking(
                            *name,
                            "date_not_future",
                            format!("{} is in the future: {}", name, date),
                        ));
                    }
                }
            }
            Rule::AmountPositive(name) => {
                if let Some(FieldValue::Amount { value, .. }) = field_value(fields, name) {
                    if *value <= Decimal::ZERO {
                        out.push(ValidationError::blocking(
                            *name,
                            "amount_positive",
                            format!("{} must be greater than zero, got {}", name, value),
                        ));
                    }
                }
            }
            Rule::ConfidenceFloor => {
                for field in fields.values() {
                    if field.is_found() && field.confidence.value() < confidence_floor {
                        out.push(ValidationError::warning(
                            &field.name,
                            "confidence_floor",
                            format!(
                                "{} confidence {:.2} below floor {:.2}",
                                field.name,
                                field.confidence.value(),
                                confidence_floor
                            ),
                        ));
                    }
                }
            }
            Rule::AmbiguousDates => {
                for field in fields.values() {
                    if field.ambiguous {
                        out.push(ValidationError::warning(
                            &field.name,
                            "ambiguous_date",
                            format!("{} parsed from a locale-ambiguous form", field.name),
                        ));
                    }
                }
            }
            Rule::Unclassifiable => {
                out.push(ValidationError::blocking(
                    "document",
                    "unclassified",
                    "document type could not be determined",
                ));
            }
        }
    }
}

fn field_value<'a>(
    fields: &'a BTreeMap<String, FieldResult>,
    name: &str,
) -> Option<&'a FieldValue> {
    fields.get(name).and_then(|f| f.value.as_ref())
}
