//! Distribution notice extractor

use crate::anchors::DocumentView;
use crate::config::ExtractorConfig;
use crate::fields;
use crate::registry::FieldExtractor;
use altdoc_domain::{Confidence, DocumentType, FieldResult, FieldValue, Layout};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const REQUIRED: [&str; 5] = [
    "fund_id",
    "distribution_date",
    "lp_id",
    "amount",
    "distribution_type",
];

static FUND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2,6}[-\s][IVX]{1,5})\b").unwrap());

static LP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bLP[-\s]?([A-Z0-9]{2,10})\b").unwrap());

/// Income language anywhere in the notice marks the distribution as CI
static INCOME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(capital\s+income|dividend|income\s+distribution)\b").unwrap()
});

static ROC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\breturn\s+of\s+capital\b").unwrap());

/// Extractor for distribution notices
#[derive(Debug)]
pub struct DistributionExtractor {
    config: ExtractorConfig,
}

impl DistributionExtractor {
    /// Create an extractor with the given tuning
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Classify the distribution as return-of-capital or capital-income.
    ///
    /// An explicit "Distribution Type" label wins; otherwise income language
    /// anywhere in the notice marks it CI, "return of capital" marks it ROC,
    /// and an untyped notice defaults to ROC at low confidence.
    fn distribution_type(&self, view: &DocumentView<'_>) -> FieldResult {
        let name = "distribution_type";
        if let Some(span) =
            view.find_after_label(&["Distribution Type", "Type of Distribution"], self.config.label_scan_lines)
        {
            let lower = span.text.to_lowercase();
            let code = if lower.contains("income") || lower.contains("dividend") || lower == "ci" {
                Some("CI")
            } else if lower.contains("return of capital") || lower.contains("capital") || lower == "roc" {
                Some("ROC")
            } else {
                None
            };
            if let Some(code) = code {
                let confidence = Confidence::new(self.config.anchor_decay(span.distance));
                return FieldResult::found(
                    name,
                    FieldValue::Enum(code.to_string()),
                    confidence,
                    span.text,
                );
            }
            return FieldResult::unparsed(name, span.text);
        }

        if view.find_line(&INCOME_PATTERN).is_some() {
            let confidence = Confidence::new(self.config.pattern_confidence);
            return FieldResult::found(
                name,
                FieldValue::Enum("CI".to_string()),
                confidence,
                "income language".to_string(),
            );
        }
        if view.find_line(&ROC_PATTERN).is_some() {
            let confidence = Confidence::new(self.config.pattern_confidence);
            return FieldResult::found(
                name,
                FieldValue::Enum("ROC".to_string()),
                confidence,
                "return of capital".to_string(),
            );
        }

        // Untyped distributions are overwhelmingly return of capital, but a
        // guess this weak should draw the confidence-floor warning.
        FieldResult::found(
            name,
            FieldValue::Enum("ROC".to_string()),
            Confidence::new(0.3),
            String::new(),
        )
    }
}

impl FieldExtractor for DistributionExtractor {
    fn doc_type(&self) -> DocumentType {
        DocumentType::DistributionNotice
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &REQUIRED
    }

    fn extract(&self, text: &str, layout: &Layout) -> BTreeMap<String, FieldResult> {
        let view = DocumentView::new(text, layout);
        let config = &self.config;
        let mut out = BTreeMap::new();

        let fund_id = fields::identifier_field(
            &view,
            config,
            "fund_id",
            &["Fund ID", "Fund Identifier", "Fund Number", "Fund"],
            Some(&FUND_PATTERN),
        );
        let distribution_date = fields::date_field(
            &view,
            config,
            "distribution_date",
            &["Distribution Date", "Payment Date", "Record Date"],
        );
        let lp_id = fields::identifier_field(
            &view,
            config,
            "lp_id",
            &["LP ID", "Limited Partner", "Investor", "LP"],
            Some(&LP_PATTERN),
        );
        let (amount, _) = fields::amount_field(
            &view,
            config,
            "amount",
            &["Distribution Amount", "Amount", "Gross Distribution", "Net Distribution"],
        );
        let distribution_type = self.distribution_type(&view);

        for field in [fund_id, distribution_date, lp_id, amount, distribution_type] {
            out.insert(field.name.clone(), field);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn extract(text: &str) -> BTreeMap<String, FieldResult> {
        let extractor = DistributionExtractor::new(ExtractorConfig::default());
        extractor.extract(text, &Layout::from_text(text))
    }

    const NOTICE: &str = "Distribution Notice\n\
        Fund ID: ABC-III\n\
        LP ID: LP-007\n\
        Distribution Amount: USD 350,000.00\n\
        Distribution Date: 2023-06-30\n\
        Distribution Type: Return of Capital";

    #[test]
    fn test_full_notice() {
        let fields = extract(NOTICE);

        assert_eq!(
            fields["fund_id"].value,
            Some(FieldValue::Text("ABC-III".to_string()))
        );
        assert_eq!(
            fields["amount"].value,
            Some(FieldValue::Amount {
                value: Decimal::from_str("350000.00").unwrap(),
                currency: "USD".to_string(),
            })
        );
        assert!(fields["amount"].confidence.clears(0.9));
        assert_eq!(
            fields["distribution_date"].value,
            Some(FieldValue::Date(NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()))
        );
        assert_eq!(
            fields["distribution_type"].value,
            Some(FieldValue::Enum("ROC".to_string()))
        );
        assert!(fields["distribution_type"].confidence.clears(0.9));
    }

    #[test]
    fn test_income_language_marks_ci() {
        let fields = extract("Cash distribution of dividend income to investors");
        let ty = &fields["distribution_type"];
        assert_eq!(ty.value, Some(FieldValue::Enum("CI".to_string())));
        assert!(ty.confidence.value() < 0.7);
    }

    #[test]
    fn test_untyped_defaults_to_roc_at_low_confidence() {
        let fields = extract("Distribution Amount: $10,000");
        let ty = &fields["distribution_type"];
        assert_eq!(ty.value, Some(FieldValue::Enum("ROC".to_string())));
        assert!(ty.confidence.value() < 0.4);
    }

    #[test]
    fn test_every_field_present_on_empty_input() {
        let fields = extract("no relevant content");
        assert_eq!(fields.len(), REQUIRED.len());
        for name in REQUIRED {
            assert!(fields.contains_key(name));
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(extract(NOTICE), extract(NOTICE));
    }
}
