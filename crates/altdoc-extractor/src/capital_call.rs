//! Capital call notice extractor

use crate::anchors::DocumentView;
use crate::config::ExtractorConfig;
use crate::fields;
use crate::registry::FieldExtractor;
use altdoc_domain::{DocumentType, FieldResult, Layout};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const REQUIRED: [&str; 6] = [
    "fund_id",
    "call_date",
    "lp_id",
    "call_amount",
    "currency",
    "call_number",
];

/// Roman-numeral fund naming (ABC-III, GROWTH-IV) used when no explicit
/// fund label is present
static FUND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2,6}[-\s][IVX]{1,5})\b").unwrap());

static LP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bLP[-\s]?([A-Z0-9]{2,10})\b").unwrap());

/// Extractor for capital call / drawdown notices
#[derive(Debug)]
pub struct CapitalCallExtractor {
    config: ExtractorConfig,
}

impl CapitalCallExtractor {
    /// Create an extractor with the given tuning
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }
}

impl FieldExtractor for CapitalCallExtractor {
    fn doc_type(&self) -> DocumentType {
        DocumentType::CapitalCall
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
        let call_date = fields::date_field(
            &view,
            config,
            "call_date",
            &["Call Date", "Due Date", "Payment Due"],
        );
        let lp_id = fields::identifier_field(
            &view,
            config,
            "lp_id",
            &["LP ID", "Limited Partner", "Investor", "LP"],
            Some(&LP_PATTERN),
        );
        let (call_amount, currency_seen) = fields::amount_field(
            &view,
            config,
            "call_amount",
            &["Call Amount", "Amount Due", "Contribution Amount", "Drawdown Amount"],
        );
        let currency =
            fields::currency_field(&view, config, "currency", currency_seen.as_ref());
        let call_number = fields::integer_field(
            &view,
            config,
            "call_number",
            &["Call Number", "Call No", "Drawdown Number", "Drawdown No"],
        );

        for field in [fund_id, call_date, lp_id, call_amount, currency, call_number] {
            out.insert(field.name.clone(), field);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altdoc_domain::FieldValue;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn extract(text: &str) -> BTreeMap<String, FieldResult> {
        let extractor = CapitalCallExtractor::new(ExtractorConfig::default());
        extractor.extract(text, &Layout::from_text(text))
    }

    const NOTICE: &str = "Capital Call Notice\n\
        Fund ABC-III\n\
        LP ID: LP-042\n\
        Call Amount: $1,250,000.00\n\
        Call Date: 03/15/2023\n\
        Call Number: 7";

    #[test]
    fn test_full_notice() {
        let fields = extract(NOTICE);

        let fund = &fields["fund_id"];
        assert_eq!(fund.value, Some(FieldValue::Text("ABC-III".to_string())));
        assert!(fund.confidence.clears(0.5));

        let amount = &fields["call_amount"];
        assert_eq!(
            amount.value,
            Some(FieldValue::Amount {
                value: Decimal::from_str("1250000.00").unwrap(),
                currency: "USD".to_string(),
            })
        );
        assert!(amount.confidence.clears(0.8));

        let date = &fields["call_date"];
        assert_eq!(
            date.value,
            Some(FieldValue::Date(NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()))
        );
        assert!(date.confidence.clears(0.7));
        assert!(!date.ambiguous);

        assert_eq!(fields["call_number"].value, Some(FieldValue::Integer(7)));
        assert_eq!(
            fields["currency"].value,
            Some(FieldValue::Text("USD".to_string()))
        );
    }

    #[test]
    fn test_every_field_present_on_empty_input() {
        let fields = extract("no relevant content");
        assert_eq!(fields.len(), REQUIRED.len());
        for name in REQUIRED {
            assert!(fields[name].confidence.is_zero() || fields[name].is_found());
        }
    }

    #[test]
    fn test_fund_pattern_fallback() {
        let fields = extract("Drawdown for GROWTH-IV investors due soon");
        let fund = &fields["fund_id"];
        assert_eq!(fund.value, Some(FieldValue::Text("GROWTH-IV".to_string())));
        // Pattern fallback carries reduced confidence
        assert!(fund.confidence.value() < 0.7);
        assert!(fund.confidence.clears(0.5));
    }

    #[test]
    fn test_ambiguous_date_flagged() {
        let fields = extract("Call Date: 03/04/2023");
        let date = &fields["call_date"];
        assert!(date.ambiguous);
        assert_eq!(
            date.value,
            Some(FieldValue::Date(NaiveDate::from_ymd_opt(2023, 3, 4).unwrap()))
        );
    }

    #[test]
    fn test_unparseable_amount_keeps_span() {
        let fields = extract("Call Amount: to be determined");
        let amount = &fields["call_amount"];
        assert!(amount.value.is_none());
        assert!(amount.confidence.is_zero());
        assert_eq!(amount.raw_span, "to be determined");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(extract(NOTICE), extract(NOTICE));
    }
}
