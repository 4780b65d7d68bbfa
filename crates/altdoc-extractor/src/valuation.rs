//! Valuation report extractor

use crate::anchors::DocumentView;
use crate::config::ExtractorConfig;
use crate::fields;
use crate::registry::FieldExtractor;
use altdoc_domain::{Confidence, DocumentType, FieldResult, FieldValue, Layout};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const REQUIRED: [&str; 4] = [
    "valuation_date",
    "methodology",
    "inputs",
    "final_valuation",
];

static DCF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(discounted\s+cash\s+flow|dcf)\b").unwrap());

static COMPS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(market\s+comparables?|comparable\s+compan\w*|trading\s+comps)\b").unwrap()
});

static INPUTS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(key\s+inputs|valuation\s+inputs|inputs|key\s+assumptions|assumptions)\s*:?\s*$").unwrap()
});

/// Labeled numeric assumptions that mark an input line outside a heading
/// section, in the order they should appear in the output pairs
const KNOWN_INPUTS: [&str; 5] = [
    "Discount Rate",
    "Terminal Growth",
    "Exit Multiple",
    "WACC",
    "Revenue Multiple",
];

/// Extractor for valuation reports
#[derive(Debug)]
pub struct ValuationExtractor {
    config: ExtractorConfig,
}

impl ValuationExtractor {
    /// Create an extractor with the given tuning
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Resolve the valuation methodology.
    ///
    /// An explicit label wins; otherwise keyword detection distinguishes
    /// discounted-cash-flow from market-comparables language.
    fn methodology(&self, view: &DocumentView<'_>) -> FieldResult {
        let name = "methodology";
        if let Some(span) = view.find_after_label(
            &["Valuation Methodology", "Methodology", "Valuation Method"],
            self.config.label_scan_lines,
        ) {
            let confidence = Confidence::new(self.config.anchor_decay(span.distance));
            return FieldResult::found(
                name,
                FieldValue::Text(span.text.clone()),
                confidence,
                span.text,
            );
        }

        if view.find_line(&DCF_PATTERN).is_some() {
            return FieldResult::found(
                name,
                FieldValue::Text("Discounted Cash Flow".to_string()),
                Confidence::new(self.config.pattern_confidence),
                "discounted cash flow".to_string(),
            );
        }
        if view.find_line(&COMPS_PATTERN).is_some() {
            return FieldResult::found(
                name,
                FieldValue::Text("Market Comparables".to_string()),
                Confidence::new(self.config.pattern_confidence),
                "market comparables".to_string(),
            );
        }

        FieldResult::missing(name)
    }

    /// Collect the valuation input assumptions as ordered pairs.
    ///
    /// Prefers the `Key: value` lines under an inputs/assumptions heading;
    /// when no heading exists, sweeps for the known assumption labels
    /// anywhere in the report.
    fn inputs(&self, view: &DocumentView<'_>) -> FieldResult {
        let name = "inputs";

        if let Some(idx) = view.find_line(&INPUTS_HEADING) {
            let mut pairs = Vec::new();
            for line in &view.lines()[idx + 1..] {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    if pairs.is_empty() {
                        continue;
                    }
                    break;
                }
                match split_pair(trimmed) {
                    Some(pair) => pairs.push(pair),
                    None => break,
                }
            }
            if !pairs.is_empty() {
                let raw = view.lines()[idx].trim().to_string();
                return FieldResult::found(
                    name,
                    FieldValue::Pairs(pairs),
                    Confidence::new(0.9),
                    raw,
                );
            }
        }

        let mut pairs = Vec::new();
        for label in KNOWN_INPUTS {
            if let Some(span) = view.find_after_label(&[label], 0) {
                // Mid-sentence labels carry trailing prose; assumption
                // values are single tokens like "12.5%" or "8.5x".
                if let Some(token) = span.text.split_whitespace().next() {
                    pairs.push((label.to_string(), token.to_string()));
                }
            }
        }
        if pairs.is_empty() {
            FieldResult::missing(name)
        } else {
            FieldResult::found(
                name,
                FieldValue::Pairs(pairs),
                Confidence::new(self.config.pattern_confidence),
                "assumption labels".to_string(),
            )
        }
    }
}

/// Split a `Key: value` line, rejecting prose lines where the colon sits
/// deep inside a sentence
fn split_pair(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() || key.len() > 40 {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

impl FieldExtractor for ValuationExtractor {
    fn doc_type(&self) -> DocumentType {
        DocumentType::ValuationReport
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &REQUIRED
    }

    fn extract(&self, text: &str, layout: &Layout) -> BTreeMap<String, FieldResult> {
        let view = DocumentView::new(text, layout);
        let config = &self.config;
        let mut out = BTreeMap::new();

        let valuation_date = fields::date_field(
            &view,
            config,
            "valuation_date",
            &["Valuation Date", "As of Date", "Date of Valuation", "As of"],
        );
        let methodology = self.methodology(&view);
        let inputs = self.inputs(&view);
        let (final_valuation, _) = fields::amount_field(
            &view,
            config,
            "final_valuation",
            &[
                "Final Valuation",
                "Concluded Value",
                "Fair Value",
                "Net Asset Value",
                "Enterprise Value",
            ],
        );

        for field in [valuation_date, methodology, inputs, final_valuation] {
            out.insert(field.name.clone(), field);
        }
        out
    }
}
