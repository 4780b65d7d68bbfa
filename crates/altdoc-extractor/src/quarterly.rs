//! Quarterly update extractor

use crate::anchors::DocumentView;
use crate::config::ExtractorConfig;
use crate::registry::FieldExtractor;
use altdoc_domain::{Confidence, DocumentType, FieldResult, FieldValue, Layout};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const REQUIRED: [&str; 2] = ["kpis", "narrative_highlights"];

static METRICS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(key\s+metrics|performance\s+metrics|kpis|financial\s+highlights)\s*:?\s*$")
        .unwrap()
});

static HIGHLIGHTS_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(key\s+highlights|quarterly\s+highlights|highlights)\s*:?\s*$").unwrap()
});

/// Fund and portfolio metrics recognized outside a metrics heading, in the
/// order they should appear in the output pairs
const KNOWN_METRICS: [&str; 8] = [
    "Revenue",
    "EBITDA",
    "Net Income",
    "NAV",
    "IRR",
    "MOIC",
    "TVPI",
    "DPI",
];

/// Extractor for quarterly portfolio updates
#[derive(Debug)]
pub struct QuarterlyUpdateExtractor {
    config: ExtractorConfig,
}

impl QuarterlyUpdateExtractor {
    /// Create an extractor with the given tuning
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Collect KPI metrics as ordered name → value pairs.
    ///
    /// Prefers `Key: value` lines under a metrics heading; when no heading
    /// exists, sweeps for the known metric labels anywhere in the update.
    fn kpis(&self, view: &DocumentView<'_>) -> FieldResult {
        let name = "kpis";

        if let Some(idx) = view.find_line(&METRICS_HEADING) {
            let mut pairs = Vec::new();
            for line in &view.lines()[idx + 1..] {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    if pairs.is_empty() {
                        continue;
                    }
                    break;
                }
                match split_metric(trimmed) {
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
        for label in KNOWN_METRICS {
            if let Some(span) = view.find_after_label(&[label], 0) {
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
                "metric labels".to_string(),
            )
        }
    }

    /// Collect the narrative highlight segments under a highlights heading,
    /// in document order, with bullet markers stripped
    fn narrative_highlights(&self, view: &DocumentView<'_>) -> FieldResult {
        let name = "narrative_highlights";
        let Some(idx) = view.find_line(&HIGHLIGHTS_HEADING) else {
            return FieldResult::missing(name);
        };

        let mut segments = Vec::new();
        for line in &view.lines()[idx + 1..] {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                if segments.is_empty() {
                    continue;
                }
                break;
            }
            if METRICS_HEADING.is_match(trimmed) || HIGHLIGHTS_HEADING.is_match(trimmed) {
                break;
            }
            let segment = trimmed
                .trim_start_matches(['-', '*', '\u{2022}'])
                .trim_start();
            if !segment.is_empty() {
                segments.push(segment.to_string());
            }
        }

        if segments.is_empty() {
            FieldResult::missing(name)
        } else {
            let raw = view.lines()[idx].trim().to_string();
            FieldResult::found(name, FieldValue::List(segments), Confidence::new(0.9), raw)
        }
    }
}

/// Split a `Metric: value` line, rejecting prose where the colon sits deep
/// inside a sentence
fn split_metric(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() || key.len() > 40 {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

impl FieldExtractor for QuarterlyUpdateExtractor {
    fn doc_type(&self) -> DocumentType {
        DocumentType::QuarterlyUpdate
    }

    fn required_fields(&self) -> &'static [&'static str] {
        &REQUIRED
    }

    fn extract(&self, text: &str, layout: &Layout) -> BTreeMap<String, FieldResult> {
        let view = DocumentView::new(text, layout);
        let mut out = BTreeMap::new();

        let kpis = self.kpis(&view);
        let narrative_highlights = self.narrative_highlights(&view);

        for field in [kpis, narrative_highlights] {
            out.insert(field.name.clone(), field);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> BTreeMap<String, FieldResult> {
        let extractor = QuarterlyUpdateExtractor::new(ExtractorConfig::default());
        extractor.extract(text, &Layout::from_text(text))
    }

    const UPDATE: &str = "Q3 Report\n\
        Key Metrics:\n\
        Revenue: $12.4M\n\
        EBITDA: $3.1M\n\
        MOIC: 1.8x\n\
        \n\
        Highlights:\n\
        - Closed two add-on acquisitions\n\
        - Refinanced the senior facility\n\
        \n\
        Contact your relationship manager with questions.";

    #[test]
    fn test_kpis_preserve_document_order() {
        let fields = extract(UPDATE);
        let Some(FieldValue::Pairs(pairs)) = &fields["kpis"].value else {
            panic!("Expected pairs");
        };
        assert_eq!(
            pairs,
            &vec![
                ("Revenue".to_string(), "$12.4M".to_string()),
                ("EBITDA".to_string(), "$3.1M".to_string()),
                ("MOIC".to_string(), "1.8x".to_string()),
            ]
        );
        assert!(fields["kpis"].confidence.clears(0.8));
    }

    #[test]
    fn test_highlights_strip_bullets_and_stop_at_blank() {
        let fields = extract(UPDATE);
        let Some(FieldValue::List(segments)) = &fields["narrative_highlights"].value else {
            panic!("Expected list");
        };
        assert_eq!(
            segments,
            &vec![
                "Closed two add-on acquisitions".to_string(),
                "Refinanced the senior facility".to_string(),
            ]
        );
    }

    #[test]
    fn test_metric_label_sweep_without_heading() {
        let fields = extract("The fund reported IRR: 18.2% net of fees");
        let Some(FieldValue::Pairs(pairs)) = &fields["kpis"].value else {
            panic!("Expected pairs");
        };
        assert_eq!(pairs[0], ("IRR".to_string(), "18.2%".to_string()));
        assert!(fields["kpis"].confidence.value() < 0.7);
    }

    #[test]
    fn test_every_field_present_on_empty_input() {
        let fields = extract("no relevant content");
        assert_eq!(fields.len(), REQUIRED.len());
        for name in REQUIRED {
            assert!(fields.contains_key(name));
            assert!(fields[name].confidence.is_zero());
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(extract(UPDATE), extract(UPDATE));
    }
}
