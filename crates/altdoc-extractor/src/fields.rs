//! Shared field-building helpers for the extractors
//!
//! Each helper locates a raw span via anchor-proximity search, normalizes
//! it, and folds parse failures into zero-confidence results so one bad
//! field never aborts extraction of the rest.

use crate::anchors::DocumentView;
use crate::config::ExtractorConfig;
use altdoc_domain::{Confidence, FieldResult, FieldValue, SourceTier};
use altdoc_normalize as normalize;
use regex::Regex;
use tracing::debug;

/// Build a date field from the span nearest one of the labels
pub(crate) fn date_field(
    view: &DocumentView<'_>,
    config: &ExtractorConfig,
    name: &str,
    labels: &[&'static str],
) -> FieldResult {
    let Some(span) = view.find_after_label(labels, config.label_scan_lines) else {
        return FieldResult::missing(name);
    };
    match normalize::parse_date(&span.text) {
        Ok(parsed) => {
            let confidence = Confidence::new(parsed.confidence)
                .scaled(config.anchor_decay(span.distance));
            FieldResult::found(name, FieldValue::Date(parsed.date), confidence, span.text)
                .with_ambiguity(parsed.ambiguous)
        }
        Err(e) => {
            debug!(field = name, error = %e, span = %span.text, "Date parse failed");
            FieldResult::unparsed(name, span.text)
        }
    }
}

/// Build an amount field; also returns the parsed currency for reuse
pub(crate) fn amount_field(
    view: &DocumentView<'_>,
    config: &ExtractorConfig,
    name: &str,
    labels: &[&'static str],
) -> (FieldResult, Option<(String, f64, bool)>) {
    let Some(span) = view.find_after_label(labels, config.label_scan_lines) else {
        return (FieldResult::missing(name), None);
    };
    match normalize::parse_amount(&span.text) {
        Ok(parsed) => {
            let confidence = Confidence::new(parsed.confidence)
                .scaled(config.anchor_decay(span.distance));
            let currency = (
                parsed.currency.clone(),
                confidence.value(),
                parsed.currency_inferred,
            );
            let result = FieldResult::found(
                name,
                FieldValue::Amount {
                    value: parsed.value,
                    currency: parsed.currency,
                },
                confidence,
                span.text,
            );
            (result, Some(currency))
        }
        Err(e) => {
            debug!(field = name, error = %e, span = %span.text, "Amount parse failed");
            (FieldResult::unparsed(name, span.text), None)
        }
    }
}

/// Build an identifier field with an optional pattern fallback
pub(crate) fn identifier_field(
    view: &DocumentView<'_>,
    config: &ExtractorConfig,
    name: &str,
    labels: &[&'static str],
    fallback: Option<&Regex>,
) -> FieldResult {
    if let Some(span) = view.find_after_label(labels, config.label_scan_lines) {
        // Identifiers are single tokens; a labeled line may carry trailing
        // prose, so take the first token of the span.
        let token = span.text.split_whitespace().next().unwrap_or("");
        match normalize::parse_identifier(token) {
            Ok(parsed) => {
                let confidence = Confidence::new(parsed.confidence)
                    .scaled(config.anchor_decay(span.distance));
                return FieldResult::found(
                    name,
                    FieldValue::Text(parsed.value),
                    confidence,
                    span.text,
                );
            }
            Err(e) => {
                debug!(field = name, error = %e, span = %span.text, "Identifier parse failed");
                return FieldResult::unparsed(name, span.text);
            }
        }
    }

    if let Some(pattern) = fallback {
        if let Some(raw) = view.find_pattern(pattern) {
            if let Ok(parsed) = normalize::parse_identifier(&raw) {
                let confidence =
                    Confidence::new(parsed.confidence).scaled(config.pattern_confidence);
                return FieldResult::found(name, FieldValue::Text(parsed.value), confidence, raw);
            }
        }
    }

    FieldResult::missing(name)
}

/// Build an integer field (call numbers)
pub(crate) fn integer_field(
    view: &DocumentView<'_>,
    config: &ExtractorConfig,
    name: &str,
    labels: &[&'static str],
) -> FieldResult {
    let Some(span) = view.find_after_label(labels, config.label_scan_lines) else {
        return FieldResult::missing(name);
    };
    match normalize::parse_integer(&span.text) {
        Ok(value) => {
            let confidence =
                Confidence::new(config.anchor_decay(span.distance)).scaled(0.9);
            FieldResult::found(name, FieldValue::Integer(value), confidence, span.text)
        }
        Err(e) => {
            debug!(field = name, error = %e, span = %span.text, "Integer parse failed");
            FieldResult::unparsed(name, span.text)
        }
    }
}

/// Build a currency field, preferring an explicit label over the currency
/// detected while parsing an amount field
pub(crate) fn currency_field(
    view: &DocumentView<'_>,
    config: &ExtractorConfig,
    name: &str,
    from_amount: Option<&(String, f64, bool)>,
) -> FieldResult {
    if let Some(span) = view.find_after_label(&["Currency"], config.label_scan_lines) {
        let code = span
            .text
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_uppercase();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            let confidence = Confidence::new(config.anchor_decay(span.distance));
            return FieldResult::found(name, FieldValue::Text(code), confidence, span.text);
        }
    }

    match from_amount {
        Some((code, amount_confidence, inferred)) => {
            let confidence = if *inferred {
                // Defaulted currency: keep it, but low enough to draw a
                // confidence-floor warning downstream
                Confidence::new(0.3)
            } else {
                Confidence::new(*amount_confidence)
            };
            let mut result =
                FieldResult::found(name, FieldValue::Text(code.clone()), confidence, code.clone());
            result.tier = SourceTier::Rule;
            result
        }
        None => FieldResult::missing(name),
    }
}
