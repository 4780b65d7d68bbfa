//! Core multi-tier classification

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::model::NoModel;
use crate::rules;
use altdoc_domain::traits::ModelProvider;
use altdoc_domain::{ClassificationResult, Confidence, DocumentType, Layout, Scored, SourceTier};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn};

/// The multi-tier classifier
///
/// Tiers are tried in fixed priority order: model first, rule-based
/// fallback last. The first tier whose confidence clears its configured
/// threshold wins; when none does, the result is unclassified with the
/// highest confidence seen and `SourceTier::None`.
pub struct Classifier<M: ModelProvider> {
    model: Option<Arc<M>>,
    config: ClassifierConfig,
}

impl Classifier<NoModel> {
    /// A classifier with no model tier; only the rule tier runs
    pub fn rule_only(config: ClassifierConfig) -> Self {
        Self {
            model: None,
            config,
        }
    }
}

impl<M> Classifier<M>
where
    M: ModelProvider + 'static,
    M::Error: std::fmt::Display,
{
    /// Create a classifier with a model tier
    pub fn new(model: M, config: ClassifierConfig) -> Self {
        Self {
            model: Some(Arc::new(model)),
            config,
        }
    }

    /// Classify a document
    ///
    /// Total for data conditions: a model with no opinion, an unusable
    /// label, or a sub-threshold score all degrade to the next tier, and
    /// "no tier cleared" is the unclassified result, not an error. The
    /// only error is [`ClassifierError::TransientModel`], raised when the
    /// model call fails or exceeds its timeout; the caller applies retry
    /// policy. Deterministic: identical inputs yield identical results.
    pub async fn classify(
        &self,
        text: &str,
        layout: &Layout,
    ) -> Result<ClassificationResult, ClassifierError> {
        let mut best_seen: f64 = 0.0;
        let mut notes: Vec<String> = Vec::new();

        // Tier 1: model
        if let Some(model) = &self.model {
            if let Some(label) = self.invoke_model(model, text).await? {
                let confidence = Confidence::new(label.confidence);
                if confidence.clears(self.config.model_threshold) {
                    debug!(
                        doc_type = %label.doc_type,
                        confidence = %confidence,
                        "Model tier cleared threshold"
                    );
                    return Ok(Scored::new(
                        label.doc_type,
                        confidence,
                        SourceTier::Model,
                        format!("model: {}", label.rationale),
                    ));
                }
                best_seen = best_seen.max(confidence.value());
                notes.push(format!(
                    "model below threshold ({} at {})",
                    label.doc_type, confidence
                ));
            } else {
                notes.push("model: no opinion".to_string());
            }
        }

        // Tier 2: rules
        if let Some(candidate) = rules::best_candidate(
            text,
            layout,
            self.config.rule_hit_weight,
            self.config.title_weight,
            self.config.title_lines,
        ) {
            let confidence = Confidence::new(candidate.score);
            let mut evidence = format!("rule: matched [{}]", candidate.matched.join(", "));
            if !candidate.tied_with.is_empty() {
                let others: Vec<&str> =
                    candidate.tied_with.iter().map(|t| t.as_str()).collect();
                evidence.push_str(&format!(
                    "; ambiguous with {}, tie broken lexically",
                    others.join(", ")
                ));
            }
            if confidence.clears(self.config.rule_threshold) {
                debug!(
                    doc_type = %candidate.doc_type,
                    confidence = %confidence,
                    "Rule tier cleared threshold"
                );
                return Ok(Scored::new(
                    candidate.doc_type,
                    confidence,
                    SourceTier::Rule,
                    evidence,
                ));
            }
            best_seen = best_seen.max(confidence.value());
            notes.push(format!(
                "rule below threshold ({} at {})",
                candidate.doc_type, confidence
            ));
        } else {
            notes.push("rule: no keywords matched".to_string());
        }

        debug!(best_seen, "No tier cleared its threshold; unclassified");
        Ok(Scored::new(
            DocumentType::Unclassified,
            Confidence::new(best_seen),
            SourceTier::None,
            notes.join("; "),
        ))
    }

    /// Run the model on a blocking thread under the configured timeout
    ///
    /// An unusable label (the model claiming "unclassified") is folded
    /// into "no opinion" so the rule tier still gets its chance.
    async fn invoke_model(
        &self,
        model: &Arc<M>,
        text: &str,
    ) -> Result<Option<altdoc_domain::traits::ModelLabel>, ClassifierError> {
        let model = Arc::clone(model);
        let text = text.to_string();

        let outcome = timeout(
            self.config.model_timeout(),
            tokio::task::spawn_blocking(move || {
                model
                    .label(&text)
                    .map_err(|e| ClassifierError::TransientModel(e.to_string()))
            }),
        )
        .await;

        let label = match outcome {
            Err(_) => {
                warn!(
                    timeout_secs = self.config.model_timeout_secs,
                    "Model call timed out"
                );
                return Err(ClassifierError::TransientModel(format!(
                    "model call exceeded {}s timeout",
                    self.config.model_timeout_secs
                )));
            }
            Ok(Err(join)) => {
                return Err(ClassifierError::TransientModel(format!(
                    "model task failed: {}",
                    join
                )))
            }
            Ok(Ok(result)) => result?,
        };

        Ok(label.filter(|l| l.doc_type.is_extractable()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockModel;
    use altdoc_domain::traits::ModelLabel;
    use std::time::Duration;

    /// A provider that blocks well past any reasonable timeout.
    struct SlowModel;

    impl ModelProvider for SlowModel {
        type Error = std::convert::Infallible;

        fn label(&self, _text: &str) -> Result<Option<ModelLabel>, Self::Error> {
            std::thread::sleep(Duration::from_secs(3));
            Ok(None)
        }
    }

    const CAPITAL_CALL: &str = "Capital Call Notice\n\
        Fund: ABC-III\n\
        Call Amount: $1,250,000.00\n\
        Call Date: 03/15/2023";

    #[tokio::test]
    async fn test_model_tier_wins_when_confident() {
        let model = MockModel::labeling(DocumentType::ValuationReport, 0.92);
        let classifier = Classifier::new(model, ClassifierConfig::default());
        let layout = Layout::from_text(CAPITAL_CALL);

        let result = classifier.classify(CAPITAL_CALL, &layout).await.unwrap();
        assert_eq!(result.value, DocumentType::ValuationReport);
        assert_eq!(result.tier, SourceTier::Model);
        assert!(result.confidence.clears(0.75));
    }

    #[tokio::test]
    async fn test_weak_model_degrades_to_rules() {
        let model = MockModel::labeling(DocumentType::ValuationReport, 0.4);
        let classifier = Classifier::new(model, ClassifierConfig::default());
        let layout = Layout::from_text(CAPITAL_CALL);

        let result = classifier.classify(CAPITAL_CALL, &layout).await.unwrap();
        assert_eq!(result.value, DocumentType::CapitalCall);
        assert_eq!(result.tier, SourceTier::Rule);
    }

    #[tokio::test]
    async fn test_silent_model_degrades_to_rules() {
        let classifier = Classifier::new(MockModel::silent(), ClassifierConfig::default());
        let layout = Layout::from_text(CAPITAL_CALL);

        let result = classifier.classify(CAPITAL_CALL, &layout).await.unwrap();
        assert_eq!(result.value, DocumentType::CapitalCall);
        assert_eq!(result.tier, SourceTier::Rule);
        assert!(result.evidence.contains("capital call"));
    }

    #[tokio::test]
    async fn test_unrecognizable_text_is_unclassified() {
        let classifier = Classifier::rule_only(ClassifierConfig::default());
        let text = "Dear investor, please find enclosed our annual picnic invitation.";
        let layout = Layout::from_text(text);

        let result = classifier.classify(text, &layout).await.unwrap();
        assert_eq!(result.value, DocumentType::Unclassified);
        assert_eq!(result.tier, SourceTier::None);
    }

    #[tokio::test]
    async fn test_tier_none_iff_unclassified() {
        let classifier = Classifier::rule_only(ClassifierConfig::default());
        for text in [CAPITAL_CALL, "nothing recognizable here"] {
            let layout = Layout::from_text(text);
            let result = classifier.classify(text, &layout).await.unwrap();
            assert_eq!(
                result.tier == SourceTier::None,
                result.value == DocumentType::Unclassified
            );
        }
    }

    #[tokio::test]
    async fn test_model_failure_is_transient_error() {
        let model = MockModel::labeling(DocumentType::CapitalCall, 0.9).failing_first(1);
        let classifier = Classifier::new(model, ClassifierConfig::default());
        let layout = Layout::from_text(CAPITAL_CALL);

        let result = classifier.classify(CAPITAL_CALL, &layout).await;
        assert!(matches!(result, Err(ClassifierError::TransientModel(_))));

        // Second attempt succeeds
        let result = classifier.classify(CAPITAL_CALL, &layout).await.unwrap();
        assert_eq!(result.tier, SourceTier::Model);
    }

    #[tokio::test]
    async fn test_model_timeout_is_transient_error() {
        let mut config = ClassifierConfig::default();
        config.model_timeout_secs = 1;
        let classifier = Classifier::new(SlowModel, config);
        let layout = Layout::from_text(CAPITAL_CALL);

        let result = classifier.classify(CAPITAL_CALL, &layout).await;
        match result {
            Err(ClassifierError::TransientModel(msg)) => {
                assert!(msg.contains("timeout"), "unexpected message: {msg}");
            }
            other => panic!("expected transient model error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_classification_is_deterministic() {
        let classifier = Classifier::rule_only(ClassifierConfig::default());
        let layout = Layout::from_text(CAPITAL_CALL);

        let first = classifier.classify(CAPITAL_CALL, &layout).await.unwrap();
        let second = classifier.classify(CAPITAL_CALL, &layout).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_model_unclassified_label_treated_as_no_opinion() {
        let model = MockModel::labeling(DocumentType::Unclassified, 0.99);
        let classifier = Classifier::new(model, ClassifierConfig::default());
        let layout = Layout::from_text(CAPITAL_CALL);

        let result = classifier.classify(CAPITAL_CALL, &layout).await.unwrap();
        assert_eq!(result.tier, SourceTier::Rule);
        assert_eq!(result.value, DocumentType::CapitalCall);
    }
}
