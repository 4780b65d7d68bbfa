//! Model providers for testing and rule-only operation

use altdoc_domain::traits::{ModelLabel, ModelProvider};
use std::sync::{Arc, Mutex};

/// Provider for rule-only classification: never has an opinion
///
/// Used when no inference backend is wired up (the CLI default); the
/// classifier falls straight through to the rule tier.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModel;

impl ModelProvider for NoModel {
    type Error = std::convert::Infallible;

    fn label(&self, _text: &str) -> Result<Option<ModelLabel>, Self::Error> {
        Ok(None)
    }
}

/// Deterministic mock model for testing
///
/// Returns a pre-configured label without any inference, counts its
/// invocations, and can be told to fail its first N calls to exercise the
/// orchestrator's retry path.
///
/// # Examples
///
/// ```
/// use altdoc_classifier::MockModel;
/// use altdoc_domain::traits::{ModelLabel, ModelProvider};
/// use altdoc_domain::DocumentType;
///
/// let model = MockModel::labeling(DocumentType::CapitalCall, 0.9);
/// let label = model.label("any text").unwrap().unwrap();
/// assert_eq!(label.doc_type, DocumentType::CapitalCall);
/// assert_eq!(model.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockModel {
    response: Option<ModelLabel>,
    fail_first: Arc<Mutex<usize>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockModel {
    /// A model that always returns the given label
    pub fn labeling(doc_type: altdoc_domain::DocumentType, confidence: f64) -> Self {
        Self {
            response: Some(ModelLabel {
                doc_type,
                confidence,
                rationale: format!("mock label {}", doc_type),
            }),
            fail_first: Arc::new(Mutex::new(0)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// A model that never has an opinion
    pub fn silent() -> Self {
        Self {
            response: None,
            fail_first: Arc::new(Mutex::new(0)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Fail the first `n` calls with a transient error, then behave normally
    pub fn failing_first(mut self, n: usize) -> Self {
        self.fail_first = Arc::new(Mutex::new(n));
        self
    }

    /// Number of times `label` was invoked
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl ModelProvider for MockModel {
    type Error = String;

    fn label(&self, _text: &str) -> Result<Option<ModelLabel>, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        let mut remaining = self.fail_first.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            return Err("mock model unavailable".to_string());
        }
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altdoc_domain::DocumentType;

    #[test]
    fn test_failing_first_then_succeeds() {
        let model = MockModel::labeling(DocumentType::ValuationReport, 0.8).failing_first(2);
        assert!(model.label("x").is_err());
        assert!(model.label("x").is_err());
        assert!(model.label("x").unwrap().is_some());
        assert_eq!(model.call_count(), 3);
    }

    #[test]
    fn test_silent_model() {
        let model = MockModel::silent();
        assert_eq!(model.label("x").unwrap(), None);
    }
}
