//! Composed pipeline configuration

use altdoc_classifier::ClassifierConfig;
use altdoc_extractor::ExtractorConfig;
use altdoc_validator::ValidatorConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the orchestrator and its stages
///
/// The per-stage sections reuse each crate's own config struct, so a TOML
/// file configures the whole pipeline in one place:
///
/// ```toml
/// max_retries = 3
/// retry_backoff_ms = 250
/// workers = 4
///
/// [classifier]
/// model_threshold = 0.75
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Retry cap for transient model failures (initial try not counted)
    pub max_retries: u32,

    /// Base backoff between retries; doubles per attempt
    pub retry_backoff_ms: u64,

    /// Worker-pool size for concurrent document processing
    pub workers: usize,

    /// Classifier stage configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Extractor stage configuration
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Validator stage configuration
    #[serde(default)]
    pub validator: ValidatorConfig,
}

impl PipelineConfig {
    /// Backoff before retry number `attempt` (0-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(1 << attempt.min(16)))
    }

    /// Validate the configuration, stage sections included
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("workers must be greater than 0".to_string());
        }
        self.classifier.validate()?;
        self.extractor.validate()?;
        self.validator.validate()?;
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_backoff_ms: 250,
            workers: 4,
            classifier: ClassifierConfig::default(),
            extractor: ExtractorConfig::default(),
            validator: ValidatorConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = PipelineConfig::default();
        config.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_doubles() {
        let config = PipelineConfig::default();
        assert_eq!(config.backoff(0), Duration::from_millis(250));
        assert_eq!(config.backoff(1), Duration::from_millis(500));
        assert_eq!(config.backoff(2), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_toml_uses_stage_defaults() {
        let config = PipelineConfig::from_toml(
            "max_retries = 5\nretry_backoff_ms = 100\nworkers = 2\n",
        )
        .unwrap();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.classifier.model_threshold, 0.75);
        assert_eq!(config.validator.confidence_floor, 0.4);
    }

    #[test]
    fn test_invalid_stage_section_rejected() {
        let config = PipelineConfig::from_toml(
            "max_retries = 3\nretry_backoff_ms = 100\nworkers = 2\n\n[classifier]\nmodel_threshold = 3.0\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
