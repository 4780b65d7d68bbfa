//! Configuration for the classifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the multi-tier classifier
///
/// Thresholds and weights are configuration, not constants: deployments
/// tune them against their own document mix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum model-tier confidence to accept its label
    pub model_threshold: f64,

    /// Minimum rule-tier score to accept its candidate
    pub rule_threshold: f64,

    /// Score contributed by each keyword/phrase hit in the rule tier
    pub rule_hit_weight: f64,

    /// Extra weight multiplier for hits within the title region
    pub title_weight: f64,

    /// Number of leading layout lines treated as the title region
    pub title_lines: usize,

    /// Ceiling for a single model invocation (seconds)
    pub model_timeout_secs: u64,
}

impl ClassifierConfig {
    /// Get the model timeout as a Duration
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("model_threshold", self.model_threshold),
            ("rule_threshold", self.rule_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be in [0.0, 1.0], got {}", name, value));
            }
        }
        if self.rule_hit_weight <= 0.0 {
            return Err("rule_hit_weight must be greater than 0".to_string());
        }
        if self.title_weight < 1.0 {
            return Err("title_weight must be at least 1.0".to_string());
        }
        if self.model_timeout_secs == 0 {
            return Err("model_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_threshold: 0.75,
            rule_threshold: 0.55,
            rule_hit_weight: 0.25,
            title_weight: 2.0,
            title_lines: 5,
            model_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ClassifierConfig::default().validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        let mut config = ClassifierConfig::default();
        config.model_threshold = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ClassifierConfig::default();
        config.model_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClassifierConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = ClassifierConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config.model_threshold, parsed.model_threshold);
        assert_eq!(config.rule_threshold, parsed.rule_threshold);
    }
}
