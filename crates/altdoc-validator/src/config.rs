//! Configuration for the validator

use serde::{Deserialize, Serialize};

/// Configuration for the validation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Fields found below this confidence draw a warning
    pub confidence_floor: f64,
}

impl ValidatorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(format!(
                "confidence_floor must be in [0.0, 1.0], got {}",
                self.confidence_floor
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            confidence_floor: 0.4,
        }
    }
}
