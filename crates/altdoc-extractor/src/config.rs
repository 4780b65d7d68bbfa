//! Configuration for anchor-proximity extraction

use serde::{Deserialize, Serialize};

/// Tunable parameters for the extractors
///
/// The decay parameters shape how confidence falls off with the distance
/// (in layout lines) between an anchor label and the value found near it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Confidence lost per line of distance from the anchor label
    pub anchor_decay_per_line: f64,

    /// Floor for anchor-distance decay
    pub anchor_decay_floor: f64,

    /// Base confidence for pattern fallbacks with no anchor label
    pub pattern_confidence: f64,

    /// How many lines below an anchor label to scan for a value
    pub label_scan_lines: usize,
}

impl ExtractorConfig {
    /// Decay factor for a value found `distance` lines from its anchor
    pub fn anchor_decay(&self, distance: usize) -> f64 {
        (1.0 - self.anchor_decay_per_line * distance as f64).max(self.anchor_decay_floor)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.anchor_decay_per_line) {
            return Err("anchor_decay_per_line must be in [0.0, 1.0]".to_string());
        }
        if !(0.0..=1.0).contains(&self.anchor_decay_floor) {
            return Err("anchor_decay_floor must be in [0.0, 1.0]".to_string());
        }
        if !(0.0..=1.0).contains(&self.pattern_confidence) {
            return Err("pattern_confidence must be in [0.0, 1.0]".to_string());
        }
        if self.label_scan_lines == 0 {
            return Err("label_scan_lines must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            anchor_decay_per_line: 0.15,
            anchor_decay_floor: 0.5,
            pattern_confidence: 0.6,
            label_scan_lines: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_decay_curve() {
        let config = ExtractorConfig::default();
        assert_eq!(config.anchor_decay(0), 1.0);
        assert!((config.anchor_decay(1) - 0.85).abs() < 1e-9);
        assert_eq!(config.anchor_decay(10), 0.5);
    }

    #[test]
    fn test_invalid_decay() {
        let mut config = ExtractorConfig::default();
        config.anchor_decay_per_line = 1.5;
        assert!(config.validate().is_err());
    }
}
