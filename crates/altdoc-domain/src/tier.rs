//! Source tier attribution for classification and extraction results

use serde::{Deserialize, Serialize};

/// Which strategy produced a result
///
/// The classifier tries tiers in a fixed priority order: the model tier
/// first, the rule tier as fallback. `None` means no tier cleared its
/// threshold; it appears if and only if the document type is unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTier {
    /// Model-based classification or extraction
    Model,

    /// Rule/keyword-based fallback
    Rule,

    /// No tier cleared its threshold
    None,
}

impl SourceTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTier::Model => "model",
            SourceTier::Rule => "rule",
            SourceTier::None => "none",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "model" => Some(SourceTier::Model),
            "rule" => Some(SourceTier::Rule),
            "none" => Some(SourceTier::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SourceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid source tier: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for tier in [SourceTier::Model, SourceTier::Rule, SourceTier::None] {
            assert_eq!(SourceTier::parse(tier.as_str()), Some(tier));
        }
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(SourceTier::parse("ml"), None);
        assert_eq!(SourceTier::parse(""), None);
    }
}
