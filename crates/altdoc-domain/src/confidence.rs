//! Confidence scores and the scored-result envelope

use crate::tier::SourceTier;
use serde::{Deserialize, Serialize};

/// A confidence score clamped to [0.0, 1.0]
///
/// Confidence 0.0 means "not found" for field results; it is never a
/// substitute for omitting the field entirely. Every classification and
/// every field result carries one of these.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// The "not found" score
    pub const ZERO: Confidence = Confidence(0.0);

    /// Full certainty
    pub const FULL: Confidence = Confidence(1.0);

    /// Create a confidence score, clamping out-of-range inputs into [0.0, 1.0]
    ///
    /// NaN is treated as 0.0 so that scores stay totally ordered.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw score
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Multiply by a decay factor, staying clamped
    ///
    /// Used by anchor-proximity extraction: anchor distance and parse
    /// confidence combine multiplicatively.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.0 * factor)
    }

    /// Whether this score means "not found"
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Whether this score clears a threshold
    pub fn clears(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Generic confidence-scored envelope
///
/// The classifier returns `Scored<DocumentType>`; the extractors use
/// `Scored<String>` for raw anchor spans before normalization. The evidence
/// string records how the value was obtained (matched keywords, model label,
/// anchor position) for downstream diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scored<T> {
    /// The scored value
    pub value: T,

    /// Confidence in the value
    pub confidence: Confidence,

    /// Which strategy produced the value
    pub tier: SourceTier,

    /// Free-text rationale or raw source span
    pub evidence: String,
}

impl<T> Scored<T> {
    /// Create a scored value
    pub fn new(value: T, confidence: Confidence, tier: SourceTier, evidence: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            tier,
            evidence: evidence.into(),
        }
    }

    /// Transform the value, keeping score, tier, and evidence
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scored<U> {
        Scored {
            value: f(self.value),
            confidence: self.confidence,
            tier: self.tier,
            evidence: self.evidence,
        }
    }
}
