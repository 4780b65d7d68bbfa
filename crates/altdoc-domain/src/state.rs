//! Pipeline state machine states and legal transitions

use serde::{Deserialize, Serialize};

/// Processing state of a document
///
/// Legal transitions:
///
/// ```text
/// ingested -> classifying -> classified -> extracting -> extracted -> validating -> stored
///                                       \______________(unclassified)____________/
/// ```
///
/// plus `-> failed` from any non-terminal state. `stored` is terminal;
/// `failed` is terminal once retries are exhausted (tracked by the
/// orchestrator, not the state itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    /// Raw text/layout received from upstream
    Ingested,
    /// Classification in progress
    Classifying,
    /// Document type assigned (possibly unclassified)
    Classified,
    /// Field extraction in progress
    Extracting,
    /// Field results gathered
    Extracted,
    /// Validation in progress
    Validating,
    /// Terminal success
    Stored,
    /// Terminal failure for this attempt
    Failed,
}

impl PipelineState {
    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Ingested => "ingested",
            PipelineState::Classifying => "classifying",
            PipelineState::Classified => "classified",
            PipelineState::Extracting => "extracting",
            PipelineState::Extracted => "extracted",
            PipelineState::Validating => "validating",
            PipelineState::Stored => "stored",
            PipelineState::Failed => "failed",
        }
    }

    /// Whether this state ends processing
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Stored | PipelineState::Failed)
    }

    /// Whether a transition from this state to `next` is legal
    ///
    /// `Classified -> Validating` covers the unclassified short-circuit:
    /// documents with no determinable type skip extraction entirely.
    pub fn can_transition_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        if self.is_terminal() {
            return false;
        }
        if next == Failed {
            return true;
        }
        matches!(
            (self, next),
            (Ingested, Classifying)
                | (Classifying, Classified)
                | (Classified, Extracting)
                | (Classified, Validating)
                | (Extracting, Extracted)
                | (Extracted, Validating)
                | (Validating, Stored)
        )
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PipelineState::*;

    #[test]
    fn test_happy_path_is_legal() {
        let path = [Ingested, Classifying, Classified, Extracting, Extracted, Validating, Stored];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_unclassified_short_circuit() {
        assert!(Classified.can_transition_to(Validating));
    }

    #[test]
    fn test_failed_from_any_non_terminal() {
        for state in [Ingested, Classifying, Classified, Extracting, Extracted, Validating] {
            assert!(state.can_transition_to(Failed));
        }
    }

    #[test]
    fn test_terminal_states_are_sealed() {
        assert!(!Stored.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Classifying));
        assert!(!Stored.can_transition_to(Validating));
    }

    #[test]
    fn test_no_skipping_states() {
        assert!(!Ingested.can_transition_to(Classified));
        assert!(!Classifying.can_transition_to(Extracting));
        assert!(!Extracting.can_transition_to(Validating));
    }
}
