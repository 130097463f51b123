//! Suggestion types for proposed placeholder-to-column assignments.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;

/// Strength bucket of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionTier {
    /// Confidence at or above the exact threshold (90 by default).
    Exact,
    /// Confidence at or above the partial threshold (70 by default).
    Partial,
    /// Anything weaker.
    Inferred,
}

impl SuggestionTier {
    /// Bucket a confidence value.
    pub fn from_confidence(confidence: f64, thresholds: &Thresholds) -> Self {
        if confidence >= thresholds.exact_tier {
            SuggestionTier::Exact
        } else if confidence >= thresholds.partial_tier {
            SuggestionTier::Partial
        } else {
            SuggestionTier::Inferred
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionTier::Exact => "Exact",
            SuggestionTier::Partial => "Partial",
            SuggestionTier::Inferred => "Inferred",
        }
    }
}

/// A candidate column for one placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingSuggestion {
    /// Candidate column name.
    pub column: String,
    /// Confidence on the 0-100 scale.
    pub confidence: f64,
    /// Why this column was suggested.
    pub reason: String,
    pub tier: SuggestionTier,
}

impl MappingSuggestion {
    /// Create a suggestion, bucketing it with the given thresholds.
    pub fn new(
        column: impl Into<String>,
        confidence: f64,
        reason: impl Into<String>,
        thresholds: &Thresholds,
    ) -> Self {
        Self {
            column: column.into(),
            confidence,
            reason: reason.into(),
            tier: SuggestionTier::from_confidence(confidence, thresholds),
        }
    }
}

/// Ranked suggestions per placeholder index, in placeholder order.
pub type SuggestionMap = IndexMap<u32, Vec<MappingSuggestion>>;
