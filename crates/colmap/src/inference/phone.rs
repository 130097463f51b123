//! Phone-number column detection.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{clamp_confidence, PhoneWeights};
use crate::schema::DatasetAnalysis;

use super::patterns::{has_raw_phone_signal, matched_phone_patterns, phone_score};

/// Header keywords suggesting a phone column. Each hit adds to the score.
pub const PHONE_KEYWORDS: &[&str] = &["phone", "number", "mobile", "contact", "tel", "cell", "whatsapp"];

/// A column ranked by how likely it holds phone numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneColumnSuggestion {
    pub column: String,
    /// Confidence on the 0-100 scale.
    pub confidence: f64,
    /// Labels of the phone shapes matched by at least one sample.
    pub patterns: Vec<String>,
}

/// Scores every column for phone-likelihood.
#[derive(Debug, Clone, Default)]
pub struct PhoneColumnDetector {
    weights: PhoneWeights,
}

impl PhoneColumnDetector {
    /// Create a detector with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom weights.
    pub fn with_config(weights: PhoneWeights) -> Self {
        Self { weights }
    }

    /// Rank columns by phone-likelihood, highest first.
    ///
    /// Every column is returned, including those scoring 0. Ties keep the
    /// input column order.
    pub fn detect(&self, columns: &[String], dataset: &DatasetAnalysis) -> Vec<PhoneColumnSuggestion> {
        let mut suggestions: Vec<PhoneColumnSuggestion> = columns
            .iter()
            .map(|column| self.score_column(column, dataset.samples_for(column)))
            .collect();

        suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        debug!(
            columns = columns.len(),
            best = suggestions.first().map(|s| s.column.as_str()),
            "ranked phone columns"
        );

        suggestions
    }

    /// Score a single column from its name and samples.
    pub fn score_column(&self, column: &str, samples: &[String]) -> PhoneColumnSuggestion {
        let lower = column.to_lowercase();
        let keyword_hits = PHONE_KEYWORDS.iter().filter(|k| lower.contains(*k)).count();

        let mut raw = keyword_hits as f64 * self.weights.keyword_hit;
        raw += self.weights.pattern_rate * phone_score(samples);
        if has_raw_phone_signal(samples) {
            raw += self.weights.raw_signal;
        }

        trace!(column, keyword_hits, raw, "phone score");

        PhoneColumnSuggestion {
            column: column.to_string(),
            confidence: clamp_confidence(raw),
            patterns: matched_phone_patterns(samples),
        }
    }
}

/// Rank columns by phone-likelihood with the default weights.
pub fn detect_phone_columns(columns: &[String], dataset: &DatasetAnalysis) -> Vec<PhoneColumnSuggestion> {
    PhoneColumnDetector::new().detect(columns, dataset)
}
