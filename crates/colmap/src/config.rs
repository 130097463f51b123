//! Tunable weights and thresholds for scoring and validation.
//!
//! Every number the heuristics depend on lives here as a named constant and is
//! carried through a `Default`-able struct with `with_*` overrides.

use serde::{Deserialize, Serialize};

use crate::error::{MapperError, Result};

/// Weight of the header-name signal in a suggestion score.
pub const HEADER_WEIGHT: f64 = 30.0;
/// Weight of the sample-pattern signal in a suggestion score.
pub const SAMPLE_WEIGHT: f64 = 40.0;
/// Weight of the template-context signal in a suggestion score.
pub const CONTEXT_WEIGHT: f64 = 20.0;
/// Weight of the type-fit signal in a suggestion score.
pub const TYPE_WEIGHT: f64 = 10.0;

/// Header score when the column name equals the placeholder label.
pub const HEADER_EXACT: f64 = 1.0;
/// Header score when either name contains the other.
pub const HEADER_PARTIAL: f64 = 0.7;
/// Header score when the column name hits the label's keyword table.
pub const HEADER_KEYWORD: f64 = 0.5;

/// Context score when the column name appears in the template context.
pub const CONTEXT_NAME: f64 = 0.8;
/// Context score when a cue word in the context points at the column.
pub const CONTEXT_KEYWORD: f64 = 0.6;

/// Points per phone keyword found in a column name.
pub const PHONE_KEYWORD_WEIGHT: f64 = 30.0;
/// Points scaled by the fraction of samples matching a phone pattern.
pub const PHONE_PATTERN_WEIGHT: f64 = 50.0;
/// Bonus when the raw samples contain a `+` or a long digit run.
pub const PHONE_RAW_SIGNAL_WEIGHT: f64 = 20.0;

/// Minimum confidence for the "exact" suggestion tier.
pub const EXACT_TIER_THRESHOLD: f64 = 90.0;
/// Minimum confidence for the "partial" suggestion tier.
pub const PARTIAL_TIER_THRESHOLD: f64 = 70.0;
/// Minimum confidence at which a suggestion is applied automatically.
pub const AUTO_APPLY_THRESHOLD: f64 = 80.0;
/// Phone suggestions below this confidence get an advisory message.
pub const PHONE_ADVISORY_THRESHOLD: f64 = 70.0;
/// Per-placeholder priors below this raise a low-confidence warning.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 50.0;

/// Upper bound of every confidence value.
pub const MAX_CONFIDENCE: f64 = 100.0;

/// Weights for the per-(placeholder, column) suggestion score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestionWeights {
    pub header: f64,
    pub sample: f64,
    pub context: f64,
    pub type_fit: f64,
    /// Sub-scores for the header signal.
    pub header_scores: HeaderScores,
    /// Sub-scores for the context signal.
    pub context_scores: ContextScores,
}

impl Default for SuggestionWeights {
    fn default() -> Self {
        Self {
            header: HEADER_WEIGHT,
            sample: SAMPLE_WEIGHT,
            context: CONTEXT_WEIGHT,
            type_fit: TYPE_WEIGHT,
            header_scores: HeaderScores::default(),
            context_scores: ContextScores::default(),
        }
    }
}

impl SuggestionWeights {
    /// Override the header weight.
    pub fn with_header(mut self, weight: f64) -> Self {
        self.header = weight;
        self
    }

    /// Override the sample weight.
    pub fn with_sample(mut self, weight: f64) -> Self {
        self.sample = weight;
        self
    }

    /// Override the context weight.
    pub fn with_context(mut self, weight: f64) -> Self {
        self.context = weight;
        self
    }

    /// Override the type-fit weight.
    pub fn with_type_fit(mut self, weight: f64) -> Self {
        self.type_fit = weight;
        self
    }
}

/// Header-name match strengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaderScores {
    pub exact: f64,
    pub partial: f64,
    pub keyword: f64,
}

impl Default for HeaderScores {
    fn default() -> Self {
        Self {
            exact: HEADER_EXACT,
            partial: HEADER_PARTIAL,
            keyword: HEADER_KEYWORD,
        }
    }
}

/// Template-context match strengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextScores {
    pub name_in_context: f64,
    pub keyword: f64,
}

impl Default for ContextScores {
    fn default() -> Self {
        Self {
            name_in_context: CONTEXT_NAME,
            keyword: CONTEXT_KEYWORD,
        }
    }
}

/// Weights for phone-column detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhoneWeights {
    pub keyword_hit: f64,
    pub pattern_rate: f64,
    pub raw_signal: f64,
}

impl Default for PhoneWeights {
    fn default() -> Self {
        Self {
            keyword_hit: PHONE_KEYWORD_WEIGHT,
            pattern_rate: PHONE_PATTERN_WEIGHT,
            raw_signal: PHONE_RAW_SIGNAL_WEIGHT,
        }
    }
}

/// Decision thresholds, all on the 0-100 confidence scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub exact_tier: f64,
    pub partial_tier: f64,
    pub auto_apply: f64,
    pub phone_advisory: f64,
    pub low_confidence: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            exact_tier: EXACT_TIER_THRESHOLD,
            partial_tier: PARTIAL_TIER_THRESHOLD,
            auto_apply: AUTO_APPLY_THRESHOLD,
            phone_advisory: PHONE_ADVISORY_THRESHOLD,
            low_confidence: LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Override the auto-apply threshold.
    pub fn with_auto_apply(mut self, threshold: f64) -> Self {
        self.auto_apply = threshold;
        self
    }
}

/// Configuration for the whole mapping pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Suggestion scoring weights.
    pub suggestion: SuggestionWeights,
    /// Phone detection weights.
    pub phone: PhoneWeights,
    /// Decision thresholds.
    pub thresholds: Thresholds,
    /// Report sample/type disagreement as a blocking `type_mismatch` error
    /// instead of a `potential_issue` warning.
    pub strict_types: bool,
}

impl MapperConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set suggestion weights.
    pub fn with_suggestion_weights(mut self, weights: SuggestionWeights) -> Self {
        self.suggestion = weights;
        self
    }

    /// Set phone detection weights.
    pub fn with_phone_weights(mut self, weights: PhoneWeights) -> Self {
        self.phone = weights;
        self
    }

    /// Set decision thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Enable or disable strict type checking in validation.
    pub fn with_strict_types(mut self, strict: bool) -> Self {
        self.strict_types = strict;
        self
    }

    /// Reject weights that are negative or not finite and thresholds
    /// outside `[0, 100]`.
    pub fn validate(&self) -> Result<()> {
        let s = &self.suggestion;
        let weights = [
            ("suggestion.header", s.header),
            ("suggestion.sample", s.sample),
            ("suggestion.context", s.context),
            ("suggestion.type_fit", s.type_fit),
            ("suggestion.header_scores.exact", s.header_scores.exact),
            ("suggestion.header_scores.partial", s.header_scores.partial),
            ("suggestion.header_scores.keyword", s.header_scores.keyword),
            ("suggestion.context_scores.name_in_context", s.context_scores.name_in_context),
            ("suggestion.context_scores.keyword", s.context_scores.keyword),
            ("phone.keyword_hit", self.phone.keyword_hit),
            ("phone.pattern_rate", self.phone.pattern_rate),
            ("phone.raw_signal", self.phone.raw_signal),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(MapperError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let t = &self.thresholds;
        let thresholds = [
            ("thresholds.exact_tier", t.exact_tier),
            ("thresholds.partial_tier", t.partial_tier),
            ("thresholds.auto_apply", t.auto_apply),
            ("thresholds.phone_advisory", t.phone_advisory),
            ("thresholds.low_confidence", t.low_confidence),
        ];
        for (name, value) in thresholds {
            if !(0.0..=MAX_CONFIDENCE).contains(&value) {
                return Err(MapperError::Config(format!(
                    "{} must be between 0 and {}, got {}",
                    name, MAX_CONFIDENCE, value
                )));
            }
        }

        Ok(())
    }
}

/// Clamp a raw score into `[0, 100]`. NaN scores 0.
///
/// Fractions are kept; thresholds compare against the unrounded score.
pub(crate) fn clamp_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_CONFIDENCE)
}
