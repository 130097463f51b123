//! Heuristic scoring of (placeholder, column) pairs and auto-apply.
//!
//! For every placeholder and candidate column:
//!
//! ```text
//! confidence = clamp(0, 100,
//!       prior(placeholder)
//!     + header_weight  * header_score
//!     + sample_weight  * type_score(samples)
//!     + context_weight * context_score
//!     + type_weight    * type_score(samples))
//! ```
//!
//! The prior comes from the ingester and is keyed by placeholder only, so it
//! lifts every candidate column of that placeholder by the same amount.

use tracing::{debug, trace, warn};

use crate::config::{clamp_confidence, SuggestionWeights, Thresholds, AUTO_APPLY_THRESHOLD};
use crate::inference::type_score;
use crate::schema::{ColumnMapping, DatasetAnalysis, TemplateVariablePlaceholder};

use super::keywords::{context_keywords, header_keywords, normalize};
use super::{MappingSuggestion, SuggestionMap};

/// Scores columns against placeholders and reduces rankings to a mapping.
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    weights: SuggestionWeights,
    thresholds: Thresholds,
}

/// Component scores for one pair, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
struct PairScore {
    header: f64,
    sample: f64,
    context: f64,
}

impl SuggestionEngine {
    /// Create an engine with default weights and thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom weights and thresholds.
    pub fn with_config(weights: SuggestionWeights, thresholds: Thresholds) -> Self {
        Self { weights, thresholds }
    }

    /// Rank candidate columns for every placeholder.
    ///
    /// Each placeholder gets an entry; columns scoring 0 are left out, so an
    /// entry may be empty. Ties keep dataset column order.
    pub fn generate(
        &self,
        placeholders: &[TemplateVariablePlaceholder],
        dataset: &DatasetAnalysis,
    ) -> SuggestionMap {
        debug!(
            placeholders = placeholders.len(),
            columns = dataset.column_count(),
            "generating mapping suggestions"
        );

        if !placeholders.is_empty()
            && placeholders
                .iter()
                .all(|p| dataset.prior(p.index).unwrap_or(0.0) <= 0.0)
        {
            warn!("no placeholder has a prior confidence; suggestions rely on column evidence only");
        }

        placeholders
            .iter()
            .map(|placeholder| (placeholder.index, self.rank_columns(placeholder, dataset)))
            .collect()
    }

    /// Rank every column for a single placeholder.
    pub fn rank_columns(
        &self,
        placeholder: &TemplateVariablePlaceholder,
        dataset: &DatasetAnalysis,
    ) -> Vec<MappingSuggestion> {
        let prior = dataset.prior(placeholder.index).unwrap_or(0.0);

        let mut ranked: Vec<MappingSuggestion> = dataset
            .columns
            .iter()
            .filter_map(|column| {
                let scores = self.score_pair(placeholder, column, dataset.samples_for(column));
                let confidence = clamp_confidence(prior + self.weighted(&scores));
                trace!(
                    index = placeholder.index,
                    column = column.as_str(),
                    header = scores.header,
                    sample = scores.sample,
                    context = scores.context,
                    confidence,
                    "scored pair"
                );

                (confidence > 0.0).then(|| {
                    MappingSuggestion::new(
                        column.clone(),
                        confidence,
                        Self::reason(placeholder, &scores, prior),
                        &self.thresholds,
                    )
                })
            })
            .collect();

        // Stable: equal confidences keep column order.
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        ranked
    }

    /// Reduce rankings to an initial mapping.
    ///
    /// A placeholder is assigned its top suggestion only when that suggestion
    /// reaches `threshold`. Two placeholders may receive the same column; the
    /// validator reports that as a duplicate.
    pub fn auto_apply(
        placeholders: &[TemplateVariablePlaceholder],
        suggestions: &SuggestionMap,
        threshold: f64,
    ) -> ColumnMapping {
        let mut mapping = ColumnMapping::new();

        for placeholder in placeholders {
            let Some(top) = suggestions.get(&placeholder.index).and_then(|s| s.first()) else {
                debug!(index = placeholder.index, "no suggestion to apply");
                continue;
            };

            if top.confidence >= threshold {
                debug!(
                    index = placeholder.index,
                    column = top.column.as_str(),
                    confidence = top.confidence,
                    "auto-applied suggestion"
                );
                mapping.assign(placeholder.index, top.column.clone());
            } else {
                debug!(
                    index = placeholder.index,
                    column = top.column.as_str(),
                    confidence = top.confidence,
                    threshold,
                    "top suggestion below threshold"
                );
            }
        }

        mapping
    }

    fn weighted(&self, scores: &PairScore) -> f64 {
        self.weights.header * scores.header
            + self.weights.sample * scores.sample
            + self.weights.context * scores.context
            // Same evidence as the sample score, counted again at its own weight.
            + self.weights.type_fit * scores.sample
    }

    fn score_pair(
        &self,
        placeholder: &TemplateVariablePlaceholder,
        column: &str,
        samples: &[String],
    ) -> PairScore {
        PairScore {
            header: self.header_score(&placeholder.label, column),
            sample: type_score(placeholder.placeholder_type, samples),
            context: self.context_score(&placeholder.context, column),
        }
    }

    /// 1.0 exact name match, 0.7 substring either way, 0.5 keyword hit.
    fn header_score(&self, label: &str, column: &str) -> f64 {
        let scores = &self.weights.header_scores;
        let label_norm = normalize(label);
        let column_norm = normalize(column);

        if label_norm.is_empty() || column_norm.is_empty() {
            return 0.0;
        }
        if label_norm == column_norm {
            return scores.exact;
        }
        if label_norm.contains(&column_norm) || column_norm.contains(&label_norm) {
            return scores.partial;
        }

        match header_keywords(label) {
            Some(keywords) if keywords.iter().any(|k| column_norm.contains(k)) => scores.keyword,
            _ => 0.0,
        }
    }

    /// 0.8 if the column name appears in the context, 0.6 on a cue keyword.
    fn context_score(&self, context: &str, column: &str) -> f64 {
        let scores = &self.weights.context_scores;
        let column_norm = normalize(column);

        if column_norm.is_empty() || context.trim().is_empty() {
            return 0.0;
        }
        if normalize(context).contains(&column_norm) {
            return scores.name_in_context;
        }
        if context_keywords(context)
            .iter()
            .any(|k| column_norm.contains(k))
        {
            return scores.keyword;
        }
        0.0
    }

    fn reason(placeholder: &TemplateVariablePlaceholder, scores: &PairScore, prior: f64) -> String {
        let mut parts = Vec::new();

        if scores.header >= 1.0 {
            parts.push("column name matches label exactly".to_string());
        } else if scores.header >= 0.7 {
            parts.push("column name overlaps label".to_string());
        } else if scores.header > 0.0 {
            parts.push("column name contains a label keyword".to_string());
        }

        if scores.sample > 0.0 {
            parts.push(format!(
                "{:.0}% of samples look like {}",
                scores.sample * 100.0,
                placeholder.placeholder_type.label()
            ));
        }

        if scores.context >= 0.8 {
            parts.push("column named in template context".to_string());
        } else if scores.context > 0.0 {
            parts.push("template context hints at this column".to_string());
        }

        if prior > 0.0 {
            parts.push(format!("base confidence {:.0}", prior));
        }

        if parts.is_empty() {
            "weak match".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// Rank candidate columns for every placeholder with default weights.
pub fn generate_suggestions(
    placeholders: &[TemplateVariablePlaceholder],
    dataset: &DatasetAnalysis,
) -> SuggestionMap {
    SuggestionEngine::new().generate(placeholders, dataset)
}

/// Apply each placeholder's top suggestion when it reaches `threshold`.
pub fn auto_apply_mappings(
    placeholders: &[TemplateVariablePlaceholder],
    suggestions: &SuggestionMap,
    threshold: f64,
) -> ColumnMapping {
    SuggestionEngine::auto_apply(placeholders, suggestions, threshold)
}

/// [`auto_apply_mappings`] at the default threshold of 80.
pub fn auto_apply_default(
    placeholders: &[TemplateVariablePlaceholder],
    suggestions: &SuggestionMap,
) -> ColumnMapping {
    auto_apply_mappings(placeholders, suggestions, AUTO_APPLY_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Thresholds;
    use crate::schema::PlaceholderType;
    use crate::suggestion::SuggestionTier;

    fn customer_name() -> TemplateVariablePlaceholder {
        TemplateVariablePlaceholder::new(1, "Customer Name").with_context("Hi NAME")
    }

    fn dataset() -> DatasetAnalysis {
        DatasetAnalysis::new(["Name", "Phone"])
            .with_samples("Name", ["Alice", "Bob"])
            .with_samples("Phone", ["+919999999999", "+918888888888"])
            .with_confidence(1, 60.0)
    }

    #[test]
    fn test_name_ranks_above_phone() {
        let suggestions = generate_suggestions(&[customer_name()], &dataset());
        let ranked = &suggestions[&1];

        assert_eq!(ranked[0].column, "Name");
        assert_eq!(ranked[0].confidence, 100.0);
        assert_eq!(ranked[0].tier, SuggestionTier::Exact);
        // Phone only carries the prior.
        assert_eq!(ranked[1].column, "Phone");
        assert_eq!(ranked[1].confidence, 60.0);
        assert_eq!(ranked[1].tier, SuggestionTier::Inferred);
    }

    #[test]
    fn test_header_scores() {
        let engine = SuggestionEngine::new();
        assert_eq!(engine.header_score("Customer Name", "customer_name"), 1.0);
        assert_eq!(engine.header_score("Customer Name", "Name"), 0.7);
        assert_eq!(engine.header_score("Customer Name", "Client"), 0.5);
        assert_eq!(engine.header_score("Customer Name", "Phone"), 0.0);
        assert_eq!(engine.header_score("Favourite Colour", "Colour Code"), 0.0);
        assert_eq!(engine.header_score("", "Name"), 0.0);
    }

    #[test]
    fn test_context_scores() {
        let engine = SuggestionEngine::new();
        assert_eq!(engine.context_score("Your city is {{2}}", "City"), 0.8);
        assert_eq!(engine.context_score("Please pay {{3}} today", "Total Due"), 0.6);
        assert_eq!(engine.context_score("Please pay {{3}} today", "Name"), 0.0);
        assert_eq!(engine.context_score("", "Name"), 0.0);
    }

    #[test]
    fn test_zero_scores_are_dropped() {
        let placeholder = TemplateVariablePlaceholder::new(2, "Expiry")
            .with_type(PlaceholderType::Date);
        let ds = DatasetAnalysis::new(["Name"]).with_samples("Name", ["Alice"]);

        let suggestions = generate_suggestions(&[placeholder], &ds);
        assert!(suggestions[&2].is_empty());
    }

    #[test]
    fn test_ties_keep_column_order() {
        let placeholder = TemplateVariablePlaceholder::new(1, "Note");
        let ds = DatasetAnalysis::new(["B", "A"])
            .with_samples("B", ["x"])
            .with_samples("A", ["y"]);

        let ranked = SuggestionEngine::new().rank_columns(&placeholder, &ds);
        assert_eq!(ranked[0].column, "B");
        assert_eq!(ranked[1].column, "A");
        assert_eq!(ranked[0].confidence, ranked[1].confidence);
    }

    #[test]
    fn test_auto_apply_respects_threshold() {
        let placeholders = vec![customer_name(), TemplateVariablePlaceholder::new(2, "Unknown")];
        let mut suggestions = generate_suggestions(&placeholders, &dataset());
        suggestions.insert(2, Vec::new());

        let mapping = auto_apply_mappings(&placeholders, &suggestions, 80.0);
        assert_eq!(mapping.get(1), Some("Name"));
        assert_eq!(mapping.get(2), None);

        let strict = auto_apply_mappings(&placeholders, &suggestions, 101.0);
        assert!(strict.is_empty());
    }

    #[test]
    fn test_auto_apply_allows_shared_top_column() {
        let placeholders = vec![
            TemplateVariablePlaceholder::new(1, "Name"),
            TemplateVariablePlaceholder::new(2, "Customer Name"),
        ];
        let ds = DatasetAnalysis::new(["Name"])
            .with_samples("Name", ["Alice"])
            .with_confidence(1, 60.0)
            .with_confidence(2, 60.0);

        let suggestions = generate_suggestions(&placeholders, &ds);
        let mapping = auto_apply_default(&placeholders, &suggestions);

        assert_eq!(mapping.get(1), Some("Name"));
        assert_eq!(mapping.get(2), Some("Name"));
    }

    #[test]
    fn test_fractional_score_not_rounded_across_threshold() {
        let placeholder = TemplateVariablePlaceholder::new(1, "Zzz");
        let ds = DatasetAnalysis::new(["Col"])
            .with_samples("Col", ["x"])
            .with_confidence(1, 29.5);

        // 29.5 prior + 40 sample + 10 type fit
        let suggestions = generate_suggestions(&[placeholder.clone()], &ds);
        assert_eq!(suggestions[&1][0].confidence, 79.5);
        assert!(auto_apply_mappings(&[placeholder.clone()], &suggestions, 80.0).is_empty());

        let ds = ds.with_confidence(1, 39.6);
        let ranked = SuggestionEngine::new().rank_columns(&placeholder, &ds);
        assert!(ranked[0].confidence < 90.0);
        assert_eq!(ranked[0].tier, SuggestionTier::Partial);
    }

    #[test]
    fn test_custom_weights() {
        let weights = SuggestionWeights::default()
            .with_header(0.0)
            .with_sample(0.0)
            .with_context(0.0)
            .with_type_fit(0.0);
        let engine = SuggestionEngine::with_config(weights, Thresholds::default());

        let ranked = engine.rank_columns(&customer_name(), &dataset());
        assert!(ranked.iter().all(|s| s.confidence == 60.0));
    }
}
