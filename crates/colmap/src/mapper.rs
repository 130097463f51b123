//! Main Mapper struct and public API.

use serde::Serialize;
use tracing::info;

use crate::config::MapperConfig;
use crate::inference::{PhoneColumnDetector, PhoneColumnSuggestion};
use crate::schema::{ColumnMapping, DatasetAnalysis, TemplateVariablePlaceholder};
use crate::suggestion::{SuggestionEngine, SuggestionMap};
use crate::validation::{validate_csv_structure, CheckOutcome, MappingValidator, ValidationResult};

/// Everything needed to present an initial mapping to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct MappingProposal {
    /// Ranked column candidates per placeholder.
    pub suggestions: SuggestionMap,
    /// Columns ranked by phone-likelihood.
    pub phone_columns: Vec<PhoneColumnSuggestion>,
    /// Auto-applied mapping.
    pub mapping: ColumnMapping,
    /// Validation of the auto-applied mapping.
    pub validation: ValidationResult,
    /// Dataset shape check.
    pub structure: CheckOutcome,
    pub summary: ProposalSummary,
}

/// Counts for a one-line status display.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalSummary {
    pub total_placeholders: usize,
    pub auto_applied: usize,
    /// Required placeholders still without a column.
    pub unmapped_required: usize,
    /// Top phone column, when any column scored above 0.
    pub phone_column: Option<String>,
}

/// The mapping pipeline: suggest, detect phone column, auto-apply, validate.
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    config: MapperConfig,
}

impl Mapper {
    /// Create a Mapper with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Mapper with custom configuration.
    pub fn with_config(config: MapperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Rank candidate columns for every placeholder.
    pub fn suggest(
        &self,
        placeholders: &[TemplateVariablePlaceholder],
        dataset: &DatasetAnalysis,
    ) -> SuggestionMap {
        self.suggestion_engine().generate(placeholders, dataset)
    }

    /// Rank dataset columns by phone-likelihood.
    pub fn detect_phone_columns(&self, dataset: &DatasetAnalysis) -> Vec<PhoneColumnSuggestion> {
        PhoneColumnDetector::with_config(self.config.phone).detect(&dataset.columns, dataset)
    }

    /// Apply top suggestions at the configured threshold.
    pub fn auto_apply(
        &self,
        placeholders: &[TemplateVariablePlaceholder],
        suggestions: &SuggestionMap,
    ) -> ColumnMapping {
        SuggestionEngine::auto_apply(placeholders, suggestions, self.config.thresholds.auto_apply)
    }

    /// Validate a mapping, e.g. after the operator edited it.
    pub fn revalidate(
        &self,
        mapping: &ColumnMapping,
        placeholders: &[TemplateVariablePlaceholder],
        dataset: &DatasetAnalysis,
    ) -> ValidationResult {
        MappingValidator::with_config(&self.config).validate(
            mapping,
            placeholders,
            &dataset.columns,
            Some(dataset),
        )
    }

    /// Run the whole pipeline and produce an initial proposal.
    pub fn propose(
        &self,
        placeholders: &[TemplateVariablePlaceholder],
        dataset: &DatasetAnalysis,
    ) -> MappingProposal {
        let suggestions = self.suggest(placeholders, dataset);
        let phone_columns = self.detect_phone_columns(dataset);
        let mapping = self.auto_apply(placeholders, &suggestions);
        let validation = self.revalidate(&mapping, placeholders, dataset);
        let structure = validate_csv_structure(dataset, placeholders);

        let summary = ProposalSummary {
            total_placeholders: placeholders.len(),
            auto_applied: mapping.len(),
            unmapped_required: placeholders
                .iter()
                .filter(|p| p.required && !mapping.is_mapped(p.index))
                .count(),
            phone_column: phone_columns
                .first()
                .filter(|p| p.confidence > 0.0)
                .map(|p| p.column.clone()),
        };

        info!(
            placeholders = summary.total_placeholders,
            auto_applied = summary.auto_applied,
            valid = validation.is_valid(),
            "built mapping proposal"
        );

        MappingProposal {
            suggestions,
            phone_columns,
            mapping,
            validation,
            structure,
            summary,
        }
    }

    fn suggestion_engine(&self) -> SuggestionEngine {
        SuggestionEngine::with_config(self.config.suggestion, self.config.thresholds)
    }
}
