//! Structural checks over a placeholder-to-column mapping.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::{MapperConfig, Thresholds};
use crate::inference::type_score;
use crate::schema::{ColumnMapping, DatasetAnalysis, TemplateVariablePlaceholder};

use super::issue::{ErrorKind, MappingError, MappingWarning, ValidationResult, WarningKind};

/// Everything a rule may look at.
pub struct MappingContext<'a> {
    pub mapping: &'a ColumnMapping,
    pub placeholders: &'a [TemplateVariablePlaceholder],
    pub columns: &'a [String],
    /// Ingester output, when available. Supplies priors and samples.
    pub dataset: Option<&'a DatasetAnalysis>,
    pub thresholds: &'a Thresholds,
    pub strict_types: bool,
}

impl MappingContext<'_> {
    fn placeholder(&self, index: u32) -> Option<&TemplateVariablePlaceholder> {
        self.placeholders.iter().find(|p| p.index == index)
    }

    fn describe(&self, index: u32) -> String {
        match self.placeholder(index) {
            Some(p) if !p.label.trim().is_empty() => format!("'{}' ({})", p.label, p.token()),
            Some(p) => p.token(),
            None => format!("{{{{{}}}}}", index),
        }
    }

    /// Non-blank mapping entries in insertion order.
    fn mapped(&self) -> impl Iterator<Item = (u32, &str)> {
        self.mapping.iter().filter(|(_, c)| !c.trim().is_empty())
    }
}

/// A single mapping check.
pub trait MappingRule {
    /// Append any findings to `result`.
    fn check(&self, ctx: &MappingContext<'_>, result: &mut ValidationResult);
}

/// Every required placeholder needs a non-blank column.
pub struct MissingMappingRule;

impl MappingRule for MissingMappingRule {
    fn check(&self, ctx: &MappingContext<'_>, result: &mut ValidationResult) {
        let mut seen = HashSet::new();
        for placeholder in ctx.placeholders {
            if !placeholder.required || !seen.insert(placeholder.index) {
                continue;
            }
            if !ctx.mapping.is_mapped(placeholder.index) {
                result.push_error(MappingError::new(
                    ErrorKind::MissingMapping,
                    placeholder.index,
                    format!(
                        "Required variable {} is not mapped to a column",
                        ctx.describe(placeholder.index)
                    ),
                ));
            }
        }
    }
}

/// Mapped columns must exist in the dataset.
pub struct InvalidColumnRule;

impl MappingRule for InvalidColumnRule {
    fn check(&self, ctx: &MappingContext<'_>, result: &mut ValidationResult) {
        for (index, column) in ctx.mapped() {
            if !ctx.columns.iter().any(|c| c == column) {
                result.push_error(MappingError::new(
                    ErrorKind::InvalidColumn,
                    index,
                    format!(
                        "Column '{}' mapped to {} does not exist in the dataset",
                        column,
                        ctx.describe(index)
                    ),
                ));
            }
        }
    }
}

/// A column may feed only one placeholder.
///
/// The first placeholder in insertion order keeps the column; every later one
/// reusing it is flagged.
pub struct DuplicateMappingRule;

impl MappingRule for DuplicateMappingRule {
    fn check(&self, ctx: &MappingContext<'_>, result: &mut ValidationResult) {
        let mut first_use: HashMap<&str, u32> = HashMap::new();
        for (index, column) in ctx.mapped() {
            match first_use.get(column) {
                Some(&owner) => result.push_error(MappingError::new(
                    ErrorKind::DuplicateMapping,
                    index,
                    format!(
                        "Column '{}' is already mapped to {}; {} cannot reuse it",
                        column,
                        ctx.describe(owner),
                        ctx.describe(index)
                    ),
                )),
                None => {
                    first_use.insert(column, index);
                }
            }
        }
    }
}

/// Mapped placeholders whose ingester prior is low get a warning.
pub struct LowConfidenceRule;

impl MappingRule for LowConfidenceRule {
    fn check(&self, ctx: &MappingContext<'_>, result: &mut ValidationResult) {
        let Some(dataset) = ctx.dataset else {
            return;
        };
        for (index, column) in ctx.mapped() {
            let Some(prior) = dataset.prior(index) else {
                continue;
            };
            if prior < ctx.thresholds.low_confidence {
                result.push_warning(
                    MappingWarning::new(
                        WarningKind::LowConfidence,
                        format!(
                            "Low confidence ({:.0}%) for {} mapped to '{}'",
                            prior,
                            ctx.describe(index),
                            column
                        ),
                    )
                    .with_suggestion("Check a few rows before sending")
                    .with_placeholder(index),
                );
            }
        }
    }
}

/// Sample values should fit the placeholder type.
///
/// Blocking only in strict mode; otherwise reported as a potential issue.
pub struct TypeFitRule;

impl MappingRule for TypeFitRule {
    fn check(&self, ctx: &MappingContext<'_>, result: &mut ValidationResult) {
        let Some(dataset) = ctx.dataset else {
            return;
        };
        for (index, column) in ctx.mapped() {
            let Some(placeholder) = ctx.placeholder(index) else {
                continue;
            };
            let samples = dataset.samples_for(column);
            if samples.iter().all(|s| s.trim().is_empty()) {
                continue;
            }
            if type_score(placeholder.placeholder_type, samples) > 0.0 {
                continue;
            }

            let message = format!(
                "Samples in column '{}' do not look like {} values expected by {}",
                column,
                placeholder.placeholder_type.label(),
                ctx.describe(index)
            );
            if ctx.strict_types {
                result.push_error(MappingError::new(ErrorKind::TypeMismatch, index, message));
            } else {
                result.push_warning(
                    MappingWarning::new(WarningKind::PotentialIssue, message)
                        .with_suggestion("Confirm the column holds the right kind of value")
                        .with_placeholder(index),
                );
            }
        }
    }
}

/// One aggregate warning listing columns no placeholder uses.
pub struct UnusedColumnRule;

impl MappingRule for UnusedColumnRule {
    fn check(&self, ctx: &MappingContext<'_>, result: &mut ValidationResult) {
        let used = ctx.mapping.used_columns();
        let unused: Vec<&str> = ctx
            .columns
            .iter()
            .map(String::as_str)
            .filter(|c| !used.contains(c))
            .collect();

        if unused.is_empty() {
            return;
        }
        result.push_warning(
            MappingWarning::new(
                WarningKind::UnusedColumn,
                format!("{} column(s) not used: {}", unused.len(), unused.join(", ")),
            )
            .with_suggestion("Unused columns are ignored when generating messages"),
        );
    }
}

/// Runs every mapping rule in order, without short-circuiting.
pub struct MappingValidator {
    rules: Vec<Box<dyn MappingRule>>,
    thresholds: Thresholds,
    strict_types: bool,
}

impl MappingValidator {
    /// Create a validator with the default rules and thresholds.
    pub fn new() -> Self {
        Self::with_config(&MapperConfig::default())
    }

    /// Create a validator using the thresholds and strictness of `config`.
    pub fn with_config(config: &MapperConfig) -> Self {
        Self {
            rules: vec![
                Box::new(MissingMappingRule),
                Box::new(InvalidColumnRule),
                Box::new(DuplicateMappingRule),
                Box::new(LowConfidenceRule),
                Box::new(TypeFitRule),
                Box::new(UnusedColumnRule),
            ],
            thresholds: config.thresholds,
            strict_types: config.strict_types,
        }
    }

    /// Add a custom rule, run after the built-in ones.
    pub fn with_rule(mut self, rule: impl MappingRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Validate a mapping against the template and dataset columns.
    pub fn validate(
        &self,
        mapping: &ColumnMapping,
        placeholders: &[TemplateVariablePlaceholder],
        columns: &[String],
        dataset: Option<&DatasetAnalysis>,
    ) -> ValidationResult {
        let ctx = MappingContext {
            mapping,
            placeholders,
            columns,
            dataset,
            thresholds: &self.thresholds,
            strict_types: self.strict_types,
        };

        let mut result = ValidationResult::new();
        for rule in &self.rules {
            rule.check(&ctx, &mut result);
        }

        debug!(
            entries = mapping.len(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "validated mapping"
        );

        result
    }
}

impl Default for MappingValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a mapping with the default rules.
pub fn validate_mapping(
    mapping: &ColumnMapping,
    placeholders: &[TemplateVariablePlaceholder],
    columns: &[String],
    dataset: Option<&DatasetAnalysis>,
) -> ValidationResult {
    MappingValidator::new().validate(mapping, placeholders, columns, dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PlaceholderType;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_missing_required_placeholder() {
        let placeholders = vec![
            TemplateVariablePlaceholder::new(1, "Customer Name"),
            TemplateVariablePlaceholder::new(2, "Note").with_required(false),
        ];
        let result = validate_mapping(&ColumnMapping::new(), &placeholders, &columns(&["Name"]), None);

        assert!(!result.is_valid());
        let missing: Vec<_> = result.errors_of(ErrorKind::MissingMapping).collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].placeholder_index, 1);
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let placeholders = vec![TemplateVariablePlaceholder::new(1, "Customer Name")];
        let mapping = ColumnMapping::new().with(1, "");
        let result = validate_mapping(&mapping, &placeholders, &columns(&["Name"]), None);

        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].kind, ErrorKind::MissingMapping);
    }

    #[test]
    fn test_invalid_column() {
        let placeholders = vec![TemplateVariablePlaceholder::new(1, "Customer Name")];
        let mapping = ColumnMapping::new().with(1, "Surname");
        let result = validate_mapping(&mapping, &placeholders, &columns(&["Name"]), None);

        let invalid: Vec<_> = result.errors_of(ErrorKind::InvalidColumn).collect();
        assert_eq!(invalid.len(), 1);
        assert!(invalid[0].message.contains("Surname"));
        assert_eq!(result.errors_of(ErrorKind::MissingMapping).count(), 0);
    }

    #[test]
    fn test_duplicate_flags_later_placeholder_only() {
        let placeholders = vec![
            TemplateVariablePlaceholder::new(1, "Phone"),
            TemplateVariablePlaceholder::new(2, "Contact"),
        ];
        let mapping = ColumnMapping::new().with(1, "Phone").with(2, "Phone");
        let result = validate_mapping(&mapping, &placeholders, &columns(&["Phone"]), None);

        let dups: Vec<_> = result.errors_of(ErrorKind::DuplicateMapping).collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].placeholder_index, 2);
    }

    #[test]
    fn test_duplicate_follows_insertion_order() {
        let placeholders = vec![
            TemplateVariablePlaceholder::new(1, "A"),
            TemplateVariablePlaceholder::new(2, "B"),
        ];
        let mapping = ColumnMapping::new().with(2, "Phone").with(1, "Phone");
        let result = validate_mapping(&mapping, &placeholders, &columns(&["Phone"]), None);

        let dups: Vec<_> = result.errors_of(ErrorKind::DuplicateMapping).collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].placeholder_index, 1);
    }

    #[test]
    fn test_low_confidence_warning_is_not_blocking() {
        let placeholders = vec![TemplateVariablePlaceholder::new(1, "Customer Name")];
        let dataset = DatasetAnalysis::new(["Name"])
            .with_samples("Name", ["Alice"])
            .with_confidence(1, 30.0);
        let mapping = ColumnMapping::new().with(1, "Name");
        let result = validate_mapping(&mapping, &placeholders, &dataset.columns, Some(&dataset));

        assert!(result.is_valid());
        let low: Vec<_> = result.warnings_of(WarningKind::LowConfidence).collect();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].placeholder_index, Some(1));
    }

    #[test]
    fn test_low_confidence_boundary_and_missing_prior() {
        let placeholders = vec![TemplateVariablePlaceholder::new(1, "Customer Name")];
        let mapping = ColumnMapping::new().with(1, "Name");

        let at_threshold = DatasetAnalysis::new(["Name"])
            .with_samples("Name", ["Alice"])
            .with_confidence(1, 50.0);
        let result = validate_mapping(&mapping, &placeholders, &at_threshold.columns, Some(&at_threshold));
        assert_eq!(result.warnings_of(WarningKind::LowConfidence).count(), 0);

        let no_prior = DatasetAnalysis::new(["Name"]).with_samples("Name", ["Alice"]);
        let result = validate_mapping(&mapping, &placeholders, &no_prior.columns, Some(&no_prior));
        assert_eq!(result.warnings_of(WarningKind::LowConfidence).count(), 0);
        assert!(result.is_valid());
    }

    #[test]
    fn test_unused_columns_aggregate() {
        let placeholders = vec![TemplateVariablePlaceholder::new(1, "Customer Name")];
        let mapping = ColumnMapping::new().with(1, "Name");
        let result = validate_mapping(
            &mapping,
            &placeholders,
            &columns(&["Name", "City", "Email"]),
            None,
        );

        let unused: Vec<_> = result.warnings_of(WarningKind::UnusedColumn).collect();
        assert_eq!(unused.len(), 1);
        assert!(unused[0].message.contains("City, Email"));
        assert!(result.is_valid());
    }

    #[test]
    fn test_type_fit_warning_and_strict_error() {
        let placeholders = vec![
            TemplateVariablePlaceholder::new(1, "Due Date").with_type(PlaceholderType::Date),
        ];
        let dataset = DatasetAnalysis::new(["When"]).with_samples("When", ["soon", "later"]);
        let mapping = ColumnMapping::new().with(1, "When");

        let lenient = validate_mapping(&mapping, &placeholders, &dataset.columns, Some(&dataset));
        assert!(lenient.is_valid());
        assert_eq!(lenient.warnings_of(WarningKind::PotentialIssue).count(), 1);

        let strict = MappingValidator::with_config(&MapperConfig::new().with_strict_types(true))
            .validate(&mapping, &placeholders, &dataset.columns, Some(&dataset));
        assert!(!strict.is_valid());
        assert_eq!(strict.errors_of(ErrorKind::TypeMismatch).count(), 1);
    }

    #[test]
    fn test_all_rules_run() {
        let placeholders = vec![
            TemplateVariablePlaceholder::new(1, "A"),
            TemplateVariablePlaceholder::new(2, "B"),
            TemplateVariablePlaceholder::new(3, "C"),
        ];
        let mapping = ColumnMapping::new().with(1, "X").with(2, "Y").with(3, "Y");
        let result = validate_mapping(&mapping, &placeholders, &columns(&["Y", "Z"]), None);

        assert_eq!(result.errors_of(ErrorKind::InvalidColumn).count(), 1);
        assert_eq!(result.errors_of(ErrorKind::DuplicateMapping).count(), 1);
        assert_eq!(result.warnings_of(WarningKind::UnusedColumn).count(), 1);
    }
}
