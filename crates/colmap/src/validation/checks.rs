//! Standalone checks on dataset shape, phone column choice and preview rows.

use serde::{Deserialize, Serialize};

use crate::config::PHONE_ADVISORY_THRESHOLD;
use crate::inference::PhoneColumnSuggestion;
use crate::schema::{DatasetAnalysis, TemplateVariablePlaceholder};

/// Pass/fail with a message for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub is_valid: bool,
    pub message: String,
}

impl CheckOutcome {
    fn valid(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Check whether a dataset has enough columns for a template.
///
/// Invalid only when there are fewer columns than required placeholders.
pub fn validate_csv_counts(column_count: usize, variable_count: usize, required_count: usize) -> CheckOutcome {
    if column_count < required_count {
        return CheckOutcome::invalid(format!(
            "Dataset has {} column(s) but the template needs at least {} required variable(s)",
            column_count, required_count
        ));
    }

    if column_count == variable_count {
        CheckOutcome::valid(format!(
            "Perfect match: {} column(s) for {} variable(s)",
            column_count, variable_count
        ))
    } else if column_count > variable_count {
        CheckOutcome::valid(format!(
            "Dataset has {} excess column(s) beyond the {} variable(s); extra columns will be ignored",
            column_count - variable_count,
            variable_count
        ))
    } else {
        CheckOutcome::valid(format!(
            "Dataset has {} column(s), enough for the {} required variable(s)",
            column_count, required_count
        ))
    }
}

/// [`validate_csv_counts`] over an ingested dataset and analyzed template.
pub fn validate_csv_structure(
    dataset: &DatasetAnalysis,
    placeholders: &[TemplateVariablePlaceholder],
) -> CheckOutcome {
    let required = placeholders.iter().filter(|p| p.required).count();
    validate_csv_counts(dataset.column_count(), placeholders.len(), required)
}

/// Check the operator's choice of phone column.
pub fn validate_phone_column(
    selected: &str,
    columns: &[String],
    suggestions: &[PhoneColumnSuggestion],
) -> CheckOutcome {
    validate_phone_column_with(selected, columns, suggestions, PHONE_ADVISORY_THRESHOLD)
}

/// [`validate_phone_column`] with a custom advisory threshold.
pub fn validate_phone_column_with(
    selected: &str,
    columns: &[String],
    suggestions: &[PhoneColumnSuggestion],
    advisory_threshold: f64,
) -> CheckOutcome {
    if selected.trim().is_empty() {
        return CheckOutcome::invalid("Select the column that holds recipient phone numbers");
    }
    if !columns.iter().any(|c| c == selected) {
        return CheckOutcome::invalid(format!(
            "Column '{}' does not exist in the dataset",
            selected
        ));
    }

    match suggestions.iter().find(|s| s.column == selected) {
        Some(s) if s.confidence < advisory_threshold => CheckOutcome::valid(format!(
            "Column '{}' may not contain phone numbers ({:.0}% confidence); check a few rows",
            selected, s.confidence
        )),
        _ => CheckOutcome::valid(format!("Using '{}' as the phone number column", selected)),
    }
}

/// One rendered preview row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRow {
    /// Recipient phone number.
    #[serde(default)]
    pub to: String,
    pub is_valid: bool,
    /// Rendered message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Why the row failed, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of checking preview rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewValidation {
    pub is_valid: bool,
    /// Zero-based indices of offending rows.
    pub invalid_rows: Vec<usize>,
    /// One line per offending row.
    pub errors: Vec<String>,
}

/// Flag rows that failed to render or have no recipient.
pub fn validate_preview_data(rows: &[PreviewRow]) -> PreviewValidation {
    let mut invalid_rows = Vec::new();
    let mut errors = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let blank_to = row.to.trim().is_empty();
        if row.is_valid && !blank_to {
            continue;
        }

        invalid_rows.push(idx);
        let reason = if blank_to {
            "missing recipient phone number".to_string()
        } else {
            row.error
                .clone()
                .unwrap_or_else(|| "invalid data".to_string())
        };
        errors.push(format!("Row {}: {}", idx + 1, reason));
    }

    PreviewValidation {
        is_valid: invalid_rows.is_empty(),
        invalid_rows,
        errors,
    }
}
