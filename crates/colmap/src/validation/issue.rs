//! Error and warning values produced by mapping validation.

use serde::{Deserialize, Serialize};

/// Kind of blocking problem in a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required placeholder has no column.
    MissingMapping,
    /// The mapped column is not in the dataset.
    InvalidColumn,
    /// The column is already used by an earlier placeholder.
    DuplicateMapping,
    /// Samples do not fit the placeholder type (strict mode only).
    TypeMismatch,
}

impl ErrorKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::MissingMapping => "Missing Mapping",
            ErrorKind::InvalidColumn => "Invalid Column",
            ErrorKind::DuplicateMapping => "Duplicate Mapping",
            ErrorKind::TypeMismatch => "Type Mismatch",
        }
    }
}

/// Kind of advisory finding in a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The ingester's prior for a mapped placeholder is low.
    LowConfidence,
    /// Some dataset columns are not used by any placeholder.
    UnusedColumn,
    /// Anything else worth a second look.
    PotentialIssue,
}

impl WarningKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            WarningKind::LowConfidence => "Low Confidence",
            WarningKind::UnusedColumn => "Unused Column",
            WarningKind::PotentialIssue => "Potential Issue",
        }
    }
}

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory, never blocks.
    Warning,
    /// Blocks saving or sending.
    Error,
}

/// A blocking problem tied to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingError {
    pub kind: ErrorKind,
    pub placeholder_index: u32,
    pub message: String,
    pub severity: Severity,
}

impl MappingError {
    /// Create an error-severity finding.
    pub fn new(kind: ErrorKind, placeholder_index: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            placeholder_index,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// An advisory finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingWarning {
    pub kind: WarningKind,
    pub message: String,
    /// What the operator could do about it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Placeholder concerned, when the warning is about one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_index: Option<u32>,
}

impl MappingWarning {
    /// Create a warning.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
            placeholder_index: None,
        }
    }

    /// Set the suggested action.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Set the placeholder concerned.
    pub fn with_placeholder(mut self, index: u32) -> Self {
        self.placeholder_index = Some(index);
        self
    }
}

/// Outcome of validating a mapping.
///
/// `is_valid` is always `errors.is_empty()`; warnings never affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<MappingError>,
    warnings: Vec<MappingWarning>,
}

impl ValidationResult {
    /// An empty, valid result.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a blocking error.
    pub fn push_error(&mut self, error: MappingError) {
        self.errors.push(error);
        self.is_valid = false;
    }

    /// Record an advisory warning.
    pub fn push_warning(&mut self, warning: MappingWarning) {
        self.warnings.push(warning);
    }

    /// Whether no errors were found.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[MappingError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[MappingWarning] {
        &self.warnings
    }

    /// Errors of one kind.
    pub fn errors_of(&self, kind: ErrorKind) -> impl Iterator<Item = &MappingError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// Warnings of one kind.
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &MappingWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}
