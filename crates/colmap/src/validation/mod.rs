//! Mapping validation and the smaller dataset, phone and preview checks.
//!
//! Nothing here fails: every problem comes back as data. Errors block saving
//! or sending; warnings are advisory.

mod checks;
mod issue;
mod validators;

pub use checks::{
    validate_csv_counts, validate_csv_structure, validate_phone_column, validate_phone_column_with,
    validate_preview_data, CheckOutcome, PreviewRow, PreviewValidation,
};
pub use issue::{ErrorKind, MappingError, MappingWarning, Severity, ValidationResult, WarningKind};
pub use validators::{
    validate_mapping, DuplicateMappingRule, InvalidColumnRule, LowConfidenceRule, MappingContext,
    MappingRule, MappingValidator, MissingMappingRule, TypeFitRule, UnusedColumnRule,
};
