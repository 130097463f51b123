//! colmap: column-to-placeholder mapping and validation for templated messages.
//!
//! Given the placeholders of a message template and a sampled tabular dataset,
//! colmap scores which column should fill each placeholder, auto-applies
//! confident suggestions, finds the phone-number column, and checks a mapping
//! for structural problems before messages are generated.
//!
//! # Core Principles
//!
//! - **Pure**: every operation is a synchronous function of its inputs
//! - **Total**: malformed-but-typed input degrades to empty results, never panics
//! - **Problems are data**: validation returns errors and warnings, it never fails
//!
//! # Example
//!
//! ```
//! use colmap::{DatasetAnalysis, Mapper, TemplateVariablePlaceholder};
//!
//! let placeholders = vec![
//!     TemplateVariablePlaceholder::new(1, "Customer Name").with_context("Hi NAME"),
//! ];
//! let dataset = DatasetAnalysis::new(["Name", "Phone"])
//!     .with_samples("Name", ["Alice", "Bob"])
//!     .with_samples("Phone", ["+919999999999", "+918888888888"])
//!     .with_confidence(1, 60.0);
//!
//! let proposal = Mapper::new().propose(&placeholders, &dataset);
//! assert_eq!(proposal.mapping.get(1), Some("Name"));
//! assert!(proposal.validation.is_valid());
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod render;
pub mod schema;
pub mod suggestion;
pub mod validation;

mod mapper;

pub use crate::mapper::{Mapper, MappingProposal, ProposalSummary};
pub use config::MapperConfig;
pub use error::{MapperError, Result};
pub use inference::{detect_phone_columns, PhoneColumnSuggestion};
pub use input::{DatasetLoader, SourceMetadata};
pub use render::{substitute_template_text, SubstitutionInput};
pub use schema::{
    ColumnMapping, DatasetAnalysis, PlaceholderResolutionMapping, PlaceholderType,
    ResolutionSource, SourceKind, TableColumn, TemplateVariablePlaceholder,
};
pub use suggestion::{auto_apply_mappings, generate_suggestions, MappingSuggestion, SuggestionTier};
pub use validation::{
    validate_csv_structure, validate_mapping, validate_phone_column, validate_preview_data,
    ErrorKind, MappingError, MappingWarning, Severity, ValidationResult, WarningKind,
};
