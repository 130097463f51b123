//! Data model shared by every engine: placeholders, columns and mappings.

mod column;
mod mapping;
mod types;

pub use column::{DatasetAnalysis, TableColumn};
pub use mapping::{ColumnMapping, PlaceholderResolutionMapping, ResolutionSource, SourceKind};
pub use types::{PlaceholderType, TemplateVariablePlaceholder};
