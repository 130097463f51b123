//! Column suggestions for template placeholders.
//!
//! This module scores every (placeholder, column) pair, ranks the candidates
//! per placeholder and reduces the rankings to an initial mapping.

mod generator;
mod keywords;
mod suggestion;

pub use generator::{auto_apply_default, auto_apply_mappings, generate_suggestions, SuggestionEngine};
pub use suggestion::{MappingSuggestion, SuggestionMap, SuggestionTier};
