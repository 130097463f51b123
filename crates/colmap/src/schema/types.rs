//! Template placeholder definitions.

use serde::{Deserialize, Serialize};

/// Expected value shape for a template placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderType {
    /// Free-form text (names, cities, notes).
    Text,
    /// Calendar date.
    Date,
    /// Monetary amount.
    Currency,
    /// Web address.
    Url,
}

impl PlaceholderType {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PlaceholderType::Text => "text",
            PlaceholderType::Date => "date",
            PlaceholderType::Currency => "currency",
            PlaceholderType::Url => "URL",
        }
    }
}

impl Default for PlaceholderType {
    fn default() -> Self {
        PlaceholderType::Text
    }
}

/// A positional variable slot in a message template, referenced as `{{index}}`.
///
/// Produced by the template analyzer and immutable for the mapping session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariablePlaceholder {
    /// Token position, unique per template.
    pub index: u32,
    /// Expected value shape.
    #[serde(rename = "type", default)]
    pub placeholder_type: PlaceholderType,
    /// Template text surrounding the token.
    #[serde(default)]
    pub context: String,
    /// Human-readable name, e.g. "Customer Name".
    #[serde(default)]
    pub label: String,
    /// Whether a mapping is mandatory before sending.
    #[serde(default)]
    pub required: bool,
}

impl TemplateVariablePlaceholder {
    /// Create a required text placeholder with the given label.
    pub fn new(index: u32, label: impl Into<String>) -> Self {
        Self {
            index,
            placeholder_type: PlaceholderType::Text,
            context: String::new(),
            label: label.into(),
            required: true,
        }
    }

    /// Set the placeholder type.
    pub fn with_type(mut self, placeholder_type: PlaceholderType) -> Self {
        self.placeholder_type = placeholder_type;
        self
    }

    /// Set the surrounding template context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Set whether the placeholder must be mapped.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// The literal token for this placeholder, e.g. `{{1}}`.
    pub fn token(&self) -> String {
        format!("{{{{{}}}}}", self.index)
    }

    /// Label for messages, falling back to the token when unlabeled.
    pub fn display_name(&self) -> String {
        if self.label.trim().is_empty() {
            self.token()
        } else {
            self.label.clone()
        }
    }
}
