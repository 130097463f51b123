//! Placeholder-to-column and placeholder-to-source mappings.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Assignment of dataset columns to placeholder indices.
///
/// Entries keep insertion order, which the duplicate check relies on. The
/// mapping does not prevent two placeholders from sharing a column; that is
/// reported by validation. A blank column name counts as "not mapped".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    entries: IndexMap<u32, String>,
}

impl ColumnMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a placeholder to a column, replacing any previous column in place.
    pub fn assign(&mut self, index: u32, column: impl Into<String>) {
        self.entries.insert(index, column.into());
    }

    /// Builder form of [`assign`](Self::assign).
    pub fn with(mut self, index: u32, column: impl Into<String>) -> Self {
        self.assign(index, column);
        self
    }

    /// Remove a placeholder's mapping, keeping the order of the others.
    pub fn clear(&mut self, index: u32) -> Option<String> {
        self.entries.shift_remove(&index)
    }

    /// Column mapped to a placeholder, if any (including blank values).
    pub fn get(&self, index: u32) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    /// Whether the placeholder has a non-blank column.
    pub fn is_mapped(&self, index: u32) -> bool {
        self.get(index).is_some_and(|c| !c.trim().is_empty())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(i, c)| (*i, c.as_str()))
    }

    /// Distinct non-blank columns referenced by the mapping.
    pub fn used_columns(&self) -> IndexSet<&str> {
        self.entries
            .values()
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
            .collect()
    }

    /// Number of entries, blank ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for ColumnMapping {
    fn from_iter<T: IntoIterator<Item = (u32, S)>>(iter: T) -> Self {
        let mut mapping = Self::new();
        for (index, column) in iter {
            mapping.assign(index, column);
        }
        mapping
    }
}

/// Where a placeholder's value comes from at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A field on the customer record.
    Customer,
    /// A field on the transaction record.
    Transaction,
    /// A fixed value typed in by the user.
    Static,
    /// Any source this version does not know about.
    #[serde(other)]
    Unknown,
}

/// Source descriptor for one placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSource {
    pub source: SourceKind,
    /// Field path for record-backed sources, e.g. `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Display label, used when no path is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ResolutionSource {
    /// A customer field.
    pub fn customer(path: impl Into<String>) -> Self {
        Self {
            source: SourceKind::Customer,
            path: Some(path.into()),
            label: None,
        }
    }

    /// A transaction field.
    pub fn transaction(path: impl Into<String>) -> Self {
        Self {
            source: SourceKind::Transaction,
            path: Some(path.into()),
            label: None,
        }
    }

    /// A static, user-supplied value.
    pub fn fixed(label: impl Into<String>) -> Self {
        Self {
            source: SourceKind::Static,
            path: None,
            label: Some(label.into()),
        }
    }

    /// Field path, falling back to the label.
    pub fn field(&self) -> &str {
        self.path
            .as_deref()
            .or(self.label.as_deref())
            .unwrap_or_default()
    }
}

/// Placeholder index to value source, used for message personalization.
pub type PlaceholderResolutionMapping = IndexMap<u32, ResolutionSource>;
