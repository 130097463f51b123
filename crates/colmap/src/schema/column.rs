//! Dataset columns and the ingester's analysis of them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named field of the imported dataset with a few sample values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    /// Column header, unique within the dataset.
    pub name: String,
    /// Ordered sample of values, used only for heuristics.
    #[serde(default)]
    pub sample_values: Vec<String>,
}

impl TableColumn {
    /// Create a column with no samples.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sample_values: Vec::new(),
        }
    }

    /// Attach sample values.
    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sample_values = samples.into_iter().map(Into::into).collect();
        self
    }
}

/// Shape supplied by the table ingester: column names, per-column samples and
/// a per-placeholder prior confidence.
///
/// The `confidence` map is keyed by placeholder index, not by column. The
/// suggestion engine adds it to every candidate column of that placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    /// Column names in file order.
    pub columns: Vec<String>,
    /// Sample values keyed by column name.
    #[serde(default)]
    pub samples: IndexMap<String, Vec<String>>,
    /// Prior confidence keyed by placeholder index.
    #[serde(default)]
    pub confidence: IndexMap<u32, f64>,
}

impl DatasetAnalysis {
    /// Create an analysis with the given column names and no samples.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            samples: IndexMap::new(),
            confidence: IndexMap::new(),
        }
    }

    /// Build an analysis from columns carrying their own samples.
    pub fn from_columns(columns: Vec<TableColumn>) -> Self {
        let mut analysis = Self::default();
        for column in columns {
            analysis.columns.push(column.name.clone());
            analysis.samples.insert(column.name, column.sample_values);
        }
        analysis
    }

    /// Set samples for a column.
    pub fn with_samples<I, S>(mut self, column: impl Into<String>, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.samples
            .insert(column.into(), samples.into_iter().map(Into::into).collect());
        self
    }

    /// Set the prior confidence for a placeholder.
    pub fn with_confidence(mut self, index: u32, confidence: f64) -> Self {
        self.confidence.insert(index, confidence);
        self
    }

    /// Samples for a column, empty if none were captured.
    pub fn samples_for(&self, column: &str) -> &[String] {
        self.samples.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Prior confidence for a placeholder, if the ingester supplied one.
    pub fn prior(&self, index: u32) -> Option<f64> {
        self.confidence.get(&index).copied()
    }

    /// Whether a column of that exact name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Columns paired with their samples, in file order.
    pub fn table_columns(&self) -> Vec<TableColumn> {
        self.columns
            .iter()
            .map(|name| TableColumn {
                name: name.clone(),
                sample_values: self.samples_for(name).to_vec(),
            })
            .collect()
    }
}
