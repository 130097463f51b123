//! CSV/TSV sampling into a [`DatasetAnalysis`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{MapperError, Result};
use crate::schema::DatasetAnalysis;

use super::source::{is_null_value, SourceMetadata};

/// Extensions of formats this loader cannot read.
const UNSUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls", "ods", "parquet", "json", "zip"];

/// Default number of sample values kept per column.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Non-missing values kept per column.
    pub sample_size: usize,
    /// Quote character.
    pub quote: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            sample_size: DEFAULT_SAMPLE_SIZE,
            quote: b'"',
        }
    }
}

/// Reads a delimited file and keeps the first few values of each column.
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self {
            config: LoaderConfig::default(),
        }
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Load a file and return the sampled dataset and its metadata.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<(DatasetAnalysis, SourceMetadata)> {
        let path = path.as_ref();

        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            let ext = ext.to_ascii_lowercase();
            if UNSUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
                return Err(MapperError::UnsupportedFormat(format!(
                    "'{}' files cannot be sampled; export the sheet as CSV or TSV",
                    ext
                )));
            }
        }

        let mut file = File::open(path).map_err(|e| MapperError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| MapperError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(byte) => Delimiter::from_byte(byte),
            None => Delimiter::sniff(&contents, self.config.quote)?,
        };

        let (dataset, row_count) = self.load_bytes(&contents, delimiter.byte())?;
        let format = delimiter.format_name().to_string();

        info!(
            file = %path.display(),
            rows = row_count,
            columns = dataset.column_count(),
            format = format.as_str(),
            "loaded dataset samples"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            row_count,
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Sample bytes directly. Returns the dataset and the data row count.
    pub fn load_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<(DatasetAnalysis, usize)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut headers: Vec<String> = if self.config.has_header {
            reader
                .headers()?
                .iter()
                .map(|s| s.trim().to_string())
                .collect()
        } else {
            Vec::new()
        };

        let mut dataset = DatasetAnalysis::default();
        let mut row_count = 0;

        for result in reader.records() {
            let record = result?;

            // Without a header row, names come from the first record's width.
            if headers.is_empty() {
                headers = (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect();
            }

            for (idx, name) in headers.iter().enumerate() {
                let value = record.get(idx).unwrap_or("");
                if is_null_value(value) {
                    continue;
                }
                let samples = dataset.samples.entry(name.clone()).or_default();
                if samples.len() < self.config.sample_size {
                    samples.push(value.trim().to_string());
                }
            }
            row_count += 1;
        }

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(MapperError::EmptyData("No columns found".to_string()));
        }
        if row_count == 0 {
            return Err(MapperError::EmptyData("No data rows found".to_string()));
        }

        // Keep samples in column order, with an entry for every column.
        let mut samples = std::mem::take(&mut dataset.samples);
        for name in &headers {
            dataset
                .samples
                .insert(name.clone(), samples.shift_remove(name).unwrap_or_default());
        }
        dataset.columns = headers;

        Ok((dataset, row_count))
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Field separators the loader recognises, each with the format name it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
    Semicolon,
    Pipe,
    Other(u8),
}

impl Delimiter {
    /// Candidates tried when sniffing, in tie-break order.
    const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Tab,
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Pipe,
    ];

    /// Lines looked at when sniffing.
    const SNIFF_LINES: usize = 10;

    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'\t' => Delimiter::Tab,
            b',' => Delimiter::Comma,
            b';' => Delimiter::Semicolon,
            b'|' => Delimiter::Pipe,
            other => Delimiter::Other(other),
        }
    }

    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
            Delimiter::Other(byte) => byte,
        }
    }

    /// Format name recorded in [`SourceMetadata`].
    pub fn format_name(self) -> &'static str {
        match self {
            Delimiter::Tab => "tsv",
            Delimiter::Comma => "csv",
            Delimiter::Semicolon => "csv-semicolon",
            Delimiter::Pipe => "psv",
            Delimiter::Other(_) => "delimited",
        }
    }

    /// Guess the delimiter from the leading records.
    ///
    /// Each candidate parses the head of the file with the real CSV reader, so
    /// quoted separators never count. A candidate whose first record has a
    /// single field is out. A steady field count beats a ragged one, wider
    /// beats narrower, and tab wins an exact tie. Falls back to comma.
    pub fn sniff(bytes: &[u8], quote: u8) -> Result<Self> {
        let has_content = bytes
            .split(|&b| b == b'\n')
            .any(|line| !line.trim_ascii().is_empty());
        if !has_content {
            return Err(MapperError::EmptyData("No lines to analyze".to_string()));
        }

        let mut best = Delimiter::Comma;
        let mut best_key = None;

        for candidate in Self::CANDIDATES {
            let widths = record_widths(bytes, candidate.byte(), quote);
            let Some(&first) = widths.first() else {
                continue;
            };
            if first < 2 {
                continue;
            }

            let steady = widths.iter().all(|&w| w == first);
            let key = (steady, first, candidate == Delimiter::Tab);
            if best_key.is_none_or(|k| key > k) {
                best_key = Some(key);
                best = candidate;
            }
        }

        Ok(best)
    }
}

/// Field counts of the first records when split on `delimiter`.
fn record_widths(bytes: &[u8], delimiter: u8, quote: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quote(quote)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes)
        .byte_records()
        .take(Delimiter::SNIFF_LINES)
        .filter_map(|record| record.ok())
        .map(|record| record.len())
        .collect()
}
