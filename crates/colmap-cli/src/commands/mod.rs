//! CLI command implementations.

pub mod render;
pub mod suggest;
pub mod validate;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use colmap::{DatasetAnalysis, DatasetLoader, MapperError, SourceMetadata, TemplateVariablePlaceholder};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;

pub type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Read and decode a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> colmap::Result<T> {
    let file = File::open(path).map_err(|e| MapperError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Read an optional JSON file, falling back to the type's default.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: Option<&PathBuf>) -> colmap::Result<T> {
    match path {
        Some(p) => read_json(p),
        None => Ok(T::default()),
    }
}

/// Load the template placeholders, rejecting an empty template.
pub fn load_template(path: &Path) -> CommandResult<Vec<TemplateVariablePlaceholder>> {
    let placeholders: Vec<TemplateVariablePlaceholder> = read_json(path)?;
    if placeholders.is_empty() {
        return Err(format!("Template has no placeholders: {}", path.display()).into());
    }
    Ok(placeholders)
}

/// Sample the data file and attach prior confidences, if given.
pub fn load_dataset(
    file: &Path,
    confidence: Option<&PathBuf>,
) -> CommandResult<(DatasetAnalysis, SourceMetadata)> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (mut dataset, source) = DatasetLoader::new().load_file(file)?;
    let priors: IndexMap<u32, f64> = read_json_or_default(confidence)?;
    dataset.confidence.extend(priors);

    Ok((dataset, source))
}
