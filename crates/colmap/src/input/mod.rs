//! Sampling delimited files into dataset analyses.

mod loader;
mod source;

pub use loader::{DatasetLoader, Delimiter, LoaderConfig, DEFAULT_SAMPLE_SIZE};
pub use source::{is_null_value, SourceMetadata};
