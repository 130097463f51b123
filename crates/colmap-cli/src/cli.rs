//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// colmap: map dataset columns to message template placeholders
#[derive(Parser)]
#[command(name = "colmap")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging, suggestion reasons)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest a column for every template placeholder
    Suggest {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON array of template placeholders
        #[arg(short, long, value_name = "PLACEHOLDERS_JSON")]
        template: PathBuf,

        /// Minimum confidence for auto-applying a suggestion
        #[arg(long, default_value = "80")]
        threshold: f64,

        /// JSON object of per-placeholder prior confidence, e.g. {"1": 60}
        #[arg(short, long, value_name = "PRIORS_JSON")]
        confidence: Option<PathBuf>,

        /// Treat type mismatches as blocking errors
        #[arg(long)]
        strict_types: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a placeholder-to-column mapping
    Validate {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON array of template placeholders
        #[arg(short, long, value_name = "PLACEHOLDERS_JSON")]
        template: PathBuf,

        /// JSON object mapping placeholder index to column, e.g. {"1": "Name"}
        #[arg(short, long, value_name = "MAPPING_JSON")]
        mapping: PathBuf,

        /// JSON object of per-placeholder prior confidence
        #[arg(short, long, value_name = "PRIORS_JSON")]
        confidence: Option<PathBuf>,

        /// Phone number column to check
        #[arg(long)]
        phone_column: Option<String>,

        /// Treat type mismatches as blocking errors
        #[arg(long)]
        strict_types: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render template text with sample values or source hints
    Render {
        /// Template text containing {{n}} tokens
        #[arg(long)]
        text: String,

        /// JSON object of user-entered values per placeholder
        #[arg(long, value_name = "VALUES_JSON")]
        values: Option<PathBuf>,

        /// JSON object of sample values per placeholder
        #[arg(long, value_name = "SAMPLES_JSON")]
        samples: Option<PathBuf>,

        /// JSON object of resolution sources per placeholder
        #[arg(long, value_name = "MAPPINGS_JSON")]
        mappings: Option<PathBuf>,
    },
}
