//! Render command - preview template text with values or source hints.

use std::collections::HashMap;
use std::path::PathBuf;

use colmap::{substitute_template_text, PlaceholderResolutionMapping, SubstitutionInput};
use tracing::debug;

use super::{read_json_or_default, CommandResult};

pub fn run(
    text: String,
    values: Option<PathBuf>,
    samples: Option<PathBuf>,
    mappings: Option<PathBuf>,
) -> CommandResult<()> {
    let user_values: HashMap<u32, String> = read_json_or_default(values.as_ref())?;
    let sample_values: HashMap<u32, String> = read_json_or_default(samples.as_ref())?;
    let resolution: PlaceholderResolutionMapping = read_json_or_default(mappings.as_ref())?;

    debug!(
        user_values = user_values.len(),
        sample_values = sample_values.len(),
        mappings = resolution.len(),
        "rendering preview"
    );

    let input = SubstitutionInput::new(&text)
        .with_user_values(&user_values)
        .with_sample_values(&sample_values)
        .with_mappings(&resolution);

    println!("{}", substitute_template_text(&input));
    Ok(())
}
