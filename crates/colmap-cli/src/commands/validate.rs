//! Validate command - check a user-edited mapping before sending.

use std::path::PathBuf;

use colmap::config::MapperConfig;
use colmap::validation::validate_phone_column_with;
use colmap::{validate_csv_structure, ColumnMapping, Mapper};
use colored::Colorize;

use super::suggest::print_validation;
use super::{load_dataset, load_template, read_json, CommandResult};

pub struct ValidateArgs {
    pub file: PathBuf,
    pub template: PathBuf,
    pub mapping: PathBuf,
    pub confidence: Option<PathBuf>,
    pub phone_column: Option<String>,
    pub strict_types: bool,
    pub json: bool,
}

/// Returns whether the mapping (and phone column, when given) is valid.
pub fn run(args: ValidateArgs) -> CommandResult<bool> {
    let placeholders = load_template(&args.template)?;
    let (dataset, source) = load_dataset(&args.file, args.confidence.as_ref())?;
    let mapping: ColumnMapping = read_json(&args.mapping)?;

    let mapper = Mapper::with_config(MapperConfig::new().with_strict_types(args.strict_types));
    let result = mapper.revalidate(&mapping, &placeholders, &dataset);
    let structure = validate_csv_structure(&dataset, &placeholders);

    let phone = args.phone_column.as_deref().map(|selected| {
        let ranked = mapper.detect_phone_columns(&dataset);
        validate_phone_column_with(
            selected,
            &dataset.columns,
            &ranked,
            mapper.config().thresholds.phone_advisory,
        )
    });

    let valid = result.is_valid()
        && structure.is_valid
        && phone.as_ref().map_or(true, |p| p.is_valid);

    if args.json {
        let output = serde_json::json!({
            "file": source.file,
            "is_valid": valid,
            "mapping": result,
            "structure": structure,
            "phone_column": phone,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(valid);
    }

    println!(
        "{} {} against {}",
        "Validating".cyan().bold(),
        args.mapping.display().to_string().white(),
        source.file.white()
    );
    println!();

    print_validation(&result);

    let shape = if structure.is_valid {
        structure.message.normal()
    } else {
        structure.message.red()
    };
    println!("{} {}", "Shape:".yellow().bold(), shape);

    if let Some(ref outcome) = phone {
        let message = if outcome.is_valid {
            outcome.message.normal()
        } else {
            outcome.message.red()
        };
        println!("{} {}", "Phone column:".yellow().bold(), message);
    }
    println!();

    if valid {
        println!("{}", "Ready to generate messages".green().bold());
    } else {
        println!("{}", "Fix the errors above before generating messages".red().bold());
    }

    Ok(valid)
}
