//! Suggest command - rank columns per placeholder and auto-apply.

use std::path::PathBuf;

use colmap::config::Thresholds;
use colmap::{Mapper, MapperConfig, Severity, SuggestionTier};
use colored::Colorize;

use super::{load_dataset, load_template, CommandResult};

pub struct SuggestArgs {
    pub file: PathBuf,
    pub template: PathBuf,
    pub threshold: f64,
    pub confidence: Option<PathBuf>,
    pub strict_types: bool,
    pub json: bool,
}

pub fn run(args: SuggestArgs, verbose: bool) -> CommandResult<()> {
    let config = MapperConfig::new()
        .with_thresholds(Thresholds::default().with_auto_apply(args.threshold))
        .with_strict_types(args.strict_types);
    config.validate()?;

    let placeholders = load_template(&args.template)?;
    let (dataset, source) = load_dataset(&args.file, args.confidence.as_ref())?;

    let proposal = Mapper::with_config(config).propose(&placeholders, &dataset);

    if args.json {
        let output = serde_json::json!({
            "source": source,
            "proposal": proposal,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Suggestions for".cyan().bold(),
        source.file.white(),
        source.row_count,
        source.column_count
    );
    println!();

    for placeholder in &placeholders {
        let ranked = proposal
            .suggestions
            .get(&placeholder.index)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let applied = match proposal.mapping.get(placeholder.index) {
            Some(column) => format!("-> {}", column).green().bold(),
            None => "-> (unmapped)".yellow(),
        };
        println!(
            "  {} {} {}",
            placeholder.token().white().bold(),
            placeholder.display_name(),
            applied
        );

        if ranked.is_empty() {
            println!("      {}", "no candidate columns".dimmed());
        }
        for suggestion in ranked.iter().take(3) {
            let confidence = format!("{:>3.0}%", suggestion.confidence);
            let confidence = match suggestion.tier {
                SuggestionTier::Exact => confidence.green(),
                SuggestionTier::Partial => confidence.yellow(),
                SuggestionTier::Inferred => confidence.normal(),
            };
            println!("      {} {}", confidence, suggestion.column);
            if verbose {
                println!("           {}", suggestion.reason.dimmed());
            }
        }
    }
    println!();

    println!("{}", "Phone column:".yellow().bold());
    match proposal.phone_columns.first().filter(|p| p.confidence > 0.0) {
        Some(top) => println!(
            "  {} ({:.0}%) {}",
            top.column.white().bold(),
            top.confidence,
            top.patterns.join(", ").dimmed()
        ),
        None => println!("  {}", "no phone-like column found".red()),
    }
    println!();

    print_validation(&proposal.validation);

    let structure = if proposal.structure.is_valid {
        proposal.structure.message.normal()
    } else {
        proposal.structure.message.red()
    };
    println!("{} {}", "Shape:".yellow().bold(), structure);
    println!();

    println!(
        "Auto-applied {}/{} placeholders, {} required still unmapped",
        proposal.summary.auto_applied.to_string().white().bold(),
        proposal.summary.total_placeholders,
        proposal.summary.unmapped_required.to_string().yellow()
    );

    Ok(())
}

/// Print errors and warnings of a validation result.
pub fn print_validation(result: &colmap::ValidationResult) {
    let status = if result.is_valid() {
        "valid".green().bold()
    } else {
        "invalid".red().bold()
    };
    println!(
        "{} {} ({} errors, {} warnings)",
        "Mapping:".yellow().bold(),
        status,
        result.errors().len().to_string().red(),
        result.warnings().len().to_string().yellow()
    );

    for error in result.errors() {
        let marker = match error.severity {
            Severity::Error => "error".red(),
            Severity::Warning => "warning".yellow(),
        };
        println!("  {} [{}] {}", marker, error.kind.label(), error.message);
    }
    for warning in result.warnings() {
        println!(
            "  {} [{}] {}",
            "warning".yellow(),
            warning.kind.label(),
            warning.message
        );
        if let Some(ref hint) = warning.suggestion {
            println!("          {}", hint.dimmed());
        }
    }
    println!();
}
