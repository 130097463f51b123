//! Example: Propose a column mapping for a template from a CSV file.
//!
//! Usage:
//!   cargo run --example propose -- <file_path>
//!
//! The template is a fixed payment reminder:
//!   "Hi {{1}}, please pay {{2}} before {{3}}. Pay here: {{4}}"

use std::env;
use std::path::Path;

use colmap::{DatasetLoader, Mapper, PlaceholderType, TemplateVariablePlaceholder};

fn main() -> colmap::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example propose -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let placeholders = vec![
        TemplateVariablePlaceholder::new(1, "Customer Name").with_context("Hi {{1}},"),
        TemplateVariablePlaceholder::new(2, "Amount")
            .with_type(PlaceholderType::Currency)
            .with_context("please pay {{2}}"),
        TemplateVariablePlaceholder::new(3, "Date")
            .with_type(PlaceholderType::Date)
            .with_context("before {{3}}"),
        TemplateVariablePlaceholder::new(4, "Link")
            .with_type(PlaceholderType::Url)
            .with_context("Pay here: {{4}}"),
    ];

    let (dataset, source) = DatasetLoader::new().load_file(path)?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("Mapping proposal: {} ({} rows)", source.file, source.row_count);
    println!("{}", separator);
    println!();

    let proposal = Mapper::new().propose(&placeholders, &dataset);

    println!("## Suggestions");
    for placeholder in &placeholders {
        println!("  {} {}", placeholder.token(), placeholder.display_name());
        for suggestion in proposal.suggestions[&placeholder.index].iter().take(3) {
            println!(
                "    {:>3.0}% {:20} {}",
                suggestion.confidence, suggestion.column, suggestion.reason
            );
        }
    }
    println!();

    println!("## Phone columns");
    for phone in proposal.phone_columns.iter().take(3) {
        println!("  {:>3.0}% {}", phone.confidence, phone.column);
    }
    println!();

    println!("## Mapping");
    for (index, column) in proposal.mapping.iter() {
        println!("  {{{{{}}}}} -> {}", index, column);
    }
    println!();

    println!(
        "## Validation: {} ({} errors, {} warnings)",
        if proposal.validation.is_valid() { "valid" } else { "invalid" },
        proposal.validation.errors().len(),
        proposal.validation.warnings().len()
    );
    for error in proposal.validation.errors() {
        println!("  [{}] {}", error.kind.label(), error.message);
    }
    for warning in proposal.validation.warnings() {
        println!("  [{}] {}", warning.kind.label(), warning.message);
    }
    println!("  {}", proposal.structure.message);

    Ok(())
}
