//! Integration tests for colmap.

use std::collections::HashMap;
use std::io::Write;

use tempfile::NamedTempFile;

use colmap::suggestion::auto_apply_default;
use colmap::validation::{validate_csv_counts, PreviewRow};
use colmap::{
    auto_apply_mappings, detect_phone_columns, generate_suggestions, substitute_template_text,
    validate_mapping, validate_phone_column, validate_preview_data, ColumnMapping,
    DatasetAnalysis, DatasetLoader, ErrorKind, Mapper, PlaceholderResolutionMapping,
    PlaceholderType, ResolutionSource, SubstitutionInput, TemplateVariablePlaceholder,
    WarningKind,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn customer_name() -> TemplateVariablePlaceholder {
    TemplateVariablePlaceholder::new(1, "Customer Name").with_context("Hi NAME")
}

fn name_phone_dataset() -> DatasetAnalysis {
    DatasetAnalysis::new(["Name", "Phone"])
        .with_samples("Name", ["Alice", "Bob"])
        .with_samples("Phone", ["+919999999999", "+918888888888"])
        .with_confidence(1, 60.0)
}

// =============================================================================
// End-to-End Scenario
// =============================================================================

#[test]
fn test_end_to_end_name_and_phone() {
    let placeholders = vec![customer_name()];
    let dataset = name_phone_dataset();

    let suggestions = generate_suggestions(&placeholders, &dataset);
    let ranked = &suggestions[&1];
    assert_eq!(ranked[0].column, "Name");
    assert!(ranked[0].confidence >= 80.0);
    assert!(ranked.iter().position(|s| s.column == "Phone") > Some(0));

    let mapping = auto_apply_mappings(&placeholders, &suggestions, 80.0);
    assert_eq!(mapping, ColumnMapping::new().with(1, "Name"));

    let phones = detect_phone_columns(&dataset.columns, &dataset);
    assert_eq!(phones[0].column, "Phone");
    let name_score = phones
        .iter()
        .find(|p| p.column == "Name")
        .map(|p| p.confidence)
        .unwrap_or(0.0);
    assert!(phones[0].confidence - name_score >= 50.0);
    assert!(phones[0].patterns.contains(&"E.164 format".to_string()));
}

#[test]
fn test_end_to_end_from_csv_file() {
    let content = "Customer,Mobile Number,Amount Due,Due Date,Invoice Link\n\
                   Alice,+919999999999,$120.50,2024-03-01,https://pay.example.com/1\n\
                   Bob,+918888888888,$80,2024-03-05,https://pay.example.com/2\n";
    let file = create_test_file(content);

    let (mut dataset, source) = DatasetLoader::new()
        .load_file(file.path())
        .expect("Load failed");
    assert_eq!(source.row_count, 2);
    assert_eq!(source.column_count, 5);
    assert_eq!(source.format, "csv");
    assert!(source.hash.starts_with("sha256:"));

    for index in 1..=4 {
        dataset.confidence.insert(index, 60.0);
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

    let proposal = Mapper::new().propose(&placeholders, &dataset);

    assert_eq!(proposal.mapping.get(1), Some("Customer"));
    assert_eq!(proposal.mapping.get(2), Some("Amount Due"));
    assert_eq!(proposal.mapping.get(3), Some("Due Date"));
    assert_eq!(proposal.mapping.get(4), Some("Invoice Link"));
    assert_eq!(proposal.summary.phone_column.as_deref(), Some("Mobile Number"));
    assert!(proposal.validation.is_valid());
    assert!(proposal.structure.is_valid);
}

// =============================================================================
// Auto-Apply
// =============================================================================

#[test]
fn test_auto_apply_never_assigns_below_threshold() {
    let placeholders = vec![customer_name()];
    let dataset = DatasetAnalysis::new(["Name"]).with_samples("Name", ["Alice"]);

    // Without the prior, Name scores 21 + 40 + 16 + 10 = 87.
    let suggestions = generate_suggestions(&placeholders, &dataset);
    assert_eq!(suggestions[&1][0].confidence, 87.0);

    assert!(auto_apply_mappings(&placeholders, &suggestions, 90.0).is_empty());
    assert_eq!(auto_apply_default(&placeholders, &suggestions).get(1), Some("Name"));
}

#[test]
fn test_auto_apply_skips_placeholder_without_suggestions() {
    let placeholders = vec![TemplateVariablePlaceholder::new(7, "Expiry").with_type(PlaceholderType::Date)];
    let dataset = DatasetAnalysis::new(["Name"]).with_samples("Name", ["Alice"]);

    let suggestions = generate_suggestions(&placeholders, &dataset);
    assert!(suggestions[&7].is_empty());
    assert!(auto_apply_mappings(&placeholders, &suggestions, 0.0).is_empty());
}

// =============================================================================
// Mapping Validation
// =============================================================================

#[test]
fn test_duplicate_detection_order() {
    let placeholders = vec![
        TemplateVariablePlaceholder::new(1, "Phone"),
        TemplateVariablePlaceholder::new(2, "Alt Phone"),
    ];
    let mapping = ColumnMapping::new().with(1, "Phone").with(2, "Phone");
    let columns = vec!["Phone".to_string()];

    let result = validate_mapping(&mapping, &placeholders, &columns, None);

    let dups: Vec<_> = result.errors_of(ErrorKind::DuplicateMapping).collect();
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].placeholder_index, 2);
    assert!(!result.is_valid());
}

#[test]
fn test_warnings_do_not_block() {
    let placeholders = vec![customer_name()];
    let dataset = DatasetAnalysis::new(["Name", "City"])
        .with_samples("Name", ["Alice"])
        .with_confidence(1, 10.0);
    let mapping = ColumnMapping::new().with(1, "Name");

    let result = validate_mapping(&mapping, &placeholders, &dataset.columns, Some(&dataset));

    assert!(result.is_valid());
    assert!(result.errors().is_empty());
    assert_eq!(result.warnings_of(WarningKind::LowConfidence).count(), 1);
    assert_eq!(result.warnings_of(WarningKind::UnusedColumn).count(), 1);
}

#[test]
fn test_user_edit_cycle() {
    let mapper = Mapper::new();
    let placeholders = vec![
        customer_name(),
        TemplateVariablePlaceholder::new(2, "City").with_context("in {{2}}"),
    ];
    let dataset = DatasetAnalysis::new(["Name", "Town"])
        .with_samples("Name", ["Alice"])
        .with_samples("Town", ["Pune"]);

    let mut mapping = mapper.propose(&placeholders, &dataset).mapping;
    mapping.assign(2, "Name");
    let result = mapper.revalidate(&mapping, &placeholders, &dataset);
    assert_eq!(result.errors_of(ErrorKind::DuplicateMapping).count(), 1);

    mapping.assign(2, "Town");
    let result = mapper.revalidate(&mapping, &placeholders, &dataset);
    assert!(result.is_valid());
}

// =============================================================================
// Shape, Phone and Preview Checks
// =============================================================================

#[test]
fn test_shape_excess_columns() {
    let result = validate_csv_counts(2, 1, 1);
    assert!(result.is_valid);
    assert!(result.message.contains("excess"));
}

#[test]
fn test_phone_selection_advisory() {
    let dataset = name_phone_dataset();
    let phones = detect_phone_columns(&dataset.columns, &dataset);

    assert!(validate_phone_column("Phone", &dataset.columns, &phones).is_valid);
    let advisory = validate_phone_column("Name", &dataset.columns, &phones);
    assert!(advisory.is_valid);
    assert!(advisory.message.contains("may not"));
    assert!(!validate_phone_column("", &dataset.columns, &phones).is_valid);
}

#[test]
fn test_preview_rows_flagged() {
    let rows = vec![
        PreviewRow { to: "+919999999999".into(), is_valid: true, ..Default::default() },
        PreviewRow { to: "".into(), is_valid: true, ..Default::default() },
    ];
    let result = validate_preview_data(&rows);
    assert_eq!(result.invalid_rows, vec![1]);
    assert_eq!(result.errors.len(), 1);
}

// =============================================================================
// Substitution
// =============================================================================

#[test]
fn test_substitution_noop() {
    let out = substitute_template_text(&SubstitutionInput::new("Hi {{1}}"));
    assert_eq!(out, "Hi {{1}}");
}

#[test]
fn test_substitution_mapping_hint() {
    let mut mappings = PlaceholderResolutionMapping::new();
    mappings.insert(1, ResolutionSource::customer("name"));

    let out = substitute_template_text(&SubstitutionInput::new("Hi {{1}}").with_mappings(&mappings));
    assert_eq!(out, "Hi [customer.name]");
}

#[test]
fn test_substitution_user_value_wins() {
    let mut mappings = PlaceholderResolutionMapping::new();
    mappings.insert(1, ResolutionSource::customer("name"));
    let user: HashMap<u32, String> = [(1, "Alice".to_string())].into_iter().collect();

    let input = SubstitutionInput::new("Hi {{1}}")
        .with_mappings(&mappings)
        .with_user_values(&user);
    assert_eq!(substitute_template_text(&input), "Hi Alice");
}
