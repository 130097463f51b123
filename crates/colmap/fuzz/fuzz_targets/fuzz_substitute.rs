//! Fuzz target for template token substitution.
//!
//! Substitution must never panic, including on overflowing or malformed
//! tokens, and must be single-pass.

#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use colmap::{substitute_template_text, PlaceholderResolutionMapping, ResolutionSource, SubstitutionInput};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    user_values: Vec<(u32, String)>,
    sample_values: Vec<(u32, String)>,
    customer_fields: Vec<(u32, String)>,
}

fuzz_target!(|input: Input| {
    if input.text.len() > 10_000 {
        return;
    }

    let user: HashMap<u32, String> = input.user_values.into_iter().collect();
    let samples: HashMap<u32, String> = input.sample_values.into_iter().collect();
    let mut mappings = PlaceholderResolutionMapping::new();
    for (index, field) in input.customer_fields {
        mappings.insert(index, ResolutionSource::customer(field));
    }

    let bare = substitute_template_text(&SubstitutionInput::new(&input.text));
    assert_eq!(bare, input.text);

    let _ = substitute_template_text(
        &SubstitutionInput::new(&input.text)
            .with_user_values(&user)
            .with_sample_values(&samples)
            .with_mappings(&mappings),
    );
});
