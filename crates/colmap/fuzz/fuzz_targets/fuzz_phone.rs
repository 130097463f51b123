//! Fuzz target for phone column detection and type scoring.
//!
//! Regex-based detection must not panic on pathological samples and must
//! keep confidences within bounds.

#![no_main]

use arbitrary::Arbitrary;
use colmap::inference::{currency_score, date_score, text_score, url_score};
use colmap::{detect_phone_columns, DatasetAnalysis};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    columns: Vec<(String, Vec<String>)>,
}

fuzz_target!(|input: Input| {
    let mut dataset = DatasetAnalysis::default();
    for (name, samples) in input.columns.into_iter().take(32) {
        let samples: Vec<String> = samples.into_iter().take(16).collect();
        for score in [
            date_score(&samples),
            currency_score(&samples),
            url_score(&samples),
            text_score(&samples),
        ] {
            assert!((0.0..=1.0).contains(&score));
        }
        if !dataset.has_column(&name) {
            dataset.columns.push(name.clone());
        }
        dataset = dataset.with_samples(name, samples);
    }

    for suggestion in detect_phone_columns(&dataset.columns, &dataset) {
        assert!((0.0..=100.0).contains(&suggestion.confidence));
    }
});
