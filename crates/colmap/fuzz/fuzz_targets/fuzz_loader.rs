//! Fuzz target for delimited file sampling.
//!
//! Arbitrary bytes must produce either a dataset or an error, never a panic.

#![no_main]

use colmap::DatasetLoader;
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::with_suffix(".csv") {
        if temp_file.write_all(data).is_ok() && temp_file.flush().is_ok() {
            if let Ok((dataset, source)) = DatasetLoader::new().load_file(temp_file.path()) {
                assert_eq!(dataset.column_count(), source.column_count);
                assert!(source.row_count > 0);
            }
        }
    }
});
