//! Fuzz target for the survey file parser.
//!
//! This fuzzer tests that the CSV/TSV parser and store construction:
//! 1. Never panic on malformed input
//! 2. Handle all delimiter combinations
//! 3. Don't allocate unbounded memory

#![no_main]

use libfuzzer_sys::fuzz_target;
use panorama::{CatalogSpec, Dashboard, Parser};
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let parser = Parser::new();
            if let Ok((table, _)) = parser.parse_file(temp_file.path()) {
                // Any parsed table either builds a dashboard or reports an error
                let _ = Dashboard::from_table(table, &CatalogSpec::default());
            }
        }
    }
});
