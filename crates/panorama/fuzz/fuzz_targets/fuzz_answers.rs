//! Fuzz target for questionnaire cell decoding.
//!
//! This fuzzer tests that the answer parser:
//! 1. Never panics on any cell contents
//! 2. Is deterministic for the same cell

#![no_main]

use libfuzzer_sys::fuzz_target;
use panorama::parse_answers;

fuzz_target!(|data: &[u8]| {
    let cell = String::from_utf8_lossy(data);

    let first = parse_answers(Some(&cell), "habits");
    let second = parse_answers(Some(&cell), "habits");
    assert_eq!(first, second);

    for item in &first {
        let _ = item.value.to_string();
    }
});
