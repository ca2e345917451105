#![no_main]

use libfuzzer_sys::fuzz_target;

use verso::dom::parse_fragment;
use verso::extractor::{extract, unit_values};
use verso::markdown;
use verso::reassembler::reassemble;
use verso::sanitizer::{SanitizationPolicy, sanitize};

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let policy = SanitizationPolicy::standard();

    // None of these may panic.
    let _ = sanitize(&input, &policy);

    let fragment = parse_fragment(&input);
    let units = extract(&fragment);
    let _ = reassemble(&fragment, &units, &unit_values(&units), &policy);

    let _ = markdown::render(&input, &policy);
});
