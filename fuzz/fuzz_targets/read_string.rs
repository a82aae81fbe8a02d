#![no_main]

use libfuzzer_sys::fuzz_target;
use sbf_decoder::{BinaryDecoder, DecoderConfig};

// Fuzz target: length-prefixed string decoding.
//
// The ceiling keeps hostile prefixes from turning into slow runs; the
// large tier is still reached because the pooled threshold is lowered.
//
// Catches bugs in:
// - Negative and oversized length prefixes
// - Tier selection at the inline / pooled / large boundaries
// - UTF-8 validation
// - Over-reading past the declared body
fuzz_target!(|data: &[u8]| {
    let config = DecoderConfig::default()
        .with_pooled_threshold(1024)
        .with_max_length(1 << 20);
    let mut decoder = BinaryDecoder::with_config(data, config);

    while let Ok(s) = decoder.read_string() {
        let rest = decoder.get_ref().len();
        assert!(s.len() + rest < data.len());
    }
});
