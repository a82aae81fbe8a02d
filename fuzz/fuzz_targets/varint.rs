#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: LEB128 and zig-zag varint decoding from a slice.
//
// Catches bugs in:
// - VarintTooLong (>10 continuation bytes)
// - Zero-length input
// - Malformed continuation bits
// - Zig-zag mapping at i64::MIN / i64::MAX
fuzz_target!(|data: &[u8]| {
    let unsigned = sbf_wire::varint::decode_varint(data);
    let signed = sbf_wire::varint::decode_long(data);

    // Both decoders must agree on how many bytes the varint occupies.
    match (unsigned, signed) {
        (Ok((_, a)), Ok((_, b))) => assert_eq!(a, b),
        (Err(a), Err(b)) => assert_eq!(a, b),
        (a, b) => panic!("decoders disagree: {a:?} vs {b:?}"),
    }
});
