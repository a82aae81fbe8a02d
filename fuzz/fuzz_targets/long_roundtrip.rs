#![no_main]

use libfuzzer_sys::fuzz_target;
use sbf_decoder::BinaryDecoder;
use sbf_wire::varint::{encode_long, MAX_VARINT_BYTES};

// Fuzz target: zig-zag long encode -> stream decode roundtrip.
//
// Takes 8 bytes of fuzz input as an i64, encodes it, then reads it back
// through BinaryDecoder and asserts the value and the bytes consumed.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let value = i64::from_le_bytes(data[..8].try_into().unwrap());

    let mut buf = [0u8; MAX_VARINT_BYTES];
    let encoded_len = encode_long(value, &mut buf);

    let mut stream = buf[..encoded_len].to_vec();
    stream.push(0xEE);

    let mut decoder = BinaryDecoder::new(stream.as_slice());
    assert_eq!(decoder.read_long().unwrap(), value);
    assert_eq!(decoder.into_inner(), &[0xEE]);
});
