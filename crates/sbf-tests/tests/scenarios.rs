//! End-to-end decoding scenarios.
//!
//! Each test feeds a complete byte stream to a [`BinaryDecoder`] and checks
//! both the decoded value and how much of the stream was consumed. The
//! byte-level fixtures are written as hex so they can be compared directly
//! against `sbf inspect` output.

use sbf_decoder::{BinaryDecoder, DecodeError};
use sbf_tests::{StreamBuilder, hex_bytes};
use sbf_types::FixedSchema;

// ── Floats ────────────────────────────────────────────────────────────────────

#[test]
fn single_precision_one() {
    let bytes = hex_bytes("00 00 80 3f");
    let mut decoder = BinaryDecoder::new(bytes.as_slice());
    assert_eq!(decoder.read_f32().unwrap().to_bits(), 1.0f32.to_bits());
    assert!(decoder.into_inner().is_empty());
}

#[test]
fn double_precision_one() {
    let bytes = hex_bytes("00 00 00 00 00 00 f0 3f");
    let mut decoder = BinaryDecoder::new(bytes.as_slice());
    assert_eq!(decoder.read_f64().unwrap().to_bits(), 1.0f64.to_bits());
}

#[test]
fn special_floats_survive_unchanged() {
    let stream = StreamBuilder::new()
        .f32(f32::INFINITY)
        .f32(f32::NEG_INFINITY)
        .raw(&0x7FA0_0001u32.to_le_bytes())
        .f64(f64::NEG_INFINITY)
        .raw(&0xFFF8_0000_DEAD_BEEFu64.to_le_bytes())
        .finish();

    let mut decoder = BinaryDecoder::new(stream.as_slice());
    assert_eq!(decoder.read_f32().unwrap(), f32::INFINITY);
    assert_eq!(decoder.read_f32().unwrap(), f32::NEG_INFINITY);
    assert_eq!(decoder.read_f32().unwrap().to_bits(), 0x7FA0_0001);
    assert_eq!(decoder.read_f64().unwrap(), f64::NEG_INFINITY);
    assert_eq!(decoder.read_f64().unwrap().to_bits(), 0xFFF8_0000_DEAD_BEEF);
}

// ── Strings ───────────────────────────────────────────────────────────────────

#[test]
fn hello() {
    let bytes = hex_bytes("0a 68 65 6c 6c 6f");
    let mut decoder = BinaryDecoder::new(bytes.as_slice());
    assert_eq!(decoder.read_string().unwrap(), "hello");
    assert!(decoder.get_ref().is_empty());
}

#[test]
fn three_of_five_bytes() {
    let bytes = hex_bytes("0a 68 65 6c");
    let mut decoder = BinaryDecoder::new(bytes.as_slice());
    let err = decoder.read_string().unwrap_err();
    assert!(
        matches!(
            err,
            DecodeError::EndOfStream {
                needed: 5,
                filled: 3
            }
        ),
        "expected EndOfStream, got {err:?}"
    );
}

#[test]
fn negative_prefix_stops_after_prefix() {
    let bytes = StreamBuilder::new().long(-1).raw(b"rest").finish();
    let mut decoder = BinaryDecoder::new(bytes.as_slice());
    assert!(matches!(
        decoder.read_string(),
        Err(DecodeError::NegativeLength { length: -1 })
    ));
    assert_eq!(decoder.into_inner(), b"rest");
}

// ── Mixed records ─────────────────────────────────────────────────────────────

/// A record of `{ id: long, name: string, score: double, tag: fixed(4),
/// active: boolean }`, written three times.
#[test]
fn repeated_record() {
    let mut builder = StreamBuilder::new();
    for i in 0..3i64 {
        builder = builder
            .long(i * 1000 - 1)
            .string(&format!("user-{i}"))
            .f64(f64::from(i as i32) / 4.0)
            .raw(&[i as u8; 4])
            .boolean(i % 2 == 0);
    }
    let bytes = builder.finish();

    let tag = FixedSchema::new("org.example.Tag", 4);
    let mut decoder = BinaryDecoder::new(bytes.as_slice());

    for i in 0..3i64 {
        assert_eq!(decoder.read_long().unwrap(), i * 1000 - 1);
        assert_eq!(decoder.read_string().unwrap(), format!("user-{i}"));
        assert_eq!(decoder.read_f64().unwrap(), f64::from(i as i32) / 4.0);
        assert_eq!(decoder.read_fixed(&tag).unwrap().content(), &[i as u8; 4]);
        assert_eq!(decoder.read_boolean().unwrap(), i % 2 == 0);
    }
    assert!(decoder.get_ref().is_empty());
}

#[test]
fn skipping_fields_of_a_record() {
    let bytes = StreamBuilder::new()
        .long(7)
        .string(&"ignored ".repeat(200))
        .bytes(&[0u8; 9000])
        .f64(0.5)
        .string("kept")
        .finish();

    let mut decoder = BinaryDecoder::new(bytes.as_slice());
    assert_eq!(decoder.read_long().unwrap(), 7);
    decoder.skip_string().unwrap();
    decoder.skip_bytes().unwrap();
    decoder.skip_f64().unwrap();
    assert_eq!(decoder.read_string().unwrap(), "kept");
}
