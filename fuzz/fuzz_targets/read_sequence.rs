#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sbf_decoder::{BinaryDecoder, DecodeError, DecoderConfig};
use sbf_types::FixedSchema;

// Fuzz target: arbitrary sequences of reads and skips over one stream.
//
// Every call must consume only its own bytes, so the remaining length
// never grows and an error ends the sequence cleanly.
#[derive(Arbitrary, Debug)]
enum Op {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    Bytes,
    Fixed(u8),
    SkipString,
    SkipBytes,
    SkipFixed(u8),
}

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    ops: Vec<Op>,
    stream: &'a [u8],
}

fn apply(decoder: &mut BinaryDecoder<&[u8]>, op: &Op) -> Result<(), DecodeError> {
    match op {
        Op::Boolean => decoder.read_boolean().map(drop),
        Op::Int => decoder.read_int().map(drop),
        Op::Long => decoder.read_long().map(drop),
        Op::Float => decoder.read_f32().map(drop),
        Op::Double => decoder.read_f64().map(drop),
        Op::String => decoder.read_string().map(drop),
        Op::Bytes => decoder.read_bytes().map(drop),
        Op::Fixed(size) => {
            let schema = FixedSchema::new("fuzz.Fixed", usize::from(*size));
            let value = decoder.read_fixed(&schema)?;
            assert_eq!(value.len(), usize::from(*size));
            Ok(())
        }
        Op::SkipString => decoder.skip_string(),
        Op::SkipBytes => decoder.skip_bytes(),
        Op::SkipFixed(size) => decoder.skip_fixed(usize::from(*size)),
    }
}

fuzz_target!(|input: Input<'_>| {
    let config = DecoderConfig::default().with_max_length(1 << 20);
    let mut decoder = BinaryDecoder::with_config(input.stream, config);

    for op in &input.ops {
        let before = decoder.get_ref().len();
        if apply(&mut decoder, op).is_err() {
            break;
        }
        assert!(decoder.get_ref().len() <= before);
    }
});
