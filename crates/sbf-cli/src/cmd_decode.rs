/// Implementation of `sbf decode`.
///
/// Reads a file into memory, then decodes values from it in the order
/// given by `--types`, printing one line per value. With `--repeat` the
/// type list is applied again and again until the file is exhausted, which
/// suits files holding a run of same-shaped records.
///
/// # Output formats
///
/// ```text
/// ┌───────┬───────────────────────────────────────────────────────────────┐
/// │ Mode  │ Line                                                          │
/// ├───────┼───────────────────────────────────────────────────────────────┤
/// │ text  │    0 @0      string   "hello"                   (default)     │
/// │ json  │ {"index":0,"offset":0,"type":"string","value":"hello"}        │
/// └───────┴───────────────────────────────────────────────────────────────┘
/// ```
///
/// `bytes` and `fixed` values print as lowercase hex. Non-finite floats
/// have no JSON number form, so `--json` emits them as strings
/// (`"NaN"`, `"inf"`, `"-inf"`).
use std::fmt;
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result, anyhow, bail};
use sbf_decoder::{BinaryDecoder, DecodeError, DecoderConfig};
use sbf_types::FixedSchema;
use serde::Serialize;
use serde_json::Value;

use crate::DecodeArgs;

/// One entry of the `--types` list.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ValueType {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    Bytes,
    Fixed(FixedSchema),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean => f.write_str("boolean"),
            Self::Int => f.write_str("int"),
            Self::Long => f.write_str("long"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
            Self::String => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
            Self::Fixed(schema) => write!(f, "fixed:{}", schema.size),
        }
    }
}

/// A decoded value, ready for either output format.
#[derive(Debug, PartialEq)]
enum Decoded {
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl Decoded {
    fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Bool(*b),
            Self::Int(v) => Value::from(*v),
            Self::Long(v) => Value::from(*v),
            Self::Float(v) => float_json(f64::from(*v), v.to_string()),
            Self::Double(v) => float_json(*v, v.to_string()),
            Self::String(s) => Value::String(s.clone()),
            Self::Bytes(b) => Value::String(hex::encode(b)),
        }
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => f.write_str(&hex::encode(b)),
        }
    }
}

fn float_json(v: f64, fallback: String) -> Value {
    serde_json::Number::from_f64(v).map_or(Value::String(fallback), Value::Number)
}

#[derive(Serialize)]
struct JsonLine<'a> {
    index: usize,
    offset: usize,
    #[serde(rename = "type")]
    kind: String,
    value: &'a Value,
}

/// Run the `sbf decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the type list is invalid,
/// any value fails to decode, or stdout cannot be written. Values decoded
/// before the failure have already been printed.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let types = parse_types(&args.types)?;

    let mut config = DecoderConfig::default();
    if let Some(max_length) = args.max_length {
        config = config.with_max_length(max_length);
    }
    if let Some(threshold) = args.pooled_threshold {
        config = config.with_pooled_threshold(threshold);
    }

    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let total = bytes.len();
    let mut decoder = BinaryDecoder::with_config(bytes.as_slice(), config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut index = 0;

    loop {
        let cycle_start = decoder.get_ref().len();
        if args.repeat && cycle_start == 0 {
            break;
        }

        for ty in &types {
            let offset = total - decoder.get_ref().len();
            let value = decode_one(&mut decoder, ty)
                .with_context(|| format!("value {index} ({ty}) at offset {offset}"))?;

            if args.json {
                let line = JsonLine {
                    index,
                    offset,
                    kind: ty.to_string(),
                    value: &value.to_json(),
                };
                serde_json::to_writer(&mut out, &line).context("cannot write to stdout")?;
                writeln!(out).context("cannot write to stdout")?;
            } else {
                writeln!(out, "{index:>4} @{offset:<6} {:<8} {value}", ty.to_string())
                    .context("cannot write to stdout")?;
            }
            index += 1;
        }

        if !args.repeat {
            break;
        }
        if decoder.get_ref().len() == cycle_start {
            bail!("type list {:?} consumes no bytes; --repeat would never finish", args.types);
        }
    }

    let remaining = decoder.get_ref().len();
    if remaining > 0 {
        tracing::warn!(remaining, "trailing bytes left undecoded");
    }

    Ok(())
}

fn decode_one(decoder: &mut BinaryDecoder<&[u8]>, ty: &ValueType) -> Result<Decoded, DecodeError> {
    Ok(match ty {
        ValueType::Null => {
            decoder.read_null()?;
            Decoded::Null
        }
        ValueType::Boolean => Decoded::Boolean(decoder.read_boolean()?),
        ValueType::Int => Decoded::Int(decoder.read_int()?),
        ValueType::Long => Decoded::Long(decoder.read_long()?),
        ValueType::Float => Decoded::Float(decoder.read_f32()?),
        ValueType::Double => Decoded::Double(decoder.read_f64()?),
        ValueType::String => Decoded::String(decoder.read_string()?),
        ValueType::Bytes => Decoded::Bytes(decoder.read_bytes()?),
        ValueType::Fixed(schema) => Decoded::Bytes(decoder.read_fixed(schema)?.into_content()),
    })
}

// ── Flag parsers ──────────────────────────────────────────────────────────────

/// Parses the comma-separated `--types` string.
///
/// # Errors
///
/// Returns an error if any token is not a recognised type, a `fixed` size
/// is not a number, or the list is empty.
fn parse_types(s: &str) -> Result<Vec<ValueType>> {
    let types = s
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(parse_type)
        .collect::<Result<Vec<_>>>()?;

    if types.is_empty() {
        bail!("--types must name at least one value type");
    }
    Ok(types)
}

fn parse_type(token: &str) -> Result<ValueType> {
    if let Some(size) = token.strip_prefix("fixed:") {
        let size: usize = size
            .parse()
            .with_context(|| format!("invalid fixed size in {token:?}"))?;
        return Ok(ValueType::Fixed(FixedSchema::new(format!("fixed{size}"), size)));
    }

    match token.to_lowercase().as_str() {
        "null" => Ok(ValueType::Null),
        "boolean" | "bool" => Ok(ValueType::Boolean),
        "int" => Ok(ValueType::Int),
        "long" => Ok(ValueType::Long),
        "float" => Ok(ValueType::Float),
        "double" => Ok(ValueType::Double),
        "string" => Ok(ValueType::String),
        "bytes" => Ok(ValueType::Bytes),
        _ => Err(anyhow!(
            "unknown value type {token:?}; expected null|boolean|int|long|float|double|string|bytes|fixed:<size>"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_list() {
        let types = parse_types("long, string,fixed:16 ,double").unwrap();
        assert_eq!(types.len(), 4);
        assert_eq!(types[0], ValueType::Long);
        assert_eq!(types[1], ValueType::String);
        assert!(matches!(&types[2], ValueType::Fixed(s) if s.size == 16));
        assert_eq!(types[3].to_string(), "double");
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!(parse_types("long,uuid").is_err());
        assert!(parse_types("fixed:abc").is_err());
        assert!(parse_types(" , ").is_err());
    }

    #[test]
    fn decodes_each_type() {
        let bytes = [
            0x01, // boolean true
            0x54, // long 42
            0x00, 0x00, 0xC0, 0x7F, // f32 NaN
            0x04, 0xAB, 0xCD, // bytes [ab cd]
            0x02, b'o', b'k', // fixed:3
        ];
        let mut decoder = BinaryDecoder::new(&bytes[..]);

        assert_eq!(
            decode_one(&mut decoder, &ValueType::Boolean).unwrap(),
            Decoded::Boolean(true)
        );
        assert_eq!(
            decode_one(&mut decoder, &ValueType::Long).unwrap(),
            Decoded::Long(42)
        );

        let nan = decode_one(&mut decoder, &ValueType::Float).unwrap();
        assert_eq!(nan.to_json(), Value::String("NaN".into()));

        let raw = decode_one(&mut decoder, &ValueType::Bytes).unwrap();
        assert_eq!(raw.to_string(), "abcd");

        let fixed = parse_type("fixed:3").unwrap();
        assert_eq!(
            decode_one(&mut decoder, &fixed).unwrap(),
            Decoded::Bytes(vec![0x02, b'o', b'k'])
        );
    }

    #[test]
    fn json_line_shape() {
        let value = Decoded::String("hi".into()).to_json();
        let line = JsonLine {
            index: 3,
            offset: 17,
            kind: "string".into(),
            value: &value,
        };
        assert_eq!(
            serde_json::to_string(&line).unwrap(),
            r#"{"index":3,"offset":17,"type":"string","value":"hi"}"#
        );
    }
}
