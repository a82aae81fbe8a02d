//! Shared fixtures for the SBF integration tests and benches.
//!
//! The workspace has no encoder crate, so [`StreamBuilder`] writes the
//! handful of wire forms the tests need directly, using the same `sbf-wire`
//! helpers the decoder reads with.

use sbf_wire::float::{f32_to_wire, f64_to_wire};
use sbf_wire::varint::{MAX_VARINT_BYTES, encode_long};

/// Builder for an encoded value stream.
///
/// ```rust
/// use sbf_tests::StreamBuilder;
///
/// let bytes = StreamBuilder::new().string("hello").f32(1.0).finish();
/// assert_eq!(bytes, [0x0A, b'h', b'e', b'l', b'l', b'o', 0x00, 0x00, 0x80, 0x3F]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StreamBuilder {
    buf: Vec<u8>,
}

impl StreamBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn boolean(mut self, value: bool) -> Self {
        self.buf.push(u8::from(value));
        self
    }

    #[must_use]
    pub fn long(mut self, value: i64) -> Self {
        let mut tmp = [0u8; MAX_VARINT_BYTES];
        let n = encode_long(value, &mut tmp);
        self.buf.extend_from_slice(&tmp[..n]);
        self
    }

    #[must_use]
    pub fn int(self, value: i32) -> Self {
        self.long(i64::from(value))
    }

    #[must_use]
    pub fn f32(mut self, value: f32) -> Self {
        self.buf.extend_from_slice(&f32_to_wire(value));
        self
    }

    #[must_use]
    pub fn f64(mut self, value: f64) -> Self {
        self.buf.extend_from_slice(&f64_to_wire(value));
        self
    }

    /// Length prefix followed by the UTF-8 bytes of `value`.
    #[must_use]
    pub fn string(self, value: &str) -> Self {
        self.bytes(value.as_bytes())
    }

    /// Length prefix followed by `value`.
    ///
    /// # Panics
    ///
    /// If `value` is longer than `i64::MAX` bytes.
    #[must_use]
    pub fn bytes(self, value: &[u8]) -> Self {
        let len = i64::try_from(value.len()).expect("length fits in i64");
        self.long(len).raw(value)
    }

    /// Append bytes verbatim, with no prefix.
    #[must_use]
    pub fn raw(mut self, value: &[u8]) -> Self {
        self.buf.extend_from_slice(value);
        self
    }

    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// ASCII text of exactly `len` bytes, cycling through the alphabet.
#[must_use]
pub fn ascii_text(len: usize) -> String {
    (b'a'..=b'z').cycle().take(len).map(char::from).collect()
}

/// Decode a hex fixture, ignoring whitespace.
///
/// # Panics
///
/// If `s` is not valid hex.
#[must_use]
pub fn hex_bytes(s: &str) -> Vec<u8> {
    let compact: String = s.split_whitespace().collect();
    hex::decode(compact).expect("valid hex fixture")
}
