use sbf_types::TypeError;
use sbf_wire::WireError;

/// Errors that can occur while decoding values from a byte stream.
///
/// Every variant is terminal for the call that raised it. Nothing is
/// retried internally: a truncated or corrupt stream does not heal by
/// reading again.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── EndOfStream        ← source returned 0 bytes before the value was complete
///   ├── NegativeLength     ← length prefix decoded below zero
///   ├── UnsupportedLength  ← length prefix above the configured ceiling
///   ├── InvalidEncoding    ← string body is not UTF-8
///   ├── InvalidBoolean     ← boolean byte other than 0 or 1
///   ├── IntOutOfRange      ← int varint does not fit in 32 bits
///   ├── Type(TypeError)    ← from sbf-types (fixed length / schema kind)
///   ├── Wire(WireError)    ← from sbf-wire varint parsing
///   └── Io(std::io::Error) ← from the underlying reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The source was exhausted while a value was still incomplete.
    ///
    /// `needed` is the size of the pending read and `filled` how much of
    /// it arrived before the source returned zero bytes.
    #[error("unexpected end of stream: needed {needed} bytes, got {filled}")]
    EndOfStream { needed: usize, filled: usize },

    /// A string or bytes length prefix was negative.
    #[error("negative length prefix: {length}")]
    NegativeLength { length: i64 },

    /// A length prefix exceeded the allocation ceiling.
    ///
    /// Raised before any buffer is sized, so a hostile prefix costs nothing.
    #[error("length prefix {length} exceeds the {limit}-byte limit")]
    UnsupportedLength { length: i64, limit: u64 },

    /// A string body was not valid UTF-8.
    #[error("invalid UTF-8 in string body: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    /// A boolean was encoded as something other than `0x00` or `0x01`.
    #[error("invalid boolean byte {value:#04X}")]
    InvalidBoolean { value: u8 },

    /// An `int` varint decoded to a value outside the 32-bit range.
    #[error("int value {value} does not fit in 32 bits")]
    IntOutOfRange { value: i64 },

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Wire(#[from] WireError),

    /// An I/O error from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
