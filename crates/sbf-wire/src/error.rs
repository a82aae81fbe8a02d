/// Errors raised by the wire-level codecs in this crate.
///
/// These only describe malformed or truncated byte slices. Stream-level
/// conditions (a source running dry mid-value) are reported by the
/// decoder crate, which wraps this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Varint encoding exceeded 10 bytes without terminating.
    #[error("varint too long: exceeded 10-byte limit")]
    VarintTooLong,

    /// Input ended before a complete varint could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },
}

// The offset in UnexpectedEof is the byte position from the start of the
// slice handed to the codec, not from the start of the stream.
