//! Variable-length integers.
//!
//! Every `int`, `long` and length prefix is a zig-zag mapped value written
//! as unsigned LEB128: seven data bits per byte, least significant group
//! first, with the high bit set on every byte except the last.
//!
//! ```text
//!   i64 ──zigzag──► u64 ──LEB128──► 1..=10 bytes
//!
//!   300 (u64)  =  0b10_0101100
//!                   ───┬──  ───┬───
//!                      │       └─► 0xAC  (0x2C | continuation)
//!                      └─────────► 0x02
//! ```

use crate::error::WireError;

/// Longest encoding of a `u64`: ⌈64 / 7⌉ bytes.
pub const MAX_VARINT_BYTES: usize = 10;

const DATA_BITS: u64 = 0x7F;
const CONTINUATION: u8 = 0x80;

/// Write `value` as unsigned LEB128 into the front of `buf`.
///
/// Returns the number of bytes written (1–10).
///
/// # Panics
///
/// Panics if `buf` is too short for the encoding. A [`MAX_VARINT_BYTES`]
/// buffer always suffices.
#[allow(clippy::cast_possible_truncation)]
pub fn encode_varint(mut value: u64, buf: &mut [u8]) -> usize {
    let mut written = 0;
    while value > DATA_BITS {
        buf[written] = (value & DATA_BITS) as u8 | CONTINUATION;
        value >>= 7;
        written += 1;
    }
    buf[written] = value as u8;
    written + 1
}

/// Read one unsigned LEB128 value from the front of `buf`.
///
/// Returns `(value, bytes_consumed)`. Bytes after the terminating byte are
/// ignored.
///
/// # Errors
///
/// - [`WireError::VarintTooLong`] if the first [`MAX_VARINT_BYTES`] bytes
///   all carry the continuation bit, or the tenth byte holds bits beyond
///   the 64th.
/// - [`WireError::UnexpectedEof`] if `buf` ends before a terminating byte.
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), WireError> {
    let mut value = 0u64;

    for (idx, &byte) in buf.iter().take(MAX_VARINT_BYTES).enumerate() {
        // only the lowest bit of the tenth byte lands inside a u64
        if idx == MAX_VARINT_BYTES - 1 && byte > 1 {
            return Err(WireError::VarintTooLong);
        }
        value |= (u64::from(byte) & DATA_BITS) << (7 * idx);
        if byte & CONTINUATION == 0 {
            return Ok((value, idx + 1));
        }
    }

    if buf.len() >= MAX_VARINT_BYTES {
        Err(WireError::VarintTooLong)
    } else {
        Err(WireError::UnexpectedEof { offset: buf.len() })
    }
}

/// Map a signed value onto the unsigned varint domain.
///
/// Small magnitudes of either sign stay small:
///
/// ```text
///    0 → 0     -1 → 1     1 → 2     -2 → 3     2 → 4 ...
/// ```
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Encode a signed `long` (zig-zag + LEB128) into `buf`.
///
/// This is the encoding used for every length prefix in the format.
///
/// | Value | Encoded bytes  |
/// |-------|----------------|
/// | 0     | `[0x00]`       |
/// | -1    | `[0x01]`       |
/// | 1     | `[0x02]`       |
/// | -64   | `[0x7F]`       |
/// | 64    | `[0x80, 0x01]` |
///
/// # Panics
///
/// Panics if `buf` is shorter than the required encoding length.
pub fn encode_long(value: i64, buf: &mut [u8]) -> usize {
    encode_varint(zigzag_encode(value), buf)
}

/// Decode a signed `long` (zig-zag + LEB128) from `buf`.
///
/// # Errors
///
/// Same as [`decode_varint`].
pub fn decode_long(buf: &[u8]) -> Result<(i64, usize), WireError> {
    let (raw, consumed) = decode_varint(buf)?;
    Ok((zigzag_decode(raw), consumed))
}
