use std::io::Read;
use std::sync::Arc;

use sbf_types::{FixedSchema, FixedValue};
use sbf_wire::WireError;
use sbf_wire::float::{DOUBLE_SIZE, FLOAT_SIZE, f32_from_wire, f64_from_wire};
use sbf_wire::varint::{MAX_VARINT_BYTES, decode_long};

use crate::bounded::{read_exact, read_vec, rebase_end_of_stream};
use crate::config::{BufferTier, DecoderConfig, INLINE_STRING_CAPACITY};
use crate::error::DecodeError;
use crate::pool::ScratchPool;

/// Largest scratch loan used while skipping a value.
const SKIP_CHUNK: usize = 4096;

/// Blocking decoder for primitive values on a byte stream.
///
/// A `BinaryDecoder` owns (or mutably borrows, via `&mut R`) one source
/// and reads values from it strictly in stream order. Each call consumes
/// exactly the bytes of the value it decodes, never more, so calls can be
/// interleaved freely with other readers of the same stream.
///
/// ```text
/// ┌─────────┬──────────────────────────────────────────────────┐
/// │ Method  │ Bytes consumed                                   │
/// ├─────────┼──────────────────────────────────────────────────┤
/// │ boolean │ 1                                                │
/// │ int     │ 1–10 (zig-zag varint, must fit in i32)           │
/// │ long    │ 1–10 (zig-zag varint)                            │
/// │ f32     │ 4, little-endian IEEE-754                        │
/// │ f64     │ 8, little-endian IEEE-754                        │
/// │ string  │ long length L, then L bytes of UTF-8             │
/// │ bytes   │ long length L, then L raw bytes                  │
/// │ fixed   │ schema.size raw bytes                            │
/// └─────────┴──────────────────────────────────────────────────┘
/// ```
///
/// All methods take `&mut self`, so a decoder cannot be used from two
/// threads at once. The only thing decoders share is their
/// [`ScratchPool`], which is thread-safe.
///
/// # Example
///
/// ```rust
/// use sbf_decoder::BinaryDecoder;
///
/// // length 5 (zig-zag 10), "hello", then 1.0f32
/// let bytes = [0x0A, b'h', b'e', b'l', b'l', b'o', 0x00, 0x00, 0x80, 0x3F];
/// let mut decoder = BinaryDecoder::new(&bytes[..]);
///
/// assert_eq!(decoder.read_string().unwrap(), "hello");
/// assert_eq!(decoder.read_f32().unwrap(), 1.0);
/// ```
pub struct BinaryDecoder<R> {
    reader: R,
    config: DecoderConfig,
    pool: Arc<ScratchPool>,
}

impl<R: Read> BinaryDecoder<R> {
    /// Create a decoder with the default configuration and the shared pool.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self::with_pool(reader, config, ScratchPool::shared())
    }

    /// Create a decoder that borrows scratch buffers from `pool` instead of
    /// the process-wide one.
    ///
    /// A `pooled_threshold` above the pool's
    /// [`max_buffer_len`](ScratchPool::max_buffer_len) is lowered to it.
    /// Loans bigger than that would be freed on return instead of reused.
    pub fn with_pool(reader: R, mut config: DecoderConfig, pool: Arc<ScratchPool>) -> Self {
        let retained = pool.max_buffer_len();
        if config.pooled_threshold > retained {
            tracing::warn!(
                requested = config.pooled_threshold,
                retained,
                "pooled threshold exceeds scratch pool retention, clamping"
            );
            config.pooled_threshold = retained;
        }

        Self {
            reader,
            config,
            pool,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// `null` has no bytes on the wire.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the signature uniform.
    pub fn read_null(&mut self) -> Result<(), DecodeError> {
        Ok(())
    }

    /// Read a single-byte boolean.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidBoolean`] for any byte other than 0 or 1.
    /// - [`DecodeError::EndOfStream`] if the source is exhausted.
    pub fn read_boolean(&mut self) -> Result<bool, DecodeError> {
        let mut byte = [0u8; 1];
        read_exact(&mut self.reader, &mut byte)?;
        match byte[0] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBoolean { value }),
        }
    }

    /// Read a zig-zag varint `int`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::IntOutOfRange`] if the value needs more than 32 bits,
    /// plus everything [`read_long`](Self::read_long) can return.
    pub fn read_int(&mut self) -> Result<i32, DecodeError> {
        let value = self.read_long()?;
        i32::try_from(value).map_err(|_| DecodeError::IntOutOfRange { value })
    }

    /// Read a zig-zag varint `long`.
    ///
    /// The varint is pulled from the source one byte at a time so nothing
    /// past its final byte is consumed.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Wire`] wrapping [`WireError::VarintTooLong`] if ten
    ///   bytes pass without a terminating byte, or the tenth overflows 64 bits.
    /// - [`DecodeError::EndOfStream`] if the source ends mid-varint.
    pub fn read_long(&mut self) -> Result<i64, DecodeError> {
        let mut varint_buf = [0u8; MAX_VARINT_BYTES];
        let mut len = 0;

        loop {
            let mut byte = [0u8; 1];
            read_exact(&mut self.reader, &mut byte)?;
            varint_buf[len] = byte[0];
            len += 1;

            // MSB clear means this is the last byte
            if byte[0] & 0x80 == 0 {
                break;
            }

            if len >= MAX_VARINT_BYTES {
                return Err(WireError::VarintTooLong.into());
            }
        }

        let (value, _) = decode_long(&varint_buf[..len])?;
        Ok(value)
    }

    /// Read a 4-byte little-endian IEEE-754 `float`.
    ///
    /// The bits are reinterpreted as-is, so NaN payloads and infinities
    /// survive unchanged.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EndOfStream`] if fewer than 4 bytes remain.
    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        let mut bytes = [0u8; FLOAT_SIZE];
        read_exact(&mut self.reader, &mut bytes)?;
        Ok(f32_from_wire(bytes))
    }

    /// Read an 8-byte little-endian IEEE-754 `double`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EndOfStream`] if fewer than 8 bytes remain.
    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        let mut bytes = [0u8; DOUBLE_SIZE];
        read_exact(&mut self.reader, &mut bytes)?;
        Ok(f64_from_wire(bytes))
    }

    /// Read and validate a string/bytes length prefix.
    ///
    /// Only the prefix itself is consumed, including when it is rejected.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::NegativeLength`] if the prefix is below zero.
    /// - [`DecodeError::UnsupportedLength`] if it exceeds
    ///   [`DecoderConfig::max_length`].
    /// - Anything [`read_long`](Self::read_long) returns.
    pub fn read_length(&mut self) -> Result<usize, DecodeError> {
        let length = self.read_long()?;
        if length < 0 {
            tracing::debug!(length, "rejecting negative length prefix");
            return Err(DecodeError::NegativeLength { length });
        }

        let limit = self.config.max_length;
        let unsupported = || {
            tracing::debug!(length, limit, "rejecting oversized length prefix");
            DecodeError::UnsupportedLength { length, limit }
        };

        if length.unsigned_abs() > limit {
            return Err(unsupported());
        }
        usize::try_from(length).map_err(|_| unsupported())
    }

    /// Read a length-prefixed UTF-8 string.
    ///
    /// The body is buffered according to its declared length:
    ///
    /// ```text
    ///   L ≤ 256               stack array, copied into the result
    ///   L ≤ pooled_threshold  scratch pool loan, copied into the result
    ///   otherwise             own vector, becomes the result as-is
    /// ```
    ///
    /// A pool loan is back in the pool before this returns, whether it
    /// returns a string or an error.
    ///
    /// # Errors
    ///
    /// - Everything [`read_length`](Self::read_length) returns.
    /// - [`DecodeError::EndOfStream`] if the body is truncated. No partial
    ///   string is produced.
    /// - [`DecodeError::InvalidEncoding`] if the body is not UTF-8.
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_length()?;
        let tier = self.config.tier_for(len);
        tracing::trace!(len, ?tier, "decoding string");

        match tier {
            BufferTier::Inline => {
                let mut buf = [0u8; INLINE_STRING_CAPACITY];
                let body = &mut buf[..len];
                read_exact(&mut self.reader, body)?;
                Ok(std::str::from_utf8(body)?.to_owned())
            }
            BufferTier::Pooled => {
                let mut scratch = self.pool.borrow(len);
                read_exact(&mut self.reader, &mut scratch)?;
                Ok(std::str::from_utf8(&scratch)?.to_owned())
            }
            BufferTier::Large => {
                let body = read_vec(&mut self.reader, len)?;
                String::from_utf8(body)
                    .map_err(|e| DecodeError::InvalidEncoding(e.utf8_error()))
            }
        }
    }

    /// Read a length-prefixed byte string.
    ///
    /// # Errors
    ///
    /// Everything [`read_length`](Self::read_length) returns, and
    /// [`DecodeError::EndOfStream`] if the body is truncated.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, DecodeError> {
        let len = self.read_length()?;
        read_vec(&mut self.reader, len)
    }

    /// Read a fixed value of `schema.size` bytes.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EndOfStream`] if fewer than `schema.size` bytes remain.
    pub fn read_fixed(&mut self, schema: &FixedSchema) -> Result<FixedValue, DecodeError> {
        let mut value = FixedValue::new(schema.clone());
        read_exact(&mut self.reader, value.content_mut())?;
        Ok(value)
    }

    /// Read a fixed value into an existing [`FixedValue`], reusing its
    /// storage. The value's length (and so its schema) decides how many
    /// bytes are read.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EndOfStream`] if the stream is too short. `value` is
    /// left unchanged in that case.
    pub fn read_fixed_into(&mut self, value: &mut FixedValue) -> Result<(), DecodeError> {
        let mut scratch = self.pool.borrow(value.len());
        read_exact(&mut self.reader, &mut scratch)?;
        value.set_content(&scratch)?;
        Ok(())
    }

    /// Skip a `float` without decoding it.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EndOfStream`] if fewer than 4 bytes remain.
    pub fn skip_f32(&mut self) -> Result<(), DecodeError> {
        read_exact(&mut self.reader, &mut [0u8; FLOAT_SIZE])
    }

    /// Skip a `double` without decoding it.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EndOfStream`] if fewer than 8 bytes remain.
    pub fn skip_f64(&mut self) -> Result<(), DecodeError> {
        read_exact(&mut self.reader, &mut [0u8; DOUBLE_SIZE])
    }

    /// Skip a string without allocating it or validating its UTF-8.
    ///
    /// # Errors
    ///
    /// Same length and truncation errors as [`read_string`](Self::read_string).
    pub fn skip_string(&mut self) -> Result<(), DecodeError> {
        let len = self.read_length()?;
        self.skip_exact(len)
    }

    /// Skip a length-prefixed byte string.
    ///
    /// # Errors
    ///
    /// Same as [`skip_string`](Self::skip_string).
    pub fn skip_bytes(&mut self) -> Result<(), DecodeError> {
        self.skip_string()
    }

    /// Skip a fixed value of `size` bytes.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EndOfStream`] if fewer than `size` bytes remain.
    pub fn skip_fixed(&mut self, size: usize) -> Result<(), DecodeError> {
        self.skip_exact(size)
    }

    /// Consume and discard exactly `len` bytes through a bounded scratch loan.
    fn skip_exact(&mut self, len: usize) -> Result<(), DecodeError> {
        if len == 0 {
            return Ok(());
        }

        let mut scratch = self.pool.borrow(len.min(SKIP_CHUNK));
        let mut skipped = 0;
        while skipped < len {
            let step = (len - skipped).min(scratch.len());
            read_exact(&mut self.reader, &mut scratch[..step])
                .map_err(|e| rebase_end_of_stream(e, len, skipped))?;
            skipped += step;
        }
        Ok(())
    }
}
