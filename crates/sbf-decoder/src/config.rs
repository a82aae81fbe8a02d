/// Strings up to this many bytes are decoded through a stack buffer.
pub const INLINE_STRING_CAPACITY: usize = 256;

/// Default upper bound of the pooled string tier.
pub const DEFAULT_POOLED_THRESHOLD: usize = 4096;

/// Largest contiguous allocation Rust allows on this target.
#[allow(clippy::cast_sign_loss)]
pub const PLATFORM_MAX_LENGTH: u64 = isize::MAX as u64;

/// Configuration for a [`BinaryDecoder`](crate::BinaryDecoder).
///
/// Controls where a string body is buffered while it is read and how large
/// a length prefix the decoder is willing to honour.
///
/// ```text
/// ┌──────────────────┬─────────────┬──────────────────────────────────────┐
/// │ Field            │ Default     │ Purpose                              │
/// ├──────────────────┼─────────────┼──────────────────────────────────────┤
/// │ pooled_threshold │ 4096        │ largest string read via the pool     │
/// │ max_length       │ isize::MAX  │ hard ceiling on any length prefix    │
/// └──────────────────┴─────────────┴──────────────────────────────────────┘
/// ```
///
/// The thresholds only affect memory behaviour. Every tier decodes the
/// same bytes to the same string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Strings longer than [`INLINE_STRING_CAPACITY`] and no longer than
    /// this are read into a buffer borrowed from the scratch pool. Longer
    /// strings get a buffer of their own.
    ///
    /// A decoder lowers this to its pool's
    /// [`max_buffer_len`](crate::ScratchPool::max_buffer_len), since the pool
    /// frees anything larger on return.
    pub pooled_threshold: usize,

    /// Length prefixes above this are rejected with
    /// [`DecodeError::UnsupportedLength`](crate::DecodeError::UnsupportedLength)
    /// before anything is allocated.
    pub max_length: u64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            pooled_threshold: DEFAULT_POOLED_THRESHOLD,
            max_length: PLATFORM_MAX_LENGTH,
        }
    }
}

impl DecoderConfig {
    #[must_use]
    pub fn with_pooled_threshold(mut self, pooled_threshold: usize) -> Self {
        self.pooled_threshold = pooled_threshold;
        self
    }

    /// Lower the length ceiling. Values above [`PLATFORM_MAX_LENGTH`] are
    /// clamped to it.
    #[must_use]
    pub fn with_max_length(mut self, max_length: u64) -> Self {
        self.max_length = max_length.min(PLATFORM_MAX_LENGTH);
        self
    }

    /// Which buffering tier a string body of `len` bytes goes through.
    #[must_use]
    pub fn tier_for(&self, len: usize) -> BufferTier {
        if len <= INLINE_STRING_CAPACITY {
            BufferTier::Inline
        } else if len <= self.pooled_threshold {
            BufferTier::Pooled
        } else {
            BufferTier::Large
        }
    }
}

/// Where a string body is held while it is read and validated.
///
/// ```text
///   0 ─────── 256 ──────────── pooled_threshold ──────────── max_length
///   │ Inline  │     Pooled     │            Large              │ rejected
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferTier {
    /// Stack array, no allocation beyond the returned `String`.
    Inline,
    /// Loan from the scratch pool, returned before the call completes.
    Pooled,
    /// Dedicated vector that becomes the returned `String` without a copy.
    Large,
}
