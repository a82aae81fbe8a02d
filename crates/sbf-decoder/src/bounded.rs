use std::io::{self, Read};

use crate::error::DecodeError;

/// Step size for [`read_vec`]. The target vector never runs more than one
/// chunk ahead of the bytes that have actually arrived.
pub const READ_CHUNK: usize = 64 * 1024;

/// Fill `buf` completely from `source`.
///
/// Reads into the unfilled suffix of `buf` until it is full. A short but
/// positive read just means the source is slow and the loop carries on;
/// only a zero-byte read means the source is exhausted.
///
/// ```text
///   buf: [ filled ........ | unfilled ........... ]
///                          ^ next read lands here
/// ```
///
/// An empty `buf` succeeds without touching the source. Reads that fail
/// with [`io::ErrorKind::Interrupted`] are retried. There is no cap on the
/// number of reads and no timeout; a stalled source blocks the caller.
///
/// # Errors
///
/// - [`DecodeError::EndOfStream`] if the source returns 0 before `buf` is
///   full. The bytes that did arrive have been consumed.
/// - [`DecodeError::Io`] for any other I/O failure.
pub fn read_exact<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> Result<(), DecodeError> {
    let needed = buf.len();
    let mut filled = 0;

    while filled < needed {
        match source.read(&mut buf[filled..]) {
            Ok(0) => return Err(DecodeError::EndOfStream { needed, filled }),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(DecodeError::Io(e)),
        }
    }

    Ok(())
}

/// Read exactly `len` bytes into a new vector.
///
/// The vector grows [`READ_CHUNK`] bytes at a time as data arrives, so a
/// large declared length backed by a short stream fails with
/// [`DecodeError::EndOfStream`] long before the full length is allocated.
///
/// # Errors
///
/// Same as [`read_exact`]. An `EndOfStream` reports progress against the
/// whole `len`, not the chunk that failed.
pub fn read_vec<R: Read + ?Sized>(source: &mut R, len: usize) -> Result<Vec<u8>, DecodeError> {
    let mut buf = Vec::with_capacity(len.min(READ_CHUNK));

    while buf.len() < len {
        let start = buf.len();
        let step = (len - start).min(READ_CHUNK);
        buf.resize(start + step, 0);

        read_exact(source, &mut buf[start..]).map_err(|e| rebase_end_of_stream(e, len, start))?;
    }

    Ok(buf)
}

/// Restate an `EndOfStream` from one chunk of a larger read in terms of the
/// whole read: `needed` becomes `total` and `done` earlier bytes count as
/// filled. Other errors pass through.
pub(crate) fn rebase_end_of_stream(err: DecodeError, total: usize, done: usize) -> DecodeError {
    match err {
        DecodeError::EndOfStream { filled, .. } => DecodeError::EndOfStream {
            needed: total,
            filled: done + filled,
        },
        other => other,
    }
}
