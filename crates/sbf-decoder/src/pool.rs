use std::ops::{Deref, DerefMut};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

/// Process-wide pool behind [`ScratchPool::shared`].
static SHARED: LazyLock<Arc<ScratchPool>> = LazyLock::new(|| Arc::new(ScratchPool::new()));

/// A thread-safe store of reusable byte buffers.
///
/// Decoders borrow a buffer for the duration of one call and give it back
/// when the [`ScratchBuf`] loan is dropped, whichever way the call exits.
/// That makes release unconditional: an early `?` return drops the loan
/// just like a normal return does.
///
/// ```text
///   borrow(min) ──► ScratchBuf ──(drop)──► back on the free list
///                       │
///                       └── derefs to [u8] of exactly `min` bytes
/// ```
///
/// The pool only keeps a bounded number of buffers of bounded capacity.
/// Returned buffers over either limit are simply freed, so a burst of
/// large borrows cannot pin memory for the life of the process.
#[derive(Debug)]
pub struct ScratchPool {
    free: Mutex<Vec<Vec<u8>>>,
    max_buffers: usize,
    max_buffer_len: usize,
}

impl ScratchPool {
    /// Default number of idle buffers kept.
    pub const DEFAULT_MAX_BUFFERS: usize = 16;

    /// Default capacity above which a returned buffer is freed instead of kept.
    pub const DEFAULT_MAX_BUFFER_LEN: usize = 4096;

    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(Self::DEFAULT_MAX_BUFFERS, Self::DEFAULT_MAX_BUFFER_LEN)
    }

    /// Create a pool retaining at most `max_buffers` idle buffers, each with
    /// capacity no larger than `max_buffer_len`.
    #[must_use]
    pub fn with_limits(max_buffers: usize, max_buffer_len: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(max_buffers)),
            max_buffers,
            max_buffer_len,
        }
    }

    /// The pool shared by every decoder that was not given its own.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Borrow a buffer of exactly `min_size` bytes.
    ///
    /// Reuses an idle buffer with enough capacity when there is one,
    /// otherwise allocates. The contents are zeroed.
    pub fn borrow(&self, min_size: usize) -> ScratchBuf<'_> {
        let reused = {
            let mut free = self.lock();
            let fit = free.iter().position(|buf| buf.capacity() >= min_size);
            fit.map(|idx| free.swap_remove(idx))
        };

        let mut buf = match reused {
            Some(buf) => {
                tracing::trace!(min_size, capacity = buf.capacity(), "scratch pool hit");
                buf
            }
            None => {
                tracing::debug!(min_size, "scratch pool miss");
                // Round poolable sizes up so the buffer fits more future loans.
                let capacity = if min_size <= self.max_buffer_len {
                    min_size.next_power_of_two().min(self.max_buffer_len)
                } else {
                    min_size
                };
                Vec::with_capacity(capacity)
            }
        };
        buf.resize(min_size, 0);

        ScratchBuf { pool: self, buf }
    }

    /// Largest buffer capacity this pool keeps after a loan is returned.
    #[must_use]
    pub fn max_buffer_len(&self) -> usize {
        self.max_buffer_len
    }

    /// Number of idle buffers currently held.
    #[must_use]
    pub fn available(&self) -> usize {
        self.lock().len()
    }

    fn give_back(&self, mut buf: Vec<u8>) {
        if buf.capacity() > self.max_buffer_len {
            tracing::debug!(
                capacity = buf.capacity(),
                limit = self.max_buffer_len,
                "dropping oversized scratch buffer"
            );
            return;
        }

        let mut free = self.lock();
        if free.len() < self.max_buffers {
            buf.clear();
            free.push(buf);
        }
    }

    // A panic while holding the lock cannot leave the free list in a
    // torn state, so a poisoned mutex is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Vec<Vec<u8>>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A buffer on loan from a [`ScratchPool`].
///
/// Dereferences to a `[u8]` of the requested size. Returned to the pool on
/// drop.
#[derive(Debug)]
pub struct ScratchBuf<'a> {
    pool: &'a ScratchPool,
    buf: Vec<u8>,
}

impl Deref for ScratchBuf<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl DerefMut for ScratchBuf<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl Drop for ScratchBuf<'_> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.buf));
    }
}
