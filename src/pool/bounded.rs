//! Chunk pool with a hard cap on chunks in circulation.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use super::{CancelToken, ChunkPool, effective_chunk_size};
use crate::chunk::Chunk;
use crate::error::AcquireError;

/// How long a blocked acquire waits before re-checking its cancel token.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Chunk pool that bounds how many chunks may be out at once.
///
/// `acquire` blocks while `max_outstanding` chunks are in circulation and
/// wakes when one is released or the caller's token is cancelled. Released
/// chunks go onto a free list, so a pool running at its cap recycles
/// instead of allocating.
///
/// This is the pool to reach for when the retained window must have a hard
/// memory ceiling: a reader that tries to buffer past the cap simply waits
/// for its own consumer to drain.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use bufseek::{BoundedPool, ReaderFactory};
///
/// // At most 8 chunks of 32 KiB live at any moment.
/// let pool = Arc::new(BoundedPool::new(0, 8));
/// let factory = ReaderFactory::with_pool(pool);
/// assert_eq!(factory.chunk_size(), bufseek::DEFAULT_CHUNK_SIZE);
/// ```
pub struct BoundedPool {
    chunk_size: usize,
    max_outstanding: usize,
    state: Mutex<BoundedState>,
    released: Condvar,
}

struct BoundedState {
    idle: Vec<Chunk>,
    outstanding: usize,
}

impl BoundedPool {
    /// Creates a pool of `chunk_size`-byte chunks with at most
    /// `max_outstanding` in circulation.
    ///
    /// A `chunk_size` of zero falls back to
    /// [`DEFAULT_CHUNK_SIZE`](crate::DEFAULT_CHUNK_SIZE).
    ///
    /// # Panics
    ///
    /// Panics if `max_outstanding` is zero.
    pub fn new(chunk_size: usize, max_outstanding: usize) -> Self {
        assert!(max_outstanding > 0, "pool must allow at least one chunk");
        Self {
            chunk_size: effective_chunk_size(chunk_size),
            max_outstanding,
            state: Mutex::new(BoundedState {
                idle: Vec::new(),
                outstanding: 0,
            }),
            released: Condvar::new(),
        }
    }

    /// Returns the number of chunks currently out with callers.
    pub fn outstanding(&self) -> usize {
        self.state.lock().outstanding
    }
}

impl ChunkPool for BoundedPool {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn acquire(&self, cancel: &CancelToken) -> Result<Chunk, AcquireError> {
        let mut state = self.state.lock();
        loop {
            if cancel.is_cancelled() {
                return Err(AcquireError::Cancelled);
            }
            if state.outstanding < self.max_outstanding {
                state.outstanding += 1;
                let chunk = state
                    .idle
                    .pop()
                    .unwrap_or_else(|| Chunk::new(self.chunk_size));
                return Ok(chunk);
            }
            // The token carries no waker, so the wait is bounded and the
            // token re-checked at most one interval after cancellation.
            self.released.wait_for(&mut state, CANCEL_POLL_INTERVAL);
        }
    }

    fn release(&self, mut chunk: Chunk) {
        chunk.reset();
        let mut state = self.state.lock();
        state.outstanding = state.outstanding.saturating_sub(1);
        if state.idle.len() < self.max_outstanding {
            state.idle.push(chunk);
        }
        drop(state);
        self.released.notify_one();
    }
}
