//! Recycling chunk pool with a bounded idle list.

use parking_lot::Mutex;

use super::{CancelToken, ChunkPool, DEFAULT_CHUNK_SIZE, effective_chunk_size};
use crate::chunk::Chunk;
use crate::error::AcquireError;

/// Maximum number of idle chunks kept for reuse.
pub const MAX_IDLE_CHUNKS: usize = 32;

/// Chunk pool that recycles released chunks through a free list.
///
/// `acquire` pops an idle chunk when one is available and allocates
/// otherwise; it never blocks. `release` keeps up to [`MAX_IDLE_CHUNKS`]
/// chunks and drops the rest, so an idle pool does not pin memory forever.
///
/// One `ReusePool` is typically shared by every reader a
/// [`ReaderFactory`](crate::ReaderFactory) creates.
pub struct ReusePool {
    chunk_size: usize,
    idle: Mutex<Vec<Chunk>>,
}

impl ReusePool {
    /// Creates a pool handing out chunks of `chunk_size` bytes.
    ///
    /// A `chunk_size` of zero falls back to
    /// [`DEFAULT_CHUNK_SIZE`](crate::DEFAULT_CHUNK_SIZE).
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: effective_chunk_size(chunk_size),
            idle: Mutex::new(Vec::new()),
        }
    }
}

impl Default for ReusePool {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkPool for ReusePool {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn acquire(&self, cancel: &CancelToken) -> Result<Chunk, AcquireError> {
        if cancel.is_cancelled() {
            return Err(AcquireError::Cancelled);
        }
        if let Some(chunk) = self.idle.lock().pop() {
            return Ok(chunk);
        }
        Ok(Chunk::new(self.chunk_size))
    }

    fn release(&self, mut chunk: Chunk) {
        chunk.reset();
        let mut idle = self.idle.lock();
        if idle.len() < MAX_IDLE_CHUNKS {
            idle.push(chunk);
        }
    }
}
