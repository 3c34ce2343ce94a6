//! Pass-through pool that allocates fresh chunks every time.

use super::{CancelToken, ChunkPool, DEFAULT_CHUNK_SIZE, effective_chunk_size};
use crate::chunk::Chunk;
use crate::error::AcquireError;

/// Chunk pool without reuse: `acquire` allocates, `release` drops.
///
/// Serves as the baseline when measuring [`ReusePool`](super::ReusePool)
/// and in tests that must not carry state between chunks.
pub struct NoopPool {
    chunk_size: usize,
}

impl NoopPool {
    /// Creates a pool handing out chunks of `chunk_size` bytes.
    ///
    /// A `chunk_size` of zero falls back to
    /// [`DEFAULT_CHUNK_SIZE`](crate::DEFAULT_CHUNK_SIZE).
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: effective_chunk_size(chunk_size),
        }
    }
}

impl Default for NoopPool {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkPool for NoopPool {
    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn acquire(&self, cancel: &CancelToken) -> Result<Chunk, AcquireError> {
        if cancel.is_cancelled() {
            return Err(AcquireError::Cancelled);
        }
        Ok(Chunk::new(self.chunk_size))
    }

    fn release(&self, _chunk: Chunk) {}
}
