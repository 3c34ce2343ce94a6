//! Chunk pools and cancellable acquisition.
//!
//! - [`ChunkPool`] - the allocation contract readers consume
//! - [`CancelToken`] - cooperative cancellation for blocking acquires
//! - [`ReusePool`] - recycling free-list pool (the default)
//! - [`NoopPool`] - fresh allocation every time, nothing retained
//! - [`BoundedPool`] - caps chunks in circulation, blocking acquire

mod bounded;
mod noop;
mod reuse;

pub use bounded::BoundedPool;
pub use noop::NoopPool;
pub use reuse::{MAX_IDLE_CHUNKS, ReusePool};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::chunk::Chunk;
use crate::error::AcquireError;

/// Default chunk size for pools built without an explicit size (32 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// The allocation contract between readers and their chunk supply.
///
/// A pool hands out empty [`Chunk`]s of one fixed capacity and takes them
/// back when the reader is done with them. Readers release every acquired
/// chunk exactly once, on one of three paths: draining past it with seeking
/// disabled, an explicit `disable_seeker`, or `close`.
pub trait ChunkPool: Send + Sync {
    /// Returns the fixed capacity of chunks handed out by this pool.
    fn chunk_size(&self) -> usize;

    /// Hands out an empty chunk.
    ///
    /// Implementations that bound the number of outstanding chunks may
    /// block. A blocked acquire must observe [`CancelToken::cancel`] and
    /// fail with [`AcquireError::Cancelled`] instead of waiting forever.
    fn acquire(&self, cancel: &CancelToken) -> Result<Chunk, AcquireError>;

    /// Takes a chunk back.
    fn release(&self, chunk: Chunk);
}

/// Cooperative cancellation flag shared between a reader and its pool.
///
/// Clones share the flag. Cancelling is one-way and idempotent; each reader
/// owns one token and cancels it when it closes, so acquires blocked on its
/// behalf fail promptly instead of outliving it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the flag. Blocked acquires fail from here on.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once [`cancel`](CancelToken::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Zero means "use the default", matching the factory constructors.
pub(crate) fn effective_chunk_size(requested: usize) -> usize {
    if requested == 0 {
        DEFAULT_CHUNK_SIZE
    } else {
        requested
    }
}
