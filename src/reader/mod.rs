//! Seekable readers over byte sources.
//!
//! - [`SeekableReader`] - the shared read/seek/close contract
//! - [`BufferedReader`] - buffers a forward-only source into pooled chunks
//! - [`PassthroughReader`] - thin adapter for natively seekable sources

mod buffered;
mod passthrough;

pub use buffered::BufferedReader;
pub use passthrough::PassthroughReader;

use std::io::SeekFrom;

use crate::error::Result;

/// Reader lifecycle. Transitions are one-way and happen under the owning
/// reader's mutex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReaderState {
    Open,
    SeekDisabled,
    Closed,
}

/// The contract implemented by both reader kinds.
///
/// Every method takes `&self`: readers serialize access internally, so one
/// instance can be shared across threads behind an `Arc`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use bufseek::{ReaderFactory, SeekableReader};
///
/// let factory = ReaderFactory::with_chunk_size(4);
/// let reader: Arc<dyn SeekableReader> = Arc::new(factory.reader(&b"abcdef"[..]));
///
/// let mut buf = [0u8; 2];
/// reader.read(&mut buf)?;
/// assert_eq!(reader.position(), 2);
/// reader.close()?;
/// # Ok::<(), bufseek::Error>(())
/// ```
pub trait SeekableReader: Send + Sync {
    /// Reads into `buf`, returning how many bytes were copied.
    ///
    /// `Ok(0)` with a non-empty `buf` means end of stream. A short non-zero
    /// read is normal and not an error.
    fn read(&self, buf: &mut [u8]) -> Result<usize>;

    /// Moves the cursor and returns the new absolute position.
    ///
    /// On failure the cursor stays where it was; read it back with
    /// [`position`](SeekableReader::position).
    fn seek(&self, pos: SeekFrom) -> Result<u64>;

    /// Returns the cursor without moving it. Answers in every state,
    /// including after close.
    fn position(&self) -> u64;

    /// Permanently turns off seeking and lets go of already-consumed bytes.
    ///
    /// Reads keep working. A no-op when already disabled or closed.
    fn disable_seeker(&self);

    /// Closes the reader and releases everything it holds.
    ///
    /// Fails with [`Error::Closed`](crate::Error::Closed) if already closed.
    fn close(&self) -> Result<()>;
}
