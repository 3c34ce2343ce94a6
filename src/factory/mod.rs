//! The ReaderFactory - builds readers that share one chunk pool.
//!
//! - [`ReaderFactory`] - holds the pool and stamps out
//!   [`BufferedReader`]s and [`PassthroughReader`]s over it

use std::io::{Read, Seek};
use std::sync::Arc;

use crate::pool::{ChunkPool, DEFAULT_CHUNK_SIZE, ReusePool};
use crate::reader::{BufferedReader, PassthroughReader};

/// Builds readers backed by a shared chunk pool.
///
/// All buffered readers from one factory draw chunks from the same pool, so
/// memory released by one reader is reused by the next.
///
/// # Example
///
/// ```
/// use std::io::SeekFrom;
/// use bufseek::ReaderFactory;
///
/// let factory = ReaderFactory::with_chunk_size(8 * 1024);
/// let reader = factory.reader(&b"the quick brown fox"[..]);
///
/// let mut buf = [0u8; 9];
/// reader.read(&mut buf)?;
/// assert_eq!(&buf, b"the quick");
///
/// reader.seek(SeekFrom::Start(4))?;
/// let mut word = [0u8; 5];
/// reader.read(&mut word)?;
/// assert_eq!(&word, b"quick");
///
/// reader.close()?;
/// # Ok::<(), bufseek::Error>(())
/// ```
#[derive(Clone)]
pub struct ReaderFactory {
    pool: Arc<dyn ChunkPool>,
}

impl ReaderFactory {
    /// Creates a factory with a recycling pool of default-size chunks.
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Creates a factory with a recycling pool of `chunk_size`-byte chunks.
    ///
    /// Zero falls back to [`DEFAULT_CHUNK_SIZE`].
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            pool: Arc::new(ReusePool::new(chunk_size)),
        }
    }

    /// Creates a factory around a caller-supplied pool.
    ///
    /// The pool decides chunk size, recycling, and whether acquisition can
    /// block; see [`ChunkPool`]. It must hand out non-empty chunks.
    pub fn with_pool(pool: Arc<dyn ChunkPool>) -> Self {
        Self { pool }
    }

    /// Returns the chunk size of the backing pool.
    pub fn chunk_size(&self) -> usize {
        self.pool.chunk_size()
    }

    /// Wraps a forward-only source in a [`BufferedReader`].
    pub fn reader<S: Read>(&self, source: S) -> BufferedReader<S> {
        BufferedReader::new(source, Arc::clone(&self.pool))
    }

    /// Wraps a natively seekable source in a [`PassthroughReader`].
    ///
    /// No buffering happens for these readers and no chunks are acquired.
    pub fn seekable_reader<S: Read + Seek>(&self, source: S) -> PassthroughReader<S> {
        PassthroughReader::new(source)
    }
}

impl Default for ReaderFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::NoopPool;
    use std::io::{self, SeekFrom};

    #[test]
    fn test_default_chunk_size() {
        assert_eq!(ReaderFactory::new().chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(ReaderFactory::default().chunk_size(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_custom_chunk_size() {
        assert_eq!(ReaderFactory::with_chunk_size(4).chunk_size(), 4);
        assert_eq!(
            ReaderFactory::with_chunk_size(0).chunk_size(),
            DEFAULT_CHUNK_SIZE,
            "zero should fall back to the default chunk size"
        );
    }

    #[test]
    fn test_custom_pool() {
        let factory = ReaderFactory::with_pool(Arc::new(NoopPool::new(10)));
        assert_eq!(factory.chunk_size(), 10);

        let mut reader = factory.reader(&b"1234567890abcdefghij"[..]);
        let copied = io::copy(&mut reader, &mut io::sink()).unwrap();
        assert_eq!(copied, 20, "reader should drain the whole source");
    }

    #[test]
    fn test_readers_share_one_pool() {
        let factory = ReaderFactory::with_chunk_size(4);

        let a = factory.reader(&b"aaaa"[..]);
        let b = factory.reader(&b"bbbb"[..]);
        a.read(&mut [0u8; 4]).unwrap();
        b.read(&mut [0u8; 4]).unwrap();
        a.close().unwrap();
        b.close().unwrap();
    }

    #[test]
    fn test_seekable_reader_skips_the_pool() {
        let factory = ReaderFactory::with_chunk_size(4);
        let reader = factory.seekable_reader(io::Cursor::new(b"1234567890".to_vec()));

        reader.seek(SeekFrom::Start(6)).unwrap();
        let mut buf = [0u8; 4];
        reader.read(&mut buf).unwrap();
        assert_eq!(&buf, b"7890");
    }
}
