//! The buffered reader - seekable access over a forward-only source.
//!
//! - [`BufferedReader`] - wraps any [`Read`] source and buffers everything it
//!   fetches into pooled chunks, so the cursor can move back over bytes the
//!   source itself can never replay
//!
//! The window of retained chunks only grows while seeking is enabled. Callers
//! that are done revisiting call
//! [`disable_seeker`](BufferedReader::disable_seeker), after which consumed
//! chunks flow back to the pool and reads stream straight from the source.

use std::collections::VecDeque;
use std::io::{self, Read, SeekFrom};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::chunk::Chunk;
use crate::error::{Error, Result};
use crate::pool::{CancelToken, ChunkPool};
use crate::reader::{ReaderState, SeekableReader};

/// A seekable reader over a forward-only source.
///
/// Bytes are fetched on demand and kept in fixed-size chunks acquired from a
/// [`ChunkPool`], so any previously read position can be revisited. All
/// methods take `&self`; internal state lives behind a mutex and one instance
/// can be shared across threads.
///
/// Build instances through [`ReaderFactory`](crate::ReaderFactory).
///
/// # Example
///
/// ```
/// use std::io::SeekFrom;
/// use bufseek::ReaderFactory;
///
/// let factory = ReaderFactory::with_chunk_size(5);
/// let reader = factory.reader(&b"1234567890"[..]);
///
/// let mut buf = [0u8; 4];
/// let n = reader.read(&mut buf)?;
/// assert_eq!(&buf[..n], b"1234");
///
/// // The source cannot rewind, but the reader can.
/// reader.seek(SeekFrom::Start(0))?;
/// let n = reader.read(&mut buf)?;
/// assert_eq!(&buf[..n], b"1234");
///
/// reader.close()?;
/// # Ok::<(), bufseek::Error>(())
/// ```
pub struct BufferedReader<S> {
    inner: Mutex<Inner<S>>,
    cancel: CancelToken,
}

struct Inner<S> {
    /// Taken on close; `None` afterwards.
    source: Option<S>,
    /// Retained window. Chunk `i` holds absolute stream bytes
    /// `(first + i) * chunk_size ..`.
    chunks: VecDeque<Chunk>,
    /// Absolute index of the first retained chunk.
    first: usize,
    /// Total bytes fetched from the source so far.
    fetched: u64,
    /// Absolute cursor; never ahead of `fetched`.
    current_pos: u64,
    /// Set once the source reports end of stream.
    source_eof: bool,
    state: ReaderState,
    chunk_size: usize,
    pool: Arc<dyn ChunkPool>,
    cancel: CancelToken,
}

impl<S: Read> BufferedReader<S> {
    /// Creates a reader over `source` that buffers through `pool`.
    ///
    /// # Panics
    ///
    /// Panics if the pool hands out zero-capacity chunks.
    pub fn new(source: S, pool: Arc<dyn ChunkPool>) -> Self {
        let chunk_size = pool.chunk_size();
        assert!(chunk_size > 0, "pool chunk size must be non-zero");
        let cancel = CancelToken::new();
        Self {
            inner: Mutex::new(Inner {
                source: Some(source),
                chunks: VecDeque::new(),
                first: 0,
                fetched: 0,
                current_pos: 0,
                source_eof: false,
                state: ReaderState::Open,
                chunk_size,
                pool,
                cancel: cancel.clone(),
            }),
            cancel,
        }
    }

    /// Reads into `buf`, returning how many bytes were copied.
    ///
    /// Serves from the retained window first and fetches from the source for
    /// the remainder. `Ok(0)` with a non-empty `buf` means end of stream.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        self.inner.lock().read(buf)
    }

    /// Moves the cursor and returns the new absolute position.
    ///
    /// Seeking forward past the fetched prefix reads ahead from the source;
    /// if the stream ends before the target the cursor stays put and
    /// [`Error::OutOfRange`] is returned. `SeekFrom::End` fetches the rest of
    /// the stream to learn its length, and a positive offset from the end is
    /// always [`Error::OutOfRange`].
    pub fn seek(&self, pos: SeekFrom) -> Result<u64> {
        self.inner.lock().seek(pos)
    }

    /// Returns the cursor without moving it.
    pub fn position(&self) -> u64 {
        self.inner.lock().current_pos
    }

    /// Permanently turns off seeking for this reader.
    ///
    /// Chunks behind the cursor go back to the pool immediately; the rest
    /// follow once the cursor drains them. After that, reads bypass the pool
    /// and stream straight from the source. A no-op when already disabled or
    /// closed.
    pub fn disable_seeker(&self) {
        self.inner.lock().disable_seeker();
    }

    /// Closes the reader, returning every retained chunk to the pool and
    /// dropping the source.
    ///
    /// Any thread blocked acquiring a chunk for this reader is woken and
    /// fails with [`Error::Closed`]. Closing twice is an error.
    pub fn close(&self) -> Result<()> {
        // Cancel before taking the lock: a reader stuck in a blocking
        // acquire holds the lock, and the token is what lets close in.
        self.cancel.cancel();
        self.inner.lock().close()
    }
}

impl<S> Inner<S> {
    /// Copies bytes at the cursor out of the retained window, advancing the
    /// cursor. Returns how many bytes were copied.
    fn copy_out(&mut self, buf: &mut [u8]) -> usize {
        let chunk_size = self.chunk_size as u64;
        let mut copied = 0;
        while copied < buf.len() && self.current_pos < self.fetched {
            let index = (self.current_pos / chunk_size) as usize - self.first;
            let offset = (self.current_pos % chunk_size) as usize;
            let filled = self.chunks[index].filled();
            let n = (buf.len() - copied).min(filled.len() - offset);
            buf[copied..copied + n].copy_from_slice(&filled[offset..offset + n]);
            copied += n;
            self.current_pos += n as u64;
        }
        copied
    }

    /// Returns chunks wholly behind the cursor to the pool. The chunk the
    /// cursor is inside stays.
    fn release_consumed(&mut self) {
        let keep_from = (self.current_pos / self.chunk_size as u64) as usize;
        let mut released = 0;
        while self.first < keep_from {
            match self.chunks.pop_front() {
                Some(chunk) => {
                    self.pool.release(chunk);
                    self.first += 1;
                    released += 1;
                }
                None => break,
            }
        }
        if released > 0 {
            tracing::trace!(released, window = self.chunks.len(), "released consumed chunks");
        }
    }

    /// Returns every retained chunk to the pool.
    fn release_all(&mut self) {
        if self.chunks.is_empty() {
            return;
        }
        let released = self.chunks.len();
        self.first += released;
        for chunk in self.chunks.drain(..) {
            self.pool.release(chunk);
        }
        tracing::trace!(released, "released window");
    }

    fn disable_seeker(&mut self) {
        if self.state != ReaderState::Open {
            return;
        }
        self.state = ReaderState::SeekDisabled;
        self.release_consumed();
    }

    fn close(&mut self) -> Result<()> {
        if self.state == ReaderState::Closed {
            return Err(Error::Closed);
        }
        self.state = ReaderState::Closed;
        self.release_all();
        // Dropping the source is its close.
        self.source = None;
        tracing::debug!(position = self.current_pos, fetched = self.fetched, "reader closed");
        Ok(())
    }
}

impl<S: Read> Inner<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.state == ReaderState::Closed {
            return Err(Error::Closed);
        }
        if buf.is_empty() {
            return Ok(0);
        }

        let mut copied = self.copy_out(buf);
        if copied == buf.len() {
            return Ok(copied);
        }

        if self.state == ReaderState::SeekDisabled {
            // The window is drained at this point and nothing will be
            // revisited, so the rest comes straight from the source.
            self.release_all();
            return match self.read_direct(&mut buf[copied..]) {
                Ok(n) => Ok(copied + n),
                Err(_) if copied > 0 => Ok(copied),
                Err(e) => Err(e),
            };
        }

        // Progress wins over errors: whatever the fetch managed to pull in
        // is handed to the caller, and the error resurfaces on the next call
        // if the source is still failing.
        let fill_result = self.fill((buf.len() - copied) as u64);
        copied += self.copy_out(&mut buf[copied..]);
        match fill_result {
            Err(e) if copied == 0 => Err(e),
            _ => Ok(copied),
        }
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        match self.state {
            ReaderState::Closed => return Err(Error::Closed),
            ReaderState::SeekDisabled => return Err(Error::SeekerDisabled),
            ReaderState::Open => {}
        }

        let abs = match pos {
            SeekFrom::Start(n) => n,
            SeekFrom::Current(delta) => self
                .current_pos
                .checked_add_signed(delta)
                .ok_or(Error::OutOfRange)?,
            SeekFrom::End(delta) => {
                if delta > 0 {
                    return Err(Error::OutOfRange);
                }
                // The stream length is only known once the source ends.
                self.fill(u64::MAX)?;
                self.fetched
                    .checked_add_signed(delta)
                    .ok_or(Error::OutOfRange)?
            }
        };

        if abs > self.fetched {
            let missing = abs - self.fetched;
            if self.fill(missing)? < missing {
                return Err(Error::OutOfRange);
            }
        }

        self.current_pos = abs;
        tracing::trace!(position = abs, "seek");
        Ok(abs)
    }

    /// Fetches from the source until `want` more bytes are buffered or the
    /// stream ends. Returns how many bytes were actually fetched.
    fn fill(&mut self, want: u64) -> Result<u64> {
        let mut fetched_now = 0;
        while fetched_now < want && !self.source_eof {
            if self.chunks.back().is_none_or(Chunk::is_full) {
                let mut chunk = self.pool.acquire(&self.cancel)?;
                chunk.reset();
                self.chunks.push_back(chunk);
                tracing::trace!(window = self.chunks.len(), fetched = self.fetched, "acquired chunk");
            }
            let source = self.source.as_mut().ok_or(Error::Closed)?;
            let tail = self.chunks.back_mut().expect("refill leaves a tail chunk");
            let n = source.read(tail.spare_mut())?;
            if n == 0 {
                self.source_eof = true;
                tracing::debug!(fetched = self.fetched, "source end of stream");
                break;
            }
            tail.advance(n);
            self.fetched += n as u64;
            fetched_now += n as u64;
        }
        Ok(fetched_now)
    }

    /// One read straight from the source, bypassing the window. Only used
    /// after the seeker is disabled and the window has drained.
    fn read_direct(&mut self, buf: &mut [u8]) -> Result<usize> {
        let source = self.source.as_mut().ok_or(Error::Closed)?;
        let n = source.read(buf)?;
        if n == 0 {
            self.source_eof = true;
        }
        self.current_pos += n as u64;
        self.fetched += n as u64;
        Ok(n)
    }
}

impl<S> Drop for BufferedReader<S> {
    fn drop(&mut self) {
        // A reader dropped without close still owes its chunks to the pool;
        // bounded pools would otherwise lose that capacity for good.
        self.inner.get_mut().release_all();
    }
}

impl<S: Read + Send> SeekableReader for BufferedReader<S> {
    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        BufferedReader::read(self, buf)
    }

    fn seek(&self, pos: SeekFrom) -> Result<u64> {
        BufferedReader::seek(self, pos)
    }

    fn position(&self) -> u64 {
        BufferedReader::position(self)
    }

    fn disable_seeker(&self) {
        BufferedReader::disable_seeker(self);
    }

    fn close(&self) -> Result<()> {
        BufferedReader::close(self)
    }
}

impl<S: Read> io::Read for BufferedReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        BufferedReader::read(self, buf).map_err(Into::into)
    }
}

impl<S: Read> io::Seek for BufferedReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        BufferedReader::seek(self, pos).map_err(Into::into)
    }
}

impl<S: Read> io::Read for &BufferedReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        BufferedReader::read(*self, buf).map_err(Into::into)
    }
}

impl<S: Read> io::Seek for &BufferedReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        BufferedReader::seek(*self, pos).map_err(Into::into)
    }
}
