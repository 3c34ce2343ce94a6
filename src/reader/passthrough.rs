//! The pass-through reader - same surface, no buffering.
//!
//! - [`PassthroughReader`] - wraps a source that can already seek and
//!   delegates to it, adding only the shared lifecycle (position tracking,
//!   seek disabling, close)
//!
//! No chunks are ever acquired for these readers; range handling is entirely
//! the source's affair.

use std::io::{self, Read, Seek, SeekFrom};

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::reader::{ReaderState, SeekableReader};

/// A seekable reader over a source that can already seek.
///
/// Every call goes straight to the source; the wrapper only tracks the
/// cursor and enforces the lifecycle shared with
/// [`BufferedReader`](crate::BufferedReader). Build instances through
/// [`ReaderFactory::seekable_reader`](crate::ReaderFactory::seekable_reader).
pub struct PassthroughReader<S> {
    inner: Mutex<Inner<S>>,
}

struct Inner<S> {
    /// Taken on close; `None` afterwards.
    source: Option<S>,
    current_pos: u64,
    state: ReaderState,
}

impl<S: Read + Seek> PassthroughReader<S> {
    /// Creates a reader that delegates to `source`.
    ///
    /// The cursor starts at zero regardless of where the source currently
    /// is; it reflects this reader's own reads and seeks.
    pub fn new(source: S) -> Self {
        Self {
            inner: Mutex::new(Inner {
                source: Some(source),
                current_pos: 0,
                state: ReaderState::Open,
            }),
        }
    }

    /// Reads into `buf`, returning how many bytes were copied.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        self.inner.lock().read(buf)
    }

    /// Seeks the source and returns the new absolute position.
    ///
    /// Whatever the source accepts is accepted here; a position past the end
    /// of the data is not an error for most sources.
    pub fn seek(&self, pos: SeekFrom) -> Result<u64> {
        self.inner.lock().seek(pos)
    }

    /// Returns the cursor without moving it.
    pub fn position(&self) -> u64 {
        self.inner.lock().current_pos
    }

    /// Permanently turns off seeking for this reader. A no-op when already
    /// disabled or closed.
    pub fn disable_seeker(&self) {
        self.inner.lock().disable_seeker();
    }

    /// Closes the reader and drops the source. Closing twice is an error.
    pub fn close(&self) -> Result<()> {
        self.inner.lock().close()
    }
}

impl<S: Read + Seek> Inner<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.state == ReaderState::Closed {
            return Err(Error::Closed);
        }
        let source = self.source.as_mut().ok_or(Error::Closed)?;
        let n = source.read(buf)?;
        self.current_pos += n as u64;
        Ok(n)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        match self.state {
            ReaderState::Closed => return Err(Error::Closed),
            ReaderState::SeekDisabled => return Err(Error::SeekerDisabled),
            ReaderState::Open => {}
        }
        let source = self.source.as_mut().ok_or(Error::Closed)?;
        // A failed delegated seek leaves the cursor untouched.
        let new_pos = source.seek(pos)?;
        self.current_pos = new_pos;
        Ok(new_pos)
    }

    fn disable_seeker(&mut self) {
        if self.state == ReaderState::Open {
            self.state = ReaderState::SeekDisabled;
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.state == ReaderState::Closed {
            return Err(Error::Closed);
        }
        self.state = ReaderState::Closed;
        self.source = None;
        Ok(())
    }
}

impl<S: Read + Seek + Send> SeekableReader for PassthroughReader<S> {
    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        PassthroughReader::read(self, buf)
    }

    fn seek(&self, pos: SeekFrom) -> Result<u64> {
        PassthroughReader::seek(self, pos)
    }

    fn position(&self) -> u64 {
        PassthroughReader::position(self)
    }

    fn disable_seeker(&self) {
        PassthroughReader::disable_seeker(self);
    }

    fn close(&self) -> Result<()> {
        PassthroughReader::close(self)
    }
}

impl<S: Read + Seek> io::Read for PassthroughReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        PassthroughReader::read(self, buf).map_err(Into::into)
    }
}

impl<S: Read + Seek> io::Seek for PassthroughReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        PassthroughReader::seek(self, pos).map_err(Into::into)
    }
}

impl<S: Read + Seek> io::Read for &PassthroughReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        PassthroughReader::read(*self, buf).map_err(Into::into)
    }
}

impl<S: Read + Seek> io::Seek for &PassthroughReader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        PassthroughReader::seek(*self, pos).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &[u8]) -> PassthroughReader<Cursor<Vec<u8>>> {
        PassthroughReader::new(Cursor::new(data.to_vec()))
    }

    #[test]
    fn test_read_and_seek_delegate() {
        let r = reader(b"1234567890");
        let mut buf = [0u8; 4];

        assert_eq!(r.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"1234");
        assert_eq!(r.position(), 4);

        assert_eq!(r.seek(SeekFrom::Start(2)).unwrap(), 2);
        r.read(&mut buf).unwrap();
        assert_eq!(&buf, b"3456");
        assert_eq!(r.seek(SeekFrom::End(-2)).unwrap(), 8);
        assert_eq!(r.seek(SeekFrom::Current(-3)).unwrap(), 5);
    }

    #[test]
    fn test_seek_past_end_is_sources_call() {
        // A cursor happily parks past its data, so the wrapper does too.
        let r = reader(b"12345");
        assert_eq!(r.seek(SeekFrom::Start(100)).unwrap(), 100);
        assert_eq!(r.read(&mut [0u8; 4]).unwrap(), 0, "past-end read should hit end of stream");
    }

    #[test]
    fn test_rejected_seek_keeps_cursor() {
        let r = reader(b"12345");
        r.read(&mut [0u8; 3]).unwrap();
        assert!(matches!(r.seek(SeekFrom::Current(-10)), Err(Error::Io(_))));
        assert_eq!(r.position(), 3, "failed seeks should leave the cursor alone");
    }

    #[test]
    fn test_disable_seeker_blocks_seek_keeps_read() {
        let r = reader(b"1234567890");
        r.read(&mut [0u8; 3]).unwrap();

        r.disable_seeker();
        assert!(matches!(r.seek(SeekFrom::Start(0)), Err(Error::SeekerDisabled)));

        let mut buf = [0u8; 3];
        r.read(&mut buf).unwrap();
        assert_eq!(&buf, b"456", "reads should keep working after disable");
        r.disable_seeker();
        assert_eq!(r.position(), 6, "repeated disable should be a no-op");
    }

    #[test]
    fn test_close_rejects_everything() {
        let r = reader(b"12345");
        r.read(&mut [0u8; 2]).unwrap();
        r.close().unwrap();

        assert!(matches!(r.read(&mut [0u8; 2]), Err(Error::Closed)));
        assert!(matches!(r.seek(SeekFrom::Start(0)), Err(Error::Closed)));
        assert!(matches!(r.close(), Err(Error::Closed)), "double close should fail");
        assert_eq!(r.position(), 2, "position should survive close");
    }

    #[test]
    fn test_io_traits_delegate() {
        use io::{Read as _, Seek as _};

        let mut r = reader(b"1234567890");
        let mut buf = [0u8; 3];
        r.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"123");
        assert_eq!(r.stream_position().unwrap(), 3);
    }
}
