//! bufseek
//!
//! Buffered seekable readers over forward-only byte streams.
//!
//! `bufseek` wraps a plain [`std::io::Read`] source and makes it seekable by
//! retaining fetched bytes in pooled fixed-size chunks. It is designed as a
//! small, composable primitive for:
//!
//! - probing headers before committing to a full parse
//! - format sniffing with rewind
//! - feeding `Read + Seek` consumers from sequential transports
//! - replaying a prefix of a stream that cannot be re-opened
//!
//! The crate intentionally:
//! - does NOT manage files or paths
//! - does NOT spawn threads or tasks
//! - does NOT persist buffered bytes
//! - does NOT talk to the network
//!
//! It only does one thing: **forward-only source → seekable reader**
//!
//! # Reading and rewinding
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::SeekFrom;
//! use bufseek::{Error, ReaderFactory};
//!
//! fn main() -> Result<(), Error> {
//!     let source = File::open("data.bin")?;
//!     let factory = ReaderFactory::new();
//!     let reader = factory.reader(source);
//!
//!     // Peek at the header.
//!     let mut header = [0u8; 16];
//!     reader.read(&mut header)?;
//!
//!     // Rewind and consume the stream from the top, header included.
//!     reader.seek(SeekFrom::Start(0))?;
//!     reader.disable_seeker();
//!     let mut body = Vec::new();
//!     std::io::Read::read_to_end(&mut &reader, &mut body)?;
//!
//!     reader.close()?;
//!     Ok(())
//! }
//! ```
//!
//! # Sharing across threads
//!
//! Readers serialize access internally, so one instance can sit behind an
//! `Arc` and be driven from several threads:
//!
//! ```
//! use std::sync::Arc;
//! use bufseek::ReaderFactory;
//!
//! let factory = ReaderFactory::with_chunk_size(1024);
//! let reader = Arc::new(factory.reader(&b"shared bytes"[..]));
//!
//! let worker = {
//!     let reader = Arc::clone(&reader);
//!     std::thread::spawn(move || {
//!         let mut buf = [0u8; 6];
//!         reader.read(&mut buf).map(|n| buf[..n].to_vec())
//!     })
//! };
//!
//! let bytes = worker.join().unwrap()?;
//! assert_eq!(bytes, b"shared");
//! # Ok::<(), bufseek::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod error;
mod factory;
mod pool;
mod reader;

//
// Public surface (intentionally tiny)
//

pub use chunk::Chunk;
pub use error::{AcquireError, Error, Result};
pub use factory::ReaderFactory;
pub use pool::{
    BoundedPool, CancelToken, ChunkPool, DEFAULT_CHUNK_SIZE, MAX_IDLE_CHUNKS, NoopPool, ReusePool,
};
pub use reader::{BufferedReader, PassthroughReader, SeekableReader};
