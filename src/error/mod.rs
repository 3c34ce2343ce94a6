//! Error types for bufseek.

use std::io;

use thiserror::Error;

/// Result alias for reader operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by reader operations.
///
/// `Closed`, `SeekerDisabled` and `OutOfRange` are sentinels meant to be
/// matched by variant; `Io` carries the source's own error untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// The reader has been closed. Terminal: every later operation fails
    /// with this variant.
    #[error("closed reader")]
    Closed,

    /// Seeking was turned off via `disable_seeker`. Reads keep working.
    #[error("disabled seeker")]
    SeekerDisabled,

    /// The seek target is negative or beyond the confirmed end of the
    /// stream. The cursor is left where it was.
    #[error("seek out of range")]
    OutOfRange,

    /// An I/O error reported by the underlying source.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Errors returned by chunk pool acquisition.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The acquire was cancelled while waiting for a chunk.
    #[error("chunk acquire cancelled")]
    Cancelled,
}

impl From<AcquireError> for Error {
    fn from(e: AcquireError) -> Self {
        match e {
            // Only the close path cancels the token.
            AcquireError::Cancelled => Error::Closed,
        }
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(inner) => inner,
            Error::Closed => io::Error::other(Error::Closed),
            Error::SeekerDisabled => {
                io::Error::new(io::ErrorKind::Unsupported, Error::SeekerDisabled)
            }
            Error::OutOfRange => io::Error::new(io::ErrorKind::InvalidInput, Error::OutOfRange),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::Closed.to_string(), "closed reader");
        assert_eq!(Error::SeekerDisabled.to_string(), "disabled seeker");
        assert_eq!(Error::OutOfRange.to_string(), "seek out of range");
    }

    #[test]
    fn test_cancelled_acquire_maps_to_closed() {
        let err: Error = AcquireError::Cancelled.into();
        assert!(matches!(err, Error::Closed));
    }

    #[test]
    fn test_io_roundtrip_preserves_source_error() {
        let original = io::Error::new(io::ErrorKind::ConnectionReset, "peer gone");
        let err: Error = original.into();
        let back: io::Error = err.into();
        assert_eq!(back.kind(), io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn test_sentinel_io_error_kinds() {
        let disabled: io::Error = Error::SeekerDisabled.into();
        assert_eq!(disabled.kind(), io::ErrorKind::Unsupported);

        let out_of_range: io::Error = Error::OutOfRange.into();
        assert_eq!(out_of_range.kind(), io::ErrorKind::InvalidInput);

        let closed: io::Error = Error::Closed.into();
        assert!(closed.get_ref().is_some());
    }
}
