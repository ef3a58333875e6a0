//! Error types for chunklist.
//!
//! Range and offset arithmetic never fails; it clamps. Errors are reserved
//! for inputs that cannot be interpreted at all (unknown encodings, malformed
//! encoded text, decodes that run past the end) and for stream-level failures.

use std::io;
use std::sync::Arc;

/// Errors that can occur while working with a [`BufferList`](crate::BufferList).
///
/// `ListError` is `Clone` so one failure can be handed both to a completion
/// callback and to whoever is polling the stream source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ListError {
    /// The encoding name was not recognised.
    #[error("unknown encoding: {name}")]
    UnknownEncoding {
        /// The name as supplied by the caller.
        name: String,
    },

    /// Text could not be converted to bytes under the requested encoding.
    #[error("invalid {encoding} text: {reason}")]
    InvalidText {
        /// Canonical name of the encoding.
        encoding: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// A fixed-width read needs bytes past the end of the list.
    #[error("read of {width} bytes at offset {offset} is out of bounds (length {length})")]
    OutOfBounds {
        /// Logical offset of the read.
        offset: usize,
        /// Number of bytes the read needs.
        width: usize,
        /// Total length of the list at the time of the read.
        length: usize,
    },

    /// A variable-width read was asked for an unsupported byte width.
    #[error("invalid byte width: {width} (expected 1..=6)")]
    InvalidWidth {
        /// The requested width.
        width: usize,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// An I/O error occurred while reading or writing stream data.
    #[error("io error: {0}")]
    Io(Arc<io::Error>),

    /// The stream was destroyed before it completed.
    #[error("buffer list destroyed")]
    Destroyed,

    /// Data was written after the writable side was ended.
    #[error("write after end")]
    WriteAfterEnd,
}

impl From<io::Error> for ListError {
    fn from(e: io::Error) -> Self {
        ListError::Io(Arc::new(e))
    }
}

impl From<ListError> for io::Error {
    fn from(e: ListError) -> Self {
        match e {
            ListError::Io(inner) => io::Error::new(inner.kind(), ListError::Io(inner)),
            ListError::Destroyed | ListError::WriteAfterEnd => {
                io::Error::new(io::ErrorKind::BrokenPipe, e)
            }
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: ListError = io_err.into();
        assert!(matches!(err, ListError::Io(_)));
    }

    #[test]
    fn test_display() {
        let err = ListError::OutOfBounds {
            offset: 3,
            width: 4,
            length: 5,
        };
        assert!(err.to_string().contains("out of bounds"));

        let err = ListError::UnknownEncoding { name: "enc".into() };
        assert_eq!(err.to_string(), "unknown encoding: enc");
    }

    #[test]
    fn test_into_io_error_keeps_kind() {
        let err = ListError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::UnexpectedEof);

        let io_err: io::Error = ListError::Destroyed.into();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);
        assert!(io_err.get_ref().is_some());
    }

    #[test]
    fn test_clone_shares_io_error() {
        let err = ListError::from(io::Error::other("boom"));
        let copy = err.clone();
        assert_eq!(err.to_string(), copy.to_string());
    }
}
