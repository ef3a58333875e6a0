//! Configuration for the stream adapter.
//!
//! - [`StreamConfig`] - Controls how much data the source side hands out per
//!   poll and how large the scratch reads are when draining a reader.
//!
//! # Example
//!
//! ```
//! use chunklist::StreamConfig;
//!
//! let config = StreamConfig::new(4096, 1024)?;
//! assert_eq!(config.read_size(), 4096);
//!
//! let config = StreamConfig::default().with_read_size(64 * 1024);
//! config.validate()?;
//! # Ok::<(), chunklist::ListError>(())
//! ```

use crate::error::ListError;

/// Default maximum size of a chunk emitted by the stream source (16 KiB).
pub const DEFAULT_READ_SIZE: usize = 16 * 1024;

/// Default scratch buffer size used when draining a reader (8 KiB).
pub const DEFAULT_FILL_BUFFER_SIZE: usize = 8 * 1024;

/// Configuration for the `BufferListStream` adapter and `fill_from`
/// (feature `async-io`).
///
/// Both sizes must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamConfig {
    /// Upper bound on the length of each chunk the source yields.
    read_size: usize,

    /// Length of the scratch buffer passed to `poll_read`.
    fill_buffer_size: usize,
}

impl StreamConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidConfig`] if either size is zero.
    pub fn new(read_size: usize, fill_buffer_size: usize) -> Result<Self, ListError> {
        let config = Self {
            read_size,
            fill_buffer_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the read size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`StreamConfig::validate`] to check it.
    pub fn with_read_size(mut self, size: usize) -> Self {
        self.read_size = size;
        self
    }

    /// Sets the fill buffer size. Not validated.
    pub fn with_fill_buffer_size(mut self, size: usize) -> Self {
        self.fill_buffer_size = size;
        self
    }

    /// Maximum length of a chunk yielded by the stream source.
    pub fn read_size(&self) -> usize {
        self.read_size
    }

    /// Scratch buffer length used when draining an async reader.
    pub fn fill_buffer_size(&self) -> usize {
        self.fill_buffer_size
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::InvalidConfig`] if either size is zero.
    pub fn validate(&self) -> Result<(), ListError> {
        if self.read_size == 0 {
            return Err(ListError::InvalidConfig {
                message: "read_size must be non-zero",
            });
        }
        if self.fill_buffer_size == 0 {
            return Err(ListError::InvalidConfig {
                message: "fill_buffer_size must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            read_size: DEFAULT_READ_SIZE,
            fill_buffer_size: DEFAULT_FILL_BUFFER_SIZE,
        }
    }
}
