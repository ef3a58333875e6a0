//! chunklist
//!
//! A list of byte chunks presented as one logical, randomly addressable byte
//! stream.
//!
//! Data that arrives piecemeal (network reads, file reads, framed writes) is
//! kept as the chunks it arrived in. `chunklist` lets you treat those chunks
//! as one buffer:
//!
//! - cheap append, prepend and consumption from the front
//! - slicing by logical range, zero-copy whenever the range sits in one chunk
//! - first-occurrence search, including matches that straddle chunks
//! - fixed-width integer and float decoding at any offset
//!
//! Cost is proportional to the bytes touched, not to the total buffered size.
//!
//! The crate intentionally:
//! - does NOT copy chunks into one allocation unless asked for a range that
//!   spans several of them
//! - does NOT lock; callers serialize mutation
//! - does NOT perform I/O in the core
//!
//! # Sync
//!
//! ```
//! use bytes::Bytes;
//! use chunklist::BufferList;
//!
//! let mut list = BufferList::new();
//! list.append(Bytes::from_static(b"\x00\x05hel"));
//! list.append(Bytes::from_static(b"lo, world"));
//!
//! // length-prefixed frame split across two chunks
//! let len = list.read_u16_be(0)? as isize;
//! assert_eq!(list.slice(2..2 + len), &b"hello"[..]);
//! list.consume(2 + len);
//!
//! assert_eq!(list.index_of("world", 0), Some(2));
//! # Ok::<(), chunklist::ListError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::{AsyncWriteExt, StreamExt};
//! use chunklist::{BufferListStream, StreamConfig};
//!
//! async fn demo() -> Result<(), chunklist::ListError> {
//!     let mut stream = BufferListStream::new(StreamConfig::default());
//!     stream.write_all(b"hello").await?;
//!     stream.close().await?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         println!("chunk {}", chunk?.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod encoding;
mod error;
mod list;

#[cfg(feature = "async-io")]
mod stream;

//
// Public surface (intentionally tiny)
//

pub use config::StreamConfig;
pub use encoding::Encoding;
pub use error::ListError;
pub use list::{BufferList, IntoChunks, Needle};

#[cfg(feature = "async-io")]
pub use stream::{BufferListStream, Fill, Pipe, fill_from};
