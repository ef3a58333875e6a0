//! Async sink/source adapter around a [`BufferList`](crate::BufferList).
//!
//! This module uses the `futures-io` and `futures-core` traits, so it is
//! runtime-agnostic and works with tokio (via `tokio_util::compat`),
//! async-std, smol and others.
//!
//! - [`BufferListStream`] - `AsyncWrite` sink and `Stream` source over one list
//! - [`fill_from`] - Drains an `AsyncRead` into a new list
//! - [`BufferListStream::pipe_from`] - Pipes an `AsyncRead` into a stream,
//!   forwarding read errors to its completion callback
//!
//! This module requires the `async-io` feature to be enabled.

mod duplex;
mod fill;

pub use duplex::BufferListStream;
pub use fill::{Fill, Pipe, fill_from};
