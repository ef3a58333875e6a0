//! Duplex adapter: bytes written in, chunks streamed out.
//!
//! # Example
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
//!         println!("chunk: {} bytes", chunk?.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::{AsyncRead, AsyncWrite};
use log::debug;

use crate::config::StreamConfig;
use crate::error::ListError;
use crate::list::{BufferList, IntoChunks};

use super::fill::Pipe;

type Callback = Box<dyn FnOnce(Result<Bytes, ListError>) + Send>;

/// A [`BufferList`] exposed as an async sink and an async source.
///
/// The writable side appends every write to the list. The readable side
/// yields the buffered bytes front to back, at most
/// [`read_size`](StreamConfig::read_size) bytes per item, consuming them as
/// it goes. When the writable side ends the optional completion callback
/// receives the whole buffered content; it runs at most once.
///
/// Callers serialize access through `&mut self`; there is no internal
/// locking.
pub struct BufferListStream {
    list: BufferList,
    config: StreamConfig,
    ended: bool,
    destroyed: bool,
    error: Option<ListError>,
    callback: Option<Callback>,
    read_waker: Option<Waker>,
}

impl BufferListStream {
    /// Creates an empty stream.
    pub fn new(config: StreamConfig) -> Self {
        Self::from_list(BufferList::new(), config)
    }

    /// Creates a stream over an existing list.
    pub fn from_list(list: BufferList, config: StreamConfig) -> Self {
        Self {
            list,
            config,
            ended: false,
            destroyed: false,
            error: None,
            callback: None,
            read_waker: None,
        }
    }

    /// Creates an empty stream with a completion callback.
    ///
    /// The callback receives `Ok(content)` when the writable side ends, or
    /// `Err(_)` if the stream is destroyed first.
    pub fn with_callback<F>(config: StreamConfig, callback: F) -> Self
    where
        F: FnOnce(Result<Bytes, ListError>) + Send + 'static,
    {
        let mut stream = Self::new(config);
        stream.callback = Some(Box::new(callback));
        stream
    }

    /// Appends `input` to the list and wakes a pending reader.
    ///
    /// # Errors
    ///
    /// [`ListError::Destroyed`] after [`destroy`](Self::destroy),
    /// [`ListError::WriteAfterEnd`] after [`end`](Self::end).
    pub fn write_chunk(&mut self, input: impl IntoChunks) -> Result<(), ListError> {
        if self.destroyed {
            return Err(ListError::Destroyed);
        }
        if self.ended {
            return Err(ListError::WriteAfterEnd);
        }
        self.list.append(input);
        self.wake_reader();
        Ok(())
    }

    /// Pipes `reader` into the writable side.
    ///
    /// Each read of up to [`fill_buffer_size`](StreamConfig::fill_buffer_size)
    /// bytes is appended as one chunk. At end of input the stream is
    /// [`end`](Self::end)ed. A read error [`destroy`](Self::destroy)s the
    /// stream with that error, so the completion callback receives it, and
    /// is also returned from the future.
    ///
    /// The stream stays borrowed until the pipe finishes; drain the source
    /// side afterwards or observe the result through the callback.
    pub fn pipe_from<R: AsyncRead>(&mut self, reader: R) -> Pipe<'_, R> {
        Pipe::new(reader, self)
    }

    /// Ends the writable side.
    ///
    /// The completion callback, if any, receives the full buffered content.
    /// Once the buffered bytes are drained the source yields `None`.
    pub fn end(&mut self) {
        if self.ended || self.destroyed {
            return;
        }
        self.ended = true;
        debug!("buffer list stream ended with {} bytes", self.list.len());
        let content = self.list.slice(..);
        self.complete(Ok(content));
        self.wake_reader();
    }

    /// Tears the stream down. Idempotent.
    ///
    /// All buffered chunks are released at once. With `Some(err)` the
    /// completion callback (if still pending) receives `err` and the next
    /// poll of the source yields it; with `None` a pending callback receives
    /// [`ListError::Destroyed`] and the source simply ends.
    pub fn destroy(&mut self, err: Option<ListError>) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.list.destroy();
        debug!("buffer list stream destroyed (error: {})", err.is_some());

        match err {
            Some(err) => {
                self.complete(Err(err.clone()));
                self.error = Some(err);
            }
            None => self.complete(Err(ListError::Destroyed)),
        }
        self.wake_reader();
    }

    /// Returns true once the writable side has ended.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Returns true once [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The configuration in use.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Borrows the underlying list.
    pub fn get_ref(&self) -> &BufferList {
        &self.list
    }

    /// Mutably borrows the underlying list.
    ///
    /// Changes made through this reference do not wake a pending reader.
    pub fn get_mut(&mut self) -> &mut BufferList {
        &mut self.list
    }

    /// Returns the underlying list, dropping any pending callback unrun.
    pub fn into_inner(self) -> BufferList {
        self.list
    }

    fn complete(&mut self, result: Result<Bytes, ListError>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }

    fn wake_reader(&mut self) {
        if let Some(waker) = self.read_waker.take() {
            waker.wake();
        }
    }
}

impl fmt::Debug for BufferListStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferListStream")
            .field("list", &self.list)
            .field("config", &self.config)
            .field("ended", &self.ended)
            .field("destroyed", &self.destroyed)
            .field("error", &self.error)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl Stream for BufferListStream {
    type Item = Result<Bytes, ListError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(err) = this.error.take() {
            return Poll::Ready(Some(Err(err)));
        }
        if this.destroyed {
            return Poll::Ready(None);
        }

        if !this.list.is_empty() {
            let size = this.config.read_size().min(this.list.len());
            let chunk = this.list.slice_range(0..size);
            this.list.consume(size as isize);
            return Poll::Ready(Some(Ok(chunk)));
        }

        if this.ended {
            return Poll::Ready(None);
        }

        this.read_waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

impl AsyncWrite for BufferListStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        Poll::Ready(
            this.write_chunk(buf)
                .map(|()| buf.len())
                .map_err(io::Error::from),
        )
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.get_mut().end();
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (
        Arc<Mutex<Vec<Result<Bytes, ListError>>>>,
        impl FnOnce(Result<Bytes, ListError>) + Send + 'static,
    ) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |result| sink.lock().unwrap().push(result))
    }

    #[test]
    fn test_end_delivers_content_once() {
        let (calls, callback) = recorder();
        let mut stream = BufferListStream::with_callback(StreamConfig::default(), callback);
        stream.write_chunk("abc").unwrap();
        stream.write_chunk(vec!["de", "f"]).unwrap();
        stream.end();
        stream.end();
        stream.destroy(None);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].as_ref().unwrap(), "abcdef");
    }

    #[test]
    fn test_destroy_with_error_reaches_callback() {
        let (calls, callback) = recorder();
        let mut stream = BufferListStream::with_callback(StreamConfig::default(), callback);
        stream.write_chunk("abc").unwrap();
        stream.destroy(Some(io::Error::other("boom").into()));
        stream.destroy(None);

        assert!(stream.get_ref().is_empty());
        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Err(ListError::Io(_))));
    }

    #[test]
    fn test_destroy_without_error_reports_destroyed() {
        let (calls, callback) = recorder();
        let mut stream = BufferListStream::with_callback(StreamConfig::default(), callback);
        stream.destroy(None);
        assert!(matches!(calls.lock().unwrap()[0], Err(ListError::Destroyed)));
    }

    #[test]
    fn test_write_after_end_or_destroy() {
        let mut stream = BufferListStream::new(StreamConfig::default());
        stream.end();
        assert!(matches!(stream.write_chunk("x"), Err(ListError::WriteAfterEnd)));
        stream.destroy(None);
        assert!(matches!(stream.write_chunk("x"), Err(ListError::Destroyed)));
    }
}
