//! Draining an async reader into a list or into a stream's sink side.

use std::future::Future;
use std::io;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_io::AsyncRead;
use log::debug;
use pin_project_lite::pin_project;

use super::duplex::BufferListStream;
use crate::config::StreamConfig;
use crate::error::ListError;
use crate::list::BufferList;

pin_project! {
    /// Future returned by [`fill_from`].
    ///
    /// Resolves to the list of every chunk read, in order, once the reader
    /// reports end of stream.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Fill<R> {
        #[pin]
        reader: R,
        list: BufferList,
        buffer: Vec<u8>,
    }
}

impl<R: AsyncRead> Future for Fill<R> {
    type Output = Result<BufferList, ListError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match this.reader.as_mut().poll_read(cx, this.buffer) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => return Poll::Ready(Err(ListError::from(e))),
                Poll::Ready(Ok(0)) => {
                    debug!("reader drained into {} bytes", this.list.len());
                    return Poll::Ready(Ok(mem::take(this.list)));
                }
                Poll::Ready(Ok(n)) => {
                    this.list.append(Bytes::copy_from_slice(&this.buffer[..n]));
                }
            }
        }
    }
}

pin_project! {
    /// Future returned by [`BufferListStream::pipe_from`].
    ///
    /// Writes every read into the stream, ends the stream at end of input and
    /// destroys it with the read error on failure.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Pipe<'a, R> {
        #[pin]
        reader: R,
        stream: &'a mut BufferListStream,
        buffer: Vec<u8>,
    }
}

impl<'a, R> Pipe<'a, R> {
    pub(super) fn new(reader: R, stream: &'a mut BufferListStream) -> Self {
        let buffer = vec![0u8; stream.config().fill_buffer_size()];
        Pipe {
            reader,
            stream,
            buffer,
        }
    }
}

impl<R: AsyncRead> Future for Pipe<'_, R> {
    type Output = Result<(), ListError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match this.reader.as_mut().poll_read(cx, this.buffer) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    let err = ListError::from(e);
                    debug!("piped reader failed: {err}");
                    this.stream.destroy(Some(err.clone()));
                    return Poll::Ready(Err(err));
                }
                Poll::Ready(Ok(0)) => {
                    this.stream.end();
                    return Poll::Ready(Ok(()));
                }
                Poll::Ready(Ok(n)) => {
                    let chunk = Bytes::copy_from_slice(&this.buffer[..n]);
                    if let Err(e) = this.stream.write_chunk(chunk) {
                        return Poll::Ready(Err(e));
                    }
                }
            }
        }
    }
}

/// Reads `reader` to the end, collecting each read as one chunk.
///
/// Uses `futures_io::AsyncRead`, so any runtime works. For tokio readers,
/// wrap them with `tokio_util::compat::TokioAsyncReadCompatExt::compat`.
///
/// # Example
///
/// ```ignore
/// use chunklist::{fill_from, StreamConfig};
///
/// let list = fill_from(&b"some bytes"[..], StreamConfig::default()).await?;
/// assert_eq!(list.len(), 10);
/// ```
pub fn fill_from<R: AsyncRead>(reader: R, config: StreamConfig) -> Fill<R> {
    Fill {
        reader,
        list: BufferList::new(),
        buffer: vec![0u8; config.fill_buffer_size()],
    }
}
