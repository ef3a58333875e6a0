//! Slicing and copying byte ranges out of the list.
//!
//! Three cases, checked in order:
//!
//! - the whole list: alias the only chunk, or concatenate all of them
//! - a range inside one chunk: alias that chunk's sub-range
//! - anything else: copy piece by piece across chunk boundaries

use std::ops::{Range, RangeBounds};

use bytes::{Bytes, BytesMut};

use super::store::BufferList;
use crate::encoding::Encoding;
use crate::error::ListError;

impl BufferList {
    /// Returns the bytes in `range`, aliasing chunk storage when it can.
    ///
    /// Negative bounds count back from the end; out-of-range bounds are
    /// clamped. A range inside a single chunk (or the whole list when it is a
    /// single chunk) shares that chunk's storage. Otherwise the bytes are
    /// copied into one fresh buffer.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let list = BufferList::from_chunks(vec!["abcd", "efg", "hi", "j"]);
    /// assert_eq!(list.slice(3..8), &b"defgh"[..]);
    /// assert_eq!(list.slice(-7..-4), &b"def"[..]);
    /// assert_eq!(list.slice(..), &b"abcdefghij"[..]);
    /// assert!(list.slice(8..3).is_empty());
    /// ```
    pub fn slice(&self, range: impl RangeBounds<isize>) -> Bytes {
        self.slice_range(self.normalize(range))
    }

    pub(crate) fn slice_range(&self, range: Range<usize>) -> Bytes {
        let Range { start, end } = range;
        if start >= end {
            return Bytes::new();
        }

        if start == 0 && end == self.length {
            if self.bufs.len() == 1 {
                return self.bufs[0].clone();
            }
            return self.gather(start, end);
        }

        let (index, local) = self.resolve(start);
        let chunk = &self.bufs[index];
        if end - start <= chunk.len() - local {
            return chunk.slice(local..local + (end - start));
        }

        self.gather(start, end)
    }

    /// Returns an independently owned copy of the bytes in `range`.
    ///
    /// Unlike [`slice`](Self::slice) the result never shares storage with
    /// the list.
    pub fn materialize(&self, range: impl RangeBounds<isize>) -> Bytes {
        let Range { start, end } = self.normalize(range);
        self.gather(start, end)
    }

    /// Copies the bytes in `range` into `dst`, starting at `dst[dst_start]`.
    ///
    /// Copies as many bytes as fit and returns that count.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let list = BufferList::from_chunks(vec!["abcd", "efg"]);
    /// let mut dst = [b'.'; 6];
    /// assert_eq!(list.copy(&mut dst, 1, 2..6), 4);
    /// assert_eq!(&dst, b".cdef.");
    /// ```
    pub fn copy(&self, dst: &mut [u8], dst_start: usize, range: impl RangeBounds<isize>) -> usize {
        if dst_start >= dst.len() {
            return 0;
        }
        let Range { start, end } = self.normalize(range);
        let n = (end - start).min(dst.len() - dst_start);
        self.copy_range(&mut dst[dst_start..dst_start + n], start);
        n
    }

    /// Fills `dst` with the bytes starting at logical `start`.
    ///
    /// `start + dst.len()` must not exceed the length.
    pub(crate) fn copy_range(&self, dst: &mut [u8], start: usize) {
        let mut written = 0;
        self.for_each_part(start, start + dst.len(), |part| {
            dst[written..written + part.len()].copy_from_slice(part);
            written += part.len();
        });
    }

    /// Returns a new list over the same storage, trimmed to `range`.
    ///
    /// The first and last chunks touched are narrowed; chunks in between are
    /// shared whole. No bytes are copied.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let list = BufferList::from_chunks(vec!["First", "Second", "Third"]);
    /// let shallow = list.shallow_slice(3..13);
    /// assert_eq!(shallow.chunk_count(), 3);
    /// assert_eq!(shallow.slice(..), &b"stSecondTh"[..]);
    /// ```
    pub fn shallow_slice(&self, range: impl RangeBounds<isize>) -> BufferList {
        let Range { start, end } = self.normalize(range);
        let mut out = BufferList::new();
        if start >= end {
            return out;
        }

        let (index, mut local) = self.resolve(start);
        let mut remaining = end - start;
        for buf in self.bufs.iter().skip(index) {
            let take = remaining.min(buf.len() - local);
            out.push_back(buf.slice(local..local + take));
            remaining -= take;
            if remaining == 0 {
                break;
            }
            local = 0;
        }
        out
    }

    /// Decodes the bytes in `range` as text.
    pub fn decode(&self, encoding: Encoding, range: impl RangeBounds<isize>) -> String {
        encoding.decode(&self.slice(range))
    }

    /// Decodes the bytes in `range` using an encoding given by name.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::UnknownEncoding`] if `encoding` is not a known
    /// name. The name is checked before any bytes are touched.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let list = BufferList::from_chunks(vec!["abcd", "efg"]);
    /// assert_eq!(list.to_string_encoded("ascii", 3..6)?, "def");
    /// assert_eq!(list.to_string_encoded("hex", ..2)?, "6162");
    /// assert!(list.to_string_encoded("nope", ..).is_err());
    /// # Ok::<(), chunklist::ListError>(())
    /// ```
    pub fn to_string_encoded(
        &self,
        encoding: &str,
        range: impl RangeBounds<isize>,
    ) -> Result<String, ListError> {
        let encoding: Encoding = encoding.parse()?;
        Ok(self.decode(encoding, range))
    }

    fn gather(&self, start: usize, end: usize) -> Bytes {
        let mut out = BytesMut::with_capacity(end.saturating_sub(start));
        self.for_each_part(start, end, |part| out.extend_from_slice(part));
        out.freeze()
    }

    /// Calls `f` with each contiguous piece of `start..end`, in order.
    pub(crate) fn for_each_part(&self, start: usize, end: usize, mut f: impl FnMut(&[u8])) {
        if start >= end {
            return;
        }

        let (index, mut local) = self.resolve(start);
        let mut remaining = end - start;
        for buf in self.bufs.iter().skip(index) {
            let take = remaining.min(buf.len() - local);
            f(&buf[local..local + take]);
            remaining -= take;
            if remaining == 0 {
                break;
            }
            local = 0;
        }
    }
}
