//! Chunk storage: the ordered chunk sequence and its cached length.

use std::collections::VecDeque;

use bytes::Bytes;
use log::{debug, trace};

use super::input::{IntoChunks, flatten};

/// An ordered list of byte chunks addressed as one logical byte stream.
///
/// Chunks are [`Bytes`] handles. Appending never copies the caller's bytes
/// when they are already `Bytes`, consuming only moves chunk boundaries, and
/// slices that fall inside a single chunk alias that chunk's storage.
///
/// The cached length is updated in the same step as every mutation of the
/// chunk sequence, and empty chunks are never stored.
///
/// # Aliasing
///
/// [`duplicate`](Self::duplicate), [`shallow_slice`](Self::shallow_slice) and
/// zero-copy [`slice`](Self::slice) results share storage with the chunks
/// they came from. `Bytes` is immutable, so mutating bytes through one
/// alias and observing the change through another is impossible by
/// construction; sharing shows up only as identical storage pointers.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use chunklist::BufferList;
///
/// let mut list = BufferList::new();
/// list.append(Bytes::from_static(b"abcd"))
///     .append("efg")
///     .append(vec![b'h', b'i']);
///
/// assert_eq!(list.len(), 9);
/// assert_eq!(list.slice(3..6), &b"def"[..]);
///
/// list.consume(4);
/// assert_eq!(list.slice(..), &b"efghi"[..]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferList {
    pub(super) bufs: VecDeque<Bytes>,
    pub(super) length: usize,
}

impl BufferList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list holding the chunks of `input`.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let list = BufferList::from_chunks(vec!["abcdefg", "abcdefg", "12345"]);
    /// assert_eq!(list.chunk_count(), 3);
    /// assert_eq!(list.len(), 19);
    /// ```
    pub fn from_chunks(input: impl IntoChunks) -> Self {
        let mut list = Self::new();
        list.append(input);
        list
    }

    /// Total number of bytes across all chunks.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the list holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of physical chunks currently held.
    pub fn chunk_count(&self) -> usize {
        self.bufs.len()
    }

    /// The physical chunk sequence, for forwarding chunks without flattening.
    pub fn buffers(&self) -> &VecDeque<Bytes> {
        &self.bufs
    }

    /// Appends `input` after the existing content.
    ///
    /// Lists are unwrapped into their chunks, sequences are flattened in
    /// order, text and integers are converted to bytes first. Empty chunks
    /// are skipped.
    pub fn append(&mut self, input: impl IntoChunks) -> &mut Self {
        for chunk in flatten(input) {
            self.push_back(chunk);
        }
        self
    }

    /// Inserts `input` before the existing content.
    ///
    /// The relative order of a batch is preserved: the whole batch lands in
    /// front of what was there before.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let mut list = BufferList::from_chunks("cd");
    /// list.prepend(vec!["a", "b"]);
    /// assert_eq!(list.slice(..), &b"abcd"[..]);
    /// ```
    pub fn prepend(&mut self, input: impl IntoChunks) -> &mut Self {
        for chunk in flatten(input).into_iter().rev() {
            self.push_front(chunk);
        }
        self
    }

    pub(crate) fn push_back(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        self.length += chunk.len();
        self.bufs.push_back(chunk);
    }

    fn push_front(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        self.length += chunk.len();
        self.bufs.push_front(chunk);
    }

    /// Removes `bytes` bytes from the front.
    ///
    /// Whole chunks are dropped; a chunk straddling the cut is replaced by a
    /// view of its tail over the same storage. Zero or negative counts do
    /// nothing, and counts past the end empty the list.
    pub fn consume(&mut self, bytes: isize) -> &mut Self {
        if bytes <= 0 {
            return self;
        }

        let mut remaining = bytes as usize;
        if remaining > self.length {
            trace!(
                "consume of {} bytes clamped to length {}",
                remaining, self.length
            );
        }

        while let Some(front) = self.bufs.front_mut() {
            let len = front.len();
            if remaining >= len {
                remaining -= len;
                self.length -= len;
                self.bufs.pop_front();
            } else {
                *front = front.slice(remaining..);
                self.length -= remaining;
                break;
            }
        }
        self
    }

    /// Returns a new list sharing this list's chunk storage.
    ///
    /// Only the chunk handles are copied, never the bytes.
    pub fn duplicate(&self) -> Self {
        Self {
            bufs: self.bufs.clone(),
            length: self.length,
        }
    }

    /// Drops every chunk and resets the length to zero.
    ///
    /// Calling it on an already empty list does nothing.
    pub fn destroy(&mut self) {
        if !self.bufs.is_empty() {
            debug!(
                "destroying buffer list: {} chunks, {} bytes",
                self.bufs.len(),
                self.length
            );
        }
        self.bufs.clear();
        self.length = 0;
    }

    /// Returns the byte at logical `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= self.length {
            return None;
        }
        let (chunk, local) = self.resolve(index);
        self.bufs.get(chunk)?.get(local).copied()
    }

    /// Iterates over every byte in logical order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bufs.iter().flat_map(|buf| buf.iter().copied())
    }
}

impl PartialEq for BufferList {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl Eq for BufferList {}

impl FromIterator<Bytes> for BufferList {
    fn from_iter<I: IntoIterator<Item = Bytes>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl Extend<Bytes> for BufferList {
    fn extend<I: IntoIterator<Item = Bytes>>(&mut self, iter: I) {
        for chunk in iter {
            self.push_back(chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(parts: &[&'static str]) -> BufferList {
        parts
            .iter()
            .map(|p| Bytes::from_static(p.as_bytes()))
            .collect()
    }

    #[test]
    fn test_append_tracks_length() {
        let mut bl = BufferList::new();
        bl.append("abcd").append("efg").append("hi").append("j");
        assert_eq!(bl.len(), 10);
        assert_eq!(bl.chunk_count(), 4);
    }

    #[test]
    fn test_append_skips_empty() {
        let mut bl = BufferList::new();
        bl.append(Bytes::new()).append("").append(Vec::<u8>::new());
        assert!(bl.is_empty());
        assert_eq!(bl.chunk_count(), 0);
    }

    #[test]
    fn test_append_list_unwraps_chunks() {
        let inner = list(&["ab", "cd"]);
        let mut bl = list(&["x"]);
        bl.append(&inner);
        assert_eq!(bl.chunk_count(), 3);
        assert_eq!(bl.len(), 5);
    }

    #[test]
    fn test_prepend_batch_order() {
        let mut bl = list(&["ef"]);
        bl.prepend(vec!["ab", "cd"]);
        let chunks: Vec<_> = bl.buffers().iter().cloned().collect();
        assert_eq!(chunks, ["ab", "cd", "ef"]);
        assert_eq!(bl.len(), 6);
    }

    #[test]
    fn test_consume_partial_chunk_aliases() {
        let mut bl = list(&["abcd", "efg"]);
        let base = bl.buffers()[0].as_ptr();
        bl.consume(1);
        assert_eq!(bl.len(), 6);
        assert_eq!(bl.buffers()[0], "bcd");
        assert_eq!(bl.buffers()[0].as_ptr(), base.wrapping_add(1));
    }

    #[test]
    fn test_consume_exact_chunk_evicts() {
        let mut bl = list(&["a", "b"]);
        bl.consume(2);
        assert_eq!(bl.len(), 0);
        assert_eq!(bl.chunk_count(), 0);
    }

    #[test]
    fn test_consume_non_positive_is_noop() {
        let mut bl = list(&["abc"]);
        bl.consume(0).consume(-5);
        assert_eq!(bl.len(), 3);
        assert_eq!(bl.chunk_count(), 1);
    }

    #[test]
    fn test_consume_past_end_empties() {
        let mut bl = list(&["abc", "de"]);
        bl.consume(100);
        assert!(bl.is_empty());
        assert_eq!(bl.chunk_count(), 0);
    }

    #[test]
    fn test_get() {
        let bl = list(&["abcd", "efg", "hi", "j"]);
        let bytes: Vec<_> = (0..10).map(|i| bl.get(i).unwrap()).collect();
        assert_eq!(bytes, b"abcdefghij");
        assert_eq!(bl.get(10), None);
        assert_eq!(BufferList::new().get(0), None);
    }

    #[test]
    fn test_duplicate_shares_storage() {
        let bl = list(&["abcd", "efg"]);
        let dup = bl.duplicate();
        assert_eq!(dup, bl);
        for (a, b) in bl.buffers().iter().zip(dup.buffers()) {
            assert_eq!(a.as_ptr(), b.as_ptr());
        }
    }

    #[test]
    fn test_aliases_outlive_source_changes() {
        let mut bl = list(&["abcd", "efg"]);
        let dup = bl.duplicate();
        let view = bl.slice(1..3);
        let base = bl.buffers()[0].as_ptr();

        bl.consume(2).destroy();

        assert_eq!(dup.slice(..), "abcdefg");
        assert_eq!(dup.buffers()[0].as_ptr(), base);
        assert_eq!(view, "bc");
        assert_eq!(view.as_ptr(), base.wrapping_add(1));
    }

    #[test]
    fn test_destroy_idempotent() {
        let mut bl = list(&["abcd", "efg"]);
        bl.destroy();
        assert_eq!(bl.len(), 0);
        assert_eq!(bl.chunk_count(), 0);
        bl.destroy();
        assert_eq!(bl.len(), 0);
        assert_eq!(bl.chunk_count(), 0);
    }

    #[test]
    fn test_eq_ignores_chunking() {
        assert_eq!(list(&["ab", "cd"]), list(&["a", "bcd"]));
        assert_ne!(list(&["ab"]), list(&["abc"]));
    }
}
