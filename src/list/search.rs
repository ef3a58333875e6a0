//! Forward search for a byte or byte sequence.

use std::borrow::Cow;

use bytes::Bytes;
use log::trace;

use super::store::BufferList;
use crate::encoding::Encoding;
use crate::error::ListError;

/// A byte pattern to search for.
///
/// Built from a single byte, a byte slice or buffer, UTF-8 text, or another
/// [`BufferList`]. Text in other encodings goes through
/// [`BufferList::index_of_encoded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle<'a>(Cow<'a, [u8]>);

impl Needle<'_> {
    /// The pattern bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<u8> for Needle<'static> {
    fn from(byte: u8) -> Self {
        Needle(Cow::Owned(vec![byte]))
    }
}

impl<'a> From<&'a [u8]> for Needle<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Needle(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Needle<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Needle(Cow::Borrowed(bytes))
    }
}

impl<'a> From<&'a Vec<u8>> for Needle<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Needle(Cow::Borrowed(bytes))
    }
}

impl From<Vec<u8>> for Needle<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Needle(Cow::Owned(bytes))
    }
}

impl<'a> From<&'a Bytes> for Needle<'a> {
    fn from(bytes: &'a Bytes) -> Self {
        Needle(Cow::Borrowed(bytes))
    }
}

impl<'a> From<&'a str> for Needle<'a> {
    fn from(text: &'a str) -> Self {
        Needle(Cow::Borrowed(text.as_bytes()))
    }
}

impl From<&BufferList> for Needle<'static> {
    fn from(list: &BufferList) -> Self {
        Needle(Cow::Owned(list.slice(..).to_vec()))
    }
}

impl BufferList {
    /// Returns the logical offset of the first occurrence of `needle` at or
    /// after `byte_offset`, or `None`.
    ///
    /// A negative `byte_offset` counts back from the end. An empty needle
    /// matches at `byte_offset` clamped to `0..=len()`. Matches may straddle
    /// any number of chunk boundaries.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let list = BufferList::from_chunks(vec!["abcdefg", "abcdefg", "12345"]);
    /// assert_eq!(list.index_of(b'e', 0), Some(4));
    /// assert_eq!(list.index_of("e", 5), Some(11));
    /// assert_eq!(list.index_of("fgabc", 0), Some(5));
    /// assert_eq!(list.index_of("e", 12), None);
    /// assert_eq!(list.index_of("", 100), Some(19));
    /// ```
    pub fn index_of<'a>(&self, needle: impl Into<Needle<'a>>, byte_offset: isize) -> Option<usize> {
        let needle = needle.into();
        let needle = needle.as_bytes();
        let offset = self.normalize_offset(byte_offset);

        if needle.is_empty() {
            return Some(offset.min(self.length));
        }
        if offset >= self.length {
            return None;
        }
        if let [byte] = needle {
            return self.find_byte(*byte, offset);
        }

        match self.find_within_chunks(needle, offset) {
            // A match straddling an earlier boundary would start before the hit.
            Some(hit) => Some(self.find_across_chunks(needle, offset, hit).unwrap_or(hit)),
            None => {
                trace!(
                    "{}-byte needle not inside any chunk, searching across boundaries",
                    needle.len()
                );
                self.find_across_chunks(needle, offset, self.length)
            }
        }
    }

    /// Like [`index_of`](Self::index_of), with `needle` given as text in a
    /// named encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::UnknownEncoding`] for an unknown name and
    /// [`ListError::InvalidText`] when `needle` is not valid text for the
    /// encoding. Both are checked before any searching.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let list = BufferList::from_chunks("abcdef");
    /// assert_eq!(list.index_of_encoded("62", 0, "HEX")?, Some(1));
    /// assert_eq!(list.index_of_encoded("ZA==", 0, "base64")?, Some(3));
    /// assert!(list.index_of_encoded("bad", 0, "enc").is_err());
    /// # Ok::<(), chunklist::ListError>(())
    /// ```
    pub fn index_of_encoded(
        &self,
        needle: &str,
        byte_offset: isize,
        encoding: &str,
    ) -> Result<Option<usize>, ListError> {
        let encoding: Encoding = encoding.parse()?;
        let bytes = encoding.encode(needle)?;
        Ok(self.index_of(bytes, byte_offset))
    }

    /// Returns true if `needle` occurs anywhere in the list.
    pub fn contains<'a>(&self, needle: impl Into<Needle<'a>>) -> bool {
        self.index_of(needle, 0).is_some()
    }

    fn find_byte(&self, byte: u8, offset: usize) -> Option<usize> {
        let (index, mut local) = self.resolve(offset);
        let mut base = offset - local;
        for buf in self.bufs.iter().skip(index) {
            if let Some(pos) = buf[local..].iter().position(|&b| b == byte) {
                return Some(base + local + pos);
            }
            base += buf.len();
            local = 0;
        }
        None
    }

    fn find_within_chunks(&self, needle: &[u8], offset: usize) -> Option<usize> {
        let (index, mut local) = self.resolve(offset);
        let mut base = offset - local;
        for buf in self.bufs.iter().skip(index) {
            if let Some(pos) = buf[local..].windows(needle.len()).position(|w| w == needle) {
                return Some(base + local + pos);
            }
            base += buf.len();
            local = 0;
        }
        None
    }

    /// Walks candidate positions of the needle's first byte below `limit`,
    /// comparing the rest of the needle across as many chunks as it spans.
    fn find_across_chunks(&self, needle: &[u8], offset: usize, limit: usize) -> Option<usize> {
        let first = needle[0];
        let mut from = offset;
        while let Some(candidate) = self.find_byte(first, from) {
            if candidate >= limit {
                return None;
            }
            if self.matches_at(candidate, needle) {
                return Some(candidate);
            }
            from = candidate + 1;
            if from >= self.length {
                return None;
            }
        }
        None
    }

    fn matches_at(&self, offset: usize, needle: &[u8]) -> bool {
        if offset + needle.len() > self.length {
            return false;
        }

        let (index, mut local) = self.resolve(offset);
        let mut rest = needle;
        for buf in self.bufs.iter().skip(index) {
            let avail = &buf[local..];
            let take = avail.len().min(rest.len());
            if avail[..take] != rest[..take] {
                return false;
            }
            rest = &rest[take..];
            if rest.is_empty() {
                return true;
            }
            local = 0;
        }
        false
    }
}
