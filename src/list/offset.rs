//! Mapping between logical offsets and chunk-local positions.

use std::ops::{Bound, Range, RangeBounds};

use super::store::BufferList;

impl BufferList {
    /// Maps a logical offset to `(chunk index, offset within that chunk)`.
    ///
    /// Returns the chunk that strictly contains `offset`, except that
    /// `offset == len()` resolves to the end of the last chunk. An empty list
    /// resolves everything to `(0, 0)`; callers guard that case themselves.
    ///
    /// This is a linear scan over the chunks.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let list = BufferList::from_chunks(vec!["abcd", "efg"]);
    /// assert_eq!(list.resolve(0), (0, 0));
    /// assert_eq!(list.resolve(4), (1, 0));
    /// assert_eq!(list.resolve(7), (1, 3));
    /// ```
    pub fn resolve(&self, offset: usize) -> (usize, usize) {
        let mut total = 0;
        for (index, buf) in self.bufs.iter().enumerate() {
            let end = total + buf.len();
            if offset < end {
                return (index, offset - total);
            }
            total = end;
        }

        match self.bufs.back() {
            Some(last) => (self.bufs.len() - 1, offset - (total - last.len())),
            None => (0, 0),
        }
    }

    /// Inverse of [`resolve`](Self::resolve).
    pub fn logical_offset(&self, index: usize, local: usize) -> usize {
        self.bufs.iter().take(index).map(|buf| buf.len()).sum::<usize>() + local
    }

    /// Turns a possibly negative range into a clamped `start..end` with
    /// `start <= end <= len()`.
    ///
    /// Negative bounds count back from the end. Empty or inverted ranges
    /// collapse to an empty range.
    pub(crate) fn normalize(&self, range: impl RangeBounds<isize>) -> Range<usize> {
        let len = self.length as isize;
        let from_end = |x: isize| if x < 0 { x.saturating_add(len) } else { x };

        let start = match range.start_bound() {
            Bound::Included(&x) => from_end(x),
            Bound::Excluded(&x) => from_end(x).saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&x) => from_end(x).saturating_add(1),
            Bound::Excluded(&x) => from_end(x),
            Bound::Unbounded => len,
        };

        let start = start.clamp(0, len) as usize;
        let end = end.clamp(0, len) as usize;
        start..end.max(start)
    }

    /// Clamps a search offset the same way a slice start is clamped, except
    /// that offsets past the end stay past the end.
    pub(crate) fn normalize_offset(&self, offset: isize) -> usize {
        if offset < 0 {
            offset.saturating_add(self.length as isize).max(0) as usize
        } else {
            offset as usize
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> BufferList {
        BufferList::from_chunks(vec!["abcd", "efg", "hi", "j"])
    }

    #[test]
    fn test_resolve_boundaries() {
        let bl = list();
        assert_eq!(bl.resolve(3), (0, 3));
        assert_eq!(bl.resolve(4), (1, 0));
        assert_eq!(bl.resolve(6), (1, 2));
        assert_eq!(bl.resolve(9), (3, 0));
        assert_eq!(bl.resolve(10), (3, 1));
    }

    #[test]
    fn test_resolve_empty() {
        assert_eq!(BufferList::new().resolve(0), (0, 0));
    }

    #[test]
    fn test_logical_offset_inverts_resolve() {
        let bl = list();
        for offset in 0..=bl.len() {
            let (index, local) = bl.resolve(offset);
            assert_eq!(bl.logical_offset(index, local), offset);
        }
    }

    #[test]
    fn test_normalize() {
        let bl = list();
        assert_eq!(bl.normalize(..), 0..10);
        assert_eq!(bl.normalize(-4..-1), 6..9);
        assert_eq!(bl.normalize(3..100), 3..10);
        assert_eq!(bl.normalize(-100..2), 0..2);
        assert_eq!(bl.normalize(6..3), 6..6);
        assert_eq!(bl.normalize(20..), 10..10);
        assert_eq!(bl.normalize(..=-1), 0..10);
        assert_eq!(bl.normalize(..-10), 0..0);
    }

    #[test]
    fn test_normalize_offset() {
        let bl = list();
        assert_eq!(bl.normalize_offset(-1), 9);
        assert_eq!(bl.normalize_offset(-100), 0);
        assert_eq!(bl.normalize_offset(isize::MIN), 0);
        assert_eq!(bl.normalize_offset(25), 25);
    }
}
