//! Input normalization for `append` and `prepend`.
//!
//! Every accepted shape is flattened into a plain sequence of [`Bytes`]
//! before the list is touched, so the list is never mutated while the input
//! is still being walked.

use std::collections::VecDeque;

use bytes::{Bytes, BytesMut};

use super::store::BufferList;

/// Values that can be turned into an ordered sequence of chunks.
///
/// Implemented for byte buffers, text, integers (as their decimal text),
/// `Option`s of those (where `None` contributes nothing), sequences of those,
/// and [`BufferList`] itself, whose chunks are taken individually rather than
/// nested.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use chunklist::BufferList;
///
/// let mut list = BufferList::new();
/// list.append(42u32)
///     .append(None::<Bytes>)
///     .append([Bytes::from_static(b"-"), Bytes::from_static(b"x")]);
/// assert_eq!(list.slice(..), &b"42-x"[..]);
/// ```
pub trait IntoChunks {
    /// Pushes this value's chunks, in order, onto `out`.
    fn push_chunks(self, out: &mut Vec<Bytes>);
}

pub(super) fn flatten(input: impl IntoChunks) -> Vec<Bytes> {
    let mut out = Vec::new();
    input.push_chunks(&mut out);
    out
}

impl IntoChunks for Bytes {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.push(self);
    }
}

impl IntoChunks for &Bytes {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.push(self.clone());
    }
}

impl IntoChunks for BytesMut {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.push(self.freeze());
    }
}

impl IntoChunks for Vec<u8> {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.push(Bytes::from(self));
    }
}

impl IntoChunks for &[u8] {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.push(Bytes::copy_from_slice(self));
    }
}

impl<const N: usize> IntoChunks for &[u8; N] {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.push(Bytes::copy_from_slice(self));
    }
}

impl IntoChunks for &str {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.push(Bytes::copy_from_slice(self.as_bytes()));
    }
}

impl IntoChunks for String {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.push(Bytes::from(self));
    }
}

impl IntoChunks for BufferList {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.extend(self.bufs);
    }
}

impl IntoChunks for &BufferList {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        out.extend(self.bufs.iter().cloned());
    }
}

impl<T: IntoChunks> IntoChunks for Option<T> {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        if let Some(inner) = self {
            inner.push_chunks(out);
        }
    }
}

impl<T: IntoChunks, const N: usize> IntoChunks for [T; N] {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        for item in self {
            item.push_chunks(out);
        }
    }
}

// Sequences. `Vec<u8>` is a single chunk, so the element types are listed
// explicitly instead of a blanket `Vec<T>`.
macro_rules! impl_sequence {
    ($($seq:ident<$elem:ty>),* $(,)?) => {
        $(
            impl IntoChunks for $seq<$elem> {
                fn push_chunks(self, out: &mut Vec<Bytes>) {
                    for item in self {
                        item.push_chunks(out);
                    }
                }
            }
        )*
    };
}

impl_sequence!(
    Vec<Bytes>,
    Vec<BytesMut>,
    Vec<Vec<u8>>,
    Vec<String>,
    Vec<BufferList>,
    VecDeque<Bytes>,
);

impl<'a> IntoChunks for Vec<&'a str> {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        for item in self {
            item.push_chunks(out);
        }
    }
}

impl<'a> IntoChunks for Vec<&'a [u8]> {
    fn push_chunks(self, out: &mut Vec<Bytes>) {
        for item in self {
            item.push_chunks(out);
        }
    }
}

// Integers are appended as their decimal text, never as raw bytes.
macro_rules! impl_integer {
    ($($int:ty),* $(,)?) => {
        $(
            impl IntoChunks for $int {
                fn push_chunks(self, out: &mut Vec<Bytes>) {
                    out.push(Bytes::from(self.to_string()));
                }
            }
        )*
    };
}

impl_integer!(i16, i32, i64, isize, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_lists() {
        let inner = BufferList::from_chunks(vec!["a", "b"]);
        let outer = BufferList::from_chunks(vec![inner.duplicate(), inner]);
        let chunks = flatten(outer);
        assert_eq!(chunks, ["a", "b", "a", "b"]);
    }

    #[test]
    fn test_integers_are_decimal_text() {
        assert_eq!(flatten(100u32), ["100"]);
        assert_eq!(flatten(-7i64), ["-7"]);
    }

    #[test]
    fn test_none_is_noop() {
        assert!(flatten(None::<String>).is_empty());
        assert_eq!(flatten(Some("x")), ["x"]);
    }

    #[test]
    fn test_nested_byte_vectors() {
        let mut out = Vec::new();
        vec![b"ab".to_vec(), Vec::new(), b"c".to_vec()].push_chunks(&mut out);
        assert_eq!(out, ["ab", "", "c"]);
    }

    #[test]
    fn test_bytes_are_not_copied() {
        let chunk = Bytes::from(vec![1u8, 2, 3]);
        let ptr = chunk.as_ptr();
        let chunks = flatten(&chunk);
        assert_eq!(chunks[0].as_ptr(), ptr);
    }
}
