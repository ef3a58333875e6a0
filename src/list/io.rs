//! `bytes::Buf` and `std::io` integration.

use std::io::{self, IoSlice, Read, Write};

use bytes::{Buf, Bytes};

use super::store::BufferList;

impl Buf for BufferList {
    fn remaining(&self) -> usize {
        self.length
    }

    fn chunk(&self) -> &[u8] {
        self.bufs.front().map(|buf| buf.as_ref()).unwrap_or(&[])
    }

    fn chunks_vectored<'a>(&'a self, dst: &mut [IoSlice<'a>]) -> usize {
        let mut n = 0;
        for (slot, buf) in dst.iter_mut().zip(self.bufs.iter()) {
            *slot = IoSlice::new(buf);
            n += 1;
        }
        n
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.length,
            "cannot advance past `remaining`: {:?} <= {:?}",
            cnt,
            self.length,
        );
        self.consume(cnt as isize);
    }

    fn copy_to_bytes(&mut self, len: usize) -> Bytes {
        assert!(
            len <= self.length,
            "`len` greater than remaining: {:?} <= {:?}",
            len,
            self.length,
        );
        let out = self.slice_range(0..len);
        self.consume(len as isize);
        out
    }
}

impl Read for BufferList {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.length);
        self.copy_range(&mut buf[..n], 0);
        self.consume(n as isize);
        Ok(n)
    }
}

impl Write for BufferList {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buf_reads_across_chunks() {
        let mut bl = BufferList::from_chunks(vec![vec![0x01u8], vec![0x02, 0x03], vec![0x04]]);
        assert_eq!(bl.remaining(), 4);
        assert_eq!(bl.chunk(), &[0x01]);
        assert_eq!(bl.get_u32(), 0x0102_0304);
        assert!(!bl.has_remaining());
        assert_eq!(bl.chunk(), &[] as &[u8]);
    }

    #[test]
    fn test_copy_to_bytes_aliases_front_chunk() {
        let mut bl = BufferList::from_chunks(vec!["abcd", "ef"]);
        let base = bl.buffers()[0].as_ptr();
        let out = bl.copy_to_bytes(2);
        assert_eq!(out, "ab");
        assert_eq!(out.as_ptr(), base);
        assert_eq!(bl.slice(..), "cdef");
    }

    #[test]
    fn test_chunks_vectored() {
        let bl = BufferList::from_chunks(vec!["ab", "cd", "ef"]);
        let mut slots = [IoSlice::new(&[]); 2];
        assert_eq!(bl.chunks_vectored(&mut slots), 2);
        assert_eq!(&*slots[1], b"cd");
    }

    #[test]
    #[should_panic]
    fn test_advance_past_end_panics() {
        let mut bl = BufferList::from_chunks("ab");
        bl.advance(3);
    }

    #[test]
    fn test_io_read_write() {
        let mut bl = BufferList::new();
        bl.write_all(b"hello ").unwrap();
        bl.write_all(b"world").unwrap();
        assert_eq!(bl.chunk_count(), 2);

        let mut out = String::new();
        bl.read_to_string(&mut out).unwrap();
        assert_eq!(out, "hello world");
        assert!(bl.is_empty());
    }
}
