//! Fixed-width numeric reads at logical offsets.
//!
//! Every read copies its `w` bytes out through the copy engine first, so the
//! result does not depend on how the bytes are split across chunks.

use super::store::BufferList;
use crate::error::ListError;

macro_rules! read_fixed {
    ($($(#[$doc:meta])* $name:ident -> $ty:ty, $from:ident;)*) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            ///
            /// Returns [`ListError::OutOfBounds`] if the value does not fit
            /// between `offset` and the end of the list.
            pub fn $name(&self, offset: usize) -> Result<$ty, ListError> {
                Ok(<$ty>::$from(self.fixed(offset)?))
            }
        )*
    };
}

impl BufferList {
    read_fixed! {
        /// Reads an unsigned byte.
        read_u8 -> u8, from_le_bytes;
        /// Reads a signed byte.
        read_i8 -> i8, from_le_bytes;
        /// Reads a little-endian `u16`.
        read_u16_le -> u16, from_le_bytes;
        /// Reads a big-endian `u16`.
        read_u16_be -> u16, from_be_bytes;
        /// Reads a little-endian `i16`.
        read_i16_le -> i16, from_le_bytes;
        /// Reads a big-endian `i16`.
        read_i16_be -> i16, from_be_bytes;
        /// Reads a little-endian `u32`.
        read_u32_le -> u32, from_le_bytes;
        /// Reads a big-endian `u32`.
        read_u32_be -> u32, from_be_bytes;
        /// Reads a little-endian `i32`.
        read_i32_le -> i32, from_le_bytes;
        /// Reads a big-endian `i32`.
        read_i32_be -> i32, from_be_bytes;
        /// Reads a little-endian `u64`.
        read_u64_le -> u64, from_le_bytes;
        /// Reads a big-endian `u64`.
        read_u64_be -> u64, from_be_bytes;
        /// Reads a little-endian `i64`.
        read_i64_le -> i64, from_le_bytes;
        /// Reads a big-endian `i64`.
        read_i64_be -> i64, from_be_bytes;
        /// Reads a little-endian IEEE-754 single.
        read_f32_le -> f32, from_le_bytes;
        /// Reads a big-endian IEEE-754 single.
        read_f32_be -> f32, from_be_bytes;
        /// Reads a little-endian IEEE-754 double.
        read_f64_le -> f64, from_le_bytes;
        /// Reads a big-endian IEEE-754 double.
        read_f64_be -> f64, from_be_bytes;
    }

    /// Reads a `width`-byte big-endian unsigned integer, `width` in `1..=6`.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidWidth`] for a width outside `1..=6`,
    /// [`ListError::OutOfBounds`] if the bytes run past the end.
    ///
    /// ```
    /// use chunklist::BufferList;
    ///
    /// let list = BufferList::from_chunks(vec![&[0x02u8, 0x03][..], &[0x04, 0x23][..]]);
    /// assert_eq!(list.read_uint_be(0, 3)?, 0x020304);
    /// assert_eq!(list.read_uint_le(0, 3)?, 0x040302);
    /// # Ok::<(), chunklist::ListError>(())
    /// ```
    pub fn read_uint_be(&self, offset: usize, width: usize) -> Result<u64, ListError> {
        let bytes = self.variable(offset, width)?;
        Ok(bytes[..width]
            .iter()
            .fold(0, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Reads a `width`-byte little-endian unsigned integer, `width` in `1..=6`.
    pub fn read_uint_le(&self, offset: usize, width: usize) -> Result<u64, ListError> {
        let bytes = self.variable(offset, width)?;
        Ok(bytes[..width]
            .iter()
            .rev()
            .fold(0, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Reads a `width`-byte big-endian two's complement integer.
    pub fn read_int_be(&self, offset: usize, width: usize) -> Result<i64, ListError> {
        self.read_uint_be(offset, width)
            .map(|v| sign_extend(v, width))
    }

    /// Reads a `width`-byte little-endian two's complement integer.
    pub fn read_int_le(&self, offset: usize, width: usize) -> Result<i64, ListError> {
        self.read_uint_le(offset, width)
            .map(|v| sign_extend(v, width))
    }

    fn fixed<const N: usize>(&self, offset: usize) -> Result<[u8; N], ListError> {
        self.check_bounds(offset, N)?;
        let mut out = [0u8; N];
        self.copy_range(&mut out, offset);
        Ok(out)
    }

    fn variable(&self, offset: usize, width: usize) -> Result<[u8; 8], ListError> {
        if !(1..=6).contains(&width) {
            return Err(ListError::InvalidWidth { width });
        }
        self.check_bounds(offset, width)?;
        let mut out = [0u8; 8];
        self.copy_range(&mut out[..width], offset);
        Ok(out)
    }

    fn check_bounds(&self, offset: usize, width: usize) -> Result<(), ListError> {
        match offset.checked_add(width) {
            Some(end) if end <= self.length => Ok(()),
            _ => Err(ListError::OutOfBounds {
                offset,
                width,
                length: self.length,
            }),
        }
    }
}

fn sign_extend(value: u64, width: usize) -> i64 {
    let shift = 64 - 8 * width as u32;
    ((value << shift) as i64) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `[0x00] [0x00, 0x03, 0x04] [0x23, 0x42, 0x00]`
    fn list() -> BufferList {
        BufferList::from_chunks(vec![
            vec![0x00u8],
            vec![0x00, 0x03, 0x04],
            vec![0x23, 0x42, 0x00],
        ])
    }

    #[test]
    fn test_read_u8_i8() {
        let bl = list();
        assert_eq!(bl.read_u8(2).unwrap(), 0x03);
        assert_eq!(bl.read_i8(3).unwrap(), 0x04);
        assert_eq!(bl.read_u8(4).unwrap(), 0x23);
        assert_eq!(bl.read_i8(5).unwrap(), 0x42);
    }

    #[test]
    fn test_read_16() {
        let bl = list();
        assert_eq!(bl.read_u16_be(2).unwrap(), 0x0304);
        assert_eq!(bl.read_u16_le(2).unwrap(), 0x0403);
        assert_eq!(bl.read_i16_be(3).unwrap(), 0x0423);
        assert_eq!(bl.read_i16_le(3).unwrap(), 0x2304);
        assert_eq!(bl.read_u16_be(4).unwrap(), 0x2342);
        assert_eq!(bl.read_u16_le(4).unwrap(), 0x4223);
    }

    #[test]
    fn test_read_32() {
        let bl = list();
        assert_eq!(bl.read_u32_be(2).unwrap(), 0x0304_2342);
        assert_eq!(bl.read_u32_le(2).unwrap(), 0x4223_0403);
        assert_eq!(bl.read_i32_be(2).unwrap(), 0x0304_2342);
        assert_eq!(bl.read_i32_le(2).unwrap(), 0x4223_0403);
    }

    #[test]
    fn test_read_64() {
        let bl = BufferList::from_chunks(vec![vec![0xffu8; 3], vec![0xff; 4], vec![0xfe]]);
        assert_eq!(bl.read_u64_be(0).unwrap(), 0xffff_ffff_ffff_fffe);
        assert_eq!(bl.read_i64_be(0).unwrap(), -2);
        assert_eq!(bl.read_i64_le(0).unwrap(), -0x0100_0000_0000_0001);
    }

    #[test]
    fn test_read_float() {
        let bl = BufferList::from_chunks(vec![vec![0x00u8], vec![0x00, 0x00, 0x00], vec![0x80, 0x3f, 0x00]]);
        assert_eq!(bl.read_f32_le(2).unwrap(), 1.0);
    }

    #[test]
    fn test_read_double() {
        let bl = BufferList::from_chunks(vec![
            vec![0x00u8],
            vec![0x00, 0x55, 0x55],
            vec![0x55, 0x55, 0x55, 0x55, 0xd5, 0x3f, 0, 0, 0, 0],
        ]);
        assert_eq!(bl.read_f64_le(2).unwrap(), 0.3333333333333333);
    }

    #[test]
    fn test_read_variable_width() {
        let bl = BufferList::from_chunks(vec![
            vec![0x00u8],
            vec![0x02, 0x03, 0x04],
            vec![0x23, 0x42, 0x61],
        ]);
        assert_eq!(bl.read_uint_be(1, 1).unwrap(), 0x02);
        assert_eq!(bl.read_uint_be(1, 4).unwrap(), 0x0203_0423);
        assert_eq!(bl.read_uint_be(1, 6).unwrap(), 0x0203_0423_4261);
        assert_eq!(bl.read_uint_le(1, 5).unwrap(), 0x42_2304_0302);
        assert_eq!(bl.read_uint_le(1, 6).unwrap(), 0x6142_2304_0302);
        assert_eq!(bl.read_int_be(1, 6).unwrap(), 0x0203_0423_4261);
        assert_eq!(bl.read_int_le(1, 3).unwrap(), 0x04_0302);
    }

    #[test]
    fn test_read_variable_sign_extends() {
        let bl = BufferList::from_chunks(vec![vec![0xffu8, 0xff], vec![0xfe]]);
        assert_eq!(bl.read_int_be(0, 3).unwrap(), -2);
        assert_eq!(bl.read_int_le(1, 2).unwrap(), -257);
        assert_eq!(bl.read_uint_be(0, 3).unwrap(), 0xff_fffe);
    }

    #[test]
    fn test_read_errors() {
        let bl = list();
        assert!(matches!(
            bl.read_u32_le(5),
            Err(ListError::OutOfBounds { offset: 5, width: 4, length: 7 })
        ));
        assert!(matches!(
            bl.read_u8(usize::MAX),
            Err(ListError::OutOfBounds { .. })
        ));
        assert!(matches!(
            bl.read_uint_be(0, 7),
            Err(ListError::InvalidWidth { width: 7 })
        ));
        assert!(matches!(
            bl.read_int_le(0, 0),
            Err(ListError::InvalidWidth { width: 0 })
        ));
    }
}
