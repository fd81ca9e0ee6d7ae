//! Endian-aware, bounds-checked access to in-memory byte buffers.
//!
//! [`ByteCursor`] wraps a borrowed byte buffer together with a configured
//! byte order and offers typed reads at explicit offsets. [`ByteWriter`]
//! is the symmetric form for producing a byte buffer, with `write_*`
//! operations that append and return the advanced offset.
//!
//! Multi-byte reads convert from the configured byte order to the native
//! one element by element, so misaligned offsets behave exactly like
//! aligned ones.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use byteordered::Endianness;
use dicoview_core::value::C;
use snafu::{Backtrace, Snafu};

/// An error from a cursor access.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The requested byte range is not contained in the buffer.
    #[snafu(display(
        "Access of {} bytes at offset {} is out of bounds (buffer has {} bytes)",
        len,
        offset,
        buffer_len
    ))]
    OutOfBounds {
        /// offset of the attempted access
        offset: usize,
        /// number of bytes requested
        len: usize,
        /// the total buffer length
        buffer_len: usize,
        /// backtrace of the failed access
        backtrace: Backtrace,
    },
}

/// Result alias for cursor accesses.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A read-only view over a byte buffer with a configured byte order.
///
/// All read operations take explicit offsets and are bounds checked.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    endianness: Endianness,
}

macro_rules! impl_read_single {
    ($name: ident, $t: ty, $size: expr, $le: expr, $be: expr) => {
        /// Read a single value at the given offset.
        pub fn $name(&self, offset: usize) -> Result<$t> {
            let bytes = self.range(offset, $size)?;
            Ok(match self.endianness {
                Endianness::Little => $le(bytes),
                Endianness::Big => $be(bytes),
            })
        }
    };
}

macro_rules! impl_read_slice {
    ($name: ident, $t: ty, $size: expr, $le: expr, $be: expr) => {
        /// Read a typed sequence spanning `byte_len` bytes
        /// starting at the given offset.
        ///
        /// `byte_len` values short of a multiple of the element size
        /// leave the trailing bytes unread.
        pub fn $name(&self, offset: usize, byte_len: usize) -> Result<C<$t>> {
            let bytes = self.range(offset, byte_len)?;
            let n = byte_len / $size;
            let mut out = C::with_capacity(n);
            for i in 0..n {
                let chunk = &bytes[i * $size..(i + 1) * $size];
                out.push(match self.endianness {
                    Endianness::Little => $le(chunk),
                    Endianness::Big => $be(chunk),
                });
            }
            Ok(out)
        }
    };
}

impl<'a> ByteCursor<'a> {
    /// Create a new cursor over the given buffer with the given byte order.
    pub fn new(data: &'a [u8], endianness: Endianness) -> Self {
        ByteCursor { data, endianness }
    }

    /// Create a cursor over the same buffer with a different byte order.
    pub fn with_endianness(&self, endianness: Endianness) -> Self {
        ByteCursor {
            data: self.data,
            endianness,
        }
    }

    /// The full length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The byte order this cursor reads multi-byte values with.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    fn range(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset.checked_add(len).ok_or_else(|| {
            OutOfBoundsSnafu {
                offset,
                len,
                buffer_len: self.data.len(),
            }
            .build()
        })?;
        if end > self.data.len() {
            return OutOfBoundsSnafu {
                offset,
                len,
                buffer_len: self.data.len(),
            }
            .fail();
        }
        Ok(&self.data[offset..end])
    }

    /// Read a single unsigned byte at the given offset.
    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.range(offset, 1)?[0])
    }

    /// Read a single signed byte at the given offset.
    pub fn read_i8(&self, offset: usize) -> Result<i8> {
        Ok(self.range(offset, 1)?[0] as i8)
    }

    impl_read_single!(read_u16, u16, 2, LittleEndian::read_u16, BigEndian::read_u16);
    impl_read_single!(read_i16, i16, 2, LittleEndian::read_i16, BigEndian::read_i16);
    impl_read_single!(read_u32, u32, 4, LittleEndian::read_u32, BigEndian::read_u32);
    impl_read_single!(read_i32, i32, 4, LittleEndian::read_i32, BigEndian::read_i32);
    impl_read_single!(read_u64, u64, 8, LittleEndian::read_u64, BigEndian::read_u64);
    impl_read_single!(read_i64, i64, 8, LittleEndian::read_i64, BigEndian::read_i64);
    impl_read_single!(read_f32, f32, 4, LittleEndian::read_f32, BigEndian::read_f32);
    impl_read_single!(read_f64, f64, 8, LittleEndian::read_f64, BigEndian::read_f64);

    /// Borrow `len` raw bytes starting at the given offset.
    pub fn read_exact(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        self.range(offset, len)
    }

    /// Read `len` bytes as an ASCII string, one byte per character,
    /// without any character set decoding.
    pub fn read_ascii(&self, offset: usize, len: usize) -> Result<String> {
        let bytes = self.range(offset, len)?;
        Ok(bytes.iter().map(|b| *b as char).collect())
    }

    /// Read a 16-bit value and render it as `0xXXXX`,
    /// with upper case zero-padded hexadecimal digits.
    pub fn read_hex16(&self, offset: usize) -> Result<String> {
        let v = self.read_u16(offset)?;
        Ok(format!("0x{:04X}", v))
    }

    /// Read a sequence of unsigned bytes spanning `byte_len` bytes.
    pub fn read_u8_slice(&self, offset: usize, byte_len: usize) -> Result<C<u8>> {
        Ok(self.range(offset, byte_len)?.iter().copied().collect())
    }

    /// Read a sequence of signed bytes spanning `byte_len` bytes.
    pub fn read_i8_slice(&self, offset: usize, byte_len: usize) -> Result<C<i8>> {
        Ok(self
            .range(offset, byte_len)?
            .iter()
            .map(|b| *b as i8)
            .collect())
    }

    impl_read_slice!(read_u16_slice, u16, 2, LittleEndian::read_u16, BigEndian::read_u16);
    impl_read_slice!(read_i16_slice, i16, 2, LittleEndian::read_i16, BigEndian::read_i16);
    impl_read_slice!(read_u32_slice, u32, 4, LittleEndian::read_u32, BigEndian::read_u32);
    impl_read_slice!(read_i32_slice, i32, 4, LittleEndian::read_i32, BigEndian::read_i32);
    impl_read_slice!(read_i64_slice, i64, 8, LittleEndian::read_i64, BigEndian::read_i64);
    impl_read_slice!(read_f32_slice, f32, 4, LittleEndian::read_f32, BigEndian::read_f32);
    impl_read_slice!(read_f64_slice, f64, 8, LittleEndian::read_f64, BigEndian::read_f64);
}

/// An output byte buffer with a configured byte order.
///
/// All write operations append at the end of the buffer
/// and return the advanced offset.
#[derive(Debug, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
    endianness: Endianness,
}

macro_rules! impl_write_single {
    ($name: ident, $t: ty, $size: expr, $le: expr, $be: expr) => {
        /// Append a single value, returning the advanced offset.
        pub fn $name(&mut self, value: $t) -> usize {
            let mut bytes = [0u8; $size];
            match self.endianness {
                Endianness::Little => $le(&mut bytes, value),
                Endianness::Big => $be(&mut bytes, value),
            }
            self.buf.extend_from_slice(&bytes);
            self.buf.len()
        }
    };
}

macro_rules! impl_write_slice {
    ($name: ident, $single: ident, $t: ty) => {
        /// Append a typed sequence, returning the advanced offset.
        pub fn $name(&mut self, values: &[$t]) -> usize {
            for v in values {
                self.$single(*v);
            }
            self.buf.len()
        }
    };
}

impl ByteWriter {
    /// Create a new empty writer with the given byte order.
    pub fn new(endianness: Endianness) -> Self {
        ByteWriter {
            buf: Vec::new(),
            endianness,
        }
    }

    /// Create a new empty writer with a pre-allocated capacity.
    pub fn with_capacity(endianness: Endianness, capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
            endianness,
        }
    }

    /// The byte order this writer encodes multi-byte values with.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Change the byte order for subsequent writes.
    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }

    /// The current write offset (the number of bytes written so far).
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Consume the writer, returning the output buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Obtain the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a single unsigned byte, returning the advanced offset.
    pub fn write_u8(&mut self, value: u8) -> usize {
        self.buf.push(value);
        self.buf.len()
    }

    /// Append a single signed byte, returning the advanced offset.
    pub fn write_i8(&mut self, value: i8) -> usize {
        self.buf.push(value as u8);
        self.buf.len()
    }

    impl_write_single!(write_u16, u16, 2, LittleEndian::write_u16, BigEndian::write_u16);
    impl_write_single!(write_i16, i16, 2, LittleEndian::write_i16, BigEndian::write_i16);
    impl_write_single!(write_u32, u32, 4, LittleEndian::write_u32, BigEndian::write_u32);
    impl_write_single!(write_i32, i32, 4, LittleEndian::write_i32, BigEndian::write_i32);
    impl_write_single!(write_i64, i64, 8, LittleEndian::write_i64, BigEndian::write_i64);
    impl_write_single!(write_f32, f32, 4, LittleEndian::write_f32, BigEndian::write_f32);
    impl_write_single!(write_f64, f64, 8, LittleEndian::write_f64, BigEndian::write_f64);

    /// Append raw bytes, returning the advanced offset.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        self.buf.extend_from_slice(bytes);
        self.buf.len()
    }

    /// Append a string as ASCII bytes, one byte per character,
    /// returning the advanced offset.
    pub fn write_ascii(&mut self, text: &str) -> usize {
        self.buf.extend(text.chars().map(|c| c as u8));
        self.buf.len()
    }

    impl_write_slice!(write_i8_slice, write_i8, i8);
    impl_write_slice!(write_u16_slice, write_u16, u16);
    impl_write_slice!(write_i16_slice, write_i16, i16);
    impl_write_slice!(write_u32_slice, write_u32, u32);
    impl_write_slice!(write_i32_slice, write_i32, i32);
    impl_write_slice!(write_i64_slice, write_i64, i64);
    impl_write_slice!(write_f32_slice, write_f32, f32);
    impl_write_slice!(write_f64_slice, write_f64, f64);

    /// Overwrite a 32-bit value previously written at the given offset.
    pub fn patch_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        if offset + 4 > self.buf.len() {
            return OutOfBoundsSnafu {
                offset,
                len: 4_usize,
                buffer_len: self.buf.len(),
            }
            .fail();
        }
        let bytes = &mut self.buf[offset..offset + 4];
        match self.endianness {
            Endianness::Little => LittleEndian::write_u32(bytes, value),
            Endianness::Big => BigEndian::write_u32(bytes, value),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_reads_both_endiannesses() {
        let data: &[u8] = &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let le = ByteCursor::new(data, Endianness::Little);
        let be = le.with_endianness(Endianness::Big);

        assert_eq!(le.read_u16(0).unwrap(), 0x0201);
        assert_eq!(be.read_u16(0).unwrap(), 0x0102);
        assert_eq!(le.read_u32(2).unwrap(), 0x0605_0403);
        assert_eq!(be.read_u32(2).unwrap(), 0x0304_0506);

        // a big-endian word stream read as little endian is element-wise
        // swapped, which the big-endian cursor undoes
        assert_eq!(
            le.read_u16_slice(0, 8).unwrap().as_slice(),
            &[0x0201, 0x0403, 0x0605, 0x0807]
        );
        assert_eq!(
            be.read_u16_slice(0, 8).unwrap().as_slice(),
            &[0x0102, 0x0304, 0x0506, 0x0708]
        );
    }

    #[test]
    fn misaligned_reads_match_element_wise() {
        let data: &[u8] = &[0xAA, 0x01, 0x02, 0x03, 0x04];
        let cursor = ByteCursor::new(data, Endianness::Little);
        // odd offset for 2-byte elements
        assert_eq!(
            cursor.read_u16_slice(1, 4).unwrap().as_slice(),
            &[0x0201, 0x0403]
        );
    }

    #[test]
    fn out_of_bounds_reads_fail() {
        let data: &[u8] = &[0x01, 0x02];
        let cursor = ByteCursor::new(data, Endianness::Little);
        assert!(cursor.read_u32(0).is_err());
        assert!(cursor.read_u8(2).is_err());
        assert!(cursor.read_exact(1, 2).is_err());
        assert!(cursor.read_u16(usize::MAX).is_err());
    }

    #[test]
    fn ascii_and_hex_reads() {
        let data: &[u8] = b"DICM\x01\x02";
        let cursor = ByteCursor::new(data, Endianness::Little);
        assert_eq!(cursor.read_ascii(0, 4).unwrap(), "DICM");
        assert_eq!(cursor.read_hex16(4).unwrap(), "0x0201");
    }

    #[test]
    fn writer_round_trip() {
        let mut w = ByteWriter::new(Endianness::Big);
        assert_eq!(w.write_u16(0x0102), 2);
        assert_eq!(w.write_u32(0x0304_0506), 6);
        let out = w.into_inner();
        assert_eq!(out, &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

        let mut w = ByteWriter::new(Endianness::Little);
        w.write_u16_slice(&[0x0102, 0x0304]);
        assert_eq!(w.as_bytes(), &[0x02, 0x01, 0x04, 0x03]);
        w.patch_u32(0, 0xAABB_CCDD).unwrap();
        assert_eq!(w.as_bytes(), &[0xDD, 0xCC, 0xBB, 0xAA]);
    }
}
