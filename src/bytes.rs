//! Typed little-endian reads over a borrowed byte slice.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

/// A cursor over a borrowed byte slice with typed little-endian reads.
///
/// Every read advances the cursor; a read past the end of the slice is
/// reported as a [`Error::Truncated`] naming the field that was being read.
pub struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
    len: usize,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            len: data.len(),
        }
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    pub fn seek(&mut self, position: u64) {
        self.cursor.set_position(position);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.len.saturating_sub(self.cursor.position() as usize)
    }

    fn truncated(&self, what: &'static str, needed: usize) -> Error {
        Error::Truncated {
            what,
            needed,
            available: self.remaining(),
        }
    }

    pub fn u8(&mut self, what: &'static str) -> Result<u8> {
        self.cursor.read_u8().map_err(|_| self.truncated(what, 1))
    }

    pub fn u16(&mut self, what: &'static str) -> Result<u16> {
        self.cursor
            .read_u16::<LittleEndian>()
            .map_err(|_| self.truncated(what, 2))
    }

    pub fn u32(&mut self, what: &'static str) -> Result<u32> {
        self.cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| self.truncated(what, 4))
    }

    pub fn i32(&mut self, what: &'static str) -> Result<i32> {
        self.cursor
            .read_i32::<LittleEndian>()
            .map_err(|_| self.truncated(what, 4))
    }

    pub fn f32(&mut self, what: &'static str) -> Result<f32> {
        self.cursor
            .read_f32::<LittleEndian>()
            .map_err(|_| self.truncated(what, 4))
    }

    /// Read `count` little-endian `f32`s.
    pub fn f32_array(&mut self, what: &'static str, count: usize) -> Result<Vec<f32>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.f32(what)?);
        }
        Ok(out)
    }

    /// Read `count` little-endian `u32`s.
    pub fn u32_array(&mut self, what: &'static str, count: usize) -> Result<Vec<u32>> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.u32(what)?);
        }
        Ok(out)
    }

    /// Skip `n` bytes, reporting truncation rather than panicking.
    pub fn skip(&mut self, what: &'static str, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(self.truncated(what, n));
        }
        self.cursor.set_position(self.cursor.position() + n as u64);
        Ok(())
    }

    /// Read a fixed-size NUL-padded ASCII field, lower-cased, trimmed at the
    /// first NUL byte.
    pub fn fixed_ascii(&mut self, what: &'static str, size: usize) -> Result<String> {
        if self.remaining() < size {
            return Err(self.truncated(what, size));
        }
        let start = self.cursor.position() as usize;
        let bytes = &self.cursor.get_ref()[start..start + size];
        self.cursor.set_position((start + size) as u64);
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(size);
        Ok(String::from_utf8_lossy(&bytes[..end]).to_lowercase())
    }

    /// Read `count` raw bytes.
    pub fn bytes(&mut self, what: &'static str, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(self.truncated(what, count));
        }
        let start = self.cursor.position() as usize;
        let slice = &self.cursor.get_ref()[start..start + count];
        self.cursor.set_position((start + count) as u64);
        Ok(slice)
    }
}
