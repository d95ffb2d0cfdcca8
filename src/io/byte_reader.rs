//! Bounds-checked primitive reads over an immutable byte buffer
//!
//! A `ByteReader` pairs a borrowed buffer with the byte order detected from
//! its header. All reads are positional, so one reader can be shared by
//! reference between threads.

use std::fmt;

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::tiff::errors::{TiffError, TiffResult};

/// Positional reader over a complete in-memory TIFF/DNG buffer
pub struct ByteReader<'a> {
    data: &'a [u8],
    byte_order: ByteOrder,
    handler: Box<dyn ByteOrderHandler>,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader with a fixed byte order
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        ByteReader {
            data,
            byte_order,
            handler: byte_order.create_handler(),
        }
    }

    /// Creates a reader whose byte order is taken from the buffer's marker
    pub fn from_header(data: &'a [u8]) -> TiffResult<Self> {
        let byte_order = ByteOrder::detect(data)?;
        Ok(Self::new(data, byte_order))
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `width` bytes starting at `offset`
    ///
    /// Fails with `OffsetOutOfBounds` when `offset + width` exceeds the
    /// buffer length or overflows.
    pub fn slice(&self, offset: u64, width: u64) -> TiffResult<&'a [u8]> {
        let out_of_bounds = || TiffError::OffsetOutOfBounds {
            offset,
            width,
            len: self.data.len(),
        };

        let end = offset.checked_add(width).ok_or_else(out_of_bounds)?;
        if end > self.data.len() as u64 {
            return Err(out_of_bounds());
        }

        // Both bounds fit in usize: end <= data.len()
        Ok(&self.data[offset as usize..end as usize])
    }

    pub fn read_u8(&self, offset: u64) -> TiffResult<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn read_i8(&self, offset: u64) -> TiffResult<i8> {
        Ok(self.slice(offset, 1)?[0] as i8)
    }

    pub fn read_u16(&self, offset: u64) -> TiffResult<u16> {
        Ok(self.handler.read_u16(self.slice(offset, 2)?))
    }

    pub fn read_i16(&self, offset: u64) -> TiffResult<i16> {
        Ok(self.handler.read_i16(self.slice(offset, 2)?))
    }

    pub fn read_u32(&self, offset: u64) -> TiffResult<u32> {
        Ok(self.handler.read_u32(self.slice(offset, 4)?))
    }

    pub fn read_i32(&self, offset: u64) -> TiffResult<i32> {
        Ok(self.handler.read_i32(self.slice(offset, 4)?))
    }

    pub fn read_u64(&self, offset: u64) -> TiffResult<u64> {
        Ok(self.handler.read_u64(self.slice(offset, 8)?))
    }

    pub fn read_i64(&self, offset: u64) -> TiffResult<i64> {
        Ok(self.handler.read_i64(self.slice(offset, 8)?))
    }

    pub fn read_f32(&self, offset: u64) -> TiffResult<f32> {
        Ok(self.handler.read_f32(self.slice(offset, 4)?))
    }

    pub fn read_f64(&self, offset: u64) -> TiffResult<f64> {
        Ok(self.handler.read_f64(self.slice(offset, 8)?))
    }

    /// Reads a rational value (two u32 values as numerator/denominator)
    pub fn read_rational(&self, offset: u64) -> TiffResult<(u32, u32)> {
        let numerator = self.read_u32(offset)?;
        let denominator = self.read_u32(offset + 4)?;
        Ok((numerator, denominator))
    }

    /// Reads a signed rational value (two i32 values as numerator/denominator)
    pub fn read_srational(&self, offset: u64) -> TiffResult<(i32, i32)> {
        let numerator = self.read_i32(offset)?;
        let denominator = self.read_i32(offset + 4)?;
        Ok((numerator, denominator))
    }
}

impl fmt::Debug for ByteReader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteReader")
            .field("len", &self.data.len())
            .field("byte_order", &self.byte_order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_rejects_overflowing_range() {
        let data = [0u8; 8];
        let reader = ByteReader::new(&data, ByteOrder::LittleEndian);

        assert!(matches!(
            reader.slice(u64::MAX, 2),
            Err(TiffError::OffsetOutOfBounds { offset: u64::MAX, width: 2, len: 8 })
        ));
    }

    #[test]
    fn test_read_at_exact_end() {
        let data = [0x00, 0x00, 0x12, 0x34];
        let reader = ByteReader::new(&data, ByteOrder::BigEndian);

        assert_eq!(reader.read_u16(2).unwrap(), 0x1234);
        assert!(reader.read_u16(3).is_err());
        assert!(reader.read_u8(4).is_err());
    }
}
