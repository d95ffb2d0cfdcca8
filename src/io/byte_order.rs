//! Byte order handling for TIFF buffers
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when converting the raw bytes
//! of an in-memory TIFF/DNG buffer.

use byteorder::{BigEndian, ByteOrder as EndianBytes, LittleEndian};

use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the first two bytes of a buffer
    pub fn detect(data: &[u8]) -> TiffResult<Self> {
        let marker: [u8; 2] = match data.get(..2) {
            Some(bytes) => [bytes[0], bytes[1]],
            None => {
                return Err(TiffError::OffsetOutOfBounds {
                    offset: 0,
                    width: 2,
                    len: data.len(),
                })
            }
        };

        match marker {
            header::LITTLE_ENDIAN_MARKER => Ok(ByteOrder::LittleEndian),
            header::BIG_ENDIAN_MARKER => Ok(ByteOrder::BigEndian),
            _ => Err(TiffError::InvalidByteOrderMarker(u16::from_be_bytes(marker))),
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Two-letter marker as written in the file header
    pub fn marker(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "II",
            ByteOrder::BigEndian => "MM",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
///
/// Every method expects a slice of exactly the primitive's width. Bounds are
/// enforced by [`ByteReader`](crate::io::byte_reader::ByteReader) before a
/// handler is ever called.
pub trait ByteOrderHandler: Send + Sync {
    fn read_u16(&self, bytes: &[u8]) -> u16;

    fn read_i16(&self, bytes: &[u8]) -> i16;

    fn read_u32(&self, bytes: &[u8]) -> u32;

    fn read_i32(&self, bytes: &[u8]) -> i32;

    fn read_u64(&self, bytes: &[u8]) -> u64;

    fn read_i64(&self, bytes: &[u8]) -> i64;

    fn read_f32(&self, bytes: &[u8]) -> f32;

    fn read_f64(&self, bytes: &[u8]) -> f64;
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u16(&self, bytes: &[u8]) -> u16 {
        LittleEndian::read_u16(bytes)
    }

    fn read_i16(&self, bytes: &[u8]) -> i16 {
        LittleEndian::read_i16(bytes)
    }

    fn read_u32(&self, bytes: &[u8]) -> u32 {
        LittleEndian::read_u32(bytes)
    }

    fn read_i32(&self, bytes: &[u8]) -> i32 {
        LittleEndian::read_i32(bytes)
    }

    fn read_u64(&self, bytes: &[u8]) -> u64 {
        LittleEndian::read_u64(bytes)
    }

    fn read_i64(&self, bytes: &[u8]) -> i64 {
        LittleEndian::read_i64(bytes)
    }

    fn read_f32(&self, bytes: &[u8]) -> f32 {
        LittleEndian::read_f32(bytes)
    }

    fn read_f64(&self, bytes: &[u8]) -> f64 {
        LittleEndian::read_f64(bytes)
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u16(&self, bytes: &[u8]) -> u16 {
        BigEndian::read_u16(bytes)
    }

    fn read_i16(&self, bytes: &[u8]) -> i16 {
        BigEndian::read_i16(bytes)
    }

    fn read_u32(&self, bytes: &[u8]) -> u32 {
        BigEndian::read_u32(bytes)
    }

    fn read_i32(&self, bytes: &[u8]) -> i32 {
        BigEndian::read_i32(bytes)
    }

    fn read_u64(&self, bytes: &[u8]) -> u64 {
        BigEndian::read_u64(bytes)
    }

    fn read_i64(&self, bytes: &[u8]) -> i64 {
        BigEndian::read_i64(bytes)
    }

    fn read_f32(&self, bytes: &[u8]) -> f32 {
        BigEndian::read_f32(bytes)
    }

    fn read_f64(&self, bytes: &[u8]) -> f64 {
        BigEndian::read_f64(bytes)
    }
}
