//! TIFF field types and their decode rules
//!
//! Each of the twelve TIFF 6.0 field types maps to an element width and a
//! rule for turning bytes at an offset into [`DecodedValue`]s. Type codes
//! outside the table are rejected with `UnknownFieldType`.

use std::fmt;

use log::trace;

use crate::io::byte_reader::ByteReader;
use crate::tiff::constants::{field_types, ifd_layout};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::value::DecodedValue;
use crate::utils::string_utils;

/// TIFF field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
}

impl FieldType {
    /// All field types in code order
    pub const ALL: [FieldType; 12] = [
        FieldType::Byte,
        FieldType::Ascii,
        FieldType::Short,
        FieldType::Long,
        FieldType::Rational,
        FieldType::SByte,
        FieldType::Undefined,
        FieldType::SShort,
        FieldType::SLong,
        FieldType::SRational,
        FieldType::Float,
        FieldType::Double,
    ];

    /// Maps a type code from an IFD entry to a field type
    pub fn from_code(code: u16) -> TiffResult<Self> {
        match code {
            field_types::BYTE => Ok(FieldType::Byte),
            field_types::ASCII => Ok(FieldType::Ascii),
            field_types::SHORT => Ok(FieldType::Short),
            field_types::LONG => Ok(FieldType::Long),
            field_types::RATIONAL => Ok(FieldType::Rational),
            field_types::SBYTE => Ok(FieldType::SByte),
            field_types::UNDEFINED => Ok(FieldType::Undefined),
            field_types::SSHORT => Ok(FieldType::SShort),
            field_types::SLONG => Ok(FieldType::SLong),
            field_types::SRATIONAL => Ok(FieldType::SRational),
            field_types::FLOAT => Ok(FieldType::Float),
            field_types::DOUBLE => Ok(FieldType::Double),
            _ => Err(TiffError::UnknownFieldType(code)),
        }
    }

    /// Parses an upper-case TIFF type name such as `"SHORT"`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ft| ft.name() == name)
    }

    pub const fn code(self) -> u16 {
        match self {
            FieldType::Byte => field_types::BYTE,
            FieldType::Ascii => field_types::ASCII,
            FieldType::Short => field_types::SHORT,
            FieldType::Long => field_types::LONG,
            FieldType::Rational => field_types::RATIONAL,
            FieldType::SByte => field_types::SBYTE,
            FieldType::Undefined => field_types::UNDEFINED,
            FieldType::SShort => field_types::SSHORT,
            FieldType::SLong => field_types::SLONG,
            FieldType::SRational => field_types::SRATIONAL,
            FieldType::Float => field_types::FLOAT,
            FieldType::Double => field_types::DOUBLE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
        }
    }

    /// Size in bytes of a single element
    pub const fn element_size(self) -> u64 {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
        }
    }

    /// Total size in bytes of `count` elements
    pub fn total_size(self, count: u32) -> u64 {
        self.element_size() * count as u64
    }

    /// Whether `count` elements fit in the 4-byte value field of an entry
    pub fn fits_inline(self, count: u32) -> bool {
        self.total_size(count) <= ifd_layout::INLINE_VALUE_SIZE
    }

    /// Number of decoded values `count` elements produce
    ///
    /// ASCII collapses its whole byte run into one string.
    pub fn logical_count(self, count: u32) -> usize {
        match self {
            FieldType::Ascii => (count > 0) as usize,
            _ => count as usize,
        }
    }

    /// Whether values of this type can be matched against integer enumerations
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            FieldType::Byte
                | FieldType::SByte
                | FieldType::Undefined
                | FieldType::Short
                | FieldType::SShort
                | FieldType::Long
                | FieldType::SLong
        )
    }

    /// Builds a value of this type from an integer, if it fits
    pub fn value_from_i64(self, value: i64) -> Option<DecodedValue> {
        match self {
            FieldType::Byte | FieldType::Undefined => u8::try_from(value).ok().map(DecodedValue::Byte),
            FieldType::SByte => i8::try_from(value).ok().map(DecodedValue::SByte),
            FieldType::Short => u16::try_from(value).ok().map(DecodedValue::Short),
            FieldType::SShort => i16::try_from(value).ok().map(DecodedValue::SShort),
            FieldType::Long => u32::try_from(value).ok().map(DecodedValue::Long),
            FieldType::SLong => i32::try_from(value).ok().map(DecodedValue::SLong),
            _ => None,
        }
    }

    /// Decodes a single element at `offset`
    ///
    /// For ASCII this reads one byte; whole strings go through [`decode`](Self::decode).
    pub fn decode_one(self, reader: &ByteReader<'_>, offset: u64) -> TiffResult<DecodedValue> {
        let value = match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => {
                DecodedValue::Byte(reader.read_u8(offset)?)
            }
            FieldType::SByte => DecodedValue::SByte(reader.read_i8(offset)?),
            FieldType::Short => DecodedValue::Short(reader.read_u16(offset)?),
            FieldType::SShort => DecodedValue::SShort(reader.read_i16(offset)?),
            FieldType::Long => DecodedValue::Long(reader.read_u32(offset)?),
            FieldType::SLong => DecodedValue::SLong(reader.read_i32(offset)?),
            FieldType::Rational => {
                let (num, den) = reader.read_rational(offset)?;
                DecodedValue::Rational(num, den)
            }
            FieldType::SRational => {
                let (num, den) = reader.read_srational(offset)?;
                DecodedValue::SRational(num, den)
            }
            FieldType::Float => DecodedValue::Float(reader.read_f32(offset)?),
            FieldType::Double => DecodedValue::Double(reader.read_f64(offset)?),
        };

        Ok(value)
    }

    /// Decodes `count` elements starting at `offset`
    ///
    /// The whole value region is bounds-checked before anything is decoded,
    /// so a bogus count fails without allocating. ASCII decodes the full
    /// byte run as one string with trailing NULs trimmed.
    pub fn decode(self, reader: &ByteReader<'_>, offset: u64, count: u32) -> TiffResult<Vec<DecodedValue>> {
        let total = self.total_size(count);
        let region = reader.slice(offset, total)?;

        trace!("Decoding {} x {} at offset {} ({} bytes)", count, self.name(), offset, total);

        if self == FieldType::Ascii {
            if count == 0 {
                return Ok(Vec::new());
            }
            return Ok(vec![DecodedValue::Ascii(string_utils::ascii_from_bytes(region))]);
        }

        let step = self.element_size();
        (0..count as u64)
            .map(|i| self.decode_one(reader, offset + i * step))
            .collect()
    }
}

impl TryFrom<u16> for FieldType {
    type Error = TiffError;

    fn try_from(code: u16) -> TiffResult<Self> {
        FieldType::from_code(code)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
