//! Image File Directory (IFD) structures and decoding
//!
//! An IFD is a 16-bit entry count followed by fixed-size 12-byte entries.
//! Each entry names a tag, a field type, a value count and a 4-byte field
//! that either holds the values themselves (when they fit) or the absolute
//! offset where they live.
//!
//! Only the directory the header points at is decoded. The next-IFD pointer
//! after the entry table is read for reference and never followed.

use log::{debug, info, trace};

use crate::io::byte_reader::ByteReader;
use crate::tiff::catalog::TagCatalog;
use crate::tiff::constants::ifd_layout;
use crate::tiff::diagnostics::Diagnostic;
use crate::tiff::errors::TiffResult;
use crate::tiff::field_type::FieldType;
use crate::tiff::value::DecodedValue;

/// Represents an entry in an Image File Directory (IFD)
///
/// The field type is kept as the raw code; it is only resolved when the
/// entry's values are decoded, so unknown types fail per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type code
    pub field_type: u16,
    /// Number of values
    pub count: u32,
    /// Value field interpreted as an offset
    pub value_offset: u32,
    /// Absolute offset of this entry record
    pub entry_offset: u64,
}

/// Where an entry's values start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueLocation {
    /// Packed into the entry's own value field at this absolute offset
    Inline(u64),
    /// Stored elsewhere in the buffer at this absolute offset
    Offset(u64),
}

impl ValueLocation {
    pub fn offset(self) -> u64 {
        match self {
            ValueLocation::Inline(offset) | ValueLocation::Offset(offset) => offset,
        }
    }
}

impl IFDEntry {
    /// Creates a new IFD entry
    pub fn new(tag: u16, field_type: u16, count: u32, value_offset: u32, entry_offset: u64) -> Self {
        trace!(
            "IFD entry at {}: tag={}, type={}, count={}, value/offset={}",
            entry_offset,
            tag,
            field_type,
            count,
            value_offset
        );

        Self {
            tag,
            field_type,
            count,
            value_offset,
            entry_offset,
        }
    }

    /// Absolute offset of the 4-byte value field
    pub fn value_field_offset(&self) -> u64 {
        self.entry_offset + ifd_layout::VALUE_FIELD_OFFSET
    }

    /// Resolves the field type code
    pub fn resolve_field_type(&self) -> TiffResult<FieldType> {
        FieldType::from_code(self.field_type)
    }

    /// Determines where this entry's values start
    ///
    /// Values totalling four bytes or less are packed into the value field;
    /// anything larger sits at the offset the field holds.
    pub fn value_location(&self, field_type: FieldType) -> ValueLocation {
        if field_type.fits_inline(self.count) {
            ValueLocation::Inline(self.value_field_offset())
        } else {
            ValueLocation::Offset(self.value_offset as u64)
        }
    }

    /// Returns a human-readable description of this entry
    ///
    /// The tag name comes from `catalog`, "Unknown" when it has none.
    pub fn description(&self, catalog: &TagCatalog) -> String {
        let type_name = FieldType::from_code(self.field_type)
            .map(FieldType::name)
            .unwrap_or("Unknown");

        format!(
            "Tag: {} ({}), Type: {} ({}), Count: {}, Value/Offset: {}",
            self.tag,
            catalog.name_of(self.tag).unwrap_or("Unknown"),
            self.field_type,
            type_name,
            self.count,
            self.value_offset
        )
    }
}

/// Represents an Image File Directory (IFD) in a TIFF file
#[derive(Debug, Clone)]
pub struct IFD {
    /// IFD number (0-based)
    pub number: usize,
    /// Offset to this IFD in the file
    pub offset: u64,
    /// Entries in on-disk order
    pub entries: Vec<IFDEntry>,
    /// Pointer stored after the entry table, if it lies inside the buffer
    pub next_ifd_offset: Option<u32>,
}

impl IFD {
    /// Creates a new empty IFD
    pub fn new(number: usize, offset: u64) -> Self {
        Self {
            number,
            offset,
            entries: Vec::new(),
            next_ifd_offset: None,
        }
    }

    pub fn add_entry(&mut self, entry: IFDEntry) {
        self.entries.push(entry);
    }

    /// Gets the first entry with the given tag
    pub fn get_entry(&self, tag: u16) -> Option<&IFDEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Size of the directory in bytes, including the next-IFD pointer
    pub fn size(&self) -> u64 {
        ifd_layout::ENTRY_COUNT_SIZE + ifd_layout::ENTRY_SIZE * self.entries.len() as u64 + 4
    }
}

/// An entry whose values decoded successfully
#[derive(Debug, Clone, PartialEq)]
pub struct RawTag {
    pub code: u16,
    pub field_type: FieldType,
    /// Count as stored in the entry
    pub count: u32,
    pub values: Vec<DecodedValue>,
}

/// Result of decoding one directory
#[derive(Debug)]
pub struct DecodedDirectory {
    pub ifd: IFD,
    /// Decoded entries in on-disk order
    pub tags: Vec<RawTag>,
    /// One `EntryDropped` per entry that failed to decode
    pub diagnostics: Vec<Diagnostic>,
}

/// Walks one directory and decodes its entries
pub struct IfdDecoder<'r, 'a> {
    reader: &'r ByteReader<'a>,
}

impl<'r, 'a> IfdDecoder<'r, 'a> {
    pub fn new(reader: &'r ByteReader<'a>) -> Self {
        IfdDecoder { reader }
    }

    /// Reads the entry table of the directory at `offset`
    ///
    /// The count and every entry record must lie inside the buffer; a
    /// truncated table fails the whole read with `OffsetOutOfBounds`.
    ///
    /// # Arguments
    /// * `offset` - Offset in the buffer where the IFD starts
    /// * `number` - The index of this IFD in the file
    pub fn read_ifd(&self, offset: u64, number: usize) -> TiffResult<IFD> {
        let entry_count = self.reader.read_u16(offset)?;
        debug!("IFD #{} at offset {}: {} entries", number, offset, entry_count);

        let mut ifd = IFD::new(number, offset);
        let first_entry = offset + ifd_layout::ENTRY_COUNT_SIZE;

        for i in 0..entry_count as u64 {
            let entry = self.read_entry(first_entry + i * ifd_layout::ENTRY_SIZE)?;
            ifd.add_entry(entry);
        }

        let next_pointer = first_entry + entry_count as u64 * ifd_layout::ENTRY_SIZE;
        ifd.next_ifd_offset = self.reader.read_u32(next_pointer).ok();
        debug!("Next IFD pointer: {:?} (not followed)", ifd.next_ifd_offset);

        Ok(ifd)
    }

    /// Reads a single 12-byte entry record
    pub fn read_entry(&self, entry_offset: u64) -> TiffResult<IFDEntry> {
        // Bounds-check the whole record up front
        self.reader.slice(entry_offset, ifd_layout::ENTRY_SIZE)?;

        let tag = self.reader.read_u16(entry_offset)?;
        let field_type = self.reader.read_u16(entry_offset + 2)?;
        let count = self.reader.read_u32(entry_offset + 4)?;
        let value_offset = self.reader.read_u32(entry_offset + ifd_layout::VALUE_FIELD_OFFSET)?;

        Ok(IFDEntry::new(tag, field_type, count, value_offset, entry_offset))
    }

    /// Decodes the values of one entry
    pub fn decode_entry(&self, entry: &IFDEntry) -> TiffResult<RawTag> {
        let field_type = entry.resolve_field_type()?;
        let location = entry.value_location(field_type);
        trace!("Tag {} values at {:?}", entry.tag, location);

        let values = field_type.decode(self.reader, location.offset(), entry.count)?;

        Ok(RawTag {
            code: entry.tag,
            field_type,
            count: entry.count,
            values,
        })
    }

    /// Reads the directory at `offset` and decodes every entry
    ///
    /// Entries that fail to decode are dropped and reported as diagnostics;
    /// the remaining entries keep their on-disk order.
    pub fn decode(&self, offset: u64) -> TiffResult<DecodedDirectory> {
        let ifd = self.read_ifd(offset, 0)?;
        let mut tags = Vec::with_capacity(ifd.entry_count());
        let mut diagnostics = Vec::new();

        for (index, entry) in ifd.entries.iter().enumerate() {
            match self.decode_entry(entry) {
                Ok(tag) => tags.push(tag),
                Err(error) => Diagnostic::EntryDropped {
                    index,
                    tag: entry.tag,
                    error,
                }
                .record(&mut diagnostics),
            }
        }

        info!(
            "Decoded {} of {} entries in IFD #{}",
            tags.len(),
            ifd.entry_count(),
            ifd.number
        );

        Ok(DecodedDirectory {
            ifd,
            tags,
            diagnostics,
        })
    }
}
