//! Top-level metadata parsing
//!
//! `MetadataParser` validates the header, decodes the first IFD and turns
//! every surviving entry into a named [`Tag`], replacing enumerated raw
//! values with their catalog descriptions.

use std::fmt;

use log::{debug, info, trace, warn};

use crate::io::byte_order::ByteOrder;
use crate::io::byte_reader::ByteReader;
use crate::tiff::catalog::{EnumerationMatch, TagCatalog};
use crate::tiff::constants::{header, tags};
use crate::tiff::diagnostics::Diagnostic;
use crate::tiff::errors::TiffResult;
use crate::tiff::field_type::FieldType;
use crate::tiff::ifd::{IfdDecoder, RawTag};
use crate::tiff::value::{DecodedValue, TagValue};

/// A decoded, catalog-enriched metadata field
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub code: u16,
    /// Present iff the catalog knows the code
    pub name: Option<String>,
    pub field_type: FieldType,
    pub values: Vec<TagValue>,
}

impl Tag {
    /// Name for display, "Unknown" when the catalog has none
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    pub fn first_value(&self) -> Option<&TagValue> {
        self.values.first()
    }

    /// First value as an unsigned integer, when it is a raw integer
    pub fn first_u64(&self) -> Option<u64> {
        self.first_value()
            .and_then(TagValue::as_raw)
            .and_then(DecodedValue::as_i64)
            .and_then(|v| u64::try_from(v).ok())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]: ", self.code, self.display_name(), self.field_type)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Everything a parse produced
#[derive(Debug)]
pub struct ParsedMetadata {
    pub byte_order: ByteOrder,
    /// Version word from the header (42 for TIFF/DNG)
    pub version: u16,
    /// Offset of the decoded IFD
    pub ifd_offset: u32,
    /// Number of entries the IFD declares
    pub entry_count: usize,
    /// Pointer to the next IFD; read for reference, never followed
    pub next_ifd_offset: Option<u32>,
    /// Tags in on-disk order
    pub tags: Vec<Tag>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedMetadata {
    pub fn get(&self, code: u16) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.code == code)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name.as_deref() == Some(name))
    }

    /// Image width and height from ImageWidth/ImageLength
    pub fn dimensions(&self) -> Option<(u64, u64)> {
        let width = self.get(tags::IMAGE_WIDTH)?.first_u64()?;
        let height = self.get(tags::IMAGE_LENGTH)?.first_u64()?;
        Some((width, height))
    }

    /// The four DNGVersion bytes, e.g. `[1, 4, 0, 0]`
    pub fn dng_version(&self) -> Option<[u8; 4]> {
        let tag = self.get(tags::DNG_VERSION)?;
        let mut version = [0u8; 4];
        if tag.values.len() != version.len() {
            return None;
        }
        for (slot, value) in version.iter_mut().zip(&tag.values) {
            match value.as_raw() {
                Some(DecodedValue::Byte(b)) => *slot = *b,
                _ => return None,
            }
        }
        Some(version)
    }

    /// Values of a tag, falling back to the catalog default when absent
    pub fn value_or_default(&self, code: u16, catalog: &TagCatalog) -> Option<Vec<TagValue>> {
        match self.get(code) {
            Some(tag) => Some(tag.values.clone()),
            None => catalog
                .lookup(code)
                .and_then(|entry| entry.default_value())
                .map(|value| vec![value]),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of declared entries that produced no tag
    pub fn dropped_count(&self) -> usize {
        self.entry_count - self.tags.len()
    }
}

/// Parses DNG/TIFF buffers against a tag catalog
pub struct MetadataParser<'c> {
    catalog: &'c TagCatalog,
}

impl MetadataParser<'static> {
    /// Parser using the built-in catalog
    pub fn new() -> Self {
        MetadataParser {
            catalog: TagCatalog::global(),
        }
    }
}

impl Default for MetadataParser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> MetadataParser<'c> {
    pub fn with_catalog(catalog: &'c TagCatalog) -> Self {
        MetadataParser { catalog }
    }

    pub fn catalog(&self) -> &'c TagCatalog {
        self.catalog
    }

    /// Parses a complete buffer
    ///
    /// This method handles the core process:
    /// 1. Detect byte order from the "II"/"MM" marker
    /// 2. Read the version word and the first IFD offset
    /// 3. Decode the first IFD, dropping entries that fail
    /// 4. Enrich the decoded entries from the catalog
    ///
    /// # Arguments
    /// * `data` - The whole file content
    ///
    /// # Returns
    /// The tags in on-disk order plus any diagnostics, or the structural
    /// error that prevented decoding
    pub fn parse(&self, data: &[u8]) -> TiffResult<ParsedMetadata> {
        let reader = ByteReader::from_header(data)?;
        debug!("Detected byte order: {}", reader.byte_order().name());

        let version = reader.read_u16(header::VERSION_OFFSET)?;
        if version != header::TIFF_VERSION {
            warn!("Unexpected TIFF version {}, decoding anyway", version);
        }

        let ifd_offset = reader.read_u32(header::FIRST_IFD_POINTER_OFFSET)?;
        debug!("First IFD offset: {}", ifd_offset);

        let directory = IfdDecoder::new(&reader).decode(ifd_offset as u64)?;
        let mut diagnostics = directory.diagnostics;

        let enriched: Vec<Tag> = directory
            .tags
            .into_iter()
            .map(|raw| self.enrich(raw, &mut diagnostics))
            .collect();

        for code in [tags::SUB_IFDS, tags::EXIF_IFD] {
            if enriched.iter().any(|tag| tag.code == code) {
                debug!("Tag {} points at a child IFD, not followed", code);
            }
        }

        info!(
            "Parsed {} tags ({} diagnostics)",
            enriched.len(),
            diagnostics.len()
        );

        Ok(ParsedMetadata {
            byte_order: reader.byte_order(),
            version,
            ifd_offset,
            entry_count: directory.ifd.entry_count(),
            next_ifd_offset: directory.ifd.next_ifd_offset,
            tags: enriched,
            diagnostics,
        })
    }

    /// Names a raw tag and replaces enumerated values with descriptions
    fn enrich(&self, raw: RawTag, diagnostics: &mut Vec<Diagnostic>) -> Tag {
        let entry = match self.catalog.lookup(raw.code) {
            Some(entry) => entry,
            None => {
                debug!("Tag {} is not in the catalog", raw.code);
                return Tag {
                    code: raw.code,
                    name: None,
                    field_type: raw.field_type,
                    values: raw.values.into_iter().map(TagValue::Raw).collect(),
                };
            }
        };
        trace!("Tag {} is {}", raw.code, entry.name);

        if !entry.accepts(raw.field_type) {
            Diagnostic::UnexpectedFieldType {
                tag: raw.code,
                expected: entry.type_description.clone(),
                actual: raw.field_type,
            }
            .record(diagnostics);
        }

        let mut values = Vec::with_capacity(raw.values.len());
        for value in raw.values {
            match entry.match_value(&value) {
                EnumerationMatch::Described(description) => {
                    values.push(TagValue::Described(description.to_string()))
                }
                EnumerationMatch::NotEnumerated | EnumerationMatch::Listed => values.push(TagValue::Raw(value)),
                EnumerationMatch::Unknown => {
                    Diagnostic::UnknownEnumerationValue {
                        tag: raw.code,
                        value: value.clone(),
                    }
                    .record(diagnostics);
                    values.push(TagValue::Raw(value));
                }
            }
        }

        Tag {
            code: raw.code,
            name: Some(entry.name.clone()),
            field_type: raw.field_type,
            values,
        }
    }
}

/// Parses a buffer with the built-in catalog and returns only the tags
pub fn parse(data: &[u8]) -> TiffResult<Vec<Tag>> {
    MetadataParser::new().parse(data).map(|metadata| metadata.tags)
}
