//! DNG/TIFF metadata decoding module
//!
//! This module provides the structures and functions that turn the first
//! Image File Directory of a DNG or TIFF buffer into named metadata tags.

pub mod errors;
pub mod constants;
pub mod field_type;
pub mod value;
pub mod ifd;
pub mod catalog;
pub mod diagnostics;
pub mod metadata;
#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use crate::io::byte_reader::ByteReader;
pub use catalog::{CatalogEntry, EnumerationMatch, TagCatalog};
pub use diagnostics::Diagnostic;
pub use errors::{TiffError, TiffResult};
pub use field_type::FieldType;
pub use ifd::{IFD, IFDEntry, IfdDecoder, RawTag, ValueLocation};
pub use metadata::{parse, MetadataParser, ParsedMetadata, Tag};
pub use value::{DecodedValue, TagValue};
