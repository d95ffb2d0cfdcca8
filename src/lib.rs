pub mod io;
pub mod tiff;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{DngInspector, Inspection};

pub use tiff::{parse, MetadataParser, ParsedMetadata, Tag, TagCatalog, TagValue, DecodedValue, FieldType};
pub use tiff::errors::{TiffError, TiffResult};
