use std::path::{Path, PathBuf};

use log::info;

use crate::io::source::{self, SourceFile};
use crate::tiff::catalog::TagCatalog;
use crate::tiff::errors::TiffResult;
use crate::tiff::metadata::{MetadataParser, ParsedMetadata};

/// Parse result for one file
#[derive(Debug)]
pub struct Inspection {
    /// Path the file was read from
    pub path: PathBuf,
    /// Media type derived from the extension
    pub media_type: Option<&'static str>,
    pub metadata: ParsedMetadata,
}

impl Inspection {
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Main interface to the dngmeta library
///
/// Reads files, checks their media type and decodes their first IFD against
/// the built-in catalog or a caller-supplied one.
pub struct DngInspector {
    catalog: Option<TagCatalog>,
    force: bool,
}

impl DngInspector {
    /// Create an inspector using the built-in catalog
    pub fn new() -> Self {
        DngInspector {
            catalog: None,
            force: false,
        }
    }

    /// Use `catalog` instead of the built-in one
    pub fn with_catalog(mut self, catalog: TagCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Overlay the catalog in `path` on the built-in one
    ///
    /// # Arguments
    /// * `path` - TOML catalog file in the `dng_tags.toml` format
    ///
    /// # Returns
    /// The inspector, or the error from reading or validating the catalog
    pub fn with_catalog_overlay<P: AsRef<Path>>(self, path: P) -> TiffResult<Self> {
        let overlay = TagCatalog::from_file(path.as_ref())?;
        info!(
            "Overlaying {} catalog entries from {}",
            overlay.len(),
            path.as_ref().display()
        );
        let merged = TagCatalog::global().clone().overlay(overlay);
        Ok(self.with_catalog(merged))
    }

    /// Skip the media type check when reading files
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// The catalog used for enrichment
    pub fn catalog(&self) -> &TagCatalog {
        self.catalog.as_ref().unwrap_or_else(|| TagCatalog::global())
    }

    /// Decode an in-memory buffer
    pub fn inspect_bytes(&self, data: &[u8]) -> TiffResult<ParsedMetadata> {
        MetadataParser::with_catalog(self.catalog()).parse(data)
    }

    /// Read and decode a file
    ///
    /// # Arguments
    /// * `path` - File to inspect
    ///
    /// # Returns
    /// The decoded metadata, or the acquisition or structural error
    pub fn inspect_file<P: AsRef<Path>>(&self, path: P) -> TiffResult<Inspection> {
        let SourceFile {
            path,
            media_type,
            data,
        } = source::read_source(path, self.force)?;

        let metadata = self.inspect_bytes(&data)?;
        info!("{}: {} tags", path.display(), metadata.tags.len());

        Ok(Inspection {
            path,
            media_type,
            metadata,
        })
    }
}

impl Default for DngInspector {
    fn default() -> Self {
        Self::new()
    }
}
