//! File acquisition for the decoder
//!
//! The decoder only ever sees a complete in-memory buffer. This module reads
//! that buffer from disk and confirms the file's media type before anything
//! is parsed.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::tiff::errors::{TiffError, TiffResult};

/// Media type of Adobe Digital Negative files
pub const DNG_MEDIA_TYPE: &str = "image/x-adobe-dng";

/// Media type of plain TIFF files
pub const TIFF_MEDIA_TYPE: &str = "image/tiff";

/// A file read fully into memory
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path the data was read from
    pub path: PathBuf,
    /// Media type derived from the file extension, if recognized
    pub media_type: Option<&'static str>,
    /// Complete file contents
    pub data: Vec<u8>,
}

impl SourceFile {
    /// Display form of the path
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Derives a media type from a path's extension
pub fn media_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "dng" => Some(DNG_MEDIA_TYPE),
        "tif" | "tiff" => Some(TIFF_MEDIA_TYPE),
        _ => None,
    }
}

/// Reads a file for decoding
///
/// Unless `force` is set, anything that is not a DNG by extension is
/// rejected with `UnsupportedMediaType` before the file is opened.
///
/// # Arguments
/// * `path` - File to read
/// * `force` - Skip the media type check
///
/// # Returns
/// The file contents with their media type
pub fn read_source<P: AsRef<Path>>(path: P, force: bool) -> TiffResult<SourceFile> {
    let path = path.as_ref();
    let media_type = media_type_for_path(path);
    debug!("Media type for {}: {:?}", path.display(), media_type);

    if !force && media_type != Some(DNG_MEDIA_TYPE) {
        return Err(TiffError::UnsupportedMediaType {
            path: path.display().to_string(),
            media_type,
        });
    }

    let data = fs::read(path)?;
    info!("Read {} bytes from {}", data.len(), path.display());

    Ok(SourceFile {
        path: path.to_path_buf(),
        media_type,
        data,
    })
}
