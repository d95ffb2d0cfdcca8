//! Custom error types for DNG/TIFF metadata decoding

use std::fmt;
use std::io;

/// Errors raised while acquiring or decoding a DNG/TIFF buffer
///
/// Only `InvalidByteOrderMarker` and structural `OffsetOutOfBounds` failures
/// abort a parse. Entry-level failures are downgraded to diagnostics by the
/// metadata parser.
#[derive(Debug)]
pub enum TiffError {
    /// I/O error while reading the source file
    IoError(io::Error),
    /// The first two bytes are neither "II" nor "MM"
    InvalidByteOrderMarker(u16),
    /// A read of `width` bytes at `offset` runs past the end of the buffer
    OffsetOutOfBounds {
        offset: u64,
        width: u64,
        len: usize,
    },
    /// Field type code outside 1..=12
    UnknownFieldType(u16),
    /// Source file does not carry the expected media type
    UnsupportedMediaType {
        path: String,
        media_type: Option<&'static str>,
    },
    /// The tag catalog definition is malformed
    InvalidCatalog(String),
    /// Generic error with message
    GenericError(String),
}

impl TiffError {
    /// Whether this error makes the whole parse meaningless
    ///
    /// Used by callers that collect per-file results: a structural error
    /// means no tags could be produced at all.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            TiffError::InvalidByteOrderMarker(_) | TiffError::OffsetOutOfBounds { .. }
        )
    }
}

impl fmt::Display for TiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiffError::IoError(e) => write!(f, "I/O error: {}", e),
            TiffError::InvalidByteOrderMarker(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            TiffError::OffsetOutOfBounds { offset, width, len } => write!(
                f,
                "Offset out of bounds: {} bytes at offset {} (buffer length {})",
                width, offset, len
            ),
            TiffError::UnknownFieldType(ft) => write!(f, "Unknown field type: {}", ft),
            TiffError::UnsupportedMediaType { path, media_type } => match media_type {
                Some(mt) => write!(f, "Unsupported media type for {}: {}", path, mt),
                None => write!(f, "Unsupported media type for {}: unknown", path),
            },
            TiffError::InvalidCatalog(msg) => write!(f, "Invalid tag catalog: {}", msg),
            TiffError::GenericError(msg) => write!(f, "DNG error: {}", msg),
        }
    }
}

impl std::error::Error for TiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TiffError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TiffError {
    fn from(error: io::Error) -> Self {
        TiffError::IoError(error)
    }
}

impl From<String> for TiffError {
    fn from(msg: String) -> Self {
        TiffError::GenericError(msg)
    }
}

/// Result type for DNG/TIFF operations
pub type TiffResult<T> = Result<T, TiffError>;
