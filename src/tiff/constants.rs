//! TIFF/DNG format constants
//!
//! Named values for the header layout, field type codes and the tags the
//! decoder and reports refer to directly.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: [u8; 2] = [0x4D, 0x4D];

    /// Offset of the version word
    pub const VERSION_OFFSET: u64 = 2;

    /// Offset of the first IFD pointer
    pub const FIRST_IFD_POINTER_OFFSET: u64 = 4;
}

/// IFD layout constants
pub mod ifd_layout {
    /// Size of the entry count at the start of a directory
    pub const ENTRY_COUNT_SIZE: u64 = 2;

    /// Size of one directory entry record
    pub const ENTRY_SIZE: u64 = 12;

    /// Offset of the value/offset field inside an entry record
    pub const VALUE_FIELD_OFFSET: u64 = 8;

    /// Bytes available for inline values in a classic TIFF entry
    pub const INLINE_VALUE_SIZE: u64 = 4;
}

/// Field types as defined in the TIFF 6.0 spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
}

/// Tags referenced by name in code
pub mod tags {
    pub const IMAGE_WIDTH: u16 = 256;              // Width of the image in pixels
    pub const IMAGE_LENGTH: u16 = 257;             // Height of the image in pixels
    pub const BITS_PER_SAMPLE: u16 = 258;          // Bits per component
    pub const COMPRESSION: u16 = 259;              // Compression scheme
    pub const MAKE: u16 = 271;                     // Camera manufacturer
    pub const MODEL: u16 = 272;                    // Camera model
    pub const ORIENTATION: u16 = 274;              // Image orientation
    pub const RESOLUTION_UNIT: u16 = 296;          // Unit of measurement for resolution
    pub const SOFTWARE: u16 = 305;                 // Software used to create the image
    pub const SUB_IFDS: u16 = 330;                 // Offsets to child IFDs (not followed)
    pub const EXIF_IFD: u16 = 34665;               // Offset to the EXIF IFD (not followed)

    // DNG specific tags
    pub const DNG_VERSION: u16 = 50706;            // DNG specification version
    pub const UNIQUE_CAMERA_MODEL: u16 = 50708;    // Unique, non-localized camera name
}
