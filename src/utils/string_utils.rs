//! String utility functions
//!
//! Utilities for working with strings and text data.

/// Trims trailing null characters from a byte slice
pub fn trim_trailing_nulls(buffer: &[u8]) -> &[u8] {
    let end = buffer.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &buffer[..end]
}

/// Converts the bytes of an ASCII field to a string
///
/// Trailing NULs are dropped, embedded NULs are kept, and bytes that are not
/// valid UTF-8 become U+FFFD.
pub fn ascii_from_bytes(buffer: &[u8]) -> String {
    String::from_utf8_lossy(trim_trailing_nulls(buffer)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_nulls() {
        assert_eq!(trim_trailing_nulls(b"Canon\0\0"), b"Canon");
        assert_eq!(trim_trailing_nulls(b"\0\0"), b"");
        assert_eq!(trim_trailing_nulls(b""), b"");
        assert_eq!(trim_trailing_nulls(b"a\0b\0"), b"a\0b");
    }

    #[test]
    fn test_ascii_from_bytes_is_lossy() {
        assert_eq!(ascii_from_bytes(b"Nikon\0"), "Nikon");
        assert_eq!(ascii_from_bytes(&[0x41, 0xFF, 0x00]), "A\u{FFFD}");
    }
}
