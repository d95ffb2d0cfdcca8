//! Tests for IFD entry reading and per-entry decoding

use super::test_utils::{ascii, longs, put_u16, rationals, shorts, TestTiffBuilder, IFD_OFFSET};
use crate::io::byte_order::ByteOrder;
use crate::io::byte_reader::ByteReader;
use crate::tiff::catalog::TagCatalog;
use crate::tiff::constants::{field_types, tags};
use crate::tiff::diagnostics::Diagnostic;
use crate::tiff::errors::TiffError;
use crate::tiff::field_type::FieldType;
use crate::tiff::ifd::{IfdDecoder, ValueLocation};
use crate::tiff::value::DecodedValue;

#[test]
fn test_read_ifd_entries() {
    let order = ByteOrder::LittleEndian;
    let data = TestTiffBuilder::new(order)
        .entry(tags::IMAGE_WIDTH, field_types::LONG, 1, longs(order, &[6000]))
        .entry(tags::IMAGE_LENGTH, field_types::LONG, 1, longs(order, &[4000]))
        .entry(tags::MAKE, field_types::ASCII, 6, ascii("Nikon"))
        .next_ifd(1234)
        .build();

    let reader = ByteReader::from_header(&data).unwrap();
    let ifd = IfdDecoder::new(&reader).read_ifd(IFD_OFFSET as u64, 0).unwrap();

    assert_eq!(ifd.entry_count(), 3);
    assert_eq!(ifd.offset, 8);
    assert_eq!(ifd.next_ifd_offset, Some(1234));
    assert_eq!(ifd.size(), 2 + 3 * 12 + 4);

    let width = ifd.get_entry(tags::IMAGE_WIDTH).unwrap();
    assert_eq!(width.field_type, field_types::LONG);
    assert_eq!(width.count, 1);
    assert_eq!(width.value_offset, 6000);
    assert_eq!(width.entry_offset, 10);

    // Six ASCII bytes live after the IFD
    let make = ifd.get_entry(tags::MAKE).unwrap();
    assert_eq!(make.value_location(FieldType::Ascii), ValueLocation::Offset(IFD_OFFSET as u64 + 42));
}

#[test]
fn test_inline_and_offset_values_agree() {
    let order = ByteOrder::BigEndian;

    // Two SHORTs (4 bytes) packed into the value field
    let inline = TestTiffBuilder::new(order)
        .entry(tags::BITS_PER_SAMPLE, field_types::SHORT, 2, shorts(order, &[16, 12]))
        .build();

    // Three SHORTs (6 bytes) stored at an explicit offset after the IFD
    let builder = TestTiffBuilder::new(order).raw_entry(tags::BITS_PER_SAMPLE, field_types::SHORT, 3, 0);
    let data_offset = builder.data_start();
    let mut offset_data = TestTiffBuilder::new(order)
        .raw_entry(tags::BITS_PER_SAMPLE, field_types::SHORT, 3, data_offset)
        .build();
    assert_eq!(offset_data.len(), data_offset as usize);
    for value in [16, 12, 14] {
        put_u16(&mut offset_data, order, value);
    }

    let decode = |data: &[u8]| {
        let reader = ByteReader::from_header(data).unwrap();
        let ifd = IfdDecoder::new(&reader).read_ifd(IFD_OFFSET as u64, 0).unwrap();
        let entry = ifd.entries[0].clone();
        let location = entry.value_location(FieldType::Short);
        let directory = IfdDecoder::new(&reader).decode(IFD_OFFSET as u64).unwrap();
        assert!(directory.diagnostics.is_empty());
        (location, directory.tags)
    };

    let (inline_location, inline_tags) = decode(&inline);
    let (offset_location, offset_tags) = decode(&offset_data);

    assert_eq!(inline_location, ValueLocation::Inline(IFD_OFFSET as u64 + 2 + 8));
    assert_eq!(offset_location, ValueLocation::Offset(data_offset as u64));

    assert_eq!(
        inline_tags[0].values,
        vec![DecodedValue::Short(16), DecodedValue::Short(12)]
    );
    assert_eq!(
        offset_tags[0].values,
        vec![DecodedValue::Short(16), DecodedValue::Short(12), DecodedValue::Short(14)]
    );
    assert_eq!(offset_tags[0].values[..2], inline_tags[0].values[..]);
}

#[test]
fn test_offset_values_are_decoded() {
    let order = ByteOrder::LittleEndian;
    let data = TestTiffBuilder::new(order)
        .entry(282, field_types::RATIONAL, 1, rationals(order, &[(300, 1)]))
        .entry(tags::SOFTWARE, field_types::ASCII, 9, ascii("dcraw v9"))
        .build();

    let reader = ByteReader::from_header(&data).unwrap();
    let directory = IfdDecoder::new(&reader).decode(IFD_OFFSET as u64).unwrap();

    assert!(directory.diagnostics.is_empty());
    assert_eq!(directory.tags[0].values, vec![DecodedValue::Rational(300, 1)]);
    assert_eq!(directory.tags[1].values, vec![DecodedValue::Ascii("dcraw v9".to_string())]);
    assert_eq!(directory.tags[1].count, 9);
}

#[test]
fn test_unknown_type_drops_only_that_entry() {
    let order = ByteOrder::BigEndian;
    let data = TestTiffBuilder::new(order)
        .entry(tags::IMAGE_WIDTH, field_types::SHORT, 1, shorts(order, &[640]))
        .raw_entry(0x9999, 99, 1, 0)
        .entry(tags::IMAGE_LENGTH, field_types::SHORT, 1, shorts(order, &[480]))
        .build();

    let reader = ByteReader::from_header(&data).unwrap();
    let directory = IfdDecoder::new(&reader).decode(IFD_OFFSET as u64).unwrap();

    let codes: Vec<u16> = directory.tags.iter().map(|t| t.code).collect();
    assert_eq!(codes, vec![tags::IMAGE_WIDTH, tags::IMAGE_LENGTH]);

    assert_eq!(directory.diagnostics.len(), 1);
    assert!(matches!(
        &directory.diagnostics[0],
        Diagnostic::EntryDropped { index: 1, tag: 0x9999, error: TiffError::UnknownFieldType(99) }
    ));
}

#[test]
fn test_value_offset_past_end_drops_entry() {
    let order = ByteOrder::LittleEndian;
    let data = TestTiffBuilder::new(order)
        .raw_entry(tags::MODEL, field_types::ASCII, 32, 0xFFFF_FF00)
        .entry(tags::ORIENTATION, field_types::SHORT, 1, shorts(order, &[1]))
        .build();

    let reader = ByteReader::from_header(&data).unwrap();
    let directory = IfdDecoder::new(&reader).decode(IFD_OFFSET as u64).unwrap();

    assert_eq!(directory.tags.len(), 1);
    assert_eq!(directory.tags[0].code, tags::ORIENTATION);
    assert!(matches!(
        &directory.diagnostics[0],
        Diagnostic::EntryDropped { tag, error: TiffError::OffsetOutOfBounds { .. }, .. } if *tag == tags::MODEL
    ));
}

#[test]
fn test_truncated_entry_table_is_fatal() {
    let order = ByteOrder::LittleEndian;
    let mut data = TestTiffBuilder::new(order)
        .entry(tags::IMAGE_WIDTH, field_types::SHORT, 1, shorts(order, &[1]))
        .entry(tags::IMAGE_LENGTH, field_types::SHORT, 1, shorts(order, &[1]))
        .build();
    // Cut into the second entry
    data.truncate(IFD_OFFSET as usize + 2 + 12 + 6);

    let reader = ByteReader::from_header(&data).unwrap();
    let result = IfdDecoder::new(&reader).decode(IFD_OFFSET as u64);
    assert!(matches!(result, Err(TiffError::OffsetOutOfBounds { .. })));
}

#[test]
fn test_entry_count_past_end_is_fatal() {
    let order = ByteOrder::BigEndian;
    let data = TestTiffBuilder::new(order).build();

    let reader = ByteReader::from_header(&data).unwrap();
    let result = IfdDecoder::new(&reader).decode(data.len() as u64);
    assert!(matches!(result, Err(TiffError::OffsetOutOfBounds { .. })));
}

#[test]
fn test_missing_next_pointer_is_tolerated() {
    let order = ByteOrder::LittleEndian;
    let mut data = TestTiffBuilder::new(order)
        .entry(tags::IMAGE_WIDTH, field_types::SHORT, 1, shorts(order, &[320]))
        .build();
    data.truncate(data.len() - 4);

    let reader = ByteReader::from_header(&data).unwrap();
    let directory = IfdDecoder::new(&reader).decode(IFD_OFFSET as u64).unwrap();

    assert_eq!(directory.ifd.next_ifd_offset, None);
    assert_eq!(directory.tags.len(), 1);
}

#[test]
fn test_empty_directory() {
    let data = TestTiffBuilder::new(ByteOrder::BigEndian).build();

    let reader = ByteReader::from_header(&data).unwrap();
    let directory = IfdDecoder::new(&reader).decode(IFD_OFFSET as u64).unwrap();

    assert!(directory.tags.is_empty());
    assert!(directory.diagnostics.is_empty());
    assert_eq!(directory.ifd.next_ifd_offset, Some(0));
}

#[test]
fn test_entry_description_uses_given_catalog() {
    let order = ByteOrder::LittleEndian;
    let data = TestTiffBuilder::new(order)
        .entry(tags::IMAGE_WIDTH, field_types::LONG, 1, longs(order, &[10]))
        .build();

    let reader = ByteReader::from_header(&data).unwrap();
    let ifd = IfdDecoder::new(&reader).read_ifd(IFD_OFFSET as u64, 0).unwrap();
    let entry = &ifd.entries[0];

    let builtin = entry.description(TagCatalog::global());
    assert!(builtin.contains("ImageWidth"));
    assert!(builtin.contains("LONG"));

    let custom = TagCatalog::from_str("[[tag]]\ncode = 256\nname = \"Width\"\n").unwrap();
    let described = entry.description(&custom);
    assert!(described.contains("(Width)"));
    assert!(!described.contains("ImageWidth"));

    assert!(entry.description(&TagCatalog::default()).contains("(Unknown)"));
}
