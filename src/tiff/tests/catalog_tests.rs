//! Tests for catalog loading, lookups and enumerations

use std::io::Write;

use crate::tiff::catalog::{EnumerationMatch, TagCatalog};
use crate::tiff::constants::tags;
use crate::tiff::errors::TiffError;
use crate::tiff::field_type::FieldType;
use crate::tiff::value::{DecodedValue, TagValue};

const SAMPLE_CATALOG: &str = r#"
[[tag]]
code = 700
name = "Sample"
type = "SHORT or LONG"
values = [1, 2]
descriptions = ["A", "B"]
default = 2

[[tag]]
code = 701
name = "Partial"
type = "SHORT"
values = [1, 2, 3]
descriptions = ["One"]

[[tag]]
code = 702
name = "Anything"
"#;

#[test]
fn test_builtin_catalog_loads() {
    let catalog = TagCatalog::global();

    assert!(catalog.len() > 100);
    assert_eq!(catalog.name_of(tags::IMAGE_WIDTH), Some("ImageWidth"));
    assert_eq!(catalog.name_of(tags::DNG_VERSION), Some("DNGVersion"));
    assert_eq!(catalog.name_of(tags::UNIQUE_CAMERA_MODEL), Some("UniqueCameraModel"));
    assert_eq!(catalog.name_of(0xFFFF), None);

    let width = catalog.lookup(tags::IMAGE_WIDTH).unwrap();
    assert_eq!(width.field_types, vec![FieldType::Short, FieldType::Long]);
    assert!(width.values.is_none());
}

#[test]
fn test_builtin_enumerations_are_paired() {
    for code in TagCatalog::global().codes() {
        let entry = TagCatalog::global().lookup(code).unwrap();
        if let (Some(values), Some(descriptions)) = (&entry.values, &entry.descriptions) {
            assert!(descriptions.len() <= values.len(), "{}", entry.name);
        }
    }
}

#[test]
fn test_builtin_resolution_unit() {
    let entry = TagCatalog::global().lookup(tags::RESOLUTION_UNIT).unwrap();

    assert_eq!(entry.match_value(&DecodedValue::Short(2)), EnumerationMatch::Described("Inch"));
    assert_eq!(entry.match_value(&DecodedValue::Short(3)), EnumerationMatch::Described("Centimeter"));
    assert_eq!(entry.match_value(&DecodedValue::Short(9)), EnumerationMatch::Unknown);
    assert_eq!(entry.default_value(), Some(TagValue::Described("Inch".to_string())));
}

#[test]
fn test_builtin_descriptions_are_sentence_cased() {
    let entry = TagCatalog::global().lookup(255).unwrap();
    assert_eq!(entry.name, "SubfileType");
    assert_eq!(
        entry.match_value(&DecodedValue::Short(1)),
        EnumerationMatch::Described("Full-resolution image data")
    );

    for code in TagCatalog::global().codes() {
        let entry = TagCatalog::global().lookup(code).unwrap();
        for description in entry.descriptions.iter().flatten() {
            let first = description.chars().next().unwrap();
            assert!(!first.is_lowercase(), "{}: {}", entry.name, description);
        }
    }
}

#[test]
fn test_custom_catalog_enumeration() {
    let catalog = TagCatalog::from_str(SAMPLE_CATALOG).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.codes(), vec![700, 701, 702]);

    let sample = catalog.lookup(700).unwrap();
    assert_eq!(sample.match_value(&DecodedValue::Short(2)), EnumerationMatch::Described("B"));
    assert_eq!(sample.match_value(&DecodedValue::Long(1)), EnumerationMatch::Described("A"));
    assert_eq!(sample.match_value(&DecodedValue::Short(5)), EnumerationMatch::Unknown);
    assert_eq!(
        sample.match_value(&DecodedValue::Ascii("2".to_string())),
        EnumerationMatch::Unknown
    );

    // Listed values past the last description have no text
    let partial = catalog.lookup(701).unwrap();
    assert_eq!(partial.match_value(&DecodedValue::Short(1)), EnumerationMatch::Described("One"));
    assert_eq!(partial.match_value(&DecodedValue::Short(3)), EnumerationMatch::Listed);

    let anything = catalog.lookup(702).unwrap();
    assert!(anything.accepts(FieldType::Double));
    assert_eq!(anything.match_value(&DecodedValue::Short(3)), EnumerationMatch::NotEnumerated);
}

#[test]
fn test_accepts_listed_types_only() {
    let catalog = TagCatalog::from_str(SAMPLE_CATALOG).unwrap();
    let sample = catalog.lookup(700).unwrap();

    assert!(sample.accepts(FieldType::Short));
    assert!(sample.accepts(FieldType::Long));
    assert!(!sample.accepts(FieldType::Ascii));
}

#[test]
fn test_default_values() {
    let catalog = TagCatalog::from_str(SAMPLE_CATALOG).unwrap();

    assert_eq!(
        catalog.lookup(700).unwrap().default_value(),
        Some(TagValue::Described("B".to_string()))
    );
    assert_eq!(catalog.lookup(701).unwrap().default_value(), None);

    let bits = TagCatalog::global().lookup(tags::BITS_PER_SAMPLE).unwrap();
    assert_eq!(bits.default_value(), Some(TagValue::Raw(DecodedValue::Short(1))));
}

#[test]
fn test_default_values_outside_declared_types() {
    let catalog = TagCatalog::from_str(
        "[[tag]]\ncode = 800\nname = \"Negative\"\ndefault = -5\n\n\
         [[tag]]\ncode = 801\nname = \"Huge\"\ndefault = 5000000000\n\n\
         [[tag]]\ncode = 802\nname = \"Wide\"\ntype = \"BYTE\"\ndefault = 300\n",
    )
    .unwrap();

    assert_eq!(
        catalog.lookup(800).unwrap().default_value(),
        Some(TagValue::Raw(DecodedValue::SLong(-5)))
    );
    assert_eq!(catalog.lookup(801).unwrap().default_value(), None);
    assert_eq!(
        catalog.lookup(802).unwrap().default_value(),
        Some(TagValue::Raw(DecodedValue::Long(300)))
    );
}

#[test]
fn test_catalog_validation() {
    let cases = [
        ("[[tag]]\nname = \"NoCode\"\n", "missing integer `code`"),
        ("[[tag]]\ncode = 70000\nname = \"Big\"\n", "not a 16-bit value"),
        ("[[tag]]\ncode = 1\n", "has no `name`"),
        ("[[tag]]\ncode = 1\nname = \"T\"\ntype = \"WORD\"\n", "unknown field type"),
        (
            "[[tag]]\ncode = 1\nname = \"T\"\ndescriptions = [\"x\"]\n",
            "descriptions but no values",
        ),
        (
            "[[tag]]\ncode = 1\nname = \"T\"\nvalues = [1]\ndescriptions = [\"x\", \"y\"]\n",
            "2 descriptions for 1 values",
        ),
        (
            "[[tag]]\ncode = 1\nname = \"A\"\n[[tag]]\ncode = 1\nname = \"B\"\n",
            "Duplicate tag code 1",
        ),
        ("tag = 5\n", "array of tables"),
        ("[[tag]\n", "Failed to parse TOML"),
    ];

    for (content, expected) in cases {
        match TagCatalog::from_str(content) {
            Err(TiffError::InvalidCatalog(message)) => {
                assert!(message.contains(expected), "{:?} should mention {:?}", message, expected)
            }
            other => panic!("expected InvalidCatalog for {:?}, got {:?}", content, other),
        }
    }
}

#[test]
fn test_empty_catalog() {
    let catalog = TagCatalog::from_str("").unwrap();
    assert!(catalog.is_empty());
}

#[test]
fn test_overlay_replaces_and_extends() {
    let overlay = TagCatalog::from_str(
        r#"
[[tag]]
code = 256
name = "Width"
type = "LONG"

[[tag]]
code = 65000
name = "VendorPrivate"
"#,
    )
    .unwrap();

    let base_len = TagCatalog::global().len();
    let merged = TagCatalog::global().clone().overlay(overlay);

    assert_eq!(merged.len(), base_len + 1);
    assert_eq!(merged.name_of(tags::IMAGE_WIDTH), Some("Width"));
    assert_eq!(merged.name_of(65000), Some("VendorPrivate"));
    assert_eq!(merged.name_of(tags::MAKE), Some("Make"));
}

#[test]
fn test_find_by_name() {
    let catalog = TagCatalog::global();
    assert_eq!(catalog.find_by_name("Orientation").map(|e| e.code), Some(tags::ORIENTATION));
    assert!(catalog.find_by_name("orientation").is_none());
}

#[test]
fn test_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_CATALOG.as_bytes()).unwrap();

    let catalog = TagCatalog::from_file(file.path()).unwrap();
    assert_eq!(catalog.name_of(700), Some("Sample"));

    let missing = TagCatalog::from_file("/nonexistent/catalog.toml");
    assert!(matches!(missing, Err(TiffError::IoError(_))));
}
