//! XML utility functions
//!
//! Renders inspection results as an XML document. Attribute and text
//! escaping is left to quick-xml.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::api::Inspection;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::metadata::Tag;
use crate::tiff::value::TagValue;
use crate::utils::report_utils::{select_tags, TagFilter};

const ROOT_ELEMENT: &str = "dngmeta";

fn xml_error<E: std::fmt::Display>(error: E) -> TiffError {
    TiffError::GenericError(format!("XML export failed: {}", error))
}

fn write_event<'e>(writer: &mut Writer<Vec<u8>>, event: Event<'e>) -> TiffResult<()> {
    writer.write_event(event).map_err(xml_error)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, element: BytesStart<'_>, text: &str) -> TiffResult<()> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    write_event(writer, Event::Start(element))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

fn write_tag(writer: &mut Writer<Vec<u8>>, tag: &Tag) -> TiffResult<()> {
    let code = tag.code.to_string();
    let mut start = BytesStart::new("tag");
    start.push_attribute(("code", code.as_str()));
    if let Some(name) = &tag.name {
        start.push_attribute(("name", name.as_str()));
    }
    start.push_attribute(("type", tag.field_type.name()));
    write_event(writer, Event::Start(start))?;

    for value in &tag.values {
        let mut element = BytesStart::new("value");
        if let TagValue::Described(_) = value {
            element.push_attribute(("described", "true"));
        }
        write_text_element(writer, element, &value.to_string())?;
    }

    write_event(writer, Event::End(BytesEnd::new("tag")))
}

/// Renders inspections as an indented XML document
///
/// # Arguments
/// * `inspections` - Parsed files, one `<file>` element each
/// * `filter` - Optional tag filter
///
/// # Returns
/// The document as a string
pub fn to_xml(inspections: &[Inspection], filter: Option<&TagFilter>) -> TiffResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_event(&mut writer, Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    for inspection in inspections {
        let metadata = &inspection.metadata;
        let path = inspection.display_name();
        let version = metadata.version.to_string();
        let ifd_offset = metadata.ifd_offset.to_string();

        let mut file = BytesStart::new("file");
        file.push_attribute(("path", path.as_str()));
        file.push_attribute(("byteOrder", metadata.byte_order.marker()));
        file.push_attribute(("version", version.as_str()));
        file.push_attribute(("ifdOffset", ifd_offset.as_str()));
        write_event(&mut writer, Event::Start(file))?;

        for tag in select_tags(metadata, filter) {
            write_tag(&mut writer, tag)?;
        }

        for diagnostic in &metadata.diagnostics {
            let tag = diagnostic.tag().to_string();
            let mut warning = BytesStart::new("warning");
            warning.push_attribute(("tag", tag.as_str()));
            write_text_element(&mut writer, warning, &diagnostic.to_string())?;
        }

        write_event(&mut writer, Event::End(BytesEnd::new("file")))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::byte_order::ByteOrder;
    use crate::tiff::field_type::FieldType;
    use crate::tiff::metadata::ParsedMetadata;
    use crate::tiff::value::DecodedValue;
    use std::path::PathBuf;

    fn inspection() -> Inspection {
        let tags = vec![
            Tag {
                code: 271,
                name: Some("Make".to_string()),
                field_type: FieldType::Ascii,
                values: vec![TagValue::Raw(DecodedValue::Ascii("R&D <Cam>".to_string()))],
            },
            Tag {
                code: 274,
                name: Some("Orientation".to_string()),
                field_type: FieldType::Short,
                values: vec![TagValue::Described("Horizontal (normal)".to_string())],
            },
        ];

        Inspection {
            path: PathBuf::from("shot.dng"),
            media_type: None,
            metadata: ParsedMetadata {
                byte_order: ByteOrder::BigEndian,
                version: 42,
                ifd_offset: 8,
                entry_count: 2,
                next_ifd_offset: None,
                tags,
                diagnostics: Vec::new(),
            },
        }
    }

    #[test]
    fn test_xml_export_structure() {
        let xml = to_xml(&[inspection()], None).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<file path=\"shot.dng\" byteOrder=\"MM\" version=\"42\" ifdOffset=\"8\">"));
        assert!(xml.contains("<tag code=\"274\" name=\"Orientation\" type=\"SHORT\">"));
        assert!(xml.contains("<value described=\"true\">Horizontal (normal)</value>"));
        assert!(xml.trim_end().ends_with("</dngmeta>"));
    }

    #[test]
    fn test_xml_export_escapes_text() {
        let xml = to_xml(&[inspection()], None).unwrap();
        assert!(xml.contains("<value>R&amp;D &lt;Cam&gt;</value>"));
    }

    #[test]
    fn test_xml_export_honors_filter() {
        let filter = TagFilter::new("^Make$").unwrap();
        let xml = to_xml(&[inspection()], Some(&filter)).unwrap();

        assert!(xml.contains("name=\"Make\""));
        assert!(!xml.contains("Orientation"));
    }
}
