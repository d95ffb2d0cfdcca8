//! Report rendering utilities
//!
//! Text and TOML renderings of inspection results, plus the regex filter
//! that selects which tags a report shows.

use log::debug;
use regex::Regex;

use crate::api::Inspection;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::metadata::{ParsedMetadata, Tag};
use crate::tiff::value::{DecodedValue, TagValue};

/// Values shown per tag in text reports before the rest is summarized
pub const MAX_DISPLAYED_VALUES: usize = 16;

/// Selects tags whose name or decimal code matches a regex
#[derive(Debug, Clone)]
pub struct TagFilter {
    pattern: Regex,
}

impl TagFilter {
    pub fn new(pattern: &str) -> TiffResult<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| TiffError::GenericError(format!("Invalid filter pattern: {}", e)))?;
        Ok(TagFilter { pattern })
    }

    pub fn matches(&self, tag: &Tag) -> bool {
        let name_matches = tag.name.as_deref().map_or(false, |name| self.pattern.is_match(name));
        name_matches || self.pattern.is_match(&tag.code.to_string())
    }
}

/// Tags of `metadata` that pass `filter`, in on-disk order
pub fn select_tags<'m>(metadata: &'m ParsedMetadata, filter: Option<&TagFilter>) -> Vec<&'m Tag> {
    let selected: Vec<&Tag> = metadata
        .tags
        .iter()
        .filter(|tag| filter.map_or(true, |f| f.matches(tag)))
        .collect();
    debug!("Selected {} of {} tags", selected.len(), metadata.tags.len());
    selected
}

/// Joins values with ", ", eliding everything after `max`
pub fn format_values(values: &[TagValue], max: usize) -> String {
    let mut text = values
        .iter()
        .take(max)
        .map(TagValue::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    if values.len() > max {
        text.push_str(&format!(", ... ({} more)", values.len() - max));
    }
    text
}

/// One report line for a tag
pub fn format_tag_line(tag: &Tag) -> String {
    format!(
        "  {:>5} {} [{}]: {}",
        tag.code,
        tag.display_name(),
        tag.field_type,
        format_values(&tag.values, MAX_DISPLAYED_VALUES)
    )
}

/// Renders the text report for one file
///
/// # Arguments
/// * `inspection` - The parsed file
/// * `filter` - Optional tag filter
/// * `show_warnings` - Append the diagnostics section
pub fn format_report(inspection: &Inspection, filter: Option<&TagFilter>, show_warnings: bool) -> String {
    let metadata = &inspection.metadata;
    let mut report = format!("File: {}\n", inspection.display_name());

    report.push_str(&format!(
        "  Byte order: {}, version {}\n",
        metadata.byte_order.name(),
        metadata.version
    ));
    if let Some(version) = metadata.dng_version() {
        report.push_str(&format!(
            "  DNG version: {}.{}.{}.{}\n",
            version[0], version[1], version[2], version[3]
        ));
    }
    if let Some((width, height)) = metadata.dimensions() {
        report.push_str(&format!("  Dimensions: {}x{}\n", width, height));
    }
    report.push_str(&format!(
        "\nIFD #0 (offset: {}): {} entries, {} decoded\n",
        metadata.ifd_offset,
        metadata.entry_count,
        metadata.tags.len()
    ));

    for tag in select_tags(metadata, filter) {
        report.push_str(&format_tag_line(tag));
        report.push('\n');
    }

    if show_warnings && metadata.has_warnings() {
        report.push_str(&format!("\nWarnings ({}):\n", metadata.diagnostics.len()));
        for diagnostic in &metadata.diagnostics {
            report.push_str(&format!("  {}\n", diagnostic));
        }
    }

    report
}

fn toml_value(value: &TagValue) -> toml::Value {
    match value {
        TagValue::Described(text) => toml::Value::String(text.clone()),
        TagValue::Raw(DecodedValue::Float(v)) => toml::Value::Float(*v as f64),
        TagValue::Raw(DecodedValue::Double(v)) => toml::Value::Float(*v),
        TagValue::Raw(DecodedValue::Ascii(text)) => toml::Value::String(text.clone()),
        TagValue::Raw(raw) => match raw.as_i64() {
            Some(v) => toml::Value::Integer(v),
            None => toml::Value::String(raw.to_string()),
        },
    }
}

fn toml_tag(tag: &Tag) -> toml::Value {
    let mut table = toml::Table::new();
    table.insert("code".to_string(), toml::Value::Integer(tag.code as i64));
    if let Some(name) = &tag.name {
        table.insert("name".to_string(), toml::Value::String(name.clone()));
    }
    table.insert("type".to_string(), toml::Value::String(tag.field_type.name().to_string()));
    table.insert(
        "values".to_string(),
        toml::Value::Array(tag.values.iter().map(toml_value).collect()),
    );
    toml::Value::Table(table)
}

/// Renders inspections as a TOML document with one `[[file]]` per input
pub fn to_toml(inspections: &[Inspection], filter: Option<&TagFilter>) -> TiffResult<String> {
    let files = inspections
        .iter()
        .map(|inspection| {
            let metadata = &inspection.metadata;
            let mut table = toml::Table::new();
            table.insert("path".to_string(), toml::Value::String(inspection.display_name()));
            table.insert(
                "byte_order".to_string(),
                toml::Value::String(metadata.byte_order.marker().to_string()),
            );
            table.insert("version".to_string(), toml::Value::Integer(metadata.version as i64));
            table.insert("ifd_offset".to_string(), toml::Value::Integer(metadata.ifd_offset as i64));
            if !metadata.diagnostics.is_empty() {
                table.insert(
                    "warnings".to_string(),
                    toml::Value::Array(
                        metadata
                            .diagnostics
                            .iter()
                            .map(|d| toml::Value::String(d.to_string()))
                            .collect(),
                    ),
                );
            }
            table.insert(
                "tag".to_string(),
                toml::Value::Array(select_tags(metadata, filter).into_iter().map(toml_tag).collect()),
            );
            toml::Value::Table(table)
        })
        .collect();

    let mut root = toml::Table::new();
    root.insert("file".to_string(), toml::Value::Array(files));

    toml::to_string(&root).map_err(|e| TiffError::GenericError(format!("TOML export failed: {}", e)))
}
