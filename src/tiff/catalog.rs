//! Tag catalog: names, expected types and enumerated values
//!
//! The built-in catalog is the embedded `dng_tags.toml`, parsed once on
//! first use and shared read-only for the rest of the process. Catalogs in
//! the same format can also be loaded from a file and overlaid on top of it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, error};

use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::field_type::FieldType;
use crate::tiff::value::{DecodedValue, TagValue};

lazy_static! {
    // Parse the embedded catalog on first access
    static ref DNG_TAG_CATALOG: TagCatalog = {
        let content = include_str!("../../dng_tags.toml");
        TagCatalog::from_str(content).unwrap_or_else(|e| {
            error!("Failed to parse built-in tag catalog: {}", e);
            TagCatalog::default()
        })
    };
}

/// Definition of a single tag
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub code: u16,
    pub name: String,
    /// Expected type as written in the catalog, e.g. "SHORT or LONG"
    pub type_description: String,
    /// Field types parsed from `type_description`; empty accepts anything
    pub field_types: Vec<FieldType>,
    /// Enumerated raw values
    pub values: Option<Vec<i64>>,
    /// Descriptions paired by position with `values`
    pub descriptions: Option<Vec<String>>,
    /// Value assumed when the tag is absent
    pub default: Option<i64>,
}

/// Outcome of looking a raw value up in a tag's enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationMatch<'c> {
    /// The tag has no enumeration
    NotEnumerated,
    /// Matched a value that has a description
    Described(&'c str),
    /// Matched a listed value that has no description
    Listed,
    /// The tag is enumerated but the value is not listed
    Unknown,
}

impl CatalogEntry {
    /// Whether a decoded field type is one this tag is expected to use
    pub fn accepts(&self, field_type: FieldType) -> bool {
        self.field_types.is_empty() || self.field_types.contains(&field_type)
    }

    /// Looks a raw value up in the enumeration
    ///
    /// Only integer values can match; anything else on an enumerated tag is
    /// `Unknown`.
    pub fn match_value(&self, value: &DecodedValue) -> EnumerationMatch<'_> {
        let values = match &self.values {
            Some(values) => values,
            None => return EnumerationMatch::NotEnumerated,
        };

        let position = value
            .as_i64()
            .and_then(|raw| values.iter().position(|&v| v == raw));

        match position {
            Some(j) => match self.descriptions.as_ref().and_then(|d| d.get(j)) {
                Some(description) => EnumerationMatch::Described(description.as_str()),
                None => EnumerationMatch::Listed,
            },
            None => EnumerationMatch::Unknown,
        }
    }

    /// The default value, described through the enumeration when possible
    ///
    /// Untyped or mistyped defaults fall back to LONG, then SLONG. A default
    /// none of those can hold yields `None`.
    pub fn default_value(&self) -> Option<TagValue> {
        let default = self.default?;
        let raw = self
            .field_types
            .iter()
            .find_map(|ft| ft.value_from_i64(default))
            .or_else(|| FieldType::Long.value_from_i64(default))
            .or_else(|| FieldType::SLong.value_from_i64(default))?;

        match self.match_value(&raw) {
            EnumerationMatch::Described(description) => Some(TagValue::Described(description.to_string())),
            _ => Some(TagValue::Raw(raw)),
        }
    }
}

/// Immutable lookup table from tag code to definition
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    entries: HashMap<u16, CatalogEntry>,
}

impl TagCatalog {
    /// The built-in DNG catalog
    pub fn global() -> &'static TagCatalog {
        &DNG_TAG_CATALOG
    }

    /// Parse a catalog from a TOML string
    ///
    /// The document holds an array of `[[tag]]` tables; see `dng_tags.toml`.
    pub fn from_str(content: &str) -> TiffResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| TiffError::InvalidCatalog(format!("Failed to parse TOML: {}", e)))?;

        let mut catalog = TagCatalog::default();

        let tags = match toml_value.get("tag") {
            Some(value) => value
                .as_array()
                .ok_or_else(|| TiffError::InvalidCatalog("`tag` must be an array of tables".to_string()))?,
            None => return Ok(catalog),
        };

        for (index, value) in tags.iter().enumerate() {
            let entry = Self::parse_entry(value, index)?;
            catalog.insert(entry)?;
        }

        debug!("Loaded tag catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> TiffResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Adds an entry, rejecting duplicate codes
    pub fn insert(&mut self, entry: CatalogEntry) -> TiffResult<()> {
        if self.entries.contains_key(&entry.code) {
            return Err(TiffError::InvalidCatalog(format!("Duplicate tag code {}", entry.code)));
        }
        self.entries.insert(entry.code, entry);
        Ok(())
    }

    /// Returns a catalog where `other`'s entries replace or extend this one's
    pub fn overlay(mut self, other: TagCatalog) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn lookup(&self, code: u16) -> Option<&CatalogEntry> {
        self.entries.get(&code)
    }

    pub fn name_of(&self, code: u16) -> Option<&str> {
        self.lookup(code).map(|entry| entry.name.as_str())
    }

    /// Finds an entry by its exact name
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.values().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All tag codes in ascending order
    pub fn codes(&self) -> Vec<u16> {
        let mut codes: Vec<u16> = self.entries.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    fn parse_entry(value: &toml::Value, index: usize) -> TiffResult<CatalogEntry> {
        let invalid = |msg: String| TiffError::InvalidCatalog(format!("tag #{}: {}", index, msg));

        let code = value
            .get("code")
            .and_then(|v| v.as_integer())
            .ok_or_else(|| invalid("missing integer `code`".to_string()))?;
        let code = u16::try_from(code).map_err(|_| invalid(format!("code {} is not a 16-bit value", code)))?;

        let name = value
            .get("name")
            .and_then(|v| v.as_str())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| invalid(format!("code {} has no `name`", code)))?
            .to_string();

        let type_description = value
            .get("type")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let field_types = Self::parse_type_description(&type_description).map_err(invalid)?;

        let values = match value.get("values") {
            Some(v) => Some(Self::integer_array(v).map_err(invalid)?),
            None => None,
        };

        let descriptions = match value.get("descriptions") {
            Some(v) => Some(Self::string_array(v).map_err(invalid)?),
            None => None,
        };

        match (&values, &descriptions) {
            (None, Some(_)) => return Err(invalid(format!("{} has descriptions but no values", name))),
            (Some(v), Some(d)) if d.len() > v.len() => {
                return Err(invalid(format!(
                    "{} has {} descriptions for {} values",
                    name,
                    d.len(),
                    v.len()
                )))
            }
            _ => {}
        }

        let default = value.get("default").and_then(|v| v.as_integer());

        Ok(CatalogEntry {
            code,
            name,
            type_description,
            field_types,
            values,
            descriptions,
            default,
        })
    }

    /// Parses "SHORT or LONG" style descriptions
    fn parse_type_description(description: &str) -> Result<Vec<FieldType>, String> {
        description
            .split(" or ")
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| FieldType::from_name(part).ok_or_else(|| format!("unknown field type `{}`", part)))
            .collect()
    }

    fn integer_array(value: &toml::Value) -> Result<Vec<i64>, String> {
        value
            .as_array()
            .ok_or_else(|| "`values` must be an array".to_string())?
            .iter()
            .map(|v| v.as_integer().ok_or_else(|| format!("non-integer enumerated value {}", v)))
            .collect()
    }

    fn string_array(value: &toml::Value) -> Result<Vec<String>, String> {
        value
            .as_array()
            .ok_or_else(|| "`descriptions` must be an array".to_string())?
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| format!("non-string description {}", v))
            })
            .collect()
    }
}
