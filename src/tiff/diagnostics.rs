//! Non-fatal findings recorded while decoding
//!
//! Dropped entries and unmatched enumeration values never abort a parse.
//! They are collected here and handed back next to the decoded tags.

use std::fmt;

use log::warn;

use crate::tiff::errors::TiffError;
use crate::tiff::field_type::FieldType;
use crate::tiff::value::DecodedValue;

/// A non-fatal problem found during a parse
#[derive(Debug)]
pub enum Diagnostic {
    /// The entry at `index` could not be decoded and produced no tag
    EntryDropped {
        index: usize,
        tag: u16,
        error: TiffError,
    },
    /// A raw value matched none of the catalog's enumerated values
    UnknownEnumerationValue {
        tag: u16,
        value: DecodedValue,
    },
    /// The entry's field type is not one the catalog lists for this tag
    UnexpectedFieldType {
        tag: u16,
        expected: String,
        actual: FieldType,
    },
}

impl Diagnostic {
    /// Tag code the diagnostic refers to
    pub fn tag(&self) -> u16 {
        match self {
            Diagnostic::EntryDropped { tag, .. }
            | Diagnostic::UnknownEnumerationValue { tag, .. }
            | Diagnostic::UnexpectedFieldType { tag, .. } => *tag,
        }
    }

    /// Logs the diagnostic and appends it to `sink`
    pub(crate) fn record(self, sink: &mut Vec<Diagnostic>) {
        warn!("{}", self);
        sink.push(self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EntryDropped { index, tag, error } => {
                write!(f, "Dropped entry #{} (tag {}): {}", index, tag, error)
            }
            Diagnostic::UnknownEnumerationValue { tag, value } => {
                write!(f, "Unknown value for tag {}: {}", tag, value)
            }
            Diagnostic::UnexpectedFieldType { tag, expected, actual } => {
                write!(f, "Tag {} has type {}, expected {}", tag, actual, expected)
            }
        }
    }
}
