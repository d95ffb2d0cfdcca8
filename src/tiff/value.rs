//! Decoded tag values

use std::fmt;

/// One decoded element of an IFD entry
///
/// UNDEFINED fields decode to `Byte`. ASCII fields decode to a single
/// `Ascii` string regardless of their byte count.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    Byte(u8),
    SByte(i8),
    Short(u16),
    SShort(i16),
    Long(u32),
    SLong(i32),
    Float(f32),
    Double(f64),
    Rational(u32, u32),
    SRational(i32, i32),
    Ascii(String),
}

impl DecodedValue {
    /// Integer view used for enumeration matching
    ///
    /// Floating point, rational and string values have no integer view.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            DecodedValue::Byte(v) => Some(v as i64),
            DecodedValue::SByte(v) => Some(v as i64),
            DecodedValue::Short(v) => Some(v as i64),
            DecodedValue::SShort(v) => Some(v as i64),
            DecodedValue::Long(v) => Some(v as i64),
            DecodedValue::SLong(v) => Some(v as i64),
            _ => None,
        }
    }

    /// Numeric view, with rationals evaluated
    ///
    /// A zero denominator yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            DecodedValue::Float(v) => Some(v as f64),
            DecodedValue::Double(v) => Some(v),
            DecodedValue::Rational(_, 0) | DecodedValue::SRational(_, 0) => None,
            DecodedValue::Rational(n, d) => Some(n as f64 / d as f64),
            DecodedValue::SRational(n, d) => Some(n as f64 / d as f64),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Ascii(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Byte(v) => write!(f, "{}", v),
            DecodedValue::SByte(v) => write!(f, "{}", v),
            DecodedValue::Short(v) => write!(f, "{}", v),
            DecodedValue::SShort(v) => write!(f, "{}", v),
            DecodedValue::Long(v) => write!(f, "{}", v),
            DecodedValue::SLong(v) => write!(f, "{}", v),
            DecodedValue::Float(v) => write!(f, "{}", v),
            DecodedValue::Double(v) => write!(f, "{}", v),
            DecodedValue::Rational(n, d) => write!(f, "{}/{}", n, d),
            DecodedValue::SRational(n, d) => write!(f, "{}/{}", n, d),
            DecodedValue::Ascii(s) => write!(f, "{}", s),
        }
    }
}

/// A value as it appears on an output tag
///
/// Raw values whose tag has an enumeration in the catalog are replaced by
/// the matching description.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Raw(DecodedValue),
    Described(String),
}

impl TagValue {
    pub fn as_raw(&self) -> Option<&DecodedValue> {
        match self {
            TagValue::Raw(v) => Some(v),
            TagValue::Described(_) => None,
        }
    }

    pub fn as_description(&self) -> Option<&str> {
        match self {
            TagValue::Described(s) => Some(s),
            TagValue::Raw(_) => None,
        }
    }
}

impl From<DecodedValue> for TagValue {
    fn from(value: DecodedValue) -> Self {
        TagValue::Raw(value)
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Raw(v) => write!(f, "{}", v),
            TagValue::Described(s) => write!(f, "{}", s),
        }
    }
}
