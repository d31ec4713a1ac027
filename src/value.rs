//! Cell value representations on both sides of the decoder.
//!
//! [`RawValue`] is what the archive layer physically surfaces for one cell:
//! the widest container of each shape (all signed integers arrive as `i64`,
//! all floats as `f64`). [`GenericValue`] is the closed tagged union handed to
//! the bulk loader, where the declared bit-width and signedness of the column
//! are preserved exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One untyped physical cell as read from the archive.
///
/// The declared column type narrows a raw cell into a [`GenericValue`];
/// a raw shape that does not match the declared type is a decode failure,
/// never a coercion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl RawValue {
    /// Shape name used in decode error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Int(_) => "int",
            RawValue::UInt(_) => "uint",
            RawValue::Float(_) => "float",
            RawValue::Text(_) => "text",
            RawValue::Bytes(_) => "bytes",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

/// One decoded value, tagged with the exact width and signedness the archive
/// schema declared for its column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GenericValue {
    /// Null/absent value, produced for a null cell under any declared type.
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl GenericValue {
    pub fn is_null(&self) -> bool {
        matches!(self, GenericValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            GenericValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GenericValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            GenericValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Tag name, mainly for diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            GenericValue::Null => "null",
            GenericValue::Bool(_) => "bool",
            GenericValue::Int8(_) => "int8",
            GenericValue::Int16(_) => "int16",
            GenericValue::Int32(_) => "int32",
            GenericValue::Int64(_) => "int64",
            GenericValue::UInt8(_) => "uint8",
            GenericValue::UInt16(_) => "uint16",
            GenericValue::UInt32(_) => "uint32",
            GenericValue::UInt64(_) => "uint64",
            GenericValue::Float32(_) => "float32",
            GenericValue::Float64(_) => "float64",
            GenericValue::String(_) => "string",
            GenericValue::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Display for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericValue::Null => write!(f, "null"),
            GenericValue::Bool(v) => write!(f, "{v}"),
            GenericValue::Int8(v) => write!(f, "{v}"),
            GenericValue::Int16(v) => write!(f, "{v}"),
            GenericValue::Int32(v) => write!(f, "{v}"),
            GenericValue::Int64(v) => write!(f, "{v}"),
            GenericValue::UInt8(v) => write!(f, "{v}"),
            GenericValue::UInt16(v) => write!(f, "{v}"),
            GenericValue::UInt32(v) => write!(f, "{v}"),
            GenericValue::UInt64(v) => write!(f, "{v}"),
            GenericValue::Float32(v) => write!(f, "{v}"),
            GenericValue::Float64(v) => write!(f, "{v}"),
            GenericValue::String(v) => write!(f, "{v}"),
            GenericValue::Bytes(v) => write!(f, "{} bytes", v.len()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}
