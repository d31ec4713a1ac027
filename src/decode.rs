//! Schema-driven cell decoding.
//!
//! [`decode`] maps one raw cell onto the [`GenericValue`] tag its declared
//! type calls for. The mapping is strict: integer narrowing is range-checked,
//! `Float32` requires an exact `f64`-to-`f32` round-trip, and a raw shape
//! that does not match the declared type fails instead of coercing.

use crate::catalog::ExternalType;
use crate::errors::ImportError;
use crate::value::{GenericValue, RawValue};

/// Decodes one raw cell under its declared column type.
///
/// Null cells decode to [`GenericValue::Null`] regardless of declared type.
/// Nested declared types (`list`, `map`) have no generic mapping and fail
/// with [`ImportError::UnsupportedType`].
pub fn decode(raw: &RawValue, declared: &ExternalType) -> Result<GenericValue, ImportError> {
    if raw.is_null() {
        return Ok(GenericValue::Null);
    }
    match declared {
        ExternalType::Bool => match raw {
            RawValue::Bool(b) => Ok(GenericValue::Bool(*b)),
            _ => Err(mismatch(raw, declared)),
        },
        ExternalType::Int8 => signed(raw, declared).map(GenericValue::Int8),
        ExternalType::Int16 => signed(raw, declared).map(GenericValue::Int16),
        ExternalType::Int32 => signed(raw, declared).map(GenericValue::Int32),
        ExternalType::Int64 => signed(raw, declared).map(GenericValue::Int64),
        ExternalType::UInt8 => unsigned(raw, declared).map(GenericValue::UInt8),
        ExternalType::UInt16 => unsigned(raw, declared).map(GenericValue::UInt16),
        ExternalType::UInt32 => unsigned(raw, declared).map(GenericValue::UInt32),
        ExternalType::UInt64 => unsigned(raw, declared).map(GenericValue::UInt64),
        ExternalType::Float32 => match raw {
            RawValue::Float(f) => {
                let narrowed = *f as f32;
                if f.is_nan() || f64::from(narrowed) == *f {
                    Ok(GenericValue::Float32(narrowed))
                } else {
                    Err(ImportError::decode(format!(
                        "float cell {f} is not exactly representable as float32"
                    )))
                }
            }
            _ => Err(mismatch(raw, declared)),
        },
        ExternalType::Float64 => match raw {
            RawValue::Float(f) => Ok(GenericValue::Float64(*f)),
            _ => Err(mismatch(raw, declared)),
        },
        ExternalType::Utf8 => match raw {
            RawValue::Text(s) => Ok(GenericValue::String(s.clone())),
            _ => Err(mismatch(raw, declared)),
        },
        ExternalType::Binary => match raw {
            RawValue::Bytes(b) => Ok(GenericValue::Bytes(b.clone())),
            _ => Err(mismatch(raw, declared)),
        },
        ExternalType::List(_) | ExternalType::Map => Err(ImportError::unsupported_type(
            format!("declared type {declared} has no generic mapping"),
        )),
    }
}

fn signed<T: TryFrom<i64>>(raw: &RawValue, declared: &ExternalType) -> Result<T, ImportError> {
    match raw {
        RawValue::Int(v) => T::try_from(*v).map_err(|_| {
            ImportError::decode(format!("int cell {v} is out of range for {declared}"))
        }),
        _ => Err(mismatch(raw, declared)),
    }
}

fn unsigned<T: TryFrom<u64>>(raw: &RawValue, declared: &ExternalType) -> Result<T, ImportError> {
    match raw {
        RawValue::UInt(v) => T::try_from(*v).map_err(|_| {
            ImportError::decode(format!("uint cell {v} is out of range for {declared}"))
        }),
        _ => Err(mismatch(raw, declared)),
    }
}

fn mismatch(raw: &RawValue, declared: &ExternalType) -> ImportError {
    ImportError::decode(format!(
        "cannot decode {} cell as {declared}",
        raw.kind()
    ))
}
