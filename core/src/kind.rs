//! Field kinds and converted values.
//!
//! Every schema field carries a [`FieldKind`], a closed tag the converter
//! dispatches on. A successful conversion yields a [`Value`], which the
//! target's setter then writes (or appends, for slices) into the record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar type of a field or of a slice element.
///
/// # Examples
///
/// ```
/// use argbind_core::ScalarKind;
///
/// assert_eq!(ScalarKind::I32.to_string(), "i32");
/// assert_eq!(ScalarKind::Usize.to_string(), "usize");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    /// Native-width signed integer.
    Isize,
    U8,
    U16,
    U32,
    U64,
    /// Native-width unsigned integer.
    Usize,
    F32,
    F64,
    String,
}

impl ScalarKind {
    /// Lowercase name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic type of a schema field.
///
/// Slices accumulate: every assignment appends one converted element.
/// `Unsupported` fields are accepted by the registry but fail the first
/// time they would receive a value, reporting the contained kind name.
///
/// # Examples
///
/// ```
/// use argbind_core::{FieldKind, ScalarKind};
///
/// assert!(FieldKind::Scalar(ScalarKind::Bool).is_bool());
/// assert!(FieldKind::Slice(ScalarKind::Bool).is_slice());
/// assert!(!FieldKind::Slice(ScalarKind::Bool).is_bool());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar(ScalarKind),
    Slice(ScalarKind),
    Unsupported(String),
}

impl FieldKind {
    /// Returns `true` for a plain boolean field (not a slice of booleans).
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Scalar(ScalarKind::Bool))
    }

    /// Returns `true` for slice fields, which may be assigned repeatedly.
    pub fn is_slice(&self) -> bool {
        matches!(self, Self::Slice(_))
    }

    /// Shorthand for [`FieldKind::Unsupported`].
    pub fn unsupported(kind: &str) -> Self {
        Self::Unsupported(kind.to_string())
    }
}

/// One converted value, ready to be stored in a field slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
}

impl Value {
    /// Kind of scalar this value holds.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Bool(_) => ScalarKind::Bool,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::Isize(_) => ScalarKind::Isize,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::Usize(_) => ScalarKind::Usize,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::String(_) => ScalarKind::String,
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(v) => v.into(),
            Value::I8(v) => v.into(),
            Value::I16(v) => v.into(),
            Value::I32(v) => v.into(),
            Value::I64(v) => v.into(),
            Value::Isize(v) => v.into(),
            Value::U8(v) => v.into(),
            Value::U16(v) => v.into(),
            Value::U32(v) => v.into(),
            Value::U64(v) => v.into(),
            Value::Usize(v) => v.into(),
            // NaN and infinities have no JSON form
            Value::F32(v) => serde_json::Number::from_f64(f64::from(v))
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::F64(v) => serde_json::Number::from_f64(v)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(v) => v.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_serializes_lowercase() {
        let kind = FieldKind::Slice(ScalarKind::U16);
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json, serde_json::json!({ "slice": "u16" }));

        let back: FieldKind = serde_json::from_value(serde_json::json!({ "scalar": "string" })).unwrap();
        assert_eq!(back, FieldKind::Scalar(ScalarKind::String));
    }

    #[test]
    fn test_value_into_json() {
        assert_eq!(serde_json::Value::from(Value::I8(-4)), serde_json::json!(-4));
        assert_eq!(serde_json::Value::from(Value::F64(0.5)), serde_json::json!(0.5));
        assert_eq!(serde_json::Value::from(Value::F32(f32::NAN)), serde_json::Value::Null);
        assert_eq!(
            serde_json::Value::from(Value::String("x".into())),
            serde_json::json!("x")
        );
    }

    #[test]
    fn test_value_reports_kind() {
        assert_eq!(Value::Usize(3).kind(), ScalarKind::Usize);
        assert_eq!(Value::String(String::new()).kind(), ScalarKind::String);
    }
}
