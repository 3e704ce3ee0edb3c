//! Type-directed value conversion.

use std::str::FromStr;

use crate::error::{ConversionError, OptionError, Result};
use crate::kind::{FieldKind, ScalarKind, Value};

/// Literals accepted as `true`.
const TRUE_LITERALS: [&str; 6] = ["1", "t", "T", "TRUE", "true", "True"];
/// Literals accepted as `false`.
const FALSE_LITERALS: [&str; 6] = ["0", "f", "F", "FALSE", "false", "False"];

/// Converts `raw` into a value for a field of `kind`.
///
/// Slice kinds convert one element; appending is left to the field's
/// setter.
///
/// # Errors
///
/// [`OptionError::UnsupportedType`] for unsupported kinds, and
/// [`OptionError::Conversion`] when `raw` does not parse.
///
/// # Examples
///
/// ```
/// use argbind_core::{FieldKind, ScalarKind, Value, convert};
///
/// let value = convert(&FieldKind::Slice(ScalarKind::I8), "-41").unwrap();
/// assert_eq!(value, Value::I8(-41));
/// assert!(convert(&FieldKind::Scalar(ScalarKind::U8), "256").is_err());
/// ```
pub fn convert(kind: &FieldKind, raw: &str) -> Result<Value> {
    match kind {
        FieldKind::Scalar(scalar) | FieldKind::Slice(scalar) => convert_scalar(*scalar, raw),
        FieldKind::Unsupported(name) => Err(OptionError::UnsupportedType(name.clone())),
    }
}

fn convert_scalar(kind: ScalarKind, raw: &str) -> Result<Value> {
    let value = match kind {
        ScalarKind::Bool => Value::Bool(parse_bool(raw)?),
        ScalarKind::I8 => Value::I8(parse_int(raw)?),
        ScalarKind::I16 => Value::I16(parse_int(raw)?),
        ScalarKind::I32 => Value::I32(parse_int(raw)?),
        ScalarKind::I64 => Value::I64(parse_int(raw)?),
        ScalarKind::Isize => Value::Isize(parse_int(raw)?),
        ScalarKind::U8 => Value::U8(parse_uint(raw)?),
        ScalarKind::U16 => Value::U16(parse_uint(raw)?),
        ScalarKind::U32 => Value::U32(parse_uint(raw)?),
        ScalarKind::U64 => Value::U64(parse_uint(raw)?),
        ScalarKind::Usize => Value::Usize(parse_uint(raw)?),
        ScalarKind::F32 => Value::F32(parse_float(raw)?),
        ScalarKind::F64 => Value::F64(parse_float(raw)?),
        ScalarKind::String => Value::String(raw.to_string()),
    };
    Ok(value)
}

fn parse_bool(raw: &str) -> std::result::Result<bool, ConversionError> {
    if TRUE_LITERALS.contains(&raw) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&raw) {
        Ok(false)
    } else {
        Err(ConversionError::Bool {
            value: raw.to_string(),
        })
    }
}

fn parse_int<N>(raw: &str) -> std::result::Result<N, ConversionError>
where
    N: FromStr<Err = std::num::ParseIntError>,
{
    raw.parse().map_err(|source| ConversionError::Int {
        value: raw.to_string(),
        source,
    })
}

/// Unsigned integers take no sign, not even `+`.
fn parse_uint<N>(raw: &str) -> std::result::Result<N, ConversionError>
where
    N: FromStr<Err = std::num::ParseIntError>,
{
    if raw.starts_with('+') {
        return Err(ConversionError::UnsignedSign {
            value: raw.to_string(),
        });
    }
    parse_int(raw)
}

/// Finite literals that overflow the width are range errors, not infinity.
fn parse_float<N>(raw: &str) -> std::result::Result<N, ConversionError>
where
    N: FromStr<Err = std::num::ParseFloatError> + Into<f64> + Copy,
{
    let parsed: N = raw.parse().map_err(|source| ConversionError::Float {
        value: raw.to_string(),
        source,
    })?;
    if Into::<f64>::into(parsed).is_infinite() && !is_infinity_literal(raw) {
        return Err(ConversionError::FloatRange {
            value: raw.to_string(),
        });
    }
    Ok(parsed)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(kind: ScalarKind, raw: &str) -> Result<Value> {
        convert(&FieldKind::Scalar(kind), raw)
    }

    #[test]
    fn test_convert_round_trips_scalars() {
        assert_eq!(scalar(ScalarKind::Bool, "true").unwrap(), Value::Bool(true));
        assert_eq!(scalar(ScalarKind::I8, "-41").unwrap(), Value::I8(-41));
        assert_eq!(scalar(ScalarKind::I16, "40").unwrap(), Value::I16(40));
        assert_eq!(scalar(ScalarKind::I32, "-39").unwrap(), Value::I32(-39));
        assert_eq!(scalar(ScalarKind::I64, "38").unwrap(), Value::I64(38));
        assert_eq!(scalar(ScalarKind::Isize, "42").unwrap(), Value::Isize(42));
        assert_eq!(scalar(ScalarKind::U8, "36").unwrap(), Value::U8(36));
        assert_eq!(scalar(ScalarKind::U16, "35").unwrap(), Value::U16(35));
        assert_eq!(scalar(ScalarKind::U32, "34").unwrap(), Value::U32(34));
        assert_eq!(scalar(ScalarKind::U64, "33").unwrap(), Value::U64(33));
        assert_eq!(scalar(ScalarKind::Usize, "37").unwrap(), Value::Usize(37));
        assert_eq!(scalar(ScalarKind::F32, "-12.34").unwrap(), Value::F32(-12.34));
        assert_eq!(scalar(ScalarKind::F64, "56.789").unwrap(), Value::F64(56.789));
        assert_eq!(scalar(ScalarKind::F64, "1e3").unwrap(), Value::F64(1000.0));
        assert_eq!(
            scalar(ScalarKind::String, "Hello").unwrap(),
            Value::String("Hello".to_string())
        );
    }

    #[test]
    fn test_bool_literal_set() {
        for raw in TRUE_LITERALS {
            assert_eq!(scalar(ScalarKind::Bool, raw).unwrap(), Value::Bool(true));
        }
        for raw in FALSE_LITERALS {
            assert_eq!(scalar(ScalarKind::Bool, raw).unwrap(), Value::Bool(false));
        }
        let err = scalar(ScalarKind::Bool, "not-bool").unwrap_err();
        assert_eq!(err.to_string(), "parsing \"not-bool\": invalid boolean literal");
    }

    #[test]
    fn test_integer_width_is_enforced() {
        assert_eq!(scalar(ScalarKind::I8, "127").unwrap(), Value::I8(127));
        let err = scalar(ScalarKind::I8, "128").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parsing \"128\": number too large to fit in target type"
        );
        assert!(scalar(ScalarKind::U16, "-1").is_err());
        assert!(scalar(ScalarKind::U64, "").is_err());
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(matches!(
            scalar(ScalarKind::I32, "not-int"),
            Err(OptionError::Conversion(ConversionError::Int { .. }))
        ));
        assert!(matches!(
            scalar(ScalarKind::F32, "not-float"),
            Err(OptionError::Conversion(ConversionError::Float { .. }))
        ));
    }

    #[test]
    fn test_float_overflow_is_range_error() {
        let err = scalar(ScalarKind::F32, "1e39").unwrap_err();
        assert_eq!(
            err,
            OptionError::Conversion(ConversionError::FloatRange {
                value: "1e39".to_string()
            })
        );
        assert_eq!(err.to_string(), "parsing \"1e39\": value out of range");
        assert!(scalar(ScalarKind::F64, "1e400").is_err());
        assert_eq!(scalar(ScalarKind::F64, "1e39").unwrap(), Value::F64(1e39));
    }

    #[test]
    fn test_explicit_infinity_is_accepted() {
        assert_eq!(scalar(ScalarKind::F32, "inf").unwrap(), Value::F32(f32::INFINITY));
        assert_eq!(
            scalar(ScalarKind::F64, "-Infinity").unwrap(),
            Value::F64(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_unsigned_rejects_plus_sign() {
        let err = scalar(ScalarKind::U32, "+5").unwrap_err();
        assert_eq!(err.to_string(), "parsing \"+5\": invalid syntax");
        assert_eq!(scalar(ScalarKind::I32, "+5").unwrap(), Value::I32(5));
    }

    #[test]
    fn test_slice_converts_one_element() {
        let value = convert(&FieldKind::Slice(ScalarKind::String), "LA").unwrap();
        assert_eq!(value, Value::String("LA".to_string()));
    }

    #[test]
    fn test_unsupported_kind() {
        let err = convert(&FieldKind::unsupported("chan"), "").unwrap_err();
        assert_eq!(err, OptionError::UnsupportedType("chan".to_string()));
        assert_eq!(err.to_string(), "unsupported field type: 'chan'");
    }
}
