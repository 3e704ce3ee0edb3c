//! Dynamic JSON record target.
//!
//! Parses into a `serde_json` object instead of a Rust struct, with the
//! field list supplied at runtime (typically deserialized alongside it).
//!
//! # Examples
//!
//! ```
//! use argbind_core::{FieldDef, parse_record_from_args};
//! use serde_json::json;
//!
//! let fields: Vec<FieldDef> = serde_json::from_value(json!([
//!     { "name": "host", "kind": { "scalar": "string" }, "tag": "host,h" },
//!     { "name": "port", "kind": { "scalar": "u16" }, "tag": "port,p" },
//!     { "name": "files", "kind": { "slice": "string" } }
//! ]))
//! .unwrap();
//!
//! let mut record = json!({ "host": "localhost", "port": 8080 });
//! parse_record_from_args(&mut record, &fields, ["-p", "9000", "a.txt", "b.txt"]).unwrap();
//! assert_eq!(
//!     record,
//!     json!({ "host": "localhost", "port": 9000, "files": ["a.txt", "b.txt"] })
//! );
//! ```

use serde_json::Map;

use crate::error::{OptionError, ParsingError};
use crate::kind::Value;
use crate::parser::{self, FieldSink};
use crate::schema::FieldDef;

/// Parses `args` into the JSON object `record`.
///
/// Scalar fields overwrite the member named after the field; slice fields
/// append to an array member, replacing any non-array value first.
///
/// # Errors
///
/// [`OptionError::Uninitialized`] if `record` is `null`,
/// [`OptionError::InvalidTarget`] if it is any other non-object, and
/// otherwise the same errors as [`Schema::parse`](crate::Schema::parse).
pub fn parse_record_from_args<I>(
    record: &mut serde_json::Value,
    fields: &[FieldDef],
    args: I,
) -> Result<(), ParsingError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let members = match record {
        serde_json::Value::Object(members) => members,
        serde_json::Value::Null => return Err(OptionError::Uninitialized.into()),
        _ => return Err(OptionError::InvalidTarget.into()),
    };

    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut sink = JsonSink { members, fields };
    parser::parse(fields, &mut sink, &args)?;
    Ok(())
}

struct JsonSink<'a> {
    members: &'a mut Map<String, serde_json::Value>,
    fields: &'a [FieldDef],
}

impl FieldSink for JsonSink<'_> {
    fn store(&mut self, field: usize, value: Value) {
        let Some(def) = self.fields.get(field) else {
            return;
        };

        if !def.kind.is_slice() {
            self.members.insert(def.name.clone(), value.into());
            return;
        }

        let slot = self
            .members
            .entry(def.name.clone())
            .or_insert_with(|| serde_json::Value::Array(Vec::new()));
        match slot {
            serde_json::Value::Array(items) => items.push(value.into()),
            other => *other = serde_json::Value::Array(vec![value.into()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::kind::{FieldKind, ScalarKind};

    use super::*;

    fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::new("verbose", FieldKind::Scalar(ScalarKind::Bool)).with_tag("verbose,v"),
            FieldDef::new("ratio", FieldKind::Scalar(ScalarKind::F32)).with_tag("ratio"),
            FieldDef::new("numbers", FieldKind::Slice(ScalarKind::I64)).with_tag("n"),
        ]
    }

    #[test]
    fn test_null_record_is_uninitialized() {
        let mut record = serde_json::Value::Null;
        let err = parse_record_from_args(&mut record, &fields(), ["-v"]).unwrap_err();
        assert_eq!(err.cause(), &OptionError::Uninitialized);
        assert_eq!(err.to_string(), "options parsing failed: uninitialized options");
    }

    #[test]
    fn test_non_object_record_is_invalid_target() {
        let mut record = json!([1, 2, 3]);
        let err = parse_record_from_args(&mut record, &fields(), Vec::<String>::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "options parsing failed: options must be a pointer to a struct"
        );
    }

    #[test]
    fn test_scalars_overwrite_and_slices_append() {
        let mut record = json!({ "verbose": false, "numbers": [7] });
        parse_record_from_args(&mut record, &fields(), ["-v", "--ratio=0.5", "-n=1", "-n", "2"])
            .unwrap();
        assert_eq!(
            record,
            json!({ "verbose": true, "ratio": 0.5, "numbers": [7, 1, 2] })
        );
    }

    #[test]
    fn test_slice_replaces_non_array_default() {
        let mut record = json!({ "numbers": "none" });
        parse_record_from_args(&mut record, &fields(), ["-n=3"]).unwrap();
        assert_eq!(record, json!({ "numbers": [3] }));
    }
}
