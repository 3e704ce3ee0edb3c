//! Schema declaration surface.
//!
//! A [`FieldDef`] describes one field of a target record: its name, its
//! [`FieldKind`], and an optional tag of comma-separated option
//! identifiers. Fields without a tag are positional.
//!
//! For typed records, [`Schema`] pairs each definition with a setter
//! closure built from a field accessor, so the parser can write into the
//! record without knowing its layout.
//!
//! # Examples
//!
//! ```
//! use argbind_core::{Options, Schema, parse_options_from_args};
//!
//! #[derive(Default)]
//! struct Hello {
//!     language: String,
//!     name: String,
//! }
//!
//! impl Options for Hello {
//!     fn schema() -> Schema<Self> {
//!         Schema::new()
//!             .option("Language", "lang,l", |o: &mut Self| &mut o.language)
//!             .positional("Name", |o: &mut Self| &mut o.name)
//!     }
//! }
//!
//! let mut hello = Hello { name: "World".into(), ..Default::default() };
//! parse_options_from_args(&mut hello, ["--lang=fr", "mon ami"]).unwrap();
//! assert_eq!(hello.language, "fr");
//! assert_eq!(hello.name, "mon ami");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParsingError;
use crate::kind::{FieldKind, ScalarKind, Value};
use crate::parser::{self, FieldSink};

/// Separator between identifiers in a field tag.
pub const TAG_SEPARATOR: char = ',';

/// Declaration of one record field.
///
/// # Examples
///
/// ```
/// use argbind_core::{FieldDef, FieldKind, ScalarKind};
///
/// let field = FieldDef::new("Verbose", FieldKind::Scalar(ScalarKind::Bool))
///     .with_tag("verbose,,v");
/// assert_eq!(field.identifiers().collect::<Vec<_>>(), ["verbose", "v"]);
/// assert!(!field.is_positional());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, used in diagnostics and as the JSON member name.
    pub name: String,
    /// Semantic type of the field.
    pub kind: FieldKind,
    /// Comma-separated option identifiers; absent for positional fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Hidden fields are invisible to both options and positionals.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl FieldDef {
    /// Creates a positional field.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            tag: None,
            hidden: false,
        }
    }

    /// Sets the identifier tag, e.g. `"lang,l"`.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    /// Marks the field hidden.
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Returns `true` when the field takes bare tokens instead of options.
    ///
    /// Only an absent or empty tag makes a field positional; a tag made of
    /// separators alone declares an option field with no identifiers.
    pub fn is_positional(&self) -> bool {
        self.tag.as_deref().is_none_or(str::is_empty)
    }

    /// Option identifiers from the tag, skipping empty segments.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.tag
            .as_deref()
            .unwrap_or_default()
            .split(TAG_SEPARATOR)
            .filter(|id| !id.is_empty())
    }
}

/// A Rust type that can back a record field.
///
/// Implemented for the supported scalars, for `Vec`s of them, and for a
/// few shapes that the converter rejects (`[T; N]`, maps, `Box<T>`).
pub trait FieldValue {
    /// Kind advertised to the parser.
    fn kind() -> FieldKind;

    /// Stores a converted value. Slices append; scalars overwrite.
    fn store(&mut self, value: Value);
}

macro_rules! scalar_field {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Scalar(ScalarKind::$kind)
                }

                fn store(&mut self, value: Value) {
                    if let Value::$kind(v) = value {
                        *self = v;
                    }
                }
            }

            impl FieldValue for Vec<$ty> {
                fn kind() -> FieldKind {
                    FieldKind::Slice(ScalarKind::$kind)
                }

                fn store(&mut self, value: Value) {
                    if let Value::$kind(v) = value {
                        self.push(v);
                    }
                }
            }
        )*
    };
}

scalar_field! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl<T, const N: usize> FieldValue for [T; N] {
    fn kind() -> FieldKind {
        FieldKind::unsupported("array")
    }

    // Unreachable: conversion rejects unsupported kinds first.
    fn store(&mut self, _value: Value) {}
}

impl<K, V, S> FieldValue for HashMap<K, V, S> {
    fn kind() -> FieldKind {
        FieldKind::unsupported("map")
    }

    // Unreachable: conversion rejects unsupported kinds first.
    fn store(&mut self, _value: Value) {}
}

impl<K, V> FieldValue for BTreeMap<K, V> {
    fn kind() -> FieldKind {
        FieldKind::unsupported("map")
    }

    // Unreachable: conversion rejects unsupported kinds first.
    fn store(&mut self, _value: Value) {}
}

impl<T> FieldValue for Box<T> {
    fn kind() -> FieldKind {
        FieldKind::unsupported("ptr")
    }

    // Unreachable: conversion rejects unsupported kinds first.
    fn store(&mut self, _value: Value) {}
}

type Setter<T> = Box<dyn Fn(&mut T, Value) + Send + Sync>;

/// Field definitions for `T` plus the setters that write into it.
pub struct Schema<T> {
    fields: Vec<FieldDef>,
    setters: Vec<Setter<T>>,
}

impl<T: 'static> Schema<T> {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            setters: Vec::new(),
        }
    }

    /// Adds an option field reachable through the identifiers in `tag`.
    pub fn option<V, F>(self, name: &str, tag: &str, accessor: F) -> Self
    where
        V: FieldValue + 'static,
        F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let def = FieldDef::new(name, V::kind()).with_tag(tag);
        self.field(def, move |target, value| accessor(target).store(value))
    }

    /// Adds a positional field, filled in declaration order.
    pub fn positional<V, F>(self, name: &str, accessor: F) -> Self
    where
        V: FieldValue + 'static,
        F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let def = FieldDef::new(name, V::kind());
        self.field(def, move |target, value| accessor(target).store(value))
    }

    /// Adds a field the parser never touches.
    pub fn hidden<V, F>(self, name: &str, tag: &str, accessor: F) -> Self
    where
        V: FieldValue + 'static,
        F: Fn(&mut T) -> &mut V + Send + Sync + 'static,
    {
        let def = FieldDef::new(name, V::kind()).with_tag(tag).hide();
        self.field(def, move |target, value| accessor(target).store(value))
    }

    /// Adds a field from a raw definition and setter.
    ///
    /// The setter receives values already converted to `def.kind`.
    pub fn field<F>(mut self, def: FieldDef, setter: F) -> Self
    where
        F: Fn(&mut T, Value) + Send + Sync + 'static,
    {
        self.fields.push(def);
        self.setters.push(Box::new(setter));
        self
    }

    /// Field definitions in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Parses `args` into `target`.
    ///
    /// # Errors
    ///
    /// Returns the first [`OptionError`](crate::OptionError) encountered,
    /// wrapped in a [`ParsingError`]. Fields assigned before the failure
    /// keep their new values.
    pub fn parse<I>(&self, target: &mut T, args: I) -> Result<(), ParsingError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut sink = TypedSink {
            target,
            setters: &self.setters,
        };
        parser::parse(&self.fields, &mut sink, &args)?;
        Ok(())
    }
}

impl<T: 'static> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

struct TypedSink<'a, T> {
    target: &'a mut T,
    setters: &'a [Setter<T>],
}

impl<T> FieldSink for TypedSink<'_, T> {
    fn store(&mut self, field: usize, value: Value) {
        if let Some(setter) = self.setters.get(field) {
            setter(&mut *self.target, value);
        }
    }
}

/// A record type with a fixed option schema.
pub trait Options: Sized + 'static {
    /// Builds the schema describing this record.
    fn schema() -> Schema<Self>;
}

/// Parses the process arguments (without the program name) into `target`.
///
/// # Errors
///
/// See [`Schema::parse`].
pub fn parse_options<T: Options>(target: &mut T) -> Result<(), ParsingError> {
    parse_options_from_args(target, std::env::args().skip(1))
}

/// Parses `args` into `target` using `T`'s schema.
///
/// # Errors
///
/// See [`Schema::parse`].
pub fn parse_options_from_args<T, I>(target: &mut T, args: I) -> Result<(), ParsingError>
where
    T: Options,
    I: IntoIterator,
    I::Item: Into<String>,
{
    T::schema().parse(target, args)
}
