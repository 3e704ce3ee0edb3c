//! Schema-driven command-line option parsing.
//!
//! This crate fills the fields of a configuration record from raw argument
//! tokens without any per-option parsing code:
//!
//! - [`Schema`] / [`Options`] — declare a typed record's fields, their
//!   option identifiers (`"lang,l"` registers `--lang` and `-l`), and the
//!   positional fields that take bare tokens.
//! - [`parse_options_from_args`] — resolve short, long and combined short
//!   options, convert values by field kind, and hand leftovers to the
//!   positional fields.
//! - [`parse_record_from_args`] — the same engine targeting a
//!   `serde_json` object with a runtime list of [`FieldDef`]s.
//! - [`Commands`] — dispatch to a handler by command name.
//!
//! Accepted forms: `-o`, `-o value`, `-o=value`, `-op`, `-op=value`,
//! `--option`, `--option value`, `--option=value`, and the terminator
//! `--`, after which every token is positional.
//!
//! # Example
//!
//! ```
//! use argbind_core::*;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     surname: String,
//!     name: String,
//!     age: u32,
//!     address: Vec<String>,
//! }
//!
//! impl Options for Person {
//!     fn schema() -> Schema<Self> {
//!         Schema::new()
//!             .option("Surname", "surname,s", |p: &mut Self| &mut p.surname)
//!             .option("Name", "name,n", |p: &mut Self| &mut p.name)
//!             .positional("Age", |p: &mut Self| &mut p.age)
//!             .positional("Address", |p: &mut Self| &mut p.address)
//!     }
//! }
//!
//! let mut person = Person::default();
//! parse_options_from_args(&mut person, ["--surname=Doe", "-n", "John", "30", "LA", "USA"])
//!     .unwrap();
//! assert_eq!(person.age, 30);
//! assert_eq!(person.address, ["LA", "USA"]);
//!
//! let err = parse_options_from_args(&mut Person::default(), ["-n=John", "--name=Jane"])
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "options parsing failed: redefined field: 'Name'");
//! ```

mod command;
mod convert;
mod error;
mod kind;
mod parser;
mod record;
mod registry;
mod resolver;
mod schema;
mod token;

pub use command::{Commands, DEFAULT_COMMAND, HandlerResult};
pub use convert::convert;
pub use error::{
    CommandError, ConversionError, ErrorCategory, HandlerError, OptionError, ParsingError, Result,
};
pub use kind::{FieldKind, ScalarKind, Value};
pub use record::parse_record_from_args;
pub use schema::{
    FieldDef, FieldValue, Options, Schema, TAG_SEPARATOR, parse_options, parse_options_from_args,
};
pub use token::TERMINATOR;
