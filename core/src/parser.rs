//! Parse orchestration.
//!
//! Drives the token stream through classification, option resolution and
//! positional assignment. The first error aborts the parse.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::convert::convert;
use crate::error::{OptionError, Result};
use crate::kind::Value;
use crate::registry::Registry;
use crate::resolver::OptionToken;
use crate::schema::FieldDef;
use crate::token::Token;

/// Literal assigned to options given without a value.
const IMPLICIT_VALUE: &str = "true";

/// Destination of converted values.
pub(crate) trait FieldSink {
    /// Stores `value` into the field at index `field`.
    fn store(&mut self, field: usize, value: Value);
}

/// Whether option syntax is still recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ScanningOptions,
    /// Entered on the terminator; never left.
    PositionalOnly,
}

/// Read position in the token list.
struct Cursor<'a> {
    args: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(args: &'a [String]) -> Self {
        Self { args, pos: 0 }
    }

    /// Takes the next token, advancing past it.
    fn advance(&mut self) -> Option<&'a str> {
        let arg = self.args.get(self.pos)?;
        self.pos += 1;
        Some(arg.as_str())
    }
}

struct Parser<'f, 's, S> {
    fields: &'f [FieldDef],
    registry: Registry,
    sink: &'s mut S,
    seen: HashSet<&'f str>,
    state: ScanState,
}

/// Parses `args` against `fields`, storing converted values into `sink`.
pub(crate) fn parse<S: FieldSink>(fields: &[FieldDef], sink: &mut S, args: &[String]) -> Result<()> {
    let registry = Registry::build(fields)?;
    debug!(
        args = args.len(),
        options = registry.len(),
        positionals = registry.positionals_left(),
        "Parsing options"
    );

    let mut parser = Parser {
        fields,
        registry,
        sink,
        seen: HashSet::new(),
        state: ScanState::ScanningOptions,
    };
    parser.run(&mut Cursor::new(args))
}

impl<'f, S: FieldSink> Parser<'f, '_, S> {
    fn run(&mut self, cursor: &mut Cursor<'_>) -> Result<()> {
        while let Some(arg) = cursor.advance() {
            if self.state == ScanState::PositionalOnly {
                self.consume_positional(arg)?;
                continue;
            }

            match Token::classify(arg) {
                Token::Terminator => {
                    debug!(remaining = cursor.args.len() - cursor.pos, "Options terminated");
                    self.state = ScanState::PositionalOnly;
                }
                Token::Option { raw, dashes } => self.resolve_option(raw, dashes, cursor)?,
                Token::Positional(raw) => self.consume_positional(raw)?,
            }
        }
        Ok(())
    }

    fn resolve_option(&mut self, raw: &str, dashes: usize, cursor: &mut Cursor<'_>) -> Result<()> {
        let token = OptionToken::split(raw, dashes)?;
        let combined = token.is_combined();
        let mut value = token.value();

        for identifier in token.identifiers() {
            let index = self.registry.lookup(identifier)?;
            let fields = self.fields;
            let field = &fields[index];

            if !field.kind.is_slice() && self.seen.contains(field.name.as_str()) {
                return Err(OptionError::RedefinedField(field.name.clone()));
            }

            let raw_value = match value {
                Some(raw_value) => raw_value,
                None => {
                    let implicit = if combined {
                        if !field.kind.is_bool() {
                            debug!(
                                token = token.raw(),
                                field = %field.name,
                                "Combined short option assigns implicit true to non-boolean field"
                            );
                        }
                        IMPLICIT_VALUE
                    } else if field.kind.is_bool() {
                        IMPLICIT_VALUE
                    } else {
                        cursor
                            .advance()
                            .ok_or_else(|| OptionError::MissingValue(field.name.clone()))?
                    };
                    value = Some(implicit);
                    implicit
                }
            };

            self.seen.insert(field.name.as_str());
            self.assign(index, raw_value)?;
        }
        Ok(())
    }

    fn consume_positional(&mut self, raw: &str) -> Result<()> {
        let Some(index) = self.registry.next_positional() else {
            return Err(OptionError::UnhandledArgument(raw.to_string()));
        };

        self.assign(index, raw)?;
        if !self.fields[index].kind.is_slice() {
            self.registry.advance_positional();
        }
        Ok(())
    }

    fn assign(&mut self, index: usize, raw: &str) -> Result<()> {
        let field = &self.fields[index];
        let value = convert(&field.kind, raw)?;
        trace!(field = %field.name, value = raw, "Assigned field");
        self.sink.store(index, value);
        Ok(())
    }
}
