//! Option token splitting.
//!
//! Turns one option token into the identifiers it names and the explicit
//! value it carries, if any. Field lookup and value assignment happen in
//! the parser, which owns the registry and the token cursor.

use crate::error::{OptionError, Result};

/// One option token, split into name and optional `=value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OptionToken<'a> {
    raw: &'a str,
    dashes: usize,
    name: &'a str,
    value: Option<&'a str>,
}

impl<'a> OptionToken<'a> {
    /// Splits `raw` after its `dashes` leading dashes.
    ///
    /// The first `=` at position 1 or later separates name from value.
    /// Long options must have a name of at least two characters.
    pub(crate) fn split(raw: &'a str, dashes: usize) -> Result<Self> {
        let name_and_value = &raw[dashes..];
        let (name, value) = match name_and_value.char_indices().skip(1).find(|&(_, c)| c == '=') {
            Some((at, _)) => (&name_and_value[..at], Some(&name_and_value[at + 1..])),
            None => (name_and_value, None),
        };

        let token = Self {
            raw,
            dashes,
            name,
            value,
        };
        if dashes > 1 && token.name_len() == 1 {
            return Err(OptionError::InvalidSyntax(raw.to_string()));
        }
        Ok(token)
    }

    /// A single-dash token naming several one-character options.
    pub(crate) fn is_combined(&self) -> bool {
        self.dashes == 1 && self.name_len() > 1
    }

    /// Identifiers named by this token, left to right.
    pub(crate) fn identifiers(&self) -> Vec<&'a str> {
        if !self.is_combined() {
            return vec![self.name];
        }
        let name = self.name;
        name.char_indices()
            .map(|(at, c)| &name[at..at + c.len_utf8()])
            .collect()
    }

    /// The explicit `=value`, if present.
    pub(crate) fn value(&self) -> Option<&'a str> {
        self.value
    }

    pub(crate) fn raw(&self) -> &'a str {
        self.raw
    }

    fn name_len(&self) -> usize {
        self.name.chars().count()
    }
}
