//! Option registry and positional queue.
//!
//! Built once per parse from the field definitions. Identifiers must be
//! unique across the whole schema; hidden fields are skipped entirely.

use std::collections::{HashMap, VecDeque};

use crate::error::{OptionError, Result};
use crate::schema::FieldDef;

/// Identifier lookup table and the positional fields awaiting tokens.
///
/// Both hold indices into the field slice the registry was built from.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    options: HashMap<String, usize>,
    positionals: VecDeque<usize>,
}

impl Registry {
    /// Builds the registry, failing on the first duplicated identifier.
    pub(crate) fn build(fields: &[FieldDef]) -> Result<Self> {
        let mut registry = Self::default();

        for (index, field) in fields.iter().enumerate() {
            if field.hidden {
                continue;
            }

            if field.is_positional() {
                registry.positionals.push_back(index);
                continue;
            }

            for identifier in field.identifiers() {
                if let Some(&owner) = registry.options.get(identifier) {
                    return Err(OptionError::DuplicateIdentifier {
                        first: fields[owner].name.clone(),
                        second: field.name.clone(),
                        identifier: identifier.to_string(),
                    });
                }
                registry.options.insert(identifier.to_string(), index);
            }
        }

        Ok(registry)
    }

    /// Field index registered for `identifier`.
    pub(crate) fn lookup(&self, identifier: &str) -> Result<usize> {
        self.options
            .get(identifier)
            .copied()
            .ok_or_else(|| OptionError::UnknownOption(identifier.to_string()))
    }

    /// Number of registered identifiers.
    pub(crate) fn len(&self) -> usize {
        self.options.len()
    }

    /// Field currently at the front of the positional queue.
    pub(crate) fn next_positional(&self) -> Option<usize> {
        self.positionals.front().copied()
    }

    /// Drops the front positional field once it has been filled.
    pub(crate) fn advance_positional(&mut self) {
        self.positionals.pop_front();
    }

    /// Number of positional fields still waiting.
    pub(crate) fn positionals_left(&self) -> usize {
        self.positionals.len()
    }
}
