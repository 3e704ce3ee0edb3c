//! Error types for option parsing and command dispatch.
//!
//! Every parse failure is reported as a [`ParsingError`] envelope whose
//! [`source`](std::error::Error::source) is the [`OptionError`] that stopped
//! the parse. Conversion failures nest one level deeper and keep the
//! standard library parser's error as their own source.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Broad classification of an [`OptionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The target or its schema is malformed.
    Schema,
    /// An option token is malformed.
    Syntax,
    /// A token could not be matched to a field.
    Resolution,
    /// A value could not be converted to the field's type.
    Conversion,
}

/// A value string that could not be converted to its field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Not one of the accepted boolean literals.
    #[error("parsing {value:?}: invalid boolean literal")]
    Bool { value: String },

    /// Malformed or out of range for the integer width.
    #[error("parsing {value:?}: {source}")]
    Int {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Malformed floating point literal.
    #[error("parsing {value:?}: {source}")]
    Float {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// Finite literal beyond the float width's range.
    #[error("parsing {value:?}: value out of range")]
    FloatRange { value: String },

    /// Explicit sign on an unsigned integer.
    #[error("parsing {value:?}: invalid syntax")]
    UnsignedSign { value: String },
}

/// Root cause of a failed parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// The target is not a record.
    #[error("options must be a pointer to a struct")]
    InvalidTarget,

    /// No target was supplied.
    #[error("uninitialized options")]
    Uninitialized,

    /// Two fields claim the same option identifier.
    #[error("duplicated option name in fields '{first}' and '{second}': '{identifier}'")]
    DuplicateIdentifier {
        first: String,
        second: String,
        identifier: String,
    },

    /// A field of a kind the converter cannot fill received a value.
    #[error("unsupported field type: '{0}'")]
    UnsupportedType(String),

    /// Single-character name used with a double dash.
    #[error("invalid syntax: '{0}' (use single dash for short option)")]
    InvalidSyntax(String),

    /// No field registered under this identifier.
    #[error("invalid option: '{0}'")]
    UnknownOption(String),

    /// A non-slice field was assigned twice.
    #[error("redefined field: '{0}'")]
    RedefinedField(String),

    /// A non-boolean option was the last token.
    #[error("missing value for field '{0}'")]
    MissingValue(String),

    /// A positional token arrived with no positional field left to take it.
    #[error("unhandled argument: '{0}'")]
    UnhandledArgument(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl OptionError {
    /// Returns the category this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use argbind_core::{ErrorCategory, OptionError};
    ///
    /// let err = OptionError::UnknownOption("x".into());
    /// assert_eq!(err.category(), ErrorCategory::Resolution);
    /// ```
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTarget
            | Self::Uninitialized
            | Self::DuplicateIdentifier { .. }
            | Self::UnsupportedType(_) => ErrorCategory::Schema,
            Self::InvalidSyntax(_) => ErrorCategory::Syntax,
            Self::UnknownOption(_)
            | Self::RedefinedField(_)
            | Self::MissingValue(_)
            | Self::UnhandledArgument(_) => ErrorCategory::Resolution,
            Self::Conversion(_) => ErrorCategory::Conversion,
        }
    }
}

/// Envelope returned by every parse entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("options parsing failed: {cause}")]
pub struct ParsingError {
    #[source]
    cause: OptionError,
}

impl ParsingError {
    /// The error that stopped the parse.
    pub fn cause(&self) -> &OptionError {
        &self.cause
    }

    /// Consumes the envelope, returning the underlying cause.
    pub fn into_cause(self) -> OptionError {
        self.cause
    }
}

impl From<OptionError> for ParsingError {
    fn from(cause: OptionError) -> Self {
        Self { cause }
    }
}

/// Error returned by a command handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while dispatching to a command handler.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No arguments and no default command.
    #[error("missing command")]
    MissingCommand,

    /// The first argument names no registered command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The selected handler failed.
    #[error("command '{name}': {source}")]
    Handler {
        name: String,
        #[source]
        source: HandlerError,
    },
}

/// Convenience alias for results with [`OptionError`].
pub type Result<T> = std::result::Result<T, OptionError>;
