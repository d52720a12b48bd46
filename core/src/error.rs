//! Parse errors.
//!
//! The parser stops at the first problem. [`ParseError`] names what went
//! wrong and which option was involved; [`ParseFailure`] adds the positional
//! arguments collected before the failing token.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::{Identifier, OptionDef};

/// Classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseErrorKind {
    /// The identifier matches no table entry.
    InvalidOption,
    /// A required argument is missing.
    MissingArgument,
    /// A long option without argument was given `=value`.
    UnexpectedArgument,
}

impl ParseErrorKind {
    /// Returns the message prefix for this kind.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidOption => "invalid option",
            Self::MissingArgument => "option requires an argument",
            Self::UnexpectedArgument => "option takes no arguments",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A single parse failure.
///
/// # Examples
///
/// ```
/// use argp_core::{Identifier, OptionDef, ParseError, ParseErrorKind};
///
/// let err = ParseError::InvalidOption(Identifier::Long("zzz".into()));
/// assert_eq!(err.to_string(), "invalid option: --zzz");
/// assert_eq!(err.kind(), ParseErrorKind::InvalidOption);
///
/// let err = ParseError::MissingArgument(OptionDef::new('x', "xxxx").with_arg("<arg>"));
/// assert_eq!(err.to_string(), "option requires an argument: --xxxx (-x)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The identifier matches no table entry.
    #[error("invalid option: {0}")]
    InvalidOption(Identifier),
    /// The option requires an argument and none was available.
    #[error("option requires an argument: {}", .0.display_name())]
    MissingArgument(OptionDef),
    /// The option takes no argument but one was attached with `=`.
    #[error("option takes no arguments: {}", .0.display_name())]
    UnexpectedArgument(OptionDef),
}

impl ParseError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::InvalidOption(_) => ParseErrorKind::InvalidOption,
            Self::MissingArgument(_) => ParseErrorKind::MissingArgument,
            Self::UnexpectedArgument(_) => ParseErrorKind::UnexpectedArgument,
        }
    }

    /// Returns the offending option. For an unknown option this is a
    /// placeholder holding only the identifier that was typed.
    pub fn option(&self) -> OptionDef {
        match self {
            Self::InvalidOption(id) => id.placeholder(),
            Self::MissingArgument(opt) | Self::UnexpectedArgument(opt) => opt.clone(),
        }
    }
}

/// The error returned by [`parse`](crate::parse).
///
/// Options matched before the failure are dropped; positional arguments
/// seen before the failing token are kept in `args`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct ParseFailure {
    /// The error that stopped parsing.
    pub error: ParseError,
    /// Positional arguments encountered before the error.
    pub args: Vec<String>,
}

impl ParseFailure {
    /// Shorthand for `self.error.kind()`.
    pub fn kind(&self) -> ParseErrorKind {
        self.error.kind()
    }
}
