//! Error types for GBLN parsing and validation.
//!
//! Every input-driven failure surfaces as a [`GblnError`]: a classified
//! [`ErrorKind`], the 1-based line and column of the offending token or value,
//! a human-readable message, and an optional suggestion.

use std::fmt;

use thiserror::Error;

/// The classification of a [`GblnError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A character or token that cannot appear at this position.
    #[error("unexpected token")]
    UnexpectedToken,

    /// A `<...>` annotation that does not name a known type.
    #[error("invalid type hint")]
    InvalidTypeHint,

    /// Input ended inside a value, object, array or type hint.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A syntactically valid integer outside the target type's range.
    #[error("integer out of range")]
    IntegerOutOfRange,

    /// Integer text that is not an optional sign followed by decimal digits.
    #[error("invalid integer")]
    InvalidInteger,

    /// A string with more characters than its `s<N>` bound allows.
    #[error("string too long")]
    StringTooLong,

    /// Text that is not a decimal, scientific or `inf`/`nan` float literal.
    #[error("invalid float")]
    InvalidFloat,

    /// Text that is not one of `t`, `f`, `true`, `false`, `1`, `0`.
    #[error("invalid boolean")]
    InvalidBoolean,

    /// Text that is not empty, `n` or `null`.
    #[error("invalid null")]
    InvalidNull,

    /// A value whose shape does not match what its position requires, such as
    /// a single value without a type hint.
    #[error("type mismatch")]
    TypeMismatch,

    /// A key that appears twice in the same object.
    #[error("duplicate key")]
    DuplicateKey,

    /// Containers nested deeper than the configured ceiling.
    #[error("maximum nesting depth exceeded")]
    MaxDepthExceeded,
}

/// A located, classified parse or validation error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line}, column {column}: {message}{}", Help(.suggestion))]
pub struct GblnError {
    kind: ErrorKind,
    line: usize,
    column: usize,
    message: String,
    suggestion: Option<String>,
}

impl GblnError {
    pub fn new(kind: ErrorKind, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            column,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a concrete fix, e.g. `"use i16 or i32"`.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 1-based line of the offending token or value.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column (in characters) of the offending token or value.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub(crate) fn append_context(mut self, context: &str) -> Self {
        self.message.push(' ');
        self.message.push_str(context);
        self
    }
}

/// Renders the optional suggestion tail of an error message.
struct Help<'a>(&'a Option<String>);

impl fmt::Display for Help<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(suggestion) => write!(f, " (help: {suggestion})"),
            None => Ok(()),
        }
    }
}

/// Convenience alias used throughout gbln-core.
pub type Result<T> = std::result::Result<T, GblnError>;
