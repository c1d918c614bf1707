//! Error types for type-name decoding

use thiserror::Error;

/// A decoding failure with the byte offset where it was detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    /// The kind of error
    pub kind: DecodeErrorKind,
    /// Byte offset into the (by-ref stripped) raw name
    pub offset: usize,
}

impl DecodeError {
    /// Create a new decode error
    #[must_use]
    pub fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

impl std::error::Error for DecodeError {}

/// The kind of decode error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("empty type name")]
    Empty,

    #[error("unbalanced '{0}'")]
    Unbalanced(char),

    #[error("unexpected end of type name")]
    UnexpectedEnd,

    #[error("expected a type name")]
    ExpectedName,

    #[error("unexpected '{0}'")]
    UnexpectedToken(String),

    #[error("generic arity marker without a count")]
    InvalidArityMarker,

    #[error("generic arity {expected} but {found} argument(s) supplied")]
    ArityMismatch { expected: usize, found: usize },

    #[error("malformed array group")]
    MalformedArrayGroup,
}
