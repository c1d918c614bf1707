//! Identifier parse errors

use thiserror::Error;

/// A malformed documentation identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierError {
    pub kind: IdentifierErrorKind,
    /// The offending identifier
    pub identifier: String,
    /// Byte offset where the problem was detected
    pub offset: usize,
}

impl IdentifierError {
    #[must_use]
    pub fn new(kind: IdentifierErrorKind, identifier: &str, offset: usize) -> Self {
        Self {
            kind,
            identifier: identifier.to_string(),
            offset,
        }
    }
}

impl std::fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in '{}' at offset {}",
            self.kind, self.identifier, self.offset
        )
    }
}

impl std::error::Error for IdentifierError {}

/// The kind of identifier error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierErrorKind {
    #[error("missing '<kind>:' prefix")]
    MissingPrefix,

    #[error("unknown identifier kind '{0}'")]
    UnknownKind(char),

    #[error("empty path")]
    EmptyPath,

    #[error("member path has no '.' separator")]
    MissingDot,

    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,

    #[error("unbalanced brackets in parameter list")]
    UnbalancedBrackets,

    #[error("empty parameter")]
    EmptyParameter,

    #[error("empty return type after '~'")]
    EmptyReturnType,

    #[error("signature not allowed for this kind of identifier")]
    UnexpectedSignature,

    #[error("invalid generic arity suffix")]
    InvalidArity,
}
