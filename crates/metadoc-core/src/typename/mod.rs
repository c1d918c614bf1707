//! Type-name decoder
//!
//! Converts serialized metadata type names (`` List`1[[System.Int32]] ``,
//! `` Outer`1/Inner<T> ``, `N[][,]`) into a source-order display string and a
//! comparison string that lines up character for character with the
//! parameter fragments of documentation identifiers.

mod error;
mod parser;
mod token;

use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticSink;

pub use error::{DecodeError, DecodeErrorKind};
pub use parser::{NamePart, TypeExpr};
pub use token::{tokenize, Token, TokenKind};

/// Placeholder used for both forms when a name cannot be decoded
pub const UNKNOWN_TYPE: &str = "?";

/// Decoded type name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalType {
    /// Human-readable, source-order form: `Dictionary<String, Int32[,][]>`
    pub display: String,
    /// Identifier-comparable form: `Dictionary{String,Int32[][0:,]}`
    pub comparison: String,
}

impl CanonicalType {
    /// The sentinel produced for undecodable names
    pub fn unknown() -> Self {
        Self {
            display: UNKNOWN_TYPE.to_string(),
            comparison: UNKNOWN_TYPE.to_string(),
        }
    }

    /// Returns true if this is the decode-failure sentinel
    pub fn is_unknown(&self) -> bool {
        self.display == UNKNOWN_TYPE && self.comparison == UNKNOWN_TYPE
    }
}

impl From<&TypeExpr> for CanonicalType {
    fn from(expr: &TypeExpr) -> Self {
        Self {
            display: expr.display(),
            comparison: expr.comparison(),
        }
    }
}

impl std::fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display)
    }
}

/// Decode a raw type name, all or nothing
///
/// A structural failure anywhere in the name yields [`CanonicalType::unknown`]
/// and exactly one warning naming the raw string.
pub fn decode(raw: &str, diagnostics: &mut dyn DiagnosticSink) -> CanonicalType {
    match TypeExpr::parse(raw) {
        Ok(expr) => CanonicalType::from(&expr),
        Err(err) => {
            diagnostics.warn(format_args!("cannot decode type name '{raw}': {err}"));
            CanonicalType::unknown()
        }
    }
}
