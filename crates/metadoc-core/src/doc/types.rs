//! Types for representing documentation comments attached to symbols

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::symbols::SymbolHandle;

/// Parsed documentation comment of one symbol
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocComment {
    /// Brief summary
    #[serde(default)]
    pub summary: String,
    /// Longer remarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// Parameter documentation
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, ParamDoc>,
    /// Generic parameter documentation
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_params: BTreeMap<String, ParamDoc>,
    /// Return value documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    /// Property value documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Example blocks, whitespace preserved
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    /// Documented exceptions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<ExceptionDoc>,
    /// See also references (raw identifiers)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub see_also: Vec<String>,
}

impl DocComment {
    /// Check if the doc comment is empty
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.remarks.is_none()
            && self.params.is_empty()
            && self.type_params.is_empty()
            && self.returns.is_none()
            && self.value.is_none()
            && self.examples.is_empty()
            && self.exceptions.is_empty()
    }

    /// First sentence of the summary, for index listings
    pub fn brief(&self) -> &str {
        match self.summary.find(". ") {
            Some(end) => &self.summary[..=end],
            None => &self.summary,
        }
    }
}

/// Documentation for a parameter or generic parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDoc {
    /// Description of the parameter
    pub description: String,
}

/// Documentation for an exception a member may throw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionDoc {
    /// Raw identifier of the exception type (`T:System.ArgumentException`)
    pub cref: String,
    /// When the exception is thrown
    pub description: String,
    /// The exception type, once resolved against the symbol table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<SymbolHandle>,
}

/// One `<member>` entry of a documentation file
#[derive(Debug, Clone, PartialEq)]
pub struct DocEntry {
    /// Raw documentation identifier (`M:N.C.M(System.Int32)`)
    pub id: String,
    pub doc: DocComment,
}

/// Contents of a documentation file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocFile {
    /// Assembly name from `<assembly><name>`
    pub assembly: Option<String>,
    pub entries: Vec<DocEntry>,
}
