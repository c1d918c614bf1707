//! Serialized module metadata
//!
//! A module description is produced by an external metadata reader as JSON:
//! a flat list of types, each with its members, every type reference still
//! in raw serialized form. [`SymbolTableBuilder`] turns it into a
//! [`SymbolTable`](crate::symbols::SymbolTable).

mod builder;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::symbols::{MemberKind, ParamModifier, TypeKind, Visibility};

pub use builder::SymbolTableBuilder;

/// Errors that can occur when reading module metadata
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("failed to read metadata file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse metadata: {0}")]
    Json(#[from] serde_json::Error),
}

/// One compiled module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// Assembly or module name
    #[serde(default)]
    pub name: String,
    /// Namespaces to create even when they declare no types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeMetadata>,
}

/// A type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMetadata {
    /// Containing namespace, empty for the global namespace
    #[serde(default)]
    pub namespace: String,
    /// Metadata name; nested types are written `Outer/Inner` or `Outer+Inner`
    pub name: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    #[serde(default)]
    pub generic_params: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberMetadata>,
}

/// A member definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberMetadata {
    /// Metadata name (`.ctor`, `op_Addition`, `System.IDisposable.Dispose`)
    pub name: String,
    pub kind: MemberKind,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub generic_params: Vec<String>,
    #[serde(default)]
    pub params: Vec<ParamMetadata>,
    /// Raw return type of methods or declared type of other members
    #[serde(default, rename = "type", alias = "return_type")]
    pub ty: Option<String>,
}

/// A member parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamMetadata {
    #[serde(default)]
    pub name: String,
    /// Raw parameter type; a trailing `&` marks a by-reference parameter
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub modifier: ParamModifier,
}

impl ModuleMetadata {
    /// Load module metadata from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid metadata.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse module metadata from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid metadata.
    pub fn parse(content: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_module_json() {
        let json = r#"{
            "name": "Sample",
            "types": [{
                "namespace": "Sample",
                "name": "Calculator",
                "kind": "class",
                "visibility": "public",
                "members": [{
                    "name": "TryParse",
                    "kind": "method",
                    "visibility": "public",
                    "is_static": true,
                    "params": [
                        {"name": "text", "type": "System.String"},
                        {"name": "value", "type": "System.Int32&", "modifier": "out"}
                    ],
                    "return_type": "System.Boolean"
                }]
            }]
        }"#;
        let module = ModuleMetadata::parse(json).unwrap();
        assert_eq!(module.types.len(), 1);
        let member = &module.types[0].members[0];
        assert!(member.is_static);
        assert_eq!(member.params[1].modifier, ParamModifier::Out);
        assert_eq!(member.ty.as_deref(), Some("System.Boolean"));
    }

    #[test]
    fn rejects_unknown_kind() {
        let json = r#"{"types": [{"name": "X", "kind": "module", "visibility": "public"}]}"#;
        assert!(matches!(
            ModuleMetadata::parse(json),
            Err(MetadataError::Json(_))
        ));
    }

    #[test]
    fn read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("module.json");
        std::fs::write(&path, r#"{"name": "Empty"}"#).unwrap();
        let module = ModuleMetadata::from_path(&path).unwrap();
        assert_eq!(module.name, "Empty");
        assert!(module.types.is_empty());
    }
}
