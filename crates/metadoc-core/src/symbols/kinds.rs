//! Visibility and kind tags used to partition the symbol table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared accessibility of a type or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    ProtectedInternal,
    Protected,
    Internal,
    Private,
}

impl Visibility {
    /// Get the display name for the visibility
    pub fn display_name(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::ProtectedInternal => "protected internal",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }

    fn from_display_name(name: &str) -> Option<Self> {
        Some(match name {
            "public" => Visibility::Public,
            "protected internal" => Visibility::ProtectedInternal,
            "protected" => Visibility::Protected,
            "internal" => Visibility::Internal,
            "private" => Visibility::Private,
            _ => return None,
        })
    }
}

/// Kind of a type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

impl TypeKind {
    /// Plural used in group names ("public classes")
    pub fn plural(self) -> &'static str {
        match self {
            TypeKind::Class => "classes",
            TypeKind::Struct => "structs",
            TypeKind::Interface => "interfaces",
            TypeKind::Enum => "enums",
            TypeKind::Delegate => "delegates",
        }
    }

    fn from_plural(name: &str) -> Option<Self> {
        Some(match name {
            "classes" => TypeKind::Class,
            "structs" => TypeKind::Struct,
            "interfaces" => TypeKind::Interface,
            "enums" => TypeKind::Enum,
            "delegates" => TypeKind::Delegate,
            _ => return None,
        })
    }
}

/// Kind of a type member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Constructor,
    Method,
    Operator,
    Field,
    Property,
    Event,
}

impl MemberKind {
    /// Plural used in group names ("internal methods")
    pub fn plural(self) -> &'static str {
        match self {
            MemberKind::Constructor => "constructors",
            MemberKind::Method => "methods",
            MemberKind::Operator => "operators",
            MemberKind::Field => "fields",
            MemberKind::Property => "properties",
            MemberKind::Event => "events",
        }
    }

    fn from_plural(name: &str) -> Option<Self> {
        Some(match name {
            "constructors" => MemberKind::Constructor,
            "methods" => MemberKind::Method,
            "operators" => MemberKind::Operator,
            "fields" => MemberKind::Field,
            "properties" => MemberKind::Property,
            "events" => MemberKind::Event,
            _ => return None,
        })
    }

    /// Members of this kind are told apart by parameter signature
    pub fn is_invocable(self) -> bool {
        matches!(
            self,
            MemberKind::Constructor | MemberKind::Method | MemberKind::Operator
        )
    }
}

/// Error for unrecognized group names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown symbol group '{0}'")]
pub struct UnknownGroup(pub String);

/// Visibility-partitioned group of types inside a namespace, e.g.
/// "public classes" or "internal delegates"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TypeGroup {
    pub visibility: Visibility,
    pub kind: TypeKind,
}

impl TypeGroup {
    pub fn new(visibility: Visibility, kind: TypeKind) -> Self {
        Self { visibility, kind }
    }
}

impl fmt::Display for TypeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.visibility.display_name(), self.kind.plural())
    }
}

impl FromStr for TypeGroup {
    type Err = UnknownGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (visibility, kind) = split_group(s)?;
        let kind = TypeKind::from_plural(kind).ok_or_else(|| UnknownGroup(s.to_string()))?;
        Ok(Self { visibility, kind })
    }
}

impl From<TypeGroup> for String {
    fn from(group: TypeGroup) -> Self {
        group.to_string()
    }
}

impl TryFrom<String> for TypeGroup {
    type Error = UnknownGroup;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Visibility-partitioned group of members inside a type, e.g.
/// "public methods" or "private fields"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MemberGroup {
    pub visibility: Visibility,
    pub kind: MemberKind,
}

impl MemberGroup {
    pub fn new(visibility: Visibility, kind: MemberKind) -> Self {
        Self { visibility, kind }
    }
}

impl fmt::Display for MemberGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.visibility.display_name(), self.kind.plural())
    }
}

impl FromStr for MemberGroup {
    type Err = UnknownGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (visibility, kind) = split_group(s)?;
        let kind = MemberKind::from_plural(kind).ok_or_else(|| UnknownGroup(s.to_string()))?;
        Ok(Self { visibility, kind })
    }
}

impl From<MemberGroup> for String {
    fn from(group: MemberGroup) -> Self {
        group.to_string()
    }
}

impl TryFrom<String> for MemberGroup {
    type Error = UnknownGroup;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn split_group(s: &str) -> Result<(Visibility, &str), UnknownGroup> {
    let (visibility, kind) = s
        .trim()
        .rsplit_once(' ')
        .ok_or_else(|| UnknownGroup(s.to_string()))?;
    let visibility =
        Visibility::from_display_name(visibility).ok_or_else(|| UnknownGroup(s.to_string()))?;
    Ok((visibility, kind))
}
