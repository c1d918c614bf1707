//! Namespace → type → member symbol table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::kinds::{MemberGroup, MemberKind, TypeGroup, TypeKind, Visibility};
use crate::doc::DocComment;
use crate::typename::CanonicalType;

/// Separator between an enclosing type and a nested type
pub const NESTED_SEPARATOR: char = '/';

/// Namespace key used for types declared outside any namespace
pub const NO_NAMESPACE: &str = "";

/// The complete symbol table of one or more compiled modules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    namespaces: BTreeMap<String, NamespaceEntry>,
}

/// A namespace and its visibility-partitioned type groups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
    #[serde(default)]
    pub groups: BTreeMap<TypeGroup, BTreeMap<String, TypeSymbol>>,
}

/// A type definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSymbol {
    /// Name inside the namespace; nested types use `/` and arity markers
    /// are kept (`` Outer`1/Inner ``)
    pub name: String,
    pub namespace: String,
    pub kind: TypeKind,
    pub visibility: Visibility,
    /// Generic parameter names, including those inherited from enclosing
    /// types, in declaration order
    #[serde(default)]
    pub generic_params: Vec<String>,
    #[serde(default)]
    pub members: BTreeMap<MemberGroup, BTreeMap<String, Vec<MemberSymbol>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
}

/// One member overload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSymbol {
    /// Lookup name: the type's own name for constructors, the symbolic form
    /// (`operator +`) for operators
    pub name: String,
    pub kind: MemberKind,
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub generic_params: Vec<String>,
    #[serde(default)]
    pub params: Vec<ParamSymbol>,
    /// Return type of methods and operators, declared type of fields,
    /// properties and events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<CanonicalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
}

/// Passing convention of a parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamModifier {
    #[default]
    None,
    Ref,
    Out,
}

/// A member parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSymbol {
    pub name: String,
    pub ty: CanonicalType,
    #[serde(default)]
    pub modifier: ParamModifier,
}

impl ParamSymbol {
    /// Signature string as written in documentation identifiers
    pub fn signature_form(&self) -> String {
        match self.modifier {
            ParamModifier::None => self.ty.comparison.clone(),
            ParamModifier::Ref | ParamModifier::Out => format!("{}@", self.ty.comparison),
        }
    }
}

/// Location of a type inside the table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHandle {
    pub namespace: String,
    pub group: TypeGroup,
    pub name: String,
}

/// Location of any resolvable node inside the table
///
/// Handles are plain keys, so they stay valid while the table is mutated
/// through [`SymbolTable::doc_slot_mut`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolHandle {
    Namespace {
        namespace: String,
    },
    Type(TypeHandle),
    Member {
        owner: TypeHandle,
        group: MemberGroup,
        name: String,
        index: usize,
    },
}

impl SymbolHandle {
    /// Human-readable path, for diagnostics and reports
    pub fn path(&self) -> String {
        fn type_path(handle: &TypeHandle) -> String {
            if handle.namespace.is_empty() {
                handle.name.clone()
            } else {
                format!("{}.{}", handle.namespace, handle.name)
            }
        }

        match self {
            SymbolHandle::Namespace { namespace } => namespace.clone(),
            SymbolHandle::Type(handle) => type_path(handle),
            SymbolHandle::Member {
                owner, name, index, ..
            } => format!("{}::{}#{}", type_path(owner), name, index),
        }
    }
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a namespace entry
    pub fn insert_namespace(&mut self, name: &str) -> &mut NamespaceEntry {
        self.namespaces
            .entry(name.to_string())
            .or_insert_with(|| NamespaceEntry::new(name))
    }

    /// Insert a type into its namespace, replacing a same-named type in the
    /// same group
    pub fn insert_type(&mut self, symbol: TypeSymbol) -> TypeHandle {
        let handle = TypeHandle {
            namespace: symbol.namespace.clone(),
            group: symbol.group(),
            name: symbol.name.clone(),
        };
        self.insert_namespace(&handle.namespace)
            .groups
            .entry(handle.group)
            .or_default()
            .insert(handle.name.clone(), symbol);
        handle
    }

    pub fn namespace(&self, name: &str) -> Option<&NamespaceEntry> {
        self.namespaces.get(name)
    }

    pub fn contains_namespace(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    /// All namespaces in name order
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceEntry> {
        self.namespaces.values()
    }

    /// Look up a type by handle
    pub fn type_symbol(&self, handle: &TypeHandle) -> Option<&TypeSymbol> {
        self.namespaces
            .get(&handle.namespace)?
            .groups
            .get(&handle.group)?
            .get(&handle.name)
    }

    pub fn type_symbol_mut(&mut self, handle: &TypeHandle) -> Option<&mut TypeSymbol> {
        self.namespaces
            .get_mut(&handle.namespace)?
            .groups
            .get_mut(&handle.group)?
            .get_mut(&handle.name)
    }

    /// Look up a member overload by handle; `None` for non-member handles
    pub fn member(&self, handle: &SymbolHandle) -> Option<&MemberSymbol> {
        match handle {
            SymbolHandle::Member {
                owner,
                group,
                name,
                index,
            } => self
                .type_symbol(owner)?
                .members
                .get(group)?
                .get(name)?
                .get(*index),
            _ => None,
        }
    }

    /// Documentation attached to a node
    pub fn doc(&self, handle: &SymbolHandle) -> Option<&DocComment> {
        match handle {
            SymbolHandle::Namespace { namespace } => self.namespaces.get(namespace)?.doc.as_ref(),
            SymbolHandle::Type(owner) => self.type_symbol(owner)?.doc.as_ref(),
            SymbolHandle::Member { .. } => self.member(handle)?.doc.as_ref(),
        }
    }

    /// The documentation field of a node; the only mutable access the
    /// resolver needs
    pub fn doc_slot_mut(&mut self, handle: &SymbolHandle) -> Option<&mut Option<DocComment>> {
        match handle {
            SymbolHandle::Namespace { namespace } => {
                Some(&mut self.namespaces.get_mut(namespace)?.doc)
            }
            SymbolHandle::Type(owner) => Some(&mut self.type_symbol_mut(owner)?.doc),
            SymbolHandle::Member {
                owner,
                group,
                name,
                index,
            } => {
                let member = self
                    .type_symbol_mut(owner)?
                    .members
                    .get_mut(group)?
                    .get_mut(name)?
                    .get_mut(*index)?;
                Some(&mut member.doc)
            }
        }
    }

    /// Every type in the table
    pub fn types(&self) -> impl Iterator<Item = &TypeSymbol> {
        self.namespaces
            .values()
            .flat_map(|ns| ns.groups.values())
            .flat_map(|types| types.values())
    }

    /// Number of types and member overloads
    pub fn symbol_counts(&self) -> (usize, usize) {
        let mut types = 0;
        let mut members = 0;
        for ty in self.types() {
            types += 1;
            members += ty.members().count();
        }
        (types, members)
    }
}

impl NamespaceEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            doc: None,
            groups: BTreeMap::new(),
        }
    }

    /// Search every type group for an exact name
    pub fn find_type(&self, name: &str) -> Option<(TypeGroup, &TypeSymbol)> {
        self.groups
            .iter()
            .find_map(|(group, types)| types.get(name).map(|ty| (*group, ty)))
    }
}

impl TypeSymbol {
    /// Create a type with no members
    pub fn new(namespace: &str, name: &str, kind: TypeKind, visibility: Visibility) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            kind,
            visibility,
            generic_params: Vec::new(),
            members: BTreeMap::new(),
            doc: None,
        }
    }

    pub fn with_generic_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn group(&self) -> TypeGroup {
        TypeGroup::new(self.visibility, self.kind)
    }

    /// Simple name without enclosing types or arity marker: `Inner` for
    /// `` Outer`1/Inner`1 ``
    pub fn own_name(&self) -> &str {
        let last = self
            .name
            .rsplit(NESTED_SEPARATOR)
            .next()
            .unwrap_or(&self.name);
        last.split('`').next().unwrap_or(last)
    }

    /// Add a member overload; returns its group and overload index
    pub fn add_member(&mut self, member: MemberSymbol) -> (MemberGroup, usize) {
        let group = MemberGroup::new(member.visibility, member.kind);
        let overloads = self
            .members
            .entry(group)
            .or_default()
            .entry(member.name.clone())
            .or_default();
        overloads.push(member);
        (group, overloads.len() - 1)
    }

    /// Overloads named `name` whose kind is one of `kinds`, across all
    /// visibility groups
    pub fn members_named<'a>(
        &'a self,
        name: &'a str,
        kinds: &'a [MemberKind],
    ) -> impl Iterator<Item = (MemberGroup, usize, &'a MemberSymbol)> + 'a {
        self.members
            .iter()
            .filter(move |(group, _)| kinds.contains(&group.kind))
            .filter_map(move |(group, by_name)| by_name.get(name).map(|list| (*group, list)))
            .flat_map(|(group, list)| {
                list.iter()
                    .enumerate()
                    .map(move |(index, member)| (group, index, member))
            })
    }

    /// Every member overload
    pub fn members(&self) -> impl Iterator<Item = &MemberSymbol> {
        self.members
            .values()
            .flat_map(|by_name| by_name.values())
            .flatten()
    }
}

impl MemberSymbol {
    /// Create a member without parameters or type
    pub fn new(name: &str, kind: MemberKind, visibility: Visibility) -> Self {
        Self {
            name: name.to_string(),
            kind,
            visibility,
            is_static: false,
            generic_params: Vec::new(),
            params: Vec::new(),
            ty: None,
            doc: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(text: &str) -> CanonicalType {
        CanonicalType {
            display: text.to_string(),
            comparison: text.to_string(),
        }
    }

    fn sample_table() -> (SymbolTable, TypeHandle) {
        let mut table = SymbolTable::new();
        let mut ty = TypeSymbol::new("N", "Outer`1/Inner", TypeKind::Class, Visibility::Public)
            .with_generic_params(["T"]);
        let mut method = MemberSymbol::new("Run", MemberKind::Method, Visibility::Public);
        method.params.push(ParamSymbol {
            name: "count".to_string(),
            ty: canonical("System.Int32"),
            modifier: ParamModifier::Ref,
        });
        ty.add_member(method);
        ty.add_member(MemberSymbol::new("Run", MemberKind::Method, Visibility::Public));
        let handle = table.insert_type(ty);
        (table, handle)
    }

    #[test]
    fn test_insert_and_find_type() {
        let (table, handle) = sample_table();
        assert_eq!(handle.group.to_string(), "public classes");
        let ns = table.namespace("N").expect("namespace");
        let (group, ty) = ns.find_type("Outer`1/Inner").expect("type");
        assert_eq!(group, handle.group);
        assert_eq!(ty.own_name(), "Inner");
        assert!(ns.find_type("Outer`1.Inner").is_none());
    }

    #[test]
    fn test_members_named_enumerates_overloads() {
        let (table, handle) = sample_table();
        let ty = table.type_symbol(&handle).unwrap();
        let found: Vec<_> = ty.members_named("Run", &[MemberKind::Method]).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].1, 0);
        assert_eq!(found[1].1, 1);
        assert_eq!(found[0].2.params[0].signature_form(), "System.Int32@");
        assert_eq!(ty.members_named("Run", &[MemberKind::Field]).count(), 0);
    }

    #[test]
    fn test_doc_slot_mut_writes_member_doc() {
        let (mut table, owner) = sample_table();
        let handle = SymbolHandle::Member {
            owner,
            group: MemberGroup::new(Visibility::Public, MemberKind::Method),
            name: "Run".to_string(),
            index: 1,
        };
        let slot = table.doc_slot_mut(&handle).expect("slot");
        *slot = Some(DocComment {
            summary: "Runs.".to_string(),
            ..DocComment::default()
        });
        assert_eq!(table.doc(&handle).unwrap().summary, "Runs.");
        assert_eq!(handle.path(), "N.Outer`1/Inner::Run#1");
    }

    #[test]
    fn test_table_serializes_to_json() {
        let (table, _) = sample_table();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"public classes\""));
        assert!(json.contains("\"public methods\""));
        let back: SymbolTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.symbol_counts(), (1, 2));
    }
}
