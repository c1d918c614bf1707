//! Symbol table of namespaces, types and members

mod kinds;
mod table;

pub use kinds::{MemberGroup, MemberKind, TypeGroup, TypeKind, UnknownGroup, Visibility};
pub use table::{
    MemberSymbol, NamespaceEntry, ParamModifier, ParamSymbol, SymbolHandle, SymbolTable,
    TypeHandle, TypeSymbol, NESTED_SEPARATOR, NO_NAMESPACE,
};
