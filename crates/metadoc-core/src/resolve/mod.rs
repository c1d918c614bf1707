//! Documentation identifier resolution
//!
//! Maps a parsed [`MemberIdentifier`] to the one symbol node it names.
//! Every miss is reported as a warning and yields `None`; resolution of
//! later identifiers is unaffected.

mod operators;
mod signature;

use tracing::{debug, trace};

use crate::diagnostics::DiagnosticSink;
use crate::doc::DocComment;
use crate::ident::{IdentifierKind, MemberIdentifier, CONSTRUCTOR, STATIC_CONSTRUCTOR};
use crate::symbols::{
    MemberKind, SymbolHandle, SymbolTable, TypeHandle, NESTED_SEPARATOR, NO_NAMESPACE,
};

pub use operators::OperatorTable;
pub use signature::{identifier_form, signature_matches, substitute_back_references};

/// Resolves documentation identifiers against a symbol table
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    operators: OperatorTable,
}

/// Member name and kinds to search for, after mapping reserved names
struct MemberQuery<'a> {
    name: std::borrow::Cow<'a, str>,
    kinds: &'static [MemberKind],
    /// Constructors only: `Some(true)` for `#cctor`, `Some(false)` for `#ctor`
    is_static: Option<bool>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// Parse and resolve a raw identifier; malformed identifiers are
    /// reported and resolve to nothing
    pub fn resolve_str(
        &self,
        table: &SymbolTable,
        raw: &str,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Option<SymbolHandle> {
        match MemberIdentifier::parse(raw) {
            Ok(id) => self.resolve(table, &id, diagnostics),
            Err(err) => {
                diagnostics.warn(format_args!("malformed documentation identifier: {err}"));
                None
            }
        }
    }

    /// Resolve a parsed identifier to a node of `table`
    ///
    /// # Panics
    /// Panics if a generic back-reference in the identifier is out of range
    /// for the candidate it is compared against.
    pub fn resolve(
        &self,
        table: &SymbolTable,
        id: &MemberIdentifier,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Option<SymbolHandle> {
        match id.kind {
            IdentifierKind::Namespace => {
                if table.contains_namespace(&id.type_path) {
                    Some(SymbolHandle::Namespace {
                        namespace: id.type_path.clone(),
                    })
                } else {
                    diagnostics.warn(format_args!(
                        "{id}: namespace '{}' not found",
                        id.type_path
                    ));
                    None
                }
            }
            IdentifierKind::Type => match locate_type(table, &id.type_path) {
                Some(handle) => Some(SymbolHandle::Type(handle)),
                None => {
                    diagnostics.warn(format_args!("{id}: type '{}' not found", id.type_path));
                    None
                }
            },
            _ => {
                let Some(owner) = locate_type(table, &id.type_path) else {
                    diagnostics.warn(format_args!(
                        "{id}: owning type '{}' not found",
                        id.type_path
                    ));
                    return None;
                };
                self.resolve_member(table, owner, id, diagnostics)
            }
        }
    }

    /// Resolve `raw` and store `doc` on the node it names
    ///
    /// Replaces any documentation already attached. Returns the handle of
    /// the documented node.
    pub fn attach(
        &self,
        table: &mut SymbolTable,
        raw: &str,
        doc: DocComment,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Option<SymbolHandle> {
        let handle = self.resolve_str(table, raw, diagnostics)?;
        if let Some(slot) = table.doc_slot_mut(&handle) {
            *slot = Some(doc);
        }
        Some(handle)
    }

    fn resolve_member(
        &self,
        table: &SymbolTable,
        owner: TypeHandle,
        id: &MemberIdentifier,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Option<SymbolHandle> {
        let ty = table.type_symbol(&owner)?;
        let member = id.member.as_deref()?;
        let query = self.member_query(id.kind, member, ty.own_name());

        let needs_signature = match id.kind {
            IdentifierKind::Method => true,
            IdentifierKind::Property => id.params.is_some(),
            _ => false,
        };
        let fragments = id.param_fragments();
        let return_type = id
            .return_type
            .as_deref()
            .filter(|_| OperatorTable::is_conversion(member));
        let outer = &ty.generic_params;

        let mut candidates = 0usize;
        let found = ty
            .members_named(&query.name, query.kinds)
            .filter(|(_, _, m)| query.is_static.map_or(true, |s| m.is_static == s))
            .filter(|(_, _, m)| m.generic_params.len() == id.generic_arity)
            .find(|(group, index, m)| {
                candidates += 1;
                trace!(%group, index, name = %m.name, "comparing overload");
                !needs_signature || signature_matches(m, fragments, return_type, outer)
            });

        match found {
            Some((group, index, _)) => {
                debug!(identifier = %id, %group, index, "resolved member");
                Some(SymbolHandle::Member {
                    owner,
                    group,
                    name: query.name.to_string(),
                    index,
                })
            }
            None if candidates == 0 => {
                diagnostics.warn(format_args!(
                    "{id}: no member '{}' on type '{}'",
                    query.name, id.type_path
                ));
                None
            }
            None => {
                diagnostics.warn(format_args!(
                    "{id}: none of {candidates} overload(s) of '{}' matches the signature",
                    query.name
                ));
                None
            }
        }
    }

    fn member_query<'a>(
        &self,
        kind: IdentifierKind,
        member: &'a str,
        own_name: &'a str,
    ) -> MemberQuery<'a> {
        let plain = |kinds: &'static [MemberKind]| MemberQuery {
            name: member.into(),
            kinds,
            is_static: None,
        };
        match kind {
            IdentifierKind::Method => match member {
                CONSTRUCTOR | STATIC_CONSTRUCTOR => MemberQuery {
                    name: own_name.into(),
                    kinds: &[MemberKind::Constructor],
                    is_static: Some(member == STATIC_CONSTRUCTOR),
                },
                _ => match self.operators.symbolic(member) {
                    Some(symbolic) => MemberQuery {
                        name: symbolic.into(),
                        kinds: &[MemberKind::Operator],
                        is_static: None,
                    },
                    None => plain(&[MemberKind::Method]),
                },
            },
            IdentifierKind::Field => plain(&[MemberKind::Field]),
            IdentifierKind::Property => plain(&[MemberKind::Property]),
            IdentifierKind::Event => plain(&[MemberKind::Event]),
            IdentifierKind::Namespace | IdentifierKind::Type => plain(&[]),
        }
    }
}

/// Find the type a dotted identifier path names
///
/// Namespace/type splits are tried shortest namespace first, and the first
/// namespace present in the table decides: if it has no type of that name
/// the lookup fails. A path without dots is looked up in the no-namespace
/// bucket. Dots left in the type part separate nested types.
pub fn locate_type(table: &SymbolTable, path: &str) -> Option<TypeHandle> {
    let (namespace, type_path, entry) = namespace_splits(path)
        .find_map(|(ns, rest)| table.namespace(ns).map(|entry| (ns, rest, entry)))?;
    let name = type_path.replace('.', &NESTED_SEPARATOR.to_string());
    trace!(namespace, %name, "searching namespace");
    let (group, _) = entry.find_type(&name)?;
    Some(TypeHandle {
        namespace: namespace.to_string(),
        group,
        name,
    })
}

/// Candidate `(namespace, type path)` splits of a dotted path
///
/// A path without dots has the single split `("", path)`.
pub fn namespace_splits(path: &str) -> impl Iterator<Item = (&str, &str)> {
    let global = (!path.contains('.')).then_some((NO_NAMESPACE, path));
    path.match_indices('.')
        .map(move |(dot, _)| (&path[..dot], &path[dot + 1..]))
        .chain(global)
}
