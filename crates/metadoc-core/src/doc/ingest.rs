//! Attaching documentation entries to the symbol table

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::types::{DocEntry, DocFile};
use crate::config::ResolverSettings;
use crate::diagnostics::DiagnosticSink;
use crate::resolve::Resolver;
use crate::symbols::{SymbolHandle, SymbolTable};

/// Counters for one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Entries read
    pub entries: usize,
    /// Entries whose documentation was attached
    pub attached: usize,
    /// Entries whose identifier did not resolve
    pub unresolved: usize,
    /// Entries that replaced documentation attached earlier in the run
    pub duplicates: usize,
    /// Exception references seen
    pub exception_refs: usize,
    /// Exception references that did not resolve
    pub exception_refs_unresolved: usize,
}

/// Drives the resolver over the entries of a documentation file
pub struct DocIngester<'r> {
    resolver: &'r Resolver,
    settings: ResolverSettings,
}

impl<'r> DocIngester<'r> {
    pub fn new(resolver: &'r Resolver, settings: ResolverSettings) -> Self {
        Self { resolver, settings }
    }

    /// Ingest every entry of a parsed documentation file
    pub fn ingest_file(
        &self,
        table: &mut SymbolTable,
        file: DocFile,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> IngestStats {
        debug!(assembly = ?file.assembly, entries = file.entries.len(), "ingesting documentation");
        self.ingest(table, file.entries, diagnostics)
    }

    /// Resolve each entry and attach its documentation
    ///
    /// Unresolvable entries are reported and skipped. When two entries name
    /// the same node the later one wins.
    pub fn ingest<I>(
        &self,
        table: &mut SymbolTable,
        entries: I,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> IngestStats
    where
        I: IntoIterator<Item = DocEntry>,
    {
        let mut stats = IngestStats::default();
        let mut documented: HashSet<SymbolHandle> = HashSet::new();

        for DocEntry { id, doc } in entries {
            stats.entries += 1;

            let Some(handle) = self.resolver.attach(table, &id, doc, diagnostics) else {
                stats.unresolved += 1;
                continue;
            };
            stats.attached += 1;

            if self.settings.resolve_exception_refs {
                self.resolve_exception_refs(table, &handle, &mut stats, diagnostics);
            }

            if !documented.insert(handle.clone()) {
                stats.duplicates += 1;
                if self.settings.warn_on_duplicate_docs {
                    diagnostics.warn(format_args!(
                        "{id}: replaces documentation already attached to {}",
                        handle.path()
                    ));
                }
            }
        }

        debug!(?stats, "ingestion finished");
        stats
    }

    /// Resolve the exception crefs of the documentation stored at `handle`
    fn resolve_exception_refs(
        &self,
        table: &mut SymbolTable,
        handle: &SymbolHandle,
        stats: &mut IngestStats,
        diagnostics: &mut dyn DiagnosticSink,
    ) {
        let crefs: Vec<String> = match table.doc(handle) {
            Some(doc) => doc.exceptions.iter().map(|e| e.cref.clone()).collect(),
            None => return,
        };

        let targets: Vec<Option<SymbolHandle>> = crefs
            .iter()
            .map(|cref| {
                stats.exception_refs += 1;
                let target = self.resolver.resolve_str(table, cref, diagnostics);
                if target.is_none() {
                    stats.exception_refs_unresolved += 1;
                }
                target
            })
            .collect();

        if let Some(Some(doc)) = table.doc_slot_mut(handle) {
            for (exception, target) in doc.exceptions.iter_mut().zip(targets) {
                exception.target = target;
            }
        }
    }
}
