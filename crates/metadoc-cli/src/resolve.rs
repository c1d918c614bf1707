//! Implementation of the `metadoc resolve` command.

use anyhow::{Context, Result};
use std::path::PathBuf;

use metadoc_core::config::{DiagnosticSettings, CONFIG_FILE_NAME};
use metadoc_core::doc::read_doc_file;
use metadoc_core::{
    DiagnosticLog, DocIngester, IngestStats, MetadocConfig, ModuleMetadata, Resolver,
    SymbolTableBuilder,
};

/// Options for the resolve command.
#[derive(Debug)]
pub struct ResolveOptions {
    /// Module metadata JSON.
    pub metadata: PathBuf,
    /// XML documentation file.
    pub docs: PathBuf,
    /// Explicit configuration file.
    pub config: Option<PathBuf>,
    /// Where to write the documented table.
    pub output: Option<PathBuf>,
}

/// Result of a resolve run.
#[derive(Debug)]
pub struct ResolveReport {
    /// Ingestion counters.
    pub stats: IngestStats,
    /// Types in the table.
    pub types: usize,
    /// Member overloads in the table.
    pub members: usize,
    /// Warning messages in emission order.
    pub warnings: Vec<String>,
    /// Diagnostic reporting settings in effect.
    pub settings: DiagnosticSettings,
}

impl ResolveReport {
    /// Returns true if the run should exit with a failure status.
    pub fn failed(&self) -> bool {
        self.settings.deny_warnings && !self.warnings.is_empty()
    }

    /// Print a summary of the run.
    pub fn print_summary(&self) {
        println!("Symbols: {} types, {} members", self.types, self.members);
        println!(
            "Entries: {} read, {} attached, {} unresolved",
            self.stats.entries, self.stats.attached, self.stats.unresolved
        );
        if self.stats.exception_refs > 0 {
            println!(
                "Exception references: {} ({} unresolved)",
                self.stats.exception_refs, self.stats.exception_refs_unresolved
            );
        }

        if self.warnings.is_empty() {
            println!("No warnings.");
            return;
        }

        println!("Warnings: {}", self.warnings.len());
        for warning in self.warnings.iter().take(self.settings.max_listed) {
            println!("  {warning}");
        }
        let hidden = self.warnings.len().saturating_sub(self.settings.max_listed);
        if hidden > 0 {
            println!("  ... and {hidden} more");
        }
    }
}

/// Build the symbol table, ingest the documentation file and optionally
/// write the result.
pub fn run(options: &ResolveOptions) -> Result<ResolveReport> {
    let config = match &options.config {
        Some(path) => MetadocConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MetadocConfig::load_or_default(CONFIG_FILE_NAME)
            .with_context(|| format!("Failed to load {CONFIG_FILE_NAME}"))?,
    };

    let module = ModuleMetadata::from_path(&options.metadata)
        .with_context(|| format!("Failed to read metadata {}", options.metadata.display()))?;
    let docs = read_doc_file(&options.docs)
        .with_context(|| format!("Failed to read documentation {}", options.docs.display()))?;

    let mut log = DiagnosticLog::new();
    let resolver = Resolver::new();
    let mut builder = SymbolTableBuilder::new(resolver.operators());
    builder.add_module(&module, &mut log);
    let mut table = builder.build();

    let stats =
        DocIngester::new(&resolver, config.resolver).ingest_file(&mut table, docs, &mut log);

    if let Some(output) = &options.output {
        let json = serde_json::to_string_pretty(&table).context("Failed to serialize table")?;
        std::fs::write(output, json)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }

    let (types, members) = table.symbol_counts();
    Ok(ResolveReport {
        stats,
        types,
        members,
        warnings: log.warnings().map(|d| d.message.clone()).collect(),
        settings: config.diagnostics,
    })
}
