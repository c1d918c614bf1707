//! Metadoc Core - symbol identity for compiled-module documentation
//!
//! This crate provides the core functionality:
//! - Type names: decoding serialized metadata type names
//! - Identifiers: parsing `T:`/`M:`/`F:`/`P:`/`E:`/`N:` documentation IDs
//! - Symbols: the namespace/type/member table
//! - Resolver: mapping identifiers to symbols, overloads included
//! - Docs: reading XML documentation and attaching it to symbols

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Diagnostics module - warning/error sink shared by all passes
pub mod diagnostics;

/// Type-name module - decoding raw metadata type names
pub mod typename;

/// Identifier module - parsing documentation identifiers
pub mod ident;

/// Symbol table module - namespaces, types and member overloads
pub mod symbols;

/// Resolver module - identifier to symbol resolution
pub mod resolve;

/// Documentation module - doc comments, XML reader and ingestion
pub mod doc;

/// Metadata module - module descriptions and table building
pub mod metadata;

/// Configuration module - `metadoc.toml` loading
pub mod config;

/// Test utilities - fixture builders for symbol tables
pub mod testutil;

/// Convenience re-export of the diagnostics sink
pub use diagnostics::{DiagnosticLog, DiagnosticSink};

/// Convenience re-export of the decoder entry point
pub use typename::{decode, CanonicalType};

/// Convenience re-export of the identifier parser
pub use ident::MemberIdentifier;

/// Convenience re-export of the symbol table
pub use symbols::{SymbolHandle, SymbolTable};

/// Convenience re-export of the resolver
pub use resolve::Resolver;

/// Convenience re-export of documentation ingestion
pub use doc::{DocIngester, IngestStats};

/// Convenience re-export of the table builder
pub use metadata::{ModuleMetadata, SymbolTableBuilder};

/// Convenience re-export of configuration
pub use config::MetadocConfig;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_end_to_end_from_json_and_xml() {
        let module = ModuleMetadata::parse(
            r#"{
                "name": "Sample",
                "types": [{
                    "namespace": "Sample",
                    "name": "Parser",
                    "kind": "class",
                    "visibility": "public",
                    "members": [
                        {"name": ".ctor", "kind": "constructor", "visibility": "public"},
                        {"name": "TryParse", "kind": "method", "visibility": "public",
                         "is_static": true,
                         "params": [{"name": "text", "type": "System.String"},
                                    {"name": "value", "type": "System.Int32&", "modifier": "out"}],
                         "type": "System.Boolean"}
                    ]
                }]
            }"#,
        )
        .unwrap();
        let docs = doc::parse_doc_xml(
            r#"<doc><members>
                <member name="M:Sample.Parser.TryParse(System.String,System.Int32@)">
                    <summary>Parses text.</summary>
                    <param name="value">The result.</param>
                </member>
            </members></doc>"#,
        )
        .unwrap();

        let mut log = DiagnosticLog::new();
        let resolver = Resolver::new();
        let mut builder = SymbolTableBuilder::new(resolver.operators());
        builder.add_module(&module, &mut log);
        let mut table = builder.build();

        let config = MetadocConfig::default();
        let stats = DocIngester::new(&resolver, config.resolver).ingest_file(&mut table, docs, &mut log);
        assert_eq!(stats.attached, 1);
        assert_eq!(log.warning_count(), 0);

        let handle = resolver
            .resolve_str(&table, "M:Sample.Parser.TryParse(System.String,System.Int32@)", &mut log)
            .unwrap();
        let doc = table.doc(&handle).unwrap();
        assert_eq!(doc.summary, "Parses text.");
        assert_eq!(doc.params["value"].description, "The result.");
    }
}
