//! Documentation comments for compiled symbols
//!
//! This module reads XML documentation files and attaches their entries to
//! the nodes of a symbol table.

mod ingest;
mod types;
pub mod xml;

pub use ingest::{DocIngester, IngestStats};
pub use types::{DocComment, DocEntry, DocFile, ExceptionDoc, ParamDoc};
pub use xml::{parse_doc_xml, read_doc_file, DocReadError};
