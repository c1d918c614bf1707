//! Reader for XML documentation files
//!
//! Reads the `<doc><assembly/><members><member name="..."/></members></doc>`
//! layout emitted by compilers. Inline markup inside text sections
//! (`<see cref>`, `<paramref>`, `<c>`, `<para>`) is flattened to plain text;
//! rendering richer output is the renderer's job.

use std::path::Path;

use sxd_document::dom::{ChildOfElement, ChildOfRoot, Element};
use thiserror::Error;

use super::types::{DocComment, DocEntry, DocFile, ExceptionDoc, ParamDoc};

/// Errors that can occur when reading a documentation file
#[derive(Error, Debug)]
pub enum DocReadError {
    #[error("failed to read documentation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed documentation XML: {0}")]
    Xml(String),

    #[error("expected <doc> root element, found <{0}>")]
    UnexpectedRoot(String),
}

/// Read and parse a documentation file from disk
pub fn read_doc_file(path: &Path) -> Result<DocFile, DocReadError> {
    let text = std::fs::read_to_string(path)?;
    parse_doc_xml(&text)
}

/// Parse the text of a documentation file
pub fn parse_doc_xml(text: &str) -> Result<DocFile, DocReadError> {
    let package =
        sxd_document::parser::parse(text).map_err(|e| DocReadError::Xml(format!("{e:?}")))?;
    let document = package.as_document();

    let root = document
        .root()
        .children()
        .into_iter()
        .find_map(|child| match child {
            ChildOfRoot::Element(element) => Some(element),
            _ => None,
        })
        .ok_or_else(|| DocReadError::Xml("document has no root element".to_string()))?;

    if root.name().local_part() != "doc" {
        return Err(DocReadError::UnexpectedRoot(
            root.name().local_part().to_string(),
        ));
    }

    let mut file = DocFile::default();
    for section in child_elements(root) {
        match section.name().local_part() {
            "assembly" => {
                file.assembly = child_elements(section)
                    .find(|e| e.name().local_part() == "name")
                    .map(|e| flatten_text(e));
            }
            "members" => {
                for member in child_elements(section) {
                    if member.name().local_part() != "member" {
                        continue;
                    }
                    if let Some(id) = member.attribute_value("name") {
                        file.entries.push(DocEntry {
                            id: id.to_string(),
                            doc: parse_member(member),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    Ok(file)
}

/// Build a doc comment from the children of a `<member>` element
fn parse_member(member: Element<'_>) -> DocComment {
    let mut doc = DocComment::default();

    for section in child_elements(member) {
        match section.name().local_part() {
            "summary" => doc.summary = flatten_text(section),
            "remarks" => doc.remarks = non_empty(flatten_text(section)),
            "returns" => doc.returns = non_empty(flatten_text(section)),
            "value" => doc.value = non_empty(flatten_text(section)),
            "example" => doc.examples.push(raw_text(section).trim().to_string()),
            "param" => {
                if let Some(name) = section.attribute_value("name") {
                    doc.params.insert(
                        name.to_string(),
                        ParamDoc {
                            description: flatten_text(section),
                        },
                    );
                }
            }
            "typeparam" => {
                if let Some(name) = section.attribute_value("name") {
                    doc.type_params.insert(
                        name.to_string(),
                        ParamDoc {
                            description: flatten_text(section),
                        },
                    );
                }
            }
            "exception" => {
                if let Some(cref) = section.attribute_value("cref") {
                    doc.exceptions.push(ExceptionDoc {
                        cref: cref.to_string(),
                        description: flatten_text(section),
                        target: None,
                    });
                }
            }
            "seealso" => {
                if let Some(cref) = section.attribute_value("cref") {
                    doc.see_also.push(cref.to_string());
                }
            }
            _ => {}
        }
    }

    doc
}

fn child_elements<'d>(element: Element<'d>) -> impl Iterator<Item = Element<'d>> {
    element
        .children()
        .into_iter()
        .filter_map(|child| match child {
            ChildOfElement::Element(e) => Some(e),
            _ => None,
        })
}

/// Text content with inline markup flattened and whitespace collapsed
fn flatten_text(element: Element<'_>) -> String {
    let mut out = String::new();
    write_inline(element, &mut out);
    collapse_whitespace(&out)
}

/// Text content with whitespace preserved, for code samples
fn raw_text(element: Element<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        match child {
            ChildOfElement::Text(text) => out.push_str(text.text()),
            ChildOfElement::Element(e) => out.push_str(&raw_text(e)),
            _ => {}
        }
    }
    out
}

fn write_inline(element: Element<'_>, out: &mut String) {
    for child in element.children() {
        match child {
            ChildOfElement::Text(text) => out.push_str(text.text()),
            ChildOfElement::Element(e) => match e.name().local_part() {
                "see" | "seealso" => {
                    if let Some(cref) = e.attribute_value("cref") {
                        out.push_str(cref_display(cref));
                    } else if let Some(word) = e.attribute_value("langword") {
                        out.push_str(word);
                    } else {
                        write_inline(e, out);
                    }
                }
                "paramref" | "typeparamref" => {
                    if let Some(name) = e.attribute_value("name") {
                        out.push_str(name);
                    }
                }
                "para" | "br" => {
                    out.push(' ');
                    write_inline(e, out);
                    out.push(' ');
                }
                _ => write_inline(e, out),
            },
            _ => {}
        }
    }
}

/// `T:System.String` → `System.String`
fn cref_display(cref: &str) -> &str {
    match cref.as_bytes() {
        [_, b':', ..] => &cref[2..],
        _ => cref,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
