//! Implementation of the `metadoc decode` and `metadoc parse-id` commands.

use metadoc_core::typename::TypeExpr;
use metadoc_core::{CanonicalType, MemberIdentifier};

/// Print both forms of each raw type name.
pub fn decode_names(names: &[String]) {
    for raw in names {
        println!("{raw}");
        match TypeExpr::parse(raw) {
            Ok(expr) => {
                let ty = CanonicalType::from(&expr);
                println!("  display:    {}", ty.display);
                println!("  comparison: {}", ty.comparison);
            }
            Err(err) => println!("  error: {err}"),
        }
    }
}

/// Print the parsed structure of each identifier. Returns false if any
/// identifier was malformed.
pub fn parse_ids(ids: &[String]) -> bool {
    let mut ok = true;
    for raw in ids {
        println!("{raw}");
        match MemberIdentifier::parse(raw) {
            Ok(id) => print_identifier(&id),
            Err(err) => {
                println!("  error: {}", err.kind);
                ok = false;
            }
        }
    }
    ok
}

fn print_identifier(id: &MemberIdentifier) {
    println!("  kind:      {:?}", id.kind);
    println!("  path:      {}", id.type_path);
    if let Some(member) = &id.member {
        println!("  member:    {member}");
    }
    if id.generic_arity > 0 {
        println!("  arity:     {}", id.generic_arity);
    }
    if let Some(params) = &id.params {
        println!("  params:    ({})", params.join(", "));
    }
    if let Some(ret) = &id.return_type {
        println!("  returns:   {ret}");
    }
}
