//! Overload signature comparison
//!
//! Identifier fragments refer to generic parameters positionally: `` `N ``
//! is the Nth parameter of the owning type (enclosing types included),
//! ``` ``N ``` the Nth parameter of the member itself. Which names those
//! are depends on the candidate being compared, so substitution happens
//! per candidate, right before comparison.

use crate::symbols::MemberSymbol;

/// Replace generic back-references in an identifier fragment
///
/// # Panics
/// Panics if a back-reference index is out of range. Identifiers and
/// metadata that disagree this way are a broken input contract, not a
/// lookup miss.
pub fn substitute_back_references(fragment: &str, outer: &[String], own: &[String]) -> String {
    if !fragment.contains('`') {
        return fragment.to_string();
    }

    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;
    while let Some(tick) = rest.find('`') {
        out.push_str(&rest[..tick]);
        let after = &rest[tick..];
        let ticks = after.chars().take_while(|&c| c == '`').count();
        let digits: String = after[ticks..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();

        if digits.is_empty() || ticks > 2 {
            out.push_str(&after[..ticks]);
            rest = &after[ticks..];
            continue;
        }

        let index: usize = digits.parse().unwrap_or(usize::MAX);
        let (names, class) = if ticks == 1 {
            (outer, "type")
        } else {
            (own, "member")
        };
        assert!(
            index < names.len(),
            "back-reference {}{} in '{}' exceeds the {} {} generic parameter(s)",
            "`".repeat(ticks),
            digits,
            fragment,
            names.len(),
            class
        );
        out.push_str(&names[index]);
        rest = &after[ticks + digits.len()..];
    }
    out.push_str(rest);
    out
}

/// Comparison form with nested-type separators spelled the way identifiers
/// spell them
pub fn identifier_form(comparison: &str) -> String {
    comparison.replace(['/', '+'], ".")
}

/// Decide whether `candidate` is the overload named by the identifier's
/// parameter fragments and optional return-type fragment
///
/// Parameters are compared one for one, after substituting back-references
/// with `outer` (the owning type's generic parameters) and the candidate's
/// own generic parameters.
pub fn signature_matches(
    candidate: &MemberSymbol,
    params: &[String],
    return_type: Option<&str>,
    outer: &[String],
) -> bool {
    if candidate.params.len() != params.len() {
        return false;
    }

    let own = &candidate.generic_params;
    let params_match = candidate.params.iter().zip(params).all(|(param, fragment)| {
        identifier_form(&param.signature_form()) == substitute_back_references(fragment, outer, own)
    });
    if !params_match {
        return false;
    }

    match return_type {
        None => true,
        Some(fragment) => candidate.ty.as_ref().is_some_and(|ty| {
            identifier_form(&ty.comparison) == substitute_back_references(fragment, outer, own)
        }),
    }
}
