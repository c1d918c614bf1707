//! Documentation identifier parsing
//!
//! Identifiers look like `M:Ns.Type`1.Method``1(System.Int32,`0,``0@)~R`:
//! a kind tag, a colon, a dotted path, an optional parameter list and, for
//! conversion operators, a `~` return-type fragment.

mod error;

pub use error::{IdentifierError, IdentifierErrorKind};

/// What an identifier names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Namespace,
    Type,
    Method,
    Field,
    Property,
    Event,
}

impl IdentifierKind {
    /// Map a kind tag character to a kind
    pub fn from_tag(tag: char) -> Option<Self> {
        Some(match tag {
            'N' => IdentifierKind::Namespace,
            'T' => IdentifierKind::Type,
            'M' => IdentifierKind::Method,
            'F' => IdentifierKind::Field,
            'P' => IdentifierKind::Property,
            'E' => IdentifierKind::Event,
            _ => return None,
        })
    }

    pub fn tag(self) -> char {
        match self {
            IdentifierKind::Namespace => 'N',
            IdentifierKind::Type => 'T',
            IdentifierKind::Method => 'M',
            IdentifierKind::Field => 'F',
            IdentifierKind::Property => 'P',
            IdentifierKind::Event => 'E',
        }
    }

    /// Identifiers of this kind carry a member name after the type path
    pub fn has_member(self) -> bool {
        !matches!(self, IdentifierKind::Namespace | IdentifierKind::Type)
    }
}

/// Reserved member name of instance constructors
pub const CONSTRUCTOR: &str = "#ctor";
/// Reserved member name of static constructors
pub const STATIC_CONSTRUCTOR: &str = "#cctor";

/// A parsed documentation identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberIdentifier {
    /// The identifier as it was read
    pub raw: String,
    pub kind: IdentifierKind,
    /// Dotted path of the owning type for members, of the type itself for
    /// types, or the namespace name
    pub type_path: String,
    /// Member simple name without its generic arity suffix
    pub member: Option<String>,
    /// Number of generic parameters declared by the member itself
    pub generic_arity: usize,
    /// Parameter type fragments; `None` when no parameter list was written
    pub params: Option<Vec<String>>,
    /// Return type fragment after `~`
    pub return_type: Option<String>,
}

impl MemberIdentifier {
    /// Parse a raw documentation identifier
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let raw = raw.trim();
        let err = |kind, offset| IdentifierError::new(kind, raw, offset);

        let mut chars = raw.chars();
        let tag = chars
            .next()
            .ok_or_else(|| err(IdentifierErrorKind::MissingPrefix, 0))?;
        if chars.next() != Some(':') {
            return Err(err(IdentifierErrorKind::MissingPrefix, 0));
        }
        let kind = IdentifierKind::from_tag(tag)
            .ok_or_else(|| err(IdentifierErrorKind::UnknownKind(tag), 0))?;

        // The tag is ASCII when from_tag accepted it
        let body = &raw[2..];
        if body.is_empty() {
            return Err(err(IdentifierErrorKind::EmptyPath, 2));
        }

        let (body, return_type) = match body.find('~') {
            Some(tilde) => {
                let ret = body[tilde + 1..].trim();
                if ret.is_empty() {
                    return Err(err(IdentifierErrorKind::EmptyReturnType, 2 + tilde));
                }
                (&body[..tilde], Some(ret.to_string()))
            }
            None => (body, None),
        };

        let (path, params) = match body.find('(') {
            Some(open) => {
                if !body.ends_with(')') {
                    return Err(err(IdentifierErrorKind::UnmatchedParenthesis, 2 + open));
                }
                let inner = &body[open + 1..body.len() - 1];
                let params = split_parameters(inner)
                    .map_err(|(kind, at)| err(kind, 2 + open + 1 + at))?;
                (&body[..open], Some(params))
            }
            None if body.contains(')') => {
                let close = body.find(')').unwrap_or(0);
                return Err(err(IdentifierErrorKind::UnmatchedParenthesis, 2 + close));
            }
            None => (body, None),
        };

        if path.is_empty() {
            return Err(err(IdentifierErrorKind::EmptyPath, 2));
        }
        if kind != IdentifierKind::Method && return_type.is_some() {
            return Err(err(IdentifierErrorKind::UnexpectedSignature, 2));
        }

        if !kind.has_member() {
            if params.is_some() {
                return Err(err(IdentifierErrorKind::UnexpectedSignature, 2 + path.len()));
            }
            return Ok(Self {
                raw: raw.to_string(),
                kind,
                type_path: path.to_string(),
                member: None,
                generic_arity: 0,
                params: None,
                return_type: None,
            });
        }

        if matches!(kind, IdentifierKind::Field | IdentifierKind::Event) && params.is_some() {
            return Err(err(IdentifierErrorKind::UnexpectedSignature, 2 + path.len()));
        }

        let dot = path
            .rfind('.')
            .ok_or_else(|| err(IdentifierErrorKind::MissingDot, 2))?;
        let type_path = &path[..dot];
        let name = &path[dot + 1..];
        if type_path.is_empty() || name.is_empty() {
            return Err(err(IdentifierErrorKind::EmptyPath, 2 + dot));
        }

        let (name, generic_arity) = match name.find("``") {
            Some(marker) => {
                let arity = name[marker + 2..]
                    .parse::<usize>()
                    .map_err(|_| err(IdentifierErrorKind::InvalidArity, 2 + dot + 1 + marker))?;
                (&name[..marker], arity)
            }
            None => (name, 0),
        };

        Ok(Self {
            raw: raw.to_string(),
            kind,
            type_path: type_path.to_string(),
            member: Some(name.to_string()),
            generic_arity,
            params,
            return_type,
        })
    }

    /// Parameter fragments, empty when no list was written
    pub fn param_fragments(&self) -> &[String] {
        self.params.as_deref().unwrap_or(&[])
    }
}

impl std::fmt::Display for MemberIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a parameter list on commas outside `{}` and `[]`
fn split_parameters(list: &str) -> Result<Vec<String>, (IdentifierErrorKind, usize)> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut params = Vec::new();
    let mut braces = 0i32;
    let mut brackets = 0i32;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        match c {
            '{' => braces += 1,
            '}' => braces -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            ',' if braces == 0 && brackets == 0 => {
                params.push(take_parameter(list, start, i)?);
                start = i + 1;
            }
            '(' | ')' => return Err((IdentifierErrorKind::UnmatchedParenthesis, i)),
            _ => {}
        }
        if braces < 0 || brackets < 0 {
            return Err((IdentifierErrorKind::UnbalancedBrackets, i));
        }
    }
    if braces != 0 || brackets != 0 {
        return Err((IdentifierErrorKind::UnbalancedBrackets, list.len()));
    }
    params.push(take_parameter(list, start, list.len())?);
    Ok(params)
}

fn take_parameter(
    list: &str,
    start: usize,
    end: usize,
) -> Result<String, (IdentifierErrorKind, usize)> {
    let fragment = list[start..end].trim();
    if fragment.is_empty() {
        return Err((IdentifierErrorKind::EmptyParameter, start));
    }
    Ok(fragment.to_string())
}
