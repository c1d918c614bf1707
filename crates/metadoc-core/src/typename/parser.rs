//! Recursive-descent parser for serialized metadata type names
//!
//! Grammar (over the tokens from [`super::token`]):
//!
//! ```text
//! type       := name-part+ generic-args? pointer* array-group*
//! name-part  := NAME | ARITY
//! generic-args
//!            := '<' type (',' type)* '>'
//!             | '[' bracket-arg (',' bracket-arg)* ']'
//! bracket-arg:= '[' type (',' qualification)? ']' | type
//! array-group:= '[' (',' | BOUND)* ']'
//! top        := type (',' qualification)?
//! ```

use super::error::{DecodeError, DecodeErrorKind};
use super::token::{tokenize, Token, TokenKind};

/// One piece of a (possibly generic, possibly nested) type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePart {
    /// Literal text, separators included
    Text(String),
    /// Arity marker; consumes this many generic arguments when rendered
    Arity(usize),
}

/// Parsed type-name tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    /// Name text interleaved with arity markers
    pub parts: Vec<NamePart>,
    /// Generic arguments, in marker order
    pub args: Vec<TypeExpr>,
    /// Pointer stars following the name
    pub pointers: usize,
    /// Array ranks in metadata order
    pub arrays: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Display,
    Comparison,
}

impl TypeExpr {
    /// Parse a raw metadata type name
    ///
    /// Trailing by-reference markers and assembly qualification are
    /// discarded; everything else must be structurally valid.
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        let input = raw.trim().trim_end_matches('&');
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(DecodeError::new(DecodeErrorKind::Empty, 0));
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            end: input.len(),
        };
        let expr = parser.parse_type()?;
        if parser.eat(&TokenKind::Comma) {
            parser.skip_qualification(false)?;
        }
        if let Some(token) = parser.peek_token() {
            return Err(DecodeError::new(
                DecodeErrorKind::UnexpectedToken(token.kind.to_string()),
                token.offset,
            ));
        }
        Ok(expr)
    }

    /// Sum of all arity markers in the name
    pub fn arity(&self) -> usize {
        self.parts
            .iter()
            .map(|p| match p {
                NamePart::Arity(n) => *n,
                NamePart::Text(_) => 0,
            })
            .sum()
    }

    /// Source-order rendering: `A<B, C>`, array groups reversed
    pub fn display(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, Form::Display);
        out
    }

    /// Rendering comparable with documentation identifier fragments:
    /// `A{B,C}`, array groups in metadata order with `0:` lower bounds
    pub fn comparison(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, Form::Comparison);
        out
    }

    fn write(&self, out: &mut String, form: Form) {
        let mut args = self.args.iter();
        for part in &self.parts {
            match part {
                NamePart::Text(text) => out.push_str(text),
                NamePart::Arity(n) if self.args.is_empty() => {
                    out.push('`');
                    out.push_str(&n.to_string());
                }
                NamePart::Arity(n) => {
                    let (open, sep, close) = match form {
                        Form::Display => ('<', ", ", '>'),
                        Form::Comparison => ('{', ",", '}'),
                    };
                    out.push(open);
                    for i in 0..*n {
                        if i > 0 {
                            out.push_str(sep);
                        }
                        if let Some(arg) = args.next() {
                            arg.write(out, form);
                        }
                    }
                    out.push(close);
                }
            }
        }
        for _ in 0..self.pointers {
            out.push('*');
        }

        match form {
            Form::Display => {
                for &rank in self.arrays.iter().rev() {
                    out.push('[');
                    for _ in 1..rank {
                        out.push(',');
                    }
                    out.push(']');
                }
            }
            Form::Comparison => {
                for &rank in &self.arrays {
                    out.push('[');
                    for _ in 1..rank {
                        out.push_str("0:,");
                    }
                    out.push(']');
                }
            }
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Input length, used as the offset of end-of-input errors
    end: usize,
}

impl Parser {
    fn parse_type(&mut self) -> Result<TypeExpr, DecodeError> {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                Some(TokenKind::Name(text)) => {
                    if text.chars().all(|c| c == '*') && !parts.is_empty() {
                        break;
                    }
                    parts.push(NamePart::Text(text.clone()));
                }
                Some(TokenKind::Arity(n)) if !parts.is_empty() => parts.push(NamePart::Arity(*n)),
                _ => break,
            }
            self.pos += 1;
        }
        if parts.is_empty() {
            return Err(self.error_here(DecodeErrorKind::ExpectedName));
        }

        let mut expr = TypeExpr {
            parts,
            args: Vec::new(),
            pointers: 0,
            arrays: Vec::new(),
        };

        let arity = expr.arity();
        if arity > 0 {
            let args_offset = self.offset();
            match self.peek() {
                Some(TokenKind::LAngle) => expr.args = self.parse_angle_args()?,
                Some(TokenKind::LBracket) if self.bracket_opens_arguments() => {
                    expr.args = self.parse_bracket_args()?;
                }
                _ => {}
            }
            if !expr.args.is_empty() && expr.args.len() != arity {
                return Err(DecodeError::new(
                    DecodeErrorKind::ArityMismatch {
                        expected: arity,
                        found: expr.args.len(),
                    },
                    args_offset,
                ));
            }
        }

        if let Some(TokenKind::Name(text)) = self.peek() {
            if text.chars().all(|c| c == '*') {
                expr.pointers = text.len();
                self.pos += 1;
            }
        }

        while self.peek() == Some(&TokenKind::LBracket) {
            let rank = self.parse_array_group()?;
            expr.arrays.push(rank);
        }

        Ok(expr)
    }

    fn parse_angle_args(&mut self) -> Result<Vec<TypeExpr>, DecodeError> {
        let open = self.offset();
        self.expect(&TokenKind::LAngle)?;
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type()?);
            match self.next() {
                Some(TokenKind::Comma) => {}
                Some(TokenKind::RAngle) => return Ok(args),
                Some(other) => {
                    return Err(DecodeError::new(
                        DecodeErrorKind::UnexpectedToken(other.to_string()),
                        self.prev_offset(),
                    ))
                }
                None => return Err(DecodeError::new(DecodeErrorKind::Unbalanced('<'), open)),
            }
        }
    }

    fn parse_bracket_args(&mut self) -> Result<Vec<TypeExpr>, DecodeError> {
        let open = self.offset();
        self.expect(&TokenKind::LBracket)?;
        let mut args = Vec::new();
        loop {
            if self.peek() == Some(&TokenKind::LBracket) {
                let inner_open = self.offset();
                self.pos += 1;
                let arg = self.parse_type()?;
                if self.eat(&TokenKind::Comma) {
                    self.skip_qualification(true)?;
                }
                if !self.eat(&TokenKind::RBracket) {
                    return Err(DecodeError::new(DecodeErrorKind::Unbalanced('['), inner_open));
                }
                args.push(arg);
            } else {
                args.push(self.parse_type()?);
            }

            match self.next() {
                Some(TokenKind::Comma) => {}
                Some(TokenKind::RBracket) => return Ok(args),
                Some(other) => {
                    return Err(DecodeError::new(
                        DecodeErrorKind::UnexpectedToken(other.to_string()),
                        self.prev_offset(),
                    ))
                }
                None => return Err(DecodeError::new(DecodeErrorKind::Unbalanced('['), open)),
            }
        }
    }

    /// Returns the rank of the group
    fn parse_array_group(&mut self) -> Result<usize, DecodeError> {
        let open = self.offset();
        self.expect(&TokenKind::LBracket)?;
        let mut rank = 1;
        loop {
            match self.next() {
                Some(TokenKind::RBracket) => return Ok(rank),
                Some(TokenKind::Comma) => rank += 1,
                Some(TokenKind::Name(text)) if is_bound_annotation(&text) => {}
                Some(_) => {
                    return Err(DecodeError::new(
                        DecodeErrorKind::MalformedArrayGroup,
                        self.prev_offset(),
                    ))
                }
                None => return Err(DecodeError::new(DecodeErrorKind::Unbalanced('['), open)),
            }
        }
    }

    /// Skip assembly qualification. Inside a bracketed argument this stops
    /// before the closing `]`; at top level it runs to the end.
    fn skip_qualification(&mut self, bracketed: bool) -> Result<(), DecodeError> {
        let mut depth = 0usize;
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket if depth == 0 => {
                    if bracketed {
                        return Ok(());
                    }
                    return Err(self.error_here(DecodeErrorKind::Unbalanced(']')));
                }
                TokenKind::RBracket => depth -= 1,
                _ => {}
            }
            self.pos += 1;
        }
        if depth > 0 || bracketed {
            return Err(DecodeError::new(DecodeErrorKind::UnexpectedEnd, self.end));
        }
        Ok(())
    }

    /// After an arity marker, `[` opens generic arguments unless the group
    /// looks like an array rank group
    fn bracket_opens_arguments(&self) -> bool {
        match self.tokens.get(self.pos + 1).map(|t| &t.kind) {
            Some(TokenKind::LBracket) => true,
            Some(TokenKind::Name(text)) => !is_bound_annotation(text),
            _ => false,
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), DecodeError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error_here(DecodeErrorKind::UnexpectedToken(kind.to_string())))
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<TokenKind> {
        let kind = self.tokens.get(self.pos).map(|t| t.kind.clone());
        if kind.is_some() {
            self.pos += 1;
        }
        kind
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |t| t.offset)
    }

    fn prev_offset(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.end, |t| t.offset)
    }

    fn error_here(&self, kind: DecodeErrorKind) -> DecodeError {
        match self.peek_token() {
            Some(_) => DecodeError::new(kind, self.offset()),
            None => DecodeError::new(DecodeErrorKind::UnexpectedEnd, self.end),
        }
    }
}

/// Array-group content other than commas: `0...`, `0:`, `*`, digits
fn is_bound_annotation(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ':' | '*') || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(raw: &str) -> (String, String) {
        let expr = TypeExpr::parse(raw).expect("parse");
        (expr.display(), expr.comparison())
    }

    #[test]
    fn test_plain_and_nested_names_round_trip() {
        for raw in ["System.Int32", "N.Outer/Inner", "N.Outer+Inner", "System.Byte*"] {
            let (display, comparison) = forms(raw);
            assert_eq!(display, raw);
            assert_eq!(comparison, raw);
        }
    }

    #[test]
    fn test_array_groups() {
        assert_eq!(forms("N[][,]"), ("N[,][]".to_string(), "N[][0:,]".to_string()));
        assert_eq!(
            forms("System.Int32[0...,0...]"),
            ("System.Int32[,]".to_string(), "System.Int32[0:,]".to_string())
        );
        assert_eq!(
            forms("System.Int32[,,][]"),
            ("System.Int32[][,,]".to_string(), "System.Int32[0:,0:,][]".to_string())
        );
    }

    #[test]
    fn test_bracket_generic_with_qualification() {
        let (display, comparison) = forms(
            "System.Collections.Generic.Dictionary`2[[System.String, mscorlib, Version=4.0.0.0],[System.Int32, mscorlib]]",
        );
        assert_eq!(
            display,
            "System.Collections.Generic.Dictionary<System.String, System.Int32>"
        );
        assert_eq!(
            comparison,
            "System.Collections.Generic.Dictionary{System.String,System.Int32}"
        );
    }

    #[test]
    fn test_angle_and_bracket_forms_agree() {
        let angle = forms("Outer`1<Inner`1<System.Int32[]>>");
        let bracket = forms("Outer`1[[Inner`1[[System.Int32[]]]]]");
        assert_eq!(angle, bracket);
        assert_eq!(angle.0, "Outer<Inner<System.Int32[]>>");
    }

    #[test]
    fn test_plain_bracket_arguments() {
        let (display, _) = forms("Dictionary`2[System.String,System.Int32]");
        assert_eq!(display, "Dictionary<System.String, System.Int32>");
    }

    #[test]
    fn test_arguments_distributed_over_nested_markers() {
        let (display, comparison) = forms("N.Outer`1/Inner`2<A,B,C>");
        assert_eq!(display, "N.Outer<A>/Inner<B, C>");
        assert_eq!(comparison, "N.Outer{A}/Inner{B,C}");
    }

    #[test]
    fn test_generic_element_array() {
        let (display, comparison) = forms("List`1[[System.Int32[,]]][]");
        assert_eq!(display, "List<System.Int32[,]>[]");
        assert_eq!(comparison, "List{System.Int32[0:,]}[]");
    }

    #[test]
    fn test_open_generic_kept_verbatim() {
        assert_eq!(forms("List`1"), ("List`1".to_string(), "List`1".to_string()));
        assert_eq!(forms("List`1[]"), ("List`1[]".to_string(), "List`1[]".to_string()));
    }

    #[test]
    fn test_by_ref_and_top_level_qualification_stripped() {
        assert_eq!(TypeExpr::parse("System.Int32&").unwrap().display(), "System.Int32");
        assert_eq!(
            TypeExpr::parse("System.String, mscorlib, Version=4.0.0.0").unwrap().display(),
            "System.String"
        );
    }

    #[test]
    fn test_structural_failures() {
        let err = TypeExpr::parse("List`1[[System.Int32]").unwrap_err();
        assert!(matches!(
            err.kind,
            DecodeErrorKind::Unbalanced('[') | DecodeErrorKind::UnexpectedEnd
        ));

        let err = TypeExpr::parse("Dictionary`2<A>").unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::ArityMismatch {
                expected: 2,
                found: 1
            }
        );

        let err = TypeExpr::parse("N[x]").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::MalformedArrayGroup);

        assert_eq!(TypeExpr::parse("  ").unwrap_err().kind, DecodeErrorKind::Empty);
        assert!(TypeExpr::parse("A]").is_err());
        assert!(TypeExpr::parse("List`1<A").is_err());
    }
}
