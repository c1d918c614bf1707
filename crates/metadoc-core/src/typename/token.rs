//! Tokenizer for serialized metadata type names
//!
//! The token model is deliberately small: name text, generic arity markers,
//! and the four bracket characters plus the comma. Compiler-synthesized
//! fragments such as `<>c__DisplayClass1` or `<Main>b__0` never produce
//! angle tokens; they are folded into the surrounding name text so the
//! parser cannot confuse them with generic argument lists.

use super::error::{DecodeError, DecodeErrorKind};

/// Kind of a type-name token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Name text, including namespace dots and nested-type separators
    Name(String),
    /// Generic arity marker `` `N ``
    Arity(usize),
    LBracket,
    RBracket,
    LAngle,
    RAngle,
    Comma,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Name(name) => write!(f, "{name}"),
            TokenKind::Arity(n) => write!(f, "`{n}"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::LAngle => write!(f, "<"),
            TokenKind::RAngle => write!(f, ">"),
            TokenKind::Comma => write!(f, ","),
        }
    }
}

/// A token with its starting byte offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// Split a raw type name into tokens
pub fn tokenize(input: &str) -> Result<Vec<Token>, DecodeError> {
    let mut lexer = Lexer {
        input,
        pos: 0,
        tokens: Vec::new(),
        name: String::new(),
        name_start: 0,
    };
    lexer.run()?;
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    tokens: Vec<Token>,
    name: String,
    name_start: usize,
}

impl Lexer<'_> {
    fn run(&mut self) -> Result<(), DecodeError> {
        while let Some(c) = self.peek() {
            let offset = self.pos;
            match c {
                '`' => {
                    self.flush_name();
                    self.bump();
                    let digits_start = self.pos;
                    while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        self.bump();
                    }
                    let count = self.input[digits_start..self.pos]
                        .parse::<usize>()
                        .map_err(|_| DecodeError::new(DecodeErrorKind::InvalidArityMarker, offset))?;
                    self.push(TokenKind::Arity(count), offset);
                }
                '<' if self.opens_generic_arguments() => {
                    self.bump();
                    self.push(TokenKind::LAngle, offset);
                }
                '<' => self.synthesized_fragment()?,
                '>' => self.single(TokenKind::RAngle),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                ',' => self.single(TokenKind::Comma),
                c if c.is_whitespace() && self.name.is_empty() => self.bump(),
                c => {
                    if self.name.is_empty() {
                        self.name_start = offset;
                    }
                    self.name.push(c);
                    self.bump();
                }
            }
        }
        self.flush_name();
        Ok(())
    }

    /// A `<` opens an argument list only directly after an arity marker
    fn opens_generic_arguments(&self) -> bool {
        self.name.is_empty()
            && matches!(
                self.tokens.last(),
                Some(Token {
                    kind: TokenKind::Arity(_),
                    ..
                })
            )
    }

    /// Fold a bracket-balanced `<...>` fragment into the current name
    fn synthesized_fragment(&mut self) -> Result<(), DecodeError> {
        let start = self.pos;
        if self.name.is_empty() {
            self.name_start = start;
        }
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            self.name.push(c);
            self.bump();
            match c {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(DecodeError::new(DecodeErrorKind::Unbalanced('<'), start))
    }

    fn single(&mut self, kind: TokenKind) {
        let offset = self.pos;
        self.flush_name();
        self.bump();
        self.push(kind, offset);
    }

    fn flush_name(&mut self) {
        let text = self.name.trim_end();
        if !text.is_empty() {
            let kind = TokenKind::Name(text.to_string());
            self.push(kind, self.name_start);
        }
        self.name.clear();
    }

    fn push(&mut self, kind: TokenKind, offset: usize) {
        self.tokens.push(Token { kind, offset });
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }
}
