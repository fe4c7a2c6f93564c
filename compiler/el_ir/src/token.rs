//! Lexer output.

use std::fmt;

use crate::{Name, Span};

/// A token with its source location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Token kinds of the expression body grammar.
///
/// Word operators (`and`, `eq`, `div`, ...) are folded into their symbolic
/// counterparts by the lexer, so the parser only matches one kind per
/// operator.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals
    Int(i64),
    /// Integer literal wider than 64 bits (decimal digits).
    BigInt(Name),
    /// `f64::to_bits` of a floating literal.
    Float(u64),
    String(Name),
    True,
    False,
    Null,

    Ident(Name),

    // Keyword-only operators
    Empty,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Other operators
    Question,
    Colon,
    Eq,
    PlusEq,
    Semicolon,
    Arrow,

    // Delimiters
    Comma,
    Dot,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    Eof,
}

impl TokenKind {
    /// Short, human-readable description used in parse errors.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) | TokenKind::BigInt(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::String(_) => "string",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Empty => "empty",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Bang => "!",
            TokenKind::Question => "?",
            TokenKind::Colon => ":",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::Semicolon => ";",
            TokenKind::Arrow => "->",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Eof => "end of expression",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "{n}"),
            TokenKind::BigInt(digits) => write!(f, "{digits}"),
            TokenKind::Float(bits) => write!(f, "{:?}", f64::from_bits(*bits)),
            TokenKind::String(s) => write!(f, "{s:?}"),
            TokenKind::Ident(name) => write!(f, "{name}"),
            other => write!(f, "{}", other.display_name()),
        }
    }
}

/// Tokens of one expression body, always terminated by `Eof`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
