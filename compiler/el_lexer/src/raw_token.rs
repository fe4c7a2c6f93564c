//! Raw logos token set.

use logos::Logos;

/// Raw token from logos (before literal decoding).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\x0C]+")]
pub(crate) enum RawToken {
    // === Keywords ===
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("empty")]
    Empty,

    // === Operators (word forms fold into symbols) ===
    #[token("+")]
    Plus,
    #[token("+=")]
    PlusEq,
    #[token("-")]
    Minus,
    #[token("->")]
    Arrow,
    #[token("*")]
    Star,
    #[token("/")]
    #[token("div")]
    Slash,
    #[token("%")]
    #[token("mod")]
    Percent,
    #[token("==")]
    #[token("eq")]
    EqEq,
    #[token("!=")]
    #[token("ne")]
    NotEq,
    #[token("<")]
    #[token("lt")]
    Lt,
    #[token("<=")]
    #[token("le")]
    LtEq,
    #[token(">")]
    #[token("gt")]
    Gt,
    #[token(">=")]
    #[token("ge")]
    GtEq,
    #[token("&&")]
    #[token("and")]
    AndAnd,
    #[token("||")]
    #[token("or")]
    OrOr,
    #[token("!")]
    #[token("not")]
    Bang,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token(";")]
    Semicolon,

    // === Delimiters ===
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // === Literals ===
    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Ident,
}
