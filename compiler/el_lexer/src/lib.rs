//! Lexer for EL expressions using logos.
//!
//! Two entry points:
//! - [`lex`] tokenizes a bare expression body (`a.b + 1`).
//! - [`lex_template`] splits template text into literal segments and
//!   `${...}` / `#{...}` expression segments, tokenizing each body.
//!
//! Word operators (`and`, `eq`, `div`, ...) lex to the same token kinds as
//! their symbolic forms.

mod escape;
mod lex_error;
mod raw_token;
mod template;

use el_ir::{Span, Token, TokenKind, TokenList};
use logos::Logos;

pub use lex_error::LexError;
pub use template::{lex_template, Segment};

use raw_token::RawToken;

/// Tokenize a complete expression body. The result always ends in `Eof`.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let (tokens, _) = lex_body(source, 0, false)?;
    Ok(tokens)
}

/// Tokenize starting at `source`, whose first byte sits at `base` in the
/// enclosing text.
///
/// With `stop_at_close` the body ends at the first `}` that is not matched
/// by an earlier `{`, and the returned offset points just past it. Without
/// it the whole input is consumed.
pub(crate) fn lex_body(
    source: &str,
    base: u32,
    stop_at_close: bool,
) -> Result<(TokenList, Option<usize>), LexError> {
    let mut result = TokenList::new();
    let mut lexer = RawToken::lexer(source);
    let mut depth = 0usize;

    while let Some(token_result) = lexer.next() {
        let range = lexer.span();
        let span = Span::from_range(range.clone()).offset_by(base);
        let slice = lexer.slice();

        let Ok(raw) = token_result else {
            return Err(LexError::from_bad_slice(slice, span));
        };

        match raw {
            RawToken::LBrace => depth += 1,
            RawToken::RBrace if stop_at_close && depth == 0 => {
                result.push(Token::new(TokenKind::Eof, Span::point(span.start)));
                return Ok((result, Some(range.end)));
            }
            RawToken::RBrace => depth = depth.saturating_sub(1),
            _ => {}
        }

        let kind = convert_token(raw, slice, span)?;
        result.push(Token::new(kind, span));
    }

    if stop_at_close {
        return Err(LexError::UnterminatedExpression {
            span: Span::point(base),
        });
    }

    let end = Span::from_range(source.len()..source.len()).offset_by(base);
    result.push(Token::new(TokenKind::Eof, end));
    Ok((result, None))
}

fn convert_token(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Int => match slice.parse::<i64>() {
            Ok(n) => TokenKind::Int(n),
            Err(_) => {
                let digits = slice.trim_start_matches('0');
                TokenKind::BigInt(if digits.is_empty() { "0" } else { digits }.into())
            }
        },
        RawToken::Float => match slice.parse::<f64>() {
            Ok(f) => TokenKind::Float(f.to_bits()),
            Err(_) => {
                return Err(LexError::InvalidNumber {
                    text: slice.to_string(),
                    span,
                })
            }
        },
        RawToken::String => {
            let content = &slice[1..slice.len() - 1];
            TokenKind::String(escape::unescape(content).into())
        }
        RawToken::Ident => TokenKind::Ident(slice.into()),

        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::Empty => TokenKind::Empty,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Question => TokenKind::Question,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Eq => TokenKind::Eq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
    };
    Ok(kind)
}
