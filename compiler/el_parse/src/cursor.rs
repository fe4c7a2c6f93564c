//! Token cursor for navigating the token stream.

use el_ir::{Name, Span, Token, TokenKind, TokenList};

use crate::ParseError;

/// Cursor over one `Eof`-terminated token list.
///
/// Invariant: `pos` never moves past the trailing `Eof`.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

const EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
};

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.peek_token(0)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Token `n` positions ahead of the current one (`Eof` past the end).
    pub fn peek_token(&self, n: usize) -> &'a Token {
        self.tokens
            .get(self.pos + n)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF)
    }

    #[inline]
    pub fn peek_kind(&self, n: usize) -> &'a TokenKind {
        &self.peek_token(n).kind
    }

    /// Check if the current token matches the given kind.
    ///
    /// Payload-carrying kinds compare by discriminant only.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// Two spans touch with no whitespace between them.
    #[inline]
    pub fn spans_adjacent(span1: Span, span2: Span) -> bool {
        span1.end == span2.start
    }

    /// Advance to the next token and return the consumed token.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect the current token to be of the given kind, advance and return it.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }

    pub fn expect_ident(&mut self) -> Result<Name, ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            self.advance();
            Ok(name.clone())
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    #[cold]
    pub fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current_kind().display_name().to_string(),
            span: self.current_span(),
        }
    }
}
