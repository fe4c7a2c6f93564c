//! Values: literals, identifiers, functions, collections, lambdas and the
//! member / index / call suffixes that follow them.

use el_ir::{Name, Node, NumberLiteral, TokenKind};

use crate::cursor::Cursor;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Look ahead for `x ->`, `() ->` or `(a, b) ->`.
    ///
    /// Returns the parameter names and the number of tokens up to and
    /// including the arrow. Consumes nothing.
    pub(super) fn lambda_params_ahead(&self) -> Option<(Vec<Name>, usize)> {
        match self.cursor.peek_kind(0) {
            TokenKind::Ident(name) if matches!(self.cursor.peek_kind(1), TokenKind::Arrow) => {
                Some((vec![name.clone()], 2))
            }
            TokenKind::LParen => {
                let mut params = Vec::new();
                let mut i = 1;
                if !matches!(self.cursor.peek_kind(i), TokenKind::RParen) {
                    loop {
                        let TokenKind::Ident(name) = self.cursor.peek_kind(i) else {
                            return None;
                        };
                        params.push(name.clone());
                        i += 1;
                        match self.cursor.peek_kind(i) {
                            TokenKind::Comma => i += 1,
                            TokenKind::RParen => break,
                            _ => return None,
                        }
                    }
                }
                // `i` is at the closing paren.
                if matches!(self.cursor.peek_kind(i + 1), TokenKind::Arrow) {
                    Some((params, i + 2))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(super) fn parse_lambda(
        &mut self,
        (params, header_len): (Vec<Name>, usize),
    ) -> Result<Node, ParseError> {
        for _ in 0..header_len {
            self.cursor.advance();
        }
        let body = self.parse_assignment()?;
        Ok(Node::lambda(params, body))
    }

    /// A value prefix followed by any number of suffixes.
    pub(super) fn parse_value(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_prefix()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    let name = self.cursor.expect_ident()?;
                    node = Node::member(node, name);
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let key = self.parse_expr()?;
                    self.cursor.expect(&TokenKind::RBracket)?;
                    node = Node::index(node, key);
                }
                TokenKind::LParen => {
                    let args = self.parse_args()?;
                    node = Node::call(node, args);
                }
                _ => return Ok(node),
            }
        }
    }

    fn parse_prefix(&mut self) -> Result<Node, ParseError> {
        let token = self.cursor.current();
        let node = match &token.kind {
            TokenKind::Int(n) => Node::int(*n),
            TokenKind::BigInt(digits) => Node::Number(NumberLiteral::BigInteger(digits.clone())),
            TokenKind::Float(bits) => Node::Number(NumberLiteral::Float(*bits)),
            TokenKind::String(s) => Node::String(s.clone()),
            TokenKind::True => Node::Bool(true),
            TokenKind::False => Node::Bool(false),
            TokenKind::Null => Node::Null,
            TokenKind::Ident(_) => return self.parse_identifier(),
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.cursor.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => return self.parse_list(),
            TokenKind::LBrace => return self.parse_set_or_map(),
            other => {
                return Err(ParseError::ExpectedExpression {
                    found: other.display_name().to_string(),
                    span: token.span,
                })
            }
        };
        self.cursor.advance();
        Ok(node)
    }

    /// Identifier, or `ns:name` when written without spaces and followed
    /// by an argument list.
    fn parse_identifier(&mut self) -> Result<Node, ParseError> {
        let first = self.cursor.current();
        let name = self.cursor.expect_ident()?;

        let colon = self.cursor.peek_token(0);
        let local = self.cursor.peek_token(1);
        let qualified = matches!(colon.kind, TokenKind::Colon)
            && matches!(local.kind, TokenKind::Ident(_))
            && matches!(self.cursor.peek_kind(2), TokenKind::LParen)
            && Cursor::spans_adjacent(first.span, colon.span)
            && Cursor::spans_adjacent(colon.span, local.span);

        if qualified {
            self.cursor.advance();
            let local_name = self.cursor.expect_ident()?;
            return Ok(Node::ident(format!("{name}:{local_name}")));
        }
        Ok(Node::Identifier(name))
    }

    /// `( args )`
    fn parse_args(&mut self) -> Result<Vec<Node>, ParseError> {
        self.cursor.expect(&TokenKind::LParen)?;
        let args = self.parse_comma_list(&TokenKind::RParen)?;
        self.cursor.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_list(&mut self) -> Result<Node, ParseError> {
        self.cursor.expect(&TokenKind::LBracket)?;
        let items = self.parse_comma_list(&TokenKind::RBracket)?;
        self.cursor.expect(&TokenKind::RBracket)?;
        Ok(Node::List(items))
    }

    /// `{}` and `{a, b}` are sets; `{k: v, ...}` is a map.
    fn parse_set_or_map(&mut self) -> Result<Node, ParseError> {
        self.cursor.expect(&TokenKind::LBrace)?;
        if self.cursor.eat(&TokenKind::RBrace) {
            return Ok(Node::Set(Vec::new()));
        }

        let first = self.parse_assignment()?;
        if !self.cursor.eat(&TokenKind::Colon) {
            let mut items = vec![first];
            while self.cursor.eat(&TokenKind::Comma) {
                items.push(self.parse_assignment()?);
            }
            self.cursor.expect(&TokenKind::RBrace)?;
            return Ok(Node::Set(items));
        }

        let mut entries = vec![(first, self.parse_assignment()?)];
        while self.cursor.eat(&TokenKind::Comma) {
            let key = self.parse_assignment()?;
            self.cursor.expect(&TokenKind::Colon)?;
            let value = self.parse_assignment()?;
            entries.push((key, value));
        }
        self.cursor.expect(&TokenKind::RBrace)?;
        Ok(Node::Map(entries))
    }

    /// Comma-separated expressions up to (not including) `close`.
    fn parse_comma_list(&mut self, close: &TokenKind) -> Result<Vec<Node>, ParseError> {
        let mut items = Vec::new();
        if self.cursor.check(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_assignment()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                return Ok(items);
            }
        }
    }
}
