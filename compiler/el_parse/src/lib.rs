//! Parser for EL expressions.
//!
//! Parsing happens in two steps:
//! - [`parse_template`] turns source text into a [`ParsedTemplate`]: literal
//!   text segments plus `Dynamic`/`Deferred`-wrapped expression trees.
//! - [`compile`] folds a parsed template into exactly one [`Node`], rejecting
//!   templates that mix `${}` and `#{}` and removing the delimiter wrappers.
//!
//! [`compile_str`] runs both.

mod compile;
mod cursor;
mod error;
mod grammar;

use el_ir::{Node, TokenKind};
use el_lexer::Segment;

pub use compile::{compile, CompiledTemplate, TemplateKind};
pub use error::ParseError;

use cursor::Cursor;

/// Source text split into literal and expression segments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedTemplate {
    /// `Node::String` for literal text, `Node::Dynamic` / `Node::Deferred`
    /// for expression segments.
    pub segments: Vec<Node>,
}

/// Parse a bare expression body such as `a.b + 1`.
pub fn parse_expression(source: &str) -> Result<Node, ParseError> {
    let tokens = el_lexer::lex(source)?;
    let mut parser = Parser::new(Cursor::new(&tokens));
    parser.parse_complete()
}

/// Parse template text such as `Hello ${user.name}!`.
pub fn parse_template(source: &str) -> Result<ParsedTemplate, ParseError> {
    let mut segments = Vec::new();
    for segment in el_lexer::lex_template(source)? {
        match segment {
            Segment::Text(text) => segments.push(Node::string(text)),
            Segment::Expr {
                deferred, tokens, ..
            } => {
                let mut parser = Parser::new(Cursor::new(&tokens));
                let body = Box::new(parser.parse_complete()?);
                segments.push(if deferred {
                    Node::Deferred(body)
                } else {
                    Node::Dynamic(body)
                });
            }
        }
    }
    Ok(ParsedTemplate { segments })
}

/// Parse and compile template text in one step.
pub fn compile_str(source: &str) -> Result<CompiledTemplate, ParseError> {
    compile(parse_template(source)?)
}

/// Recursive-descent parser over one expression body.
pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    fn new(cursor: Cursor<'a>) -> Self {
        Parser { cursor }
    }

    /// Parse an expression that must consume every token.
    fn parse_complete(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_expr()?;
        if !self.cursor.check(&TokenKind::Eof) {
            return Err(self.cursor.unexpected("end of expression"));
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests;
