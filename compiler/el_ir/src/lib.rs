//! EL IR - intermediate representation types for the EL interpreter.
//!
//! This crate provides:
//! - `Node`: the immutable expression tree every later stage consumes
//! - `BinaryOp` / `UnaryOp`: operator enums shared by parser and evaluator
//! - `Token` / `TokenKind` / `TokenList`: lexer output
//! - `Span`: byte ranges into the source text
//!
//! Nodes carry no spans. Two compilations of the same text therefore produce
//! equal trees, which is what the compile cache relies on.

mod ast;
mod span;
mod token;

pub use ast::{BinaryOp, Name, Node, NumberLiteral, Property, UnaryOp};
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind, TokenList};
