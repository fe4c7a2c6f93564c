//! Parse errors.

use el_ir::Span;
use el_lexer::LexError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at {span}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("expected expression, found {found} at {span}")]
    ExpectedExpression { found: String, span: Span },

    #[error("expression mixes ${{...}} and #{{...}} segments")]
    MixedDelimiters,
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::ExpectedExpression { span, .. } => *span,
            ParseError::MixedDelimiters => Span::DUMMY,
        }
    }
}
