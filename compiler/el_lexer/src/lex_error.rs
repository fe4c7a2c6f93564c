//! Lexer errors.

use el_ir::Span;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character {ch:?} at {span}")]
    UnexpectedChar { ch: char, span: Span },
    #[error("unterminated string literal at {span}")]
    UnterminatedString { span: Span },
    #[error("invalid number literal `{text}` at {span}")]
    InvalidNumber { text: String, span: Span },
    #[error("unterminated expression starting at {span}")]
    UnterminatedExpression { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::InvalidNumber { span, .. }
            | LexError::UnterminatedExpression { span } => *span,
        }
    }

    /// Classify a slice logos refused to match.
    pub(crate) fn from_bad_slice(slice: &str, span: Span) -> Self {
        match slice.chars().next() {
            Some('"' | '\'') => LexError::UnterminatedString { span },
            Some(ch) => LexError::UnexpectedChar { ch, span },
            None => LexError::UnexpectedChar { ch: '\0', span },
        }
    }
}
