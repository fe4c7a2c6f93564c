//! Template scanning: literal text interleaved with `${...}` / `#{...}`.

use el_ir::{Span, TokenList};

use crate::{lex_body, LexError};

/// One piece of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Literal text with `\$` / `\#` escapes already applied.
    Text(String),
    /// An expression body. `deferred` is true for `#{...}`.
    Expr {
        deferred: bool,
        tokens: TokenList,
        span: Span,
    },
}

impl Segment {
    pub fn is_text(&self) -> bool {
        matches!(self, Segment::Text(_))
    }
}

/// Split `source` into segments.
///
/// Braces inside an expression body are balanced against the lexed token
/// stream, so `${ {1, 2} }` and `${'}'}` end at the right place.
pub fn lex_template(source: &str) -> Result<Vec<Segment>, LexError> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let bytes = source.as_bytes();
    let mut pos = 0;

    while pos < source.len() {
        let b = bytes[pos];
        let next = bytes.get(pos + 1).copied();

        if b == b'\\' && matches!(next, Some(b'$' | b'#')) {
            text.push(char::from(bytes[pos + 1]));
            pos += 2;
            continue;
        }

        if matches!(b, b'$' | b'#') && next == Some(b'{') {
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            let body_start = pos + 2;
            let base = Span::from_range(body_start..body_start).start;
            let (tokens, close) = lex_body(&source[body_start..], base, true).map_err(|e| {
                match e {
                    LexError::UnterminatedExpression { .. } => LexError::UnterminatedExpression {
                        span: Span::from_range(pos..source.len()),
                    },
                    other => other,
                }
            })?;
            let end = body_start + close.unwrap_or(source.len() - body_start);
            segments.push(Segment::Expr {
                deferred: b == b'#',
                tokens,
                span: Span::from_range(pos..end),
            });
            pos = end;
            continue;
        }

        // Advance one whole character; the markers above are all ASCII.
        let ch_len = source[pos..].chars().next().map_or(1, char::len_utf8);
        text.push_str(&source[pos..pos + ch_len]);
        pos += ch_len;
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}
