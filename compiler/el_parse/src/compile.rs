//! Template compilation: one parsed template in, one `Node` out.

use el_ir::Node;

use crate::{ParseError, ParsedTemplate};

/// Which delimiters a template used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// No expression segments at all.
    Literal,
    /// Only `${...}` segments.
    Dynamic,
    /// Only `#{...}` segments.
    Deferred,
}

/// A compiled template: a single delimiter-free tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompiledTemplate {
    pub node: Node,
    pub kind: TemplateKind,
}

/// Fold a parsed template into one node.
///
/// A single segment is returned unwrapped, so `${1 + 2}` keeps its numeric
/// result. Several segments fold left-to-right into `Concat` nodes, which
/// stringify both sides.
pub fn compile(parsed: ParsedTemplate) -> Result<CompiledTemplate, ParseError> {
    let has_deferred = parsed
        .segments
        .iter()
        .any(|s| matches!(s, Node::Deferred(_)));
    let has_dynamic = parsed
        .segments
        .iter()
        .any(|s| matches!(s, Node::Dynamic(_)));

    let kind = match (has_deferred, has_dynamic) {
        (true, true) => return Err(ParseError::MixedDelimiters),
        (true, false) => TemplateKind::Deferred,
        (false, true) => TemplateKind::Dynamic,
        (false, false) => TemplateKind::Literal,
    };

    let node = parsed
        .segments
        .into_iter()
        .map(Node::unwrap_delimiter)
        .reduce(Node::concat)
        .unwrap_or_else(|| Node::string(""));

    tracing::trace!(?kind, "compiled template");
    Ok(CompiledTemplate { node, kind })
}
