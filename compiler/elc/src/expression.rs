//! Compiled value expressions.

use std::fmt;
use std::sync::Arc;

use el_eval::{EvalContext, EvalError, EvalResult, Value, ValueReference, ValueType};
use el_ir::Node;
use el_parse::{CompiledTemplate, TemplateKind};

/// A compiled expression plus the type its value is coerced to.
///
/// Holds no evaluation state: the same expression can be evaluated against
/// any number of contexts, one evaluation per context at a time.
#[derive(Clone, Debug)]
pub struct ValueExpression {
    source: Arc<str>,
    compiled: Arc<CompiledTemplate>,
    expected: ValueType,
}

impl ValueExpression {
    pub(crate) fn new(source: &str, compiled: Arc<CompiledTemplate>, expected: ValueType) -> Self {
        ValueExpression {
            source: Arc::from(source),
            compiled,
            expected,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node(&self) -> &Node {
        &self.compiled.node
    }

    pub fn expected_type(&self) -> &ValueType {
        &self.expected
    }

    /// True when the text had no `${}` or `#{}` segment.
    pub fn is_literal_text(&self) -> bool {
        self.compiled.kind == TemplateKind::Literal
    }

    /// True when the text used `#{}` delimiters.
    pub fn is_deferred(&self) -> bool {
        self.compiled.kind == TemplateKind::Deferred
    }

    /// Evaluate and coerce to the expected type.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %self.source))]
    pub fn get_value(&self, ctx: &mut EvalContext) -> EvalResult {
        ctx.eval_as(self.node(), &self.expected)
    }

    /// The type an assignment to this expression would have to produce.
    pub fn get_type(&self, ctx: &mut EvalContext) -> Result<ValueType, EvalError> {
        ctx.get_type(self.node())
    }

    pub fn is_read_only(&self, ctx: &mut EvalContext) -> Result<bool, EvalError> {
        ctx.is_read_only(self.node())
    }

    /// Assign `value` to the property this expression names.
    ///
    /// Only identifiers and member accesses are assignable; anything else
    /// raises `PropertyNotWritable`.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %self.source))]
    pub fn set_value(&self, ctx: &mut EvalContext, value: Value) -> Result<(), EvalError> {
        ctx.set_value(self.node(), value)
    }

    /// The `(base, property)` pair this expression resolves against, if it
    /// names one.
    pub fn value_reference(
        &self,
        ctx: &mut EvalContext,
    ) -> Result<Option<ValueReference>, EvalError> {
        ctx.value_reference(self.node())
    }
}

impl fmt::Display for ValueExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Equal when compiled from the same text; the expected type does not
/// take part.
impl PartialEq for ValueExpression {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for ValueExpression {}
