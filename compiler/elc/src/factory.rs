//! Expression factory: source text in, reusable [`ValueExpression`] out.

use std::fmt;
use std::sync::Arc;

use el_eval::errors::parse_error;
use el_eval::{EvalError, ValueType};
use el_parse::CompiledTemplate;
use tracing::debug;

use crate::cache::{ConcurrentCache, ExpressionCache, NoCache};
use crate::expression::ValueExpression;

/// Compiles expression text through an injected cache.
#[derive(Clone)]
pub struct ExpressionFactory {
    cache: Arc<dyn ExpressionCache>,
}

impl ExpressionFactory {
    pub fn new(cache: Arc<dyn ExpressionCache>) -> Self {
        ExpressionFactory { cache }
    }

    /// A factory that compiles every request afresh.
    pub fn uncached() -> Self {
        Self::new(Arc::new(NoCache))
    }

    pub fn cache(&self) -> &Arc<dyn ExpressionCache> {
        &self.cache
    }

    /// Compile template text such as `Hello ${name}` or `#{a.b}`.
    ///
    /// Lex and parse failures, including templates that mix `${}` and `#{}`,
    /// come back as `Evaluation` errors.
    pub fn compile(&self, text: &str) -> Result<Arc<CompiledTemplate>, EvalError> {
        if let Some(hit) = self.cache.get(text) {
            return Ok(hit);
        }
        let compiled = el_parse::compile_str(text).map_err(parse_error)?;
        debug!(kind = ?compiled.kind, "compiled expression");
        Ok(self.cache.insert(text, compiled))
    }

    /// Compile `text` into an expression whose value is coerced to
    /// `expected`.
    pub fn create_value_expression(
        &self,
        text: &str,
        expected: ValueType,
    ) -> Result<ValueExpression, EvalError> {
        let compiled = self.compile(text)?;
        Ok(ValueExpression::new(text, compiled, expected))
    }
}

impl Default for ExpressionFactory {
    fn default() -> Self {
        Self::new(Arc::new(ConcurrentCache::new()))
    }
}

impl fmt::Debug for ExpressionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionFactory")
            .field("cached", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
