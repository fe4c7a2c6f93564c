//! Evaluation context.
//!
//! An [`EvalContext`] carries everything one evaluation consults: the
//! resolver chain, the variable and function mappers, the import handler,
//! the converter registry and the lambda argument stack. Node evaluation
//! lives in the submodules as inherent methods on the context.
//!
//! A context is single-threaded: the lambda stack is per-evaluation state.
//! Share the collaborators (they are cheap to clone) and build one context
//! per concurrent evaluation.

mod builder;
mod call;
mod eval;
mod scope_guard;

pub use builder::EvalContextBuilder;
pub use scope_guard::ScopedContext;

use std::sync::Arc;

use el_value::{EvalResult, Value, ValueType};

use crate::coerce::coerce;
use crate::converters::ConverterRegistry;
use crate::environment::LambdaScopes;
use crate::imports::ImportHandler;
use crate::mappers::{FunctionMapper, VariableMapper};
use crate::resolvers::{BeanRegistry, CompositeResolver, PropertyResolver, ResolverOptions};

pub struct EvalContext {
    resolver: Arc<dyn PropertyResolver>,
    variables: VariableMapper,
    functions: FunctionMapper,
    imports: ImportHandler,
    converters: ConverterRegistry,
    lambda_scopes: LambdaScopes,
}

impl Default for EvalContext {
    fn default() -> Self {
        EvalContextBuilder::new().build()
    }
}

impl EvalContext {
    /// A context over the standard resolver chain with a fresh bean
    /// registry.
    pub fn new() -> Self {
        EvalContext::default()
    }

    pub fn builder() -> EvalContextBuilder {
        EvalContextBuilder::new()
    }

    /// The resolver chain used when none is supplied.
    pub fn standard_resolver() -> Arc<dyn PropertyResolver> {
        Arc::new(CompositeResolver::standard(
            BeanRegistry::new(),
            ResolverOptions::default(),
        ))
    }

    pub fn resolver(&self) -> &Arc<dyn PropertyResolver> {
        &self.resolver
    }

    pub fn variables(&self) -> &VariableMapper {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableMapper {
        &mut self.variables
    }

    pub fn functions(&self) -> &FunctionMapper {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut FunctionMapper {
        &mut self.functions
    }

    pub fn imports(&self) -> &ImportHandler {
        &self.imports
    }

    pub fn imports_mut(&mut self) -> &mut ImportHandler {
        &mut self.imports
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn converters_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.converters
    }

    pub fn lambda_scopes(&self) -> &LambdaScopes {
        &self.lambda_scopes
    }

    /// Nesting depth of lambda invocations currently in progress.
    #[inline]
    pub fn lambda_depth(&self) -> usize {
        self.lambda_scopes.depth()
    }

    /// The innermost binding of lambda parameter `name`.
    pub fn lambda_argument(&self, name: &str) -> Option<&Value> {
        self.lambda_scopes.lookup(name)
    }

    /// Coerce `value` to `target` with this context's converters.
    #[inline]
    pub fn coerce(&self, value: &Value, target: &ValueType) -> EvalResult {
        coerce(value, target, &self.converters)
    }
}

impl std::fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvalContext")
            .field("resolver", &self.resolver.name())
            .field("variables", &self.variables.len())
            .field("functions", &self.functions.len())
            .field("lambda_depth", &self.lambda_scopes.depth())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
