//! Standalone processor: evaluate bare expression strings against a set of
//! named beans without managing contexts or factories by hand.

use std::sync::Arc;

use el_eval::{
    BeanRegistry, ClassDef, CompositeResolver, EvalContext, EvalError, EvalResult,
    NativeFunction, PropertyResolver, ResolverOptions, Value, ValueType,
};
use tracing::debug;

use crate::cache::{ConcurrentCache, ExpressionCache, NoCache};
use crate::config::ProcessorConfig;
use crate::expression::ValueExpression;
use crate::factory::ExpressionFactory;

/// Evaluates expressions such as `customer.age + 1`.
///
/// Expressions are written without delimiters; the processor wraps them in
/// `${...}` before compiling.
#[derive(Debug)]
pub struct ElProcessor {
    config: ProcessorConfig,
    factory: ExpressionFactory,
    beans: BeanRegistry,
    context: EvalContext,
}

impl ElProcessor {
    pub fn new() -> Self {
        Self::with_config(ProcessorConfig::default())
    }

    pub fn with_config(config: ProcessorConfig) -> Self {
        let beans = BeanRegistry::new();
        let options = ResolverOptions {
            read_only: config.read_only,
            allow_bean_creation: config.allow_bean_creation,
        };
        let resolver: Arc<dyn PropertyResolver> =
            Arc::new(CompositeResolver::standard(beans.clone(), options));
        let cache: Arc<dyn ExpressionCache> = if config.cache {
            Arc::new(ConcurrentCache::new())
        } else {
            Arc::new(NoCache)
        };
        debug!(?config, "processor created");
        ElProcessor {
            config,
            factory: ExpressionFactory::new(cache),
            beans,
            context: EvalContext::builder().resolver(resolver).build(),
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn factory(&self) -> &ExpressionFactory {
        &self.factory
    }

    pub fn beans(&self) -> &BeanRegistry {
        &self.beans
    }

    pub fn context(&self) -> &EvalContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EvalContext {
        &mut self.context
    }

    /// Define or replace a top-level bean. Defining `null` removes it.
    pub fn define_bean(&self, name: &str, value: Value) {
        self.beans.define(name, value);
    }

    /// Bind `name` to `expression`, re-evaluated on every use and coerced
    /// to `expected`. Assigning to `name` writes through to the expression.
    pub fn define_variable(
        &mut self,
        name: &str,
        expression: &str,
        expected: ValueType,
    ) -> Result<(), EvalError> {
        let compiled = self.factory.compile(&bracket(expression))?;
        self.context
            .variables_mut()
            .bind_expression(name, Arc::new(compiled.node.clone()), expected);
        Ok(())
    }

    /// Make `function` callable as `prefix:name(...)`, or as `name(...)`
    /// when `prefix` is empty.
    pub fn define_function(&mut self, prefix: &str, name: &str, function: NativeFunction) {
        self.context
            .functions_mut()
            .map_function(prefix, name, function);
    }

    pub fn import_class(&mut self, class: ClassDef) -> Arc<ClassDef> {
        self.context.imports_mut().import_class(class)
    }

    pub fn import_package(&mut self, package: &str) {
        self.context.imports_mut().import_package(package);
    }

    /// Import `Class.member` so `member` resolves on its own.
    pub fn import_static(&mut self, member: &str) -> Result<(), EvalError> {
        self.context.imports_mut().import_static(member)
    }

    pub fn define_enum(&mut self, qualified_name: &str, constants: &[&str]) -> Arc<ClassDef> {
        self.context
            .imports_mut()
            .define_enum(qualified_name, constants.iter().copied())
    }

    /// Compile a bare expression into a reusable [`ValueExpression`].
    pub fn expression(
        &self,
        expression: &str,
        expected: ValueType,
    ) -> Result<ValueExpression, EvalError> {
        self.factory
            .create_value_expression(&bracket(expression), expected)
    }

    /// Evaluate `expression` without coercing the result.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn eval(&mut self, expression: &str) -> EvalResult {
        self.get_value(expression, ValueType::Any)
    }

    /// Evaluate `expression` and coerce the result to `expected`.
    pub fn get_value(&mut self, expression: &str, expected: ValueType) -> EvalResult {
        let expr = self.expression(expression, expected)?;
        expr.get_value(&mut self.context)
    }

    /// Assign `value` to the property `expression` names.
    pub fn set_value(&mut self, expression: &str, value: Value) -> Result<(), EvalError> {
        let expr = self.expression(expression, ValueType::Any)?;
        expr.set_value(&mut self.context, value)
    }
}

impl Default for ElProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn bracket(expression: &str) -> String {
    format!("${{{expression}}}")
}

#[cfg(test)]
mod tests;
