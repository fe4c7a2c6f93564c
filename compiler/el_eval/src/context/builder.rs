//! `EvalContextBuilder` for assembling an [`EvalContext`] from optional
//! collaborators.

use std::sync::Arc;

use super::EvalContext;
use crate::converters::ConverterRegistry;
use crate::environment::LambdaScopes;
use crate::imports::ImportHandler;
use crate::mappers::{FunctionMapper, VariableMapper};
use crate::resolvers::PropertyResolver;

/// Builder for [`EvalContext`]. Every collaborator not supplied gets its
/// default: the standard resolver chain over an empty bean registry, empty
/// mappers, the `java.lang` imports, no converters.
#[derive(Default)]
pub struct EvalContextBuilder {
    resolver: Option<Arc<dyn PropertyResolver>>,
    variables: Option<VariableMapper>,
    functions: Option<FunctionMapper>,
    imports: Option<ImportHandler>,
    converters: Option<ConverterRegistry>,
}

impl EvalContextBuilder {
    pub fn new() -> Self {
        EvalContextBuilder::default()
    }

    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn PropertyResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn variables(mut self, variables: VariableMapper) -> Self {
        self.variables = Some(variables);
        self
    }

    #[must_use]
    pub fn functions(mut self, functions: FunctionMapper) -> Self {
        self.functions = Some(functions);
        self
    }

    #[must_use]
    pub fn imports(mut self, imports: ImportHandler) -> Self {
        self.imports = Some(imports);
        self
    }

    #[must_use]
    pub fn converters(mut self, converters: ConverterRegistry) -> Self {
        self.converters = Some(converters);
        self
    }

    pub fn build(self) -> EvalContext {
        EvalContext {
            resolver: self.resolver.unwrap_or_else(EvalContext::standard_resolver),
            variables: self.variables.unwrap_or_default(),
            functions: self.functions.unwrap_or_default(),
            imports: self.imports.unwrap_or_default(),
            converters: self.converters.unwrap_or_default(),
            lambda_scopes: LambdaScopes::new(),
        }
    }
}
