//! Call dispatch: methods, mapped functions, static imports and lambdas.

use std::sync::Arc;

use el_ir::{Name, Node, Property};
use el_value::errors::{method_not_found, not_callable, wrong_arg_count, wrong_lambda_args};
use el_value::{EvalError, EvalResult, LambdaValue, NativeFunction, Value};
use tracing::trace;

use super::EvalContext;
use crate::coerce::to_text;
use crate::resolvers::Resolution;

impl EvalContext {
    /// Dispatch on the callee's shape:
    /// - `base.method(args)` goes through the resolver chain's `invoke`
    /// - `name(args)` calls a lambda bound to `name`, else a mapped
    ///   function, else a statically imported method
    /// - any other callee (a lambda literal, a curried call) is evaluated
    ///   and must produce a lambda
    pub(super) fn eval_call(&mut self, callee: &Node, args: &[Node]) -> EvalResult {
        match callee {
            Node::Member { object, property } => {
                let base = self.eval(object)?;
                let method: Name = match property {
                    Property::Name(name) => Arc::clone(name),
                    Property::Expr(expr) => to_text(&self.eval(expr)?).into(),
                };
                let args = self.eval_all(args)?;
                if base.is_null() {
                    return Ok(Value::Null);
                }
                self.invoke_method(&base, &method, &args)
            }
            Node::Identifier(name) => {
                let args = self.eval_all(args)?;
                self.call_function(name, &args)
            }
            other => {
                let target = self.eval(other)?;
                let args = self.eval_all(args)?;
                match target {
                    Value::Lambda(lambda) => self.invoke_lambda(&lambda, &args),
                    other => Err(not_callable(other.type_name())),
                }
            }
        }
    }

    /// Invoke `method` on `base` through the resolver chain.
    pub fn invoke_method(&mut self, base: &Value, method: &str, args: &[Value]) -> EvalResult {
        let resolver = Arc::clone(&self.resolver);
        match resolver.invoke(self, base, method, args)? {
            Resolution::Resolved(value) => Ok(value),
            Resolution::Unresolved => Err(method_not_found(Some(base.type_name()), method)),
        }
    }

    fn call_function(&mut self, name: &Name, args: &[Value]) -> EvalResult {
        if let Some(lambda) = self.bound_lambda(name)? {
            return self.invoke_lambda(&lambda, args);
        }
        if let Some(function) = self.functions.resolve(name).cloned() {
            return self.call_native(&function, args);
        }
        let method = self
            .imports
            .resolve_static(name)
            .and_then(|class| class.method(name).cloned());
        if let Some(method) = method {
            return self.call_native(&method, args);
        }
        Err(method_not_found(None, name))
    }

    /// A lambda reachable through `name` as a lambda argument, a mapped
    /// variable or a bean.
    fn bound_lambda(&mut self, name: &Name) -> Result<Option<LambdaValue>, EvalError> {
        if name.contains(':') {
            return Ok(None);
        }
        let value = if let Some(value) = self.lambda_scopes.lookup(name) {
            Some(value.clone())
        } else if let Some(binding) = self.variables.resolve(name).cloned() {
            Some(self.eval_binding(&binding)?)
        } else {
            let resolver = Arc::clone(&self.resolver);
            resolver
                .get_value(self, &Value::Null, &Value::string(name))?
                .into_option()
        };
        Ok(match value {
            Some(Value::Lambda(lambda)) => Some(lambda),
            _ => None,
        })
    }

    /// Call a host function, coercing each argument to its declared
    /// parameter type and the result to the declared return type.
    #[tracing::instrument(level = "trace", skip_all, fields(function = function.name()))]
    pub fn call_native(&mut self, function: &NativeFunction, args: &[Value]) -> EvalResult {
        if !function.accepts(args.len()) {
            return Err(wrong_arg_count(
                function.name(),
                function.params().len(),
                args.len(),
            ));
        }
        let args = args
            .iter()
            .enumerate()
            .map(|(i, arg)| self.coerce(arg, function.param_type(i)))
            .collect::<Result<Vec<_>, _>>()?;
        let result = function.call(&args)?;
        self.coerce(&result, function.return_type())
    }

    /// Invoke `lambda` with `args` bound to its parameters.
    ///
    /// Extra arguments are ignored; too few is an error. The parameter scope
    /// is popped on every exit path.
    pub fn invoke_lambda(&mut self, lambda: &LambdaValue, args: &[Value]) -> EvalResult {
        let params = lambda.params();
        if args.len() < params.len() {
            return Err(wrong_lambda_args(params.len(), args.len()));
        }
        let mut bindings = lambda.captured().clone();
        bindings.extend(params.iter().cloned().zip(args.iter().cloned()));
        trace!(
            params = params.len(),
            depth = self.lambda_depth(),
            "invoke lambda"
        );
        let body = Arc::clone(lambda.body());
        self.with_lambda_scope(bindings, |scoped| scoped.eval(&body))
    }
}
