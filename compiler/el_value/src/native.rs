//! Externally registered functions.

use std::fmt;
use std::sync::Arc;

use el_ir::Name;

use crate::errors::EvalResult;
use crate::types::ValueType;
use crate::value::Value;

/// Host callback. Receives arguments already coerced to the declared
/// parameter types.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> EvalResult + Send + Sync>;

/// A host function with a declared signature: the target of `ns:name(...)`
/// calls and of static methods on imported classes.
#[derive(Clone)]
pub struct NativeFunction {
    name: Name,
    params: Vec<ValueType>,
    varargs: bool,
    return_type: ValueType,
    body: NativeFn,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<Name>,
        params: Vec<ValueType>,
        body: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            params,
            varargs: false,
            return_type: ValueType::Any,
            body: Arc::new(body),
        }
    }

    /// Treat the last parameter as variadic: any number of trailing
    /// arguments are each coerced to its type.
    #[must_use]
    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    #[must_use]
    pub fn returns(mut self, ty: ValueType) -> Self {
        self.return_type = ty;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    pub fn return_type(&self) -> &ValueType {
        &self.return_type
    }

    /// Whether `argc` arguments fit this signature.
    pub fn accepts(&self, argc: usize) -> bool {
        if self.varargs {
            argc + 1 >= self.params.len()
        } else {
            argc == self.params.len()
        }
    }

    /// The declared type of argument `index`.
    pub fn param_type(&self, index: usize) -> &ValueType {
        match self.params.get(index) {
            Some(ty) => ty,
            None if self.varargs => self.params.last().unwrap_or(&ValueType::Any),
            None => &ValueType::Any,
        }
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.body)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("varargs", &self.varargs)
            .finish_non_exhaustive()
    }
}
