//! Property resolution chain.
//!
//! Each [`PropertyResolver`] handles one family of base values and answers
//! [`Resolution::Unresolved`] for everything else. The [`CompositeResolver`]
//! asks its children in order and stops at the first one that resolves, so
//! a later resolver is never consulted for a pair an earlier one claimed.
//!
//! # Resolution Order
//!
//! The standard chain ([`CompositeResolver::standard`]) is:
//! 1. `BeanNameResolver`: `null` base, named beans
//! 2. `StaticFieldResolver`: imported classes
//! 3. `MapResolver`, `ListResolver`, `ArrayResolver`
//! 4. `StreamResolver`: stream-style methods on collections
//! 5. `StringMethodResolver`: methods on strings
//! 6. `BeanResolver`: properties and methods of host beans
//!
//! The chain never raises "not found" itself; the evaluator turns an
//! unresolved answer into `PropertyNotFound` or `MethodNotFound`.

mod array;
mod bean;
mod bean_name;
mod list;
mod map;
mod static_field;
mod stream;
mod string;

pub use array::ArrayResolver;
pub use bean::BeanResolver;
pub use bean_name::{BeanNameResolver, BeanRegistry};
pub use list::ListResolver;
pub use map::MapResolver;
pub use static_field::StaticFieldResolver;
pub use stream::StreamResolver;
pub use string::StringMethodResolver;

use std::sync::Arc;

use el_value::{EvalError, Value, ValueType};
use tracing::trace;

use crate::context::EvalContext;

/// Outcome of asking one resolver about one (base, property) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<T> {
    /// The resolver handled the pair; its answer may still be `null`.
    Resolved(T),
    /// The pair is not this resolver's to handle.
    Unresolved,
}

impl<T> Resolution<T> {
    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Resolved(value) => Resolution::Resolved(f(value)),
            Resolution::Unresolved => Resolution::Unresolved,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Unresolved => None,
        }
    }
}

pub type ResolveResult<T> = Result<Resolution<T>, EvalError>;

/// Property and method access for one family of base values.
///
/// Every operation receives the evaluation context so resolvers can coerce
/// values and invoke lambdas. A resolver that answers `Resolved` commits to
/// the pair: it must either complete the operation or return an error.
pub trait PropertyResolver: Send + Sync {
    /// Name for tracing output.
    fn name(&self) -> &'static str;

    fn get_value(&self, ctx: &mut EvalContext, base: &Value, property: &Value)
        -> ResolveResult<Value>;

    fn get_type(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<ValueType>;

    fn set_value(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
        value: &Value,
    ) -> ResolveResult<()>;

    fn is_read_only(&self, ctx: &mut EvalContext, base: &Value, property: &Value)
        -> ResolveResult<bool>;

    /// Call `method` on `base`. Most resolvers only handle properties.
    fn invoke(
        &self,
        _ctx: &mut EvalContext,
        _base: &Value,
        _method: &str,
        _args: &[Value],
    ) -> ResolveResult<Value> {
        Ok(Resolution::Unresolved)
    }
}

/// Which standard resolvers accept writes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Reject every write with `PropertyNotWritable`.
    pub read_only: bool,
    /// Assigning to an unknown top-level identifier defines a new bean.
    pub allow_bean_creation: bool,
}

/// An ordered list of resolvers tried first to last.
#[derive(Clone, Default)]
pub struct CompositeResolver {
    resolvers: Arc<Vec<Arc<dyn PropertyResolver>>>,
}

impl CompositeResolver {
    pub fn new(resolvers: Vec<Arc<dyn PropertyResolver>>) -> Self {
        CompositeResolver {
            resolvers: Arc::new(resolvers),
        }
    }

    /// The standard chain over `beans`.
    pub fn standard(beans: BeanRegistry, options: ResolverOptions) -> Self {
        let read_only = options.read_only;
        CompositeResolver::new(vec![
            Arc::new(BeanNameResolver::new(beans, options)),
            Arc::new(StaticFieldResolver),
            Arc::new(MapResolver::new(read_only)),
            Arc::new(ListResolver::new(read_only)),
            Arc::new(ArrayResolver::new(read_only)),
            Arc::new(StreamResolver),
            Arc::new(StringMethodResolver),
            Arc::new(BeanResolver::new(read_only)),
        ])
    }

    /// A new chain with `resolver` tried before this one's resolvers.
    #[must_use]
    pub fn with_first(&self, resolver: Arc<dyn PropertyResolver>) -> Self {
        let mut resolvers = Vec::with_capacity(self.resolvers.len() + 1);
        resolvers.push(resolver);
        resolvers.extend(self.resolvers.iter().cloned());
        CompositeResolver::new(resolvers)
    }

    pub fn resolvers(&self) -> &[Arc<dyn PropertyResolver>] {
        &self.resolvers
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    fn first<T>(
        &self,
        op: &'static str,
        mut attempt: impl FnMut(&dyn PropertyResolver) -> ResolveResult<T>,
    ) -> ResolveResult<T> {
        for resolver in self.resolvers.iter() {
            if let Resolution::Resolved(answer) = attempt(resolver.as_ref())? {
                trace!(resolver = resolver.name(), op, "resolved");
                return Ok(Resolution::Resolved(answer));
            }
        }
        trace!(op, "unresolved");
        Ok(Resolution::Unresolved)
    }
}

impl PropertyResolver for CompositeResolver {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn get_value(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<Value> {
        self.first("get_value", |r| r.get_value(ctx, base, property))
    }

    fn get_type(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<ValueType> {
        self.first("get_type", |r| r.get_type(ctx, base, property))
    }

    fn set_value(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
        value: &Value,
    ) -> ResolveResult<()> {
        self.first("set_value", |r| r.set_value(ctx, base, property, value))
    }

    fn is_read_only(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<bool> {
        self.first("is_read_only", |r| r.is_read_only(ctx, base, property))
    }

    fn invoke(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        method: &str,
        args: &[Value],
    ) -> ResolveResult<Value> {
        self.first("invoke", |r| r.invoke(ctx, base, method, args))
    }
}

impl std::fmt::Debug for CompositeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.resolvers.iter().map(|r| r.name()))
            .finish()
    }
}

/// Interpret `property` as a list or array index.
///
/// Integral numbers, characters, booleans (`1`/`0`) and decimal text are
/// accepted.
pub(crate) fn index_of(property: &Value) -> Result<i64, EvalError> {
    match property {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Str(_) | Value::Char(_) => crate::coerce::to_i64(property),
        other if other.is_number() => crate::coerce::to_i64(other),
        other => Err(el_value::errors::cannot_convert(other, "int")),
    }
}

/// `index` as a position in a sequence of `len` elements.
pub(crate) fn checked_index(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|i| *i < len)
}

#[cfg(test)]
mod tests;
