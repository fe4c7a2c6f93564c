//! EL Eval - tree-walking evaluator for EL expressions.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `EvalContext`: per-evaluation state (resolver chain, mappers, imports,
//!   converters, lambda scopes); node evaluation is implemented on it
//! - `coerce`: the type coercion engine every typed boundary goes through
//! - `evaluate_binary` / `evaluate_unary`: numeric tower and relational
//!   dispatch
//! - `PropertyResolver`: the resolver chain, one implementation per family
//!   of base values, combined by `CompositeResolver`
//!
//! # Re-exports
//!
//! Value types from `el_value` are re-exported for convenience:
//! - `Value`, `ValueType`, `Primitive`, `LambdaValue`, `NativeFunction`
//! - `EvalError`, `EvalResult`

mod coerce;
mod context;
mod converters;
mod environment;
mod imports;
mod mappers;
mod operators;
pub mod resolvers;

pub use coerce::{coerce, to_boolean, to_text};
pub use context::{EvalContext, EvalContextBuilder, ScopedContext};
pub use converters::{Converter, ConverterRegistry};
pub use environment::{LambdaScope, LambdaScopes};
pub use imports::ImportHandler;
pub use mappers::{FunctionMapper, VariableBinding, VariableMapper};
pub use operators::{compare, equals, evaluate_binary, evaluate_unary, is_empty, ConversionType};
pub use resolvers::{
    BeanRegistry, CompositeResolver, PropertyResolver, Resolution, ResolveResult, ResolverOptions,
};

pub use el_value::{
    errors, Bean, ClassDef, DynamicBean, EnumType, ErrorCategory, EvalError, EvalResult,
    LambdaValue, NativeFunction, Primitive, Value, ValueReference, ValueType,
};
