//! Runtime values for the EL interpreter.
//!
//! - [`Value`]: everything an expression can evaluate to, modelled on the
//!   Java value set EL is defined over (boxed primitives, big numbers,
//!   strings, enums, collections, beans and lambdas).
//! - [`ValueType`]: coercion targets, distinguishing primitive from boxed.
//! - [`Bean`]: the capability trait standing in for reflective property and
//!   method access.
//! - [`EvalError`]: the single error type of evaluation, built through the
//!   factory functions in [`errors`].

mod bean;
mod class;
pub mod errors;
mod format;
mod lambda;
mod native;
mod types;
mod value;

pub use bean::{Bean, BeanMethod, DynamicBean};
pub use class::{ClassDef, EnumType, EnumValue};
pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalNote, EvalResult};
pub use format::{format_big_decimal, format_double, format_float};
pub use lambda::LambdaValue;
pub use native::{NativeFn, NativeFunction};
pub use types::{Primitive, ValueType};
pub use value::{ArrayValue, Heap, Shared, Value, ValueMap, ValueReference};

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
