//! Runtime values.
//!
//! # Heap values
//!
//! Immutable payloads (strings, big numbers) live in `Heap<T>`; collections
//! live in `Shared<T>` so assignment through one handle is visible through
//! all of them. Both constructors are private: build values with the
//! factory methods (`Value::string`, `Value::list`, ...).
//!
//! # Equality
//!
//! `PartialEq` is natural equality, as `Object.equals` would define it:
//! `Long(1)` and `Int(1)` differ, doubles compare by bit pattern. The `==`
//! operator's coercing equality lives in the evaluator.

mod heap;
mod map;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::bean::Bean;
use crate::class::{ClassDef, EnumValue};
use crate::format::{format_big_decimal, format_double, format_float};
use crate::lambda::LambdaValue;
use crate::types::{Primitive, ValueType};

pub use heap::{Heap, Shared};
pub use map::ValueMap;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInteger(Heap<BigInt>),
    BigDecimal(Heap<BigDecimal>),
    Str(Heap<str>),
    Enum(EnumValue),
    /// A class reference produced by the import handler (`Math`,
    /// `Integer`, an enum class).
    Class(Arc<ClassDef>),
    List(Shared<Vec<Value>>),
    /// Insertion-ordered, duplicate-free.
    Set(Shared<Vec<Value>>),
    Map(Shared<ValueMap>),
    Array(ArrayValue),
    Bean(Arc<dyn Bean>),
    Lambda(LambdaValue),
}

/// Fixed-length array with a component type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ArrayValue {
    component: ValueType,
    items: Shared<Vec<Value>>,
}

impl ArrayValue {
    pub fn component(&self) -> &ValueType {
        &self.component
    }

    pub fn items(&self) -> &Shared<Vec<Value>> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

/// An assignable location: the (base, property) pair a member access
/// resolves against. A `Null` base denotes a top-level identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueReference {
    pub base: Value,
    pub property: Value,
}

impl Value {
    // Factory methods

    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Heap(Arc::from(s.as_ref())))
    }

    #[inline]
    pub fn big_integer(n: BigInt) -> Self {
        Value::BigInteger(Heap::new(n))
    }

    #[inline]
    pub fn big_decimal(d: BigDecimal) -> Self {
        Value::BigDecimal(Heap::new(d))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Shared::new(items))
    }

    /// A set; later duplicates are dropped.
    pub fn set(items: Vec<Value>) -> Self {
        let mut unique: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(Shared::new(unique))
    }

    #[inline]
    pub fn map(map: ValueMap) -> Self {
        Value::Map(Shared::new(map))
    }

    pub fn array(component: ValueType, items: Vec<Value>) -> Self {
        Value::Array(ArrayValue {
            component,
            items: Shared::new(items),
        })
    }

    #[inline]
    pub fn bean(bean: impl Bean + 'static) -> Self {
        Value::Bean(Arc::new(bean))
    }

    #[inline]
    pub fn class(class: ClassDef) -> Self {
        Value::Class(Arc::new(class))
    }

    // Inspection

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// `Number` in Java terms: any primitive numeric or big number.
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Byte(_)
                | Value::Short(_)
                | Value::Int(_)
                | Value::Long(_)
                | Value::Float(_)
                | Value::Double(_)
                | Value::BigInteger(_)
                | Value::BigDecimal(_)
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, Value::Float(_) | Value::Double(_))
    }

    /// Byte, Short, Int or Long.
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Value::Byte(_) | Value::Short(_) | Value::Int(_) | Value::Long(_)
        )
    }

    /// Get the type name of this value.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "Boolean",
            Value::Char(_) => "Character",
            Value::Byte(_) => "Byte",
            Value::Short(_) => "Short",
            Value::Int(_) => "Integer",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::BigInteger(_) => "BigInteger",
            Value::BigDecimal(_) => "BigDecimal",
            Value::Str(_) => "String",
            Value::Enum(e) => e.ty().name(),
            Value::Class(_) => "Class",
            Value::List(_) => "List",
            Value::Set(_) => "Set",
            Value::Map(_) => "Map",
            Value::Array(_) => "Array",
            Value::Bean(b) => b.class_name(),
            Value::Lambda(_) => "LambdaExpression",
        }
    }

    /// The runtime type, as a coercion target. `Null` reports `Any`.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Any,
            Value::Bool(_) => ValueType::Boxed(Primitive::Boolean),
            Value::Char(_) => ValueType::Boxed(Primitive::Char),
            Value::Byte(_) => ValueType::Boxed(Primitive::Byte),
            Value::Short(_) => ValueType::Boxed(Primitive::Short),
            Value::Int(_) => ValueType::Boxed(Primitive::Int),
            Value::Long(_) => ValueType::Boxed(Primitive::Long),
            Value::Float(_) => ValueType::Boxed(Primitive::Float),
            Value::Double(_) => ValueType::Boxed(Primitive::Double),
            Value::BigInteger(_) => ValueType::BigInteger,
            Value::BigDecimal(_) => ValueType::BigDecimal,
            Value::Str(_) => ValueType::String,
            Value::Enum(e) => ValueType::Enum(Arc::clone(e.ty())),
            Value::Class(_) => ValueType::Class("Class".into()),
            Value::List(_) => ValueType::List,
            Value::Set(_) => ValueType::Set,
            Value::Map(_) => ValueType::Map,
            Value::Array(_) => ValueType::Array,
            Value::Bean(b) => ValueType::Class(b.class_name().into()),
            Value::Lambda(_) => ValueType::Lambda,
        }
    }

    /// Elements of a list, set or array, in order.
    pub fn collection_items(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) | Value::Set(items) => Some(items.read().clone()),
            Value::Array(array) => Some(array.items().read().clone()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::BigInteger(a), Value::BigInteger(b)) => a == b,
            (Value::BigDecimal(a), Value::BigDecimal(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.items.ptr_eq(&b.items),
            (Value::Bean(a), Value::Bean(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            (Value::Lambda(a), Value::Lambda(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::Byte(n) => n.hash(state),
            Value::Short(n) => n.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Long(n) => n.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Double(f) => f.to_bits().hash(state),
            Value::BigInteger(n) => n.hash(state),
            Value::BigDecimal(d) => d.hash(state),
            Value::Str(s) => s.hash(state),
            Value::Enum(e) => {
                e.ty().name().hash(state);
                e.ordinal().hash(state);
            }
            Value::Class(c) => c.qualified_name().hash(state),
            Value::List(items) | Value::Set(items) => items.hash(state),
            Value::Map(map) => map.hash(state),
            Value::Array(array) => Arc::as_ptr(&array.items.0).hash(state),
            Value::Bean(bean) => Arc::as_ptr(bean).cast::<()>().hash(state),
            Value::Lambda(lambda) => Arc::as_ptr(lambda.body()).hash(state),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

/// Natural string form (`toString`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Byte(n) => write!(f, "{n}"),
            Value::Short(n) => write!(f, "{n}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Long(n) => write!(f, "{n}"),
            Value::Float(n) => f.write_str(&format_float(*n)),
            Value::Double(n) => f.write_str(&format_double(*n)),
            Value::BigInteger(n) => write!(f, "{}", &**n),
            Value::BigDecimal(d) => f.write_str(&format_big_decimal(d)),
            Value::Str(s) => f.write_str(s),
            Value::Enum(e) => f.write_str(e.name()),
            Value::Class(c) => write!(f, "class {}", c.qualified_name()),
            Value::List(items) | Value::Set(items) => write_items(f, &items.read()),
            Value::Array(array) => write_items(f, &array.items.read()),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                write!(f, "}}")
            }
            Value::Bean(bean) => f.write_str(&bean.describe()),
            Value::Lambda(lambda) => {
                write!(f, "LambdaExpression({})", lambda.params().join(", "))
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Enum(e) => write!(f, "Enum({e:?})"),
            Value::Lambda(l) => write!(f, "{l:?}"),
            other => write!(f, "{}({other})", other.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
