//! Coercion targets.

use std::fmt;
use std::sync::Arc;

use el_ir::Name;

use crate::class::EnumType;
use crate::value::Value;

/// Primitive kinds. Paired with [`ValueType::Primitive`] (no null) or
/// [`ValueType::Boxed`] (nullable wrapper).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    /// The value `null` coerces to for this primitive.
    pub fn zero(self) -> Value {
        match self {
            Primitive::Boolean => Value::Bool(false),
            Primitive::Char => Value::Char('\0'),
            Primitive::Byte => Value::Byte(0),
            Primitive::Short => Value::Short(0),
            Primitive::Int => Value::Int(0),
            Primitive::Long => Value::Long(0),
            Primitive::Float => Value::Float(0.0),
            Primitive::Double => Value::Double(0.0),
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Primitive::Boolean | Primitive::Char)
    }

    pub const fn primitive_name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Char => "char",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    pub const fn boxed_name(self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Char => "Character",
            Primitive::Byte => "Byte",
            Primitive::Short => "Short",
            Primitive::Int => "Integer",
            Primitive::Long => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
        }
    }
}

/// A type a value can be coerced to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `void`: nothing converts to it.
    Void,
    /// `Object`: every value passes through unchanged.
    Any,
    Primitive(Primitive),
    Boxed(Primitive),
    BigInteger,
    BigDecimal,
    String,
    Enum(Arc<EnumType>),
    List,
    Set,
    Map,
    Array,
    Lambda,
    /// Any other class, by name. Strings reach it through a registered
    /// converter.
    Class(Name),
}

impl ValueType {
    pub const BOOLEAN: ValueType = ValueType::Boxed(Primitive::Boolean);
    pub const LONG: ValueType = ValueType::Boxed(Primitive::Long);
    pub const DOUBLE: ValueType = ValueType::Boxed(Primitive::Double);

    /// True for types that accept `null`.
    pub fn is_nullable(&self) -> bool {
        !matches!(self, ValueType::Primitive(_) | ValueType::Void)
    }

    /// The primitive behind a primitive or boxed type.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            ValueType::Primitive(p) | ValueType::Boxed(p) => Some(*p),
            _ => None,
        }
    }

    /// True for the numeric tower: byte through double plus the big types.
    pub fn is_numeric(&self) -> bool {
        match self {
            ValueType::Primitive(p) | ValueType::Boxed(p) => p.is_numeric(),
            ValueType::BigInteger | ValueType::BigDecimal => true,
            _ => false,
        }
    }

    /// Look up a type by the name users write (`int`, `Integer`, `String`,
    /// `java.lang.Long`, ...).
    pub fn from_name(name: &str) -> Option<ValueType> {
        let simple = name.strip_prefix("java.lang.").unwrap_or(name);
        let simple = simple.strip_prefix("java.math.").unwrap_or(simple);
        let ty = match simple {
            "void" => ValueType::Void,
            "Object" => ValueType::Any,
            "boolean" => ValueType::Primitive(Primitive::Boolean),
            "char" => ValueType::Primitive(Primitive::Char),
            "byte" => ValueType::Primitive(Primitive::Byte),
            "short" => ValueType::Primitive(Primitive::Short),
            "int" => ValueType::Primitive(Primitive::Int),
            "long" => ValueType::Primitive(Primitive::Long),
            "float" => ValueType::Primitive(Primitive::Float),
            "double" => ValueType::Primitive(Primitive::Double),
            "Boolean" => ValueType::Boxed(Primitive::Boolean),
            "Character" => ValueType::Boxed(Primitive::Char),
            "Byte" => ValueType::Boxed(Primitive::Byte),
            "Short" => ValueType::Boxed(Primitive::Short),
            "Integer" => ValueType::Boxed(Primitive::Int),
            "Long" => ValueType::Boxed(Primitive::Long),
            "Float" => ValueType::Boxed(Primitive::Float),
            "Double" => ValueType::Boxed(Primitive::Double),
            "BigInteger" => ValueType::BigInteger,
            "BigDecimal" => ValueType::BigDecimal,
            "String" => ValueType::String,
            "List" => ValueType::List,
            "Set" => ValueType::Set,
            "Map" => ValueType::Map,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Void => f.write_str("void"),
            ValueType::Any => f.write_str("Object"),
            ValueType::Primitive(p) => f.write_str(p.primitive_name()),
            ValueType::Boxed(p) => f.write_str(p.boxed_name()),
            ValueType::BigInteger => f.write_str("BigInteger"),
            ValueType::BigDecimal => f.write_str("BigDecimal"),
            ValueType::String => f.write_str("String"),
            ValueType::Enum(ty) => f.write_str(ty.name()),
            ValueType::List => f.write_str("List"),
            ValueType::Set => f.write_str("Set"),
            ValueType::Map => f.write_str("Map"),
            ValueType::Array => f.write_str("Array"),
            ValueType::Lambda => f.write_str("LambdaExpression"),
            ValueType::Class(name) => f.write_str(name),
        }
    }
}
