//! Type coercion engine.
//!
//! [`coerce`] converts any runtime value to a requested [`ValueType`] along
//! the EL numeric tower. Primitive targets never produce `null`; boxed and
//! reference targets pass `null` through. Every failure is a `CannotConvert`
//! error naming the offending value and the target.
//!
//! The `to_*` helpers are the same conversions specialised for the operator
//! dispatch in [`crate::operators`].

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::BigDecimal;
use el_value::errors::cannot_convert;
use el_value::{EnumType, EvalError, EvalResult, Primitive, Value, ValueType};
use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, ToPrimitive};

use crate::converters::ConverterRegistry;

/// Convert `value` to `target`.
pub fn coerce(value: &Value, target: &ValueType, converters: &ConverterRegistry) -> EvalResult {
    match target {
        ValueType::Any => Ok(value.clone()),
        ValueType::Void => Err(cannot_convert(value, "void")),
        ValueType::String => Ok(Value::string(to_text(value))),
        ValueType::Primitive(p) if value.is_null() => Ok(p.zero()),
        ValueType::Primitive(p) | ValueType::Boxed(p) => {
            if value.is_null() {
                Ok(Value::Null)
            } else {
                coerce_primitive(value, *p)
            }
        }
        _ if value.is_null() => Ok(Value::Null),
        ValueType::BigInteger => to_big_integer(value).map(Value::big_integer),
        ValueType::BigDecimal => to_big_decimal(value).map(Value::big_decimal),
        ValueType::Enum(ty) => coerce_enum(value, ty),
        ValueType::List => instance(value, target, |v| matches!(v, Value::List(_))),
        ValueType::Set => instance(value, target, |v| matches!(v, Value::Set(_))),
        ValueType::Map => instance(value, target, |v| matches!(v, Value::Map(_))),
        ValueType::Array => instance(value, target, |v| matches!(v, Value::Array(_))),
        ValueType::Lambda => instance(value, target, |v| matches!(v, Value::Lambda(_))),
        ValueType::Class(name) => coerce_class(value, name, converters),
    }
}

/// Natural string form; `null` is the empty string.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Str(s) => s.to_string(),
        Value::Enum(e) => e.name().to_string(),
        other => other.to_string(),
    }
}

/// Boolean coercion: `null` and `""` are `false`, other text is compared
/// case-insensitively against `true`.
pub fn to_boolean(value: &Value) -> Result<bool, EvalError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Str(s) => Ok(s.eq_ignore_ascii_case("true")),
        other => Err(cannot_convert(other, "Boolean")),
    }
}

fn coerce_primitive(value: &Value, primitive: Primitive) -> EvalResult {
    match primitive {
        Primitive::Boolean => to_boolean(value).map(Value::Bool),
        Primitive::Char => to_char(value).map(Value::Char),
        Primitive::Byte
        | Primitive::Short
        | Primitive::Int
        | Primitive::Long
        | Primitive::Float
        | Primitive::Double => coerce_number(value, primitive),
    }
}

fn to_char(value: &Value) -> Result<char, EvalError> {
    match value {
        Value::Null => Ok('\0'),
        Value::Char(c) => Ok(*c),
        Value::Str(s) => Ok(s.chars().next().unwrap_or('\0')),
        other => {
            let Some(number) = Number::of(other) else {
                return Err(cannot_convert(other, "Character"));
            };
            let unit = u16::from_ne_bytes(number.to_i16().to_ne_bytes());
            char::from_u32(u32::from(unit)).ok_or_else(|| cannot_convert(other, "Character"))
        }
    }
}

/// Empty text becomes `0`, a character becomes its code unit, a boolean is
/// rejected. Everything else is returned unchanged.
fn normalize<'v>(value: &'v Value, target: &str) -> Result<Cow<'v, Value>, EvalError> {
    match value {
        Value::Str(s) if s.is_empty() => Ok(Cow::Owned(Value::Long(0))),
        Value::Char(c) => Ok(Cow::Owned(Value::Short(char_to_short(*c)))),
        Value::Bool(_) => Err(cannot_convert(value, target)),
        other => Ok(Cow::Borrowed(other)),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "a Java char is one UTF-16 unit; code points above it keep their low bits"
)]
fn char_to_short(c: char) -> i16 {
    u32::from(c) as i16
}

fn coerce_number(value: &Value, primitive: Primitive) -> EvalResult {
    let target = primitive.boxed_name();
    let value = normalize(value, target)?;
    if value.value_type() == ValueType::Boxed(primitive) {
        return Ok(value.into_owned());
    }
    if let Value::Str(text) = &*value {
        return parse_primitive(text, primitive).ok_or_else(|| cannot_convert(&value, target));
    }
    let Some(number) = Number::of(&value) else {
        return Err(cannot_convert(&value, target));
    };
    Ok(match primitive {
        Primitive::Byte => Value::Byte(number.to_i8()),
        Primitive::Short => Value::Short(number.to_i16()),
        Primitive::Int => Value::Int(number.to_i32()),
        Primitive::Long => Value::Long(number.to_i64()),
        Primitive::Float => Value::Float(number.to_f32()),
        Primitive::Double => Value::Double(number.to_f64()),
        Primitive::Boolean | Primitive::Char => return Err(cannot_convert(&value, target)),
    })
}

fn parse_primitive(text: &str, primitive: Primitive) -> Option<Value> {
    match primitive {
        Primitive::Byte => text.parse().ok().map(Value::Byte),
        Primitive::Short => text.parse().ok().map(Value::Short),
        Primitive::Int => text.parse().ok().map(Value::Int),
        Primitive::Long => text.parse().ok().map(Value::Long),
        Primitive::Float => float_text(text)?.parse().ok().map(Value::Float),
        Primitive::Double => float_text(text)?.parse().ok().map(Value::Double),
        Primitive::Boolean | Primitive::Char => None,
    }
}

/// Floating-point text the way Java's `Double.valueOf` accepts it:
/// surrounding whitespace and a trailing `d`/`f` type suffix are allowed.
fn float_text(text: &str) -> Option<&str> {
    let text = text.trim();
    let text = text
        .strip_suffix(['d', 'D', 'f', 'F'])
        .unwrap_or(text);
    (!text.is_empty()).then_some(text)
}

pub(crate) fn to_i64(value: &Value) -> Result<i64, EvalError> {
    let value = normalize(value, "Long")?;
    match &*value {
        Value::Null => Ok(0),
        Value::Str(s) => s.parse().map_err(|_| cannot_convert(&value, "Long")),
        other => Number::of(other)
            .map(|n| n.to_i64())
            .ok_or_else(|| cannot_convert(other, "Long")),
    }
}

pub(crate) fn to_f64(value: &Value) -> Result<f64, EvalError> {
    let value = normalize(value, "Double")?;
    match &*value {
        Value::Null => Ok(0.0),
        Value::Str(s) => float_text(s)
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| cannot_convert(&value, "Double")),
        other => Number::of(other)
            .map(|n| n.to_f64())
            .ok_or_else(|| cannot_convert(other, "Double")),
    }
}

pub(crate) fn to_big_integer(value: &Value) -> Result<BigInt, EvalError> {
    let value = normalize(value, "BigInteger")?;
    match &*value {
        Value::Null => Ok(BigInt::from(0)),
        Value::Str(s) => BigInt::from_str(s).map_err(|_| cannot_convert(&value, "BigInteger")),
        other => Number::of(other)
            .map(Number::into_big_integer)
            .ok_or_else(|| cannot_convert(other, "BigInteger")),
    }
}

pub(crate) fn to_big_decimal(value: &Value) -> Result<BigDecimal, EvalError> {
    let value = normalize(value, "BigDecimal")?;
    match &*value {
        Value::Null => Ok(BigDecimal::from(0)),
        Value::Str(s) => {
            BigDecimal::from_str(s.trim()).map_err(|_| cannot_convert(&value, "BigDecimal"))
        }
        other => Number::of(other)
            .and_then(Number::into_big_decimal)
            .ok_or_else(|| cannot_convert(other, "BigDecimal")),
    }
}

fn coerce_enum(value: &Value, ty: &Arc<EnumType>) -> EvalResult {
    match value {
        Value::Enum(e) if Arc::ptr_eq(e.ty(), ty) || e.ty().name() == ty.name() => {
            Ok(value.clone())
        }
        Value::Str(s) if s.is_empty() => Ok(Value::Null),
        other => ty
            .value_of(&to_text(other))
            .ok_or_else(|| cannot_convert(other, ty.name())),
    }
}

fn instance(value: &Value, target: &ValueType, is: impl Fn(&Value) -> bool) -> EvalResult {
    if is(value) {
        Ok(value.clone())
    } else {
        Err(cannot_convert(value, &target.to_string()))
    }
}

fn coerce_class(value: &Value, class_name: &str, converters: &ConverterRegistry) -> EvalResult {
    if is_instance_of(value, class_name) {
        return Ok(value.clone());
    }
    if let Value::Str(text) = value {
        if let Some(convert) = converters.get(class_name) {
            return convert(text);
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
    }
    Err(cannot_convert(value, class_name))
}

fn is_instance_of(value: &Value, class_name: &str) -> bool {
    let simple = class_name.rsplit('.').next().unwrap_or(class_name);
    match simple {
        "Number" => value.is_number(),
        "Comparable" => value.is_number() || matches!(value, Value::Str(_) | Value::Bool(_)),
        _ => value.type_name() == simple || value.type_name() == class_name,
    }
}

/// A numeric operand with the Java box stripped.
#[derive(Clone, Debug)]
enum Number {
    Integral(i64),
    Floating(f64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
}

impl Number {
    fn of(value: &Value) -> Option<Number> {
        Some(match value {
            Value::Byte(n) => Number::Integral(i64::from(*n)),
            Value::Short(n) => Number::Integral(i64::from(*n)),
            Value::Int(n) => Number::Integral(i64::from(*n)),
            Value::Long(n) => Number::Integral(*n),
            Value::Float(n) => Number::Floating(f64::from(*n)),
            Value::Double(n) => Number::Floating(*n),
            Value::BigInteger(n) => Number::BigInteger(BigInt::clone(n)),
            Value::BigDecimal(d) => Number::BigDecimal(BigDecimal::clone(d)),
            _ => return None,
        })
    }

    /// Java `longValue()`: floating values saturate, big values keep their
    /// low 64 bits.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing follows Java primitive conversion"
    )]
    fn to_i64(&self) -> i64 {
        match self {
            Number::Integral(n) => *n,
            Number::Floating(d) => *d as i64,
            Number::BigInteger(n) => low_bits(n),
            Number::BigDecimal(d) => low_bits(&integer_part(d)),
        }
    }

    /// Java `intValue()`: floating values saturate at the `int` range,
    /// everything else keeps its low 32 bits.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing follows Java primitive conversion"
    )]
    fn to_i32(&self) -> i32 {
        match self {
            Number::Floating(d) => *d as i32,
            other => other.to_i64() as i32,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing follows Java primitive conversion"
    )]
    fn to_i16(&self) -> i16 {
        self.to_i32() as i16
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "narrowing follows Java primitive conversion"
    )]
    fn to_i8(&self) -> i8 {
        self.to_i32() as i8
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "widening follows Java primitive conversion"
    )]
    fn to_f64(&self) -> f64 {
        match self {
            Number::Integral(n) => *n as f64,
            Number::Floating(d) => *d,
            Number::BigInteger(n) => n.to_f64().unwrap_or(f64::NAN),
            Number::BigDecimal(d) => d.to_f64().unwrap_or(f64::NAN),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "narrowing follows Java primitive conversion"
    )]
    fn to_f32(&self) -> f32 {
        match self {
            Number::Integral(n) => *n as f32,
            Number::Floating(d) => *d as f32,
            Number::BigInteger(n) => n.to_f32().unwrap_or(f32::NAN),
            Number::BigDecimal(d) => d.to_f32().unwrap_or(f32::NAN),
        }
    }

    fn into_big_integer(self) -> BigInt {
        match self {
            Number::BigInteger(n) => n,
            Number::BigDecimal(d) => integer_part(&d),
            other => BigInt::from(other.to_i64()),
        }
    }

    /// `None` for NaN and the infinities, which have no decimal form.
    fn into_big_decimal(self) -> Option<BigDecimal> {
        match self {
            Number::Integral(n) => Some(BigDecimal::from(n)),
            Number::Floating(d) => BigDecimal::from_f64(d),
            Number::BigInteger(n) => Some(BigDecimal::new(n, 0)),
            Number::BigDecimal(d) => Some(d),
        }
    }
}

/// Truncate toward zero.
fn integer_part(d: &BigDecimal) -> BigInt {
    d.with_scale(0).as_bigint_and_exponent().0
}

/// The low 64 bits in two's complement.
fn low_bits(n: &BigInt) -> i64 {
    let (sign, digits) = n.to_u64_digits();
    let low = i64::from_ne_bytes(digits.first().copied().unwrap_or(0).to_ne_bytes());
    if sign == Sign::Minus {
        low.wrapping_neg()
    } else {
        low
    }
}
