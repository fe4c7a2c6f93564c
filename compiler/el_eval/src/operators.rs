//! Binary and unary operator dispatch.
//!
//! Arithmetic classifies each operand pair into a [`ConversionType`], coerces
//! both sides into it and applies the native operation. Relational and
//! equality operators classify the pair the same way before comparing.
//! `&&`/`||` are evaluated here eagerly; the evaluator short-circuits them
//! itself and only calls [`evaluate_binary`] for the other operators.

use std::cmp::Ordering;
use std::sync::Arc;

use bigdecimal::{BigDecimal, RoundingMode};
use el_ir::{BinaryOp, UnaryOp};
use el_value::errors::{division_by_zero, modulo_by_zero, not_comparable};
use el_value::{EvalError, EvalResult, Value, ValueType};
use num_bigint::BigInt;
use num_traits::Zero;

use crate::coerce::{
    coerce, to_big_decimal, to_big_integer, to_boolean, to_f64, to_i64, to_text,
};
use crate::converters::ConverterRegistry;

/// Arithmetic path for one operand pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConversionType {
    /// An operand is `null`: the result is `0`.
    Zero,
    BigDecimal,
    BigInteger,
    Double,
    Long,
}

impl ConversionType {
    pub fn of(left: &Value, right: &Value) -> Self {
        let either = |f: fn(&Value) -> bool| f(left) || f(right);
        if either(Value::is_null) {
            ConversionType::Zero
        } else if either(is_big_decimal) {
            ConversionType::BigDecimal
        } else if either(is_decimal_text) || either(Value::is_floating) {
            if either(is_big_integer) {
                ConversionType::BigDecimal
            } else {
                ConversionType::Double
            }
        } else if either(is_big_integer) {
            ConversionType::BigInteger
        } else {
            ConversionType::Long
        }
    }

    /// Division has no integral path: big operands divide as `BigDecimal`,
    /// everything else as `Double`.
    pub fn for_division(left: &Value, right: &Value) -> Self {
        match Self::of(left, right) {
            ConversionType::BigInteger => ConversionType::BigDecimal,
            ConversionType::Long => ConversionType::Double,
            other => other,
        }
    }
}

fn is_big_decimal(value: &Value) -> bool {
    matches!(value, Value::BigDecimal(_))
}

fn is_big_integer(value: &Value) -> bool {
    matches!(value, Value::BigInteger(_))
}

/// Text that reads as a floating-point number.
fn is_decimal_text(value: &Value) -> bool {
    matches!(value, Value::Str(s) if s.contains(['.', 'e', 'E']))
}

#[derive(Copy, Clone)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

// Direct Dispatch Function

/// Evaluate a binary operator over two already-evaluated operands.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let result = match op {
        BinaryOp::Add => return arithmetic(Arith::Add, left, right),
        BinaryOp::Sub => return arithmetic(Arith::Sub, left, right),
        BinaryOp::Mul => return arithmetic(Arith::Mul, left, right),
        BinaryOp::Div => return arithmetic(Arith::Div, left, right),
        BinaryOp::Mod => return arithmetic(Arith::Mod, left, right),
        BinaryOp::Eq => equals(left, right)?,
        BinaryOp::NotEq => !equals(left, right)?,
        BinaryOp::Lt => compare(op, left, right)? == Some(Ordering::Less),
        BinaryOp::LtEq => matches!(
            compare(op, left, right)?,
            Some(Ordering::Less | Ordering::Equal)
        ),
        BinaryOp::Gt => compare(op, left, right)? == Some(Ordering::Greater),
        BinaryOp::GtEq => matches!(
            compare(op, left, right)?,
            Some(Ordering::Greater | Ordering::Equal)
        ),
        BinaryOp::And => to_boolean(left)? && to_boolean(right)?,
        BinaryOp::Or => to_boolean(left)? || to_boolean(right)?,
    };
    Ok(Value::Bool(result))
}

/// Evaluate a unary operator.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match op {
        UnaryOp::Neg => negate(operand),
        UnaryOp::Not => Ok(Value::Bool(!to_boolean(operand)?)),
        UnaryOp::Empty => Ok(Value::Bool(is_empty(operand))),
    }
}

/// `empty`: true for `null`, `""` and empty collections.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Str(s) => s.is_empty(),
        Value::List(items) | Value::Set(items) => items.read().is_empty(),
        Value::Map(map) => map.read().is_empty(),
        Value::Array(array) => array.is_empty(),
        _ => false,
    }
}

// Arithmetic

fn arithmetic(op: Arith, left: &Value, right: &Value) -> EvalResult {
    let conversion = match op {
        Arith::Div => ConversionType::for_division(left, right),
        _ => ConversionType::of(left, right),
    };
    match conversion {
        ConversionType::Zero => Ok(Value::Long(0)),
        ConversionType::BigDecimal => {
            big_decimal_arith(op, &to_big_decimal(left)?, &to_big_decimal(right)?)
        }
        ConversionType::BigInteger => {
            big_integer_arith(op, &to_big_integer(left)?, &to_big_integer(right)?)
        }
        ConversionType::Double => Ok(double_arith(op, to_f64(left)?, to_f64(right)?)),
        ConversionType::Long => long_arith(op, to_i64(left)?, to_i64(right)?),
    }
}

fn big_decimal_arith(op: Arith, a: &BigDecimal, b: &BigDecimal) -> EvalResult {
    let result = match op {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => divide(a, b)?,
        Arith::Mod => {
            if b.is_zero() {
                return Err(modulo_by_zero());
            }
            a % b
        }
    };
    Ok(Value::big_decimal(result))
}

/// Quotient at the dividend's scale, rounded half-up.
fn divide(a: &BigDecimal, b: &BigDecimal) -> Result<BigDecimal, EvalError> {
    if b.is_zero() {
        return Err(division_by_zero());
    }
    let (_, scale) = a.as_bigint_and_exponent();
    Ok((a / b).with_scale_round(scale, RoundingMode::HalfUp))
}

fn big_integer_arith(op: Arith, a: &BigInt, b: &BigInt) -> EvalResult {
    let result = match op {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => {
            let quotient = divide(&BigDecimal::new(a.clone(), 0), &BigDecimal::new(b.clone(), 0))?;
            return Ok(Value::big_decimal(quotient));
        }
        // `%` on BigInt truncates toward zero.
        Arith::Mod => {
            if b.is_zero() {
                return Err(modulo_by_zero());
            }
            a % b
        }
    };
    Ok(Value::big_integer(result))
}

fn double_arith(op: Arith, a: f64, b: f64) -> Value {
    Value::Double(match op {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => a / b,
        Arith::Mod => a % b,
    })
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integral division is defined as double division"
)]
fn long_arith(op: Arith, a: i64, b: i64) -> EvalResult {
    Ok(match op {
        Arith::Add => Value::Long(a.wrapping_add(b)),
        Arith::Sub => Value::Long(a.wrapping_sub(b)),
        Arith::Mul => Value::Long(a.wrapping_mul(b)),
        Arith::Div => Value::Double(a as f64 / b as f64),
        Arith::Mod => {
            if b == 0 {
                return Err(modulo_by_zero());
            }
            Value::Long(a.wrapping_rem(b))
        }
    })
}

fn negate(value: &Value) -> EvalResult {
    Ok(match value {
        Value::Null => Value::Long(0),
        Value::BigDecimal(d) => Value::big_decimal(-BigDecimal::clone(d)),
        Value::BigInteger(n) => Value::big_integer(-BigInt::clone(n)),
        Value::Str(_) if is_decimal_text(value) => Value::Double(-to_f64(value)?),
        Value::Double(d) => Value::Double(-d),
        Value::Float(f) => Value::Float(-f),
        Value::Int(n) => Value::Int(n.wrapping_neg()),
        Value::Short(n) => Value::Short(n.wrapping_neg()),
        Value::Byte(n) => Value::Byte(n.wrapping_neg()),
        other => Value::Long(to_i64(other)?.wrapping_neg()),
    })
}

// Comparison

/// The common type two operands are compared in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Common {
    BigDecimal,
    BigInteger,
    Double,
    Long,
    Text,
    Other,
}

impl Common {
    fn of(left: &Value, right: &Value) -> Self {
        let either = |f: fn(&Value) -> bool| f(left) || f(right);
        // Decimal-looking text only counts as a number opposite a number.
        let numeric_text = (is_decimal_text(left) && right.is_number())
            || (is_decimal_text(right) && left.is_number());
        let floating = either(Value::is_floating) || numeric_text;
        if either(is_big_decimal) || (either(is_big_integer) && floating) {
            Common::BigDecimal
        } else if either(is_big_integer) {
            Common::BigInteger
        } else if floating {
            Common::Double
        } else if either(Value::is_integral) || either(|v| matches!(v, Value::Char(_))) {
            Common::Long
        } else if either(|v| matches!(v, Value::Str(_))) {
            Common::Text
        } else {
            Common::Other
        }
    }
}

/// Order two non-null operands. `None` when unordered (NaN).
pub fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Option<Ordering>, EvalError> {
    if left.is_null() || right.is_null() {
        return Ok(None);
    }
    Ok(match Common::of(left, right) {
        Common::BigDecimal => Some(to_big_decimal(left)?.cmp(&to_big_decimal(right)?)),
        Common::BigInteger => Some(to_big_integer(left)?.cmp(&to_big_integer(right)?)),
        Common::Double => to_f64(left)?.partial_cmp(&to_f64(right)?),
        Common::Long => Some(to_i64(left)?.cmp(&to_i64(right)?)),
        Common::Text => Some(to_text(left).cmp(&to_text(right))),
        Common::Other => match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Enum(a), Value::Enum(b)) if a.same_type(b) => {
                Some(a.ordinal().cmp(&b.ordinal()))
            }
            _ => return Err(not_comparable(op.as_symbol(), left, right)),
        },
    })
}

/// `==` semantics: numeric comparison across the tower, boolean and enum
/// coercion, string comparison, then natural equality.
#[expect(clippy::float_cmp, reason = "EL equality on doubles is exact")]
pub fn equals(left: &Value, right: &Value) -> Result<bool, EvalError> {
    match (left, right) {
        (Value::Null, Value::Null) => return Ok(true),
        (Value::Null, _) | (_, Value::Null) => return Ok(false),
        _ => {}
    }
    match Common::of(left, right) {
        Common::BigDecimal => return Ok(to_big_decimal(left)? == to_big_decimal(right)?),
        Common::BigInteger => return Ok(to_big_integer(left)? == to_big_integer(right)?),
        Common::Double => return Ok(to_f64(left)? == to_f64(right)?),
        Common::Long => return Ok(to_i64(left)? == to_i64(right)?),
        Common::Text | Common::Other => {}
    }
    if matches!(left, Value::Bool(_)) || matches!(right, Value::Bool(_)) {
        return Ok(to_boolean(left)? == to_boolean(right)?);
    }
    let no_converters = ConverterRegistry::default();
    if let Value::Enum(e) = left {
        return Ok(coerce(right, &ValueType::Enum(Arc::clone(e.ty())), &no_converters)? == *left);
    }
    if let Value::Enum(e) = right {
        return Ok(coerce(left, &ValueType::Enum(Arc::clone(e.ty())), &no_converters)? == *right);
    }
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        return Ok(to_text(left) == to_text(right));
    }
    Ok(left == right)
}
