//! Default `java.lang` classes: wrapper constants and parsers, `Math`,
//! `String.valueOf`.

use el_value::{ClassDef, NativeFunction, Primitive, Value, ValueType};

use crate::coerce::{to_f64, to_i64, to_text};

pub(super) const PACKAGE: &str = "java.lang";

pub(super) fn classes() -> Vec<ClassDef> {
    vec![
        boolean(),
        character(),
        wrapper(
            "java.lang.Byte",
            Primitive::Byte,
            "parseByte",
            Value::Byte(i8::MIN),
            Value::Byte(i8::MAX),
        ),
        wrapper(
            "java.lang.Short",
            Primitive::Short,
            "parseShort",
            Value::Short(i16::MIN),
            Value::Short(i16::MAX),
        ),
        wrapper(
            "java.lang.Integer",
            Primitive::Int,
            "parseInt",
            Value::Int(i32::MIN),
            Value::Int(i32::MAX),
        ),
        wrapper(
            "java.lang.Long",
            Primitive::Long,
            "parseLong",
            Value::Long(i64::MIN),
            Value::Long(i64::MAX),
        ),
        wrapper(
            "java.lang.Float",
            Primitive::Float,
            "parseFloat",
            Value::Float(f32::from_bits(1)),
            Value::Float(f32::MAX),
        )
        .with_field("NaN", Value::Float(f32::NAN))
        .with_field("POSITIVE_INFINITY", Value::Float(f32::INFINITY))
        .with_field("NEGATIVE_INFINITY", Value::Float(f32::NEG_INFINITY)),
        wrapper(
            "java.lang.Double",
            Primitive::Double,
            "parseDouble",
            Value::Double(f64::from_bits(1)),
            Value::Double(f64::MAX),
        )
        .with_field("NaN", Value::Double(f64::NAN))
        .with_field("POSITIVE_INFINITY", Value::Double(f64::INFINITY))
        .with_field("NEGATIVE_INFINITY", Value::Double(f64::NEG_INFINITY)),
        math(),
        string(),
    ]
}

/// A function returning its single argument after coercion: the argument
/// to `param`, the result to `returns`.
fn convert(name: &str, param: ValueType, returns: ValueType) -> NativeFunction {
    NativeFunction::new(name, vec![param], |args| Ok(args[0].clone())).returns(returns)
}

fn double_fn(name: &str, f: fn(f64) -> f64) -> NativeFunction {
    let double = ValueType::Primitive(Primitive::Double);
    NativeFunction::new(name, vec![double.clone()], move |args| {
        Ok(Value::Double(f(to_f64(&args[0])?)))
    })
    .returns(double)
}

fn wrapper(
    qualified_name: &str,
    primitive: Primitive,
    parse: &str,
    min: Value,
    max: Value,
) -> ClassDef {
    ClassDef::new(qualified_name)
        .with_field("MIN_VALUE", min)
        .with_field("MAX_VALUE", max)
        .with_method(convert(
            parse,
            ValueType::String,
            ValueType::Primitive(primitive),
        ))
        .with_method(convert(
            "valueOf",
            ValueType::String,
            ValueType::Boxed(primitive),
        ))
}

fn boolean() -> ClassDef {
    let parse = |name: &str| {
        NativeFunction::new(name, vec![ValueType::String], |args| {
            Ok(Value::Bool(
                args[0].as_str().is_some_and(|s| s.eq_ignore_ascii_case("true")),
            ))
        })
    };
    ClassDef::new("java.lang.Boolean")
        .with_field("TRUE", Value::Bool(true))
        .with_field("FALSE", Value::Bool(false))
        .with_method(parse("parseBoolean"))
        .with_method(parse("valueOf"))
}

fn character() -> ClassDef {
    let char_type = ValueType::Primitive(Primitive::Char);
    let test = |name: &str, f: fn(char) -> bool| {
        NativeFunction::new(name, vec![char_type.clone()], move |args| {
            Ok(Value::Bool(matches!(args[0], Value::Char(c) if f(c))))
        })
    };
    let map = |name: &str, f: fn(char) -> char| {
        NativeFunction::new(name, vec![char_type.clone()], move |args| match args[0] {
            Value::Char(c) => Ok(Value::Char(f(c))),
            _ => Ok(args[0].clone()),
        })
    };
    ClassDef::new("java.lang.Character")
        .with_field("MIN_VALUE", Value::Char('\0'))
        .with_field("MAX_VALUE", Value::Char('\u{ffff}'))
        .with_method(test("isDigit", |c| c.is_ascii_digit()))
        .with_method(test("isLetter", char::is_alphabetic))
        .with_method(test("isWhitespace", char::is_whitespace))
        .with_method(map("toUpperCase", |c| {
            c.to_uppercase().next().unwrap_or(c)
        }))
        .with_method(map("toLowerCase", |c| {
            c.to_lowercase().next().unwrap_or(c)
        }))
}

fn math() -> ClassDef {
    let pair = |name: &str, pick_first: fn(bool) -> bool| {
        NativeFunction::new(name, vec![ValueType::Any, ValueType::Any], move |args| {
            let (a, b) = (&args[0], &args[1]);
            if a.is_integral() && b.is_integral() {
                let (x, y) = (to_i64(a)?, to_i64(b)?);
                Ok(Value::Long(if pick_first(x > y) { x } else { y }))
            } else {
                let (x, y) = (to_f64(a)?, to_f64(b)?);
                if x.is_nan() || y.is_nan() {
                    return Ok(Value::Double(f64::NAN));
                }
                Ok(Value::Double(if pick_first(x > y) { x } else { y }))
            }
        })
    };
    ClassDef::new("java.lang.Math")
        .with_field("PI", Value::Double(std::f64::consts::PI))
        .with_field("E", Value::Double(std::f64::consts::E))
        .with_method(NativeFunction::new("abs", vec![ValueType::Any], |args| {
            Ok(match &args[0] {
                Value::Int(i) => Value::Int(i.wrapping_abs()),
                Value::Float(f) => Value::Float(f.abs()),
                Value::BigDecimal(d) => Value::big_decimal(d.abs()),
                other if other.is_integral() => Value::Long(to_i64(other)?.wrapping_abs()),
                other => Value::Double(to_f64(other)?.abs()),
            })
        }))
        .with_method(pair("max", |first_greater| first_greater))
        .with_method(pair("min", |first_greater| !first_greater))
        .with_method(
            NativeFunction::new(
                "pow",
                vec![
                    ValueType::Primitive(Primitive::Double),
                    ValueType::Primitive(Primitive::Double),
                ],
                |args| Ok(Value::Double(to_f64(&args[0])?.powf(to_f64(&args[1])?))),
            )
            .returns(ValueType::Primitive(Primitive::Double)),
        )
        .with_method(double_fn("sqrt", f64::sqrt))
        .with_method(double_fn("floor", f64::floor))
        .with_method(double_fn("ceil", f64::ceil))
        .with_method(double_fn("signum", |x| {
            if x.abs() > 0.0 {
                x.signum()
            } else {
                x
            }
        }))
        .with_method(
            NativeFunction::new(
                "round",
                vec![ValueType::Primitive(Primitive::Double)],
                |args| {
                    let x = to_f64(&args[0])?;
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "saturating float-to-long matches Math.round"
                    )]
                    let rounded = (x + 0.5).floor() as i64;
                    Ok(Value::Long(if x.is_nan() { 0 } else { rounded }))
                },
            )
            .returns(ValueType::Primitive(Primitive::Long)),
        )
}

fn string() -> ClassDef {
    ClassDef::new("java.lang.String").with_method(
        NativeFunction::new("valueOf", vec![ValueType::Any], |args| {
            Ok(Value::string(to_text(&args[0])))
        })
        .returns(ValueType::String),
    )
}
