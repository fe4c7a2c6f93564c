//! Methods on strings: `name.toUpperCase()`, `s.substring(1, 3)`.

use el_value::errors::{wrong_arg_count, EvalError};
use el_value::{EvalResult, Value, ValueType};

use super::{PropertyResolver, Resolution, ResolveResult};
use crate::coerce::{to_i64, to_text};
use crate::context::EvalContext;

/// Handles method calls on `Value::Str`. Indices count characters.
#[derive(Debug)]
pub struct StringMethodResolver;

impl PropertyResolver for StringMethodResolver {
    fn name(&self) -> &'static str {
        "string"
    }

    fn get_value(
        &self,
        _ctx: &mut EvalContext,
        _base: &Value,
        _property: &Value,
    ) -> ResolveResult<Value> {
        Ok(Resolution::Unresolved)
    }

    fn get_type(
        &self,
        _ctx: &mut EvalContext,
        _base: &Value,
        _property: &Value,
    ) -> ResolveResult<ValueType> {
        Ok(Resolution::Unresolved)
    }

    fn set_value(
        &self,
        _ctx: &mut EvalContext,
        _base: &Value,
        _property: &Value,
        _value: &Value,
    ) -> ResolveResult<()> {
        Ok(Resolution::Unresolved)
    }

    fn is_read_only(
        &self,
        _ctx: &mut EvalContext,
        _base: &Value,
        _property: &Value,
    ) -> ResolveResult<bool> {
        Ok(Resolution::Unresolved)
    }

    fn invoke(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        method: &str,
        args: &[Value],
    ) -> ResolveResult<Value> {
        let Value::Str(text) = base else {
            return Ok(Resolution::Unresolved);
        };
        Ok(match string_method(text, method, args) {
            Some(result) => Resolution::Resolved(result?),
            None => Resolution::Unresolved,
        })
    }
}

fn int(n: usize) -> Value {
    Value::Int(i32::try_from(n).unwrap_or(i32::MAX))
}

/// `None` when `method` is not a string method.
fn string_method(text: &str, method: &str, args: &[Value]) -> Option<EvalResult> {
    let arity = |count: usize| -> Result<(), EvalError> {
        if args.len() == count {
            Ok(())
        } else {
            Err(wrong_arg_count(method, count, args.len()))
        }
    };
    let arg_text = |i: usize| args.get(i).map(to_text).unwrap_or_default();
    let result = match method {
        "length" => arity(0).map(|()| int(text.chars().count())),
        "isEmpty" => arity(0).map(|()| Value::Bool(text.is_empty())),
        "toUpperCase" => arity(0).map(|()| Value::string(text.to_uppercase())),
        "toLowerCase" => arity(0).map(|()| Value::string(text.to_lowercase())),
        "trim" => arity(0).map(|()| Value::string(text.trim())),
        "contains" => arity(1).map(|()| Value::Bool(text.contains(arg_text(0).as_str()))),
        "startsWith" => arity(1).map(|()| Value::Bool(text.starts_with(arg_text(0).as_str()))),
        "endsWith" => arity(1).map(|()| Value::Bool(text.ends_with(arg_text(0).as_str()))),
        "concat" => arity(1).map(|()| Value::string(format!("{text}{}", arg_text(0)))),
        "indexOf" => arity(1).map(|()| index_of(text, &arg_text(0))),
        "charAt" => arity(1).and_then(|()| char_at(text, &args[0])),
        "substring" => substring(text, method, args),
        _ => return None,
    };
    Some(result)
}

fn index_of(text: &str, needle: &str) -> Value {
    match text.find(needle) {
        Some(byte) => int(text[..byte].chars().count()),
        None => Value::Int(-1),
    }
}

fn char_at(text: &str, index: &Value) -> EvalResult {
    let index = to_i64(index)?;
    usize::try_from(index)
        .ok()
        .and_then(|i| text.chars().nth(i))
        .map(Value::Char)
        .ok_or_else(|| out_of_range(index, text))
}

fn substring(text: &str, method: &str, args: &[Value]) -> EvalResult {
    let len = text.chars().count();
    let (begin, end) = match args {
        [begin] => (to_i64(begin)?, i64::try_from(len).unwrap_or(i64::MAX)),
        [begin, end] => (to_i64(begin)?, to_i64(end)?),
        _ => return Err(wrong_arg_count(method, 1, args.len())),
    };
    let range = usize::try_from(begin)
        .ok()
        .zip(usize::try_from(end).ok())
        .filter(|(b, e)| b <= e && *e <= len);
    let Some((begin, end)) = range else {
        return Err(out_of_range(if begin < 0 { begin } else { end }, text));
    };
    Ok(Value::string(
        text.chars().skip(begin).take(end - begin).collect::<String>(),
    ))
}

#[cold]
fn out_of_range(index: i64, text: &str) -> EvalError {
    EvalError::new(format!(
        "index {index} out of range for string of length {}",
        text.chars().count()
    ))
}
