//! Map entries as properties: `m.key` and `m['key']`.

use el_value::errors::{method_not_found, property_not_writable, wrong_arg_count};
use el_value::{Value, ValueType};

use super::{PropertyResolver, Resolution, ResolveResult};
use crate::coerce::to_text;
use crate::context::EvalContext;

/// Handles `Value::Map` bases. A missing key reads as `null`.
#[derive(Debug)]
pub struct MapResolver {
    read_only: bool,
}

impl MapResolver {
    pub fn new(read_only: bool) -> Self {
        MapResolver { read_only }
    }
}

impl PropertyResolver for MapResolver {
    fn name(&self) -> &'static str {
        "map"
    }

    fn get_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<Value> {
        let Value::Map(map) = base else {
            return Ok(Resolution::Unresolved);
        };
        let value = map.read().get(property).cloned().unwrap_or(Value::Null);
        Ok(Resolution::Resolved(value))
    }

    fn get_type(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        _property: &Value,
    ) -> ResolveResult<ValueType> {
        Ok(match base {
            Value::Map(_) => Resolution::Resolved(ValueType::Any),
            _ => Resolution::Unresolved,
        })
    }

    fn set_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
        value: &Value,
    ) -> ResolveResult<()> {
        let Value::Map(map) = base else {
            return Ok(Resolution::Unresolved);
        };
        if self.read_only {
            return Err(property_not_writable(&to_text(property)));
        }
        map.write().insert(property.clone(), value.clone());
        Ok(Resolution::Resolved(()))
    }

    fn is_read_only(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        _property: &Value,
    ) -> ResolveResult<bool> {
        Ok(match base {
            Value::Map(_) => Resolution::Resolved(self.read_only),
            _ => Resolution::Unresolved,
        })
    }

    fn invoke(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        method: &str,
        args: &[Value],
    ) -> ResolveResult<Value> {
        let Value::Map(map) = base else {
            return Ok(Resolution::Unresolved);
        };
        let map = map.read();
        let value = match (method, args) {
            ("size", []) => Value::Int(i32::try_from(map.len()).unwrap_or(i32::MAX)),
            ("isEmpty", []) => Value::Bool(map.is_empty()),
            ("containsKey", [key]) => Value::Bool(map.contains_key(key)),
            ("containsValue", [value]) => Value::Bool(map.values().any(|v| v == value)),
            ("get", [key]) => map.get(key).cloned().unwrap_or(Value::Null),
            ("keySet", []) => Value::set(map.keys().cloned().collect()),
            ("values", []) => Value::list(map.values().cloned().collect()),
            ("size" | "isEmpty" | "keySet" | "values", _) => {
                return Err(wrong_arg_count(method, 0, args.len()));
            }
            ("containsKey" | "containsValue" | "get", _) => {
                return Err(wrong_arg_count(method, 1, args.len()));
            }
            _ => return Err(method_not_found(Some("Map"), method)),
        };
        Ok(Resolution::Resolved(value))
    }
}
