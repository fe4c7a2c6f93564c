//! Static fields and static methods of imported classes.

use el_value::errors::{method_not_found, property_not_found, property_not_writable};
use el_value::{Value, ValueType};

use super::{PropertyResolver, Resolution, ResolveResult};
use crate::coerce::to_text;
use crate::context::EvalContext;

/// Handles `Value::Class` bases: `Math.PI`, `Color.RED`, `Math.max(1, 2)`.
///
/// Static fields are never writable.
#[derive(Debug)]
pub struct StaticFieldResolver;

impl PropertyResolver for StaticFieldResolver {
    fn name(&self) -> &'static str {
        "static-field"
    }

    fn get_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<Value> {
        let Value::Class(class) = base else {
            return Ok(Resolution::Unresolved);
        };
        let field = to_text(property);
        match class.field(&field) {
            Some(value) => Ok(Resolution::Resolved(value)),
            None => Err(property_not_found(Some(class.name()), &field)),
        }
    }

    fn get_type(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<ValueType> {
        let Value::Class(class) = base else {
            return Ok(Resolution::Unresolved);
        };
        let field = to_text(property);
        match class.field(&field) {
            Some(value) => Ok(Resolution::Resolved(value.value_type())),
            None => Err(property_not_found(Some(class.name()), &field)),
        }
    }

    fn set_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
        _value: &Value,
    ) -> ResolveResult<()> {
        match base {
            Value::Class(_) => Err(property_not_writable(&to_text(property))),
            _ => Ok(Resolution::Unresolved),
        }
    }

    fn is_read_only(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        _property: &Value,
    ) -> ResolveResult<bool> {
        Ok(match base {
            Value::Class(_) => Resolution::Resolved(true),
            _ => Resolution::Unresolved,
        })
    }

    fn invoke(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        method: &str,
        args: &[Value],
    ) -> ResolveResult<Value> {
        let Value::Class(class) = base else {
            return Ok(Resolution::Unresolved);
        };
        match class.method(method) {
            Some(function) => ctx.call_native(function, args).map(Resolution::Resolved),
            None => Err(method_not_found(Some(class.name()), method)),
        }
    }
}
