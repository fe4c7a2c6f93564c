//! Array elements by index, plus the `length` pseudo-property.

use el_value::errors::{property_not_found, property_not_writable};
use el_value::{EvalError, Value, ValueType};

use super::{checked_index, index_of, PropertyResolver, Resolution, ResolveResult};
use crate::context::EvalContext;

/// Handles `Value::Array` bases. Stored values are coerced to the array's
/// component type.
#[derive(Debug)]
pub struct ArrayResolver {
    read_only: bool,
}

impl ArrayResolver {
    pub fn new(read_only: bool) -> Self {
        ArrayResolver { read_only }
    }
}

fn is_length(property: &Value) -> bool {
    property.as_str() == Some("length")
}

fn array_index(property: &Value) -> Result<i64, EvalError> {
    index_of(property).map_err(|_| property_not_found(Some("Array"), &property.to_string()))
}

impl PropertyResolver for ArrayResolver {
    fn name(&self) -> &'static str {
        "array"
    }

    fn get_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<Value> {
        let Value::Array(array) = base else {
            return Ok(Resolution::Unresolved);
        };
        if is_length(property) {
            let len = i32::try_from(array.len()).unwrap_or(i32::MAX);
            return Ok(Resolution::Resolved(Value::Int(len)));
        }
        let index = array_index(property)?;
        let items = array.items().read();
        let value = checked_index(index, items.len()).map_or(Value::Null, |i| items[i].clone());
        Ok(Resolution::Resolved(value))
    }

    fn get_type(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<ValueType> {
        let Value::Array(array) = base else {
            return Ok(Resolution::Unresolved);
        };
        if is_length(property) {
            return Ok(Resolution::Resolved(ValueType::Primitive(
                el_value::Primitive::Int,
            )));
        }
        let index = array_index(property)?;
        match checked_index(index, array.len()) {
            Some(_) => Ok(Resolution::Resolved(array.component().clone())),
            None => Err(property_not_found(Some("Array"), &index.to_string())),
        }
    }

    fn set_value(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
        value: &Value,
    ) -> ResolveResult<()> {
        let Value::Array(array) = base else {
            return Ok(Resolution::Unresolved);
        };
        if self.read_only || is_length(property) {
            return Err(property_not_writable(&property.to_string()));
        }
        let index = array_index(property)?;
        let value = ctx.coerce(value, array.component())?;
        let mut items = array.items().write();
        let Some(slot) = checked_index(index, items.len()).and_then(|i| items.get_mut(i)) else {
            return Err(property_not_found(Some("Array"), &index.to_string()));
        };
        *slot = value;
        Ok(Resolution::Resolved(()))
    }

    fn is_read_only(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<bool> {
        Ok(match base {
            Value::Array(_) => Resolution::Resolved(self.read_only || is_length(property)),
            _ => Resolution::Unresolved,
        })
    }
}
