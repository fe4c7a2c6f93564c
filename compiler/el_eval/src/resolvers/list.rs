//! List elements by index: `list[0]`.

use el_value::errors::{property_not_found, property_not_writable};
use el_value::{EvalError, Value, ValueType};

use super::{checked_index, index_of, PropertyResolver, Resolution, ResolveResult};
use crate::context::EvalContext;

/// Handles `Value::List` bases. Reading past the end yields `null`; writing
/// past the end is an error.
#[derive(Debug)]
pub struct ListResolver {
    read_only: bool,
}

impl ListResolver {
    pub fn new(read_only: bool) -> Self {
        ListResolver { read_only }
    }
}

fn list_index(property: &Value) -> Result<i64, EvalError> {
    index_of(property).map_err(|_| property_not_found(Some("List"), &property.to_string()))
}

impl PropertyResolver for ListResolver {
    fn name(&self) -> &'static str {
        "list"
    }

    fn get_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<Value> {
        let Value::List(items) = base else {
            return Ok(Resolution::Unresolved);
        };
        let index = list_index(property)?;
        let items = items.read();
        let value = checked_index(index, items.len()).map_or(Value::Null, |i| items[i].clone());
        Ok(Resolution::Resolved(value))
    }

    fn get_type(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<ValueType> {
        let Value::List(items) = base else {
            return Ok(Resolution::Unresolved);
        };
        let index = list_index(property)?;
        match checked_index(index, items.read().len()) {
            Some(_) => Ok(Resolution::Resolved(ValueType::Any)),
            None => Err(property_not_found(Some("List"), &index.to_string())),
        }
    }

    fn set_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
        value: &Value,
    ) -> ResolveResult<()> {
        let Value::List(items) = base else {
            return Ok(Resolution::Unresolved);
        };
        if self.read_only {
            return Err(property_not_writable(&property.to_string()));
        }
        let index = list_index(property)?;
        let mut items = items.write();
        let Some(slot) = checked_index(index, items.len()).and_then(|i| items.get_mut(i)) else {
            return Err(property_not_found(Some("List"), &index.to_string()));
        };
        *slot = value.clone();
        Ok(Resolution::Resolved(()))
    }

    fn is_read_only(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        _property: &Value,
    ) -> ResolveResult<bool> {
        Ok(match base {
            Value::List(_) => Resolution::Resolved(self.read_only),
            _ => Resolution::Unresolved,
        })
    }
}
