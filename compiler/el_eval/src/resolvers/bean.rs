//! Properties and methods of host beans.

use el_value::errors::{method_not_found, property_not_found, property_not_writable};
use el_value::{Bean, Value, ValueType};

use super::{PropertyResolver, Resolution, ResolveResult};
use crate::coerce::to_text;
use crate::context::EvalContext;

/// Handles `Value::Bean` bases through the [`Bean`] capability trait.
///
/// Assigned values are coerced to the property's declared type before the
/// bean sees them.
#[derive(Debug)]
pub struct BeanResolver {
    read_only: bool,
}

impl BeanResolver {
    pub fn new(read_only: bool) -> Self {
        BeanResolver { read_only }
    }
}

fn property_type(bean: &dyn Bean, property: &str) -> Result<ValueType, el_value::EvalError> {
    bean.property_type(property)
        .ok_or_else(|| property_not_found(Some(bean.class_name()), property))
}

impl PropertyResolver for BeanResolver {
    fn name(&self) -> &'static str {
        "bean"
    }

    fn get_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<Value> {
        let Value::Bean(bean) = base else {
            return Ok(Resolution::Unresolved);
        };
        let property = to_text(property);
        bean.get(&property)
            .map(Resolution::Resolved)
            .ok_or_else(|| property_not_found(Some(bean.class_name()), &property))
    }

    fn get_type(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<ValueType> {
        let Value::Bean(bean) = base else {
            return Ok(Resolution::Unresolved);
        };
        property_type(bean.as_ref(), &to_text(property)).map(Resolution::Resolved)
    }

    fn set_value(
        &self,
        ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
        value: &Value,
    ) -> ResolveResult<()> {
        let Value::Bean(bean) = base else {
            return Ok(Resolution::Unresolved);
        };
        let property = to_text(property);
        let ty = property_type(bean.as_ref(), &property)?;
        if self.read_only || bean.is_read_only(&property) {
            return Err(property_not_writable(&property));
        }
        let value = ctx.coerce(value, &ty)?;
        bean.set(&property, value)?;
        Ok(Resolution::Resolved(()))
    }

    fn is_read_only(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<bool> {
        let Value::Bean(bean) = base else {
            return Ok(Resolution::Unresolved);
        };
        let property = to_text(property);
        property_type(bean.as_ref(), &property)?;
        Ok(Resolution::Resolved(
            self.read_only || bean.is_read_only(&property),
        ))
    }

    fn invoke(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        method: &str,
        args: &[Value],
    ) -> ResolveResult<Value> {
        let Value::Bean(bean) = base else {
            return Ok(Resolution::Unresolved);
        };
        match bean.invoke(method, args) {
            Some(result) => result.map(Resolution::Resolved),
            None => Err(method_not_found(Some(bean.class_name()), method)),
        }
    }
}
