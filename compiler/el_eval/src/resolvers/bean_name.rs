//! Top-level identifiers backed by a registry of named beans.

use std::fmt;
use std::sync::Arc;

use el_ir::Name;
use el_value::errors::property_not_writable;
use el_value::{Value, ValueType};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::{PropertyResolver, Resolution, ResolveResult, ResolverOptions};
use crate::context::EvalContext;

/// Named beans shared between a processor and its resolver chain.
#[derive(Clone, Default)]
pub struct BeanRegistry(Arc<RwLock<FxHashMap<Name, Value>>>);

impl BeanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace `name`. Defining `null` removes it.
    pub fn define(&self, name: impl Into<Name>, value: Value) {
        let name = name.into();
        let mut beans = self.0.write();
        if value.is_null() {
            beans.remove(&name);
        } else {
            beans.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

impl fmt::Debug for BeanRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let beans = self.0.read();
        let mut names: Vec<&str> = beans.keys().map(|n| &**n).collect();
        names.sort_unstable();
        f.debug_struct("BeanRegistry").field("beans", &names).finish()
    }
}

/// Resolves `null`-based string properties, i.e. bare identifiers, against a
/// [`BeanRegistry`].
#[derive(Debug)]
pub struct BeanNameResolver {
    beans: BeanRegistry,
    options: ResolverOptions,
}

impl BeanNameResolver {
    pub fn new(beans: BeanRegistry, options: ResolverOptions) -> Self {
        BeanNameResolver { beans, options }
    }

    fn bean_name<'p>(base: &Value, property: &'p Value) -> Option<&'p str> {
        if base.is_null() {
            property.as_str()
        } else {
            None
        }
    }
}

impl PropertyResolver for BeanNameResolver {
    fn name(&self) -> &'static str {
        "bean-name"
    }

    fn get_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<Value> {
        let found = Self::bean_name(base, property).and_then(|name| self.beans.get(name));
        Ok(match found {
            Some(bean) => Resolution::Resolved(bean),
            None => Resolution::Unresolved,
        })
    }

    fn get_type(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<ValueType> {
        let found = Self::bean_name(base, property).and_then(|name| self.beans.get(name));
        Ok(match found {
            Some(bean) => Resolution::Resolved(bean.value_type()),
            None => Resolution::Unresolved,
        })
    }

    fn set_value(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
        value: &Value,
    ) -> ResolveResult<()> {
        let Some(name) = Self::bean_name(base, property) else {
            return Ok(Resolution::Unresolved);
        };
        let known = self.beans.contains(name);
        if !known && !self.options.allow_bean_creation {
            return Ok(Resolution::Unresolved);
        }
        if self.options.read_only {
            return Err(property_not_writable(name));
        }
        self.beans.define(name, value.clone());
        Ok(Resolution::Resolved(()))
    }

    fn is_read_only(
        &self,
        _ctx: &mut EvalContext,
        base: &Value,
        property: &Value,
    ) -> ResolveResult<bool> {
        Ok(match Self::bean_name(base, property) {
            Some(name) if self.beans.contains(name) => Resolution::Resolved(self.options.read_only),
            _ => Resolution::Unresolved,
        })
    }
}
