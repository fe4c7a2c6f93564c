//! Bean capability trait.
//!
//! Stands in for reflective JavaBean access: a bean names its properties,
//! reports their types, and may expose methods.

use std::fmt;
use std::sync::Arc;

use el_ir::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{self, EvalError, EvalResult};
use crate::types::ValueType;
use crate::value::Value;

/// Property and method access on a host object.
///
/// Methods take `&self`: beans are shared through `Arc` and use interior
/// mutability for writes.
pub trait Bean: Send + Sync {
    /// Type name used in error messages.
    fn class_name(&self) -> &str;

    /// Property names in declaration order.
    fn property_names(&self) -> Vec<Name>;

    /// Current value of `property`, or `None` if the bean has no such
    /// property.
    fn get(&self, property: &str) -> Option<Value>;

    /// Store `value`, already coerced to `property_type(property)`.
    fn set(&self, property: &str, value: Value) -> Result<(), EvalError>;

    /// Declared type of `property`, or `None` if the bean has no such
    /// property.
    fn property_type(&self, property: &str) -> Option<ValueType>;

    fn is_read_only(&self, _property: &str) -> bool {
        false
    }

    /// Invoke `method`. `None` means the bean has no such method.
    fn invoke(&self, _method: &str, _args: &[Value]) -> Option<EvalResult> {
        None
    }

    /// Natural string form.
    fn describe(&self) -> String {
        self.class_name().to_string()
    }
}

/// Method body of a [`DynamicBean`].
pub type BeanMethod = Arc<dyn Fn(&DynamicBean, &[Value]) -> EvalResult + Send + Sync>;

#[derive(Clone)]
struct BeanProperty {
    value: Value,
    ty: ValueType,
    read_only: bool,
}

/// A bean backed by a property table.
///
/// Used for beans defined at runtime (`define_bean`, assignment to an
/// unknown name) and by tests.
pub struct DynamicBean {
    class_name: Name,
    order: Vec<Name>,
    properties: RwLock<FxHashMap<Name, BeanProperty>>,
    methods: FxHashMap<Name, BeanMethod>,
}

impl DynamicBean {
    pub fn new(class_name: impl Into<Name>) -> Self {
        DynamicBean {
            class_name: class_name.into(),
            order: Vec::new(),
            properties: RwLock::new(FxHashMap::default()),
            methods: FxHashMap::default(),
        }
    }

    /// Add a writable property.
    #[must_use]
    pub fn with_property(self, name: impl Into<Name>, ty: ValueType, value: Value) -> Self {
        self.add_property(name.into(), ty, value, false)
    }

    /// Add a property that rejects assignment.
    #[must_use]
    pub fn with_read_only_property(
        self,
        name: impl Into<Name>,
        ty: ValueType,
        value: Value,
    ) -> Self {
        self.add_property(name.into(), ty, value, true)
    }

    #[must_use]
    pub fn with_method(
        mut self,
        name: impl Into<Name>,
        body: impl Fn(&DynamicBean, &[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Arc::new(body));
        self
    }

    fn add_property(mut self, name: Name, ty: ValueType, value: Value, read_only: bool) -> Self {
        if !self.order.contains(&name) {
            self.order.push(Arc::clone(&name));
        }
        self.properties.get_mut().insert(
            name,
            BeanProperty {
                value,
                ty,
                read_only,
            },
        );
        self
    }
}

impl Bean for DynamicBean {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn property_names(&self) -> Vec<Name> {
        self.order.clone()
    }

    fn get(&self, property: &str) -> Option<Value> {
        self.properties.read().get(property).map(|p| p.value.clone())
    }

    fn set(&self, property: &str, value: Value) -> Result<(), EvalError> {
        let mut properties = self.properties.write();
        match properties.get_mut(property) {
            Some(p) if p.read_only => Err(errors::property_not_writable(property)),
            Some(p) => {
                p.value = value;
                Ok(())
            }
            None => Err(errors::property_not_found(Some(&self.class_name), property)),
        }
    }

    fn property_type(&self, property: &str) -> Option<ValueType> {
        self.properties.read().get(property).map(|p| p.ty.clone())
    }

    fn is_read_only(&self, property: &str) -> bool {
        self.properties
            .read()
            .get(property)
            .is_some_and(|p| p.read_only)
    }

    fn invoke(&self, method: &str, args: &[Value]) -> Option<EvalResult> {
        let body = self.methods.get(method)?;
        Some(body(self, args))
    }

    fn describe(&self) -> String {
        let properties = self.properties.read();
        let fields: Vec<String> = self
            .order
            .iter()
            .filter_map(|name| properties.get(name).map(|p| format!("{name}={}", p.value)))
            .collect();
        format!("{}{{{}}}", self.class_name, fields.join(", "))
    }
}

impl fmt::Debug for DynamicBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests;
