//! Variable and function mappers.
//!
//! The variable mapper binds identifiers to expressions ahead of the
//! resolver chain; the function mapper maps `prefix:name` to host functions.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use el_ir::{Name, Node};
use el_value::{NativeFunction, Value, ValueType};

/// What a mapped variable stands for.
#[derive(Clone, Debug)]
pub enum VariableBinding {
    /// A compiled expression, evaluated on every read and coerced to
    /// `expected`. Writes go through to the expression.
    Expression { node: Arc<Node>, expected: ValueType },
    /// A fixed value; not writable.
    Value(Value),
}

#[derive(Clone, Debug, Default)]
pub struct VariableMapper {
    bindings: FxHashMap<Name, VariableBinding>,
}

impl VariableMapper {
    pub fn new() -> Self {
        VariableMapper::default()
    }

    pub fn bind_expression(
        &mut self,
        name: impl Into<Name>,
        node: Arc<Node>,
        expected: ValueType,
    ) {
        self.bindings
            .insert(name.into(), VariableBinding::Expression { node, expected });
    }

    pub fn bind_value(&mut self, name: impl Into<Name>, value: Value) {
        self.bindings
            .insert(name.into(), VariableBinding::Value(value));
    }

    pub fn resolve(&self, name: &str) -> Option<&VariableBinding> {
        self.bindings.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<VariableBinding> {
        self.bindings.remove(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Host functions callable as `prefix:name(...)`, or as `name(...)` when
/// mapped with an empty prefix.
#[derive(Clone, Debug, Default)]
pub struct FunctionMapper {
    functions: FxHashMap<Name, Arc<NativeFunction>>,
}

impl FunctionMapper {
    pub fn new() -> Self {
        FunctionMapper::default()
    }

    pub fn map_function(&mut self, prefix: &str, local_name: &str, function: NativeFunction) {
        self.functions
            .insert(qualified(prefix, local_name), Arc::new(function));
    }

    /// Look up a function by the identifier the parser produced
    /// (`prefix:name` or `name`).
    pub fn resolve(&self, qualified_name: &str) -> Option<&Arc<NativeFunction>> {
        self.functions.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

fn qualified(prefix: &str, local_name: &str) -> Name {
    if prefix.is_empty() {
        Name::from(local_name)
    } else {
        Name::from(format!("{prefix}:{local_name}"))
    }
}

#[cfg(test)]
mod tests;
