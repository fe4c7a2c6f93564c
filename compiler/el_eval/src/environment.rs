//! Lambda argument scopes.
//!
//! Each lambda invocation pushes one scope holding its parameter bindings
//! (plus whatever the lambda captured when it was created). Lookup walks the
//! stack top-down, so inner parameters shadow outer ones.

use rustc_hash::FxHashMap;

use el_ir::Name;
use el_value::Value;

/// One lambda invocation's bindings.
pub type LambdaScope = FxHashMap<Name, Value>;

/// Stack of lambda argument scopes.
#[derive(Clone, Debug, Default)]
pub struct LambdaScopes {
    scopes: Vec<LambdaScope>,
}

impl LambdaScopes {
    pub fn new() -> Self {
        LambdaScopes { scopes: Vec::new() }
    }

    pub fn push_scope(&mut self, bindings: LambdaScope) {
        self.scopes.push(bindings);
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Innermost binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    #[inline]
    pub fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Every visible binding, flattened with inner scopes winning.
    pub fn capture(&self) -> LambdaScope {
        let mut captured = LambdaScope::default();
        for scope in &self.scopes {
            captured.extend(scope.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        captured
    }
}
