//! RAII guard for lambda argument scopes.
//!
//! [`ScopedContext`] pushes a lambda scope on creation and pops it on drop,
//! so the scope is gone on every exit path: normal return, `?` propagation
//! and unwinding.
//!
//! ```text
//! ctx.with_lambda_scope(bindings, |scoped| scoped.eval(body))
//! ```

use std::ops::{Deref, DerefMut};

use tracing::trace;

use super::EvalContext;
use crate::environment::LambdaScope;

/// Access the context through this guard; it implements `Deref` and
/// `DerefMut`. Dropping it pops the scope it pushed.
pub struct ScopedContext<'guard> {
    ctx: &'guard mut EvalContext,
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        self.ctx.lambda_scopes.pop_scope();
        trace!(depth = self.ctx.lambda_scopes.depth(), "pop lambda scope");
    }
}

impl Deref for ScopedContext<'_> {
    type Target = EvalContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ScopedContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl EvalContext {
    /// Push `bindings` as the innermost lambda scope until the returned
    /// guard is dropped.
    pub fn lambda_scope(&mut self, bindings: LambdaScope) -> ScopedContext<'_> {
        self.lambda_scopes.push_scope(bindings);
        trace!(depth = self.lambda_scopes.depth(), "push lambda scope");
        ScopedContext { ctx: self }
    }

    /// Run `f` with `bindings` pushed as the innermost lambda scope.
    pub fn with_lambda_scope<T, F>(&mut self, bindings: LambdaScope, f: F) -> T
    where
        F: FnOnce(&mut ScopedContext<'_>) -> T,
    {
        let mut scoped = self.lambda_scope(bindings);
        f(&mut scoped)
    }
}
