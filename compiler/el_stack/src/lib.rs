//! Stack growth guard for recursive descent over expression trees.
//!
//! Both the parser and the tree-walking evaluator recurse once per nesting
//! level of an expression. Pathological inputs such as `((((...))))` or long
//! `a.b.c.d...` chains would otherwise overflow the native stack.
//!
//! On native targets the `stacker` crate grows the stack on demand; on WASM
//! the closure is simply called.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// Wrap every recursive entry point (`parse_expr`, `eval`) with this.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
