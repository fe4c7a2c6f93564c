//! Lambda closures.

use std::fmt;
use std::sync::Arc;

use el_ir::{Name, Node};
use rustc_hash::FxHashMap;

use crate::value::Value;

/// A closure created by evaluating a lambda node.
///
/// Holds the parameter names, the shared body, and the lambda arguments
/// that were visible when it was created, so a lambda returned out of an
/// enclosing lambda still sees the outer parameters.
#[derive(Clone)]
pub struct LambdaValue {
    params: Arc<[Name]>,
    body: Arc<Node>,
    captured: Arc<FxHashMap<Name, Value>>,
}

impl LambdaValue {
    pub fn new(params: Vec<Name>, body: Arc<Node>, captured: FxHashMap<Name, Value>) -> Self {
        LambdaValue {
            params: params.into(),
            body,
            captured: Arc::new(captured),
        }
    }

    pub fn params(&self) -> &[Name] {
        &self.params
    }

    pub fn body(&self) -> &Arc<Node> {
        &self.body
    }

    pub fn captured(&self) -> &FxHashMap<Name, Value> {
        &self.captured
    }
}

/// Closures are equal when they come from the same lambda node and the
/// same capture.
impl PartialEq for LambdaValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body) && Arc::ptr_eq(&self.captured, &other.captured)
    }
}

impl Eq for LambdaValue {}

impl fmt::Debug for LambdaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaValue")
            .field("params", &self.params)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}
