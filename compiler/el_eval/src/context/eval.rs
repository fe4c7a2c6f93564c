//! Node evaluation.
//!
//! Four operations walk the tree: [`EvalContext::eval`] (value),
//! [`EvalContext::get_type`], [`EvalContext::is_read_only`] and
//! [`EvalContext::set_value`]. Each is an exhaustive match over [`Node`].
//!
//! # Identifier Lookup Order
//!
//! 1. Lambda arguments (innermost first)
//! 2. Variable mapper
//! 3. Resolver chain with a `null` base
//! 4. Imported classes, then statically imported fields
//!
//! Exhausting the order is `PropertyNotFound`.

use std::sync::Arc;

use el_ir::{BinaryOp, Name, Node, NumberLiteral, Property};
use el_stack::ensure_sufficient_stack;
use el_value::errors::{
    invalid_assignment_target, parse_error, property_not_found, property_not_writable,
};
use el_value::{
    BigInt, ClassDef, EvalError, EvalResult, LambdaValue, Value, ValueMap, ValueReference,
    ValueType,
};

use super::EvalContext;
use crate::coerce::{to_boolean, to_text};
use crate::mappers::VariableBinding;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::resolvers::Resolution;

impl EvalContext {
    /// Evaluate `node` to a value.
    pub fn eval(&mut self, node: &Node) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_node(node))
    }

    /// Evaluate `node` and coerce the result to `expected`.
    pub fn eval_as(&mut self, node: &Node, expected: &ValueType) -> EvalResult {
        let value = self.eval(node)?;
        self.coerce(&value, expected)
    }

    fn eval_node(&mut self, node: &Node) -> EvalResult {
        match node {
            Node::Null => Ok(Value::Null),
            Node::Bool(b) => Ok(Value::Bool(*b)),
            Node::Number(literal) => number(literal),
            Node::String(s) => Ok(Value::string(s)),
            Node::Identifier(name) => self.eval_identifier(name),
            Node::Member { object, property } => self.eval_member(object, property),
            Node::Call { callee, args } => self.eval_call(callee, args),
            Node::Lambda { params, body } => Ok(Value::Lambda(LambdaValue::new(
                params.clone(),
                Arc::clone(body),
                self.lambda_scopes.capture(),
            ))),
            Node::List(items) => Ok(Value::list(self.eval_all(items)?)),
            Node::Set(items) => Ok(Value::set(self.eval_all(items)?)),
            Node::Map(entries) => {
                let mut map = ValueMap::new();
                for (key, value) in entries {
                    let key = self.eval(key)?;
                    let value = self.eval(value)?;
                    map.insert(key, value);
                }
                Ok(Value::map(map))
            }
            Node::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => Ok(Value::Bool(
                self.eval_condition(left)? && self.eval_condition(right)?,
            )),
            Node::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => Ok(Value::Bool(
                self.eval_condition(left)? || self.eval_condition(right)?,
            )),
            Node::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                evaluate_binary(*op, &left, &right)
            }
            Node::Unary { op, operand } => {
                let value = self.eval(operand)?;
                evaluate_unary(*op, &value)
            }
            Node::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond)? {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
            Node::Assign { target, value } => {
                let value = self.eval(value)?;
                self.set_value(target, value.clone())?;
                Ok(value)
            }
            Node::Concat { left, right } => {
                let mut text = to_text(&self.eval(left)?);
                text.push_str(&to_text(&self.eval(right)?));
                Ok(Value::string(text))
            }
            Node::Semicolon { left, right } => {
                self.eval(left)?;
                self.eval(right)
            }
            Node::Deferred(inner) | Node::Dynamic(inner) => self.eval(inner),
        }
    }

    pub(super) fn eval_all(&mut self, nodes: &[Node]) -> Result<Vec<Value>, EvalError> {
        nodes.iter().map(|node| self.eval(node)).collect()
    }

    fn eval_condition(&mut self, node: &Node) -> Result<bool, EvalError> {
        let value = self.eval(node)?;
        to_boolean(&value)
    }

    pub(super) fn eval_binding(&mut self, binding: &VariableBinding) -> EvalResult {
        match binding {
            VariableBinding::Value(value) => Ok(value.clone()),
            VariableBinding::Expression { node, expected } => self.eval_as(node, expected),
        }
    }

    fn eval_identifier(&mut self, name: &Name) -> EvalResult {
        if let Some(value) = self.lambda_scopes.lookup(name) {
            return Ok(value.clone());
        }
        if let Some(binding) = self.variables.resolve(name).cloned() {
            return self.eval_binding(&binding);
        }
        let resolver = Arc::clone(&self.resolver);
        if let Resolution::Resolved(value) =
            resolver.get_value(self, &Value::Null, &Value::string(name))?
        {
            return Ok(value);
        }
        if let Some(class) = self.imports.resolve_class(name) {
            return Ok(Value::Class(class));
        }
        if let Some(value) = self.static_field(name) {
            return Ok(value);
        }
        Err(property_not_found(None, name))
    }

    fn static_field(&self, name: &str) -> Option<Value> {
        self.imports
            .resolve_static(name)
            .and_then(|class| class.field(name))
    }

    /// The key a member access selects: the name itself, or the evaluated
    /// bracket expression.
    fn property_key(&mut self, property: &Property) -> EvalResult {
        match property {
            Property::Name(name) => Ok(Value::string(name)),
            Property::Expr(expr) => self.eval(expr),
        }
    }

    fn eval_member(&mut self, object: &Node, property: &Property) -> EvalResult {
        let base = self.eval(object)?;
        if base.is_null() {
            return Ok(Value::Null);
        }
        let key = self.property_key(property)?;
        match self.resolve_member(&base, &key) {
            Ok(value) => Ok(value),
            Err(err) => match self.imported_class(object, &base) {
                Some(class) => self
                    .resolve_member(&Value::Class(class), &key)
                    .or(Err(err)),
                None => Err(err),
            },
        }
    }

    fn resolve_member(&mut self, base: &Value, key: &Value) -> EvalResult {
        let resolver = Arc::clone(&self.resolver);
        match resolver.get_value(self, base, key)? {
            Resolution::Resolved(value) => Ok(value),
            Resolution::Unresolved => Err(property_not_found(
                Some(base.type_name()),
                &to_text(key),
            )),
        }
    }

    /// The imported class an identifier object names, when its evaluated
    /// value is something else.
    fn imported_class(&self, object: &Node, base: &Value) -> Option<Arc<ClassDef>> {
        let Node::Identifier(name) = object else {
            return None;
        };
        if matches!(base, Value::Class(_)) {
            return None;
        }
        self.imports.resolve_class(name)
    }

    /// The assignable location `node` denotes, without resolving it.
    pub fn value_reference(&mut self, node: &Node) -> Result<Option<ValueReference>, EvalError> {
        match node {
            Node::Identifier(name) => match self.variables.resolve(name).cloned() {
                Some(VariableBinding::Expression { node, .. }) => self.value_reference(&node),
                Some(VariableBinding::Value(_)) => Ok(None),
                None => Ok(Some(ValueReference {
                    base: Value::Null,
                    property: Value::string(name),
                })),
            },
            Node::Member { object, property } => {
                let base = self.eval(object)?;
                let property = self.property_key(property)?;
                Ok(Some(ValueReference { base, property }))
            }
            Node::Deferred(inner) | Node::Dynamic(inner) => self.value_reference(inner),
            _ => Ok(None),
        }
    }

    // Assignment

    /// Store `value` at the location `target` denotes.
    ///
    /// Only identifiers and member accesses are assignable; anything else
    /// is `InvalidAssignmentTarget`.
    pub fn set_value(&mut self, target: &Node, value: Value) -> Result<(), EvalError> {
        ensure_sufficient_stack(|| self.set_node(target, value))
    }

    fn set_node(&mut self, target: &Node, value: Value) -> Result<(), EvalError> {
        match target {
            Node::Identifier(name) => self.set_identifier(name, value),
            Node::Member { object, property } => {
                let base = self.eval(object)?;
                let key = self.property_key(property)?;
                self.set_member(&base, &key, &value)
            }
            Node::Deferred(inner) | Node::Dynamic(inner) => self.set_node(inner, value),
            _ => Err(invalid_assignment_target()),
        }
    }

    fn set_identifier(&mut self, name: &Name, value: Value) -> Result<(), EvalError> {
        if self.lambda_scopes.is_bound(name) {
            return Err(property_not_writable(name));
        }
        if let Some(binding) = self.variables.resolve(name).cloned() {
            return match binding {
                VariableBinding::Expression { node, .. } => self.set_node(&node, value),
                VariableBinding::Value(_) => Err(property_not_writable(name)),
            };
        }
        self.set_member(&Value::Null, &Value::string(name), &value)
    }

    fn set_member(&mut self, base: &Value, key: &Value, value: &Value) -> Result<(), EvalError> {
        let resolver = Arc::clone(&self.resolver);
        match resolver.set_value(self, base, key, value)? {
            Resolution::Resolved(()) => Ok(()),
            Resolution::Unresolved => Err(property_not_found(
                (!base.is_null()).then(|| base.type_name()),
                &to_text(key),
            )),
        }
    }

    // Types

    /// The type of the value `node` denotes.
    ///
    /// Identifiers and member accesses report the declared type from the
    /// resolver; a ternary evaluates its condition and reports the chosen
    /// branch; a sequence evaluates its left side first. Other nodes,
    /// assignments included, are evaluated and report the type of their
    /// value.
    pub fn get_type(&mut self, node: &Node) -> Result<ValueType, EvalError> {
        ensure_sufficient_stack(|| self.type_of(node))
    }

    fn type_of(&mut self, node: &Node) -> Result<ValueType, EvalError> {
        match node {
            Node::Identifier(name) => self.identifier_type(name),
            Node::Member { object, property } => {
                let base = self.eval(object)?;
                let key = self.property_key(property)?;
                if base.is_null() {
                    return Err(property_not_found(None, &to_text(&key)));
                }
                let resolver = Arc::clone(&self.resolver);
                match resolver.get_type(self, &base, &key)? {
                    Resolution::Resolved(ty) => Ok(ty),
                    Resolution::Unresolved => Err(property_not_found(
                        Some(base.type_name()),
                        &to_text(&key),
                    )),
                }
            }
            Node::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond)? {
                    self.type_of(then_branch)
                } else {
                    self.type_of(else_branch)
                }
            }
            Node::Semicolon { left, right } => {
                self.eval(left)?;
                self.type_of(right)
            }
            Node::Deferred(inner) | Node::Dynamic(inner) => self.type_of(inner),
            _ => Ok(self.eval(node)?.value_type()),
        }
    }

    fn identifier_type(&mut self, name: &Name) -> Result<ValueType, EvalError> {
        if let Some(value) = self.lambda_scopes.lookup(name) {
            return Ok(value.value_type());
        }
        if let Some(binding) = self.variables.resolve(name).cloned() {
            return match binding {
                VariableBinding::Expression { node, .. } => self.type_of(&node),
                VariableBinding::Value(value) => Ok(value.value_type()),
            };
        }
        let resolver = Arc::clone(&self.resolver);
        if let Resolution::Resolved(ty) =
            resolver.get_type(self, &Value::Null, &Value::string(name))?
        {
            return Ok(ty);
        }
        if let Some(class) = self.imports.resolve_class(name) {
            return Ok(Value::Class(class).value_type());
        }
        if let Some(value) = self.static_field(name) {
            return Ok(value.value_type());
        }
        Err(property_not_found(None, name))
    }

    // Read-only checks

    /// Whether assigning through `node` would fail. Nodes other than
    /// identifiers and member accesses are always read-only.
    pub fn is_read_only(&mut self, node: &Node) -> Result<bool, EvalError> {
        match node {
            Node::Identifier(name) => {
                if self.lambda_scopes.is_bound(name) {
                    return Ok(true);
                }
                if let Some(binding) = self.variables.resolve(name).cloned() {
                    return match binding {
                        VariableBinding::Expression { node, .. } => self.is_read_only(&node),
                        VariableBinding::Value(_) => Ok(true),
                    };
                }
                let resolver = Arc::clone(&self.resolver);
                match resolver.is_read_only(self, &Value::Null, &Value::string(name))? {
                    Resolution::Resolved(read_only) => Ok(read_only),
                    Resolution::Unresolved => Err(property_not_found(None, name)),
                }
            }
            Node::Member { object, property } => {
                let base = self.eval(object)?;
                let key = self.property_key(property)?;
                if base.is_null() {
                    return Err(property_not_found(None, &to_text(&key)));
                }
                let resolver = Arc::clone(&self.resolver);
                match resolver.is_read_only(self, &base, &key)? {
                    Resolution::Resolved(read_only) => Ok(read_only),
                    Resolution::Unresolved => Err(property_not_found(
                        Some(base.type_name()),
                        &to_text(&key),
                    )),
                }
            }
            Node::Deferred(inner) | Node::Dynamic(inner) => self.is_read_only(inner),
            _ => Ok(true),
        }
    }
}

fn number(literal: &NumberLiteral) -> EvalResult {
    match literal {
        NumberLiteral::Integer(i) => Ok(Value::Long(*i)),
        NumberLiteral::BigInteger(digits) => digits
            .parse::<BigInt>()
            .map(Value::big_integer)
            .map_err(parse_error),
        NumberLiteral::Float(bits) => Ok(Value::Double(f64::from_bits(*bits))),
    }
}
