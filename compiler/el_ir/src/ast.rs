//! Expression tree.
//!
//! `Node` is the tagged union the parser produces and the evaluator walks.
//! Nodes are immutable once built and `Send + Sync`, so a compiled tree can
//! be shared by any number of concurrent evaluations.

use std::fmt;
use std::sync::Arc;

/// Interned-by-refcount identifier text.
pub type Name = Arc<str>;

/// Binary operators.
///
/// `+=` is not here: it is string concatenation and has its own node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    ///
    /// Used in error messages to show the exact operator that failed.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod
        )
    }

    pub const fn is_relational(self) -> bool {
        matches!(self, Self::Lt | Self::LtEq | Self::Gt | Self::GtEq)
    }

    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// Arithmetic negation: `-x`
    Neg,
    /// Logical not: `!x` / `not x`
    Not,
    /// Emptiness test: `empty x`
    Empty,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
            Self::Empty => "empty ",
        }
    }
}

/// Numeric literal as written in source.
///
/// Floats are stored as bits so the tree stays `Eq + Hash`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberLiteral {
    /// Integer literal that fits in 64 bits.
    Integer(i64),
    /// Integer literal too large for 64 bits, kept as decimal digits.
    BigInteger(Name),
    /// Floating literal (`f64::to_bits`).
    Float(u64),
}

impl NumberLiteral {
    #[inline]
    pub fn float(value: f64) -> Self {
        NumberLiteral::Float(value.to_bits())
    }
}

/// Property selector of a member access.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    /// `object.name`
    Name(Name),
    /// `object[expr]`
    Expr(Box<Node>),
}

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Null,
    Bool(bool),
    Number(NumberLiteral),
    String(Name),

    /// Bare identifier, or `ns:name` for a qualified function reference.
    Identifier(Name),

    /// `object.property` / `object[property]`
    Member {
        object: Box<Node>,
        property: Property,
    },

    /// `callee(args)`; the callee decides the dispatch path.
    Call { callee: Box<Node>, args: Vec<Node> },

    /// `(p1, p2) -> body`. The body is shared with every closure created
    /// from this node.
    Lambda { params: Vec<Name>, body: Arc<Node> },

    List(Vec<Node>),
    Set(Vec<Node>),
    Map(Vec<(Node, Node)>),

    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    Unary { op: UnaryOp, operand: Box<Node> },

    /// `cond ? then_branch : else_branch`
    Ternary {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },

    /// `target = value`
    Assign { target: Box<Node>, value: Box<Node> },

    /// `left += right`, string concatenation.
    Concat { left: Box<Node>, right: Box<Node> },

    /// `left ; right`
    Semicolon { left: Box<Node>, right: Box<Node> },

    /// `#{...}` segment; removed by template compilation.
    Deferred(Box<Node>),

    /// `${...}` segment; removed by template compilation.
    Dynamic(Box<Node>),
}

impl Node {
    pub fn string(s: impl Into<Name>) -> Self {
        Node::String(s.into())
    }

    pub fn ident(name: impl Into<Name>) -> Self {
        Node::Identifier(name.into())
    }

    pub fn int(value: i64) -> Self {
        Node::Number(NumberLiteral::Integer(value))
    }

    pub fn float(value: f64) -> Self {
        Node::Number(NumberLiteral::float(value))
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn member(object: Node, name: impl Into<Name>) -> Self {
        Node::Member {
            object: Box::new(object),
            property: Property::Name(name.into()),
        }
    }

    pub fn index(object: Node, key: Node) -> Self {
        Node::Member {
            object: Box::new(object),
            property: Property::Expr(Box::new(key)),
        }
    }

    pub fn call(callee: Node, args: Vec<Node>) -> Self {
        Node::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn lambda(params: Vec<Name>, body: Node) -> Self {
        Node::Lambda {
            params,
            body: Arc::new(body),
        }
    }

    pub fn concat(left: Node, right: Node) -> Self {
        Node::Concat {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// True for nodes that can appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Node::Identifier(_) | Node::Member { .. })
    }

    /// Strip a `Deferred`/`Dynamic` wrapper.
    #[must_use]
    pub fn unwrap_delimiter(self) -> Node {
        match self {
            Node::Deferred(inner) | Node::Dynamic(inner) => *inner,
            other => other,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Node]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_string_literal(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "'")?;
    for c in s.chars() {
        match c {
            '\'' => write!(f, "\\'")?,
            '\\' => write!(f, "\\\\")?,
            _ => write!(f, "{c}")?,
        }
    }
    write!(f, "'")
}

/// Renders the node back to fully parenthesized EL source.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(b) => write!(f, "{b}"),
            Node::Number(NumberLiteral::Integer(n)) => write!(f, "{n}"),
            Node::Number(NumberLiteral::BigInteger(digits)) => write!(f, "{digits}"),
            Node::Number(NumberLiteral::Float(bits)) => write!(f, "{:?}", f64::from_bits(*bits)),
            Node::String(s) => write_string_literal(f, s),
            Node::Identifier(name) => write!(f, "{name}"),
            Node::Member { object, property } => match property {
                Property::Name(name) => write!(f, "{object}.{name}"),
                Property::Expr(key) => write!(f, "{object}[{key}]"),
            },
            Node::Call { callee, args } => {
                write!(f, "{callee}(")?;
                write_list(f, args)?;
                write!(f, ")")
            }
            Node::Lambda { params, body } => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") -> {body}")
            }
            Node::List(items) => {
                write!(f, "[")?;
                write_list(f, items)?;
                write!(f, "]")
            }
            Node::Set(items) => {
                write!(f, "{{")?;
                write_list(f, items)?;
                write!(f, "}}")
            }
            Node::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Node::Binary { op, left, right } => {
                write!(f, "({left} {} {right})", op.as_symbol())
            }
            Node::Unary { op, operand } => write!(f, "({}{operand})", op.as_symbol()),
            Node::Ternary {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "({cond} ? {then_branch} : {else_branch})"),
            Node::Assign { target, value } => write!(f, "({target} = {value})"),
            Node::Concat { left, right } => write!(f, "({left} += {right})"),
            Node::Semicolon { left, right } => write!(f, "({left}; {right})"),
            Node::Deferred(inner) => write!(f, "#{{{inner}}}"),
            Node::Dynamic(inner) => write!(f, "${{{inner}}}"),
        }
    }
}
