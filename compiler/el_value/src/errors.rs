//! Error types for expression evaluation.
//!
//! `EvalErrorKind` carries the structured condition; factory functions
//! (e.g. `property_not_found()`) are the public way to build errors and fill
//! in both `kind` and `message`. Every kind maps onto one of five
//! [`ErrorCategory`] values that callers match on.

use std::fmt;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Coarse error taxonomy exposed to embedders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Identifier or member resolution exhausted the resolver chain.
    PropertyNotFound,
    /// Assignment target is read-only or not assignable at all.
    PropertyNotWritable,
    /// No callable matched a method or function call.
    MethodNotFound,
    /// The coercion engine could not convert a value.
    CannotConvert,
    /// Everything else.
    Evaluation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PropertyNotFound => "PropertyNotFound",
            Self::PropertyNotWritable => "PropertyNotWritable",
            Self::MethodNotFound => "MethodNotFound",
            Self::CannotConvert => "CannotConvert",
            Self::Evaluation => "Evaluation",
        };
        f.write_str(name)
    }
}

/// Typed error condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Resolution
    PropertyNotFound {
        property: String,
        base: Option<String>,
    },
    PropertyNotWritable {
        property: String,
    },
    InvalidAssignmentTarget,
    MethodNotFound {
        method: String,
        base: Option<String>,
    },

    // Coercion
    CannotConvert {
        value: String,
        from: String,
        target: String,
    },

    // Arithmetic / operators
    DivisionByZero,
    ModuloByZero,
    NotComparable {
        op: &'static str,
        left: String,
        right: String,
    },

    // Calls
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    NotCallable {
        type_name: String,
    },

    // Compilation
    Parse {
        message: String,
    },

    /// Catch-all for conditions without a dedicated kind.
    Custom {
        message: String,
    },
}

impl EvalErrorKind {
    /// The category this condition is reported under.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PropertyNotFound { .. } => ErrorCategory::PropertyNotFound,
            Self::PropertyNotWritable { .. } | Self::InvalidAssignmentTarget => {
                ErrorCategory::PropertyNotWritable
            }
            Self::MethodNotFound { .. } => ErrorCategory::MethodNotFound,
            Self::CannotConvert { .. } => ErrorCategory::CannotConvert,
            Self::DivisionByZero
            | Self::ModuloByZero
            | Self::NotComparable { .. }
            | Self::ArityMismatch { .. }
            | Self::NotCallable { .. }
            | Self::Parse { .. }
            | Self::Custom { .. } => ErrorCategory::Evaluation,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PropertyNotFound { property, base } => match base {
                Some(base) => write!(f, "property '{property}' not found on type {base}"),
                None => write!(f, "identifier '{property}' cannot be resolved"),
            },
            Self::PropertyNotWritable { property } => {
                write!(f, "property '{property}' is not writable")
            }
            Self::InvalidAssignmentTarget => {
                write!(f, "left side of assignment is not an identifier or member access")
            }
            Self::MethodNotFound { method, base } => match base {
                Some(base) => write!(f, "method '{method}' not found on type {base}"),
                None => write!(f, "function '{method}' not found"),
            },
            Self::CannotConvert {
                value,
                from,
                target,
            } => write!(f, "cannot convert '{value}' of type {from} to {target}"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::NotComparable { op, left, right } => {
                write!(f, "operator `{op}` cannot compare {left} with {right}")
            }
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                if name.is_empty() {
                    write!(f, "expected {expected} {arg_word}, got {got}")
                } else {
                    write!(f, "{name} expects {expected} {arg_word}, got {got}")
                }
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::Parse { message } => write!(f, "failed to parse expression: {message}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Additional context attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured condition.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-made
    /// errors.
    pub message: String,
    /// Secondary context, outermost last.
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            notes: Vec::new(),
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Add a context note to this error.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(EvalNote::new(note));
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {}", note.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Resolution Errors

/// An identifier (`base` is `None`) or member could not be resolved.
#[cold]
pub fn property_not_found(base: Option<&str>, property: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PropertyNotFound {
        property: property.to_string(),
        base: base.map(str::to_string),
    })
}

/// The assignment target is read-only.
#[cold]
pub fn property_not_writable(property: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PropertyNotWritable {
        property: property.to_string(),
    })
}

/// The left side of `=` is neither an identifier nor a member access.
#[cold]
pub fn invalid_assignment_target() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignmentTarget)
}

/// No method (`base` is `Some`) or function (`base` is `None`) matched.
#[cold]
pub fn method_not_found(base: Option<&str>, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MethodNotFound {
        method: method.to_string(),
        base: base.map(str::to_string),
    })
}

// Coercion Errors

/// The coercion engine could not convert `value` to `target`.
#[cold]
pub fn cannot_convert(value: &Value, target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotConvert {
        value: value.to_string(),
        from: value.type_name().to_string(),
        target: target.to_string(),
    })
}

// Arithmetic Errors

/// Division by zero error.
#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// Modulo by zero error.
#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

/// Relational operator applied to values with no common ordering.
#[cold]
pub fn not_comparable(op: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotComparable {
        op,
        left: left.type_name().to_string(),
        right: right.type_name().to_string(),
    })
}

// Call Errors

/// A lambda was invoked with fewer arguments than it has parameters.
#[cold]
pub fn wrong_lambda_args(expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: "lambda".to_string(),
        expected,
        got,
    })
}

/// Wrong argument count for a named method or function.
#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Wrong argument type for a method.
#[cold]
pub fn wrong_arg_type(method: &str, expected: &str) -> EvalError {
    EvalError::new(format!("{method} expects a {expected} argument"))
}

/// Value is not callable.
#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

// Compilation Errors

/// Expression text failed to lex, parse or compile.
#[cold]
pub fn parse_error(message: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Parse {
        message: message.to_string(),
    })
}
