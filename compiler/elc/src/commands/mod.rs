//! Command handlers for the `el` binary.
//!
//! Each handler prints its result to stdout and exits with status 1 after
//! printing any error to stderr.

mod debug;
mod eval;

pub use debug::{lex_expression, parse_expression};
pub use eval::{eval_expression, evaluate, parse_eval_options, EvalOptions};

/// Template text (`Hello ${name}`) rather than a bare expression.
fn is_template(source: &str) -> bool {
    source.contains("${") || source.contains("#{")
}
