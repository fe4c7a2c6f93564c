//! EL front door: compile expression text once, evaluate it many times.
//!
//! # Architecture
//!
//! ```text
//! "${a + 1}"
//!     │
//!     ▼
//! ExpressionFactory ──► ExpressionCache (source text → CompiledTemplate)
//!     │
//!     ▼
//! ValueExpression ──► get_value / get_type / is_read_only / set_value
//!     │
//!     ▼
//! EvalContext (el_eval)
//! ```
//!
//! [`ElProcessor`] bundles a factory, a bean registry and a context for
//! callers that just want to evaluate bare expression strings.

mod cache;
pub mod commands;
mod config;
mod expression;
mod factory;
mod processor;

pub use cache::{ConcurrentCache, ExpressionCache, NoCache};
pub use config::ProcessorConfig;
pub use expression::ValueExpression;
pub use factory::ExpressionFactory;
pub use processor::ElProcessor;

pub use el_eval::{
    errors, ClassDef, DynamicBean, ErrorCategory, EvalContext, EvalError, EvalResult,
    NativeFunction, Primitive, Value, ValueType,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
///
/// ```bash
/// RUST_LOG=el_eval=trace el eval "[1, 2].map(x -> x * 2)"
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
