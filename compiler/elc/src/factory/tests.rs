use std::sync::Arc;

use el_eval::{ErrorCategory, EvalContext, Value, ValueType};
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn compile_populates_cache() {
    let factory = ExpressionFactory::default();
    let first = factory.compile("${1 + 2}").unwrap();
    let second = factory.compile("${1 + 2}").unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.cache().len(), 1);
}

#[test]
fn uncached_recompiles() {
    let factory = ExpressionFactory::uncached();
    let first = factory.compile("${1 + 2}").unwrap();
    let second = factory.compile("${1 + 2}").unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert!(factory.cache().is_empty());
}

#[test]
fn parse_failure_is_evaluation_error() {
    let factory = ExpressionFactory::default();
    let err = factory.compile("${1 +}").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Evaluation);
    assert!(factory.cache().is_empty());
}

#[test]
fn mixed_delimiters_rejected() {
    let factory = ExpressionFactory::default();
    let err = factory
        .create_value_expression("${a}#{b}", ValueType::Any)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Evaluation);
}

#[test]
fn created_expression_coerces() {
    let factory = ExpressionFactory::default();
    let expr = factory
        .create_value_expression("${1 + 2}", ValueType::DOUBLE)
        .unwrap();
    let mut ctx = EvalContext::new();

    assert_eq!(expr.get_value(&mut ctx).unwrap(), Value::Double(3.0));
}

#[test]
fn shared_cache_between_factories() {
    let cache: Arc<dyn ExpressionCache> = Arc::new(ConcurrentCache::new());
    let a = ExpressionFactory::new(Arc::clone(&cache));
    let b = ExpressionFactory::new(Arc::clone(&cache));

    let first = a.compile("${x}").unwrap();
    let second = b.compile("${x}").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}
