use std::sync::atomic::{AtomicUsize, Ordering};

use el_value::{ErrorCategory, Primitive, ValueMap};
use pretty_assertions::assert_eq;

use super::*;

/// Resolves every `get_value` to a fixed answer (or never), counting calls.
struct Counting {
    answer: Option<Value>,
    calls: Arc<AtomicUsize>,
}

impl Counting {
    fn new(answer: Option<Value>) -> (Arc<dyn PropertyResolver>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = Counting {
            answer,
            calls: Arc::clone(&calls),
        };
        (Arc::new(resolver), calls)
    }

    fn answer<T>(&self, value: impl FnOnce(Value) -> T) -> ResolveResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.answer.clone() {
            Some(answer) => Resolution::Resolved(value(answer)),
            None => Resolution::Unresolved,
        })
    }
}

impl PropertyResolver for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn get_value(&self, _: &mut EvalContext, _: &Value, _: &Value) -> ResolveResult<Value> {
        self.answer(|v| v)
    }

    fn get_type(&self, _: &mut EvalContext, _: &Value, _: &Value) -> ResolveResult<ValueType> {
        self.answer(|v| v.value_type())
    }

    fn set_value(
        &self,
        _: &mut EvalContext,
        _: &Value,
        _: &Value,
        _: &Value,
    ) -> ResolveResult<()> {
        self.answer(|_| ())
    }

    fn is_read_only(&self, _: &mut EvalContext, _: &Value, _: &Value) -> ResolveResult<bool> {
        self.answer(|_| true)
    }
}

fn key(name: &str) -> Value {
    Value::string(name)
}

#[test]
fn first_resolution_short_circuits_chain() {
    let (a, a_calls) = Counting::new(Some(Value::Null));
    let (b, b_calls) = Counting::new(Some(Value::Long(2)));
    let chain = CompositeResolver::new(vec![a, b]);
    let mut ctx = EvalContext::new();

    // A resolved to null: still resolved, and B is never asked.
    let answer = chain.get_value(&mut ctx, &Value::Null, &key("x")).unwrap();
    assert_eq!(answer, Resolution::Resolved(Value::Null));
    chain.set_value(&mut ctx, &Value::Null, &key("x"), &Value::Long(1)).unwrap();
    chain.is_read_only(&mut ctx, &Value::Null, &key("x")).unwrap();

    assert_eq!(a_calls.load(Ordering::SeqCst), 3);
    assert_eq!(b_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn unresolved_falls_through_in_order() {
    let (a, a_calls) = Counting::new(None);
    let (b, b_calls) = Counting::new(Some(Value::Long(2)));
    let chain = CompositeResolver::new(vec![a, b]);
    let mut ctx = EvalContext::new();

    let answer = chain.get_value(&mut ctx, &Value::Null, &key("x")).unwrap();
    assert_eq!(answer, Resolution::Resolved(Value::Long(2)));
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn exhausted_chain_is_unresolved_not_error() {
    let (a, _) = Counting::new(None);
    let chain = CompositeResolver::new(vec![a]);
    let mut ctx = EvalContext::new();

    assert_eq!(
        chain.get_value(&mut ctx, &Value::Null, &key("x")).unwrap(),
        Resolution::Unresolved
    );
    assert_eq!(
        chain.invoke(&mut ctx, &Value::Null, "f", &[]).unwrap(),
        Resolution::Unresolved
    );
}

#[test]
fn with_first_prepends() {
    let (a, a_calls) = Counting::new(Some(Value::Long(1)));
    let chain = CompositeResolver::standard(BeanRegistry::new(), ResolverOptions::default());
    let extended = chain.with_first(a);
    let mut ctx = EvalContext::new();

    assert_eq!(extended.len(), chain.len() + 1);
    assert_eq!(extended.resolvers()[0].name(), "counting");
    let answer = extended.get_value(&mut ctx, &Value::Null, &key("x")).unwrap();
    assert_eq!(answer, Resolution::Resolved(Value::Long(1)));
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn standard_chain_order() {
    let chain = CompositeResolver::standard(BeanRegistry::new(), ResolverOptions::default());
    let names: Vec<_> = chain.resolvers().iter().map(|r| r.name()).collect();
    assert_eq!(
        names,
        vec!["bean-name", "static-field", "map", "list", "array", "stream", "string", "bean"]
    );
}

#[test]
fn bean_name_resolver() {
    let beans = BeanRegistry::new();
    beans.define("answer", Value::Long(42));
    let resolver = BeanNameResolver::new(beans.clone(), ResolverOptions::default());
    let mut ctx = EvalContext::new();

    assert_eq!(
        resolver.get_value(&mut ctx, &Value::Null, &key("answer")).unwrap(),
        Resolution::Resolved(Value::Long(42))
    );
    assert_eq!(
        resolver.get_value(&mut ctx, &Value::Null, &key("other")).unwrap(),
        Resolution::Unresolved
    );
    // Only null bases are bean names.
    assert_eq!(
        resolver.get_value(&mut ctx, &Value::Long(1), &key("answer")).unwrap(),
        Resolution::Unresolved
    );
    // Unknown names are not created without bean creation.
    assert_eq!(
        resolver
            .set_value(&mut ctx, &Value::Null, &key("other"), &Value::Long(1))
            .unwrap(),
        Resolution::Unresolved
    );
    assert!(!beans.contains("other"));
}

#[test]
fn bean_registry_null_removes() {
    let beans = BeanRegistry::new();
    beans.define("a", Value::Long(1));
    assert_eq!(beans.len(), 1);
    beans.define("a", Value::Null);
    assert!(beans.is_empty());
}

#[test]
fn read_only_chain_rejects_writes() {
    let beans = BeanRegistry::new();
    beans.define("a", Value::Long(1));
    let options = ResolverOptions {
        read_only: true,
        allow_bean_creation: true,
    };
    let chain = CompositeResolver::standard(beans.clone(), options);
    let mut ctx = EvalContext::new();

    let err = chain
        .set_value(&mut ctx, &Value::Null, &key("a"), &Value::Long(2))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotWritable);

    let list = Value::list(vec![Value::Long(1)]);
    let err = chain
        .set_value(&mut ctx, &list, &Value::Long(0), &Value::Long(2))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotWritable);
    assert_eq!(
        chain.is_read_only(&mut ctx, &Value::Null, &key("a")).unwrap(),
        Resolution::Resolved(true)
    );
}

#[test]
fn list_resolver_indices() {
    let resolver = ListResolver::new(false);
    let list = Value::list(vec![Value::Long(10), Value::Long(20)]);
    let mut ctx = EvalContext::new();

    assert_eq!(
        resolver.get_value(&mut ctx, &list, &key("1")).unwrap(),
        Resolution::Resolved(Value::Long(20))
    );
    assert_eq!(
        resolver.get_value(&mut ctx, &list, &Value::Long(-1)).unwrap(),
        Resolution::Resolved(Value::Null)
    );
    let err = resolver.get_value(&mut ctx, &list, &key("x")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotFound);

    resolver
        .set_value(&mut ctx, &list, &Value::Long(0), &Value::string("a"))
        .unwrap();
    assert_eq!(
        resolver.get_value(&mut ctx, &list, &Value::Long(0)).unwrap(),
        Resolution::Resolved(Value::string("a"))
    );
    let err = resolver
        .set_value(&mut ctx, &list, &Value::Long(5), &Value::Null)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotFound);
}

#[test]
fn array_resolver_coerces_to_component() {
    let resolver = ArrayResolver::new(false);
    let int = ValueType::Primitive(Primitive::Int);
    let array = Value::array(int.clone(), vec![Value::Int(1), Value::Int(2)]);
    let mut ctx = EvalContext::new();

    assert_eq!(
        resolver.get_value(&mut ctx, &array, &key("length")).unwrap(),
        Resolution::Resolved(Value::Int(2))
    );
    resolver
        .set_value(&mut ctx, &array, &Value::Long(1), &Value::string("7"))
        .unwrap();
    assert_eq!(
        resolver.get_value(&mut ctx, &array, &Value::Long(1)).unwrap(),
        Resolution::Resolved(Value::Int(7))
    );
    assert_eq!(
        resolver.get_type(&mut ctx, &array, &Value::Long(0)).unwrap(),
        Resolution::Resolved(int)
    );
}

#[test]
fn map_resolver_entries_and_methods() {
    let resolver = MapResolver::new(false);
    let mut entries = ValueMap::new();
    entries.insert(key("a"), Value::Long(1));
    let map = Value::map(entries);
    let mut ctx = EvalContext::new();

    assert_eq!(
        resolver.get_value(&mut ctx, &map, &key("a")).unwrap(),
        Resolution::Resolved(Value::Long(1))
    );
    assert_eq!(
        resolver.get_value(&mut ctx, &map, &key("b")).unwrap(),
        Resolution::Resolved(Value::Null)
    );
    resolver
        .set_value(&mut ctx, &map, &key("b"), &Value::Long(2))
        .unwrap();
    assert_eq!(
        resolver.invoke(&mut ctx, &map, "size", &[]).unwrap(),
        Resolution::Resolved(Value::Int(2))
    );
    assert_eq!(
        resolver
            .invoke(&mut ctx, &map, "containsKey", &[key("b")])
            .unwrap(),
        Resolution::Resolved(Value::Bool(true))
    );
}

#[test]
fn static_field_resolver() {
    let resolver = StaticFieldResolver;
    let Some(math) = EvalContext::new().imports().resolve_class("Math") else {
        panic!("Math is imported by default");
    };
    let class = Value::Class(math);
    let mut ctx = EvalContext::new();

    assert_eq!(
        resolver.get_value(&mut ctx, &class, &key("PI")).unwrap(),
        Resolution::Resolved(Value::Double(std::f64::consts::PI))
    );
    let err = resolver.get_value(&mut ctx, &class, &key("TAU")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotFound);
    let err = resolver
        .set_value(&mut ctx, &class, &key("PI"), &Value::Long(3))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotWritable);
    assert_eq!(
        resolver
            .invoke(&mut ctx, &class, "max", &[Value::Long(1), Value::Long(4)])
            .unwrap(),
        Resolution::Resolved(Value::Long(4))
    );
}

#[test]
fn stream_resolver_rejects_bad_arity() {
    let resolver = StreamResolver;
    let list = Value::list(vec![Value::Long(1)]);
    let mut ctx = EvalContext::new();

    let err = resolver.invoke(&mut ctx, &list, "filter", &[]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Evaluation);
    let err = resolver
        .invoke(&mut ctx, &list, "filter", &[Value::Long(1)])
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Evaluation);
    assert_eq!(
        resolver.invoke(&mut ctx, &list, "frobnicate", &[]).unwrap(),
        Resolution::Unresolved
    );
}

#[test]
fn string_resolver_methods() {
    let resolver = StringMethodResolver;
    let text = Value::string("Hello");
    let mut ctx = EvalContext::new();

    assert_eq!(
        resolver.invoke(&mut ctx, &text, "indexOf", &[key("l")]).unwrap(),
        Resolution::Resolved(Value::Int(2))
    );
    assert_eq!(
        resolver.invoke(&mut ctx, &text, "charAt", &[Value::Long(1)]).unwrap(),
        Resolution::Resolved(Value::Char('e'))
    );
    assert!(resolver
        .invoke(&mut ctx, &text, "charAt", &[Value::Long(9)])
        .is_err());
    // Non-strings are someone else's.
    assert_eq!(
        resolver.invoke(&mut ctx, &Value::Long(1), "length", &[]).unwrap(),
        Resolution::Unresolved
    );
}

#[test]
fn index_conversion() {
    assert_eq!(index_of(&Value::Long(3)).unwrap(), 3);
    assert_eq!(index_of(&key("2")).unwrap(), 2);
    assert_eq!(index_of(&Value::Bool(true)).unwrap(), 1);
    assert!(index_of(&Value::list(vec![])).is_err());

    assert_eq!(checked_index(1, 2), Some(1));
    assert_eq!(checked_index(2, 2), None);
    assert_eq!(checked_index(-1, 2), None);
}
