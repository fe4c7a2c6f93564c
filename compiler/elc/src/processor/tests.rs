use el_eval::{DynamicBean, ErrorCategory, Primitive, Value, ValueType};
use pretty_assertions::assert_eq;

use super::*;

fn customer() -> Value {
    Value::bean(
        DynamicBean::new("Customer")
            .with_property("age", ValueType::Primitive(Primitive::Int), Value::Int(0))
            .with_property("name", ValueType::String, Value::Null)
            .with_read_only_property("id", ValueType::Primitive(Primitive::Long), Value::Long(7)),
    )
}

#[test]
fn define_set_eval() {
    let mut el = ElProcessor::new();
    el.define_bean("customer", customer());

    el.set_value("customer.age", Value::Long(10)).unwrap();
    assert_eq!(el.eval("customer.age").unwrap(), Value::Int(10));
}

#[test]
fn get_value_coerces() {
    let mut el = ElProcessor::new();
    assert_eq!(
        el.get_value("1 + 2", ValueType::Primitive(Primitive::Double))
            .unwrap(),
        Value::Double(3.0)
    );
    assert_eq!(
        el.get_value("40 + 2", ValueType::String).unwrap(),
        Value::string("42")
    );
}

#[test]
fn assignment_creates_bean() {
    let mut el = ElProcessor::new();
    assert_eq!(el.eval("total = 5").unwrap(), Value::Long(5));
    assert!(el.beans().contains("total"));
    assert_eq!(el.eval("total * 2").unwrap(), Value::Long(10));
}

#[test]
fn bean_creation_can_be_disabled() {
    let mut el = ElProcessor::with_config(ProcessorConfig::default().allow_bean_creation(false));
    let err = el.eval("total = 5").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotFound);
}

#[test]
fn read_only_rejects_writes() {
    let mut el = ElProcessor::with_config(ProcessorConfig::default().read_only(true));
    el.define_bean("customer", customer());

    let err = el.set_value("customer.age", Value::Long(10)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotWritable);

    let err = el.eval("1 + 1 == 2 ? 10 : a = 5").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotWritable);
}

#[test]
fn read_only_property() {
    let mut el = ElProcessor::new();
    el.define_bean("customer", customer());

    let err = el.set_value("customer.id", Value::Long(1)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotWritable);
    assert_eq!(el.eval("customer.id").unwrap(), Value::Long(7));
}

#[test]
fn expression_type_and_read_only() {
    let mut el = ElProcessor::new();
    el.define_bean("customer", customer());

    let age = el.expression("customer.age", ValueType::Any).unwrap();
    assert_eq!(
        age.get_type(el.context_mut()).unwrap(),
        ValueType::Primitive(Primitive::Int)
    );
    assert!(!age.is_read_only(el.context_mut()).unwrap());

    let id = el.expression("customer.id", ValueType::Any).unwrap();
    assert!(id.is_read_only(el.context_mut()).unwrap());
}

#[test]
fn removing_a_bean() {
    let mut el = ElProcessor::new();
    el.define_bean("x", Value::Long(1));
    el.define_bean("x", Value::Null);

    let err = el.eval("x").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotFound);
}

#[test]
fn mapped_function() {
    let mut el = ElProcessor::new();
    el.define_function(
        "fn",
        "twice",
        NativeFunction::new("twice", vec![ValueType::LONG], |args| {
            Ok(match args[0] {
                Value::Long(n) => Value::Long(n * 2),
                _ => Value::Null,
            })
        }),
    );

    assert_eq!(el.eval("fn:twice(21)").unwrap(), Value::Long(42));
    assert_eq!(el.eval("fn:twice('4')").unwrap(), Value::Long(8));
}

#[test]
fn variable_writes_through() {
    let mut el = ElProcessor::new();
    el.define_bean("customer", customer());
    el.define_variable("age", "customer.age", ValueType::Any)
        .unwrap();

    el.set_value("age", Value::Long(30)).unwrap();
    assert_eq!(el.eval("customer.age").unwrap(), Value::Int(30));
    assert_eq!(el.eval("age + 1").unwrap(), Value::Long(31));
}

#[test]
fn imports() {
    let mut el = ElProcessor::new();
    el.define_enum("shop.Color", &["RED", "GREEN"]);
    el.import_static("Math.max").unwrap();

    assert_eq!(el.eval("Color.GREEN == 'GREEN'").unwrap(), Value::Bool(true));
    assert_eq!(el.eval("max(3, 9)").unwrap(), Value::Long(9));
    assert_eq!(el.eval("Integer.MAX_VALUE").unwrap(), Value::Int(i32::MAX));
    assert!(el.import_static("Math.nope").is_err());
}

#[test]
fn compiled_once() {
    let mut el = ElProcessor::new();
    el.eval("1 + 2").unwrap();
    el.eval("1 + 2").unwrap();
    assert_eq!(el.factory().cache().len(), 1);

    let mut uncached = ElProcessor::with_config(ProcessorConfig::default().cache(false));
    uncached.eval("1 + 2").unwrap();
    assert!(uncached.factory().cache().is_empty());
}
