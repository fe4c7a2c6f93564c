use super::*;
use crate::errors::ErrorCategory;
use crate::types::Primitive;
use pretty_assertions::assert_eq;

fn customer() -> DynamicBean {
    DynamicBean::new("Customer")
        .with_property("name", ValueType::String, Value::string("Ada"))
        .with_property("age", ValueType::Primitive(Primitive::Int), Value::Int(0))
        .with_read_only_property("id", ValueType::LONG, Value::Long(7))
        .with_method("greet", |bean, args| {
            let name = bean.get("name").unwrap_or(Value::Null);
            let greeting = args.first().map_or("Hello".to_string(), ToString::to_string);
            Ok(Value::string(format!("{greeting}, {name}")))
        })
}

#[test]
fn get_and_set() {
    let bean = customer();
    assert_eq!(bean.get("age"), Some(Value::Int(0)));
    bean.set("age", Value::Int(10)).unwrap();
    assert_eq!(bean.get("age"), Some(Value::Int(10)));
    assert_eq!(bean.get("missing"), None);
}

#[test]
fn read_only_property_rejects_set() {
    let bean = customer();
    assert!(bean.is_read_only("id"));
    let err = bean.set("id", Value::Long(1)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotWritable);
}

#[test]
fn unknown_property_set_is_not_found() {
    let err = customer().set("nope", Value::Null).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotFound);
}

#[test]
fn property_types() {
    let bean = customer();
    assert_eq!(
        bean.property_type("age"),
        Some(ValueType::Primitive(Primitive::Int))
    );
    assert_eq!(bean.property_type("nope"), None);
    assert_eq!(
        bean.property_names(),
        vec![Name::from("name"), Name::from("age"), Name::from("id")]
    );
}

#[test]
fn invoke_methods() {
    let bean = customer();
    let result = bean.invoke("greet", &[Value::string("Hi")]).unwrap().unwrap();
    assert_eq!(result, Value::string("Hi, Ada"));
    assert!(bean.invoke("missing", &[]).is_none());
}

#[test]
fn describe_lists_properties_in_order() {
    assert_eq!(customer().describe(), "Customer{name=Ada, age=0, id=7}");
}
