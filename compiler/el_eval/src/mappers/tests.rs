use super::*;

fn constant(value: i64) -> NativeFunction {
    NativeFunction::new("constant", vec![], move |_| Ok(Value::Long(value)))
}

#[test]
fn test_function_mapper_qualifies_prefix() {
    let mut functions = FunctionMapper::new();
    functions.map_function("fn", "one", constant(1));
    functions.map_function("", "two", constant(2));

    assert!(functions.resolve("fn:one").is_some());
    assert!(functions.resolve("one").is_none());
    assert!(functions.resolve("two").is_some());
    assert_eq!(functions.len(), 2);
}

#[test]
fn test_function_mapper_replaces_existing() {
    let mut functions = FunctionMapper::new();
    functions.map_function("fn", "f", constant(1));
    functions.map_function("fn", "f", constant(2));

    let f = functions.resolve("fn:f");
    assert!(matches!(f.map(|f| f.call(&[])), Some(Ok(Value::Long(2)))));
    assert_eq!(functions.len(), 1);
}

#[test]
fn test_variable_mapper_bindings() {
    let mut variables = VariableMapper::new();
    variables.bind_value("answer", Value::Long(42));
    variables.bind_expression("expr", Arc::new(Node::int(1)), ValueType::String);

    assert!(matches!(
        variables.resolve("answer"),
        Some(VariableBinding::Value(Value::Long(42)))
    ));
    assert!(matches!(
        variables.resolve("expr"),
        Some(VariableBinding::Expression {
            expected: ValueType::String,
            ..
        })
    ));
    assert!(variables.remove("answer").is_some());
    assert!(variables.resolve("answer").is_none());
    assert_eq!(variables.len(), 1);
}
