use std::sync::Arc;

use el_ir::Node;
use el_parse::parse_expression;
use el_value::{
    DynamicBean, ErrorCategory, EvalError, NativeFunction, Primitive, Value, ValueType,
};
use pretty_assertions::assert_eq;

use super::*;
use crate::resolvers::{BeanRegistry, CompositeResolver, ResolverOptions};

fn parse(source: &str) -> Node {
    parse_expression(source).unwrap()
}

fn eval_in(ctx: &mut EvalContext, source: &str) -> Result<Value, EvalError> {
    ctx.eval(&parse(source))
}

fn eval(source: &str) -> Value {
    eval_in(&mut EvalContext::new(), source).unwrap()
}

fn category(ctx: &mut EvalContext, source: &str) -> ErrorCategory {
    eval_in(ctx, source).unwrap_err().category()
}

fn context(beans: &BeanRegistry, read_only: bool) -> EvalContext {
    let options = ResolverOptions {
        read_only,
        allow_bean_creation: true,
    };
    EvalContext::builder()
        .resolver(Arc::new(CompositeResolver::standard(beans.clone(), options)))
        .build()
}

fn customer() -> Value {
    Value::bean(
        DynamicBean::new("Customer")
            .with_property("age", ValueType::Primitive(Primitive::Int), Value::Int(0))
            .with_property("name", ValueType::String, Value::Null)
            .with_read_only_property("id", ValueType::Primitive(Primitive::Long), Value::Long(7)),
    )
}

fn longs(values: &[i64]) -> Value {
    Value::list(values.iter().map(|v| Value::Long(*v)).collect())
}

// Operators

#[test]
fn arithmetic_literals() {
    assert_eq!(eval("1 + 2"), Value::Long(3));
    assert_eq!(eval("1.5 * 2"), Value::Double(3.0));
    assert_eq!(eval("7 div 2"), Value::Double(3.5));
    assert_eq!(eval("10 mod 3"), Value::Long(1));
    assert_eq!(eval("-(2 + 3)"), Value::Long(-5));
    assert!(matches!(
        eval("123456789012345678901234567890 + 1"),
        Value::BigInteger(_)
    ));
}

#[test]
fn null_operand_arithmetic_is_zero() {
    assert_eq!(eval("null + 5"), Value::Long(0));
    assert_eq!(eval("null * null"), Value::Long(0));
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(eval("true && false"), Value::Bool(false));
    assert_eq!(eval("false || true"), Value::Bool(true));
    // `missing` is never looked up.
    assert_eq!(eval("false && missing"), Value::Bool(false));
    assert_eq!(eval("true or missing"), Value::Bool(true));

    let mut ctx = EvalContext::new();
    assert_eq!(category(&mut ctx, "true && missing"), ErrorCategory::PropertyNotFound);
}

#[test]
fn empty_operator() {
    assert_eq!(eval("empty ''"), Value::Bool(true));
    assert_eq!(eval("empty 'a'"), Value::Bool(false));
    assert_eq!(eval("empty null"), Value::Bool(true));
    assert_eq!(eval("empty []"), Value::Bool(true));
    assert_eq!(eval("empty {1}"), Value::Bool(false));
}

#[test]
fn ternary_evaluates_selected_branch_only() {
    assert_eq!(eval("1 < 2 ? 'yes' : missing"), Value::string("yes"));
    assert_eq!(eval("1 > 2 ? missing : 'no'"), Value::string("no"));
}

#[test]
fn plus_equals_concatenates() {
    assert_eq!(eval("1 += 2"), Value::string("12"));
    assert_eq!(eval("'a' += null"), Value::string("a"));
    assert_eq!(eval("1.5 += 1"), Value::string("1.51"));
}

#[test]
fn relational_and_equality() {
    assert_eq!(eval("1 == 1.0"), Value::Bool(true));
    assert_eq!(eval("'a' lt 'b'"), Value::Bool(true));
    assert_eq!(eval("null == null"), Value::Bool(true));
    assert_eq!(eval("2 >= '10'"), Value::Bool(false));
}

// Identifiers and assignment

#[test]
fn unknown_identifier_is_property_not_found() {
    let mut ctx = EvalContext::new();
    assert_eq!(category(&mut ctx, "missing"), ErrorCategory::PropertyNotFound);
}

#[test]
fn assignment_defines_bean_and_returns_value() {
    let beans = BeanRegistry::new();
    let mut ctx = context(&beans, false);

    assert_eq!(eval_in(&mut ctx, "x = 5").unwrap(), Value::Long(5));
    assert_eq!(beans.get("x"), Some(Value::Long(5)));
    assert_eq!(eval_in(&mut ctx, "x = 1; x + 1").unwrap(), Value::Long(2));
}

#[test]
fn assignment_without_bean_creation_fails() {
    let mut ctx = EvalContext::new();
    assert_eq!(category(&mut ctx, "x = 5"), ErrorCategory::PropertyNotFound);
}

#[test]
fn read_only_resolver_rejects_assignment() {
    let beans = BeanRegistry::new();
    beans.define("a", Value::Long(1));
    let mut ctx = context(&beans, true);

    assert_eq!(category(&mut ctx, "a = 5"), ErrorCategory::PropertyNotWritable);
    assert_eq!(
        category(&mut ctx, "1 + 1 == 2 ? 10 : a = 5"),
        ErrorCategory::PropertyNotWritable
    );
    assert_eq!(beans.get("a"), Some(Value::Long(1)));
}

#[test]
fn invalid_assignment_target() {
    let beans = BeanRegistry::new();
    let mut ctx = context(&beans, false);
    assert_eq!(category(&mut ctx, "1 = 2"), ErrorCategory::PropertyNotWritable);
}

#[test]
fn bean_property_assignment_coerces() {
    let beans = BeanRegistry::new();
    beans.define("customer", customer());
    let mut ctx = context(&beans, false);

    eval_in(&mut ctx, "customer.age = '10'").unwrap();
    assert_eq!(eval_in(&mut ctx, "customer.age").unwrap(), Value::Int(10));

    ctx.set_value(&parse("customer.age"), Value::Long(11)).unwrap();
    assert_eq!(eval_in(&mut ctx, "customer['age']").unwrap(), Value::Int(11));

    assert_eq!(
        category(&mut ctx, "customer.id = 1"),
        ErrorCategory::PropertyNotWritable
    );
    assert_eq!(
        category(&mut ctx, "customer.missing"),
        ErrorCategory::PropertyNotFound
    );
}

#[test]
fn null_base_yields_null() {
    let beans = BeanRegistry::new();
    beans.define("customer", customer());
    let mut ctx = context(&beans, false);

    assert_eq!(eval_in(&mut ctx, "customer.name.length").unwrap(), Value::Null);
    assert_eq!(eval_in(&mut ctx, "customer.name.length()").unwrap(), Value::Null);
}

#[test]
fn type_and_read_only_queries() {
    let beans = BeanRegistry::new();
    beans.define("customer", customer());
    let mut ctx = context(&beans, false);

    assert_eq!(
        ctx.get_type(&parse("customer.age")).unwrap(),
        ValueType::Primitive(Primitive::Int)
    );
    assert_eq!(
        ctx.get_type(&parse("true ? 'a' : 1")).unwrap(),
        ValueType::String
    );
    assert_eq!(
        ctx.get_type(&parse("false ? 'a' : 1")).unwrap(),
        ValueType::Boxed(Primitive::Long)
    );

    assert!(!ctx.is_read_only(&parse("customer.age")).unwrap());
    assert!(ctx.is_read_only(&parse("customer.id")).unwrap());
    assert!(ctx.is_read_only(&parse("1 + 1")).unwrap());
}

#[test]
fn type_query_runs_assignments() {
    let beans = BeanRegistry::new();
    beans.define("customer", customer());
    let mut ctx = context(&beans, false);

    assert_eq!(
        ctx.get_type(&parse("x = 5; x")).unwrap(),
        ValueType::Boxed(Primitive::Long)
    );
    assert_eq!(beans.get("x"), Some(Value::Long(5)));

    assert_eq!(
        ctx.get_type(&parse("y = 'a'")).unwrap(),
        ValueType::String
    );
    assert_eq!(beans.get("y"), Some(Value::string("a")));

    assert_eq!(
        ctx.get_type(&parse("customer.age = 3; customer.age")).unwrap(),
        ValueType::Primitive(Primitive::Int)
    );
    assert_eq!(eval_in(&mut ctx, "customer.age").unwrap(), Value::Int(3));
}

#[test]
fn value_reference_exposes_location() {
    let beans = BeanRegistry::new();
    beans.define("customer", customer());
    let mut ctx = context(&beans, false);

    let reference = ctx.value_reference(&parse("customer.age")).unwrap().unwrap();
    assert!(matches!(reference.base, Value::Bean(_)));
    assert_eq!(reference.property, Value::string("age"));

    assert!(ctx.value_reference(&parse("1 + 1")).unwrap().is_none());
}

// Lambdas

#[test]
fn nested_lambda_captures_outer_parameter() {
    assert_eq!(eval("(x -> (y -> x + y)(5))(10)"), Value::Long(15));
}

#[test]
fn curried_lambda_outlives_defining_scope() {
    assert_eq!(eval("(x -> y -> x + y)(1)(2)"), Value::Long(3));
}

#[test]
fn lambda_arguments() {
    assert_eq!(eval("((x, y) -> x * y)(3, 4)"), Value::Long(12));
    assert_eq!(eval("(x -> x)(1, 2)"), Value::Long(1));
    assert_eq!(eval("(() -> 42)()"), Value::Long(42));
}

#[test]
fn too_few_lambda_arguments_pops_scope() {
    let mut ctx = EvalContext::new();
    assert_eq!(
        category(&mut ctx, "(x -> ((a, b) -> a)(x))(1)"),
        ErrorCategory::Evaluation
    );
    assert_eq!(ctx.lambda_depth(), 0);
}

#[test]
fn lambda_argument_shadows_bean() {
    let beans = BeanRegistry::new();
    beans.define("x", Value::Long(100));
    let mut ctx = context(&beans, false);

    assert_eq!(eval_in(&mut ctx, "(x -> x + 1)(1)").unwrap(), Value::Long(2));
    assert_eq!(eval_in(&mut ctx, "x").unwrap(), Value::Long(100));
}

#[test]
fn lambda_stored_in_bean_is_callable() {
    let beans = BeanRegistry::new();
    let mut ctx = context(&beans, false);

    eval_in(&mut ctx, "twice = x -> x * 2").unwrap();
    assert_eq!(eval_in(&mut ctx, "twice(4)").unwrap(), Value::Long(8));
}

#[test]
fn calling_a_non_lambda_is_an_error() {
    let beans = BeanRegistry::new();
    beans.define("n", Value::Long(1));
    let mut ctx = context(&beans, false);
    assert_eq!(category(&mut ctx, "n(1)"), ErrorCategory::MethodNotFound);
}

// Collections and methods

#[test]
fn collection_literals() {
    assert_eq!(eval("[1, 2, 3][1]"), Value::Long(2));
    assert_eq!(eval("[1, 2][5]"), Value::Null);
    assert_eq!(eval("{'a': 1}['a']"), Value::Long(1));
    assert_eq!(eval("{'a': 1}.b"), Value::Null);
    assert_eq!(eval("{1, 1, 2}.size()"), Value::Int(2));
}

#[test]
fn stream_methods() {
    assert_eq!(eval("[5, 15].filter(x -> x > 10)"), longs(&[15]));
    assert_eq!(eval("[1, 2, 3].stream().map(x -> x * 2).sum()"), Value::Long(12));
    assert_eq!(eval("[3, 1, 2].sorted()"), longs(&[1, 2, 3]));
    assert_eq!(eval("[3, 1, 2].sorted((a, b) -> b - a)"), longs(&[3, 2, 1]));
    assert_eq!(eval("[1, 2, 3].reduce((a, b) -> a + b)"), Value::Long(6));
    assert_eq!(eval("[].findFirst()"), Value::Null);
    assert_eq!(eval("[1, 2, 3].anyMatch(x -> x == 2)"), Value::Bool(true));
}

#[test]
fn fractional_comparator_results_keep_their_sign() {
    assert_eq!(
        eval("[3, 1, 2].sorted((a, b) -> (a - b) / 10)"),
        longs(&[1, 2, 3])
    );
    assert_eq!(eval("[3, 1, 2].min((a, b) -> (a - b) / 10)"), Value::Long(1));
    assert_eq!(eval("[3, 1, 2].max((a, b) -> (a - b) / 10)"), Value::Long(3));
}

#[test]
fn string_methods() {
    assert_eq!(eval("'hello'.toUpperCase()"), Value::string("HELLO"));
    assert_eq!(eval("'abc'.length()"), Value::Int(3));
    assert_eq!(eval("'abcdef'.substring(1, 3)"), Value::string("bc"));

    let mut ctx = EvalContext::new();
    assert_eq!(category(&mut ctx, "'abc'.frobnicate()"), ErrorCategory::MethodNotFound);
}

// Functions and imports

#[test]
fn mapped_functions_coerce_arguments() {
    let mut ctx = EvalContext::new();
    let long = ValueType::Primitive(Primitive::Long);
    ctx.functions_mut().map_function(
        "fn",
        "twice",
        NativeFunction::new("twice", vec![long.clone()], |args| match args[0] {
            Value::Long(n) => Ok(Value::Long(n * 2)),
            _ => Ok(Value::Null),
        }),
    );
    ctx.functions_mut().map_function(
        "fn",
        "sum",
        NativeFunction::new("sum", vec![long], |args| {
            Ok(Value::Long(
                args.iter()
                    .map(|a| if let Value::Long(n) = a { *n } else { 0 })
                    .sum(),
            ))
        })
        .varargs(),
    );

    assert_eq!(eval_in(&mut ctx, "fn:twice('21')").unwrap(), Value::Long(42));
    assert_eq!(eval_in(&mut ctx, "fn:sum(1, 2, 3)").unwrap(), Value::Long(6));
    assert_eq!(eval_in(&mut ctx, "fn:sum()").unwrap(), Value::Long(0));
    assert_eq!(category(&mut ctx, "fn:twice()"), ErrorCategory::Evaluation);
    assert_eq!(category(&mut ctx, "fn:nope(1)"), ErrorCategory::MethodNotFound);
}

#[test]
fn imported_classes() {
    assert_eq!(eval("Math.max(3, 7)"), Value::Long(7));
    assert_eq!(eval("Integer.MAX_VALUE"), Value::Int(i32::MAX));
    assert_eq!(eval("Math.PI > 3"), Value::Bool(true));
    assert_eq!(eval("Integer.parseInt('12') + 1"), Value::Long(13));
}

#[test]
fn static_imports_resolve_bare_names() {
    let mut ctx = EvalContext::new();
    ctx.imports_mut().import_static("Math.max").unwrap();
    ctx.imports_mut().import_static("java.lang.Math.PI").unwrap();

    assert_eq!(eval_in(&mut ctx, "max(1, 2)").unwrap(), Value::Long(2));
    assert_eq!(
        eval_in(&mut ctx, "PI").unwrap(),
        Value::Double(std::f64::consts::PI)
    );
}

#[test]
fn enum_constants_compare_with_text() {
    let mut ctx = EvalContext::new();
    ctx.imports_mut().define_enum("com.acme.Color", ["RED", "GREEN"]);

    assert_eq!(eval_in(&mut ctx, "Color.RED == 'RED'").unwrap(), Value::Bool(true));
    assert_eq!(eval_in(&mut ctx, "Color.RED < Color.GREEN").unwrap(), Value::Bool(true));
}

#[test]
fn class_fallback_after_member_failure() {
    let beans = BeanRegistry::new();
    beans.define("Math", Value::Long(1));
    let mut ctx = context(&beans, false);

    // The bean shadows the class, but `.PI` on a number fails and the
    // identifier is retried as the imported class.
    assert_eq!(
        eval_in(&mut ctx, "Math.PI").unwrap(),
        Value::Double(std::f64::consts::PI)
    );
}

// Variable mapper

#[test]
fn variable_bindings() {
    let beans = BeanRegistry::new();
    beans.define("target", Value::Long(1));
    let mut ctx = context(&beans, false);
    ctx.variables_mut()
        .bind_expression("text", Arc::new(parse("1 + 1")), ValueType::String);
    ctx.variables_mut().bind_value("k", Value::Long(3));
    ctx.variables_mut()
        .bind_expression("alias", Arc::new(parse("target")), ValueType::Any);

    assert_eq!(eval_in(&mut ctx, "text").unwrap(), Value::string("2"));
    assert_eq!(eval_in(&mut ctx, "k * 2").unwrap(), Value::Long(6));
    assert_eq!(category(&mut ctx, "k = 1"), ErrorCategory::PropertyNotWritable);

    eval_in(&mut ctx, "alias = 9").unwrap();
    assert_eq!(beans.get("target"), Some(Value::Long(9)));
}

#[test]
fn deep_trees_evaluate() {
    let node = (0..2_000).fold(Node::int(0), |acc, _| {
        Node::binary(el_ir::BinaryOp::Add, acc, Node::int(1))
    });
    let mut ctx = EvalContext::new();
    assert_eq!(ctx.eval(&node).unwrap(), Value::Long(2_000));
}
