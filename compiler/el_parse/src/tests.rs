use super::*;
use el_ir::{BinaryOp, Name, NumberLiteral, Property, UnaryOp};
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Node {
    parse_expression(source).unwrap()
}

fn parse_str(source: &str) -> String {
    parse(source).to_string()
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(parse_str("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(parse_str("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn binary_operators_are_left_associative() {
    assert_eq!(parse_str("10 - 4 - 3"), "((10 - 4) - 3)");
    assert_eq!(parse_str("8 div 4 mod 3"), "((8 / 4) % 3)");
}

#[test]
fn logical_and_relational_precedence() {
    assert_eq!(
        parse_str("a < 1 || b >= 2 && !c"),
        "((a < 1) || ((b >= 2) && (!c)))"
    );
    assert_eq!(parse_str("a eq b ne c"), "((a == b) != c)");
}

#[test]
fn concat_sits_between_comparison_and_addition() {
    assert_eq!(parse_str("a += b + c"), "(a += (b + c))");
    assert_eq!(parse_str("a += b == c"), "((a += b) == c)");
}

#[test]
fn unary_operators() {
    assert_eq!(
        parse("-x"),
        Node::unary(UnaryOp::Neg, Node::ident("x"))
    );
    assert_eq!(parse_str("empty a.b"), "(empty a.b)");
    assert_eq!(parse_str("not not a"), "(!(!a))");
}

#[test]
fn ternary_is_right_associative() {
    assert_eq!(parse_str("a ? b : c ? d : e"), "(a ? b : (c ? d : e))");
}

#[test]
fn assignment_target_is_whole_choice() {
    // The target of `=` is everything to its left at choice level.
    assert_eq!(
        parse_str("1 + 1 == 2 ? 10 : a = 5"),
        "((((1 + 1) == 2) ? 10 : a) = 5)"
    );
    assert_eq!(parse_str("a = b = 1"), "(a = (b = 1))");
}

#[test]
fn semicolon_sequences() {
    assert_eq!(parse_str("x = 1; x + 1"), "((x = 1); (x + 1))");
}

#[test]
fn member_index_and_method_suffixes() {
    assert_eq!(
        parse("a.b['c'](1)"),
        Node::call(
            Node::index(Node::member(Node::ident("a"), "b"), Node::string("c")),
            vec![Node::int(1)]
        )
    );
}

#[test]
fn lambda_forms() {
    assert_eq!(
        parse("x -> x + 1"),
        Node::lambda(
            vec![Name::from("x")],
            Node::binary(BinaryOp::Add, Node::ident("x"), Node::int(1))
        )
    );
    assert_eq!(parse_str("(a, b) -> a * b"), "(a, b) -> (a * b)");
    assert_eq!(parse_str("() -> 42"), "() -> 42");
}

#[test]
fn curried_lambda_invocation() {
    assert_eq!(
        parse_str("(x -> (y -> x + y)(5))(10)"),
        "(x) -> (y) -> (x + y)(5)(10)"
    );
    let Node::Call { callee, args } = parse("(x -> (y -> x + y)(5))(10)") else {
        panic!("expected call");
    };
    assert!(matches!(*callee, Node::Lambda { .. }));
    assert_eq!(args, vec![Node::int(10)]);
}

#[test]
fn lambda_as_method_argument() {
    let node = parse("[5, 15].filter(x -> x > 10)");
    let Node::Call { callee, args } = node else {
        panic!("expected call");
    };
    assert_eq!(
        *callee,
        Node::member(Node::List(vec![Node::int(5), Node::int(15)]), "filter")
    );
    assert!(matches!(args[0], Node::Lambda { .. }));
}

#[test]
fn parenthesized_expression_is_not_a_lambda() {
    assert_eq!(parse_str("(a) + 1"), "(a + 1)");
}

#[test]
fn qualified_function_needs_adjacent_colon() {
    assert_eq!(
        parse("fn:upper('a')"),
        Node::call(Node::ident("fn:upper"), vec![Node::string("a")])
    );
    // With spaces it is a ternary branch followed by a call.
    assert_eq!(parse_str("c ? a : b(1)"), "(c ? a : b(1))");
}

#[test]
fn collection_literals() {
    assert_eq!(parse("[]"), Node::List(vec![]));
    assert_eq!(parse("{}"), Node::Set(vec![]));
    assert_eq!(
        parse("{1, 2}"),
        Node::Set(vec![Node::int(1), Node::int(2)])
    );
    assert_eq!(
        parse("{'a': 1, 'b': 2}"),
        Node::Map(vec![
            (Node::string("a"), Node::int(1)),
            (Node::string("b"), Node::int(2)),
        ])
    );
}

#[test]
fn number_literals() {
    assert_eq!(parse("12"), Node::int(12));
    assert_eq!(parse("1.5"), Node::float(1.5));
    assert_eq!(
        parse("123456789012345678901234567890"),
        Node::Number(NumberLiteral::BigInteger(
            "123456789012345678901234567890".into()
        ))
    );
}

#[test]
fn dynamic_index_property() {
    let Node::Member { property, .. } = parse("m[k + 1]") else {
        panic!("expected member");
    };
    assert!(matches!(property, Property::Expr(_)));
}

#[test]
fn trailing_tokens_are_rejected() {
    let err = parse_expression("a b").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }), "{err:?}");
}

#[test]
fn missing_operand_is_rejected() {
    let err = parse_expression("1 +").unwrap_err();
    assert!(
        matches!(err, ParseError::ExpectedExpression { .. }),
        "{err:?}"
    );
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(parse(&source), Node::int(1));
}

#[test]
fn template_single_segment_is_unwrapped() {
    let compiled = compile_str("${1 + 2}").unwrap();
    assert_eq!(compiled.kind, TemplateKind::Dynamic);
    assert_eq!(
        compiled.node,
        Node::binary(BinaryOp::Add, Node::int(1), Node::int(2))
    );
}

#[test]
fn template_segments_fold_left() {
    let compiled = compile_str("a${b}c").unwrap();
    assert_eq!(
        compiled.node,
        Node::concat(
            Node::concat(Node::string("a"), Node::ident("b")),
            Node::string("c")
        )
    );
}

#[test]
fn template_literal_text() {
    let compiled = compile_str("plain text").unwrap();
    assert_eq!(compiled.kind, TemplateKind::Literal);
    assert_eq!(compiled.node, Node::string("plain text"));

    let empty = compile_str("").unwrap();
    assert_eq!(empty.node, Node::string(""));
}

#[test]
fn template_deferred() {
    let compiled = compile_str("#{a}").unwrap();
    assert_eq!(compiled.kind, TemplateKind::Deferred);
    assert_eq!(compiled.node, Node::ident("a"));
}

#[test]
fn mixed_delimiters_fail_to_compile() {
    let err = compile_str("${a}#{b}").unwrap_err();
    assert_eq!(err, ParseError::MixedDelimiters);
}

#[test]
fn parse_template_keeps_wrappers() {
    let parsed = parse_template("x${a}").unwrap();
    assert_eq!(
        parsed.segments,
        vec![Node::string("x"), Node::Dynamic(Box::new(Node::ident("a")))]
    );
}

#[test]
fn lex_errors_surface_as_parse_errors() {
    let err = compile_str("${'open}").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)), "{err:?}");
}
