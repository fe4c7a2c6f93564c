use el_eval::{ErrorCategory, Primitive, Value, ValueType};
use pretty_assertions::assert_eq;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn no_options() {
    assert_eq!(parse_eval_options(&[]).unwrap(), EvalOptions::default());
}

#[test]
fn defines_in_order() {
    let options = parse_eval_options(&args(&["--define", "a=1", "-d", "b = a + 1", "--define=c=[1]"]))
        .unwrap();
    assert_eq!(
        options.defines,
        vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), " a + 1".to_string()),
            ("c".to_string(), "[1]".to_string()),
        ]
    );
}

#[test]
fn expected_type() {
    let options = parse_eval_options(&args(&["--as", "double"])).unwrap();
    assert_eq!(options.expected, ValueType::Primitive(Primitive::Double));
    assert!(parse_eval_options(&args(&["--as", "Widget"])).is_err());
}

#[test]
fn malformed_options() {
    assert!(parse_eval_options(&args(&["--define"])).is_err());
    assert!(parse_eval_options(&args(&["--define", "novalue"])).is_err());
    assert!(parse_eval_options(&args(&["--define", "=1"])).is_err());
    assert!(parse_eval_options(&args(&["--verbose"])).is_err());
}

#[test]
fn evaluates_bare_and_template() {
    let options = EvalOptions::default();
    assert_eq!(evaluate("1 + 2", &options).unwrap(), Value::Long(3));
    assert_eq!(
        evaluate("sum=${1 + 2}", &options).unwrap(),
        Value::string("sum=3")
    );
}

#[test]
fn definitions_are_visible() {
    let options = parse_eval_options(&args(&["--define", "a=20", "--define", "b=a + 1"])).unwrap();
    assert_eq!(evaluate("a + b", &options).unwrap(), Value::Long(41));
}

#[test]
fn coerces_to_requested_type() {
    let options = parse_eval_options(&args(&["--as", "double"])).unwrap();
    assert_eq!(evaluate("1 + 2", &options).unwrap(), Value::Double(3.0));
}

#[test]
fn reports_failures() {
    let err = evaluate("missing.name", &EvalOptions::default()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::PropertyNotFound);
}
