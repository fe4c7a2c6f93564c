//! Property tests for arithmetic and coercion.

use el_eval::{coerce, evaluate_binary, ConverterRegistry};
use el_ir::BinaryOp;
use elc::{ElProcessor, Value};
use proptest::prelude::*;

fn arith_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Sub),
        Just(BinaryOp::Mul),
        Just(BinaryOp::Div),
        Just(BinaryOp::Mod),
    ]
}

/// Non-null scalars; floats stay finite so equality is reflexive.
fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<char>().prop_map(Value::Char),
        any::<i8>().prop_map(Value::Byte),
        any::<i16>().prop_map(Value::Short),
        any::<i32>().prop_map(Value::Int),
        any::<i64>().prop_map(Value::Long),
        (-1.0e6f32..1.0e6).prop_map(Value::Float),
        (-1.0e12f64..1.0e12).prop_map(Value::Double),
        "[a-zA-Z0-9 .]{0,12}".prop_map(Value::string),
    ]
}

proptest! {
    #[test]
    fn null_operand_yields_zero(op in arith_op(), other in scalar(), null_left in any::<bool>()) {
        let (left, right) = if null_left {
            (Value::Null, other)
        } else {
            (other, Value::Null)
        };
        prop_assert_eq!(evaluate_binary(op, &left, &right).unwrap(), Value::Long(0));
    }

    #[test]
    fn coercion_to_own_type_is_identity(value in scalar()) {
        let converters = ConverterRegistry::new();
        let coerced = coerce(&value, &value.value_type(), &converters).unwrap();
        prop_assert_eq!(coerced, value);
    }

    #[test]
    fn int_sum_widens_to_long(a in any::<i32>(), b in any::<i32>()) {
        let sum = evaluate_binary(BinaryOp::Add, &Value::Int(a), &Value::Int(b)).unwrap();
        prop_assert_eq!(sum, Value::Long(i64::from(a) + i64::from(b)));
    }

    #[test]
    fn evaluated_literals_round_trip(n in 0i64..=i64::MAX) {
        let mut el = ElProcessor::new();
        prop_assert_eq!(el.eval(&n.to_string()).unwrap(), Value::Long(n));
    }

    #[test]
    fn bad_text_never_panics(source in "[ -~]{0,32}") {
        let mut el = ElProcessor::new();
        let _ = el.eval(&source);
    }
}
