use super::*;
use el_value::{Value, ValueType};

#[test]
fn test_java_lang_visible_by_simple_name() {
    let imports = ImportHandler::new();
    let math = imports.resolve_class("Math");
    assert_eq!(math.map(|c| c.qualified_name().to_string()), Some("java.lang.Math".to_string()));
    assert!(imports.resolve_class("java.lang.Integer").is_some());
    assert!(imports.resolve_class("Missing").is_none());
}

#[test]
fn test_empty_handler_knows_nothing() {
    let imports = ImportHandler::empty();
    assert!(imports.resolve_class("Math").is_none());
}

#[test]
fn test_defined_class_needs_import() {
    let mut imports = ImportHandler::empty();
    imports.define_class(ClassDef::new("com.acme.Util"));
    assert!(imports.resolve_class("Util").is_none());
    assert!(imports.resolve_class("com.acme.Util").is_some());

    imports.import_package("com.acme");
    assert!(imports.resolve_class("Util").is_some());
}

#[test]
fn test_import_class_shadows_package() {
    let mut imports = ImportHandler::new();
    imports.import_class(ClassDef::new("com.acme.Math").with_field("ANSWER", Value::Long(42)));

    let math = imports.resolve_class("Math");
    assert_eq!(math.and_then(|c| c.field("ANSWER")), Some(Value::Long(42)));
    assert!(imports.resolve_class("java.lang.Math").is_some());
}

#[test]
fn test_import_static_member() {
    let mut imports = ImportHandler::new();
    assert!(imports.import_static("java.lang.Math.PI").is_ok());
    assert!(imports.import_static("Integer.MAX_VALUE").is_ok());

    let owner = imports.resolve_static("PI");
    assert_eq!(owner.map(|c| c.name()), Some("Math"));
    assert!(imports.resolve_static("MAX_VALUE").is_some());
    assert!(imports.resolve_static("E").is_none());
}

#[test]
fn test_import_static_failures() {
    let mut imports = ImportHandler::new();
    assert!(imports.import_static("PI").is_err());
    assert!(imports.import_static("Nowhere.PI").is_err());
    assert!(imports.import_static("Math.TAU").is_err());
}

#[test]
fn test_define_enum_exposes_constants() {
    let mut imports = ImportHandler::empty();
    imports.define_enum("com.acme.Color", ["RED", "GREEN"]);

    let color = imports.resolve_class("Color");
    let green = color.as_ref().and_then(|c| c.field("GREEN"));
    assert!(matches!(green, Some(Value::Enum(ref e)) if e.ordinal() == 1));
    assert!(color.and_then(|c| c.field("BLUE")).is_none());
}

#[test]
fn test_math_functions() {
    let imports = ImportHandler::new();
    let Some(math) = imports.resolve_class("Math") else {
        panic!("Math is imported by default");
    };
    let call = |name: &str, args: &[Value]| {
        math.method(name)
            .map(|f| f.call(args))
            .unwrap_or_else(|| panic!("Math.{name} missing"))
    };

    assert_eq!(call("max", &[Value::Long(3), Value::Long(7)]).ok(), Some(Value::Long(7)));
    assert_eq!(call("min", &[Value::Long(3), Value::Long(7)]).ok(), Some(Value::Long(3)));
    assert_eq!(
        call("max", &[Value::Double(1.5), Value::Long(1)]).ok(),
        Some(Value::Double(1.5))
    );
    assert_eq!(call("abs", &[Value::Long(-4)]).ok(), Some(Value::Long(4)));
    assert_eq!(call("abs", &[Value::Int(-4)]).ok(), Some(Value::Int(4)));
    assert_eq!(call("sqrt", &[Value::Double(9.0)]).ok(), Some(Value::Double(3.0)));
    assert_eq!(call("round", &[Value::Double(2.5)]).ok(), Some(Value::Long(3)));
    assert_eq!(call("round", &[Value::Double(-2.5)]).ok(), Some(Value::Long(-2)));
}

#[test]
fn test_wrapper_signatures() {
    let imports = ImportHandler::new();
    let parse_int = imports
        .resolve_class("Integer")
        .and_then(|c| c.method("parseInt").cloned());
    let Some(parse_int) = parse_int else {
        panic!("Integer.parseInt missing");
    };
    assert_eq!(parse_int.params(), &[ValueType::String]);
    assert_eq!(
        parse_int.return_type(),
        &ValueType::Primitive(el_value::Primitive::Int)
    );
}
