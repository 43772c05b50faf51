//! Tests for runtime type names and value helpers

use super::fixtures::{obj_a, Fish};
use crate::{NativeFunction, Value};
use pretty_assertions::assert_eq;

#[test]
fn test_type_names_follow_typeof() {
    let cases = vec![
        (Value::Undefined, "undefined"),
        (Value::Null, "object"),
        (Value::from(true), "boolean"),
        (Value::from(1.5), "number"),
        (Value::from("s"), "string"),
        (Value::Array(Vec::new()), "object"),
        (obj_a(1), "object"),
        (Value::instance(Fish::new("gill")), "object"),
        (NativeFunction::new("f", 0, |_| Ok(Value::Undefined)).into(), "function"),
    ];

    for (value, expected) in cases {
        assert_eq!(value.type_name(), expected, "type name of {value}");
    }
}

#[test]
fn test_object_field_access() {
    let value = Value::object([("a", Value::from(1)), ("b", Value::from("two"))]);

    assert_eq!(value.get("a").and_then(Value::as_number), Some(1.0));
    assert_eq!(value.get("b").and_then(Value::as_str), Some("two"));
    assert_eq!(value.get("c"), None);
    assert_eq!(Value::from(1).get("a"), None);
}

#[test]
fn test_instance_identity() {
    let wanda = Value::instance(Fish::new("wanda"));
    let twin = Value::instance(Fish::new("wanda"));

    assert_eq!(wanda, wanda.clone());
    assert_ne!(wanda, twin);
    assert_eq!(wanda.downcast_ref::<Fish>().map(|f| f.name.as_str()), Some("wanda"));
    assert!(wanda.downcast_ref::<String>().is_none());
}

#[test]
fn test_display() {
    let value = Value::Array(vec![
        Value::from(15),
        Value::from("x"),
        Value::Null,
        Value::object([("a", true)]),
    ]);
    assert_eq!(value.to_string(), "[15, x, null, {a: true}]");
    assert_eq!(Value::instance(Fish::new("gill")).to_string(), "Fish {..}");
}
