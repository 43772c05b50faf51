//! Tests for implicit and explicit signature binding

use super::fixtures::{Fish, Sign};
use crate::{
    ConfigurationError, MethodDecl, OverloadSet, SetupError, SignatureBinder, TypeRef,
    TypeRegistry, UnknownTypeError, Value,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_class::<Fish>().unwrap();
    registry.register_class::<Sign>().unwrap();
    registry
}

fn single_method(set: OverloadSet) -> MethodDecl {
    let (_, mut methods) = set.into_parts();
    assert_eq!(methods.len(), 1);
    methods.remove(0)
}

#[test]
fn test_implicit_types_from_closure_parameters() {
    let registry = registry();
    let f = registry
        .function(OverloadSet::new("Fn").signature(
            "all",
            |_: f64, _: bool, _: String, _: Arc<Fish>, _: Vec<Value>, _: Value| (),
        ))
        .unwrap();

    assert_eq!(
        f.signatures()[0].type_names(),
        vec!["number", "boolean", "string", "Fish", "array", "any"]
    );
    assert!(f.signatures()[0].param_types()[5].is_wildcard());
}

#[test]
fn test_implicit_class_type_follows_alias() {
    let mut registry = TypeRegistry::new();
    registry.register_class_as::<Fish>("Pisces").unwrap();

    let f = registry
        .function(OverloadSet::new("Fn").signature("fish", |f: Arc<Fish>| f.name.clone()))
        .unwrap();

    assert_eq!(f.signatures()[0].type_names(), vec!["Pisces"]);
}

#[test]
fn test_explicit_types_override_declared() {
    let registry = registry();
    let f = registry
        .function(OverloadSet::new("Fn").signature_with(
            "mixed",
            [TypeRef::from("zero"), TypeRef::class::<Fish>()],
            |_: Value, _: Value| (),
        ))
        .unwrap();

    assert_eq!(f.signatures()[0].type_names(), vec!["zero", "Fish"]);
    assert!(!f.signatures()[0].param_types()[0].is_wildcard());
}

#[test]
fn test_explicit_length_must_match_arity() {
    let registry = registry();
    let err = registry
        .function(OverloadSet::new("Fn").signature_with("two", ["number"], |_: f64, _: f64| ()))
        .unwrap_err();

    assert_eq!(
        err,
        SetupError::Configuration(ConfigurationError::ArityMismatch {
            function: "Fn".to_string(),
            method: "two".to_string(),
            expected: 2,
            found: 1,
        })
    );
}

#[test]
fn test_unknown_explicit_type_fails_at_bind_time() {
    let registry = registry();
    let err = registry
        .function(OverloadSet::new("Fn").signature_with("cat", ["Cat"], |_: Value| ()))
        .unwrap_err();

    assert_eq!(err, SetupError::UnknownType(UnknownTypeError::new("Cat")));
    assert_eq!(err.to_string(), "Unknown type Cat");
}

#[test]
fn test_unregistered_class_fails_at_bind_time() {
    let registry = TypeRegistry::new();
    let err = registry
        .function(OverloadSet::new("Fn").signature("fish", |_: Arc<Fish>| ()))
        .unwrap_err();

    assert_eq!(err, SetupError::UnknownType(UnknownTypeError::new("Fish")));
}

#[test]
fn test_untyped_parameters_are_wildcards() {
    let registry = registry();
    let binder = SignatureBinder::new(&registry);
    let method = single_method(OverloadSet::new("Fn").untyped("raw", 3, |args: &[Value]| args.len() as u32));

    assert_eq!(method.key(), "raw");
    assert_eq!(method.arity(), 3);

    let signature = binder.bind("Fn", method).unwrap();
    assert_eq!(signature.owner(), "Fn");
    assert_eq!(signature.method_key(), "raw");
    assert_eq!(signature.type_names(), vec!["any", "any", "any"]);
    assert_eq!(signature.first_mismatch(&[Value::Null, 1.into(), "x".into()]), None);
}

#[test]
fn test_binding_preserves_declaration_order() {
    let registry = registry();
    let f = registry
        .function(
            OverloadSet::new("Fn")
                .signature("c", |_: f64| ())
                .signature("a", |_: String| ())
                .signature("b", |_: bool| ()),
        )
        .unwrap();

    let keys: Vec<&str> = f.signatures().iter().map(|s| s.method_key()).collect();
    assert_eq!(keys, vec!["c", "a", "b"]);
}

#[test]
fn test_empty_overload_set_is_rejected() {
    let registry = registry();
    assert_eq!(
        registry.function(OverloadSet::new("Empty")).unwrap_err(),
        SetupError::Configuration(ConfigurationError::NoOverloads {
            function: "Empty".to_string()
        })
    );
}

#[test]
fn test_predicates_are_captured_at_bind_time() {
    let mut registry = TypeRegistry::new();
    registry.register_predicate("small", |v| v.as_number().is_some_and(|n| n < 10.0));
    let before = registry
        .function(OverloadSet::new("Fn").signature_with("small", ["small"], |_: f64| "small"))
        .unwrap();

    registry.register_predicate("small", |_| false);

    assert_eq!(before.call(&[3.into()]).unwrap(), Value::from("small"));
}
