use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use callback_core::parameter::{factory, typed, union, untyped};
use callback_core::{Callback, CallbackError, DeclaredParameter, DeclaredType, ExactTypes, FunctionSignature, ParameterStrategy, TypeRegistry, ValueFactory};
use serde_json::{json, Value};

fn registry() -> TypeRegistry {
    TypeRegistry::new().with_type("Dog", ["Animal"]).with_type("Animal", ["Entity"])
}

#[test]
fn union_falls_through_to_applicable_child() {
    let p = DeclaredParameter::typed("d", 0, DeclaredType::nominal("Dog"));
    let u = union(vec![Box::new(typed("int", json!(1))), Box::new(typed("Animal", json!("animal")))]);
    assert_eq!(u.resolve(&p, &registry()).unwrap(), json!("animal"));
}

#[test]
fn union_without_applicable_child_is_unresolvable() {
    let p = DeclaredParameter::typed("s", 0, DeclaredType::builtin("string"));
    let u = union(vec![Box::new(typed("int", json!(1))), Box::new(untyped(json!(2)))]);
    assert!(matches!(u.resolve(&p, &ExactTypes), Err(CallbackError::UnresolvableArgument(ref n)) if n == "s"));
}

#[test]
fn union_propagates_factory_failure_of_applying_child() {
    let fallback_calls = Arc::new(AtomicUsize::new(0));
    let counter = fallback_calls.clone();
    let p = DeclaredParameter::typed("d", 0, DeclaredType::nominal("Dog"));
    let u = union(vec![Box::new(typed("Dog", ValueFactory::try_new(|_| Err("dog factory broke".into())))),
                       Box::new(typed("Animal",
                                      factory(move |_| {
                                          counter.fetch_add(1, Ordering::SeqCst);
                                          json!("animal")
                                      })))]);

    let err = u.resolve(&p, &registry()).unwrap_err();
    assert_eq!(err.to_string(), "dog factory broke");
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn typed_factory_receives_declared_type_name() {
    let p = DeclaredParameter::typed("d", 0, DeclaredType::nominal("Dog"));
    let s = typed("Entity", factory(|t| json!(format!("new {}", t.unwrap_or("?")))));
    assert_eq!(s.resolve(&p, &registry()).unwrap(), json!("new Dog"));
}

#[test]
fn invoke_all_uses_one_strategy_for_every_parameter() {
    let sig = FunctionSignature::new(vec![DeclaredParameter::typed("n", 0, DeclaredType::builtin("int")),
                                          DeclaredParameter::typed("a", 1, DeclaredType::nominal("Dog")),
                                          DeclaredParameter::untyped("rest", 2)]);
    let strategy = union(vec![Box::new(typed("int", json!(3))),
                              Box::new(typed("Animal", factory(|t| json!(t)))),
                              Box::new(untyped(json!("loose")))]);
    let cb = Callback::create(sig, |args: Vec<Value>| args).unwrap().with_types(registry());

    assert_eq!(cb.invoke_all(&strategy).unwrap(), vec![json!(3), json!("Dog"), json!("loose")]);
}

#[test]
fn invoke_all_checks_arity_first() {
    let sig = FunctionSignature::new(vec![DeclaredParameter::untyped("a", 0)]);
    let cb = Callback::create(sig, |args: Vec<Value>| args).unwrap().min_arguments(2);
    assert!(matches!(cb.invoke_all(&untyped(json!(1))), Err(CallbackError::Arity(2))));
}

#[test]
fn arguments_with_resolves_without_invoking() {
    let sig = FunctionSignature::new(vec![DeclaredParameter::untyped("a", 0)]);
    let cb = Callback::create(sig, |_args: Vec<Value>| -> Value { unreachable!("not invoked") }).unwrap();
    assert_eq!(cb.arguments_with(&untyped(json!("v"))).unwrap(), vec![json!("v")]);
}
