use callback_rust::parameter::{factory, typed, union, untyped};
use callback_rust::{Callback, CallbackError, DeclaredParameter, DeclaredType, FunctionSignature, ParameterStrategy, TypeRegistry, ValueFactory, CONFIG};
use serde_json::{json, Value};

/// Jerarquía usada por las demos: Dog -> Animal, Dog implementa Pet.
fn demo_types() -> TypeRegistry {
    TypeRegistry::new().with_type("Animal", Vec::<String>::new())
                       .with_type("Dog", ["Animal", "Pet"])
}

fn make_default(ty: Option<&str>) -> Value {
    json!({ "default": ty })
}

fn report(tag: &str, args: &[Value]) {
    if CONFIG.demo.verbose {
        println!("[{tag}] argumentos: {}", Value::Array(args.to_vec()));
    }
}

/// f(x: int, y: Dog) con int -> 42 y Animal -> factory.
fn run_typed_demo() -> Result<(), CallbackError> {
    let sig = FunctionSignature::named("f",
                                       vec![DeclaredParameter::typed("x", 0, DeclaredType::builtin("int")),
                                            DeclaredParameter::typed("y", 1, DeclaredType::nominal("Dog"))]);
    let cb = CONFIG.prepare(Callback::create(sig, |args: Vec<Value>| {
                                report("typed", &args);
                                args.len()
                            })?)
                   .min_arguments(2)
                   .with_types(demo_types())
                   .replace_typed("int", json!(42))
                   .replace_typed("Animal", ValueFactory::new(make_default));
    let n = cb.invoke()?;
    println!("[typed] invocado con {n} argumento(s)");
    Ok(())
}

/// g(x) sin tipo y sólo una regla `string`: debe fallar.
fn run_unresolvable_demo() {
    let sig = FunctionSignature::named("g", vec![DeclaredParameter::untyped("x", 0)]);
    let result = Callback::create(sig, |_args: Vec<Value>| ()).and_then(|cb| cb.replace_typed("string", json!("s")).invoke());
    match result {
        Err(e) => eprintln!("[unresolvable] parámetro `{}`: {e}", e.parameter().unwrap_or("?")),
        Ok(()) => eprintln!("[unresolvable] inesperado: la invocación tuvo éxito"),
    }
}

/// h(a, b, c) con mínimo 4: falla antes de resolver.
fn run_arity_demo() {
    let sig = FunctionSignature::named("h",
                                       vec![DeclaredParameter::untyped("a", 0),
                                            DeclaredParameter::untyped("b", 1),
                                            DeclaredParameter::untyped("c", 2)]);
    let result = Callback::create(sig, |_args: Vec<Value>| ()).and_then(|cb| cb.min_arguments(4).invoke());
    if let Err(e) = result {
        eprintln!("[arity] {e}");
    }
}

/// Estrategias compuestas aplicadas a todos los parámetros.
fn run_strategy_demo() -> Result<(), CallbackError> {
    let sig = FunctionSignature::named("listener",
                                       vec![DeclaredParameter::typed("pet", 0, DeclaredType::nominal("Dog")),
                                            DeclaredParameter::untyped("context", 1)]);
    let strategy = union(vec![Box::new(typed("Pet", factory(|t| json!({ "pet": t })))),
                              Box::new(untyped(json!({ "context": "demo" })))]);
    let cb = Callback::create(sig, |args: Vec<Value>| {
                 report("strategy", &args);
                 args
             })?
             .with_types(demo_types());
    let args = cb.invoke_all(&strategy)?;
    println!("[strategy] `{}` resolvió {} argumento(s)", strategy.type_label(), args.len());
    Ok(())
}

fn main() {
    println!("--- Demo: reemplazo por tipo ---");
    if let Err(e) = run_typed_demo() {
        eprintln!("[typed] Error: {e}");
    }
    println!("--- Demo: parámetro sin regla ---");
    run_unresolvable_demo();
    println!("--- Demo: aridad mínima ---");
    run_arity_demo();
    println!("--- Demo: estrategias ---");
    if let Err(e) = run_strategy_demo() {
        eprintln!("[strategy] Error: {e}");
    }
}
