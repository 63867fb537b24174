use pretty_assertions::assert_eq;
use wingcalc::{
    Engine,
    error::{Error, RuntimeError},
};

fn solve(engine: &Engine, source: &str) -> f64 {
    engine.solve(source)
          .unwrap_or_else(|e| panic!("{source} failed: {e}"))
}

#[test]
fn recursive_macro_terminates() {
    let engine = Engine::new();
    solve(&engine, "@fact(n) = if(n <= 1, 1, n * @fact(n - 1))");
    assert_eq!(solve(&engine, "@fact(5)"), 120.0);
    assert_eq!(solve(&engine, "@fact(1)"), 1.0);
}

#[test]
fn bare_names_define_macros_too() {
    let engine = Engine::new();
    solve(&engine, "square(x) = x * x");
    assert!(engine.has_macro("square"));
    assert_eq!(solve(&engine, "square(9)"), 81.0);
    assert_eq!(solve(&engine, "SQUARE(3)"), 9.0);
}

#[test]
fn macros_resolve_at_call_time() {
    let engine = Engine::new();
    solve(&engine, "@g = @h + 1");
    assert!(matches!(engine.solve("@g"), Err(Error::Runtime(RuntimeError::UnknownMacro { .. }))));

    solve(&engine, "@h = 10");
    assert_eq!(solve(&engine, "@g"), 11.0);

    solve(&engine, "@h = 20");
    assert_eq!(solve(&engine, "@g"), 21.0);
}

#[test]
fn a_definition_yields_one_and_can_be_sequenced() {
    let engine = Engine::new();
    assert_eq!(solve(&engine, "@inc(v) = v + 1"), 1.0);
    assert_eq!(solve(&engine, "@dec(v) = v - 1; @dec(@inc(7))"), 7.0);
}

#[test]
fn macro_bodies_read_globals_when_they_run() {
    let engine = Engine::new();
    solve(&engine, "@scaled(v) = v * factor");
    solve(&engine, "factor = 3");
    assert_eq!(solve(&engine, "@scaled(2)"), 6.0);
    solve(&engine, "factor = 5");
    assert_eq!(solve(&engine, "@scaled(2)"), 10.0);
}

#[test]
fn missing_arguments_are_unknown_locals() {
    let engine = Engine::new();
    solve(&engine, "@pair(a, b) = a + b");
    assert!(matches!(engine.solve("@pair(1)"),
                     Err(Error::Runtime(RuntimeError::UnknownLocal { .. }))));
}

#[test]
fn macros_with_expression_arguments_cannot_be_assigned() {
    let engine = Engine::new();
    assert!(matches!(engine.solve("catch(@m(1 + 1) = 2, -1)"), Ok(v) if v == -1.0));
    assert!(matches!(engine.solve("@m(1 + 1) = 2"),
                     Err(Error::Runtime(RuntimeError::MacroWithArguments { .. }))));
    assert!(!engine.has_macro("m"));
}

#[test]
fn macros_are_callable_values() {
    let engine = Engine::new();
    solve(&engine, "@add3(a, b, c) = a + b + c");
    assert_eq!(solve(&engine, "call(@add3, 1, 2, 3)"), 6.0);

    solve(&engine, "alloc($0, 1, 2, 3)");
    solve(&engine, "@bump(x, i) = x + 100");
    solve(&engine, "mut($0, @bump)");
    assert_eq!(engine.get_array(0.0), vec![101.0, 102.0, 103.0]);
}

#[test]
fn lambdas_are_anonymous() {
    let engine = Engine::new();
    assert_eq!(solve(&engine, "call(@(a, b, a * b), 6, 7)"), 42.0);
    assert_eq!(solve(&engine, "call(@(, 5))"), 5.0);
}
