use pretty_assertions::assert_eq;
use wingcalc::{
    Engine,
    error::{Error, RuntimeError},
};

fn session(lines: &[&str]) -> (Engine, f64) {
    let engine = Engine::new();
    let mut last = 0.0;
    for line in lines {
        last = engine.solve(line)
                     .unwrap_or_else(|e| panic!("{line} failed: {e}"));
    }
    (engine, last)
}

#[test]
fn macro_arguments_are_reevaluated_on_every_read() {
    let (engine, result) = session(&["n = 1", "@twice(x) = x + x", "@twice($n += 1)"]);
    assert_eq!(result, 5.0);
    assert_eq!(engine.get_variable("n"), 3.0);
}

#[test]
fn lambda_expression_arguments_are_snapshots() {
    let (engine, result) = session(&["n = 1", "call(@(x, x + x), $n += 1)"]);
    assert_eq!(result, 4.0);
    assert_eq!(engine.get_variable("n"), 2.0);
}

#[test]
fn parameters_bound_to_variables_write_through() {
    let (engine, result) = session(&["v = 5", "call(@(a, deepval(a, a + 1)), v)"]);
    assert_eq!(result, 6.0);
    assert_eq!(engine.get_variable("v"), 6.0);

    let (engine, _) = session(&["@setter(x) = deepval(x, 42)", "w = 1", "@setter(w)"]);
    assert_eq!(engine.get_variable("w"), 42.0);
}

#[test]
fn parameters_bound_to_expressions_only_rebind_themselves() {
    let (engine, result) = session(&["@setter(x) = deepval(x, 42)", "v = 1", "@setter(v + 1)"]);
    assert_eq!(result, 42.0);
    assert_eq!(engine.get_variable("v"), 1.0);
}

#[test]
fn assigning_a_local_to_a_local_aliases_it() {
    let (engine, result) = session(&["@alias(p) = (b = p; deepval(b, 9))", "w = 0", "@alias(w)"]);
    assert_eq!(result, 9.0);
    assert_eq!(engine.get_variable("w"), 9.0);
}

#[test]
fn positional_locals_name_the_arguments() {
    let (_, result) = session(&["@first = #0 * 2", "@first(21)"]);
    assert_eq!(result, 42.0);

    let (_, result) = session(&["@second = #(1)", "@second(5, 7)"]);
    assert_eq!(result, 7.0);
}

#[test]
fn lambdas_see_the_frame_they_were_written_in() {
    let (_, result) = session(&["@outer(k) = call(@(z, z + k), 1)", "@outer(10)"]);
    assert_eq!(result, 11.0);
}

#[test]
fn macros_do_not_see_their_callers_locals() {
    let engine = Engine::new();
    engine.solve("@peek = #y").unwrap();
    assert!(matches!(engine.solve("call(@(y, @peek), 3)"),
                     Err(Error::Runtime(RuntimeError::UnknownLocal { .. }))));
}

#[test]
fn top_level_locals_live_for_one_solve() {
    let engine = Engine::new();
    assert_eq!(engine.solve("#t = 4; #t * 2").unwrap(), 8.0);
    assert!(matches!(engine.solve("#t"),
                     Err(Error::Runtime(RuntimeError::UnknownLocal { .. }))));
}

#[test]
fn local_pointers_address_frame_cells() {
    let engine = Engine::new();
    assert_eq!(engine.solve("alloc(#(0), 4, 5, 6); get(#(0), 1) + len(#(0))").unwrap(), 8.0);
    assert_eq!(engine.get_array(0.0), Vec::<f64>::new());
}
