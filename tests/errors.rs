use pretty_assertions::assert_eq;
use wingcalc::{
    Engine,
    error::{Error, ErrorCategory, ParseError, RuntimeError},
};

fn runtime_error(engine: &Engine, source: &str) -> RuntimeError {
    match engine.solve(source) {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected an evaluation error for {source}, got {other:?}"),
    }
}

#[test]
fn malformed_input_leaves_state_untouched() {
    let engine = Engine::new();
    engine.solve("x = 5").unwrap();
    engine.solve("@keep = 1").unwrap();
    assert_eq!(engine.get_variable("ANS"), 1.0);

    assert_eq!(engine.solve("x = 9; @keep = 2; (1+2]"),
               Err(Error::Parse(ParseError::MismatchedBracket { open: '(', close: ']' })));
    assert_eq!(engine.get_variable("x"), 5.0);
    assert_eq!(engine.get_variable("ANS"), 1.0);
    assert_eq!(engine.solve("@keep").unwrap(), 1.0);
}

#[test]
fn the_session_survives_an_evaluation_error() {
    let engine = Engine::new();
    engine.solve("x = 1").unwrap();
    assert!(engine.solve("x = 2; @missing").is_err());
    assert_eq!(engine.get_variable("x"), 2.0);
    assert_eq!(engine.solve("x + 1").unwrap(), 3.0);
}

#[test]
fn capability_errors() {
    let engine = Engine::new();
    assert!(matches!(runtime_error(&engine, "3 = 4"), RuntimeError::NotAssignable { .. }));
    assert!(matches!(runtime_error(&engine, "$x = sqrt(1) = 2"), RuntimeError::NotAssignable { .. }));
    assert!(matches!(runtime_error(&engine, "call(5)"), RuntimeError::Evaluation { .. }));
}

#[test]
fn name_resolution_errors() {
    let engine = Engine::new();
    assert_eq!(runtime_error(&engine, "@nowhere"),
               RuntimeError::UnknownMacro { name: "nowhere".to_string() });
    assert!(matches!(runtime_error(&engine, "#ghost"), RuntimeError::UnknownLocal { .. }));
}

#[test]
fn arity_is_checked_before_dispatch() {
    let engine = Engine::new();
    let error = runtime_error(&engine, "sqrt(1, 2)");
    assert_eq!(error.to_string(), "Function \"sqrt\" expects 1 argument but received 2");
}

#[test]
fn domain_errors_and_special_values() {
    let engine = Engine::new();
    assert!(matches!(runtime_error(&engine, "perm(-1, 2)"), RuntimeError::Evaluation { .. }));
    assert_eq!(engine.solve("1 / 0").unwrap(), f64::INFINITY);
    assert!(engine.solve("0 / 0").unwrap().is_nan());
    assert!(engine.solve("sqrt(-1)").unwrap().is_nan());
}

#[test]
fn errors_fall_into_categories() {
    let engine = Engine::new();
    assert_eq!(runtime_error(&engine, "throw(\"boom\")").category(), ErrorCategory::Thrown);
    assert_eq!(runtime_error(&engine, "@nowhere").category(), ErrorCategory::Language);
    assert_eq!(runtime_error(&engine, "factorial(100)").category(), ErrorCategory::Host);
}

#[test]
fn catching_builtins_filter_by_category() {
    let engine = Engine::new();
    assert_eq!(engine.solve("catch(throw(\"boom\"), 1)").unwrap(), 1.0);
    assert_eq!(engine.solve("catch(@nowhere, 2)").unwrap(), 2.0);
    assert_eq!(engine.solve("catchlang(@nowhere, 3)").unwrap(), 3.0);
    assert_eq!(engine.solve("catchhost(factorial(100), 4)").unwrap(), 4.0);
    assert_eq!(engine.solve("catch(5, 6)").unwrap(), 5.0);

    assert_eq!(engine.solve("catchlang(throw(\"boom\"), 0)"),
               Err(Error::Runtime(RuntimeError::Thrown { message: "boom".to_string() })));
    assert!(matches!(engine.solve("catchhost(@nowhere, 0)"),
                     Err(Error::Runtime(RuntimeError::UnknownMacro { .. }))));
}

#[test]
fn syntax_errors_inside_exec_are_language_errors() {
    let engine = Engine::new();
    assert!(matches!(runtime_error(&engine, "exec(\"(1 + \")"), RuntimeError::Syntax { .. }));
    assert_eq!(engine.solve("catchlang(exec(\"1 +\"), 9)").unwrap(), 9.0);
}

#[test]
fn messages_read_naturally() {
    assert_eq!(ParseError::UnclosedBracket { open: '(' }.to_string(),
               "Closing bracket for ( expected but not found.");
    assert_eq!(RuntimeError::UnknownMacro { name: "f".to_string() }.to_string(),
               "Macro f does not exist.");
}
