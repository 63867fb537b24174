use pretty_assertions::assert_eq;
use wingcalc::{
    Engine,
    error::{Error, ParseError},
    interpreter::{lexer::tokenize, parser::core::build_tree},
};

fn tree(engine: &Engine, source: &str) -> String {
    let tokens = tokenize(source).unwrap();
    build_tree(&tokens, engine, true).unwrap()
                                     .root
                                     .map(|root| root.to_string())
                                     .unwrap_or_default()
}

fn parse_error(source: &str) -> ParseError {
    match Engine::new().solve(source) {
        Err(Error::Parse(e)) => e,
        other => panic!("expected a parse error for {source}, got {other:?}"),
    }
}

#[test]
fn precedence_matches_arithmetic() {
    let engine = Engine::new();
    assert_eq!(engine.solve("1+2*3").unwrap(), 7.0);
    assert_eq!(engine.solve("(1+2)*3").unwrap(), 9.0);
    assert_eq!(engine.solve("2**3**2").unwrap(), 512.0);
    assert_eq!(engine.solve("10 - 4 - 3").unwrap(), 3.0);
    assert_eq!(engine.solve("2 ** -1").unwrap(), 0.5);
    assert_eq!(engine.solve("1 + 2 < 4 && 3 == 3").unwrap(), 1.0);
}

#[test]
fn implicit_multiplication() {
    let engine = Engine::new();
    engine.set_variable("x", 4.0);
    assert_eq!(engine.solve("3x").unwrap(), 12.0);
    assert_eq!(engine.solve("2(3 + 1)").unwrap(), 8.0);
    assert_eq!(engine.solve("(1 + 1)(2 + 2)").unwrap(), 8.0);
    assert_eq!(engine.solve("2sqrt(16)").unwrap(), 8.0);
    assert_eq!(tree(&engine, "3x"), "(3 * $x)");
}

#[test]
fn brackets_of_every_shape_group() {
    let engine = Engine::new();
    assert_eq!(engine.solve("[1 + 2] * {3}").unwrap(), 9.0);
}

#[test]
fn registered_macros_are_recognised_by_name() {
    let engine = Engine::new();
    engine.solve("@double(x) = x * 2").unwrap();
    assert_eq!(tree(&engine, "double(4)"), "@double(4)");
    assert_eq!(engine.solve("double(4)").unwrap(), 8.0);
}

#[test]
fn top_level_names_are_always_variables() {
    let engine = Engine::new();
    engine.solve("@f(x) = x * 2").unwrap();
    assert_eq!(tree(&engine, "x"), "$x");
    assert_eq!(engine.solve("x = 3; @f(10) + x").unwrap(), 23.0);
    assert_eq!(engine.get_variable("x"), 3.0);
}

#[test]
fn assignment_targets_inside_calls_are_locals() {
    let engine = Engine::new();
    assert_eq!(tree(&engine, "if(1, t = 5, t)"), "if(1, (#t = 5), #t)");
    assert_eq!(engine.solve("if(1, t = 5, 0) + 1").unwrap(), 6.0);
    assert_eq!(engine.get_variable("t"), 0.0);
}

#[test]
fn structural_errors() {
    assert_eq!(parse_error("(1+2]"), ParseError::MismatchedBracket { open: '(', close: ']' });
    assert_eq!(parse_error("(1+2"), ParseError::UnclosedBracket { open: '(' });
    assert_eq!(parse_error("2 * ()"), ParseError::EmptyBrackets { open: '(', close: ')' });
    assert_eq!(parse_error("* 2"), ParseError::NotUnary { op: "*".to_string() });
    assert_eq!(parse_error("1 +* 2"), ParseError::UnknownOperator { op: "+*".to_string() });
    assert_eq!(parse_error("3 4"), ParseError::TrailingExpression);
    assert_eq!(parse_error("max(1, , 2)"), ParseError::EmptyParameter);
}

#[test]
fn literal_errors() {
    assert_eq!(parse_error("0x"), ParseError::EmptyLiteral { kind: "Hex" });
    assert_eq!(parse_error("'ab'"), ParseError::CharLength { text: "ab".to_string() });
    assert!(matches!(parse_error("0b"), ParseError::EmptyLiteral { .. }));
}
