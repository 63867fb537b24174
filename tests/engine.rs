use pretty_assertions::assert_eq;
use wingcalc::{
    Engine, EngineOptions, get_result,
    interpreter::{
        evaluator::{function::core::Arity, utils::solve_arg},
        io::BufferIo,
    },
};

fn buffered() -> (Engine, BufferIo) {
    let io = BufferIo::new();
    let engine = Engine::new().with_io(Box::new(io.clone()));
    (engine, io)
}

#[test]
fn answers_are_recorded_and_implied() {
    let engine = Engine::new();
    assert_eq!(engine.solve("6 * 7").unwrap(), 42.0);
    assert_eq!(engine.solve("ANS + 1").unwrap(), 43.0);
    assert_eq!(engine.solve_full("** 2").unwrap(), (1849.0, true));
    assert_eq!(engine.solve_full("+ 1").unwrap(), (1.0, false));
    assert_eq!(engine.solve_full("/= 2").unwrap(), (0.5, true));
}

#[test]
fn empty_input_keeps_the_answer() {
    let engine = Engine::new();
    engine.solve("5").unwrap();
    assert_eq!(engine.solve("").unwrap(), 0.0);
    assert_eq!(engine.solve("   ").unwrap(), 0.0);
    assert_eq!(engine.get_variable("ans"), 5.0);
}

#[test]
fn options_turn_features_off() {
    let engine = Engine::with_options(EngineOptions { seed_constants: false,
                                                      record_answer:  false,
                                                      imply_answer:   false, });
    assert_eq!(engine.solve("pi").unwrap(), 0.0);
    engine.solve("9").unwrap();
    assert_eq!(engine.get_variable("ANS"), 0.0);
    assert!(engine.solve("** 2").is_err());

    assert_eq!(engine.solve_with("4", true).unwrap(), 4.0);
    assert_eq!(engine.get_variable("ANS"), 4.0);
}

#[test]
fn constants_are_seeded() {
    let engine = Engine::new();
    assert_eq!(engine.solve("PI").unwrap(), std::f64::consts::PI);
    assert_eq!(engine.solve("intmax").unwrap(), 2_147_483_647.0);
    assert_eq!(engine.solve("Infinity").unwrap(), f64::INFINITY);
    assert!(engine.solve("nan").unwrap().is_nan());
    assert!(engine.variables().any(|(name, _)| name == "avogadro"));
}

#[test]
fn variables_are_case_insensitive() {
    let engine = Engine::new();
    engine.set_variable("Rate", 0.25);
    assert_eq!(engine.solve("RATE * 4").unwrap(), 1.0);
    assert_eq!(engine.get_variable("rate"), 0.25);
}

#[test]
fn hosts_can_register_builtins() {
    let mut engine = Engine::new();
    engine.register("half", Arity::Exact(1), |args, scope| {
              Ok(solve_arg("half", args, 0, scope)? / 2.0)
          });
    assert!(engine.builtin("HALF").is_some());
    assert_eq!(engine.solve("half(9)").unwrap(), 4.5);
    assert!(engine.solve("half(1, 2)").is_err());
}

#[test]
fn exec_runs_nested_text_without_touching_the_answer() {
    let engine = Engine::new();
    engine.solve("1").unwrap();
    engine.solve("alloc($0, \"2 + 3\")").unwrap();
    assert_eq!(engine.solve("exec($0) * 10").unwrap(), 50.0);
    assert_eq!(engine.get_variable("ANS"), 50.0);
    assert_eq!(engine.solve("exec(\"q = 7\") + q").unwrap(), 14.0);
}

#[test]
fn output_goes_to_the_injected_io() {
    let (engine, io) = buffered();
    engine.solve("writeline(\"x\")").unwrap();
    engine.solve("alloc($0, 3, 4); print($0)").unwrap();
    engine.solve("$5 = 8; memprint($5)").unwrap();
    assert_eq!(io.output(), "x\n{ 3, 4 }\n$5 = 8\n");

    assert_eq!(engine.solve("clearout()").unwrap(), 1.0);
    assert_eq!(io.output(), "");
}

#[test]
fn input_is_read_into_memory() {
    let io = BufferIo::with_input(["hey"]);
    let engine = Engine::new().with_io(Box::new(io.clone()));
    assert_eq!(engine.solve("read($10)").unwrap(), 3.0);
    assert_eq!(engine.get_string(10.0), "hey");
    assert_eq!(engine.solve("read($10)").unwrap(), -1.0);

    io.push_input("again");
    assert_eq!(engine.solve("read($10)").unwrap(), 5.0);
}

#[test]
fn loops_and_conditionals() {
    let engine = Engine::new();
    assert_eq!(engine.solve("i = 0; while(i < 4, $i += 1)").unwrap(), 4.0);
    assert_eq!(engine.solve("i = 10; dowhile(i < 4, $i += 1)").unwrap(), 1.0);
    assert_eq!(engine.solve("n = 0; repeat($n += 2, 3); n").unwrap(), 6.0);
    assert_eq!(engine.solve("else(0, $n = 1); n").unwrap(), 1.0);
    assert_eq!(engine.solve("if(0, 1, 2)").unwrap(), 2.0);
}

#[test]
fn enum_and_val_assign() {
    let engine = Engine::new();
    engine.solve("enum($a, $b, $c)").unwrap();
    assert_eq!(engine.solve("a + b + c").unwrap(), 3.0);
    assert_eq!(engine.solve("val($d, 2 + 2); d").unwrap(), 4.0);
    assert_eq!(engine.solve("ignore(1, 2, 3)").unwrap(), 0.0);
    assert_eq!(engine.solve("eval(2 ** 5)").unwrap(), 32.0);
}

#[test]
fn scripts_run_line_by_line() {
    assert_eq!(get_result("a = 3\n\n@sq(x) = x * x\n@sq(a) + 1", false).unwrap(), 10.0);
    assert!(get_result("1\n(", false).is_err());
}
