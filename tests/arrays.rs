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
fn pointer_round_trip() {
    let engine = Engine::new();
    assert_eq!(solve(&engine, "alloc($100, 10, 20, 30)"), 100.0);
    assert_eq!(solve(&engine, "len($100)"), 3.0);
    assert_eq!(solve(&engine, "$100"), 3.0);
    assert_eq!(solve(&engine, "get($100, 0)"), 10.0);
    assert_eq!(solve(&engine, "get($100, -1)"), 30.0);
    assert_eq!(solve(&engine, "set($100, -1, 99)"), 99.0);
    assert_eq!(solve(&engine, "get($100, 2)"), 99.0);
    assert_eq!(engine.get_array(100.0), vec![10.0, 20.0, 99.0]);
}

#[test]
fn pointers_share_the_variable_table() {
    let engine = Engine::new();
    solve(&engine, "$(7) = 3");
    assert_eq!(engine.get_variable("7"), 3.0);
    assert_eq!(solve(&engine, "$(3 + 4) * 2"), 6.0);
}

#[test]
fn growing_and_shrinking() {
    let engine = Engine::new();
    solve(&engine, "alloc($0, 1, 2, 3)");
    assert_eq!(solve(&engine, "add($0, 4)"), 4.0);
    assert_eq!(solve(&engine, "insert($0, 0, 0)"), 0.0);
    assert_eq!(solve(&engine, "insert($0, len($0), 5)"), 5.0);
    assert_eq!(engine.get_array(0.0), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

    assert_eq!(solve(&engine, "remove($0, 3)"), 1.0);
    assert_eq!(solve(&engine, "remove($0, 42)"), 0.0);
    assert_eq!(solve(&engine, "indexof($0, 4)"), 3.0);
    assert_eq!(solve(&engine, "indexof($0, 3)"), -1.0);
    assert_eq!(solve(&engine, "contains($0, 5)"), 1.0);

    assert_eq!(solve(&engine, "clear($0)"), 0.0);
    assert_eq!(solve(&engine, "len($0)"), 0.0);
}

#[test]
fn inserting_past_the_end_fails() {
    let engine = Engine::new();
    solve(&engine, "alloc($0, 1, 2)");
    assert_eq!(engine.solve("insert($0, 5, 9)"),
               Err(Error::Runtime(RuntimeError::InsertOutOfRange { address: "0".to_string(),
                                                                   index:   5, })));
    assert_eq!(engine.get_array(0.0), vec![1.0, 2.0]);
}

#[test]
fn allocation_shapes() {
    let engine = Engine::new();
    solve(&engine, "calloc($0, 3)");
    assert_eq!(engine.get_array(0.0), vec![0.0, 0.0, 0.0]);

    solve(&engine, "range($10, 4)");
    assert_eq!(engine.get_array(10.0), vec![0.0, 1.0, 2.0, 3.0]);

    solve(&engine, "alloc($20, \"abc\")");
    assert_eq!(engine.get_array(20.0), vec![97.0, 98.0, 99.0]);
    assert_eq!(engine.get_string(20.0), "abc");
}

#[test]
fn whole_array_operations() {
    let engine = Engine::new();
    solve(&engine, "alloc($0, 3, 1, 3, 2, 1)");
    solve(&engine, "copy($0, $50)");
    solve(&engine, "setify($0)");
    assert_eq!(engine.get_array(0.0), vec![3.0, 1.0, 2.0]);

    solve(&engine, "sort($0)");
    assert_eq!(engine.get_array(0.0), vec![1.0, 2.0, 3.0]);
    assert_eq!(engine.get_array(50.0), vec![3.0, 1.0, 3.0, 2.0, 1.0]);

    solve(&engine, "concat($0, $50)");
    assert_eq!(engine.get_array(0.0).len(), 8);
}

#[test]
fn callbacks_receive_element_and_index() {
    let engine = Engine::new();
    solve(&engine, "range($0, 1, 6)");
    assert_eq!(solve(&engine, "count($0, @(x, i, x > 2))"), 3.0);
    assert_eq!(solve(&engine, "any($0, @(x, i, x == 4))"), 1.0);
    assert_eq!(solve(&engine, "any($0, @(x, i, x > 10))"), 0.0);

    solve(&engine, "total = 0");
    assert_eq!(solve(&engine, "iter($0, @(x, i, $total += x * i))"), 5.0);
    assert_eq!(engine.get_variable("total"), 40.0);

    assert_eq!(solve(&engine, "filter($0, @(x, i, i % 2 == 0))"), 3.0);
    assert_eq!(engine.get_array(0.0), vec![1.0, 3.0, 5.0]);
}

#[test]
fn reducers_accept_a_pointer_or_a_list() {
    let engine = Engine::new();
    solve(&engine, "alloc($0, 4, 8, 6)");
    assert_eq!(solve(&engine, "max($0)"), 8.0);
    assert_eq!(solve(&engine, "sum($0)"), 18.0);
    assert_eq!(solve(&engine, "median($0)"), 6.0);
    assert_eq!(solve(&engine, "min(4, 8, 6)"), 4.0);
    assert_eq!(solve(&engine, "mean(1, 2, 3, 4)"), 2.5);
    assert_eq!(solve(&engine, "product(2, 3, 4)"), 24.0);
}

#[test]
fn non_pointers_are_rejected() {
    let engine = Engine::new();
    assert!(matches!(engine.solve("len(5)"), Err(Error::Runtime(RuntimeError::Evaluation { .. }))));
    assert!(matches!(engine.solve("count($0, 5)"), Err(Error::Runtime(RuntimeError::Evaluation { .. }))));
}
