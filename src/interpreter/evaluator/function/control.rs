use crate::{
    ast::{Node, NodeRef},
    error::RuntimeError,
    interpreter::evaluator::{
        core::EvalResult,
        scope::{Binding, Scope},
        utils::{argument, solve_arg},
    },
    util::num::{from_count, is_truthy},
};

/// `if(cond, then[, otherwise])`: evaluates `then` when the condition is
/// non-zero, otherwise `otherwise` or `0`.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("if(1 < 2, 10, 20)").unwrap(), 10.0);
/// assert_eq!(engine.solve("if(0, 10)").unwrap(), 0.0);
/// ```
pub fn if_fn(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    if is_truthy(solve_arg("if", args, 0, scope)?) {
        solve_arg("if", args, 1, scope)
    } else if args.len() > 2 {
        solve_arg("if", args, 2, scope)
    } else {
        Ok(0.0)
    }
}

/// `else(cond, body)`: evaluates `body` when the condition is zero and
/// returns `1` otherwise.
pub fn else_fn(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    if is_truthy(solve_arg("else", args, 0, scope)?) {
        Ok(1.0)
    } else {
        solve_arg("else", args, 1, scope)
    }
}

/// `switch(x, case1, result1, ..., [default])`.
///
/// The cases are compared in order and only the matching result is
/// evaluated. With an even argument count the last argument is the default;
/// otherwise a miss yields `0`.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("switch(2, 1, 10, 2, 20, 99)").unwrap(), 20.0);
/// assert_eq!(engine.solve("switch(7, 1, 10, 2, 20, 99)").unwrap(), 99.0);
/// assert_eq!(engine.solve("switch(7, 1, 10)").unwrap(), 0.0);
/// ```
#[allow(clippy::float_cmp)]
pub fn switch(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let subject = solve_arg("switch", args, 0, scope)?;

    let mut i = 1;
    while i + 1 < args.len() {
        if subject == solve_arg("switch", args, i, scope)? {
            return solve_arg("switch", args, i + 1, scope);
        }
        i += 2;
    }

    if args.len() % 2 == 0 {
        solve_arg("switch", args, args.len() - 1, scope)
    } else {
        Ok(0.0)
    }
}

/// `for(init, cond, step, body)`: C-style loop returning the iteration count.
///
/// The body runs before the step on each iteration.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("s = 0; for(i = 0, i < 5, i += 1, $s += i)").unwrap(), 5.0);
/// assert_eq!(engine.get_variable("s"), 10.0);
/// ```
pub fn for_fn(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    solve_arg("for", args, 0, scope)?;

    let mut count = 0;
    while is_truthy(solve_arg("for", args, 1, scope)?) {
        solve_arg("for", args, 3, scope)?;
        solve_arg("for", args, 2, scope)?;
        count += 1;
    }

    Ok(from_count(count))
}

/// `while(cond, body)`: returns the iteration count.
pub fn while_fn(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let mut count = 0;
    while is_truthy(solve_arg("while", args, 0, scope)?) {
        solve_arg("while", args, 1, scope)?;
        count += 1;
    }
    Ok(from_count(count))
}

/// `dowhile(cond, body)`: runs the body once before testing the condition.
pub fn do_while(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let mut count = 0;
    loop {
        solve_arg("dowhile", args, 1, scope)?;
        count += 1;
        if !is_truthy(solve_arg("dowhile", args, 0, scope)?) {
            break;
        }
    }
    Ok(from_count(count))
}

/// `repeat(body, n)`: evaluates `n` once, then the body that many times, and
/// returns `n`.
pub fn repeat(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let times = solve_arg("repeat", args, 1, scope)?;

    let mut i = 0.0;
    while i < times {
        solve_arg("repeat", args, 0, scope)?;
        i += 1.0;
    }

    Ok(times)
}

/// `msum(counter = lo, hi, term)` and `mproduct(counter = lo, hi, term)`.
///
/// The first argument must be an assignment; its target is the bound counter,
/// which is incremented after every term while it stays at or below `hi`.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("msum(k = 1, 4, k * k)").unwrap(), 30.0);
/// assert_eq!(engine.solve("mproduct(k = 1, 5, k)").unwrap(), 120.0);
/// ```
pub fn accumulate(name: &str, args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let init = argument(name, args, 0)?;
    let Node::Assignment { target, .. } = init.as_ref() else {
        return Err(RuntimeError::evaluation(name, "expects an assignment as argument 1"));
    };
    let counter = target.as_assignable()?;

    init.solve(scope)?;
    let end = solve_arg(name, args, 1, scope)?;

    let (mut total, fold): (f64, fn(f64, f64) -> f64) = if name == "mproduct" {
        (1.0, |acc, term| acc * term)
    } else {
        (0.0, |acc, term| acc + term)
    };

    while target.solve(scope)? <= end {
        total = fold(total, solve_arg(name, args, 2, scope)?);
        let next = target.solve(scope)? + 1.0;
        counter.assign(Binding::Value(next), scope)?;
    }

    Ok(total)
}
