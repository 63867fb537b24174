//! Array builtins.
//!
//! Every builtin here takes a pointer as its first argument and works through
//! the array protocol in [`crate::interpreter::evaluator::array`], so the same
//! call works on `$` global memory and on `#` frame-local cells.

use crate::{
    ast::NodeRef,
    interpreter::evaluator::{
        array,
        core::EvalResult,
        scope::Scope,
        utils::{allocation_values, call_with_element, callable_arg, pointer_arg, solve_arg},
    },
    util::{
        num::{from_bool, from_count, is_truthy, to_count},
        text::list_string,
    },
};

/// `alloc(p, values...)` or `alloc(p, "text")`: writes a new array and
/// returns its address.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("alloc($100, 10, 20, 30)").unwrap(), 100.0);
/// assert_eq!(engine.get_array(100.0), vec![10.0, 20.0, 30.0]);
///
/// engine.solve("alloc($200, \"hi\")").unwrap();
/// assert_eq!(engine.get_string(200.0), "hi");
/// ```
pub fn alloc(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("alloc", args, 0)?;
    let values = allocation_values(args.get(1..).unwrap_or_default(), scope)?;
    array::allocate(pointer, &values, scope)
}

/// `calloc(p, n)`: allocates `n` zeroes.
pub fn calloc(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("calloc", args, 0)?;
    let length = to_count(solve_arg("calloc", args, 1, scope)?);
    array::allocate(pointer, &vec![0.0; length], scope)
}

/// `malloc(p, n)`: writes only the length cell, leaving the element cells as
/// they are, and returns `n`.
pub fn malloc(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("malloc", args, 0)?;
    let length = solve_arg("malloc", args, 1, scope)?;
    let address = pointer.address(scope)?;
    pointer.set(address, length, scope)
}

/// `range(p, end)` or `range(p, start, end)`: allocates the half-open run of
/// integers stepping by one.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// engine.solve("range($0, 2, 5)").unwrap();
/// assert_eq!(engine.get_array(0.0), vec![2.0, 3.0, 4.0]);
/// ```
pub fn range(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("range", args, 0)?;

    let (start, end) = if args.len() >= 3 {
        (solve_arg("range", args, 1, scope)?, solve_arg("range", args, 2, scope)?)
    } else {
        (0.0, solve_arg("range", args, 1, scope)?)
    };

    let mut values = Vec::new();
    let mut i = start;
    while i < end {
        values.push(i);
        i += 1.0;
    }

    array::allocate(pointer, &values, scope)
}

/// `len(p)`.
pub fn len(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    array::length(pointer_arg("len", args, 0)?, scope)
}

/// `get(p, i)`; negative indices count from the end.
pub fn get(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("get", args, 0)?;
    array::get(pointer, solve_arg("get", args, 1, scope)?, scope)
}

/// `set(p, i, v)`; negative indices count from the end.
pub fn set(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("set", args, 0)?;
    let index = solve_arg("set", args, 1, scope)?;
    let value = solve_arg("set", args, 2, scope)?;
    array::set(pointer, index, value, scope)
}

/// `add(p, v)`: appends and returns `v`.
pub fn add(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("add", args, 0)?;
    array::add(pointer, solve_arg("add", args, 1, scope)?, scope)
}

/// `insert(p, i, v)`.
pub fn insert(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("insert", args, 0)?;
    let index = solve_arg("insert", args, 1, scope)?;
    let value = solve_arg("insert", args, 2, scope)?;
    array::insert(pointer, index, value, scope)
}

/// `remove(p, v)`: removes the first occurrence, returning `1` or `0`.
pub fn remove(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("remove", args, 0)?;
    array::remove(pointer, solve_arg("remove", args, 1, scope)?, scope)
}

/// `indexof(p, v)`: the first index holding `v`, or `-1`.
pub fn index_of(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("indexof", args, 0)?;
    array::index_of(pointer, solve_arg("indexof", args, 1, scope)?, scope)
}

/// `contains(p, v)`.
pub fn contains(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("contains", args, 0)?;
    let found = array::index_of(pointer, solve_arg("contains", args, 1, scope)?, scope)?;
    Ok(from_bool(found >= 0.0))
}

/// `clear(p)`.
pub fn clear(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    array::clear(pointer_arg("clear", args, 0)?, scope)
}

/// `concat(a, b[, target])`: the target defaults to `a`, which appends `b`
/// in place.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// engine.solve("alloc($0, 1, 2); alloc($10, 3); concat($0, $10, $20)").unwrap();
/// assert_eq!(engine.get_array(20.0), vec![1.0, 2.0, 3.0]);
/// ```
pub fn concat(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let a = pointer_arg("concat", args, 0)?;
    let b = pointer_arg("concat", args, 1)?;
    let target = if args.len() >= 3 { pointer_arg("concat", args, 2)? } else { a };
    array::concat(a, b, target, scope)
}

/// `copy(from, to)`.
pub fn copy(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let from = pointer_arg("copy", args, 0)?;
    let to = pointer_arg("copy", args, 1)?;
    array::copy(from, to, scope)
}

/// `setify(p)`.
pub fn setify(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    array::setify(pointer_arg("setify", args, 0)?, scope)
}

/// `sort(p)`.
pub fn sort(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    array::sort(pointer_arg("sort", args, 0)?, scope)
}

/// `iter(p, f)`: calls `f(element, index)` for each element and returns the
/// element count.
pub fn iter(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("iter", args, 0)?;
    let callable = callable_arg("iter", args, 1)?;

    let mut count = 0;
    for (i, element) in array::enumerate(pointer, scope)?.enumerate() {
        call_with_element(callable, element?, i, scope)?;
        count += 1;
    }

    Ok(from_count(count))
}

/// `mut(p, f)`: replaces each element with `f(element, index)` and returns
/// the element count.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// engine.solve("alloc($0, 1, 2, 3); mut($0, @(x, i, x * 10 + i))").unwrap();
/// assert_eq!(engine.get_array(0.0), vec![10.0, 21.0, 32.0]);
/// ```
pub fn mutate(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("mut", args, 0)?;
    let callable = callable_arg("mut", args, 1)?;

    let mut count = 0;
    for (i, element) in array::enumerate(pointer, scope)?.enumerate() {
        let value = call_with_element(callable, element?, i, scope)?;
        array::set(pointer, from_count(i), value, scope)?;
        count += 1;
    }

    Ok(from_count(count))
}

/// `filter(p, f)`: keeps the elements for which `f(element, index)` is
/// non-zero and returns the new length.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("range($0, 10); filter($0, @(x, i, x % 3 == 0))").unwrap(), 4.0);
/// assert_eq!(engine.get_array(0.0), vec![0.0, 3.0, 6.0, 9.0]);
/// ```
pub fn filter(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("filter", args, 0)?;
    let callable = callable_arg("filter", args, 1)?;

    let mut kept = Vec::new();
    for (i, element) in array::enumerate(pointer, scope)?.enumerate() {
        let element = element?;
        if is_truthy(call_with_element(callable, element, i, scope)?) {
            kept.push(element);
        }
    }

    array::allocate(pointer, &kept, scope)?;
    Ok(from_count(kept.len()))
}

/// `any(p, f)`: `1` as soon as `f(element, index)` is non-zero, else `0`.
pub fn any(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("any", args, 0)?;
    let callable = callable_arg("any", args, 1)?;

    for (i, element) in array::enumerate(pointer, scope)?.enumerate() {
        if is_truthy(call_with_element(callable, element?, i, scope)?) {
            return Ok(1.0);
        }
    }

    Ok(0.0)
}

/// `count(p, f)`: the number of elements for which `f(element, index)` is
/// non-zero.
pub fn count(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("count", args, 0)?;
    let callable = callable_arg("count", args, 1)?;

    let mut count = 0;
    for (i, element) in array::enumerate(pointer, scope)?.enumerate() {
        if is_truthy(call_with_element(callable, element?, i, scope)?) {
            count += 1;
        }
    }

    Ok(from_count(count))
}

/// `memprint(p)`: writes `$address = value` for the cell the pointer names
/// and returns the value.
pub fn memprint(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let pointer = pointer_arg("memprint", args, 0)?;
    let address = pointer.address(scope)?;
    let value = pointer.get(address, scope)?;

    scope.engine().io().write_line(&format!("${address} = {value}"));
    Ok(value)
}

/// Writes the array as `{ a, b, c }` and returns its length.
pub(crate) fn print_array(values: &[f64], scope: Scope<'_>) -> f64 {
    scope.engine().io().write_line(&list_string(values));
    from_count(values.len())
}
