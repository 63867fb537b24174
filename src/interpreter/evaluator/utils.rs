use crate::{
    ast::{Node, NodeRef},
    error::RuntimeError,
    interpreter::evaluator::{
        array,
        capability::{Addressable, Assignable, Callable},
        core::EvalResult,
        scope::{Binding, Scope},
    },
    util::{
        num::from_count,
        text::{from_cells, to_cells},
    },
};

/// Returns the argument at `index`.
///
/// The registry checks arity before dispatch, so this only fails for
/// builtins registered with a looser arity than they read.
///
/// # Errors
/// [`RuntimeError::Evaluation`] when the argument is missing.
pub fn argument<'a>(function: &str, args: &'a [NodeRef], index: usize) -> EvalResult<&'a NodeRef> {
    args.get(index)
        .ok_or_else(|| RuntimeError::evaluation(function, format!("is missing argument {}", index + 1)))
}

/// Evaluates the argument at `index`.
///
/// # Errors
/// A missing argument, or whatever evaluating it raises.
pub fn solve_arg(function: &str, args: &[NodeRef], index: usize, scope: Scope<'_>) -> EvalResult<f64> {
    argument(function, args, index)?.solve(scope)
}

/// Returns the argument at `index` viewed as a pointer.
///
/// # Errors
/// [`RuntimeError::Evaluation`] naming the position when the argument is not
/// a pointer.
pub fn pointer_arg<'a>(function: &str,
                       args: &'a [NodeRef],
                       index: usize)
                       -> EvalResult<&'a dyn Addressable> {
    argument(function, args, index)?
        .as_pointer()
        .map_err(|_| expects(function, "a pointer", index))
}

/// Returns the argument at `index` viewed as a callable.
///
/// # Errors
/// [`RuntimeError::Evaluation`] naming the position when the argument cannot
/// be called.
pub fn callable_arg<'a>(function: &str,
                        args: &'a [NodeRef],
                        index: usize)
                        -> EvalResult<&'a dyn Callable> {
    argument(function, args, index)?
        .as_callable()
        .map_err(|_| expects(function, "a callable", index))
}

/// Returns the argument at `index` viewed as an assignment target.
///
/// # Errors
/// [`RuntimeError::Evaluation`] naming the position when the argument cannot
/// be assigned to.
pub fn assignable_arg<'a>(function: &str,
                          args: &'a [NodeRef],
                          index: usize)
                          -> EvalResult<&'a dyn Assignable> {
    argument(function, args, index)?
        .as_assignable()
        .map_err(|_| expects(function, "an assignable", index))
}

/// Returns the text of a quote argument.
///
/// # Errors
/// [`RuntimeError::Evaluation`] when the argument is not a quote.
pub fn quote_arg<'a>(function: &str, args: &'a [NodeRef], index: usize) -> EvalResult<&'a str> {
    match argument(function, args, index)?.as_ref() {
        Node::Quote(text) => Ok(text),
        _ => Err(expects(function, "a quote", index)),
    }
}

/// Reads a text argument given either as a quote or as a pointer to
/// character cells.
///
/// # Errors
/// [`RuntimeError::Evaluation`] when the argument is neither.
pub fn text_arg(function: &str, args: &[NodeRef], index: usize, scope: Scope<'_>) -> EvalResult<String> {
    let node = argument(function, args, index)?;

    match node.as_ref() {
        Node::Quote(text) => Ok(text.clone()),
        _ if node.points_to_memory(scope) => {
            let pointer = node.as_pointer()?;
            Ok(from_cells(&array::collect(pointer, scope)?))
        },
        _ => Err(expects(function, "a pointer or a quote", index)),
    }
}

/// Reads the values a list builtin works on.
///
/// When the first argument denotes memory the array stored there is read;
/// otherwise every argument is evaluated in order.
///
/// # Errors
/// Whatever reading the array or evaluating an argument raises.
pub fn list_values(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<Vec<f64>> {
    if let Some(first) = args.first()
       && first.points_to_memory(scope)
    {
        return array::collect(first.as_pointer()?, scope);
    }
    args.iter().map(|arg| arg.solve(scope)).collect()
}

/// Reads the values an allocating builtin stores: the characters of a quote,
/// or the evaluated arguments.
///
/// # Errors
/// Whatever evaluating an argument raises.
pub fn allocation_values(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<Vec<f64>> {
    if let [quote] = args
       && let Node::Quote(text) = quote.as_ref()
    {
        return Ok(to_cells(text));
    }
    args.iter().map(|arg| arg.solve(scope)).collect()
}

/// The binding an argument passes on when it is stored: locals hand over
/// their binding, everything else is evaluated.
///
/// # Errors
/// Whatever resolving the argument raises.
pub fn binding_of(node: &NodeRef, scope: Scope<'_>) -> EvalResult<Binding> {
    match node.as_ref() {
        Node::Local(name) => scope.require(name),
        _ => Ok(Binding::Value(node.solve(scope)?)),
    }
}

/// Calls `callable` once per element with the element and its index.
///
/// # Errors
/// Whatever the callable raises.
pub fn call_with_element(callable: &dyn Callable,
                         element: f64,
                         index: usize,
                         scope: Scope<'_>)
                         -> EvalResult<f64> {
    let args = [Node::Constant(element).into_ref(),
                Node::Constant(from_count(index)).into_ref()];
    callable.call(&args, scope, scope)
}

fn expects(function: &str, what: &str, index: usize) -> RuntimeError {
    RuntimeError::evaluation(function, format!("expects {what} as argument {}", index + 1))
}
