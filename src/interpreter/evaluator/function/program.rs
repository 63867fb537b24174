use crate::{
    ast::NodeRef,
    error::{ErrorCategory, RuntimeError},
    interpreter::evaluator::{
        core::EvalResult,
        scope::{Binding, Scope},
        utils::{argument, assignable_arg, binding_of, callable_arg, quote_arg, solve_arg, text_arg},
    },
    util::num::from_count,
};

/// `eval(x)`: evaluates and returns its argument.
pub fn eval(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    solve_arg("eval", args, 0, scope)
}

/// `call(f, args...)`: calls a lambda, macro or callable local with the
/// remaining arguments.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("call(@(a, b, a - b), 10, 4)").unwrap(), 6.0);
/// ```
pub fn call(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let callable = callable_arg("call", args, 0)?;
    callable.call(args.get(1..).unwrap_or_default(), scope, scope)
}

/// `val(target, x)`: evaluates `x` and assigns the value to `target`.
pub fn val(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let target = assignable_arg("val", args, 0)?;
    let value = solve_arg("val", args, 1, scope)?;
    target.assign(Binding::Value(value), scope)
}

/// `deepset(target, source)`: assigns through whatever the target refers to.
/// A local source hands over its binding; anything else is evaluated.
pub fn deep_set(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let target = assignable_arg("deepset", args, 0)?;
    let source = binding_of(argument("deepset", args, 1)?, scope)?;
    target.deep_assign(source, scope)
}

/// `deepval(target, x)`: like `deepset`, but always assigns the value of `x`.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// engine.solve("@setter(x) = deepval(x, 42)").unwrap();
/// engine.solve("@setter(v)").unwrap();
/// assert_eq!(engine.get_variable("v"), 42.0);
/// ```
pub fn deep_val(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let target = assignable_arg("deepval", args, 0)?;
    let value = solve_arg("deepval", args, 1, scope)?;
    target.deep_assign(Binding::Value(value), scope)
}

/// `enum(a, b, ...)`: assigns each argument its position and returns `1`.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// engine.solve("enum($red, $green, $blue)").unwrap();
/// assert_eq!(engine.get_variable("blue"), 2.0);
/// ```
pub fn enumerate(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    for i in 0..args.len() {
        assignable_arg("enum", args, i)?.assign(Binding::Value(from_count(i)), scope)?;
    }
    Ok(1.0)
}

/// `exec(text)`: runs the text of a quote, or of the character array at a
/// pointer, as a nested expression.
///
/// The nested run does not update `ANS`. Tokenizer and parser failures come
/// back as [`RuntimeError::Syntax`].
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("exec(\"6 * 7\")").unwrap(), 42.0);
/// ```
pub fn exec(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let text = text_arg("exec", args, 0, scope)?;
    tracing::trace!(text = %text, "exec");
    Ok(scope.engine().solve_with(&text, false)?)
}

/// `catch(body, handler)`, `catchlang(body, handler)` and
/// `catchhost(body, handler)`.
///
/// Evaluates the body; when it fails with an error of the category the
/// variant intercepts, the handler is evaluated instead. `catch` intercepts
/// everything, `catchlang` only language errors and `catchhost` only host
/// faults. Other errors keep propagating.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("catch(throw(\"no\"), 7)").unwrap(), 7.0);
/// assert_eq!(engine.solve("catchlang(@missing, 8)").unwrap(), 8.0);
/// assert!(engine.solve("catchlang(throw(\"no\"), 8)").is_err());
/// ```
pub fn catch(name: &str, args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    match solve_arg(name, args, 0, scope) {
        Ok(value) => Ok(value),
        Err(error) if intercepts(name, &error) => {
            tracing::trace!(function = name, error = %error, "caught");
            solve_arg(name, args, 1, scope)
        },
        Err(error) => Err(error),
    }
}

fn intercepts(name: &str, error: &RuntimeError) -> bool {
    match name {
        "catchlang" => error.category() == ErrorCategory::Language,
        "catchhost" => error.category() == ErrorCategory::Host,
        _ => true,
    }
}

/// `throw("message")`: raises [`RuntimeError::Thrown`].
pub fn throw(args: &[NodeRef], _scope: Scope<'_>) -> EvalResult<f64> {
    let message = quote_arg("throw", args, 0)?;
    Err(RuntimeError::Thrown { message: message.to_string() })
}
