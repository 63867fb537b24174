use crate::{
    ast::NodeRef,
    error::RuntimeError,
    interpreter::evaluator::{core::EvalResult, scope::Scope, utils::solve_arg},
    util::num::{from_bool, from_i64, truncate},
};

/// Defines a builtin applying an `f64` method to its single argument.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("sqrt(16)").unwrap(), 4.0);
/// assert_eq!(engine.solve("floor(-2.5)").unwrap(), -3.0);
/// ```
macro_rules! real_builtin {
    ($fname:ident, $name:literal, $real_fn:ident) => {
        #[doc = concat!("`", $name, "(x)`.")]
        pub fn $fname(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
            Ok(solve_arg($name, args, 0, scope)?.$real_fn())
        }
    };
}

real_builtin!(exp, "exp", exp);
real_builtin!(sqrt, "sqrt", sqrt);
real_builtin!(cbrt, "cbrt", cbrt);
real_builtin!(ln, "ln", ln);
real_builtin!(ceil, "ceil", ceil);
real_builtin!(floor, "floor", floor);
real_builtin!(trunc, "trunc", trunc);
real_builtin!(sin, "sin", sin);
real_builtin!(cos, "cos", cos);
real_builtin!(tan, "tan", tan);
real_builtin!(asin, "asin", asin);
real_builtin!(acos, "acos", acos);
real_builtin!(sinh, "sinh", sinh);
real_builtin!(cosh, "cosh", cosh);
real_builtin!(tanh, "tanh", tanh);
real_builtin!(rad, "rad", to_radians);
real_builtin!(deg, "deg", to_degrees);
real_builtin!(abs, "abs", abs);

/// `pow(x, y)`.
pub fn pow(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    Ok(solve_arg("pow", args, 0, scope)?.powf(solve_arg("pow", args, 1, scope)?))
}

/// `log(x)` is the base-10 logarithm; `log(x, b)` uses base `b`.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("log(1000)").unwrap(), 3.0);
/// assert!((engine.solve("log(8, 2)").unwrap() - 3.0).abs() < 1e-12);
/// ```
pub fn log(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let x = solve_arg("log", args, 0, scope)?;
    if args.len() == 1 {
        Ok(x.log10())
    } else {
        Ok(x.log(solve_arg("log", args, 1, scope)?))
    }
}

/// `round(x)` rounds half away from zero; `round(x, e)` rounds to the
/// nearest multiple of `10^-e`.
pub fn round(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let x = solve_arg("round", args, 0, scope)?;
    if args.len() == 1 {
        return Ok(x.round());
    }

    let scale = 10f64.powf(solve_arg("round", args, 1, scope)?);
    Ok((x * scale).round() / scale)
}

/// `atan(x)` or `atan(y, x)` for the two-argument arc tangent.
pub fn atan(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let y = solve_arg("atan", args, 0, scope)?;
    if args.len() > 1 {
        Ok(y.atan2(solve_arg("atan", args, 1, scope)?))
    } else {
        Ok(y.atan())
    }
}

/// `sign(x)`: `-1`, `0` or `1`.
///
/// # Errors
/// [`RuntimeError::Host`] for `NaN`, which has no sign.
pub fn sign(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let x = solve_arg("sign", args, 0, scope)?;
    if x.is_nan() {
        return Err(RuntimeError::Host { message: "Cannot take the sign of NaN.".to_string() });
    }
    Ok(if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    })
}

/// `clamp(x, lo, hi)`.
///
/// # Errors
/// [`RuntimeError::Evaluation`] when `lo > hi`.
pub fn clamp(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let x = solve_arg("clamp", args, 0, scope)?;
    let lo = solve_arg("clamp", args, 1, scope)?;
    let hi = solve_arg("clamp", args, 2, scope)?;

    if lo > hi {
        return Err(RuntimeError::evaluation("clamp", format!("expects a minimum ({lo}) no greater than the maximum ({hi})")));
    }
    Ok(x.max(lo).min(hi))
}

/// `nan(x)`: `1` when `x` is `NaN`.
pub fn nan(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    Ok(from_bool(solve_arg("nan", args, 0, scope)?.is_nan()))
}

/// `equals(a, b[, tolerance])`: `1` when `|a - b| <= tolerance`.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("equals(0.1 + 0.2, 0.3)").unwrap(), 0.0);
/// assert_eq!(engine.solve("equals(0.1 + 0.2, 0.3, 1e-9)").unwrap(), 1.0);
/// ```
pub fn equals(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let tolerance = if args.len() >= 3 { solve_arg("equals", args, 2, scope)? } else { 0.0 };
    let a = solve_arg("equals", args, 0, scope)?;
    let b = solve_arg("equals", args, 1, scope)?;
    Ok(from_bool((a - b).abs() <= tolerance))
}

/// `factorial(n)` of the truncated argument.
///
/// # Errors
/// [`RuntimeError::Evaluation`] for negative input and
/// [`RuntimeError::Host`] when the result overflows a 64-bit integer.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("factorial(5)").unwrap(), 120.0);
/// assert!(engine.solve("factorial(-1)").is_err());
/// ```
pub fn factorial(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let n = truncate(solve_arg("factorial", args, 0, scope)?);
    Ok(from_i64(factorial_of("factorial", n)?))
}

/// `perm(n, k)`: ordered selections of `k` out of `n`.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("perm(5, 2)").unwrap(), 20.0);
/// assert_eq!(engine.solve("comb(5, 2)").unwrap(), 10.0);
/// ```
pub fn perm(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let n = truncate(solve_arg("perm", args, 0, scope)?);
    let k = truncate(solve_arg("perm", args, 1, scope)?);
    Ok(from_i64(falling_product("perm", n, k)?))
}

/// `comb(n, k)`: unordered selections of `k` out of `n`.
pub fn comb(args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let n = truncate(solve_arg("comb", args, 0, scope)?);
    let k = truncate(solve_arg("comb", args, 1, scope)?);
    Ok(from_i64(falling_product("comb", n, k)? / factorial_of("comb", k)?))
}

fn overflow(function: &str) -> RuntimeError {
    RuntimeError::Host { message: format!("Arithmetic overflow in \"{function}\".") }
}

fn factorial_of(function: &str, n: i64) -> EvalResult<i64> {
    if n < 0 {
        return Err(RuntimeError::evaluation(function, "cannot take the factorial of a negative number"));
    }
    (2..=n).try_fold(1i64, |acc, i| acc.checked_mul(i))
           .ok_or_else(|| overflow(function))
}

/// `n! / (n - k)!`, the product `n * (n - 1) * ... * (n - k + 1)`.
fn falling_product(function: &str, n: i64, k: i64) -> EvalResult<i64> {
    if n <= 0 {
        return Err(RuntimeError::evaluation(function, "cannot select from a non-positive n"));
    }
    if k < 0 {
        return Err(RuntimeError::evaluation(function, "cannot select a negative k"));
    }
    if k > n {
        return Err(RuntimeError::evaluation(function, "cannot select with k > n"));
    }
    ((n - k + 1)..=n).try_fold(1i64, |acc, i| acc.checked_mul(i))
                     .ok_or_else(|| overflow(function))
}
