use crate::{
    ast::NodeRef,
    error::RuntimeError,
    interpreter::evaluator::{core::EvalResult, scope::Scope, utils::list_values},
    util::num::from_count,
};

/// Reduces a list to one number.
///
/// The list is the array at the first argument when that argument denotes
/// memory, and the evaluated arguments otherwise. The reducer is selected by
/// `name`, which must be one of `"max"`, `"min"`, `"sum"`, `"product"`,
/// `"mean"` or `"median"`.
///
/// # Errors
/// [`RuntimeError::Evaluation`] when `max`, `min`, `mean` or `median` is
/// given an empty array. An empty sum is `0` and an empty product is `1`.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("max(3, 9, 4)").unwrap(), 9.0);
/// assert_eq!(engine.solve("median(5, 1, 4, 2)").unwrap(), 3.0);
///
/// engine.solve("alloc($0, 2, 4, 6)").unwrap();
/// assert_eq!(engine.solve("mean($0)").unwrap(), 4.0);
/// ```
pub fn reduce(name: &str, args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
    let values = list_values(args, scope)?;

    match name {
        "sum" => return Ok(values.iter().sum()),
        "product" => return Ok(values.iter().product()),
        _ => {},
    }

    if values.is_empty() {
        return Err(RuntimeError::evaluation(name, "cannot reduce an empty list"));
    }

    Ok(match name {
        "max" => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        "min" => values.iter().copied().fold(f64::INFINITY, f64::min),
        "mean" => values.iter().sum::<f64>() / from_count(values.len()),
        "median" => median(values),
        _ => unreachable!(),
    })
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);

    let middle = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[middle - 1] + values[middle]) / 2.0
    } else {
        values[middle]
    }
}
