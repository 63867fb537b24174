use crate::{
    ast::{Node, NodeRef},
    interpreter::{
        evaluator::{core::EvalResult, scope::Scope},
        operators::UnaryOp,
    },
    util::num::{from_bool, from_i64, is_truthy, truncate},
};

impl Node {
    /// Evaluates a unary operator node.
    ///
    /// Only `!` and `~` reach evaluation as operators; the tree builder turns
    /// the other prefixes into multiplications and pointer nodes.
    ///
    /// # Example
    /// ```
    /// use wingcalc::Engine;
    ///
    /// let engine = Engine::new();
    /// assert_eq!(engine.solve("!0").unwrap(), 1.0);
    /// assert_eq!(engine.solve("!3").unwrap(), 0.0);
    /// assert_eq!(engine.solve("~5").unwrap(), -6.0);
    /// ```
    pub(crate) fn eval_unary(op: UnaryOp, operand: &NodeRef, scope: Scope<'_>) -> EvalResult<f64> {
        let value = operand.solve(scope)?;

        Ok(match op {
            UnaryOp::Not => from_bool(!is_truthy(value)),
            UnaryOp::Complement => from_i64(!truncate(value)),
        })
    }
}
