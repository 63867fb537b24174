use crate::{
    ast::{Node, NodeRef},
    interpreter::{
        evaluator::{core::EvalResult, scope::Scope},
        operators::BinaryOp,
    },
    util::num::{from_bool, is_truthy},
};

impl Node {
    /// Evaluates the logical operators and `;`.
    ///
    /// `&&` skips its right operand when the left one is zero and `||` skips
    /// it when the left one is nonzero. `^^` always evaluates both. `;`
    /// evaluates left, then right, and yields the right value.
    pub(crate) fn eval_logic(op: BinaryOp,
                             left: &NodeRef,
                             right: &NodeRef,
                             scope: Scope<'_>)
                             -> EvalResult<f64> {
        let a = left.solve(scope)?;

        match op {
            BinaryOp::And => {
                Ok(from_bool(is_truthy(a) && is_truthy(right.solve(scope)?)))
            },
            BinaryOp::Or => {
                Ok(from_bool(is_truthy(a) || is_truthy(right.solve(scope)?)))
            },
            BinaryOp::Xor => Ok(from_bool(is_truthy(a) ^ is_truthy(right.solve(scope)?))),
            BinaryOp::Sequence => right.solve(scope),
            _ => unreachable!("{op} is not logical"),
        }
    }
}
