use crate::{ast::Node, interpreter::operators::BinaryOp, util::num::from_bool};

impl Node {
    /// Compares two numbers, yielding `1` for true and `0` for false.
    ///
    /// Comparisons are exact and follow IEEE rules: `NaN` is unequal to
    /// everything, itself included.
    ///
    /// # Example
    /// ```
    /// use wingcalc::{ast::Node, interpreter::operators::BinaryOp};
    ///
    /// assert_eq!(Node::eval_comparison(BinaryOp::LessEqual, 2.0, 2.0), 1.0);
    /// assert_eq!(Node::eval_comparison(BinaryOp::Equal, f64::NAN, f64::NAN), 0.0);
    /// ```
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn eval_comparison(op: BinaryOp, a: f64, b: f64) -> f64 {
        let result = match op {
            BinaryOp::Less => a < b,
            BinaryOp::LessEqual => a <= b,
            BinaryOp::Greater => a > b,
            BinaryOp::GreaterEqual => a >= b,
            BinaryOp::Equal => a == b,
            BinaryOp::NotEqual => a != b,
            _ => unreachable!("{op} is not a comparison"),
        };

        from_bool(result)
    }
}
