use crate::{
    ast::{Node, NodeRef},
    interpreter::{
        evaluator::{core::EvalResult, scope::Scope},
        operators::BinaryOp,
    },
};

impl Node {
    /// Evaluates a binary operator node.
    ///
    /// `&&`, `||` and `;` receive their operands unevaluated so that they can
    /// decide whether and in which order to evaluate them. Every other
    /// operator evaluates left, then right, and works on the two numbers.
    ///
    /// # Example
    /// ```
    /// use wingcalc::Engine;
    ///
    /// let engine = Engine::new();
    /// assert_eq!(engine.solve("7 // 2").unwrap(), 3.0);
    /// assert_eq!(engine.solve("1 << 4").unwrap(), 16.0);
    /// assert_eq!(engine.solve("0 && throw(\"skipped\")").unwrap(), 0.0);
    /// ```
    pub(crate) fn eval_binary(op: BinaryOp,
                              left: &NodeRef,
                              right: &NodeRef,
                              scope: Scope<'_>)
                              -> EvalResult<f64> {
        use BinaryOp::{
            Add, And, BitAnd, BitOr, BitXor, Divide, Equal, FloorDivide, Greater, GreaterEqual,
            Less, LessEqual, Multiply, NotEqual, Or, Power, Remainder, Sequence, ShiftLeft,
            ShiftRight, Subtract, Xor,
        };

        match op {
            And | Or | Xor | Sequence => Self::eval_logic(op, left, right, scope),

            Power | Multiply | Divide | Remainder | FloorDivide | Add | Subtract => {
                let (a, b) = Self::eval_operands(left, right, scope)?;
                Ok(Self::eval_arithmetic(op, a, b))
            },

            ShiftLeft | ShiftRight | BitAnd | BitXor | BitOr => {
                let (a, b) = Self::eval_operands(left, right, scope)?;
                Ok(Self::eval_bitwise(op, a, b))
            },

            Less | LessEqual | Greater | GreaterEqual | Equal | NotEqual => {
                let (a, b) = Self::eval_operands(left, right, scope)?;
                Ok(Self::eval_comparison(op, a, b))
            },
        }
    }

    fn eval_operands(left: &NodeRef, right: &NodeRef, scope: Scope<'_>) -> EvalResult<(f64, f64)> {
        let a = left.solve(scope)?;
        let b = right.solve(scope)?;
        Ok((a, b))
    }
}
