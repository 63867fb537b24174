use crate::{
    ast::Node,
    interpreter::operators::BinaryOp,
    util::num::{from_i64, truncate},
};

impl Node {
    /// Applies an arithmetic operator.
    ///
    /// Division follows IEEE semantics, so dividing by zero yields an infinity
    /// or `NaN` rather than an error. `%` keeps the sign of the dividend and
    /// `//` rounds the quotient down.
    ///
    /// # Example
    /// ```
    /// use wingcalc::{ast::Node, interpreter::operators::BinaryOp};
    ///
    /// assert_eq!(Node::eval_arithmetic(BinaryOp::Power, 2.0, 10.0), 1024.0);
    /// assert_eq!(Node::eval_arithmetic(BinaryOp::Remainder, -7.0, 3.0), -1.0);
    /// assert_eq!(Node::eval_arithmetic(BinaryOp::FloorDivide, -7.0, 2.0), -4.0);
    /// assert!(Node::eval_arithmetic(BinaryOp::Divide, 1.0, 0.0).is_infinite());
    /// ```
    #[must_use]
    pub fn eval_arithmetic(op: BinaryOp, a: f64, b: f64) -> f64 {
        match op {
            BinaryOp::Power => a.powf(b),
            BinaryOp::Multiply => a * b,
            BinaryOp::Divide => a / b,
            BinaryOp::Remainder => a % b,
            BinaryOp::FloorDivide => (a / b).floor(),
            BinaryOp::Add => a + b,
            BinaryOp::Subtract => a - b,
            _ => unreachable!("{op} is not arithmetic"),
        }
    }

    /// Applies a bitwise operator to the integer truncations of both operands.
    ///
    /// Shift amounts wrap modulo 64.
    ///
    /// # Example
    /// ```
    /// use wingcalc::{ast::Node, interpreter::operators::BinaryOp};
    ///
    /// assert_eq!(Node::eval_bitwise(BinaryOp::BitAnd, 12.9, 10.0), 8.0);
    /// assert_eq!(Node::eval_bitwise(BinaryOp::ShiftRight, -16.0, 2.0), -4.0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn eval_bitwise(op: BinaryOp, a: f64, b: f64) -> f64 {
        let (a, b) = (truncate(a), truncate(b));

        let result = match op {
            BinaryOp::ShiftLeft => a.wrapping_shl(b as u32),
            BinaryOp::ShiftRight => a.wrapping_shr(b as u32),
            BinaryOp::BitAnd => a & b,
            BinaryOp::BitXor => a ^ b,
            BinaryOp::BitOr => a | b,
            _ => unreachable!("{op} is not bitwise"),
        };

        from_i64(result)
    }
}
