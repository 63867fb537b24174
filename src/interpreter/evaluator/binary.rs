/// Operator dispatch.
///
/// Evaluates both operands (or only the left one, for the short-circuiting
/// operators) and routes to the arithmetic, comparison or logic helpers.
pub mod core;

/// Arithmetic and bitwise operators.
pub mod arithmetic;

/// Comparison and equality operators.
pub mod comparison;

/// Logical operators and sequencing.
pub mod logic;
