/// Mathematical builtins.
///
/// Unary functions over `f64`, logarithms, rounding, trigonometry and the
/// integer combinatorics `factorial`, `perm` and `comb`.
pub mod builtin;
/// Control-flow builtins.
///
/// Conditionals, loops and the bounded `msum`/`mproduct` forms. These rely on
/// receiving their arguments unevaluated.
pub mod control;
/// The builtin registry.
///
/// Declares the default builtin table, the [`core::Arity`] checks applied
/// before dispatch, and the engine's dispatch entry point.
pub mod core;
/// Array builtins over the pointer protocol.
pub mod memory;
/// List reducers: `max`, `min`, `sum`, `product`, `mean` and `median`.
pub mod min_max;
/// Output and input builtins, which talk to the engine's injected I/O.
pub mod print;
/// Evaluation, assignment and error-handling builtins.
pub mod program;
