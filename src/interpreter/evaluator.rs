/// The pointer-addressed array protocol.
///
/// An array at address `a` stores its length at `a` and its elements at
/// `a + 1 ..= a + n`, in whichever store the pointer addresses.
pub mod array;

/// Binary operator evaluation.
///
/// Handles arithmetic, shifts, comparisons, bitwise and logical operators,
/// and sequencing.
pub mod binary;

/// Node capabilities.
///
/// Declares the assignable, addressable and callable traits and implements
/// them for the node variants that support them.
pub mod capability;

/// Core evaluation logic.
///
/// Contains the `solve` dispatch over node variants and the assignment rule.
pub mod core;

/// Builtin functions.
///
/// The registry, arity checking and the reference library.
pub mod function;

/// Evaluation frames and local bindings.
pub mod scope;

/// Unary operator evaluation.
pub mod unary;

/// Utility functions for evaluation.
///
/// Argument accessors shared by the builtins.
pub mod utils;
