/// Tokenizer and tree-builder errors.
///
/// Defines the error types raised before any evaluation happens: malformed or
/// unterminated literals, illegal sign runs, mismatched brackets, missing
/// operands and trailing expressions. A failure in either phase means no part
/// of the input is evaluated.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the errors raised while a tree is being solved: unresolved names,
/// missing node capabilities, builtin domain violations, user `throw`s and host
/// faults. Each error reports the category that catching builtins filter on.
pub mod runtime_error;

pub use parse_error::{ParseError, TokenError};
pub use runtime_error::{ErrorCategory, RuntimeError};

/// Any failure produced by a call to [`crate::Engine::solve`].
///
/// The three phases keep their own error types; this enum only gathers them so
/// that hosts can match on the phase that failed.
///
/// # Example
/// ```
/// use wingcalc::{Engine, error::Error};
///
/// let engine = Engine::new();
/// assert!(matches!(engine.solve("(1+2]"), Err(Error::Parse(_))));
/// assert!(matches!(engine.solve("\"open"), Err(Error::Token(_))));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The text could not be split into tokens.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// The tokens could not be built into a tree.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The tree failed while being evaluated.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<Error> for RuntimeError {
    /// Folds an error from a nested `solve` (as used by `exec`) back into the
    /// evaluation channel. Tokenizer and parser failures become language
    /// errors so that catching builtins can see them.
    fn from(error: Error) -> Self {
        match error {
            Error::Runtime(inner) => inner,
            other => Self::Syntax { message: other.to_string() },
        }
    }
}
