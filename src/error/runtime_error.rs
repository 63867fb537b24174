/// The broad family an evaluation error belongs to.
///
/// Catching builtins select on this: `catchlang` only intercepts
/// [`ErrorCategory::Language`], `catchhost` only [`ErrorCategory::Host`] and
/// `catch` intercepts everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised by the language itself: name resolution, capabilities, builtin
    /// domain checks.
    Language,
    /// Raised explicitly by the program through `throw`.
    Thrown,
    /// A fault of the host environment rather than of the program.
    Host,
}

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// A macro was invoked but never defined.
    #[error("Macro {name} does not exist.")]
    UnknownMacro {
        /// The macro name.
        name: String,
    },
    /// A local was read in a frame that does not bind it.
    #[error("Scope {frame} does not contain local #{name}.")]
    UnknownLocal {
        /// The local name.
        name:  String,
        /// The diagnostic name of the frame that was searched.
        frame: String,
    },
    /// A call named no registered builtin.
    #[error("Function {name} does not exist.")]
    UnknownFunction {
        /// The function name.
        name: String,
    },
    /// A node without the assignable capability was assigned to.
    #[error("{what} cannot be assigned to.")]
    NotAssignable {
        /// A description of the node.
        what: String,
    },
    /// A node without the pointer capability was used as a pointer.
    #[error("{what} could not be interpreted as a pointer.")]
    NotAddressable {
        /// A description of the node.
        what: String,
    },
    /// A node without the callable capability was called.
    #[error("{what} could not be interpreted as callable.")]
    NotCallable {
        /// A description of the node.
        what: String,
    },
    /// A macro reference with an argument list was used as an assignment
    /// target.
    #[error("Macro {name} has arguments and cannot be assigned to.")]
    MacroWithArguments {
        /// The macro name.
        name: String,
    },
    /// A builtin rejected its arguments.
    #[error("Function \"{function}\" {message}")]
    Evaluation {
        /// The builtin that failed.
        function: String,
        /// What went wrong, phrased to follow the function name.
        message:  String,
    },
    /// An insertion index lay beyond the end of an array.
    #[error("List at address {address} is not big enough to insert at {index}.")]
    InsertOutOfRange {
        /// The array's base address.
        address: String,
        /// The requested index.
        index:   i64,
    },
    /// Text evaluated through `exec` failed to tokenize or parse.
    #[error("{message}")]
    Syntax {
        /// The underlying tokenizer or parser message.
        message: String,
    },
    /// An error raised by the program with `throw`.
    #[error("{message}")]
    Thrown {
        /// The quoted message.
        message: String,
    },
    /// A fault outside the language, such as integer overflow inside a
    /// builtin.
    #[error("{message}")]
    Host {
        /// Details about the fault.
        message: String,
    },
}

impl RuntimeError {
    /// Returns the category that catching builtins filter on.
    ///
    /// # Example
    /// ```
    /// use wingcalc::error::{ErrorCategory, RuntimeError};
    ///
    /// let thrown = RuntimeError::Thrown { message: "boom".into() };
    /// assert_eq!(thrown.category(), ErrorCategory::Thrown);
    ///
    /// let missing = RuntimeError::UnknownMacro { name: "f".into() };
    /// assert_eq!(missing.category(), ErrorCategory::Language);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Thrown { .. } => ErrorCategory::Thrown,
            Self::Host { .. } => ErrorCategory::Host,
            _ => ErrorCategory::Language,
        }
    }

    /// Builds an [`RuntimeError::Evaluation`] for the named builtin.
    pub(crate) fn evaluation(function: &str, message: impl Into<String>) -> Self {
        Self::Evaluation { function: function.to_string(),
                           message:  message.into(), }
    }
}
