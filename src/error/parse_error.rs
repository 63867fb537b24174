/// Represents all errors that can occur while splitting text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// A `"` was opened but never closed.
    #[error("Quote literal \"{text} is missing its end quote.")]
    UnterminatedQuote {
        /// The captured text after the opening quote.
        text: String,
    },
    /// A `'` was opened but never closed.
    #[error("Character literal '{text} is missing its end apostrophe.")]
    UnterminatedChar {
        /// The captured text after the opening apostrophe.
        text: String,
    },
    /// A numeral started with `0` followed by a letter that names no literal
    /// kind.
    #[error("0{prefix} is not a recognized numeric literal.")]
    UnknownPrefix {
        /// The letter that followed the zero.
        prefix: char,
    },
    /// A character that cannot start any token.
    #[error("Token could not be constructed from character '{character}'.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
    },
    /// Three or more `+`/`-` tokens appeared in a row.
    #[error("Unexpected character '{sign}' found. Only up to two + or - signs in a row are legal.")]
    SignRun {
        /// The sign that made the run too long.
        sign: String,
    },
    /// The same sign was doubled at the start or end of the input.
    #[error("Unexpected character '{sign}' found. Only one + or - sign is legal at the {position} of an equation.")]
    DoubledSign {
        /// The repeated sign.
        sign:     String,
        /// Either `"start"` or `"end"`.
        position: &'static str,
    },
}

/// Represents all errors that can occur while building the expression tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A closing bracket of the wrong type ended a group.
    #[error("Closing bracket {close} does not match opening bracket {open}.")]
    MismatchedBracket {
        /// The bracket that opened the group.
        open:  char,
        /// The bracket that closed it.
        close: char,
    },
    /// A group was opened but never closed.
    #[error("Closing bracket for {open} expected but not found.")]
    UnclosedBracket {
        /// The bracket that opened the group.
        open: char,
    },
    /// A bracket pair enclosed nothing.
    #[error("Empty brackets {open}{close} found.")]
    EmptyBrackets {
        /// The opening bracket.
        open:  char,
        /// The closing bracket.
        close: char,
    },
    /// A token appeared where nothing of its kind may start.
    #[error("Unexpected character '{token}' found.")]
    UnexpectedToken {
        /// The token text.
        token: String,
    },
    /// A binary operator had no value to its left.
    #[error("Operator {op} is missing a left-hand operand.")]
    MissingLeftOperand {
        /// The operator symbol.
        op: String,
    },
    /// A binary operator had no value to its right.
    #[error("Operator {op} is missing a right-hand operand.")]
    MissingRightOperand {
        /// The operator symbol.
        op: String,
    },
    /// An operator in prefix position that cannot act as a unary operator.
    #[error("\"{op}\" is not a valid unary operator.")]
    NotUnary {
        /// The operator symbol.
        op: String,
    },
    /// An operator run that names no known operator.
    #[error("\"{op}\" is not a recognized operator.")]
    UnknownOperator {
        /// The operator symbol.
        op: String,
    },
    /// A call received an empty argument between commas.
    #[error("Empty parameters are not allowed.")]
    EmptyParameter,
    /// More than one node remained after every operator was collapsed.
    #[error("Unexpected trailing expression; the expression tree could not be made.")]
    TrailingExpression,
    /// A decimal literal that could not be read as a number.
    #[error("Unable to parse constant {text}.")]
    InvalidNumber {
        /// The literal text.
        text: String,
    },
    /// A prefixed literal with no digits after the prefix.
    #[error("{kind} literals cannot be empty.")]
    EmptyLiteral {
        /// The literal kind, e.g. `"Hex"`.
        kind: &'static str,
    },
    /// A prefixed literal whose digits are invalid or out of range.
    #[error("{kind} literal {text} could not be read.")]
    InvalidLiteral {
        /// The literal kind, e.g. `"Roman numeral"`.
        kind: &'static str,
        /// The literal text.
        text: String,
    },
    /// A character literal that does not hold exactly one character.
    #[error("Character '{text}' could not be resolved: a character literal must hold exactly one character.")]
    CharLength {
        /// The literal text.
        text: String,
    },
    /// A quote contained a malformed escape sequence.
    #[error("Invalid escape sequence in \"{text}\".")]
    InvalidEscape {
        /// The raw quoted text.
        text: String,
    },
    /// A builtin name was not followed by an argument list.
    #[error("Function {name} called but no opening bracket found.")]
    MissingCallBracket {
        /// The function name.
        name: String,
    },
    /// `@` was used without a name or argument list.
    #[error("'@' found without a macro name and without an opening parenthesis.")]
    BareLambdaSigil,
    /// A lambda or macro parameter that is not a plain name.
    #[error("{found} is not a valid alias for an argument.")]
    InvalidAlias {
        /// A description of what was found instead.
        found: String,
    },
    /// A hex or Roman literal directly before a function call.
    #[error("Tokens of type {kind} may not serve as function coefficients. Try adding parentheses around the function call.")]
    LiteralCoefficient {
        /// The literal kind.
        kind: &'static str,
    },
}
