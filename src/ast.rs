use std::{fmt, rc::Rc};

use crate::interpreter::operators::{BinaryOp, UnaryOp};

/// Shared handle to a tree node.
///
/// Nodes are immutable once built, so subtrees are shared freely: compound
/// assignments reuse their target, macro tables keep the bodies they were
/// given, and local bindings point back into the tree that produced them.
pub type NodeRef = Rc<Node>;

/// A node of the expression tree.
///
/// The set of variants is closed. Every node can be solved to a number; only
/// some of them can additionally be assigned to, used as a pointer, or called
/// (see [`crate::interpreter::evaluator::capability`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A numeric literal, character literal or prefixed integer literal.
    Constant(f64),
    /// A global variable, resolved by name in the engine's store.
    Variable(String),
    /// A lexically scoped binding in the current evaluation frame.
    Local(String),
    /// A reference to a named macro, with the argument list of this use site.
    Macro {
        /// The macro name.
        name:       String,
        /// The argument nodes written at this use site.
        args:       Vec<NodeRef>,
        /// Whether this reference may be the target of a definition, which
        /// holds when every argument is a plain name.
        assignable: bool,
    },
    /// An anonymous callable `@(a, b, body)`.
    Lambda {
        /// The body evaluated on each call.
        body:    NodeRef,
        /// Names bound to the positional arguments.
        aliases: Vec<String>,
    },
    /// `$x`: the wrapped node's value is an address in the global store.
    Pointer(NodeRef),
    /// `#x`: the wrapped node's value is an address among the current
    /// frame's numeric cells.
    LocalPointer(NodeRef),
    /// `target = value`, and the desugared form of every compound assignment.
    Assignment {
        /// The node receiving the value.
        target: NodeRef,
        /// The node providing it.
        value:  NodeRef,
    },
    /// A binary operator and its operands.
    Binary {
        /// The operator.
        op:    BinaryOp,
        /// The left operand.
        left:  NodeRef,
        /// The right operand.
        right: NodeRef,
    },
    /// A unary operator applied to one operand.
    Unary {
        /// The operator.
        op:      UnaryOp,
        /// The operand.
        operand: NodeRef,
    },
    /// A call to a registered builtin. Arguments are handed over unevaluated.
    FunctionCall {
        /// The function name as written.
        name: String,
        /// The argument nodes.
        args: Vec<NodeRef>,
    },
    /// A double-quoted string, already unescaped.
    Quote(String),
}

impl Node {
    /// Wraps the node in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> NodeRef {
        Rc::new(self)
    }

    /// Returns the bare name this node would contribute as a macro or lambda
    /// parameter, if it is a plain name.
    ///
    /// # Example
    /// ```
    /// use wingcalc::ast::Node;
    ///
    /// assert_eq!(Node::Local("x".into()).alias_name(), Some("x"));
    /// assert_eq!(Node::Constant(1.0).alias_name(), None);
    /// ```
    #[must_use]
    pub fn alias_name(&self) -> Option<&str> {
        match self {
            Self::Variable(name) | Self::Local(name) => Some(name),
            Self::Macro { name, args, .. } if args.is_empty() => Some(name),
            _ => None,
        }
    }

    /// A short description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Constant(value) => format!("constant {value}"),
            Self::Variable(name) => format!("${name}"),
            Self::Local(name) => format!("#{name}"),
            Self::Macro { name, .. } => format!("@{name}"),
            Self::Lambda { .. } => "lambda".to_string(),
            Self::Pointer(_) => "pointer".to_string(),
            Self::LocalPointer(_) => "local pointer".to_string(),
            Self::Assignment { .. } => "assignment".to_string(),
            Self::Binary { op, .. } => format!("{op} expression"),
            Self::Unary { op, .. } => format!("{op} expression"),
            Self::FunctionCall { name, .. } => format!("call to {name}"),
            Self::Quote(text) => format!("quote \"{text}\""),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{value}"),
            Self::Variable(name) => write!(f, "${name}"),
            Self::Local(name) => write!(f, "#{name}"),
            Self::Macro { name, args, .. } => {
                write!(f, "@{name}")?;
                if !args.is_empty() {
                    write_list(f, args)?;
                }
                Ok(())
            },
            Self::Lambda { body, aliases } => {
                write!(f, "@(")?;
                for alias in aliases {
                    write!(f, "{alias}, ")?;
                }
                write!(f, "{body})")
            },
            Self::Pointer(inner) => write!(f, "$({inner})"),
            Self::LocalPointer(inner) => write!(f, "#({inner})"),
            Self::Assignment { target, value } => write!(f, "({target} = {value})"),
            Self::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Self::Unary { op, operand } => write!(f, "{op}{operand}"),
            Self::FunctionCall { name, args } => {
                write!(f, "{name}")?;
                write_list(f, args)
            },
            Self::Quote(text) => write!(f, "{text:?}"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, args: &[NodeRef]) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}
