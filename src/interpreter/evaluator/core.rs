use crate::{
    ast::{Node, NodeRef},
    error::RuntimeError,
    interpreter::evaluator::{
        capability::{Addressable, invoke_macro},
        scope::{Binding, Scope},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl Node {
    /// Evaluates the node to a number.
    ///
    /// Variables read the engine's global table (unknown names read as `0`),
    /// locals resolve their binding, macros are looked up by name at the time
    /// of the call, and function calls hand their argument nodes to the
    /// builtin unevaluated.
    ///
    /// # Errors
    /// Name resolution failures, capability mismatches and anything a builtin
    /// raises.
    ///
    /// # Example
    /// ```
    /// use wingcalc::Engine;
    ///
    /// let engine = Engine::new();
    /// assert_eq!(engine.solve("x = 4; x * x").unwrap(), 16.0);
    /// assert_eq!(engine.solve("@sq(n) = n * n; @sq(7)").unwrap(), 49.0);
    /// ```
    pub fn solve(&self, scope: Scope<'_>) -> EvalResult<f64> {
        match self {
            Self::Constant(value) => Ok(*value),
            Self::Variable(name) => Ok(scope.engine().get_variable(name)),
            Self::Local(name) => {
                let binding = scope.require(name)?;
                scope.resolve(&binding)
            },
            Self::Macro { name, args, .. } => {
                let bindings: Vec<Binding> =
                    args.iter()
                        .map(|arg| Binding::Reference { node:  arg.clone(),
                                                        frame: scope.frame(), })
                        .collect();
                invoke_macro(name, &bindings, scope)
            },
            Self::Lambda { body, .. } => {
                let (frame, _guard) = scope.enter("Lambda", Some(scope.frame()), true);
                body.solve(frame)
            },
            Self::Pointer(_) | Self::LocalPointer(_) => {
                let address = self.address(scope)?;
                self.get(address, scope)
            },
            Self::Assignment { target, value } => Self::eval_assignment(target, value, scope),
            Self::Binary { op, left, right } => Self::eval_binary(*op, left, right, scope),
            Self::Unary { op, operand } => Self::eval_unary(*op, operand, scope),
            Self::FunctionCall { name, args } => scope.engine().call_builtin(name, args, scope),
            Self::Quote(text) => Ok(crate::util::num::from_count(text.chars().count())),
        }
    }

    /// Evaluates an assignment.
    ///
    /// The source is chosen before the target sees it: a macro target keeps
    /// the right-hand side unevaluated as its new body, a local right-hand
    /// side passes its binding along, and anything else is evaluated first.
    fn eval_assignment(target: &NodeRef, value: &NodeRef, scope: Scope<'_>) -> EvalResult<f64> {
        let assignable = target.as_assignable()?;

        let source = match (target.as_ref(), value.as_ref()) {
            (Self::Macro { .. }, _) => Binding::Reference { node:  value.clone(),
                                                            frame: scope.frame(), },
            (_, Self::Local(name)) => scope.require(name)?,
            _ => Binding::Value(value.solve(scope)?),
        };

        assignable.assign(source, scope)
    }

    /// Calls this node with positional arguments written in `scope`.
    ///
    /// # Errors
    /// [`RuntimeError::NotCallable`] when the node cannot be called, and
    /// anything the callee raises.
    pub fn invoke(&self, args: &[NodeRef], scope: Scope<'_>) -> EvalResult<f64> {
        self.as_callable()?.call(args, scope, scope)
    }
}
