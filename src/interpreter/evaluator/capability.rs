use crate::{
    ast::{Node, NodeRef},
    error::RuntimeError,
    interpreter::evaluator::{
        core::EvalResult,
        scope::{Binding, Scope},
    },
    util::num::{address_key, from_count},
};

/// Nodes that can receive a value: variables, locals, macros and both pointer
/// kinds.
pub trait Assignable {
    /// Stores `source` in the place this node names and returns the result of
    /// the assignment.
    ///
    /// # Errors
    /// Fails when the place cannot be resolved or when evaluating a
    /// referenced node fails.
    fn assign(&self, source: Binding, scope: Scope<'_>) -> EvalResult<f64>;

    /// Follows references down to the innermost assignable place before
    /// storing `source`.
    ///
    /// # Errors
    /// Same as [`Assignable::assign`].
    fn deep_assign(&self, source: Binding, scope: Scope<'_>) -> EvalResult<f64>;
}

/// Nodes that denote a base address with numeric cells around it.
pub trait Addressable {
    /// The base address.
    ///
    /// # Errors
    /// Fails when the address expression fails.
    fn address(&self, scope: Scope<'_>) -> EvalResult<f64>;

    /// Reads the cell at an absolute address.
    ///
    /// # Errors
    /// Fails when the node turns out not to denote memory.
    fn get(&self, address: f64, scope: Scope<'_>) -> EvalResult<f64>;

    /// Writes the cell at an absolute address and returns the value written.
    ///
    /// # Errors
    /// Fails when the node turns out not to denote memory.
    fn set(&self, address: f64, value: f64, scope: Scope<'_>) -> EvalResult<f64>;
}

/// Nodes that can be invoked with positional arguments.
pub trait Callable {
    /// Invokes the node.
    ///
    /// `invoker` is the frame the arguments are written in; `definition` is
    /// the frame the callable itself was found in, which lambdas capture.
    ///
    /// # Errors
    /// Whatever the callee raises.
    fn call(&self, args: &[NodeRef], invoker: Scope<'_>, definition: Scope<'_>) -> EvalResult<f64>;
}

impl Node {
    /// Views the node as an assignment target.
    ///
    /// # Errors
    /// [`RuntimeError::NotAssignable`] for nodes that name no place.
    pub fn as_assignable(&self) -> EvalResult<&dyn Assignable> {
        match self {
            Self::Variable(_)
            | Self::Local(_)
            | Self::Macro { .. }
            | Self::Pointer(_)
            | Self::LocalPointer(_) => Ok(self),
            _ => Err(self.not_assignable()),
        }
    }

    /// Views the node as a pointer.
    ///
    /// A local qualifies statically; whether it actually refers to memory is
    /// only known once its binding is read.
    ///
    /// # Errors
    /// [`RuntimeError::NotAddressable`] for every other node.
    pub fn as_pointer(&self) -> EvalResult<&dyn Addressable> {
        match self {
            Self::Pointer(_) | Self::LocalPointer(_) | Self::Local(_) => Ok(self),
            _ => Err(self.not_addressable()),
        }
    }

    /// Views the node as a callable.
    ///
    /// # Errors
    /// [`RuntimeError::NotCallable`] for nodes other than lambdas, macros and
    /// locals.
    pub fn as_callable(&self) -> EvalResult<&dyn Callable> {
        match self {
            Self::Lambda { .. } | Self::Macro { .. } | Self::Local(_) => Ok(self),
            _ => Err(self.not_callable()),
        }
    }

    /// Returns `true` when the node, evaluated in `scope`, denotes memory.
    ///
    /// Builtins that accept either a pointer or a plain list of values use
    /// this to pick their reading.
    #[must_use]
    pub fn points_to_memory(&self, scope: Scope<'_>) -> bool {
        match self {
            Self::Pointer(_) | Self::LocalPointer(_) => true,
            Self::Local(name) => match scope.lookup(name) {
                Some(Binding::Reference { node, frame }) => node.points_to_memory(scope.at(frame)),
                _ => false,
            },
            _ => false,
        }
    }

    fn not_assignable(&self) -> RuntimeError {
        RuntimeError::NotAssignable { what: self.describe() }
    }

    fn not_addressable(&self) -> RuntimeError {
        RuntimeError::NotAddressable { what: self.describe() }
    }

    fn not_callable(&self) -> RuntimeError {
        RuntimeError::NotCallable { what: self.describe() }
    }

    /// The reference a local is bound to, if it is bound to one.
    fn referenced<'e>(name: &str, scope: Scope<'e>) -> EvalResult<Option<(NodeRef, Scope<'e>)>> {
        Ok(match scope.require(name)? {
            Binding::Reference { node, frame } => Some((node, scope.at(frame))),
            Binding::Value(_) => None,
        })
    }
}

impl Assignable for Node {
    fn assign(&self, source: Binding, scope: Scope<'_>) -> EvalResult<f64> {
        match self {
            Self::Variable(name) => {
                let value = scope.resolve(&source)?;
                scope.engine().set_variable(name, value);
                Ok(value)
            },
            Self::Local(name) => {
                let result = match source {
                    Binding::Value(value) => value,
                    Binding::Reference { .. } => 1.0,
                };
                scope.bind(name, source);
                Ok(result)
            },
            Self::Macro { name,
                          args,
                          assignable, } => {
                if !assignable {
                    return Err(RuntimeError::MacroWithArguments { name: name.clone() });
                }
                let body = match source {
                    Binding::Value(value) => Node::Constant(value).into_ref(),
                    Binding::Reference { node, .. } => node,
                };
                let aliases = args.iter()
                                  .filter_map(|arg| arg.alias_name().map(str::to_string))
                                  .collect();
                scope.engine().define_macro(name, body, aliases);
                Ok(1.0)
            },
            Self::Pointer(_) | Self::LocalPointer(_) => {
                let value = scope.resolve(&source)?;
                let address = self.address(scope)?;
                self.set(address, value, scope)
            },
            _ => Err(self.not_assignable()),
        }
    }

    fn deep_assign(&self, source: Binding, scope: Scope<'_>) -> EvalResult<f64> {
        match self {
            Self::Local(name) => {
                if let Some(Binding::Reference { node, frame }) = scope.lookup(name)
                   && node.as_assignable().is_ok()
                {
                    let target = scope.at(frame);
                    let source = target.settle(source)?;
                    return node.deep_assign(source, target);
                }
                self.assign(source, scope)
            },
            Self::Macro { name, .. } => {
                let body = scope.engine()
                                .macro_definition(name)
                                .map(|definition| definition.body);
                match body {
                    Some(body) if body.as_assignable().is_ok() => body.deep_assign(source, scope),
                    _ => self.assign(source, scope),
                }
            },
            _ => self.assign(source, scope),
        }
    }
}

impl Addressable for Node {
    fn address(&self, scope: Scope<'_>) -> EvalResult<f64> {
        match self {
            Self::Pointer(inner) | Self::LocalPointer(inner) => inner.solve(scope),
            Self::Local(name) => match Self::referenced(name, scope)? {
                Some((node, frame)) => node.as_pointer()
                                           .map_err(|_| self.not_addressable())?
                                           .address(frame),
                None => Err(self.not_addressable()),
            },
            _ => Err(self.not_addressable()),
        }
    }

    fn get(&self, address: f64, scope: Scope<'_>) -> EvalResult<f64> {
        match self {
            Self::Pointer(_) => Ok(scope.engine().get_variable(&address_key(address))),
            Self::LocalPointer(_) => match scope.lookup(&address_key(address)) {
                Some(binding) => scope.resolve(&binding),
                None => Ok(0.0),
            },
            Self::Local(name) => match Self::referenced(name, scope)? {
                Some((node, frame)) => node.as_pointer()
                                           .map_err(|_| self.not_addressable())?
                                           .get(address, frame),
                None => Err(self.not_addressable()),
            },
            _ => Err(self.not_addressable()),
        }
    }

    fn set(&self, address: f64, value: f64, scope: Scope<'_>) -> EvalResult<f64> {
        match self {
            Self::Pointer(_) => {
                scope.engine().set_variable(&address_key(address), value);
                Ok(value)
            },
            Self::LocalPointer(_) => {
                scope.bind(&address_key(address), Binding::Value(value));
                Ok(value)
            },
            Self::Local(name) => match Self::referenced(name, scope)? {
                Some((node, frame)) => node.as_pointer()
                                           .map_err(|_| self.not_addressable())?
                                           .set(address, value, frame),
                None => Err(self.not_addressable()),
            },
            _ => Err(self.not_addressable()),
        }
    }
}

impl Callable for Node {
    fn call(&self, args: &[NodeRef], invoker: Scope<'_>, definition: Scope<'_>) -> EvalResult<f64> {
        match self {
            Self::Lambda { body, aliases } => {
                let bindings = args.iter()
                                   .map(|arg| lambda_binding(arg, invoker))
                                   .collect::<EvalResult<Vec<_>>>()?;

                let (frame, _guard) = invoker.enter("Lambda", Some(definition.frame()), true);
                bind_arguments(frame, &bindings, aliases);
                body.solve(frame)
            },
            Self::Macro { name, args: own, .. } => {
                let mut bindings: Vec<Binding> =
                    own.iter()
                       .map(|arg| Binding::Reference { node:  arg.clone(),
                                                       frame: definition.frame(), })
                       .collect();
                for (i, arg) in args.iter().enumerate() {
                    let binding = Binding::Reference { node:  arg.clone(),
                                                       frame: invoker.frame(), };
                    match bindings.get_mut(i) {
                        Some(slot) => *slot = binding,
                        None => bindings.push(binding),
                    }
                }
                invoke_macro(name, &bindings, invoker)
            },
            Self::Local(name) => match Self::referenced(name, definition)? {
                Some((node, frame)) => node.as_callable()
                                           .map_err(|_| self.not_callable())?
                                           .call(args, invoker, frame),
                None => Err(self.not_callable()),
            },
            _ => Err(self.not_callable()),
        }
    }
}

/// Runs a macro body in a new frame whose parent is the invoking frame.
///
/// Each binding is stored under its index and, when the definition names one,
/// under the matching alias.
///
/// # Errors
/// [`RuntimeError::UnknownMacro`] when no macro of that name is defined, and
/// anything the body raises.
pub(crate) fn invoke_macro(name: &str, bindings: &[Binding], invoker: Scope<'_>) -> EvalResult<f64> {
    let definition = invoker.engine()
                            .macro_definition(name)
                            .ok_or_else(|| RuntimeError::UnknownMacro { name: name.to_string() })?;

    tracing::trace!(macro_name = name, args = bindings.len(), "invoking macro");

    let (frame, _guard) = invoker.enter(name, Some(invoker.frame()), false);
    bind_arguments(frame, bindings, &definition.aliases);
    definition.body.solve(frame)
}

fn bind_arguments(frame: Scope<'_>, bindings: &[Binding], aliases: &[String]) {
    for (i, binding) in bindings.iter().enumerate() {
        frame.bind(&address_key(from_count(i)), binding.clone());
        if let Some(alias) = aliases.get(i) {
            frame.bind(alias, binding.clone());
        }
    }
}

/// Decides how a lambda argument is passed.
///
/// Locals pass their own binding along, so the parameter aliases whatever the
/// local aliases. Names, pointers, callables and literals are passed by
/// reference into the invoking frame. Any other expression is evaluated once
/// and passed as a value.
fn lambda_binding(arg: &NodeRef, invoker: Scope<'_>) -> EvalResult<Binding> {
    match arg.as_ref() {
        Node::Local(name) => invoker.require(name),
        Node::Variable(_)
        | Node::Pointer(_)
        | Node::LocalPointer(_)
        | Node::Macro { .. }
        | Node::Lambda { .. }
        | Node::Quote(_)
        | Node::Constant(_) => Ok(Binding::Reference { node:  arg.clone(),
                                                       frame: invoker.frame(), }),
        _ => Ok(Binding::Value(arg.solve(invoker)?)),
    }
}
