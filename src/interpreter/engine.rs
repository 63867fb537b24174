use std::{cell::RefCell, collections::HashMap};

use crate::{
    ast::{Node, NodeRef},
    error::Error,
    interpreter::{
        evaluator::{
            array,
            function::core::{Arity, Builtin, BuiltinFn, default_registry},
            scope::{Frame, Scope},
        },
        io::{ConsoleIo, Io},
        lexer::tokenize,
        options::EngineOptions,
        parser::{core::build_tree, names::NameEnvironment},
    },
    util::text::from_cells,
};

/// The variable that holds the last answer.
pub const ANSWER: &str = "ANS";

/// The named constants seeded into a new engine's global table.
pub const SEED_CONSTANTS: &[(&str, f64)] = &[
    ("PI", std::f64::consts::PI),
    ("TAU", std::f64::consts::TAU),
    ("E", std::f64::consts::E),
    ("C", 299_792_458.0),
    ("H", 6.626_070_15e-34),
    ("AVOGADRO", 6.022_140_76e23),
    ("BYTEMIN", 0.0),
    ("BYTEMAX", 255.0),
    ("SBYTEMIN", -128.0),
    ("SBYTEMAX", 127.0),
    ("SHORTMIN", -32_768.0),
    ("SHORTMAX", 32_767.0),
    ("USHORTMIN", 0.0),
    ("USHORTMAX", 65_535.0),
    ("INTMIN", -2_147_483_648.0),
    ("INTMAX", 2_147_483_647.0),
    ("UINTMIN", 0.0),
    ("UINTMAX", 4_294_967_295.0),
    ("LONGMIN", -9_223_372_036_854_775_808.0),
    ("LONGMAX", 9_223_372_036_854_775_807.0),
    ("ULONGMIN", 0.0),
    ("ULONGMAX", 18_446_744_073_709_551_615.0),
    ("DOUBLEMIN", f64::MIN),
    ("DOUBLEMAX", f64::MAX),
    ("INFINITY", f64::INFINITY),
    // Smallest positive subnormal, not the machine epsilon.
    ("EPSILON", 5e-324),
    ("NAN", f64::NAN),
];

/// A stored macro: the body evaluated on each call and the names its
/// positional arguments are bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroDefinition {
    /// The body, kept unevaluated.
    pub body:    NodeRef,
    /// Alias names for the positional arguments, in order.
    pub aliases: Vec<String>,
}

/// An interpreter session.
///
/// The engine owns everything that outlives a single call to
/// [`Engine::solve`]: the global variable table (which doubles as the flat
/// numeric store that pointers address), the macro table, the builtin
/// registry and the injected I/O. Evaluation frames live in an arena that is
/// only populated while a solve is running.
///
/// Every method takes `&self`; the tables use interior mutability so that
/// builtins can call back into the engine while a solve is in progress. No
/// borrow of a table is held across evaluation.
///
/// # Example
/// ```
/// use wingcalc::Engine;
///
/// let engine = Engine::new();
/// assert_eq!(engine.solve("1 + 2 * 3").unwrap(), 7.0);
/// assert_eq!(engine.solve("ANS * 2").unwrap(), 14.0);
///
/// engine.solve("@fact(n) = if(n <= 1, 1, n * @fact(n - 1))").unwrap();
/// assert_eq!(engine.solve("@fact(5)").unwrap(), 120.0);
/// ```
pub struct Engine {
    variables:         RefCell<HashMap<String, f64>>,
    macros:            RefCell<HashMap<String, MacroDefinition>>,
    pub(crate) frames: RefCell<Vec<Frame>>,
    registry:          HashMap<String, Builtin>,
    io:                Box<dyn Io>,
    options:           EngineOptions,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the default options and console I/O.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Creates an engine with the given options and console I/O.
    #[must_use]
    pub fn with_options(options: EngineOptions) -> Self {
        let mut variables = HashMap::new();
        if options.seed_constants {
            variables.extend(SEED_CONSTANTS.iter()
                                           .map(|(name, value)| (name.to_lowercase(), *value)));
        }
        variables.insert(ANSWER.to_lowercase(), 0.0);

        Self { variables: RefCell::new(variables),
               macros: RefCell::new(HashMap::new()),
               frames: RefCell::new(Vec::new()),
               registry: default_registry(),
               io: Box::new(ConsoleIo),
               options }
    }

    /// Replaces the I/O the builtins talk to.
    #[must_use]
    pub fn with_io(mut self, io: Box<dyn Io>) -> Self {
        self.io = io;
        self
    }

    /// Registers a builtin, replacing any builtin of the same name.
    ///
    /// # Example
    /// ```
    /// use wingcalc::{
    ///     Engine,
    ///     interpreter::evaluator::{function::core::Arity, utils::solve_arg},
    /// };
    ///
    /// let mut engine = Engine::new();
    /// engine.register("twice", Arity::Exact(1), |args, scope| {
    ///           Ok(2.0 * solve_arg("twice", args, 0, scope)?)
    ///       });
    /// assert_eq!(engine.solve("twice(21)").unwrap(), 42.0);
    /// ```
    pub fn register(&mut self, name: &str, arity: Arity, func: BuiltinFn) {
        self.registry.insert(name.to_lowercase(), Builtin { arity, func });
    }

    /// Looks up a builtin by name, ignoring case.
    #[must_use]
    pub fn builtin(&self, name: &str) -> Option<Builtin> {
        self.registry.get(&name.to_lowercase()).copied()
    }

    /// The options the engine was created with.
    #[must_use]
    pub const fn options(&self) -> EngineOptions {
        self.options
    }

    /// The I/O the builtins talk to.
    #[must_use]
    pub fn io(&self) -> &dyn Io {
        self.io.as_ref()
    }

    /// Evaluates a line of text.
    ///
    /// The result is stored in `ANS` unless the engine was created with
    /// `record_answer` off. Empty input yields `0` and leaves `ANS` alone.
    ///
    /// # Errors
    /// A [`TokenError`](crate::error::TokenError) or
    /// [`ParseError`](crate::error::ParseError) when the text is malformed, in
    /// which case nothing is evaluated; a
    /// [`RuntimeError`](crate::error::RuntimeError) when evaluation fails.
    pub fn solve(&self, text: &str) -> Result<f64, Error> {
        self.solve_with(text, self.options.record_answer)
    }

    /// Like [`Engine::solve`], but also reports whether the input was
    /// continued from the last answer.
    ///
    /// # Errors
    /// Same as [`Engine::solve`].
    ///
    /// # Example
    /// ```
    /// use wingcalc::Engine;
    ///
    /// let engine = Engine::new();
    /// engine.solve("3").unwrap();
    /// assert_eq!(engine.solve_full("** 2").unwrap(), (9.0, true));
    /// assert_eq!(engine.solve_full("-1").unwrap(), (-1.0, false));
    /// ```
    pub fn solve_full(&self, text: &str) -> Result<(f64, bool), Error> {
        self.run(text, self.options.record_answer)
    }

    /// Like [`Engine::solve`], choosing per call whether `ANS` is updated.
    ///
    /// # Errors
    /// Same as [`Engine::solve`].
    pub fn solve_with(&self, text: &str, record_answer: bool) -> Result<f64, Error> {
        self.run(text, record_answer).map(|(value, _)| value)
    }

    fn run(&self, text: &str, record_answer: bool) -> Result<(f64, bool), Error> {
        tracing::debug!(text, "solving");

        match self.evaluate(text) {
            Ok(Some((value, implied))) => {
                tracing::debug!(value, implied, "solved");
                if record_answer {
                    self.set_variable(ANSWER, value);
                }
                Ok((value, implied))
            },
            Ok(None) => Ok((0.0, false)),
            Err(error) => {
                tracing::debug!(%error, "solve failed");
                Err(error)
            },
        }
    }

    fn evaluate(&self, text: &str) -> Result<Option<(f64, bool)>, Error> {
        let tokens = tokenize(text)?;
        tracing::trace!(count = tokens.len(), "tokenized");

        let tree = build_tree(&tokens, self, self.options.imply_answer)?;
        let Some(root) = tree.root else {
            return Ok(None);
        };

        let (scope, _guard) = Scope::root(self);
        let value = root.solve(scope)?;
        Ok(Some((value, tree.implied_answer)))
    }

    /// Reads a global variable. Unknown names read as `0` and are created.
    ///
    /// # Example
    /// ```
    /// use wingcalc::Engine;
    ///
    /// let engine = Engine::new();
    /// assert_eq!(engine.get_variable("never_set"), 0.0);
    /// engine.solve("Speed = 3").unwrap();
    /// assert_eq!(engine.get_variable("SPEED"), 3.0);
    /// ```
    pub fn get_variable(&self, name: &str) -> f64 {
        *self.variables
             .borrow_mut()
             .entry(name.to_lowercase())
             .or_insert(0.0)
    }

    /// Writes a global variable.
    pub fn set_variable(&self, name: &str, value: f64) {
        self.variables.borrow_mut().insert(name.to_lowercase(), value);
    }

    /// A snapshot of every global variable and numeric cell, keyed by
    /// lowercase name.
    pub fn variables(&self) -> impl Iterator<Item = (String, f64)> {
        let snapshot: Vec<(String, f64)> = self.variables
                                               .borrow()
                                               .iter()
                                               .map(|(name, value)| (name.clone(), *value))
                                               .collect();
        snapshot.into_iter()
    }

    /// Whether a macro of this name is defined.
    #[must_use]
    pub fn has_macro(&self, name: &str) -> bool {
        self.macros.borrow().contains_key(&name.to_lowercase())
    }

    /// A copy of a macro's definition.
    #[must_use]
    pub fn macro_definition(&self, name: &str) -> Option<MacroDefinition> {
        self.macros.borrow().get(&name.to_lowercase()).cloned()
    }

    /// Defines or redefines a macro.
    pub fn define_macro(&self, name: &str, body: NodeRef, aliases: Vec<String>) {
        tracing::trace!(macro_name = name, aliases = aliases.len(), "defining macro");
        self.macros
            .borrow_mut()
            .insert(name.to_lowercase(), MacroDefinition { body, aliases });
    }

    /// Reads the array stored at an address of the global store.
    ///
    /// # Example
    /// ```
    /// use wingcalc::Engine;
    ///
    /// let engine = Engine::new();
    /// engine.solve("alloc($(100), 10, 20, 30)").unwrap();
    /// assert_eq!(engine.get_array(100.0), vec![10.0, 20.0, 30.0]);
    /// ```
    pub fn get_array(&self, address: f64) -> Vec<f64> {
        let pointer = Node::Pointer(Node::Constant(address).into_ref());
        let (scope, _guard) = Scope::root(self);
        array::collect(&pointer, scope).unwrap_or_default()
    }

    /// Reads the character array stored at an address of the global store.
    pub fn get_string(&self, address: f64) -> String {
        from_cells(&self.get_array(address))
    }
}

impl NameEnvironment for Engine {
    fn is_function(&self, name: &str) -> bool {
        self.registry.contains_key(&name.to_lowercase())
    }

    fn is_macro(&self, name: &str) -> bool {
        self.has_macro(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_follows_the_options() {
        let seeded = Engine::new();
        assert_eq!(seeded.get_variable("pi"), std::f64::consts::PI);
        assert_eq!(seeded.get_variable("IntMax"), 2_147_483_647.0);
        assert!(seeded.get_variable("nan").is_nan());

        let bare = Engine::with_options(EngineOptions { seed_constants: false,
                                                        ..EngineOptions::default() });
        assert_eq!(bare.variables().count(), 1);
        assert_eq!(bare.get_variable("ANS"), 0.0);
    }

    #[test]
    fn frames_are_released_after_each_solve() {
        let engine = Engine::new();
        assert_eq!(engine.solve("@f(x) = x + 1; @f(call(@(a, a * 2), 4))").unwrap(), 9.0);
        assert!(engine.frames.borrow().is_empty());

        assert!(engine.solve("@undefined").is_err());
        assert!(engine.frames.borrow().is_empty());
    }

    #[test]
    fn empty_input_leaves_the_answer_alone() {
        let engine = Engine::new();
        engine.solve("5").unwrap();
        assert_eq!(engine.solve("   ").unwrap(), 0.0);
        assert_eq!(engine.get_variable("ANS"), 5.0);
    }
}
