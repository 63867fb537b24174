/// The engine: session state and the solve entry points.
///
/// Owns the global variable table, the macro table, the builtin registry,
/// the injected I/O and the arena of evaluation frames, and drives each line
/// of text through tokenizing, tree building and evaluation.
pub mod engine;
/// The evaluator module solves expression trees.
///
/// Every node evaluates to a number against a scope. Nodes that name a place,
/// denote memory or can be invoked additionally expose the assignable,
/// addressable and callable capabilities, and builtins receive their
/// arguments unevaluated.
///
/// # Responsibilities
/// - Evaluates nodes, operators and assignments.
/// - Manages evaluation frames and local bindings, including aliases.
/// - Implements the pointer-addressed array protocol and the builtin library.
pub mod evaluator;
/// The text channels builtins read from and write to.
pub mod io;
/// The lexer module splits source text into tokens.
///
/// Token recognition is done by `logos`; the validation passes over the
/// resulting stream (unknown literal prefixes, sign runs, the power fix-up)
/// run afterwards.
///
/// # Responsibilities
/// - Recognises numbers, prefixed literals, names, operators, brackets,
///   quotes and characters.
/// - Skips whitespace and comments.
/// - Reports malformed input as a `TokenError`.
pub mod lexer;
/// Static operator metadata: tiers, associativity and the nodes operators
/// build.
pub mod operators;
/// Engine configuration.
pub mod options;
/// The parser module builds expression trees from tokens.
///
/// Identifiers are classified while the tree is being built, since whether a
/// name is a variable, a local or a macro depends on the tokens around it and
/// on the names declared so far.
///
/// # Responsibilities
/// - Matches brackets and splits call arguments.
/// - Classifies names and records macro and local declarations.
/// - Collapses prefix and binary operators by precedence tier.
pub mod parser;
