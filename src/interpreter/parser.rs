/// Tree construction.
///
/// Folds a token stream into nodes and operator placeholders, then collapses
/// prefix operators and binary operators by tier until one node remains.
pub mod core;

/// Name classification.
///
/// Decides whether an identifier is a global variable, a local, a macro or a
/// builtin, based on its sigil, the tokens around it and the names declared
/// so far in the enclosing frames.
pub mod names;

/// Bracket matching, parameter splitting and literal readers shared by the
/// tree builder.
pub mod utils;
