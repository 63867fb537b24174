//! # wingcalc
//!
//! wingcalc is an embeddable expression language. A line of text is
//! tokenized, built into an expression tree and evaluated against a session
//! of global variables, macros and a flat numeric store that pointers
//! address, yielding a single `f64`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the expression tree.
///
/// This module declares the closed `Node` enum the parser builds and the
/// evaluator solves. Trees are immutable and share subtrees through
/// reference-counted handles.
pub mod ast;
/// Provides the error types of every phase.
///
/// Tokenizer, parser and evaluator each have their own error enum; a
/// top-level `Error` gathers them for the engine's entry points.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Categorises evaluation errors so catching builtins can filter them.
pub mod error;
/// Orchestrates the entire process of evaluation.
///
/// This module ties together lexing, parsing, evaluation, the builtin
/// library, I/O and configuration, and exposes the [`Engine`] that hosts
/// drive.
pub mod interpreter;
/// General utilities for numeric conversion and text handling.
pub mod util;

pub use interpreter::{engine::Engine, options::EngineOptions};

use crate::error::Error;

/// Evaluates a script, one line at a time, in a fresh engine.
///
/// Blank lines are skipped. The result of the last line is returned and,
/// with `auto_print`, written to standard output.
///
/// # Errors
/// The first tokenizer, parser or evaluation error. Lines after it are not
/// evaluated.
///
/// # Examples
/// ```
/// use wingcalc::get_result;
///
/// let source = "x = 2\n\nx ** 10";
/// assert_eq!(get_result(source, false).unwrap(), 1024.0);
///
/// // A macro that was never defined.
/// assert!(get_result("@missing(1)", false).is_err());
/// ```
pub fn get_result(source: &str, auto_print: bool) -> Result<f64, Error> {
    let engine = Engine::new();
    let mut result = 0.0;

    for line in source.lines().filter(|line| !line.trim().is_empty()) {
        result = engine.solve(line)?;
    }

    if auto_print {
        println!("{result}");
    }

    Ok(result)
}
