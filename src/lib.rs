//! # dynacalc
//!
//! dynacalc is a small calculator language written in Rust.
//! It parses and evaluates arithmetic, comparisons, `if` and `while`
//! statements, assignments and user-defined functions whose parameters are
//! dynamically scoped: a call temporarily rebinds the global symbols named by
//! its parameters and restores them when the call returns.

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

use crate::{error::Error, interpreter::session::Session};

/// Defines the structure of parsed code.
///
/// This module declares the [`Node`](ast::Node) tree, its operators, function
/// definitions and top-level statements. Trees are built by the parser and
/// walked by the evaluator; dropping a tree frees it.
///
/// # Responsibilities
/// - Defines a node kind for every language construct.
/// - Provides constructors that link children into owned subtrees.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. Every error carries the line it was raised on and
/// knows whether it is fatal to the session.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Classifies errors as recoverable or fatal.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, the symbol table, evaluation
/// and the session driver. It exposes the public API for running programs
/// one line at a time.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, symbol table and
///   evaluator.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General helpers.
///
/// Currently the `%g`-style number formatting used for printed results.
pub mod util;

/// Runs `source` on a fresh session printing to standard output.
///
/// Every line is run even if earlier ones fail; their errors are returned in
/// order. With `echo` set, each expression's value and each definition is
/// written as well as the output of `print`.
///
/// # Errors
/// Returns the first fatal error, after which no further line runs.
///
/// # Examples
/// ```
/// use dynacalc::run;
///
/// let errors = run("x = 2\nprint(x ^ 10)\n", false).unwrap();
/// assert!(errors.is_empty());
///
/// // A call to a function that was never defined is reported but not fatal.
/// let errors = run("missing(1)\n", false).unwrap();
/// assert_eq!(errors.len(), 1);
/// ```
pub fn run(source: &str, echo: bool) -> Result<Vec<Error>, Error> {
    Session::new().echo(echo).run(source)
}
