/// Core evaluation logic and context management.
///
/// Contains the `Context`, the main node dispatcher and statement evaluation.
pub mod core;

/// Arithmetic operator evaluation.
///
/// Handles `+`, `-`, `*`, `/` and `^` with IEEE-754 semantics.
pub mod binary;

/// Comparison evaluation.
pub mod comparison;

/// Unary operator evaluation.
///
/// Implements negation and absolute value.
pub mod unary;

/// Control flow: statement sequences, conditionals and `while` loops.
pub mod flow;

/// Function evaluation.
///
/// Handles builtin dispatch, the `print` output channel and user-defined
/// function calls.
pub mod function;

/// Scoped parameter binding for user function calls.
pub mod scope;
