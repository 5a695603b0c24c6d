/// Parser entry points and the expression grammar's top level.
///
/// Holds `ParseResult`, expression and statement parsing, and the `if` and
/// `while` constructs.
pub mod core;

/// Prefix operators, exponentiation and primary expressions.
///
/// Covers negation, absolute value, `^`, literals, names, parenthesized
/// expressions and calls.
pub mod unary;

/// Assignment, comparison and the left-associative arithmetic levels.
pub mod binary;

/// Statement lists.
///
/// Parses the `;`-terminated statement sequences that form the bodies of
/// `then`, `else`, `do` and `let`.
pub mod block;

/// Helpers shared across the parser: comma-separated lists, token
/// expectations and name interning.
pub mod utils;

/// Top-level lines.
///
/// Parses one complete line, either a function definition or a statement,
/// and rejects trailing tokens.
pub mod statement;
