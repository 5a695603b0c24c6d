/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the tree depth first, performs arithmetic and
/// comparisons, stores assignments in the symbol table and calls builtin and
/// user-defined functions. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates every node kind, operands left before right.
/// - Binds user function parameters for the duration of a call and restores
///   them afterwards.
/// - Reports runtime errors such as calls to undefined functions or argument
///   count mismatches.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens:
/// numbers, names, keywords, builtin names, operators and line breaks. This is
/// the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with their line.
/// - Skips comments and joins continued lines.
pub mod lexer;
/// The parser module builds the abstract syntax tree from tokens.
///
/// The parser processes the tokens of one line and constructs either an
/// expression statement or a function definition, resolving every name
/// through the symbol table as it goes.
///
/// # Responsibilities
/// - Converts tokens into [`Node`](crate::ast::Node) trees.
/// - Validates the grammar, reporting errors with their line.
pub mod parser;
/// Line-by-line execution of source text.
///
/// A session owns the evaluation context, feeds it one statement per line,
/// echoes results and decides which errors end the run.
pub mod session;
/// Name to binding mapping.
///
/// An open-addressing hash table holding every variable value and function
/// definition by name.
pub mod symbol_table;
