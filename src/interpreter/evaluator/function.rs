/// Builtin function dispatch (`sqrt`, `exp`, `log`, `print`).
pub mod builtin;
/// The `print` output channel.
///
/// Writes a value to the context's output in the calculator's fixed format.
pub mod print;
/// User-defined function calls.
///
/// Validates arity, evaluates arguments and runs the body with its parameters
/// bound.
pub mod user;
