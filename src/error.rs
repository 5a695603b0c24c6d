/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code: unexpected or unrecognized tokens, malformed definitions and symbol
/// table exhaustion while names are being resolved.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while evaluating a statement,
/// such as calls to undefined functions or argument count mismatches.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error surfaced by a [`Session`](crate::interpreter::session::Session).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The statement could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The statement failed during evaluation.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Whether the session must stop instead of moving on to the next
    /// statement.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Parse(e) => e.is_fatal(),
            Self::Runtime(e) => e.is_fatal(),
        }
    }

    /// The source line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Parse(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }
}
