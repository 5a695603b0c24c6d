#[derive(Debug, thiserror::Error)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Called a symbol that has no function body.
    #[error("error on line {line}: call to undefined function '{name}'")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The call supplied a different number of arguments than the function
    /// declares.
    #[error("error on line {line}: '{name}' takes {expected} argument(s) but {found} were supplied")]
    ArityMismatch {
        /// The name of the function.
        name:     String,
        /// The declared parameter count.
        expected: usize,
        /// The number of arguments at the call site.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Evaluation was requested for an absent tree.
    #[error("error on line {line}: internal error, null eval")]
    NullNode {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing to the output failed.
    #[error("error on line {line}: cannot write output: {source}")]
    Output {
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
        /// The source line where the error occurred.
        line:   usize,
    },
}

impl RuntimeError {
    /// Whether the error leaves the session unable to continue.
    ///
    /// A broken output channel is fatal; undefined functions, arity
    /// mismatches and null evaluations only abort the current statement.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Output { .. })
    }

    /// The source line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndefinedFunction { line, .. }
            | Self::ArityMismatch { line, .. }
            | Self::NullNode { line }
            | Self::Output { line, .. } => *line,
        }
    }
}
