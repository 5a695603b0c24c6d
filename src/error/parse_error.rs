#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// Found an unexpected or unrecognized token.
    #[error("error on line {line}: unexpected token {token}")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    #[error("error on line {line}: unexpected end of input")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("error on line {line}: expected closing parenthesis ')'")]
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after the statement should have ended.
    #[error("error on line {line}: extra tokens after statement: {token}")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The function definition syntax was invalid.
    #[error("error on line {line}: invalid function definition, expected: let f(x) = x * x")]
    InvalidFunctionDefinition {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The same name appears twice in a parameter list.
    #[error("error on line {line}: parameter '{name}' is declared twice")]
    DuplicateParameter {
        /// The repeated parameter name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A fixed-capacity symbol table ran out of slots.
    #[error("error on line {line}: symbol table overflow ({capacity} slots)")]
    SymbolTableFull {
        /// The number of slots in the table.
        capacity: usize,
        /// The source line where the error occurred.
        line:     usize,
    },
}

impl ParseError {
    /// Whether the error leaves the session unable to continue.
    ///
    /// Only symbol table exhaustion is fatal; every other parse error is
    /// confined to its own statement.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::SymbolTableFull { .. })
    }

    /// The source line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::ExpectedClosingParen { line }
            | Self::UnexpectedTrailingTokens { line, .. }
            | Self::InvalidFunctionDefinition { line }
            | Self::DuplicateParameter { line, .. }
            | Self::SymbolTableFull { line, .. } => *line,
        }
    }
}
