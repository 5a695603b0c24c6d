use std::io::{self, Write};

use logos::Logos;
use tracing::warn;

use crate::{
    error::{Error, ParseError},
    interpreter::{
        evaluator::core::{Context, Outcome},
        lexer::{LexerExtras, Token},
        parser::statement::parse_line,
    },
    util::num::format_result,
};

/// Runs source text line by line against a persistent [`Context`].
///
/// Each line is lexed, parsed into a [`Statement`](crate::ast::Statement)
/// and evaluated. With echo enabled, the value of every expression is written
/// as `= <value>` and every definition as `Defined <name>`.
///
/// A failed statement does not stop the session: the error is logged,
/// collected, and the next line runs. Only fatal errors (a full fixed-size
/// symbol table, a failing output writer) end [`Session::run`] early.
///
/// Line numbers keep counting across calls to `run`, so a REPL feeding one
/// line at a time reports the same lines as a script.
///
/// ## Example
/// ```
/// use dynacalc::interpreter::session::Session;
///
/// let mut session = Session::with_output(Vec::new());
/// let errors = session.run("let sq(x) = x * x;\nsq(12)\n").unwrap();
///
/// assert!(errors.is_empty());
/// assert_eq!(session.context().output().as_slice(), b"Defined sq\n= 144\n");
/// ```
pub struct Session<W = io::Stdout> {
    context: Context<W>,
    line:    usize,
    echo:    bool,
}

impl Session {
    /// Creates a session printing to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(Context::new())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Session<W> {
    /// Creates an echoing session with a fresh context writing to `output`.
    #[must_use]
    pub fn with_output(output: W) -> Self {
        Self::with_context(Context::with_output(output))
    }

    /// Creates an echoing session around an existing context.
    #[must_use]
    pub const fn with_context(context: Context<W>) -> Self {
        Self { context,
               line: 1,
               echo: true }
    }

    /// Turns the echo of statement results on or off.
    ///
    /// Output of `print` is not affected.
    #[must_use]
    pub const fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// The evaluation context.
    #[must_use]
    pub const fn context(&self) -> &Context<W> {
        &self.context
    }

    /// Mutable access to the evaluation context.
    pub const fn context_mut(&mut self) -> &mut Context<W> {
        &mut self.context
    }

    /// Consumes the session and returns its output writer.
    #[must_use]
    pub fn into_output(self) -> W {
        self.context.into_output()
    }

    /// The line the next call to [`Session::run`] starts counting from.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Runs every line of `source`.
    ///
    /// A line that contains a character the lexer does not recognize is
    /// reported as [`ParseError::UnexpectedToken`] and skipped as a whole.
    /// Blank lines and comment-only lines are ignored.
    ///
    /// # Returns
    /// The recoverable errors met along the way, in source order.
    ///
    /// # Errors
    /// The first fatal error; lines after it are not run.
    pub fn run(&mut self, source: &str) -> Result<Vec<Error>, Error> {
        let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: self.line });
        let mut errors = Vec::new();
        let mut tokens = Vec::new();
        let mut unrecognized = None;

        while let Some(token) = lexer.next() {
            match token {
                Ok(Token::NewLine) => {
                    // The newline has already advanced the counter.
                    tokens.push((Token::NewLine, lexer.extras.line - 1));
                    self.line = lexer.extras.line;
                    self.finish(&mut tokens, unrecognized.take(), &mut errors)?;
                },
                Ok(token) => tokens.push((token, lexer.extras.line)),
                Err(()) if unrecognized.is_none() => {
                    unrecognized = Some(ParseError::UnexpectedToken { token: format!("'{}'", lexer.slice()),
                                                                      line:  lexer.extras.line, });
                },
                Err(()) => {},
            }
        }

        self.line = lexer.extras.line;
        tokens.push((Token::NewLine, self.line));
        self.finish(&mut tokens, unrecognized, &mut errors)?;

        Ok(errors)
    }

    /// Runs the statement collected in `tokens` and clears it.
    fn finish(&mut self,
              tokens: &mut Vec<(Token, usize)>,
              unrecognized: Option<ParseError>,
              errors: &mut Vec<Error>)
              -> Result<(), Error> {
        let result = match unrecognized {
            Some(error) => Err(error.into()),
            None => self.execute(tokens),
        };
        tokens.clear();

        match result {
            Err(error) if error.is_fatal() => Err(error),
            Err(error) => {
                warn!(line = error.line(), %error, "statement failed");
                errors.push(error);
                Ok(())
            },
            Ok(()) => Ok(()),
        }
    }

    fn execute(&mut self, tokens: &[(Token, usize)]) -> Result<(), Error> {
        if let [] | [(Token::NewLine, _)] = tokens {
            return Ok(());
        }

        let statement = parse_line(&mut tokens.iter().peekable(), &mut self.context.symbols)?;

        match self.context.eval_statement(statement)? {
            Outcome::Value(value) if self.echo => {
                self.context
                    .write_line(format_args!("= {}", format_result(value)))?;
            },
            Outcome::Defined(function) if self.echo => {
                let name = self.context.symbols.name(function).to_string();
                self.context.write_line(format_args!("Defined {name}"))?;
            },
            Outcome::Value(_) | Outcome::Defined(_) => {},
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        error::RuntimeError,
        interpreter::symbol_table::SymbolTable,
    };

    fn session() -> Session<Vec<u8>> {
        Session::with_output(Vec::new())
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn echoes_values_and_definitions() {
        let mut session = session();
        let errors = session.run("1 + 2\nlet twice(x) = 2 * x;\ntwice(0.5)\n").unwrap();

        assert!(errors.is_empty());
        assert_eq!(output(session), "=    3\nDefined twice\n=    1\n");
    }

    #[test]
    fn quiet_session_only_shows_print() {
        let mut session = session().echo(false);
        session.run("x = 4\nprint(x * 2)\n").unwrap();

        assert_eq!(output(session), " =    8\n");
    }

    #[test]
    fn failed_lines_are_collected_and_skipped() {
        let mut session = session();
        let errors = session.run("1 +\nnothing(1)\n2\n").unwrap();

        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], Error::Parse(ParseError::UnexpectedEndOfInput { line: 1 })));
        assert!(matches!(errors[1],
                         Error::Runtime(RuntimeError::UndefinedFunction { line: 2, .. })));
        assert_eq!(output(session), "=    2\n");
    }

    #[test]
    fn unrecognized_characters_poison_their_line_only() {
        let mut session = session();
        let errors = session.run("a = 1 $ 2\na\n").unwrap();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "error on line 1: unexpected token '$'");
        assert_eq!(output(session), "=    0\n");
    }

    #[test]
    fn blank_and_comment_lines_are_ignored() {
        let mut session = session();
        let errors = session.run("\n// nothing here\n\n7\n").unwrap();

        assert!(errors.is_empty());
        assert_eq!(output(session), "=    7\n");
    }

    #[test]
    fn last_line_needs_no_newline() {
        let mut session = session();
        session.run("5 * 5").unwrap();

        assert_eq!(output(session), "=   25\n");
    }

    #[test]
    fn line_numbers_continue_across_runs() {
        let mut session = session();
        session.run("1\n").unwrap();
        session.run("x = \\\n 2\n").unwrap();
        assert_eq!(session.line(), 4);

        let errors = session.run("(1\n").unwrap();
        assert!(matches!(errors[0], Error::Parse(ParseError::ExpectedClosingParen { line: 4 })));
    }

    #[test]
    fn full_symbol_table_stops_the_run() {
        let context = Context::with_symbols(SymbolTable::fixed(1), Vec::new());
        let mut session = Session::with_context(context);

        let err = session.run("a = 1\nb = 2\na\n").unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, Error::Parse(ParseError::SymbolTableFull { capacity: 1, line: 2 })));
        assert_eq!(output(session), "=    1\n");
    }

    #[test]
    fn redefinition_replaces_the_function() {
        let mut session = session();
        let errors = session.run("let f(x) = x + 1;\nlet f(x) = x * 10;\nf(3)\n").unwrap();

        assert!(errors.is_empty());
        assert_eq!(output(session), "Defined f\nDefined f\n=   30\n");
    }
}
