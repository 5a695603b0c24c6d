use std::fmt;

use logos::Logos;

use crate::ast::{Builtin, Comparison};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `3.25`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+\.?[0-9]*([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// `if`
    #[token("if")]
    If,
    /// `then`
    #[token("then")]
    Then,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `let`
    #[token("let")]
    Let,
    /// Names of the builtin functions.
    #[token("sqrt", |_| Builtin::Sqrt)]
    #[token("exp", |_| Builtin::Exp)]
    #[token("log", |_| Builtin::Log)]
    #[token("print", |_| Builtin::Print)]
    Builtin(Builtin),
    /// Identifier tokens; variable or function names such as `x` or `avg`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Name(String),
    /// Comparison operators. `<>` is an alternative spelling of `!=`.
    #[token(">", |_| Comparison::Greater)]
    #[token("<", |_| Comparison::Less)]
    #[token("!=", |_| Comparison::NotEqual)]
    #[token("<>", |_| Comparison::NotEqual)]
    #[token("==", |_| Comparison::Equal)]
    #[token(">=", |_| Comparison::GreaterEqual)]
    #[token("<=", |_| Comparison::LessEqual)]
    Compare(Comparison),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `|`, prefix absolute value.
    #[token("|")]
    Pipe,
    /// `=`
    #[token("=")]
    Equals,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// A backslash at the end of a line joins it with the next one.
    #[regex(r"\\\r?\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    Continuation,
    /// End of a statement.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        Token::NewLine
    })]
    NewLine,
    /// Spaces, tabs, feeds and carriage returns.
    #[regex(r"[ \t\f\r]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
/// Incremented on every newline, including escaped ones.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Name(name) => write!(f, "'{name}'"),
            Self::Builtin(builtin) => write!(f, "'{builtin}'"),
            Self::Compare(op) => write!(f, "'{op}'"),
            Self::If => f.write_str("'if'"),
            Self::Then => f.write_str("'then'"),
            Self::Else => f.write_str("'else'"),
            Self::While => f.write_str("'while'"),
            Self::Do => f.write_str("'do'"),
            Self::Let => f.write_str("'let'"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Caret => f.write_str("'^'"),
            Self::Pipe => f.write_str("'|'"),
            Self::Equals => f.write_str("'='"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
            Self::NewLine => f.write_str("end of line"),
            Self::Comment | Self::Continuation | Self::Ignored => Ok(()),
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the token slice is not a valid number.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

#[cfg(test)]
mod tests {
    use logos::Logos;

    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer_with_extras(source, LexerExtras { line: 1 }).map(Result::unwrap)
                                                                 .collect()
    }

    #[test]
    fn numbers_in_every_form() {
        assert_eq!(lex("3.25 .5 2. 7 1e3 2.5E-2"),
                   vec![Token::Number(3.25),
                        Token::Number(0.5),
                        Token::Number(2.0),
                        Token::Number(7.0),
                        Token::Number(1000.0),
                        Token::Number(0.025)]);
    }

    #[test]
    fn keywords_win_over_names_only_on_exact_match() {
        assert_eq!(lex("if iffy while whiled print printer"),
                   vec![Token::If,
                        Token::Name("iffy".into()),
                        Token::While,
                        Token::Name("whiled".into()),
                        Token::Builtin(Builtin::Print),
                        Token::Name("printer".into())]);
    }

    #[test]
    fn comparison_spellings() {
        assert_eq!(lex("> < != <> == >= <="),
                   vec![Token::Compare(Comparison::Greater),
                        Token::Compare(Comparison::Less),
                        Token::Compare(Comparison::NotEqual),
                        Token::Compare(Comparison::NotEqual),
                        Token::Compare(Comparison::Equal),
                        Token::Compare(Comparison::GreaterEqual),
                        Token::Compare(Comparison::LessEqual)]);
    }

    #[test]
    fn comments_and_continuations_are_skipped_but_counted() {
        let mut lexer = Token::lexer_with_extras("a = 1 // set a\nb = \\\n2\n",
                                                 LexerExtras { line: 1 });
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next() {
            tokens.push((token.unwrap(), lexer.extras.line));
        }

        assert_eq!(tokens,
                   vec![(Token::Name("a".into()), 1),
                        (Token::Equals, 1),
                        (Token::Number(1.0), 1),
                        (Token::NewLine, 2),
                        (Token::Name("b".into()), 2),
                        (Token::Equals, 2),
                        (Token::Number(2.0), 3),
                        (Token::NewLine, 4)]);
    }

    #[test]
    fn unknown_characters_are_errors() {
        let mut lexer = Token::lexer("a $ b");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert_eq!(lexer.slice(), "$");
    }
}
