use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, parse_statement},
        symbol_table::SymbolTable,
    },
};

/// Parses a statement list, the body of `then`, `else`, `do` and `let`.
///
/// Every statement is terminated by `;`. The terminator of the last
/// statement may be left out when the line ends right after it. Parsing
/// stops at the first token that cannot begin a statement, such as `else`
/// or the end of the line.
///
/// Grammar: `list := (statement ";")*`
///
/// # Returns
/// - `None` for an empty list.
/// - The single statement, or a right-linked chain of sequences.
///
/// # Errors
/// - `UnexpectedToken` if a statement is followed by anything but `;`, the
///   end of the line, or a token that closes the enclosing construct.
pub fn parse_list<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Option<Node>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    while let Some((token, _)) = tokens.peek()
          && starts_statement(token)
    {
        statements.push(parse_statement(tokens, symbols)?);

        match tokens.peek() {
            Some((Token::Semicolon, _)) => {
                tokens.next();
            },
            Some((Token::NewLine, _)) | None => break,
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("{tok}, expected ';' after statement"),
                                                         line:  *line, });
            },
        }
    }

    Ok(Node::sequence_of(statements))
}

/// Whether `token` can begin a statement.
const fn starts_statement(token: &Token) -> bool {
    matches!(token,
             Token::If
             | Token::While
             | Token::Number(_)
             | Token::Name(_)
             | Token::Builtin(_)
             | Token::LParen
             | Token::Minus
             | Token::Pipe)
}

#[cfg(test)]
mod tests {
    use logos::Logos;

    use super::*;
    use crate::interpreter::lexer::LexerExtras;

    fn tokens(source: &str) -> Vec<(Token, usize)> {
        let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next() {
            tokens.push((token.unwrap(), lexer.extras.line));
        }
        tokens.push((Token::NewLine, lexer.extras.line));
        tokens
    }

    #[test]
    fn empty_list_is_absent() {
        let mut symbols = SymbolTable::new();
        let source = tokens("");
        let mut iter = source.iter().peekable();

        assert_eq!(parse_list(&mut iter, &mut symbols).unwrap(), None);
    }

    #[test]
    fn statements_chain_to_the_right() {
        let mut symbols = SymbolTable::new();
        let source = tokens("1; 2; 3;");
        let mut iter = source.iter().peekable();

        let list = parse_list(&mut iter, &mut symbols).unwrap().unwrap();
        assert_eq!(list,
                   Node::sequence(Node::number(1.0),
                                  Node::sequence(Node::number(2.0), Node::number(3.0))));
    }

    #[test]
    fn last_semicolon_is_optional_at_end_of_line() {
        let mut symbols = SymbolTable::new();
        let source = tokens("1; 2");
        let mut iter = source.iter().peekable();

        let list = parse_list(&mut iter, &mut symbols).unwrap().unwrap();
        assert_eq!(list.arguments().count(), 2);
        assert!(matches!(iter.next(), Some((Token::NewLine, _))));
    }

    #[test]
    fn list_stops_before_else() {
        let mut symbols = SymbolTable::new();
        let source = tokens("1; else 2;");
        let mut iter = source.iter().peekable();

        assert_eq!(parse_list(&mut iter, &mut symbols).unwrap(), Some(Node::number(1.0)));
        assert!(matches!(iter.peek(), Some((Token::Else, _))));
    }

    #[test]
    fn missing_separator_is_an_error() {
        let mut symbols = SymbolTable::new();
        let source = tokens("1 2;");
        let mut iter = source.iter().peekable();

        assert!(matches!(parse_list(&mut iter, &mut symbols),
                         Err(ParseError::UnexpectedToken { line: 1, .. })));
    }
}
