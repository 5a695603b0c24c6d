use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::ParseResult,
        symbol_table::{SymbolId, SymbolTable},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by call arguments, builtin operands and definition parameter lists.
/// It repeatedly calls `parse_item` to parse one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `symbols`: Symbol table names are resolved against.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the statement ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    symbols: &mut SymbolTable,
    parse_item: impl Fn(&mut Peekable<I>, &mut SymbolTable) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens, symbols)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((Token::NewLine, line)) => {
                return Err(ParseError::UnexpectedEndOfInput { line: *line });
            },
            Some((tok, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("{tok}, expected ',' or {closing}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }
    Ok(items)
}

/// Consumes the next token, which must be `expected`.
///
/// `what` describes the expectation in the error message.
///
/// # Returns
/// The line of the consumed token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    what: &str)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((Token::NewLine, line)) => Err(ParseError::UnexpectedEndOfInput { line: *line }),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { token: format!("{tok}, expected {what}"),
                                                               line:  *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Looks `name` up in the symbol table, creating it on first sight.
///
/// # Errors
/// [`ParseError::SymbolTableFull`] when a fixed-capacity table has no free
/// slot left.
pub(in crate::interpreter::parser) fn intern(symbols: &mut SymbolTable,
                                             name: &str,
                                             line: usize)
                                             -> ParseResult<SymbolId> {
    symbols.get_or_create(name)
           .map_err(|full| ParseError::SymbolTableFull { capacity: full.capacity,
                                                          line })
}

/// Parses one formal parameter of a definition and interns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not a name.
pub(in crate::interpreter::parser) fn parse_parameter<'a, I>(tokens: &mut Peekable<I>,
                                                             symbols: &mut SymbolTable)
                                                             -> ParseResult<SymbolId>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Name(name), line)) => intern(symbols, name, *line),
        Some((Token::NewLine, line)) => Err(ParseError::UnexpectedEndOfInput { line: *line }),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("{tok}, expected a parameter name"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
