use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_list,
            core::{ParseResult, parse_statement},
            utils::{intern, parse_comma_separated, parse_parameter},
        },
        symbol_table::SymbolTable,
    },
};

/// Parses one top-level line: a function definition or a statement.
///
/// The line must be consumed completely; it ends at a `NewLine` token or at
/// the end of the token stream.
///
/// Grammar:
/// ```text
///     line := "let" NAME "(" parameters? ")" "=" list
///           | statement
/// ```
/// # Parameters
/// - `tokens`: Tokens of a single line with their line numbers.
/// - `symbols`: Table every name is resolved against. Names are interned
///   as they are met, even if the line later fails to parse.
///
/// # Errors
/// - [`ParseError::UnexpectedTrailingTokens`] if anything follows a complete
///   statement.
/// - [`ParseError::SymbolTableFull`] if a name cannot be interned.
/// - Any other `ParseError` raised while parsing the statement.
pub fn parse_line<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, l)| *l);

    let statement = if let Some((Token::Let, _)) = tokens.peek() {
        tokens.next();
        parse_definition(tokens, symbols, line)?
    } else {
        let node = parse_statement(tokens, symbols)?;
        Statement::Expression { node, line }
    };

    match tokens.next() {
        None | Some((Token::NewLine, _)) => Ok(statement),
        Some((tok, line)) => Err(ParseError::UnexpectedTrailingTokens { token: tok.to_string(),
                                                                        line:  *line, }),
    }
}

/// Parses a function definition.
///
/// Syntax: `let name(p1, p2, ...) = <list>`
///
/// Parameter names must be distinct. An empty body leaves the function
/// undefined, so calling it afterwards reports an undefined function.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `let` keyword.
/// - `line`: Line of the `let` keyword.
///
/// # Errors
/// - [`ParseError::InvalidFunctionDefinition`] if the name, the parentheses
///   or the `=` are missing.
/// - [`ParseError::DuplicateParameter`] if a parameter is listed twice.
fn parse_definition<'a, I>(tokens: &mut Peekable<I>,
                           symbols: &mut SymbolTable,
                           line: usize)
                           -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((Token::Name(name), _)) = tokens.next() else {
        return Err(ParseError::InvalidFunctionDefinition { line });
    };
    let function = intern(symbols, name, line)?;

    if !matches!(tokens.next(), Some((Token::LParen, _))) {
        return Err(ParseError::InvalidFunctionDefinition { line });
    }
    let params = parse_comma_separated(tokens, symbols, parse_parameter, &Token::RParen)?;

    if let Some(position) = (1..params.len()).find(|&i| params[..i].contains(&params[i])) {
        return Err(ParseError::DuplicateParameter { name: symbols.name(params[position]).to_string(),
                                                    line });
    }

    if !matches!(tokens.next(), Some((Token::Equals, _))) {
        return Err(ParseError::InvalidFunctionDefinition { line });
    }
    let body = parse_list(tokens, symbols)?;

    Ok(Statement::Definition { function,
                               params,
                               body,
                               line })
}
