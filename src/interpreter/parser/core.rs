use std::iter::Peekable;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_assignment, block::parse_list, utils::expect},
        symbol_table::SymbolTable,
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, assignment, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
/// - `symbols`: Table every name is resolved against.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    ensure_sufficient_stack(|| parse_assignment(tokens, symbols))
}

/// Parses a statement: an `if`, a `while`, or a plain expression.
///
/// Grammar:
/// ```text
///     statement := "if" expression "then" list ("else" list)?
///                | "while" expression "do" list
///                | expression
/// ```
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    ensure_sufficient_stack(|| match tokens.peek() {
        Some((Token::If, _)) => {
            tokens.next();
            parse_if(tokens, symbols)
        },
        Some((Token::While, _)) => {
            tokens.next();
            parse_while(tokens, symbols)
        },
        _ => parse_expression(tokens, symbols),
    })
}

/// Parses an `if` statement with an optional `else` list.
///
/// Syntax:
/// ```text
///     if <condition> then <list> [else <list>]
/// ```
/// Either list may be empty, in which case the branch is absent and
/// evaluates to zero. A dangling `else` binds to the innermost `if`.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
///
/// # Errors
/// - `UnexpectedToken` if `then` is missing.
/// - Propagates any errors from the condition or the lists.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens, symbols)?;
    expect(tokens, &Token::Then, "'then' after if condition")?;
    let then_branch = parse_list(tokens, symbols)?;

    let else_branch = match tokens.peek() {
        Some((Token::Else, _)) => {
            tokens.next();
            parse_list(tokens, symbols)?
        },
        _ => None,
    };

    Ok(Node::conditional(condition, then_branch, else_branch))
}

/// Parses a `while` loop.
///
/// Syntax: `while <condition> do <list>`. The list may be empty.
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_expression(tokens, symbols)?;
    expect(tokens, &Token::Do, "'do' after while condition")?;
    let body = parse_list(tokens, symbols)?;

    Ok(Node::while_loop(condition, body))
}
