use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_unary, utils::intern},
        symbol_table::SymbolTable,
    },
};

/// Parses an assignment, the lowest-precedence construct.
///
/// A name directly followed by `=` starts an assignment; the right-hand side
/// is itself an assignment, so `a = b = 3` stores 3 in both.
///
/// The rule is: `assignment := NAME "=" assignment | comparison`
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    if let Some((Token::Name(name), line)) = lookahead.next()
       && let Some((Token::Equals, _)) = lookahead.peek()
    {
        let symbol = intern(symbols, name, *line)?;
        tokens.next();
        tokens.next();
        let value = parse_assignment(tokens, symbols)?;
        return Ok(Node::assign(symbol, value));
    }

    parse_comparison(tokens, symbols)
}

/// Parses a comparison.
///
/// Comparisons do not chain: `a < b < c` leaves the second `<` for the
/// caller to reject.
///
/// The rule is: `comparison := additive (CMP additive)?`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_additive(tokens, symbols)?;

    if let Some((Token::Compare(op), _)) = tokens.peek() {
        let op = *op;
        tokens.next();
        let right = parse_additive(tokens, symbols)?;
        return Ok(Node::compare(op, left, right));
    }

    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A `Node::Binary` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_term(tokens, symbols)?;
    while let Some((token, _)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    {
        tokens.next();
        let right = parse_term(tokens, symbols)?;
        left = Node::binary(op, left, right);
    }
    Ok(left)
}

/// Parses multiplication and division.
///
/// The rule is: `term := unary (("*" | "/") unary)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_unary(tokens, symbols)?;
    while let Some((token, _)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
    {
        tokens.next();
        let right = parse_unary(tokens, symbols)?;
        left = Node::binary(op, left, right);
    }
    Ok(left)
}

/// Maps an operator token to its binary operator, if it is one.
pub(crate) const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}
