use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, intern, parse_comma_separated},
        },
        symbol_table::SymbolTable,
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `|`  (absolute value)
///
/// Unary operators are right-associative and bind looser than `^`, so
/// `-2^2` is `-(2^2)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "|") unary
///            | power
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    ensure_sufficient_stack(|| {
        let op = match tokens.peek() {
            Some((Token::Minus, _)) => UnaryOperator::Negate,
            Some((Token::Pipe, _)) => UnaryOperator::Abs,
            _ => return parse_power(tokens, symbols),
        };
        tokens.next();
        let operand = parse_unary(tokens, symbols)?;
        Ok(Node::unary(op, operand))
    })
}

/// Parses exponentiation.
///
/// The exponent is a full unary expression, which makes `^`
/// right-associative: `2^3^2` is `2^(3^2)` and `2^-1` is accepted.
///
/// Grammar: `power := primary ("^" unary)?`
fn parse_power<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(tokens, symbols)?;
    if let Some((Token::Caret, _)) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens, symbols)?;
        return Ok(Node::binary(BinaryOperator::Pow, base, exponent));
    }
    Ok(base)
}

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := NUMBER
///              | "(" expression ")"
///              | BUILTIN "(" expression ("," expression)* ")"
///              | NAME "(" (expression ("," expression)*)? ")"
///              | NAME
/// ```
/// A builtin given several operands evaluates them in order and uses the
/// last, since the operands form a sequence.
///
/// # Errors
/// Returns a `ParseError` if:
/// - a `(` is not properly closed with `)`,
/// - a builtin is called without an operand,
/// - the token cannot start an expression.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, symbols: &mut SymbolTable) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Number(value), _)) => Ok(Node::number(*value)),
        Some((Token::LParen, line)) => {
            let inner = parse_expression(tokens, symbols)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(inner),
                _ => Err(ParseError::ExpectedClosingParen { line: *line }),
            }
        },
        Some((Token::Builtin(function), line)) => {
            expect(tokens, &Token::LParen, &format!("'(' after {function}"))?;
            let operands = parse_comma_separated(tokens, symbols, parse_expression, &Token::RParen)?;
            let operand = Node::sequence_of(operands).ok_or_else(|| {
                              ParseError::UnexpectedToken { token: format!("')', {function} needs an operand"),
                                                            line:  *line, }
                          })?;
            Ok(Node::builtin(*function, operand))
        },
        Some((Token::Name(name), line)) => {
            let symbol = intern(symbols, name, *line)?;
            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                let arguments = parse_comma_separated(tokens, symbols, parse_expression, &Token::RParen)?;
                Ok(Node::call(symbol, Node::sequence_of(arguments)))
            } else {
                Ok(Node::reference(symbol))
            }
        },
        Some((Token::NewLine, line)) => Err(ParseError::UnexpectedEndOfInput { line: *line }),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { token: format!("{tok}, expected an expression"),
                                                               line:  *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
