use std::io::{self, Write};

use tracing::debug;

use crate::{
    ast::{Node, Statement},
    error::RuntimeError,
    interpreter::symbol_table::{SymbolId, SymbolTable},
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// What a top-level statement produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// An expression statement evaluated to this value.
    Value(f64),
    /// A function was (re)defined on this symbol.
    Defined(SymbolId),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the symbol table with every
/// variable and user-defined function, the writer `print` sends its output
/// to, and the line of the statement being evaluated (used in error
/// messages).
///
/// ## Usage
///
/// A `Context` is created once and reused for every statement. Independent
/// contexts share nothing, so tests can run side by side with their own
/// symbol tables and captured output.
///
/// ```
/// use dynacalc::{
///     ast::{BinaryOperator, Node},
///     interpreter::evaluator::core::Context,
/// };
///
/// let mut context = Context::with_output(Vec::new());
/// let x = context.symbols.get_or_create("x").unwrap();
///
/// let assign = Node::assign(x, Node::binary(BinaryOperator::Mul, Node::number(6.0), Node::number(7.0)));
/// assert_eq!(context.eval(&assign).unwrap(), 42.0);
/// assert_eq!(context.eval(&Node::reference(x)).unwrap(), 42.0);
/// ```
pub struct Context<W = io::Stdout> {
    /// Every variable and function known to this context.
    pub symbols: SymbolTable,
    output:      W,
    line:        usize,
}

impl Context {
    /// Creates a context printing to standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Context<W> {
    /// Creates a context with an empty symbol table that prints to `output`.
    #[must_use]
    pub fn with_output(output: W) -> Self {
        Self::with_symbols(SymbolTable::new(), output)
    }

    /// Creates a context around an existing symbol table.
    #[must_use]
    pub const fn with_symbols(symbols: SymbolTable, output: W) -> Self {
        Self { symbols,
               output,
               line: 1 }
    }

    /// The writer `print` output goes to.
    #[must_use]
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Mutable access to the output writer.
    pub const fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consumes the context and returns its output writer.
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }

    /// The line reported in runtime errors.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Sets the line reported in runtime errors.
    pub const fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Evaluates a statement tree handed over by the driver.
    ///
    /// An absent root is reported as [`RuntimeError::NullNode`] instead of
    /// evaluating to `0.0` the way absent branches and loop bodies do.
    pub fn evaluate(&mut self, root: Option<&Node>) -> EvalResult<f64> {
        let root = root.ok_or(RuntimeError::NullNode { line: self.line })?;
        self.eval(root)
    }

    /// Evaluates a node and returns its value.
    ///
    /// This is the recursive, depth-first dispatcher. Operands are always
    /// evaluated left before right, and every assignment or call side effect
    /// lands in [`Context::symbols`].
    ///
    /// The stack grows on demand, so deep user function recursion does not
    /// overflow it.
    pub fn eval(&mut self, node: &Node) -> EvalResult<f64> {
        ensure_sufficient_stack(|| self.eval_node(node))
    }

    fn eval_node(&mut self, node: &Node) -> EvalResult<f64> {
        match node {
            Node::Number(value) => Ok(*value),
            Node::Reference(symbol) => Ok(self.symbols.value(*symbol)),
            Node::Assignment { symbol, value } => {
                let value = self.eval(value)?;
                self.symbols.set_value(*symbol, value);
                Ok(value)
            },
            Node::Binary { op, left, right } => self.eval_binary_op(*op, left, right),
            Node::Unary { op, operand } => self.eval_unary_op(*op, operand),
            Node::Comparison { op, left, right } => self.eval_comparison(*op, left, right),
            Node::Sequence { first, rest } => self.eval_sequence(first, rest),
            Node::Conditional { condition,
                                then_branch,
                                else_branch, } => {
                self.eval_conditional(condition, then_branch.as_deref(), else_branch.as_deref())
            },
            Node::Loop { condition, body } => self.eval_loop(condition, body.as_deref()),
            Node::BuiltinCall { function, operand } => self.call_builtin(*function, operand),
            Node::UserCall { function,
                             arguments, } => self.call_user(*function, arguments.as_deref()),
        }
    }

    /// Evaluates a single top-level statement.
    ///
    /// Expression statements are evaluated for their value. Definitions
    /// replace the function installed on their symbol; the tree of the old
    /// definition is dropped here unless a running call still holds it.
    pub fn eval_statement(&mut self, statement: Statement) -> EvalResult<Outcome> {
        self.line = statement.line_number();

        match statement {
            Statement::Expression { node, .. } => self.evaluate(Some(&node)).map(Outcome::Value),
            Statement::Definition { function,
                                    params,
                                    body,
                                    .. } => {
                debug!(name = self.symbols.name(function),
                       arity = params.len(),
                       "defining function");
                self.symbols.define(function, params, body);
                Ok(Outcome::Defined(function))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, Builtin, Comparison, UnaryOperator};

    fn context() -> Context<Vec<u8>> {
        Context::with_output(Vec::new())
    }

    fn num(value: f64) -> Node {
        Node::number(value)
    }

    #[test]
    fn assignment_round_trips_through_reference() {
        let mut context = context();
        let s = context.symbols.get_or_create("s").unwrap();

        for value in [0.0, -1.5, 1e300, f64::MIN_POSITIVE] {
            assert_eq!(context.eval(&Node::assign(s, num(value))).unwrap(), value);
            assert_eq!(context.eval(&Node::reference(s)).unwrap(), value);
        }
    }

    #[test]
    fn arithmetic_follows_ieee_semantics() {
        let mut context = context();

        let sum = Node::binary(BinaryOperator::Add, num(2.0), num(3.0));
        assert_eq!(context.eval(&sum).unwrap(), 5.0);

        let div = Node::binary(BinaryOperator::Div, num(1.0), num(0.0));
        assert_eq!(context.eval(&div).unwrap(), f64::INFINITY);

        let nan = Node::binary(BinaryOperator::Div, num(0.0), num(0.0));
        assert!(context.eval(&nan).unwrap().is_nan());

        let pow = Node::binary(BinaryOperator::Pow, num(2.0), num(10.0));
        assert_eq!(context.eval(&pow).unwrap(), 1024.0);
    }

    #[test]
    fn unary_operators() {
        let mut context = context();

        let neg = Node::unary(UnaryOperator::Negate, num(4.0));
        assert_eq!(context.eval(&neg).unwrap(), -4.0);

        let abs = Node::unary(UnaryOperator::Abs, num(-4.0));
        assert_eq!(context.eval(&abs).unwrap(), 4.0);
    }

    #[test]
    fn comparisons_yield_exactly_one_or_zero() {
        let mut context = context();
        let ops = [Comparison::Greater,
                   Comparison::Less,
                   Comparison::NotEqual,
                   Comparison::Equal,
                   Comparison::GreaterEqual,
                   Comparison::LessEqual];

        for op in ops {
            for (l, r) in [(1.0, 2.0), (2.0, 2.0), (3.0, 2.0), (f64::NAN, 1.0)] {
                let value = context.eval(&Node::compare(op, num(l), num(r))).unwrap();
                assert!(value == 1.0 || value == 0.0, "{op} gave {value}");
            }
        }

        let lt = Node::compare(Comparison::Less, num(1.0), num(2.0));
        assert_eq!(context.eval(&lt).unwrap(), 1.0);
        let ge = Node::compare(Comparison::GreaterEqual, num(1.0), num(2.0));
        assert_eq!(context.eval(&ge).unwrap(), 0.0);
    }

    #[test]
    fn sequence_returns_the_last_value_after_running_the_first() {
        let mut context = context();
        let a = context.symbols.get_or_create("a").unwrap();

        let seq = Node::sequence(Node::assign(a, num(7.0)), Node::reference(a));
        assert_eq!(context.eval(&seq).unwrap(), 7.0);
    }

    #[test]
    fn builtins_apply_their_function() {
        let mut context = context();

        let sqrt = Node::builtin(Builtin::Sqrt, num(16.0));
        assert_eq!(context.eval(&sqrt).unwrap(), 4.0);

        let exp = Node::builtin(Builtin::Exp, num(0.0));
        assert_eq!(context.eval(&exp).unwrap(), 1.0);

        let log = Node::builtin(Builtin::Log, num(1.0));
        assert_eq!(context.eval(&log).unwrap(), 0.0);
    }

    #[test]
    fn print_writes_and_returns_its_operand() {
        let mut context = context();

        let print = Node::builtin(Builtin::Print, num(2.5));
        let doubled = Node::binary(BinaryOperator::Mul, print, num(2.0));

        assert_eq!(context.eval(&doubled).unwrap(), 5.0);
        assert_eq!(String::from_utf8(context.into_output()).unwrap(), " =  2.5\n");
    }

    #[test]
    fn absent_root_is_a_null_node_error() {
        let mut context = context();
        context.set_line(12);

        let err = context.evaluate(None).unwrap_err();
        assert!(matches!(err, RuntimeError::NullNode { line: 12 }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn definition_statement_installs_the_function() {
        let mut context = context();
        let f = context.symbols.get_or_create("f").unwrap();
        let x = context.symbols.get_or_create("x").unwrap();

        let outcome = context.eval_statement(Statement::Definition { function: f,
                                                                     params:   vec![x],
                                                                     body:     Some(Node::reference(x)),
                                                                     line:     3, })
                             .unwrap();

        assert_eq!(outcome, Outcome::Defined(f));
        assert_eq!(context.symbols.function(f).unwrap().arity(), 1);
        assert_eq!(context.line(), 3);
    }

    #[test]
    fn dropped_trees_leave_the_table_usable() {
        let mut context = context();
        let x = context.symbols.get_or_create("x").unwrap();

        let tree = Node::assign(x, Node::binary(BinaryOperator::Add, num(1.0), num(2.0)));
        assert_eq!(context.eval(&tree).unwrap(), 3.0);
        drop(tree);

        let fresh = Node::binary(BinaryOperator::Mul, Node::reference(x), num(2.0));
        assert_eq!(context.eval(&fresh).unwrap(), 6.0);
    }
}
