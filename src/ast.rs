use std::{fmt, mem};

use crate::interpreter::symbol_table::SymbolId;

/// An arithmetic operator taking two operands.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
}

/// An operator taking a single operand.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Absolute value (`|x`).
    Abs,
}

/// A comparison producing exactly `1.0` when it holds and `0.0` otherwise.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Greater than (`>`)
    Greater,
    /// Less than (`<`)
    Less,
    /// Not equal to (`!=` or `<>`)
    NotEqual,
    /// Equal to (`==`)
    Equal,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than or equal (`<=`)
    LessEqual,
}

/// A function implemented by the evaluator itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Builtin {
    /// Square root.
    Sqrt,
    /// Exponential, `e^x`.
    Exp,
    /// Natural logarithm.
    Log,
    /// Writes the value to the output and returns it.
    Print,
}

impl Builtin {
    /// Returns the name the function is called by in source code.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Print => "print",
        }
    }
}

/// A node of the abstract syntax tree.
///
/// Every node exclusively owns its children through `Box`, so a tree is never
/// aliased and dropping the root releases the whole subtree exactly once.
/// Symbols are referenced through [`SymbolId`] handles, which do not own the
/// binding they point to.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A numeric constant.
    Number(f64),
    /// Reads the current value of a symbol.
    Reference(SymbolId),
    /// Stores the value of `value` into `symbol`.
    Assignment {
        /// The symbol being written.
        symbol: SymbolId,
        /// The right-hand side.
        value:  Box<Self>,
    },
    /// An arithmetic operation.
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// Negation or absolute value.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
    },
    /// A comparison between two operands.
    Comparison {
        /// The comparison to test.
        op:    Comparison,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// Evaluates `first`, discards its value, then evaluates `rest`.
    ///
    /// Statement lists and argument lists are right-linked chains of
    /// sequences.
    Sequence {
        /// The leading element.
        first: Box<Self>,
        /// The remainder of the chain.
        rest:  Box<Self>,
    },
    /// `if condition then ... else ...`
    Conditional {
        /// The condition; nonzero is true.
        condition:   Box<Self>,
        /// Evaluated when the condition is nonzero.
        then_branch: Option<Box<Self>>,
        /// Evaluated when the condition is zero.
        else_branch: Option<Box<Self>>,
    },
    /// `while condition do body`
    Loop {
        /// Re-evaluated before every iteration.
        condition: Box<Self>,
        /// The loop body.
        body:      Option<Box<Self>>,
    },
    /// A call to one of the [`Builtin`] functions.
    BuiltinCall {
        /// Which builtin to call.
        function: Builtin,
        /// The single operand.
        operand:  Box<Self>,
    },
    /// A call to a user-defined function.
    UserCall {
        /// The symbol the function is defined on.
        function:  SymbolId,
        /// The argument chain, absent for a call without arguments.
        arguments: Option<Box<Self>>,
    },
}

impl Node {
    /// Creates a constant node.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a node reading `symbol`.
    #[must_use]
    pub const fn reference(symbol: SymbolId) -> Self {
        Self::Reference(symbol)
    }

    /// Creates an assignment of `value` to `symbol`.
    #[must_use]
    pub fn assign(symbol: SymbolId, value: Self) -> Self {
        Self::Assignment { symbol,
                           value: Box::new(value) }
    }

    /// Creates an arithmetic node.
    ///
    /// ## Example
    /// ```
    /// use dynacalc::ast::{BinaryOperator, Node};
    ///
    /// let sum = Node::binary(BinaryOperator::Add, Node::number(2.0), Node::number(3.0));
    /// assert!(matches!(sum, Node::Binary { op: BinaryOperator::Add, .. }));
    /// ```
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Self, right: Self) -> Self {
        Self::Binary { op,
                       left: Box::new(left),
                       right: Box::new(right) }
    }

    /// Creates a negation or absolute value node.
    #[must_use]
    pub fn unary(op: UnaryOperator, operand: Self) -> Self {
        Self::Unary { op,
                      operand: Box::new(operand) }
    }

    /// Creates a comparison node.
    #[must_use]
    pub fn compare(op: Comparison, left: Self, right: Self) -> Self {
        Self::Comparison { op,
                           left: Box::new(left),
                           right: Box::new(right) }
    }

    /// Creates a two-element sequence.
    #[must_use]
    pub fn sequence(first: Self, rest: Self) -> Self {
        Self::Sequence { first: Box::new(first),
                         rest:  Box::new(rest), }
    }

    /// Links `nodes` into a right-nested chain of sequences.
    ///
    /// A single node is returned unwrapped and an empty input yields `None`,
    /// which is how the grammar represents an empty statement list.
    ///
    /// ## Example
    /// ```
    /// use dynacalc::ast::Node;
    ///
    /// assert_eq!(Node::sequence_of(Vec::new()), None);
    /// assert_eq!(Node::sequence_of(vec![Node::number(1.0)]), Some(Node::number(1.0)));
    ///
    /// let chain = Node::sequence_of(vec![Node::number(1.0), Node::number(2.0), Node::number(3.0)]);
    /// assert_eq!(chain.map(|c| c.arguments().count()), Some(3));
    /// ```
    #[must_use]
    pub fn sequence_of(nodes: Vec<Self>) -> Option<Self> {
        nodes.into_iter()
             .rev()
             .reduce(|rest, first| Self::sequence(first, rest))
    }

    /// Creates an `if` node; either branch may be absent.
    #[must_use]
    pub fn conditional(condition: Self, then_branch: Option<Self>, else_branch: Option<Self>) -> Self {
        Self::Conditional { condition:   Box::new(condition),
                            then_branch: then_branch.map(Box::new),
                            else_branch: else_branch.map(Box::new), }
    }

    /// Creates a `while` node; the body may be absent.
    #[must_use]
    pub fn while_loop(condition: Self, body: Option<Self>) -> Self {
        Self::Loop { condition: Box::new(condition),
                     body:      body.map(Box::new), }
    }

    /// Creates a builtin call.
    #[must_use]
    pub fn builtin(function: Builtin, operand: Self) -> Self {
        Self::BuiltinCall { function,
                            operand: Box::new(operand) }
    }

    /// Creates a call to the user function defined on `function`.
    #[must_use]
    pub fn call(function: SymbolId, arguments: Option<Self>) -> Self {
        Self::UserCall { function,
                         arguments: arguments.map(Box::new) }
    }

    /// Walks the node as an argument chain.
    ///
    /// Each `Sequence` contributes its left element and continues into its
    /// right element; any other node is the final argument.
    #[must_use]
    pub const fn arguments(&self) -> Arguments<'_> {
        Arguments { next: Some(self) }
    }

    const fn has_children(&self) -> bool {
        !matches!(self, Self::Number(_) | Self::Reference(_))
    }

    /// Moves every child that has children of its own into `detached`,
    /// leaving a leaf in its place.
    fn detach_children(&mut self, detached: &mut Vec<Box<Self>>) {
        fn detach(child: &mut Box<Node>, detached: &mut Vec<Box<Node>>) {
            if child.has_children() {
                detached.push(mem::replace(child, Box::new(Node::Number(0.0))));
            }
        }

        match self {
            Self::Number(_) | Self::Reference(_) => {},
            Self::Assignment { value: child, .. }
            | Self::Unary { operand: child, .. }
            | Self::BuiltinCall { operand: child, .. } => detach(child, detached),
            Self::Binary { left, right, .. }
            | Self::Comparison { left, right, .. }
            | Self::Sequence { first: left,
                               rest: right, } => {
                detach(left, detached);
                detach(right, detached);
            },
            Self::Conditional { condition,
                                then_branch,
                                else_branch, } => {
                detach(condition, detached);
                detached.extend(then_branch.take());
                detached.extend(else_branch.take());
            },
            Self::Loop { condition, body } => {
                detach(condition, detached);
                detached.extend(body.take());
            },
            Self::UserCall { arguments, .. } => detached.extend(arguments.take()),
        }
    }
}

/// Releases the tree without recursing, so a tree of any depth can be dropped.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut child) = pending.pop() {
            child.detach_children(&mut pending);
        }
    }
}

/// Iterator over the elements of a right-linked sequence chain.
///
/// Created by [`Node::arguments`].
#[derive(Debug, Clone)]
pub struct Arguments<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Arguments<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next? {
            Node::Sequence { first, rest } => {
                self.next = Some(rest);
                Some(first)
            },
            last => {
                self.next = None;
                Some(last)
            },
        }
    }
}

/// A user function: the formal parameters and the body they are bound in.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Parameter symbols in declaration order.
    pub params: Vec<SymbolId>,
    /// The body evaluated on each call.
    pub body:   Node,
}

impl FunctionDef {
    /// The number of arguments a call must supply.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A top-level statement as produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression or control-flow statement evaluated for its value.
    Expression {
        /// The statement tree.
        node: Node,
        /// Line number in the source code.
        line: usize,
    },
    /// `let name(params) = body`
    Definition {
        /// The symbol the function is installed on.
        function: SymbolId,
        /// Parameter symbols in declaration order.
        params:   Vec<SymbolId>,
        /// The body; an empty body leaves the function undefined.
        body:     Option<Node>,
        /// Line number in the source code.
        line:     usize,
    },
}

impl Statement {
    /// Gets the line number the statement starts on.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Expression { line, .. } | Self::Definition { line, .. } => *line,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Greater => ">",
            Self::Less => "<",
            Self::NotEqual => "!=",
            Self::Equal => "==",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_chain_yields_elements_in_call_order() {
        let chain = Node::sequence_of(vec![Node::number(1.0),
                                           Node::number(2.0),
                                           Node::number(3.0)]).unwrap();

        let values: Vec<_> = chain.arguments().cloned().collect();
        assert_eq!(values,
                   vec![Node::number(1.0), Node::number(2.0), Node::number(3.0)]);
    }

    #[test]
    fn sequence_chain_is_right_linked() {
        let chain = Node::sequence_of(vec![Node::number(1.0),
                                           Node::number(2.0),
                                           Node::number(3.0)]).unwrap();

        let expected = Node::sequence(Node::number(1.0),
                                      Node::sequence(Node::number(2.0), Node::number(3.0)));
        assert_eq!(chain, expected);
    }

    #[test]
    fn single_node_is_a_single_argument() {
        let node = Node::binary(BinaryOperator::Add, Node::number(1.0), Node::number(2.0));
        assert_eq!(node.arguments().count(), 1);
    }

    #[test]
    fn absent_branches_stay_absent() {
        let node = Node::conditional(Node::number(1.0), None, Some(Node::number(2.0)));
        match &node {
            Node::Conditional { then_branch,
                                else_branch,
                                .. } => {
                assert!(then_branch.is_none());
                assert_eq!(else_branch.as_deref(), Some(&Node::number(2.0)));
            },
            other => panic!("expected a conditional, found {other:?}"),
        }
    }

    #[test]
    fn very_deep_trees_drop_without_overflowing() {
        let mut node = Node::number(1.0);
        for _ in 0..500_000 {
            node = Node::unary(UnaryOperator::Negate, node);
        }
        let mut chain = Node::number(0.0);
        for _ in 0..500_000 {
            chain = Node::sequence(Node::binary(BinaryOperator::Add, Node::number(1.0), Node::number(2.0)),
                                   chain);
        }

        drop(node);
        drop(chain);
    }

    #[test]
    fn operators_display_as_source_text() {
        assert_eq!(BinaryOperator::Pow.to_string(), "^");
        assert_eq!(Comparison::NotEqual.to_string(), "!=");
        assert_eq!(Builtin::Log.to_string(), "log");
    }
}
