use std::io::Write;

use crate::{
    ast::{Node, UnaryOperator},
    interpreter::evaluator::core::{Context, EvalResult},
};

impl UnaryOperator {
    /// Applies the operator to an evaluated operand.
    ///
    /// # Example
    /// ```
    /// use dynacalc::ast::UnaryOperator;
    ///
    /// assert_eq!(UnaryOperator::Negate.apply(5.0), -5.0);
    /// assert_eq!(UnaryOperator::Abs.apply(-5.0), 5.0);
    /// ```
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Negate => -value,
            Self::Abs => value.abs(),
        }
    }
}

impl<W: Write> Context<W> {
    pub(crate) fn eval_unary_op(&mut self, op: UnaryOperator, operand: &Node) -> EvalResult<f64> {
        let value = self.eval(operand)?;
        Ok(op.apply(value))
    }
}
