use std::io::Write;

use crate::{
    ast::{BinaryOperator, Node},
    interpreter::evaluator::core::{Context, EvalResult},
};

impl BinaryOperator {
    /// Applies the operator to two evaluated operands.
    ///
    /// Division by zero is not an error: it yields an infinity or NaN exactly
    /// as IEEE-754 prescribes.
    ///
    /// # Example
    /// ```
    /// use dynacalc::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Sub.apply(2.0, 5.0), -3.0);
    /// assert_eq!(BinaryOperator::Div.apply(-1.0, 0.0), f64::NEG_INFINITY);
    /// assert_eq!(BinaryOperator::Pow.apply(9.0, 0.5), 3.0);
    /// ```
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Pow => left.powf(right),
        }
    }
}

impl<W: Write> Context<W> {
    /// Evaluates both operands, left first, and combines them with `op`.
    pub(crate) fn eval_binary_op(&mut self,
                                 op: BinaryOperator,
                                 left: &Node,
                                 right: &Node)
                                 -> EvalResult<f64> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        Ok(op.apply(left, right))
    }
}
