use std::io::Write;

use crate::{
    ast::{Comparison, Node},
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Comparison {
    /// Tests the comparison on two evaluated operands.
    ///
    /// Any comparison involving NaN is false except `!=`.
    #[must_use]
    pub fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Self::Greater => left > right,
            Self::Less => left < right,
            Self::NotEqual => left != right,
            Self::Equal => left == right,
            Self::GreaterEqual => left >= right,
            Self::LessEqual => left <= right,
        }
    }
}

impl<W: Write> Context<W> {
    /// Evaluates both operands, left first, and returns `1.0` if the
    /// comparison holds or `0.0` if it does not.
    pub(crate) fn eval_comparison(&mut self,
                                  op: Comparison,
                                  left: &Node,
                                  right: &Node)
                                  -> EvalResult<f64> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        Ok(if op.holds(left, right) { 1.0 } else { 0.0 })
    }
}
