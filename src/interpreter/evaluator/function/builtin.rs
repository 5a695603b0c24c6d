use std::io::Write;

use crate::{
    ast::{Builtin, Node},
    interpreter::evaluator::core::{Context, EvalResult},
};

impl Builtin {
    /// Applies a pure builtin to its evaluated operand.
    ///
    /// Returns `None` for [`Builtin::Print`], which needs the context's output.
    ///
    /// # Example
    /// ```
    /// use dynacalc::ast::Builtin;
    ///
    /// assert_eq!(Builtin::Sqrt.apply(9.0), Some(3.0));
    /// assert_eq!(Builtin::Log.apply(1.0), Some(0.0));
    /// assert_eq!(Builtin::Print.apply(1.0), None);
    /// ```
    #[must_use]
    pub fn apply(self, value: f64) -> Option<f64> {
        match self {
            Self::Sqrt => Some(value.sqrt()),
            Self::Exp => Some(value.exp()),
            Self::Log => Some(value.ln()),
            Self::Print => None,
        }
    }
}

impl<W: Write> Context<W> {
    /// Evaluates the operand and applies `function` to it.
    ///
    /// Domain errors follow IEEE-754: `sqrt(-1)` is NaN and `log(0)` is
    /// negative infinity.
    pub(crate) fn call_builtin(&mut self, function: Builtin, operand: &Node) -> EvalResult<f64> {
        let value = self.eval(operand)?;
        match function.apply(value) {
            Some(result) => Ok(result),
            None => self.print(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Builtin;

    #[test]
    fn domain_errors_are_not_errors() {
        assert!(Builtin::Sqrt.apply(-1.0).unwrap().is_nan());
        assert_eq!(Builtin::Log.apply(0.0), Some(f64::NEG_INFINITY));
        assert_eq!(Builtin::Exp.apply(f64::NEG_INFINITY), Some(0.0));
    }
}
