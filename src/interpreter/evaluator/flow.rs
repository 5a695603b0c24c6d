use std::io::Write;

use crate::{
    ast::Node,
    interpreter::evaluator::core::{Context, EvalResult},
};

impl<W: Write> Context<W> {
    /// Evaluates `first` for its side effects, then returns the value of
    /// `rest`.
    pub(crate) fn eval_sequence(&mut self, first: &Node, rest: &Node) -> EvalResult<f64> {
        self.eval(first)?;
        self.eval(rest)
    }

    /// Evaluates an `if` statement.
    ///
    /// A nonzero condition selects the then-branch, zero selects the
    /// else-branch. A missing branch evaluates to `0.0`.
    pub(crate) fn eval_conditional(&mut self,
                                   condition: &Node,
                                   then_branch: Option<&Node>,
                                   else_branch: Option<&Node>)
                                   -> EvalResult<f64> {
        if self.eval(condition)? != 0.0 {
            self.eval_branch(then_branch)
        } else {
            self.eval_branch(else_branch)
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// The condition is re-evaluated before every iteration, so a body that
    /// changes the variables it depends on terminates the loop. The result is
    /// the value of the last body evaluation, or `0.0` if the body never ran.
    ///
    /// A loop without a body is `0.0` and its condition is never evaluated.
    pub(crate) fn eval_loop(&mut self, condition: &Node, body: Option<&Node>) -> EvalResult<f64> {
        let Some(body) = body else {
            return Ok(0.0);
        };

        let mut last = 0.0;
        while self.eval(condition)? != 0.0 {
            last = self.eval(body)?;
        }
        Ok(last)
    }

    fn eval_branch(&mut self, branch: Option<&Node>) -> EvalResult<f64> {
        branch.map_or(Ok(0.0), |node| self.eval(node))
    }
}
