use std::io::Write;

use tracing::debug;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        symbol_table::SymbolId,
    },
};

impl<W: Write> Context<W> {
    /// Calls the user function defined on `function`.
    ///
    /// The call proceeds in a fixed order:
    /// 1. The symbol must carry a definition.
    /// 2. The argument chain must have exactly as many elements as the
    ///    function has parameters. Nothing is evaluated if it does not.
    /// 3. Every argument is evaluated, left to right, before any parameter is
    ///    rebound, so no argument observes a half-bound call.
    /// 4. The parameters are bound and the body evaluated.
    /// 5. The caller's parameter values are restored, whether the body
    ///    succeeded or failed.
    ///
    /// # Errors
    /// - [`RuntimeError::UndefinedFunction`] if nothing is defined on the
    ///   symbol.
    /// - [`RuntimeError::ArityMismatch`] for too few or too many arguments.
    /// - Any error raised by an argument or the body.
    pub(crate) fn call_user(&mut self,
                            function: SymbolId,
                            arguments: Option<&Node>)
                            -> EvalResult<f64> {
        let name = self.symbols.name(function);
        let definition =
            self.symbols
                .function(function)
                .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.to_string(),
                                                                 line: self.line(), })?;

        let supplied = arguments.map_or(0, |chain| chain.arguments().count());
        if supplied != definition.arity() {
            return Err(RuntimeError::ArityMismatch { name:     name.to_string(),
                                                     expected: definition.arity(),
                                                     found:    supplied,
                                                     line:     self.line(), });
        }

        debug!(name, arity = supplied, "calling user function");
        let values = arguments.into_iter()
                              .flat_map(Node::arguments)
                              .map(|argument| self.eval(argument))
                              .collect::<EvalResult<Vec<_>>>()?;

        let mut frame = self.bind_parameters(&definition.params, values);
        frame.eval(&definition.body)
    }
}
