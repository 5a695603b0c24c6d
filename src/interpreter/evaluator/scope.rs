//! RAII binding of function parameters.
//!
//! Parameters are dynamically scoped: a call overwrites the shared bindings of
//! its parameter symbols and puts the caller's values back afterwards.
//! [`BoundParameters`] holds the saved values and restores them when dropped,
//! so restoration happens on every exit path: a normal return, an error
//! propagated with `?`, or a panic unwinding through the call.

use std::{
    io::Write,
    ops::{Deref, DerefMut},
};

use tracing::trace;

use crate::interpreter::{evaluator::core::Context, symbol_table::SymbolId};

/// Guard over a [`Context`] whose parameter symbols are bound for one call.
///
/// The guard dereferences to the context, so the function body is evaluated
/// through it directly.
pub struct BoundParameters<'ctx, W: Write> {
    context: &'ctx mut Context<W>,
    saved:   Vec<(SymbolId, f64)>,
}

impl<W: Write> Drop for BoundParameters<'_, W> {
    fn drop(&mut self) {
        for (symbol, value) in self.saved.drain(..) {
            trace!(name = self.context.symbols.name(symbol), value, "restoring parameter");
            self.context.symbols.set_value(symbol, value);
        }
    }
}

impl<W: Write> Deref for BoundParameters<'_, W> {
    type Target = Context<W>;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl<W: Write> DerefMut for BoundParameters<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl<W: Write> Context<W> {
    /// Binds each parameter to the matching argument value until the returned
    /// guard is dropped.
    ///
    /// Parameters are saved and overwritten in declaration order. Extra
    /// entries on either side are ignored; callers validate arity first.
    ///
    /// # Example
    /// ```
    /// use dynacalc::interpreter::evaluator::core::Context;
    ///
    /// let mut context = Context::with_output(Vec::new());
    /// let x = context.symbols.get_or_create("x").unwrap();
    /// context.symbols.set_value(x, 1.0);
    ///
    /// {
    ///     let frame = context.bind_parameters(&[x], vec![5.0]);
    ///     assert_eq!(frame.symbols.value(x), 5.0);
    /// }
    /// assert_eq!(context.symbols.value(x), 1.0);
    /// ```
    pub fn bind_parameters(&mut self,
                           params: &[SymbolId],
                           arguments: Vec<f64>)
                           -> BoundParameters<'_, W> {
        let mut saved = Vec::with_capacity(params.len());
        for (&symbol, value) in params.iter().zip(arguments) {
            saved.push((symbol, self.symbols.value(symbol)));
            self.symbols.set_value(symbol, value);
        }
        BoundParameters { context: self,
                          saved }
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use crate::interpreter::evaluator::core::Context;

    #[test]
    fn values_are_restored_when_the_guard_drops() {
        let mut context = Context::with_output(Vec::new());
        let a = context.symbols.get_or_create("a").unwrap();
        let b = context.symbols.get_or_create("b").unwrap();
        context.symbols.set_value(a, 1.0);
        context.symbols.set_value(b, 2.0);

        {
            let mut frame = context.bind_parameters(&[a, b], vec![10.0, 20.0]);
            assert_eq!(frame.symbols.value(a), 10.0);
            assert_eq!(frame.symbols.value(b), 20.0);
            frame.symbols.set_value(a, 99.0);
        }

        assert_eq!(context.symbols.value(a), 1.0);
        assert_eq!(context.symbols.value(b), 2.0);
    }

    #[test]
    fn nested_frames_unwind_in_order() {
        let mut context = Context::with_output(Vec::new());
        let n = context.symbols.get_or_create("n").unwrap();

        {
            let mut outer = context.bind_parameters(&[n], vec![3.0]);
            {
                let inner = outer.bind_parameters(&[n], vec![2.0]);
                assert_eq!(inner.symbols.value(n), 2.0);
            }
            assert_eq!(outer.symbols.value(n), 3.0);
        }
        assert_eq!(context.symbols.value(n), 0.0);
    }

    fn failing_body() {
        panic!("body failed");
    }

    #[test]
    fn values_are_restored_during_unwinding() {
        let mut context = Context::with_output(Vec::new());
        let x = context.symbols.get_or_create("x").unwrap();
        context.symbols.set_value(x, 7.0);

        let result = catch_unwind(AssertUnwindSafe(|| {
                         let _frame = context.bind_parameters(&[x], vec![0.0]);
                         failing_body();
                     }));

        assert!(result.is_err());
        assert_eq!(context.symbols.value(x), 7.0);
    }
}
