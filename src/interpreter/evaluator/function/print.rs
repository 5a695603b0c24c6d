use std::io::Write;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::{Context, EvalResult},
    util::num::format_result,
};

impl<W: Write> Context<W> {
    /// Writes `" = "` followed by the value and a newline, then returns the
    /// value unchanged so `print` composes inside larger expressions.
    ///
    /// The value is rendered like C's `%4.4g`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::Output`] if the writer fails.
    ///
    /// # Example
    /// ```
    /// use dynacalc::interpreter::evaluator::core::Context;
    ///
    /// let mut context = Context::with_output(Vec::new());
    /// assert_eq!(context.print(1.0 / 3.0).unwrap(), 1.0 / 3.0);
    /// assert_eq!(context.output().as_slice(), b" = 0.3333\n");
    /// ```
    pub fn print(&mut self, value: f64) -> EvalResult<f64> {
        self.write_line(format_args!(" = {}", format_result(value)))?;
        Ok(value)
    }

    /// Writes one line of text to the output.
    ///
    /// # Errors
    /// Returns [`RuntimeError::Output`] if the writer fails.
    pub fn write_line(&mut self, text: std::fmt::Arguments<'_>) -> EvalResult<()> {
        let line = self.line();
        writeln!(self.output_mut(), "{text}").map_err(|source| RuntimeError::Output { source,
                                                                                       line })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use crate::{error::RuntimeError, interpreter::evaluator::core::Context};

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn print_uses_the_fixed_width_format() {
        let mut context = Context::with_output(Vec::new());
        context.print(7.0).unwrap();
        context.print(3_628_800.0).unwrap();

        assert_eq!(String::from_utf8(context.into_output()).unwrap(),
                   " =    7\n = 3.629e+06\n");
    }

    #[test]
    fn broken_output_is_fatal() {
        let mut context = Context::with_output(Broken);
        context.set_line(4);

        let err = context.print(1.0).unwrap_err();
        assert!(matches!(err, RuntimeError::Output { line: 4, .. }));
        assert!(err.is_fatal());
    }
}
