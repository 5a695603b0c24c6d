/// Numeric formatting helpers.
///
/// This module renders `f64` results the way the calculator has always printed
/// them: C's `%g` general format with a fixed number of significant digits and
/// a minimum field width. Scripts compare output textually, so the rendering
/// must stay byte-for-byte stable.
pub mod num;
/// Stack growth for deep recursion.
///
/// Parsing and evaluation are recursive; deeply nested input or deep user
/// function recursion runs through [`stack::ensure_sufficient_stack`].
pub mod stack;
