//! Stack safety for the recursive parser and evaluator.
//!
//! A user function recursing a hundred thousand levels, or a line nested as
//! deeply in parentheses, would overflow the native stack. Wrapping each
//! recursive step in [`ensure_sufficient_stack`] moves the rest of the
//! recursion onto a freshly allocated segment when the current one runs low.

/// Runs `f`, first growing the stack if less than the red zone remains.
///
/// # Example
/// ```
/// use dynacalc::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u64) -> u64 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(200_000), 200_000);
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
