//! Stack growth for recursive descent over deeply nested templates.
//!
//! Parsing, evaluation and printing all recurse over the syntax tree, and a
//! template author controls how deep that tree gets. Recursive entry points
//! wrap their bodies in [`ensure_sufficient_stack`], which switches to a
//! freshly allocated stack segment when the current one runs low.
//!
//! On `wasm32` the call is a plain passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn eval_node(&mut self, id: NodeId) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_node_inner(id))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
