//! Stack guard for deep structural recursion.
//!
//! Unification walks patterns and values recursively, one native frame per
//! nesting level. Client-built values (syntax trees in particular) can nest
//! far deeper than a default thread stack allows, so every recursive step of
//! the unifier runs inside [`ensure_sufficient_stack`].
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: passthrough.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is inside the red zone.
///
/// ```text
/// fn depth(v: &Value) -> usize {
///     ensure_sufficient_stack(|| match v.children() {
///         Some(cs) => 1 + cs.iter().map(depth).max().unwrap_or(0),
///         None => 0,
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
