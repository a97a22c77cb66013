//! Stack growth for deeply nested type trees.
//!
//! Front-end type nodes are arbitrarily deep (`int ********p`, function
//! pointers returning function pointers, typedef chains). The translator and
//! the layout/rendering walks recurse once per level, so every recursive step
//! goes through [`with_stack`], which grows the stack on demand.
//!
//! - **Red zone**: 64KB. If less than this remains, the stack is grown.
//! - **Growth size**: 1MB per growth.

const RED_ZONE: usize = 64 * 1024;

const GROWTH: usize = 1024 * 1024;

/// Run `f`, growing the stack first if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn with_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
