//! Bootstrap constants

/// Exit code reported by action-shaped handlers that return nothing
pub const HANDLED_EXIT_CODE: i32 = 0;

/// Exit code for an error that reached the top-level caller
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Fallback text when a panic payload is neither `&str` nor `String`
pub const OPAQUE_PANIC_MESSAGE: &str = "panic with a non-string payload";
