//! Guarded invocation of third-party callbacks.
//!
//! Plugin code runs inside the host's frame loop. A panicking click handler
//! or visibility predicate must not take down layout or drawing of other
//! buttons, so every plugin callback goes through [`invoke_guarded`].

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::logging::targets;

/// Run `f`, catching any panic.
///
/// On panic the payload is logged at `error` level together with the
/// command's full id and a short description of the callback, and `None`
/// is returned.
///
/// # Example
///
/// ```
/// use horizon_dock_core::guard::invoke_guarded;
///
/// assert_eq!(invoke_guarded("mod.button", "predicate", || 7), Some(7));
/// ```
pub fn invoke_guarded<R>(full_id: &str, what: &str, f: impl FnOnce() -> R) -> Option<R> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(
                target: targets::GUARD,
                command = full_id,
                callback = what,
                "plugin callback panicked: {message}"
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
