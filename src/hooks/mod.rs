//! Injectable policy for the unbound-call condition.
//!
//! When a direct `call` is made on an unbound binding, the resulting
//! [`UnboundCall`] condition is first handed to a process-global observer
//! installed here, and the call then panics — a checked call cannot produce
//! a return value for a binding with no target. The observer is the policy
//! point:
//!
//! - **Log**: install an observer that forwards the condition to your
//!   logging or diagnostics facility; the panic still follows. With the
//!   `log` feature enabled and no observer installed, the condition is
//!   emitted through `log::error!` instead.
//! - **Halt**: install an observer that aborts the process on targets where
//!   unwinding is unacceptable.
//! - **Raise**: skip the facility entirely by using the `try_call`,
//!   `call_if`, `call_or`, or `call_or_else` forms, which never report and
//!   never panic.
//!
//! The observer is a plain `fn` pointer, so installing one allocates
//! nothing.
//!
//! # Quick Start
//!
//! ```
//! use tether::{UnboundCall, hooks};
//!
//! fn observe(_condition: &UnboundCall) {
//!     // Forward to a logger, record a metric, or halt.
//! }
//!
//! let previous = hooks::set_unbound_call_hook(observe);
//! assert!(previous.is_none());
//! # hooks::clear_unbound_call_hook();
//! ```

mod hook_lock;

use self::hook_lock::HookLock;
use crate::error::UnboundCall;

/// Observer invoked with the condition before an unbound direct call
/// panics.
pub type UnboundCallHook = fn(&UnboundCall);

/// The process-global observer slot.
static UNBOUND_CALL_HOOK: HookLock<UnboundCallHook> = HookLock::new();

/// Installs the process-global unbound-call observer, returning the
/// previously installed one, if any.
///
/// The observer runs on whichever thread made the failing call, before the
/// panic unwinds. It is not invoked by the `try_call`/`call_if`/`call_or`
/// families, which report through their return value instead.
pub fn set_unbound_call_hook(hook: UnboundCallHook) -> Option<UnboundCallHook> {
    UNBOUND_CALL_HOOK.replace(hook)
}

/// Removes the process-global unbound-call observer, returning it, if any
/// was installed.
pub fn clear_unbound_call_hook() -> Option<UnboundCallHook> {
    UNBOUND_CALL_HOOK.take()
}

/// Reports `condition` to the installed observer, then panics.
///
/// The observer is read and released before it runs, so an observer may
/// itself install or clear hooks without deadlocking.
#[track_caller]
pub(crate) fn raise_unbound_call(condition: UnboundCall) -> ! {
    match UNBOUND_CALL_HOOK.get() {
        Some(hook) => hook(&condition),
        None => {
            #[cfg(feature = "log")]
            log::error!("{condition}");
        }
    }
    panic!("{condition}");
}
