//! The three binding families.
//!
//! Each binding owns its invocation record by value and never owns the
//! referenced callable or receiver. All three share the same lifecycle
//! (unbound by default, bound from construction with a target, replaced only
//! as a whole) and the same identity-based equality.

mod const_method;
mod free;
mod method;

pub use self::{const_method::ConstMethodBinding, free::FnBinding, method::MethodBinding};
