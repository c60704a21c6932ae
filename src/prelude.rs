//! Commonly used items for convenient importing.
//!
//! The prelude re-exports the binding types, the unbound-call condition, and
//! the signature traits, so a single `use` statement covers ordinary usage:
//!
//! ```
//! use tether::prelude::*;
//!
//! fn double(x: i32) -> i32 {
//!     x * 2
//! }
//!
//! let binding = FnBinding::from_function(double as fn(i32) -> i32);
//! assert_eq!(binding.call((21,)), 42);
//! ```

pub use crate::{
    ConstMethodBinding, FnBinding, MethodBinding,
    error::{BindingKind, UnboundCall},
    hooks::{clear_unbound_call_hook, set_unbound_call_hook},
    signature::{CallMut, CallRef, ConstMethodSignature, MethodSignature, Signature},
};
