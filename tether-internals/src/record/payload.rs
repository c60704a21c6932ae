//! The opaque target slot of a free-callable record.
//!
//! This module encapsulates the fields of [`Payload`] so they are only
//! visible within the [`record`](crate::record) module tree. This visibility
//! restriction guarantees the safety invariant: **which union field is live
//! is determined solely by the stub installed next to the payload**, because
//! the only code that constructs payloads or installs stubs lives in
//! [`record::free`](crate::record) and always writes the two as a matched
//! pair.

use crate::signature::Signature;

/// Tagged slot holding either a bound free function or the address of a
/// referenced call target. Never both meaningfully at once; the external
/// tag is the stub stored next to it.
pub(super) union Payload<S: Signature> {
    /// A bound free function, live iff the function stub is installed.
    pub(super) func: S,
    /// The address of a referenced call target, live iff one of the closure
    /// stubs is installed. Null in unbound records, where no field is live.
    pub(super) object: *const (),
}

impl<S: Signature> Payload<S> {
    /// Creates the payload of an unbound record.
    pub(super) const fn null() -> Self {
        Self {
            object: core::ptr::null(),
        }
    }

    /// Creates a payload holding a bound free function.
    pub(super) const fn from_function(func: S) -> Self {
        Self { func }
    }

    /// Creates a payload holding the address of a referenced call target.
    pub(super) const fn from_object(object: *const ()) -> Self {
        Self { object }
    }
}

impl<S: Signature> Clone for Payload<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Signature> Copy for Payload<S> {}
