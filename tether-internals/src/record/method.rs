//! Mutable-receiver invocation records.
//!
//! This module encapsulates the fields of [`MethodRecord`]. The invariant —
//! **the bound function pointer and the stub are always both present or both
//! absent** — is locally verifiable because the two fields are only written
//! by the constructors in this file, always as a matched pair.
//!
//! Unlike [`FreeRecord`](super::FreeRecord), no unsafe code is needed here:
//! a receiver-taking function pointer is self-contained, so there is no
//! address to erase and no liveness obligation to track. The receiver is
//! supplied per call and is never part of the record.

use crate::signature::MethodSignature;

/// The stub type of a mutable-receiver record: a trampoline that applies the
/// bound function pointer to a receiver and an argument tuple.
pub type MethodStub<S> = fn(
    S,
    &mut <S as MethodSignature>::Receiver,
    <S as MethodSignature>::Args,
) -> <S as MethodSignature>::Ret;

/// Invocation record for receiver-taking functions invoked through `&mut`.
///
/// A fixed-size `Copy` value with no lifetime dependency.
#[derive(Clone, Copy)]
pub struct MethodRecord<S: MethodSignature> {
    /// The bound receiver-taking function pointer; `Some` iff `stub` is.
    method: Option<S>,
    /// The trampoline for the bound target; `None` iff unbound.
    stub: Option<MethodStub<S>>,
}

impl<S: MethodSignature> MethodRecord<S> {
    /// Creates an unbound record.
    pub const fn unbound() -> Self {
        Self {
            method: None,
            stub: None,
        }
    }

    /// Creates a record bound to a receiver-taking function.
    pub fn from_method(method: S) -> Self {
        Self {
            method: Some(method),
            stub: Some(method_stub::<S>),
        }
    }

    /// Returns `true` if the record is bound.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.stub.is_some()
    }

    /// Returns the bound function pointer and its stub, or `None` if the
    /// record is unbound.
    #[inline]
    pub fn get(&self) -> Option<(S, MethodStub<S>)> {
        match (self.method, self.stub) {
            (Some(method), Some(stub)) => Some((method, stub)),
            _ => None,
        }
    }
}

impl<S: MethodSignature> PartialEq for MethodRecord<S> {
    // Function pointers compare by value on purpose: identity-based equality
    // is this type's contract.
    #[allow(unpredictable_function_pointer_comparisons)]
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method && self.stub == other.stub
    }
}

impl<S: MethodSignature> Eq for MethodRecord<S> {}

/// Trampoline for a bound receiver-taking function.
fn method_stub<S: MethodSignature>(
    method: S,
    receiver: &mut S::Receiver,
    args: S::Args,
) -> S::Ret {
    method.invoke(receiver, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gauge {
        level: i32,
    }

    impl Gauge {
        fn raise(&mut self, by: i32) -> i32 {
            self.level += by;
            self.level
        }

        fn lower(&mut self, by: i32) -> i32 {
            self.level -= by;
            self.level
        }
    }

    #[test]
    fn test_unbound_record() {
        let record = MethodRecord::<fn(&mut Gauge, i32) -> i32>::unbound();
        assert!(!record.is_bound());
        assert!(record.get().is_none());
    }

    #[test]
    fn test_bound_record_dispatches() {
        let record = MethodRecord::from_method(Gauge::raise as fn(&mut Gauge, i32) -> i32);
        assert!(record.is_bound());

        let mut gauge = Gauge { level: 10 };
        let (method, stub) = record.get().expect("record is bound");
        assert_eq!(stub(method, &mut gauge, (5,)), 15);
        assert_eq!(gauge.level, 15);
    }

    #[test]
    fn test_equality_compares_method_pointer() {
        let raise_a = MethodRecord::from_method(Gauge::raise as fn(&mut Gauge, i32) -> i32);
        let raise_b = MethodRecord::from_method(Gauge::raise as fn(&mut Gauge, i32) -> i32);
        let lower = MethodRecord::from_method(Gauge::lower as fn(&mut Gauge, i32) -> i32);

        assert_eq!(raise_a, raise_b);
        assert_ne!(raise_a, lower);
        assert_ne!(raise_a, MethodRecord::unbound());
        assert_eq!(MethodRecord::<fn(&mut Gauge, i32) -> i32>::unbound(), MethodRecord::unbound());
    }

    #[test]
    fn test_record_size() {
        assert_eq!(
            core::mem::size_of::<MethodRecord<fn(&mut Gauge, i32) -> i32>>(),
            2 * core::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_send_sync() {
        static_assertions::assert_impl_all!(MethodRecord<fn(&mut Gauge, i32) -> i32>: Send, Sync);
    }
}
