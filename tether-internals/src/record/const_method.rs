//! Shared-receiver invocation records.
//!
//! The `&`-receiver mirror of [`method`](super::method); see that module for
//! the encapsulation invariant. Everything here is safe for the same reason:
//! the bound function pointer is self-contained and the receiver is supplied
//! per call.

use crate::signature::ConstMethodSignature;

/// The stub type of a shared-receiver record: a trampoline that applies the
/// bound function pointer to a receiver and an argument tuple.
pub type ConstMethodStub<S> = fn(
    S,
    &<S as ConstMethodSignature>::Receiver,
    <S as ConstMethodSignature>::Args,
) -> <S as ConstMethodSignature>::Ret;

/// Invocation record for receiver-taking functions invoked through `&`.
///
/// A fixed-size `Copy` value with no lifetime dependency.
#[derive(Clone, Copy)]
pub struct ConstMethodRecord<S: ConstMethodSignature> {
    /// The bound receiver-taking function pointer; `Some` iff `stub` is.
    method: Option<S>,
    /// The trampoline for the bound target; `None` iff unbound.
    stub: Option<ConstMethodStub<S>>,
}

impl<S: ConstMethodSignature> ConstMethodRecord<S> {
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
            stub: Some(const_method_stub::<S>),
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
    pub fn get(&self) -> Option<(S, ConstMethodStub<S>)> {
        match (self.method, self.stub) {
            (Some(method), Some(stub)) => Some((method, stub)),
            _ => None,
        }
    }
}

impl<S: ConstMethodSignature> PartialEq for ConstMethodRecord<S> {
    // Function pointers compare by value on purpose: identity-based equality
    // is this type's contract.
    #[allow(unpredictable_function_pointer_comparisons)]
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method && self.stub == other.stub
    }
}

impl<S: ConstMethodSignature> Eq for ConstMethodRecord<S> {}

/// Trampoline for a bound receiver-taking function.
fn const_method_stub<S: ConstMethodSignature>(
    method: S,
    receiver: &S::Receiver,
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
        fn level(&self) -> i32 {
            self.level
        }

        fn headroom(&self, max: i32) -> i32 {
            max - self.level
        }
    }

    #[test]
    fn test_unbound_record() {
        let record = ConstMethodRecord::<fn(&Gauge) -> i32>::unbound();
        assert!(!record.is_bound());
        assert!(record.get().is_none());
    }

    #[test]
    fn test_bound_record_dispatches() {
        let record = ConstMethodRecord::from_method(Gauge::headroom as fn(&Gauge, i32) -> i32);
        let gauge = Gauge { level: 30 };
        let (method, stub) = record.get().expect("record is bound");
        assert_eq!(stub(method, &gauge, (100,)), 70);
    }

    #[test]
    fn test_equality_compares_method_pointer() {
        let level_a = ConstMethodRecord::from_method(Gauge::level as fn(&Gauge) -> i32);
        let level_b = ConstMethodRecord::from_method(Gauge::level as fn(&Gauge) -> i32);
        assert_eq!(level_a, level_b);
        assert_ne!(level_a, ConstMethodRecord::unbound());
    }

    #[test]
    fn test_send_sync() {
        static_assertions::assert_impl_all!(ConstMethodRecord<fn(&Gauge) -> i32>: Send, Sync);
    }
}
