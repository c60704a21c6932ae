//! Free-callable invocation records and their stub trampolines.
//!
//! This module encapsulates the fields of [`FreeRecord`], ensuring they are
//! only visible within this file and [`payload`](super::payload). This
//! visibility restriction guarantees the safety invariant: **the installed
//! stub always agrees with the live payload field and, for the closure
//! stubs, with the concrete closure type behind the stored address**.
//!
//! # Safety Invariant
//!
//! The invariant is maintained because a stub is only ever written together
//! with the payload it expects, by exactly one of the constructors below,
//! and a record can only be replaced as a whole. What the constructors
//! cannot guarantee — that a referenced closure outlives every dispatch, and
//! that exclusively-bound closures stay unaliased during a call — is pushed
//! to the caller as documented `# Safety` obligations, which the public
//! `tether` crate discharges with a lifetime parameter on its wrapper type.

use core::ptr::NonNull;

use crate::{
    record::payload::Payload,
    signature::{CallMut, CallRef, Signature},
};

/// The stub type of a free-callable record: a trampoline that reinterprets
/// the record's payload and performs the actual call.
pub type FreeStub<S> =
    unsafe fn(&FreeRecord<S>, <S as Signature>::Args) -> <S as Signature>::Ret;

/// Invocation record for free functions, closures, and functors.
///
/// A fixed-size `Copy` value. Copies are independent records that reference
/// the *same* external target when one was bound; copying never copies the
/// referent.
#[derive(Clone, Copy)]
pub struct FreeRecord<S: Signature> {
    /// The opaque target slot.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long
    /// as this struct exists:
    ///
    /// 1. If `stub` is the function stub, `payload.func` is live and holds
    ///    the bound function.
    /// 2. If `stub` is a closure stub instantiated for some closure type
    ///    `C`, `payload.object` is live and holds the address of a `C`.
    /// 3. If `stub` is `None`, no payload field is live.
    payload: Payload<S>,
    /// The trampoline for the bound target kind; `None` iff unbound.
    stub: Option<FreeStub<S>>,
}

impl<S: Signature> FreeRecord<S> {
    /// Creates an unbound record.
    pub const fn unbound() -> Self {
        Self {
            payload: Payload::null(),
            stub: None,
        }
    }

    /// Creates a record bound to a free function.
    ///
    /// The function pointer is stored by value, so the record has no
    /// lifetime dependency.
    pub fn from_function(function: S) -> Self {
        Self {
            payload: Payload::from_function(function),
            stub: Some(function_stub::<S>),
        }
    }

    /// Creates a record bound to the address of a closure or functor that
    /// will be invoked through a shared reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The referent stays live for as long as this record, or any copy of
    ///    it, can dispatch.
    pub unsafe fn from_closure_ref<C: CallRef<S>>(closure: NonNull<C>) -> Self {
        Self {
            payload: Payload::from_object(closure.as_ptr().cast_const().cast::<()>()),
            stub: Some(closure_ref_stub::<S, C>),
        }
    }

    /// Creates a record bound to the address of a closure or functor that
    /// will be invoked through an exclusive reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The referent stays live for as long as this record, or any copy of
    ///    it, can dispatch.
    /// 2. `closure` was derived from an exclusive reference, and no other
    ///    access to the referent occurs while a dispatch is in progress —
    ///    including reentrant dispatch through a copy of this record from
    ///    within the closure itself.
    pub unsafe fn from_closure_mut<C: CallMut<S>>(closure: NonNull<C>) -> Self {
        Self {
            payload: Payload::from_object(closure.as_ptr().cast_const().cast::<()>()),
            stub: Some(closure_mut_stub::<S, C>),
        }
    }

    /// Returns `true` if the record is bound.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.stub.is_some()
    }

    /// Dispatches through the installed stub.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The record is bound.
    /// 2. The obligations given to the constructor that bound this record
    ///    still hold: for closure bindings the referent is live, and for
    ///    exclusive bindings it is also unaliased for the duration of the
    ///    call.
    #[inline]
    pub unsafe fn dispatch(&self, args: S::Args) -> S::Ret {
        // SAFETY: The record is bound (caller contract), so a stub is
        // installed.
        let stub = unsafe { self.stub.unwrap_unchecked() };
        // SAFETY: The stub was installed together with the payload variant it
        // expects (module invariant), and the liveness and aliasing
        // obligations are guaranteed by the caller.
        unsafe { stub(self, args) }
    }
}

impl<S: Signature> PartialEq for FreeRecord<S> {
    // Function pointers compare by value on purpose: identity-based equality
    // is this type's contract. The compiler may merge or duplicate
    // monomorphized functions across codegen units, a caveat the original
    // design has at link level as well.
    #[allow(unpredictable_function_pointer_comparisons)]
    fn eq(&self, other: &Self) -> bool {
        match (self.stub, other.stub) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) if lhs == rhs => {
                if lhs == function_stub::<S> as FreeStub<S> {
                    // SAFETY: Both records carry the function stub, so both
                    // payloads hold the `func` field (module invariant).
                    let lhs_func = unsafe { self.payload.func };
                    // SAFETY: As above.
                    let rhs_func = unsafe { other.payload.func };
                    lhs_func == rhs_func
                } else {
                    // SAFETY: A shared non-function stub is one of the
                    // closure stubs, so both payloads hold the `object`
                    // field (module invariant).
                    let lhs_object = unsafe { self.payload.object };
                    // SAFETY: As above.
                    let rhs_object = unsafe { other.payload.object };
                    core::ptr::eq(lhs_object, rhs_object)
                }
            }
            _ => false,
        }
    }
}

impl<S: Signature> Eq for FreeRecord<S> {}

/// Trampoline for a bound free function.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. This stub was installed by [`FreeRecord::from_function`], so the
///    record's payload holds the `func` field.
unsafe fn function_stub<S: Signature>(record: &FreeRecord<S>, args: S::Args) -> S::Ret {
    // SAFETY: The payload holds the `func` field, as guaranteed by the
    // caller.
    let function = unsafe { record.payload.func };
    function.invoke(args)
}

/// Trampoline for a closure or functor bound by shared reference.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. This stub was installed by [`FreeRecord::from_closure_ref`]
///    instantiated with the same closure type `C`, so the record's payload
///    holds the address of a `C`.
/// 2. The referent is still live.
unsafe fn closure_ref_stub<S: Signature, C: CallRef<S>>(
    record: &FreeRecord<S>,
    args: S::Args,
) -> S::Ret {
    // SAFETY: The payload holds the `object` field, as guaranteed by the
    // caller.
    let object = unsafe { record.payload.object };
    // SAFETY: The address points to a live `C` (caller contract), and shared
    // access is always possible because this stub is only installed for
    // shared-reference bindings.
    let closure = unsafe { &*object.cast::<C>() };
    closure.call_by_ref(args)
}

/// Trampoline for a closure or functor bound by exclusive reference.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. This stub was installed by [`FreeRecord::from_closure_mut`]
///    instantiated with the same closure type `C`, so the record's payload
///    holds the address of a `C`.
/// 2. The referent is still live and unaliased for the duration of this
///    call.
unsafe fn closure_mut_stub<S: Signature, C: CallMut<S>>(
    record: &FreeRecord<S>,
    args: S::Args,
) -> S::Ret {
    // SAFETY: The payload holds the `object` field, as guaranteed by the
    // caller.
    let object = unsafe { record.payload.object };
    let object = object.cast::<C>().cast_mut();
    // SAFETY: The address was derived from an exclusive reference at
    // construction, and the caller guarantees the referent is live and
    // unaliased for the duration of this call.
    let closure = unsafe { &mut *object };
    closure.call_by_mut(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32) -> i32 {
        x * x
    }

    fn cube(x: i32) -> i32 {
        x * x * x
    }

    #[test]
    fn test_unbound_records_compare_equal() {
        let a = FreeRecord::<fn(i32) -> i32>::unbound();
        let b = FreeRecord::<fn(i32) -> i32>::unbound();
        assert!(!a.is_bound());
        assert_eq!(a, b);
    }

    #[test]
    fn test_function_records_compare_by_pointer_value() {
        let a = FreeRecord::from_function(square as fn(i32) -> i32);
        let b = FreeRecord::from_function(square as fn(i32) -> i32);
        let c = FreeRecord::from_function(cube as fn(i32) -> i32);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, FreeRecord::unbound());
    }

    #[test]
    fn test_closure_records_compare_by_address() {
        let double = |x: i32| x * 2;
        let double_again = |x: i32| x * 2;

        // SAFETY: The referents outlive the records.
        let a: FreeRecord<fn(i32) -> i32> =
            unsafe { FreeRecord::from_closure_ref(NonNull::from(&double)) };
        // SAFETY: As above.
        let b: FreeRecord<fn(i32) -> i32> =
            unsafe { FreeRecord::from_closure_ref(NonNull::from(&double)) };
        // SAFETY: As above.
        let c: FreeRecord<fn(i32) -> i32> =
            unsafe { FreeRecord::from_closure_ref(NonNull::from(&double_again)) };

        assert_eq!(a, b);
        // Behaviorally identical, but a distinct instance: unequal.
        assert_ne!(a, c);
    }

    #[test]
    fn test_function_and_closure_records_are_unequal() {
        let functionish = |x: i32| x * x;
        let function_record = FreeRecord::from_function(square as fn(i32) -> i32);
        // SAFETY: The referent outlives the record.
        let closure_record: FreeRecord<fn(i32) -> i32> =
            unsafe { FreeRecord::from_closure_ref(NonNull::from(&functionish)) };
        assert_ne!(function_record, closure_record);
    }

    #[test]
    fn test_dispatch_function() {
        let record = FreeRecord::from_function(square as fn(i32) -> i32);
        assert!(record.is_bound());
        // SAFETY: The record is bound to a self-contained function pointer.
        assert_eq!(unsafe { record.dispatch((4,)) }, 16);
    }

    #[test]
    fn test_dispatch_closure_mut_mutates_referent() {
        let mut total = 0_u32;
        let mut accumulate = |n: u32| {
            total += n;
            total
        };
        // SAFETY: The referent outlives the record, was derived from an
        // exclusive reference, and is only accessed through the record below.
        let record: FreeRecord<fn(u32) -> u32> =
            unsafe { FreeRecord::from_closure_mut(NonNull::from(&mut accumulate)) };
        // SAFETY: Bound, live, and unaliased (the closure does not reenter).
        assert_eq!(unsafe { record.dispatch((5,)) }, 5);
        // SAFETY: As above.
        assert_eq!(unsafe { record.dispatch((7,)) }, 12);
    }

    #[test]
    fn test_copied_record_references_same_target() {
        let tripler = |x: i32| x * 3;
        // SAFETY: The referent outlives both copies of the record.
        let record: FreeRecord<fn(i32) -> i32> =
            unsafe { FreeRecord::from_closure_ref(NonNull::from(&tripler)) };
        let copy = record;
        assert_eq!(record, copy);
        // SAFETY: Bound and live.
        assert_eq!(unsafe { copy.dispatch((3,)) }, 9);
    }

    #[test]
    fn test_record_size() {
        assert_eq!(
            core::mem::size_of::<FreeRecord<fn(i32) -> i32>>(),
            2 * core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<FreeRecord<fn() -> ()>>(),
            2 * core::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_send_sync() {
        static_assertions::assert_not_impl_any!(FreeRecord<fn() -> ()>: Send, Sync);
    }
}
