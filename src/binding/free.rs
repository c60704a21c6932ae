//! Bindings for free functions, closures, and functors.

use core::{fmt, marker::PhantomData, ptr::NonNull};

use tether_internals::{
    FreeRecord,
    signature::{CallMut, CallRef, Signature},
};

use crate::{
    error::{BindingKind, UnboundCall},
    hooks,
};

/// Non-owning binding to a free function, closure, or functor with signature
/// `S`.
///
/// Functions are stored by value and have no lifetime dependency; closures
/// and functors are referenced, and the lifetime parameter `'a` keeps the
/// referent borrowed for as long as the binding (or any copy of it) lives.
/// The binding is a fixed-size `Copy` value and never allocates.
///
/// Equality is identity-based: function bindings compare by
/// function-pointer value, closure bindings by the referent's address. See
/// the [crate docs](crate) for the full rules.
///
/// # Examples
///
/// ```
/// use tether::FnBinding;
///
/// fn square(x: i32) -> i32 {
///     x * x
/// }
///
/// let binding = FnBinding::from_function(square as fn(i32) -> i32);
/// assert!(binding.is_bound());
/// assert_eq!(binding.call((4,)), 16);
///
/// let offset = 10;
/// let add = move |x: i32| x + offset;
/// let binding: FnBinding<fn(i32) -> i32> = FnBinding::from_closure(&add);
/// assert_eq!(binding.call((5,)), 15);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FnBinding<'a, S: Signature> {
    /// The invocation record.
    record: FreeRecord<S>,
    /// Marks the borrow of a referenced closure; function bindings leave it
    /// unconstrained.
    _referent: PhantomData<&'a ()>,
}

impl<'a, S: Signature> FnBinding<'a, S> {
    /// Creates an unbound binding.
    #[must_use]
    pub const fn unbound() -> Self {
        Self {
            record: FreeRecord::unbound(),
            _referent: PhantomData,
        }
    }

    /// Creates a binding to a free function.
    ///
    /// The function pointer is stored by value, so the binding is
    /// self-contained.
    #[must_use]
    pub fn from_function(function: S) -> Self {
        Self {
            record: FreeRecord::from_function(function),
            _referent: PhantomData,
        }
    }

    /// Creates a binding to a closure or functor invoked through a shared
    /// reference.
    ///
    /// Only the address is stored; the referent is borrowed for `'a`, which
    /// makes the compiler enforce that it outlives every call. Bindings
    /// cannot be bound to other bindings, since bindings do not implement
    /// the `Fn` traits.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether::FnBinding;
    ///
    /// let greeting = String::from("hello");
    /// let greet = move |punctuation: char| {
    ///     let mut out = greeting.clone();
    ///     out.push(punctuation);
    ///     out
    /// };
    ///
    /// let binding: FnBinding<fn(char) -> String> = FnBinding::from_closure(&greet);
    /// assert_eq!(binding.call(('!',)), "hello!");
    /// ```
    #[must_use]
    pub fn from_closure<C>(closure: &'a C) -> Self
    where
        C: CallRef<S>,
    {
        // SAFETY: The referent is borrowed for `'a`, which outlives this
        // binding and every copy of it, so it is live whenever a dispatch
        // can happen.
        let record = unsafe { FreeRecord::from_closure_ref(NonNull::from(closure)) };
        Self {
            record,
            _referent: PhantomData,
        }
    }

    /// Creates a binding to a stateful closure or functor invoked through an
    /// exclusive reference.
    ///
    /// The referent is mutably borrowed for `'a`, so no other access to it
    /// can happen while the binding lives; each call mutates the referent
    /// itself, never a hidden copy.
    ///
    /// # Safety
    ///
    /// Each call takes a fresh exclusive reborrow of the referent for its
    /// duration. The caller must ensure the closure never reenters itself
    /// through this binding or a copy of it — reentrant dispatch would
    /// create two overlapping exclusive references.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether::FnBinding;
    ///
    /// let mut total = 0_u32;
    /// let mut accumulate = move |n: u32| {
    ///     total += n;
    ///     total
    /// };
    ///
    /// // SAFETY: `accumulate` does not reenter the binding.
    /// let binding: FnBinding<fn(u32) -> u32> =
    ///     unsafe { FnBinding::from_closure_mut(&mut accumulate) };
    /// assert_eq!(binding.call((2,)), 2);
    /// assert_eq!(binding.call((3,)), 5);
    /// ```
    #[must_use]
    pub unsafe fn from_closure_mut<C>(closure: &'a mut C) -> Self
    where
        C: CallMut<S>,
    {
        // SAFETY: The referent is exclusively borrowed for `'a`, so it is
        // live and inaccessible to anyone else while a dispatch can happen;
        // freedom from reentrant dispatch is guaranteed by the caller.
        let record = unsafe { FreeRecord::from_closure_mut(NonNull::from(closure)) };
        Self {
            record,
            _referent: PhantomData,
        }
    }

    /// Returns `true` if the binding currently holds a callable target.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.record.is_bound()
    }

    /// Invokes the bound callable.
    ///
    /// # Panics
    ///
    /// Panics if the binding is unbound, after reporting the
    /// [`UnboundCall`] condition through the [`hooks`] facility. Use
    /// [`try_call`](Self::try_call) or [`call_if`](Self::call_if) when the
    /// bound state is uncertain.
    #[track_caller]
    pub fn call(&self, args: S::Args) -> S::Ret {
        if !self.record.is_bound() {
            hooks::raise_unbound_call(UnboundCall::new::<S>(BindingKind::Free));
        }
        // SAFETY: The record is bound (checked above), and `'a` guarantees
        // any referenced closure is live; exclusivity for mutable closures
        // is guaranteed by the `from_closure_mut` contract.
        unsafe { self.record.dispatch(args) }
    }

    /// Invokes the bound callable, or returns the condition if unbound.
    pub fn try_call(&self, args: S::Args) -> Result<S::Ret, UnboundCall> {
        if self.record.is_bound() {
            // SAFETY: As in `call`.
            Ok(unsafe { self.record.dispatch(args) })
        } else {
            Err(UnboundCall::new::<S>(BindingKind::Free))
        }
    }

    /// Invokes the bound callable if there is one.
    ///
    /// Returns `None` without any side effect when unbound. For signatures
    /// returning `()`, the `Some(())`/`None` result distinguishes
    /// "completed" from "no call occurred".
    ///
    /// # Examples
    ///
    /// ```
    /// use tether::FnBinding;
    ///
    /// fn square(x: i32) -> i32 {
    ///     x * x
    /// }
    ///
    /// let bound = FnBinding::from_function(square as fn(i32) -> i32);
    /// let unbound = FnBinding::<fn(i32) -> i32>::unbound();
    /// assert_eq!(bound.call_if((4,)), Some(16));
    /// assert_eq!(unbound.call_if((4,)), None);
    /// ```
    pub fn call_if(&self, args: S::Args) -> Option<S::Ret> {
        if self.record.is_bound() {
            // SAFETY: As in `call`.
            Some(unsafe { self.record.dispatch(args) })
        } else {
            None
        }
    }

    /// Invokes the bound callable, or returns `alternative` if unbound.
    ///
    /// # Examples
    ///
    /// ```
    /// use tether::FnBinding;
    ///
    /// fn square(x: i32) -> i32 {
    ///     x * x
    /// }
    ///
    /// let bound = FnBinding::from_function(square as fn(i32) -> i32);
    /// let unbound = FnBinding::<fn(i32) -> i32>::unbound();
    /// assert_eq!(bound.call_or(-1, (4,)), 16);
    /// assert_eq!(unbound.call_or(-1, (4,)), -1);
    /// ```
    pub fn call_or(&self, alternative: S::Ret, args: S::Args) -> S::Ret {
        if self.record.is_bound() {
            // SAFETY: As in `call`.
            unsafe { self.record.dispatch(args) }
        } else {
            alternative
        }
    }

    /// Invokes the bound callable, or `alternative` with the same arguments
    /// if unbound.
    pub fn call_or_else<F>(&self, alternative: F, args: S::Args) -> S::Ret
    where
        F: FnOnce(S::Args) -> S::Ret,
    {
        if self.record.is_bound() {
            // SAFETY: As in `call`.
            unsafe { self.record.dispatch(args) }
        } else {
            alternative(args)
        }
    }
}

impl<S: Signature> Default for FnBinding<'_, S> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<'a, S: Signature> From<S> for FnBinding<'a, S> {
    fn from(function: S) -> Self {
        Self::from_function(function)
    }
}

impl<S: Signature> fmt::Debug for FnBinding<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBinding")
            .field("bound", &self.is_bound())
            .finish()
    }
}
