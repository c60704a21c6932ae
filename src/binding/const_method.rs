//! Bindings for shared receiver-taking functions.

use core::fmt;

use tether_internals::{ConstMethodRecord, signature::ConstMethodSignature};

use crate::{
    error::{BindingKind, UnboundCall},
    hooks,
};

/// Non-owning binding to a shared receiver-taking function with signature
/// `S`.
///
/// The `&`-receiver mirror of [`MethodBinding`](crate::MethodBinding):
/// binding fixes only the function pointer, the receiver is supplied per
/// call, and receivers are not part of the binding's identity.
///
/// # Examples
///
/// ```
/// use tether::ConstMethodBinding;
///
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Counter {
///     fn remaining(&self, budget: u32) -> u32 {
///         budget.saturating_sub(self.hits)
///     }
/// }
///
/// let binding =
///     ConstMethodBinding::from_method(Counter::remaining as fn(&Counter, u32) -> u32);
/// let counter = Counter { hits: 3 };
/// assert_eq!(binding.call(&counter, (10,)), 7);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ConstMethodBinding<S: ConstMethodSignature> {
    /// The invocation record.
    record: ConstMethodRecord<S>,
}

impl<S: ConstMethodSignature> ConstMethodBinding<S> {
    /// Creates an unbound binding.
    #[must_use]
    pub const fn unbound() -> Self {
        Self {
            record: ConstMethodRecord::unbound(),
        }
    }

    /// Creates a binding to a receiver-taking function.
    #[must_use]
    pub fn from_method(method: S) -> Self {
        Self {
            record: ConstMethodRecord::from_method(method),
        }
    }

    /// Returns `true` if the binding currently holds a callable target.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.record.is_bound()
    }

    /// Invokes the bound function against `receiver`.
    ///
    /// # Panics
    ///
    /// Panics if the binding is unbound, after reporting the
    /// [`UnboundCall`] condition through the [`hooks`] facility. Use
    /// [`try_call`](Self::try_call) or [`call_if`](Self::call_if) when the
    /// bound state is uncertain.
    #[track_caller]
    pub fn call(&self, receiver: &S::Receiver, args: S::Args) -> S::Ret {
        match self.record.get() {
            Some((method, stub)) => stub(method, receiver, args),
            None => hooks::raise_unbound_call(UnboundCall::new::<S>(BindingKind::ConstMethod)),
        }
    }

    /// Invokes the bound function against `receiver`, or returns the
    /// condition if unbound.
    pub fn try_call(&self, receiver: &S::Receiver, args: S::Args) -> Result<S::Ret, UnboundCall> {
        match self.record.get() {
            Some((method, stub)) => Ok(stub(method, receiver, args)),
            None => Err(UnboundCall::new::<S>(BindingKind::ConstMethod)),
        }
    }

    /// Invokes the bound function against `receiver` if there is one.
    ///
    /// Returns `None` without touching the receiver when unbound.
    pub fn call_if(&self, receiver: &S::Receiver, args: S::Args) -> Option<S::Ret> {
        self.record
            .get()
            .map(|(method, stub)| stub(method, receiver, args))
    }

    /// Invokes the bound function against `receiver`, or `alternative` with
    /// the same arguments if unbound.
    ///
    /// The alternative is a callable rather than a substitute value, as for
    /// [`MethodBinding::call_or_else`](crate::MethodBinding::call_or_else).
    pub fn call_or_else<F>(&self, alternative: F, receiver: &S::Receiver, args: S::Args) -> S::Ret
    where
        F: FnOnce(S::Args) -> S::Ret,
    {
        match self.record.get() {
            Some((method, stub)) => stub(method, receiver, args),
            None => alternative(args),
        }
    }
}

impl<S: ConstMethodSignature> Default for ConstMethodBinding<S> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<S: ConstMethodSignature> From<S> for ConstMethodBinding<S> {
    fn from(method: S) -> Self {
        Self::from_method(method)
    }
}

impl<S: ConstMethodSignature> fmt::Debug for ConstMethodBinding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstMethodBinding")
            .field("bound", &self.is_bound())
            .finish()
    }
}
