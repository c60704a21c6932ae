//! Bindings for mutable receiver-taking functions.

use core::fmt;

use tether_internals::{MethodRecord, signature::MethodSignature};

use crate::{
    error::{BindingKind, UnboundCall},
    hooks,
};

/// Non-owning binding to a mutable receiver-taking function with signature
/// `S`.
///
/// Binding fixes only the function pointer; the receiver is supplied per
/// call and is never stored, so the binding is self-contained with no
/// lifetime dependency, and receivers are not part of its identity. Method
/// references coerce to the signature type, so
/// `Type::method as fn(&mut Type, ..) -> _` binds directly.
///
/// # Examples
///
/// ```
/// use tether::MethodBinding;
///
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Counter {
///     fn add(&mut self, n: u32) -> u32 {
///         self.hits += n;
///         self.hits
///     }
/// }
///
/// let binding = MethodBinding::from_method(Counter::add as fn(&mut Counter, u32) -> u32);
/// let mut counter = Counter { hits: 0 };
/// assert_eq!(binding.call(&mut counter, (2,)), 2);
/// assert_eq!(binding.call(&mut counter, (3,)), 5);
/// assert_eq!(counter.hits, 5);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MethodBinding<S: MethodSignature> {
    /// The invocation record.
    record: MethodRecord<S>,
}

impl<S: MethodSignature> MethodBinding<S> {
    /// Creates an unbound binding.
    #[must_use]
    pub const fn unbound() -> Self {
        Self {
            record: MethodRecord::unbound(),
        }
    }

    /// Creates a binding to a receiver-taking function.
    #[must_use]
    pub fn from_method(method: S) -> Self {
        Self {
            record: MethodRecord::from_method(method),
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
    pub fn call(&self, receiver: &mut S::Receiver, args: S::Args) -> S::Ret {
        match self.record.get() {
            Some((method, stub)) => stub(method, receiver, args),
            None => hooks::raise_unbound_call(UnboundCall::new::<S>(BindingKind::Method)),
        }
    }

    /// Invokes the bound function against `receiver`, or returns the
    /// condition if unbound.
    pub fn try_call(
        &self,
        receiver: &mut S::Receiver,
        args: S::Args,
    ) -> Result<S::Ret, UnboundCall> {
        match self.record.get() {
            Some((method, stub)) => Ok(stub(method, receiver, args)),
            None => Err(UnboundCall::new::<S>(BindingKind::Method)),
        }
    }

    /// Invokes the bound function against `receiver` if there is one.
    ///
    /// Returns `None` without touching the receiver when unbound.
    pub fn call_if(&self, receiver: &mut S::Receiver, args: S::Args) -> Option<S::Ret> {
        self.record
            .get()
            .map(|(method, stub)| stub(method, receiver, args))
    }

    /// Invokes the bound function against `receiver`, or `alternative` with
    /// the same arguments if unbound.
    ///
    /// The alternative is a callable rather than a substitute value: a
    /// method has no natural default value independent of a receiver.
    pub fn call_or_else<F>(
        &self,
        alternative: F,
        receiver: &mut S::Receiver,
        args: S::Args,
    ) -> S::Ret
    where
        F: FnOnce(S::Args) -> S::Ret,
    {
        match self.record.get() {
            Some((method, stub)) => stub(method, receiver, args),
            None => alternative(args),
        }
    }
}

impl<S: MethodSignature> Default for MethodBinding<S> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<S: MethodSignature> From<S> for MethodBinding<S> {
    fn from(method: S) -> Self {
        Self::from_method(method)
    }
}

impl<S: MethodSignature> fmt::Debug for MethodBinding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodBinding")
            .field("bound", &self.is_bound())
            .finish()
    }
}
