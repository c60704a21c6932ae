//! The condition reported when an unbound binding is invoked directly.

/// The binding family that raised an [`UnboundCall`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// A [`FnBinding`](crate::FnBinding).
    Free,
    /// A [`MethodBinding`](crate::MethodBinding).
    Method,
    /// A [`ConstMethodBinding`](crate::ConstMethodBinding).
    ConstMethod,
}

impl core::fmt::Display for BindingKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            BindingKind::Free => "free-callable",
            BindingKind::Method => "method",
            BindingKind::ConstMethod => "const-method",
        };
        f.write_str(name)
    }
}

/// Condition raised by a direct call on an unbound binding.
///
/// The condition captures which binding family was invoked and the
/// [`core::any::type_name`] of its signature, for diagnostics. It is the
/// error type of the `try_call` methods, and what the
/// [`hooks`](crate::hooks) observer receives before the failed `call`
/// panics.
///
/// # Examples
///
/// ```
/// use tether::{BindingKind, FnBinding};
///
/// let unbound = FnBinding::<fn(i32) -> i32>::unbound();
/// let condition = unbound.try_call((4,)).unwrap_err();
/// assert_eq!(condition.kind(), BindingKind::Free);
/// assert!(condition.signature().contains("fn(i32) -> i32"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnboundCall {
    /// The binding family that raised the condition.
    kind: BindingKind,
    /// The type name of the binding's signature.
    signature: &'static str,
}

impl UnboundCall {
    /// Creates the condition for a binding with signature `S`.
    pub(crate) fn new<S>(kind: BindingKind) -> Self {
        Self {
            kind,
            signature: core::any::type_name::<S>(),
        }
    }

    /// Returns the binding family that raised the condition.
    #[must_use]
    pub fn kind(&self) -> BindingKind {
        self.kind
    }

    /// Returns the type name of the binding's signature.
    #[must_use]
    pub fn signature(&self) -> &'static str {
        self.signature
    }
}

impl core::fmt::Display for UnboundCall {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "attempted to invoke an unbound {} binding with signature `{}`",
            self.kind, self.signature
        )
    }
}

impl core::error::Error for UnboundCall {}
