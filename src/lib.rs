#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Heap-free, non-owning callable bindings behind a fixed compile-time
//! signature.
//!
//! ## Overview
//!
//! This crate stores and later invokes any of four callable shapes — a free
//! function, a stateless or stateful closure/functor, a mutable
//! receiver-taking function, or a shared receiver-taking function — behind
//! one uniform call interface. It is built for environments where dynamic
//! allocation and virtual dispatch are unwelcome: a binding is a fixed-size
//! `Copy` value holding a tagged payload (function pointer or object
//! address) next to a stub trampoline, never a boxed trait object.
//!
//! A binding never owns its target. Free functions and receiver-taking
//! functions are stored by value and are self-contained; closures and
//! functors are referenced, with a lifetime parameter making the compiler
//! enforce that the referent outlives the binding.
//!
//! ## Quick Example
//!
//! ```
//! use tether::FnBinding;
//!
//! fn square(x: i32) -> i32 {
//!     x * x
//! }
//!
//! let binding = FnBinding::from_function(square as fn(i32) -> i32);
//! assert_eq!(binding.call((4,)), 16);
//! assert_eq!(binding.call_if((4,)), Some(16));
//!
//! let unbound = FnBinding::<fn(i32) -> i32>::unbound();
//! assert_eq!(unbound.call_if((4,)), None);
//! assert_ne!(binding, unbound);
//! ```
//!
//! ## Core Concepts
//!
//! Three binding families cover the callable shapes, each selected by the
//! shape of its signature type:
//!
//! - [`FnBinding<'a, S>`](FnBinding) binds free functions by value and
//!   closures/functors by reference, for signatures like `fn(i32) -> i32`.
//! - [`MethodBinding<S>`](MethodBinding) binds a mutable receiver-taking
//!   function such as `fn(&mut Counter, u32) -> u32`; the receiver is
//!   supplied per call, not stored in the binding.
//! - [`ConstMethodBinding<S>`](ConstMethodBinding) is the shared-receiver
//!   mirror, for signatures like `fn(&Counter) -> u32`.
//!
//! Arguments travel as a tuple (`binding.call((a, b))`), the price of
//! expressing variadic signatures in Rust. A binding is **unbound** when
//! default-constructed and **bound** from construction with a target until
//! the whole value is replaced; there is no partial rebind and no teardown
//! state.
//!
//! ## Equality
//!
//! Binding equality is *identity-based*, never structural: two bindings are
//! equal iff they were bound the same way to the same target — by
//! function-pointer value for functions, by address for closures and
//! functors. Two distinct closure instances with bit-identical captured
//! state compare unequal. Receivers are never part of a method binding's
//! identity.
//!
//! ## Calling an unbound binding
//!
//! Every direct [`call`](FnBinding::call) checks validity first. Calling an
//! unbound binding reports an [`UnboundCall`] condition through the
//! [`hooks`] facility and then panics, since no return value can be
//! produced. When the bound state is uncertain, prefer the total forms:
//! [`try_call`](FnBinding::try_call), [`call_if`](FnBinding::call_if),
//! [`call_or`](FnBinding::call_or), or [`call_or_else`](FnBinding::call_or_else).
//!
//! ## Copies share the referent
//!
//! Bindings are plain `Copy` values. Copies are independent binding values
//! that reference the *same* external target when one was bound: mutation
//! through one copy's call is visible through every copy, exactly as if the
//! caller held the reference directly. The binding adds no synchronization
//! of its own; concurrent invocation is safe only to the extent the referent
//! supports it.
//!
//! ## Features
//!
//! - `std`: use `std::sync::RwLock` for the hook slot instead of
//!   [`spin`](https://docs.rs/spin).
//! - `log`: emit unreported [`UnboundCall`] conditions through
//!   [`log::error!`](https://docs.rs/log) before panicking.
//!
//! For implementation details, see the [`tether-internals`] crate.
//!
//! [`tether-internals`]: tether_internals

#[cfg(feature = "std")]
extern crate std;

mod binding;
pub mod error;
pub mod hooks;
pub mod prelude;

pub use tether_internals::signature;

pub use crate::{
    binding::{ConstMethodBinding, FnBinding, MethodBinding},
    error::{BindingKind, UnboundCall},
};
