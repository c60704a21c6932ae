#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`tether`].
//!
//! # Overview
//!
//! This crate contains the low-level invocation records and unsafe operations
//! that power the [`tether`] callable-binding library. It provides the
//! foundation for allocation-free, vtable-free type erasure of call targets
//! through per-binding stub trampolines.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`tether`] crate, not
//! this one.
//!
//! # Architecture
//!
//! The crate is organized around one record family per binding shape:
//!
//! - **[`record`]**: Fixed-size invocation records
//!   - [`FreeRecord`]: Free functions, closures, and functors. Pairs a tagged
//!     payload union (function pointer or object address) with a stub
//!     trampoline that knows how to reinterpret it.
//!   - [`MethodRecord`]: Receiver-taking functions invoked through `&mut`.
//!     Stores the bound function pointer next to its stub; no erasure is
//!     needed because the pointer is self-contained.
//!   - [`ConstMethodRecord`]: The `&`-receiver mirror of [`MethodRecord`].
//!
//! - **[`signature`]**: Trait definitions describing call shapes
//!   - [`Signature`]: Argument tuple and return type of a free callable
//!   - [`MethodSignature`] / [`ConstMethodSignature`]: The same, split into
//!     receiver and arguments
//!   - [`CallRef`] / [`CallMut`]: The closure shapes a [`FreeRecord`] can
//!     bind by address
//!
//! # Safety Strategy
//!
//! Erasing a closure type `C` down to a bare object address is only sound if
//! the stub stored next to that address was instantiated for the same `C`,
//! and if the referent is still live whenever the stub runs. This crate
//! maintains those invariants through:
//!
//! - **Module-based encapsulation**: The payload and stub fields are private
//!   to the [`record`] module tree, so every write to them is locally
//!   verifiable within a single file.
//! - **Stubs paired at construction**: A stub is only ever installed together
//!   with the payload variant it expects, and the pair is replaced
//!   atomically as a whole record.
//! - **Documented unsafe contracts**: Liveness and aliasing obligations that
//!   cannot be expressed here are pushed to the caller as numbered `# Safety`
//!   requirements; the public `tether` crate discharges them with lifetimes.
//!
//! [`tether`]: https://docs.rs/tether/latest/tether/
//! [`Signature`]: signature::Signature
//! [`MethodSignature`]: signature::MethodSignature
//! [`ConstMethodSignature`]: signature::ConstMethodSignature
//! [`CallRef`]: signature::CallRef
//! [`CallMut`]: signature::CallMut

mod record;
pub mod signature;

pub use record::{
    ConstMethodRecord, ConstMethodStub, FreeRecord, FreeStub, MethodRecord, MethodStub,
};
