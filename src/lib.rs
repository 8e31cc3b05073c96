//! Growable collections written directly against the global allocator, with a focus on what happens
//! to a collection when user code panics halfway through an operation.
//!
//! # Collections
//! - [`Vector`](collections::contiguous::Vector): a contiguous buffer which doubles its capacity
//!   when full.
//! - [`Deque`](collections::chunked::Deque): a double-ended queue storing its values in fixed-size
//!   chunks, which never moves a value after it has been pushed.
//!
//! # Panic Safety
//! Any user code a collection calls can panic: [`Clone`], [`Default`] or a provided closure. Moving
//! a value can't, so relocating storage is always a plain copy of the bytes. Every operation which
//! calls user code documents one of two guarantees:
//! - Strong: if the user code panics, the collection is exactly as it was before the call.
//! - Basic: if the user code panics, the collection is valid and leaks nothing, but its capacity
//!   may have changed.
//!
//! Multi-step operations keep their rollback state in a scope guard, so that each step is undone if
//! a later one unwinds.
//!
//! # Error Handling
//! Operations which can fail come in two forms. `try_*` methods return a [`Result`] with a strongly
//! typed error, while the plain methods panic with the message of that error. For example, imagine
//! having to handle the possibility of a capacity overflow every time you push into a Vector.
//!
//! Allocation failures in the panicking methods are passed to [`std::alloc::handle_alloc_error`].
//!
//! # Dependencies
//! This crate uses `std` for allocation, but none of `std`'s collections are used to implement it.
//! It also depends on some derive macros because they remove the need for some very repetitive
//! programming.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;
