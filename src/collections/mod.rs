//! Growable collection types built directly on the global allocator.
//!
//! # Method
//! Both collections own raw, uninitialized storage through [`RawBuf`](raw::RawBuf) and construct
//! and drop their values explicitly. Every operation that calls user code (`Clone`, `Default` or a
//! provided closure) states what happens to the collection if that code panics.

#[cfg(feature = "chunked")]
pub mod chunked;
#[cfg(feature = "contiguous")]
pub mod contiguous;
pub mod raw;
