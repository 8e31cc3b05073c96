//! Chunked collection types. Namely [`Deque`], a double-ended queue which stores its values in
//! fixed-size chunks and never moves them while growing.
#![warn(missing_docs)]

pub mod deque;

#[doc(inline)]
pub use deque::Deque;
