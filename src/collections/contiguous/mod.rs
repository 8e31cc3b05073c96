//! Contiguous collection types. Namely [`Vector`], a growable buffer which stores all of its values
//! in a single allocation.
#![warn(missing_docs)]

pub mod vector;

#[doc(inline)]
pub use vector::Vector;
