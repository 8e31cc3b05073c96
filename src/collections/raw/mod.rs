//! Raw slot storage shared by the collections in this crate. See [`RawBuf`].

mod raw_buf;

pub use raw_buf::*;
