//! A module containing [`Deque`] and associated types: the borrowed iterators [`Iter`] and
//! [`IterMut`], the owned [`IntoIter`] and the random access positions [`Cursor`] and
//! [`CursorMut`].
//!
//! [`Deque`] is also re-exported under the parent module.

mod cursor;
mod deque;
mod iter;
mod map;
mod pos;

pub use cursor::*;
pub use deque::*;
pub use iter::*;
pub(crate) use map::ChunkMap;
pub(crate) use pos::Pos;
