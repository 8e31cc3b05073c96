use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};

use super::{Deque, Pos};
use crate::util::error::IndexOutOfBounds;
use crate::util::result::ResultExtension;

/// A shared position within a [`Deque`], pointing either at a value or at the end position after
/// the last value.
///
/// Cursors are cheap to copy and support random access: moving by any offset and measuring the
/// distance between two cursors are both `O(1)`. Cursors are ordered by their position in the
/// Deque, which is only meaningful for cursors into the same Deque.
pub struct Cursor<'a, T, const N: usize> {
    deque: &'a Deque<T, N>,
    pos: Pos<N>,
}

impl<'a, T, const N: usize> Cursor<'a, T, N> {
    /// Returns the index of the cursor. The end position has an index equal to the Deque's length.
    pub const fn index(&self) -> usize {
        self.pos.flat() - self.deque.head.flat()
    }

    /// Returns the value at the cursor, or [`None`] at the end position.
    pub fn get(&self) -> Option<&'a T> {
        if self.pos == self.deque.tail {
            return None;
        }

        // SAFETY: The position is within head..tail.
        Some(unsafe { self.deque.map.slot(self.pos).as_ref() })
    }

    /// Moves the cursor to the next position, returning false without moving if it is already at
    /// the end position.
    pub const fn move_next(&mut self) -> bool {
        if self.pos.flat() == self.deque.tail.flat() {
            return false;
        }

        self.pos = self.pos.next();
        true
    }

    /// Moves the cursor to the previous value, returning false without moving if it is already at
    /// the first value.
    pub const fn move_prev(&mut self) -> bool {
        if self.pos.flat() == self.deque.head.flat() {
            return false;
        }

        self.pos = self.pos.prev();
        true
    }

    /// Moves the cursor by `delta` positions in either direction.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] without moving if the target lies outside `0..=len`.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::chunked::Deque;
    /// let deque: Deque<_, 4> = (0..10).collect();
    /// let mut cursor = deque.cursor_front();
    /// cursor.seek(7).unwrap();
    /// assert_eq!(cursor.get(), Some(&7));
    /// cursor.seek(-5).unwrap();
    /// assert_eq!(cursor.get(), Some(&2));
    /// assert!(cursor.seek(-3).is_err());
    /// ```
    pub fn seek(&mut self, delta: isize) -> Result<(), IndexOutOfBounds> {
        self.pos = seek_pos(self.deque, self.pos, delta)?;
        Ok(())
    }

    /// Returns the signed number of positions from `other` to this cursor.
    pub const fn offset_from(&self, other: &Cursor<'_, T, N>) -> isize {
        self.pos.distance(other.pos)
    }
}

impl<T, const N: usize> Clone for Cursor<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for Cursor<'_, T, N> {}

impl<T, const N: usize> PartialEq for Cursor<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<T, const N: usize> Eq for Cursor<'_, T, N> {}

impl<T, const N: usize> PartialOrd for Cursor<'_, T, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, const N: usize> Ord for Cursor<'_, T, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos.cmp(&other.pos)
    }
}

impl<T: Debug, const N: usize> Debug for Cursor<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index())
            .field("value", &self.get())
            .finish()
    }
}

/// An exclusive position within a [`Deque`], which can also insert and remove values.
///
/// A CursorMut can be turned into a [`Cursor`] with [`Cursor::from`], but not the other way
/// around.
pub struct CursorMut<'a, T, const N: usize> {
    deque: &'a mut Deque<T, N>,
    pos: Pos<N>,
}

impl<'a, T, const N: usize> CursorMut<'a, T, N> {
    /// Returns the index of the cursor, see [`Cursor::index`].
    pub const fn index(&self) -> usize {
        self.pos.flat() - self.deque.head.flat()
    }

    /// Returns the value at the cursor, or [`None`] at the end position.
    pub fn get(&self) -> Option<&T> {
        self.as_cursor().get()
    }

    /// Returns a mutable reference to the value at the cursor, or [`None`] at the end position.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.pos == self.deque.tail {
            return None;
        }

        // SAFETY: The position is within head..tail and the Deque is uniquely borrowed.
        Some(unsafe { self.deque.map.slot(self.pos).as_mut() })
    }

    /// Moves the cursor to the next position, see [`Cursor::move_next`].
    pub fn move_next(&mut self) -> bool {
        if self.pos == self.deque.tail {
            return false;
        }

        self.pos = self.pos.next();
        true
    }

    /// Moves the cursor to the previous value, see [`Cursor::move_prev`].
    pub fn move_prev(&mut self) -> bool {
        if self.pos == self.deque.head {
            return false;
        }

        self.pos = self.pos.prev();
        true
    }

    /// Moves the cursor by `delta` positions, see [`Cursor::seek`].
    pub fn seek(&mut self, delta: isize) -> Result<(), IndexOutOfBounds> {
        self.pos = seek_pos(self.deque, self.pos, delta)?;
        Ok(())
    }

    /// Inserts `value` before the cursor. The cursor keeps pointing at the same value (or the end
    /// position) afterwards.
    pub fn insert(&mut self, value: T) {
        let index = self.index();
        self.deque.insert(index, value);
        self.pos = self.deque.pos_at(index + 1);
    }

    /// Removes and returns the value at the cursor, leaving the cursor on the value after it.
    /// Returns [`None`] at the end position.
    pub fn remove(&mut self) -> Option<T> {
        let index = self.index();
        let value = self.deque.try_remove(index).ok()?;
        self.pos = self.deque.pos_at(index);
        Some(value)
    }

    /// Returns a shared cursor at the same position, borrowing this one.
    pub fn as_cursor(&self) -> Cursor<'_, T, N> {
        Cursor {
            deque: self.deque,
            pos: self.pos,
        }
    }
}

impl<'a, T, const N: usize> From<CursorMut<'a, T, N>> for Cursor<'a, T, N> {
    fn from(value: CursorMut<'a, T, N>) -> Self {
        Cursor {
            deque: value.deque,
            pos: value.pos,
        }
    }
}

impl<T: Debug, const N: usize> Debug for CursorMut<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index())
            .field("value", &self.get())
            .finish()
    }
}

fn seek_pos<T, const N: usize>(
    deque: &Deque<T, N>,
    pos: Pos<N>,
    delta: isize,
) -> Result<Pos<N>, IndexOutOfBounds> {
    let len = deque.len();
    let index = pos.flat() - deque.head.flat();

    match index.checked_add_signed(delta) {
        Some(target) if target <= len => Ok(pos.offset_by(delta)),
        _ => Err(IndexOutOfBounds {
            index: index.wrapping_add_signed(delta),
            len,
        }),
    }
}

impl<T, const N: usize> Deque<T, N> {
    /// Returns a cursor at `index`, which may be the end position at `len`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn cursor(&self, index: usize) -> Cursor<'_, T, N> {
        self.check_position(index).throw();
        Cursor {
            deque: self,
            pos: self.pos_at(index),
        }
    }

    /// Returns a cursor at the first value, which is the end position if the Deque is empty.
    pub fn cursor_front(&self) -> Cursor<'_, T, N> {
        self.cursor(0)
    }

    /// Returns a cursor at the end position, after the last value.
    pub fn cursor_end(&self) -> Cursor<'_, T, N> {
        self.cursor(self.len())
    }

    /// Returns an exclusive cursor at `index`, which may be the end position at `len`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::chunked::Deque;
    /// let mut deque: Deque<_, 2> = (0..5).collect();
    /// let mut cursor = deque.cursor_mut(2);
    /// assert_eq!(cursor.remove(), Some(2));
    /// cursor.insert(10);
    /// *cursor.get_mut().unwrap() += 100;
    /// assert!(deque.iter().copied().eq([0, 1, 10, 103, 4]));
    /// ```
    pub fn cursor_mut(&mut self, index: usize) -> CursorMut<'_, T, N> {
        self.check_position(index).throw();
        let pos = self.pos_at(index);
        CursorMut {
            deque: self,
            pos,
        }
    }

    const fn check_position(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index > self.len() {
            Err(IndexOutOfBounds {
                index,
                len: self.len(),
            })
        } else {
            Ok(())
        }
    }
}
