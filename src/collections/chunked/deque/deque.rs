use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr;

use super::{ChunkMap, Iter, IterMut, Pos};
pub use crate::util::error::IndexOutOfBounds;
use crate::util::guard::Guard;
use crate::util::result::ResultExtension;

/// The number of slots in each chunk of a [`Deque`] unless another size is specified.
pub const DEFAULT_CHUNK_SIZE: usize = 128;

/// A double-ended queue storing its values in fixed-size chunks of `N` slots.
///
/// The chunks are owned by a chunk map, which is grown when either end runs out of slots. Growing
/// only moves the pointers to the chunks, so values never move in memory while being pushed or
/// popped. Growth adds roughly the same number of free chunks on both sides of the values.
///
/// Unlike [`Vector`](crate::collections::contiguous::Vector), the values aren't contiguous and a
/// Deque never exposes a pointer to its storage.
///
/// # Panic Safety
/// Pushing is strong: values are constructed before the map is grown, and a failed growth frees
/// the chunks it allocated and leaves the map untouched. Popping never reallocates or frees chunks.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Deque.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push_front/back` | `O(1)`* |
/// | `pop_front/back` | `O(1)` |
/// | `insert` | `O(min(i, n-i))` |
/// | `remove` | `O(min(i, n-i))` |
/// | `swap` | `O(1)` |
///
/// \* Amortized. Growing the chunk map takes time proportional to the number of chunks.
pub struct Deque<T, const N: usize = DEFAULT_CHUNK_SIZE> {
    pub(crate) map: ChunkMap<T, N>,
    /// The position of the first value.
    pub(crate) head: Pos<N>,
    /// The position after the last value. Always within the map, unless the map is empty.
    pub(crate) tail: Pos<N>,
}

impl<T, const N: usize> Deque<T, N> {
    /// Creates a new Deque without allocating. The first push allocates a single chunk, placing the
    /// value in the middle of it.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::chunked::Deque;
    /// let deque: Deque<u8> = Deque::new();
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.cap(), 0);
    /// ```
    pub const fn new() -> Deque<T, N> {
        Deque {
            map: ChunkMap::new(),
            head: Pos::new(0, 0),
            tail: Pos::new(0, 0),
        }
    }

    /// Creates a Deque of `count` values, each produced by calling `f`.
    ///
    /// Enough chunks are allocated up front for all values, with one free chunk before them so
    /// that pushing to the front doesn't immediately grow the map.
    ///
    /// If `f` panics, all values produced so far are dropped and all chunks freed.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::chunked::Deque;
    /// let mut next = 0;
    /// let deque: Deque<_, 4> = Deque::repeat_with(|| { next += 1; next }, 10);
    /// assert!(deque.iter().copied().eq(1..=10));
    /// ```
    pub fn repeat_with<F: FnMut() -> T>(mut f: F, count: usize) -> Deque<T, N> {
        let head = Pos::new(1, 0);
        // The partially built Deque drops whatever it holds if f panics.
        let mut deque = Deque {
            map: ChunkMap::with_chunks(count / N + 2),
            head,
            tail: head,
        };

        for _ in 0..count {
            // SAFETY: The map has a chunk before the values and at least one slot after them.
            unsafe { deque.push_back_unchecked(f()); }
        }

        deque
    }

    /// Returns the number of values in the Deque.
    pub const fn len(&self) -> usize {
        self.tail.flat() - self.head.flat()
    }

    /// Returns true if the Deque contains no values.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the total number of slots across all allocated chunks.
    pub const fn cap(&self) -> usize {
        self.map.slots()
    }

    /// Returns the number of chunks in the chunk map.
    pub const fn chunk_count(&self) -> usize {
        self.map.len()
    }

    /// Returns the number of slots in each chunk.
    pub const fn chunk_size(&self) -> usize {
        N
    }

    /// Returns a reference to the first value, if it exists.
    pub fn front(&self) -> Option<&T> {
        self.try_get(0).ok()
    }

    /// Returns a mutable reference to the first value, if it exists.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.try_get_mut(0).ok()
    }

    /// Returns a reference to the last value, if it exists.
    pub fn back(&self) -> Option<&T> {
        self.try_get(self.len().checked_sub(1)?).ok()
    }

    /// Returns a mutable reference to the last value, if it exists.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.try_get_mut(self.len().checked_sub(1)?).ok()
    }

    /// Returns a reference to the value at the provided `index`, panicking on a failure.
    ///
    /// The same functionality can be achieved using the [`Index`] operator.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the Deque.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the value at the provided `index`, returning an [`Err`] on a failure
    /// rather than panicking.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index has been checked.
        Ok(unsafe { self.get_unchecked(index) })
    }

    /// Returns a mutable reference to the value at the provided `index`, panicking on a failure.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the Deque.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the value at the provided `index`, returning an [`Err`] on a
    /// failure rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index has been checked.
        Ok(unsafe { self.get_unchecked_mut(index) })
    }

    /// Returns a reference to the value at `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be less than [`len`](Deque::len).
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // SAFETY: The caller ensures that the position is within head..tail, where all values are
        // initialized.
        unsafe { self.map.slot(self.head.add(index)).as_ref() }
    }

    /// Returns a mutable reference to the value at `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be less than [`len`](Deque::len).
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: The caller ensures that the position is within head..tail, where all values are
        // initialized.
        unsafe { self.map.slot(self.head.add(index)).as_mut() }
    }

    /// Add the provided value to the back of the Deque, growing the chunk map first if the last
    /// chunk is full.
    ///
    /// # Panics
    /// Panics if the memory layout size of the chunk map would exceed [`isize::MAX`]. The Deque is
    /// unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::chunked::Deque;
    /// let mut deque: Deque<_, 2> = Deque::new();
    /// for i in 0..5 {
    ///     deque.push_back(i);
    /// }
    /// assert!(deque.iter().copied().eq(0..5));
    /// ```
    pub fn push_back(&mut self, value: T) {
        self.reserve_back();
        // SAFETY: There is a free slot after the tail.
        unsafe { self.push_back_unchecked(value) }
    }

    /// Add the provided value to the front of the Deque, growing the chunk map first if the first
    /// chunk is full.
    ///
    /// # Panics
    /// Panics if the memory layout size of the chunk map would exceed [`isize::MAX`]. The Deque is
    /// unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::chunked::Deque;
    /// let mut deque: Deque<_, 2> = Deque::new();
    /// for i in 0..5 {
    ///     deque.push_front(i);
    /// }
    /// assert!(deque.iter().copied().eq((0..5).rev()));
    /// ```
    pub fn push_front(&mut self, value: T) {
        self.reserve_front();
        self.head = self.head.prev();
        // SAFETY: There was a free slot before the old head.
        unsafe { self.map.slot(self.head).write(value); }
    }

    /// Constructs a value with `f` and adds it to the back of the Deque, returning a reference to
    /// it. If `f` panics, the Deque is unchanged.
    pub fn push_back_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.push_back(f());
        // SAFETY: A value has just been pushed.
        unsafe { self.map.slot(self.tail.prev()).as_mut() }
    }

    /// Constructs a value with `f` and adds it to the front of the Deque, returning a reference to
    /// it. If `f` panics, the Deque is unchanged.
    pub fn push_front_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.push_front(f());
        // SAFETY: A value has just been pushed.
        unsafe { self.map.slot(self.head).as_mut() }
    }

    /// Removes the last value from the Deque and returns it, if the Deque isn't empty. Chunks are
    /// never freed by popping.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.tail = self.tail.prev();
        // SAFETY: The old tail was preceded by an initialized value, which is no longer part of
        // the Deque and is read exactly once.
        Some(unsafe { self.map.slot(self.tail).read() })
    }

    /// Removes the first value from the Deque and returns it, if the Deque isn't empty. Chunks are
    /// never freed by popping.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        // SAFETY: The head is an initialized value, which is no longer part of the Deque after
        // moving the head and is read exactly once.
        let value = unsafe { self.map.slot(self.head).read() };
        self.head = self.head.next();
        Some(value)
    }

    /// Inserts the provided value at the given index. Values on the side of `index` closer to an
    /// end of the Deque are moved one slot towards that end.
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length of the Deque.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::chunked::Deque;
    /// let mut deque: Deque<_, 2> = (0..6).collect();
    /// deque.insert(1, 10);
    /// deque.insert(6, 20);
    /// assert!(deque.iter().copied().eq([0, 10, 1, 2, 3, 4, 20, 5]));
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts the provided value at the given index, returning an [`Err`] rather than panicking
    /// if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        let len = self.len();
        if index > len {
            return Err(IndexOutOfBounds {
                index,
                len,
            });
        }

        if index < len - index {
            self.reserve_front();
            let old_head = self.head;
            self.head = old_head.prev();

            // SAFETY: The slot before the old head is free, so the first index values can each
            // move one slot towards the front, which frees the slot before old_head + index.
            unsafe {
                self.shift_towards_front(old_head, old_head.add(index));
                self.map.slot(old_head.add(index).prev()).write(value);
            }
        } else {
            self.reserve_back();
            let at = self.head.add(index);

            // SAFETY: The slot at the tail is free, so the values in at..tail can each move one
            // slot towards the back, which frees the slot at at.
            unsafe {
                self.shift_towards_back(at, self.tail);
                self.map.slot(at).write(value);
            }
            self.tail = self.tail.next();
        }

        Ok(())
    }

    /// Removes and returns the value at the provided index. Values on the side of `index` closer
    /// to an end of the Deque are moved one slot towards the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::chunked::Deque;
    /// let mut deque: Deque<_, 2> = (0..6).collect();
    /// assert_eq!(deque.remove(1), 1);
    /// assert_eq!(deque.remove(3), 4);
    /// assert!(deque.iter().copied().eq([0, 2, 3, 5]));
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes and returns the value at the provided index, returning an [`Err`] rather than
    /// panicking if it is out of bounds.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;
        let at = self.head.add(index);

        // SAFETY: at is within head..tail. After reading the value, its slot is filled by moving
        // the values on one side of it, and the end on that side shrinks by one slot.
        unsafe {
            let value = self.map.slot(at).read();

            if index < self.len() - 1 - index {
                self.shift_towards_back(self.head, at);
                self.head = self.head.next();
            } else {
                self.shift_towards_front(at.next(), self.tail);
                self.tail = self.tail.prev();
            }

            Ok(value)
        }
    }

    /// Drops all values past `len`, keeping the chunk map. Does nothing if the Deque isn't longer
    /// than `len`.
    pub fn truncate(&mut self, len: usize) {
        while self.len() > len {
            // Each value is removed from the Deque before it is dropped.
            drop(self.pop_back());
        }
    }

    /// Drops all values in the Deque without freeing any chunks.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the Deque to `new_len`, pushing values produced by `f` to the back or dropping
    /// values from the back as needed.
    ///
    /// If `f` panics, all values it produced are dropped again, leaving the same values as before
    /// the call. The chunk map may have grown in the meantime.
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        let old_len = self.len();
        if new_len <= old_len {
            self.truncate(new_len);
            return;
        }

        let mut deque = Guard::new(self, |deque: &mut &mut Deque<T, N>| deque.truncate(old_len));

        while deque.len() < new_len {
            let value = f();
            deque.push_back(value);
        }

        deque.defuse();
    }

    /// Swaps the contents of two Deques without moving any values. Never panics.
    pub const fn swap(&mut self, other: &mut Deque<T, N>) {
        mem::swap(self, other);
    }

    /// Returns an iterator over references to the values, from front to back.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(&self.map, self.head, self.tail)
    }

    /// Returns an iterator over mutable references to the values, from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, N> {
        IterMut::new(&self.map, self.head, self.tail)
    }

    /// Push the provided value onto the back of the Deque, assuming that there is a free slot after
    /// it.
    ///
    /// # Safety
    /// The slot after the tail must be within the map.
    pub(crate) unsafe fn push_back_unchecked(&mut self, value: T) {
        // SAFETY: The caller ensures that the map has room for this push.
        unsafe { self.map.slot(self.tail).write(value); }
        self.tail = self.tail.next();
    }

    /// Ensures that there is room to push one value to the back.
    fn reserve_back(&mut self) {
        while self.map.is_empty() || self.tail.flat() + 1 >= self.map.slots() {
            self.grow_map();
        }
    }

    /// Ensures that there is room to push one value to the front.
    fn reserve_front(&mut self) {
        while self.map.is_empty() || self.head.flat() == 0 {
            self.grow_map();
        }
    }

    /// Grows the chunk map, splitting the new chunks so that roughly the same number of free chunks
    /// ends up on either side of the values.
    fn grow_map(&mut self) {
        if self.map.is_empty() {
            self.map = ChunkMap::with_chunks(1);
            self.head = Pos::new(0, N / 2);
            self.tail = self.head;
            return;
        }

        let chunks = self.map.len();
        let free_front = self.head.chunk;
        let free_back = chunks - 1 - self.tail.chunk;

        // At least double the map, adding one more chunk if needed for an even split.
        let mut add = chunks;
        if (add + free_back - free_front) % 2 == 1 {
            add += 1;
        }
        let add_front = (add + free_back - free_front) / 2;

        self.map.grow(add_front, add - add_front);
        self.head.chunk += add_front;
        self.tail.chunk += add_front;
    }

    /// Moves every value in `from..to` one slot towards the back, starting with the last one.
    ///
    /// # Safety
    /// All slots in `from..=to` must be within the map, the values in `from..to` initialized and
    /// the slot at `to` free. Afterwards the slot at `from` is free.
    unsafe fn shift_towards_back(&mut self, from: Pos<N>, to: Pos<N>) {
        let mut pos = to;
        while pos != from {
            let prev = pos.prev();
            // SAFETY: Upheld by the caller.
            unsafe {
                ptr::copy_nonoverlapping(
                    self.map.slot(prev).as_ptr(),
                    self.map.slot(pos).as_ptr(),
                    1,
                );
            }
            pos = prev;
        }
    }

    /// Moves every value in `from..to` one slot towards the front, starting with the first one.
    ///
    /// # Safety
    /// All slots from the one before `from` up to `to` (exclusive) must be within the map, the
    /// values in `from..to` initialized and the slot before `from` free. Afterwards the slot before
    /// `to` is free.
    unsafe fn shift_towards_front(&mut self, from: Pos<N>, to: Pos<N>) {
        let mut pos = from;
        while pos != to {
            // SAFETY: Upheld by the caller.
            unsafe {
                ptr::copy_nonoverlapping(
                    self.map.slot(pos).as_ptr(),
                    self.map.slot(pos.prev()).as_ptr(),
                    1,
                );
            }
            pos = pos.next();
        }
    }

    /// Returns the position of the value at `index`, or the end position if `index == len`.
    pub(crate) const fn pos_at(&self, index: usize) -> Pos<N> {
        self.head.add(index)
    }

    /// Checks that the provided index is within the bounds of self.
    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len() {
            Err(IndexOutOfBounds {
                index,
                len: self.len(),
            })
        } else {
            Ok(())
        }
    }
}

impl<T: Clone, const N: usize> Deque<T, N> {
    /// Creates a Deque of `count` clones of `value`. If a clone panics, all clones made so far are
    /// dropped and all chunks freed.
    pub fn repeat(value: &T, count: usize) -> Deque<T, N> {
        Deque::repeat_with(|| value.clone(), count)
    }

    /// Resizes the Deque to `new_len`, pushing clones of `value` to the back. See
    /// [`resize_with`](Deque::resize_with) for the guarantees in case of a panic.
    pub fn resize(&mut self, new_len: usize, value: T) {
        self.resize_with(new_len, || value.clone());
    }
}

impl<T: Default, const N: usize> Deque<T, N> {
    /// Creates a Deque of `count` default values. If a constructor panics, all values created so
    /// far are dropped and all chunks freed.
    pub fn repeat_default(count: usize) -> Deque<T, N> {
        Deque::repeat_with(T::default, count)
    }

    /// Resizes the Deque to `new_len`, pushing default values to the back. See
    /// [`resize_with`](Deque::resize_with) for the guarantees in case of a panic.
    pub fn resize_default(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T, const N: usize> Index<usize> for Deque<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T, const N: usize> IndexMut<usize> for Deque<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<T, const N: usize> Extend<T> for Deque<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for Deque<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Deque::new();
        deque.extend(iter);
        deque
    }
}

impl<T, const N: usize, const M: usize> From<[T; M]> for Deque<T, N> {
    fn from(value: [T; M]) -> Self {
        let mut iter = value.into_iter();
        // SAFETY: The closure is called exactly M times, so the iterator never runs out.
        Deque::repeat_with(|| unsafe { iter.next().unwrap_unchecked() }, M)
    }
}

impl<T, const N: usize> Default for Deque<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Drop for Deque<T, N> {
    fn drop(&mut self) {
        let (mut pos, tail) = (self.head, self.tail);
        // Forget the values before dropping them, so a panicking drop can't drop any twice.
        self.head = tail;

        while pos != tail {
            // SAFETY: All positions in head..tail hold initialized values, each dropped once.
            unsafe { ptr::drop_in_place(self.map.slot(pos).as_ptr()); }
            pos = pos.next();
        }

        // Implicitly drop self.map, which frees the chunks.
    }
}

impl<T: Clone, const N: usize> Clone for Deque<T, N> {
    /// Clones every value into a new Deque with the same chunk layout. If a clone panics, the
    /// values cloned so far are dropped and all chunks freed.
    fn clone(&self) -> Self {
        let mut deque = Deque {
            map: ChunkMap::with_chunks(self.map.len()),
            head: self.head,
            tail: self.head,
        };

        for value in self.iter() {
            // SAFETY: The new map has the same layout as self, which has room for all values.
            unsafe { deque.push_back_unchecked(value.clone()); }
        }

        deque
    }

    /// Clones `source` into a temporary and swaps it into self. If a clone panics, self is
    /// unchanged.
    fn clone_from(&mut self, source: &Self) {
        let mut temp = source.clone();
        self.swap(&mut temp);
    }
}

impl<T: PartialEq, const N: usize> PartialEq for Deque<T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const N: usize> Eq for Deque<T, N> {}

impl<T: Hash, const N: usize> Hash for Deque<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T: Debug, const N: usize> Debug for Deque<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deque")
            .field("contents", &self.iter())
            .field("len", &self.len())
            .field("chunks", &self.chunk_count())
            .finish()
    }
}

impl<T: Debug, const N: usize> Display for Deque<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
