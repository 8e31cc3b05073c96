use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use crate::collections::raw::RawBuf;
#[doc(inline)]
pub use crate::util::error::{CapacityOverflow, IndexOutOfBounds, TryReserveError};
use crate::util::guard::Guard;
use crate::util::result::{ReserveResultExtension, ResultExtension};

const MIN_CAP: usize = 1;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection, storing its values in a single [`RawBuf`].
///
/// Values at indices `0..len` are initialized, while the slots in `len..cap` are allocated but
/// uninitialized. Nothing is allocated until the capacity is first changed.
///
/// # Panic Safety
/// Values are constructed by user code (`Clone`, `Default` or a provided closure), which may
/// panic. Each method documents what state the Vector is left in when that happens:
/// - Strong: the Vector is exactly as it was before the call (`len`, `cap`, the values and the
///   storage pointer).
/// - Basic: the Vector is valid and no values are leaked or lost, but its capacity may have
///   changed.
///
/// Moving values never panics, so reallocation only fails when a capacity overflows. In that case
/// the Vector is left untouched.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Vector.
/// - `i`: The index of the item in question.
/// - `m`: The number of items in the second Vector.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_unchecked` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `remove` | `O(n-i)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `resize` | `O(n)` |
/// | `append` | `O(n+m)` |
/// | `swap` | `O(1)` |
///
/// \* If the Vector doesn't have enough capacity for the new element, `push` will take `O(n)`.
///
/// \** If the Vector has enough capacity for the additional items already, `reserve` is `O(1)`.
pub struct Vector<T> {
    pub(crate) buf: RawBuf<T>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// Creates a new Vector with length and capacity 0. Memory will be allocated when the capacity
    /// changes.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let vec: Vector<u8> = Vector::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 0);
    /// ```
    pub const fn new() -> Vector<T> {
        Vector {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Creates a new Vector with capacity exactly equal to the provided value, allowing values to
    /// be added without reallocation.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Vector<T> {
        Vector {
            buf: RawBuf::with_cap(cap),
            len: 0,
        }
    }

    /// Creates a Vector of `count` values, each produced by calling `f`. The capacity is exactly
    /// `count`.
    ///
    /// If `f` panics, all values produced so far are dropped and the allocation is freed before
    /// the panic continues.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut next = 0;
    /// let vec = Vector::repeat_with(|| { next += 2; next }, 3);
    /// assert_eq!(&*vec, &[2, 4, 6]);
    /// ```
    pub fn repeat_with<F: FnMut() -> T>(mut f: F, count: usize) -> Vector<T> {
        // The partially built Vector drops whatever it holds if f panics.
        let mut vec = Vector::with_cap(count);

        for _ in 0..count {
            // SAFETY: vec was created with capacity for count values.
            unsafe { vec.push_unchecked(f()); }
        }

        vec
    }

    /// Returns the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let vec = Vector::from([1_u8, 2, 3]);
    /// assert_eq!(vec.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Vector contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the Vector. Unlike [`Vec`], the capacity is guaranteed to be
    /// exactly the value provided to any of the various capacity manipulation functions.
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Returns a raw pointer to the Vector's storage. The pointer is dangling if nothing has been
    /// allocated.
    pub const fn as_ptr(&self) -> *const T {
        self.buf.as_ptr().cast_const()
    }

    /// Returns a raw mutable pointer to the Vector's storage. The pointer is dangling if nothing
    /// has been allocated.
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_ptr()
    }

    /// Returns a reference to the element at the provided `index`, panicking on a failure.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the Vector.
    pub fn get(&self, index: usize) -> &T {
        self.try_get(index).throw()
    }

    /// Returns a reference to the element at the provided `index`, returning an [`Err`] on a
    /// failure rather than panicking.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let vec = Vector::from(['a', 'b']);
    /// assert_eq!(vec.try_get(1), Ok(&'b'));
    /// assert!(vec.try_get(2).is_err());
    /// ```
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the value is initialized.
        Ok(unsafe { self.buf.slot(index).as_ref() })
    }

    /// Returns a mutable reference to the element at the provided `index`, panicking on a failure.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds of the Vector.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.try_get_mut(index).throw()
    }

    /// Returns a mutable reference to the element at the provided `index`, returning an [`Err`] on
    /// a failure rather than panicking.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the value is initialized.
        Ok(unsafe { self.buf.slot(index).as_mut() })
    }

    /// Returns a reference to the first element, if it exists.
    pub fn front(&self) -> Option<&T> {
        self.first()
    }

    /// Returns a mutable reference to the first element, if it exists.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.first_mut()
    }

    /// Returns a reference to the last element, if it exists.
    pub fn back(&self) -> Option<&T> {
        self.last()
    }

    /// Returns a mutable reference to the last element, if it exists.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.last_mut()
    }

    /// Push the provided value onto the end of the Vector, increasing the capacity if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    /// The Vector is unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut vec = Vector::<u8>::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push(&mut self, value: T) {
        if self.len == self.cap() {
            self.grow();
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
    }

    /// Constructs a new value with `f` directly in the slot at the end of the Vector, growing it
    /// first if required. Returns a reference to the new value.
    ///
    /// Growth happens before `f` is called. If `f` panics the length and all existing values are
    /// unchanged, but the new capacity is kept.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<String> = Vector::new();
    /// vec.push_with(|| "in place".repeat(2)).push('!');
    /// assert_eq!(vec[0], "in placein place!");
    /// ```
    pub fn push_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        if self.len == self.cap() {
            self.grow();
        }

        // SAFETY: There is at least one free slot at len. len is only incremented once the value
        // has been written.
        unsafe {
            let mut slot = self.buf.slot(self.len);
            slot.write(f());
            self.len += 1;
            slot.as_mut()
        }
    }

    /// Push the provided value onto the end of the Vector, assuming that there is enough capacity
    /// to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the Vector has enough capacity to add the provided
    /// value, using methods like [`reserve`](Vector::reserve) or [`with_cap`](Vector::with_cap) to
    /// do so. Using this method on a Vector without enough capacity is undefined behavior.
    pub const unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: It is up to the caller to ensure that the Vector has enough capacity for this
        // push, leading to the pointer write being in bounds of the object.
        unsafe { self.buf.slot(self.len).write(value); }
        self.len += 1;
    }

    /// Pops the last value off the end of the Vector, returning an owned value if the Vector has
    /// length greater than 0. Dropping the result destroys the value.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = (0..5).collect();
    /// for i in (0..vec.len()).rev() {
    ///     assert_eq!(vec.pop(), Some(i));
    /// }
    /// assert_eq!(vec.pop(), None);
    /// ```
    pub const fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading.
            self.len -= 1;

            // SAFETY: len has just been decremented and the value there is initialized. It is no
            // longer considered part of the Vector, so it is moved out exactly once.
            Some(unsafe { self.buf.slot(self.len).read() })
        }
    }

    /// Drops all values past `len`, keeping the capacity. Does nothing if the Vector isn't longer
    /// than `len`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail_len = self.len - len;
        // Shorten first, so that a panicking drop can't cause the tail to be dropped twice.
        self.len = len;

        // SAFETY: The slots in len..len + tail_len were initialized and are no longer reachable.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot(len).as_ptr(),
                tail_len,
            ));
        }
    }

    /// Drops all values in the Vector without changing its capacity.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut vec = Vector::from([1, 2, 3]);
    /// vec.clear();
    /// assert!(vec.is_empty());
    /// assert_eq!(vec.cap(), 3);
    /// ```
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Inserts the provided value at the given index, growing and moving items as necessary.
    ///
    /// # Panics
    /// Panics if the provided index is greater than the length of the Vector.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut vec = Vector::from([0, 1, 2]);
    /// vec.insert(1, 100);
    /// vec.insert(1, 200);
    /// vec.insert(5, 300);
    /// assert_eq!(&*vec, &[0, 200, 100, 1, 2, 300]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value).throw()
    }

    /// Inserts the provided value at the given index, returning an [`Err`] rather than panicking
    /// if `index > len`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        if index > self.len {
            return Err(IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        if self.len == self.cap() {
            self.grow();
        }

        // SAFETY: There is room for one more value, so shifting index..len one slot to the right
        // stays in bounds. The copy handles the overlap.
        unsafe {
            let slot = self.buf.slot(index);
            ptr::copy(slot.as_ptr(), slot.add(1).as_ptr(), self.len - index);
            slot.write(value);
        }

        self.len += 1;
        Ok(())
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<_> = "Hello world!".chars().collect();
    /// assert_eq!(vec.remove(1), 'e');
    /// assert_eq!(vec.remove(4), ' ');
    /// assert_eq!(vec, "Hlloworld!".chars().collect());
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        self.try_remove(index).throw()
    }

    /// Removes the element at the provided index, returning an [`Err`] rather than panicking if
    /// it is out of bounds.
    pub fn try_remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.check_index(index)?;

        // SAFETY: index < len, so the value is initialized. After reading it, its slot is filled
        // by shifting the following values one slot to the left.
        let value = unsafe {
            let slot = self.buf.slot(index);
            let value = slot.read();
            ptr::copy(slot.add(1).as_ptr(), slot.as_ptr(), self.len - index - 1);
            value
        };

        self.len -= 1;
        Ok(value)
    }

    /// Moves all elements from `other` onto the end of self. If self needs to grow, it grows to
    /// the larger of the required capacity and double its current capacity.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn append(&mut self, mut other: Vector<T>) {
        self.try_grow_for(other.len).or_handle();

        // SAFETY: self has room for other.len more values and other holds other.len initialized
        // values. The two allocations don't overlap.
        unsafe {
            ptr::copy_nonoverlapping(
                other.buf.as_ptr().cast_const(),
                self.buf.slot(self.len).as_ptr(),
                other.len,
            );
        }

        self.len += other.len;
        // The values now belong to self. Dropping other only frees its allocation.
        other.len = 0;
    }

    /// Ensures that the Vector has capacity to hold an additional `extra` elements. After invoking
    /// this method, the capacity will be >= len + extra. When a reallocation is needed, the new
    /// capacity is exactly len + extra.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    /// The Vector is unchanged in that case.
    pub fn reserve(&mut self, extra: usize) {
        self.try_reserve(extra).or_handle()
    }

    /// Like [`reserve`](Vector::reserve), but returns an [`Err`] instead of panicking or aborting.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), TryReserveError> {
        let cap = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        self.try_ensure_cap(cap)
    }

    /// Ensures that the Vector has a capacity of at least `cap`. If it is already large enough
    /// nothing happens, otherwise all values are moved into a new allocation of exactly `cap`
    /// slots.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    /// The Vector is unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut vec: Vector<u8> = Vector::new();
    /// vec.ensure_cap(100);
    /// let ptr = vec.as_ptr();
    /// vec.resize(10, 0);
    /// assert_eq!(vec.cap(), 100);
    /// assert_eq!(vec.as_ptr(), ptr);
    /// ```
    pub fn ensure_cap(&mut self, cap: usize) {
        self.try_ensure_cap(cap).or_handle()
    }

    /// Like [`ensure_cap`](Vector::ensure_cap), but returns an [`Err`] instead of panicking or
    /// aborting.
    pub fn try_ensure_cap(&mut self, cap: usize) -> Result<(), TryReserveError> {
        if cap <= self.cap() {
            return Ok(());
        }

        self.try_realloc_with_cap(cap)
    }

    /// Shrinks the Vector so that its capacity is equal to its length.
    pub fn shrink_to_fit(&mut self) {
        self.try_realloc_with_cap(self.len).or_handle()
    }

    /// Resizes the Vector to `new_len`, filling new slots with values produced by `f`.
    ///
    /// Shrinking drops the trailing values and never reallocates. Growing beyond the capacity
    /// reallocates to exactly `new_len`.
    ///
    /// If `f` panics, every value it produced is dropped and the Vector is left exactly as it was
    /// before the call, including its capacity and storage pointer.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        if new_len <= self.cap() {
            // SAFETY: All slots in len..new_len are allocated and uninitialized.
            unsafe { fill_with(self.buf.ptr, self.len, new_len, f); }
        } else {
            // Build the tail in a separate block, so that the current one isn't touched until
            // nothing else can fail.
            let mut new_buf = RawBuf::with_cap(new_len);

            // SAFETY: All slots in len..new_len of the new block are uninitialized. If this
            // panics, new_buf is dropped and deallocated afterwards.
            unsafe { fill_with(new_buf.ptr, self.len, new_len, f); }

            // SAFETY: The first len slots of the new block are free and the first len slots of
            // the current block are initialized. The blocks don't overlap.
            unsafe {
                ptr::copy_nonoverlapping(
                    self.buf.as_ptr().cast_const(),
                    new_buf.as_ptr(),
                    self.len,
                );
            }

            // The old block now holds only bitwise copies and is just deallocated.
            self.buf.swap(&mut new_buf);
        }

        self.len = new_len;
    }

    /// Swaps the contents of two Vectors without moving any values. Never panics.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let mut a = Vector::from([1, 2]);
    /// let mut b = Vector::with_cap(8);
    /// a.swap(&mut b);
    /// assert_eq!((a.len(), a.cap()), (0, 8));
    /// assert_eq!(&*b, &[1, 2]);
    /// ```
    pub const fn swap(&mut self, other: &mut Vector<T>) {
        mem::swap(self, other);
    }

    /// Reallocates the internal RawBuf with the provided capacity, which must be at least `len`.
    ///
    /// On failure nothing is changed.
    pub(crate) fn try_realloc_with_cap(&mut self, new_cap: usize) -> Result<(), TryReserveError> {
        debug_assert!(new_cap >= self.len);
        // SAFETY: The first len values are initialized and new_cap >= len.
        unsafe { self.buf.try_relocate(self.len, new_cap) }
    }

    /// Grows the internal RawBuf to allow for the insertion of additional elements. After calling
    /// this, the Vector can take at least one more element.
    ///
    /// # Panics
    /// Panics if the memory layout of the Vector would have a size that exceeds [`isize::MAX`].
    pub(crate) fn grow(&mut self) {
        self.try_grow_for(1).or_handle()
    }

    /// Ensures room for `extra` more elements following the growth policy: when a reallocation is
    /// needed, the new capacity is the larger of `len + extra` and double the current capacity.
    /// Repeated small additions therefore only reallocate `O(log n)` times.
    ///
    /// On failure nothing is changed.
    pub(crate) fn try_grow_for(&mut self, extra: usize) -> Result<(), TryReserveError> {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        if required <= self.cap() {
            return Ok(());
        }

        let max_cap = RawBuf::<T>::max_cap();
        let doubled = cmp::max(self.cap().saturating_mul(GROWTH_FACTOR), MIN_CAP);
        let mut new_cap = cmp::max(required, doubled);

        // If we would grow past maximum capacity, instead use the maximum if it is enough.
        if new_cap > max_cap && max_cap >= required {
            new_cap = max_cap;
        }

        self.try_realloc_with_cap(new_cap)
    }

    /// Checks that the provided index is within the bounds of self.
    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }
}

/// Writes values produced by `f` into the slots `from..to` of `base`. If `f` panics, the values
/// written so far are dropped again before unwinding continues.
///
/// # Safety
/// `base` must be valid for writes for all slots in `from..to`, which must be uninitialized.
unsafe fn fill_with<T, F: FnMut() -> T>(base: NonNull<T>, from: usize, to: usize, mut f: F) {
    let mut filled = Guard::new(from, |filled: &mut usize| {
        // SAFETY: Every slot in from..filled was written below.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                base.add(from).as_ptr(),
                *filled - from,
            ));
        }
    });

    while *filled < to {
        // SAFETY: The caller ensures that the slot is valid and uninitialized.
        unsafe { base.add(*filled).write(f()); }
        *filled += 1;
    }

    filled.defuse();
}

impl<T: Clone> Vector<T> {
    /// Creates a Vector of `count` clones of `value`. If a clone panics, all clones made so far are
    /// dropped and the allocation is freed.
    ///
    /// # Examples
    /// ```
    /// # use raw_collections::collections::contiguous::Vector;
    /// let vec = Vector::repeat(&"ab", 3);
    /// assert_eq!(&*vec, &["ab", "ab", "ab"]);
    /// ```
    pub fn repeat(value: &T, count: usize) -> Vector<T> {
        Vector::repeat_with(|| value.clone(), count)
    }

    /// Creates a Vector holding a clone of every element of `values`, with capacity exactly
    /// `values.len()`.
    pub fn from_slice(values: &[T]) -> Vector<T> {
        let mut vec = Vector::with_cap(values.len());

        for value in values {
            // SAFETY: vec has been created with the right capacity.
            unsafe { vec.push_unchecked(value.clone()); }
        }

        vec
    }

    /// Resizes the Vector to `new_len`, filling new slots with clones of `value`. See
    /// [`resize_with`](Vector::resize_with) for the guarantees in case of a panic.
    pub fn resize(&mut self, new_len: usize, value: T) {
        self.resize_with(new_len, || value.clone());
    }
}

impl<T: Default> Vector<T> {
    /// Creates a Vector of `count` default values. If a constructor panics, all values created so
    /// far are dropped and the allocation is freed.
    pub fn repeat_default(count: usize) -> Vector<T> {
        Vector::repeat_with(T::default, count)
    }

    /// Resizes the Vector to `new_len`, filling new slots with default values. See
    /// [`resize_with`](Vector::resize_with) for the guarantees in case of a panic.
    pub fn resize_default(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        let iter = iter.into_iter();
        self.try_grow_for(iter.size_hint().0).or_handle();

        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Vector<T> {
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Vector<T> {
    /// Pushes each item in turn and then shrinks the Vector to fit. If the iterator panics, the
    /// items collected so far are dropped.
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut vec = Vector::with_cap(iter.size_hint().0);

        for item in iter {
            vec.push(item);
        }

        vec.shrink_to_fit();
        vec
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(value: [T; N]) -> Self {
        let mut vec = Vector::with_cap(N);

        for item in value {
            // SAFETY: vec has been created with the right capacity.
            unsafe { vec.push_unchecked(item); }
        }

        vec
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        // SAFETY: All values less than len are initialized and safe to drop. They aren't accessed
        // again afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), self.len));
        }

        // Implicitly drop self.buf, which only deallocates the owned memory.
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        // The borrow checker enforces that self isn't mutated due to this function taking a &self.
        // The total size is < isize::MAX as the result of being a valid Vector.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: Vector is valid as a slice for len values, which are all initialized. The pointer
        // is nonnull, properly aligned and the range entirely contained within this Vector.
        // The borrow checker enforces that self isn't accessed due to this function taking a
        // &mut self. The total size is < isize::MAX as the result of being a valid Vector.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for Vector<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for Vector<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Clones every value into a new Vector with the same capacity. If a clone panics, the values
    /// cloned so far are dropped.
    fn clone(&self) -> Self {
        let mut vec = Self::with_cap(self.cap());

        for value in self.iter() {
            // SAFETY: vec has the same capacity as self, which holds len <= cap values.
            unsafe { vec.push_unchecked(value.clone()); }
        }

        vec
    }

    /// Clones `source` into a temporary and swaps it into self. If a clone panics, self is
    /// unchanged. The existing allocation of self is never reused.
    fn clone_from(&mut self, source: &Self) {
        let mut temp = source.clone();
        self.swap(&mut temp);
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: Hash> Hash for Vector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
