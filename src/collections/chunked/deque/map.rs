use std::ptr::{self, NonNull};

use super::Pos;
use crate::collections::raw::RawBuf;
use crate::util::error::CapacityOverflow;
use crate::util::guard::Guard;
use crate::util::result::ResultExtension;

/// The chunk map of a [`Deque`](super::Deque): an array of chunks, each of which is a [`RawBuf`]
/// of exactly `N` slots.
///
/// Every entry of the map is an allocated chunk. The map owns the chunks' memory but never the
/// values in them, which are managed by the Deque.
pub(crate) struct ChunkMap<T, const N: usize> {
    chunks: RawBuf<RawBuf<T>>,
}

impl<T, const N: usize> ChunkMap<T, N> {
    const CHUNK_SIZE_CHECK: () = assert!(N > 0, "Chunk size must be greater than zero!");

    /// Creates a ChunkMap without any chunks, which doesn't allocate.
    pub const fn new() -> ChunkMap<T, N> {
        ChunkMap {
            chunks: RawBuf::new(),
        }
    }

    /// Allocates a ChunkMap with `count` chunks. If an allocation panics, all chunks allocated so
    /// far are freed again.
    ///
    /// # Panics
    /// Panics if the memory layout size of the map would exceed [`isize::MAX`].
    pub fn with_chunks(count: usize) -> ChunkMap<T, N> {
        let () = Self::CHUNK_SIZE_CHECK;

        let chunks = RawBuf::with_cap(count);

        // SAFETY: All slots in 0..count are uninitialized.
        unsafe { alloc_chunks::<T, N>(chunks.ptr, 0, count); }

        ChunkMap {
            chunks,
        }
    }

    /// The number of chunks in the map.
    pub const fn len(&self) -> usize {
        self.chunks.cap()
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The total number of slots across all chunks.
    pub const fn slots(&self) -> usize {
        self.len() * N
    }

    /// Returns a pointer to the slot at `pos`.
    ///
    /// # Safety
    /// `pos.chunk` must be less than [`len`](ChunkMap::len) and `pos.offset` less than `N`.
    pub const unsafe fn slot(&self, pos: Pos<N>) -> NonNull<T> {
        // SAFETY: The caller ensures that pos.chunk refers to an initialized chunk and that
        // pos.offset is within it.
        unsafe { self.chunks.slot(pos.chunk).as_ref().slot(pos.offset) }
    }

    /// Grows the map by `add_front` chunks before the existing ones and `add_back` chunks after
    /// them. The existing chunks are moved into the new map by pointer, so values in them never
    /// move in memory. A position in the old map is at `add_front` chunks later in the new one.
    ///
    /// If anything panics, all newly allocated chunks are freed and the map is left as it was.
    ///
    /// # Panics
    /// Panics if the memory layout size of the new map would exceed [`isize::MAX`].
    pub fn grow(&mut self, add_front: usize, add_back: usize) {
        let () = Self::CHUNK_SIZE_CHECK;

        let old_len = self.len();
        let new_len = old_len
            .checked_add(add_front)
            .and_then(|len| len.checked_add(add_back))
            .filter(|len| len.checked_mul(N).is_some())
            .ok_or(CapacityOverflow)
            .throw();

        let mut new_chunks = RawBuf::<RawBuf<T>>::with_cap(new_len);
        let base = new_chunks.ptr;

        // SAFETY: All of these entries are uninitialized.
        unsafe { alloc_chunks::<T, N>(base, 0, add_front); }

        // Free the front chunks again if allocating the back chunks panics.
        let front = Guard::new((), |_: &mut ()| {
            // SAFETY: All chunks in 0..add_front were allocated above.
            unsafe { free_chunks(base, 0, add_front); }
        });
        // SAFETY: All of these entries are uninitialized.
        unsafe { alloc_chunks::<T, N>(base, add_front + old_len, new_len); }
        front.defuse();

        // SAFETY: The middle of the new map is uninitialized and the old map holds old_len
        // initialized chunks. The two arrays don't overlap.
        unsafe {
            ptr::copy_nonoverlapping(
                self.chunks.as_ptr().cast_const(),
                base.add(add_front).as_ptr(),
                old_len,
            );
        }

        // The old array now holds bitwise copies of chunks owned by the new one, so it is only
        // deallocated.
        self.chunks.swap(&mut new_chunks);
    }
}

impl<T, const N: usize> Drop for ChunkMap<T, N> {
    fn drop(&mut self) {
        // SAFETY: Every entry of the map is an allocated chunk.
        unsafe { free_chunks(self.chunks.ptr, 0, self.len()); }
    }
}

/// Allocates a chunk of `N` slots into each entry in `from..to` of a map. If an allocation panics,
/// the chunks allocated so far are freed.
///
/// # Safety
/// `base` must be valid for writes for every entry in `from..to`, which must be uninitialized.
unsafe fn alloc_chunks<T, const N: usize>(base: NonNull<RawBuf<T>>, from: usize, to: usize) {
    let mut built = Guard::new(from, |built: &mut usize| {
        // SAFETY: Every entry in from..built was written below.
        unsafe { free_chunks(base, from, *built); }
    });

    while *built < to {
        // SAFETY: The caller ensures that the entry is valid and uninitialized.
        unsafe { base.add(*built).write(RawBuf::with_cap(N)); }
        *built += 1;
    }

    built.defuse();
}

/// Frees the chunks in `from..to` of a map, without touching the values in them.
///
/// # Safety
/// Every entry in `from..to` must be an allocated chunk, which isn't used afterwards.
unsafe fn free_chunks<T>(base: NonNull<RawBuf<T>>, from: usize, to: usize) {
    // SAFETY: Upheld by the caller. Dropping a RawBuf only deallocates it.
    unsafe {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(from).as_ptr(), to - from));
    }
}
