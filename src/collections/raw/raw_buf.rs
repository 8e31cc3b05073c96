use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::util::error::{AllocFailure, CapacityOverflow, TryReserveError};
use crate::util::result::ReserveResultExtension;

const MAX_SIZE: usize = isize::MAX as usize;

/// An owned, uninitialized block of `cap` slots for values of type `T`.
///
/// RawBuf only manages memory. It never constructs, reads or drops the values in its slots, which
/// is left to the collection that owns it. Dropping a RawBuf deallocates the block without
/// touching its contents, so the owner must have dropped or moved out every live value first.
///
/// A RawBuf with a capacity of zero, or one holding a zero-sized type, owns no allocation and uses
/// a dangling pointer instead.
pub struct RawBuf<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RawBuf<T> {
    /// Creates a new RawBuf with capacity 0, without allocating.
    pub const fn new() -> RawBuf<T> {
        RawBuf {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a new RawBuf with exactly `cap` slots.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub fn with_cap(cap: usize) -> RawBuf<T> {
        Self::try_with_cap(cap).or_handle()
    }

    /// Allocates a new RawBuf with exactly `cap` slots, returning an [`Err`] instead of panicking
    /// or aborting.
    pub fn try_with_cap(cap: usize) -> Result<RawBuf<T>, TryReserveError> {
        let layout = Self::make_layout(cap)?;

        Ok(RawBuf {
            ptr: Self::make_ptr(layout)?,
            cap,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of slots in the RawBuf.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns a raw pointer to the first slot. The pointer is dangling when nothing is allocated.
    pub const fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns a pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be less than or equal to [`cap`](RawBuf::cap). A pointer equal to `cap` is one
    /// past the end and must not be read or written.
    pub const unsafe fn slot(&self, index: usize) -> NonNull<T> {
        // SAFETY: The caller ensures that index is within (or one past) the allocated block.
        unsafe { self.ptr.add(index) }
    }

    /// The largest capacity a RawBuf of `T` can have.
    pub const fn max_cap() -> usize {
        if size_of::<T>() == 0 {
            usize::MAX
        } else {
            MAX_SIZE / size_of::<T>()
        }
    }

    /// Moves the first `len` values into a newly allocated block of `new_cap` slots and frees the
    /// old block.
    ///
    /// If the allocation fails, self is left untouched. Moving values can't fail, so once the new
    /// block exists the relocation always completes.
    ///
    /// # Safety
    /// `len` must be less than or equal to both the current capacity and `new_cap`, and the first
    /// `len` slots must be initialized.
    pub unsafe fn try_relocate(
        &mut self,
        len: usize,
        new_cap: usize,
    ) -> Result<(), TryReserveError> {
        if new_cap == self.cap {
            return Ok(());
        }

        let new_buf = Self::try_with_cap(new_cap)?;

        // SAFETY: Both blocks are valid for len values as guaranteed by the caller. They are
        // separate allocations (or dangling for zero-sized types) and therefore don't overlap.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_buf.ptr.as_ptr(), len);
        }

        // The old block only contains bitwise copies now, dropping it deallocates without
        // dropping any values.
        drop(mem::replace(self, new_buf));
        Ok(())
    }

    /// The panicking counterpart to [`try_relocate`](RawBuf::try_relocate).
    ///
    /// # Safety
    /// See [`try_relocate`](RawBuf::try_relocate).
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub unsafe fn relocate(&mut self, len: usize, new_cap: usize) {
        // SAFETY: Upheld by the caller.
        unsafe { self.try_relocate(len, new_cap) }.or_handle()
    }

    /// Swaps the allocations of two RawBufs without touching their contents.
    pub const fn swap(&mut self, other: &mut RawBuf<T>) {
        mem::swap(self, other);
    }

    /// A helper function to create a [`Layout`] for use during allocation, containing `cap` number
    /// of elements of type `T`.
    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow)
    }

    /// A helper function to create a [`NonNull`] for the provided [`Layout`]. Returns a dangling
    /// pointer for a zero-sized layout.
    pub(crate) fn make_ptr(layout: Layout) -> Result<NonNull<T>, AllocFailure> {
        if layout.size() == 0 {
            Ok(NonNull::dangling())
        } else {
            // SAFETY: Zero-sized layouts have been guarded against.
            let raw_ptr = unsafe { alloc::alloc(layout) };
            NonNull::new(raw_ptr.cast()).ok_or(AllocFailure { layout })
        }
    }
}

impl<T> Default for RawBuf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        // The layout was valid when this block was allocated, so it is still valid now.
        if let Ok(layout) = Self::make_layout(self.cap) {
            if layout.size() != 0 {
                // SAFETY: ptr was allocated in the global allocator with this exact layout.
                // Zero-sized layouts aren't allocated and are guarded against deallocation.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
            }
        }
    }
}

// SAFETY: A RawBuf uniquely owns its allocation and is therefore safe for Send when T: Send.
unsafe impl<T: Send> Send for RawBuf<T> {}
// SAFETY: RawBuf has no interior mutability of its own. Access to the slots is mediated by the
// owning collection.
unsafe impl<T: Sync> Sync for RawBuf<T> {}
