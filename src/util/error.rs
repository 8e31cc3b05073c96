use std::alloc::Layout;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// The global allocator returned null for the contained [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocFailure {
    pub layout: Layout,
}

impl Display for AllocFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to allocate {} bytes with alignment {}!",
            self.layout.size(),
            self.layout.align(),
        )
    }
}

impl Error for AllocFailure {}

/// The reasons that a request for more slots can fail without touching the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum TryReserveError {
    CapacityOverflow(CapacityOverflow),
    AllocFailure(AllocFailure),
}

impl TryReserveError {
    /// Reports the error the way the panicking methods do: a capacity overflow panics while an
    /// allocation failure is passed on to [`handle_alloc_error`](std::alloc::handle_alloc_error).
    pub(crate) fn handle(self) -> ! {
        match self {
            TryReserveError::CapacityOverflow(err) => panic!("{}", err),
            TryReserveError::AllocFailure(AllocFailure { layout }) => {
                std::alloc::handle_alloc_error(layout)
            },
        }
    }
}
