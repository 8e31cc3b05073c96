/// A position within a chunk map, as the index of a chunk and an offset into that chunk.
///
/// Positions are ordered by chunk first and then by offset, which matches the order of the slots
/// they address. Positions only compare meaningfully when they belong to the same map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Pos<const N: usize> {
    pub chunk: usize,
    pub offset: usize,
}

impl<const N: usize> Pos<N> {
    pub const fn new(chunk: usize, offset: usize) -> Pos<N> {
        Pos {
            chunk,
            offset,
        }
    }

    /// The number of slots before this position in the map.
    pub const fn flat(self) -> usize {
        self.chunk * N + self.offset
    }

    /// The position of the following slot, moving into the next chunk if required.
    pub const fn next(self) -> Pos<N> {
        if self.offset < N - 1 {
            Pos::new(self.chunk, self.offset + 1)
        } else {
            Pos::new(self.chunk + 1, 0)
        }
    }

    /// The position of the preceding slot, moving into the previous chunk if required. Must not be
    /// called on the first slot of the map.
    pub const fn prev(self) -> Pos<N> {
        if self.offset > 0 {
            Pos::new(self.chunk, self.offset - 1)
        } else {
            Pos::new(self.chunk - 1, N - 1)
        }
    }

    /// The position `n` slots after this one.
    pub const fn add(self, n: usize) -> Pos<N> {
        if self.offset + n < N {
            Pos::new(self.chunk, self.offset + n)
        } else {
            let total = self.offset + n;
            Pos::new(self.chunk + total / N, total % N)
        }
    }

    /// The position `n` slots before this one. Must not move before the first slot of the map.
    pub const fn sub(self, n: usize) -> Pos<N> {
        if self.offset >= n {
            Pos::new(self.chunk, self.offset - n)
        } else {
            // Measure backwards from the last slot of this chunk, so that the division rounds in
            // the right direction.
            let total = n + (N - 1 - self.offset);
            Pos::new(self.chunk - total / N, N - 1 - total % N)
        }
    }

    /// The position `delta` slots away from this one, in either direction.
    pub const fn offset_by(self, delta: isize) -> Pos<N> {
        if delta < 0 {
            self.sub(delta.unsigned_abs())
        } else {
            self.add(delta.unsigned_abs())
        }
    }

    /// The signed number of slots from `origin` to this position.
    pub const fn distance(self, origin: Pos<N>) -> isize {
        (self.flat() as isize).wrapping_sub(origin.flat() as isize)
    }
}
