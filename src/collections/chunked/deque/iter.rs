use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::{ChunkMap, Deque, Pos};

/// An iterator over references to the values of a [`Deque`], from front to back.
pub struct Iter<'a, T, const N: usize> {
    map: &'a ChunkMap<T, N>,
    front: Pos<N>,
    back: Pos<N>,
}

impl<'a, T, const N: usize> Iter<'a, T, N> {
    pub(crate) const fn new(
        map: &'a ChunkMap<T, N>,
        front: Pos<N>,
        back: Pos<N>,
    ) -> Iter<'a, T, N> {
        Iter {
            map,
            front,
            back,
        }
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        // SAFETY: front is within front..back, all of which are initialized values that outlive
        // 'a.
        let value = unsafe { self.map.slot(self.front).as_ref() };
        self.front = self.front.next();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.front = self.back;
            return None;
        }

        self.front = self.front.add(n);
        self.next()
    }
}

impl<'a, T, const N: usize> DoubleEndedIterator for Iter<'a, T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back = self.back.prev();
        // SAFETY: back is now within front..back and initialized.
        Some(unsafe { self.map.slot(self.back).as_ref() })
    }

    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.back = self.front;
            return None;
        }

        self.back = self.back.sub(n);
        self.next_back()
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {
    fn len(&self) -> usize {
        self.back.flat() - self.front.flat()
    }
}

impl<T, const N: usize> FusedIterator for Iter<'_, T, N> {}

impl<T, const N: usize> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        Iter::new(self.map, self.front, self.back)
    }
}

impl<T: Debug, const N: usize> Debug for Iter<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over mutable references to the values of a [`Deque`], from front to back.
pub struct IterMut<'a, T, const N: usize> {
    map: &'a ChunkMap<T, N>,
    front: Pos<N>,
    back: Pos<N>,
    _phantom: PhantomData<&'a mut T>,
}

impl<'a, T, const N: usize> IterMut<'a, T, N> {
    /// The caller must hold a unique borrow of the Deque owning `map` for `'a`.
    pub(crate) const fn new(
        map: &'a ChunkMap<T, N>,
        front: Pos<N>,
        back: Pos<N>,
    ) -> IterMut<'a, T, N> {
        IterMut {
            map,
            front,
            back,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T, const N: usize> Iterator for IterMut<'a, T, N> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        // SAFETY: front is an initialized value within the uniquely borrowed Deque. It is yielded
        // at most once, because front only moves forward.
        let value = unsafe { self.map.slot(self.front).as_mut() };
        self.front = self.front.next();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.front = self.back;
            return None;
        }

        self.front = self.front.add(n);
        self.next()
    }
}

impl<'a, T, const N: usize> DoubleEndedIterator for IterMut<'a, T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back = self.back.prev();
        // SAFETY: back is now an initialized value within front..back, yielded at most once.
        Some(unsafe { self.map.slot(self.back).as_mut() })
    }

    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.len() {
            self.back = self.front;
            return None;
        }

        self.back = self.back.sub(n);
        self.next_back()
    }
}

impl<T, const N: usize> ExactSizeIterator for IterMut<'_, T, N> {
    fn len(&self) -> usize {
        self.back.flat() - self.front.flat()
    }
}

impl<T, const N: usize> FusedIterator for IterMut<'_, T, N> {}

impl<T: Debug, const N: usize> Debug for IterMut<'_, T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(Iter::new(self.map, self.front, self.back))
            .finish()
    }
}

// SAFETY: IterMut behaves like a &mut T for each value.
unsafe impl<T: Send, const N: usize> Send for IterMut<'_, T, N> {}
// SAFETY: IterMut only hands out shared access through &self.
unsafe impl<T: Sync, const N: usize> Sync for IterMut<'_, T, N> {}

/// An owning iterator over the values of a [`Deque`]. Values are popped from either end, so any
/// values left over are dropped with the Deque.
pub struct IntoIter<T, const N: usize> {
    deque: Deque<T, N>,
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back()
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T: Debug, const N: usize> Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque.iter()).finish()
    }
}

impl<T, const N: usize> IntoIterator for Deque<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            deque: self,
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Deque<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut Deque<T, N> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
