//! Element types for observing how collections construct, clone and drop their contents.
#![cfg(test)]

use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSizedType;

#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// Tracks the number of live instances sharing the same counter. Every construction (including
/// clones) increments it and every drop decrements it.
#[derive(Debug)]
pub struct InstanceCounter(Rc<Cell<usize>>);

impl InstanceCounter {
    pub fn new(counter: &Rc<Cell<usize>>) -> InstanceCounter {
        counter.set(counter.get() + 1);
        InstanceCounter(Rc::clone(counter))
    }
}

impl Clone for InstanceCounter {
    fn clone(&self) -> Self {
        InstanceCounter::new(&self.0)
    }
}

impl Drop for InstanceCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

thread_local! {
    static UNTIL_THROW: Cell<usize> = const { Cell::new(usize::MAX) };
    static LIVE: Cell<usize> = const { Cell::new(0) };
}

/// A value whose [`Default`] and [`Clone`] implementations panic once a thread-local countdown
/// reaches zero. The countdown is decremented on every attempted construction.
///
/// The value owns a heap allocation so that leaks and double drops are visible to tools like Miri,
/// and the number of live instances per thread is tracked by [`Throwable::live`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Throwable {
    pub marker: Box<usize>,
}

impl Throwable {
    /// Creates a Throwable directly. This never panics and doesn't touch the countdown.
    pub fn new(marker: usize) -> Throwable {
        LIVE.set(LIVE.get() + 1);
        Throwable {
            marker: Box::new(marker),
        }
    }

    /// The construction which will panic, counting from 1. An argument of 1 makes the next
    /// construction panic.
    pub fn arm(until_throw: usize) {
        UNTIL_THROW.set(until_throw);
    }

    pub fn disarm() {
        UNTIL_THROW.set(usize::MAX);
    }

    /// The number of Throwables alive on this thread.
    pub fn live() -> usize {
        LIVE.get()
    }

    fn countdown() {
        let left = UNTIL_THROW.get().saturating_sub(1);
        UNTIL_THROW.set(left);

        if left == 0 {
            UNTIL_THROW.set(usize::MAX);
            panic!("Throwable construction failed!");
        }
    }
}

impl Default for Throwable {
    fn default() -> Self {
        Throwable::countdown();
        Throwable::new(0)
    }
}

impl Clone for Throwable {
    fn clone(&self) -> Self {
        Throwable::countdown();
        Throwable::new(*self.marker)
    }
}

impl Drop for Throwable {
    fn drop(&mut self) {
        LIVE.set(LIVE.get() - 1);
    }
}
