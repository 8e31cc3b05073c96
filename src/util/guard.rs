//! A scope guard for multi-step mutations.
//!
//! Each step that can panic is preceded by a [`Guard`] holding whatever is needed to undo the
//! steps before it. If the step unwinds, the guard runs its rollback on drop. Once all steps have
//! succeeded the guard is [defused](Guard::defuse) and the state is handed back.

use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::ptr;

pub struct Guard<S, F: FnMut(&mut S)> {
    state: S,
    rollback: F,
}

impl<S, F: FnMut(&mut S)> Guard<S, F> {
    /// Creates a new armed Guard. `rollback` is run with the held state if the Guard is dropped
    /// without being defused.
    pub const fn new(state: S, rollback: F) -> Guard<S, F> {
        Guard {
            state,
            rollback,
        }
    }

    /// Disarms the Guard, returning the held state without running the rollback.
    pub fn defuse(self) -> S {
        let mut this = ManuallyDrop::new(self);

        // SAFETY: this is wrapped in ManuallyDrop and never used again, so each field is read or
        // dropped exactly once.
        unsafe {
            ptr::drop_in_place(&mut this.rollback);
            ptr::read(&this.state)
        }
    }
}

impl<S, F: FnMut(&mut S)> Deref for Guard<S, F> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl<S, F: FnMut(&mut S)> DerefMut for Guard<S, F> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}

impl<S, F: FnMut(&mut S)> Drop for Guard<S, F> {
    fn drop(&mut self) {
        (self.rollback)(&mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::util::panic::assert_panics;

    #[test]
    fn test_rollback_on_unwind() {
        let undone = Cell::new(false);

        assert_panics!({
            let _guard = Guard::new((), |_| undone.set(true));
            panic!("step failed");
        });

        assert!(undone.get(), "An armed guard should roll back while unwinding.");
    }

    #[test]
    fn test_defuse() {
        let undone = Cell::new(false);

        let mut guard = Guard::new(1_usize, |_| undone.set(true));
        *guard += 1;

        assert_eq!(guard.defuse(), 2, "Defusing should return the held state.");
        assert!(!undone.get(), "A defused guard should never roll back.");
    }
}
