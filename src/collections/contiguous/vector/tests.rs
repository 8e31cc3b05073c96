#![cfg(test)]

use std::cell::Cell;
use std::hash::{BuildHasher, RandomState};
use std::iter;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;
use crate::util::panic::assert_panics;
use crate::util::tracking::{CountedDrop, InstanceCounter, Throwable, ZeroSizedType};

#[test]
fn test_zst_support() {
    let mut vec = Vector::<ZeroSizedType>::new();
    for _ in 0..10 {
        vec.push(ZeroSizedType);
    }

    assert_eq!(vec.len(), 10);
    assert_eq!(vec[9], ZeroSizedType, "Indexing ZSTs should work.");

    let old_ptr = vec.as_ptr();
    vec.ensure_cap(1000);
    assert_eq!(vec.as_ptr(), old_ptr, "Pointer shouldn't change when reallocated for a ZST.");
    assert_eq!(vec.pop(), Some(ZeroSizedType));
    assert_eq!(vec.len(), 9);
}

#[test]
fn test_growth_policy() {
    let mut vec = Vector::new();
    assert_eq!(vec.cap(), 0, "A new Vector shouldn't allocate.");

    let mut reallocations = 0;
    let mut old_ptr = vec.as_ptr();
    let mut old_cap = vec.cap();

    for i in 0..1000_usize {
        vec.push(i);

        if vec.as_ptr() != old_ptr {
            reallocations += 1;
            assert_eq!(
                vec.cap(),
                (old_cap * 2).max(1),
                "Growth should double the capacity (or allocate a single slot)."
            );
            assert!(vec.cap() <= 2 * vec.len(), "Capacity should be at most twice the length.");
            old_ptr = vec.as_ptr();
            old_cap = vec.cap();
        }

        assert!(vec.len() <= vec.cap());
    }

    // 1, 2, 4, ..., 1024
    assert_eq!(reallocations, 11, "Growth should reallocate O(log n) times.");
    assert!((0..1000).eq(vec.iter().copied()), "Growth should preserve all values in order.");
}

#[test]
fn test_pop() {
    let mut vec = Vector::from([1, 2, 3, 4, 5]);
    assert_eq!(vec.pop(), Some(5));
    assert_eq!(vec.pop(), Some(4));
    assert_eq!(vec.len(), 3);
    assert_eq!(&*vec, &[1, 2, 3]);
    assert_eq!(vec.cap(), 5, "Popping should never shrink the Vector.");

    let mut empty = Vector::<u8>::new();
    assert_eq!(empty.pop(), None, "Popping an empty Vector should do nothing.");
    assert_eq!(empty.cap(), 0);
}

#[test]
fn test_reserve_and_resize() {
    let mut vec = Vector::<u32>::new();
    vec.ensure_cap(100);
    let old_ptr = vec.as_ptr();

    vec.resize(10, 7);
    assert_eq!(vec.len(), 10);
    assert_eq!(vec.cap(), 100, "Resizing within capacity shouldn't reallocate.");
    assert_eq!(vec.as_ptr(), old_ptr);
    assert!(vec.iter().all(|v| *v == 7));

    vec.ensure_cap(50);
    vec.reserve(90);
    vec.resize(10, 0);
    assert_eq!(vec.cap(), 100, "Reserving less than the capacity should do nothing.");
    assert_eq!(vec.as_ptr(), old_ptr, "No-op reserve and resize shouldn't reallocate.");

    vec.reserve(91);
    assert_eq!(vec.cap(), 101, "Reserve should grow to exactly len + extra.");

    vec.resize_default(3);
    assert_eq!(&*vec, &[7, 7, 7]);
    assert_eq!(vec.cap(), 101, "Shrinking with resize should keep the capacity.");

    vec.resize_default(200);
    assert_eq!(vec.cap(), 200, "Resizing past capacity should allocate exactly new_len.");
    assert_eq!(&vec[..4], &[7, 7, 7, 0]);

    assert!(vec.try_reserve(usize::MAX).is_err_and(|e| e.is_capacity_overflow()));
    assert_eq!(vec.cap(), 200, "A failed reserve should leave the Vector untouched.");
}

#[test]
fn test_shrink_to_fit() {
    let mut vec = Vector::with_cap(10);
    vec.extend([1, 2, 3]);
    vec.shrink_to_fit();
    assert_eq!(vec.cap(), 3);
    assert_eq!(&*vec, &[1, 2, 3]);

    vec.clear();
    vec.shrink_to_fit();
    assert_eq!(vec.cap(), 0);
}

#[test]
fn test_from_iter_shrinks() {
    let vec: Vector<_> = (0..100).filter(|i| i % 3 == 0).collect();
    assert_eq!(vec.len(), 34);
    assert_eq!(vec.cap(), vec.len(), "Collecting should shrink to an exact fit.");
}

#[test]
fn test_checked_access() {
    let mut vec = Vector::from([10, 20, 30]);

    assert_eq!(*vec.get(1), 20);
    assert_eq!(vec.try_get(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    *vec.get_mut(0) += 1;
    assert_eq!(vec.front(), Some(&11));
    assert_eq!(vec.back(), Some(&30));

    assert_panics!({
        vec.get(3);
    });
    assert_eq!(&*vec, &[11, 20, 30], "A failed access should never modify the Vector.");

    let empty = Vector::<u8>::new();
    assert_eq!(empty.front(), None);
    assert!(empty.try_get(0).is_err());
}

#[test]
fn test_insert_and_remove() {
    let mut vec = Vector::from([0, 1, 2]);
    vec.insert(3, 3);
    vec.insert(0, -1);
    assert_eq!(&*vec, &[-1, 0, 1, 2, 3]);

    assert!(vec.try_insert(6, 0).is_err());
    assert_eq!(vec.remove(0), -1);
    assert_eq!(vec.remove(3), 3);
    assert_eq!(&*vec, &[0, 1, 2]);
    assert!(vec.try_remove(3).is_err());
}

#[test]
fn test_append() {
    let counter = CountedDrop::new(0);
    let mut a = Vector::repeat(&counter, 3);
    let b = Vector::repeat(&counter, 4);

    a.append(b);
    assert_eq!(a.len(), 7);
    assert_eq!(*counter.borrow(), 0, "Appending shouldn't drop any values.");

    drop(a);
    assert_eq!(*counter.borrow(), 7, "Every appended value should be dropped exactly once.");
}

#[test]
fn test_bulk_additions_follow_growth_policy() {
    fn count_reallocations(mut add: impl FnMut(&mut Vector<usize>, usize)) -> Vector<usize> {
        let mut vec = Vector::new();
        let mut reallocations = 0;
        let mut old_ptr = vec.as_ptr();

        for i in 0..1000 {
            add(&mut vec, i);
            if vec.as_ptr() != old_ptr {
                reallocations += 1;
                old_ptr = vec.as_ptr();
            }
        }

        // 1, 2, 4, ..., 1024
        assert_eq!(reallocations, 11, "Small additions should reallocate O(log n) times.");
        vec
    }

    let extended = count_reallocations(|vec, i| vec.extend([i]));
    assert!((0..1000).eq(extended.iter().copied()));

    let appended = count_reallocations(|vec, i| vec.append(Vector::from([i])));
    assert!((0..1000).eq(appended.iter().copied()));
    assert_eq!(appended.cap(), 1024);

    let mut vec = Vector::from([0_usize; 4]);
    vec.extend([1_usize; 10]);
    assert_eq!(vec.cap(), 14, "A large addition should grow to exactly the required capacity.");
}

#[test]
fn test_swap() {
    let mut a = Vector::from([1, 2, 3]);
    let mut b = Vector::with_cap(10);
    b.push(4);
    let (a_ptr, b_ptr) = (a.as_ptr(), b.as_ptr());

    a.swap(&mut b);
    assert_eq!((&*a, a.cap(), a.as_ptr()), (&[4][..], 10, b_ptr));
    assert_eq!((&*b, b.cap(), b.as_ptr()), (&[1, 2, 3][..], 3, a_ptr));

    b.swap(&mut a);
    assert_eq!((&*a, a.cap(), a.as_ptr()), (&[1, 2, 3][..], 3, a_ptr));
    assert_eq!((&*b, b.cap(), b.as_ptr()), (&[4][..], 10, b_ptr));
}

#[test]
fn test_move_leaves_empty() {
    let mut vec = Vector::from([1, 2, 3]);
    let moved = std::mem::take(&mut vec);

    assert_eq!(&*moved, &[1, 2, 3]);
    assert_eq!((vec.len(), vec.cap()), (0, 0), "A moved-from Vector should be empty.");
}

#[test]
fn test_instance_counts() {
    let live = Rc::new(Cell::new(0));
    let value = InstanceCounter::new(&live);

    {
        let vec = Vector::repeat(&value, 10);
        assert_eq!(live.get(), 11);

        let copy = vec.clone();
        assert_eq!(live.get(), 21);
        assert_eq!(copy.cap(), vec.cap(), "A clone should keep the capacity.");

        let mut other = Vector::repeat(&value, 100);
        other.clone_from(&vec);
        assert_eq!(live.get(), 31, "Clone-assignment should drop the previous values.");

        let moved = other;
        assert_eq!(moved.len(), 10);
        assert_eq!(live.get(), 31, "Moving shouldn't create or drop values.");
    }
    assert_eq!(live.get(), 1);

    let mut vec = Vector::repeat(&value, 10);
    vec.clear();
    assert_eq!(live.get(), 1, "Clearing should drop every value.");
    assert_eq!(vec.cap(), 10, "Clearing should keep the capacity.");

    vec.extend(iter::repeat_n(&value, 20).cloned());
    vec.truncate(5);
    vec.shrink_to_fit();
    assert_eq!(live.get(), 6);
    drop(vec);
    assert_eq!(live.get(), 1);
}

#[test]
fn test_construction_is_atomic() {
    let live = Throwable::live();

    Throwable::arm(5);
    assert_panics!({
        Vector::<Throwable>::repeat_default(10);
    });
    assert_eq!(Throwable::live(), live, "A failed construction should drop every new value.");

    let value = Throwable::new(3);
    Throwable::arm(5);
    assert_panics!({
        Vector::repeat(&value, 10);
    });
    assert_eq!(Throwable::live(), live + 1);

    let values = Vector::repeat(&value, 100);
    Throwable::arm(50);
    assert_panics!({
        let _: Vector<Throwable> = values.iter().cloned().collect();
    });
    Throwable::arm(50);
    assert_panics!({
        values.clone();
    });
    assert_eq!(Throwable::live(), live + 101);
}

#[test]
fn test_clone_from_is_strong() {
    let source = Vector::repeat_with(|| Throwable::new(1), 10);
    let mut target = Vector::repeat_with(|| Throwable::new(2), 35);
    let old_ptr = target.as_ptr();

    Throwable::arm(5);
    assert_panics!({
        target.clone_from(&source);
    });

    assert_eq!((target.len(), target.cap()), (35, 35));
    assert_eq!(target.as_ptr(), old_ptr, "A failed clone_from should keep the old storage.");
    assert!(target.iter().all(|v| *v.marker == 2));
}

#[test]
fn test_push_is_panic_safe() {
    let mut vec = Vector::repeat_with(|| Throwable::new(1), 4);
    assert_eq!(vec.len(), vec.cap(), "The Vector should be full.");
    let old_ptr = vec.as_ptr();

    // Cloning happens before the push, so the Vector isn't touched at all.
    Throwable::arm(1);
    assert_panics!({
        let value = vec[0].clone();
        vec.push(value);
    });
    assert_eq!((vec.len(), vec.cap(), vec.as_ptr()), (4, 4, old_ptr));

    // Growth happens first, then construction fails. Values and length are kept.
    Throwable::arm(1);
    assert_panics!({
        vec.push_with(Throwable::default);
    });
    assert_eq!(vec.len(), 4);
    assert_eq!(vec.cap(), 8);
    assert!(vec.iter().all(|v| *v.marker == 1));

    vec.push_with(|| Throwable::new(2));
    assert_eq!(*vec[4].marker, 2);
}

#[test]
fn test_resize_is_strong() {
    let live = Throwable::live();
    let mut vec = Vector::<Throwable>::repeat_default(90);
    let cap = vec.cap();
    let old_ptr = vec.as_ptr();

    vec.resize_default(90);
    vec.resize_default(50);
    vec.resize_default(10);
    assert_eq!((vec.len(), vec.cap(), vec.as_ptr()), (10, cap, old_ptr));

    Throwable::arm(10);
    assert_panics!({
        vec.resize_default(200);
    });
    assert_eq!((vec.len(), vec.cap(), vec.as_ptr()), (10, cap, old_ptr));
    assert_eq!(Throwable::live(), live + 10, "Values built before the panic should be dropped.");

    Throwable::arm(10);
    assert_panics!({
        vec.resize_default(50);
    });
    assert_eq!((vec.len(), vec.cap(), vec.as_ptr()), (10, cap, old_ptr));
    assert_eq!(Throwable::live(), live + 10);

    vec.resize_with(200, || Throwable::new(5));
    assert_eq!((vec.len(), vec.cap()), (200, 200));
    assert_eq!(*vec[199].marker, 5);
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let vec = Vector::from_iter(iter::repeat_with(|| counter.clone()).take(10));

    drop(vec);

    assert_eq!(counter.take(), 10, "10 elements should have been dropped.");
}

#[test]
fn test_equality_and_hash() {
    let vec = Vector::from([0_usize, 1, 2, 3, 4]);

    assert_eq!(
        vec,
        (0..5).collect(),
        "Different construction methods should produce equal results."
    );
    assert_ne!(vec, Vector::from([0, 1, 2, 5, 4]));

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&vec),
        state.hash_one([0_usize, 1, 2, 3, 4]),
        "Borrow hash equality should be upheld."
    );
}

#[test]
fn test_iterators() {
    let mut vec = Vector::from([0_usize, 1, 2, 3, 4]);

    for i in &mut vec {
        *i *= 2;
    }
    assert_eq!(&*vec, &[0, 2, 4, 6, 8]);
    assert!(vec.iter().rev().copied().eq([8, 6, 4, 2, 0]));

    let mut iter = vec.iter();
    assert_eq!(iter.nth(2), Some(&4), "Borrowed iteration should allow random access.");
    assert_eq!(iter.len(), 2);

    let mut iter = vec.clone().into_iter();
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(8));
    assert_eq!(iter.as_slice(), &[2, 4, 6]);
    assert_eq!(iter.nth(1), Some(4));
    assert_eq!(iter.nth_back(0), Some(6));
    assert_eq!(iter.next(), None);

    let counter = CountedDrop::new(0);
    let vec: Vector<_> = iter::repeat_with(|| counter.clone()).take(10).collect();
    let mut iter = vec.into_iter();
    iter.nth(3);
    assert_eq!(counter.take(), 4, "Skipped values should be dropped.");
    drop(iter);
    assert_eq!(counter.take(), 6, "Dropping an owned iterator should drop all elements.");
}

#[test]
fn test_display() {
    let vec = Vector::from([1, 2]);
    assert_eq!(vec.to_string(), "[1, 2]");
    assert_eq!(format!("{:?}", vec), "Vector { contents: [1, 2], len: 2, cap: 2 }");
}

#[derive(Debug, Clone)]
enum Op {
    Push(u8),
    Pop,
    Insert(usize, u8),
    Remove(usize),
    Resize(usize, u8),
    Reserve(usize),
    Shrink,
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Push),
        Just(Op::Pop),
        (0_usize..64, any::<u8>()).prop_map(|(i, v)| Op::Insert(i, v)),
        (0_usize..64).prop_map(Op::Remove),
        (0_usize..64, any::<u8>()).prop_map(|(n, v)| Op::Resize(n, v)),
        (0_usize..64).prop_map(Op::Reserve),
        Just(Op::Shrink),
        Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn matches_reference_model(ops in prop::collection::vec(arb_op(), 0..200)) {
        let mut vec = Vector::new();
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    vec.push(v);
                    model.push(v);
                },
                Op::Pop => {
                    prop_assert_eq!(vec.pop(), model.pop());
                },
                Op::Insert(i, v) => {
                    let i = i.min(model.len());
                    vec.insert(i, v);
                    model.insert(i, v);
                },
                Op::Remove(i) => {
                    if i < model.len() {
                        prop_assert_eq!(vec.remove(i), model.remove(i));
                    } else {
                        prop_assert!(vec.try_remove(i).is_err());
                    }
                },
                Op::Resize(n, v) => {
                    vec.resize(n, v);
                    model.resize(n, v);
                },
                Op::Reserve(n) => {
                    vec.reserve(n);
                    prop_assert!(vec.cap() >= vec.len() + n);
                },
                Op::Shrink => {
                    vec.shrink_to_fit();
                    prop_assert_eq!(vec.cap(), vec.len());
                },
                Op::Clear => {
                    vec.clear();
                    model.clear();
                },
            }

            prop_assert!(vec.len() <= vec.cap());
            prop_assert_eq!(&*vec, &model[..]);
        }
    }

    #[test]
    fn swap_is_symmetric(
        a in prop::collection::vec(any::<i32>(), 0..50),
        b in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let mut va: Vector<i32> = a.iter().copied().collect();
        let mut vb: Vector<i32> = b.iter().copied().collect();

        va.swap(&mut vb);
        prop_assert_eq!(&*va, &b[..]);
        vb.swap(&mut va);
        prop_assert_eq!(&*va, &a[..]);
        prop_assert_eq!(&*vb, &b[..]);
    }
}
