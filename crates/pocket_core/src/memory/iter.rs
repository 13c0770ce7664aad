//! # Owning Iterator
//!
//! By-value iteration over a [`TinyBuffer`], front to back.

// SAFETY: The iterator takes over the buffer's raw storage and tracks the
// still-live window by hand.
#![allow(unsafe_code)]

use core::fmt;
use core::iter::FusedIterator;
use core::mem::MaybeUninit;
use core::slice;

use super::tiny_buffer::TinyBuffer;

/// An iterator that moves elements out of a [`TinyBuffer`].
///
/// Elements not yielded are dropped with the iterator, each exactly once.
pub struct IntoIter<T, const N: usize> {
    /// Storage taken over from the buffer.
    storage: [MaybeUninit<T>; N],
    /// Slots `[front, back)` are still live.
    front: usize,
    back: usize,
}

impl<T, const N: usize> IntoIter<T, N> {
    /// Returns the elements not yet yielded.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        let live = &self.storage[self.front..self.back];
        // SAFETY: slots [front, back) are initialized and `MaybeUninit<T>`
        // has the layout of `T`.
        unsafe { slice::from_raw_parts(live.as_ptr().cast::<T>(), live.len()) }
    }
}

impl<T, const N: usize> IntoIterator for TinyBuffer<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        let (storage, len) = self.into_raw_parts();
        IntoIter {
            storage,
            front: 0,
            back: len,
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        let index = self.front;
        self.front += 1;
        // SAFETY: the slot was inside the live window and has just left it,
        // so it is read exactly once.
        Some(unsafe { self.storage[index].assume_init_read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        let index = self.back;
        // SAFETY: as in `next`, from the other end of the window.
        Some(unsafe { self.storage[index].assume_init_read() })
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        if core::mem::needs_drop::<T>() {
            self.by_ref().for_each(drop);
        }
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_into_iter_order() {
        let buf: TinyBuffer<u32, 4> = TinyBuffer::try_from(&[1, 2, 3][..]).unwrap();
        let mut iter = buf.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.as_slice(), &[2]);
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_partial_iteration_drops_rest_once() {
        let drops = Rc::new(Cell::new(0));
        let mut buf: TinyBuffer<DropCounter, 4> = TinyBuffer::new();
        for _ in 0..4 {
            assert!(buf.push_back(DropCounter(Rc::clone(&drops))));
        }

        let mut iter = buf.into_iter();
        let first = iter.next();
        assert_eq!(drops.get(), 0);

        drop(iter);
        assert_eq!(drops.get(), 3);

        drop(first);
        assert_eq!(drops.get(), 4);
    }
}
