//! # Tiny Buffer
//!
//! A fixed-capacity sequence that lives entirely inline: on the stack, or as
//! a plain field inside the entity that owns it.

// SAFETY: This module constructs and destroys elements by hand inside
// uninitialized inline storage. Every unsafe block states the invariant it
// relies on.
#![allow(unsafe_code)]
//!
//! ## Layout
//!
//! ```text
//! TinyBuffer<T, 4> with len = 2:
//! [ T0 | T1 | ?? | ?? ] len: u8
//!   live      uninit
//! ```
//!
//! Slots `[0, len)` hold live values. Slots `[len, N)` are raw bytes and are
//! never read as `T`. Values never move once written; growth and removal
//! happen only at the tail.
//!
//! ## Teardown Cost
//!
//! Whether elements need dropping is decided once per instantiation through
//! [`core::mem::needs_drop`]. A buffer of integers clears by resetting its
//! counter. A buffer of resource-owning values runs exactly one destructor
//! per live element, tail to front.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, ManuallyDrop, MaybeUninit};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr;
use core::slice;

use crate::error::{BufferResult, TinyBufferError};

/// A fixed-capacity, inline, value-semantic sequence of up to `N` elements.
///
/// Never allocates. Pushing onto a full buffer is an expected condition and is
/// reported through the return value, not a panic.
///
/// `N` must not exceed 255: the live count is stored in a single byte.
///
/// # Access Policy
///
/// Every accessor is bounds-checked. [`get`](Self::get) and
/// [`back`](Self::back) report [`TinyBufferError::OutOfRange`] and
/// [`TinyBufferError::Empty`]; the `Index` operator panics with the same
/// message. [`pop_back`](Self::pop_back) on an empty buffer is a no-op.
///
/// # Thread Safety
///
/// No internal synchronization. Give each owner its own buffer.
///
/// # Example
///
/// ```rust
/// use pocket_core::TinyBuffer;
///
/// let mut targets: TinyBuffer<(u8, u8), 3> = TinyBuffer::new();
/// assert!(targets.push_back((4, 7)));
/// assert!(targets.push_back((5, 7)));
///
/// assert_eq!(targets.back(), Ok(&(5, 7)));
/// targets.pop_back();
/// assert_eq!(targets.len(), 1);
/// ```
pub struct TinyBuffer<T, const N: usize> {
    /// Inline storage. Only the first `len` slots are initialized.
    storage: [MaybeUninit<T>; N],
    /// Number of live elements.
    len: u8,
}

impl<T, const N: usize> TinyBuffer<T, N> {
    /// Maximum number of elements the buffer can hold.
    pub const CAPACITY: usize = N;

    /// Resolved per element type; false means teardown is a counter reset.
    const NEEDS_DROP: bool = mem::needs_drop::<T>();

    const CAPACITY_FITS_COUNTER: () = assert!(
        N <= u8::MAX as usize,
        "TinyBuffer capacity must fit in a u8"
    );

    /// Creates an empty buffer. No element is constructed.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_FITS_COUNTER;
        Self {
            // SAFETY: an array of `MaybeUninit` is valid without initialization.
            storage: unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() },
            len: 0,
        }
    }

    /// Returns the fixed capacity `N`.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Returns the number of live elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if another push would be rejected.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Returns how many more elements fit.
    #[inline]
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        N - self.len()
    }

    /// Appends `value` at the tail.
    ///
    /// Returns `false` and leaves the buffer untouched if it is full. The
    /// rejected value is dropped; use [`try_push`](Self::try_push) to keep it.
    #[inline]
    #[must_use = "a full buffer rejects the value; check the result"]
    pub fn push_back(&mut self, value: T) -> bool {
        self.try_push(value).is_ok()
    }

    /// Appends `value` at the tail, handing it back if the buffer is full.
    ///
    /// This is a **O(1)** operation with **zero heap allocations**.
    ///
    /// # Errors
    ///
    /// Returns `Err(value)` when the buffer already holds `N` elements.
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            tracing::trace!(
                capacity = N,
                element = core::any::type_name::<T>(),
                "tiny buffer full, push rejected"
            );
            return Err(value);
        }

        let index = self.len();
        self.storage[index].write(value);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the tail element, or `None` if empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.len -= 1;
        let index = self.len();
        // SAFETY: the slot was live before the decrement and now lies outside
        // the live prefix, so ownership moves out exactly once.
        Some(unsafe { self.storage[index].assume_init_read() })
    }

    /// Drops the tail element. Does nothing on an empty buffer.
    #[inline]
    pub fn pop_back(&mut self) {
        if self.is_empty() {
            return;
        }

        // Shrink first: a panicking destructor must not leave a dead slot in
        // the live prefix.
        self.len -= 1;
        if Self::NEEDS_DROP {
            let index = self.len();
            // SAFETY: the slot was live before the decrement and is dropped
            // exactly once here.
            unsafe { self.storage[index].assume_init_drop() };
        }
    }

    /// Shortens the buffer to `new_len`, dropping tail elements.
    ///
    /// Does nothing if `new_len >= len()`.
    pub fn truncate(&mut self, new_len: usize) {
        // Anything past u8::MAX is at or beyond the current length.
        let Ok(new_len) = u8::try_from(new_len) else {
            return;
        };
        if Self::NEEDS_DROP {
            self.drop_tail(new_len);
        } else {
            self.len = self.len.min(new_len);
        }
    }

    /// Drops every element, tail to front, leaving the buffer empty.
    ///
    /// For element types without drop glue this is a **zero-cost** counter
    /// reset.
    pub fn clear(&mut self) {
        if Self::NEEDS_DROP {
            self.drop_tail(0);
        } else {
            self.len = 0;
        }
    }

    /// Drops elements tail to front until `len == new_len`.
    ///
    /// If a destructor panics, the guard keeps dropping the remaining
    /// elements while unwinding, so none of them leak.
    fn drop_tail(&mut self, new_len: u8) {
        struct TailGuard<'a, T, const N: usize> {
            buffer: &'a mut TinyBuffer<T, N>,
            new_len: u8,
        }

        impl<T, const N: usize> Drop for TailGuard<'_, T, N> {
            fn drop(&mut self) {
                while self.buffer.len > self.new_len {
                    self.buffer.pop_back();
                }
            }
        }

        let guard = TailGuard {
            buffer: self,
            new_len,
        };
        while guard.buffer.len > guard.new_len {
            guard.buffer.pop_back();
        }
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`TinyBufferError::OutOfRange`] if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> BufferResult<&T> {
        self.as_slice().get(index).ok_or(TinyBufferError::OutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the element at `index` mutably.
    ///
    /// # Errors
    ///
    /// [`TinyBufferError::OutOfRange`] if `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> BufferResult<&mut T> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(TinyBufferError::OutOfRange { index, len })
    }

    /// Returns the most recently pushed element.
    ///
    /// # Errors
    ///
    /// [`TinyBufferError::Empty`] if the buffer holds no elements.
    #[inline]
    pub fn back(&self) -> BufferResult<&T> {
        self.as_slice().last().ok_or(TinyBufferError::Empty)
    }

    /// Returns the most recently pushed element mutably.
    ///
    /// # Errors
    ///
    /// [`TinyBufferError::Empty`] if the buffer holds no elements.
    #[inline]
    pub fn back_mut(&mut self) -> BufferResult<&mut T> {
        self.as_mut_slice().last_mut().ok_or(TinyBufferError::Empty)
    }

    /// Views the live elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized and `MaybeUninit<T>` has the
        // layout of `T`.
        unsafe { slice::from_raw_parts(self.storage.as_ptr().cast::<T>(), self.len()) }
    }

    /// Views the live elements as a mutable slice.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr().cast::<T>(), len) }
    }

    /// Iterates over the live elements, front to back.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates mutably over the live elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Appends clones of every value in `values`, all or nothing.
    ///
    /// # Errors
    ///
    /// [`TinyBufferError::Overflow`] if the values do not all fit. The buffer
    /// is left unchanged.
    pub fn try_extend_from_slice(&mut self, values: &[T]) -> BufferResult<()>
    where
        T: Clone,
    {
        let requested = self.len() + values.len();
        if requested > N {
            tracing::trace!(capacity = N, requested, "tiny buffer extend rejected");
            return Err(TinyBufferError::Overflow {
                capacity: N,
                requested,
            });
        }

        self.fill_from(values.iter().cloned());
        Ok(())
    }

    /// Pushes values until the iterator ends or the buffer fills up.
    fn fill_from<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            if self.try_push(value).is_err() {
                break;
            }
        }
    }

    /// Moves the storage out without running `Drop`.
    ///
    /// The caller takes ownership of the live prefix `[0, len)`.
    pub(super) fn into_raw_parts(self) -> ([MaybeUninit<T>; N], usize) {
        let this = ManuallyDrop::new(self);
        let len = this.len();
        // SAFETY: `this` is never dropped, so the live slots are owned by the
        // returned copy alone.
        let storage = unsafe { ptr::read(&this.storage) };
        (storage, len)
    }
}

impl<T, const N: usize> Drop for TinyBuffer<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Default for TinyBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for TinyBuffer<T, N> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        copy.fill_from(self.iter().cloned());
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.fill_from(source.iter().cloned());
    }
}

impl<T, const N: usize> Deref for TinyBuffer<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for TinyBuffer<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> AsRef<[T]> for TinyBuffer<T, N> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> AsMut<[T]> for TinyBuffer<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

/// # Panics
///
/// Panics with [`TinyBufferError::OutOfRange`] if `index >= len()`.
impl<T, const N: usize> Index<usize> for TinyBuffer<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// # Panics
///
/// Panics with [`TinyBufferError::OutOfRange`] if `index >= len()`.
impl<T, const N: usize> IndexMut<usize> for TinyBuffer<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a TinyBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut TinyBuffer<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Clone, const N: usize> TryFrom<&[T]> for TinyBuffer<T, N> {
    type Error = TinyBufferError;

    fn try_from(values: &[T]) -> BufferResult<Self> {
        let mut buffer = Self::new();
        buffer.try_extend_from_slice(values)?;
        Ok(buffer)
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for TinyBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<TinyBuffer<T, M>>
    for TinyBuffer<T, N>
{
    fn eq(&self, other: &TinyBuffer<T, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for TinyBuffer<T, N> {}

impl<T: PartialEq, const N: usize> PartialEq<[T]> for TinyBuffer<T, N> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Hash, const N: usize> Hash for TinyBuffer<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}
