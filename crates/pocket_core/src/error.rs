//! # Buffer Error Types
//!
//! Contract violations reported by the fixed-capacity containers.
//!
//! Capacity exhaustion on a single push is NOT an error: it is an expected,
//! checkable condition and is reported through `bool` / `Err(value)` returns.

use thiserror::Error;

/// Errors raised by checked access into a [`TinyBuffer`](crate::TinyBuffer).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TinyBufferError {
    /// Indexed access outside the live prefix.
    #[error("index out of range: index {index}, len {len}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of live elements at the time of the access.
        len: usize,
    },

    /// Tail access on a buffer holding no elements.
    #[error("buffer is empty")]
    Empty,

    /// A bulk insert would exceed the fixed capacity.
    #[error("buffer overflow: capacity {capacity}, requested {requested}")]
    Overflow {
        /// Fixed capacity of the buffer.
        capacity: usize,
        /// Total length the insert would have produced.
        requested: usize,
    },
}

/// Result type for buffer operations.
pub type BufferResult<T> = Result<T, TinyBufferError>;
