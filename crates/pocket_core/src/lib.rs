//! # Pocket Core
//!
//! Allocation-free building blocks for a memory-constrained game engine.
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations** - Every container lives inline in its owner
//! 2. **Compile-time bounds** - Capacity is part of the type
//! 3. **Exact lifetimes** - Each element is dropped once, never more, never less
//!
//! ## Example
//!
//! ```rust
//! use pocket_core::TinyBuffer;
//!
//! // A drone's queue of target rooms, embedded as a plain field.
//! let mut target_queue: TinyBuffer<(u8, u8), 8> = TinyBuffer::new();
//! assert!(target_queue.push_back((3, 9)));
//!
//! for (x, y) in &target_queue {
//!     assert_eq!((*x, *y), (3, 9));
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod memory;

pub use error::{BufferResult, TinyBufferError};
pub use memory::{IntoIter, TinyBuffer};
