//! # Memory Management
//!
//! Fixed-capacity containers for allocation-free gameplay code.
//!
//! ## Design Philosophy
//!
//! Every bound is known at compile time. At runtime:
//! - No heap allocations
//! - No reallocation or growth
//! - Predictable, flat latency

mod iter;
mod tiny_buffer;

pub use iter::IntoIter;
pub use tiny_buffer::TinyBuffer;
