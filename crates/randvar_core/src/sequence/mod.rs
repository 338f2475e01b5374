//! # Sequence Production
//!
//! Lazy sequential and parallel consumption of a random variable.
//!
//! - [`Spliterator`]: sized or unbounded sequence that can hand off half of
//!   its work to another worker, unless the variable is ordered
//! - [`Stream`]: the sequential view (an [`Iterator`])
//! - [`ParStream`]: a rayon [`ParallelIterator`](rayon::iter::ParallelIterator)
//!
//! The split depth defaults to `round(log2(available CPUs))` and can be
//! overridden through [`RvConfig`](crate::rng::RvConfig).

pub mod parallel;
pub mod spliterator;

pub use parallel::ParStream;
pub use spliterator::{Spliterator, Stream};
