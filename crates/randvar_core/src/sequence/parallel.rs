//! Parallel streams backed by rayon.

use rayon::iter::plumbing::{bridge_unindexed, Folder, UnindexedConsumer, UnindexedProducer};
use rayon::iter::ParallelIterator;

use super::spliterator::Spliterator;
use crate::traits::RandomVariable;
use crate::types::RvResult;

impl<'a, R: RandomVariable> UnindexedProducer for Spliterator<'a, R> {
    type Item = RvResult<R::Value>;

    fn split(mut self) -> (Self, Option<Self>) {
        let other = self.try_split();
        (self, other)
    }

    fn fold_with<F>(self, folder: F) -> F
    where
        F: Folder<Self::Item>,
    {
        folder.consume_iter(self)
    }
}

/// Parallel stream over a random variable.
///
/// Rayon splits the underlying [`Spliterator`] on demand; each split draws
/// from its own clone of the variable. An ordered variable never splits,
/// so its values are produced by one worker in sequence.
///
/// # Examples
///
/// ```rust
/// use rayon::iter::ParallelIterator;
/// use randvar_core::traits::RandomVariable;
/// use randvar_core::types::RvResult;
///
/// #[derive(Clone)]
/// struct One;
///
/// impl RandomVariable for One {
///     type Value = u64;
///     fn next(&mut self) -> RvResult<u64> { Ok(1) }
///     fn try_clone(&self) -> RvResult<Self> { Ok(One) }
/// }
///
/// let total: u64 = One.par_stream(1_000).map(|v| v.unwrap()).sum();
/// assert_eq!(total, 1_000);
/// ```
pub struct ParStream<'a, R: RandomVariable> {
    spliterator: Spliterator<'a, R>,
}

impl<'a, R: RandomVariable> ParStream<'a, R> {
    /// Wraps a spliterator.
    pub fn new(spliterator: Spliterator<'a, R>) -> Self {
        Self { spliterator }
    }
}

impl<'a, R: RandomVariable> ParallelIterator for ParStream<'a, R> {
    type Item = RvResult<R::Value>;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        bridge_unindexed(self.spliterator, consumer)
    }
}
