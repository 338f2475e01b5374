//! Lazy, splittable sequences of random values.

use tracing::trace;

use crate::rng::static_random;
use crate::traits::RandomVariable;
use crate::types::{Characteristics, RvResult};

/// The variable a spliterator draws from.
///
/// The root spliterator borrows the caller's variable; every split owns a
/// clone so that it can be driven on another thread.
enum Source<'a, R> {
    Borrowed(&'a mut R),
    Owned(R),
}

impl<'a, R> Source<'a, R> {
    #[inline]
    fn get(&self) -> &R {
        match self {
            Source::Borrowed(rv) => rv,
            Source::Owned(rv) => rv,
        }
    }

    #[inline]
    fn get_mut(&mut self) -> &mut R {
        match self {
            Source::Borrowed(rv) => rv,
            Source::Owned(rv) => rv,
        }
    }
}

/// Sequence of values drawn from a random variable, sized or unbounded.
///
/// A sized spliterator reports `SIZED | SUBSIZED` and splits by halving the
/// remaining count. An unbounded one reports an estimate of `u64::MAX` and
/// splits into two unbounded halves. Either kind stops splitting after
/// `max_depth` splits, and never splits at all when the variable is
/// ordered.
///
/// The spliterator is also an [`Iterator`] over `RvResult<R::Value>`.
///
/// # Examples
///
/// ```rust
/// use randvar_core::sequence::Spliterator;
/// use randvar_core::traits::RandomVariable;
/// use randvar_core::types::RvResult;
///
/// #[derive(Clone)]
/// struct Zero;
///
/// impl RandomVariable for Zero {
///     type Value = f64;
///     fn next(&mut self) -> RvResult<f64> { Ok(0.0) }
///     fn try_clone(&self) -> RvResult<Self> { Ok(Zero) }
/// }
///
/// let mut rv = Zero;
/// let mut first = Spliterator::with_max_depth(&mut rv, Some(10), 1);
/// let second = first.try_split().unwrap();
/// assert_eq!(first.estimate_size(), 5);
/// assert_eq!(second.estimate_size(), 5);
/// assert!(first.try_split().is_none());
/// ```
pub struct Spliterator<'a, R: RandomVariable> {
    source: Source<'a, R>,
    /// Values left to produce; `None` for an unbounded sequence.
    remaining: Option<u64>,
    max_depth: u32,
    characteristics: Characteristics,
}

impl<'a, R: RandomVariable> Spliterator<'a, R> {
    /// Spliterator over `size` values of `rv`.
    pub fn sized(rv: &'a mut R, size: u64) -> Self {
        Self::with_max_depth(rv, Some(size), static_random::split_depth())
    }

    /// Spliterator over an unbounded sequence of values of `rv`.
    pub fn unbounded(rv: &'a mut R) -> Self {
        Self::with_max_depth(rv, None, static_random::split_depth())
    }

    /// Spliterator with an explicit split depth.
    ///
    /// # Arguments
    ///
    /// * `rv` - Variable to draw from
    /// * `size` - Number of values, or `None` for an unbounded sequence
    /// * `max_depth` - Maximum number of successive splits
    pub fn with_max_depth(rv: &'a mut R, size: Option<u64>, max_depth: u32) -> Self {
        let characteristics = Self::characteristics_for(rv.characteristics(), size.is_some());
        Self {
            source: Source::Borrowed(rv),
            remaining: size,
            max_depth,
            characteristics,
        }
    }

    fn characteristics_for(base: Characteristics, sized: bool) -> Characteristics {
        let size_flags = Characteristics::SIZED | Characteristics::SUBSIZED;
        if sized {
            base | size_flags
        } else {
            base.without(size_flags)
        }
    }

    /// Characteristics of this sequence.
    #[inline]
    pub fn characteristics(&self) -> Characteristics {
        self.characteristics
    }

    /// Remaining count for a sized sequence, `u64::MAX` otherwise.
    #[inline]
    pub fn estimate_size(&self) -> u64 {
        self.remaining.unwrap_or(u64::MAX)
    }

    /// Remaining splits allowed.
    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// The variable being drawn from.
    pub fn random_variable(&self) -> &R {
        self.source.get()
    }

    /// Produces one value and passes it to `action`.
    ///
    /// Returns `false` without calling `action` once a sized sequence is
    /// exhausted.
    pub fn try_advance<F>(&mut self, action: F) -> bool
    where
        F: FnOnce(RvResult<R::Value>),
    {
        match self.remaining {
            Some(0) => false,
            Some(ref mut n) => {
                *n -= 1;
                action(self.source.get_mut().next());
                true
            }
            None => {
                action(self.source.get_mut().next());
                true
            }
        }
    }

    /// Feeds every remaining value to `action`.
    ///
    /// Does not return for an unbounded sequence.
    pub fn for_each_remaining<F>(&mut self, mut action: F)
    where
        F: FnMut(RvResult<R::Value>),
    {
        while self.try_advance(&mut action) {}
    }

    /// Splits off a part of the sequence into a new spliterator.
    ///
    /// Returns `None` when the variable is ordered, the split depth is
    /// exhausted, fewer than two values remain, or the variable cannot be
    /// cloned.
    pub fn try_split(&mut self) -> Option<Spliterator<'a, R>> {
        if self.characteristics.contains(Characteristics::ORDERED) || self.max_depth == 0 {
            return None;
        }
        let split_size = match self.remaining {
            Some(n) => {
                let half = n / 2;
                if half == 0 {
                    return None;
                }
                Some(half)
            }
            None => None,
        };
        let clone = match self.source.get().try_clone() {
            Ok(rv) => rv,
            Err(err) => {
                trace!(error = %err, "spliterator not split: variable cannot be cloned");
                return None;
            }
        };
        if let (Some(n), Some(half)) = (self.remaining.as_mut(), split_size) {
            *n -= half;
        }
        self.max_depth -= 1;
        trace!(
            split_size = ?split_size,
            depth_left = self.max_depth,
            "spliterator split"
        );
        Some(Spliterator {
            source: Source::Owned(clone),
            remaining: split_size,
            max_depth: self.max_depth,
            characteristics: self.characteristics,
        })
    }
}

impl<'a, R: RandomVariable> Iterator for Spliterator<'a, R> {
    type Item = RvResult<R::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut out = None;
        if self.try_advance(|value| out = Some(value)) {
            out
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(n) => match usize::try_from(n) {
                Ok(n) => (n, Some(n)),
                Err(_) => (usize::MAX, None),
            },
            None => (usize::MAX, None),
        }
    }
}

/// Sequential stream over a random variable.
pub type Stream<'a, R> = Spliterator<'a, R>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RvError;

    #[derive(Clone)]
    struct Counter {
        next: u64,
        ordered: bool,
    }

    impl RandomVariable for Counter {
        type Value = u64;

        fn next(&mut self) -> RvResult<u64> {
            self.next += 1;
            Ok(self.next)
        }

        fn try_clone(&self) -> RvResult<Self> {
            Ok(self.clone())
        }

        fn characteristics(&self) -> Characteristics {
            if self.ordered {
                Characteristics::DEFAULT | Characteristics::ORDERED
            } else {
                Characteristics::DEFAULT
            }
        }
    }

    struct Unclonable;

    impl RandomVariable for Unclonable {
        type Value = u64;

        fn next(&mut self) -> RvResult<u64> {
            Ok(1)
        }

        fn try_clone(&self) -> RvResult<Self> {
            Err(RvError::CloneNotSupported {
                type_name: "Unclonable",
            })
        }
    }

    fn counter(ordered: bool) -> Counter {
        Counter { next: 0, ordered }
    }

    #[test]
    fn test_sized_yields_exactly_size() {
        let mut rv = counter(false);
        let values: Vec<u64> = Spliterator::sized(&mut rv, 5).map(|v| v.unwrap()).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
        assert_eq!(rv.next, 5);
    }

    #[test]
    fn test_sized_characteristics() {
        let mut rv = counter(false);
        let s = Spliterator::sized(&mut rv, 5);
        assert!(s
            .characteristics()
            .contains(Characteristics::SIZED | Characteristics::SUBSIZED));
        assert_eq!(s.size_hint(), (5, Some(5)));
    }

    #[test]
    fn test_unbounded_characteristics_and_estimate() {
        let mut rv = counter(false);
        let s = Spliterator::unbounded(&mut rv);
        assert!(!s.characteristics().contains(Characteristics::SIZED));
        assert!(!s.characteristics().contains(Characteristics::SUBSIZED));
        assert_eq!(s.estimate_size(), u64::MAX);
        assert_eq!(s.take(3).count(), 3);
    }

    #[test]
    fn test_sized_split_halves_remaining() {
        let mut rv = counter(false);
        let mut s = Spliterator::with_max_depth(&mut rv, Some(11), 4);
        let other = s.try_split().unwrap();
        assert_eq!(other.estimate_size(), 5);
        assert_eq!(s.estimate_size(), 6);
        assert_eq!(s.max_depth(), 3);
        assert_eq!(other.max_depth(), 3);
        assert_eq!(s.count() + other.count(), 11);
    }

    #[test]
    fn test_split_stops_at_depth_and_size() {
        let mut rv = counter(false);
        let mut s = Spliterator::with_max_depth(&mut rv, Some(100), 0);
        assert!(s.try_split().is_none());

        let mut rv = counter(false);
        let mut s = Spliterator::with_max_depth(&mut rv, Some(1), 8);
        assert!(s.try_split().is_none());
        assert_eq!(s.estimate_size(), 1);
    }

    #[test]
    fn test_ordered_never_splits() {
        let mut rv = counter(true);
        let mut s = Spliterator::with_max_depth(&mut rv, Some(1_000_000), 16);
        assert!(s.try_split().is_none());
        assert_eq!(s.estimate_size(), 1_000_000);

        let mut rv = counter(true);
        let mut s = Spliterator::with_max_depth(&mut rv, None, 16);
        assert!(s.try_split().is_none());
    }

    #[test]
    fn test_unclonable_does_not_split() {
        let mut rv = Unclonable;
        let mut s = Spliterator::with_max_depth(&mut rv, Some(10), 3);
        assert!(s.try_split().is_none());
        assert_eq!(s.max_depth(), 3);
        assert_eq!(s.estimate_size(), 10);
    }

    #[test]
    fn test_try_advance_and_for_each_remaining() {
        let mut rv = counter(false);
        let mut s = Spliterator::sized(&mut rv, 3);
        let mut first = 0;
        assert!(s.try_advance(|v| first = v.unwrap()));
        assert_eq!(first, 1);
        let mut rest = Vec::new();
        s.for_each_remaining(|v| rest.push(v.unwrap()));
        assert_eq!(rest, vec![2, 3]);
        assert!(!s.try_advance(|_| panic!("exhausted")));
    }
}
