//! Deterministic sequences.
//!
//! A deterministic variable replays a fixed list of values, either cycling
//! forever or sticking at a final value once the list is exhausted. Its
//! output order is significant, so every type here reports the `ORDERED`
//! characteristic and is never split for parallel consumption.

use randvar_core::range::{RangeConstraint, RangeValue};
use randvar_core::traits::{InterarrivalTimeRandomVariable, OrderedRandomVariable, RandomVariable};
use randvar_core::types::{Characteristics, RvError, RvResult};

use super::update_admitting;

/// What happens once the listed values are exhausted.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Tail<T> {
    /// Start again from the first value.
    Repeat,
    /// Return this value forever.
    Final(T),
}

/// Position within a list of values.
#[derive(Clone, Debug, PartialEq)]
struct Sequence<T> {
    values: Vec<T>,
    tail: Tail<T>,
    index: usize,
}

impl<T: Copy> Sequence<T> {
    fn cycle(values: Vec<T>) -> RvResult<Self> {
        if values.is_empty() {
            return Err(RvError::invalid("a repeating sequence needs at least one value"));
        }
        Ok(Self {
            values,
            tail: Tail::Repeat,
            index: 0,
        })
    }

    fn with_final(values: Vec<T>, final_value: T) -> Self {
        Self {
            values,
            tail: Tail::Final(final_value),
            index: 0,
        }
    }

    /// Repeating sequences are never empty and keep `index` in bounds.
    #[inline]
    fn advance(&mut self) -> T {
        match self.tail {
            Tail::Repeat => {
                let value = self.values[self.index];
                self.index = (self.index + 1) % self.values.len();
                value
            }
            Tail::Final(final_value) => match self.values.get(self.index) {
                Some(&value) => {
                    self.index += 1;
                    value
                }
                None => final_value,
            },
        }
    }

    /// Every value this sequence can still produce.
    fn producible(&self) -> impl Iterator<Item = T> + '_ {
        let final_value = match self.tail {
            Tail::Final(value) => Some(value),
            Tail::Repeat => None,
        };
        self.values.iter().copied().chain(final_value)
    }
}

/// Deterministic sequence of ordered values.
///
/// # Examples
///
/// ```rust
/// use randvar_core::traits::RandomVariable;
/// use randvar_models::distributions::DetermDoubleRv;
///
/// let mut rv = DetermDoubleRv::with_final(vec![1.0, 2.0, 3.0], 9.0).unwrap();
/// let values: Vec<f64> = (0..5).map(|_| rv.next().unwrap()).collect();
/// assert_eq!(values, vec![1.0, 2.0, 3.0, 9.0, 9.0]);
/// assert!(rv.is_ordered());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DetermRv<T: RangeValue> {
    sequence: Sequence<T>,
    range: RangeConstraint<T>,
}

/// Deterministic `f64` sequence.
pub type DetermDoubleRv = DetermRv<f64>;
/// Deterministic `i32` sequence.
pub type DetermIntegerRv = DetermRv<i32>;
/// Deterministic `i64` sequence.
pub type DetermLongRv = DetermRv<i64>;

impl<T: RangeValue> DetermRv<T> {
    /// Cycles through `values` forever.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] if `values` is empty.
    pub fn cycle(values: Vec<T>) -> RvResult<Self> {
        Ok(Self {
            sequence: Sequence::cycle(values)?,
            range: RangeConstraint::new(),
        })
    }

    /// Returns `values` once, then `final_value` forever.
    pub fn with_final(values: Vec<T>, final_value: T) -> RvResult<Self> {
        Ok(Self {
            sequence: Sequence::with_final(values, final_value),
            range: RangeConstraint::new(),
        })
    }

    /// Returns `first` once, then `final_value` forever.
    pub fn then(first: T, final_value: T) -> RvResult<Self> {
        Self::with_final(vec![first], final_value)
    }

    fn update<F>(&mut self, update: F) -> RvResult<()>
    where
        F: FnOnce(&mut RangeConstraint<T>) -> RvResult<()>,
    {
        update_admitting(&mut self.range, self.sequence.producible(), update)
    }
}

impl<T: RangeValue> RandomVariable for DetermRv<T> {
    type Value = T;

    #[inline]
    fn next(&mut self) -> RvResult<T> {
        Ok(self.sequence.advance())
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::DEFAULT | Characteristics::ORDERED
    }
}

impl<T: RangeValue> OrderedRandomVariable<T> for DetermRv<T> {
    fn range(&self) -> &RangeConstraint<T> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<T> {
        &mut self.range
    }

    fn set_minimum(&mut self, min: Option<T>, closed: bool) -> RvResult<()> {
        self.update(|r| r.set_minimum(min, closed))
    }

    fn set_maximum(&mut self, max: Option<T>, closed: bool) -> RvResult<()> {
        self.update(|r| r.set_maximum(max, closed))
    }

    fn tighten_minimum(&mut self, min: T, closed: bool) -> RvResult<()> {
        self.update(|r| r.tighten_minimum(min, closed))
    }

    fn tighten_maximum(&mut self, max: T, closed: bool) -> RvResult<()> {
        self.update(|r| r.tighten_maximum(max, closed))
    }
}

/// Deterministic sequence of booleans.
#[derive(Clone, Debug, PartialEq)]
pub struct DetermBooleanRv {
    sequence: Sequence<bool>,
}

impl DetermBooleanRv {
    /// Cycles through `values` forever.
    pub fn cycle(values: Vec<bool>) -> RvResult<Self> {
        Ok(Self {
            sequence: Sequence::cycle(values)?,
        })
    }

    /// Returns `values` once, then `final_value` forever.
    pub fn with_final(values: Vec<bool>, final_value: bool) -> Self {
        Self {
            sequence: Sequence::with_final(values, final_value),
        }
    }

    /// Returns `first` once, then `final_value` forever.
    pub fn then(first: bool, final_value: bool) -> Self {
        Self::with_final(vec![first], final_value)
    }
}

impl RandomVariable for DetermBooleanRv {
    type Value = bool;

    fn next(&mut self) -> RvResult<bool> {
        Ok(self.sequence.advance())
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::DEFAULT | Characteristics::ORDERED
    }
}

/// Deterministic sequence of non-negative interarrival times.
#[derive(Clone, Debug, PartialEq)]
pub struct DetermIATimeRv {
    inner: DetermRv<i64>,
}

impl DetermIATimeRv {
    fn checked(values: &[i64], final_value: Option<i64>) -> RvResult<()> {
        match values.iter().copied().chain(final_value).find(|v| *v < 0) {
            Some(v) => Err(RvError::invalid(format!(
                "interarrival time {} is negative",
                v
            ))),
            None => Ok(()),
        }
    }

    fn wrap(mut inner: DetermRv<i64>) -> RvResult<Self> {
        inner.range.require_minimum(0, true)?;
        Ok(Self { inner })
    }

    /// Cycles through `values` forever.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] if `values` is empty or holds a
    /// negative time.
    pub fn cycle(values: Vec<i64>) -> RvResult<Self> {
        Self::checked(&values, None)?;
        Self::wrap(DetermRv::cycle(values)?)
    }

    /// Returns `values` once, then `final_value` forever.
    pub fn with_final(values: Vec<i64>, final_value: i64) -> RvResult<Self> {
        Self::checked(&values, Some(final_value))?;
        Self::wrap(DetermRv::with_final(values, final_value)?)
    }

    /// Returns `first` once, then `final_value` forever.
    pub fn then(first: i64, final_value: i64) -> RvResult<Self> {
        Self::with_final(vec![first], final_value)
    }
}

impl RandomVariable for DetermIATimeRv {
    type Value = i64;

    fn next(&mut self) -> RvResult<i64> {
        self.inner.next()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }

    fn characteristics(&self) -> Characteristics {
        self.inner.characteristics()
    }
}

impl OrderedRandomVariable<i64> for DetermIATimeRv {
    fn range(&self) -> &RangeConstraint<i64> {
        self.inner.range()
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<i64> {
        self.inner.range_mut()
    }

    fn set_minimum(&mut self, min: Option<i64>, closed: bool) -> RvResult<()> {
        self.inner.set_minimum(min, closed)
    }

    fn set_maximum(&mut self, max: Option<i64>, closed: bool) -> RvResult<()> {
        self.inner.set_maximum(max, closed)
    }

    fn tighten_minimum(&mut self, min: i64, closed: bool) -> RvResult<()> {
        self.inner.tighten_minimum(min, closed)
    }

    fn tighten_maximum(&mut self, max: i64, closed: bool) -> RvResult<()> {
        self.inner.tighten_maximum(max, closed)
    }
}

impl InterarrivalTimeRandomVariable for DetermIATimeRv {}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw<R: RandomVariable>(rv: &mut R, n: usize) -> Vec<R::Value> {
        (0..n).map(|_| rv.next().unwrap()).collect()
    }

    #[test]
    fn test_cycle_repeats() {
        let mut rv = DetermIntegerRv::cycle(vec![1, 2, 3]).unwrap();
        assert_eq!(draw(&mut rv, 7), vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn test_then_form() {
        let mut rv = DetermLongRv::then(4, 0).unwrap();
        assert_eq!(draw(&mut rv, 4), vec![4, 0, 0, 0]);
    }

    #[test]
    fn test_empty_values() {
        assert!(DetermDoubleRv::cycle(vec![]).is_err());
        let mut rv = DetermDoubleRv::with_final(vec![], 5.0).unwrap();
        assert_eq!(draw(&mut rv, 2), vec![5.0, 5.0]);
    }

    #[test]
    fn test_bounds_checked_against_all_values() {
        let mut rv = DetermIntegerRv::with_final(vec![1, 5], 3).unwrap();
        assert!(rv.tighten_maximum(4, true).is_err());
        assert!(rv.tighten_minimum(2, true).is_err());
        rv.tighten_minimum(1, true).unwrap();
        rv.tighten_maximum(5, true).unwrap();
        assert_eq!(rv.minimum(), Some(1));
        assert_eq!(rv.maximum(), Some(5));
    }

    #[test]
    fn test_clone_keeps_position() {
        let mut rv = DetermIntegerRv::cycle(vec![1, 2, 3]).unwrap();
        rv.next().unwrap();
        let mut copy = rv.try_clone().unwrap();
        assert_eq!(copy.next().unwrap(), 2);
        assert_eq!(rv.next().unwrap(), 2);
    }

    #[test]
    fn test_ordered_spliterator_does_not_split() {
        let mut rv = DetermIntegerRv::cycle(vec![1, 2]).unwrap();
        let mut s = rv.spliterator(1_000);
        assert!(s.try_split().is_none());
    }

    #[test]
    fn test_boolean_sequence() {
        let mut rv = DetermBooleanRv::then(true, false);
        assert_eq!(draw(&mut rv, 3), vec![true, false, false]);
        let mut rv = DetermBooleanRv::cycle(vec![false, true]).unwrap();
        assert_eq!(draw(&mut rv, 3), vec![false, true, false]);
        assert!(rv.is_ordered());
    }

    #[test]
    fn test_ia_time_rejects_negative() {
        assert!(DetermIATimeRv::cycle(vec![1, -2]).is_err());
        assert!(DetermIATimeRv::with_final(vec![1], -1).is_err());
        let mut rv = DetermIATimeRv::with_final(vec![3, 4], 0).unwrap();
        assert_eq!(draw(&mut rv, 3), vec![3, 4, 0]);
        assert_eq!(rv.minimum(), Some(0));
        assert!(rv.is_ordered());
    }
}
