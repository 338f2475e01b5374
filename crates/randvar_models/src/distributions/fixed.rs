//! Random variables that always return the same value.

use randvar_core::range::{RangeConstraint, RangeValue};
use randvar_core::traits::{InterarrivalTimeRandomVariable, OrderedRandomVariable, RandomVariable};
use randvar_core::types::{RvError, RvResult};

use super::update_admitting;

/// Always returns one value.
///
/// Any bound that would exclude the value is rejected with
/// [`RvError::InvalidArgument`], leaving the range unchanged.
///
/// # Examples
///
/// ```rust
/// use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
/// use randvar_models::distributions::FixedDoubleRv;
///
/// let mut rv = FixedDoubleRv::new(2.5);
/// assert_eq!(rv.next().unwrap(), 2.5);
///
/// assert!(rv.set_minimum(Some(2.5), true).is_ok());
/// assert!(rv.set_minimum(Some(2.5), false).is_err());
/// assert_eq!(rv.minimum_closed(), Some(true));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FixedRv<T: RangeValue> {
    value: T,
    range: RangeConstraint<T>,
}

/// Fixed `f64` value.
pub type FixedDoubleRv = FixedRv<f64>;
/// Fixed `i32` value.
pub type FixedIntegerRv = FixedRv<i32>;
/// Fixed `i64` value.
pub type FixedLongRv = FixedRv<i64>;

impl<T: RangeValue> FixedRv<T> {
    /// Creates a variable that always returns `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            range: RangeConstraint::new(),
        }
    }

    /// The value returned by every draw.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: RangeValue> RandomVariable for FixedRv<T> {
    type Value = T;

    #[inline]
    fn next(&mut self) -> RvResult<T> {
        Ok(self.value)
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl<T: RangeValue> OrderedRandomVariable<T> for FixedRv<T> {
    fn range(&self) -> &RangeConstraint<T> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<T> {
        &mut self.range
    }

    fn set_minimum(&mut self, min: Option<T>, closed: bool) -> RvResult<()> {
        update_admitting(&mut self.range, [self.value], |r| r.set_minimum(min, closed))
    }

    fn set_maximum(&mut self, max: Option<T>, closed: bool) -> RvResult<()> {
        update_admitting(&mut self.range, [self.value], |r| r.set_maximum(max, closed))
    }

    fn tighten_minimum(&mut self, min: T, closed: bool) -> RvResult<()> {
        update_admitting(&mut self.range, [self.value], |r| r.tighten_minimum(min, closed))
    }

    fn tighten_maximum(&mut self, max: T, closed: bool) -> RvResult<()> {
        update_admitting(&mut self.range, [self.value], |r| r.tighten_maximum(max, closed))
    }
}

/// Always returns one boolean. Booleans carry no range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedBooleanRv {
    value: bool,
}

impl FixedBooleanRv {
    /// Creates a variable that always returns `value`.
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    /// The value returned by every draw.
    pub fn value(&self) -> bool {
        self.value
    }
}

impl RandomVariable for FixedBooleanRv {
    type Value = bool;

    fn next(&mut self) -> RvResult<bool> {
        Ok(self.value)
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(*self)
    }
}

/// Fixed, non-negative interarrival time.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedIATimeRv {
    inner: FixedRv<i64>,
}

impl FixedIATimeRv {
    /// Creates a fixed interarrival time.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] if `value` is negative.
    pub fn new(value: i64) -> RvResult<Self> {
        if value < 0 {
            return Err(RvError::invalid(format!(
                "interarrival time {} is negative",
                value
            )));
        }
        let mut inner = FixedRv::new(value);
        inner.range.require_minimum(0, true)?;
        Ok(Self { inner })
    }

    /// The value returned by every draw.
    pub fn value(&self) -> i64 {
        self.inner.value
    }
}

impl RandomVariable for FixedIATimeRv {
    type Value = i64;

    #[inline]
    fn next(&mut self) -> RvResult<i64> {
        self.inner.next()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl OrderedRandomVariable<i64> for FixedIATimeRv {
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

impl InterarrivalTimeRandomVariable for FixedIATimeRv {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_returns_value() {
        let mut rv = FixedIntegerRv::new(7);
        for _ in 0..10 {
            assert_eq!(rv.next().unwrap(), 7);
        }
        assert!(!rv.is_ordered());
    }

    #[test]
    fn test_fixed_rejects_excluding_bounds() {
        let mut rv = FixedLongRv::new(10);
        assert!(rv.tighten_maximum(9, true).is_err());
        assert!(rv.tighten_maximum(10, false).is_err());
        assert_eq!(rv.maximum(), None);

        rv.tighten_maximum(10, true).unwrap();
        rv.tighten_minimum(-5, false).unwrap();
        assert_eq!(rv.maximum(), Some(10));
        assert_eq!(rv.minimum(), Some(-5));
        assert_eq!(rv.next().unwrap(), 10);
    }

    #[test]
    fn test_fixed_clone_isolation() {
        let original = FixedDoubleRv::new(1.0);
        let mut copy = original.try_clone().unwrap();
        copy.set_maximum(Some(3.0), true).unwrap();
        assert_eq!(copy.maximum(), Some(3.0));
        assert_eq!(original.maximum(), None);
    }

    #[test]
    fn test_fixed_ia_time() {
        assert!(FixedIATimeRv::new(-1).is_err());
        let mut rv = FixedIATimeRv::new(0).unwrap();
        assert_eq!(rv.next().unwrap(), 0);
        assert_eq!(rv.minimum(), Some(0));
        assert!(rv.set_minimum(Some(1), true).is_err());
        // A user minimum below the required one leaves the effective bound.
        rv.set_minimum(Some(-10), true).unwrap();
        assert_eq!(rv.minimum(), Some(0));
    }

    #[test]
    fn test_fixed_boolean() {
        let mut rv = FixedBooleanRv::new(true);
        assert!(rv.next().unwrap());
        assert!(rv.try_clone().unwrap().value());
    }
}
