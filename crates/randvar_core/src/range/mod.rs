//! # Range Constraints
//!
//! Every ordered random variable carries a [`RangeConstraint`]: an optional
//! user-settable `[min, max]` plus an optional *required* `[min, max]` that
//! the distribution itself depends on for correctness (probabilities in
//! `[0, 1]`, interarrival times `>= 0`, ...).
//!
//! ## Protocol
//!
//! | Operation            | Effect on the user bound                              |
//! |----------------------|-------------------------------------------------------|
//! | `set_minimum`        | replaced outright (`None` clears it)                  |
//! | `tighten_minimum`    | narrowed only; an equal value can only close → open   |
//! | `require_minimum`    | required bound set, or narrowed if already present    |
//!
//! The effective bound on each side is the intersection of the required and
//! user bounds. [`RangeConstraint::range_test_failed`] evaluates a candidate
//! value against both, honouring the closed/open flag of each bound.
//!
//! ## Usage Example
//!
//! ```rust
//! use randvar_core::range::RangeConstraint;
//!
//! let mut range = RangeConstraint::<f64>::new();
//! range.require_minimum(0.0, true).unwrap();
//! range.set_maximum(Some(1.0), false).unwrap();
//!
//! assert!(range.range_test_needed());
//! assert!(!range.range_test_failed(0.0));
//! assert!(range.range_test_failed(1.0));
//!
//! // Tightening never widens the range.
//! range.tighten_maximum(5.0, true).unwrap();
//! assert_eq!(range.maximum(), Some(1.0));
//! ```

use std::fmt;
use std::str::FromStr;

use num_traits::ToPrimitive;

use crate::types::{RvError, RvResult};

/// Value types that can carry an ordering constraint.
///
/// Implemented for `f64`, `i32` and `i64`. Booleans deliberately do not
/// implement this trait, so boolean random variables cannot be given a
/// minimum or maximum.
pub trait RangeValue:
    Copy + PartialOrd + fmt::Debug + fmt::Display + ToPrimitive + Send + Sync + 'static
{
    /// Parses a bound given in string form.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::Parse`] when `s` is not a valid literal.
    fn parse_value(s: &str) -> RvResult<Self>;

    /// Returns `false` for values that cannot serve as a bound (NaN).
    fn is_valid_bound(self) -> bool {
        true
    }
}

macro_rules! impl_range_value {
    ($($ty:ty),*) => {
        $(
            impl RangeValue for $ty {
                fn parse_value(s: &str) -> RvResult<Self> {
                    <$ty as FromStr>::from_str(s.trim()).map_err(|e| RvError::Parse {
                        input: s.to_string(),
                        reason: e.to_string(),
                    })
                }
            }
        )*
    };
}

impl_range_value!(i32, i64);

impl RangeValue for f64 {
    fn parse_value(s: &str) -> RvResult<Self> {
        f64::from_str(s.trim()).map_err(|e| RvError::Parse {
            input: s.to_string(),
            reason: e.to_string(),
        })
    }

    fn is_valid_bound(self) -> bool {
        !self.is_nan()
    }
}

/// One side of a range: a value plus whether the value itself is allowed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bound<T> {
    /// The boundary value.
    pub value: T,
    /// `true` if `value` is part of the range.
    pub closed: bool,
}

impl<T: RangeValue> Bound<T> {
    /// Creates a bound.
    #[inline]
    pub fn new(value: T, closed: bool) -> Self {
        Self { value, closed }
    }

    /// Returns `true` if `v` lies below this bound used as a minimum.
    #[inline]
    pub fn excludes_below(&self, v: T) -> bool {
        if self.closed {
            v < self.value
        } else {
            v <= self.value
        }
    }

    /// Returns `true` if `v` lies above this bound used as a maximum.
    #[inline]
    pub fn excludes_above(&self, v: T) -> bool {
        if self.closed {
            v > self.value
        } else {
            v >= self.value
        }
    }
}

/// Intersection of two lower bounds: the larger value wins, and on a tie the
/// boundary stays closed only if both are closed.
fn intersect_lower<T: RangeValue>(a: Option<Bound<T>>, b: Option<Bound<T>>) -> Option<Bound<T>> {
    match (a, b) {
        (None, x) | (x, None) => x,
        (Some(a), Some(b)) => {
            if b.value > a.value {
                Some(b)
            } else if b.value == a.value {
                Some(Bound::new(a.value, a.closed && b.closed))
            } else {
                Some(a)
            }
        }
    }
}

fn intersect_upper<T: RangeValue>(a: Option<Bound<T>>, b: Option<Bound<T>>) -> Option<Bound<T>> {
    match (a, b) {
        (None, x) | (x, None) => x,
        (Some(a), Some(b)) => {
            if b.value < a.value {
                Some(b)
            } else if b.value == a.value {
                Some(Bound::new(a.value, a.closed && b.closed))
            } else {
                Some(a)
            }
        }
    }
}

fn check_bound<T: RangeValue>(value: T, what: &str) -> RvResult<()> {
    if value.is_valid_bound() {
        Ok(())
    } else {
        Err(RvError::invalid(format!("{} {} is not a usable bound", what, value)))
    }
}

/// User and required bounds for one ordered random variable.
///
/// The component is embedded in every ordered distribution and exposed
/// through [`OrderedRandomVariable`](crate::traits::OrderedRandomVariable).
/// Cloning a variable clones its constraint, so tightening a clone never
/// affects the original.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeConstraint<T> {
    min: Option<Bound<T>>,
    max: Option<Bound<T>>,
    required_min: Option<Bound<T>>,
    required_max: Option<Bound<T>>,
    need_range_test: bool,
}

impl<T: RangeValue> Default for RangeConstraint<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RangeValue> RangeConstraint<T> {
    /// Creates an unconstrained range.
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            required_min: None,
            required_max: None,
            need_range_test: false,
        }
    }

    /// Creates a range whose required minimum is `min`.
    pub fn with_required_minimum(min: T, closed: bool) -> RvResult<Self> {
        let mut range = Self::new();
        range.require_minimum(min, closed)?;
        Ok(range)
    }

    /// Creates a range with both required bounds installed. The bounds are
    /// not checked.
    pub fn with_required(min: Bound<T>, max: Bound<T>) -> Self {
        Self {
            min: None,
            max: None,
            required_min: Some(min),
            required_max: Some(max),
            need_range_test: true,
        }
    }

    #[inline]
    fn refresh(&mut self) {
        self.need_range_test = self.required_min.is_some()
            || self.required_max.is_some()
            || self.min.is_some()
            || self.max.is_some();
    }

    /// Replaces the user minimum. `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] for a NaN bound.
    pub fn set_minimum(&mut self, min: Option<T>, closed: bool) -> RvResult<()> {
        if let Some(v) = min {
            check_bound(v, "minimum")?;
        }
        self.min = min.map(|v| Bound::new(v, closed));
        self.refresh();
        Ok(())
    }

    /// Replaces the user maximum. `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] for a NaN bound.
    pub fn set_maximum(&mut self, max: Option<T>, closed: bool) -> RvResult<()> {
        if let Some(v) = max {
            check_bound(v, "maximum")?;
        }
        self.max = max.map(|v| Bound::new(v, closed));
        self.refresh();
        Ok(())
    }

    /// Narrows the user minimum.
    ///
    /// If no user minimum exists it is set. A larger value replaces the
    /// current one; an equal value can only turn a closed boundary into an
    /// open one; a smaller value leaves the bound unchanged.
    pub fn tighten_minimum(&mut self, min: T, closed: bool) -> RvResult<()> {
        check_bound(min, "minimum")?;
        self.min = intersect_lower(self.min, Some(Bound::new(min, closed)));
        self.refresh();
        Ok(())
    }

    /// Narrows the user maximum. Mirror image of [`Self::tighten_minimum`].
    pub fn tighten_maximum(&mut self, max: T, closed: bool) -> RvResult<()> {
        check_bound(max, "maximum")?;
        self.max = intersect_upper(self.max, Some(Bound::new(max, closed)));
        self.refresh();
        Ok(())
    }

    /// Installs or narrows the required minimum.
    ///
    /// Distributions call this from their constructors. A required bound can
    /// only become stricter, so no caller can loosen a constraint the
    /// distribution relies on.
    pub fn require_minimum(&mut self, min: T, closed: bool) -> RvResult<()> {
        check_bound(min, "required minimum")?;
        self.required_min = intersect_lower(self.required_min, Some(Bound::new(min, closed)));
        self.refresh();
        Ok(())
    }

    /// Installs or narrows the required maximum.
    pub fn require_maximum(&mut self, max: T, closed: bool) -> RvResult<()> {
        check_bound(max, "required maximum")?;
        self.required_max = intersect_upper(self.required_max, Some(Bound::new(max, closed)));
        self.refresh();
        Ok(())
    }

    /// Returns `true` if any bound is set.
    ///
    /// Unconstrained distributions use this to skip the range test.
    #[inline]
    pub fn range_test_needed(&self) -> bool {
        self.need_range_test
    }

    /// Returns `true` if `value` violates the required or the user range.
    #[inline]
    pub fn range_test_failed(&self, value: T) -> bool {
        let low = self.required_min.map_or(false, |b| b.excludes_below(value))
            || self.min.map_or(false, |b| b.excludes_below(value));
        let high = self.required_max.map_or(false, |b| b.excludes_above(value))
            || self.max.map_or(false, |b| b.excludes_above(value));
        low || high
    }

    /// Returns `true` if `value` satisfies every bound.
    #[inline]
    pub fn admits(&self, value: T) -> bool {
        !self.range_test_failed(value)
    }

    /// The user minimum alone.
    pub fn user_minimum(&self) -> Option<Bound<T>> {
        self.min
    }

    /// The user maximum alone.
    pub fn user_maximum(&self) -> Option<Bound<T>> {
        self.max
    }

    /// The required minimum alone.
    pub fn required_minimum(&self) -> Option<Bound<T>> {
        self.required_min
    }

    /// The required maximum alone.
    pub fn required_maximum(&self) -> Option<Bound<T>> {
        self.required_max
    }

    /// The effective lower bound: required and user minimum intersected.
    pub fn effective_minimum(&self) -> Option<Bound<T>> {
        intersect_lower(self.required_min, self.min)
    }

    /// The effective upper bound: required and user maximum intersected.
    pub fn effective_maximum(&self) -> Option<Bound<T>> {
        intersect_upper(self.required_max, self.max)
    }

    /// Lower bound on generated values, if any.
    pub fn minimum(&self) -> Option<T> {
        self.effective_minimum().map(|b| b.value)
    }

    /// Whether the lower bound can itself be generated.
    pub fn minimum_closed(&self) -> Option<bool> {
        self.effective_minimum().map(|b| b.closed)
    }

    /// Upper bound on generated values, if any.
    pub fn maximum(&self) -> Option<T> {
        self.effective_maximum().map(|b| b.value)
    }

    /// Whether the upper bound can itself be generated.
    pub fn maximum_closed(&self) -> Option<bool> {
        self.effective_maximum().map(|b| b.closed)
    }
}
