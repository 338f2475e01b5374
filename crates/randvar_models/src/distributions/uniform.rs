//! Uniformly distributed random variables.
//!
//! # Interval Arithmetic
//!
//! `UniformDoubleRv` maps a single uniform draw `u` in `[0, 1)` onto the
//! requested interval without rejection:
//!
//! | Interval  | Mapping                                   |
//! |-----------|-------------------------------------------|
//! | `[0, 1)`  | `u` unchanged                             |
//! | `[a, b)`  | `a + (b - a) u`, kept below `b`           |
//! | `[a, b]`  | `a + (b - a) u / (1 - 2^-53)`, kept ≤ `b` |
//! | `(a, b)`  | as `[a⁺, b)` with `a⁺` the next double    |
//! | `(a, b]`  | `b - (b - a) u`, kept above `a`           |
//!
//! When `b - a` overflows, `scale` holds half the width and is added twice.
//! A closed `[v, v]` interval collapses to the value `v`; every other
//! interval containing no double is rejected at construction.

use num_traits::{Bounded, NumCast, PrimInt};

use randvar_core::range::{Bound, RangeConstraint, RangeValue};
use randvar_core::rng::static_random::{self, sample_until};
use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
use randvar_core::types::{RvError, RvResult};

use super::{check_finite, next_down, next_up};

/// Largest double below 1.0.
const ONE_MINUS_ULP: f64 = 1.0 - f64::EPSILON / 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mapping {
    /// `[0, 1)`: the raw draw.
    Unit,
    /// A single representable value.
    Fixed(f64),
    /// `base + scale * u`, closed below.
    Up { base: f64, scale: Scale, limit: f64 },
    /// `base + scale * u / (1 - ulp)`, closed on both sides.
    Closed { base: f64, scale: Scale, limit: f64 },
    /// `top - scale * u`, open below.
    Down { top: f64, scale: Scale, floor: f64 },
}

/// Width of an interval.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Scale {
    Full(f64),
    /// Half the width, for intervals wider than `f64::MAX`.
    Half(f64),
}

impl Scale {
    fn between(lower: f64, upper: f64) -> Self {
        let width = upper - lower;
        if width.is_finite() {
            Scale::Full(width)
        } else {
            Scale::Half(upper * 0.5 - lower * 0.5)
        }
    }

    /// `x + width * u`, never forming the full width.
    #[inline]
    fn add(self, x: f64, u: f64) -> f64 {
        match self {
            Scale::Full(w) => x + w * u,
            Scale::Half(h) => {
                let step = h * u;
                x + step + step
            }
        }
    }

    #[inline]
    fn sub(self, x: f64, u: f64) -> f64 {
        match self {
            Scale::Full(w) => x - w * u,
            Scale::Half(h) => {
                let step = h * u;
                x - step - step
            }
        }
    }
}

impl Mapping {
    #[inline]
    fn apply(self, u: f64) -> f64 {
        match self {
            Mapping::Unit => u,
            Mapping::Fixed(v) => v,
            Mapping::Up { base, scale, limit } => scale.add(base, u).min(limit),
            Mapping::Closed { base, scale, limit } => scale.add(base, u / ONE_MINUS_ULP).min(limit),
            Mapping::Down { top, scale, floor } => scale.sub(top, u).max(floor),
        }
    }
}

/// Uniformly distributed `f64` over an interval with independently open or
/// closed ends.
///
/// # Examples
///
/// ```rust
/// use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
/// use randvar_models::distributions::UniformDoubleRv;
///
/// let mut rv = UniformDoubleRv::new(-1.0, false, 1.0, true).unwrap();
/// for _ in 0..1000 {
///     let v = rv.next().unwrap();
///     assert!(v > -1.0 && v <= 1.0);
/// }
/// assert_eq!(rv.minimum_closed(), Some(false));
///
/// assert!(UniformDoubleRv::new(2.0, true, 2.0, false).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UniformDoubleRv {
    lower: f64,
    lower_closed: bool,
    upper: f64,
    upper_closed: bool,
    mapping: Mapping,
    range: RangeConstraint<f64>,
}

impl UniformDoubleRv {
    /// Uniform values in `[0, 1)`.
    pub fn unit() -> Self {
        Self {
            lower: 0.0,
            lower_closed: true,
            upper: 1.0,
            upper_closed: false,
            mapping: Mapping::Unit,
            range: RangeConstraint::with_required(Bound::new(0.0, true), Bound::new(1.0, false)),
        }
    }

    /// Uniform values between `lower` and `upper`.
    ///
    /// # Arguments
    ///
    /// * `lower` - Lower end of the interval
    /// * `lower_closed` - Whether `lower` can be returned
    /// * `upper` - Upper end of the interval
    /// * `upper_closed` - Whether `upper` can be returned
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] if an end is not finite,
    /// `lower > upper`, or the interval contains no double.
    pub fn new(lower: f64, lower_closed: bool, upper: f64, upper_closed: bool) -> RvResult<Self> {
        check_finite(lower, "lower end")?;
        check_finite(upper, "upper end")?;
        if lower > upper {
            return Err(RvError::invalid(format!(
                "lower end {} exceeds upper end {}",
                lower, upper
            )));
        }
        let mapping = Self::mapping(lower, lower_closed, upper, upper_closed)?;

        let mut range = RangeConstraint::new();
        range.require_minimum(lower, lower_closed)?;
        range.require_maximum(upper, upper_closed)?;
        Ok(Self {
            lower,
            lower_closed,
            upper,
            upper_closed,
            mapping,
            range,
        })
    }

    fn mapping(lower: f64, lower_closed: bool, upper: f64, upper_closed: bool) -> RvResult<Mapping> {
        let empty = || {
            Err(RvError::invalid(format!(
                "interval {}{}, {}{} is empty",
                if lower_closed { '[' } else { '(' },
                lower,
                upper,
                if upper_closed { ']' } else { ')' }
            )))
        };

        if lower == upper {
            return if lower_closed && upper_closed {
                Ok(Mapping::Fixed(lower))
            } else {
                empty()
            };
        }
        if lower == 0.0 && upper == 1.0 && lower_closed && !upper_closed {
            return Ok(Mapping::Unit);
        }

        let mapping = match (lower_closed, upper_closed) {
            (true, false) => Mapping::Up {
                base: lower,
                scale: Scale::between(lower, upper),
                limit: next_down(upper),
            },
            (true, true) => Mapping::Closed {
                base: lower,
                scale: Scale::between(lower, upper),
                limit: upper,
            },
            (false, false) => {
                let base = next_up(lower);
                if base >= upper {
                    return empty();
                }
                Mapping::Up {
                    base,
                    scale: Scale::between(base, upper),
                    limit: next_down(upper),
                }
            }
            (false, true) => Mapping::Down {
                top: upper,
                scale: Scale::between(lower, upper),
                floor: next_up(lower),
            },
        };
        Ok(mapping)
    }

    /// Lower end of the interval.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Whether the lower end can be returned.
    pub fn lower_closed(&self) -> bool {
        self.lower_closed
    }

    /// Upper end of the interval.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Whether the upper end can be returned.
    pub fn upper_closed(&self) -> bool {
        self.upper_closed
    }
}

impl Default for UniformDoubleRv {
    fn default() -> Self {
        Self::unit()
    }
}

impl RandomVariable for UniformDoubleRv {
    type Value = f64;

    fn next(&mut self) -> RvResult<f64> {
        let mapping = self.mapping;
        let range = &self.range;
        sample_until(
            || Ok(mapping.apply(static_random::next_double())),
            |v| range.admits(*v),
        )
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl OrderedRandomVariable<f64> for UniformDoubleRv {
    fn range(&self) -> &RangeConstraint<f64> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<f64> {
        &mut self.range
    }
}

/// Uniformly distributed integer (`i32` or `i64`) over an interval with
/// independently open or closed ends.
///
/// # Examples
///
/// ```rust
/// use randvar_core::traits::RandomVariable;
/// use randvar_models::distributions::UniformIntegerRv;
///
/// let mut rv = UniformIntegerRv::new(0, true, 5, false).unwrap();
/// for _ in 0..1000 {
///     assert!((0..5).contains(&rv.next().unwrap()));
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UniformIntRv<T: RangeValue> {
    /// Smallest value produced.
    low: i64,
    /// Largest value produced.
    high: i64,
    range: RangeConstraint<T>,
}

/// Uniform `i32`.
pub type UniformIntegerRv = UniformIntRv<i32>;
/// Uniform `i64`.
pub type UniformLongRv = UniformIntRv<i64>;

impl<T: RangeValue + PrimInt> UniformIntRv<T> {
    /// Uniform integers between `lower` and `upper`.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] if the interval holds no
    /// integer. `[v, v]` is valid and always returns `v`.
    pub fn new(lower: T, lower_closed: bool, upper: T, upper_closed: bool) -> RvResult<Self> {
        let empty = || {
            RvError::invalid(format!(
                "interval {}{}, {}{} holds no integer",
                if lower_closed { '[' } else { '(' },
                lower,
                upper,
                if upper_closed { ']' } else { ')' }
            ))
        };
        let lower_i = lower.to_i64().ok_or_else(empty)?;
        let upper_i = upper.to_i64().ok_or_else(empty)?;
        let low = if lower_closed {
            Some(lower_i)
        } else {
            lower_i.checked_add(1)
        };
        let high = if upper_closed {
            Some(upper_i)
        } else {
            upper_i.checked_sub(1)
        };
        let (low, high) = match (low, high) {
            (Some(low), Some(high)) if low <= high => (low, high),
            _ => return Err(empty()),
        };

        let mut range = RangeConstraint::new();
        range.require_minimum(lower, lower_closed)?;
        range.require_maximum(upper, upper_closed)?;
        Ok(Self { low, high, range })
    }

    /// Smallest value produced.
    pub fn low(&self) -> T {
        <T as NumCast>::from(self.low).unwrap_or_else(<T as Bounded>::min_value)
    }

    /// Largest value produced.
    pub fn high(&self) -> T {
        <T as NumCast>::from(self.high).unwrap_or_else(<T as Bounded>::max_value)
    }

    #[inline]
    fn draw(&self) -> RvResult<T> {
        let v = if self.low == self.high {
            self.low
        } else {
            static_random::next_long_range(self.low, self.high)?
        };
        <T as NumCast>::from(v).ok_or_else(|| RvError::invalid(format!("{} out of range for the value type", v)))
    }
}

impl<T: RangeValue + PrimInt> RandomVariable for UniformIntRv<T> {
    type Value = T;

    fn next(&mut self) -> RvResult<T> {
        let this = &*self;
        sample_until(|| this.draw(), |v| this.range.admits(*v))
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl<T: RangeValue + PrimInt> OrderedRandomVariable<T> for UniformIntRv<T> {
    fn range(&self) -> &RangeConstraint<T> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<T> {
        &mut self.range
    }
}

/// Fair coin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniformBooleanRv;

impl UniformBooleanRv {
    /// Creates a fair coin.
    pub fn new() -> Self {
        Self
    }
}

impl RandomVariable for UniformBooleanRv {
    type Value = bool;

    fn next(&mut self) -> RvResult<bool> {
        Ok(static_random::next_boolean())
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_mapping_selected() {
        let rv = UniformDoubleRv::new(0.0, true, 1.0, false).unwrap();
        assert_eq!(rv.mapping, Mapping::Unit);
        assert_eq!(UniformDoubleRv::unit(), rv);
    }

    #[test]
    fn test_all_closure_combinations_stay_in_range() {
        for &(lc, uc) in &[(true, true), (true, false), (false, true), (false, false)] {
            let mut rv = UniformDoubleRv::new(2.0, lc, 3.0, uc).unwrap();
            for _ in 0..20_000 {
                let v = rv.next().unwrap();
                assert!(if lc { v >= 2.0 } else { v > 2.0 }, "{} vs [{}, {}]", v, lc, uc);
                assert!(if uc { v <= 3.0 } else { v < 3.0 }, "{} vs [{}, {}]", v, lc, uc);
            }
        }
    }

    #[test]
    fn test_mapping_extremes() {
        let up = Mapping::Up {
            base: 2.0,
            scale: Scale::Full(1.0),
            limit: next_down(3.0),
        };
        assert_eq!(up.apply(0.0), 2.0);
        assert!(up.apply(ONE_MINUS_ULP) < 3.0);

        let closed = Mapping::Closed {
            base: 2.0,
            scale: Scale::Full(1.0),
            limit: 3.0,
        };
        assert_eq!(closed.apply(ONE_MINUS_ULP), 3.0);

        let down = Mapping::Down {
            top: 3.0,
            scale: Scale::Full(1.0),
            floor: next_up(2.0),
        };
        assert_eq!(down.apply(0.0), 3.0);
        assert!(down.apply(ONE_MINUS_ULP) > 2.0);
    }

    #[test]
    fn test_full_double_range_spans_both_signs() {
        for &(lc, uc) in &[(true, true), (true, false), (false, true), (false, false)] {
            let mut rv = UniformDoubleRv::new(-f64::MAX, lc, f64::MAX, uc).unwrap();
            let draws: Vec<f64> = (0..1_000).map(|_| rv.next().unwrap()).collect();
            assert!(draws.iter().all(|v| v.is_finite()));
            assert!(draws.iter().any(|&v| v < 0.0), "no negative draw for ({}, {})", lc, uc);
            assert!(draws.iter().any(|&v| v > 0.0), "no positive draw for ({}, {})", lc, uc);
            assert!(draws.iter().any(|&v| v != draws[0]));
        }
    }

    #[test]
    fn test_wide_mapping_extremes() {
        let closed = Mapping::Closed {
            base: -f64::MAX,
            scale: Scale::between(-f64::MAX, f64::MAX),
            limit: f64::MAX,
        };
        assert_eq!(closed.apply(0.0), -f64::MAX);
        assert_eq!(closed.apply(0.5), 0.0);
        assert!(closed.apply(ONE_MINUS_ULP) <= f64::MAX);

        let down = Mapping::Down {
            top: f64::MAX,
            scale: Scale::between(-f64::MAX, f64::MAX),
            floor: next_up(-f64::MAX),
        };
        assert_eq!(down.apply(0.0), f64::MAX);
        assert!(down.apply(ONE_MINUS_ULP) > -f64::MAX);
    }

    #[test]
    fn test_unit_range_bounds() {
        let rv = UniformDoubleRv::unit();
        assert_eq!(rv.minimum(), Some(0.0));
        assert_eq!(rv.minimum_closed(), Some(true));
        assert_eq!(rv.maximum(), Some(1.0));
        assert_eq!(rv.maximum_closed(), Some(false));
    }

    #[test]
    fn test_degenerate_double_intervals() {
        let mut rv = UniformDoubleRv::new(4.0, true, 4.0, true).unwrap();
        assert_eq!(rv.next().unwrap(), 4.0);
        assert!(UniformDoubleRv::new(4.0, false, 4.0, true).is_err());
        assert!(UniformDoubleRv::new(4.0, true, 4.0, false).is_err());
        assert!(UniformDoubleRv::new(4.0, false, 4.0, false).is_err());
        assert!(UniformDoubleRv::new(1.0, false, next_up(1.0), false).is_err());
        assert!(UniformDoubleRv::new(5.0, true, 4.0, true).is_err());
        assert!(UniformDoubleRv::new(f64::NAN, true, 4.0, true).is_err());
    }

    #[test]
    fn test_user_bound_rejection() {
        let mut rv = UniformDoubleRv::new(0.0, true, 10.0, true).unwrap();
        rv.tighten_minimum(5.0, false).unwrap();
        for _ in 0..10_000 {
            assert!(rv.next().unwrap() > 5.0);
        }
        // The user bound cannot widen the interval.
        rv.set_maximum(Some(20.0), true).unwrap();
        assert_eq!(rv.maximum(), Some(10.0));
    }

    #[test]
    fn test_integer_intervals() {
        let rv = UniformIntegerRv::new(0, false, 5, false).unwrap();
        assert_eq!((rv.low(), rv.high()), (1, 4));

        let mut single = UniformLongRv::new(7, true, 7, true).unwrap();
        assert_eq!(single.next().unwrap(), 7);

        assert!(UniformIntegerRv::new(7, true, 7, false).is_err());
        assert!(UniformIntegerRv::new(7, false, 7, true).is_err());
        assert!(UniformIntegerRv::new(7, false, 8, false).is_err());
        assert!(UniformIntegerRv::new(9, true, 8, true).is_err());
        assert!(UniformLongRv::new(i64::MAX, false, i64::MAX, true).is_err());
    }

    #[test]
    fn test_integer_full_coverage() {
        let mut rv = UniformIntegerRv::new(-2, true, 2, true).unwrap();
        let mut seen = [0usize; 5];
        for _ in 0..10_000 {
            seen[(rv.next().unwrap() + 2) as usize] += 1;
        }
        assert!(seen.iter().all(|&c| c > 1_500));
    }

    #[test]
    fn test_integer_user_bounds() {
        let mut rv = UniformIntegerRv::new(0, true, 100, true).unwrap();
        rv.set_minimum(Some(40), true).unwrap();
        rv.set_maximum(Some(42), false).unwrap();
        for _ in 0..1_000 {
            let v = rv.next().unwrap();
            assert!(v == 40 || v == 41);
        }
    }

    #[test]
    fn test_boolean_both_values() {
        let mut rv = UniformBooleanRv::new();
        let trues = (0..10_000).filter(|_| rv.next().unwrap()).count();
        assert!((4_500..5_500).contains(&trues));
    }
}
