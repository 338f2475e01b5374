//! # Leaf Distributions
//!
//! Concrete random variables drawing from the shared source in
//! [`randvar_core::rng::static_random`].
//!
//! ## Available Distributions
//!
//! | Module          | Types                                                       |
//! |-----------------|-------------------------------------------------------------|
//! | [`fixed`]       | `FixedRv<T>`, `FixedBooleanRv`, `FixedIATimeRv`             |
//! | [`determ`]      | `DetermRv<T>`, `DetermBooleanRv`, `DetermIATimeRv`          |
//! | [`uniform`]     | `UniformDoubleRv`, `UniformIntRv<T>`, `UniformBooleanRv`    |
//! | [`gaussian`]    | `GaussianRv`, `GaussianIATimeRv`                            |
//! | [`log_normal`]  | `LogNormalRv`                                               |
//! | [`exponential`] | `ExpDistrRv`                                                |
//! | [`poisson`]     | `PoissonIATimeRv`, `PoissonRv<T>`                           |
//! | [`binomial`]    | `BinomialBooleanRv`, `BinomialRv<T>`, `BinomialTable`       |
//! | [`gaussian_rvs`]| `GaussianRvs` (correlated vectors)                          |
//!
//! Constructors validate their parameters and return
//! [`RvResult`](randvar_core::types::RvResult). Values outside a variable's
//! range are handled by rejection sampling, except for fixed and
//! deterministic variables, which refuse bounds that exclude a value they
//! produce.

use num_traits::{Bounded, NumCast};

use randvar_core::range::{RangeConstraint, RangeValue};
use randvar_core::types::{RvError, RvResult};

pub mod binomial;
pub mod determ;
pub mod exponential;
pub mod fixed;
pub mod gaussian;
pub mod gaussian_rvs;
pub mod log_normal;
pub mod poisson;
pub mod uniform;

pub use binomial::{
    BinomialBooleanRv, BinomialDoubleRv, BinomialIntegerRv, BinomialLongRv, BinomialMode,
    BinomialRv, BinomialTable,
};
pub use determ::{
    DetermBooleanRv, DetermDoubleRv, DetermIATimeRv, DetermIntegerRv, DetermLongRv, DetermRv,
};
pub use exponential::ExpDistrRv;
pub use fixed::{FixedBooleanRv, FixedDoubleRv, FixedIATimeRv, FixedIntegerRv, FixedLongRv, FixedRv};
pub use gaussian::{GaussianIATimeRv, GaussianRv};
pub use gaussian_rvs::{CovarianceError, GaussianRvs};
pub use log_normal::LogNormalRv;
pub use poisson::{PoissonDoubleRv, PoissonIATimeRv, PoissonIntegerRv, PoissonLongRv, PoissonRv};
pub use uniform::{UniformBooleanRv, UniformDoubleRv, UniformIntRv, UniformIntegerRv, UniformLongRv};

/// Value types for counting distributions (Poisson, binomial).
///
/// Counts are produced as `f64` and converted with [`from_count`]:
/// integer types round to the nearest value and saturate at their maximum.
///
/// [`from_count`]: CountValue::from_count
pub trait CountValue: RangeValue {
    /// Converts a non-negative count.
    fn from_count(count: f64) -> Self;
}

macro_rules! impl_integral_count {
    ($($ty:ty),*) => {
        $(
            impl CountValue for $ty {
                #[inline]
                fn from_count(count: f64) -> Self {
                    <$ty as NumCast>::from(count.round()).unwrap_or_else(<$ty as Bounded>::max_value)
                }
            }
        )*
    };
}

impl_integral_count!(i32, i64);

impl CountValue for f64 {
    #[inline]
    fn from_count(count: f64) -> Self {
        count
    }
}

/// Applies `update` to a copy of `range` and commits it only if every value
/// in `values` is still admitted.
///
/// Used by variables whose output is known in advance.
pub(crate) fn update_admitting<T, F>(
    range: &mut RangeConstraint<T>,
    values: impl IntoIterator<Item = T>,
    update: F,
) -> RvResult<()>
where
    T: RangeValue,
    F: FnOnce(&mut RangeConstraint<T>) -> RvResult<()>,
{
    let mut trial = range.clone();
    update(&mut trial)?;
    if let Some(excluded) = values.into_iter().find(|v| trial.range_test_failed(*v)) {
        return Err(RvError::invalid(format!(
            "bound would exclude the value {}",
            excluded
        )));
    }
    *range = trial;
    Ok(())
}

/// Smallest `f64` greater than `x` (finite `x` only).
pub(crate) fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Largest `f64` smaller than `x` (finite `x` only).
pub(crate) fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

pub(crate) fn check_non_negative(value: f64, what: &str) -> RvResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RvError::invalid(format!(
            "{} must be finite and non-negative, got {}",
            what, value
        )))
    }
}

pub(crate) fn check_finite(value: f64, what: &str) -> RvResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RvError::invalid(format!("{} must be finite, got {}", what, value)))
    }
}

pub(crate) fn check_count(n: u32) -> RvResult<()> {
    if n == 0 {
        Err(RvError::invalid("number of summed draws must be at least 1"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_count_rounds_and_saturates() {
        assert_eq!(i32::from_count(2.4), 2);
        assert_eq!(i32::from_count(2.5), 3);
        assert_eq!(i32::from_count(1e12), i32::MAX);
        assert_eq!(i64::from_count(7.0), 7);
        assert_eq!(f64::from_count(2.25), 2.25);
    }

    #[test]
    fn test_next_up_and_down() {
        assert!(next_up(1.0) > 1.0);
        assert_eq!(next_down(next_up(1.0)), 1.0);
        assert!(next_down(0.0) < 0.0);
        assert!(next_up(-1.0) > -1.0);
        assert_eq!(next_up(0.0), f64::from_bits(1));
    }

    #[test]
    fn test_update_admitting_rolls_back() {
        let mut range = RangeConstraint::<i32>::new();
        let result = update_admitting(&mut range, [5], |r| r.set_minimum(Some(6), true));
        assert!(result.is_err());
        assert_eq!(range.minimum(), None);

        update_admitting(&mut range, [5], |r| r.set_minimum(Some(5), true)).unwrap();
        assert_eq!(range.minimum(), Some(5));
    }
}
