//! Exponentially distributed random variable.

use randvar_core::range::RangeConstraint;
use randvar_core::rng::static_random::{self, sample_until};
use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
use randvar_core::types::RvResult;

use super::{check_count, check_non_negative};

/// Exponentially distributed `f64` with a given mean.
///
/// # Examples
///
/// ```rust
/// use randvar_core::traits::RandomVariable;
/// use randvar_models::distributions::ExpDistrRv;
///
/// let mut rv = ExpDistrRv::new(2.0).unwrap();
/// assert!(rv.next().unwrap() >= 0.0);
/// assert!(rv.next_n(5).unwrap() >= 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ExpDistrRv {
    mean: f64,
    range: RangeConstraint<f64>,
}

impl ExpDistrRv {
    /// Creates an exponential random variable.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`](randvar_core::types::RvError)
    /// if `mean` is negative or not finite.
    pub fn new(mean: f64) -> RvResult<Self> {
        check_non_negative(mean, "mean")?;
        Ok(Self {
            mean,
            range: RangeConstraint::with_required_minimum(0.0, true)?,
        })
    }

    /// The mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of `n` independent draws, taken from the Gamma(n, mean)
    /// distribution. The range applies to the per-draw average.
    pub fn next_n(&mut self, n: u32) -> RvResult<f64> {
        check_count(n)?;
        let (mean, nf) = (self.mean, f64::from(n));
        let range = &self.range;
        sample_until(
            || static_random::next_double_exp_distr_n(mean, n),
            |v| range.admits(*v / nf),
        )
    }
}

impl RandomVariable for ExpDistrRv {
    type Value = f64;

    fn next(&mut self) -> RvResult<f64> {
        let mean = self.mean;
        let range = &self.range;
        sample_until(
            || static_random::next_double_exp_distr(mean),
            |v| range.admits(*v),
        )
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl OrderedRandomVariable<f64> for ExpDistrRv {
    fn range(&self) -> &RangeConstraint<f64> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<f64> {
        &mut self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_sum() {
        let mut rv = ExpDistrRv::new(4.0).unwrap();
        let n = 100_000;
        let mean = (0..n).map(|_| rv.next().unwrap()).sum::<f64>() / n as f64;
        assert_relative_eq!(mean, 4.0, max_relative = 0.03);

        let n = 20_000;
        let mean = (0..n).map(|_| rv.next_n(10).unwrap()).sum::<f64>() / n as f64;
        assert_relative_eq!(mean, 40.0, max_relative = 0.03);
    }

    #[test]
    fn test_zero_mean_and_invalid() {
        let mut rv = ExpDistrRv::new(0.0).unwrap();
        assert_eq!(rv.next().unwrap(), 0.0);
        assert!(ExpDistrRv::new(-2.0).is_err());
    }

    #[test]
    fn test_tightened_range() {
        let mut rv = ExpDistrRv::new(1.0).unwrap();
        rv.tighten_minimum(0.5, true).unwrap();
        rv.tighten_maximum(2.0, false).unwrap();
        for _ in 0..10_000 {
            let v = rv.next().unwrap();
            assert!((0.5..2.0).contains(&v));
        }
    }
}
