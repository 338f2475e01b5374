//! Gaussian random variables.

use randvar_core::range::RangeConstraint;
use randvar_core::rng::static_random::{self, sample_until};
use randvar_core::traits::{InterarrivalTimeRandomVariable, OrderedRandomVariable, RandomVariable};
use randvar_core::types::RvResult;

use super::{check_count, check_finite, check_non_negative};

/// Normally distributed `f64` with a given mean and standard deviation.
///
/// Values outside the range are rejected and redrawn.
///
/// # Examples
///
/// ```rust
/// use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
/// use randvar_models::distributions::GaussianRv;
///
/// let mut rv = GaussianRv::new(10.0, 2.0).unwrap();
/// rv.set_minimum(Some(10.0), true).unwrap();
/// assert!(rv.next().unwrap() >= 10.0);
///
/// // Sum of four draws in one step.
/// let total = rv.next_n(4).unwrap();
/// assert!(total >= 40.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianRv {
    mean: f64,
    sdev: f64,
    range: RangeConstraint<f64>,
}

impl GaussianRv {
    /// Creates a Gaussian random variable.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`](randvar_core::types::RvError)
    /// if `mean` is not finite or `sdev` is negative or not finite.
    pub fn new(mean: f64, sdev: f64) -> RvResult<Self> {
        check_finite(mean, "mean")?;
        check_non_negative(sdev, "standard deviation")?;
        Ok(Self {
            mean,
            sdev,
            range: RangeConstraint::new(),
        })
    }

    /// The mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The standard deviation.
    pub fn sdev(&self) -> f64 {
        self.sdev
    }

    /// Sum of `n` independent draws.
    ///
    /// Drawn in one step as `n·mean + √n·sdev·Z`; the range applies to the
    /// per-draw average.
    pub fn next_n(&mut self, n: u32) -> RvResult<f64> {
        check_count(n)?;
        let nf = f64::from(n);
        let (mean, sdev) = (nf * self.mean, nf.sqrt() * self.sdev);
        let range = &self.range;
        sample_until(
            || Ok(mean + sdev * static_random::next_gaussian()),
            |v| range.admits(*v / nf),
        )
    }
}

impl RandomVariable for GaussianRv {
    type Value = f64;

    fn next(&mut self) -> RvResult<f64> {
        let (mean, sdev) = (self.mean, self.sdev);
        if !self.range.range_test_needed() {
            return Ok(mean + sdev * static_random::next_gaussian());
        }
        let range = &self.range;
        sample_until(
            || Ok(mean + sdev * static_random::next_gaussian()),
            |v| range.admits(*v),
        )
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl OrderedRandomVariable<f64> for GaussianRv {
    fn range(&self) -> &RangeConstraint<f64> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<f64> {
        &mut self.range
    }
}

/// Gaussian interarrival times: `round(mean + sdev·Z)`, never negative.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianIATimeRv {
    mean: f64,
    sdev: f64,
    range: RangeConstraint<i64>,
}

impl GaussianIATimeRv {
    /// Creates a Gaussian interarrival-time random variable.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`](randvar_core::types::RvError)
    /// if `mean` or `sdev` is negative or not finite.
    pub fn new(mean: f64, sdev: f64) -> RvResult<Self> {
        check_non_negative(mean, "mean")?;
        check_non_negative(sdev, "standard deviation")?;
        Ok(Self {
            mean,
            sdev,
            range: RangeConstraint::with_required_minimum(0, true)?,
        })
    }

    /// The mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The standard deviation.
    pub fn sdev(&self) -> f64 {
        self.sdev
    }

    /// Sum of `n` interarrival times, drawn in one step.
    pub fn next_n(&mut self, n: u32) -> RvResult<i64> {
        check_count(n)?;
        let nf = f64::from(n);
        let (mean, sdev) = (nf * self.mean, nf.sqrt() * self.sdev);
        let range = &self.range;
        sample_until(
            || Ok((mean + sdev * static_random::next_gaussian()).round() as i64),
            |v| *v >= 0 && range.admits((*v as f64 / nf).round() as i64),
        )
    }
}

impl RandomVariable for GaussianIATimeRv {
    type Value = i64;

    fn next(&mut self) -> RvResult<i64> {
        let (mean, sdev) = (self.mean, self.sdev);
        let range = &self.range;
        sample_until(
            || Ok((mean + sdev * static_random::next_gaussian()).round() as i64),
            |v| range.admits(*v),
        )
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl OrderedRandomVariable<i64> for GaussianIATimeRv {
    fn range(&self) -> &RangeConstraint<i64> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<i64> {
        &mut self.range
    }
}

impl InterarrivalTimeRandomVariable for GaussianIATimeRv {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_parameters() {
        assert!(GaussianRv::new(0.0, -1.0).is_err());
        assert!(GaussianRv::new(f64::INFINITY, 1.0).is_err());
        assert!(GaussianIATimeRv::new(-1.0, 1.0).is_err());
    }

    #[test]
    fn test_moments() {
        let mut rv = GaussianRv::new(3.0, 2.0).unwrap();
        let n = 100_000;
        let values: Vec<f64> = (0..n).map(|_| rv.next().unwrap()).collect();
        let mean = values.iter().sum::<f64>() / n as f64;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert_relative_eq!(mean, 3.0, epsilon = 0.05);
        assert_relative_eq!(var.sqrt(), 2.0, epsilon = 0.05);
    }

    #[test]
    fn test_next_n_scales() {
        let mut rv = GaussianRv::new(1.0, 1.0).unwrap();
        let n = 50_000;
        let mean = (0..n).map(|_| rv.next_n(9).unwrap()).sum::<f64>() / n as f64;
        assert_relative_eq!(mean, 9.0, epsilon = 0.1);
        assert!(rv.next_n(0).is_err());
    }

    #[test]
    fn test_two_sided_bounds() {
        let mut rv = GaussianRv::new(0.0, 1.0).unwrap();
        rv.set_minimum(Some(-0.5), false).unwrap();
        rv.set_maximum(Some(0.5), true).unwrap();
        for _ in 0..10_000 {
            let v = rv.next().unwrap();
            assert!(v > -0.5 && v <= 0.5);
        }
    }

    #[test]
    fn test_ia_time_never_negative() {
        let mut rv = GaussianIATimeRv::new(1.0, 5.0).unwrap();
        for _ in 0..10_000 {
            assert!(rv.next().unwrap() >= 0);
            assert!(rv.next_n(3).unwrap() >= 0);
        }
        assert_eq!(rv.minimum(), Some(0));
    }
}
