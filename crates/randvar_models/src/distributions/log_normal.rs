//! Log-normal random variable.
//!
//! A value is `exp(mu + sigma·Z)`. The distribution is usually described
//! by the mean `m` and standard deviation `s` of the value itself; the
//! conversions are
//!
//! ```text
//! mu    = ln(m² / √(s² + m²))
//! sigma = √ln(1 + s²/m²)
//! ```

use randvar_core::range::RangeConstraint;
use randvar_core::rng::static_random::{self, sample_until};
use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
use randvar_core::types::{RvError, RvResult};

use super::{check_finite, check_non_negative};

/// Log-normally distributed `f64`.
///
/// # Examples
///
/// ```rust
/// use approx::assert_relative_eq;
/// use randvar_models::distributions::LogNormalRv;
///
/// let rv = LogNormalRv::from_mean_sdev(10.0, 3.0).unwrap();
/// assert_relative_eq!(rv.mean(), 10.0, epsilon = 1e-12);
/// assert_relative_eq!(rv.sdev(), 3.0, epsilon = 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LogNormalRv {
    mu: f64,
    sigma: f64,
    range: RangeConstraint<f64>,
}

impl LogNormalRv {
    /// Creates a log-normal variable from the parameters of the underlying
    /// normal distribution.
    pub fn new(mu: f64, sigma: f64) -> RvResult<Self> {
        check_finite(mu, "mu")?;
        check_non_negative(sigma, "sigma")?;
        Ok(Self {
            mu,
            sigma,
            range: RangeConstraint::new(),
        })
    }

    /// Creates a log-normal variable with the given mean and standard
    /// deviation.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] unless `mean > 0` and
    /// `sdev >= 0`.
    pub fn from_mean_sdev(mean: f64, sdev: f64) -> RvResult<Self> {
        Self::new(Self::mu_from(mean, sdev)?, Self::sigma_from(mean, sdev)?)
    }

    fn check_moments(mean: f64, sdev: f64) -> RvResult<()> {
        check_non_negative(sdev, "standard deviation")?;
        if mean.is_finite() && mean > 0.0 {
            Ok(())
        } else {
            Err(RvError::invalid(format!("mean {} must be positive", mean)))
        }
    }

    /// `mu` of the log-normal distribution with the given mean and
    /// standard deviation.
    pub fn mu_from(mean: f64, sdev: f64) -> RvResult<f64> {
        Self::check_moments(mean, sdev)?;
        let m2 = mean * mean;
        Ok((m2 / (sdev * sdev + m2).sqrt()).ln())
    }

    /// `sigma` of the log-normal distribution with the given mean and
    /// standard deviation.
    pub fn sigma_from(mean: f64, sdev: f64) -> RvResult<f64> {
        Self::check_moments(mean, sdev)?;
        Ok((1.0 + (sdev * sdev) / (mean * mean)).ln().sqrt())
    }

    /// `mu` of the underlying normal distribution.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// `sigma` of the underlying normal distribution.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Mean of the values: `exp(mu + sigma²/2)`.
    pub fn mean(&self) -> f64 {
        (self.mu + self.sigma * self.sigma / 2.0).exp()
    }

    /// Standard deviation of the values.
    pub fn sdev(&self) -> f64 {
        let s2 = self.sigma * self.sigma;
        ((s2.exp() - 1.0) * (2.0 * self.mu + s2).exp()).sqrt()
    }

    /// Natural logarithm of the next value.
    ///
    /// Skips the exponential unless a range is in force, in which case the
    /// range is tested against the exponentiated value.
    pub fn log_next(&mut self) -> RvResult<f64> {
        let (mu, sigma) = (self.mu, self.sigma);
        if !self.range.range_test_needed() {
            return Ok(mu + sigma * static_random::next_gaussian());
        }
        let range = &self.range;
        sample_until(
            || Ok(mu + sigma * static_random::next_gaussian()),
            |v| range.admits(v.exp()),
        )
    }
}

impl RandomVariable for LogNormalRv {
    type Value = f64;

    fn next(&mut self) -> RvResult<f64> {
        let (mu, sigma) = (self.mu, self.sigma);
        let range = &self.range;
        sample_until(
            || Ok((mu + sigma * static_random::next_gaussian()).exp()),
            |v| range.admits(*v),
        )
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl OrderedRandomVariable<f64> for LogNormalRv {
    fn range(&self) -> &RangeConstraint<f64> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<f64> {
        &mut self.range
    }
}
