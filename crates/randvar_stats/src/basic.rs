//! Running mean and variance.
//!
//! Values are accumulated one at a time with West's algorithm. Both the
//! running mean and the running sum of squared deviations are updated with
//! Kahan compensation, so long runs of draws do not drift.
//!
//! ```text
//! q = x - mean
//! r = q / n
//! mean += r
//! T    += (n - 1)·q·r
//! ```
//!
//! The variance is `T / (n - 1)` for a sample and `T / n` for a population.

use crate::error::{StatsError, StatsResult};

/// Whether the variance is that of a sample or of a whole population.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Correction {
    /// Divide by `n - 1`.
    #[default]
    Sample,
    /// Divide by `n`.
    Population,
}

impl Correction {
    fn minimum_size(self) -> u64 {
        match self {
            Correction::Sample => 2,
            Correction::Population => 1,
        }
    }

    fn divisor(self, count: u64) -> f64 {
        match self {
            Correction::Sample => count as f64 - 1.0,
            Correction::Population => count as f64,
        }
    }
}

/// Snapshot of a [`BasicStats`] accumulator.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Number of values
    pub size: u64,
    /// Mean
    pub mean: f64,
    /// Variance under the accumulator's correction
    pub variance: f64,
    /// Standard deviation
    pub sdev: f64,
}

/// Accumulator for the mean and variance of a stream of values.
///
/// # Examples
///
/// ```
/// use approx::assert_relative_eq;
/// use randvar_stats::BasicStats;
///
/// let mut stats = BasicStats::sample();
/// stats.add_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert_eq!(stats.size(), 8);
/// assert_relative_eq!(stats.mean().unwrap(), 5.0);
/// assert_relative_eq!(stats.variance().unwrap(), 32.0 / 7.0, epsilon = 1e-12);
///
/// let mut population = BasicStats::population();
/// population.extend([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert_relative_eq!(population.sdev().unwrap(), 2.0, epsilon = 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BasicStats {
    correction: Correction,
    count: u64,
    mean: f64,
    /// Sum of squared deviations from the mean
    t: f64,
    /// Kahan compensation for `mean`
    mean_c: f64,
    /// Kahan compensation for `t`
    t_c: f64,
}

impl BasicStats {
    /// Creates an empty accumulator with the given correction.
    pub fn new(correction: Correction) -> Self {
        Self {
            correction,
            count: 0,
            mean: 0.0,
            t: 0.0,
            mean_c: 0.0,
            t_c: 0.0,
        }
    }

    /// Empty accumulator for sample statistics.
    pub fn sample() -> Self {
        Self::new(Correction::Sample)
    }

    /// Empty accumulator for population statistics.
    pub fn population() -> Self {
        Self::new(Correction::Population)
    }

    /// Accumulator already holding `n` values with the given mean and
    /// variance.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidArgument`] if `variance` is negative
    /// and [`StatsError::DatasetTooSmall`] if `n` is below the minimum size
    /// for `correction`.
    pub fn from_moments(correction: Correction, mean: f64, variance: f64, n: u64) -> StatsResult<Self> {
        if variance.is_nan() || variance < 0.0 {
            return Err(StatsError::InvalidArgument(format!(
                "variance {} must be non-negative",
                variance
            )));
        }
        let required = correction.minimum_size();
        if n < required {
            return Err(StatsError::DatasetTooSmall { size: n, required });
        }
        Ok(Self {
            count: n,
            mean,
            t: variance * correction.divisor(n),
            ..Self::new(correction)
        })
    }

    /// The correction in use.
    pub fn correction(&self) -> Correction {
        self.correction
    }

    /// Adds one value.
    pub fn add(&mut self, value: f64) -> &mut Self {
        let previous = self.count as f64;
        self.count += 1;
        let q = value - self.mean;
        let r = q / self.count as f64;

        let incr = r - self.mean_c;
        let mean = self.mean + incr;
        self.mean_c = (mean - self.mean) - incr;
        self.mean = mean;

        let incr = previous * q * r - self.t_c;
        let t = self.t + incr;
        self.t_c = (t - self.t) - incr;
        self.t = t;
        self
    }

    /// Adds every value in `values`.
    pub fn add_values(&mut self, values: &[f64]) -> &mut Self {
        for &value in values {
            self.add(value);
        }
        self
    }

    /// Merges the values accumulated by `other`.
    pub fn add_all(&mut self, other: &BasicStats) -> &mut Self {
        if other.count == 0 {
            return self;
        }
        if self.count == 0 {
            self.count = other.count;
            self.mean = other.mean;
            self.t = other.t;
            return self;
        }
        let (n1, n2) = (self.count as f64, other.count as f64);
        let n = n1 + n2;
        let delta = other.mean - self.mean;
        self.mean += delta * n2 / n;
        self.t += other.t + delta * delta * n1 * n2 / n;
        self.count += other.count;
        self.mean_c = 0.0;
        self.t_c = 0.0;
        self
    }

    /// Number of values added.
    pub fn size(&self) -> u64 {
        self.count
    }

    /// Mean of the values.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::DatasetTooSmall`] if no value has been added.
    pub fn mean(&self) -> StatsResult<f64> {
        if self.count == 0 {
            return Err(StatsError::DatasetTooSmall { size: 0, required: 1 });
        }
        Ok(self.mean)
    }

    /// Variance of the values.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::DatasetTooSmall`] with fewer than two values
    /// for a sample or none for a population.
    pub fn variance(&self) -> StatsResult<f64> {
        let required = self.correction.minimum_size();
        if self.count < required {
            return Err(StatsError::DatasetTooSmall {
                size: self.count,
                required,
            });
        }
        Ok(self.t / self.correction.divisor(self.count))
    }

    /// Standard deviation of the values.
    pub fn sdev(&self) -> StatsResult<f64> {
        Ok(self.variance()?.sqrt())
    }

    /// Size, mean, variance and standard deviation together.
    pub fn summary(&self) -> StatsResult<Summary> {
        let variance = self.variance()?;
        Ok(Summary {
            size: self.count,
            mean: self.mean,
            variance,
            sdev: variance.sqrt(),
        })
    }
}

impl Default for BasicStats {
    fn default() -> Self {
        Self::sample()
    }
}

impl Extend<f64> for BasicStats {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_too_small() {
        let mut stats = BasicStats::sample();
        assert!(stats.mean().is_err());
        stats.add(1.0);
        assert_eq!(stats.mean().unwrap(), 1.0);
        assert_eq!(
            stats.variance(),
            Err(StatsError::DatasetTooSmall { size: 1, required: 2 })
        );

        let mut population = BasicStats::population();
        population.add(1.0);
        assert_eq!(population.variance().unwrap(), 0.0);
    }

    #[test]
    fn test_large_offset_is_stable() {
        let mut stats = BasicStats::sample();
        for i in 0..10_000 {
            stats.add(1e9 + (i % 2) as f64);
        }
        assert_relative_eq!(stats.mean().unwrap(), 1e9 + 0.5, epsilon = 1e-6);
        assert_relative_eq!(stats.variance().unwrap(), 0.25 * 10_000.0 / 9_999.0, epsilon = 1e-6);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let values: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64 * 0.25).collect();
        let mut whole = BasicStats::sample();
        whole.add_values(&values);

        let mut left = BasicStats::sample();
        left.add_values(&values[..123]);
        let mut right = BasicStats::sample();
        right.add_values(&values[123..]);
        left.add_all(&right);

        assert_eq!(left.size(), whole.size());
        assert_relative_eq!(left.mean().unwrap(), whole.mean().unwrap(), epsilon = 1e-10);
        assert_relative_eq!(left.variance().unwrap(), whole.variance().unwrap(), epsilon = 1e-9);

        let mut empty = BasicStats::sample();
        empty.add_all(&whole);
        assert_relative_eq!(empty.variance().unwrap(), whole.variance().unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_from_moments() {
        let stats = BasicStats::from_moments(Correction::Sample, 3.0, 2.0, 10).unwrap();
        assert_eq!(stats.mean().unwrap(), 3.0);
        assert_relative_eq!(stats.variance().unwrap(), 2.0, epsilon = 1e-15);
        assert!(BasicStats::from_moments(Correction::Sample, 0.0, 1.0, 1).is_err());
        assert!(BasicStats::from_moments(Correction::Population, 0.0, -1.0, 5).is_err());
    }

    #[test]
    fn test_summary() {
        let mut stats = BasicStats::population();
        stats.extend([1.0, 3.0]);
        let summary = stats.summary().unwrap();
        assert_eq!(summary.size, 2);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.variance, 1.0);
        assert_eq!(summary.sdev, 1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_summary_json_fields() {
        let mut stats = BasicStats::sample();
        stats.extend([1.0, 3.0]);
        let json = serde_json::to_value(stats.summary().unwrap()).unwrap();
        assert_eq!(json["size"], 2);
        assert_eq!(json["mean"], 2.0);
        assert_eq!(json["variance"], 2.0);
    }
}
