//! # Binomial Random Variables
//!
//! [`BinomialRv`] draws the number of successes in `n` independent trials,
//! each succeeding with probability `p`. Sampling uses one of three tiers,
//! chosen once at construction:
//!
//! | Condition                                              | Mode         |
//! |--------------------------------------------------------|--------------|
//! | `n < 61`                                               | exact table  |
//! | `p == 0` or `p == 1`                                   | degenerate   |
//! | `(p <= 0.05 && n >= 20) \|\| (n >= 100 && n·p <= 10)`  | Poisson(n·p) |
//! | otherwise                                              | Gaussian     |
//!
//! The table holds `n + 2` cumulative probabilities and is searched with a
//! binary search on a uniform draw. The Poisson and Gaussian approximations
//! reject draws outside `[0, n]`.

use std::marker::PhantomData;

use tracing::debug;

use randvar_core::range::RangeConstraint;
use randvar_core::rng::static_random::{self, sample_until};
use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
use randvar_core::types::{RvError, RvResult};

use super::CountValue;

/// Largest `n` sampled from an exact table.
pub const MAX_TABLE_TRIES: u64 = 60;

fn check_probability(prob: f64) -> RvResult<()> {
    if (0.0..=1.0).contains(&prob) {
        Ok(())
    } else {
        Err(RvError::invalid(format!(
            "probability {} not in [0, 1]",
            prob
        )))
    }
}

/// Bernoulli trial: `true` with probability `prob`.
#[derive(Clone, Debug, PartialEq)]
pub struct BinomialBooleanRv {
    prob: f64,
}

impl BinomialBooleanRv {
    /// Creates a Bernoulli random variable.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] if `prob` is not in `[0, 1]`.
    pub fn new(prob: f64) -> RvResult<Self> {
        check_probability(prob)?;
        Ok(Self { prob })
    }

    /// Success probability.
    pub fn prob(&self) -> f64 {
        self.prob
    }
}

impl RandomVariable for BinomialBooleanRv {
    type Value = bool;

    fn next(&mut self) -> RvResult<bool> {
        Ok(static_random::next_double() < self.prob)
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

/// Cumulative binomial probabilities for inverse-CDF sampling.
///
/// Entry `0` is `0.0` and entry `i + 1` is `P(X <= i)`; the final entry is
/// exactly `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct BinomialTable {
    cumulative: Vec<f64>,
}

impl BinomialTable {
    /// Builds the table for `n` trials with success probability `prob`.
    ///
    /// `C(n, i)·p^i` is accumulated from the left and the `(1-p)^(n-i)`
    /// factor is applied from the right, so neither factor underflows
    /// before the other is applied.
    pub fn new(prob: f64, n: u64) -> RvResult<Self> {
        check_probability(prob)?;
        let len = usize::try_from(n)
            .ok()
            .and_then(|n| n.checked_add(2))
            .ok_or_else(|| RvError::invalid(format!("{} trials is too many for a table", n)))?;
        let q = 1.0 - prob;

        let mut terms = vec![0.0; len - 1];
        terms[0] = 1.0;
        for i in 1..terms.len() {
            terms[i] = terms[i - 1] * ((n - i as u64 + 1) as f64 / i as f64) * prob;
        }
        let mut q_power = 1.0;
        for term in terms.iter_mut().rev() {
            *term *= q_power;
            q_power *= q;
        }

        let mut cumulative = Vec::with_capacity(len);
        cumulative.push(0.0);
        let mut sum = 0.0;
        for term in &terms {
            sum += term;
            cumulative.push(sum);
        }
        for c in cumulative.iter_mut() {
            *c /= sum;
        }
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }
        Ok(Self { cumulative })
    }

    /// The cumulative entries.
    pub fn entries(&self) -> &[f64] {
        &self.cumulative
    }

    /// Number of successes for the uniform draw `u` in `[0, 1)`.
    ///
    /// A draw equal to an entry resolves to the count starting at that
    /// entry.
    pub fn sample(&self, u: f64) -> u64 {
        let index = self.cumulative.partition_point(|c| *c <= u);
        index.saturating_sub(1).min(self.cumulative.len() - 2) as u64
    }
}

/// Sampling strategy selected for a binomial random variable.
#[derive(Clone, Debug, PartialEq)]
pub enum BinomialMode {
    /// Exact inverse-CDF table (`n < 61`).
    Table(BinomialTable),
    /// Poisson approximation with mean `n·p`.
    Poisson {
        /// `n·p`
        mean: f64,
    },
    /// Gaussian approximation, rounded.
    Gaussian {
        /// `n·p`
        mean: f64,
        /// `√(n·p·(1-p))`
        sdev: f64,
    },
    /// `p` is 0 or 1, so every draw is the same.
    Degenerate(u64),
}

impl BinomialMode {
    /// Selects the sampling strategy for `n` trials with probability `prob`.
    pub fn select(prob: f64, n: u64) -> RvResult<Self> {
        check_probability(prob)?;
        let nf = n as f64;
        let mean = nf * prob;
        let mode = if n <= MAX_TABLE_TRIES {
            BinomialMode::Table(BinomialTable::new(prob, n)?)
        } else if prob == 0.0 {
            BinomialMode::Degenerate(0)
        } else if prob == 1.0 {
            BinomialMode::Degenerate(n)
        } else if (prob <= 0.05 && n >= 20) || (n >= 100 && mean <= 10.0) {
            BinomialMode::Poisson { mean }
        } else {
            BinomialMode::Gaussian {
                mean,
                sdev: (mean * (1.0 - prob)).sqrt(),
            }
        };
        debug!(prob, n, mode = mode.name(), "Selected binomial sampling mode");
        Ok(mode)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            BinomialMode::Table(_) => "table",
            BinomialMode::Poisson { .. } => "poisson",
            BinomialMode::Gaussian { .. } => "gaussian",
            BinomialMode::Degenerate(_) => "degenerate",
        }
    }

    /// One raw draw; approximate modes may return values outside `[0, n]`.
    fn draw(&self) -> RvResult<f64> {
        match self {
            BinomialMode::Table(table) => Ok(table.sample(static_random::next_double()) as f64),
            BinomialMode::Poisson { mean } => static_random::poisson_double(*mean),
            BinomialMode::Gaussian { mean, sdev } => {
                Ok((mean + sdev * static_random::next_gaussian()).round())
            }
            BinomialMode::Degenerate(value) => Ok(*value as f64),
        }
    }
}

/// Number of successes in `n` Bernoulli trials.
///
/// # Examples
///
/// ```rust
/// use randvar_core::traits::RandomVariable;
/// use randvar_models::distributions::{BinomialIntegerRv, BinomialMode};
///
/// let mut rv = BinomialIntegerRv::new(0.5, 10).unwrap();
/// assert!(matches!(rv.mode(), BinomialMode::Table(_)));
/// let v = rv.next().unwrap();
/// assert!((0..=10).contains(&v));
/// ```
#[derive(Debug, PartialEq)]
pub struct BinomialRv<T: CountValue> {
    prob: f64,
    tries: u64,
    mode: BinomialMode,
    range: RangeConstraint<T>,
    _value: PhantomData<fn() -> T>,
}

/// Binomial counts as `i32`.
pub type BinomialIntegerRv = BinomialRv<i32>;
/// Binomial counts as `i64`.
pub type BinomialLongRv = BinomialRv<i64>;
/// Binomial counts as `f64`.
pub type BinomialDoubleRv = BinomialRv<f64>;

impl<T: CountValue> Clone for BinomialRv<T> {
    fn clone(&self) -> Self {
        Self {
            prob: self.prob,
            tries: self.tries,
            mode: self.mode.clone(),
            range: self.range.clone(),
            _value: PhantomData,
        }
    }
}

impl<T: CountValue> BinomialRv<T> {
    /// Creates a binomial random variable for `tries` trials.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] if `prob` is not in `[0, 1]`
    /// or `tries` is zero.
    pub fn new(prob: f64, tries: u64) -> RvResult<Self> {
        if tries == 0 {
            return Err(RvError::invalid("number of tries must be positive"));
        }
        let mode = BinomialMode::select(prob, tries)?;
        let mut range = RangeConstraint::new();
        range.require_minimum(T::from_count(0.0), true)?;
        range.require_maximum(T::from_count(tries as f64), true)?;
        Ok(Self {
            prob,
            tries,
            mode,
            range,
            _value: PhantomData,
        })
    }

    /// Success probability of each trial.
    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Number of trials.
    pub fn tries(&self) -> u64 {
        self.tries
    }

    /// The sampling strategy in use.
    pub fn mode(&self) -> &BinomialMode {
        &self.mode
    }
}

impl<T: CountValue> RandomVariable for BinomialRv<T> {
    type Value = T;

    fn next(&mut self) -> RvResult<T> {
        let upper = self.tries as f64;
        let (mode, range) = (&self.mode, &self.range);
        let count = sample_until(
            || mode.draw(),
            |v| (0.0..=upper).contains(v) && range.admits(T::from_count(*v)),
        )?;
        Ok(T::from_count(count))
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl<T: CountValue> OrderedRandomVariable<T> for BinomialRv<T> {
    fn range(&self) -> &RangeConstraint<T> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<T> {
        &mut self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_table_shape() {
        for &(p, n) in &[(0.5, 10), (0.1, 1), (0.9, 60), (0.0, 5), (1.0, 5)] {
            let table = BinomialTable::new(p, n).unwrap();
            let entries = table.entries();
            assert_eq!(entries.len(), n as usize + 2);
            assert_eq!(entries[0], 0.0);
            assert_eq!(*entries.last().unwrap(), 1.0);
            assert!(entries.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_table_matches_pmf() {
        let table = BinomialTable::new(0.5, 4).unwrap();
        let expected = [0.0, 1.0 / 16.0, 5.0 / 16.0, 11.0 / 16.0, 15.0 / 16.0, 1.0];
        for (got, want) in table.entries().iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_table_search_edges() {
        let table = BinomialTable::new(0.5, 4).unwrap();
        assert_eq!(table.sample(0.0), 0);
        // Exact match lands on the count starting at that entry.
        assert_eq!(table.sample(1.0 / 16.0), 1);
        assert_eq!(table.sample(0.5), 2);
        assert_eq!(table.sample(15.0 / 16.0), 4);
        assert_eq!(table.sample(1.0 - f64::EPSILON), 4);
    }

    #[test]
    fn test_degenerate_tables() {
        let zero = BinomialTable::new(0.0, 7).unwrap();
        let one = BinomialTable::new(1.0, 7).unwrap();
        for u in [0.0, 0.3, 0.999] {
            assert_eq!(zero.sample(u), 0);
            assert_eq!(one.sample(u), 7);
        }
    }

    #[test]
    fn test_mode_thresholds() {
        assert!(matches!(BinomialMode::select(0.5, 60).unwrap(), BinomialMode::Table(_)));
        assert!(matches!(BinomialMode::select(0.5, 61).unwrap(), BinomialMode::Gaussian { .. }));
        assert!(matches!(BinomialMode::select(0.05, 61).unwrap(), BinomialMode::Poisson { .. }));
        assert!(matches!(BinomialMode::select(0.06, 150).unwrap(), BinomialMode::Poisson { .. }));
        assert!(matches!(BinomialMode::select(0.08, 150).unwrap(), BinomialMode::Gaussian { .. }));
        assert_eq!(BinomialMode::select(0.0, 100).unwrap(), BinomialMode::Degenerate(0));
        assert_eq!(BinomialMode::select(1.0, 100).unwrap(), BinomialMode::Degenerate(100));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(BinomialIntegerRv::new(1.5, 10).is_err());
        assert!(BinomialIntegerRv::new(-0.1, 10).is_err());
        assert!(BinomialIntegerRv::new(0.5, 0).is_err());
        assert!(BinomialBooleanRv::new(2.0).is_err());
    }

    #[test]
    fn test_required_range() {
        let rv = BinomialLongRv::new(0.3, 12).unwrap();
        assert_eq!(rv.minimum(), Some(0));
        assert_eq!(rv.maximum(), Some(12));
        assert_eq!(rv.tries(), 12);
        assert_eq!(rv.prob(), 0.3);
    }

    #[test]
    fn test_user_range_applies() {
        let mut rv = BinomialIntegerRv::new(0.5, 10).unwrap();
        rv.set_minimum(Some(4), true).unwrap();
        rv.set_maximum(Some(6), false).unwrap();
        for _ in 0..10_000 {
            assert!((4..6).contains(&rv.next().unwrap()));
        }
    }

    #[test]
    fn test_bernoulli_frequency() {
        let mut rv = BinomialBooleanRv::new(0.25).unwrap();
        let n = 100_000;
        let hits = (0..n).filter(|_| rv.next().unwrap()).count();
        assert_relative_eq!(hits as f64 / n as f64, 0.25, epsilon = 0.01);
    }
}
