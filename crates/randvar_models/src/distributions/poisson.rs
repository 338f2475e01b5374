//! Poisson counts and Poisson-process interarrival times.

use std::marker::PhantomData;

use randvar_core::range::RangeConstraint;
use randvar_core::rng::static_random::{self, sample_until};
use randvar_core::traits::{InterarrivalTimeRandomVariable, OrderedRandomVariable, RandomVariable};
use randvar_core::types::RvResult;

use super::{check_count, check_non_negative, CountValue};

/// Interarrival times of a Poisson process with a given mean, rounded to
/// integers.
#[derive(Clone, Debug, PartialEq)]
pub struct PoissonIATimeRv {
    mean: f64,
    range: RangeConstraint<i64>,
}

impl PoissonIATimeRv {
    /// Creates a Poisson interarrival-time random variable.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`](randvar_core::types::RvError)
    /// if `mean` is negative or not finite.
    pub fn new(mean: f64) -> RvResult<Self> {
        check_non_negative(mean, "mean")?;
        Ok(Self {
            mean,
            range: RangeConstraint::with_required_minimum(0, true)?,
        })
    }

    /// The mean interarrival time.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of `n` interarrival times; the range applies to the rounded
    /// per-interval average.
    pub fn next_n(&mut self, n: u32) -> RvResult<i64> {
        check_count(n)?;
        let (mean, nf) = (self.mean, f64::from(n));
        let range = &self.range;
        sample_until(
            || static_random::next_poisson_ia_time_n(mean, n),
            |v| range.admits((*v as f64 / nf).round() as i64),
        )
    }
}

impl RandomVariable for PoissonIATimeRv {
    type Value = i64;

    fn next(&mut self) -> RvResult<i64> {
        let mean = self.mean;
        let range = &self.range;
        sample_until(
            || static_random::next_poisson_ia_time(mean),
            |v| range.admits(*v),
        )
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl OrderedRandomVariable<i64> for PoissonIATimeRv {
    fn range(&self) -> &RangeConstraint<i64> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<i64> {
        &mut self.range
    }
}

impl InterarrivalTimeRandomVariable for PoissonIATimeRv {}

/// Poisson-distributed counts with mean `lambda`.
///
/// # Examples
///
/// ```rust
/// use randvar_core::traits::RandomVariable;
/// use randvar_models::distributions::PoissonIntegerRv;
///
/// let mut rv = PoissonIntegerRv::new(3.0).unwrap();
/// assert!(rv.next().unwrap() >= 0);
/// // Total over five periods, one draw.
/// assert!(rv.next_n(5).unwrap() >= 0);
/// ```
#[derive(Debug, PartialEq)]
pub struct PoissonRv<T: CountValue> {
    mean: f64,
    range: RangeConstraint<T>,
    _value: PhantomData<fn() -> T>,
}

/// Poisson counts as `i32`.
pub type PoissonIntegerRv = PoissonRv<i32>;
/// Poisson counts as `i64`.
pub type PoissonLongRv = PoissonRv<i64>;
/// Poisson counts as `f64`.
pub type PoissonDoubleRv = PoissonRv<f64>;

impl<T: CountValue> Clone for PoissonRv<T> {
    fn clone(&self) -> Self {
        Self {
            mean: self.mean,
            range: self.range.clone(),
            _value: PhantomData,
        }
    }
}

impl<T: CountValue> PoissonRv<T> {
    /// Creates a Poisson random variable with mean `lambda`.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`](randvar_core::types::RvError)
    /// if `lambda` is negative or not finite.
    pub fn new(lambda: f64) -> RvResult<Self> {
        check_non_negative(lambda, "mean")?;
        let mut range = RangeConstraint::new();
        range.require_minimum(T::from_count(0.0), true)?;
        Ok(Self {
            mean: lambda,
            range,
            _value: PhantomData,
        })
    }

    /// The mean count.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Total count over `n` independent periods, drawn from
    /// Poisson(`n·lambda`). The range applies to the per-period average.
    pub fn next_n(&mut self, n: u32) -> RvResult<T> {
        check_count(n)?;
        let nf = f64::from(n);
        let lambda = nf * self.mean;
        let range = &self.range;
        let total = sample_until(
            || static_random::poisson_double(lambda),
            |v| range.admits(T::from_count(*v / nf)),
        )?;
        Ok(T::from_count(total))
    }
}

impl<T: CountValue> RandomVariable for PoissonRv<T> {
    type Value = T;

    fn next(&mut self) -> RvResult<T> {
        let mean = self.mean;
        let range = &self.range;
        sample_until(
            || Ok(T::from_count(static_random::poisson_double(mean)?)),
            |v| range.admits(*v),
        )
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl<T: CountValue> OrderedRandomVariable<T> for PoissonRv<T> {
    fn range(&self) -> &RangeConstraint<T> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<T> {
        &mut self.range
    }
}
