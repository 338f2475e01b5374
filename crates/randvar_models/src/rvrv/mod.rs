//! # Random Variables of Random Variables
//!
//! An RV-of-RV returns a freshly constructed random variable on every
//! [`next`](RandomVariable::next). The parameters of each child (a mean, a
//! probability, a pair of bounds) are themselves drawn from parameter
//! random variables owned by an [`RvGenerator`].
//!
//! - [`RandomVariableRv`] returns children as generated. It is used for
//!   children without an ordering, such as boolean variables.
//! - [`RandomVariableRvn`] carries a user minimum and maximum and installs
//!   them onto every child with `tighten_minimum` / `tighten_maximum`
//!   before returning it.
//!
//! Generators clone their parameter variables at construction and tighten
//! the clones to the domain the child requires, so the caller's variables
//! are never modified. If any parameter variable is ordered, the composite
//! reports [`Characteristics::ORDERED`] and its spliterators never split.
//!
//! ## Usage Example
//!
//! ```rust
//! use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
//! use randvar_models::distributions::UniformDoubleRv;
//! use randvar_models::rvrv::{GaussianGen, GaussianRvRv};
//!
//! let mean = UniformDoubleRv::new(-1.0, true, 1.0, true).unwrap();
//! let sdev = UniformDoubleRv::new(0.5, true, 2.0, true).unwrap();
//!
//! let mut rvrv = GaussianRvRv::new(GaussianGen::new(&mean, &sdev).unwrap());
//! rvrv.set_minimum(Some(-3.0), true).unwrap();
//!
//! let mut child = rvrv.next().unwrap();
//! assert_eq!(child.minimum(), Some(-3.0));
//! assert!(child.next().unwrap() >= -3.0);
//! ```

use std::marker::PhantomData;

use tracing::debug;

use randvar_core::range::{RangeConstraint, RangeValue};
use randvar_core::traits::{OrderedRandomVariable, RandomVariable, RvGenerator};
use randvar_core::types::{Characteristics, RvResult};

pub mod generators;

pub use generators::{
    BinomialBooleanGen, BinomialGen, ExpDistrGen, FixedBooleanGen, FixedGen, FixedIATimeGen,
    GaussianGen, GaussianIATimeGen, LogNormalGen, PoissonGen, PoissonIATimeGen, UniformDoubleGen,
    UniformIntGen,
};

fn composite_characteristics(ordered: bool) -> Characteristics {
    if ordered {
        Characteristics::DEFAULT | Characteristics::ORDERED
    } else {
        Characteristics::DEFAULT
    }
}

/// RV-of-RV whose children are returned exactly as generated.
#[derive(Debug)]
pub struct RandomVariableRv<G> {
    generator: G,
}

impl<G: RvGenerator> RandomVariableRv<G> {
    /// Wraps a generator.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// The generator producing the children.
    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G: RvGenerator> RandomVariable for RandomVariableRv<G> {
    type Value = G::Child;

    fn next(&mut self) -> RvResult<G::Child> {
        self.generator.generate()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(Self {
            generator: self.generator.try_clone()?,
        })
    }

    fn characteristics(&self) -> Characteristics {
        composite_characteristics(self.generator.is_ordered())
    }
}

/// RV-of-RV whose ordered children receive the composite's bounds.
///
/// The bounds set here are plain user bounds; they are not checked against
/// anything until a child is generated. A child that cannot accept them
/// (a fixed value outside the bounds, for instance) makes
/// [`next`](RandomVariable::next) fail with
/// [`RvError::RandomVariable`](randvar_core::types::RvError::RandomVariable).
/// Failures of the generator itself are returned unchanged.
#[derive(Debug)]
pub struct RandomVariableRvn<G, T: RangeValue> {
    generator: G,
    range: RangeConstraint<T>,
    _value: PhantomData<fn() -> T>,
}

impl<G, T> RandomVariableRvn<G, T>
where
    G: RvGenerator,
    G::Child: OrderedRandomVariable<T>,
    T: RangeValue,
{
    /// Wraps a generator.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            range: RangeConstraint::new(),
            _value: PhantomData,
        }
    }

    /// The generator producing the children.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Replaces the minimum installed on each child (`None` clears it).
    pub fn set_minimum(&mut self, min: Option<T>, closed: bool) -> RvResult<()> {
        self.range.set_minimum(min, closed)
    }

    /// Replaces the maximum installed on each child (`None` clears it).
    pub fn set_maximum(&mut self, max: Option<T>, closed: bool) -> RvResult<()> {
        self.range.set_maximum(max, closed)
    }

    /// Narrows the minimum installed on each child.
    pub fn tighten_minimum(&mut self, min: T, closed: bool) -> RvResult<()> {
        self.range.tighten_minimum(min, closed)
    }

    /// Narrows the maximum installed on each child.
    pub fn tighten_maximum(&mut self, max: T, closed: bool) -> RvResult<()> {
        self.range.tighten_maximum(max, closed)
    }

    /// [`tighten_minimum`](Self::tighten_minimum) with a string-form value.
    pub fn tighten_minimum_str(&mut self, min: &str, closed: bool) -> RvResult<()> {
        self.tighten_minimum(T::parse_value(min)?, closed)
    }

    /// [`tighten_maximum`](Self::tighten_maximum) with a string-form value.
    pub fn tighten_maximum_str(&mut self, max: &str, closed: bool) -> RvResult<()> {
        self.tighten_maximum(T::parse_value(max)?, closed)
    }

    /// The minimum installed on each child.
    pub fn minimum(&self) -> Option<T> {
        self.range.minimum()
    }

    /// Whether the minimum is inclusive.
    pub fn minimum_closed(&self) -> Option<bool> {
        self.range.minimum_closed()
    }

    /// The maximum installed on each child.
    pub fn maximum(&self) -> Option<T> {
        self.range.maximum()
    }

    /// Whether the maximum is inclusive.
    pub fn maximum_closed(&self) -> Option<bool> {
        self.range.maximum_closed()
    }
}

impl<G, T> RandomVariable for RandomVariableRvn<G, T>
where
    G: RvGenerator,
    G::Child: OrderedRandomVariable<T>,
    T: RangeValue,
{
    type Value = G::Child;

    fn next(&mut self) -> RvResult<G::Child> {
        let mut child = self.generator.generate()?;
        if let Some(min) = self.range.user_minimum() {
            child.tighten_minimum(min.value, min.closed).map_err(|err| {
                debug!(minimum = %min.value, error = %err, "Generated variable rejected minimum");
                err.into_random_variable_error()
            })?;
        }
        if let Some(max) = self.range.user_maximum() {
            child.tighten_maximum(max.value, max.closed).map_err(|err| {
                debug!(maximum = %max.value, error = %err, "Generated variable rejected maximum");
                err.into_random_variable_error()
            })?;
        }
        Ok(child)
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(Self {
            generator: self.generator.try_clone()?,
            range: self.range.clone(),
            _value: PhantomData,
        })
    }

    fn characteristics(&self) -> Characteristics {
        composite_characteristics(self.generator.is_ordered())
    }
}

/// Fixed values drawn from a parameter variable.
pub type FixedRvRv<T, P> = RandomVariableRvn<FixedGen<T, P>, T>;
/// Fixed `f64` values.
pub type FixedDoubleRvRv<P> = FixedRvRv<f64, P>;
/// Fixed `i32` values.
pub type FixedIntegerRvRv<P> = FixedRvRv<i32, P>;
/// Fixed `i64` values.
pub type FixedLongRvRv<P> = FixedRvRv<i64, P>;
/// Fixed booleans.
pub type FixedBooleanRvRv<P> = RandomVariableRv<FixedBooleanGen<P>>;
/// Fixed interarrival times.
pub type FixedIATimeRvRv<P> = RandomVariableRvn<FixedIATimeGen<P>, i64>;

/// Uniform `f64` variables with random bounds.
pub type UniformDoubleRvRv<L, U> = RandomVariableRvn<UniformDoubleGen<L, U>, f64>;
/// Uniform `i32` variables with random bounds.
pub type UniformIntegerRvRv<L, U> = RandomVariableRvn<UniformIntGen<i32, L, U>, i32>;
/// Uniform `i64` variables with random bounds.
pub type UniformLongRvRv<L, U> = RandomVariableRvn<UniformIntGen<i64, L, U>, i64>;

/// Gaussian variables with random mean and standard deviation.
pub type GaussianRvRv<M, S> = RandomVariableRvn<GaussianGen<M, S>, f64>;
/// Gaussian interarrival times with random mean and standard deviation.
pub type GaussianIATimeRvRv<M, S> = RandomVariableRvn<GaussianIATimeGen<M, S>, i64>;
/// Log-normal variables with random `mu` and `sigma`.
pub type LogNormalRvRv<M, S> = RandomVariableRvn<LogNormalGen<M, S>, f64>;
/// Exponential variables with a random mean.
pub type ExpDistrRvRv<M> = RandomVariableRvn<ExpDistrGen<M>, f64>;

/// Poisson interarrival times with a random mean.
pub type PoissonIATimeRvRv<M> = RandomVariableRvn<PoissonIATimeGen<M>, i64>;
/// Poisson `i32` counts with a random mean.
pub type PoissonIntegerRvRv<M> = RandomVariableRvn<PoissonGen<M, i32>, i32>;
/// Poisson `i64` counts with a random mean.
pub type PoissonLongRvRv<M> = RandomVariableRvn<PoissonGen<M, i64>, i64>;
/// Poisson `f64` counts with a random mean.
pub type PoissonDoubleRvRv<M> = RandomVariableRvn<PoissonGen<M, f64>, f64>;

/// Bernoulli variables with a random probability.
pub type BinomialBooleanRvRv<P> = RandomVariableRv<BinomialBooleanGen<P>>;
/// Binomial `i32` counts with random probability and `i32` number of tries.
pub type BinomialIntegerRvRv<P, N> = RandomVariableRvn<BinomialGen<P, N, i32, i32>, i32>;
/// Binomial `i64` counts with random probability and `i64` number of tries.
pub type BinomialLongRvRv<P, N> = RandomVariableRvn<BinomialGen<P, N, i64, i64>, i64>;
/// Binomial `f64` counts with random probability and `i32` number of tries.
pub type BinomialDoubleRvRv<P, N> = RandomVariableRvn<BinomialGen<P, N, i32, f64>, f64>;

#[cfg(test)]
mod tests {
    use super::*;
    use randvar_core::types::RvError;
    use crate::distributions::{DetermDoubleRv, FixedDoubleRv, FixedIntegerRv, UniformDoubleRv};

    #[test]
    fn test_bounds_installed_on_children() {
        let value = UniformDoubleRv::new(0.0, true, 10.0, true).unwrap();
        let mut rvrv = FixedDoubleRvRv::new(FixedGen::new(&value).unwrap());
        rvrv.set_minimum(Some(-1.0), true).unwrap();
        rvrv.set_maximum(Some(11.0), false).unwrap();
        for _ in 0..100 {
            let child = rvrv.next().unwrap();
            assert_eq!(child.minimum(), Some(-1.0));
            assert_eq!(child.maximum(), Some(11.0));
            assert_eq!(child.maximum_closed(), Some(false));
        }
    }

    #[test]
    fn test_rejected_bound_is_wrapped() {
        let value = FixedIntegerRv::new(5);
        let mut rvrv = FixedIntegerRvRv::new(FixedGen::new(&value).unwrap());
        rvrv.set_minimum(Some(6), true).unwrap();
        match rvrv.next() {
            Err(RvError::RandomVariable(_)) => {}
            other => panic!("expected a wrapped error, got {:?}", other),
        }
    }

    #[test]
    fn test_generator_error_kind_preserved() {
        let lower = FixedDoubleRv::new(5.0);
        let upper = FixedDoubleRv::new(4.0);
        let mut rvrv = UniformDoubleRvRv::new(UniformDoubleGen::new(&lower, true, &upper, true).unwrap());
        assert!(matches!(rvrv.next(), Err(RvError::InvalidArgument(_))));
    }

    #[test]
    fn test_ordered_parameter_propagates() {
        let plain = FixedDoubleRv::new(1.0);
        let rvrv = FixedDoubleRvRv::new(FixedGen::new(&plain).unwrap());
        assert!(!rvrv.is_ordered());

        let sequence = DetermDoubleRv::cycle(vec![1.0, 2.0]).unwrap();
        let mut rvrv = FixedDoubleRvRv::new(FixedGen::new(&sequence).unwrap());
        assert!(rvrv.is_ordered());
        assert!(rvrv.spliterator(100).try_split().is_none());
        assert_eq!(rvrv.next().unwrap().value(), 1.0);
        assert_eq!(rvrv.next().unwrap().value(), 2.0);
    }

    #[test]
    fn test_string_bounds() {
        let value = FixedIntegerRv::new(5);
        let mut rvrv = FixedIntegerRvRv::new(FixedGen::new(&value).unwrap());
        rvrv.tighten_minimum_str("3", true).unwrap();
        assert_eq!(rvrv.minimum(), Some(3));
        assert!(rvrv.tighten_maximum_str("x", true).is_err());
    }

    #[test]
    fn test_clone_keeps_bounds() {
        let value = FixedDoubleRv::new(2.0);
        let mut rvrv = FixedDoubleRvRv::new(FixedGen::new(&value).unwrap());
        rvrv.set_maximum(Some(3.0), true).unwrap();
        let mut copy = rvrv.try_clone().unwrap();
        assert_eq!(copy.maximum(), Some(3.0));
        assert_eq!(copy.next().unwrap().maximum(), Some(3.0));
    }
}
