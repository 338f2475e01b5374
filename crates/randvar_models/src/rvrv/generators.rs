//! Generators building one leaf distribution per call.
//!
//! Each constructor clones its parameter variables with
//! [`clone_parameter`] and tightens the clones to the domain the child
//! requires. Construction fails if a parameter cannot be cloned or cannot
//! accept the tightened range.

use std::marker::PhantomData;

use num_traits::{One, PrimInt, ToPrimitive};

use randvar_core::range::RangeValue;
use randvar_core::traits::{
    clone_parameter, determine_if_ordered, OrderedRandomVariable, RandomVariable, RvGenerator,
};
use randvar_core::types::{RvError, RvResult};

use crate::distributions::{
    BinomialBooleanRv, BinomialRv, CountValue, ExpDistrRv, FixedBooleanRv, FixedIATimeRv, FixedRv,
    GaussianIATimeRv, GaussianRv, LogNormalRv, PoissonIATimeRv, PoissonRv, UniformDoubleRv,
    UniformIntRv,
};

fn non_negative<P: OrderedRandomVariable<f64>>(param: &P) -> RvResult<P> {
    let mut param = clone_parameter(param)?;
    param.tighten_minimum(0.0, true)?;
    Ok(param)
}

fn probability<P: OrderedRandomVariable<f64>>(param: &P) -> RvResult<P> {
    let mut param = non_negative(param)?;
    param.tighten_maximum(1.0, true)?;
    Ok(param)
}

/// Builds [`FixedRv`] children.
#[derive(Debug)]
pub struct FixedGen<T, P> {
    value: P,
    _value: PhantomData<fn() -> T>,
}

impl<T: RangeValue, P: OrderedRandomVariable<T>> FixedGen<T, P> {
    /// Creates a generator drawing each child's value from `value`.
    pub fn new(value: &P) -> RvResult<Self> {
        Ok(Self {
            value: clone_parameter(value)?,
            _value: PhantomData,
        })
    }
}

impl<T: RangeValue, P: OrderedRandomVariable<T>> RvGenerator for FixedGen<T, P> {
    type Child = FixedRv<T>;

    fn generate(&mut self) -> RvResult<FixedRv<T>> {
        Ok(FixedRv::new(self.value.next()?))
    }

    fn is_ordered(&self) -> bool {
        self.value.is_ordered()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.value)
    }
}

/// Builds [`FixedBooleanRv`] children.
#[derive(Debug)]
pub struct FixedBooleanGen<P> {
    value: P,
}

impl<P: RandomVariable<Value = bool>> FixedBooleanGen<P> {
    /// Creates a generator drawing each child's value from `value`.
    pub fn new(value: &P) -> RvResult<Self> {
        Ok(Self {
            value: clone_parameter(value)?,
        })
    }
}

impl<P: RandomVariable<Value = bool>> RvGenerator for FixedBooleanGen<P> {
    type Child = FixedBooleanRv;

    fn generate(&mut self) -> RvResult<FixedBooleanRv> {
        Ok(FixedBooleanRv::new(self.value.next()?))
    }

    fn is_ordered(&self) -> bool {
        self.value.is_ordered()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.value)
    }
}

/// Builds [`FixedIATimeRv`] children; the value parameter is tightened to
/// `>= 0`.
#[derive(Debug)]
pub struct FixedIATimeGen<P> {
    value: P,
}

impl<P: OrderedRandomVariable<i64>> FixedIATimeGen<P> {
    /// Creates a generator drawing each child's value from `value`.
    pub fn new(value: &P) -> RvResult<Self> {
        let mut value = clone_parameter(value)?;
        value.tighten_minimum(0, true)?;
        Ok(Self { value })
    }
}

impl<P: OrderedRandomVariable<i64>> RvGenerator for FixedIATimeGen<P> {
    type Child = FixedIATimeRv;

    fn generate(&mut self) -> RvResult<FixedIATimeRv> {
        FixedIATimeRv::new(self.value.next()?)
    }

    fn is_ordered(&self) -> bool {
        self.value.is_ordered()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.value)
    }
}

/// Builds [`UniformDoubleRv`] children with random bounds.
///
/// Each draw whose bounds form an empty interval makes
/// [`generate`](RvGenerator::generate) fail.
#[derive(Debug)]
pub struct UniformDoubleGen<L, U> {
    lower: L,
    lower_closed: bool,
    upper: U,
    upper_closed: bool,
}

impl<L, U> UniformDoubleGen<L, U>
where
    L: OrderedRandomVariable<f64>,
    U: OrderedRandomVariable<f64>,
{
    /// Creates a generator drawing the lower and upper bounds from `lower`
    /// and `upper`.
    pub fn new(lower: &L, lower_closed: bool, upper: &U, upper_closed: bool) -> RvResult<Self> {
        Ok(Self {
            lower: clone_parameter(lower)?,
            lower_closed,
            upper: clone_parameter(upper)?,
            upper_closed,
        })
    }
}

impl<L, U> RvGenerator for UniformDoubleGen<L, U>
where
    L: OrderedRandomVariable<f64>,
    U: OrderedRandomVariable<f64>,
{
    type Child = UniformDoubleRv;

    fn generate(&mut self) -> RvResult<UniformDoubleRv> {
        let lower = self.lower.next()?;
        let upper = self.upper.next()?;
        UniformDoubleRv::new(lower, self.lower_closed, upper, self.upper_closed)
    }

    fn is_ordered(&self) -> bool {
        determine_if_ordered(&[self.lower.is_ordered(), self.upper.is_ordered()])
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.lower, self.lower_closed, &self.upper, self.upper_closed)
    }
}

/// Builds [`UniformIntRv`] children with random bounds.
#[derive(Debug)]
pub struct UniformIntGen<T, L, U> {
    lower: L,
    lower_closed: bool,
    upper: U,
    upper_closed: bool,
    _value: PhantomData<fn() -> T>,
}

impl<T, L, U> UniformIntGen<T, L, U>
where
    T: RangeValue + PrimInt,
    L: OrderedRandomVariable<T>,
    U: OrderedRandomVariable<T>,
{
    /// Creates a generator drawing the lower and upper bounds from `lower`
    /// and `upper`.
    pub fn new(lower: &L, lower_closed: bool, upper: &U, upper_closed: bool) -> RvResult<Self> {
        Ok(Self {
            lower: clone_parameter(lower)?,
            lower_closed,
            upper: clone_parameter(upper)?,
            upper_closed,
            _value: PhantomData,
        })
    }
}

impl<T, L, U> RvGenerator for UniformIntGen<T, L, U>
where
    T: RangeValue + PrimInt,
    L: OrderedRandomVariable<T>,
    U: OrderedRandomVariable<T>,
{
    type Child = UniformIntRv<T>;

    fn generate(&mut self) -> RvResult<UniformIntRv<T>> {
        let lower = self.lower.next()?;
        let upper = self.upper.next()?;
        UniformIntRv::new(lower, self.lower_closed, upper, self.upper_closed)
    }

    fn is_ordered(&self) -> bool {
        determine_if_ordered(&[self.lower.is_ordered(), self.upper.is_ordered()])
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.lower, self.lower_closed, &self.upper, self.upper_closed)
    }
}

/// Builds [`GaussianRv`] children; the standard deviation parameter is
/// tightened to `>= 0`.
#[derive(Debug)]
pub struct GaussianGen<M, S> {
    mean: M,
    sdev: S,
}

impl<M, S> GaussianGen<M, S>
where
    M: OrderedRandomVariable<f64>,
    S: OrderedRandomVariable<f64>,
{
    /// Creates a generator drawing mean and standard deviation.
    pub fn new(mean: &M, sdev: &S) -> RvResult<Self> {
        Ok(Self {
            mean: clone_parameter(mean)?,
            sdev: non_negative(sdev)?,
        })
    }
}

impl<M, S> RvGenerator for GaussianGen<M, S>
where
    M: OrderedRandomVariable<f64>,
    S: OrderedRandomVariable<f64>,
{
    type Child = GaussianRv;

    fn generate(&mut self) -> RvResult<GaussianRv> {
        let mean = self.mean.next()?;
        GaussianRv::new(mean, self.sdev.next()?)
    }

    fn is_ordered(&self) -> bool {
        determine_if_ordered(&[self.mean.is_ordered(), self.sdev.is_ordered()])
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.mean, &self.sdev)
    }
}

/// Builds [`GaussianIATimeRv`] children; both parameters are tightened to
/// `>= 0`.
#[derive(Debug)]
pub struct GaussianIATimeGen<M, S> {
    mean: M,
    sdev: S,
}

impl<M, S> GaussianIATimeGen<M, S>
where
    M: OrderedRandomVariable<f64>,
    S: OrderedRandomVariable<f64>,
{
    /// Creates a generator drawing mean and standard deviation.
    pub fn new(mean: &M, sdev: &S) -> RvResult<Self> {
        Ok(Self {
            mean: non_negative(mean)?,
            sdev: non_negative(sdev)?,
        })
    }
}

impl<M, S> RvGenerator for GaussianIATimeGen<M, S>
where
    M: OrderedRandomVariable<f64>,
    S: OrderedRandomVariable<f64>,
{
    type Child = GaussianIATimeRv;

    fn generate(&mut self) -> RvResult<GaussianIATimeRv> {
        let mean = self.mean.next()?;
        GaussianIATimeRv::new(mean, self.sdev.next()?)
    }

    fn is_ordered(&self) -> bool {
        determine_if_ordered(&[self.mean.is_ordered(), self.sdev.is_ordered()])
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.mean, &self.sdev)
    }
}

/// Builds [`LogNormalRv`] children from `mu` and `sigma` parameters;
/// `sigma` is tightened to `>= 0`.
#[derive(Debug)]
pub struct LogNormalGen<M, S> {
    mu: M,
    sigma: S,
}

impl<M, S> LogNormalGen<M, S>
where
    M: OrderedRandomVariable<f64>,
    S: OrderedRandomVariable<f64>,
{
    /// Creates a generator drawing `mu` and `sigma`.
    pub fn new(mu: &M, sigma: &S) -> RvResult<Self> {
        Ok(Self {
            mu: clone_parameter(mu)?,
            sigma: non_negative(sigma)?,
        })
    }
}

impl<M, S> RvGenerator for LogNormalGen<M, S>
where
    M: OrderedRandomVariable<f64>,
    S: OrderedRandomVariable<f64>,
{
    type Child = LogNormalRv;

    fn generate(&mut self) -> RvResult<LogNormalRv> {
        let mu = self.mu.next()?;
        LogNormalRv::new(mu, self.sigma.next()?)
    }

    fn is_ordered(&self) -> bool {
        determine_if_ordered(&[self.mu.is_ordered(), self.sigma.is_ordered()])
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.mu, &self.sigma)
    }
}

/// Builds [`ExpDistrRv`] children; the mean is tightened to `>= 0`.
#[derive(Debug)]
pub struct ExpDistrGen<M> {
    mean: M,
}

impl<M: OrderedRandomVariable<f64>> ExpDistrGen<M> {
    /// Creates a generator drawing the mean.
    pub fn new(mean: &M) -> RvResult<Self> {
        Ok(Self {
            mean: non_negative(mean)?,
        })
    }
}

impl<M: OrderedRandomVariable<f64>> RvGenerator for ExpDistrGen<M> {
    type Child = ExpDistrRv;

    fn generate(&mut self) -> RvResult<ExpDistrRv> {
        ExpDistrRv::new(self.mean.next()?)
    }

    fn is_ordered(&self) -> bool {
        self.mean.is_ordered()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.mean)
    }
}

/// Builds [`PoissonIATimeRv`] children; the mean is tightened to `>= 0`.
#[derive(Debug)]
pub struct PoissonIATimeGen<M> {
    mean: M,
}

impl<M: OrderedRandomVariable<f64>> PoissonIATimeGen<M> {
    /// Creates a generator drawing the mean.
    pub fn new(mean: &M) -> RvResult<Self> {
        Ok(Self {
            mean: non_negative(mean)?,
        })
    }
}

impl<M: OrderedRandomVariable<f64>> RvGenerator for PoissonIATimeGen<M> {
    type Child = PoissonIATimeRv;

    fn generate(&mut self) -> RvResult<PoissonIATimeRv> {
        PoissonIATimeRv::new(self.mean.next()?)
    }

    fn is_ordered(&self) -> bool {
        self.mean.is_ordered()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.mean)
    }
}

/// Builds [`PoissonRv`] children; the mean is tightened to `>= 0`.
#[derive(Debug)]
pub struct PoissonGen<M, T> {
    mean: M,
    _value: PhantomData<fn() -> T>,
}

impl<M: OrderedRandomVariable<f64>, T: CountValue> PoissonGen<M, T> {
    /// Creates a generator drawing the mean.
    pub fn new(mean: &M) -> RvResult<Self> {
        Ok(Self {
            mean: non_negative(mean)?,
            _value: PhantomData,
        })
    }
}

impl<M: OrderedRandomVariable<f64>, T: CountValue> RvGenerator for PoissonGen<M, T> {
    type Child = PoissonRv<T>;

    fn generate(&mut self) -> RvResult<PoissonRv<T>> {
        PoissonRv::new(self.mean.next()?)
    }

    fn is_ordered(&self) -> bool {
        self.mean.is_ordered()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.mean)
    }
}

/// Builds [`BinomialBooleanRv`] children; the probability is tightened to
/// `[0, 1]`.
#[derive(Debug)]
pub struct BinomialBooleanGen<P> {
    prob: P,
}

impl<P: OrderedRandomVariable<f64>> BinomialBooleanGen<P> {
    /// Creates a generator drawing the probability.
    pub fn new(prob: &P) -> RvResult<Self> {
        Ok(Self {
            prob: probability(prob)?,
        })
    }
}

impl<P: OrderedRandomVariable<f64>> RvGenerator for BinomialBooleanGen<P> {
    type Child = BinomialBooleanRv;

    fn generate(&mut self) -> RvResult<BinomialBooleanRv> {
        BinomialBooleanRv::new(self.prob.next()?)
    }

    fn is_ordered(&self) -> bool {
        self.prob.is_ordered()
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.prob)
    }
}

/// Builds [`BinomialRv`] children from a probability parameter and a
/// number-of-tries parameter of type `C`.
///
/// The probability is tightened to `[0, 1]` and the number of tries to
/// `>= 1`.
#[derive(Debug)]
pub struct BinomialGen<P, N, C, T> {
    prob: P,
    tries: N,
    _types: PhantomData<fn() -> (C, T)>,
}

impl<P, N, C, T> BinomialGen<P, N, C, T>
where
    P: OrderedRandomVariable<f64>,
    N: OrderedRandomVariable<C>,
    C: RangeValue + One,
    T: CountValue,
{
    /// Creates a generator drawing the probability and number of tries.
    pub fn new(prob: &P, tries: &N) -> RvResult<Self> {
        let mut tries = clone_parameter(tries)?;
        tries.tighten_minimum(C::one(), true)?;
        Ok(Self {
            prob: probability(prob)?,
            tries,
            _types: PhantomData,
        })
    }
}

impl<P, N, C, T> RvGenerator for BinomialGen<P, N, C, T>
where
    P: OrderedRandomVariable<f64>,
    N: OrderedRandomVariable<C>,
    C: RangeValue + One,
    T: CountValue,
{
    type Child = BinomialRv<T>;

    fn generate(&mut self) -> RvResult<BinomialRv<T>> {
        let prob = self.prob.next()?;
        let tries = self.tries.next()?;
        let tries = tries
            .to_u64()
            .ok_or_else(|| RvError::invalid(format!("{} is not a valid number of tries", tries)))?;
        BinomialRv::new(prob, tries)
    }

    fn is_ordered(&self) -> bool {
        determine_if_ordered(&[self.prob.is_ordered(), self.tries.is_ordered()])
    }

    fn try_clone(&self) -> RvResult<Self> {
        Self::new(&self.prob, &self.tries)
    }
}
