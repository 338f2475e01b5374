//! Process-wide pseudo-random source.
//!
//! Every distribution draws from one shared generator guarded by a mutex,
//! so that a single [`set_seed`] makes a whole simulation reproducible. The
//! generator starts in fast mode (`SmallRng` seeded from entropy);
//! [`maximize_quality`] switches to `StdRng`.
//!
//! Besides raw uniforms and Gaussians, the module provides the exponential
//! and Poisson draws the leaf distributions are built on, and
//! [`sample_until`], the rejection loop every range-limited distribution
//! goes through.
//!
//! # Examples
//!
//! ```rust
//! use randvar_core::rng::static_random;
//!
//! static_random::set_seed(42);
//! let u = static_random::next_double();
//! assert!((0.0..1.0).contains(&u));
//!
//! let t = static_random::next_poisson_ia_time(10.0).unwrap();
//! assert!(t >= 0);
//! ```

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Gamma, Poisson, StandardNormal};
use tracing::{debug, warn};

use super::config::{RngQuality, RvConfig};
use crate::types::{RvError, RvResult};

/// Underlying generator, switchable between quality levels.
enum Source {
    Fast(SmallRng),
    High(StdRng),
}

impl Source {
    fn quality(&self) -> RngQuality {
        match self {
            Source::Fast(_) => RngQuality::Fast,
            Source::High(_) => RngQuality::High,
        }
    }

    fn from_entropy(quality: RngQuality) -> Self {
        match quality {
            RngQuality::Fast => Source::Fast(SmallRng::from_entropy()),
            RngQuality::High => Source::High(StdRng::from_entropy()),
        }
    }

    fn from_seed(quality: RngQuality, seed: u64) -> Self {
        match quality {
            RngQuality::Fast => Source::Fast(SmallRng::seed_from_u64(seed)),
            RngQuality::High => Source::High(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RngCore for Source {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        match self {
            Source::Fast(rng) => rng.next_u32(),
            Source::High(rng) => rng.next_u32(),
        }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        match self {
            Source::Fast(rng) => rng.next_u64(),
            Source::High(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            Source::Fast(rng) => rng.fill_bytes(dest),
            Source::High(rng) => rng.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        match self {
            Source::Fast(rng) => rng.try_fill_bytes(dest),
            Source::High(rng) => rng.try_fill_bytes(dest),
        }
    }
}

static SOURCE: OnceLock<Mutex<Source>> = OnceLock::new();

/// Rejection fuse; `0` means unlimited.
static REJECTION_LIMIT: AtomicU64 = AtomicU64::new(0);

/// Split depth override; `u32::MAX` means "derive from CPU count".
static SPLIT_DEPTH: AtomicU32 = AtomicU32::new(u32::MAX);

fn source() -> MutexGuard<'static, Source> {
    // Generator state is valid after any panic; recover poisoned locks.
    SOURCE
        .get_or_init(|| Mutex::new(Source::from_entropy(RngQuality::Fast)))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Runs `f` with exclusive access to the shared generator.
///
/// Use this to sample a `rand_distr` distribution that this module does
/// not wrap. Keep `f` short: every other draw in the process waits on it.
pub fn with_rng<T>(f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
    let mut guard = source();
    f(&mut *guard)
}

/// Uniform `f64` in `[0, 1)`.
#[inline]
pub fn next_double() -> f64 {
    source().gen::<f64>()
}

/// Uniform `f64` in `(0, 1]`, safe to pass to `ln`.
#[inline]
fn next_positive_double() -> f64 {
    1.0 - next_double()
}

/// Standard normal variate.
#[inline]
pub fn next_gaussian() -> f64 {
    StandardNormal.sample(&mut *source())
}

/// Fair coin flip.
#[inline]
pub fn next_boolean() -> bool {
    source().gen::<bool>()
}

/// Uniform `i32` in `[0, bound)`.
///
/// # Errors
///
/// Returns [`RvError::InvalidArgument`] if `bound <= 0`.
pub fn next_int(bound: i32) -> RvResult<i32> {
    if bound <= 0 {
        return Err(RvError::invalid(format!("bound {} must be positive", bound)));
    }
    Ok(source().gen_range(0..bound))
}

/// Uniform `i64` over the whole range of the type.
#[inline]
pub fn next_long() -> i64 {
    source().gen::<i64>()
}

/// Uniform `i32` in `[lo, hi]`.
///
/// # Errors
///
/// Returns [`RvError::InvalidArgument`] if `lo > hi`.
pub fn next_int_range(lo: i32, hi: i32) -> RvResult<i32> {
    if lo > hi {
        return Err(RvError::invalid(format!("empty range [{}, {}]", lo, hi)));
    }
    Ok(source().gen_range(lo..=hi))
}

/// Uniform `i64` in `[lo, hi]`.
///
/// # Errors
///
/// Returns [`RvError::InvalidArgument`] if `lo > hi`.
pub fn next_long_range(lo: i64, hi: i64) -> RvResult<i64> {
    if lo > hi {
        return Err(RvError::invalid(format!("empty range [{}, {}]", lo, hi)));
    }
    Ok(source().gen_range(lo..=hi))
}

fn check_mean(mean: f64) -> RvResult<()> {
    if mean.is_finite() && mean >= 0.0 {
        Ok(())
    } else {
        Err(RvError::invalid(format!("mean {} must be finite and non-negative", mean)))
    }
}

fn check_count(n: u32) -> RvResult<()> {
    if n == 0 {
        Err(RvError::invalid("count must be at least 1"))
    } else {
        Ok(())
    }
}

fn gamma_sample(shape: f64, scale: f64) -> RvResult<f64> {
    let gamma = Gamma::new(shape, scale).map_err(|e| RvError::invalid(e.to_string()))?;
    Ok(gamma.sample(&mut *source()))
}

/// Interarrival time of a Poisson process, rounded to the nearest integer.
///
/// # Errors
///
/// Returns [`RvError::InvalidArgument`] for a negative or non-finite mean.
pub fn next_poisson_ia_time(mean: f64) -> RvResult<i64> {
    check_mean(mean)?;
    if mean == 0.0 {
        return Ok(0);
    }
    Ok((mean * -next_positive_double().ln()).round() as i64)
}

/// Sum of `n` Poisson-process interarrival times, rounded to the nearest
/// integer.
///
/// The sum of `n` exponentials of mean `m` is drawn directly from
/// Gamma(`n`, `m`).
pub fn next_poisson_ia_time_n(mean: f64, n: u32) -> RvResult<i64> {
    check_mean(mean)?;
    check_count(n)?;
    if mean == 0.0 {
        return Ok(0);
    }
    Ok(gamma_sample(f64::from(n), mean)?.round() as i64)
}

/// Exponentially distributed `f64` with the given mean.
pub fn next_double_exp_distr(mean: f64) -> RvResult<f64> {
    check_mean(mean)?;
    if mean == 0.0 {
        return Ok(0.0);
    }
    Ok(mean * -next_positive_double().ln())
}

/// Sum of `n` exponentially distributed values with the given mean.
pub fn next_double_exp_distr_n(mean: f64, n: u32) -> RvResult<f64> {
    check_mean(mean)?;
    check_count(n)?;
    if mean == 0.0 {
        return Ok(0.0);
    }
    gamma_sample(f64::from(n), mean)
}

fn poisson_sample(lambda: f64) -> RvResult<f64> {
    check_mean(lambda)?;
    if lambda == 0.0 {
        return Ok(0.0);
    }
    let poisson = Poisson::new(lambda).map_err(|e| RvError::invalid(e.to_string()))?;
    Ok(poisson.sample(&mut *source()))
}

/// Poisson-distributed count as `i32`, saturating at `i32::MAX`.
pub fn poisson_int(lambda: f64) -> RvResult<i32> {
    Ok(poisson_sample(lambda)? as i32)
}

/// Poisson-distributed count as `i64`.
pub fn poisson_long(lambda: f64) -> RvResult<i64> {
    Ok(poisson_sample(lambda)? as i64)
}

/// Poisson-distributed count as `f64`.
pub fn poisson_double(lambda: f64) -> RvResult<f64> {
    poisson_sample(lambda)
}

/// Reseeds the generator, keeping its current quality.
pub fn set_seed(seed: u64) {
    let mut guard = source();
    let quality = guard.quality();
    *guard = Source::from_seed(quality, seed);
}

/// Switches to the high-quality generator if not already in use.
pub fn maximize_quality() {
    let mut guard = source();
    if guard.quality() != RngQuality::High {
        *guard = Source::from_entropy(RngQuality::High);
        debug!("random source switched to high quality");
    }
}

/// Switches to the fast generator if not already in use.
pub fn minimize_quality() {
    let mut guard = source();
    if guard.quality() != RngQuality::Fast {
        *guard = Source::from_entropy(RngQuality::Fast);
        debug!("random source switched to fast mode");
    }
}

/// Returns `true` if the high-quality generator is in use.
pub fn is_high_quality() -> bool {
    source().quality() == RngQuality::High
}

/// Applies a configuration: quality, seed, rejection fuse and split depth.
pub fn configure(config: &RvConfig) {
    {
        let mut guard = source();
        *guard = match config.seed() {
            Some(seed) => Source::from_seed(config.quality(), seed),
            None => Source::from_entropy(config.quality()),
        };
    }
    REJECTION_LIMIT.store(config.max_rejection_attempts().unwrap_or(0), Ordering::Relaxed);
    SPLIT_DEPTH.store(config.max_split_depth().unwrap_or(u32::MAX), Ordering::Relaxed);
    debug!(
        quality = ?config.quality(),
        seeded = config.seed().is_some(),
        rejection_limit = ?config.max_rejection_attempts(),
        split_depth = ?config.max_split_depth(),
        "random source configured"
    );
}

/// The active rejection fuse, if any.
pub fn rejection_limit() -> Option<u64> {
    match REJECTION_LIMIT.load(Ordering::Relaxed) {
        0 => None,
        limit => Some(limit),
    }
}

/// `round(log2(available CPUs))`.
pub fn default_split_depth() -> u32 {
    let cpus = num_cpus::get().max(1) as f64;
    cpus.log2().round() as u32
}

/// Split depth used by new spliterators.
pub fn split_depth() -> u32 {
    match SPLIT_DEPTH.load(Ordering::Relaxed) {
        u32::MAX => default_split_depth(),
        depth => depth,
    }
}

/// Draws until `accept` holds.
///
/// With no rejection fuse configured the loop is unbounded. Otherwise it
/// gives up after the configured number of rejected draws.
///
/// # Errors
///
/// Propagates errors from `draw`, and returns [`RvError::RejectionLimit`]
/// when the fuse trips.
///
/// # Examples
///
/// ```rust
/// use randvar_core::rng::static_random::{next_double, sample_until};
///
/// let v = sample_until(|| Ok(next_double()), |v| *v >= 0.5).unwrap();
/// assert!(v >= 0.5);
/// ```
pub fn sample_until<T, D, A>(mut draw: D, mut accept: A) -> RvResult<T>
where
    D: FnMut() -> RvResult<T>,
    A: FnMut(&T) -> bool,
{
    let limit = rejection_limit();
    let mut attempts: u64 = 0;
    loop {
        let value = draw()?;
        if accept(&value) {
            return Ok(value);
        }
        attempts += 1;
        if let Some(limit) = limit {
            if attempts >= limit {
                warn!(attempts, "rejection sampling gave up");
                return Err(RvError::RejectionLimit { attempts });
            }
        }
    }
}
