//! The generator contract shared by every random variable.

use crate::range::{RangeConstraint, RangeValue};
use crate::sequence::{ParStream, Spliterator, Stream};
use crate::types::{Characteristics, RvResult};

/// A stateful generator of values.
///
/// Each call to [`next`](Self::next) produces one value. A variable is not
/// required to be safe for concurrent `next()` calls; parallel consumption
/// goes through [`par_stream`](Self::par_stream), which hands every worker
/// its own clone obtained via [`try_clone`](Self::try_clone).
///
/// # Examples
///
/// ```rust
/// use randvar_core::traits::RandomVariable;
/// use randvar_core::types::{Characteristics, RvResult};
///
/// #[derive(Clone)]
/// struct Counter(u32);
///
/// impl RandomVariable for Counter {
///     type Value = u32;
///
///     fn next(&mut self) -> RvResult<u32> {
///         self.0 += 1;
///         Ok(self.0)
///     }
///
///     fn try_clone(&self) -> RvResult<Self> {
///         Ok(self.clone())
///     }
///
///     fn characteristics(&self) -> Characteristics {
///         Characteristics::DEFAULT | Characteristics::ORDERED
///     }
/// }
///
/// let mut counter = Counter(0);
/// let values: Vec<u32> = counter.stream(3).map(|v| v.unwrap()).collect();
/// assert_eq!(values, vec![1, 2, 3]);
/// assert!(counter.is_ordered());
/// ```
pub trait RandomVariable: Send {
    /// Type of the generated values.
    type Value: Send;

    /// Produces the next value.
    ///
    /// # Errors
    ///
    /// Leaf distributions fail only when a configured rejection fuse trips;
    /// RV-of-RV variables also fail when a generated child cannot accept
    /// the installed bounds.
    fn next(&mut self) -> RvResult<Self::Value>;

    /// Duplicates the variable, including its range constraint and any
    /// sequence position.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::CloneNotSupported`](crate::types::RvError) when
    /// the variable wraps state that cannot be duplicated.
    fn try_clone(&self) -> RvResult<Self>
    where
        Self: Sized;

    /// Sequence characteristics; `IMMUTABLE | NONNULL` unless overridden.
    fn characteristics(&self) -> Characteristics {
        Characteristics::DEFAULT
    }

    /// Returns `true` if the output order is significant.
    fn is_ordered(&self) -> bool {
        self.characteristics().contains(Characteristics::ORDERED)
    }

    /// Spliterator yielding exactly `size` values.
    fn spliterator(&mut self, size: u64) -> Spliterator<'_, Self>
    where
        Self: Sized,
    {
        Spliterator::sized(self, size)
    }

    /// Spliterator yielding values indefinitely.
    fn spliterator_unbounded(&mut self) -> Spliterator<'_, Self>
    where
        Self: Sized,
    {
        Spliterator::unbounded(self)
    }

    /// Sequential stream of `size` values.
    fn stream(&mut self, size: u64) -> Stream<'_, Self>
    where
        Self: Sized,
    {
        self.spliterator(size)
    }

    /// Sequential, unbounded stream. Consumers must limit it themselves.
    fn stream_unbounded(&mut self) -> Stream<'_, Self>
    where
        Self: Sized,
    {
        self.spliterator_unbounded()
    }

    /// Parallel stream of `size` values.
    ///
    /// Ordered variables are never split, so the stream runs on a single
    /// worker.
    fn par_stream(&mut self, size: u64) -> ParStream<'_, Self>
    where
        Self: Sized,
    {
        ParStream::new(self.spliterator(size))
    }

    /// Parallel, unbounded stream. Use a short-circuiting consumer such as
    /// `find_any` or `take_any`.
    fn par_stream_unbounded(&mut self) -> ParStream<'_, Self>
    where
        Self: Sized,
    {
        ParStream::new(self.spliterator_unbounded())
    }
}

/// A random variable whose values are ordered and can be range-limited.
///
/// Implementors only supply [`range`](Self::range) and
/// [`range_mut`](Self::range_mut); the bound protocol is provided. Types
/// whose output is known in advance (fixed and deterministic variables)
/// override the setters to reject bounds that would exclude their values.
pub trait OrderedRandomVariable<T: RangeValue>: RandomVariable<Value = T> {
    /// The range constraint.
    fn range(&self) -> &RangeConstraint<T>;

    /// Mutable access to the range constraint.
    fn range_mut(&mut self) -> &mut RangeConstraint<T>;

    /// Replaces the user minimum; `None` clears it.
    fn set_minimum(&mut self, min: Option<T>, closed: bool) -> RvResult<()> {
        self.range_mut().set_minimum(min, closed)
    }

    /// Replaces the user maximum; `None` clears it.
    fn set_maximum(&mut self, max: Option<T>, closed: bool) -> RvResult<()> {
        self.range_mut().set_maximum(max, closed)
    }

    /// Narrows the user minimum; never widens it.
    fn tighten_minimum(&mut self, min: T, closed: bool) -> RvResult<()> {
        self.range_mut().tighten_minimum(min, closed)
    }

    /// Narrows the user maximum; never widens it.
    fn tighten_maximum(&mut self, max: T, closed: bool) -> RvResult<()> {
        self.range_mut().tighten_maximum(max, closed)
    }

    /// [`tighten_minimum`](Self::tighten_minimum) with a string-form bound.
    fn tighten_minimum_str(&mut self, min: &str, closed: bool) -> RvResult<()> {
        let value = T::parse_value(min)?;
        self.tighten_minimum(value, closed)
    }

    /// [`tighten_maximum`](Self::tighten_maximum) with a string-form bound.
    fn tighten_maximum_str(&mut self, max: &str, closed: bool) -> RvResult<()> {
        let value = T::parse_value(max)?;
        self.tighten_maximum(value, closed)
    }

    /// Effective lower bound.
    fn minimum(&self) -> Option<T> {
        self.range().minimum()
    }

    /// Whether the effective lower bound is closed.
    fn minimum_closed(&self) -> Option<bool> {
        self.range().minimum_closed()
    }

    /// Effective upper bound.
    fn maximum(&self) -> Option<T> {
        self.range().maximum()
    }

    /// Whether the effective upper bound is closed.
    fn maximum_closed(&self) -> Option<bool> {
        self.range().maximum_closed()
    }

    /// Returns `true` if any bound is in force.
    fn range_test_needed(&self) -> bool {
        self.range().range_test_needed()
    }

    /// Returns `true` if `value` lies outside the effective range.
    fn range_test_failed(&self, value: T) -> bool {
        self.range().range_test_failed(value)
    }
}

/// Ordered random variable producing `f64` values.
pub trait DoubleRandomVariable: OrderedRandomVariable<f64> {}

impl<R: OrderedRandomVariable<f64> + ?Sized> DoubleRandomVariable for R {}

/// Ordered random variable producing `i32` values.
pub trait IntegerRandomVariable: OrderedRandomVariable<i32> {}

impl<R: OrderedRandomVariable<i32> + ?Sized> IntegerRandomVariable for R {}

/// Ordered random variable producing `i64` values.
pub trait LongRandomVariable: OrderedRandomVariable<i64> {}

impl<R: OrderedRandomVariable<i64> + ?Sized> LongRandomVariable for R {}

/// Random variable producing booleans. Booleans carry no range.
pub trait BooleanRandomVariable: RandomVariable<Value = bool> {}

impl<R: RandomVariable<Value = bool> + ?Sized> BooleanRandomVariable for R {}

/// Random variable producing interarrival times.
///
/// Implementors guarantee a required minimum of `0` (closed), so no
/// generated time is negative.
pub trait InterarrivalTimeRandomVariable: LongRandomVariable {}
