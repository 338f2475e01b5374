//! # Random Variable Traits
//!
//! - [`RandomVariable`]: the generator contract (`next`, cloning,
//!   characteristics, sequence production)
//! - [`OrderedRandomVariable`]: adds the min/max range protocol for
//!   `f64`, `i32` and `i64` values
//! - [`DoubleRandomVariable`], [`IntegerRandomVariable`],
//!   [`LongRandomVariable`], [`BooleanRandomVariable`]: per-type markers,
//!   implemented automatically
//! - [`InterarrivalTimeRandomVariable`]: non-negative `i64` times
//! - [`RvGenerator`]: builds child distributions for RV-of-RV composites

pub mod generator;
pub mod random_variable;

pub use generator::{clone_parameter, determine_if_ordered, RvGenerator};
pub use random_variable::{
    BooleanRandomVariable, DoubleRandomVariable, IntegerRandomVariable,
    InterarrivalTimeRandomVariable, LongRandomVariable, OrderedRandomVariable, RandomVariable,
};
