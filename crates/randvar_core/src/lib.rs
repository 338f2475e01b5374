//! # randvar_core: Random Variable Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! randvar_core is the bottom layer of the workspace, providing:
//! - Range constraints with closed/open bounds (`range`)
//! - The generator contracts `RandomVariable`, `OrderedRandomVariable` and
//!   `RvGenerator` (`traits`)
//! - The process-wide pseudo-random source and its configuration (`rng`)
//! - Lazy sequential and parallel sequence production (`sequence`)
//! - Error types: `RvError`, `ConfigError` and the `Characteristics`
//!   bitset (`types`)
//!
//! Concrete distributions live in `randvar_models`; statistics used to
//! validate them live in `randvar_stats`.
//!
//! ## Usage Examples
//!
//! ```rust
//! use randvar_core::range::RangeConstraint;
//! use randvar_core::rng::static_random;
//! use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
//! use randvar_core::types::RvResult;
//!
//! /// Uniform values in [0, 1), range-limited by rejection.
//! #[derive(Clone)]
//! struct Unit {
//!     range: RangeConstraint<f64>,
//! }
//!
//! impl RandomVariable for Unit {
//!     type Value = f64;
//!
//!     fn next(&mut self) -> RvResult<f64> {
//!         let range = &self.range;
//!         static_random::sample_until(|| Ok(static_random::next_double()), |v| range.admits(*v))
//!     }
//!
//!     fn try_clone(&self) -> RvResult<Self> {
//!         Ok(self.clone())
//!     }
//! }
//!
//! impl OrderedRandomVariable<f64> for Unit {
//!     fn range(&self) -> &RangeConstraint<f64> {
//!         &self.range
//!     }
//!
//!     fn range_mut(&mut self) -> &mut RangeConstraint<f64> {
//!         &mut self.range
//!     }
//! }
//!
//! let mut rv = Unit { range: RangeConstraint::new() };
//! rv.tighten_minimum(0.5, true).unwrap();
//! for value in rv.stream(100) {
//!     assert!(value.unwrap() >= 0.5);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `RvConfig`, `RngQuality` and `Bound`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod range;
pub mod rng;
pub mod sequence;
pub mod traits;
pub mod types;
