//! # randvar_stats (L2: Validation Statistics)
//!
//! Statistics for checking random variables against the distributions
//! they claim to draw from.
//!
//! This crate provides:
//! - `BasicStats`: running mean and variance, sample or population
//! - `ChiSquareStat`: goodness-of-fit and contingency statistics
//! - `ChiSquareDistr`: the chi-square distribution for p-values
//! - `special`: log-gamma and the regularised incomplete gamma functions
//!
//! ## Usage Example
//!
//! ```rust
//! use randvar_stats::{BasicStats, ChiSquareDistr};
//!
//! let mut stats = BasicStats::sample();
//! stats.extend((1..=100_i32).map(f64::from));
//! assert!((stats.mean().unwrap() - 50.5).abs() < 1e-12);
//!
//! let distr = ChiSquareDistr::new(3).unwrap();
//! assert!((distr.cdf(2.0) + distr.sf(2.0) - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Summary`, `Correction` and
//!   `ChiSquareDistr`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod basic;
pub mod chi_square;
pub mod error;
pub mod special;

pub use basic::{BasicStats, Correction, Summary};
pub use chi_square::{ChiSquareDistr, ChiSquareStat};
pub use error::{StatsError, StatsResult};
