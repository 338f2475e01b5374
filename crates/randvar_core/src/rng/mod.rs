//! # Random Source
//!
//! The process-wide pseudo-random source that every distribution draws
//! from, and its configuration.
//!
//! ## Module Structure
//!
//! - [`static_random`]: shared generator, raw draws (uniform, Gaussian,
//!   exponential, Poisson), quality switching and the rejection loop
//! - [`config`]: [`RvConfig`] and its builder
//!
//! ## Usage Example
//!
//! ```rust
//! use randvar_core::rng::{static_random, RngQuality, RvConfig};
//!
//! let config = RvConfig::builder()
//!     .seed(12345)
//!     .quality(RngQuality::High)
//!     .build()
//!     .unwrap();
//! static_random::configure(&config);
//! assert!(static_random::is_high_quality());
//!
//! static_random::minimize_quality();
//! assert!(!static_random::is_high_quality());
//! ```
//!
//! ## Thread Safety
//!
//! The generator sits behind a mutex. Draws from several threads are
//! serialised; reproducibility from a seed holds only for single-threaded
//! consumption.

pub mod config;
pub mod static_random;

pub use config::{RngQuality, RvConfig, RvConfigBuilder, MAX_SPLIT_DEPTH};
