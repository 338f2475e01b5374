//! # randvar_models (L2: Distributions)
//!
//! Concrete random variables built on the contracts in `randvar_core`.
//!
//! This crate provides:
//! - Leaf distributions: fixed, deterministic, uniform, Gaussian,
//!   log-normal, exponential, Poisson and binomial (`distributions`)
//! - Correlated Gaussian vectors via a Cholesky factor
//!   (`distributions::gaussian_rvs`)
//! - Random variables whose values are random variables (`rvrv`)
//! - A type-erased `AnyRandomVariable` and the named `RvSlot` (`slot`)
//!
//! ## Design Principles
//!
//! - **Validated construction**: every constructor checks its parameters
//!   and returns `RvResult`
//! - **Generic value types**: one implementation per distribution, with
//!   `f64`, `i32` and `i64` aliases
//! - **Rejection for ranges**: user bounds are honoured by redrawing, with
//!   an optional fuse set through `RvConfig`
//!
//! ## Usage Example
//!
//! ```rust
//! use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
//! use randvar_models::distributions::{BinomialIntegerRv, DetermDoubleRv};
//!
//! let mut rv = BinomialIntegerRv::new(0.5, 10).unwrap();
//! rv.set_maximum(Some(5), true).unwrap();
//! let total: i32 = rv.stream(1000).map(|v| v.unwrap()).sum();
//! assert!(total <= 5000);
//!
//! let mut seq = DetermDoubleRv::with_final(vec![1.0, 2.0, 3.0], 9.0).unwrap();
//! let values: Vec<f64> = seq.stream(5).map(|v| v.unwrap()).collect();
//! assert_eq!(values, vec![1.0, 2.0, 3.0, 9.0, 9.0]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod distributions;
pub mod rvrv;
pub mod slot;
