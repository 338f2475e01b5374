//! Core value types shared by every random variable.
//!
//! - [`Characteristics`]: sequence flags (ordered, sized, ...)
//! - [`RvError`], [`ConfigError`], [`RvResult`]: structured errors

pub mod characteristics;
pub mod error;

pub use characteristics::Characteristics;
pub use error::{ConfigError, RvError, RvResult};
