//! Error types for structured error handling.
//!
//! This module provides:
//! - `RvError`: Errors raised while constructing, configuring or drawing from
//!   random variables
//! - `ConfigError`: Errors from validating an [`RvConfig`](crate::rng::RvConfig)
//! - `RvResult`: Convenience alias used throughout the workspace

use thiserror::Error;

/// Convenience alias for results produced by random-variable operations.
pub type RvResult<T> = Result<T, RvError>;

/// Categorised random-variable errors.
///
/// Construction and argument errors are never caught internally; they
/// propagate to the caller synchronously. The RV-of-RV layer folds every
/// failure to install a bound on a freshly generated child into the single
/// [`RvError::RandomVariable`] kind.
///
/// # Variants
/// - `InvalidArgument`: A parameter or bound is out of range
/// - `CloneNotSupported`: A parameter random variable cannot be duplicated
/// - `Unsupported`: The operation makes no sense for the value type
/// - `RandomVariable`: A composite random variable could not produce a child
/// - `Parse`: A string-form bound could not be parsed
/// - `RejectionLimit`: The configured rejection-sampling fuse tripped
///
/// # Examples
/// ```
/// use randvar_core::types::RvError;
///
/// let err = RvError::InvalidArgument("probability 1.5 not in [0, 1]".to_string());
/// assert_eq!(
///     format!("{}", err),
///     "Invalid argument: probability 1.5 not in [0, 1]"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RvError {
    /// A constructor or bound setter received an unusable argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A parameter random variable does not support duplication.
    #[error("Cannot clone random variable of type {type_name}")]
    CloneNotSupported {
        /// Fully qualified type name of the offending variable
        type_name: &'static str,
    },

    /// The operation is not defined for this random variable.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// A composite random variable failed to produce a usable child.
    #[error("Random variable error: {0}")]
    RandomVariable(String),

    /// A string-form bound could not be parsed.
    #[error("Cannot parse '{input}' as a bound: {reason}")]
    Parse {
        /// The rejected input
        input: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Rejection sampling gave up after the configured number of draws.
    #[error("No value satisfying the range constraints after {attempts} attempts")]
    RejectionLimit {
        /// Number of rejected draws
        attempts: u64,
    },
}

impl RvError {
    /// Shorthand for an [`RvError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        RvError::InvalidArgument(msg.into())
    }

    /// Wraps `self` as the error reported by an RV-of-RV `next()`.
    ///
    /// Errors that already are [`RvError::RandomVariable`] are returned
    /// unchanged so that nesting does not stack prefixes.
    pub fn into_random_variable_error(self) -> Self {
        match self {
            RvError::RandomVariable(_) => self,
            other => RvError::RandomVariable(other.to_string()),
        }
    }
}

/// Configuration errors for the RNG source and sequence production.
///
/// These errors occur when an [`RvConfig`](crate::rng::RvConfig) is built
/// with values that cannot be honoured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The rejection fuse must allow at least one attempt.
    #[error("Invalid rejection limit {0}: must be at least 1")]
    InvalidRejectionLimit(u64),

    /// The split depth exceeds what a spliterator can usefully halve.
    #[error("Invalid split depth {0}: must be at most 63")]
    InvalidSplitDepth(u32),
}

impl From<ConfigError> for RvError {
    fn from(err: ConfigError) -> Self {
        RvError::InvalidArgument(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rv_error_display() {
        let err = RvError::invalid("n must be positive");
        assert_eq!(err.to_string(), "Invalid argument: n must be positive");

        let err = RvError::CloneNotSupported {
            type_name: "my_crate::Opaque",
        };
        assert!(err.to_string().contains("my_crate::Opaque"));

        let err = RvError::RejectionLimit { attempts: 10 };
        assert!(err.to_string().contains("10 attempts"));
    }

    #[test]
    fn test_into_random_variable_error_does_not_nest() {
        let err = RvError::invalid("bad").into_random_variable_error();
        assert_eq!(
            err,
            RvError::RandomVariable("Invalid argument: bad".to_string())
        );
        let again = err.clone().into_random_variable_error();
        assert_eq!(again, err);
    }

    #[test]
    fn test_config_error_converts() {
        let err: RvError = ConfigError::InvalidRejectionLimit(0).into();
        assert!(matches!(err, RvError::InvalidArgument(_)));
    }
}
