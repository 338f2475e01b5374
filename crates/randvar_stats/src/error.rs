//! Error types for statistics.

use thiserror::Error;

/// Convenience alias for statistics results.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors raised by statistics and distributions.
///
/// # Examples
/// ```
/// use randvar_stats::StatsError;
///
/// let err = StatsError::DatasetTooSmall { size: 1, required: 2 };
/// assert_eq!(format!("{}", err), "Dataset too small: 1 values, at least 2 required");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Not enough data for the requested quantity.
    #[error("Dataset too small: {size} values, at least {required} required")]
    DatasetTooSmall {
        /// Values present
        size: u64,
        /// Values needed
        required: u64,
    },

    /// Observed and expected data differ in length.
    #[error("Length mismatch: {observed} observed values, {expected} expected values")]
    LengthMismatch {
        /// Number of observed values
        observed: usize,
        /// Number of expected values
        expected: usize,
    },

    /// An argument is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
