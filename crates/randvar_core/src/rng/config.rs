//! Random source configuration.
//!
//! This module provides [`RvConfig`] and its builder. A configuration is
//! applied process-wide with
//! [`static_random::configure`](super::static_random::configure).

use crate::types::ConfigError;

/// Largest split depth a spliterator can honour (one halving per bit).
pub const MAX_SPLIT_DEPTH: u32 = 63;

/// Quality of the process-wide pseudo-random source.
///
/// - `Fast`: small, fast generator (`SmallRng`); the default
/// - `High`: cryptographically strong generator (`StdRng`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RngQuality {
    /// Fast generator suitable for simulation.
    #[default]
    Fast,

    /// Higher-quality generator, slower per draw.
    High,
}

/// Random source configuration.
///
/// Immutable once built. Use [`RvConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use randvar_core::rng::{RngQuality, RvConfig};
///
/// let config = RvConfig::builder()
///     .seed(42)
///     .quality(RngQuality::High)
///     .max_rejection_attempts(1_000_000)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.seed(), Some(42));
/// assert_eq!(config.max_split_depth(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RvConfig {
    /// Seed applied to the source, if any.
    seed: Option<u64>,
    /// Generator quality.
    quality: RngQuality,
    /// Rejection fuse; `None` retries forever.
    max_rejection_attempts: Option<u64>,
    /// Spliterator split depth; `None` derives it from the CPU count.
    max_split_depth: Option<u32>,
}

impl RvConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> RvConfigBuilder {
        RvConfigBuilder::default()
    }

    /// Returns the optional seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the generator quality.
    #[inline]
    pub fn quality(&self) -> RngQuality {
        self.quality
    }

    /// Returns the rejection fuse, if any.
    #[inline]
    pub fn max_rejection_attempts(&self) -> Option<u64> {
        self.max_rejection_attempts
    }

    /// Returns the split depth override, if any.
    #[inline]
    pub fn max_split_depth(&self) -> Option<u32> {
        self.max_split_depth
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `max_rejection_attempts` is `Some(0)`
    /// - `max_split_depth` exceeds [`MAX_SPLIT_DEPTH`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(0) = self.max_rejection_attempts {
            return Err(ConfigError::InvalidRejectionLimit(0));
        }
        if let Some(depth) = self.max_split_depth {
            if depth > MAX_SPLIT_DEPTH {
                return Err(ConfigError::InvalidSplitDepth(depth));
            }
        }
        Ok(())
    }
}

/// Builder for [`RvConfig`].
#[derive(Clone, Debug, Default)]
pub struct RvConfigBuilder {
    seed: Option<u64>,
    quality: RngQuality,
    max_rejection_attempts: Option<u64>,
    max_split_depth: Option<u32>,
}

impl RvConfigBuilder {
    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the generator quality.
    #[inline]
    pub fn quality(mut self, quality: RngQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Limits every rejection loop to `attempts` draws.
    ///
    /// # Arguments
    ///
    /// * `attempts` - Number of rejected draws tolerated, at least 1
    #[inline]
    pub fn max_rejection_attempts(mut self, attempts: u64) -> Self {
        self.max_rejection_attempts = Some(attempts);
        self
    }

    /// Overrides the spliterator split depth.
    ///
    /// # Arguments
    ///
    /// * `depth` - Number of successive halvings, in [0, 63]
    #[inline]
    pub fn max_split_depth(mut self, depth: u32) -> Self {
        self.max_split_depth = Some(depth);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a limit is out of range.
    pub fn build(self) -> Result<RvConfig, ConfigError> {
        let config = RvConfig {
            seed: self.seed,
            quality: self.quality,
            max_rejection_attempts: self.max_rejection_attempts,
            max_split_depth: self.max_split_depth,
        };
        config.validate()?;
        Ok(config)
    }
}
