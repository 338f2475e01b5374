//! RNG configuration from a TOML file or from command-line flags.
//!
//! ```toml
//! seed = 42
//! quality = "High"
//! max_rejection_attempts = 1000000
//! ```

use std::path::Path;

use randvar_core::rng::{static_random, RngQuality, RvConfig};
use tracing::{debug, info};

use crate::{CliError, Result};

/// Flags that shape the process-wide source when no file is given.
#[derive(Debug, Default)]
pub struct SourceFlags {
    /// Seed for reproducible runs
    pub seed: Option<u64>,
    /// Use the high-quality generator
    pub high_quality: bool,
    /// Give up rejection sampling after this many attempts
    pub max_rejections: Option<u64>,
}

/// Loads an [`RvConfig`] from a TOML file and validates it.
pub fn load(path: &Path) -> Result<RvConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: RvConfig = toml::from_str(&text)?;
    config.validate()?;
    debug!(path = %path.display(), "Loaded RNG configuration");
    Ok(config)
}

/// Builds an [`RvConfig`] from the command-line flags.
pub fn from_flags(flags: &SourceFlags) -> Result<RvConfig> {
    let mut builder = RvConfig::builder().quality(if flags.high_quality {
        RngQuality::High
    } else {
        RngQuality::Fast
    });
    if let Some(seed) = flags.seed {
        builder = builder.seed(seed);
    }
    if let Some(attempts) = flags.max_rejections {
        builder = builder.max_rejection_attempts(attempts);
    }
    Ok(builder.build()?)
}

/// Applies `config` to the process-wide source.
pub fn install(config: &RvConfig) {
    static_random::configure(config);
    info!(
        seed = ?config.seed(),
        quality = ?config.quality(),
        split_depth = static_random::split_depth(),
        "Random source configured"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_build_config() {
        let config = from_flags(&SourceFlags {
            seed: Some(7),
            high_quality: true,
            max_rejections: Some(500),
        })
        .unwrap();
        assert_eq!(config.seed(), Some(7));
        assert_eq!(config.quality(), RngQuality::High);
        assert_eq!(config.max_rejection_attempts(), Some(500));

        let invalid = SourceFlags {
            max_rejections: Some(0),
            ..SourceFlags::default()
        };
        assert!(matches!(from_flags(&invalid), Err(CliError::Config(_))));
    }

    #[test]
    fn test_load_toml_file() {
        let path = std::env::temp_dir().join(format!("rv_sampler_{}.toml", std::process::id()));
        std::fs::write(&path, "seed = 42\nquality = \"High\"\nmax_rejection_attempts = 1000\n")
            .unwrap();
        let config = load(&path);
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.quality(), RngQuality::High);
        assert_eq!(config.max_split_depth(), None);

        assert!(matches!(
            load(Path::new("/nonexistent/rv_sampler.toml")),
            Err(CliError::Io { .. })
        ));
    }
}
