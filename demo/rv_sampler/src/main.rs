//! rv-sampler - Command Line Sampling for randvar Distributions
//!
//! Draws from a chosen distribution and reports the sample moments. For
//! discrete distributions the draws are also checked against the exact
//! probabilities with a chi-square test.
//!
//! # Commands
//!
//! - `rv-sampler binomial --prob 0.3 --tries 20` - Binomial counts
//! - `rv-sampler gaussian --mean 0 --sdev 1 --min -1` - Bounded normal draws
//! - `rv-sampler check` - Report the random source settings
//!
//! Logging is controlled with `RUST_LOG`, e.g. `RUST_LOG=debug`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::sample::{Distribution, SampleOptions};
pub use error::{CliError, Result};

/// randvar sampling CLI
#[derive(Parser)]
#[command(name = "rv-sampler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file holding the random source configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Use the high-quality generator
    #[arg(long, global = true)]
    high_quality: bool,

    /// Give up rejection sampling after this many attempts
    #[arg(long, global = true)]
    max_rejections: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Options common to every distribution.
#[derive(Args)]
struct SampleArgs {
    /// Number of draws
    #[arg(short = 'n', long, default_value = "100000")]
    count: u64,

    /// Lower bound on the values drawn
    #[arg(long, allow_hyphen_values = true)]
    min: Option<String>,

    /// Upper bound on the values drawn
    #[arg(long, allow_hyphen_values = true)]
    max: Option<String>,

    /// Exclude the bound values themselves
    #[arg(long)]
    open_bounds: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl SampleArgs {
    fn options(self) -> SampleOptions {
        SampleOptions {
            count: self.count,
            min: self.min,
            max: self.max,
            open_bounds: self.open_bounds,
            json: self.json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Uniform doubles
    Uniform {
        /// Lower end (inclusive)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        lower: f64,

        /// Upper end
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        upper: f64,

        /// Allow the upper end to be drawn
        #[arg(long)]
        upper_closed: bool,

        #[command(flatten)]
        sample: SampleArgs,
    },

    /// Normally distributed doubles
    Gaussian {
        /// Mean
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        mean: f64,

        /// Standard deviation
        #[arg(long, default_value = "1")]
        sdev: f64,

        #[command(flatten)]
        sample: SampleArgs,
    },

    /// Log-normally distributed doubles
    LogNormal {
        /// Mean of the logarithm
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        mu: f64,

        /// Standard deviation of the logarithm
        #[arg(long, default_value = "1")]
        sigma: f64,

        #[command(flatten)]
        sample: SampleArgs,
    },

    /// Exponentially distributed doubles
    Exponential {
        /// Mean
        #[arg(long, default_value = "1")]
        mean: f64,

        #[command(flatten)]
        sample: SampleArgs,
    },

    /// Poisson counts
    Poisson {
        /// Mean
        #[arg(long)]
        mean: f64,

        #[command(flatten)]
        sample: SampleArgs,
    },

    /// Binomial counts
    Binomial {
        /// Success probability per trial
        #[arg(short, long)]
        prob: f64,

        /// Number of trials
        #[arg(short, long)]
        tries: u64,

        #[command(flatten)]
        sample: SampleArgs,
    },

    /// Bernoulli trials reported as 0 or 1
    Bernoulli {
        /// Success probability
        #[arg(short, long, default_value = "0.5")]
        prob: f64,

        #[command(flatten)]
        sample: SampleArgs,
    },

    /// Report the random source settings
    Check,
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let rv_config = match &cli.config {
        Some(path) => config::load(path)?,
        None => config::from_flags(&config::SourceFlags {
            seed: cli.seed,
            high_quality: cli.high_quality,
            max_rejections: cli.max_rejections,
        })?,
    };
    config::install(&rv_config);

    let (distribution, sample) = match cli.command {
        Commands::Uniform {
            lower,
            upper,
            upper_closed,
            sample,
        } => (
            Distribution::Uniform {
                lower,
                upper,
                upper_closed,
            },
            sample,
        ),
        Commands::Gaussian { mean, sdev, sample } => (Distribution::Gaussian { mean, sdev }, sample),
        Commands::LogNormal { mu, sigma, sample } => (Distribution::LogNormal { mu, sigma }, sample),
        Commands::Exponential { mean, sample } => (Distribution::Exponential { mean }, sample),
        Commands::Poisson { mean, sample } => (Distribution::Poisson { mean }, sample),
        Commands::Binomial { prob, tries, sample } => {
            (Distribution::Binomial { prob, tries }, sample)
        }
        Commands::Bernoulli { prob, sample } => (Distribution::Bernoulli { prob }, sample),
        Commands::Check => return commands::check::run(),
    };

    commands::sample::run(&distribution, &sample.options())
}
