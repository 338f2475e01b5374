//! Sample command implementation
//!
//! Draws from one distribution, then reports the sample moments and, for
//! discrete distributions without user bounds, a chi-square goodness of
//! fit against the exact probabilities.

use randvar_models::distributions::{
    BinomialBooleanRv, BinomialLongRv, ExpDistrRv, GaussianRv, LogNormalRv, PoissonLongRv,
    UniformDoubleRv,
};
use randvar_models::slot::{AnyRandomVariable, RvSlot};
use randvar_stats::{BasicStats, Summary};
use serde::Serialize;
use tracing::{debug, info};

use super::fit;
use crate::{CliError, Result};

/// Number of leading draws echoed in the report.
const PREVIEW: usize = 8;

/// Distribution and parameters chosen on the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum Distribution {
    /// Uniform doubles between `lower` (inclusive) and `upper`.
    Uniform {
        /// Lower end
        lower: f64,
        /// Upper end
        upper: f64,
        /// Whether `upper` can be drawn
        upper_closed: bool,
    },
    /// Normal distribution.
    Gaussian {
        /// Mean
        mean: f64,
        /// Standard deviation
        sdev: f64,
    },
    /// Log-normal distribution.
    LogNormal {
        /// Mean of the logarithm
        mu: f64,
        /// Standard deviation of the logarithm
        sigma: f64,
    },
    /// Exponential distribution.
    Exponential {
        /// Mean
        mean: f64,
    },
    /// Poisson counts.
    Poisson {
        /// Mean
        mean: f64,
    },
    /// Binomial counts.
    Binomial {
        /// Success probability per trial
        prob: f64,
        /// Number of trials
        tries: u64,
    },
    /// Single Bernoulli trial reported as 0 or 1.
    Bernoulli {
        /// Success probability
        prob: f64,
    },
}

impl Distribution {
    /// Short name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Uniform { .. } => "uniform",
            Distribution::Gaussian { .. } => "gaussian",
            Distribution::LogNormal { .. } => "log-normal",
            Distribution::Exponential { .. } => "exponential",
            Distribution::Poisson { .. } => "poisson",
            Distribution::Binomial { .. } => "binomial",
            Distribution::Bernoulli { .. } => "bernoulli",
        }
    }

    fn build(&self) -> Result<AnyRandomVariable> {
        let rv = match *self {
            Distribution::Uniform {
                lower,
                upper,
                upper_closed,
            } => AnyRandomVariable::double(UniformDoubleRv::new(lower, true, upper, upper_closed)?),
            Distribution::Gaussian { mean, sdev } => {
                AnyRandomVariable::double(GaussianRv::new(mean, sdev)?)
            }
            Distribution::LogNormal { mu, sigma } => {
                AnyRandomVariable::double(LogNormalRv::new(mu, sigma)?)
            }
            Distribution::Exponential { mean } => AnyRandomVariable::double(ExpDistrRv::new(mean)?),
            Distribution::Poisson { mean } => AnyRandomVariable::long(PoissonLongRv::new(mean)?),
            Distribution::Binomial { prob, tries } => {
                AnyRandomVariable::long(BinomialLongRv::new(prob, tries)?)
            }
            Distribution::Bernoulli { prob } => {
                AnyRandomVariable::boolean(BinomialBooleanRv::new(prob)?)
            }
        };
        Ok(rv)
    }

    /// Exact probabilities indexed by value, for discrete distributions.
    fn probabilities(&self) -> Option<Vec<f64>> {
        match *self {
            Distribution::Poisson { mean } => fit::poisson_pmf(mean),
            Distribution::Binomial { prob, tries } => fit::binomial_pmf(prob, tries),
            Distribution::Bernoulli { prob } => fit::bernoulli_pmf(prob),
            _ => None,
        }
    }
}

/// Options shared by every sampling command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleOptions {
    /// Number of draws
    pub count: u64,
    /// Lower bound in string form
    pub min: Option<String>,
    /// Upper bound in string form
    pub max: Option<String>,
    /// Whether the bounds exclude their own value
    pub open_bounds: bool,
    /// Print JSON instead of a table
    pub json: bool,
}

/// Goodness of fit of the draws.
#[derive(Clone, Debug, Serialize)]
pub struct Fit {
    /// Chi-square statistic
    pub statistic: f64,
    /// Degrees of freedom
    pub degrees_of_freedom: u64,
    /// Upper-tail probability
    pub p_value: f64,
}

/// Result of a sampling run.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// Distribution name
    pub distribution: &'static str,
    /// Moments of the draws
    pub summary: Summary,
    /// First few draws
    pub preview: Vec<f64>,
    /// Present for discrete distributions without bounds
    pub goodness_of_fit: Option<Fit>,
}

/// Run the sample command
pub fn run(distribution: &Distribution, options: &SampleOptions) -> Result<()> {
    info!("Sampling {} values from {}", options.count, distribution.name());
    let report = sample(distribution, options)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }
    info!("Sampling complete");
    Ok(())
}

/// Draws the values and assembles the report.
pub fn sample(distribution: &Distribution, options: &SampleOptions) -> Result<Report> {
    if options.count < 2 {
        return Err(CliError::InvalidArgument(format!(
            "count must be at least 2, got {}",
            options.count
        )));
    }

    let mut slot = RvSlot::new(distribution.name());
    slot.set_rv(distribution.build()?);
    let bounded = options.min.is_some() || options.max.is_some();
    if let Some(rv) = slot.random_variable_mut() {
        if let Some(min) = &options.min {
            rv.tighten_minimum_str(min, !options.open_bounds)?;
        }
        if let Some(max) = &options.max {
            rv.tighten_maximum_str(max, !options.open_bounds)?;
        }
        debug!(kind = rv.kind(), bounded, "Random variable installed");
    }

    let probs = if bounded {
        None
    } else {
        distribution.probabilities()
    };
    let mut counts = vec![0u64; probs.as_ref().map_or(0, Vec::len)];

    let mut stats = BasicStats::sample();
    let mut preview = Vec::with_capacity(PREVIEW);
    for _ in 0..options.count {
        let value = slot.next_value()?.as_f64();
        stats.add(value);
        if preview.len() < PREVIEW {
            preview.push(value);
        }
        if let Some(last) = counts.len().checked_sub(1) {
            counts[(value.max(0.0) as usize).min(last)] += 1;
        }
    }

    let goodness_of_fit = match probs {
        Some(probs) => match fit::chi_square(&counts, &probs, options.count)? {
            Some(stat) => Some(Fit {
                statistic: stat.value()?,
                degrees_of_freedom: stat.degrees_of_freedom()?,
                p_value: stat.p_value()?,
            }),
            None => None,
        },
        None => None,
    };

    Ok(Report {
        distribution: distribution.name(),
        summary: stats.summary()?,
        preview,
        goodness_of_fit,
    })
}

fn print_table(report: &Report) {
    let summary = &report.summary;
    println!("\n┌──────────────────────┬──────────────────────┐");
    println!("│ {:<20} │ {:>20} │", "Distribution", report.distribution);
    println!("├──────────────────────┼──────────────────────┤");
    println!("│ {:<20} │ {:>20} │", "Draws", summary.size);
    println!("│ {:<20} │ {:>20.6} │", "Mean", summary.mean);
    println!("│ {:<20} │ {:>20.6} │", "Variance", summary.variance);
    println!("│ {:<20} │ {:>20.6} │", "Std deviation", summary.sdev);
    if let Some(fit) = &report.goodness_of_fit {
        println!("├──────────────────────┼──────────────────────┤");
        println!("│ {:<20} │ {:>20.4} │", "Chi-square", fit.statistic);
        println!("│ {:<20} │ {:>20} │", "Degrees of freedom", fit.degrees_of_freedom);
        println!("│ {:<20} │ {:>20.4} │", "p-value", fit.p_value);
    }
    println!("└──────────────────────┴──────────────────────┘");
    let preview: Vec<String> = report.preview.iter().map(|v| format!("{:.4}", v)).collect();
    println!("First draws: {}", preview.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use randvar_core::types::RvError;

    fn options(count: u64) -> SampleOptions {
        SampleOptions {
            count,
            ..SampleOptions::default()
        }
    }

    #[test]
    fn test_binomial_report() {
        let dist = Distribution::Binomial { prob: 0.5, tries: 10 };
        let report = sample(&dist, &options(20_000)).unwrap();
        assert_eq!(report.summary.size, 20_000);
        assert_relative_eq!(report.summary.mean, 5.0, epsilon = 0.1);
        assert_eq!(report.preview.len(), PREVIEW);
        let fit = report.goodness_of_fit.unwrap();
        assert!(fit.degrees_of_freedom >= 5);
        assert!(fit.p_value > 0.0);
    }

    #[test]
    fn test_bounds_apply_and_disable_fit() {
        let dist = Distribution::Poisson { mean: 4.0 };
        let opts = SampleOptions {
            count: 2_000,
            max: Some("3".to_string()),
            ..SampleOptions::default()
        };
        let report = sample(&dist, &opts).unwrap();
        assert!(report.goodness_of_fit.is_none());
        assert!(report.preview.iter().all(|v| *v <= 3.0));
    }

    #[test]
    fn test_continuous_has_no_fit() {
        let dist = Distribution::Gaussian { mean: 1.0, sdev: 0.0 };
        let report = sample(&dist, &options(10)).unwrap();
        assert_eq!(report.summary.mean, 1.0);
        assert_eq!(report.summary.variance, 0.0);
        assert!(report.goodness_of_fit.is_none());
    }

    #[test]
    fn test_rejected_inputs() {
        let coin = Distribution::Bernoulli { prob: 0.5 };
        let bounded = SampleOptions {
            count: 10,
            min: Some("0".to_string()),
            ..SampleOptions::default()
        };
        assert!(matches!(
            sample(&coin, &bounded),
            Err(CliError::RandomVariable(RvError::Unsupported(_)))
        ));
        assert!(matches!(
            sample(&coin, &options(1)),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(sample(&Distribution::Exponential { mean: -1.0 }, &options(10)).is_err());
    }
}
