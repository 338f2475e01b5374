//! Chi-square statistic and distribution.
//!
//! Used to check a generator against its exact distribution: bin the draws,
//! compare the bin counts with the expected counts, and look at the upper
//! tail probability of the resulting statistic.
//!
//! ```
//! use randvar_stats::ChiSquareStat;
//!
//! let observed = [18.0, 22.0, 21.0, 19.0, 20.0];
//! let expected = [20.0; 5];
//! let stat = ChiSquareStat::from_counts(&observed, &expected)
//!     .unwrap()
//!     .with_constraints(1);
//!
//! assert_eq!(stat.degrees_of_freedom().unwrap(), 4);
//! assert!((stat.value().unwrap() - 0.5).abs() < 1e-12);
//! assert!(stat.p_value().unwrap() > 0.9);
//! ```

use crate::error::{StatsError, StatsResult};
use crate::special::{gamma_p, gamma_q, ln_gamma};

/// Chi-square distribution with `nu` degrees of freedom.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChiSquareDistr {
    nu: u64,
}

impl ChiSquareDistr {
    /// Creates the distribution.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidArgument`] if `nu` is zero.
    pub fn new(nu: u64) -> StatsResult<Self> {
        if nu == 0 {
            return Err(StatsError::InvalidArgument(
                "degrees of freedom must be positive".to_string(),
            ));
        }
        Ok(Self { nu })
    }

    /// Degrees of freedom.
    pub fn degrees_of_freedom(&self) -> u64 {
        self.nu
    }

    /// Mean, equal to the degrees of freedom.
    pub fn mean(&self) -> f64 {
        self.nu as f64
    }

    /// Variance, twice the degrees of freedom.
    pub fn variance(&self) -> f64 {
        2.0 * self.nu as f64
    }

    /// Probability density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        let k = self.nu as f64 / 2.0;
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            return match self.nu {
                1 => f64::INFINITY,
                2 => 0.5,
                _ => 0.0,
            };
        }
        ((k - 1.0) * x.ln() - x / 2.0 - k * std::f64::consts::LN_2 - ln_gamma(k)).exp()
    }

    /// P(X <= x).
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        gamma_p(self.nu as f64 / 2.0, x / 2.0)
    }

    /// P(X > x), the upper tail.
    pub fn sf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        gamma_q(self.nu as f64 / 2.0, x / 2.0)
    }
}

/// Kahan-summed chi-square statistic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChiSquareStat {
    total: f64,
    compensation: f64,
    n: u64,
    constraints: u64,
}

impl ChiSquareStat {
    /// Empty statistic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistic for observed counts against expected counts, each term
    /// being `(o - e)² / |e|`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::LengthMismatch`] if the slices differ in
    /// length and [`StatsError::InvalidArgument`] for a zero expected
    /// count.
    pub fn from_counts(observed: &[f64], expected: &[f64]) -> StatsResult<Self> {
        if observed.len() != expected.len() {
            return Err(StatsError::LengthMismatch {
                observed: observed.len(),
                expected: expected.len(),
            });
        }
        let mut stat = Self::new();
        for (&o, &e) in observed.iter().zip(expected) {
            stat.add(o, e)?;
        }
        Ok(stat)
    }

    /// Statistic for an `r × c` contingency table, testing independence
    /// of rows and columns with `(r - 1)(c - 1)` degrees of freedom.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidArgument`] for ragged tables, tables
    /// smaller than 2 × 2, or an all-zero row or column.
    pub fn from_contingency(table: &[Vec<u64>]) -> StatsResult<Self> {
        let rows = table.len();
        let cols = table.first().map_or(0, Vec::len);
        if rows < 2 || cols < 2 || table.iter().any(|row| row.len() != cols) {
            return Err(StatsError::InvalidArgument(
                "contingency table must be rectangular and at least 2 x 2".to_string(),
            ));
        }
        let row_totals: Vec<u64> = table.iter().map(|row| row.iter().sum()).collect();
        let col_totals: Vec<u64> = (0..cols).map(|j| table.iter().map(|row| row[j]).sum()).collect();
        let total: u64 = row_totals.iter().sum();

        let mut stat = Self::new();
        for (row, &row_total) in table.iter().zip(&row_totals) {
            for (&value, &col_total) in row.iter().zip(&col_totals) {
                let expected = row_total as f64 * col_total as f64 / total as f64;
                stat.add(value as f64, expected)?;
            }
        }
        let dof = ((rows - 1) * (cols - 1)) as u64;
        stat.constraints = stat.n - dof;
        Ok(stat)
    }

    /// Sets the number of constraints subtracted from the number of terms
    /// to give the degrees of freedom.
    pub fn with_constraints(mut self, constraints: u64) -> Self {
        self.constraints = constraints;
        self
    }

    /// Adds the term `(observed - expected)² / |expected|`.
    pub fn add(&mut self, observed: f64, expected: f64) -> StatsResult<()> {
        if expected == 0.0 || !expected.is_finite() {
            return Err(StatsError::InvalidArgument(format!(
                "expected count {} must be finite and non-zero",
                expected
            )));
        }
        let d = observed - expected;
        self.accumulate(d * d / expected.abs());
        Ok(())
    }

    /// Adds the term `(observed - expected)² / sigma²`.
    pub fn add_with_sigma(&mut self, observed: f64, expected: f64, sigma: f64) -> StatsResult<()> {
        if sigma == 0.0 || !sigma.is_finite() {
            return Err(StatsError::InvalidArgument(format!(
                "sigma {} must be finite and non-zero",
                sigma
            )));
        }
        let d = observed - expected;
        self.accumulate(d * d / (sigma * sigma));
        Ok(())
    }

    fn accumulate(&mut self, term: f64) {
        let y = term - self.compensation;
        let t = self.total + y;
        self.compensation = (t - self.total) - y;
        self.total = t;
        self.n += 1;
    }

    /// Number of terms.
    pub fn size(&self) -> u64 {
        self.n
    }

    /// Number of constraints.
    pub fn constraints(&self) -> u64 {
        self.constraints
    }

    /// The statistic.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::DatasetTooSmall`] if no term was added.
    pub fn value(&self) -> StatsResult<f64> {
        if self.n == 0 {
            return Err(StatsError::DatasetTooSmall { size: 0, required: 1 });
        }
        Ok(self.total)
    }

    /// Number of terms minus the number of constraints.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::DatasetTooSmall`] unless there are more terms
    /// than constraints.
    pub fn degrees_of_freedom(&self) -> StatsResult<u64> {
        if self.n <= self.constraints {
            return Err(StatsError::DatasetTooSmall {
                size: self.n,
                required: self.constraints + 1,
            });
        }
        Ok(self.n - self.constraints)
    }

    /// The chi-square distribution the statistic follows under the null
    /// hypothesis.
    pub fn distribution(&self) -> StatsResult<ChiSquareDistr> {
        ChiSquareDistr::new(self.degrees_of_freedom()?)
    }

    /// Probability of a statistic at least this large under the null
    /// hypothesis.
    pub fn p_value(&self) -> StatsResult<f64> {
        let value = self.value()?;
        Ok(self.distribution()?.sf(value))
    }
}
