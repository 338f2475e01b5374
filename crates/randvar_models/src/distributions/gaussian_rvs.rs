//! Correlated Gaussian vectors.
//!
//! Given a covariance matrix `C = L·Lᵀ` and a vector of means `μ`, each draw
//! is
//!
//! ```text
//! x = μ + L·z
//! ```
//!
//! where `z` is a vector of independent standard normals and `L` is the
//! lower-triangular Cholesky factor of `C`.
//!
//! ## Usage
//!
//! ```
//! use randvar_core::traits::RandomVariable;
//! use randvar_models::distributions::GaussianRvs;
//!
//! let cov = vec![vec![4.0, 1.0], vec![1.0, 2.0]];
//! let mut rvs = GaussianRvs::new(&cov, &[10.0, -3.0]).unwrap();
//! assert_eq!(rvs.len(), 2);
//!
//! let x = rvs.next().unwrap();
//! assert_eq!(x.len(), 2);
//! ```

use thiserror::Error;

use randvar_core::rng::static_random;
use randvar_core::traits::RandomVariable;
use randvar_core::types::{Characteristics, RvError, RvResult};

const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Errors raised while factorising a covariance matrix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CovarianceError {
    /// A pivot of the factorisation was not positive.
    #[error("Covariance matrix is not positive definite (pivot {index})")]
    NotPositiveDefinite {
        /// Row at which the factorisation failed
        index: usize,
    },

    /// The matrix or the means vector has the wrong shape.
    #[error("Invalid dimensions: expected {expected}, got {got}")]
    InvalidDimensions {
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// `C[i][j]` and `C[j][i]` differ.
    #[error("Covariance matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row
        i: usize,
        /// Column
        j: usize,
    },
}

impl From<CovarianceError> for RvError {
    fn from(err: CovarianceError) -> Self {
        RvError::InvalidArgument(err.to_string())
    }
}

/// Generator of correlated Gaussian vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianRvs {
    /// Cholesky factor in row-major order
    lower: Vec<f64>,
    means: Vec<f64>,
    n: usize,
}

impl GaussianRvs {
    /// Creates a generator whose dimension is the length of `means`.
    ///
    /// # Errors
    ///
    /// Returns [`CovarianceError`] (as an [`RvError::InvalidArgument`]) if
    /// `cov` is not a symmetric positive-definite matrix matching `means`.
    pub fn new(cov: &[Vec<f64>], means: &[f64]) -> RvResult<Self> {
        Self::with_size(cov, means, means.len())
    }

    /// Creates a generator for the leading `n` components, using the
    /// leading `n × n` block of `cov` and the first `n` means.
    pub fn with_size(cov: &[Vec<f64>], means: &[f64], n: usize) -> RvResult<Self> {
        if means.len() < n {
            return Err(CovarianceError::InvalidDimensions {
                expected: n,
                got: means.len(),
            }
            .into());
        }
        if cov.len() < n {
            return Err(CovarianceError::InvalidDimensions {
                expected: n,
                got: cov.len(),
            }
            .into());
        }
        if let Some(row) = cov[..n].iter().find(|row| row.len() < n) {
            return Err(CovarianceError::InvalidDimensions {
                expected: n,
                got: row.len(),
            }
            .into());
        }
        let lower = cholesky(cov, n)?;
        Ok(Self {
            lower,
            means: means[..n].to_vec(),
            n,
        })
    }

    /// Dimension of each draw.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` for a zero-dimensional generator.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The means.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Element `(i, j)` of the Cholesky factor, or `None` outside the
    /// `len() x len()` matrix.
    pub fn factor(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.lower[i * self.n + j])
        } else {
            None
        }
    }

    /// Writes the next draw into `values`.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::InvalidArgument`] if `values` is shorter than
    /// [`len`](Self::len).
    pub fn next_into(&self, values: &mut [f64]) -> RvResult<()> {
        let n = self.n;
        if values.len() < n {
            return Err(RvError::invalid(format!(
                "output buffer holds {} values, {} required",
                values.len(),
                n
            )));
        }
        let z: Vec<f64> = (0..n).map(|_| static_random::next_gaussian()).collect();
        for (i, value) in values[..n].iter_mut().enumerate() {
            let row = &self.lower[i * n..i * n + i + 1];
            *value = self.means[i] + row.iter().zip(&z).map(|(l, z)| l * z).sum::<f64>();
        }
        Ok(())
    }
}

impl RandomVariable for GaussianRvs {
    type Value = Vec<f64>;

    fn next(&mut self) -> RvResult<Vec<f64>> {
        let mut values = vec![0.0; self.n];
        self.next_into(&mut values)?;
        Ok(values)
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::IMMUTABLE | Characteristics::NONNULL
    }
}

/// Cholesky factor of the leading `n × n` block of `cov`, row-major.
fn cholesky(cov: &[Vec<f64>], n: usize) -> Result<Vec<f64>, CovarianceError> {
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (cov[i][j], cov[j][i]);
            let scale = a.abs().max(b.abs()).max(1.0);
            if (a - b).abs() > SYMMETRY_TOLERANCE * scale {
                return Err(CovarianceError::NotSymmetric { i, j });
            }
        }
    }

    let mut lower = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = cov[i][j];
            for k in 0..j {
                sum -= lower[i * n + k] * lower[j * n + k];
            }
            if i == j {
                if sum <= 0.0 {
                    return Err(CovarianceError::NotPositiveDefinite { index: i });
                }
                lower[i * n + i] = sum.sqrt();
            } else {
                lower[i * n + j] = sum / lower[j * n + j];
            }
        }
    }
    Ok(lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_factor_reproduces_matrix() {
        let cov = vec![
            vec![4.0, 2.0, 0.4],
            vec![2.0, 5.0, 1.0],
            vec![0.4, 1.0, 3.0],
        ];
        let rvs = GaussianRvs::new(&cov, &[0.0; 3]).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let product: f64 = (0..3).map(|k| rvs.factor(i, k).unwrap() * rvs.factor(j, k).unwrap()).sum();
                assert_relative_eq!(product, cov[i][j], epsilon = 1e-12);
            }
        }
        assert_eq!(rvs.factor(0, 1), Some(0.0));
        assert_eq!(rvs.factor(3, 0), None);
        assert_eq!(rvs.factor(0, 3), None);
    }

    #[test]
    fn test_rejects_bad_matrices() {
        let not_pd = vec![vec![1.0, 2.0], vec![2.0, 1.0]];
        assert!(GaussianRvs::new(&not_pd, &[0.0, 0.0]).is_err());
        assert_eq!(
            cholesky(&not_pd, 2),
            Err(CovarianceError::NotPositiveDefinite { index: 1 })
        );

        let asym = vec![vec![1.0, 0.5], vec![0.2, 1.0]];
        assert_eq!(cholesky(&asym, 2), Err(CovarianceError::NotSymmetric { i: 0, j: 1 }));

        let short = vec![vec![1.0]];
        assert!(GaussianRvs::new(&short, &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_leading_block() {
        let cov = vec![vec![1.0, 0.0, 9.0], vec![0.0, 1.0, 9.0], vec![9.0, 9.0, -1.0]];
        let rvs = GaussianRvs::with_size(&cov, &[1.0, 2.0, 3.0], 2).unwrap();
        assert_eq!(rvs.len(), 2);
        assert_eq!(rvs.means(), &[1.0, 2.0]);
    }

    #[test]
    fn test_sample_covariance() {
        let cov = vec![vec![2.0, 0.8], vec![0.8, 1.0]];
        let mut rvs = GaussianRvs::new(&cov, &[1.0, -1.0]).unwrap();
        let n = 100_000;
        let draws: Vec<Vec<f64>> = (0..n).map(|_| rvs.next().unwrap()).collect();
        let mean0 = draws.iter().map(|d| d[0]).sum::<f64>() / n as f64;
        let mean1 = draws.iter().map(|d| d[1]).sum::<f64>() / n as f64;
        let c01 = draws
            .iter()
            .map(|d| (d[0] - mean0) * (d[1] - mean1))
            .sum::<f64>()
            / (n - 1) as f64;
        assert_relative_eq!(mean0, 1.0, epsilon = 0.03);
        assert_relative_eq!(mean1, -1.0, epsilon = 0.03);
        assert_relative_eq!(c01, 0.8, epsilon = 0.03);
    }

    #[test]
    fn test_next_into_checks_buffer() {
        let rvs = GaussianRvs::new(&[vec![1.0]], &[0.0]).unwrap();
        let mut buf = [0.0; 0];
        assert!(rvs.next_into(&mut buf).is_err());
    }
}
