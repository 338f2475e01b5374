//! Expected frequencies for goodness-of-fit reporting.
//!
//! Probability mass functions are evaluated in log space so that large
//! means and trial counts neither underflow nor overflow.

use randvar_stats::special::ln_gamma;
use randvar_stats::{ChiSquareStat, StatsResult};

/// Largest number of bins a reported fit will use.
pub const MAX_BINS: usize = 10_000;

/// Smallest expected count allowed in a bin before it is pooled.
const MIN_EXPECTED: f64 = 5.0;

/// Binomial probabilities for `0..=n`, or `None` for degenerate or very
/// large cases.
pub fn binomial_pmf(prob: f64, n: u64) -> Option<Vec<f64>> {
    if prob <= 0.0 || prob >= 1.0 || n as usize >= MAX_BINS {
        return None;
    }
    let (lp, lq) = (prob.ln(), (1.0 - prob).ln());
    let nf = n as f64;
    let ln_n = ln_gamma(nf + 1.0);
    Some(
        (0..=n)
            .map(|k| {
                let kf = k as f64;
                (ln_n - ln_gamma(kf + 1.0) - ln_gamma(nf - kf + 1.0) + kf * lp + (nf - kf) * lq)
                    .exp()
            })
            .collect(),
    )
}

/// Poisson probabilities for `0..k`, with the final entry holding the
/// whole upper tail from `k - 1`.
pub fn poisson_pmf(mean: f64) -> Option<Vec<f64>> {
    if mean <= 0.0 {
        return None;
    }
    let cutoff = (mean + 10.0 * mean.sqrt() + 10.0).ceil();
    if cutoff >= MAX_BINS as f64 {
        return None;
    }
    let ln_mean = mean.ln();
    let mut probs: Vec<f64> = (0..cutoff as u64)
        .map(|k| {
            let kf = k as f64;
            (kf * ln_mean - mean - ln_gamma(kf + 1.0)).exp()
        })
        .collect();
    let head: f64 = probs.iter().sum();
    probs.push((1.0 - head).max(0.0));
    Some(probs)
}

/// Bernoulli probabilities for `false` (0) and `true` (1).
pub fn bernoulli_pmf(prob: f64) -> Option<Vec<f64>> {
    if prob <= 0.0 || prob >= 1.0 {
        return None;
    }
    Some(vec![1.0 - prob, prob])
}

/// Pools adjacent bins until each expected count reaches five; leftovers
/// join the last pooled bin.
pub fn pool(observed: &[u64], probs: &[f64], total: u64) -> (Vec<f64>, Vec<f64>) {
    let mut pooled_observed = Vec::new();
    let mut pooled_expected = Vec::new();
    let (mut o_acc, mut e_acc) = (0.0, 0.0);
    for (&o, &p) in observed.iter().zip(probs) {
        o_acc += o as f64;
        e_acc += p * total as f64;
        if e_acc >= MIN_EXPECTED {
            pooled_observed.push(o_acc);
            pooled_expected.push(e_acc);
            o_acc = 0.0;
            e_acc = 0.0;
        }
    }
    match (pooled_observed.last_mut(), pooled_expected.last_mut()) {
        (Some(o), Some(e)) => {
            *o += o_acc;
            *e += e_acc;
        }
        _ if e_acc > 0.0 => {
            pooled_observed.push(o_acc);
            pooled_expected.push(e_acc);
        }
        _ => {}
    }
    (pooled_observed, pooled_expected)
}

/// Chi-square statistic of binned counts against `probs`, with one
/// constraint for the fixed total.
///
/// Returns `None` when pooling leaves fewer than two bins.
pub fn chi_square(observed: &[u64], probs: &[f64], total: u64) -> StatsResult<Option<ChiSquareStat>> {
    let (pooled_observed, pooled_expected) = pool(observed, probs, total);
    if pooled_observed.len() < 2 {
        return Ok(None);
    }
    Ok(Some(
        ChiSquareStat::from_counts(&pooled_observed, &pooled_expected)?.with_constraints(1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_binomial_pmf() {
        let probs = binomial_pmf(0.5, 4).unwrap();
        let exact = [1.0, 4.0, 6.0, 4.0, 1.0].map(|c| c / 16.0);
        for (p, e) in probs.iter().zip(exact) {
            assert_relative_eq!(*p, e, epsilon = 1e-12);
        }
        assert!(binomial_pmf(0.0, 10).is_none());
        assert!(binomial_pmf(0.5, MAX_BINS as u64).is_none());
    }

    #[test]
    fn test_poisson_pmf_sums_to_one() {
        for mean in [0.5, 4.0, 900.0] {
            let probs = poisson_pmf(mean).unwrap();
            assert_relative_eq!(probs.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        }
        assert_relative_eq!(poisson_pmf(2.0).unwrap()[0], (-2.0_f64).exp(), epsilon = 1e-12);
        assert!(poisson_pmf(0.0).is_none());
    }

    #[test]
    fn test_pooling_keeps_totals() {
        let observed = [1, 3, 40, 50, 4, 2];
        let probs = [0.01, 0.03, 0.41, 0.49, 0.04, 0.02];
        let (o, e) = pool(&observed, &probs, 100);
        assert_eq!(o, vec![44.0, 50.0, 6.0]);
        for (got, want) in e.iter().zip([45.0, 49.0, 6.0]) {
            assert_relative_eq!(*got, want, epsilon = 1e-9);
        }

        // A short tail joins the last pooled bin.
        let (o, e) = pool(&[10, 1], &[0.9, 0.1], 20);
        assert_eq!(o, vec![11.0]);
        assert_relative_eq!(e[0], 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_bin_has_no_fit() {
        let stat = chi_square(&[3, 1], &[0.5, 0.5], 4).unwrap();
        assert!(stat.is_none());
    }
}
