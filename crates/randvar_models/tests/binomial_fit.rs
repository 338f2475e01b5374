//! Binomial draws match the exact probability mass function.

use approx::assert_relative_eq;
use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
use randvar_models::distributions::{BinomialIntegerRv, BinomialMode};
use randvar_stats::{BasicStats, ChiSquareStat};

const DRAWS: usize = 100_000;

fn pmf(p: f64, n: u64) -> Vec<f64> {
    let mut probs = Vec::with_capacity(n as usize + 1);
    let mut coefficient = 1.0;
    for k in 0..=n {
        if k > 0 {
            coefficient *= (n - k + 1) as f64 / k as f64;
        }
        probs.push(coefficient * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32));
    }
    probs
}

/// Chi-square p-value of `DRAWS` draws against the exact mass function,
/// pooling bins with an expected count below five into their neighbours.
fn goodness_of_fit(p: f64, n: u64) -> f64 {
    let mut rv = BinomialIntegerRv::new(p, n).unwrap();
    let mut counts = vec![0.0; n as usize + 1];
    for _ in 0..DRAWS {
        counts[rv.next().unwrap() as usize] += 1.0;
    }

    let mut observed = Vec::new();
    let mut expected = Vec::new();
    let (mut o_acc, mut e_acc) = (0.0, 0.0);
    for (o, prob) in counts.iter().zip(pmf(p, n)) {
        o_acc += o;
        e_acc += prob * DRAWS as f64;
        if e_acc >= 5.0 {
            observed.push(o_acc);
            expected.push(e_acc);
            o_acc = 0.0;
            e_acc = 0.0;
        }
    }
    if let (Some(o), Some(e)) = (observed.last_mut(), expected.last_mut()) {
        *o += o_acc;
        *e += e_acc;
    }

    ChiSquareStat::from_counts(&observed, &expected)
        .unwrap()
        .with_constraints(1)
        .p_value()
        .unwrap()
}

#[test]
fn test_table_matches_pmf() {
    for &(p, n) in &[(0.5, 10), (0.2, 25), (0.9, 60)] {
        let p_value = goodness_of_fit(p, n);
        assert!(p_value > 1e-4, "p = {}, n = {}: p-value {}", p, n, p_value);
    }
}

#[test]
fn test_half_of_ten_scenario() {
    let mut rv = BinomialIntegerRv::new(0.5, 10).unwrap();
    let mut stats = BasicStats::sample();
    for _ in 0..DRAWS {
        let v = rv.next().unwrap();
        assert!((0..=10).contains(&v));
        stats.add(f64::from(v));
    }
    assert_relative_eq!(stats.mean().unwrap(), 5.0, epsilon = 0.05);
}

#[test]
fn test_regime_switch_moments() {
    let p = 0.4;
    for n in [60u64, 61] {
        let mut rv = BinomialIntegerRv::new(p, n).unwrap();
        match (n, rv.mode()) {
            (60, BinomialMode::Table(_)) | (61, BinomialMode::Gaussian { .. }) => {}
            (n, mode) => panic!("unexpected mode {} for n = {}", mode.name(), n),
        }
        assert_eq!(rv.maximum(), Some(n as i32));

        let mut stats = BasicStats::sample();
        for _ in 0..DRAWS {
            let v = rv.next().unwrap();
            assert!(v >= 0 && v as u64 <= n);
            stats.add(f64::from(v));
        }
        let mean = n as f64 * p;
        let variance = mean * (1.0 - p);
        assert_relative_eq!(stats.mean().unwrap(), mean, max_relative = 0.01);
        assert_relative_eq!(stats.variance().unwrap(), variance, max_relative = 0.05);
    }
}

#[test]
fn test_poisson_regime_moments() {
    let mut rv = BinomialIntegerRv::new(0.02, 300).unwrap();
    assert!(matches!(rv.mode(), BinomialMode::Poisson { .. }));
    let mut stats = BasicStats::sample();
    for _ in 0..DRAWS {
        stats.add(f64::from(rv.next().unwrap()));
    }
    assert_relative_eq!(stats.mean().unwrap(), 6.0, max_relative = 0.02);
}
