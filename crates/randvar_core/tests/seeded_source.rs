//! Reproducibility of the shared source.
//!
//! Kept in its own test binary with a single test: any concurrent draw
//! would shift the sequence.

use randvar_core::rng::{static_random, RngQuality, RvConfig};

#[test]
fn test_seed_reproduces_sequence_in_both_qualities() {
    static_random::set_seed(2024);
    let first: Vec<f64> = (0..16).map(|_| static_random::next_double()).collect();
    static_random::set_seed(2024);
    let second: Vec<f64> = (0..16).map(|_| static_random::next_double()).collect();
    assert_eq!(first, second);

    static_random::maximize_quality();
    assert!(static_random::is_high_quality());
    static_random::set_seed(7);
    let a = static_random::next_gaussian();
    static_random::set_seed(7);
    assert_eq!(static_random::next_gaussian(), a);
    assert!(static_random::is_high_quality());

    let config = RvConfig::builder()
        .seed(99)
        .quality(RngQuality::Fast)
        .max_split_depth(0)
        .build()
        .unwrap();
    static_random::configure(&config);
    assert!(!static_random::is_high_quality());
    assert_eq!(static_random::split_depth(), 0);
    let x = static_random::next_long();
    static_random::configure(&config);
    assert_eq!(static_random::next_long(), x);
}
