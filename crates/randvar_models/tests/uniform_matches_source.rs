//! The unit uniform variable returns the shared source's doubles unchanged.
//!
//! Single test in its own binary: the check re-seeds the process-wide
//! source.

use randvar_core::rng::static_random;
use randvar_core::traits::RandomVariable;
use randvar_models::distributions::UniformDoubleRv;

#[test]
fn test_unit_interval_replays_source() {
    static_random::set_seed(31_337);
    let raw: Vec<f64> = (0..64).map(|_| static_random::next_double()).collect();

    static_random::set_seed(31_337);
    let mut rv = UniformDoubleRv::new(0.0, true, 1.0, false).unwrap();
    let drawn: Vec<f64> = rv.stream(64).collect::<Result<_, _>>().unwrap();
    assert_eq!(drawn, raw);

    static_random::set_seed(31_337);
    let mut unit = UniformDoubleRv::unit();
    assert_eq!(unit.next().unwrap(), raw[0]);
}
