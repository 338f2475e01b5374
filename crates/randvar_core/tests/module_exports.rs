//! Integration tests for module exports.
//!
//! Verify that the public modules and types are reachable via absolute
//! paths.

use randvar_core::range::{Bound, RangeConstraint, RangeValue};
use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
use randvar_core::types::{Characteristics, RvError, RvResult};

#[derive(Clone)]
struct Constant {
    value: i64,
    range: RangeConstraint<i64>,
}

impl RandomVariable for Constant {
    type Value = i64;

    fn next(&mut self) -> RvResult<i64> {
        Ok(self.value)
    }

    fn try_clone(&self) -> RvResult<Self> {
        Ok(self.clone())
    }
}

impl OrderedRandomVariable<i64> for Constant {
    fn range(&self) -> &RangeConstraint<i64> {
        &self.range
    }

    fn range_mut(&mut self) -> &mut RangeConstraint<i64> {
        &mut self.range
    }
}

/// Test that the trait hierarchy is usable from outside the crate.
#[test]
fn test_traits_module_exports() {
    use randvar_core::traits::LongRandomVariable;

    fn draw<R: LongRandomVariable>(rv: &mut R) -> i64 {
        rv.next().unwrap()
    }

    let mut rv = Constant {
        value: 4,
        range: RangeConstraint::new(),
    };
    assert_eq!(draw(&mut rv), 4);
    assert!(!rv.is_ordered());
    assert_eq!(rv.characteristics(), Characteristics::DEFAULT);
}

/// Test the string-form tightening provided by the trait.
#[test]
fn test_tighten_with_strings() {
    let mut rv = Constant {
        value: 4,
        range: RangeConstraint::new(),
    };
    rv.tighten_minimum_str("2", true).unwrap();
    rv.tighten_maximum_str(" 9 ", false).unwrap();
    assert_eq!(rv.minimum(), Some(2));
    assert_eq!(rv.maximum(), Some(9));
    assert_eq!(rv.maximum_closed(), Some(false));

    let err = rv.tighten_minimum_str("two", true).unwrap_err();
    assert!(matches!(err, RvError::Parse { .. }));
}

/// Test that boxed ordered variables are object safe.
#[test]
fn test_ordered_trait_object() {
    let mut boxed: Box<dyn OrderedRandomVariable<i64>> = Box::new(Constant {
        value: 7,
        range: RangeConstraint::new(),
    });
    boxed.set_minimum(Some(0), true).unwrap();
    assert_eq!(boxed.next().unwrap(), 7);
    assert!(boxed.range_test_needed());
    assert!(boxed.range_test_failed(-1));
}

/// Test range module exports.
#[test]
fn test_range_module_exports() {
    let bound = Bound::new(1.5_f64, false);
    assert!(bound.excludes_below(1.5));
    assert!(!bound.excludes_above(1.0));
    assert_eq!(f64::parse_value("1.5").unwrap(), 1.5);
}

/// Test rng module exports.
#[test]
fn test_rng_module_exports() {
    use randvar_core::rng::static_random;
    use randvar_core::rng::{RngQuality, RvConfig, MAX_SPLIT_DEPTH};

    let config = RvConfig::builder()
        .quality(RngQuality::Fast)
        .max_split_depth(MAX_SPLIT_DEPTH)
        .build()
        .unwrap();
    assert_eq!(config.max_split_depth(), Some(63));
    assert!(static_random::next_double() < 1.0);
}
