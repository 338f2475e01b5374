//! Type-erased random variables and named slots holding them.
//!
//! Code that configures random variables by name (a simulation reading a
//! parameter file, say) needs a single type for "any random variable".
//! [`AnyRandomVariable`] is that type and [`RvSlot`] is a named place to
//! install one and retrieve it again.
//!
//! ```rust
//! use randvar_models::distributions::{FixedBooleanRv, UniformIntegerRv};
//! use randvar_models::slot::{AnyRandomVariable, RvSlot, RvValue};
//!
//! let mut slot = RvSlot::new("arrivals");
//! slot.set_rv(AnyRandomVariable::integer(UniformIntegerRv::new(0, true, 5, false).unwrap()));
//!
//! let rv = slot.random_variable_mut().unwrap();
//! rv.tighten_maximum_str("2", true).unwrap();
//! match rv.next_value().unwrap() {
//!     RvValue::Integer(v) => assert!((0..=2).contains(&v)),
//!     other => panic!("unexpected {:?}", other),
//! }
//!
//! let mut flag = AnyRandomVariable::boolean(FixedBooleanRv::new(true));
//! assert!(flag.tighten_minimum_str("0", true).is_err());
//! ```

use std::any::type_name;
use std::fmt;

use randvar_core::traits::{OrderedRandomVariable, RandomVariable};
use randvar_core::types::{Characteristics, RvError, RvResult};

/// A value drawn from an [`AnyRandomVariable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RvValue {
    /// From a double-valued variable
    Double(f64),
    /// From an integer-valued variable
    Integer(i32),
    /// From a long-valued variable
    Long(i64),
    /// From a boolean-valued variable
    Boolean(bool),
}

impl RvValue {
    /// The value as `f64`; booleans map to 0 and 1.
    pub fn as_f64(self) -> f64 {
        match self {
            RvValue::Double(v) => v,
            RvValue::Integer(v) => f64::from(v),
            RvValue::Long(v) => v as f64,
            RvValue::Boolean(v) => {
                if v {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

impl fmt::Display for RvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RvValue::Double(v) => write!(f, "{}", v),
            RvValue::Integer(v) => write!(f, "{}", v),
            RvValue::Long(v) => write!(f, "{}", v),
            RvValue::Boolean(v) => write!(f, "{}", v),
        }
    }
}

/// A random variable of any supported value type.
pub enum AnyRandomVariable {
    /// Double-valued
    Double(Box<dyn OrderedRandomVariable<f64>>),
    /// Integer-valued
    Integer(Box<dyn OrderedRandomVariable<i32>>),
    /// Long-valued
    Long(Box<dyn OrderedRandomVariable<i64>>),
    /// Boolean-valued; has no ordering
    Boolean(Box<dyn RandomVariable<Value = bool>>),
}

impl AnyRandomVariable {
    /// Wraps a double-valued random variable.
    pub fn double(rv: impl OrderedRandomVariable<f64> + 'static) -> Self {
        AnyRandomVariable::Double(Box::new(rv))
    }

    /// Wraps an integer-valued random variable.
    pub fn integer(rv: impl OrderedRandomVariable<i32> + 'static) -> Self {
        AnyRandomVariable::Integer(Box::new(rv))
    }

    /// Wraps a long-valued random variable.
    pub fn long(rv: impl OrderedRandomVariable<i64> + 'static) -> Self {
        AnyRandomVariable::Long(Box::new(rv))
    }

    /// Wraps a boolean-valued random variable.
    pub fn boolean(rv: impl RandomVariable<Value = bool> + 'static) -> Self {
        AnyRandomVariable::Boolean(Box::new(rv))
    }

    /// Name of the value type, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            AnyRandomVariable::Double(_) => "double",
            AnyRandomVariable::Integer(_) => "integer",
            AnyRandomVariable::Long(_) => "long",
            AnyRandomVariable::Boolean(_) => "boolean",
        }
    }

    /// Draws the next value.
    pub fn next_value(&mut self) -> RvResult<RvValue> {
        match self {
            AnyRandomVariable::Double(rv) => rv.next().map(RvValue::Double),
            AnyRandomVariable::Integer(rv) => rv.next().map(RvValue::Integer),
            AnyRandomVariable::Long(rv) => rv.next().map(RvValue::Long),
            AnyRandomVariable::Boolean(rv) => rv.next().map(RvValue::Boolean),
        }
    }

    /// Narrows the minimum, parsing `min` in the variable's value type.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::Unsupported`] for boolean variables and
    /// [`RvError::Parse`] if `min` is not a valid literal.
    pub fn tighten_minimum_str(&mut self, min: &str, closed: bool) -> RvResult<()> {
        match self {
            AnyRandomVariable::Double(rv) => rv.tighten_minimum_str(min, closed),
            AnyRandomVariable::Integer(rv) => rv.tighten_minimum_str(min, closed),
            AnyRandomVariable::Long(rv) => rv.tighten_minimum_str(min, closed),
            AnyRandomVariable::Boolean(_) => Err(RvError::Unsupported(
                "boolean random variables have no minimum".to_string(),
            )),
        }
    }

    /// Narrows the maximum, parsing `max` in the variable's value type.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::Unsupported`] for boolean variables and
    /// [`RvError::Parse`] if `max` is not a valid literal.
    pub fn tighten_maximum_str(&mut self, max: &str, closed: bool) -> RvResult<()> {
        match self {
            AnyRandomVariable::Double(rv) => rv.tighten_maximum_str(max, closed),
            AnyRandomVariable::Integer(rv) => rv.tighten_maximum_str(max, closed),
            AnyRandomVariable::Long(rv) => rv.tighten_maximum_str(max, closed),
            AnyRandomVariable::Boolean(_) => Err(RvError::Unsupported(
                "boolean random variables have no maximum".to_string(),
            )),
        }
    }
}

impl fmt::Debug for AnyRandomVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyRandomVariable")
            .field("kind", &self.kind())
            .field("characteristics", &self.characteristics())
            .finish()
    }
}

impl RandomVariable for AnyRandomVariable {
    type Value = RvValue;

    fn next(&mut self) -> RvResult<RvValue> {
        self.next_value()
    }

    /// Boxed variables cannot be duplicated, so this always fails.
    fn try_clone(&self) -> RvResult<Self> {
        Err(RvError::CloneNotSupported {
            type_name: type_name::<Self>(),
        })
    }

    fn characteristics(&self) -> Characteristics {
        match self {
            AnyRandomVariable::Double(rv) => rv.characteristics(),
            AnyRandomVariable::Integer(rv) => rv.characteristics(),
            AnyRandomVariable::Long(rv) => rv.characteristics(),
            AnyRandomVariable::Boolean(rv) => rv.characteristics(),
        }
    }
}

/// A named place holding at most one random variable.
#[derive(Debug)]
pub struct RvSlot {
    name: String,
    rv: Option<AnyRandomVariable>,
}

impl RvSlot {
    /// Creates an empty slot.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rv: None,
        }
    }

    /// The slot's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Installs `rv`, returning the variable it replaces.
    pub fn set_rv(&mut self, rv: AnyRandomVariable) -> Option<AnyRandomVariable> {
        self.rv.replace(rv)
    }

    /// Removes and returns the installed variable.
    pub fn take_rv(&mut self) -> Option<AnyRandomVariable> {
        self.rv.take()
    }

    /// The installed variable.
    pub fn random_variable(&self) -> Option<&AnyRandomVariable> {
        self.rv.as_ref()
    }

    /// The installed variable, mutably.
    pub fn random_variable_mut(&mut self) -> Option<&mut AnyRandomVariable> {
        self.rv.as_mut()
    }

    /// Draws from the installed variable.
    ///
    /// # Errors
    ///
    /// Returns [`RvError::Unsupported`] if the slot is empty.
    pub fn next_value(&mut self) -> RvResult<RvValue> {
        match self.rv.as_mut() {
            Some(rv) => rv.next_value(),
            None => Err(RvError::Unsupported(format!(
                "no random variable installed in '{}'",
                self.name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{DetermLongRv, FixedDoubleRv, UniformBooleanRv};

    #[test]
    fn test_boolean_bounds_unsupported() {
        let mut rv = AnyRandomVariable::boolean(UniformBooleanRv::new());
        assert!(matches!(
            rv.tighten_minimum_str("1", true),
            Err(RvError::Unsupported(_))
        ));
        assert!(matches!(
            rv.tighten_maximum_str("1", true),
            Err(RvError::Unsupported(_))
        ));
        assert!(matches!(rv.next_value(), Ok(RvValue::Boolean(_))));
    }

    #[test]
    fn test_string_bounds_parse_per_type() {
        let mut rv = AnyRandomVariable::double(FixedDoubleRv::new(2.0));
        rv.tighten_minimum_str("1.5", true).unwrap();
        assert!(matches!(rv.tighten_maximum_str("abc", true), Err(RvError::Parse { .. })));
        assert!(rv.tighten_maximum_str("1.9", true).is_err());
        assert_eq!(rv.next_value().unwrap(), RvValue::Double(2.0));
    }

    #[test]
    fn test_ordered_passes_through() {
        let rv = AnyRandomVariable::long(DetermLongRv::cycle(vec![1, 2, 3]).unwrap());
        assert!(rv.is_ordered());
        assert!(rv.try_clone().is_err());
    }

    #[test]
    fn test_slot_install_and_replace() {
        let mut slot = RvSlot::new("service time");
        assert_eq!(slot.name(), "service time");
        assert!(slot.random_variable().is_none());
        assert!(slot.next_value().is_err());

        assert!(slot.set_rv(AnyRandomVariable::double(FixedDoubleRv::new(1.0))).is_none());
        let old = slot.set_rv(AnyRandomVariable::double(FixedDoubleRv::new(2.0)));
        assert_eq!(old.map(|rv| rv.kind()), Some("double"));
        assert_eq!(slot.next_value().unwrap().as_f64(), 2.0);
        assert!(slot.take_rv().is_some());
        assert!(slot.random_variable().is_none());
    }
}
