//! The seam between an RV-of-RV and the distribution it builds.

use std::any::type_name;

use crate::traits::RandomVariable;
use crate::types::{RvError, RvResult};

/// Builds one child random variable per call from parameter draws.
///
/// A generator owns clones of its parameter random variables. Each
/// [`generate`](Self::generate) draws one value from every parameter and
/// constructs a fresh child distribution from them.
pub trait RvGenerator: Send {
    /// The distribution produced on each call.
    type Child: RandomVariable;

    /// Draws parameters and constructs a child.
    ///
    /// # Errors
    ///
    /// Propagates parameter draw failures and child construction failures.
    fn generate(&mut self) -> RvResult<Self::Child>;

    /// Returns `true` if any parameter variable is ordered.
    fn is_ordered(&self) -> bool;

    /// Duplicates the generator and its parameter variables.
    fn try_clone(&self) -> RvResult<Self>
    where
        Self: Sized;
}

/// Returns `true` if any of the flags is set.
///
/// Used by composite variables: a single order-sensitive parameter makes
/// the composite order-sensitive.
#[inline]
pub fn determine_if_ordered(flags: &[bool]) -> bool {
    flags.iter().any(|&ordered| ordered)
}

/// Clones a parameter random variable for exclusive use by a composite.
///
/// # Errors
///
/// Returns [`RvError::CloneNotSupported`] naming the parameter type if the
/// variable cannot be duplicated.
pub fn clone_parameter<P: RandomVariable>(param: &P) -> RvResult<P> {
    param.try_clone().map_err(|_| RvError::CloneNotSupported {
        type_name: type_name::<P>(),
    })
}
