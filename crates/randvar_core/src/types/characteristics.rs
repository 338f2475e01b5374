//! Sequence characteristics.
//!
//! A small bitset describing the values a random variable produces when it
//! is consumed as a sequence. The flag values follow the conventional
//! spliterator encoding so that they can be logged and compared
//! unambiguously.

use std::fmt;
use std::ops::BitOr;

/// Bitset of sequence characteristics.
///
/// The flag that matters for correctness is [`Characteristics::ORDERED`]:
/// a variable whose output order is significant (a deterministic sequence,
/// or a composite built from one) must never be split for parallel
/// consumption.
///
/// # Examples
/// ```
/// use randvar_core::types::Characteristics;
///
/// let c = Characteristics::DEFAULT | Characteristics::ORDERED;
/// assert!(c.contains(Characteristics::ORDERED));
/// assert!(!c.contains(Characteristics::SIZED));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Characteristics(u32);

impl Characteristics {
    /// Values are distinct.
    pub const DISTINCT: Self = Self(0x0000_0001);
    /// Values are produced in sorted order.
    pub const SORTED: Self = Self(0x0000_0004);
    /// Encounter order is significant.
    pub const ORDERED: Self = Self(0x0000_0010);
    /// The exact number of remaining values is known.
    pub const SIZED: Self = Self(0x0000_0040);
    /// Values are never absent.
    pub const NONNULL: Self = Self(0x0000_0100);
    /// The source cannot be structurally modified during traversal.
    pub const IMMUTABLE: Self = Self(0x0000_0400);
    /// The source may be modified concurrently.
    pub const CONCURRENT: Self = Self(0x0000_1000);
    /// Splits are themselves sized.
    pub const SUBSIZED: Self = Self(0x0000_4000);

    /// Characteristics reported by a random variable unless it overrides them.
    pub const DEFAULT: Self = Self(Self::IMMUTABLE.0 | Self::NONNULL.0);

    /// The empty set.
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every flag in `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `self` with every flag in `other` cleared.
    #[inline]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for Characteristics {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for Characteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Characteristics, &str); 8] = [
            (Characteristics::DISTINCT, "DISTINCT"),
            (Characteristics::SORTED, "SORTED"),
            (Characteristics::ORDERED, "ORDERED"),
            (Characteristics::SIZED, "SIZED"),
            (Characteristics::NONNULL, "NONNULL"),
            (Characteristics::IMMUTABLE, "IMMUTABLE"),
            (Characteristics::CONCURRENT, "CONCURRENT"),
            (Characteristics::SUBSIZED, "SUBSIZED"),
        ];
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "Characteristics({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let c = Characteristics::DEFAULT;
        assert!(c.contains(Characteristics::IMMUTABLE));
        assert!(c.contains(Characteristics::NONNULL));
        assert!(!c.contains(Characteristics::ORDERED));
    }

    #[test]
    fn test_union_and_without() {
        let sized = Characteristics::DEFAULT | Characteristics::SIZED | Characteristics::SUBSIZED;
        assert!(sized.contains(Characteristics::SIZED | Characteristics::SUBSIZED));

        let unsized_ = sized.without(Characteristics::SIZED | Characteristics::SUBSIZED);
        assert_eq!(unsized_, Characteristics::DEFAULT);
        assert!(Characteristics::empty().contains(Characteristics::empty()));
    }

    #[test]
    fn test_debug_lists_flags() {
        let c = Characteristics::ORDERED | Characteristics::SIZED;
        assert_eq!(format!("{:?}", c), "Characteristics(ORDERED | SIZED)");
    }
}
