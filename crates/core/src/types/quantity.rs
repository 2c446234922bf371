//! Line-item quantities.
//!
//! A [`Quantity`] is always at least one. Zero and negative quantities are
//! unrepresentable, so the cart never has to check for them.

use core::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// Quantities start at one.
    #[error("quantity must be at least 1")]
    Zero,
}

/// Number of units of one product in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// The smallest quantity.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// The largest quantity.
    pub const MAX: Self = Self(NonZeroU32::MAX);

    /// Create a quantity from a raw count.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] for `0`.
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        NonZeroU32::new(value).map(Self).ok_or(QuantityError::Zero)
    }

    /// Create a quantity from untrusted input, clamping into `1..=u32::MAX`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        u32::try_from(value.max(1))
            .ok()
            .and_then(NonZeroU32::new)
            .map_or(Self::MAX, Self)
    }

    /// The raw count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit, saturating at [`Self::MAX`].
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer unit, or `None` when already at one.
    #[must_use]
    pub fn decrement(self) -> Option<Self> {
        NonZeroU32::new(self.get() - 1).map(Self)
    }

    /// One fewer unit, stopping at one.
    #[must_use]
    pub fn decrement_or_one(self) -> Self {
        self.decrement().unwrap_or(Self::ONE)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(Quantity::new(0), Err(QuantityError::Zero));
        assert_eq!(Quantity::new(1), Ok(Quantity::ONE));
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Quantity::clamped(-5).get(), 1);
        assert_eq!(Quantity::clamped(0).get(), 1);
        assert_eq!(Quantity::clamped(7).get(), 7);
        assert_eq!(Quantity::clamped(i64::MAX), Quantity::MAX);
    }

    #[test]
    fn test_decrement_floor() {
        assert_eq!(Quantity::ONE.decrement(), None);
        assert_eq!(Quantity::ONE.decrement_or_one(), Quantity::ONE);
        assert_eq!(Quantity::new(2).unwrap().decrement(), Some(Quantity::ONE));
    }

    #[test]
    fn test_increment_saturates() {
        assert_eq!(Quantity::ONE.increment().get(), 2);
        assert_eq!(Quantity::MAX.increment(), Quantity::MAX);
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);
    }
}
