//! # Weights and Quantities
//!
//! Non-negative decimal measures used by weight aggregation.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{ArithmeticResult, CheckedArithmetic};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative item quantity. Fractional quantities are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    /// Zero quantity.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a quantity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if the value is negative.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidQuantity(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Creates a whole quantity.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Returns the value.
    #[inline]
    #[must_use]
    pub fn get(self) -> Decimal {
        self.0
    }

    /// Returns true if the quantity is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Adds two quantities.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` on overflow.
    pub fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.0.safe_add(rhs.0).map(Self)
    }

    /// Multiplies two quantities.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` on overflow.
    pub fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.0.safe_mul(rhs.0).map(Self)
    }

    /// Subtracts `rhs`, clamping at zero.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        if self.0 > rhs.0 {
            Self(self.0 - rhs.0)
        } else {
            Self::ZERO
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

/// A non-negative weight in the store's weight unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Weight(Decimal);

impl Weight {
    /// Zero weight.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a weight.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeight` if the value is negative.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::InvalidWeight(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Creates a whole weight.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Returns the value.
    #[inline]
    #[must_use]
    pub fn get(self) -> Decimal {
        self.0
    }

    /// Adds two weights.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` on overflow.
    pub fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.0.safe_add(rhs.0).map(Self)
    }

    /// Returns the weight of `qty` units.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` on overflow.
    pub fn times(self, qty: Quantity) -> ArithmeticResult<Self> {
        self.0.safe_mul(qty.0).map(Self)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Weight {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for Decimal {
    fn from(value: Weight) -> Self {
        value.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn quantity_saturating_sub_clamps() {
        let three = Quantity::from_units(3);
        let five = Quantity::from_units(5);
        assert_eq!(five.saturating_sub(three), Quantity::from_units(2));
        assert_eq!(three.saturating_sub(five), Quantity::ZERO);
        assert_eq!(three.saturating_sub(three), Quantity::ZERO);
    }

    #[test]
    fn weight_times_quantity() {
        let weight = Weight::new(Decimal::new(15, 1)).unwrap();
        let row = weight.times(Quantity::from_units(4)).unwrap();
        assert_eq!(row, Weight::from_units(6));
    }

    #[test]
    fn negative_values_rejected() {
        assert!(Weight::new(Decimal::NEGATIVE_ONE).is_err());
        assert!(Quantity::new(Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn display_is_normalized() {
        let weight = Weight::new(Decimal::new(2500, 3)).unwrap();
        assert_eq!(weight.to_string(), "2.5");
    }
}
