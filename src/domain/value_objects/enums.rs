//! # Domain Enums
//!
//! - [`FreeShipping`] - per-item free-shipping flag or free-quantity allowance
//! - [`ErrorCategory`] - category of an entry in a cart's error log

use crate::domain::value_objects::measure::Quantity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-shipping marker set on a line item by promotion rules.
///
/// Serialized the way carts carry it: `false`, `true`, or a number giving
/// how many units of the item ship free.
///
/// # Examples
///
/// ```
/// use estimated_shipping::domain::value_objects::{FreeShipping, Quantity};
///
/// let allowance: FreeShipping = serde_json::from_str("2").unwrap();
/// assert_eq!(allowance, FreeShipping::Allowance(Quantity::from_units(2)));
/// assert_eq!(serde_json::from_str::<FreeShipping>("true").unwrap(), FreeShipping::Full);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "FreeShippingRepr", into = "FreeShippingRepr")]
pub enum FreeShipping {
    /// The item pays for shipping.
    #[default]
    None,
    /// The whole row ships free.
    Full,
    /// This many units ship free; the rest are charged.
    Allowance(Quantity),
}

impl FreeShipping {
    /// Returns true if the whole row ships free.
    #[inline]
    #[must_use]
    pub fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl fmt::Display for FreeShipping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Full => write!(f, "FULL"),
            Self::Allowance(qty) => write!(f, "ALLOWANCE({})", qty),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FreeShippingRepr {
    Flag(bool),
    Allowance(Quantity),
}

impl From<FreeShippingRepr> for FreeShipping {
    fn from(value: FreeShippingRepr) -> Self {
        match value {
            FreeShippingRepr::Flag(true) => Self::Full,
            FreeShippingRepr::Flag(false) => Self::None,
            FreeShippingRepr::Allowance(qty) => Self::Allowance(qty),
        }
    }
}

impl From<FreeShipping> for FreeShippingRepr {
    fn from(value: FreeShipping) -> Self {
        match value {
            FreeShipping::None => Self::Flag(false),
            FreeShipping::Full => Self::Flag(true),
            FreeShipping::Allowance(qty) => Self::Allowance(qty),
        }
    }
}

/// Category of a cart error entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ErrorCategory {
    /// Something failed and the cart may be incomplete.
    Error,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
        }
    }
}
