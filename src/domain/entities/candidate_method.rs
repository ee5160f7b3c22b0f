//! # Candidate Method Entity
//!
//! One carrier and service combination quoted for a cart.
//!
//! # Examples
//!
//! ```
//! use estimated_shipping::domain::entities::CandidateMethod;
//! use estimated_shipping::domain::value_objects::Price;
//!
//! let method = CandidateMethod::new("ups", "ground", Price::from_cents(1250))
//!     .with_titles("UPS", "Ground");
//! assert!(method.is_available());
//! assert_eq!(method.key(), "ups_ground");
//! ```

use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{MethodCode, Price};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A shipping method returned by the quote provider.
///
/// Identity is the `carrier_method` key. Values are never mutated after
/// the provider returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMethod {
    /// Carrier code.
    carrier_code: String,
    /// Method code within the carrier.
    method_code: String,
    /// Carrier display title.
    #[serde(default)]
    carrier_title: Option<String>,
    /// Method display title.
    #[serde(default)]
    method_title: Option<String>,
    /// Price excluding tax.
    #[serde(default)]
    amount: Price,
    /// Price including tax; used for ranking.
    price_incl_tax: Price,
    /// Whether the carrier can actually ship this cart.
    #[serde(default = "default_available")]
    available: bool,
    /// Carrier error shown when the method is unavailable.
    #[serde(default)]
    error_message: Option<String>,
}

fn default_available() -> bool {
    true
}

impl CandidateMethod {
    /// Creates an available method whose tax-exclusive amount equals the
    /// tax-inclusive price.
    #[must_use]
    pub fn new(
        carrier_code: impl Into<String>,
        method_code: impl Into<String>,
        price_incl_tax: Price,
    ) -> Self {
        Self {
            carrier_code: carrier_code.into(),
            method_code: method_code.into(),
            carrier_title: None,
            method_title: None,
            amount: price_incl_tax,
            price_incl_tax,
            available: true,
            error_message: None,
        }
    }

    /// Sets the display titles.
    #[must_use]
    pub fn with_titles(
        mut self,
        carrier_title: impl Into<String>,
        method_title: impl Into<String>,
    ) -> Self {
        self.carrier_title = Some(carrier_title.into());
        self.method_title = Some(method_title.into());
        self
    }

    /// Sets the tax-exclusive amount.
    #[must_use]
    pub fn with_amount(mut self, amount: Price) -> Self {
        self.amount = amount;
        self
    }

    /// Marks the method unavailable with the carrier's error message.
    #[must_use]
    pub fn unavailable(mut self, error_message: impl Into<String>) -> Self {
        self.available = false;
        self.error_message = Some(error_message.into());
        self
    }

    /// Returns the carrier code.
    #[inline]
    #[must_use]
    pub fn carrier_code(&self) -> &str {
        &self.carrier_code
    }

    /// Returns the method code.
    #[inline]
    #[must_use]
    pub fn method_code(&self) -> &str {
        &self.method_code
    }

    /// Returns the carrier title.
    #[inline]
    #[must_use]
    pub fn carrier_title(&self) -> Option<&str> {
        self.carrier_title.as_deref()
    }

    /// Returns the method title.
    #[inline]
    #[must_use]
    pub fn method_title(&self) -> Option<&str> {
        self.method_title.as_deref()
    }

    /// Returns the tax-exclusive amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Price {
        self.amount
    }

    /// Returns the tax-inclusive price.
    #[inline]
    #[must_use]
    pub fn price_incl_tax(&self) -> Price {
        self.price_incl_tax
    }

    /// Returns true if the carrier can ship this cart.
    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Returns the carrier error message.
    #[inline]
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the `carrier_method` identity key.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{}", self.carrier_code, self.method_code)
    }

    /// Returns true if this method is identified by `code`.
    #[must_use]
    pub fn matches(&self, code: &MethodCode) -> bool {
        code.is_rendered_by(&self.carrier_code, &self.method_code)
    }

    /// Returns the typed method code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMethodCode` if the provider returned an
    /// empty carrier or method code.
    pub fn code(&self) -> DomainResult<MethodCode> {
        MethodCode::new(self.carrier_code.as_str(), self.method_code.as_str())
    }
}

impl fmt::Display for CandidateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CandidateMethod({} @ {}", self.key(), self.price_incl_tax)?;
        if !self.available {
            write!(f, " unavailable")?;
        }
        write!(f, ")")
    }
}
