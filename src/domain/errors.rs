//! # Domain Errors
//!
//! Validation failures raised while building domain values.
//!
//! # Examples
//!
//! ```
//! use estimated_shipping::domain::errors::DomainError;
//!
//! let err = DomainError::invalid_country("USA");
//! assert!(err.to_string().contains("USA"));
//! ```

use crate::domain::value_objects::arithmetic::ArithmeticError;
use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Country code is not a two-letter ISO 3166-1 code.
    #[error("invalid country code: {0}")]
    InvalidCountry(String),

    /// Shipping method code is not `carrier_method`.
    #[error("invalid shipping method code: {0}")]
    InvalidMethodCode(String),

    /// Price is negative.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Weight is negative.
    #[error("invalid weight: {0}")]
    InvalidWeight(String),

    /// Quantity is negative.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid country error.
    #[must_use]
    pub fn invalid_country(value: impl Into<String>) -> Self {
        Self::InvalidCountry(value.into())
    }

    /// Creates an invalid method code error.
    #[must_use]
    pub fn invalid_method_code(value: impl Into<String>) -> Self {
        Self::InvalidMethodCode(value.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
