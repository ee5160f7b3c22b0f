//! # Country Code
//!
//! ISO 3166-1 alpha-2 country code of a shipping destination.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Two-letter, upper-case ISO 3166-1 country code.
///
/// # Examples
///
/// ```
/// use estimated_shipping::domain::value_objects::CountryId;
///
/// let us = CountryId::new("us").unwrap();
/// assert_eq!(us.as_str(), "US");
/// assert!(CountryId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryId(String);

impl CountryId {
    /// Creates a country code, normalising to upper case.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCountry` unless the value is exactly two
    /// ASCII letters.
    pub fn new(code: impl AsRef<str>) -> DomainResult<Self> {
        let code = code.as_ref().trim();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::invalid_country(code));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Creates a country code from a literal known to be valid.
    pub(crate) fn from_static(code: &'static str) -> Self {
        Self(code.to_ascii_uppercase())
    }

    /// Returns the country code.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CountryId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CountryId> for String {
    fn from(value: CountryId) -> Self {
        value.0
    }
}
