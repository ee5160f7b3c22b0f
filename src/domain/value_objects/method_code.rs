//! # Shipping Method Code
//!
//! The `carrier_method` key that identifies a shipping method on a cart.
//!
//! Codes built from a quote keep the carrier and method parts the provider
//! returned, so either part may contain underscores (`my_carrier_std`).
//! A stored string is split on its first underscore (`ups_GND_RES`), and
//! two codes are compared by their rendered `carrier_method` form.

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Carrier and method pair rendered as `carrier_method`.
///
/// # Examples
///
/// ```
/// use estimated_shipping::domain::value_objects::MethodCode;
///
/// let code: MethodCode = "ups_GND_RES".parse().unwrap();
/// assert_eq!(code.carrier(), "ups");
/// assert_eq!(code.method(), "GND_RES");
/// assert_eq!(code.to_string(), "ups_GND_RES");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MethodCode {
    carrier: String,
    method: String,
}

impl MethodCode {
    /// Creates a method code from its parts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMethodCode` if either part is empty.
    pub fn new(carrier: impl Into<String>, method: impl Into<String>) -> DomainResult<Self> {
        let carrier = carrier.into();
        let method = method.into();
        if carrier.is_empty() || method.is_empty() {
            return Err(DomainError::invalid_method_code(format!(
                "{}_{}",
                carrier, method
            )));
        }
        Ok(Self { carrier, method })
    }

    /// Returns the carrier code.
    #[inline]
    #[must_use]
    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    /// Returns the method code.
    #[inline]
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns true if `carrier` and `method` render to this code.
    #[must_use]
    pub fn is_rendered_by(&self, carrier: &str, method: &str) -> bool {
        rendered_bytes(carrier, method).eq(rendered_bytes(&self.carrier, &self.method))
    }
}

fn rendered_bytes<'a>(carrier: &'a str, method: &'a str) -> impl Iterator<Item = u8> + 'a {
    carrier
        .bytes()
        .chain(std::iter::once(b'_'))
        .chain(method.bytes())
}

impl PartialEq for MethodCode {
    fn eq(&self, other: &Self) -> bool {
        other.is_rendered_by(&self.carrier, &self.method)
    }
}

impl Eq for MethodCode {}

impl Hash for MethodCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in rendered_bytes(&self.carrier, &self.method) {
            state.write_u8(byte);
        }
    }
}

impl fmt::Display for MethodCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.carrier, self.method)
    }
}

impl FromStr for MethodCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('_') {
            Some((carrier, method)) => Self::new(carrier, method),
            None => Err(DomainError::invalid_method_code(s)),
        }
    }
}

impl TryFrom<String> for MethodCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MethodCode> for String {
    fn from(value: MethodCode) -> Self {
        value.to_string()
    }
}
