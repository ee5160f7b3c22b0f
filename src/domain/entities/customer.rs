//! # Customer Entity
//!
//! A customer account and its address book, as read from the customer
//! store.

use crate::domain::entities::address::PostalDetails;
use crate::domain::value_objects::{CountryId, CustomerAddressId, CustomerId};
use serde::{Deserialize, Serialize};

/// An address in a customer's address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddress {
    id: CustomerAddressId,
    country_id: CountryId,
    #[serde(default)]
    postal: PostalDetails,
    #[serde(default)]
    default_shipping: bool,
}

impl CustomerAddress {
    /// Creates a customer address.
    #[must_use]
    pub fn new(id: CustomerAddressId, country_id: CountryId) -> Self {
        Self {
            id,
            country_id,
            postal: PostalDetails::default(),
            default_shipping: false,
        }
    }

    /// Sets the postal details.
    #[must_use]
    pub fn with_postal(mut self, postal: PostalDetails) -> Self {
        self.postal = postal;
        self
    }

    /// Flags this address as the default shipping address.
    #[must_use]
    pub fn as_default_shipping(mut self) -> Self {
        self.default_shipping = true;
        self
    }

    /// Returns the address book id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> CustomerAddressId {
        self.id
    }

    /// Returns the country.
    #[inline]
    #[must_use]
    pub fn country_id(&self) -> &CountryId {
        &self.country_id
    }

    /// Returns the postal details.
    #[inline]
    #[must_use]
    pub fn postal(&self) -> &PostalDetails {
        &self.postal
    }

    /// Returns true if flagged as default shipping address.
    #[inline]
    #[must_use]
    pub fn is_default_shipping(&self) -> bool {
        self.default_shipping
    }
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    #[serde(default)]
    default_shipping: Option<CustomerAddressId>,
    #[serde(default)]
    addresses: Vec<CustomerAddress>,
}

impl Customer {
    /// Creates a customer without addresses.
    #[must_use]
    pub fn new(id: CustomerId) -> Self {
        Self {
            id,
            default_shipping: None,
            addresses: Vec::new(),
        }
    }

    /// Adds an address to the address book.
    #[must_use]
    pub fn with_address(mut self, address: CustomerAddress) -> Self {
        self.addresses.push(address);
        self
    }

    /// Sets the account-level default shipping address id.
    #[must_use]
    pub fn with_default_shipping(mut self, id: CustomerAddressId) -> Self {
        self.default_shipping = Some(id);
        self
    }

    /// Returns the customer id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Returns the address book.
    #[inline]
    #[must_use]
    pub fn addresses(&self) -> &[CustomerAddress] {
        &self.addresses
    }

    /// Returns the address to ship to by default.
    ///
    /// Prefers an address flagged default-shipping (either on the address or
    /// on the account), else the first address. `None` when the address book
    /// is empty.
    #[must_use]
    pub fn preferred_shipping_address(&self) -> Option<&CustomerAddress> {
        self.addresses
            .iter()
            .find(|a| a.default_shipping || Some(a.id) == self.default_shipping)
            .or_else(|| self.addresses.first())
    }
}
