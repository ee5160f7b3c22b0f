//! # Address Entity
//!
//! The cart's shipping address: the destination that gets rated, plus the
//! weight figures and the selected method written onto it while estimating.
//!
//! # Examples
//!
//! ```
//! use estimated_shipping::domain::entities::Address;
//! use estimated_shipping::domain::value_objects::CountryId;
//!
//! let mut address = Address::new();
//! assert!(address.country_id().is_none());
//!
//! address.set_country_id(CountryId::new("US").unwrap());
//! assert_eq!(address.country_id().map(|c| c.as_str()), Some("US"));
//! ```

use crate::domain::entities::customer::CustomerAddress;
use crate::domain::value_objects::{AddressId, CountryId, CustomerAddressId, MethodCode, Quantity, Weight};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Postal fields copied from a customer's address book.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostalDetails {
    /// First name.
    pub firstname: Option<String>,
    /// Last name.
    pub lastname: Option<String>,
    /// Street lines.
    pub street: Vec<String>,
    /// City.
    pub city: Option<String>,
    /// Region or state.
    pub region: Option<String>,
    /// Postal code.
    pub postcode: Option<String>,
    /// Telephone.
    pub telephone: Option<String>,
}

/// Weight and quantity figures produced by weight aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeightTotals {
    /// Total shippable quantity.
    pub quantity: Quantity,
    /// Total shippable weight.
    pub weight: Weight,
    /// Weight left after free-shipping allowances.
    pub free_method_weight: Weight,
}

/// A cart shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Row id; `None` until the address is persisted.
    id: Option<AddressId>,
    /// Back-reference into the customer's address book.
    customer_address_id: Option<CustomerAddressId>,
    /// Destination country.
    country_id: Option<CountryId>,
    /// Postal fields.
    postal: PostalDetails,
    /// Aggregated item figures.
    totals: WeightTotals,
    /// Whether the whole address ships free.
    free_shipping: bool,
    /// Selected shipping method.
    shipping_method: Option<MethodCode>,
    /// Carrier that rate collection is limited to.
    limit_carrier: Option<String>,
}

impl Address {
    /// Creates a blank, not yet persisted address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a blank address with a persisted id.
    #[must_use]
    pub fn persisted(id: AddressId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Sets the country.
    #[must_use]
    pub fn with_country(mut self, country_id: CountryId) -> Self {
        self.country_id = Some(country_id);
        self
    }

    /// Sets the customer address back-reference.
    #[must_use]
    pub fn with_customer_address_id(mut self, id: CustomerAddressId) -> Self {
        self.customer_address_id = Some(id);
        self
    }

    /// Sets the selected shipping method.
    #[must_use]
    pub fn with_shipping_method(mut self, method: MethodCode) -> Self {
        self.shipping_method = Some(method);
        self
    }

    /// Returns the row id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<AddressId> {
        self.id
    }

    /// Returns the customer address back-reference.
    #[inline]
    #[must_use]
    pub fn customer_address_id(&self) -> Option<CustomerAddressId> {
        self.customer_address_id
    }

    /// Returns the country.
    #[inline]
    #[must_use]
    pub fn country_id(&self) -> Option<&CountryId> {
        self.country_id.as_ref()
    }

    /// Sets the country.
    pub fn set_country_id(&mut self, country_id: CountryId) {
        self.country_id = Some(country_id);
    }

    /// Sets `country_id` to `fallback` when the address has none.
    ///
    /// Returns true if the fallback was applied.
    pub fn ensure_country(&mut self, fallback: &CountryId) -> bool {
        if self.country_id.is_some() {
            return false;
        }
        self.country_id = Some(fallback.clone());
        true
    }

    /// Returns the postal fields.
    #[inline]
    #[must_use]
    pub fn postal(&self) -> &PostalDetails {
        &self.postal
    }

    /// Returns the aggregated item figures.
    #[inline]
    #[must_use]
    pub fn totals(&self) -> WeightTotals {
        self.totals
    }

    /// Stores aggregated item figures.
    pub fn set_totals(&mut self, totals: WeightTotals) {
        self.totals = totals;
    }

    /// Returns the total shippable quantity.
    #[inline]
    #[must_use]
    pub fn item_qty(&self) -> Quantity {
        self.totals.quantity
    }

    /// Returns the total shippable weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Weight {
        self.totals.weight
    }

    /// Returns the weight left after free-shipping allowances.
    #[inline]
    #[must_use]
    pub fn free_method_weight(&self) -> Weight {
        self.totals.free_method_weight
    }

    /// Returns true if the whole address ships free.
    #[inline]
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.free_shipping
    }

    /// Sets the address-level free-shipping flag.
    pub fn set_free_shipping(&mut self, free: bool) {
        self.free_shipping = free;
    }

    /// Returns the selected shipping method.
    #[inline]
    #[must_use]
    pub fn shipping_method(&self) -> Option<&MethodCode> {
        self.shipping_method.as_ref()
    }

    /// Sets or clears the selected shipping method.
    pub fn set_shipping_method(&mut self, method: Option<MethodCode>) {
        self.shipping_method = method;
    }

    /// Returns the carrier rate collection is limited to.
    #[inline]
    #[must_use]
    pub fn limit_carrier(&self) -> Option<&str> {
        self.limit_carrier.as_deref()
    }

    /// Limits rate collection to one carrier.
    pub fn set_limit_carrier(&mut self, carrier: impl Into<String>) {
        self.limit_carrier = Some(carrier.into());
    }

    /// Copies a customer address into this address in place.
    ///
    /// The row id is kept; country, postal fields and the back-reference are
    /// replaced.
    pub fn import_customer_address(&mut self, source: &CustomerAddress) {
        self.customer_address_id = Some(source.id());
        self.country_id = Some(source.country_id().clone());
        self.postal = source.postal().clone();
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(")?;
        match self.id {
            Some(id) => write!(f, "#{}", id)?,
            None => write!(f, "new")?,
        }
        if let Some(country) = &self.country_id {
            write!(f, " {}", country)?;
        }
        if let Some(method) = &self.shipping_method {
            write!(f, " method={}", method)?;
        }
        write!(f, ")")
    }
}
