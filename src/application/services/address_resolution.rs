//! # Address Resolution
//!
//! Decides which address a cart is rated against.
//!
//! Rules are tried in order and the first match wins:
//!
//! 1. Customer carts reuse a saved shipping address that already points at
//!    a customer address; otherwise the customer's preferred address is
//!    switched to (if the cart holds a copy) or imported.
//! 2. A saved shipping address with a country is reused unchanged.
//! 3. Anything else gets the store's default country.
//!
//! A customer without addresses, or unknown to the repository, falls
//! through to rules 2 and 3.

use crate::application::error::ApplicationResult;
use crate::domain::entities::{Cart, CustomerAddress};
use crate::domain::value_objects::{CountryId, CustomerId};
use crate::infrastructure::persistence::CustomerRepository;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Which rule produced the resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressSource {
    /// The saved shipping address already referenced a customer address.
    ExistingCustomerAddress,
    /// Switched to a copy of the customer address saved on the cart.
    SavedCartAddress,
    /// Imported the customer address into the shipping address.
    ImportedCustomerAddress,
    /// The saved shipping address was reused as is.
    ExistingCartAddress,
    /// The shipping address was kept and given the store default country
    /// if it had none.
    StoreDefault,
}

impl fmt::Display for AddressSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ExistingCustomerAddress => "existing_customer_address",
            Self::SavedCartAddress => "saved_cart_address",
            Self::ImportedCustomerAddress => "imported_customer_address",
            Self::ExistingCartAddress => "existing_cart_address",
            Self::StoreDefault => "store_default",
        };
        f.write_str(name)
    }
}

/// Picks and installs the shipping address of a cart.
#[derive(Debug, Clone)]
pub struct AddressResolver {
    customers: Arc<dyn CustomerRepository>,
}

impl AddressResolver {
    /// Creates a resolver reading customers from `customers`.
    #[must_use]
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    /// Resolves the shipping address of `cart` in place.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if the customer lookup fails.
    /// An unknown customer is not an error.
    pub fn resolve(
        &self,
        cart: &mut Cart,
        default_country: &CountryId,
    ) -> ApplicationResult<AddressSource> {
        if let Some(customer_id) = cart.customer_id() {
            let current = cart.shipping_address();
            if current.id().is_some() && current.customer_address_id().is_some() {
                debug!(%customer_id, "reusing saved customer shipping address");
                return Ok(AddressSource::ExistingCustomerAddress);
            }

            if let Some(address) = self.customer_address(customer_id)? {
                if cart.switch_to_customer_address(address.id()) {
                    debug!(%customer_id, customer_address_id = %address.id(), "switched to saved cart address");
                    return Ok(AddressSource::SavedCartAddress);
                }
                cart.shipping_address_mut().import_customer_address(&address);
                debug!(%customer_id, customer_address_id = %address.id(), "imported customer address");
                return Ok(AddressSource::ImportedCustomerAddress);
            }
        }

        let current = cart.shipping_address();
        if current.id().is_some() && current.country_id().is_some() {
            debug!("reusing saved cart shipping address");
            return Ok(AddressSource::ExistingCartAddress);
        }

        if cart.shipping_address_mut().ensure_country(default_country) {
            debug!(country = %default_country, "applied store default country");
        }
        Ok(AddressSource::StoreDefault)
    }

    fn customer_address(
        &self,
        customer_id: CustomerId,
    ) -> ApplicationResult<Option<CustomerAddress>> {
        let Some(customer) = self.customers.get(customer_id)? else {
            debug!(%customer_id, "customer not found");
            return Ok(None);
        };
        let address = customer.preferred_shipping_address().cloned();
        if address.is_none() {
            debug!(%customer_id, "customer has no addresses");
        }
        Ok(address)
    }
}
