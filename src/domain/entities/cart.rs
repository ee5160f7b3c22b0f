//! # Cart Aggregate
//!
//! The in-progress order an estimate is computed for.
//!
//! A cart owns its shipping address, addresses previously saved on it, the
//! line items, one list of shipping assignments and an error log. Changing
//! the assignments marks totals stale so the host recollects them.
//!
//! # Examples
//!
//! ```
//! use estimated_shipping::domain::entities::{Cart, ShippingAssignment};
//! use estimated_shipping::domain::value_objects::{CartId, StoreId};
//!
//! let mut cart = Cart::new(Some(CartId::new(7)), StoreId::default());
//! cart.mark_totals_collected();
//! assert!(cart.totals_collected());
//!
//! cart.set_shipping_assignments(vec![ShippingAssignment::new()]);
//! assert!(!cart.totals_collected());
//! ```

use crate::domain::entities::address::Address;
use crate::domain::entities::line_item::LineItem;
use crate::domain::value_objects::{
    CartId, CustomerAddressId, CustomerId, ErrorCategory, ItemId, MethodCode, StoreId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address and method carried by a shipping assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipping {
    /// Snapshot of the address the method applies to.
    pub address: Address,
    /// Selected method.
    pub method: Option<MethodCode>,
}

/// Groups the shipping selection with the items it covers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingAssignment {
    /// Address and method.
    pub shipping: Option<Shipping>,
    /// Items covered by this assignment.
    pub items: Vec<ItemId>,
}

impl ShippingAssignment {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the assigned method.
    #[must_use]
    pub fn method(&self) -> Option<&MethodCode> {
        self.shipping.as_ref().and_then(|s| s.method.as_ref())
    }
}

/// Structured entry in a cart's error log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartErrorInfo {
    /// Error category.
    pub category: ErrorCategory,
    /// Component that reported the error.
    pub origin: String,
    /// Machine-readable code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for CartErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.category, self.origin, self.code, self.message
        )
    }
}

/// An in-progress order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Row id; `None` for a cart that was never saved.
    #[serde(default)]
    id: Option<CartId>,
    #[serde(default)]
    store_id: StoreId,
    #[serde(default)]
    customer_id: Option<CustomerId>,
    #[serde(default)]
    shipping_address: Address,
    /// Other addresses saved on the cart, e.g. from earlier checkouts.
    #[serde(default)]
    saved_addresses: Vec<Address>,
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    shipping_assignments: Vec<ShippingAssignment>,
    #[serde(default)]
    totals_collected: bool,
    #[serde(default)]
    errors: Vec<CartErrorInfo>,
}

impl Cart {
    /// Creates an empty guest cart with a blank shipping address.
    #[must_use]
    pub fn new(id: Option<CartId>, store_id: StoreId) -> Self {
        Self {
            id,
            store_id,
            customer_id: None,
            shipping_address: Address::new(),
            saved_addresses: Vec::new(),
            items: Vec::new(),
            shipping_assignments: Vec::new(),
            totals_collected: false,
            errors: Vec::new(),
        }
    }

    /// Assigns the cart to a customer.
    #[must_use]
    pub fn with_customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Sets the shipping address.
    #[must_use]
    pub fn with_shipping_address(mut self, address: Address) -> Self {
        self.shipping_address = address;
        self
    }

    /// Adds an address saved on the cart.
    #[must_use]
    pub fn with_saved_address(mut self, address: Address) -> Self {
        self.saved_addresses.push(address);
        self
    }

    /// Returns the cart id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<CartId> {
        self.id
    }

    /// Returns the store the cart belongs to.
    #[inline]
    #[must_use]
    pub fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    /// Returns the customer id.
    #[inline]
    #[must_use]
    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    /// Returns the shipping address.
    #[inline]
    #[must_use]
    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    /// Returns the shipping address mutably.
    #[inline]
    pub fn shipping_address_mut(&mut self) -> &mut Address {
        &mut self.shipping_address
    }

    /// Returns addresses saved on the cart besides the shipping address.
    #[inline]
    #[must_use]
    pub fn saved_addresses(&self) -> &[Address] {
        &self.saved_addresses
    }

    /// Makes the saved address for `id` the shipping address.
    ///
    /// The previous shipping address is kept among the saved addresses when
    /// it was persisted. Returns false if no saved address matches.
    pub fn switch_to_customer_address(&mut self, id: CustomerAddressId) -> bool {
        let Some(pos) = self
            .saved_addresses
            .iter()
            .position(|a| a.customer_address_id() == Some(id))
        else {
            return false;
        };
        let selected = self.saved_addresses.remove(pos);
        let previous = std::mem::replace(&mut self.shipping_address, selected);
        if previous.id().is_some() {
            self.saved_addresses.push(previous);
        }
        true
    }

    /// Adds a line item.
    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Returns the line items.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the line items mutably.
    #[inline]
    pub fn items_mut(&mut self) -> &mut [LineItem] {
        &mut self.items
    }

    /// Returns the shipping address and the items together, for passes
    /// that update both.
    pub fn address_and_items_mut(&mut self) -> (&mut Address, &mut [LineItem]) {
        (&mut self.shipping_address, &mut self.items)
    }

    /// Returns true if the cart has at least one item.
    #[inline]
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns the shipping assignments.
    #[inline]
    #[must_use]
    pub fn shipping_assignments(&self) -> &[ShippingAssignment] {
        &self.shipping_assignments
    }

    /// Replaces the shipping assignments and marks totals stale.
    pub fn set_shipping_assignments(&mut self, assignments: Vec<ShippingAssignment>) {
        self.shipping_assignments = assignments;
        self.totals_collected = false;
    }

    /// Returns true if totals are up to date.
    #[inline]
    #[must_use]
    pub fn totals_collected(&self) -> bool {
        self.totals_collected
    }

    /// Records that the host recollected totals.
    pub fn mark_totals_collected(&mut self) {
        self.totals_collected = true;
    }

    /// Appends an entry to the error log.
    pub fn add_error_info(
        &mut self,
        category: ErrorCategory,
        origin: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(CartErrorInfo {
            category,
            origin: origin.into(),
            code: code.into(),
            message: message.into(),
        });
    }

    /// Returns the error log.
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[CartErrorInfo] {
        &self.errors
    }
}

impl fmt::Display for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Cart(#{}", id)?,
            None => write!(f, "Cart(unsaved")?,
        }
        write!(
            f,
            " store={} items={} {})",
            self.store_id,
            self.items.len(),
            self.shipping_address
        )
    }
}
