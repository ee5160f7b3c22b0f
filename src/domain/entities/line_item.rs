//! # Line Item Entity
//!
//! One cart entry. Bundle children are stored alongside their parent and
//! point back to it through `parent_item_id`.

use crate::domain::value_objects::{FreeShipping, ItemId, Quantity, Weight};
use serde::{Deserialize, Serialize};

/// A cart line item.
///
/// # Examples
///
/// ```
/// use estimated_shipping::domain::entities::LineItem;
/// use estimated_shipping::domain::value_objects::{FreeShipping, ItemId, Quantity, Weight};
///
/// let item = LineItem::new(ItemId::new(1), Quantity::from_units(3), Weight::from_units(2))
///     .with_free_shipping(FreeShipping::Allowance(Quantity::from_units(1)));
/// assert!(!item.is_virtual());
/// assert!(item.parent_item_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: ItemId,
    #[serde(default)]
    parent_item_id: Option<ItemId>,
    qty: Quantity,
    #[serde(default)]
    weight: Weight,
    #[serde(default)]
    is_virtual: bool,
    /// Bundle children are weighed and shipped on their own.
    #[serde(default)]
    ships_separately: bool,
    /// The product carries a fixed weight instead of the sum of its children.
    #[serde(default)]
    fixed_weight: bool,
    #[serde(default)]
    free_shipping: FreeShipping,
    #[serde(default)]
    row_weight: Weight,
}

impl LineItem {
    /// Creates a physical, top-level item.
    #[must_use]
    pub fn new(id: ItemId, qty: Quantity, weight: Weight) -> Self {
        Self {
            id,
            parent_item_id: None,
            qty,
            weight,
            is_virtual: false,
            ships_separately: false,
            fixed_weight: false,
            free_shipping: FreeShipping::None,
            row_weight: Weight::ZERO,
        }
    }

    /// Makes this item a child of `parent`.
    #[must_use]
    pub fn with_parent(mut self, parent: ItemId) -> Self {
        self.parent_item_id = Some(parent);
        self
    }

    /// Marks the item virtual (never shipped).
    #[must_use]
    pub fn as_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    /// Marks the item's children as shipped separately.
    #[must_use]
    pub fn shipping_separately(mut self) -> Self {
        self.ships_separately = true;
        self
    }

    /// Marks the product as having a fixed weight.
    #[must_use]
    pub fn with_fixed_weight(mut self) -> Self {
        self.fixed_weight = true;
        self
    }

    /// Sets the free-shipping marker.
    #[must_use]
    pub fn with_free_shipping(mut self, free_shipping: FreeShipping) -> Self {
        self.free_shipping = free_shipping;
        self
    }

    /// Returns the item id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the parent item id.
    #[inline]
    #[must_use]
    pub fn parent_item_id(&self) -> Option<ItemId> {
        self.parent_item_id
    }

    /// Returns the quantity; for a child, the quantity per parent unit.
    #[inline]
    #[must_use]
    pub fn qty(&self) -> Quantity {
        self.qty
    }

    /// Returns the unit weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns true if the item is virtual.
    #[inline]
    #[must_use]
    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    /// Returns true if children ship separately.
    #[inline]
    #[must_use]
    pub fn ships_separately(&self) -> bool {
        self.ships_separately
    }

    /// Returns true if the product has a fixed weight.
    #[inline]
    #[must_use]
    pub fn has_fixed_weight(&self) -> bool {
        self.fixed_weight
    }

    /// Returns the free-shipping marker.
    #[inline]
    #[must_use]
    pub fn free_shipping(&self) -> FreeShipping {
        self.free_shipping
    }

    /// Returns the free-adjusted row weight computed by aggregation.
    #[inline]
    #[must_use]
    pub fn row_weight(&self) -> Weight {
        self.row_weight
    }

    /// Stores the free-adjusted row weight.
    pub fn set_row_weight(&mut self, row_weight: Weight) {
        self.row_weight = row_weight;
    }
}
