//! # Weight Aggregation
//!
//! Computes the quantity and weight figures rate calculators need and
//! writes free-adjusted row weights back onto the items.
//!
//! Item policy, in item order:
//! - virtual items and bundle children are skipped at top level
//! - a parent shipping its children separately contributes each physical
//!   child (child qty x parent qty); with a fixed weight type the parent's
//!   own weight counts once instead of the children's weights
//! - everything else contributes `weight x qty`
//!
//! # Examples
//!
//! ```
//! use estimated_shipping::domain::entities::{Address, LineItem};
//! use estimated_shipping::domain::services::WeightAggregator;
//! use estimated_shipping::domain::value_objects::{FreeShipping, ItemId, Quantity, Weight};
//!
//! let mut items = vec![
//!     LineItem::new(ItemId::new(1), Quantity::from_units(3), Weight::from_units(2))
//!         .with_free_shipping(FreeShipping::Allowance(Quantity::from_units(1))),
//! ];
//! let totals = WeightAggregator::new().aggregate(&Address::new(), &mut items).unwrap();
//!
//! assert_eq!(totals.weight, Weight::from_units(6));
//! assert_eq!(totals.free_method_weight, Weight::from_units(4));
//! ```

use crate::domain::entities::{Address, LineItem, WeightTotals};
use crate::domain::errors::DomainResult;
use crate::domain::services::free_shipping::FreeShippingRule;
use crate::domain::value_objects::{ArithmeticResult, FreeShipping, Quantity, Weight};
use tracing::debug;

/// Returns the weight of a row after free-shipping allowances.
///
/// - address ships free, or the item ships fully free: zero
/// - the item has a free-quantity allowance: only units above it count
/// - otherwise: `weight x qty`
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if the product overflows.
pub fn free_adjusted_row_weight(
    address_free_shipping: bool,
    weight: Weight,
    qty: Quantity,
    free_shipping: FreeShipping,
) -> ArithmeticResult<Weight> {
    if address_free_shipping {
        return Ok(Weight::ZERO);
    }
    match free_shipping {
        FreeShipping::Full => Ok(Weight::ZERO),
        FreeShipping::Allowance(free_qty) => weight.times(qty.saturating_sub(free_qty)),
        FreeShipping::None => weight.times(qty),
    }
}

/// Running sums for one aggregation pass.
#[derive(Debug, Default)]
struct Accumulator {
    totals: WeightTotals,
}

impl Accumulator {
    fn add_qty(&mut self, qty: Quantity) -> ArithmeticResult<()> {
        self.totals.quantity = self.totals.quantity.safe_add(qty)?;
        Ok(())
    }

    /// Adds a row's weight and free-adjusted weight and returns the latter.
    fn add_row(
        &mut self,
        address_free_shipping: bool,
        weight: Weight,
        qty: Quantity,
        free_shipping: FreeShipping,
    ) -> ArithmeticResult<Weight> {
        self.totals.weight = self.totals.weight.safe_add(weight.times(qty)?)?;
        let row_weight = free_adjusted_row_weight(address_free_shipping, weight, qty, free_shipping)?;
        self.totals.free_method_weight = self.totals.free_method_weight.safe_add(row_weight)?;
        Ok(row_weight)
    }
}

/// Walks cart items to produce [`WeightTotals`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightAggregator;

impl WeightAggregator {
    /// Creates a new aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Aggregates `items` under the address's current free-shipping flag.
    ///
    /// Row weights are written onto the items; the address is not modified.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if a sum or product overflows.
    pub fn aggregate(&self, address: &Address, items: &mut [LineItem]) -> DomainResult<WeightTotals> {
        let address_free = address.is_free_shipping();
        let mut acc = Accumulator::default();

        for idx in 0..items.len() {
            let Some(item) = items.get(idx) else {
                continue;
            };
            if item.is_virtual() || item.parent_item_id().is_some() {
                continue;
            }
            let (id, qty, weight, free) = (item.id(), item.qty(), item.weight(), item.free_shipping());
            let (ships_separately, fixed_weight) = (item.ships_separately(), item.has_fixed_weight());

            let children: Vec<usize> = items
                .iter()
                .enumerate()
                .filter(|(_, c)| c.parent_item_id() == Some(id))
                .map(|(i, _)| i)
                .collect();

            if !children.is_empty() && ships_separately {
                for child_idx in children {
                    let Some(child) = items.get_mut(child_idx) else {
                        continue;
                    };
                    if child.is_virtual() {
                        continue;
                    }
                    let child_qty = child.qty().safe_mul(qty)?;
                    acc.add_qty(child_qty)?;
                    if !fixed_weight {
                        let row = acc.add_row(address_free, child.weight(), child_qty, child.free_shipping())?;
                        child.set_row_weight(row);
                    }
                }
                if fixed_weight {
                    let row = acc.add_row(address_free, weight, qty, free)?;
                    if let Some(parent) = items.get_mut(idx) {
                        parent.set_row_weight(row);
                    }
                }
            } else {
                acc.add_qty(qty)?;
                let row = acc.add_row(address_free, weight, qty, free)?;
                if let Some(item) = items.get_mut(idx) {
                    item.set_row_weight(row);
                }
            }
        }

        Ok(acc.totals)
    }

    /// Aggregates, settles address-level free shipping with `rule`, and
    /// stores the figures on the address.
    ///
    /// When the rule flips free shipping from false to true the items are
    /// aggregated a second time so row weights reflect the final flag.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` if a sum or product overflows.
    pub fn collect(
        &self,
        address: &mut Address,
        items: &mut [LineItem],
        rule: &dyn FreeShippingRule,
    ) -> DomainResult<WeightTotals> {
        let was_free = address.is_free_shipping();
        let mut totals = self.aggregate(address, items)?;

        let is_free = rule.is_free_shipping(address, items);
        address.set_free_shipping(is_free);
        if is_free && !was_free {
            debug!(rule = rule.name(), "free shipping granted, re-aggregating weights");
            totals = self.aggregate(address, items)?;
        }

        address.set_totals(totals);
        debug!(
            qty = %totals.quantity,
            weight = %totals.weight,
            free_method_weight = %totals.free_method_weight,
            free_shipping = is_free,
            "aggregated cart weights"
        );
        Ok(totals)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::services::free_shipping::{AllItemsFreeShipping, NeverFreeShipping};
    use crate::domain::value_objects::ItemId;
    use rust_decimal::Decimal;

    fn item(id: u64, qty: u32, weight: u32) -> LineItem {
        LineItem::new(ItemId::new(id), Quantity::from_units(qty), Weight::from_units(weight))
    }

    fn qty(units: u32) -> Quantity {
        Quantity::from_units(units)
    }

    fn weight(units: u32) -> Weight {
        Weight::from_units(units)
    }

    mod row_weight {
        use super::*;

        #[test]
        fn plain_row() {
            let row = free_adjusted_row_weight(false, weight(2), qty(3), FreeShipping::None).unwrap();
            assert_eq!(row, weight(6));
        }

        #[test]
        fn address_free_zeroes_row() {
            let row = free_adjusted_row_weight(true, weight(2), qty(3), FreeShipping::None).unwrap();
            assert_eq!(row, Weight::ZERO);
        }

        #[test]
        fn item_full_zeroes_row() {
            let row = free_adjusted_row_weight(false, weight(2), qty(3), FreeShipping::Full).unwrap();
            assert_eq!(row, Weight::ZERO);
        }

        #[test]
        fn allowance_at_or_above_qty_is_zero() {
            let at = free_adjusted_row_weight(false, weight(2), qty(3), FreeShipping::Allowance(qty(3)));
            let above = free_adjusted_row_weight(false, weight(2), qty(3), FreeShipping::Allowance(qty(5)));
            assert_eq!(at.unwrap(), Weight::ZERO);
            assert_eq!(above.unwrap(), Weight::ZERO);
        }

        #[test]
        fn allowance_below_qty_charges_rest() {
            let row = free_adjusted_row_weight(false, weight(2), qty(5), FreeShipping::Allowance(qty(2)));
            assert_eq!(row.unwrap(), weight(6));
        }
    }

    #[test]
    fn simple_items_sum() {
        let mut items = vec![item(1, 2, 3), item(2, 1, 5)];
        let totals = WeightAggregator::new().aggregate(&Address::new(), &mut items).unwrap();

        assert_eq!(totals.quantity, qty(3));
        assert_eq!(totals.weight, weight(11));
        assert_eq!(totals.free_method_weight, weight(11));
        assert_eq!(items[0].row_weight(), weight(6));
        assert_eq!(items[1].row_weight(), weight(5));
    }

    #[test]
    fn virtual_items_skipped() {
        let mut items = vec![item(1, 2, 3), item(2, 4, 10).as_virtual()];
        let totals = WeightAggregator::new().aggregate(&Address::new(), &mut items).unwrap();

        assert_eq!(totals.quantity, qty(2));
        assert_eq!(totals.weight, weight(6));
        assert_eq!(items[1].row_weight(), Weight::ZERO);
    }

    #[test]
    fn bundle_not_shipped_separately_counts_parent_only() {
        let mut items = vec![
            item(1, 2, 4),
            item(2, 3, 1).with_parent(ItemId::new(1)),
        ];
        let totals = WeightAggregator::new().aggregate(&Address::new(), &mut items).unwrap();

        assert_eq!(totals.quantity, qty(2));
        assert_eq!(totals.weight, weight(8));
        assert_eq!(items[0].row_weight(), weight(8));
        assert_eq!(items[1].row_weight(), Weight::ZERO);
    }

    #[test]
    fn ship_separately_uses_child_weights() {
        let mut items = vec![
            item(1, 2, 100).shipping_separately(),
            item(2, 3, 1).with_parent(ItemId::new(1)),
            item(3, 1, 5)
                .with_parent(ItemId::new(1))
                .with_free_shipping(FreeShipping::Full),
            item(4, 1, 50).with_parent(ItemId::new(1)).as_virtual(),
        ];
        let totals = WeightAggregator::new().aggregate(&Address::new(), &mut items).unwrap();

        // child totals: 3x2 and 1x2 units
        assert_eq!(totals.quantity, qty(8));
        assert_eq!(totals.weight, weight(6 + 10));
        assert_eq!(totals.free_method_weight, weight(6));
        assert_eq!(items[1].row_weight(), weight(6));
        assert_eq!(items[2].row_weight(), Weight::ZERO);
        assert_eq!(items[0].row_weight(), Weight::ZERO);
    }

    #[test]
    fn ship_separately_with_fixed_weight_counts_parent_once() {
        let mut items = vec![
            item(1, 2, 7).shipping_separately().with_fixed_weight(),
            item(2, 3, 1).with_parent(ItemId::new(1)),
            item(3, 1, 5).with_parent(ItemId::new(1)),
        ];
        let totals = WeightAggregator::new().aggregate(&Address::new(), &mut items).unwrap();

        assert_eq!(totals.quantity, qty(8));
        assert_eq!(totals.weight, weight(14));
        assert_eq!(items[0].row_weight(), weight(14));
        assert_eq!(items[1].row_weight(), Weight::ZERO);
    }

    #[test]
    fn fractional_quantities() {
        let mut items = vec![LineItem::new(
            ItemId::new(1),
            Quantity::new(Decimal::new(15, 1)).unwrap(),
            Weight::new(Decimal::new(2, 0)).unwrap(),
        )];
        let totals = WeightAggregator::new().aggregate(&Address::new(), &mut items).unwrap();
        assert_eq!(totals.weight, weight(3));
    }

    #[test]
    fn collect_without_free_shipping_runs_once() {
        let mut address = Address::new();
        let mut items = vec![item(1, 2, 3)];
        let totals = WeightAggregator::new()
            .collect(&mut address, &mut items, &NeverFreeShipping)
            .unwrap();

        assert!(!address.is_free_shipping());
        assert_eq!(address.weight(), weight(6));
        assert_eq!(address.free_method_weight(), weight(6));
        assert_eq!(totals, address.totals());
    }

    #[test]
    fn collect_reaggregates_when_free_shipping_flips() {
        let mut address = Address::new();
        let mut items = vec![
            item(1, 2, 3).with_free_shipping(FreeShipping::Full),
            item(2, 1, 4).with_free_shipping(FreeShipping::Full),
        ];
        WeightAggregator::new()
            .collect(&mut address, &mut items, &AllItemsFreeShipping)
            .unwrap();

        assert!(address.is_free_shipping());
        assert_eq!(address.weight(), weight(10));
        assert_eq!(address.free_method_weight(), Weight::ZERO);
        assert_eq!(address.item_qty(), qty(3));
    }

    /// Grants free shipping regardless of the items.
    #[derive(Debug)]
    struct PromotionFreeShipping;

    impl FreeShippingRule for PromotionFreeShipping {
        fn is_free_shipping(&self, _address: &Address, _items: &[LineItem]) -> bool {
            true
        }

        fn name(&self) -> &'static str {
            "PromotionFreeShipping"
        }
    }

    #[test]
    fn collect_zeroes_rows_when_rule_grants_free_shipping() {
        let mut address = Address::new();
        let mut items = vec![
            item(1, 2, 3),
            item(2, 4, 1).with_free_shipping(FreeShipping::Allowance(qty(1))),
        ];
        let totals = WeightAggregator::new()
            .collect(&mut address, &mut items, &PromotionFreeShipping)
            .unwrap();

        assert!(address.is_free_shipping());
        assert_eq!(totals.weight, weight(10));
        assert_eq!(totals.free_method_weight, Weight::ZERO);
        assert_eq!(address.free_method_weight(), Weight::ZERO);
        assert_eq!(items[0].row_weight(), Weight::ZERO);
        assert_eq!(items[1].row_weight(), Weight::ZERO);
    }

    #[test]
    fn collect_clears_stale_free_flag() {
        let mut address = Address::new();
        address.set_free_shipping(true);
        let mut items = vec![item(1, 1, 2)];
        WeightAggregator::new()
            .collect(&mut address, &mut items, &NeverFreeShipping)
            .unwrap();

        assert!(!address.is_free_shipping());
        // first pass ran under the stale flag; only a false->true flip re-runs
        assert_eq!(address.free_method_weight(), Weight::ZERO);
    }
}
