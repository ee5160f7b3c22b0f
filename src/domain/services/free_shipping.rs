//! # Free Shipping Rules
//!
//! Decide whether a whole address ships free. Promotion engines plug in
//! through [`FreeShippingRule`]; two rules ship with the crate.

use crate::domain::entities::{Address, LineItem};
use std::fmt;

/// Decides whether an address ships free after item figures are known.
pub trait FreeShippingRule: Send + Sync + fmt::Debug {
    /// Returns true if the address ships free.
    fn is_free_shipping(&self, address: &Address, items: &[LineItem]) -> bool;

    /// Returns the rule name.
    fn name(&self) -> &'static str;
}

/// Never grants address-level free shipping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFreeShipping;

impl FreeShippingRule for NeverFreeShipping {
    fn is_free_shipping(&self, _address: &Address, _items: &[LineItem]) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "NeverFreeShipping"
    }
}

/// Grants free shipping when every physical item ships fully free.
///
/// A cart with no physical items does not qualify.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllItemsFreeShipping;

impl FreeShippingRule for AllItemsFreeShipping {
    fn is_free_shipping(&self, _address: &Address, items: &[LineItem]) -> bool {
        let mut physical = items.iter().filter(|i| !i.is_virtual()).peekable();
        physical.peek().is_some() && physical.all(|i| i.free_shipping().is_full())
    }

    fn name(&self) -> &'static str {
        "AllItemsFreeShipping"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{FreeShipping, ItemId, Quantity, Weight};

    fn item(id: u64, free: FreeShipping) -> LineItem {
        LineItem::new(ItemId::new(id), Quantity::from_units(1), Weight::from_units(1))
            .with_free_shipping(free)
    }

    #[test]
    fn never_rule() {
        let items = vec![item(1, FreeShipping::Full)];
        assert!(!NeverFreeShipping.is_free_shipping(&Address::new(), &items));
    }

    #[test]
    fn all_items_rule_requires_every_physical_item() {
        let rule = AllItemsFreeShipping;
        let address = Address::new();

        let all_free = vec![item(1, FreeShipping::Full), item(2, FreeShipping::Full)];
        assert!(rule.is_free_shipping(&address, &all_free));

        let mixed = vec![item(1, FreeShipping::Full), item(2, FreeShipping::None)];
        assert!(!rule.is_free_shipping(&address, &mixed));

        let allowance = vec![item(1, FreeShipping::Allowance(Quantity::from_units(5)))];
        assert!(!rule.is_free_shipping(&address, &allowance));
    }

    #[test]
    fn all_items_rule_ignores_virtual_items() {
        let items = vec![
            item(1, FreeShipping::Full),
            item(2, FreeShipping::None).as_virtual(),
        ];
        assert!(AllItemsFreeShipping.is_free_shipping(&Address::new(), &items));

        let only_virtual = vec![item(3, FreeShipping::Full).as_virtual()];
        assert!(!AllItemsFreeShipping.is_free_shipping(&Address::new(), &only_virtual));
    }
}
