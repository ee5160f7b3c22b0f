//! # Method Selection
//!
//! Fetches candidate methods for a cart, picks one and applies it.
//!
//! [`MethodSelector::select_and_apply`] runs when the checkout
//! configuration is built: it ranks every available candidate under a
//! [`RankingPolicy`], writes the winner onto the shipping address and the
//! shipping assignment, and persists it for saved carts.
//!
//! [`MethodSelector::preselect_from_rates`] runs while totals are being
//! collected: it only fills an empty method with the cheapest rate and
//! leaves the assignments alone.
//!
//! Persistence failures never abort selection. They are logged and
//! recorded in the cart's error log; the in-memory selection keeps the
//! attempted method.

use crate::application::error::ApplicationResult;
use crate::application::services::method_cache::MethodCache;
use crate::application::services::ranking_strategy::RankingPolicy;
use crate::domain::entities::{CandidateMethod, Cart, LineItem, Shipping, ShippingAssignment};
use crate::domain::value_objects::{CountryId, ErrorCategory, ItemId, MethodCode};
use crate::infrastructure::carriers::{MethodManagement, QuoteProvider};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Origin recorded on cart errors raised by the selector.
pub const SELECTOR_ORIGIN: &str = "estimated_shipping";

/// Result of a selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The cart has no items; nothing was touched.
    NoItems,
    /// No available candidate; the selection was cleared.
    NoCandidates,
    /// The address already had a method; nothing was touched.
    AlreadySelected(MethodCode),
    /// A method was applied.
    Selected {
        /// The applied method.
        method: MethodCode,
        /// True if method management accepted the method.
        persisted: bool,
    },
}

impl SelectionOutcome {
    /// Returns true if a method was applied by this run.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }

    /// Returns the method the cart ends up with, if any.
    #[must_use]
    pub fn method(&self) -> Option<&MethodCode> {
        match self {
            Self::AlreadySelected(method) | Self::Selected { method, .. } => Some(method),
            Self::NoItems | Self::NoCandidates => None,
        }
    }

    /// Returns true if the applied method was persisted.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Selected { persisted: true, .. })
    }
}

impl fmt::Display for SelectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoItems => write!(f, "no items"),
            Self::NoCandidates => write!(f, "no shipping available"),
            Self::AlreadySelected(method) => write!(f, "kept {method}"),
            Self::Selected { method, persisted } => {
                write!(f, "selected {method} (persisted={persisted})")
            }
        }
    }
}

/// Selects and applies the default shipping method of a cart.
#[derive(Debug, Clone)]
pub struct MethodSelector {
    quotes: Arc<dyn QuoteProvider>,
    methods: Arc<dyn MethodManagement>,
    default_country: CountryId,
}

impl MethodSelector {
    /// Creates a selector.
    ///
    /// `default_country` is applied to addresses without a country before
    /// they are rated.
    #[must_use]
    pub fn new(
        quotes: Arc<dyn QuoteProvider>,
        methods: Arc<dyn MethodManagement>,
        default_country: CountryId,
    ) -> Self {
        Self {
            quotes,
            methods,
            default_country,
        }
    }

    /// Returns the fallback country.
    #[must_use]
    pub fn default_country(&self) -> &CountryId {
        &self.default_country
    }

    /// Ranks the available candidates and applies the winner.
    ///
    /// With no available candidate the address method and the assignments
    /// are cleared; clearing an already clear cart changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::QuoteProvider` if quoting fails and
    /// `ApplicationError::Domain` if the winner has an empty carrier or
    /// method code.
    pub fn select_and_apply(
        &self,
        cart: &mut Cart,
        policy: RankingPolicy,
        cache: &mut MethodCache,
    ) -> ApplicationResult<SelectionOutcome> {
        if !cart.has_items() {
            debug!("cart has no items, skipping selection");
            return Ok(SelectionOutcome::NoItems);
        }
        self.ensure_country(cart);

        let available = self.available_candidates(cart, cache)?;
        let winner = match available.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            _ => {
                let current = current_method(cart);
                policy.best(&available, current.as_ref())
            }
        };

        let Some(winner) = winner else {
            if clear_selection(cart) {
                info!("no shipping method available, selection cleared");
            }
            return Ok(SelectionOutcome::NoCandidates);
        };

        let method = winner.code()?;
        apply_method(cart, &winner, &method);
        info!(
            method = %method,
            price = %winner.price_incl_tax(),
            policy = %policy,
            candidates = available.len(),
            "shipping method selected"
        );

        let persisted = self.persist(cart, &method);
        Ok(SelectionOutcome::Selected { method, persisted })
    }

    /// Fills an empty address method with the cheapest available rate.
    ///
    /// Saved carts go through method management; unsaved carts only get the
    /// method set in memory. Assignments are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::QuoteProvider` if quoting fails and
    /// `ApplicationError::Domain` if the winner has an empty carrier or
    /// method code.
    pub fn preselect_from_rates(
        &self,
        cart: &mut Cart,
        cache: &mut MethodCache,
    ) -> ApplicationResult<SelectionOutcome> {
        if !cart.has_items() {
            return Ok(SelectionOutcome::NoItems);
        }
        if let Some(existing) = cart.shipping_address().shipping_method() {
            debug!(method = %existing, "address already has a shipping method");
            return Ok(SelectionOutcome::AlreadySelected(existing.clone()));
        }
        self.ensure_country(cart);

        let available = self.available_candidates(cart, cache)?;
        let Some(cheapest) = RankingPolicy::Lowest.best(&available, None) else {
            debug!("no rates to preselect from");
            return Ok(SelectionOutcome::NoCandidates);
        };

        let method = cheapest.code()?;
        cart.shipping_address_mut()
            .set_shipping_method(Some(method.clone()));
        info!(method = %method, price = %cheapest.price_incl_tax(), "cheapest rate preselected");

        let persisted = self.persist(cart, &method);
        Ok(SelectionOutcome::Selected { method, persisted })
    }

    fn ensure_country(&self, cart: &mut Cart) {
        if cart
            .shipping_address_mut()
            .ensure_country(&self.default_country)
        {
            debug!(country = %self.default_country, "applied default country before quoting");
        }
    }

    fn available_candidates(
        &self,
        cart: &Cart,
        cache: &mut MethodCache,
    ) -> ApplicationResult<Vec<CandidateMethod>> {
        let address = cart.shipping_address();
        let candidates = match cache.get(address.id()) {
            Some(cached) => cached.to_vec(),
            None => {
                let fetched = match address.customer_address_id() {
                    Some(customer_address_id) => self
                        .quotes
                        .estimate_by_address_id(cart.id(), customer_address_id)?,
                    None => self
                        .quotes
                        .estimate_by_extended_address(cart.id(), address)?,
                };
                debug!(count = fetched.len(), "fetched candidate methods");
                cache.insert(address.id(), fetched.clone());
                fetched
            }
        };

        let total = candidates.len();
        let available: Vec<CandidateMethod> = candidates
            .into_iter()
            .filter(CandidateMethod::is_available)
            .collect();
        if available.len() < total {
            debug!(
                dropped = total - available.len(),
                "dropped unavailable candidates"
            );
        }
        Ok(available)
    }

    fn persist(&self, cart: &mut Cart, method: &MethodCode) -> bool {
        let Some(cart_id) = cart.id() else {
            return false;
        };
        match self
            .methods
            .set_method(cart_id, method.carrier(), method.method())
        {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    %cart_id,
                    method = %method,
                    code = err.code(),
                    error = %err,
                    "failed to persist shipping method"
                );
                cart.add_error_info(
                    ErrorCategory::Error,
                    SELECTOR_ORIGIN,
                    err.code(),
                    err.message(),
                );
                false
            }
        }
    }
}

fn current_method(cart: &Cart) -> Option<MethodCode> {
    cart.shipping_address()
        .shipping_method()
        .or_else(|| {
            cart.shipping_assignments()
                .iter()
                .find_map(ShippingAssignment::method)
        })
        .cloned()
}

fn apply_method(cart: &mut Cart, winner: &CandidateMethod, method: &MethodCode) {
    let items: Vec<ItemId> = cart.items().iter().map(LineItem::id).collect();

    let address = cart.shipping_address_mut();
    address.set_limit_carrier(winner.carrier_code());
    address.set_shipping_method(Some(method.clone()));

    let mut assignment = cart
        .shipping_assignments()
        .first()
        .cloned()
        .unwrap_or_default();
    assignment.shipping = Some(Shipping {
        address: cart.shipping_address().clone(),
        method: Some(method.clone()),
    });
    assignment.items = items;
    cart.set_shipping_assignments(vec![assignment]);
}

/// Returns true if anything was cleared.
fn clear_selection(cart: &mut Cart) -> bool {
    let has_method = cart.shipping_address().shipping_method().is_some();
    if !has_method && cart.shipping_assignments().is_empty() {
        return false;
    }
    cart.shipping_address_mut().set_shipping_method(None);
    cart.set_shipping_assignments(Vec::new());
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::application::error::ApplicationError;
    use crate::domain::entities::Address;
    use crate::domain::value_objects::{
        AddressId, CartId, CustomerAddressId, Price, Quantity, StoreId, Weight,
    };
    use crate::infrastructure::carriers::{
        EstimateCall, MethodManagementError, QuoteProviderError, RecordingMethodManagement,
        StaticQuoteProvider,
    };

    fn us() -> CountryId {
        CountryId::new("US").unwrap()
    }

    fn method(carrier: &str, code: &str, cents: u32) -> CandidateMethod {
        CandidateMethod::new(carrier, code, Price::from_cents(cents))
    }

    fn cart_with_items(id: Option<u64>) -> Cart {
        let mut cart = Cart::new(id.map(CartId::new), StoreId::default());
        cart.add_item(LineItem::new(
            ItemId::new(1),
            Quantity::from_units(2),
            Weight::from_units(1),
        ));
        cart.add_item(LineItem::new(
            ItemId::new(2),
            Quantity::from_units(1),
            Weight::from_units(3),
        ));
        cart
    }

    fn selector_with(
        rates: Vec<CandidateMethod>,
    ) -> (
        MethodSelector,
        Arc<StaticQuoteProvider>,
        Arc<RecordingMethodManagement>,
    ) {
        let provider = Arc::new(StaticQuoteProvider::new(rates));
        let management = Arc::new(RecordingMethodManagement::new());
        let selector = MethodSelector::new(provider.clone(), management.clone(), us());
        (selector, provider, management)
    }

    fn address_method(cart: &Cart) -> Option<String> {
        cart.shipping_address()
            .shipping_method()
            .map(ToString::to_string)
    }

    #[test]
    fn lowest_picks_cheapest() {
        let (selector, _, management) =
            selector_with(vec![method("UPS", "Ground", 1250), method("UPS", "Express", 2500)]);
        let mut cart = cart_with_items(Some(10));

        let outcome = selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();

        assert!(outcome.is_selected());
        assert!(outcome.is_persisted());
        assert_eq!(address_method(&cart).as_deref(), Some("UPS_Ground"));
        assert_eq!(cart.shipping_address().limit_carrier(), Some("UPS"));
        let calls = management.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].carrier_code, "UPS");
        assert_eq!(calls[0].method_code, "Ground");
    }

    #[test]
    fn underscored_carrier_code_is_selected() {
        let (selector, _, management) = selector_with(vec![
            method("my_carrier", "std", 500),
            method("ups", "ground", 1250),
        ]);
        let mut cart = cart_with_items(Some(11));

        let outcome = selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();

        assert!(outcome.is_persisted());
        assert_eq!(address_method(&cart).as_deref(), Some("my_carrier_std"));
        assert_eq!(cart.shipping_address().limit_carrier(), Some("my_carrier"));
        let calls = management.calls();
        assert_eq!(calls[0].carrier_code, "my_carrier");
        assert_eq!(calls[0].method_code, "std");
    }

    #[test]
    fn keep_existing_recognises_underscored_carrier() {
        let (selector, _, _) = selector_with(vec![
            method("ups", "ground", 1250),
            method("my_carrier", "std", 2500),
        ]);
        let mut cart = cart_with_items(None);
        cart.shipping_address_mut()
            .set_shipping_method(Some("my_carrier_std".parse().unwrap()));

        selector
            .select_and_apply(
                &mut cart,
                RankingPolicy::KeepExistingOrLowest,
                &mut MethodCache::new(),
            )
            .unwrap();

        assert_eq!(address_method(&cart).as_deref(), Some("my_carrier_std"));
        assert_eq!(cart.shipping_address().limit_carrier(), Some("my_carrier"));
    }

    #[test]
    fn highest_picks_most_expensive() {
        let (selector, _, _) =
            selector_with(vec![method("UPS", "Ground", 1250), method("UPS", "Express", 2500)]);
        let mut cart = cart_with_items(None);

        selector
            .select_and_apply(&mut cart, RankingPolicy::Highest, &mut MethodCache::new())
            .unwrap();

        assert_eq!(address_method(&cart).as_deref(), Some("UPS_Express"));
    }

    #[test]
    fn unavailable_candidates_are_dropped() {
        let (selector, _, _) = selector_with(vec![
            method("UPS", "Ground", 1250).unavailable("no service"),
            method("FedEx", "Air", 3000),
        ]);
        let mut cart = cart_with_items(None);

        let outcome = selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();

        assert_eq!(outcome.method().map(ToString::to_string).as_deref(), Some("FedEx_Air"));
    }

    #[test]
    fn single_candidate_selected_under_any_policy() {
        for policy in [
            RankingPolicy::Lowest,
            RankingPolicy::Highest,
            RankingPolicy::KeepExistingOrLowest,
        ] {
            let (selector, _, _) = selector_with(vec![method("dhl", "std", 900)]);
            let mut cart = cart_with_items(None);
            selector
                .select_and_apply(&mut cart, policy, &mut MethodCache::new())
                .unwrap();
            assert_eq!(address_method(&cart).as_deref(), Some("dhl_std"));
        }
    }

    #[test]
    fn keep_existing_policy_keeps_offered_method() {
        let (selector, _, _) =
            selector_with(vec![method("ups", "ground", 1250), method("ups", "express", 2500)]);
        let mut cart = cart_with_items(None);
        cart.shipping_address_mut()
            .set_shipping_method(Some("ups_express".parse().unwrap()));

        selector
            .select_and_apply(
                &mut cart,
                RankingPolicy::KeepExistingOrLowest,
                &mut MethodCache::new(),
            )
            .unwrap();

        assert_eq!(address_method(&cart).as_deref(), Some("ups_express"));
    }

    #[test]
    fn apply_writes_assignment_and_marks_totals_stale() {
        let (selector, _, _) = selector_with(vec![method("ups", "ground", 1250)]);
        let mut cart = cart_with_items(None);
        cart.mark_totals_collected();

        selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();

        assert!(!cart.totals_collected());
        let assignments = cart.shipping_assignments();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].items, vec![ItemId::new(1), ItemId::new(2)]);
        assert_eq!(
            assignments[0].method().map(ToString::to_string).as_deref(),
            Some("ups_ground")
        );
        let shipping = assignments[0].shipping.as_ref().unwrap();
        assert_eq!(shipping.address.limit_carrier(), Some("ups"));
    }

    #[test]
    fn no_candidates_clears_selection_idempotently() {
        let (selector, _, _) = selector_with(vec![method("ups", "ground", 1250).unavailable("x")]);
        let mut cart = cart_with_items(None);
        cart.shipping_address_mut()
            .set_shipping_method(Some("ups_ground".parse().unwrap()));
        cart.set_shipping_assignments(vec![ShippingAssignment::new()]);
        cart.mark_totals_collected();

        let outcome = selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();
        assert_eq!(outcome, SelectionOutcome::NoCandidates);
        assert!(cart.shipping_address().shipping_method().is_none());
        assert!(cart.shipping_assignments().is_empty());
        assert!(!cart.totals_collected());

        cart.mark_totals_collected();
        let snapshot = cart.clone();
        selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();
        assert_eq!(cart, snapshot);
    }

    #[test]
    fn empty_cart_is_untouched() {
        let (selector, provider, _) = selector_with(vec![method("ups", "ground", 1250)]);
        let mut cart = Cart::new(Some(CartId::new(1)), StoreId::default());
        let snapshot = cart.clone();

        let outcome = selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();

        assert_eq!(outcome, SelectionOutcome::NoItems);
        assert_eq!(cart, snapshot);
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn missing_country_defaults_before_quoting() {
        let (selector, provider, _) = selector_with(vec![method("ups", "ground", 1250)]);
        let mut cart = cart_with_items(None);

        selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();

        assert_eq!(
            provider.calls(),
            vec![EstimateCall::ByAddress {
                cart_id: None,
                country_id: Some(us()),
            }]
        );
    }

    #[test]
    fn customer_address_quoted_by_id() {
        let (selector, provider, _) = selector_with(vec![method("ups", "ground", 1250)]);
        let mut cart = cart_with_items(Some(4)).with_shipping_address(
            Address::persisted(AddressId::new(2))
                .with_customer_address_id(CustomerAddressId::new(9)),
        );

        selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();

        assert_eq!(
            provider.calls(),
            vec![EstimateCall::ByAddressId {
                cart_id: Some(CartId::new(4)),
                customer_address_id: CustomerAddressId::new(9),
            }]
        );
    }

    #[test]
    fn cache_prevents_second_quote() {
        let (selector, provider, _) = selector_with(vec![method("ups", "ground", 1250)]);
        let mut cart = cart_with_items(None);
        let mut cache = MethodCache::new();

        selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut cache)
            .unwrap();
        selector
            .select_and_apply(&mut cart, RankingPolicy::Highest, &mut cache)
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn persistence_failure_is_recorded_not_raised() {
        let provider = Arc::new(StaticQuoteProvider::new(vec![
            method("ups", "ground", 1250),
            method("ups", "express", 2500),
        ]));
        let management = Arc::new(RecordingMethodManagement::failing(
            MethodManagementError::invalid_state("cart is inactive"),
        ));
        let selector = MethodSelector::new(provider, management.clone(), us());
        let mut cart = cart_with_items(Some(3));

        let outcome = selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();

        assert!(outcome.is_selected());
        assert!(!outcome.is_persisted());
        assert_eq!(management.calls().len(), 1);
        assert_eq!(cart.errors().len(), 1);
        let error = &cart.errors()[0];
        assert_eq!(error.category, ErrorCategory::Error);
        assert_eq!(error.origin, SELECTOR_ORIGIN);
        assert_eq!(error.code, "invalid_state");
        assert_eq!(error.message, "cart is inactive");
        assert_eq!(address_method(&cart).as_deref(), Some("ups_ground"));
    }

    #[test]
    fn unsaved_cart_is_not_persisted() {
        let (selector, _, management) = selector_with(vec![method("ups", "ground", 1250)]);
        let mut cart = cart_with_items(None);

        let outcome = selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap();

        assert!(outcome.is_selected());
        assert!(!outcome.is_persisted());
        assert!(management.calls().is_empty());
    }

    #[test]
    fn provider_error_propagates() {
        let selector = MethodSelector::new(
            Arc::new(StaticQuoteProvider::failing(QuoteProviderError::timeout("slow"))),
            Arc::new(RecordingMethodManagement::new()),
            us(),
        );
        let mut cart = cart_with_items(None);

        let err = selector
            .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut MethodCache::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::QuoteProvider(QuoteProviderError::Timeout { .. })
        ));
    }

    #[test]
    fn preselect_takes_cheapest_and_keeps_assignments() {
        let (selector, _, management) = selector_with(vec![
            method("ups", "express", 2500),
            method("ups", "ground", 1250),
        ]);
        let mut cart = cart_with_items(Some(8));
        cart.mark_totals_collected();

        let outcome = selector
            .preselect_from_rates(&mut cart, &mut MethodCache::new())
            .unwrap();

        assert!(outcome.is_persisted());
        assert_eq!(address_method(&cart).as_deref(), Some("ups_ground"));
        assert!(cart.shipping_assignments().is_empty());
        assert!(cart.totals_collected());
        assert_eq!(management.calls()[0].method_code, "ground");
    }

    #[test]
    fn preselect_unsaved_cart_sets_method_in_memory() {
        let (selector, _, management) = selector_with(vec![method("ups", "ground", 1250)]);
        let mut cart = cart_with_items(None);

        let outcome = selector
            .preselect_from_rates(&mut cart, &mut MethodCache::new())
            .unwrap();

        assert!(outcome.is_selected());
        assert!(management.calls().is_empty());
        assert_eq!(address_method(&cart).as_deref(), Some("ups_ground"));
    }

    #[test]
    fn preselect_keeps_existing_method() {
        let (selector, provider, _) = selector_with(vec![method("ups", "ground", 1250)]);
        let mut cart = cart_with_items(None);
        cart.shipping_address_mut()
            .set_shipping_method(Some("fedex_air".parse().unwrap()));

        let outcome = selector
            .preselect_from_rates(&mut cart, &mut MethodCache::new())
            .unwrap();

        assert!(matches!(outcome, SelectionOutcome::AlreadySelected(_)));
        assert_eq!(provider.call_count(), 0);
        assert_eq!(address_method(&cart).as_deref(), Some("fedex_air"));
    }

    #[test]
    fn preselect_without_rates() {
        let (selector, _, _) = selector_with(Vec::new());
        let mut cart = cart_with_items(None);

        let outcome = selector
            .preselect_from_rates(&mut cart, &mut MethodCache::new())
            .unwrap();

        assert_eq!(outcome, SelectionOutcome::NoCandidates);
        assert!(cart.shipping_address().shipping_method().is_none());
    }

    #[test]
    fn outcome_display() {
        let outcome = SelectionOutcome::Selected {
            method: "ups_ground".parse().unwrap(),
            persisted: false,
        };
        assert_eq!(outcome.to_string(), "selected ups_ground (persisted=false)");
    }
}
