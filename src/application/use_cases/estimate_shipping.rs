//! # Estimate Shipping Use Case
//!
//! Host hooks that pre-select a shipping method on a cart.
//!
//! # Flow
//!
//! `before_get_config` (checkout configuration is being built):
//!
//! 1. Read store settings; stop if disabled
//! 2. Resolve the shipping address
//! 3. Aggregate item weights onto the address
//! 4. Rank candidates under the store policy and apply the winner
//!
//! `before_collect_totals` (totals are about to be collected):
//!
//! 1. Read store settings; stop if disabled or a method is already set
//! 2. Aggregate item weights onto the address
//! 3. Preselect the cheapest rate
//!
//! Each hook call is one request: it gets its own [`MethodCache`].

use crate::application::error::ApplicationResult;
use crate::application::services::{
    AddressResolver, MethodCache, MethodSelector, RankingPolicy, SelectionOutcome,
};
use crate::domain::entities::Cart;
use crate::domain::services::{FreeShippingRule, NeverFreeShipping, WeightAggregator};
use crate::domain::value_objects::{CountryId, MethodCode};
use crate::infrastructure::carriers::{MethodManagement, QuoteProvider};
use crate::infrastructure::config::{FALLBACK_COUNTRY, StoreSettings, StoreSettingsProvider};
use crate::infrastructure::persistence::CustomerRepository;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// What a hook did to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EstimateOutcome {
    /// Estimation is disabled for the store.
    Disabled,
    /// Nothing to do: no items, or a method is already set.
    Unchanged,
    /// No shipping method is available; any previous selection was cleared.
    NoShippingAvailable,
    /// A method was applied.
    Selected {
        /// The applied method.
        method: MethodCode,
        /// True if the method was written through method management.
        persisted: bool,
    },
}

impl EstimateOutcome {
    /// Returns true if a method was applied.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected { .. })
    }
}

impl From<SelectionOutcome> for EstimateOutcome {
    fn from(outcome: SelectionOutcome) -> Self {
        match outcome {
            SelectionOutcome::NoItems | SelectionOutcome::AlreadySelected(_) => Self::Unchanged,
            SelectionOutcome::NoCandidates => Self::NoShippingAvailable,
            SelectionOutcome::Selected { method, persisted } => {
                Self::Selected { method, persisted }
            }
        }
    }
}

impl fmt::Display for EstimateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::NoShippingAvailable => write!(f, "no shipping available"),
            Self::Selected { method, persisted } => {
                write!(f, "selected {method} (persisted={persisted})")
            }
        }
    }
}

/// Runs the estimate pipeline for a cart.
#[derive(Debug, Clone)]
pub struct ShippingEstimator {
    settings: Arc<dyn StoreSettingsProvider>,
    resolver: AddressResolver,
    aggregator: WeightAggregator,
    free_shipping: Arc<dyn FreeShippingRule>,
    selector: MethodSelector,
}

impl ShippingEstimator {
    /// Creates an estimator without a free-shipping rule.
    #[must_use]
    pub fn new(
        settings: Arc<dyn StoreSettingsProvider>,
        customers: Arc<dyn CustomerRepository>,
        quotes: Arc<dyn QuoteProvider>,
        methods: Arc<dyn MethodManagement>,
    ) -> Self {
        Self {
            settings,
            resolver: AddressResolver::new(customers),
            aggregator: WeightAggregator::new(),
            free_shipping: Arc::new(NeverFreeShipping),
            selector: MethodSelector::new(
                quotes,
                methods,
                CountryId::from_static(FALLBACK_COUNTRY),
            ),
        }
    }

    /// Replaces the free-shipping rule used during weight collection.
    #[must_use]
    pub fn with_free_shipping_rule(mut self, rule: Arc<dyn FreeShippingRule>) -> Self {
        self.free_shipping = rule;
        self
    }

    /// Hook run before the checkout configuration is built.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer lookup or quoting fails, or if
    /// weight aggregation overflows.
    #[instrument(skip_all, fields(cart_id = ?cart.id(), store = %cart.store_id()))]
    pub fn before_get_config(&self, cart: &mut Cart) -> ApplicationResult<EstimateOutcome> {
        let Some(settings) = self.enabled_settings(cart) else {
            return Ok(EstimateOutcome::Disabled);
        };

        let source = self.resolver.resolve(cart, &settings.default_country)?;
        debug!(%source, "shipping address resolved");
        cart.shipping_address_mut()
            .ensure_country(&settings.default_country);
        self.collect_weights(cart)?;

        let policy = RankingPolicy::from_settings(&settings);
        let mut cache = MethodCache::new();
        let outcome = self.selector.select_and_apply(cart, policy, &mut cache)?;
        info!(%outcome, "estimate applied before config");
        Ok(outcome.into())
    }

    /// Hook run before cart totals are collected.
    ///
    /// # Errors
    ///
    /// Returns an error if quoting fails or weight aggregation overflows.
    #[instrument(skip_all, fields(cart_id = ?cart.id(), store = %cart.store_id()))]
    pub fn before_collect_totals(&self, cart: &mut Cart) -> ApplicationResult<EstimateOutcome> {
        let Some(settings) = self.enabled_settings(cart) else {
            return Ok(EstimateOutcome::Disabled);
        };
        if cart.shipping_address().shipping_method().is_some() {
            debug!("shipping method already set");
            return Ok(EstimateOutcome::Unchanged);
        }
        if !cart.has_items() {
            return Ok(EstimateOutcome::Unchanged);
        }

        cart.shipping_address_mut()
            .ensure_country(&settings.default_country);
        self.collect_weights(cart)?;

        let mut cache = MethodCache::new();
        let outcome = self.selector.preselect_from_rates(cart, &mut cache)?;
        info!(%outcome, "estimate applied before totals");
        Ok(outcome.into())
    }

    fn enabled_settings(&self, cart: &Cart) -> Option<StoreSettings> {
        let settings = self.settings.settings(cart.store_id());
        if settings.enable {
            Some(settings)
        } else {
            debug!("shipping estimation disabled for store");
            None
        }
    }

    fn collect_weights(&self, cart: &mut Cart) -> ApplicationResult<()> {
        let (address, items) = cart.address_and_items_mut();
        self.aggregator
            .collect(address, items, self.free_shipping.as_ref())?;
        Ok(())
    }
}
