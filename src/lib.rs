//! # Estimated Shipping
//!
//! Pre-selects a default shipping method for an in-progress cart so a
//! storefront can display an estimated total before the shopper picks
//! shipping manually.
//!
//! The crate is organised in three layers:
//!
//! - [`domain`]: carts, addresses, line items, candidate methods and the
//!   weight aggregation rules
//! - [`application`]: address resolution, ranking strategies, method
//!   selection and the [`ShippingEstimator`](application::use_cases::ShippingEstimator)
//!   hooks the host application calls
//! - [`infrastructure`]: ports for the quote provider, method management and
//!   customer storage, in-memory adapters, store settings and telemetry
//!
//! # Examples
//!
//! ```
//! use estimated_shipping::application::services::{MethodCache, MethodSelector, RankingPolicy};
//! use estimated_shipping::domain::entities::{CandidateMethod, Cart, LineItem};
//! use estimated_shipping::domain::value_objects::{CartId, CountryId, ItemId, Price, Quantity, StoreId, Weight};
//! use estimated_shipping::infrastructure::carriers::{RecordingMethodManagement, StaticQuoteProvider};
//! use std::sync::Arc;
//!
//! let provider = StaticQuoteProvider::new(vec![
//!     CandidateMethod::new("ups", "ground", Price::from_cents(1250)),
//!     CandidateMethod::new("ups", "express", Price::from_cents(2500)),
//! ]);
//! let selector = MethodSelector::new(
//!     Arc::new(provider),
//!     Arc::new(RecordingMethodManagement::new()),
//!     CountryId::new("US").unwrap(),
//! );
//!
//! let mut cart = Cart::new(Some(CartId::new(1)), StoreId::new("default"));
//! cart.add_item(LineItem::new(ItemId::new(1), Quantity::from_units(1), Weight::from_units(2)));
//!
//! let mut cache = MethodCache::new();
//! let outcome = selector
//!     .select_and_apply(&mut cart, RankingPolicy::Lowest, &mut cache)
//!     .unwrap();
//!
//! assert!(outcome.is_selected());
//! assert_eq!(cart.shipping_address().shipping_method().map(|m| m.to_string()), Some("ups_ground".to_string()));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
