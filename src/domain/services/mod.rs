//! # Domain Services
//!
//! - [`WeightAggregator`]: quantity, weight and free-method weight of a cart
//! - [`FreeShippingRule`]: address-level free-shipping decision

pub mod free_shipping;
pub mod weight_aggregation;

pub use free_shipping::{AllItemsFreeShipping, FreeShippingRule, NeverFreeShipping};
pub use weight_aggregation::{WeightAggregator, free_adjusted_row_weight};
