//! # Use Cases
//!
//! Entry points the host application calls.

pub mod estimate_shipping;

pub use estimate_shipping::{EstimateOutcome, ShippingEstimator};
