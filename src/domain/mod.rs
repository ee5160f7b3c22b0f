//! # Domain Layer
//!
//! Carts, addresses, line items and candidate shipping methods, together
//! with the weight aggregation rules that feed rate quoting.
//!
//! - [`entities`]: mutable aggregates owned by one estimate request
//! - [`value_objects`]: identifiers, money, weights and method codes
//! - [`services`]: weight aggregation and free-shipping rules
//! - [`errors`]: validation failures

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
