//! # Domain Entities
//!
//! ## Aggregates
//!
//! - [`Cart`]: in-progress order with its shipping assignment and error log
//!
//! ## Entities
//!
//! - [`Address`]: cart shipping address being rated
//! - [`LineItem`]: cart entry, possibly a bundle child
//! - [`CandidateMethod`]: quoted carrier and service
//! - [`Customer`]: account with an address book

pub mod address;
pub mod candidate_method;
pub mod cart;
pub mod customer;
pub mod line_item;

pub use address::{Address, PostalDetails, WeightTotals};
pub use candidate_method::CandidateMethod;
pub use cart::{Cart, CartErrorInfo, Shipping, ShippingAssignment};
pub use customer::{Customer, CustomerAddress};
pub use line_item::LineItem;
