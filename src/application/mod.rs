//! # Application Layer
//!
//! Use cases and services wiring the domain to its collaborators.
//!
//! - [`services`]: address resolution, ranking and method selection
//! - [`use_cases`]: the host hooks of [`ShippingEstimator`](use_cases::ShippingEstimator)
//! - [`error`]: application error type

pub mod error;
pub mod services;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
