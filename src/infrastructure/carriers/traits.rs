//! # Carrier Ports
//!
//! Port definitions for the collaborators that rate a cart and persist the
//! chosen method.
//!
//! # Examples
//!
//! ```ignore
//! use estimated_shipping::infrastructure::carriers::traits::QuoteProvider;
//!
//! #[derive(Debug)]
//! struct CarrierGateway { /* ... */ }
//!
//! impl QuoteProvider for CarrierGateway {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::{Address, CandidateMethod};
use crate::domain::value_objects::{CartId, CustomerAddressId};
use crate::infrastructure::carriers::error::{MethodManagementResult, QuoteProviderResult};
use std::fmt;

/// Rates a cart against the configured carriers.
///
/// Calls are synchronous and blocking; timeouts are the implementation's
/// responsibility. Every candidate carries its availability and
/// tax-inclusive price.
pub trait QuoteProvider: Send + Sync + fmt::Debug {
    /// Estimates methods for a customer's saved address.
    ///
    /// # Errors
    ///
    /// - `QuoteProviderError::NotFound` - cart or address unknown
    /// - `QuoteProviderError::Timeout` / `Connection` - carrier unreachable
    fn estimate_by_address_id(
        &self,
        cart_id: Option<CartId>,
        customer_address_id: CustomerAddressId,
    ) -> QuoteProviderResult<Vec<CandidateMethod>>;

    /// Estimates methods for a full address payload.
    ///
    /// # Errors
    ///
    /// - `QuoteProviderError::InvalidRequest` - address cannot be rated
    /// - `QuoteProviderError::Timeout` / `Connection` - carrier unreachable
    fn estimate_by_extended_address(
        &self,
        cart_id: Option<CartId>,
        address: &Address,
    ) -> QuoteProviderResult<Vec<CandidateMethod>>;
}

/// Persists the shipping method of a saved cart.
pub trait MethodManagement: Send + Sync + fmt::Debug {
    /// Sets `carrier_code`/`method_code` as the cart's shipping method.
    ///
    /// # Errors
    ///
    /// - `MethodManagementError::NotFound` - cart or method unknown
    /// - `MethodManagementError::InvalidInput` - codes rejected
    /// - `MethodManagementError::SaveConflict` - cart could not be saved
    /// - `MethodManagementError::InvalidState` - cart cannot take a method
    fn set_method(
        &self,
        cart_id: CartId,
        carrier_code: &str,
        method_code: &str,
    ) -> MethodManagementResult<()>;
}
