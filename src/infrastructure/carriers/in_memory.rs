//! # In-Memory Carrier Adapters
//!
//! Fixed-rate quote provider and recording method management, used by the
//! CLI and by tests that need to inspect what the selector asked for.

use crate::domain::entities::{Address, CandidateMethod};
use crate::domain::value_objects::{CartId, CountryId, CustomerAddressId};
use crate::infrastructure::carriers::error::{
    MethodManagementError, MethodManagementResult, QuoteProviderError, QuoteProviderResult,
};
use crate::infrastructure::carriers::traits::{MethodManagement, QuoteProvider};
use parking_lot::Mutex;
use std::collections::HashMap;

/// A request the quote provider received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimateCall {
    /// Estimate by customer address id.
    ByAddressId {
        /// Cart being rated.
        cart_id: Option<CartId>,
        /// Customer address id.
        customer_address_id: CustomerAddressId,
    },
    /// Estimate by full address.
    ByAddress {
        /// Cart being rated.
        cart_id: Option<CartId>,
        /// Country of the address.
        country_id: Option<CountryId>,
    },
}

/// Quote provider answering every request with the same rates.
///
/// Rates can be overridden per destination country.
#[derive(Debug, Default)]
pub struct StaticQuoteProvider {
    methods: Vec<CandidateMethod>,
    by_country: HashMap<CountryId, Vec<CandidateMethod>>,
    failure: Option<QuoteProviderError>,
    calls: Mutex<Vec<EstimateCall>>,
}

impl StaticQuoteProvider {
    /// Creates a provider returning `methods`.
    #[must_use]
    pub fn new(methods: Vec<CandidateMethod>) -> Self {
        Self {
            methods,
            ..Self::default()
        }
    }

    /// Creates a provider that fails every request with `error`.
    #[must_use]
    pub fn failing(error: QuoteProviderError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Returns `methods` for addresses in `country` instead of the default
    /// rates.
    #[must_use]
    pub fn with_country_rates(mut self, country: CountryId, methods: Vec<CandidateMethod>) -> Self {
        self.by_country.insert(country, methods);
        self
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<EstimateCall> {
        self.calls.lock().clone()
    }

    /// Returns the number of requests received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn rates_for(&self, country: Option<&CountryId>) -> QuoteProviderResult<Vec<CandidateMethod>> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(country
            .and_then(|c| self.by_country.get(c))
            .unwrap_or(&self.methods)
            .clone())
    }
}

impl QuoteProvider for StaticQuoteProvider {
    fn estimate_by_address_id(
        &self,
        cart_id: Option<CartId>,
        customer_address_id: CustomerAddressId,
    ) -> QuoteProviderResult<Vec<CandidateMethod>> {
        self.calls.lock().push(EstimateCall::ByAddressId {
            cart_id,
            customer_address_id,
        });
        self.rates_for(None)
    }

    fn estimate_by_extended_address(
        &self,
        cart_id: Option<CartId>,
        address: &Address,
    ) -> QuoteProviderResult<Vec<CandidateMethod>> {
        self.calls.lock().push(EstimateCall::ByAddress {
            cart_id,
            country_id: address.country_id().cloned(),
        });
        self.rates_for(address.country_id())
    }
}

/// A `set_method` call received by [`RecordingMethodManagement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetMethodCall {
    /// Cart id.
    pub cart_id: CartId,
    /// Carrier code.
    pub carrier_code: String,
    /// Method code.
    pub method_code: String,
}

/// Method management that records calls and optionally fails them.
#[derive(Debug, Default)]
pub struct RecordingMethodManagement {
    failure: Option<MethodManagementError>,
    calls: Mutex<Vec<SetMethodCall>>,
}

impl RecordingMethodManagement {
    /// Creates a method management that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a method management that rejects every call with `error`.
    #[must_use]
    pub fn failing(error: MethodManagementError) -> Self {
        Self {
            failure: Some(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the calls received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<SetMethodCall> {
        self.calls.lock().clone()
    }
}

impl MethodManagement for RecordingMethodManagement {
    fn set_method(
        &self,
        cart_id: CartId,
        carrier_code: &str,
        method_code: &str,
    ) -> MethodManagementResult<()> {
        self.calls.lock().push(SetMethodCall {
            cart_id,
            carrier_code: carrier_code.to_string(),
            method_code: method_code.to_string(),
        });
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
