//! # Method Cache
//!
//! Request-scoped memo of quote provider answers.
//!
//! Create one per estimate request and pass it to the selector; it is never
//! stored on a service.

use crate::domain::entities::CandidateMethod;
use crate::domain::value_objects::AddressId;
use std::collections::HashMap;

/// Candidate methods keyed by the shipping address row id.
///
/// An unsaved address is keyed by `None`.
#[derive(Debug, Clone, Default)]
pub struct MethodCache {
    entries: HashMap<Option<AddressId>, Vec<CandidateMethod>>,
}

impl MethodCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached candidates for `address_id`.
    #[must_use]
    pub fn get(&self, address_id: Option<AddressId>) -> Option<&[CandidateMethod]> {
        self.entries.get(&address_id).map(Vec::as_slice)
    }

    /// Caches `methods` for `address_id`, replacing earlier entries.
    pub fn insert(&mut self, address_id: Option<AddressId>, methods: Vec<CandidateMethod>) {
        self.entries.insert(address_id, methods);
    }

    /// Returns the number of cached addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
